use munkres::{solve_assignment, WeightMatrix, Weights};
use nalgebra as na;

use crate::config::TrackerConfig;
use crate::error::Error;
use crate::history::{PositionHistory, TimedPoint};
use crate::localizer::TargetEstimate;
use crate::predictor::Predictor;

const DUMMY_COST: f32 = 100_000.0;

/// One tracked person. The history and predictor are exclusively owned
/// here; dropping the target is the only way a warm predictor retires.
#[derive(Debug)]
pub struct Target {
    pub id: u32,
    pub history: PositionHistory,
    pub predictor: Predictor,
    pub last_estimate: TargetEstimate,
    pub position: na::Point3<f32>,
    pub missed: u32,
}

impl Target {
    fn new(id: u32, t: f32, est: TargetEstimate, pos: na::Point3<f32>, scene: &Scene) -> Self {
        let mut history = PositionHistory::with_capacity(scene.window);
        history.push(TimedPoint::new(pos.x, pos.y, t));

        Self {
            id,
            history,
            predictor: Predictor::new(scene.degree),
            last_estimate: est,
            position: pos,
            missed: 0,
        }
    }
}

/// Per-frame snapshot handed to the actuator layer. `predicted` is the
/// lead point when the target's history is warm; consumers fall back to
/// `position` when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub id: u32,
    pub position: na::Point3<f32>,
    pub depth: Option<f32>,
    pub chest_height: f32,
    pub predicted: Option<TimedPoint>,
    pub missed: u32,
}

/// Keeps stable per-target identities across frames. Detection order is
/// ephemeral, so each frame's localized positions are matched to live
/// targets by Hungarian assignment on 3D distance, gated by a radius;
/// leftovers spawn new targets, and targets unseen for too long retire.
pub struct Scene {
    targets: Vec<Target>,
    next_id: u32,
    window: usize,
    degree: usize,
    match_radius: f32,
    max_missed: u32,
}

impl Scene {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            targets: Vec::new(),
            next_id: 1,
            window: config.window,
            degree: config.degree,
            match_radius: config.match_radius,
            max_missed: config.max_missed,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn assign(&self, observed: &[na::Point3<f32>]) -> Vec<(usize, usize, f32)> {
        if self.targets.is_empty() || observed.is_empty() {
            return Vec::new();
        }

        let n = self.targets.len().max(observed.len());
        let cost_fn = |(r, c): (usize, usize)| {
            if r < self.targets.len() && c < observed.len() {
                na::distance(&self.targets[r].position, &observed[c])
            } else {
                DUMMY_COST
            }
        };
        let mut mat = WeightMatrix::from_fn(n, &cost_fn);

        let costs = WeightMatrix::from_fn(n, &cost_fn);

        match solve_assignment(&mut mat) {
            Ok(positions) => positions
                .into_iter()
                .filter(|p| p.row < self.targets.len() && p.column < observed.len())
                .map(|p| (p.row, p.column, costs.element_at(p)))
                .filter(|&(_, _, dist)| dist <= self.match_radius)
                .collect(),
            Err(_) => {
                log::warn!("target assignment could not be solved");
                Vec::new()
            }
        }
    }

    /// Ingest one frame's estimates at time `t` (frame index or seconds).
    /// Estimates without a 3D position carry nothing to match on and are
    /// skipped here; they are still visible in the localizer's output.
    pub fn update(&mut self, t: f32, estimates: &[Option<TargetEstimate>]) {
        let observed: Vec<(TargetEstimate, na::Point3<f32>)> = estimates
            .iter()
            .flatten()
            .filter_map(|est| est.position.map(|pos| (*est, pos)))
            .collect();

        let positions: Vec<na::Point3<f32>> = observed.iter().map(|(_, pos)| *pos).collect();

        let matches = self.assign(&positions);

        let mut target_hit = vec![false; self.targets.len()];
        let mut observation_used = vec![false; observed.len()];

        for (row, col, _) in matches {
            target_hit[row] = true;
            observation_used[col] = true;

            let (est, pos) = observed[col];
            let target = &mut self.targets[row];
            target.history.push(TimedPoint::new(pos.x, pos.y, t));
            target.position = pos;
            target.last_estimate = est;
            target.missed = 0;
        }

        for (idx, target) in self.targets.iter_mut().enumerate() {
            if !target_hit[idx] {
                target.missed += 1;
            }
        }

        let max_missed = self.max_missed;
        self.targets.retain(|target| target.missed <= max_missed);

        for (idx, (est, pos)) in observed.into_iter().enumerate() {
            if !observation_used[idx] {
                let target = Target::new(self.next_id, t, est, pos, self);
                self.next_id += 1;
                self.targets.push(target);
            }
        }
    }

    /// Snapshots for every live target, predictions included when warm.
    /// Ill-conditioned fits are logged and degrade to no prediction, same
    /// as a cold start from the consumer's point of view.
    pub fn tracks(&mut self) -> Vec<Track> {
        self.targets
            .iter_mut()
            .map(|target| {
                let predicted = match target.predictor.predict(&target.history) {
                    Ok(point) => Some(point),
                    Err(Error::InsufficientHistory { .. }) => None,
                    Err(err @ Error::IllConditionedFit { .. }) => {
                        log::warn!("target {}: {}", target.id, err);
                        None
                    }
                };

                Track {
                    id: target.id,
                    position: target.position,
                    depth: target.last_estimate.depth,
                    chest_height: target.last_estimate.chest_height,
                    predicted,
                    missed: target.missed,
                }
            })
            .collect()
    }
}
