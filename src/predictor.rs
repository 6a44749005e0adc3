use nalgebra as na;

use crate::error::Error;
use crate::history::{PositionHistory, TimedPoint};
use crate::math::{poly_ls, polyval};

/// Minimum history length for a prediction: two staggered windows of at
/// least two samples each.
pub const MIN_SAMPLES: usize = 3;

/// The four fitted curves behind one prediction: per axis, one fit over
/// the early window (all but the newest sample) and one over the late
/// window (all but the oldest), each evaluated at the lead time. Times are
/// shifted so the window starts at zero; `lead_time` is in that shifted
/// coordinate.
#[derive(Debug, Clone)]
pub struct RegressionModel {
    pub x_early: na::DVector<f64>,
    pub x_late: na::DVector<f64>,
    pub y_early: na::DVector<f64>,
    pub y_late: na::DVector<f64>,
    pub lead_time: f64,
    pub x_at_lead: (f64, f64),
    pub y_at_lead: (f64, f64),
}

#[derive(Debug, Clone)]
enum FitState {
    Cold,
    Warm {
        version: u64,
        model: RegressionModel,
        prediction: TimedPoint,
    },
}

/// Dual-window polynomial extrapolator for one target.
///
/// Two same-degree fits over staggered sub-windows are evaluated one step
/// past the next frame and combined as `2 * late - early`. The late window
/// is the more current model; the combination cancels the lag a single
/// trailing-window fit carries. Predictions are cached against the history
/// version and recomputed only after an append.
#[derive(Debug, Clone)]
pub struct Predictor {
    degree: usize,
    state: FitState,
}

impl Predictor {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            state: FitState::Cold,
        }
    }

    #[inline]
    pub fn is_warm(&self) -> bool {
        matches!(self.state, FitState::Warm { .. })
    }

    /// The model behind the cached prediction, if any.
    pub fn model(&self) -> Option<&RegressionModel> {
        match &self.state {
            FitState::Warm { model, .. } => Some(model),
            FitState::Cold => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = FitState::Cold;
    }

    /// Predicted position two time steps past the newest sample, i.e. one
    /// step beyond the frame about to arrive, so the consumer leads the
    /// target instead of chasing its stale position.
    pub fn predict(&mut self, history: &PositionHistory) -> Result<TimedPoint, Error> {
        let len = history.len();
        if len < MIN_SAMPLES {
            return Err(Error::InsufficientHistory {
                have: len,
                need: MIN_SAMPLES,
            });
        }

        if let FitState::Warm {
            version,
            prediction,
            ..
        } = &self.state
        {
            if *version == history.version() {
                return Ok(*prediction);
            }
        }

        let (model, prediction) = self.fit(history)?;
        self.state = FitState::Warm {
            version: history.version(),
            model,
            prediction,
        };

        Ok(prediction)
    }

    fn fit(&self, history: &PositionHistory) -> Result<(RegressionModel, TimedPoint), Error> {
        let len = history.len();
        let window = len - 1;

        // A k-sample window pins down at most a degree k-1 curve.
        let degree = self.degree.min(window - 1);

        // Shifting times to the window origin keeps the Vandermonde system
        // conditioned for long-lived targets.
        let points: Vec<TimedPoint> = history.iter().copied().collect();
        let t0 = points[0].t as f64;

        let axis = |sel: fn(&TimedPoint) -> f32, range: std::ops::Range<usize>| {
            let ts = na::DVector::from_iterator(
                window,
                points[range.clone()].iter().map(|p| p.t as f64 - t0),
            );
            let vs = na::DVector::from_iterator(window, points[range].iter().map(|p| sel(p) as f64));
            (ts, vs)
        };

        let ill = || Error::IllConditionedFit { points: len };

        let (t_early, x_early_v) = axis(|p| p.x, 0..window);
        let (t_late, x_late_v) = axis(|p| p.x, 1..len);
        let (_, y_early_v) = axis(|p| p.y, 0..window);
        let (_, y_late_v) = axis(|p| p.y, 1..len);

        let x_early = poly_ls(&t_early, &x_early_v, degree).ok_or_else(ill)?;
        let x_late = poly_ls(&t_late, &x_late_v, degree).ok_or_else(ill)?;
        let y_early = poly_ls(&t_early, &y_early_v, degree).ok_or_else(ill)?;
        let y_late = poly_ls(&t_late, &y_late_v, degree).ok_or_else(ill)?;

        let lead_time = points[len - 1].t as f64 - t0 + 2.0;

        let x_at_lead = (polyval(&x_early, lead_time), polyval(&x_late, lead_time));
        let y_at_lead = (polyval(&y_early, lead_time), polyval(&y_late, lead_time));

        let px = 2.0 * x_at_lead.1 - x_at_lead.0;
        let py = 2.0 * y_at_lead.1 - y_at_lead.0;

        if !px.is_finite() || !py.is_finite() {
            return Err(ill());
        }

        let prediction = TimedPoint::new(px as f32, py as f32, (t0 + lead_time) as f32);
        let model = RegressionModel {
            x_early,
            x_late,
            y_early,
            y_late,
            lead_time,
            x_at_lead,
            y_at_lead,
        };

        Ok((model, prediction))
    }
}
