use nalgebra as na;

use crate::chest::{ChestBound, ChestKeypoints};
use crate::config::TrackerConfig;
use crate::depth::{Deproject, DepthFrame};
use crate::keypoint::PoseDetection;

/// One frame's localization result for one detection. Created fresh every
/// frame and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEstimate {
    /// Chest center in color-frame pixels.
    pub center: (i32, i32),
    /// Median chest depth in sensor units; `None` when the chest bound
    /// yielded no depth samples.
    pub depth: Option<f32>,
    /// Shoulder-to-hip midpoint distance in pixels, an apparent-size proxy.
    pub chest_height: f32,
    /// Deprojected 3D position; `None` without depth or when the camera
    /// driver rejects the point.
    pub position: Option<na::Point3<f32>>,
}

/// Turns pose detections plus a depth frame into per-target estimates.
/// The color-to-depth pixel scale is fixed per rig and computed once.
#[derive(Debug, Clone)]
pub struct Localizer {
    keypoint_confidence: f32,
    min_detection_score: f32,
    max_targets: usize,
    scale: (f32, f32),
}

impl Localizer {
    pub fn new(color_res: (u32, u32), depth_res: (u32, u32), config: &TrackerConfig) -> Self {
        Self {
            keypoint_confidence: config.keypoint_confidence,
            min_detection_score: config.min_detection_score,
            max_targets: config.max_targets,
            scale: (
                depth_res.0 as f32 / color_res.0 as f32,
                depth_res.1 as f32 / color_res.1 as f32,
            ),
        }
    }

    /// `None` when any chest keypoint is below the confidence threshold —
    /// a partially visible target is "do not aim", not a guess.
    #[inline]
    pub fn chest_keypoints(&self, det: &PoseDetection) -> Option<ChestKeypoints> {
        ChestKeypoints::from_detection(det, self.keypoint_confidence)
    }

    /// Invalid keypoints fail the whole estimate. Missing depth keeps the
    /// center and height populated with `depth`/`position` unset, and the
    /// caller decides whether that is usable.
    pub fn estimate(
        &self,
        det: &PoseDetection,
        depth_frame: &DepthFrame,
        deproj: &impl Deproject,
    ) -> Option<TargetEstimate> {
        let chest = self.chest_keypoints(det)?;
        let bound = ChestBound::from_keypoints(&chest);
        let center = bound.center();

        let depth = depth_frame.sample_median(&bound, self.scale);
        let position =
            depth.and_then(|d| deproj.deproject(center.0 as f32, center.1 as f32, d));

        Some(TargetEstimate {
            center,
            depth,
            chest_height: chest.height(),
            position,
        })
    }

    /// One entry per processed detection, input order preserved, capped at
    /// `max_targets`. Index position is ephemeral and not a target
    /// identity; see `Scene` for that.
    pub fn localize_all(
        &self,
        detections: &[PoseDetection],
        depth_frame: &DepthFrame,
        deproj: &impl Deproject,
    ) -> Vec<Option<TargetEstimate>> {
        detections
            .iter()
            .take(self.max_targets)
            .map(|det| {
                if det.score < self.min_detection_score {
                    return None;
                }

                self.estimate(det, depth_frame, deproj)
            })
            .collect()
    }
}
