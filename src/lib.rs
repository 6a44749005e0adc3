pub mod chest;
pub mod config;
pub mod depth;
pub mod error;
pub mod history;
pub mod keypoint;
pub mod localizer;
pub mod math;
pub mod predictor;
pub mod scene;

pub use config::TrackerConfig;
pub use depth::{Deproject, DepthFrame};
pub use error::Error;
pub use history::{PositionHistory, TimedPoint};
pub use keypoint::{Keypoint, KeypointIndex, PoseDetection};
pub use localizer::{Localizer, TargetEstimate};
pub use predictor::Predictor;
pub use scene::{Scene, Track};

/// One frame's output: raw estimates (one per processed detection, input
/// order preserved, index is not an identity) and the identity-stable
/// tracks with lead predictions where history allows.
#[derive(Debug)]
pub struct FrameReport {
    pub estimates: Vec<Option<TargetEstimate>>,
    pub tracks: Vec<Track>,
}

/// The per-rig pipeline: localize each frame's detections against the
/// depth map, maintain per-target histories, and lead every warm target.
/// Strictly one synchronous pass per frame.
pub struct LeadTracker {
    localizer: Localizer,
    scene: Scene,
    frame: u64,
}

impl LeadTracker {
    pub fn new(color_res: (u32, u32), depth_res: (u32, u32), config: TrackerConfig) -> Self {
        Self {
            localizer: Localizer::new(color_res, depth_res, &config),
            scene: Scene::new(&config),
            frame: 0,
        }
    }

    pub fn process_frame(
        &mut self,
        detections: &[PoseDetection],
        depth_frame: &DepthFrame,
        deproj: &impl Deproject,
    ) -> FrameReport {
        let t = self.frame as f32;
        self.frame += 1;

        let estimates = self.localizer.localize_all(detections, depth_frame, deproj);
        self.scene.update(t, &estimates);

        FrameReport {
            estimates,
            tracks: self.scene.tracks(),
        }
    }
}
