use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackerConfig {
    /// Per-keypoint confidence required for all four chest keypoints.
    #[serde(default = "default_keypoint_confidence")]
    pub keypoint_confidence: f32,

    /// Detections scored below this by the upstream model are skipped.
    #[serde(default = "default_min_detection_score")]
    pub min_detection_score: f32,

    /// Detections processed per frame; the rest are ignored.
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,

    /// Regression degree, clamped to the fit window length minus one.
    #[serde(default = "default_degree")]
    pub degree: usize,

    /// Position history capacity, nominally one second of frames.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Assignment gate: a detection farther than this from every live
    /// target spawns a new one. Same units as the deprojected positions.
    #[serde(default = "default_match_radius")]
    pub match_radius: f32,

    /// Frames a target survives without a matching detection.
    #[serde(default = "default_max_missed")]
    pub max_missed: u32,
}

fn default_keypoint_confidence() -> f32 {
    0.6
}

fn default_min_detection_score() -> f32 {
    0.7
}

fn default_max_targets() -> usize {
    6
}

fn default_degree() -> usize {
    2
}

fn default_window() -> usize {
    30
}

fn default_match_radius() -> f32 {
    400.0
}

fn default_max_missed() -> u32 {
    30
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            keypoint_confidence: default_keypoint_confidence(),
            min_detection_score: default_min_detection_score(),
            max_targets: default_max_targets(),
            degree: default_degree(),
            window: default_window(),
            match_radius: default_match_radius(),
            max_missed: default_max_missed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.keypoint_confidence, 0.6);
        assert_eq!(config.min_detection_score, 0.7);
        assert_eq!(config.max_targets, 6);
        assert_eq!(config.degree, 2);
        assert_eq!(config.window, 30);
    }
}
