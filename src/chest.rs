use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::keypoint::{KeypointIndex, Keypoint, PoseDetection};

/// The four chest keypoints of one detection, in color-frame pixels.
/// Only constructed when every confidence clears the threshold; a partially
/// visible chest (e.g. target in profile) means "do not aim", not a guess.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ChestKeypoints {
    pub left_shoulder: Keypoint,
    pub right_shoulder: Keypoint,
    pub left_hip: Keypoint,
    pub right_hip: Keypoint,
}

impl ChestKeypoints {
    pub fn from_detection(det: &PoseDetection, threshold: f32) -> Option<Self> {
        let left_shoulder = *det.get(KeypointIndex::LeftShoulder);
        let right_shoulder = *det.get(KeypointIndex::RightShoulder);
        let left_hip = *det.get(KeypointIndex::LeftHip);
        let right_hip = *det.get(KeypointIndex::RightHip);

        let all_valid = [left_shoulder, right_shoulder, left_hip, right_hip]
            .iter()
            .all(|kp| kp.is_valid(threshold));

        if !all_valid {
            return None;
        }

        Some(Self {
            left_shoulder,
            right_shoulder,
            left_hip,
            right_hip,
        })
    }

    /// Pixel distance between the shoulder midpoint and the hip midpoint,
    /// an apparent-size proxy consumed by downstream range heuristics.
    pub fn height(&self) -> f32 {
        let shoulder_mid = na::Point2::new(
            (self.left_shoulder.x + self.right_shoulder.x) / 2.0,
            (self.left_shoulder.y + self.right_shoulder.y) / 2.0,
        );
        let hip_mid = na::Point2::new(
            (self.left_hip.x + self.right_hip.x) / 2.0,
            (self.left_hip.y + self.right_hip.y) / 2.0,
        );

        na::distance(&shoulder_mid, &hip_mid)
    }
}

/// Axis-aligned chest rectangle in integer color-frame pixels, used as the
/// depth-sampling region and to place the chest center.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestBound {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl ChestBound {
    /// Shoulders bound the left/top edges, hips the right/bottom edges.
    /// Coordinates are truncated, not rounded.
    pub fn from_keypoints(chest: &ChestKeypoints) -> Self {
        let xmin = chest.left_shoulder.x.min(chest.right_shoulder.x);
        let xmax = chest.left_hip.x.max(chest.right_hip.x);
        let ymin = chest.left_shoulder.y.min(chest.right_shoulder.y);
        let ymax = chest.left_hip.y.max(chest.right_hip.y);

        Self {
            xmin: xmin as i32,
            ymin: ymin as i32,
            xmax: xmax as i32,
            ymax: ymax as i32,
        }
    }

    #[inline]
    pub fn center(&self) -> (i32, i32) {
        ((self.xmin + self.xmax) / 2, (self.ymin + self.ymax) / 2)
    }
}
