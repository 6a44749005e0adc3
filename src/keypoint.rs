use serde_derive::{Deserialize, Serialize};

/// COCO 17-keypoint indices as produced by the upstream pose model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const COUNT: usize = 17;
}

/// One scored keypoint in color-frame pixel coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    #[inline]
    pub fn is_valid(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// One detected person: 17 scored keypoints plus the detection score.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PoseDetection {
    pub keypoints: [Keypoint; KeypointIndex::COUNT],
    #[serde(rename = "p")]
    pub score: f32,
}

impl PoseDetection {
    pub fn new(keypoints: [Keypoint; KeypointIndex::COUNT], score: f32) -> Self {
        Self { keypoints, score }
    }

    #[inline]
    pub fn get(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypoint_is_valid() {
        let kp = Keypoint::new(10.0, 20.0, 0.7);
        assert!(kp.is_valid(0.6));
        assert!(!kp.is_valid(0.8));
    }

    #[test]
    fn test_detection_get() {
        let mut keypoints = [Keypoint::default(); KeypointIndex::COUNT];
        keypoints[KeypointIndex::LeftShoulder as usize] = Keypoint::new(100.0, 100.0, 0.9);

        let det = PoseDetection::new(keypoints, 0.8);
        let ls = det.get(KeypointIndex::LeftShoulder);
        assert_eq!(ls.x, 100.0);
        assert_eq!(ls.confidence, 0.9);
    }
}
