use nalgebra as na;

use leadtrack::{
    Deproject, DepthFrame, Keypoint, KeypointIndex, LeadTracker, PoseDetection, TrackerConfig,
};

/// Keeps pixel coordinates and reports depth as z; refuses zero depth the
/// way the camera driver does.
struct FlatDeprojector;

impl Deproject for FlatDeprojector {
    fn deproject(&self, px: f32, py: f32, depth: f32) -> Option<na::Point3<f32>> {
        if depth <= 0.0 {
            return None;
        }
        Some(na::Point3::new(px, py, depth))
    }
}

fn detection_at(cx: f32, cy: f32) -> PoseDetection {
    let mut keypoints = [Keypoint::default(); KeypointIndex::COUNT];
    keypoints[KeypointIndex::LeftShoulder as usize] = Keypoint::new(cx - 20.0, cy - 50.0, 0.9);
    keypoints[KeypointIndex::RightShoulder as usize] = Keypoint::new(cx + 20.0, cy - 50.0, 0.9);
    keypoints[KeypointIndex::LeftHip as usize] = Keypoint::new(cx - 20.0, cy + 50.0, 0.9);
    keypoints[KeypointIndex::RightHip as usize] = Keypoint::new(cx + 20.0, cy + 50.0, 0.9);

    PoseDetection::new(keypoints, 0.9)
}

fn tracker() -> LeadTracker {
    LeadTracker::new((320, 240), (320, 240), TrackerConfig::default())
}

#[test]
fn single_detection_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    let depth = DepthFrame::constant(320, 240, 2000);
    let report = tracker().process_frame(&[detection_at(120.0, 150.0)], &depth, &FlatDeprojector);

    assert_eq!(report.estimates.len(), 1);
    let est = report.estimates[0].unwrap();
    assert_eq!(est.center, (120, 150));
    assert_eq!(est.depth, Some(2000.0));
    assert!((est.chest_height - 100.0).abs() < 1e-6);

    assert_eq!(report.tracks.len(), 1);
    let track = report.tracks[0];
    assert_eq!(track.position, na::Point3::new(120.0, 150.0, 2000.0));
    // One sample: no lead yet, the consumer aims at the raw position.
    assert!(track.predicted.is_none());
}

#[test]
fn lead_appears_after_three_frames() {
    let _ = env_logger::builder().is_test(true).try_init();

    let depth = DepthFrame::constant(320, 240, 2000);
    let mut tracker = tracker();

    // Target walks right 10 px per frame.
    let mut report = None;
    for i in 0..3 {
        let det = detection_at(100.0 + 10.0 * i as f32, 150.0);
        report = Some(tracker.process_frame(&[det], &depth, &FlatDeprojector));
    }

    let report = report.unwrap();
    assert_eq!(report.tracks.len(), 1);

    let predicted = report.tracks[0].predicted.unwrap();
    // Linear walk, lead two steps past the newest sample: x = 100 + 10 * 4.
    assert_eq!(predicted.t, 4.0);
    assert!((predicted.x - 140.0).abs() < 1e-2);
    assert!((predicted.y - 150.0).abs() < 1e-2);
}

#[test]
fn occluded_chest_is_reported_but_not_tracked() {
    let depth = DepthFrame::constant(320, 240, 2000);
    let mut tracker = tracker();

    let mut occluded = detection_at(200.0, 150.0);
    occluded.keypoints[KeypointIndex::LeftHip as usize].confidence = 0.3;

    let report =
        tracker.process_frame(&[detection_at(100.0, 150.0), occluded], &depth, &FlatDeprojector);

    assert_eq!(report.estimates.len(), 2);
    assert!(report.estimates[0].is_some());
    assert!(report.estimates[1].is_none());
    assert_eq!(report.tracks.len(), 1);
}

#[test]
fn identity_survives_detection_reordering() {
    let depth = DepthFrame::constant(320, 240, 2000);
    let mut tracker = tracker();

    let report = tracker.process_frame(
        &[detection_at(60.0, 150.0), detection_at(260.0, 150.0)],
        &depth,
        &FlatDeprojector,
    );
    let mut ids: Vec<u32> = report.tracks.iter().map(|t| t.id).collect();
    ids.sort_unstable();

    // Same two people, swapped detection order.
    let report = tracker.process_frame(
        &[detection_at(262.0, 150.0), detection_at(63.0, 150.0)],
        &depth,
        &FlatDeprojector,
    );

    assert_eq!(report.tracks.len(), 2);
    let left = report.tracks.iter().find(|t| t.position.x < 160.0).unwrap();
    let right = report.tracks.iter().find(|t| t.position.x > 160.0).unwrap();
    assert_eq!(left.id, ids[0]);
    assert_eq!(right.id, ids[1]);
}

#[test]
fn lost_target_retires_and_returns_with_fresh_id() {
    let depth = DepthFrame::constant(320, 240, 2000);
    let config = TrackerConfig {
        max_missed: 2,
        ..TrackerConfig::default()
    };
    let mut tracker = LeadTracker::new((320, 240), (320, 240), config);

    let report = tracker.process_frame(&[detection_at(120.0, 150.0)], &depth, &FlatDeprojector);
    let original = report.tracks[0].id;

    for _ in 0..4 {
        tracker.process_frame(&[], &depth, &FlatDeprojector);
    }

    let report = tracker.process_frame(&[detection_at(120.0, 150.0)], &depth, &FlatDeprojector);
    assert_eq!(report.tracks.len(), 1);
    assert_ne!(report.tracks[0].id, original);
}
