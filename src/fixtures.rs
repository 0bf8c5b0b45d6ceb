//! Landmark-set builders shared by the unit tests.

use crate::landmarks::{Landmark, LandmarkSet, PoseLandmark, LANDMARK_COUNT};

/// Full 33-slot set with the given points placed and every other slot at the
/// origin.
pub(crate) fn build_set(entries: &[(PoseLandmark, f32, f32)]) -> LandmarkSet {
    let mut landmarks = vec![Landmark::new(0.0, 0.0); LANDMARK_COUNT];
    for &(index, x, y) in entries {
        landmarks[index as usize] = Landmark::new(x, y);
    }
    LandmarkSet::new(landmarks)
}

/// Left-side profile of a seated person with the shoulder-hip-knee angle set
/// to `degrees` and the knee and neck checks passing.
pub(crate) fn set_with_back_angle(degrees: f32) -> LandmarkSet {
    let radians = degrees.to_radians();
    // Shoulder sits straight above the hip, so the knee ray at `degrees`
    // from vertical produces exactly the requested hip angle.
    let knee_x = 0.5 + 0.3 * radians.sin();
    let knee_y = 0.5 - 0.3 * radians.cos();
    build_set(&[
        (PoseLandmark::Nose, 0.5, 0.2),
        (PoseLandmark::LeftShoulder, 0.5, 0.3),
        (PoseLandmark::LeftHip, 0.5, 0.5),
        (PoseLandmark::LeftKnee, knee_x, knee_y),
        (PoseLandmark::LeftAnkle, knee_x, knee_y + 0.15),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;

    #[test]
    fn built_sets_hit_the_requested_angle() {
        for degrees in [120.0_f32, 140.0, 149.9, 160.0, 175.0] {
            let set = set_with_back_angle(degrees);
            let angle = geometry::angle_at(
                set.get(PoseLandmark::LeftHip).unwrap(),
                set.get(PoseLandmark::LeftShoulder).unwrap(),
                set.get(PoseLandmark::LeftKnee).unwrap(),
            );
            assert!((angle - degrees).abs() < 0.05, "{angle} vs {degrees}");
        }
    }
}
