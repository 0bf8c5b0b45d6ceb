use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of slots in the pose model's landmark schema.
pub const LANDMARK_COUNT: usize = 33;

/// A tracked anatomical point with normalized planar coordinates.
///
/// Depth and visibility are carried through from the model but the posture
/// checks only consult x and y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

fn default_visibility() -> f32 {
    1.0
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }
}

/// Indices into the 33-slot landmark schema. Only the left-side subset
/// consulted by the posture checks is named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftShoulder = 11,
    LeftHip = 23,
    LeftKnee = 25,
    LeftAnkle = 27,
}

/// One landmark set as delivered by the pose model, indexed by the fixed
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet(Vec<Landmark>);

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    /// Looks up a landmark by schema index. Returns None when the set is
    /// shorter than the schema expects.
    pub fn get(&self, index: PoseLandmark) -> Option<&Landmark> {
        self.0.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}

/// One observation from the frame source: either a detected landmark set or
/// an explicit "no landmarks this frame" marker.
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    frame_id: Uuid,
    captured_at: DateTime<Utc>,
    landmarks: Option<LandmarkSet>,
}

impl LandmarkFrame {
    pub fn new(landmarks: LandmarkSet) -> Self {
        Self {
            frame_id: Uuid::new_v4(),
            captured_at: Utc::now(),
            landmarks: Some(landmarks),
        }
    }

    /// A frame on which the model detected nobody.
    pub fn empty() -> Self {
        Self {
            frame_id: Uuid::new_v4(),
            captured_at: Utc::now(),
            landmarks: None,
        }
    }

    pub fn frame_id(&self) -> Uuid {
        self.frame_id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }
}
