pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod report;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classifier::{PostureClassifier, PostureThresholds, Verdict, ViolationKind};
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::{AppError, ConfigError, DispatchError, SourceError};
pub use landmarks::{Landmark, LandmarkFrame, LandmarkSet, PoseLandmark};
pub use report::PostureReport;
pub use session::{AlertBuffer, AlertEvent, PostureState, Session, TransitionMachine};
