use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a session's alerts for rendering or export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostureReport {
    pub generated_at: DateTime<Utc>,
    pub total_alerts: usize,
    /// Violation reasons, oldest first.
    pub reasons: Vec<String>,
}

impl PostureReport {
    pub fn from_session(session: &Session) -> Self {
        let reasons = session.alerts();
        Self {
            generated_at: Utc::now(),
            total_alerts: reasons.len(),
            reasons,
        }
    }

    /// Header line matching the on-screen alert list.
    pub fn summary(&self) -> String {
        format!("Bad Posture Alerts ({})", self.total_alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::PostureClassifier;
    use crate::fixtures::set_with_back_angle;
    use crate::landmarks::LandmarkFrame;

    #[test]
    fn report_reflects_the_buffer_in_order() {
        let mut session = Session::new(PostureClassifier::new(), 50);
        session.process_frame(&LandmarkFrame::new(set_with_back_angle(140.0)));
        session.process_frame(&LandmarkFrame::new(set_with_back_angle(165.0)));
        session.process_frame(&LandmarkFrame::new(set_with_back_angle(140.0)));

        let report = PostureReport::from_session(&session);
        assert_eq!(report.total_alerts, 2);
        assert_eq!(report.reasons, session.alerts());
        assert_eq!(report.summary(), "Bad Posture Alerts (2)");
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut session = Session::new(PostureClassifier::new(), 50);
        session.process_frame(&LandmarkFrame::new(set_with_back_angle(120.0)));
        let report = PostureReport::from_session(&session);

        let encoded = serde_json::to_string(&report).unwrap();
        let decoded: PostureReport = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, report);
    }
}
