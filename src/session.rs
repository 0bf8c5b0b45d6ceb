use crate::classifier::{PostureClassifier, Verdict, ViolationKind};
use crate::landmarks::LandmarkFrame;
use uuid::Uuid;

/// Current posture of the tracked person, as seen by the debounce machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureState {
    Good,
    Bad,
}

/// Alert emitted on a good-to-bad transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEvent {
    kind: ViolationKind,
}

impl AlertEvent {
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn reason(&self) -> &'static str {
        self.kind.reason()
    }
}

/// Edge-triggered transition machine over successive verdicts.
///
/// An alert fires only when a violation arrives while the state is Good, so
/// a sustained bad stretch produces exactly one alert and recovery is
/// silent.
#[derive(Debug)]
pub struct TransitionMachine {
    state: PostureState,
}

impl TransitionMachine {
    pub fn new() -> Self {
        Self {
            state: PostureState::Good,
        }
    }

    pub fn state(&self) -> PostureState {
        self.state
    }

    pub fn observe(&mut self, verdict: Verdict) -> Option<AlertEvent> {
        match (self.state, verdict) {
            (PostureState::Good, Verdict::Violation(kind)) => {
                self.state = PostureState::Bad;
                Some(AlertEvent { kind })
            }
            (PostureState::Bad, Verdict::Ok) => {
                self.state = PostureState::Good;
                None
            }
            // Good+Ok and Bad+Violation are both quiet.
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = PostureState::Good;
    }
}

/// Bounded, append-only record of alert reasons, oldest first.
///
/// Once the capacity is reached further appends are silently dropped; the
/// buffer never evicts. Only a session reset empties it.
#[derive(Debug)]
pub struct AlertBuffer {
    records: Vec<String>,
    capacity: usize,
}

impl AlertBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    pub fn append(&mut self, reason: impl Into<String>) {
        if self.records.len() < self.capacity {
            self.records.push(reason.into());
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ordered copy of the stored reasons for display or export.
    pub fn snapshot(&self) -> Vec<String> {
        self.records.clone()
    }
}

/// One analysis run: the classifier, the debounce machine and the alert
/// buffer, scoped together so concurrent test fixtures stay isolated.
pub struct Session {
    session_id: Uuid,
    classifier: PostureClassifier,
    machine: TransitionMachine,
    buffer: AlertBuffer,
}

impl Session {
    pub fn new(classifier: PostureClassifier, alert_capacity: usize) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            classifier,
            machine: TransitionMachine::new(),
            buffer: AlertBuffer::new(alert_capacity),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> PostureState {
        self.machine.state()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.buffer.snapshot()
    }

    pub fn alert_count(&self) -> usize {
        self.buffer.len()
    }

    /// Runs one frame through classification and the transition machine.
    ///
    /// A frame on which the model detected no landmarks leaves the machine
    /// untouched. The returned event, if any, has already been recorded in
    /// the alert buffer; persisting it is the caller's concern.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Option<AlertEvent> {
        let landmarks = frame.landmarks()?;
        let verdict = self.classifier.classify(landmarks);
        let event = self.machine.observe(verdict);
        if let Some(event) = event {
            self.buffer.append(event.reason());
        }
        event
    }

    /// Restores the session to its initial state: posture Good, buffer
    /// empty. Applied by the coordinator strictly between frames.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.buffer.clear();
    }
}
