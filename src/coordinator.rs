use crate::classifier::PostureClassifier;
use crate::config::Configuration;
use crate::dispatch::{HttpLogDispatcher, LogDispatcher};
use crate::error::AppError;
use crate::report::PostureReport;
use crate::session::Session;
use crate::source::FrameSource;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

const CONTROL_BUFFER_SIZE: usize = 8;

/// Control messages for a running session, applied strictly between frames.
pub enum SessionControl {
    Reset,
    Snapshot(oneshot::Sender<PostureReport>),
}

/// Runs one analysis session: pulls frames from the source, feeds them
/// through the session and fans alerts out to the log sink.
pub struct Coordinator {
    pipeline_task: Option<tokio::task::JoinHandle<Session>>,
    control_tx: mpsc::Sender<SessionControl>,
    cancel_token: CancellationToken,
}

impl Coordinator {
    fn new(
        configuration: Configuration,
        source: Box<dyn FrameSource>,
        dispatcher: Arc<dyn LogDispatcher>,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let (control_tx, control_rx) = mpsc::channel(CONTROL_BUFFER_SIZE);

        let classifier =
            PostureClassifier::new().with_thresholds(configuration.thresholds.clone());
        let session = Session::new(classifier, configuration.alert_capacity);

        Self {
            pipeline_task: Some(Self::start_pipeline_task(
                source,
                session,
                dispatcher,
                control_rx,
                cancel_token.clone(),
            )),
            control_tx,
            cancel_token,
        }
    }

    fn start_pipeline_task(
        mut source: Box<dyn FrameSource>,
        mut session: Session,
        dispatcher: Arc<dyn LogDispatcher>,
        mut control_rx: mpsc::Receiver<SessionControl>,
        cancel_token: CancellationToken,
    ) -> tokio::task::JoinHandle<Session> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel_token.cancelled() => {
                        tracing::info!("pipeline cancelled");
                        break;
                    }
                    frame = source.next_frame() => match frame {
                        Some(frame) => {
                            if let Some(event) = session.process_frame(&frame) {
                                tracing::info!(reason = event.reason(), "posture alert");
                                // Fire and forget: a slow or failing sink
                                // must never backpressure frame processing.
                                let dispatcher = dispatcher.clone();
                                tokio::spawn(async move {
                                    if let Err(e) = dispatcher.dispatch(event.reason()).await {
                                        tracing::warn!("Failed to persist alert: {}", e);
                                    }
                                });
                            }
                        }
                        None => {
                            tracing::info!("frame source exhausted");
                            break;
                        }
                    },
                    Some(control) = control_rx.recv() => match control {
                        SessionControl::Reset => {
                            session.reset();
                            tracing::info!("session reset");
                        }
                        SessionControl::Snapshot(reply) => {
                            let _ = reply.send(PostureReport::from_session(&session));
                        }
                    },
                }
            }
            session
        })
    }

    /// Clears the posture state and the alert buffer. Takes effect between
    /// frames, never in the middle of one.
    pub async fn reset(&self) -> Result<(), AppError> {
        self.control_tx
            .send(SessionControl::Reset)
            .await
            .map_err(|_| AppError::Pipeline("Pipeline is not running".to_string()))
    }

    /// Snapshot of the alert buffer as of the last processed frame.
    pub async fn report(&self) -> Result<PostureReport, AppError> {
        let (tx, rx) = oneshot::channel();
        self.control_tx
            .send(SessionControl::Snapshot(tx))
            .await
            .map_err(|_| AppError::Pipeline("Pipeline is not running".to_string()))?;
        rx.await
            .map_err(|_| AppError::Pipeline("Pipeline dropped the snapshot request".to_string()))
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// Waits for the source to run dry (or `stop`) and hands back the
    /// finished session.
    pub async fn wait(mut self) -> Result<Session, AppError> {
        let task = self
            .pipeline_task
            .take()
            .ok_or_else(|| AppError::Pipeline("Pipeline already joined".to_string()))?;
        task.await
            .map_err(|e| AppError::Pipeline(format!("Pipeline task failed: {e}")))
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    source: Option<Box<dyn FrameSource>>,
    dispatcher: Option<Arc<dyn LogDispatcher>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            source: None,
            dispatcher: None,
        }
    }

    // Sets the frame source. Required.
    pub fn source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    // Replaces the dispatcher built from the configured log endpoint.
    pub fn dispatcher(mut self, dispatcher: Arc<dyn LogDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    // Overrides the configured alert buffer capacity.
    pub fn alert_capacity(mut self, alert_capacity: usize) -> Self {
        self.configuration.alert_capacity = alert_capacity;
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        let CoordinatorBuilder {
            configuration,
            source,
            dispatcher,
        } = self;
        let source =
            source.ok_or_else(|| AppError::Pipeline("Frame source not set".to_string()))?;
        let dispatcher = dispatcher.unwrap_or_else(|| {
            Arc::new(HttpLogDispatcher::new(configuration.log_endpoint.clone()))
        });
        Ok(Coordinator::new(configuration, source, dispatcher))
    }
}
