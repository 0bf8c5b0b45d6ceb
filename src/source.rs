use crate::error::SourceError;
use crate::landmarks::{Landmark, LandmarkFrame, LandmarkSet};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// Default playback pacing, ~30 fps.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Seam between the pipeline and whatever produces landmark frames.
///
/// Delivery from the pose model is asynchronous; the pipeline consumes it
/// as a pull-based sequence, one frame at a time.
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame, or None once the source is exhausted.
    async fn next_frame(&mut self) -> Option<LandmarkFrame>;
}

/// Push-style delivery: the capture side holds the sender and the pipeline
/// pulls frames off the channel. Dropping the sender ends the session.
pub struct ChannelSource {
    rx: mpsc::Receiver<LandmarkFrame>,
}

impl ChannelSource {
    pub fn channel(buffer: usize) -> (mpsc::Sender<LandmarkFrame>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx })
    }
}

#[async_trait]
impl FrameSource for ChannelSource {
    async fn next_frame(&mut self) -> Option<LandmarkFrame> {
        self.rx.recv().await
    }
}

#[derive(Debug, Deserialize)]
struct ScriptLine {
    // Absent or null means the model saw nobody on that frame.
    #[serde(default)]
    landmarks: Option<Vec<Landmark>>,
}

/// Replays a recorded landmark script, one JSON object per line, on a fixed
/// clock tick, modeling uploaded-video playback.
#[derive(Debug)]
pub struct PlaybackSource {
    frames: std::vec::IntoIter<Option<LandmarkSet>>,
    period: Duration,
    interval: Option<Interval>,
}

impl PlaybackSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Read(e, path.display().to_string()))?;

        let mut frames = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed: ScriptLine = serde_json::from_str(line)
                .map_err(|e| SourceError::Decode(e, number + 1))?;
            frames.push(parsed.landmarks.map(LandmarkSet::new));
        }

        Ok(Self {
            frames: frames.into_iter(),
            period: DEFAULT_FRAME_INTERVAL,
            interval: None,
        })
    }

    /// Overrides the playback clock period.
    pub fn with_frame_interval(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl FrameSource for PlaybackSource {
    async fn next_frame(&mut self) -> Option<LandmarkFrame> {
        // The interval is created lazily so construction does not need a
        // runtime.
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;

        self.frames.next().map(|landmarks| match landmarks {
            Some(set) => LandmarkFrame::new(set),
            None => LandmarkFrame::empty(),
        })
    }
}
