use crate::classifier::PostureThresholds;
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Base URL of the log sink.
    pub log_endpoint: String,
    /// Alert buffer capacity per session.
    pub alert_capacity: usize,
    pub frame_buffer_size: usize,
    /// Playback clock period in milliseconds.
    pub frame_interval_ms: u64,
    pub thresholds: PostureThresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log_endpoint: "http://localhost:5000".to_string(),
            alert_capacity: 50,
            frame_buffer_size: 60,
            frame_interval_ms: 33,
            thresholds: PostureThresholds::default(),
        }
    }
}

impl Configuration {
    /// Layers an optional config file and `POSTURE_`-prefixed environment
    /// variables over the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("POSTURE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
