use thiserror::Error;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Source Error: {0}")]
    Source(#[from] SourceError),
    #[error("Dispatch Error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("Report Error: {0}")]
    Report(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

// Frame source error type
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read landmark script {1}: {0}")]
    Read(std::io::Error, String),
    #[error("Failed to decode landmark script line {1}: {0}")]
    Decode(serde_json::Error, usize),
}

// Log sink error type
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Failed to reach log sink: {0}")]
    Network(String),
    #[error("Log sink rejected the request with status {0}")]
    Server(u16),
    #[error("Failed to decode log sink response: {0}")]
    Decode(String),
}
