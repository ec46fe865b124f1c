use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown time range: {0:?} (expected 1h, 4h, 8h or 24h)")]
    InvalidTimeRange(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("perturbation scheduler is already running")]
    AlreadyRunning,

    #[error("perturbation scheduler needs a tokio runtime to start")]
    NoRuntime,

    #[error("media store i/o failed: {0}")]
    MediaIo(#[from] std::io::Error),

    #[error("media registry encoding failed: {0}")]
    MediaEncoding(#[from] serde_json::Error),
}
