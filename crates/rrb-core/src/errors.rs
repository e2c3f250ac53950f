/// Core error type for the relay.
///
/// Adapter crates should map their specific errors into this type so the
/// relay pipeline can handle failures consistently. Per-recipient delivery
/// failures never reach this type's callers; they are tallied and logged
/// inside the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Discovery produced an empty recipient set: nobody to notify, so the
    /// whole invocation fails.
    #[error("No subscribers found")]
    NoSubscribers,

    #[error("invalid submission: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
