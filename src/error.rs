//! Error types for the brand wizard.

/// Top-level error type for the wizard and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Analyze error: {0}")]
    Analyze(#[from] AnalyzeError),
}

/// Draft-store errors.
///
/// These never escape the wizard: `DraftPersistence` catches them, logs,
/// and treats the draft as absent.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Remote submission errors. Recoverable: the draft is preserved and the
/// user stays on the current step.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Submission rejected: {message}")]
    Rejected { message: String },

    #[error("Invalid response from brand API: {0}")]
    InvalidResponse(String),
}

/// Website-analysis errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Invalid website URL: {0}")]
    InvalidUrl(String),

    #[error("Analysis fetch failed: {0}")]
    Fetch(String),
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
