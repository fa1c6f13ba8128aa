/// Convenience result type used across Deeptile.
pub type DeeptileResult<T> = Result<T, DeeptileError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum DeeptileError {
    /// Invalid configuration or construction arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A broken contract from the calling layer: mismatched array lengths,
    /// non-monotone sample offsets, or non-finite/negative depths.
    #[error("contract violation: {0}")]
    Contract(String),

    /// A batch was cancelled cooperatively; no output was published.
    #[error("cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeeptileError {
    /// Build a [`DeeptileError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DeeptileError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }
}
