//! Error taxonomy shared by every `fastping` crate.
//!
//! Every failure is fatal for the call that raised it: nothing is retried and
//! no partial result is handed back.

/// Result type alias for fastping operations
pub type Result<T> = std::result::Result<T, FastPingError>;

#[derive(Debug, thiserror::Error)]
pub enum FastPingError {
    /// The probing executable is missing or cannot emit CSV records.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The call itself was malformed (input modes, status filter).
    #[error("usage error: {0}")]
    Usage(String),

    /// A target is not an acceptable IPv4 unicast host or network.
    #[error("{target}: {reason}")]
    AddressRange { target: String, reason: String },

    /// The probing executable produced a record that could not be understood.
    #[error("unexpected probe output on line {line}: {detail}")]
    OutputFormat { line: u64, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FastPingError {
    pub fn address_range(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AddressRange {
            target: target.into(),
            reason: reason.into(),
        }
    }
}
