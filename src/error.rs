use thiserror::Error;

/// Custom error types for the bitframer library.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload source delivered something other than a byte blob.
    ///
    /// This is a contract violation by the producer of PDUs, not a transient
    /// condition; the current production call is aborted.
    #[error("Malformed payload: PDU body must be a blob, got {kind}")]
    MalformedPayload { kind: &'static str },

    /// A framer refused to build a frame for the payload (e.g. length limit).
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },

    /// Construction parameters that cannot produce a working framer.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Checksum mismatch error when calculated checksum doesn't match stored checksum.
    #[error("Checksum mismatch: expected {expected:#x}, got {calculated:#x}")]
    ChecksumMismatch { expected: u64, calculated: u64 },

    /// Configuration documents that fail to parse.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new `InvalidFrame` error with a descriptive message.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    /// Create a new `InvalidConfig` error with a descriptive message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new `ChecksumMismatch` error with expected and calculated values.
    pub fn checksum_mismatch(expected: u64, calculated: u64) -> Self {
        Self::ChecksumMismatch {
            expected,
            calculated,
        }
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
