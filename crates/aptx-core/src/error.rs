//! Error handling for the aptX codec library
//!
//! The per-block encoder is a total function and never fails. Errors only
//! arise at the edges: the state-initialisation contract, configuration
//! validation, byte-stream framing and file I/O.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, AptxError>;

/// Error type for aptX operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AptxError {
    /// `init` was handed no state block
    #[error("Null encoder state passed to init")]
    NullState,

    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// Input is not a whole number of blocks
    #[error("Invalid frame size: expected a multiple of {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Output buffer cannot hold the result
    #[error("Buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Malformed PCM or codeword data
    #[error("Invalid audio format: {details}")]
    InvalidFormat { details: String },

    /// Sync parity check failed while decoding
    #[error("Sync lost at block {block}")]
    SyncLost { block: u64 },

    /// I/O operation failed
    #[error("I/O operation failed: {reason}")]
    IoError { reason: String },
}

impl AptxError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid format error
    pub fn invalid_format(details: impl Into<String>) -> Self {
        Self::InvalidFormat {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NullState | Self::InvalidConfig { .. } => false,

            // Caller can resubmit with correctly sized buffers or resync
            Self::InvalidFrameSize { .. }
            | Self::BufferTooSmall { .. }
            | Self::InvalidFormat { .. }
            | Self::SyncLost { .. }
            | Self::IoError { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NullState => ErrorCategory::Initialization,
            Self::InvalidConfig { .. } => ErrorCategory::Configuration,
            Self::InvalidFrameSize { .. } | Self::InvalidFormat { .. } | Self::SyncLost { .. } => {
                ErrorCategory::Processing
            }
            Self::BufferTooSmall { .. } => ErrorCategory::Memory,
            Self::IoError { .. } => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Audio processing errors
    Processing,
    /// Memory management errors
    Memory,
    /// Initialization and setup errors
    Initialization,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Memory => write!(f, "Memory"),
            Self::Initialization => write!(f, "Initialization"),
            Self::Io => write!(f, "I/O"),
        }
    }
}

/// Convert from I/O errors
impl From<std::io::Error> for AptxError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            reason: error.to_string(),
        }
    }
}
