//! Error types for sample decoding

use thiserror::Error;

/// Errors that can occur while decoding sensor data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer is incomplete - need more data
    #[error("incomplete sample: need {needed} more bytes")]
    Incomplete { needed: usize },

    /// More bytes than a single sample holds
    #[error("sample too long: {len} bytes")]
    TooLong { len: usize },
}
