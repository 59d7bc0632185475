//! Top-level error type for full-buffer decoding

use crate::parse::error::ParseError;

/// Enumerated error type for failures encountered during a full-buffer
/// decode operation, covering both parse-level faults and post-parse
/// invariant violations.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// Failure propagated from the parsing layer
    Parse(ParseError),
    /// The input was a base64 rendition that could not be decoded to bytes
    Base64(base64::DecodeError),
    /// Parsing succeeded but left unconsumed bytes in the buffer
    NonEmpty { residual: usize },
}

impl From<std::convert::Infallible> for DecodeError {
    fn from(_void: std::convert::Infallible) -> Self {
        match _void {}
    }
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Parse(err) => {
                write!(f, "parser encountered error: {}", err)
            }
            DecodeError::Base64(err) => {
                write!(f, "base64 conversion encountered error: {}", err)
            }
            DecodeError::NonEmpty { residual } => {
                write!(f, "parse complete with {residual} unconsumed bytes")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(err) => Some(err),
            DecodeError::Base64(err) => Some(err),
            DecodeError::NonEmpty { .. } => None,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
