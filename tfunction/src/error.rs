//! Invocation errors and the wrapped callable's own failure type.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tschema::ValidationError;

/// A failure raised by the wrapped callable itself.
///
/// Propagated verbatim through [`InvokeError::Handler`]; the descriptor
/// never catches or reinterprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        Self::new(error.to_string())
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HandlerError {}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Why an invocation failed: bad input, a handler failure, or output that
/// does not satisfy the derived output shape.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeError {
    InvalidInput(ValidationError),
    InvalidOutput(ValidationError),
    Handler(HandlerError),
}

impl InvokeError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidOutput(_))
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::InvalidInput(error) | Self::InvalidOutput(error) => Some(error),
            Self::Handler(_) => None,
        }
    }
}

impl Display for InvokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(error) => write!(f, "input {error}"),
            Self::InvalidOutput(error) => write!(f, "output {error}"),
            Self::Handler(error) => write!(f, "handler failed: {error}"),
        }
    }
}

impl Error for InvokeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(error) | Self::InvalidOutput(error) => Some(error),
            Self::Handler(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_variants_report_as_validation() {
        let error = InvokeError::InvalidInput(ValidationError::single("x", "expected integer"));
        assert!(error.is_validation());
        assert!(error.validation_error().is_some());
        assert!(error.to_string().contains("x: expected integer"));
    }

    #[test]
    fn handler_variant_is_not_reclassified() {
        let error = InvokeError::Handler(HandlerError::new("disk on fire"));
        assert!(!error.is_validation());
        assert_eq!(error.to_string(), "handler failed: disk on fire");
    }
}
