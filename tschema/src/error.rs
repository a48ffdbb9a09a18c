//! Schema construction and validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    EmptyName,
    DuplicateField,
    InvalidDefault,
    MissingHandler,
}

/// Construction-time failure while deriving a record type or descriptor.
///
/// Always raised at wrap time, never deferred to call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub message: String,
    pub subject: Option<String>,
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            subject: None,
        }
    }

    pub fn empty_name(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::EmptyName, message)
    }

    pub fn duplicate_field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            SchemaErrorKind::DuplicateField,
            format!("duplicate field name: '{name}'"),
        )
    }

    pub fn invalid_default(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            SchemaErrorKind::InvalidDefault,
            format!("default for field '{}' is invalid: {}", field, reason.into()),
        )
    }

    pub fn missing_handler(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::MissingHandler, message)
    }

    /// Attaches the record or function name the error belongs to.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{:?} [{}]: {}", self.kind, subject, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for SchemaError {}

/// One offending field path and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub reason: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// A value failed the derived type's shape or constraints.
///
/// Collects every issue found in one pass rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(vec![ValidationIssue::new(path, reason)])
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn mentions(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display_includes_subject() {
        let error = SchemaError::duplicate_field("x").with_subject("add");
        let rendered = error.to_string();
        assert!(rendered.contains("add"));
        assert!(rendered.contains("'x'"));
    }

    #[test]
    fn validation_error_lists_every_issue() {
        let error = ValidationError::new(vec![
            ValidationIssue::new("x", "expected integer"),
            ValidationIssue::new("y", "missing required field"),
        ]);

        assert!(error.mentions("x"));
        assert!(error.mentions("y"));
        let rendered = error.to_string();
        assert!(rendered.contains("x: expected integer"));
        assert!(rendered.contains("y: missing required field"));
    }
}
