//! Validation error records and the ordered list that aggregates them
//!
//! Copyright (c) 2025 Clusterlint Team
//! Licensed under the Apache-2.0 license

use super::path::FieldPath;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The closed set of violation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A value appears more than once where uniqueness is required
    Duplicate,
    /// A value is malformed, unknown, or outside an enumerated set
    Invalid,
    /// A value is acceptable alone but not combined with another field
    Forbidden,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Duplicate => write!(f, "Duplicate value"),
            ErrorKind::Invalid => write!(f, "Invalid value"),
            ErrorKind::Forbidden => write!(f, "Forbidden"),
        }
    }
}

/// A single violation found while validating a configuration
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub struct ValidationError {
    /// What kind of violation this is
    pub kind: ErrorKind,
    /// Where the offending value lives
    pub path: FieldPath,
    /// The offending value; empty for `Forbidden`
    pub value: String,
    /// Human-readable cause
    pub detail: String,
}

impl ValidationError {
    pub fn duplicate(path: FieldPath, value: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Duplicate,
            path,
            value: value.into(),
            detail: String::new(),
        }
    }

    pub fn invalid(path: FieldPath, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Invalid,
            path,
            value: value.into(),
            detail: detail.into(),
        }
    }

    pub fn forbidden(path: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Forbidden,
            path,
            value: String::new(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Forbidden => write!(f, "{}: {}", self.path, self.kind)?,
            _ => write!(f, "{}: {}: {:?}", self.path, self.kind, self.value)?,
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered, append-only collection of violations
///
/// Insertion order is discovery order. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ErrorList {
    errors: Vec<ValidationError>,
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no validation errors"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                write!(f, "{} validation errors:", n)?;
                for error in &self.errors {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one violation
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every violation of another list, keeping its order
    pub fn append(&mut self, mut other: ErrorList) {
        self.errors.append(&mut other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of violations of the given kind
    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<ValidationError> for ErrorList {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ErrorList {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<Vec<ValidationError>> for ErrorList {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl From<ValidationError> for ErrorList {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}
