//! Serializable summary of one validation run over a manifest
//!
//! Copyright (c) 2025 Clusterlint Team
//! Licensed under the Apache-2.0 license

use super::errors::{ErrorKind, ErrorList};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of validating one manifest source
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Where the documents came from, usually a file path
    pub source: String,
    pub checked_at: DateTime<Utc>,
    /// Number of documents validated
    pub documents: usize,
    pub errors: ErrorList,
}

impl ValidationReport {
    pub fn new(source: impl Into<String>, documents: usize, errors: ErrorList) -> Self {
        Self {
            source: source.into(),
            checked_at: Utc::now(),
            documents,
            errors,
        }
    }

    /// True when no rule found a violation
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violation counts as (duplicate, invalid, forbidden)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.errors.count_kind(ErrorKind::Duplicate),
            self.errors.count_kind(ErrorKind::Invalid),
            self.errors.count_kind(ErrorKind::Forbidden),
        )
    }
}
