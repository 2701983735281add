//! Configuration validation
//!
//! Rules never fail fast: every rule runs and every violation is returned in
//! an [`ErrorList`], in the order it was found. Each violation is one of three
//! kinds (`Duplicate`, `Invalid`, `Forbidden`) and carries the [`FieldPath`]
//! of the offending value.
//!
//! The validator is organized into focused modules:
//! - `path`: field paths used to locate values
//! - `errors`: violation records and the aggregating list
//! - `rules`: rule tables and the shared enum-membership check
//! - `aws`: AWS rules and entry points
//! - `report`: serializable run summary
//! - `tests`: rule-level test suite
//!
//! Copyright (c) 2025 Clusterlint Team
//! Licensed under the Apache-2.0 license

pub mod aws;
pub mod errors;
pub mod path;
pub mod report;
pub mod rules;

pub use aws::{
    validate_cluster, validate_instance_group, AwsValidator, CLUSTER_RULES, INSTANCE_GROUP_RULES,
};
pub use errors::{ErrorKind, ErrorList, ValidationError};
pub use path::{FieldPath, PathSegment};
pub use report::ValidationReport;
pub use rules::{is_valid_value, Rule, RuleFn};
