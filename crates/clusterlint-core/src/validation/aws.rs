//! AWS-specific validation for clusters and instance groups
//!
//! Every rule appends to an [`ErrorList`] and never aborts; the entry points
//! run a fixed, ordered rule table and return everything that was found.
//!
//! Copyright (c) 2025 Clusterlint Team
//! Licensed under the Apache-2.0 license

use super::errors::{ErrorList, ValidationError};
use super::path::FieldPath;
use super::rules::{is_valid_value, run_rules, Rule};
use crate::machine_types::{MachineTypeCatalog, MachineTypeResolver};
use crate::manifest::Document;
use crate::types::{Cluster, InstanceGroup};
use std::collections::HashSet;
use tracing::{debug, info};

/// Machine type family fragments whose instances expose EBS volumes as NVMe
/// devices, which kernels in Debian jessie images cannot boot from.
pub const NVME_INSTANCE_FAMILIES: &[&str] = &["P3", "C5", "M5", "H1", "I3"];

/// Accepted spot block durations, in minutes
pub const VALID_SPOT_DURATIONS: &[&str] = &["60", "120", "180", "240", "300", "360"];

/// Accepted spot interruption behaviours
pub const VALID_INTERRUPTION_BEHAVIORS: &[&str] = &["terminate", "hibernate", "stop"];

const SECURITY_GROUP_PREFIX: &str = "sg-";

const JESSIE_IMAGE_MARKER: &str = "jessie";

/// Rules applied to a cluster, in order
pub const CLUSTER_RULES: &[Rule<Cluster>] = &[Rule {
    name: "api-load-balancer-security-groups",
    check: check_api_load_balancer_security_groups,
}];

/// Rules applied to an instance group, in order
pub const INSTANCE_GROUP_RULES: &[Rule<InstanceGroup>] = &[
    Rule {
        name: "additional-security-groups",
        check: check_instance_group_security_groups,
    },
    Rule {
        name: "machine-type",
        check: check_machine_type,
    },
    Rule {
        name: "ami-for-nvme",
        check: check_ami_for_nvme,
    },
    Rule {
        name: "spot-duration",
        check: check_spot_duration,
    },
    Rule {
        name: "instance-interruption-behavior",
        check: check_instance_interruption_behavior,
    },
];

/// Validate a cluster against [`CLUSTER_RULES`]
pub fn validate_cluster(cluster: &Cluster, resolver: &dyn MachineTypeResolver) -> ErrorList {
    let errors = run_rules(CLUSTER_RULES, cluster, resolver);
    info!(cluster = %cluster.metadata.name, violations = errors.len(), "Validated cluster");
    errors
}

/// Validate an instance group against [`INSTANCE_GROUP_RULES`]
pub fn validate_instance_group(ig: &InstanceGroup, resolver: &dyn MachineTypeResolver) -> ErrorList {
    let errors = run_rules(INSTANCE_GROUP_RULES, ig, resolver);
    info!(instance_group = %ig.name(), violations = errors.len(), "Validated instance group");
    errors
}

/// Validate a list of security group IDs
///
/// Repeated IDs are reported as `Duplicate` (every repeat, not just the
/// first). Blank entries are `Invalid` and skip the format check; anything
/// else must start with `sg-`.
pub fn validate_additional_security_groups(path: &FieldPath, groups: &[String]) -> ErrorList {
    let mut errors = ErrorList::new();
    let mut names = HashSet::new();

    for (i, group) in groups.iter().enumerate() {
        if !names.insert(group.as_str()) {
            errors.push(ValidationError::duplicate(path.index(i), group.as_str()));
        }

        if group.trim().is_empty() {
            errors.push(ValidationError::invalid(
                path.index(i),
                group.as_str(),
                "security group cannot be empty, if specified",
            ));
            continue;
        }

        if !group.starts_with(SECURITY_GROUP_PREFIX) {
            errors.push(ValidationError::invalid(
                path.index(i),
                group.as_str(),
                "security group does not match the expected AWS format",
            ));
        }
    }

    errors
}

/// Check that every comma-separated machine type resolves
///
/// An empty value is not checked. Each candidate that fails to resolve adds
/// one `Invalid` at `path` carrying that candidate.
pub fn validate_machine_type(
    path: &FieldPath,
    machine_type: &str,
    resolver: &dyn MachineTypeResolver,
) -> ErrorList {
    let mut errors = ErrorList::new();
    if machine_type.is_empty() {
        return errors;
    }

    for candidate in machine_type.split(',') {
        if let Err(e) = resolver.resolve(candidate) {
            debug!(machine_type = candidate, error = %e, "Machine type lookup failed");
            errors.push(ValidationError::invalid(
                path.clone(),
                candidate,
                "machine type specified is invalid",
            ));
        }
    }

    errors
}

/// Forbid NVMe machine types on Debian jessie images
///
/// Family fragments match case-insensitively anywhere in the candidate name,
/// so this errs on the side of reporting.
pub fn validate_ami_for_nvme(path: &FieldPath, ig: &InstanceGroup) -> ErrorList {
    let mut errors = ErrorList::new();

    for family in NVME_INSTANCE_FAMILIES {
        let family = family.to_uppercase();
        for machine_type in ig.spec.machine_type_candidates() {
            if !machine_type.to_uppercase().contains(&family) {
                continue;
            }

            debug!(
                machine_type = %machine_type,
                "Machine type requires an image based on stretch, checking compatibility"
            );
            if ig.spec.image.contains(JESSIE_IMAGE_MARKER) {
                errors.push(ValidationError::forbidden(
                    path.clone(),
                    format!(
                        "{} cannot use machineType {} with image based on Debian jessie.",
                        ig.name(),
                        machine_type
                    ),
                ));
            }
        }
    }

    errors
}

/// Check the spot block duration, if one is set
pub fn validate_spot_duration(path: &FieldPath, minutes: Option<i64>) -> ErrorList {
    match minutes {
        Some(minutes) => is_valid_value(path, &minutes.to_string(), VALID_SPOT_DURATIONS),
        None => ErrorList::new(),
    }
}

/// Check the spot interruption behaviour, if one is set
pub fn validate_instance_interruption_behavior(path: &FieldPath, behavior: Option<&str>) -> ErrorList {
    match behavior {
        Some(behavior) => is_valid_value(path, behavior, VALID_INTERRUPTION_BEHAVIORS),
        None => ErrorList::new(),
    }
}

fn instance_group_path(ig: &InstanceGroup, field: &str) -> FieldPath {
    FieldPath::new([ig.name(), "spec", field])
}

fn check_api_load_balancer_security_groups(cluster: &Cluster, _: &dyn MachineTypeResolver) -> ErrorList {
    match cluster.spec.api.as_ref().and_then(|api| api.load_balancer.as_ref()) {
        Some(lb) => validate_additional_security_groups(
            &FieldPath::new(["spec", "api", "loadBalancer", "additionalSecurityGroups"]),
            &lb.additional_security_groups,
        ),
        None => ErrorList::new(),
    }
}

fn check_instance_group_security_groups(ig: &InstanceGroup, _: &dyn MachineTypeResolver) -> ErrorList {
    // Rooted at "spec" rather than the group name, unlike the other rules.
    validate_additional_security_groups(
        &FieldPath::new(["spec", "additionalSecurityGroups"]),
        &ig.spec.additional_security_groups,
    )
}

fn check_machine_type(ig: &InstanceGroup, resolver: &dyn MachineTypeResolver) -> ErrorList {
    validate_machine_type(&instance_group_path(ig, "machineType"), &ig.spec.machine_type, resolver)
}

fn check_ami_for_nvme(ig: &InstanceGroup, _: &dyn MachineTypeResolver) -> ErrorList {
    validate_ami_for_nvme(&instance_group_path(ig, "machineType"), ig)
}

fn check_spot_duration(ig: &InstanceGroup, _: &dyn MachineTypeResolver) -> ErrorList {
    validate_spot_duration(
        &instance_group_path(ig, "spotDurationInMinutes"),
        ig.spec.spot_duration_in_minutes,
    )
}

fn check_instance_interruption_behavior(ig: &InstanceGroup, _: &dyn MachineTypeResolver) -> ErrorList {
    validate_instance_interruption_behavior(
        &instance_group_path(ig, "instanceInterruptionBehavior"),
        ig.spec.instance_interruption_behavior.as_deref(),
    )
}

/// AWS validator bound to a machine type resolver
///
/// ```rust
/// use clusterlint_core::{AwsValidator, InstanceGroup};
///
/// let validator = AwsValidator::default();
/// let mut ig = InstanceGroup::default();
/// ig.metadata.name = "nodes".to_string();
/// ig.spec.machine_type = "m5.large".to_string();
/// ig.spec.additional_security_groups = vec!["sg-1".to_string(), "sg-1".to_string()];
///
/// let errors = validator.validate_instance_group(&ig);
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AwsValidator<R = MachineTypeCatalog> {
    resolver: R,
}

impl<R: MachineTypeResolver> AwsValidator<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn validate_cluster(&self, cluster: &Cluster) -> ErrorList {
        validate_cluster(cluster, &self.resolver)
    }

    pub fn validate_instance_group(&self, ig: &InstanceGroup) -> ErrorList {
        validate_instance_group(ig, &self.resolver)
    }

    /// Validate each document with the matching entry point
    ///
    /// Lists are concatenated in document order.
    pub fn validate_documents(&self, documents: &[Document]) -> ErrorList {
        let mut errors = ErrorList::new();
        for document in documents {
            let found = match document {
                Document::Cluster(cluster) => self.validate_cluster(cluster),
                Document::InstanceGroup(ig) => self.validate_instance_group(ig),
            };
            errors.append(found);
        }
        errors
    }
}

impl Default for AwsValidator<MachineTypeCatalog> {
    fn default() -> Self {
        Self::new(MachineTypeCatalog::aws())
    }
}
