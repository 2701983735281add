//! Clusterlint Core - AWS validation for cluster provisioning manifests
//!
//! This crate checks cluster and instance group specifications against
//! AWS-specific constraints before they are applied, and reports every
//! violation it finds instead of stopping at the first one.
//!
//! # Main Components
//!
//! - **Error Handling**: Operational errors using `thiserror` and `anyhow`
//! - **Object Model**: The cluster and instance group fields the rules read
//! - **Validation**: Field paths, violation lists, and the AWS rule tables
//! - **Machine Types**: Resolver trait, built-in AWS catalog, and a fixed fake
//! - **Manifests**: Loading `Cluster` / `InstanceGroup` documents from YAML or JSON
//!
//! # Example
//!
//! ```rust
//! use clusterlint_core::{load_manifests, AwsValidator, ManifestFormat};
//!
//! let manifest = r#"
//! kind: InstanceGroup
//! metadata:
//!   name: nodes
//! spec:
//!   machineType: c5.large
//!   image: kope.io/k8s-1.8-debian-jessie-amd64-hvm-ebs-2018-01-14
//!   spotDurationInMinutes: 90
//! "#;
//!
//! let documents = load_manifests(manifest, ManifestFormat::Yaml).unwrap();
//! let errors = AwsValidator::default().validate_documents(&documents);
//!
//! // c5 on a jessie image, and a spot duration that is not a whole hour
//! assert_eq!(errors.len(), 2);
//! for error in &errors {
//!     println!("{}", error);
//! }
//! ```

pub mod error;
pub mod machine_types;
pub mod manifest;
pub mod types;
pub mod validation;

mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use machine_types::{FixedResolver, MachineTypeCatalog, MachineTypeInfo, MachineTypeResolver};
pub use manifest::{load_manifest_file, load_manifests, Document, ManifestFormat};
pub use types::{
    ApiSpec, Cluster, ClusterSpec, InstanceGroup, InstanceGroupSpec, LoadBalancerAccessSpec,
    ObjectMeta,
};
pub use validation::{
    validate_cluster, validate_instance_group, AwsValidator, ErrorKind, ErrorList, FieldPath,
    ValidationError, ValidationReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
