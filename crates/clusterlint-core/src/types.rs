//! Configuration object model consumed by the validators
//!
//! These structures mirror the subset of the cluster and instance group
//! manifests that AWS validation reads. Unknown fields are ignored on
//! deserialization so full manifests can be loaded as-is.

use serde::{Deserialize, Serialize};

/// Object metadata shared by every manifest kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name
    #[serde(default)]
    pub name: String,
}

/// A cluster manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: ClusterSpec,
}

/// Cluster-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// API server exposure settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiSpec>,
}

/// How the Kubernetes API is exposed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    /// Load balancer in front of the API servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<LoadBalancerAccessSpec>,
}

/// API load balancer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerAccessSpec {
    /// Security groups attached in addition to the generated one
    #[serde(default)]
    pub additional_security_groups: Vec<String>,
}

/// An instance group manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroup {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: InstanceGroupSpec,
}

impl InstanceGroup {
    /// Name of the instance group
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Instance group settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroupSpec {
    /// Machine type, or a comma-separated list of acceptable machine types
    #[serde(default)]
    pub machine_type: String,

    /// Image (AMI) identifier
    #[serde(default)]
    pub image: String,

    /// Spot block duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_duration_in_minutes: Option<i64>,

    /// Behaviour when a spot instance is interrupted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_interruption_behavior: Option<String>,

    /// Security groups attached in addition to the generated one
    #[serde(default)]
    pub additional_security_groups: Vec<String>,
}

impl InstanceGroupSpec {
    /// Iterate over the comma-separated machine type candidates, untrimmed
    pub fn machine_type_candidates(&self) -> impl Iterator<Item = &str> {
        self.machine_type.split(',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_group_deserializes_camel_case() {
        let yaml = r#"
metadata:
  name: nodes
spec:
  machineType: m5.large,c5.large
  image: kope.io/k8s-1.9-debian-stretch-amd64-hvm-ebs-2018-03-11
  spotDurationInMinutes: 120
  instanceInterruptionBehavior: stop
  additionalSecurityGroups:
    - sg-1234
  minSize: 2
"#;
        let ig: InstanceGroup = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(ig.name(), "nodes");
        assert_eq!(ig.spec.spot_duration_in_minutes, Some(120));
        assert_eq!(ig.spec.instance_interruption_behavior.as_deref(), Some("stop"));
        assert_eq!(ig.spec.additional_security_groups, vec!["sg-1234"]);
        assert_eq!(
            ig.spec.machine_type_candidates().collect::<Vec<_>>(),
            vec!["m5.large", "c5.large"]
        );
    }

    #[test]
    fn test_cluster_without_api_section() {
        let cluster: Cluster = serde_json::from_str(r#"{"metadata":{"name":"k8s.example.com"},"spec":{}}"#).unwrap();
        assert!(cluster.spec.api.is_none());
    }

    #[test]
    fn test_candidates_are_not_trimmed() {
        let spec = InstanceGroupSpec {
            machine_type: "m5.large, c5.large".to_string(),
            ..Default::default()
        };
        assert_eq!(spec.machine_type_candidates().nth(1), Some(" c5.large"));
    }
}
