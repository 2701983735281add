//! Shared test support utilities for integration tests

#![allow(dead_code)]

use clusterlint_core::{
    ApiSpec, Cluster, ErrorList, InstanceGroup, LoadBalancerAccessSpec, ObjectMeta,
};

/// A cluster whose API load balancer carries the given security groups
pub fn cluster_with_lb_groups(groups: &[&str]) -> Cluster {
    let mut cluster = Cluster {
        metadata: ObjectMeta {
            name: "k8s.example.com".to_string(),
        },
        ..Default::default()
    };
    cluster.spec.api = Some(ApiSpec {
        load_balancer: Some(LoadBalancerAccessSpec {
            additional_security_groups: groups.iter().map(|g| g.to_string()).collect(),
        }),
    });
    cluster
}

/// A minimal instance group
pub fn instance_group(name: &str, machine_type: &str, image: &str) -> InstanceGroup {
    let mut ig = InstanceGroup::default();
    ig.metadata.name = name.to_string();
    ig.spec.machine_type = machine_type.to_string();
    ig.spec.image = image.to_string();
    ig
}

/// Render every error as its display string
pub fn rendered(errors: &ErrorList) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// A manifest that trips every rule at least once
pub const BROKEN_MANIFEST: &str = r#"
apiVersion: kops/v1alpha2
kind: Cluster
metadata:
  name: k8s.example.com
spec:
  api:
    loadBalancer:
      type: Public
      additionalSecurityGroups:
        - sg-1
        - sg-1
---
apiVersion: kops/v1alpha2
kind: InstanceGroup
metadata:
  name: nodes
spec:
  role: Node
  machineType: c5.large,bogus.type
  image: kope.io/k8s-1.8-debian-jessie-amd64-hvm-ebs-2018-01-14
  spotDurationInMinutes: 90
  instanceInterruptionBehavior: pause
  additionalSecurityGroups:
    - " "
    - abc
"#;

/// A manifest with no violations
pub const CLEAN_MANIFEST: &str = r#"
kind: Cluster
metadata:
  name: k8s.example.com
spec:
  api:
    loadBalancer:
      additionalSecurityGroups: [sg-0a1b2c3d]
---
kind: InstanceGroup
metadata:
  name: nodes
spec:
  machineType: m5.large,m4.large
  image: kope.io/k8s-1.9-debian-stretch-amd64-hvm-ebs-2018-03-11
  spotDurationInMinutes: 120
  instanceInterruptionBehavior: terminate
"#;
