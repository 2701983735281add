//! Property-based testing strategies and the invariants they check
//!
//! Generates arbitrary instance groups and clusters, including blank and
//! repeated security groups and machine type lists with stray commas.

#![cfg(test)]

use crate::machine_types::{FixedResolver, MachineTypeResolver};
use crate::types::*;
use crate::validation::aws::{VALID_INTERRUPTION_BEHAVIORS, VALID_SPOT_DURATIONS};
use crate::validation::{validate_cluster, validate_instance_group, ErrorKind};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

/// Strategy for security group IDs, biased towards collisions
pub fn security_group_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "sg-[a-f0-9]{1,4}",
        Just("sg-1".to_string()),
        Just(String::new()),
        Just("  ".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Strategy for comma-joined machine type lists
pub fn machine_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        vec(
            prop_oneof![
                Just("m5.large".to_string()),
                Just("c5.xlarge".to_string()),
                Just("t2.medium".to_string()),
                "[a-z0-9]{1,3}\\.[a-z]{1,6}",
                Just(String::new()),
            ],
            1..4,
        )
        .prop_map(|types| types.join(",")),
    ]
}

/// Strategy for image names, some jessie based
pub fn image_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("kope.io/k8s-1.8-debian-jessie-amd64-hvm-ebs-2018-01-14".to_string()),
        Just("kope.io/k8s-1.9-debian-stretch-amd64-hvm-ebs-2018-03-11".to_string()),
        "[a-z0-9./-]{0,20}",
    ]
}

/// Strategy for instance groups
pub fn instance_group_strategy() -> impl Strategy<Value = InstanceGroup> {
    (
        "[a-z][a-z0-9-]{0,10}",                     // name
        machine_type_strategy(),
        image_strategy(),
        option::of(prop_oneof![Just(60i64), Just(90), Just(360), -1000i64..1000]),
        option::of(prop_oneof![Just("stop".to_string()), "[a-z]{1,10}"]),
        vec(security_group_strategy(), 0..6),
    )
        .prop_map(|(name, machine_type, image, spot, behavior, groups)| InstanceGroup {
            metadata: ObjectMeta { name },
            spec: InstanceGroupSpec {
                machine_type,
                image,
                spot_duration_in_minutes: spot,
                instance_interruption_behavior: behavior,
                additional_security_groups: groups,
            },
        })
}

/// Strategy for clusters with or without an API load balancer
pub fn cluster_strategy() -> impl Strategy<Value = Cluster> {
    option::of(option::of(vec(security_group_strategy(), 0..6))).prop_map(|api| Cluster {
        metadata: ObjectMeta {
            name: "k8s.example.com".to_string(),
        },
        spec: ClusterSpec {
            api: api.map(|lb| ApiSpec {
                load_balancer: lb.map(|groups| LoadBalancerAccessSpec {
                    additional_security_groups: groups,
                }),
            }),
        },
    })
}

fn resolver() -> impl MachineTypeResolver {
    FixedResolver::new(["m5.large", "c5.xlarge", "t2.medium"])
}

proptest! {
    #[test]
    fn prop_instance_group_validation_is_deterministic(ig in instance_group_strategy()) {
        let resolver = resolver();
        let first = validate_instance_group(&ig, &resolver);
        let second = validate_instance_group(&ig, &resolver);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cluster_validation_is_deterministic(cluster in cluster_strategy()) {
        let resolver = resolver();
        prop_assert_eq!(validate_cluster(&cluster, &resolver), validate_cluster(&cluster, &resolver));
    }

    #[test]
    fn prop_duplicates_match_repeats(ig in instance_group_strategy()) {
        let groups = &ig.spec.additional_security_groups;
        let mut unique = groups.clone();
        unique.sort();
        unique.dedup();

        let errors = validate_instance_group(&ig, &resolver());
        prop_assert_eq!(errors.count_kind(ErrorKind::Duplicate), groups.len() - unique.len());
    }

    #[test]
    fn prop_forbidden_only_on_jessie(ig in instance_group_strategy()) {
        let errors = validate_instance_group(&ig, &resolver());
        if !ig.spec.image.contains("jessie") {
            prop_assert_eq!(errors.count_kind(ErrorKind::Forbidden), 0);
        }
    }

    #[test]
    fn prop_valid_enum_values_never_reported(
        spot in proptest::sample::select(VALID_SPOT_DURATIONS),
        behavior in proptest::sample::select(VALID_INTERRUPTION_BEHAVIORS),
    ) {
        let mut ig = InstanceGroup::default();
        ig.metadata.name = "nodes".to_string();
        ig.spec.spot_duration_in_minutes = Some(spot.parse().unwrap());
        ig.spec.instance_interruption_behavior = Some(behavior.to_string());
        prop_assert!(validate_instance_group(&ig, &resolver()).is_empty());
    }
}
