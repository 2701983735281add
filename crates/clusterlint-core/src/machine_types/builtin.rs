//! Built-in AWS machine type table

use super::MachineTypeInfo;

fn machine(name: &str, memory_gb: f32, cores: u32, ephemeral_disks: u32, gpu: bool, burstable: bool) -> MachineTypeInfo {
    MachineTypeInfo {
        name: name.to_string(),
        memory_gb,
        cores,
        gpu,
        ephemeral_disks,
        burstable,
    }
}

/// Machine types known to the AWS resolver
pub(super) fn aws_machine_types() -> Vec<MachineTypeInfo> {
    vec![
        // Burstable general purpose
        machine("t2.nano", 0.5, 1, 0, false, true),
        machine("t2.micro", 1.0, 1, 0, false, true),
        machine("t2.small", 2.0, 1, 0, false, true),
        machine("t2.medium", 4.0, 2, 0, false, true),
        machine("t2.large", 8.0, 2, 0, false, true),
        machine("t2.xlarge", 16.0, 4, 0, false, true),
        machine("t2.2xlarge", 32.0, 8, 0, false, true),

        // General purpose
        machine("m3.medium", 3.75, 1, 1, false, false),
        machine("m3.large", 7.5, 2, 1, false, false),
        machine("m3.xlarge", 15.0, 4, 2, false, false),
        machine("m3.2xlarge", 30.0, 8, 2, false, false),
        machine("m4.large", 8.0, 2, 0, false, false),
        machine("m4.xlarge", 16.0, 4, 0, false, false),
        machine("m4.2xlarge", 32.0, 8, 0, false, false),
        machine("m4.4xlarge", 64.0, 16, 0, false, false),
        machine("m4.10xlarge", 160.0, 40, 0, false, false),
        machine("m4.16xlarge", 256.0, 64, 0, false, false),
        machine("m5.large", 8.0, 2, 0, false, false),
        machine("m5.xlarge", 16.0, 4, 0, false, false),
        machine("m5.2xlarge", 32.0, 8, 0, false, false),
        machine("m5.4xlarge", 64.0, 16, 0, false, false),
        machine("m5.12xlarge", 192.0, 48, 0, false, false),
        machine("m5.24xlarge", 384.0, 96, 0, false, false),

        // Compute optimized
        machine("c4.large", 3.75, 2, 0, false, false),
        machine("c4.xlarge", 7.5, 4, 0, false, false),
        machine("c4.2xlarge", 15.0, 8, 0, false, false),
        machine("c4.4xlarge", 30.0, 16, 0, false, false),
        machine("c4.8xlarge", 60.0, 36, 0, false, false),
        machine("c5.large", 4.0, 2, 0, false, false),
        machine("c5.xlarge", 8.0, 4, 0, false, false),
        machine("c5.2xlarge", 16.0, 8, 0, false, false),
        machine("c5.4xlarge", 32.0, 16, 0, false, false),
        machine("c5.9xlarge", 72.0, 36, 0, false, false),
        machine("c5.18xlarge", 144.0, 72, 0, false, false),

        // Memory optimized
        machine("r4.large", 15.25, 2, 0, false, false),
        machine("r4.xlarge", 30.5, 4, 0, false, false),
        machine("r4.2xlarge", 61.0, 8, 0, false, false),
        machine("r4.4xlarge", 122.0, 16, 0, false, false),
        machine("r4.8xlarge", 244.0, 32, 0, false, false),
        machine("r4.16xlarge", 488.0, 64, 0, false, false),

        // Accelerated computing
        machine("p2.xlarge", 61.0, 4, 0, true, false),
        machine("p2.8xlarge", 488.0, 32, 0, true, false),
        machine("p2.16xlarge", 732.0, 64, 0, true, false),
        machine("p3.2xlarge", 61.0, 8, 0, true, false),
        machine("p3.8xlarge", 244.0, 32, 0, true, false),
        machine("p3.16xlarge", 488.0, 64, 0, true, false),
        machine("g3.4xlarge", 122.0, 16, 0, true, false),
        machine("g3.8xlarge", 244.0, 32, 0, true, false),
        machine("g3.16xlarge", 488.0, 64, 0, true, false),

        // Storage optimized
        machine("i3.large", 15.25, 2, 1, false, false),
        machine("i3.xlarge", 30.5, 4, 1, false, false),
        machine("i3.2xlarge", 61.0, 8, 1, false, false),
        machine("i3.4xlarge", 122.0, 16, 2, false, false),
        machine("i3.8xlarge", 244.0, 32, 4, false, false),
        machine("i3.16xlarge", 488.0, 64, 8, false, false),
        machine("h1.2xlarge", 32.0, 8, 1, false, false),
        machine("h1.4xlarge", 64.0, 16, 2, false, false),
        machine("h1.8xlarge", 128.0, 32, 4, false, false),
        machine("h1.16xlarge", 256.0, 64, 8, false, false),
        machine("d2.xlarge", 30.5, 4, 3, false, false),
        machine("d2.2xlarge", 61.0, 8, 6, false, false),
        machine("d2.4xlarge", 122.0, 16, 12, false, false),
        machine("d2.8xlarge", 244.0, 36, 24, false, false),

        // High memory
        machine("x1.16xlarge", 976.0, 64, 1, false, false),
        machine("x1.32xlarge", 1952.0, 128, 2, false, false),
    ]
}
