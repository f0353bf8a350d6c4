//! Provider constraint rules and the tier rounding engine
//!
//! Boundary values are sensitive to floor vs. round vs. ceil, so every
//! computation goes through the three rounding primitives below.

use log::debug;

use crate::lib::config::{
    MAX_GB_PER_VCPU, MAX_VCPU, MB_PER_GB, MEMORY_GRANULARITY_MB, MIN_GB_PER_VCPU, MIN_MEMORY_MB,
    MIN_VCPU, TARGET_GB_PER_VCPU,
};
use crate::lib::tier::Tier;

/// Round up to the next multiple of the memory granularity.
///
/// Saturates at the largest representable multiple instead of overflowing.
pub fn round_up_to_granularity(memory_mb: u32) -> u32 {
    memory_mb.saturating_add(MEMORY_GRANULARITY_MB - 1) / MEMORY_GRANULARITY_MB
        * MEMORY_GRANULARITY_MB
}

/// Round down to the previous multiple of the memory granularity.
pub fn round_down_to_granularity(memory_mb: u32) -> u32 {
    memory_mb / MEMORY_GRANULARITY_MB * MEMORY_GRANULARITY_MB
}

/// Truncate a fractional MB amount toward zero. Negative and NaN inputs become 0.
pub fn truncate_mb(memory_mb: f64) -> u32 {
    memory_mb.trunc() as u32
}

/// Lower memory bound accepted by the provider for `vcpu`
pub fn min_memory_mb(vcpu: u32) -> u32 {
    truncate_mb(MIN_GB_PER_VCPU * vcpu as f64 * MB_PER_GB)
}

/// Upper memory bound accepted by the provider for `vcpu`
pub fn max_memory_mb(vcpu: u32) -> u32 {
    truncate_mb(MAX_GB_PER_VCPU * vcpu as f64 * MB_PER_GB)
}

/// Whether `(vcpu, memory_mb)` satisfies every provider rule
pub fn is_valid(vcpu: u32, memory_mb: u32) -> bool {
    if !(MIN_VCPU..=MAX_VCPU).contains(&vcpu) {
        return false;
    }
    // 1 or an even count
    if vcpu != 1 && vcpu % 2 != 0 {
        return false;
    }
    if memory_mb % MEMORY_GRANULARITY_MB != 0 || memory_mb < MIN_MEMORY_MB {
        return false;
    }
    memory_mb >= min_memory_mb(vcpu) && memory_mb <= max_memory_mb(vcpu)
}

pub fn is_valid_tier(tier: Tier) -> bool {
    is_valid(tier.vcpu, tier.memory_mb)
}

/// Snap an arbitrary `(vcpu, memory_mb)` request onto the closest valid tier
pub fn nearest_valid_tier(vcpu: u32, memory_mb: u32) -> Tier {
    let mut cpu = vcpu.clamp(MIN_VCPU, MAX_VCPU);
    // MAX_VCPU is even, so this never leaves the range
    if cpu != 1 && cpu % 2 != 0 {
        cpu += 1;
    }

    let mut ram = round_up_to_granularity(memory_mb).max(MIN_MEMORY_MB);

    let min_ram = round_up_to_granularity(min_memory_mb(cpu));
    let max_ram = round_down_to_granularity(max_memory_mb(cpu));
    ram = ram.clamp(min_ram, max_ram);

    if cpu != vcpu || ram != memory_mb {
        debug!(
            "Adjusted {}x{}MB to nearest valid tier {}x{}MB",
            vcpu, memory_mb, cpu, ram
        );
    }

    Tier::new(cpu, ram)
}

/// Size a tier around the existing memory at the target GB/vCPU ratio
pub fn suggest_minimal_tier(_vcpu: u32, memory_mb: u32) -> Tier {
    let cpus_needed = memory_mb as f64 / TARGET_GB_PER_VCPU / MB_PER_GB;
    let cpus = (cpus_needed.ceil() as u32).max(1);

    let ram = truncate_mb(cpus as f64 * TARGET_GB_PER_VCPU * MB_PER_GB);
    let ram = round_up_to_granularity(ram).max(MIN_MEMORY_MB);

    Tier::new(cpus, ram)
}
