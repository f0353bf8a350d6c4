use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::lib::config::{MB_PER_GB, TIER_PREFIX};
use crate::lib::error::TierCalcError;

static TIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}-(\d+)-(\d+)$", regex::escape(TIER_PREFIX)))
        .expect("tier pattern is a valid regex")
});

/// A custom machine tier: vCPU count and memory in MB
///
/// Ordering is by vCPU first, then memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier {
    pub vcpu: u32,
    pub memory_mb: u32,
}

impl Tier {
    pub const fn new(vcpu: u32, memory_mb: u32) -> Self {
        Self { vcpu, memory_mb }
    }

    pub fn memory_gb(&self) -> f64 {
        self.memory_mb as f64 / MB_PER_GB
    }

    /// Memory per vCPU in GB. Zero when the tier has no vCPUs.
    pub fn gb_per_vcpu(&self) -> f64 {
        if self.vcpu == 0 {
            return 0.0;
        }
        self.memory_gb() / self.vcpu as f64
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", TIER_PREFIX, self.vcpu, self.memory_mb)
    }
}

impl FromStr for Tier {
    type Err = TierCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let captures = TIER_PATTERN
            .captures(trimmed)
            .ok_or_else(|| TierCalcError::InvalidTier(s.to_string()))?;

        let vcpu = captures[1]
            .parse::<u32>()
            .map_err(|_| TierCalcError::InvalidTierNumbers(trimmed.to_string()))?;
        let memory_mb = captures[2]
            .parse::<u32>()
            .map_err(|_| TierCalcError::InvalidTierNumbers(trimmed.to_string()))?;

        Ok(Tier { vcpu, memory_mb })
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tier", 3)?;
        state.serialize_field("tier", &self.to_string())?;
        state.serialize_field("vcpu", &self.vcpu)?;
        state.serialize_field("memory_mb", &self.memory_mb)?;
        state.end()
    }
}
