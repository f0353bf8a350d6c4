use log::{debug, warn};
use serde::Serialize;

use crate::lib::cli::Mode;
use crate::lib::config::{MAX_GB_PER_VCPU, MB_PER_GB, MIN_MEMORY_MB, TARGET_GB_PER_VCPU};
use crate::lib::constraints::{
    is_valid_tier, nearest_valid_tier, round_down_to_granularity, round_up_to_granularity,
    suggest_minimal_tier, truncate_mb,
};
use crate::lib::known_tiers::{find_next_above, find_next_below};
use crate::lib::tier::Tier;

/// A derived tier, kept even when it fails validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub valid: bool,
}

impl Recommendation {
    fn new(tier: Tier) -> Self {
        let valid = is_valid_tier(tier);
        if !valid {
            warn!("Calculated tier {} may not be valid", tier);
        }
        Self { tier, valid }
    }
}

/// Recommend a tier for `vcpu` at the target GB/vCPU ratio
pub fn recommend_from_cpu(vcpu: u32) -> Recommendation {
    let ram = truncate_mb(vcpu as f64 * TARGET_GB_PER_VCPU * MB_PER_GB);
    let ram = round_up_to_granularity(ram).max(MIN_MEMORY_MB);

    debug!("Recommending {} MB for {} vCPUs", ram, vcpu);
    Recommendation::new(Tier::new(vcpu, ram))
}

/// Recommend a tier for a memory amount in MB at the target GB/vCPU ratio
pub fn recommend_from_memory(memory_mb: f64) -> Recommendation {
    let ram = round_up_to_granularity(truncate_mb(memory_mb)).max(MIN_MEMORY_MB);

    // f64::round rounds half away from zero
    let cpus = (ram as f64 / TARGET_GB_PER_VCPU / MB_PER_GB).round().max(1.0) as u32;

    debug!("Recommending {} vCPUs for {} MB", cpus, ram);
    Recommendation::new(Tier::new(cpus, ram))
}

/// Result of looking up the next tier for an existing one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "tier", rename_all = "snake_case")]
pub enum NextTier {
    /// Next entry of the known tier table
    NextKnown(Tier),
    /// Beyond the table; sized around the current memory instead
    NextValid(Tier),
    /// Beyond the table and already sized at the target ratio
    AlreadyValid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierInspection {
    pub tier: Tier,
    pub valid: bool,
    pub next: NextTier,
}

/// Parse-mode lookup: the next known tier above `tier`, falling back to a
/// tier sized around its memory when it is beyond the known table
pub fn inspect_tier(tier: Tier) -> TierInspection {
    let next = match find_next_above(tier.vcpu, tier.memory_mb) {
        Some(known) => NextTier::NextKnown(known),
        None => {
            let suggested = suggest_minimal_tier(tier.vcpu, tier.memory_mb);
            if suggested == tier {
                NextTier::AlreadyValid
            } else {
                NextTier::NextValid(suggested)
            }
        }
    };

    TierInspection {
        tier,
        valid: is_valid_tier(tier),
        next,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BumpRelation {
    AlreadyMax,
    AlreadyExceedsMax,
    Bumped,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryBump {
    pub current: Tier,
    pub bumped: Tier,
    pub relation: BumpRelation,
}

/// Raise memory to the highest amount allowed for the tier's vCPU count
pub fn bump_memory_to_max(tier: Tier) -> MemoryBump {
    let max_ram = truncate_mb(tier.vcpu as f64 * MAX_GB_PER_VCPU * MB_PER_GB);
    let max_ram = round_down_to_granularity(max_ram).max(MIN_MEMORY_MB);

    let relation = if max_ram == tier.memory_mb {
        BumpRelation::AlreadyMax
    } else if max_ram < tier.memory_mb {
        BumpRelation::AlreadyExceedsMax
    } else {
        BumpRelation::Bumped
    };

    MemoryBump {
        current: tier,
        bumped: Tier::new(tier.vcpu, max_ram),
        relation,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestValid {
    pub tier: Tier,
    /// Whether the adjusted tier is still lower than the current one
    pub is_downgrade: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DowngradeReport {
    pub current: Tier,
    pub recommended: Tier,
    pub current_valid: bool,
    pub recommended_valid: bool,
    pub is_lower: bool,
    /// Set when the recommendation fails validation
    pub nearest_valid: Option<NearestValid>,
    /// Set when the recommendation is not an acceptable downgrade
    pub known_lower: Option<Tier>,
}

impl DowngradeReport {
    pub fn is_downgrade(&self) -> bool {
        self.recommended_valid && self.is_lower
    }
}

/// Check whether `recommended` is a valid downgrade from `current`
pub fn check_downgrade(current: Tier, recommended: Tier) -> DowngradeReport {
    let current_valid = is_valid_tier(current);
    let recommended_valid = is_valid_tier(recommended);
    let is_lower = recommended < current;

    let mut report = DowngradeReport {
        current,
        recommended,
        current_valid,
        recommended_valid,
        is_lower,
        nearest_valid: None,
        known_lower: None,
    };

    if report.is_downgrade() {
        return report;
    }

    if !recommended_valid {
        let adjusted = nearest_valid_tier(recommended.vcpu, recommended.memory_mb);
        report.nearest_valid = Some(NearestValid {
            tier: adjusted,
            is_downgrade: adjusted < current,
        });
    }
    report.known_lower = find_next_below(current.vcpu, current.memory_mb);

    report
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DowngradeSuggestion {
    pub current: Tier,
    pub current_valid: bool,
    pub suggestion: Option<Tier>,
}

/// The next known tier below `current`, if any
pub fn suggest_downgrade(current: Tier) -> DowngradeSuggestion {
    DowngradeSuggestion {
        current,
        current_valid: is_valid_tier(current),
        suggestion: find_next_below(current.vcpu, current.memory_mb),
    }
}

/// Result of one calculator run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Recommendation(Recommendation),
    Inspection(TierInspection),
    Bump(MemoryBump),
    Downgrade(DowngradeReport),
    Suggestion(DowngradeSuggestion),
}

/// Run the calculation selected by `mode`
pub fn calculate(mode: &Mode) -> Outcome {
    match *mode {
        Mode::Cpu { vcpu } => Outcome::Recommendation(recommend_from_cpu(vcpu)),
        Mode::Memory { quantity } => {
            Outcome::Recommendation(recommend_from_memory(quantity.to_mb()))
        }
        Mode::Inspect { tier } => Outcome::Inspection(inspect_tier(tier)),
        Mode::BumpMemory { tier } => Outcome::Bump(bump_memory_to_max(tier)),
        Mode::CheckDowngrade {
            current,
            recommended,
        } => Outcome::Downgrade(check_downgrade(current, recommended)),
        Mode::Downgrade { tier } => Outcome::Suggestion(suggest_downgrade(tier)),
    }
}
