//! Custom Tier Calculator Library
//!
//! This library validates and derives custom machine tiers (vCPU count and
//! memory in MB) for managed database instances, and suggests neighbouring
//! tiers from a table of known offerings.

pub mod lib {
    pub mod cli;
    pub mod config;
    pub mod constraints;
    pub mod error;
    pub mod known_tiers;
    pub mod logger;
    pub mod memory;
    pub mod output;
    pub mod recommender;
    pub mod tier;
}

// Re-export commonly used types at the root level for convenience
pub use lib::cli::{Cli, Mode, OutputFormat};
pub use lib::config::Config;
pub use lib::constraints::{
    is_valid, is_valid_tier, nearest_valid_tier, round_down_to_granularity,
    round_up_to_granularity, suggest_minimal_tier, truncate_mb,
};
pub use lib::error::{ConfigError, Result, TierCalcError};
pub use lib::known_tiers::{KNOWN_TIERS, find_next_above, find_next_below};
pub use lib::logger::init_logger;
pub use lib::memory::{MemoryQuantity, MemoryUnit};
pub use lib::output::{Report, render_text};
pub use lib::recommender::{
    BumpRelation, DowngradeReport, DowngradeSuggestion, MemoryBump, NearestValid, NextTier,
    Outcome, Recommendation, TierInspection, bump_memory_to_max, calculate, check_downgrade,
    inspect_tier, recommend_from_cpu, recommend_from_memory, suggest_downgrade,
};
pub use lib::tier::Tier;
