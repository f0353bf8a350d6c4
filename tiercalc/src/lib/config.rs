use std::path::PathBuf;

use crate::lib::cli::OutputFormat;

/// Literal prefix of every custom tier identifier
pub const TIER_PREFIX: &str = "db-custom";

pub const MIN_VCPU: u32 = 1;
pub const MAX_VCPU: u32 = 96;

/// Memory must be a multiple of this many MB
pub const MEMORY_GRANULARITY_MB: u32 = 256;
pub const MIN_MEMORY_MB: u32 = 3840;

/// Accepted memory band per vCPU, in GB
pub const MIN_GB_PER_VCPU: f64 = 0.9;
pub const MAX_GB_PER_VCPU: f64 = 6.5;

/// Ratio used when recommending a tier from a single dimension
pub const TARGET_GB_PER_VCPU: f64 = 1.5;

pub const MB_PER_GB: f64 = 1024.0;

/// Runtime settings taken from the command line
#[derive(Clone, Debug)]
pub struct Config {
    pub output: OutputFormat,
    pub verbose: bool,
    pub quiet: bool,
    pub log_file: Option<Option<PathBuf>>,
}

impl Config {
    pub fn new(
        output: OutputFormat,
        verbose: bool,
        quiet: bool,
        log_file: Option<Option<PathBuf>>,
    ) -> Self {
        Self {
            output,
            verbose,
            quiet,
            log_file,
        }
    }
}
