use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use serde::Serialize;

use crate::lib::error::{Result, TierCalcError};
use crate::lib::memory::MemoryQuantity;
use crate::lib::tier::Tier;

/// Custom Tier Calculator
///
/// Computes and validates custom machine tiers (vCPUs and memory) for
/// managed database instances.
#[derive(Parser, Debug)]
#[command(name = "tiercalc", author, version, about, styles=get_styles())]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(false)
        .args(["cpu", "mem", "tier", "bump_mem", "check_downgrade", "downgrade"]),
))]
pub struct Cli {
    /// Number of vCPUs to size a tier for (e.g. 24, 48, 64)
    #[arg(long, value_name = "VCPUS", value_parser = clap::value_parser!(u32).range(1..))]
    pub cpu: Option<u32>,

    /// Memory to size a tier for (e.g. 6G, 6144M, 6144)
    #[arg(long, value_name = "MEMORY")]
    pub mem: Option<String>,

    /// Show the next known tier above an existing tier (e.g. db-custom-1-3840)
    #[arg(short, long, value_name = "TIER")]
    pub tier: Option<String>,

    /// Raise memory of an existing tier to the maximum for its vCPU count
    #[arg(long, value_name = "TIER")]
    pub bump_mem: Option<String>,

    /// Check whether RECOMMENDED is a valid downgrade from CURRENT
    ///
    /// Accepts two values, or a single quoted value holding both.
    #[arg(long, value_names = ["CURRENT", "RECOMMENDED"], num_args = 1..=2)]
    pub check_downgrade: Option<Vec<String>>,

    /// Suggest the next known tier below an existing tier (e.g. db-custom-8-53248)
    #[arg(long, value_name = "TIER")]
    pub downgrade: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format: text (default) or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Also write logs to a file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub log_file: Option<Option<PathBuf>>,
}

/// Output format for calculator results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable report
    Text,
    /// Output results as JSON
    Json,
}

/// The single calculation requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    Cpu { vcpu: u32 },
    Memory { quantity: MemoryQuantity },
    Inspect { tier: Tier },
    BumpMemory { tier: Tier },
    CheckDowngrade { current: Tier, recommended: Tier },
    Downgrade { tier: Tier },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Cpu { .. } => "cpu",
            Mode::Memory { .. } => "memory",
            Mode::Inspect { .. } => "inspect",
            Mode::BumpMemory { .. } => "bump_memory",
            Mode::CheckDowngrade { .. } => "check_downgrade",
            Mode::Downgrade { .. } => "downgrade",
        }
    }
}

impl Cli {
    /// Parse the selected mode's arguments into typed values
    pub fn mode(&self) -> Result<Mode> {
        if let Some(vcpu) = self.cpu {
            return Ok(Mode::Cpu { vcpu });
        }
        if let Some(mem) = &self.mem {
            return Ok(Mode::Memory {
                quantity: mem.parse()?,
            });
        }
        if let Some(tier) = &self.tier {
            return Ok(Mode::Inspect {
                tier: tier.parse()?,
            });
        }
        if let Some(tier) = &self.bump_mem {
            return Ok(Mode::BumpMemory {
                tier: tier.parse()?,
            });
        }
        if let Some(values) = &self.check_downgrade {
            let (current, recommended) = split_tier_pair(values)?;
            return Ok(Mode::CheckDowngrade {
                current: current.parse()?,
                recommended: recommended.parse()?,
            });
        }
        if let Some(tier) = &self.downgrade {
            return Ok(Mode::Downgrade {
                tier: tier.parse()?,
            });
        }

        Err(TierCalcError::InvalidInput(
            "one of --cpu, --mem, --tier, --bump-mem, --check-downgrade or --downgrade is required"
                .to_string(),
        ))
    }
}

fn split_tier_pair(values: &[String]) -> Result<(&str, &str)> {
    let parts: Vec<&str> = values.iter().flat_map(|v| v.split_whitespace()).collect();
    match parts.as_slice() {
        [current, recommended] => Ok((*current, *recommended)),
        _ => Err(TierCalcError::InvalidInput(
            "--check-downgrade expects '<current-tier> <recommended-tier>'".to_string(),
        )),
    }
}

/// Set color and variants for help description
///
/// Thanks to [Praveen Perera](https://stackoverflow.com/a/76916424)
fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}
