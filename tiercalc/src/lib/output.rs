use std::fmt::Write;

use serde::Serialize;

use crate::lib::cli::Mode;
use crate::lib::config::{MAX_GB_PER_VCPU, MIN_GB_PER_VCPU};
use crate::lib::recommender::{
    BumpRelation, DowngradeReport, DowngradeSuggestion, MemoryBump, NextTier, Outcome,
    Recommendation, TierInspection,
};
use crate::lib::tier::Tier;

/// Top-level JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub input: Mode,
    pub result: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub mode: String,
    pub valid_gb_per_vcpu: (f64, f64),
}

impl Report {
    pub fn new(input: Mode, result: Outcome) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                mode: input.name().to_string(),
                valid_gb_per_vcpu: (MIN_GB_PER_VCPU, MAX_GB_PER_VCPU),
            },
            input,
            result,
        }
    }
}

fn valid_range() -> String {
    format!("valid range: {}-{} GB", MIN_GB_PER_VCPU, MAX_GB_PER_VCPU)
}

/// Render the human readable report for `outcome`
pub fn render_text(input: &Mode, outcome: &Outcome) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = match (input, outcome) {
        (Mode::Cpu { vcpu }, Outcome::Recommendation(rec)) => {
            render_cpu_recommendation(&mut out, *vcpu, rec)
        }
        (Mode::Memory { .. }, Outcome::Recommendation(rec)) => {
            render_memory_recommendation(&mut out, rec)
        }
        (_, Outcome::Inspection(inspection)) => render_inspection(&mut out, inspection),
        (_, Outcome::Bump(bump)) => render_bump(&mut out, bump),
        (_, Outcome::Downgrade(report)) => render_downgrade_check(&mut out, report),
        (_, Outcome::Suggestion(suggestion)) => render_downgrade_suggestion(&mut out, suggestion),
        (_, Outcome::Recommendation(rec)) => render_memory_recommendation(&mut out, rec),
    };
    out
}

fn warning(out: &mut String, rec: &Recommendation) -> std::fmt::Result {
    if !rec.valid {
        writeln!(
            out,
            "Warning: The calculated tier may not be valid. Please check the constraints."
        )?;
    }
    Ok(())
}

fn render_cpu_recommendation(
    out: &mut String,
    vcpu: u32,
    rec: &Recommendation,
) -> std::fmt::Result {
    let tier = rec.tier;
    warning(out, rec)?;
    writeln!(out, "Recommended custom tier for {} vCPUs:", vcpu)?;
    writeln!(out, "  - Memory: {} MB ({:.2} GB)", tier.memory_mb, tier.memory_gb())?;
    writeln!(out, "  - Tier: {}", tier)?;
    writeln!(
        out,
        "  - Memory per vCPU: {:.2} GB ({})",
        tier.gb_per_vcpu(),
        valid_range()
    )
}

fn render_memory_recommendation(out: &mut String, rec: &Recommendation) -> std::fmt::Result {
    let tier = rec.tier;
    warning(out, rec)?;
    writeln!(out, "Recommended custom tier for {} MB RAM:", tier.memory_mb)?;
    writeln!(out, "  - vCPUs: {}", tier.vcpu)?;
    writeln!(out, "  - Memory: {} MB ({:.2} GB)", tier.memory_mb, tier.memory_gb())?;
    writeln!(out, "  - Tier: {}", tier)?;
    writeln!(
        out,
        "  - Memory per vCPU: {:.2} GB ({})",
        tier.gb_per_vcpu(),
        valid_range()
    )
}

fn render_inspection(out: &mut String, inspection: &TierInspection) -> std::fmt::Result {
    let tier = inspection.tier;
    writeln!(
        out,
        "Parsed tier: CPUs={}, RAM={} MB - Valid: {}",
        tier.vcpu, tier.memory_mb, inspection.valid
    )?;
    match inspection.next {
        NextTier::NextKnown(next) => {
            writeln!(out, "Next known working custom tier: {}", next)?;
            writeln!(out, "  CPUs: {}", next.vcpu)?;
            writeln!(out, "  RAM: {} MB ({:.2} GB)", next.memory_mb, next.memory_gb())
        }
        NextTier::NextValid(next) => {
            writeln!(out, "Next valid custom tier: {}", next)?;
            writeln!(out, "  CPUs: {}", next.vcpu)?;
            writeln!(out, "  RAM: {} MB ({:.2} GB)", next.memory_mb, next.memory_gb())
        }
        NextTier::AlreadyValid => writeln!(out, "This is already a valid custom tier."),
    }
}

fn describe(tier: &Tier) -> String {
    format!(
        "{} vCPUs, {} MB ({:.2} GB) [{:.2} GB/vCPU]",
        tier.vcpu,
        tier.memory_mb,
        tier.memory_gb(),
        tier.gb_per_vcpu()
    )
}

fn render_bump(out: &mut String, bump: &MemoryBump) -> std::fmt::Result {
    let current = bump.current;
    let bumped = bump.bumped;
    match bump.relation {
        BumpRelation::AlreadyMax => writeln!(
            out,
            "Tier {} is already at the maximum memory level of {:.2} GB ({} GB/vCPU).",
            current,
            bumped.memory_gb(),
            MAX_GB_PER_VCPU
        ),
        BumpRelation::AlreadyExceedsMax => {
            writeln!(out, "Tier {} already exceeds the maximum standard memory.", current)?;
            writeln!(out, "  Current: {}", describe(&current))?;
            writeln!(
                out,
                "  Max at {} GB/vCPU: {} vCPUs, {} MB ({:.2} GB)",
                MAX_GB_PER_VCPU,
                bumped.vcpu,
                bumped.memory_mb,
                bumped.memory_gb()
            )
        }
        BumpRelation::Bumped => {
            writeln!(out, "Bumping memory for tier {}:", current)?;
            writeln!(out, "  Current: {}", describe(&current))?;
            writeln!(out, "  New: {}", describe(&bumped))?;
            writeln!(out, "  New Tier: {}", bumped)
        }
    }
}

fn render_downgrade_check(out: &mut String, report: &DowngradeReport) -> std::fmt::Result {
    let current = report.current;
    let recommended = report.recommended;
    writeln!(out, "Checking downgrade from {} to {}:", current, recommended)?;
    writeln!(
        out,
        "  Current: {} vCPUs, {} MB ({:.2} GB) - Valid: {}",
        current.vcpu,
        current.memory_mb,
        current.memory_gb(),
        report.current_valid
    )?;
    writeln!(
        out,
        "  Recommended: {} vCPUs, {} MB ({:.2} GB) - Valid: {}",
        recommended.vcpu,
        recommended.memory_mb,
        recommended.memory_gb(),
        report.recommended_valid
    )?;

    if report.is_downgrade() {
        return writeln!(out, "  Valid downgrade: Yes");
    }

    writeln!(out, "  Valid downgrade: No")?;
    if let Some(nearest) = report.nearest_valid {
        let tier = nearest.tier;
        writeln!(
            out,
            "  Nearest valid tier: {} ({} vCPUs, {} MB, {:.2} GB)",
            tier,
            tier.vcpu,
            tier.memory_mb,
            tier.memory_gb()
        )?;
        if nearest.is_downgrade {
            writeln!(out, "  This adjusted tier is a valid downgrade.")?;
        }
    }
    if !report.is_lower {
        writeln!(out, "  Recommended tier is not lower than the current tier.")?;
    }
    match report.known_lower {
        Some(tier) => writeln!(
            out,
            "  Suggested known lower tier: {} ({} vCPUs, {} MB, {:.2} GB)",
            tier,
            tier.vcpu,
            tier.memory_mb,
            tier.memory_gb()
        ),
        None => writeln!(out, "  No lower tier found in known list."),
    }
}

fn render_downgrade_suggestion(
    out: &mut String,
    suggestion: &DowngradeSuggestion,
) -> std::fmt::Result {
    let current = suggestion.current;
    writeln!(out, "Current tier: {}", current)?;
    writeln!(
        out,
        "  CPUs: {}, RAM: {} MB ({:.2} GB) - Valid: {}",
        current.vcpu,
        current.memory_mb,
        current.memory_gb(),
        suggestion.current_valid
    )?;
    writeln!(
        out,
        "  Memory per vCPU: {:.2} GB ({})",
        current.gb_per_vcpu(),
        valid_range()
    )?;

    match suggestion.suggestion {
        Some(tier) => {
            writeln!(out, "Suggested downgrade tier: {}", tier)?;
            writeln!(
                out,
                "  CPUs: {}, RAM: {} MB ({:.2} GB)",
                tier.vcpu,
                tier.memory_mb,
                tier.memory_gb()
            )?;
            writeln!(out, "  Memory per vCPU: {:.2} GB", tier.gb_per_vcpu())
        }
        None => writeln!(out, "Already at the lowest known tier."),
    }
}
