use clap::Parser;
use tiercalc::{Cli, Mode, OutputFormat, Report, Tier, TierCalcError, calculate, render_text};

fn run(args: &[&str]) -> Result<String, TierCalcError> {
    let cli = Cli::try_parse_from(std::iter::once("tiercalc").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mode = cli.mode()?;
    let outcome = calculate(&mode);
    match cli.output {
        OutputFormat::Text => Ok(render_text(&mode, &outcome)),
        OutputFormat::Json => Ok(serde_json::to_string(&Report::new(mode, outcome))?),
    }
}

#[test]
fn test_memory_report() {
    let text = run(&["--mem", "6G"]).unwrap();
    assert_eq!(
        text,
        "Recommended custom tier for 6144 MB RAM:\n\
         \x20 - vCPUs: 4\n\
         \x20 - Memory: 6144 MB (6.00 GB)\n\
         \x20 - Tier: db-custom-4-6144\n\
         \x20 - Memory per vCPU: 1.50 GB (valid range: 0.9-6.5 GB)\n"
    );
}

#[test]
fn test_memory_report_warns_on_invalid_result() {
    let text = run(&["--mem", "1000"]).unwrap();
    assert!(text.starts_with("Warning:"));
    assert!(text.contains("  - Tier: db-custom-3-3840"));
}

#[test]
fn test_bump_exceeding_report() {
    let text = run(&["--bump-mem", "db-custom-4-30720"]).unwrap();
    assert_eq!(
        text,
        "Tier db-custom-4-30720 already exceeds the maximum standard memory.\n\
         \x20 Current: 4 vCPUs, 30720 MB (30.00 GB) [7.50 GB/vCPU]\n\
         \x20 Max at 6.5 GB/vCPU: 4 vCPUs, 26624 MB (26.00 GB)\n"
    );
}

#[test]
fn test_check_downgrade_not_lower_report() {
    let text = run(&[
        "--check-downgrade",
        "db-custom-4-15360",
        "db-custom-8-30720",
    ])
    .unwrap();
    assert!(text.contains("  Valid downgrade: No"));
    assert!(text.contains("  Recommended tier is not lower than the current tier."));
    assert!(text.contains("  Suggested known lower tier: db-custom-2-13312"));
    assert!(!text.contains("Nearest valid tier"));
}

#[test]
fn test_downgrade_report() {
    let text = run(&["--downgrade", "db-custom-8-53248"]).unwrap();
    assert!(text.starts_with("Current tier: db-custom-8-53248\n"));
    assert!(text.contains("Suggested downgrade tier: db-custom-8-30720"));
    assert!(text.contains("  Memory per vCPU: 3.75 GB"));
}

#[test]
fn test_inspect_beyond_table() {
    let text = run(&["-t", "db-custom-96-638976"]).unwrap();
    assert!(text.contains("Next valid custom tier: db-custom-416-638976"));
}

#[test]
fn test_json_output() {
    let json = run(&["--output", "json", "--bump-mem", "db-custom-4-3840"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["metadata"]["mode"], "bump_memory");
    assert_eq!(value["input"]["tier"]["tier"], "db-custom-4-3840");
    assert_eq!(value["result"]["relation"], "bumped");
    assert_eq!(value["result"]["bumped"]["memory_mb"], 26624);
}

#[test]
fn test_json_downgrade_not_found_is_null() {
    let json = run(&["--output", "json", "--downgrade", "db-custom-1-3840"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["result"]["suggestion"].is_null());
}

#[test]
fn test_malformed_inputs_fail() {
    for args in [
        &["--mem", "6TB"][..],
        &["--mem", "lots"][..],
        &["-t", "db-standard-4"][..],
        &["--bump-mem", "db-custom-4"][..],
        &["--check-downgrade", "db-custom-8-53248 nonsense"][..],
    ] {
        let err = run(args).unwrap_err();
        assert!(err.is_parse_error(), "{args:?} gave {err:?}");
    }

    let err = run(&["--check-downgrade", "db-custom-8-53248 a b"]).unwrap_err();
    assert!(matches!(err, TierCalcError::InvalidInput(_)));
}

#[test]
fn test_mode_resolution() {
    let cli = Cli::try_parse_from([
        "tiercalc",
        "--check-downgrade",
        "db-custom-8-53248",
        "db-custom-8-30720",
    ])
    .unwrap();
    assert_eq!(
        cli.mode().unwrap(),
        Mode::CheckDowngrade {
            current: Tier::new(8, 53248),
            recommended: Tier::new(8, 30720),
        }
    );
}
