use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use tiercalc::{Cli, Config, OutputFormat, Report, Result, calculate, init_logger, render_text};

fn run(cli: Cli) -> Result<String> {
    let config = Config::new(cli.output, cli.verbose, cli.quiet, cli.log_file.clone());
    init_logger(config.verbose, config.quiet, config.log_file.clone())?;

    let mode = cli.mode()?;
    info!("Running {} calculation", mode.name());
    debug!("Input: {:?}", mode);

    let outcome = calculate(&mode);

    match config.output {
        OutputFormat::Text => Ok(render_text(&mode, &outcome)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&Report::new(mode, outcome))?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
