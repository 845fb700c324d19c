//! sharepoint-fetch - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sharepoint_fetch::{
    cli::Args,
    config::Config,
    download::{fetch_file, DownloadReport, Stage, StageTracker},
    error::{exit_codes, Error, ErrorClass, Result},
    output::{
        print_config_summary, print_error, print_failure_guidance, print_info,
        print_missing_vars, print_success,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            return ExitCode::from(code as u8);
        }
    };

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut tracker = StageTracker::new();

    match run(args, &mut tracker).await {
        Ok(report) => {
            tracker.advance(Stage::Success);
            print_success(&format!(
                "Successfully downloaded '{}' to '{}' ({} bytes)",
                report.file_name,
                report.local_path.display(),
                report.bytes
            ));
            ExitCode::from(exit_codes::SUCCESS as u8)
        }
        Err(e) => {
            report_failure(&e, tracker.stage());
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

async fn run(args: Args, tracker: &mut StageTracker) -> Result<DownloadReport> {
    let debug = args.debug;

    // Nothing touches the network until the configuration is complete
    let config = Config::from_sources(args.into_raw_config())?;
    tracker.advance(Stage::ConfigValidated);

    if debug {
        print_config_summary(&config);
    }

    print_info(&format!(
        "Attempting to download file from: {}",
        config.file_server_relative_url
    ));
    print_info(&format!("To local path: {}", config.download_path.display()));

    fetch_file(&config, tracker).await
}

fn report_failure(error: &Error, reached: Stage) {
    match error.class() {
        ErrorClass::Configuration => match error.missing_vars() {
            [] => print_error(&error.to_string()),
            vars => print_missing_vars(vars),
        },
        ErrorClass::Operation => {
            tracing::debug!("Failed after reaching {}", reached);
            print_error(&format!(
                "Error downloading file from SharePoint while {}: {}",
                reached.next_step(),
                error
            ));
            print_failure_guidance();
        }
    }
}
