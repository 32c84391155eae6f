//! wallthick - Pipeline wall thickness CLI
//!
//! Reads a JSON input record, runs the PD 8010-2 wall thickness analysis and
//! prints the result.
//!
//! Exit codes: 0 success, 1 calculation error, 2 input error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallthick_core::calculations::calculate;
use wallthick_core::file_io::{load_input, save_report};
use wallthick_core::input_file::REQUIRED_KEYS;
use wallthick_core::materials::{Api5lCatalog, MaterialTable};
use wallthick_core::report;
use wallthick_core::{CalcError, CalcResult};

#[derive(Parser, Debug)]
#[command(name = "wallthick")]
#[command(about = "Pipeline wall thickness design to PD 8010-2")]
#[command(version)]
struct Cli {
    /// JSON input record
    input: PathBuf,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Also write the output to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Pressure containment, collapse and buckle thicknesses
    Summary,
    /// Full wall thickness design sheet
    Report,
    /// Complete result as JSON
    Json,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wallthick_core={0},wallthick_cli={0}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Load, analyse and render one input file. `date` heads the design sheet.
fn run(input: &Path, format: OutputFormat, date: NaiveDate) -> CalcResult<String> {
    let data = load_input(input)?;
    info!(name = %data.name, "running wall thickness calculation");

    let result = calculate(&data, MaterialTable::builtin(), &Api5lCatalog)?;

    match format {
        OutputFormat::Summary => Ok(report::short_summary(&result)),
        OutputFormat::Report => Ok(report::design_summary(&result, date)),
        OutputFormat::Json => report::to_json(&result),
    }
}

fn exit_code(err: &CalcError) -> u8 {
    if err.is_input_error() {
        2
    } else {
        1
    }
}

fn required_keys_message() -> String {
    format!("Check input data file includes the following: {}", REQUIRED_KEYS.join(", "))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = run(&cli.input, cli.format, Local::now().date_naive()).and_then(|text| {
        if let Some(path) = &cli.output {
            save_report(&text, path)?;
        }
        Ok(text)
    });

    match outcome {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = err.error_code(), "{}", err);
            eprintln!("Error: {}", err);
            if matches!(err, CalcError::MissingField { .. } | CalcError::MissingFields { .. }) {
                eprintln!("{}", required_keys_message());
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const AVIAT: &str = r#"{
        "name": "Aviat 8in X65",
        "t_sel": 0.0111, "D_o": 0.2191, "t_corr": 0.0015, "f_tol": 0.125,
        "f_0": 0.025, "B": 0.1, "mat_p": "CS X65", "t_coat": 0.0,
        "T_d": 0, "P_d": 17930000, "h_ref": 0, "rho_d": 1025,
        "R_reel": 7.5, "T_lay": 0,
        "d_max": 124.247, "d_min": 80.5, "T_a": 4, "rho_w": 1025, "g": 9.80665
    }"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["wallthick", "in.json", "--format", "json", "-vv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.output.is_none());

        let cli = Cli::try_parse_from(["wallthick", "in.json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Summary);
    }

    #[test]
    fn test_run_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aviat.json");
        fs::write(&path, AVIAT).unwrap();

        let text = run(&path, OutputFormat::Summary, date()).unwrap();
        assert!(text.contains("Pressure Containment: 8.643 mm"));
        assert!(text.contains("Hydrostatic Collapse: 3.250 mm"));
        assert!(text.contains("Propagation buckling: 5.583 mm"));
    }

    #[test]
    fn test_run_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aviat.json");
        fs::write(&path, AVIAT).unwrap();

        let text = run(&path, OutputFormat::Json, date()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["governing"], "PressureContainment");
    }

    #[test]
    fn test_run_report_is_dated_and_reproducible() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aviat.json");
        fs::write(&path, AVIAT).unwrap();

        let first = run(&path, OutputFormat::Report, date()).unwrap();
        let second = run(&path, OutputFormat::Report, date()).unwrap();
        assert!(first.starts_with("2024-03-01"));
        assert!(first.contains("10.31 mm"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_keys_are_input_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "name": "partial" }"#).unwrap();

        let err = run(&path, OutputFormat::Summary, date()).unwrap_err();
        assert!(matches!(err, CalcError::MissingFields { .. }));
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_calculation_errors_exit_one() {
        let err = CalcError::division_by_zero("req_thickness", "fabrication tolerance");
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&CalcError::material_not_found("CS X80")), 2);
    }

    #[test]
    fn test_required_keys_message_lists_keys() {
        let msg = required_keys_message();
        for key in REQUIRED_KEYS {
            assert!(msg.contains(key));
        }
    }
}
