/// Command-line entry point for the SP3 fetch service.
///
/// Usage:
///   sp3fetch_service <date> [--config <path>] [--report <path>]
///
/// Dates are accepted as `YYYY-MM-DD` or `DD/MM/YYYY`. The config file
/// defaults to `./sp3fetch.toml`; a `.env` file can supply the
/// `EARTHDATA_TOKEN` override.

use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use std::process::ExitCode;

use sp3fetch_service::config::Config;
use sp3fetch_service::coordinator::Coordinator;
use sp3fetch_service::ingest::cddis::CddisClient;
use sp3fetch_service::inspect::{self, constellation_name};
use sp3fetch_service::logging::{self, LogLevel, LogSource};

const DEFAULT_CONFIG_PATH: &str = "sp3fetch.toml";

struct CliArgs {
    date: NaiveDate,
    config_path: PathBuf,
    report_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, None, false);

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("usage: sp3fetch_service <YYYY-MM-DD | DD/MM/YYYY> [--config <path>] [--report <path>]");
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::load(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.require_token() {
        eprintln!("✗ {}", e);
        return ExitCode::FAILURE;
    }

    let client = match CddisClient::new(&config.bearer_token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Fetching SP3 products for {}", args.date);
    let coordinator = Coordinator::new(&config, &client);

    let download = match coordinator.smart_download(args.date) {
        Ok(download) => download,
        Err(e) => {
            logging::error(LogSource::System, None, &format!("download failed: {}", e));
            eprintln!("✗ download failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "✓ delivered {} product: {}{}",
        download.product,
        download.path.display(),
        if download.fallback_used { " (fallback)" } else { "" }
    );
    if download.still_compressed {
        println!("⚠ decompression unavailable - file kept compressed");
    }

    let report = inspect::inspect(&download.path);
    print_report(&report);

    if let Some(report_path) = &args.report_path {
        if let Err(e) = inspect::write_report_json(&report, report_path) {
            eprintln!("✗ cannot write report {}: {}", report_path.display(), e);
            return ExitCode::FAILURE;
        }
        println!("✓ report written to {}", report_path.display());
    }

    ExitCode::SUCCESS
}

fn print_report(report: &sp3fetch_service::inspect::InspectionReport) {
    println!(
        "  {:.2} MB, {} satellites across {} constellations",
        report.size_bytes as f64 / (1024.0 * 1024.0),
        report.satellite_count,
        report.constellation_counts.len()
    );
    for (letter, count) in &report.constellation_counts {
        println!("    {}: {}", constellation_name(*letter), count);
    }
    if !report.ok {
        println!(
            "⚠ sanity check incomplete: {}",
            report.note.as_deref().unwrap_or("unknown reason")
        );
    }
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, String> {
    let mut date = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut report_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config requires a path")?;
                config_path = PathBuf::from(value);
            }
            "--report" => {
                let value = args.next().ok_or("--report requires a path")?;
                report_path = Some(PathBuf::from(value));
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            other => {
                if date.is_some() {
                    return Err("only one date argument is allowed".to_string());
                }
                date = Some(parse_date(other)?);
            }
        }
    }

    let date = date.ok_or("missing date argument")?;
    if date > Utc::now().date_naive() {
        return Err(format!("date {} is in the future", date));
    }

    Ok(CliArgs { date, config_path, report_path })
}

/// Accepts ISO `YYYY-MM-DD` and European `DD/MM/YYYY`.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let result = if s.contains('/') {
        NaiveDate::parse_from_str(s, "%d/%m/%Y")
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
    };
    result.map_err(|_| format!("invalid date: {} (use YYYY-MM-DD or DD/MM/YYYY)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(parse_date("2025-05-01"), Ok(expected));
        assert_eq!(parse_date("01/05/2025"), Ok(expected));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("32/05/2025").is_err());
    }

    #[test]
    fn test_parse_args_rejects_future_date() {
        let args = vec!["2999-01-01".to_string()];
        assert!(parse_args(args.into_iter()).is_err());
    }

    #[test]
    fn test_parse_args_reads_options() {
        let args = vec![
            "2025-05-01".to_string(),
            "--config".to_string(),
            "/etc/sp3.toml".to_string(),
            "--report".to_string(),
            "out.json".to_string(),
        ];
        let parsed = parse_args(args.into_iter()).unwrap();
        assert_eq!(parsed.config_path, PathBuf::from("/etc/sp3.toml"));
        assert_eq!(parsed.report_path, Some(PathBuf::from("out.json")));
    }
}
