use clap::Parser;
use date_matcher::config::Settings;
use date_matcher::core::{Matchmaker, ParticipantCompatibility};
use date_matcher::models::ErrorResponse;
use date_matcher::report::{build_report, failure_line, render_text};
use date_matcher::services::{load_roster, SolverBackend};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "date-matcher", version, about = "Pair event participants by maximizing total compatibility")]
struct Cli {
    /// Roster file (.csv or .json), one participant per row
    roster: PathBuf,

    /// Configuration file (defaults to config/default and config/local)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Solver backend: lp or exhaustive
    #[arg(long)]
    backend: Option<SolverBackend>,

    /// Write the LP model dump here
    #[arg(long)]
    lp_dump: Option<PathBuf>,

    /// Skip the LP model dump
    #[arg(long, conflicts_with = "lp_dump")]
    no_lp_dump: bool,

    /// Solver time budget in seconds, 0 for none
    #[arg(long)]
    time_limit: Option<u64>,

    /// Output JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT override the configured values
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(backend) = cli.backend {
        settings.solver.backend = backend;
    }
    if let Some(path) = &cli.lp_dump {
        settings.solver.lp_dump_path = path.display().to_string();
    }
    if cli.no_lp_dump {
        settings.solver.lp_dump_path.clear();
    }
    if cli.time_limit.is_some() {
        settings.solver.time_limit_secs = cli.time_limit;
    }

    init_logging(&settings);
    info!("Starting date matcher...");

    let participants = match load_roster(&cli.roster) {
        Ok(participants) => participants,
        Err(e) => {
            error!("Failed to load roster {}: {}", cli.roster.display(), e);
            eprintln!("Status: Aborted (invalid roster) - {}", e);
            return ExitCode::FAILURE;
        }
    };

    let capability =
        ParticipantCompatibility::new(&participants).with_wildcard(&settings.matching.wildcard_day);
    let matchmaker = Matchmaker::from_settings(&settings);
    let solver = settings.solver.backend.build();

    info!("Matchmaker initialized with weights: {:?}", matchmaker.weights());

    let outcome = matchmaker
        .run(&capability, solver.as_ref())
        .and_then(|matching| build_report(&matching, &capability, &settings.reporting, solver.name()));

    match outcome {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render_text(&report));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Matching run aborted: {}", e);
            if cli.json {
                let response = ErrorResponse {
                    error: e.kind().to_string(),
                    message: e.to_string(),
                };
                if let Ok(json) = serde_json::to_string_pretty(&response) {
                    println!("{}", json);
                }
            }
            eprintln!("{}", failure_line(&e));
            ExitCode::FAILURE
        }
    }
}
