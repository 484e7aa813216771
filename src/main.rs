use ad_placement::cli::{Cli, OutputFormat};
use ad_placement::config::Settings;
use ad_placement::core::Planner;
use ad_placement::services::{build_report, load_dataset_or_empty, render_text_report};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    let dataset_path = cli.file.clone().unwrap_or_else(|| settings.dataset.path.clone());
    let dataset = load_dataset_or_empty(&dataset_path);

    let planner = Planner::new(settings.planning.default_top_n);
    let request = cli.to_request();

    info!(
        "Planning budget {:.2} over {} locations from {}",
        request.budget,
        dataset.len(),
        dataset_path.display()
    );

    let plan = match planner.plan(&dataset, &request) {
        Ok(plan) => plan,
        Err(e) => {
            error!("Planning failed: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.format {
        OutputFormat::Text => print!("{}", render_text_report(&plan, settings.report.chart_width)),
        OutputFormat::Json => {
            let report = build_report(&plan, &request);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize report: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
