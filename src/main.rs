use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tam_scout::output::{
    format_failures, format_result_list, format_stats_summary, should_use_colors, ResultsReport,
};
use tam_scout::prospects::load_companies;
use tam_scout::scoring::{validate_config, ScoringEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a prospect CSV and print companies ranked by score
    Score {
        /// Path to the prospect CSV export
        #[arg(short, long)]
        input: PathBuf,

        /// Write the full JSON results report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the scoring configuration and exit
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "tam-scout")]
#[command(about = "Score and tier prospective defense-compliance customers", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tam-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    tam_scout::telemetry::init(cli.verbose);

    let config = tam_scout::config::load_scoring_config(cli.config.as_deref());

    // Validate scoring config at startup; a config that parsed but breaks
    // the scoring invariants (tier gaps, negative weights) must not reach
    // the engine.
    if let Err(errors) = validate_config(&config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Check => {
            println!(
                "Config OK: {} tiers, {} keyword categories",
                config.tier_classification.len(),
                config.keywords.len()
                    + config.technology_keywords.len()
                    + config.compliance_keywords.len()
            );
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Score { input, output } => {
            let records = match load_companies(&input) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            if records.is_empty() {
                eprintln!("No companies found in {}", input.display());
                std::process::exit(EXIT_DATA);
            }

            let mut engine = ScoringEngine::new(config);
            let outcome = engine.batch_score(&records);

            let report = ResultsReport::new(&outcome, engine.stats(), engine.config());
            let use_colors = should_use_colors();

            println!("{}", format_result_list(&report.ranked_results(), use_colors));
            println!();
            println!("{}", format_stats_summary(engine.stats()));

            if !outcome.failures.is_empty() {
                eprintln!();
                eprintln!("Failed to score {} companies:", outcome.failures.len());
                eprintln!("{}", format_failures(&outcome.failures));
            }

            if let Some(output_path) = output {
                if let Err(e) = report.save(&output_path) {
                    eprintln!("Failed to save results: {:#}", e);
                    std::process::exit(EXIT_DATA);
                }
                eprintln!("Results saved to {}", output_path.display());
            }

            std::process::exit(EXIT_SUCCESS);
        }
    }
}
