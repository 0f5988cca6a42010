//! Stroke Risk Service — Demo CLI
//!
//! Scores a single Health Attribute Record from the command line, or runs a
//! scripted register → login → predict → logout session against the gateway.
//!
//! Usage:
//!   cargo run -p demo -- score --age 67 --gender Male --hypertension 1
//!   cargo run -p demo -- score --bmi 31 --smoking-status smokes --json --explain
//!   cargo run -p demo -- walkthrough
//!   cargo run -p demo -- walkthrough --config config/session.toml

mod walkthrough;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use stroke_contracts::health::HealthRecord;
use stroke_core::{render::DISCLAIMER, traits::RiskScorer};
use stroke_risk::RuleTableScorer;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Heuristic stroke risk demo.
///
/// The score is a fixed rule table for demonstration only. It is not a
/// medical model.
#[derive(Parser)]
#[command(
    name = "stroke-demo",
    about = "Stroke risk service demo",
    long_about = "Scores health attributes with the fixed rule table, or walks through\n\
                  registration, login, a gated prediction, and logout."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one record given as flags. Omitted flags count as absent.
    Score {
        #[command(flatten)]
        record: RecordArgs,
        /// Print the assessment as JSON.
        #[arg(long)]
        json: bool,
        /// Include the per-field points breakdown.
        #[arg(long)]
        explain: bool,
    },
    /// Run the scripted session walkthrough.
    Walkthrough {
        /// Session config TOML. Defaults to the bundled config/session.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Raw field values, passed through unparsed exactly like form input.
#[derive(Args)]
struct RecordArgs {
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    hypertension: Option<String>,
    #[arg(long)]
    heart_disease: Option<String>,
    #[arg(long)]
    avg_glucose_level: Option<String>,
    #[arg(long)]
    bmi: Option<String>,
    #[arg(long)]
    smoking_status: Option<String>,
    #[arg(long)]
    work_type: Option<String>,
    #[arg(long)]
    ever_married: Option<String>,
}

impl From<RecordArgs> for HealthRecord {
    fn from(args: RecordArgs) -> Self {
        HealthRecord {
            age: args.age,
            gender: args.gender,
            hypertension: args.hypertension,
            heart_disease: args.heart_disease,
            avg_glucose_level: args.avg_glucose_level,
            bmi: args.bmi,
            smoking_status: args.smoking_status,
            work_type: args.work_type,
            ever_married: args.ever_married,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Score {
            record,
            json,
            explain,
        } => run_score(record.into(), json, explain),
        Command::Walkthrough { config } => walkthrough::run(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Score ─────────────────────────────────────────────────────────────────────

fn run_score(record: HealthRecord, as_json: bool, explain: bool) -> Result<(), Box<dyn Error>> {
    let assessment = RuleTableScorer.assess(&record);
    let breakdown = RuleTableScorer::points(&record);

    if as_json {
        let mut value = serde_json::to_value(&assessment)?;
        if explain {
            value["points"] = serde_json::to_value(&breakdown)?;
        }
        value["disclaimer"] = json!(DISCLAIMER);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("  Risk level:     {}", assessment.risk_level);
    println!("  Probability:    {}%", assessment.probability);
    println!("  Recommendation: {}", assessment.recommendation);

    if explain {
        println!();
        println!("  Points by field:");
        for contribution in &breakdown {
            println!("    {:<18} {:>3}", contribution.field, contribution.points);
        }
        let raw: u32 = breakdown.iter().map(|c| c.points).sum();
        println!("    {:<18} {:>3}  (reported as {})", "total", raw, assessment.probability);
    }

    println!();
    println!("  Disclaimer: {}", DISCLAIMER);
    println!();
    Ok(())
}
