use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Import from casefile-core
use casefile_core::{build_classifier, ClassifierStrategy, IntakeConfig, IntakeProcessor};

// Import CLI utilities
use casefile::{batch, report};

#[derive(Parser)]
#[command(name = "casefile")]
#[command(about = "Categorize and validate case document uploads")]
struct Args {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest a category for each filename
    Classify {
        /// Filenames to classify (files don't need to exist)
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Classification strategy: filename or content
        #[arg(short, long, default_value = "filename")]
        strategy: ClassifierStrategy,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Show per-category keyword match counts
        #[arg(long)]
        explain: bool,
    },

    /// Validate and categorize files on disk as uploads to a case
    Intake {
        /// Files to take in
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Case the uploads belong to
        #[arg(long)]
        case_id: String,

        /// Path to custom config file (YAML format)
        #[arg(short, long)]
        config: Option<String>,

        /// Override the configured classification strategy
        #[arg(short, long)]
        strategy: Option<ClassifierStrategy>,

        /// Description attached to every record
        #[arg(short, long)]
        description: Option<String>,

        /// Share the uploads with the client
        #[arg(long)]
        shared: bool,

        /// Print records and summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List document categories with labels and colors
    Categories,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Classify {
            filenames,
            strategy,
            json,
            explain,
        } => run_classify(&filenames, strategy, json, explain),
        Command::Intake {
            paths,
            case_id,
            config,
            strategy,
            description,
            shared,
            json,
        } => {
            // Load config, then apply CLI overrides
            let mut intake_config = IntakeConfig::load_with_fallback(config.as_deref());
            if let Some(strategy) = strategy {
                intake_config.strategy = strategy;
            }
            if shared {
                intake_config.share_with_client = true;
            }
            let code = run_intake(&paths, &case_id, intake_config, description, json)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Command::Categories => {
            print!("{}", report::category_table());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_classify(
    filenames: &[String],
    strategy: ClassifierStrategy,
    json: bool,
    explain: bool,
) -> Result<()> {
    let classifier = build_classifier(strategy);

    if json {
        let results: Vec<serde_json::Value> = filenames
            .iter()
            .map(|name| {
                serde_json::json!({
                    "filename": name,
                    "result": classifier.classify(name, None),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for name in filenames {
        let result = classifier.classify(name, None);
        println!("{}", report::classification_line(name, &result));
        if explain {
            print!("{}", report::explain_lines(name));
        }
    }
    Ok(())
}

fn run_intake(
    paths: &[PathBuf],
    case_id: &str,
    config: IntakeConfig,
    description: Option<String>,
    json: bool,
) -> Result<i32> {
    let processor = IntakeProcessor::new(config);

    if !json {
        println!(
            "🗂️  Case {case_id}: taking in {} file(s) using {} strategy",
            paths.len(),
            processor.classifier_name()
        );
    }

    let outcome = batch::run_intake(
        &processor,
        paths,
        case_id,
        description.as_deref(),
        chrono::Utc::now(),
    );

    if json {
        println!("{}", outcome.to_json()?);
    } else {
        for record in &outcome.records {
            println!("{}", report::record_line(record));
        }
        for rejection in &outcome.rejected {
            eprintln!("❌ {}: {}", rejection.path, rejection.error);
        }
        println!();
        print!("{}", report::analytics_summary(&outcome.analytics));
        if !outcome.rejected.is_empty() {
            println!("⚠️  {} file(s) rejected", outcome.rejected.len());
        }
    }

    Ok(outcome.exit_code())
}
