//! keyboard-predict - query the prediction engine from a terminal.
//!
//! Loads the five model tables from a directory and prints ranked candidates
//! for a context given on the command line, or for every line read from
//! stdin. A trailing space in the context means "predict the next word";
//! without one the last word is completed.

use clap::Parser;
use keyboard_predict::config::Config;
use keyboard_predict::{ModelStore, Prediction, Predictor};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyboard-predict")]
#[command(about = "Next-word and completion predictions from precomputed n-gram models")]
#[command(version)]
struct Args {
    /// Text before the cursor; reads stdin line by line when omitted
    context: Option<String>,

    /// Directory containing the *_probs.json model files
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// Maximum number of candidates
    #[arg(short = 'n', long)]
    max: Option<usize>,

    /// Prefix each result with the tier that produced it
    #[arg(long)]
    tier: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Persist the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

fn init_tracing(config: &Config, verbose: bool) {
    let default_filter = if verbose {
        "keyboard_predict=debug"
    } else {
        config.log_filter.as_str()
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn format_prediction(prediction: &Prediction, show_tier: bool) -> String {
    let candidates = prediction.candidates.join(" | ");
    if !show_tier {
        return candidates;
    }

    match prediction.tier {
        Some(tier) => format!("[{tier}] {candidates}"),
        None => "[none]".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    if let Some(models) = args.models {
        config.models_dir = Some(models);
    }
    if let Some(max) = args.max {
        config.max_suggestions = max;
    }
    if args.tier {
        config.show_tier = true;
    }

    init_tracing(&config, args.verbose);
    if let Some(err) = config_error {
        warn!(error = %err, "failed to load config, using defaults");
    }

    if args.save_config {
        config.save()?;
        info!("config saved");
    }

    let models_dir = config.resolve_models_dir();
    info!(dir = %models_dir.display(), "loading models");
    let predictor = Predictor::new(ModelStore::load_dir(&models_dir));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(context) = args.context {
        let prediction = predictor.predict_with_tier(&context, config.max_suggestions);
        writeln!(out, "{}", format_prediction(&prediction, config.show_tier))?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let context = line.trim_end_matches(['\r', '\n']);
        let prediction = predictor.predict_with_tier(context, config.max_suggestions);
        writeln!(out, "{}", format_prediction(&prediction, config.show_tier))?;
    }

    Ok(())
}
