use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use stagegate::cache;
use stagegate::concepts;
use stagegate::config;
use stagegate::output;
use stagegate::scoring;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a concept's five ratings and print the gate decision
    Score {
        /// The five ratings in order: company_fit cost_stability
        /// manufacturability customer_acceptance repurchase (each 1-5)
        ratings: Vec<i64>,

        /// Read ratings as JSON from a file instead ("-" for stdin)
        #[arg(short, long, conflicts_with = "ratings")]
        input: Option<String>,

        /// Show the per-field weighted breakdown
        #[arg(short, long)]
        explain: bool,

        /// Skip the evaluation cache (no read, no write)
        #[arg(long)]
        no_cache: bool,

        /// Output tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Parse a concept list from a captured model reply and rank it
    Concepts {
        /// File holding the model reply (stdin when omitted, "-" also works)
        file: Option<String>,

        /// Keep only the best N concepts
        #[arg(short, long)]
        top: Option<usize>,

        /// Output tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show cached evaluations, newest first
    History {
        /// Remove all cached evaluations instead of listing them
        #[arg(long)]
        clear: bool,

        /// Output tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Write a starter config file with the default weights and thresholds
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "stagegate")]
#[command(about = "Stage-gate scoring for food-product concepts", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/stagegate/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    if let Err(errors) = scoring::validate_scoring(&config.scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Weights sum to {:.2}, gate at go>={} hold>={}",
            config.scoring.weights.sum(),
            config.scoring.thresholds.go,
            config.scoring.thresholds.hold
        );
    }

    match cli.command {
        Commands::Score {
            ratings,
            input,
            explain,
            no_cache,
            tsv,
        } => run_score(&config, ratings, input, explain, no_cache, tsv, cli.verbose),
        Commands::Concepts { file, top, tsv } => {
            run_concepts(file.as_deref().unwrap_or("-"), top, tsv, cli.verbose)
        }
        Commands::History { clear, tsv } => run_history(&config, clear, tsv),
        Commands::Init { force } => run_init(force),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_score(
    config: &config::Config,
    ratings: Vec<i64>,
    input: Option<String>,
    explain: bool,
    no_cache: bool,
    tsv: bool,
    verbose: bool,
) {
    let rating_set = match input {
        Some(source) => {
            let text = match read_source(&source) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Failed to read ratings: {}", e);
                    std::process::exit(EXIT_IO);
                }
            };
            match scoring::RatingSet::from_json(&text) {
                Ok(set) => set,
                Err(e) => {
                    eprintln!("Invalid ratings: {:#}", e);
                    std::process::exit(EXIT_INVALID_INPUT);
                }
            }
        }
        None => {
            if ratings.len() != 5 {
                eprintln!(
                    "Expected 5 ratings (company_fit cost_stability manufacturability \
                     customer_acceptance repurchase), got {}",
                    ratings.len()
                );
                std::process::exit(EXIT_INVALID_INPUT);
            }
            match scoring::RatingSet::new(
                ratings[0], ratings[1], ratings[2], ratings[3], ratings[4],
            ) {
                Ok(set) => set,
                Err(e) => {
                    eprintln!("Invalid ratings: {}", e);
                    std::process::exit(EXIT_INVALID_INPUT);
                }
            }
        }
    };

    let cache_path = cache::get_cache_path();
    let key = cache::cache_key(&rating_set, &config.scoring.weights);

    // The cached score is a pure function of the key; only the decision
    // depends on current thresholds, and evaluate recomputes that anyway.
    let cached = if no_cache {
        None
    } else {
        cache::read_cached(&cache_path, &key)
    };
    if verbose && !no_cache {
        match &cached {
            Some(entry) => eprintln!("Cache hit (evaluated {})", entry.evaluated_at),
            None => eprintln!("Cache miss"),
        }
    }

    let evaluation = scoring::evaluate(&rating_set, &config.scoring);

    if cached.is_none() && !no_cache {
        let entry = cache::CachedEvaluation {
            ratings: rating_set,
            weights: config.scoring.weights.clone(),
            score: evaluation.score,
            evaluated_at: chrono::Utc::now(),
        };
        // Cache write failure is not worth failing the run over.
        let _ = cache::write_cached(&cache_path, &key, &entry);
    }

    if tsv {
        println!(
            "{}\t{}\t{}",
            output::format_score(evaluation.score),
            evaluation.decision.as_str(),
            rating_set.compact()
        );
        return;
    }

    let use_colors = output::should_use_colors();
    println!("{}", output::format_evaluation(&evaluation, use_colors));
    if explain {
        println!();
        println!("{}", output::format_breakdown(&evaluation));
    }
}

fn run_concepts(file: &str, top: Option<usize>, tsv: bool, verbose: bool) {
    let reply = match read_source(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read model reply: {}", e);
            std::process::exit(EXIT_IO);
        }
    };

    let parsed = match concepts::parse_concepts(&reply) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to parse concepts: {:#}", e);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    };

    if verbose {
        eprintln!("Parsed {} concepts", parsed.len());
    }

    let ranked = match top {
        Some(n) => concepts::top_concepts(parsed, n),
        None => concepts::rank_concepts(parsed),
    };

    if tsv {
        println!("{}", output::format_concept_tsv(&ranked));
    } else {
        let use_colors = output::should_use_colors();
        println!("{}", output::format_concept_table(&ranked, use_colors));
    }
}

fn run_history(config: &config::Config, clear: bool, tsv: bool) {
    let cache_path = cache::get_cache_path();

    if clear {
        if let Err(e) = cache::clear_cache(&cache_path) {
            eprintln!("Failed to clear cache: {}", e);
            std::process::exit(EXIT_IO);
        }
        println!("Evaluation cache cleared.");
        return;
    }

    let entries = cache::list_cached(&cache_path);
    if tsv {
        println!(
            "{}",
            output::format_history_tsv(&entries, &config.scoring.thresholds)
        );
    } else {
        let use_colors = output::should_use_colors();
        println!(
            "{}",
            output::format_history_table(&entries, &config.scoring.thresholds, use_colors)
        );
    }
}

fn run_init(force: bool) {
    let path = config::get_config_path();
    match config::write_default_config(&path, force) {
        Ok(written) => println!("Wrote starter config to {}", written.display()),
        Err(e) => {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Read a file's contents, treating "-" as stdin.
fn read_source(source: &str) -> anyhow::Result<String> {
    use anyhow::Context;

    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}
