//! dmap CLI - Command line interface for double_map
//!
//! Loads pairs from a JSON file into a fresh map and answers one query.

use clap::{Parser, Subcommand};
use double_map::{DoubleMap, Fingerprint, MapConfig, PairFingerprint};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "dmap")]
#[command(about = "A bidirectional pair store backed by a fingerprint trie")]
#[command(version)]
struct Cli {
    /// Path to a JSON file holding an array of [a, b] pairs
    #[arg(short, long, default_value = "pairs.json")]
    pairs: PathBuf,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Path to a config file (defaults to ~/.config/dmap/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log insertions and lookups to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the value paired with A-side value
    GetA {
        /// The A-side value
        value: String,
    },

    /// Find the value paired with B-side value
    GetB {
        /// The B-side value
        value: String,
    },

    /// Find the value paired with a value in either role (A-side first)
    Get {
        /// The value to look up
        value: String,
    },

    /// Check that two values resolve to each other
    Verify {
        /// The A-side value
        a: String,
        /// The B-side value
        b: String,
    },

    /// Print the trie
    Dump,

    /// Print the fingerprint of a value, or the pair keys of a pair
    Fingerprint {
        /// The value to fingerprint
        value: String,
        /// B-side value to pair with
        #[arg(long)]
        pair: Option<String>,
    },

    /// Count stored pairs
    Count,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::GetA { value } => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            lookup(&cli.format, &value, map.get_from_a(&value));
        }

        Commands::GetB { value } => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            lookup(&cli.format, &value, map.get_from_b(&value));
        }

        Commands::Get { value } => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            lookup(&cli.format, &value, map.get_from_either(&value));
        }

        Commands::Verify { a, b } => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            let verified = map.verify(&a, &b);
            output(
                &cli.format,
                &serde_json::json!({
                    "a": a,
                    "b": b,
                    "verified": verified
                }),
            );
            if !verified {
                std::process::exit(1);
            }
        }

        Commands::Dump => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            let mut stdout = std::io::stdout().lock();
            map.dump(&mut stdout)?;
        }

        Commands::Fingerprint { value, pair } => {
            let json = match pair {
                Some(b) => {
                    let keys = PairFingerprint::of(&value, &b);
                    let keys: Vec<String> = keys.keys().iter().map(|k| k.to_string()).collect();
                    serde_json::json!({
                        "a": value,
                        "b": b,
                        "keys": keys
                    })
                }
                None => serde_json::json!({
                    "value": value,
                    "fingerprint": Fingerprint::of(&value).to_hex()
                }),
            };
            output(&cli.format, &json);
        }

        Commands::Count => {
            let map = load_map(&cli.pairs, cli.config.as_deref())?;
            output(
                &cli.format,
                &serde_json::json!({
                    "pairs": cli.pairs.display().to_string(),
                    "count": map.len()
                }),
            );
        }
    }

    Ok(())
}

fn load_map(path: &Path, config: Option<&Path>) -> anyhow::Result<DoubleMap<String, String>> {
    let config = MapConfig::load_or_default(config)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let pairs: Vec<(String, String)> = serde_json::from_str(&content)?;

    let mut map = DoubleMap::with_config(config);
    for (a, b) in pairs {
        map.add(a, b)?;
    }
    debug!(pairs = map.len(), path = %path.display(), "loaded pairs");
    Ok(map)
}

fn lookup(format: &OutputFormat, query: &str, found: Option<&String>) {
    match found {
        Some(value) => {
            output(
                format,
                &serde_json::json!({
                    "query": query,
                    "found": true,
                    "value": value
                }),
            );
        }
        None => {
            output(
                format,
                &serde_json::json!({
                    "query": query,
                    "found": false,
                    "message": format!("No pair found for: {}", query)
                }),
            );
            std::process::exit(1);
        }
    }
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!("{:#}", value);
        }
    }
}
