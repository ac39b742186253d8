//! subnet-match command line.
//!
//! ```text
//! subnet-match sort 192.168.0.0/16 192.168.0.1/32
//! subnet-match match -s 10.0.0.0/8 -s 192.168.0.0/16 10.1.2.3 8.8.8.8
//! subnet-match classify -c subnets.toml < addresses.txt
//! subnet-match watch -c subnets.toml < addresses.txt
//! ```
//!
//! Addresses come from the positional arguments, or one per line on stdin
//! when none are given.

use std::io::BufRead;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use subnet_match::config::watcher::{apply_config, ConfigWatcher};
use subnet_match::config::{load_config, SubnetConfig};
use subnet_match::observability::logging::{self, LogFormat};
use subnet_match::observability::metrics::{self, QueryResult};
use subnet_match::{sort_subnets_with, SharedClassifier, SubnetResult};

#[derive(Parser)]
#[command(name = "subnet-match")]
#[command(about = "Match and classify IP addresses against a list of subnets", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset (overrides the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit one JSON object per line.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print subnets most specific first
    Sort {
        #[command(flatten)]
        source: SubnetSource,
        specs: Vec<String>,
    },
    /// Report whether each address is inside any subnet
    Match {
        #[command(flatten)]
        source: SubnetSource,
        addresses: Vec<String>,
    },
    /// Report which subnet each address belongs to
    Classify {
        #[command(flatten)]
        source: SubnetSource,
        addresses: Vec<String>,
    },
    /// Classify stdin lines, reloading subnets when the config file changes
    Watch {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct SubnetSource {
    /// Subnet spec, <address>/<mask-or-length>. Repeatable.
    #[arg(short = 's', long = "subnet")]
    subnets: Vec<String>,

    /// TOML config file with a `subnets` list.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allow resolver lookups for non-literal IPv4 names.
    #[arg(long)]
    resolve: bool,

    /// Keep the given order instead of sorting most specific first.
    #[arg(long)]
    no_sort: bool,
}

impl SubnetSource {
    fn load(&self) -> Result<SubnetConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SubnetConfig::default(),
        };
        config.subnets.extend(self.subnets.iter().cloned());
        if self.resolve {
            config.parsing.resolve_hostnames = true;
        }
        if self.no_sort {
            config.sort = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Sort { source, .. }
        | Commands::Match { source, .. }
        | Commands::Classify { source, .. } => source.load()?,
        Commands::Watch { config } => load_config(config)?,
    };

    let observability = &config.observability;
    let level = cli.log_level.as_deref().unwrap_or(observability.log_level.as_str());
    logging::init(level, LogFormat::from_name(&observability.log_format));

    if observability.metrics_enabled {
        match observability.metrics_address.parse() {
            Ok(addr) => metrics::init_prometheus(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(subnets = config.subnets.len(), "Configuration loaded");

    match cli.command {
        Commands::Sort { specs, .. } => {
            let all = config.subnets.iter().chain(specs.iter());
            let sorted = sort_subnets_with(all, config.parsing.options())?;
            if cli.json {
                println!("{}", serde_json::to_string(&sorted)?);
            } else {
                for spec in sorted {
                    println!("{}", spec);
                }
            }
        }
        Commands::Match { addresses, .. } => {
            let matcher = config.build_matcher()?;
            for address in collect_addresses(addresses)? {
                let result = matcher.matches(&address);
                report_match(&address, result, cli.json);
            }
        }
        Commands::Classify { addresses, .. } => {
            let classifier = config.build_classifier()?;
            for address in collect_addresses(addresses)? {
                let result = classifier.classify(&address).map(|label| label.map(str::to_string));
                report_label(&address, result, cli.json);
            }
        }
        Commands::Watch { config: path } => {
            watch(path, config, cli.json).await?;
        }
    }

    Ok(())
}

async fn watch(path: PathBuf, config: SubnetConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedClassifier::new(config.build_classifier()?);
    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    let address = line.trim();
                    if !address.is_empty() {
                        report_label(address, shared.classify(address), json);
                    }
                }
                None => break,
            },
            Some(new_config) = updates.recv() => {
                if let Some(version) = apply_config(&shared, &new_config) {
                    tracing::info!(version, path = ?path, "Subnets reloaded");
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn collect_addresses(args: Vec<String>) -> std::io::Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let mut addresses = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            addresses.push(trimmed.to_string());
        }
    }
    Ok(addresses)
}

fn report_match(address: &str, result: SubnetResult<bool>, json: bool) {
    match result {
        Ok(matched) => {
            metrics::record_query(if matched { QueryResult::Match } else { QueryResult::Miss });
            if json {
                println!("{}", json!({ "address": address, "matched": matched }));
            } else {
                println!("{}\t{}", address, matched);
            }
        }
        Err(e) => report_error(address, &e.to_string(), json),
    }
}

fn report_label(address: &str, result: SubnetResult<Option<String>>, json: bool) {
    match result {
        Ok(label) => {
            metrics::record_query(if label.is_some() { QueryResult::Match } else { QueryResult::Miss });
            if json {
                println!("{}", json!({ "address": address, "subnet": label }));
            } else {
                println!("{}\t{}", address, label.as_deref().unwrap_or("-"));
            }
        }
        Err(e) => report_error(address, &e.to_string(), json),
    }
}

fn report_error(address: &str, error: &str, json: bool) {
    metrics::record_query(QueryResult::Error);
    tracing::warn!(address = %address, error = %error, "Query failed");
    if json {
        println!("{}", json!({ "address": address, "error": error }));
    } else {
        eprintln!("{}\terror: {}", address, error);
    }
}
