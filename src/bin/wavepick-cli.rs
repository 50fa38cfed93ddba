use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wavepick::wave::DriverConfig;
use wavepick::{solve_with_config, Corridor, Order};

/// Solves a wave-picking instance read from a JSON file and prints the
/// selected wave as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the instance JSON file
    instance: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log verbosity, e.g. "info", "debug", "wavepick=trace"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct InstanceFile {
    orders: Vec<HashMap<u32, u32>>,
    corridors: Vec<HashMap<u32, u32>>,
    n_items: usize,
    l: u32,
    u: u32,
}

#[derive(Debug, Serialize)]
struct SolutionFile {
    orders: Vec<usize>,
    corridors: Vec<usize>,
    total_items: u64,
    ratio: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .init();

    let raw = match fs::read_to_string(&cli.instance) {
        Ok(raw) => raw,
        Err(err) => {
            error!(path = %cli.instance.display(), error = %err, "failed to read instance file");
            return ExitCode::FAILURE;
        }
    };

    let instance: InstanceFile = match serde_json::from_str(&raw) {
        Ok(instance) => instance,
        Err(err) => {
            error!(error = %err, "failed to parse instance JSON");
            return ExitCode::FAILURE;
        }
    };

    let orders: Vec<Order> = instance.orders.into_iter().map(Order::new).collect();
    let corridors: Vec<Corridor> = instance.corridors.into_iter().map(Corridor::new).collect();

    info!(
        n_orders = orders.len(),
        n_corridors = corridors.len(),
        "loaded instance"
    );

    let solution = solve_with_config(
        &orders,
        &corridors,
        instance.n_items,
        instance.l,
        instance.u,
        &DriverConfig::from_env(),
    );

    let output = SolutionFile {
        orders: solution.orders,
        corridors: solution.corridors,
        total_items: solution.total_items,
        ratio: solution.ratio,
    };

    let payload = match serde_json::to_string_pretty(&output) {
        Ok(payload) => payload,
        Err(err) => {
            error!(error = %err, "failed to serialize solution");
            return ExitCode::FAILURE;
        }
    };

    match cli.out {
        Some(path) => {
            if let Err(err) = fs::write(&path, payload) {
                error!(path = %path.display(), error = %err, "failed to write output file");
                return ExitCode::FAILURE;
            }
        }
        None => println!("{payload}"),
    }

    ExitCode::SUCCESS
}
