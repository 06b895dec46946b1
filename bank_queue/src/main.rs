//! Run one bank simulation and print the summary.
//!
//! Usage:
//!   bank_queue [CONFIG.toml] [HOURS] [OUTPUT_DIR]
//!
//! Without a config file the baseline parameters are used. HOURS defaults
//! to 3. When OUTPUT_DIR is given the full report is written there.

use std::env;
use std::path::PathBuf;
use std::process;

use bank_queue::logging::init_logging;
use bank_queue::{ModelConfig, Result, Simulation};

const DEFAULT_HOURS: f64 = 3.0;

fn main() {
    init_logging("info");

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 4 || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [CONFIG.toml] [HOURS] [OUTPUT_DIR]", args[0]);
        process::exit(2);
    }

    let config = match args.get(1) {
        Some(path) => {
            println!("Loading config: {}", path);
            ModelConfig::from_toml_file(path)?
        }
        None => ModelConfig::baseline(),
    };
    let hours = match args.get(2) {
        Some(h) => h.parse::<f64>().map_err(|e| {
            bank_queue::Error::Configuration(format!("HOURS must be a number, got '{}': {}", h, e))
        })?,
        None => DEFAULT_HOURS,
    };

    println!("Bank Queue Simulation");
    println!("=====================\n");
    println!("  - Tellers: {}", config.num_servers);
    println!("  - Arrivals: {}", config.arrival()?.family());
    println!(
        "  - Service: {:.0} s ± {:.0} s",
        config.service_mean, config.service_std_dev
    );
    println!("  - Priority customers: {:.0}%", config.priority_probability * 100.0);
    println!("  - Simulated time: {} h\n", hours);

    let mut simulation = Simulation::new(config)?;
    simulation.run_for_hours(hours)?;

    println!("At the end of the simulation:");
    println!("{}", simulation.summary());

    if let Some(dir) = args.get(3) {
        let dir = PathBuf::from(dir);
        simulation.report().write_all(&dir)?;
        println!("\nResults saved to: {}", dir.display());
    }

    Ok(())
}
