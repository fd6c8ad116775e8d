//! Enrollment Partitioner CLI
//!
//! Reads an enrollment CSV and writes one deduplicated, sorted CSV per
//! insurance company into an existing output directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- enrollments.csv output/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `debug` to control logging verbosity
//! - `ENROLLMENT_ON_MALFORMED`: `abort` (default) or `skip` malformed rows

use enrollment_partitioner::{run, Config, Result};
use log::info;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = try_main() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let config = Config::from_args(env::args().skip(1))?
        .with_env_policy(|key| env::var(key).ok())?;

    let written = run(&config)?;
    for path in &written {
        println!("{}", path.display());
    }

    info!("Complete");
    Ok(())
}
