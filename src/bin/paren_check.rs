//! Parentheses checker CLI
//!
//! # Usage
//!
//! ```bash
//! paren-check "((x)(y))"
//! paren-check string "((x)(y))"
//! paren-check file expression.txt
//! ```
//!
//! Prints `balanced` or `not balanced`. Exits non-zero only on usage or I/O errors.

use enrollment_partitioner::{EnrollmentError, ParenthesesChecker, Result};
use log::info;
use std::env;
use std::process;

const USAGE: &str = "Usage: paren-check <text> | paren-check string <text> | paren-check file <path>";

fn main() {
    env_logger::init();

    if let Err(e) = try_main() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let checker = match args.as_slice() {
        [text] => ParenthesesChecker::new(Some(text.as_str()))?,
        [mode, text] if mode == "string" => ParenthesesChecker::new(Some(text.as_str()))?,
        [mode, path] if mode == "file" => ParenthesesChecker::from_file(path)?,
        _ => return Err(EnrollmentError::Usage(USAGE.to_string())),
    };

    let balanced = checker.is_balanced();
    println!("{}", if balanced { "balanced" } else { "not balanced" });

    info!("Complete");
    Ok(())
}
