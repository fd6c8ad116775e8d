//! Run configuration from command-line arguments and environment.

use crate::error::{EnrollmentError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable selecting the malformed-row policy.
pub const ON_MALFORMED_ENV: &str = "ENROLLMENT_ON_MALFORMED";

const USAGE: &str = "Usage: enrollment-partitioner <input.csv> <output-dir>";

/// What to do with a row that cannot be parsed into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Stop the run at the first malformed row.
    #[default]
    Abort,
    /// Log a warning, drop the row and continue.
    Skip,
}

impl FromStr for MalformedRowPolicy {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(MalformedRowPolicy::Abort),
            "skip" => Ok(MalformedRowPolicy::Skip),
            other => Err(EnrollmentError::Usage(format!(
                "{} must be 'abort' or 'skip', got '{}'",
                ON_MALFORMED_ENV, other
            ))),
        }
    }
}

impl fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRowPolicy::Abort => f.write_str("abort"),
            MalformedRowPolicy::Skip => f.write_str("skip"),
        }
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Enrollment CSV to read.
    pub input: PathBuf,

    /// Existing directory receiving one file per company.
    pub output_dir: PathBuf,

    /// Policy for rows that fail to parse; `Abort` unless overridden.
    pub on_malformed: MalformedRowPolicy,
}

impl Config {
    /// Builds a config from the positional arguments, excluding the program name.
    ///
    /// Exactly two arguments are accepted: input file and output directory.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [input, output_dir] => Ok(Config {
                input: PathBuf::from(input),
                output_dir: PathBuf::from(output_dir),
                on_malformed: MalformedRowPolicy::default(),
            }),
            _ => Err(EnrollmentError::Usage(format!(
                "Expected 2 arguments, got {}. {}",
                args.len(),
                USAGE
            ))),
        }
    }

    /// Applies the malformed-row policy from the environment, if set.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn with_env_policy<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ON_MALFORMED_ENV) {
            self.on_malformed = value.parse()?;
        }
        Ok(self)
    }
}
