//! Error types for the enrollment partitioner.

use thiserror::Error;

/// Result type alias for partitioner operations
pub type Result<T> = std::result::Result<T, EnrollmentError>;

/// Errors that can occur while parsing, grouping or writing enrollments.
#[derive(Error, Debug)]
pub enum EnrollmentError {
    /// Failed to read the input file or write an output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV tokenizer or writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be turned into an enrollment record
    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

    /// Input header lacks one of the required columns
    #[error("Input header is missing required column '{0}'")]
    MissingColumn(String),

    /// Company name normalizes to something that is not a plain file name
    #[error("Company '{company}' maps to unsafe file name '{file_name}'")]
    InvalidFileName { company: String, file_name: String },

    /// Absent input handed to the parentheses checker
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Wrong command-line invocation or configuration value
    #[error("{0}")]
    Usage(String),
}
