//! # Enrollment Partitioner
//!
//! Reads a flat enrollment file, keeps the latest version of each user per
//! insurance company, and writes one sorted CSV per company. Also ships a
//! small balanced-parentheses checker.
//!
//! ## Design Principles
//!
//! - **One winner slot per (company, user)**: no priority queues, only
//!   compare-and-replace
//! - **Separate orderings**: winner selection and output sorting are named
//!   independently even though they currently agree
//! - **Fail fast**: a malformed row aborts the run unless skipping is requested
//! - **Deterministic output**: ordered maps plus a stable sort give
//!   byte-identical files across runs
//!
//! ## Example
//!
//! ```no_run
//! use enrollment_partitioner::EnrollmentEngine;
//! use std::io::Cursor;
//!
//! let csv = "user_id,name,version,insurance_company\nu1,Jane Doe,2,Acme\n";
//! let mut engine = EnrollmentEngine::new();
//! engine.process_csv(Cursor::new(csv)).unwrap();
//! engine.write_output("output").unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod filename;
pub mod parens;
pub mod record;
pub mod roster;
pub mod writer;

pub use config::{Config, MalformedRowPolicy};
pub use engine::{run, EnrollmentEngine};
pub use error::{EnrollmentError, Result};
pub use filename::derive_file_name;
pub use parens::{is_balanced, ParenthesesChecker};
pub use record::{EnrollmentRecord, EnrollmentRow, COLUMNS};
pub use roster::{Partition, Roster, Selection};
pub use writer::{write_records, PartitionWriter};
