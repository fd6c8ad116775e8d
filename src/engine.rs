//! Enrollment pipeline driver.
//!
//! Reads enrollment rows from CSV into a [`Roster`], then writes one file per
//! insurance company through a [`PartitionWriter`].

use crate::config::{Config, MalformedRowPolicy};
use crate::error::{EnrollmentError, Result};
use crate::record::{EnrollmentRow, COLUMNS};
use crate::roster::{Roster, Selection};
use crate::writer::PartitionWriter;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// The enrollment processing engine.
///
/// Holds the roster of winners built from everything read so far. Input may
/// be fed in more than one call to [`EnrollmentEngine::process_csv`]; each
/// call is checked against the required header independently.
pub struct EnrollmentEngine {
    roster: Roster,

    on_malformed: MalformedRowPolicy,

    /// Rows turned into records, including ones that lost selection.
    parsed_rows: usize,

    /// Rows dropped under `MalformedRowPolicy::Skip`.
    skipped_rows: usize,
}

impl EnrollmentEngine {
    /// Creates an empty engine that aborts on the first malformed row.
    pub fn new() -> Self {
        Self::with_policy(MalformedRowPolicy::Abort)
    }

    /// Creates an empty engine with the given malformed-row policy.
    pub fn with_policy(on_malformed: MalformedRowPolicy) -> Self {
        EnrollmentEngine {
            roster: Roster::new(),
            on_malformed,
            parsed_rows: 0,
            skipped_rows: 0,
        }
    }

    /// Reads enrollment rows from a CSV reader.
    ///
    /// The header must name all of `user_id`, `name`, `version` and
    /// `insurance_company`, in any order. Only header names are trimmed; field
    /// values are kept exactly as read. Returns the number of records accepted
    /// from this reader.
    ///
    /// Rows from one reader are committed together: if the call fails, neither
    /// the roster nor the counters change.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        if let Some(missing) = COLUMNS.iter().find(|col| !headers.iter().any(|h| h == **col)) {
            return Err(EnrollmentError::MissingColumn(missing.to_string()));
        }

        let mut pending = Vec::new();
        let mut skipped = 0;
        for (row_idx, result) in csv_reader.deserialize::<EnrollmentRow>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let parsed = result
                .map_err(|e| EnrollmentError::MalformedRecord {
                    row: row_num,
                    message: e.to_string(),
                })
                .and_then(|row| row.parse(row_num));

            match parsed {
                Ok(record) => pending.push((row_num, record)),
                Err(e) => {
                    self.reject(e)?;
                    skipped += 1;
                }
            }
        }

        let accepted = pending.len();
        for (row_num, record) in pending {
            let user_id = record.user_id().to_string();
            let version = record.version();
            match self.roster.insert(record) {
                Selection::New => debug!("Row {}: New user {} at v{}", row_num, user_id, version),
                Selection::Replaced => {
                    debug!("Row {}: v{} replaces winner for {}", row_num, version, user_id)
                }
                Selection::Kept => {
                    debug!("Row {}: v{} for {} does not outrank winner", row_num, version, user_id)
                }
            }
        }

        self.parsed_rows += accepted;
        self.skipped_rows += skipped;
        info!("Parsed {} records", accepted);
        Ok(accepted)
    }

    /// Opens and reads an enrollment file.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        info!("Parsing file: {}", path.display());
        let file = File::open(path)?;
        self.process_csv(BufReader::new(file))
    }

    /// Applies the malformed-row policy to a parse failure.
    fn reject(&self, error: EnrollmentError) -> Result<()> {
        match self.on_malformed {
            MalformedRowPolicy::Abort => Err(error),
            MalformedRowPolicy::Skip => {
                warn!("{}, skipping", error);
                Ok(())
            }
        }
    }

    /// Writes one file per insurance company into `output_dir`.
    ///
    /// Companies are written in name order and the run stops at the first
    /// failed write. Returns the distinct paths written; companies whose names
    /// map to the same file contribute that path once.
    pub fn write_output(&self, output_dir: impl Into<PathBuf>) -> Result<Vec<PathBuf>> {
        if self.roster.is_empty() {
            info!("No records to write");
            return Ok(Vec::new());
        }

        let mut writer = PartitionWriter::new(output_dir);
        let mut written: Vec<PathBuf> = Vec::with_capacity(self.roster.company_count());

        for partition in self.roster.partitions() {
            if let Some(path) = writer.write_partition(&partition)? {
                info!("Finished writing file: {}", path.display());
                if !written.contains(&path) {
                    written.push(path);
                }
            }
        }

        Ok(written)
    }

    /// The winners collected so far.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Records accepted across all successful reads, including ones that lost selection.
    pub fn parsed_rows(&self) -> usize {
        self.parsed_rows
    }

    /// Rows dropped under `MalformedRowPolicy::Skip` across all successful reads.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

impl Default for EnrollmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the whole pipeline for a config: read, select, write.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let mut engine = EnrollmentEngine::with_policy(config.on_malformed);
    engine.process_file(&config.input)?;

    if engine.skipped_rows() > 0 {
        warn!("Skipped {} malformed rows", engine.skipped_rows());
    }

    engine.write_output(&config.output_dir)
}
