//! Per-company CSV output.
//!
//! Each partition is sorted and written to its own file inside the output
//! directory. Output is always `\n`-terminated regardless of platform.

use crate::error::{EnrollmentError, Result};
use crate::filename::derive_file_name;
use crate::record::{self, EnrollmentRecord, COLUMNS};
use crate::roster::Partition;
use csv::{Terminator, WriterBuilder};
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{self, PathBuf};

/// Writes partitions into an existing output directory.
pub struct PartitionWriter {
    output_dir: PathBuf,

    /// File name → company that produced it, for collision detection.
    written: HashMap<String, String>,
}

impl PartitionWriter {
    /// Creates a writer targeting `output_dir`. The directory must already exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        PartitionWriter {
            output_dir: output_dir.into(),
            written: HashMap::new(),
        }
    }

    /// Order of rows within an output file.
    pub fn output_order(a: &EnrollmentRecord, b: &EnrollmentRecord) -> Ordering {
        record::compare(a, b)
    }

    /// Sorts and writes one partition.
    ///
    /// Returns the path of the file written, or `None` when the partition has
    /// no winners. A later partition whose name collides with an earlier one
    /// overwrites it.
    pub fn write_partition(&mut self, partition: &Partition<'_>) -> Result<Option<PathBuf>> {
        if partition.winners.is_empty() {
            debug!("Skipping empty partition for {}", partition.company);
            return Ok(None);
        }

        let file_name = derive_file_name(partition.company);
        if file_name.chars().any(path::is_separator) {
            return Err(EnrollmentError::InvalidFileName {
                company: partition.company.to_string(),
                file_name,
            });
        }

        if let Some(previous) = self.written.get(&file_name) {
            warn!(
                "Companies '{}' and '{}' both map to {}, overwriting",
                previous, partition.company, file_name
            );
        }

        let mut winners = partition.winners.clone();
        winners.sort_by(|a, b| Self::output_order(a, b));

        let path = self.output_dir.join(&file_name);
        info!(
            "Writing {} records for {} to {}",
            winners.len(),
            partition.company,
            path.display()
        );

        let file = File::create(&path)?;
        write_records(file, &winners)?;

        self.written.insert(file_name, partition.company.to_string());
        Ok(Some(path))
    }
}

/// Serializes records, already in output order, with the fixed header.
pub fn write_records<W: Write>(writer: W, records: &[&EnrollmentRecord]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;

    for record in records {
        csv_writer.write_record(record.to_row())?;
        debug!("Wrote {}", record);
    }

    csv_writer.flush()?;
    Ok(())
}
