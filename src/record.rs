//! Enrollment record models for CSV parsing and internal representation.

use crate::error::{EnrollmentError, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed column names, in output order.
pub const COLUMNS: [&str; 4] = ["user_id", "name", "version", "insurance_company"];

/// Raw enrollment row as read from CSV.
///
/// Fields are looked up by header name, so the input columns may appear in any
/// order. Everything is kept as a string until [`EnrollmentRow::parse`] validates it.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentRow {
    /// User identifier
    pub user_id: String,

    /// Full name, "First [Middle] Last"
    pub name: String,

    /// Revision number of this user's record
    pub version: String,

    /// Insurance company the user is enrolled with
    pub insurance_company: String,
}

impl EnrollmentRow {
    /// Parses the raw CSV row into a validated record.
    ///
    /// `row` is the 1-indexed line number used in error messages.
    pub fn parse(&self, row: usize) -> Result<EnrollmentRecord> {
        let version_str = self.version.trim();
        let version = version_str
            .parse::<u32>()
            .map_err(|_| EnrollmentError::MalformedRecord {
                row,
                message: format!("version '{}' is not a non-negative integer", version_str),
            })?;

        EnrollmentRecord::new(&self.user_id, version, &self.name, &self.insurance_company)
            .map_err(|e| match e {
                EnrollmentError::MalformedRecord { message, .. } => {
                    EnrollmentError::MalformedRecord { row, message }
                }
                other => other,
            })
    }
}

/// A validated enrollment record.
///
/// # Equality
///
/// Two records are equal when they share `user_id`, `version` and
/// `insurance_company`. Names do not take part, so two revisions that only
/// differ in spelling of the name are interchangeable.
///
/// # Ordering
///
/// The record deliberately does not implement `Ord`: its sort order (see
/// [`compare`]) looks at names, which equality ignores.
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    user_id: String,
    version: u32,
    full_name: String,
    first_name: String,
    last_name: String,
    insurance_company: String,
}

impl EnrollmentRecord {
    /// Builds a record, deriving first and last name from `full_name`.
    ///
    /// All strings are stored exactly as given; padding in `user_id` or
    /// `insurance_company` makes a distinct identity. The trimmed name is
    /// split at its last space. Fails with `MalformedRecord` (row 0) if there
    /// is nothing to split on, or if the user id or company is blank.
    pub fn new(
        user_id: &str,
        version: u32,
        full_name: &str,
        insurance_company: &str,
    ) -> Result<Self> {
        let malformed = |message: String| EnrollmentError::MalformedRecord { row: 0, message };

        if user_id.trim().is_empty() {
            return Err(malformed("user_id is empty".to_string()));
        }

        if insurance_company.trim().is_empty() {
            return Err(malformed("insurance_company is empty".to_string()));
        }

        let trimmed = full_name.trim();
        let split = trimmed
            .rfind(' ')
            .ok_or_else(|| malformed(format!("name '{}' has no first/last separator", trimmed)))?;

        Ok(EnrollmentRecord {
            user_id: user_id.to_string(),
            version,
            full_name: full_name.to_string(),
            first_name: trimmed[..split].trim().to_string(),
            last_name: trimmed[split..].trim().to_string(),
            insurance_company: insurance_company.to_string(),
        })
    }

    /// User identifier, as read.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Revision number of this record.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Full name, as read.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Everything before the last space of the trimmed name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// The word after the last space of the trimmed name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Insurance company, as read.
    pub fn insurance_company(&self) -> &str {
        &self.insurance_company
    }

    /// The output line for this record, in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 4] {
        [
            self.user_id.clone(),
            self.full_name.clone(),
            self.version.to_string(),
            self.insurance_company.clone(),
        ]
    }
}

impl PartialEq for EnrollmentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
            && self.version == other.version
            && self.insurance_company == other.insurance_company
    }
}

impl Eq for EnrollmentRecord {}

impl Hash for EnrollmentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_id.hash(state);
        self.version.hash(state);
        self.insurance_company.hash(state);
    }
}

impl fmt::Display for EnrollmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} '{}' ({})",
            self.user_id, self.version, self.full_name, self.insurance_company
        )
    }
}

/// Record order: last name ascending, then first name ascending, then
/// version descending so the newest revision of a name comes first.
pub fn compare(a: &EnrollmentRecord, b: &EnrollmentRecord) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| b.version.cmp(&a.version))
}
