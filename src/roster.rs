//! Grouping and winner selection.
//!
//! Records are grouped by insurance company and then by user id. Each
//! (company, user) pair owns a single "current winner" slot that a new
//! candidate replaces only when it ranks strictly first under
//! [`Roster::selection_order`].
//!
//! Known limitation: selection ranks by name before version, so when a user's
//! name changes between revisions the alphabetically first name wins, not the
//! highest version.

use crate::record::{self, EnrollmentRecord};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// What [`Roster::insert`] did with a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First record seen for this (company, user) pair.
    New,
    /// Candidate outranked and replaced the previous winner.
    Replaced,
    /// Previous winner kept; candidate dropped.
    Kept,
}

/// The winners of one insurance company, one per distinct user id.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub company: &'a str,
    pub winners: Vec<&'a EnrollmentRecord>,
}

/// Company → user id → winning record.
///
/// # Output Ordering
///
/// Both levels are ordered maps so that partitions and their winners always
/// come out in the same order for the same input.
#[derive(Debug, Default)]
pub struct Roster {
    companies: BTreeMap<String, BTreeMap<String, EnrollmentRecord>>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Roster {
            companies: BTreeMap::new(),
        }
    }

    /// Builds a roster from a sequence of records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EnrollmentRecord>,
    {
        let mut roster = Roster::new();
        for record in records {
            roster.insert(record);
        }
        roster
    }

    /// Order used to pick the winner for a user: the first-ranked record wins.
    pub fn selection_order(a: &EnrollmentRecord, b: &EnrollmentRecord) -> Ordering {
        record::compare(a, b)
    }

    /// Offers a record as the winner for its (company, user) pair.
    ///
    /// Ties keep the record that arrived first.
    pub fn insert(&mut self, record: EnrollmentRecord) -> Selection {
        let users = self
            .companies
            .entry(record.insurance_company().to_string())
            .or_default();

        match users.entry(record.user_id().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Selection::New
            }
            Entry::Occupied(mut slot) => {
                if Self::selection_order(&record, slot.get()) == Ordering::Less {
                    slot.insert(record);
                    Selection::Replaced
                } else {
                    Selection::Kept
                }
            }
        }
    }

    /// Iterates partitions in company-name order.
    pub fn partitions(&self) -> impl Iterator<Item = Partition<'_>> {
        self.companies.iter().map(|(company, users)| Partition {
            company: company.as_str(),
            winners: users.values().collect(),
        })
    }

    /// Returns the winners for a company, in user-id order.
    pub fn winners(&self, company: &str) -> Option<Vec<&EnrollmentRecord>> {
        self.companies
            .get(company)
            .map(|users| users.values().collect())
    }

    /// Number of distinct insurance companies.
    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    /// Total number of winners across all companies.
    pub fn record_count(&self) -> usize {
        self.companies.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no record has been inserted.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}
