//! Output file names derived from insurance company names.
//!
//! Distinct companies can normalize to the same name ("Acme  Health" and
//! "acme-health" both give `acme-health.csv`). Nothing here prevents that;
//! the writer logs it when it happens.

/// Turns a company name into an output file name.
///
/// Lower-cases, replaces spaces with dashes, appends `.csv`, then collapses
/// runs of dots and runs of dashes to a single character.
///
/// ```
/// use enrollment_partitioner::derive_file_name;
///
/// assert_eq!(derive_file_name("Blue Cross"), "blue-cross.csv");
/// assert_eq!(derive_file_name("A..B Co"), "a.b-co.csv");
/// ```
pub fn derive_file_name(company: &str) -> String {
    let mut name = company.to_lowercase().replace(' ', "-");
    name.push_str(".csv");
    collapse_runs(&collapse_runs(&name, '.'), '-')
}

fn collapse_runs(s: &str, ch: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = None;
    for c in s.chars() {
        if c == ch && prev == Some(ch) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
