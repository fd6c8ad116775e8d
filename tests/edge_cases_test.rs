//! Edge case tests for the enrollment partitioner library.
//!
//! Exercises the public API end to end: CSV in, files out.

use enrollment_partitioner::{
    derive_file_name, record, EnrollmentEngine, EnrollmentError, EnrollmentRecord,
    MalformedRowPolicy, ParenthesesChecker, Roster,
};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn run_csv(csv: &str) -> (TempDir, Vec<String>) {
    let out = TempDir::new().unwrap();

    let mut engine = EnrollmentEngine::new();
    engine.process_csv(Cursor::new(csv)).unwrap();

    let mut names: Vec<String> = engine
        .write_output(out.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    (out, names)
}

fn data_lines(dir: &TempDir, name: &str) -> Vec<String> {
    fs::read_to_string(dir.path().join(name))
        .unwrap()
        .lines()
        .skip(1) // Skip header
        .map(String::from)
        .collect()
}

fn rec(user_id: &str, name: &str, version: u32, company: &str) -> EnrollmentRecord {
    EnrollmentRecord::new(user_id, version, name, company).unwrap()
}

// ==================== SELECTION EDGE CASES ====================

#[test]
fn test_versions_out_of_order() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,10,Acme
u1,Jane Doe,2,Acme
u1,Jane Doe,9,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,10,Acme"]);
}

#[test]
fn test_version_compared_numerically() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,9,Acme
u1,Jane Doe,10,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,10,Acme"]);
}

#[test]
fn test_duplicate_version_does_not_crash() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,3,Acme
u1,Jane Doe,3,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,3,Acme"]);
}

#[test]
fn test_version_zero_accepted() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,0,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,0,Acme"]);
}

#[test]
fn test_same_user_across_companies() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,1,Acme
u1,Jane Doe,2,Blue Cross
u1,Jane Doe,5,Acme"#;

    let (dir, names) = run_csv(csv);
    assert_eq!(names, vec!["acme.csv", "blue-cross.csv"]);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,5,Acme"]);
    assert_eq!(data_lines(&dir, "blue-cross.csv"), vec!["u1,Jane Doe,2,Blue Cross"]);
}

#[test]
fn test_renamed_user_selected_by_name_order() {
    // Selection ranks names before versions, so the earlier-sorting name wins.
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Zimmer,1,Acme
u1,Jane Abbott,2,Acme
u2,Jack Abbott,1,Acme
u2,Jack Zimmer,2,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(
        data_lines(&dir, "acme.csv"),
        vec!["u2,Jack Abbott,1,Acme", "u1,Jane Abbott,2,Acme"]
    );
}

// ==================== OUTPUT ORDER EDGE CASES ====================

#[test]
fn test_sorted_by_last_then_first_name() {
    let csv = r#"user_id,name,version,insurance_company
u1,Zed Brown,1,Acme
u2,Amy Clark,1,Acme
u3,Amy Brown,1,Acme
u4,Bob Adams,1,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(
        data_lines(&dir, "acme.csv"),
        vec![
            "u4,Bob Adams,1,Acme",
            "u3,Amy Brown,1,Acme",
            "u1,Zed Brown,1,Acme",
            "u2,Amy Clark,1,Acme",
        ]
    );
}

#[test]
fn test_same_name_different_users_highest_version_first() {
    let csv = r#"user_id,name,version,insurance_company
u1,John Smith,1,Acme
u2,John Smith,4,Acme"#;

    let (dir, _) = run_csv(csv);
    assert_eq!(
        data_lines(&dir, "acme.csv"),
        vec!["u2,John Smith,4,Acme", "u1,John Smith,1,Acme"]
    );
}

#[test]
fn test_quoted_name_with_comma_round_trips() {
    let csv = r#"user_id,name,version,insurance_company
u1,"Jane Doe, Jr",1,"Acme, Inc""#;

    let (dir, names) = run_csv(csv);
    assert_eq!(names, vec!["acme,-inc.csv"]);
    assert_eq!(
        data_lines(&dir, "acme,-inc.csv"),
        vec![r#"u1,"Jane Doe, Jr",1,"Acme, Inc""#]
    );
}

#[test]
fn test_padded_company_gets_its_own_file() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,1,Acme
u1,Jane Doe,2,"Acme ""#;

    let (dir, names) = run_csv(csv);
    assert_eq!(names, vec!["acme-.csv", "acme.csv"]);
    assert_eq!(data_lines(&dir, "acme.csv"), vec!["u1,Jane Doe,1,Acme"]);
    let padded = data_lines(&dir, "acme-.csv");
    assert_eq!(padded.len(), 1);
    assert!(padded[0].starts_with("u1,Jane Doe,2,"));
    assert!(padded[0].contains("Acme "));
}

// ==================== ROUND TRIP ====================

#[test]
fn test_written_file_reparses_to_same_records() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,3,Acme
u2,John Roe,1,Acme
u3,Mary Ann Poe,12,Acme
u2,John Roe,2,Acme"#;

    let mut first = EnrollmentEngine::new();
    first.process_csv(Cursor::new(csv)).unwrap();
    let out = TempDir::new().unwrap();
    let written = first.write_output(out.path()).unwrap();
    assert_eq!(written.len(), 1);

    let mut second = EnrollmentEngine::new();
    let reread = second
        .process_csv(fs::File::open(&written[0]).unwrap())
        .unwrap();
    assert_eq!(reread, 3);

    let mut original: Vec<_> = first.roster().winners("Acme").unwrap();
    let mut reparsed: Vec<_> = second.roster().winners("Acme").unwrap();
    original.sort_by(|a, b| record::compare(a, b));
    reparsed.sort_by(|a, b| record::compare(a, b));
    assert_eq!(original, reparsed);
}

// ==================== MALFORMED INPUT ====================

#[test]
fn test_header_only_writes_nothing() {
    let (dir, names) = run_csv("user_id,name,version,insurance_company\n");
    assert!(names.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_empty_input_missing_header() {
    let mut engine = EnrollmentEngine::new();
    let err = engine.process_csv(Cursor::new("")).unwrap_err();
    assert!(matches!(err, EnrollmentError::MissingColumn(_)));
}

#[test]
fn test_fractional_version_is_malformed() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,1.0,Acme"#;

    let mut engine = EnrollmentEngine::new();
    let err = engine.process_csv(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, EnrollmentError::MalformedRecord { row: 2, .. }));
}

#[test]
fn test_skip_policy_keeps_good_rows() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,1,Acme
,Nobody Here,1,Acme
u2,John Roe,abc,Acme
u3,Ann Poe,1,"#;

    let mut engine = EnrollmentEngine::with_policy(MalformedRowPolicy::Skip);
    assert_eq!(engine.process_csv(Cursor::new(csv)).unwrap(), 1);
    assert_eq!(engine.skipped_rows(), 3);
}

// ==================== ROSTER / RECORD API ====================

#[test]
fn test_roster_from_records_matches_engine() {
    let roster = Roster::from_records(vec![
        rec("u1", "Jane Doe", 1, "Acme"),
        rec("u1", "Jane Doe", 2, "Acme"),
    ]);
    assert_eq!(roster.winners("Acme").unwrap()[0].version(), 2);
}

#[test]
fn test_first_and_last_name_rejoin_to_full_name() {
    for name in ["Jane Doe", "  Jane Doe ", "Mary Ann Smith", "J R R Tolkien"] {
        let record = rec("u1", name, 1, "Acme");
        assert_eq!(
            format!("{} {}", record.first_name(), record.last_name()),
            name.trim()
        );
    }
}

// ==================== FILE NAMES ====================

#[test]
fn test_file_name_examples() {
    assert_eq!(derive_file_name("Blue Cross"), "blue-cross.csv");
    assert_eq!(derive_file_name("A   B"), "a-b.csv");
    assert_eq!(derive_file_name("A..B Co"), "a.b-co.csv");
}

#[test]
fn test_colliding_companies_last_write_wins() {
    let csv = r#"user_id,name,version,insurance_company
u1,Jane Doe,1,Acme  Health
u2,John Roe,1,Acme Health"#;

    let (dir, names) = run_csv(csv);
    assert_eq!(names, vec!["acme-health.csv"]);
    // "Acme Health" sorts after "Acme  Health", so it is written last.
    assert_eq!(data_lines(&dir, "acme-health.csv"), vec!["u2,John Roe,1,Acme Health"]);
}

// ==================== PARENTHESES ====================

#[test]
fn test_parentheses_cases() {
    let cases = [
        ("", true),
        ("((x)(x))", true),
        ("a*)(foo)(bar)((x))", false),
        ("(bar(foo)*(bar)", false),
        ("no parens at all", true),
    ];

    for (input, expected) in cases {
        let checker = ParenthesesChecker::new(Some(input)).unwrap();
        assert_eq!(checker.is_balanced(), expected, "input: {:?}", input);
    }
}

#[test]
fn test_parentheses_absent_input() {
    assert!(matches!(
        ParenthesesChecker::new(None),
        Err(EnrollmentError::InvalidArgument(_))
    ));
}
