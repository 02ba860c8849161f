//! Parsing and location tests for `codeownerizer-codeowners`.
//!
//! Each test gets an isolated `TempDir`; no shared state.

use codeownerizer_codeowners::{
    classify_owner, find_codeowners, load_file, load_from_standard_location, parse,
    CodeownersError,
};
use codeownerizer_core::types::{OwnerKind, OwnerRecord};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SAMPLE: &str = "\
# This is a comment.
# Each line is a file pattern followed by one or more owners.

# These owners will be the default owners for everything in the repo.
*       @global-owner1 @global-owner2

# JavaScript files are owned by js-owner.
*.js    @js-owner #This is an inline comment.

# Email addresses work as well.
*.go docs@example.com

# Teams are declared as @org/team-name.
*.txt @org/octocats

/build/logs/ @doctocat

# No owner: un-assigns ownership for this path.
/apps/github

/docs/ @doctocat @octocat
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn sample_file_yields_rules_in_order() {
    let ruleset = parse(SAMPLE);
    let patterns: Vec<_> = ruleset.rules.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(
        patterns,
        vec!["*", "*.js", "*.go", "*.txt", "/build/logs/", "/apps/github", "/docs/"]
    );
    assert_eq!(ruleset.rules[0].line, 5);
}

#[test]
fn owners_are_flattened_with_duplicates_kept() {
    let owners = parse(SAMPLE).owners();
    let raws: Vec<_> = owners.iter().map(|o| o.raw.as_str()).collect();
    assert_eq!(
        raws,
        vec![
            "@global-owner1",
            "@global-owner2",
            "@js-owner",
            "docs@example.com",
            "@org/octocats",
            "@doctocat",
            "@doctocat",
            "@octocat",
        ]
    );
}

#[test]
fn rule_without_owners_is_kept_but_empty() {
    let ruleset = parse(SAMPLE);
    let apps = ruleset
        .rules
        .iter()
        .find(|r| r.pattern == "/apps/github")
        .expect("rule present");
    assert!(apps.owners.is_empty());
}

#[test]
fn inline_comment_is_not_an_owner() {
    let ruleset = parse("*.js @js-owner #This is an inline comment.\n");
    assert_eq!(ruleset.rules[0].owners, vec![OwnerRecord::user("@js-owner")]);
}

#[test]
fn empty_content_has_no_rules() {
    assert!(parse("").is_empty());
    assert!(parse("# only comments\n\n").is_empty());
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[rstest]
#[case("@octocat", OwnerKind::User)]
#[case("@octo-cat_2", OwnerKind::User)]
#[case("@org/octocats", OwnerKind::Team)]
#[case("@my-org/team.name", OwnerKind::Team)]
#[case("docs@example.com", OwnerKind::Email)]
#[case("first.last+tag@sub.example.org", OwnerKind::Email)]
#[case("octocat", OwnerKind::Unknown)]
#[case("@", OwnerKind::Unknown)]
#[case("@org/", OwnerKind::Unknown)]
#[case("@org/team/extra", OwnerKind::Unknown)]
#[case("user@localhost", OwnerKind::Unknown)]
fn owner_classification(#[case] token: &str, #[case] expected: OwnerKind) {
    let owner = classify_owner(token);
    assert_eq!(owner.kind, expected, "token {token:?}");
    assert_eq!(owner.raw, token, "raw form must be preserved");
}

// ---------------------------------------------------------------------------
// Standard locations
// ---------------------------------------------------------------------------

#[rstest]
#[case(".github/CODEOWNERS")]
#[case("CODEOWNERS")]
#[case("docs/CODEOWNERS")]
fn each_standard_location_is_found(#[case] rel: &str) {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), rel, "* @octocat\n");
    let ruleset = load_from_standard_location(dir.path()).expect("load");
    assert_eq!(ruleset.owners(), vec![OwnerRecord::user("@octocat")]);
    assert_eq!(ruleset.source.as_deref(), Some(dir.path().join(rel).as_path()));
}

#[test]
fn github_dir_takes_priority_over_root_and_docs() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "docs/CODEOWNERS", "* @docs-owner\n");
    write(dir.path(), "CODEOWNERS", "* @root-owner\n");
    write(dir.path(), ".github/CODEOWNERS", "* @github-owner\n");

    assert_eq!(
        find_codeowners(dir.path()),
        Some(dir.path().join(".github/CODEOWNERS"))
    );
    let owners = load_from_standard_location(dir.path()).expect("load").owners();
    assert_eq!(owners, vec![OwnerRecord::user("@github-owner")]);
}

#[test]
fn missing_file_lists_searched_paths() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_from_standard_location(dir.path()).unwrap_err();
    match &err {
        CodeownersError::NotFound { searched, .. } => assert_eq!(searched.len(), 3),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(err.to_string().contains("docs/CODEOWNERS"));
}

#[test]
fn load_file_reports_io_error_with_path() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope");
    let err = load_file(&missing).unwrap_err();
    assert!(matches!(err, CodeownersError::Io { .. }));
    assert!(err.to_string().contains("nope"));
}
