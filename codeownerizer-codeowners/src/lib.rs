//! CODEOWNERS loading for `codeownerizer-codeowners`.
//!
//! `load_from_standard_location(root)` finds the ruleset GitHub would honour
//! for a checkout and parses it into [`Rule`]s whose owners are already
//! classified as team, user, email, or unknown. Owner list files (an explicit
//! `[{kind, raw}]` document) are read by [`owner_list`].

pub mod owner_list;

use std::fs;
use std::path::{Path, PathBuf};

use codeownerizer_core::types::{OwnerKind, OwnerRecord};
use thiserror::Error;

pub use owner_list::load_owner_list;

/// Candidate locations relative to the repository root, in lookup order.
pub const STANDARD_LOCATIONS: [&str; 3] = [".github/CODEOWNERS", "CODEOWNERS", "docs/CODEOWNERS"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One non-comment line of a CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Path pattern with escapes resolved.
    pub pattern: String,
    /// Owners in declaration order. Empty for a rule that clears ownership.
    pub owners: Vec<OwnerRecord>,
    /// 1-based line number in the source file.
    pub line: usize,
}

/// All rules of a CODEOWNERS file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ruleset {
    pub rules: Vec<Rule>,
    /// File the rules were read from, when loaded from disk.
    pub source: Option<PathBuf>,
}

impl Ruleset {
    /// Every declared owner, flattened in rule order. Duplicates are kept.
    pub fn owners(&self) -> Vec<OwnerRecord> {
        self.rules
            .iter()
            .flat_map(|rule| rule.owners.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Errors from locating or reading owner declarations.
#[derive(Debug, Error)]
pub enum CodeownersError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no CODEOWNERS file under '{}' (searched: {})", .root.display(), display_paths(.searched))]
    NotFound { root: PathBuf, searched: Vec<PathBuf> },

    #[error("failed to parse owner list {path}: {message}")]
    OwnerList { path: PathBuf, message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Path of the CODEOWNERS file GitHub would use for the checkout at `root`.
pub fn find_codeowners(root: &Path) -> Option<PathBuf> {
    STANDARD_LOCATIONS
        .iter()
        .map(|rel| root.join(rel))
        .find(|candidate| candidate.is_file())
}

/// Load the CODEOWNERS file from the first standard location that exists.
pub fn load_from_standard_location(root: &Path) -> Result<Ruleset, CodeownersError> {
    match find_codeowners(root) {
        Some(path) => load_file(&path),
        None => Err(CodeownersError::NotFound {
            root: root.to_path_buf(),
            searched: STANDARD_LOCATIONS.iter().map(|rel| root.join(rel)).collect(),
        }),
    }
}

/// Load and parse a CODEOWNERS file at an explicit path.
pub fn load_file(path: &Path) -> Result<Ruleset, CodeownersError> {
    let content = fs::read_to_string(path).map_err(|e| CodeownersError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut ruleset = parse(&content);
    ruleset.source = Some(path.to_path_buf());
    Ok(ruleset)
}

/// Parse CODEOWNERS text. Never fails: unrecognised owners become
/// [`OwnerKind::Unknown`] records and are left for the caller to report.
pub fn parse(content: &str) -> Ruleset {
    let rules = content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1))
        .collect();
    Ruleset {
        rules,
        source: None,
    }
}

/// Classify a single owner token as written in a CODEOWNERS file.
pub fn classify_owner(token: &str) -> OwnerRecord {
    let kind = if let Some(handle) = token.strip_prefix('@') {
        match handle.split_once('/') {
            Some((org, team)) if is_handle(org) && is_handle(team) => OwnerKind::Team,
            None if is_handle(handle) => OwnerKind::User,
            _ => OwnerKind::Unknown,
        }
    } else if is_email(token) {
        OwnerKind::Email
    } else {
        OwnerKind::Unknown
    };
    OwnerRecord::new(kind, token)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

fn parse_line(line: &str, line_no: usize) -> Option<Rule> {
    let mut tokens = tokenize(line).into_iter();
    let pattern = tokens.next()?;
    Some(Rule {
        pattern,
        owners: tokens.map(|t| classify_owner(&t)).collect(),
        line: line_no,
    })
}

/// Split on unescaped whitespace, stopping at a `#` that starts a token.
/// `\` escapes the following character (`\#`, `\ `).
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.trim().chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            '#' if current.is_empty() => break,
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_handle(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_stops_at_comment() {
        assert_eq!(
            tokenize("*.js @js-owner # frontend"),
            vec!["*.js".to_string(), "@js-owner".to_string()]
        );
    }

    #[test]
    fn tokenize_keeps_escaped_hash_and_space() {
        assert_eq!(
            tokenize(r"/docs/\#notes\ dir @doctocat"),
            vec!["/docs/#notes dir".to_string(), "@doctocat".to_string()]
        );
    }

    #[test]
    fn hash_inside_token_is_literal() {
        assert_eq!(tokenize("a#b @x"), vec!["a#b".to_string(), "@x".to_string()]);
    }

    #[test]
    fn comment_and_blank_lines_produce_no_rule() {
        assert!(parse_line("   ", 1).is_none());
        assert!(parse_line("# heading", 2).is_none());
    }

    #[test]
    fn email_detection() {
        assert!(is_email("docs@example.com"));
        assert!(!is_email("@octocat"));
        assert!(!is_email("a@b@c.com"));
        assert!(!is_email("user@localhost"));
    }
}
