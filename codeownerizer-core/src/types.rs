//! Domain types shared by every codeownerizer crate.
//!
//! Remote state types deserialize straight from GitHub REST payloads; unknown
//! fields are ignored and missing permission flags default to `false`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A GitHub organization (or user account) that owns repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgName(pub String);

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository name, without its owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The URL-safe identifier of a team inside an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamSlug(pub String);

impl fmt::Display for TeamSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TeamSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TeamSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A user account login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Login(pub String);

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Login {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Login {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Repository reference
// ---------------------------------------------------------------------------

/// The single repository a run reconciles, `<org>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub org: OrgName,
    pub repo: RepoName,
}

impl RepoRef {
    pub fn new(org: impl Into<OrgName>, repo: impl Into<RepoName>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = CoreError;

    /// Parses the `owner/name` form used by `GITHUB_REPOSITORY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((org, repo)) if !org.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(org, repo))
            }
            _ => Err(CoreError::InvalidRepoRef {
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Declared owners
// ---------------------------------------------------------------------------

/// How an owner was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    /// `@org/team-slug`
    Team,
    /// `@username`
    User,
    /// `someone@example.com`
    Email,
    /// Anything the producer could not classify.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerKind::Team => write!(f, "team"),
            OwnerKind::User => write!(f, "user"),
            OwnerKind::Email => write!(f, "email"),
            OwnerKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// One declared owner, exactly as written by its producer.
///
/// Two records denote the same owner iff their `raw` strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub kind: OwnerKind,
    pub raw: String,
}

impl OwnerRecord {
    pub fn new(kind: OwnerKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    pub fn team(raw: impl Into<String>) -> Self {
        Self::new(OwnerKind::Team, raw)
    }

    pub fn user(raw: impl Into<String>) -> Self {
        Self::new(OwnerKind::User, raw)
    }

    pub fn email(raw: impl Into<String>) -> Self {
        Self::new(OwnerKind::Email, raw)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for OwnerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Remote state
// ---------------------------------------------------------------------------

/// Permission flags GitHub reports for a team or collaborator on a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub pull: bool,
    pub triage: bool,
    pub push: bool,
    pub maintain: bool,
    pub admin: bool,
}

impl Permissions {
    /// Permissions of an association that can push.
    pub fn write() -> Self {
        Self {
            pull: true,
            triage: true,
            push: true,
            ..Self::default()
        }
    }

    /// Permissions of a read-only association.
    pub fn read() -> Self {
        Self {
            pull: true,
            ..Self::default()
        }
    }

    pub fn has_write(&self) -> bool {
        self.push
    }
}

/// A team currently associated with the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub slug: TeamSlug,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Permissions,
}

impl TeamState {
    pub fn new(slug: impl Into<TeamSlug>, permissions: Permissions) -> Self {
        let slug = slug.into();
        Self {
            name: slug.0.clone(),
            slug,
            permissions,
        }
    }
}

/// A user currently associated with the repository as a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorState {
    pub login: Login,
    #[serde(default)]
    pub permissions: Permissions,
}

impl CollaboratorState {
    pub fn new(login: impl Into<Login>, permissions: Permissions) -> Self {
        Self {
            login: login.into(),
            permissions,
        }
    }
}

/// A user account returned by a directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: Login,
}

impl Account {
    pub fn new(login: impl Into<Login>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// The read-only view of a repository's associations for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub teams: Vec<TeamState>,
    pub collaborators: Vec<CollaboratorState>,
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

/// A push-permission grant the engine decided to issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum GrantRequest {
    /// Add a team of `org` to `repo` with push permission.
    Team {
        org: OrgName,
        slug: TeamSlug,
        repo: RepoRef,
    },
    /// Add `login` as a collaborator of `repo` with push permission.
    User { repo: RepoRef, login: Login },
}

impl GrantRequest {
    /// The identity the grant targets: a team slug or a user login.
    pub fn identity(&self) -> &str {
        match self {
            GrantRequest::Team { slug, .. } => &slug.0,
            GrantRequest::User { login, .. } => &login.0,
        }
    }
}

impl fmt::Display for GrantRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantRequest::Team { org, slug, repo } => {
                write!(f, "team {org}/{slug} -> {repo} (push)")
            }
            GrantRequest::User { repo, login } => write!(f, "user {login} -> {repo} (push)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
