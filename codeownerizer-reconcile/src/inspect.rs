//! Permission inspection against a [`Snapshot`](codeownerizer_core::Snapshot).
//!
//! Lookups are exact-match on team slug and collaborator login.

use codeownerizer_core::types::{CollaboratorState, Login, TeamSlug, TeamState};

/// What a repository currently grants an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Associated with push permission.
    Write,
    /// Associated, but without push permission.
    WithoutWrite,
    /// Not associated at all.
    Absent,
}

impl Access {
    /// An owner needs a grant iff it is absent or present without write.
    pub fn needs_grant(self) -> bool {
        !matches!(self, Access::Write)
    }
}

pub fn team_exists(teams: &[TeamState], slug: &TeamSlug) -> bool {
    teams.iter().any(|team| team.slug == *slug)
}

pub fn team_has_write(teams: &[TeamState], slug: &TeamSlug) -> bool {
    teams
        .iter()
        .any(|team| team.slug == *slug && team.permissions.has_write())
}

pub fn user_exists(collaborators: &[CollaboratorState], login: &Login) -> bool {
    collaborators.iter().any(|c| c.login == *login)
}

pub fn user_has_write(collaborators: &[CollaboratorState], login: &Login) -> bool {
    collaborators
        .iter()
        .any(|c| c.login == *login && c.permissions.has_write())
}

pub fn team_access(teams: &[TeamState], slug: &TeamSlug) -> Access {
    access(team_exists(teams, slug), team_has_write(teams, slug))
}

pub fn user_access(collaborators: &[CollaboratorState], login: &Login) -> Access {
    access(
        user_exists(collaborators, login),
        user_has_write(collaborators, login),
    )
}

fn access(exists: bool, has_write: bool) -> Access {
    match (exists, has_write) {
        (true, true) => Access::Write,
        (true, false) => Access::WithoutWrite,
        (false, _) => Access::Absent,
    }
}
