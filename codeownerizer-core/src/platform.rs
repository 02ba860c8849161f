//! The capability surface the reconciliation engine needs from a hosting
//! platform.
//!
//! Listings are exposed one page at a time so callers decide how pages are
//! drained; a [`Page`] with `next: None` is the last one.

use crate::error::PlatformError;
use crate::types::{Account, CollaboratorState, Login, OrgName, RepoRef, TeamSlug, TeamState};

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the following page, if any.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A page with nothing after it.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Blocking platform client. Every call is one (or more) network round-trips.
pub trait PlatformApi {
    /// List teams with access to `repo`. `cursor` is `None` for the first page.
    fn list_teams_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<TeamState>, PlatformError>;

    /// List collaborators of `repo`. `cursor` is `None` for the first page.
    fn list_collaborators_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<CollaboratorState>, PlatformError>;

    /// Search user accounts whose email matches `email`.
    fn search_users_by_email(&self, email: &str) -> Result<Vec<Account>, PlatformError>;

    /// Add team `slug` of `org` to `repo` with push permission.
    fn grant_team(&self, org: &OrgName, slug: &TeamSlug, repo: &RepoRef)
        -> Result<(), PlatformError>;

    /// Add `login` to `repo` as a collaborator with push permission.
    fn grant_user(&self, repo: &RepoRef, login: &Login) -> Result<(), PlatformError>;
}

impl<P: PlatformApi + ?Sized> PlatformApi for &P {
    fn list_teams_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<TeamState>, PlatformError> {
        (**self).list_teams_page(repo, cursor)
    }

    fn list_collaborators_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<CollaboratorState>, PlatformError> {
        (**self).list_collaborators_page(repo, cursor)
    }

    fn search_users_by_email(&self, email: &str) -> Result<Vec<Account>, PlatformError> {
        (**self).search_users_by_email(email)
    }

    fn grant_team(
        &self,
        org: &OrgName,
        slug: &TeamSlug,
        repo: &RepoRef,
    ) -> Result<(), PlatformError> {
        (**self).grant_team(org, slug, repo)
    }

    fn grant_user(&self, repo: &RepoRef, login: &Login) -> Result<(), PlatformError> {
        (**self).grant_user(repo, login)
    }
}
