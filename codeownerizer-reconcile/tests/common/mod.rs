//! In-memory platform for engine tests.
//!
//! Grants mutate the fake's remote state, so a second run sees the result of
//! the first. Every call is recorded in order.

use std::cell::RefCell;
use std::collections::HashMap;

use codeownerizer_core::{
    types::{
        Account, CollaboratorState, Login, OrgName, Permissions, RepoRef, TeamSlug, TeamState,
    },
    Page, PlatformApi, PlatformError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListTeams(Option<String>),
    ListCollaborators(Option<String>),
    Search(String),
    GrantTeam(String),
    GrantUser(String),
}

#[derive(Default)]
pub struct FakePlatform {
    teams: RefCell<Vec<TeamState>>,
    collaborators: RefCell<Vec<CollaboratorState>>,
    directory: HashMap<String, Vec<Account>>,
    page_size: Option<usize>,
    fail_teams: Option<PlatformError>,
    fail_collaborators: Option<PlatformError>,
    fail_grants_for: HashMap<String, PlatformError>,
    fail_search: Option<PlatformError>,
    calls: RefCell<Vec<Call>>,
}

#[allow(dead_code)]
impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(self, slug: &str, push: bool) -> Self {
        self.teams.borrow_mut().push(TeamState::new(slug, perms(push)));
        self
    }

    pub fn with_collaborator(self, login: &str, push: bool) -> Self {
        self.collaborators
            .borrow_mut()
            .push(CollaboratorState::new(login, perms(push)));
        self
    }

    pub fn with_email(mut self, email: &str, logins: &[&str]) -> Self {
        self.directory.insert(
            email.to_string(),
            logins.iter().map(|l| Account::new(*l)).collect(),
        );
        self
    }

    /// Serve listings in pages of `size` items, cursor = next offset.
    pub fn paged(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn failing_teams(mut self, err: PlatformError) -> Self {
        self.fail_teams = Some(err);
        self
    }

    pub fn failing_collaborators(mut self, err: PlatformError) -> Self {
        self.fail_collaborators = Some(err);
        self
    }

    pub fn failing_grant(mut self, identity: &str, err: PlatformError) -> Self {
        self.fail_grants_for.insert(identity.to_string(), err);
        self
    }

    pub fn failing_search(mut self, err: PlatformError) -> Self {
        self.fail_search = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn grant_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::GrantTeam(_) | Call::GrantUser(_)))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn page_of<T: Clone>(&self, all: &[T], cursor: Option<&str>) -> Page<T> {
        let Some(size) = self.page_size else {
            return Page::last(all.to_vec());
        };
        let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let end = (start + size).min(all.len());
        Page {
            items: all[start..end].to_vec(),
            next: (end < all.len()).then(|| end.to_string()),
        }
    }
}

pub fn perms(push: bool) -> Permissions {
    if push {
        Permissions::write()
    } else {
        Permissions::read()
    }
}

#[allow(dead_code)]
pub fn status_error(status: u16) -> PlatformError {
    PlatformError::Status {
        status,
        url: "https://api.github.com/test".to_string(),
        message: "stubbed failure".to_string(),
    }
}

impl PlatformApi for FakePlatform {
    fn list_teams_page(
        &self,
        _repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<TeamState>, PlatformError> {
        self.calls
            .borrow_mut()
            .push(Call::ListTeams(cursor.map(str::to_string)));
        if let Some(err) = &self.fail_teams {
            return Err(err.clone());
        }
        Ok(self.page_of(&self.teams.borrow(), cursor))
    }

    fn list_collaborators_page(
        &self,
        _repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<CollaboratorState>, PlatformError> {
        self.calls
            .borrow_mut()
            .push(Call::ListCollaborators(cursor.map(str::to_string)));
        if let Some(err) = &self.fail_collaborators {
            return Err(err.clone());
        }
        Ok(self.page_of(&self.collaborators.borrow(), cursor))
    }

    fn search_users_by_email(&self, email: &str) -> Result<Vec<Account>, PlatformError> {
        self.calls.borrow_mut().push(Call::Search(email.to_string()));
        if let Some(err) = &self.fail_search {
            return Err(err.clone());
        }
        Ok(self.directory.get(email).cloned().unwrap_or_default())
    }

    fn grant_team(
        &self,
        _org: &OrgName,
        slug: &TeamSlug,
        _repo: &RepoRef,
    ) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(Call::GrantTeam(slug.0.clone()));
        if let Some(err) = self.fail_grants_for.get(&slug.0) {
            return Err(err.clone());
        }
        let mut teams = self.teams.borrow_mut();
        match teams.iter_mut().find(|t| t.slug == *slug) {
            Some(team) => team.permissions = Permissions::write(),
            None => teams.push(TeamState::new(slug.clone(), Permissions::write())),
        }
        Ok(())
    }

    fn grant_user(&self, _repo: &RepoRef, login: &Login) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(Call::GrantUser(login.0.clone()));
        if let Some(err) = self.fail_grants_for.get(&login.0) {
            return Err(err.clone());
        }
        let mut collaborators = self.collaborators.borrow_mut();
        match collaborators.iter_mut().find(|c| c.login == *login) {
            Some(c) => c.permissions = Permissions::write(),
            None => collaborators.push(CollaboratorState::new(login.clone(), Permissions::write())),
        }
        Ok(())
    }
}
