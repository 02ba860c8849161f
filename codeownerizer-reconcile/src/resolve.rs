//! Owner resolution: declared form → concrete team slug or user login.
//!
//! Team and user owners resolve offline from their declared string. Email
//! owners need a directory search and resolve only when exactly one account
//! matches.

use codeownerizer_core::{
    types::{Account, Login, OwnerKind, OwnerRecord, TeamSlug},
    PlatformApi,
};

use crate::error::OwnerFailure;

/// The identity an owner resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Team slug; always granted within the repository's organization.
    Team(TeamSlug),
    User(Login),
}

impl Identity {
    pub fn as_str(&self) -> &str {
        match self {
            Identity::Team(slug) => &slug.0,
            Identity::User(login) => &login.0,
        }
    }
}

/// Resolve one owner. Only email owners touch the network.
pub fn resolve<P: PlatformApi>(api: &P, owner: &OwnerRecord) -> Result<Identity, OwnerFailure> {
    match owner.kind {
        OwnerKind::Team => team_slug(&owner.raw).map(Identity::Team),
        OwnerKind::User => user_login(&owner.raw).map(Identity::User),
        OwnerKind::Email => {
            let accounts = api
                .search_users_by_email(&owner.raw)
                .map_err(OwnerFailure::Search)?;
            login_from_search(&owner.raw, accounts).map(Identity::User)
        }
        OwnerKind::Unknown => Err(OwnerFailure::UnknownKind),
    }
}

/// The team slug of `[@]org/slug`: everything after the `/`.
///
/// The declared organization is not consulted; the slug is looked up and
/// granted within the repository's organization.
pub fn team_slug(raw: &str) -> Result<TeamSlug, OwnerFailure> {
    let handle = raw.strip_prefix('@').unwrap_or(raw);
    let malformed = |reason| OwnerFailure::Malformed {
        kind: OwnerKind::Team,
        reason,
    };
    let (_, slug) = handle
        .split_once('/')
        .ok_or_else(|| malformed("expected <org>/<team-slug>"))?;
    if slug.is_empty() || slug.contains('/') {
        return Err(malformed("team slug is empty or contains '/'"));
    }
    Ok(TeamSlug::from(slug))
}

/// Strip the leading `@` from a user declaration.
pub fn user_login(raw: &str) -> Result<Login, OwnerFailure> {
    let login = raw.strip_prefix('@').unwrap_or(raw);
    if login.is_empty() {
        return Err(OwnerFailure::Malformed {
            kind: OwnerKind::User,
            reason: "username is empty",
        });
    }
    Ok(Login::from(login))
}

/// Apply the email policy to a search result: exactly one match resolves.
pub fn login_from_search(email: &str, accounts: Vec<Account>) -> Result<Login, OwnerFailure> {
    let mut accounts = accounts.into_iter();
    match (accounts.next(), accounts.next()) {
        (None, _) => Err(OwnerFailure::EmailNotFound {
            email: email.to_string(),
        }),
        (Some(only), None) => Ok(only.login),
        (Some(first), Some(second)) => {
            let candidates = [first, second]
                .into_iter()
                .chain(accounts)
                .map(|a| a.login)
                .collect();
            Err(OwnerFailure::EmailAmbiguous {
                email: email.to_string(),
                candidates,
            })
        }
    }
}
