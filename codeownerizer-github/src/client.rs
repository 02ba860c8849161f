//! Blocking GitHub REST client.
//!
//! One `ureq` agent per client; the agent's timeout is the only deadline any
//! call carries. Non-2xx responses become [`PlatformError::Status`] with the
//! `message` GitHub puts in its error bodies.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use codeownerizer_core::{
    settings::Settings,
    types::{Account, CollaboratorState, Login, OrgName, RepoRef, TeamSlug, TeamState},
    Page, PlatformApi, PlatformError,
};

use crate::pagination::next_link;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const PUSH_PERMISSION: &str = "push";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Connection options for [`GitHubClient`].
#[derive(Clone)]
pub struct ClientOptions {
    /// REST API root without a trailing slash.
    pub api_url: String,
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub per_page: u32,
}

impl ClientOptions {
    pub fn from_settings(settings: &Settings, token: Option<String>) -> Self {
        Self {
            api_url: settings.api_root().to_string(),
            token,
            user_agent: settings.user_agent.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            per_page: settings.effective_per_page(),
        }
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("per_page", &self.per_page)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchUsersResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<Account>,
}

#[derive(Debug, Serialize)]
struct PermissionBody<'a> {
    permission: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GitHubClient {
    agent: ureq::Agent,
    api_root: String,
    token: Option<String>,
    per_page: u32,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_root", &self.api_root)
            .field("authenticated", &self.token.is_some())
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl GitHubClient {
    pub fn new(options: ClientOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(options.timeout)
            .user_agent(&options.user_agent)
            .build();
        Self {
            agent,
            api_root: options.api_url.trim_end_matches('/').to_string(),
            token: options.token,
            per_page: options.per_page,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    fn prepare(&self, request: ureq::Request) -> ureq::Request {
        let request = request
            .set("Accept", ACCEPT)
            .set("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    /// Fetch one page of a listing. The cursor is the absolute `rel="next"`
    /// URL from the previous page.
    fn get_page<T: DeserializeOwned>(
        &self,
        first_url: String,
        cursor: Option<&str>,
    ) -> Result<Page<T>, PlatformError> {
        let (url, request) = match cursor {
            Some(next) => (next.to_string(), self.agent.get(next)),
            None => {
                let request = self
                    .agent
                    .get(&first_url)
                    .query("per_page", &self.per_page.to_string());
                (first_url, request)
            }
        };
        tracing::debug!(url = %url, "GET page");

        let response = self
            .prepare(request)
            .call()
            .map_err(|e| map_error(&url, e))?;
        let next = response.header("link").and_then(next_link);
        let items = response
            .into_json::<Vec<T>>()
            .map_err(|e| decode_err(&url, e))?;
        Ok(Page { items, next })
    }

    fn put_push(&self, url: String) -> Result<(), PlatformError> {
        tracing::debug!(url = %url, "PUT push permission");
        self.prepare(self.agent.put(&url))
            .send_json(PermissionBody {
                permission: PUSH_PERMISSION,
            })
            .map_err(|e| map_error(&url, e))?;
        Ok(())
    }
}

impl PlatformApi for GitHubClient {
    fn list_teams_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<TeamState>, PlatformError> {
        let url = self.url(&format!("/repos/{}/{}/teams", repo.org, repo.repo));
        self.get_page(url, cursor)
    }

    fn list_collaborators_page(
        &self,
        repo: &RepoRef,
        cursor: Option<&str>,
    ) -> Result<Page<CollaboratorState>, PlatformError> {
        let url = self.url(&format!(
            "/repos/{}/{}/collaborators",
            repo.org, repo.repo
        ));
        self.get_page(url, cursor)
    }

    fn search_users_by_email(&self, email: &str) -> Result<Vec<Account>, PlatformError> {
        let url = self.url("/search/users");
        let query = format!("{email} in:email");
        tracing::debug!(url = %url, q = %query, "GET search");

        let response = self
            .prepare(self.agent.get(&url).query("q", &query))
            .call()
            .map_err(|e| map_error(&url, e))?;
        let result = response
            .into_json::<SearchUsersResponse>()
            .map_err(|e| decode_err(&url, e))?;
        if result.total_count > result.items.len() as u64 {
            tracing::debug!(
                email,
                total = result.total_count,
                returned = result.items.len(),
                "search results truncated"
            );
        }
        Ok(result.items)
    }

    fn grant_team(
        &self,
        org: &OrgName,
        slug: &TeamSlug,
        repo: &RepoRef,
    ) -> Result<(), PlatformError> {
        self.put_push(self.url(&format!(
            "/orgs/{org}/teams/{slug}/repos/{}/{}",
            repo.org, repo.repo
        )))
    }

    fn grant_user(&self, repo: &RepoRef, login: &Login) -> Result<(), PlatformError> {
        self.put_push(self.url(&format!(
            "/repos/{}/{}/collaborators/{login}",
            repo.org, repo.repo
        )))
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn map_error(url: &str, err: ureq::Error) -> PlatformError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            PlatformError::Status {
                status,
                url: url.to_string(),
                message: error_message(&body),
            }
        }
        ureq::Error::Transport(transport) => PlatformError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

fn decode_err(url: &str, err: std::io::Error) -> PlatformError {
    PlatformError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// GitHub's `{"message": "..."}` when present, else the raw body.
fn error_message(body: &str) -> String {
    let body = body.trim();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.message.is_empty() {
            return parsed.message;
        }
    }
    if body.is_empty() {
        "no response body".to_string()
    } else {
        body.to_string()
    }
}
