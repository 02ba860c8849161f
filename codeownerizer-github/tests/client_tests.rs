//! GitHub client tests against a loopback HTTP stub.

use std::net::TcpListener;
use std::time::Duration;

use codeownerizer_core::{
    types::{Login, OrgName, RepoRef, TeamSlug},
    PlatformApi, PlatformError,
};
use codeownerizer_github::{ClientOptions, GitHubClient};
use codeownerizer_testkit::{StubResponse, StubServer};
use rstest::rstest;

fn client_for(base_url: &str, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(ClientOptions {
        api_url: base_url.to_string(),
        token: token.map(str::to_string),
        user_agent: "codeownerizer-tests".to_string(),
        timeout: Duration::from_secs(5),
        per_page: 2,
    })
}

fn repo() -> RepoRef {
    RepoRef::new("org", "repo")
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[test]
fn team_listing_follows_link_header() {
    let server = StubServer::start(|req, base| match req.target.as_str() {
        "/repos/org/repo/teams?per_page=2" => StubResponse::json(
            200,
            r#"[{"slug":"a","name":"A","permissions":{"push":true}},{"slug":"b","name":"B","permissions":{"pull":true}}]"#,
        )
        .with_header(
            "Link",
            format!(r#"<{base}/repos/org/repo/teams?per_page=2&page=2>; rel="next""#),
        ),
        "/repos/org/repo/teams?per_page=2&page=2" => {
            StubResponse::json(200, r#"[{"slug":"c","name":"C","permissions":{"push":true}}]"#)
        }
        _ => StubResponse::json(404, r#"{"message":"Not Found"}"#),
    });
    let client = client_for(&server.base_url, Some("t0ken"));

    let first = client.list_teams_page(&repo(), None).expect("first page");
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].slug, TeamSlug::from("a"));
    let next = first.next.expect("next cursor");

    let second = client
        .list_teams_page(&repo(), Some(&next))
        .expect("second page");
    assert_eq!(second.items.len(), 1);
    assert!(second.next.is_none());

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("authorization"), Some("Bearer t0ken"));
    assert_eq!(
        requests[0].header("accept"),
        Some("application/vnd.github+json")
    );
    assert_eq!(requests[0].header("user-agent"), Some("codeownerizer-tests"));
}

#[test]
fn collaborator_listing_decodes_logins() {
    let server = StubServer::start(|req, _| match req.path() {
        "/repos/org/repo/collaborators" => StubResponse::json(
            200,
            r#"[{"login":"octocat","permissions":{"pull":true,"push":true}},{"login":"doctocat","permissions":{"pull":true,"push":false}}]"#,
        ),
        _ => StubResponse::empty(404),
    });
    let client = client_for(&server.base_url, None);

    let page = client
        .list_collaborators_page(&repo(), None)
        .expect("collaborators");
    assert_eq!(page.items[0].login, Login::from("octocat"));
    assert!(page.items[0].permissions.has_write());
    assert!(!page.items[1].permissions.has_write());
    assert!(page.next.is_none());
    assert!(server.requests()[0].header("authorization").is_none());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn email_search_sends_in_email_qualifier() {
    let server = StubServer::start(|req, _| match req.path() {
        "/search/users" => StubResponse::json(
            200,
            r#"{"total_count":1,"incomplete_results":false,"items":[{"login":"email-owner"}]}"#,
        ),
        _ => StubResponse::empty(404),
    });
    let client = client_for(&server.base_url, None);

    let accounts = client
        .search_users_by_email("docs@example.com")
        .expect("search");
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].login, Login::from("email-owner"));

    let target = &server.requests()[0].target;
    assert!(target.contains("docs%40example.com"), "target: {target}");
    assert!(target.contains("in%3Aemail"), "target: {target}");
}

#[test]
fn empty_search_returns_no_accounts() {
    let server = StubServer::start(|_, _| {
        StubResponse::json(200, r#"{"total_count":0,"incomplete_results":false,"items":[]}"#)
    });
    let client = client_for(&server.base_url, None);
    assert!(client
        .search_users_by_email("nobody@example.com")
        .expect("search")
        .is_empty());
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

#[test]
fn team_grant_puts_push_permission() {
    let server = StubServer::start(|_, _| StubResponse::empty(204));
    let client = client_for(&server.base_url, Some("t0ken"));

    client
        .grant_team(&OrgName::from("org"), &TeamSlug::from("octocats"), &repo())
        .expect("grant");

    let puts = server.requests_matching("PUT", "/orgs/org/teams/octocats/repos/org/repo");
    assert_eq!(puts.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&puts[0].body).expect("json body");
    assert_eq!(body["permission"], "push");
}

#[test]
fn user_grant_accepts_created_invitation() {
    let server = StubServer::start(|_, _| StubResponse::json(201, r#"{"id":1}"#));
    let client = client_for(&server.base_url, Some("t0ken"));

    client
        .grant_user(&repo(), &Login::from("octocat"))
        .expect("grant");
    assert_eq!(
        server
            .requests_matching("PUT", "/repos/org/repo/collaborators/octocat")
            .len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[rstest]
#[case(403, r#"{"message":"Must have admin rights to Repository."}"#, "Must have admin rights to Repository.")]
#[case(404, r#"{"message":"Not Found"}"#, "Not Found")]
#[case(422, "", "no response body")]
fn non_success_status_maps_to_status_error(
    #[case] status: u16,
    #[case] body: &'static str,
    #[case] message: &str,
) {
    let server = StubServer::start(move |_, _| StubResponse::json(status, body));
    let client = client_for(&server.base_url, Some("t0ken"));

    let err = client
        .grant_user(&repo(), &Login::from("ghost"))
        .unwrap_err();
    match &err {
        PlatformError::Status {
            status: got,
            message: got_message,
            url,
        } => {
            assert_eq!(*got, status);
            assert_eq!(got_message, message);
            assert!(url.ends_with("/repos/org/repo/collaborators/ghost"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(err.status(), Some(status));
}

#[test]
fn undecodable_listing_is_decode_error() {
    let server = StubServer::start(|_, _| StubResponse::json(200, "<html>oops</html>"));
    let client = client_for(&server.base_url, None);
    let err = client.list_teams_page(&repo(), None).unwrap_err();
    assert!(matches!(err, PlatformError::Decode { .. }), "got {err:?}");
}

#[test]
fn refused_connection_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = client_for(&format!("http://127.0.0.1:{port}"), None);
    let err = client.list_collaborators_page(&repo(), None).unwrap_err();
    assert!(matches!(err, PlatformError::Transport { .. }), "got {err:?}");
    assert_eq!(err.status(), None);
}
