//! Snapshot fetch: every page of teams and collaborators, once per run.

use std::collections::HashSet;

use codeownerizer_core::{
    types::{RepoRef, Snapshot},
    Page, PlatformApi, PlatformError,
};

use crate::error::{Listing, ReconcileError};

/// Fetch the complete team and collaborator lists of `repo`.
///
/// Any page failure is fatal for the run.
pub fn fetch_snapshot<P: PlatformApi>(api: &P, repo: &RepoRef) -> Result<Snapshot, ReconcileError> {
    let teams = drain_pages(Listing::Teams, |cursor| api.list_teams_page(repo, cursor)).map_err(
        |source| ReconcileError::Snapshot {
            what: Listing::Teams,
            repo: repo.clone(),
            source,
        },
    )?;

    let collaborators = drain_pages(Listing::Collaborators, |cursor| {
        api.list_collaborators_page(repo, cursor)
    })
    .map_err(|source| ReconcileError::Snapshot {
        what: Listing::Collaborators,
        repo: repo.clone(),
        source,
    })?;

    tracing::debug!(
        repo = %repo,
        teams = teams.len(),
        collaborators = collaborators.len(),
        "snapshot fetched"
    );
    Ok(Snapshot {
        teams,
        collaborators,
    })
}

/// Follow `next` cursors until a page reports none. A cursor seen twice is an
/// error rather than an endless loop.
pub fn drain_pages<T, F>(what: Listing, mut fetch: F) -> Result<Vec<T>, PlatformError>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, PlatformError>,
{
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(cursor.as_deref())?;
        pages += 1;
        items.extend(page.items);
        match page.next {
            None => {
                tracing::trace!(listing = %what, pages, items = items.len(), "listing drained");
                return Ok(items);
            }
            Some(next) => {
                if !seen.insert(next.clone()) {
                    return Err(PlatformError::PaginationLoop {
                        what: what.as_str(),
                        cursor: next,
                    });
                }
                cursor = Some(next);
            }
        }
    }
}
