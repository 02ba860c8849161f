//! `Link` header parsing for GitHub's cursor pagination.

/// The `rel="next"` target of a `Link` header, if present.
///
/// `<https://api.github.com/repositories/1/teams?page=2>; rel="next", <…>; rel="last"`
pub fn next_link(header: &str) -> Option<String> {
    // Links are delimited by their `<…>` targets; URLs may contain commas.
    let mut rest = header;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let close = after.find('>')?;
        let url = &after[..close];
        let tail = &after[close + 1..];
        let params = &tail[..tail.find('<').unwrap_or(tail.len())];
        if params.split(';').any(is_rel_next) {
            return Some(url.to_string());
        }
        rest = tail;
    }
    None
}

fn is_rel_next(param: &str) -> bool {
    let param = param.trim().trim_end_matches(',').trim_end();
    param
        .strip_prefix("rel=")
        .map(|value| value.trim_matches('"'))
        .is_some_and(|value| value.split_whitespace().any(|rel| rel == "next"))
}
