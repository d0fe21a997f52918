//! URL helpers

use crate::error::Result;
use url::Url;

/// Join a base URL and a path with exactly one `/` between them
///
/// Trailing slashes on the base path and leading slashes on `path` are
/// collapsed; a trailing slash on `path` is kept. A query on the base is
/// kept, followed by any query carried by `path`.
pub fn build_url(base_url: &str, path: &str) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    let (path, path_query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);

    if let Some(extra) = path_query.filter(|q| !q.is_empty()) {
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{extra}"),
            _ => extra.to_string(),
        };
        url.set_query(Some(&query));
    }

    Ok(url.to_string())
}

/// Like `build_url`, replacing the query string with `args`
pub fn build_url_with_args(base_url: &str, path: &str, args: &[(&str, &str)]) -> Result<String> {
    let mut url = Url::parse(&build_url(base_url, path)?)?;
    if args.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(args);
    }
    Ok(url.to_string())
}

/// URL of the paginated resource
pub fn build_resource_url(base_url: &str, resource_path: &str) -> Result<String> {
    build_url(base_url, resource_path)
}

/// URL of the login endpoint
pub fn build_login_url(base_url: &str, login_path: &str) -> Result<String> {
    build_url(base_url, login_path)
}

/// Split a page cursor into the bare URL and its query parameters
///
/// Relative cursors are resolved against `current`. The fragment is dropped
/// and parameters with blank values are skipped.
pub fn split_cursor(cursor: &str, current: &str) -> Result<(String, Vec<(String, String)>)> {
    let mut url = Url::parse(current)?.join(cursor)?;

    let pairs = url
        .query_pairs()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    url.set_fragment(None);

    Ok((url.to_string(), pairs))
}
