//! URL composition and request construction.
//!
//! The collection URL keeps the root's scheme, host and port and appends
//! the `accounts` segment to its path; any query or fragment on the root is
//! dropped. Account ids are pushed as a single percent-encoded segment, so
//! an id can never climb out of the collection path.

use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::ACCOUNTS_RESOURCE;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `{root}/accounts`.
pub fn collection_url(config: &ClientConfig) -> Result<Url, ApiError> {
    let root = config.root_url();
    if root.cannot_be_a_base() {
        return Err(ApiError::Configuration(format!("root url {root} cannot carry a path")));
    }
    let mut url = root.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Empty segments collapse, so `/v1//` and `/v1` both give `/v1/accounts`.
    let mut path: String = root
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .flat_map(|segment| ["/", segment])
        .collect();
    path.push('/');
    path.push_str(ACCOUNTS_RESOURCE);
    url.set_path(&path);
    Ok(url)
}

/// `{root}/accounts/{id}`.
pub fn account_url(config: &ClientConfig, id: &str) -> Result<Url, ApiError> {
    if id.is_empty() {
        return Err(ApiError::RequestBuild("account id must not be empty".to_string()));
    }
    let mut url = collection_url(config)?;
    let shown = url.to_string();
    url.path_segments_mut()
        .map_err(|_| ApiError::RequestBuild(format!("cannot append id to {shown}")))?
        .push(id);
    Ok(url)
}

/// Builds a JSON request. Both `Content-Type` and `Accept` are set on every
/// request, including bodiless ones.
pub fn build_request(
    method: HttpMethod,
    url: Url,
    body: Option<String>,
) -> Result<HttpRequest, ApiError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::RequestBuild(format!(
            "unsupported scheme {:?} for {method} request",
            url.scheme()
        )));
    }
    if method != HttpMethod::Post && body.is_some() {
        return Err(ApiError::RequestBuild(format!("{method} request cannot carry a body")));
    }
    Ok(HttpRequest {
        method,
        url,
        headers: vec![
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        ],
        body,
    })
}
