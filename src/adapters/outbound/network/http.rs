use crate::shared::error::SyncError;
use crate::shared::security::validate_body_size;
use crate::shared::Result;
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use std::time::Duration;

/// Timeout applied to every vendor and CMDB request
pub(super) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the blocking client shared by the network adapters
pub(super) fn build_client() -> Result<Client> {
    let user_agent = format!("cert-cmdb-sync/{}", env!("CARGO_PKG_VERSION"));
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Appends `path` to `base`, keeping any path prefix the base already has
pub(super) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| {
        SyncError::Validation {
            message: format!("Invalid endpoint URL {}: {}", joined, e),
        }
        .into()
    })
}

/// Maps a reqwest failure to a transport error naming the endpoint
pub(super) fn transport_error(endpoint: &Url, error: reqwest::Error) -> SyncError {
    SyncError::Transport {
        endpoint: endpoint.to_string(),
        details: error.to_string(),
    }
}

/// Reads a response body, rejecting bodies larger than `max_size`
pub(super) fn read_body(
    response: Response,
    endpoint: &Url,
    what: &str,
    max_size: usize,
) -> Result<Vec<u8>> {
    if let Some(declared) = response.content_length() {
        validate_body_size(declared as usize, what, max_size)?;
    }
    let bytes = response
        .bytes()
        .map_err(|e| transport_error(endpoint, e))?;
    validate_body_size(bytes.len(), what, max_size)?;
    Ok(bytes.to_vec())
}

/// Fails with a transport error unless the response status is a success
pub(super) fn ensure_success(response: Response, endpoint: &Url) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Transport {
            endpoint: endpoint.to_string(),
            details: format!("HTTP status {}", status),
        }
        .into());
    }
    Ok(response)
}
