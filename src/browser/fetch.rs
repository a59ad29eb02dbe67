use reqwest::header::{COOKIE, USER_AGENT};

use crate::error::{FormSyncError, Result};

const AGENT: &str = concat!("form-sync/", env!("CARGO_PKG_VERSION"));

/// Fetch a report page's HTML. The legacy portal keeps its login in a
/// session cookie, passed through verbatim when given.
pub fn fetch_page(url: &str, cookie: Option<&str>) -> Result<String> {
    let client = reqwest::blocking::Client::new();
    let mut request = client.get(url).header(USER_AGENT, AGENT);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }

    let response = request.send().map_err(|e| FormSyncError::Fetch {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FormSyncError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(|e| FormSyncError::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    tracing::info!(url, bytes = body.len(), "fetched page");
    Ok(body)
}
