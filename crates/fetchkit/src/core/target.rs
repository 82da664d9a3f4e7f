use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

/// Validate a request target.
///
/// Only absolute `http` and `https` URLs are accepted. Validation happens at
/// call time so an invalid string never reaches the transport.
pub fn parse_target(url: &str) -> Result<Url> {
    let target = Url::parse(url).map_err(|e| {
        warn!(url, error = %e, "rejecting invalid URL");
        Error::RequestFailed
    })?;

    match target.scheme() {
        "http" | "https" => Ok(target),
        scheme => {
            warn!(url, scheme, "rejecting non-HTTP URL");
            Err(Error::RequestFailed)
        }
    }
}
