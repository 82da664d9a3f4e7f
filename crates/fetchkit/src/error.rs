//! Error types for fetchkit.

use thiserror::Error;

use crate::stream::Abandoned;

#[derive(Debug, Error)]
pub enum Error {
    /// The URL was invalid, the transport failed, or the status was outside
    /// the accepted range. [`Fetch::fetch`](crate::Fetch::fetch) also folds
    /// decode failures into this variant.
    #[error("request failed")]
    RequestFailed,

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_request_failed(&self) -> bool { matches!(self, Error::RequestFailed) }

    pub fn is_decode(&self) -> bool { matches!(self, Error::Decode(_)) }
}

impl From<Abandoned> for Error {
    fn from(_: Abandoned) -> Self { Error::RequestFailed }
}

pub type Result<T> = std::result::Result<T, Error>;
