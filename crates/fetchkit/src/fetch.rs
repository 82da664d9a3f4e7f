//! The fetch-and-decode interface and its transport-backed implementation.

mod fetcher;

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::stream::Deferred;

pub use fetcher::Fetcher;

/// Fetch a URL and decode its JSON body into `T`.
///
/// The three entry points share one contract and differ only in how the
/// caller waits: [`fetch`](Fetch::fetch) is awaited, the other two return a
/// lazy [`Deferred`] that performs one request per subscription.
pub trait Fetch: Send + Sync {
    /// Await the request and decode the body.
    ///
    /// Any failure, including a body that does not decode, is reported as
    /// [`Error::RequestFailed`](crate::Error::RequestFailed).
    fn fetch<T>(&self, url: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send + 'static;

    /// Lazy single-value stream driven by [`HttpClient::get`](crate::HttpClient::get).
    fn fetch_stream<T>(&self, url: &str) -> Deferred<T, crate::Error>
    where
        T: DeserializeOwned + Send + 'static;

    /// Lazy single-value stream bridged from [`HttpClient::get_with_callback`](crate::HttpClient::get_with_callback).
    fn fetch_with_callback<T>(&self, url: &str) -> Deferred<T, crate::Error>
    where
        T: DeserializeOwned + Send + 'static;

    /// Decode a JSON body, keeping the decoder's error.
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> { crate::core::decode(body) }
}
