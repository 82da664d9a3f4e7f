use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::Fetch;
use crate::core::{accept, decode, parse_target};
use crate::data::{FetchOptions, SuccessRange};
use crate::error::{Error, Result};
use crate::net::{HttpClient, RequestHandle};
use crate::stream::{Completion, Deferred};

/// [`Fetch`] implementation over an [`HttpClient`].
///
/// Cloning is cheap; clones share the transport.
pub struct Fetcher<C: HttpClient> {
    client:  Arc<C>,
    options: FetchOptions,
}

impl<C: HttpClient> Clone for Fetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client:  Arc::clone(&self.client),
            options: self.options.clone(),
        }
    }
}

impl<C: HttpClient> std::fmt::Debug for Fetcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").field("options", &self.options).finish_non_exhaustive()
    }
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a fetcher with default options.
    pub fn new(client: C) -> Self { Self::from_shared(Arc::new(client)) }

    /// Create a fetcher over a transport that is already shared.
    pub fn from_shared(client: Arc<C>) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub fn client(&self) -> &Arc<C> { &self.client }
}

#[cfg(feature = "reqwest")]
impl Fetcher<crate::net::ReqwestClient> {
    /// Fetcher over a default reqwest client.
    pub fn reqwest() -> std::result::Result<Self, reqwest::Error> {
        Ok(Self::new(crate::net::ReqwestClient::new()?))
    }
}

fn transport_failed<E: std::error::Error>(url: &Url, error: E) -> Error {
    warn!(%url, error = %error, "transport failed");
    Error::RequestFailed
}

fn settle<T: DeserializeOwned>(body: &[u8], url: &Url, normalize: bool) -> Result<T> {
    decode(body).map_err(|e| {
        if normalize {
            debug!(%url, error = %e, "decode failed, reporting request failure");
            Error::RequestFailed
        } else {
            e
        }
    })
}

async fn exchange<C: HttpClient>(
    client: &C,
    url: &Url,
    headers: &[(String, String)],
    range: SuccessRange,
) -> Result<Bytes> {
    let response = client
        .get(url, headers)
        .await
        .map_err(|e| transport_failed(url, e))?;
    accept(range, response)
}

impl<C: HttpClient> Fetch for Fetcher<C> {
    async fn fetch<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let target = parse_target(url)?;
        debug!(url = %target, "fetch");
        let body = exchange(
            &*self.client,
            &target,
            &self.options.headers,
            self.options.awaitable_range,
        )
        .await?;
        settle(&body, &target, true)
    }

    fn fetch_stream<T>(&self, url: &str) -> Deferred<T, Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let options = self.options.clone();
        let url = url.to_owned();

        Deferred::new(move || {
            let client = Arc::clone(&client);
            let options = options.clone();
            let url = url.clone();
            async move {
                let target = parse_target(&url)?;
                debug!(url = %target, "stream subscription");
                let body =
                    exchange(&*client, &target, &options.headers, options.stream_range).await?;
                settle(&body, &target, options.normalize_stream_errors)
            }
        })
    }

    fn fetch_with_callback<T>(&self, url: &str) -> Deferred<T, Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let options = self.options.clone();
        let url = url.to_owned();

        Deferred::from_callback(move |completion: Completion<T, Error>| {
            let target = match parse_target(&url) {
                Ok(target) => target,
                Err(e) => {
                    completion.fail(e);
                    return RequestHandle::noop();
                }
            };
            debug!(url = %target, "callback subscription");

            let range = options.stream_range;
            let normalize = options.normalize_stream_errors;
            Arc::clone(&client).get_with_callback(
                target.clone(),
                Arc::clone(&options.headers),
                move |result| {
                    let outcome = result
                        .map_err(|e| transport_failed(&target, e))
                        .and_then(|response| accept(range, response))
                        .and_then(|body| settle(&body, &target, normalize));
                    completion.complete(outcome);
                },
            )
        })
    }
}
