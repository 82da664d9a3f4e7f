use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::data::Response;
use crate::net::handle::RequestHandle;

/// Asynchronous HTTP transport.
///
/// Implementations handle their own redirect following, timeouts and
/// connection reuse. A transport reports any completed exchange as a
/// [`Response`], whatever its status; range checks happen in the caller.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - Fakes in tests
pub trait HttpClient: Send + Sync + 'static {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform a GET request and read the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained (DNS failure,
    /// connection error, body read error, ...).
    fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// Perform a GET request and report its outcome to `callback`.
    ///
    /// The callback runs at most once. Dropping or cancelling the returned
    /// handle aborts the request, after which the callback never runs.
    ///
    /// The default implementation drives [`HttpClient::get`] on the current
    /// tokio runtime. Outside a runtime nothing is started and `callback` is
    /// dropped without running.
    fn get_with_callback<F>(
        self: Arc<Self>,
        url: Url,
        headers: Arc<[(String, String)]>,
        callback: F,
    ) -> RequestHandle
    where
        Self: Sized,
        F: FnOnce(Result<Response, Self::Error>) + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%url, "no tokio runtime, callback request not started");
            return RequestHandle::noop();
        };

        let task = runtime.spawn(async move {
            let result = self.get(&url, &headers).await;
            debug!(%url, ok = result.is_ok(), "callback request finished");
            callback(result);
        });
        RequestHandle::new(task.abort_handle())
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().build()?;
            Ok(Self { client })
        }

        /// Wrap an already configured client.
        pub fn with_client(client: reqwest::Client) -> Self { Self { client } }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &Url,
            headers: &[(String, String)],
        ) -> Result<Response, Self::Error> {
            let mut request = self.client.get(url.clone());

            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            debug!(%url, status, bytes = body.len(), "HTTP GET complete");

            Ok(Response { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
