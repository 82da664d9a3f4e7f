use std::fmt;
use std::sync::Arc;

/// Range of HTTP status codes treated as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRange {
    /// 200 through 300, both ends included.
    Closed,

    /// 200 up to, but excluding, 300.
    HalfOpen,
}

impl SuccessRange {
    pub fn contains(self, status: u16) -> bool {
        match self {
            SuccessRange::Closed => (200..=300).contains(&status),
            SuccessRange::HalfOpen => (200..300).contains(&status),
        }
    }
}

impl fmt::Display for SuccessRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuccessRange::Closed => write!(f, "200..=300"),
            SuccessRange::HalfOpen => write!(f, "200..300"),
        }
    }
}

/// Configuration for a [`Fetcher`](crate::Fetcher).
///
/// The default keeps the historical behavior of the three entry points:
/// the awaited call accepts `200..=300` and folds decode errors into
/// [`Error::RequestFailed`](crate::Error::RequestFailed), while both stream
/// entry points accept `200..300` and surface decode errors unchanged.
/// [`FetchOptions::unified`] applies one policy to all of them.
///
/// # Examples
///
/// ```
/// use fetchkit::{FetchOptions, SuccessRange};
///
/// let options = FetchOptions::unified().header("Accept", "application/json");
/// assert_eq!(options.awaitable_range, SuccessRange::HalfOpen);
/// assert!(options.normalize_stream_errors);
/// ```
#[derive(Clone)]
pub struct FetchOptions {
    /// Status range accepted by [`Fetch::fetch`](crate::Fetch::fetch).
    ///
    /// Default: [`SuccessRange::Closed`]
    pub awaitable_range: SuccessRange,

    /// Status range accepted by both stream entry points.
    ///
    /// Default: [`SuccessRange::HalfOpen`]
    pub stream_range: SuccessRange,

    /// Replace decode errors with `RequestFailed` on the stream entry points.
    ///
    /// Default: false
    pub normalize_stream_errors: bool,

    /// Extra headers sent with every request.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("awaitable_range", &self.awaitable_range)
            .field("stream_range", &self.stream_range)
            .field("normalize_stream_errors", &self.normalize_stream_errors)
            .field("headers", &self.headers.len())
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            awaitable_range:         SuccessRange::Closed,
            stream_range:            SuccessRange::HalfOpen,
            normalize_stream_errors: false,
            headers:                 Arc::new([]),
        }
    }
}

impl FetchOptions {
    /// One status range (`200..300`) and one error identity for every entry point.
    pub fn unified() -> Self {
        Self {
            awaitable_range: SuccessRange::HalfOpen,
            stream_range: SuccessRange::HalfOpen,
            normalize_stream_errors: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn awaitable_range(mut self, range: SuccessRange) -> Self {
        self.awaitable_range = range;
        self
    }

    #[must_use]
    pub fn stream_range(mut self, range: SuccessRange) -> Self {
        self.stream_range = range;
        self
    }

    #[must_use]
    pub fn normalize_stream_errors(mut self, normalize: bool) -> Self {
        self.normalize_stream_errors = normalize;
        self
    }

    /// Add a single header.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetchkit::FetchOptions;
    ///
    /// let options = FetchOptions::default()
    ///     .header("Authorization", "Bearer token")
    ///     .header("User-Agent", "MyApp/1.0");
    /// assert_eq!(options.headers.len(), 2);
    /// ```
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = headers.into();
        self
    }

    /// Replace all headers.
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Vec<_>>()
            .into();
        self
    }
}
