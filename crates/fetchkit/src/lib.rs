//! Fetch a URL and decode the JSON body into a typed value.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and response types
//! - [`core`](crate::core) - Pure checks: URL validation, status range, decoding
//! - [`net`], [`stream`], [`fetch`] - I/O behind trait abstractions
//!
//! # Entry points
//!
//! [`Fetch`] exposes one request-and-decode contract in three shapes:
//!
//! - [`Fetch::fetch`]: awaited once, every failure is [`Error::RequestFailed`]
//! - [`Fetch::fetch_stream`]: a lazy [`Deferred`] driven by the awaited transport call
//! - [`Fetch::fetch_with_callback`]: a lazy [`Deferred`] bridged from the
//!   callback-style transport call
//!
//! By default the awaited call accepts statuses `200..=300` while the stream
//! shapes accept `200..300` and report decode failures as [`Error::Decode`].
//! [`FetchOptions::unified`] applies the stream range and the awaited call's
//! error identity everywhere.
//!
//! # Example
//!
//! ```no_run
//! use fetchkit::{Fetch, Fetcher};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Todo {
//!     id:    u32,
//!     title: String,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::reqwest()?;
//! let todo: Todo = fetcher.fetch("https://example.com/todos/1").await?;
//! println!("{} {}", todo.id, todo.title);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
mod error;
pub mod fetch;
pub mod net;
pub mod stream;

pub use self::core::decode;
pub use data::{FetchOptions, Response, SuccessRange};
pub use error::{Error, Result};
pub use fetch::{Fetch, Fetcher};
pub use net::{HttpClient, RequestHandle};
pub use stream::{Abandoned, Completion, Deferred, Single};

#[cfg(feature = "reqwest")]
pub use net::ReqwestClient;
