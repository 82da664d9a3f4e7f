//! Data layer: immutable configuration and response types.

pub mod options;
pub mod response;

pub use options::{FetchOptions, SuccessRange};
pub use response::Response;
