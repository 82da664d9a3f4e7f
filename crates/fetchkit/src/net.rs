pub mod handle;
pub mod http;

pub use handle::RequestHandle;
pub use http::HttpClient;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
