//! Core layer: pure checks applied to a request target and its response.

mod decode;
mod status;
mod target;

pub use decode::decode;
pub use status::accept;
pub use target::parse_target;
