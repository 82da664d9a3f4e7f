//! Lazy single-value producers.
//!
//! A [`Deferred`] describes work that yields exactly one value or one error.
//! Nothing runs until it is subscribed; every subscription runs the work
//! again. A subscription is a [`Single`], a [`Stream`](futures_util::Stream)
//! that yields one item and then ends. Dropping a `Single` cancels its work.

mod completion;
mod deferred;
mod single;

pub use completion::{Abandoned, Completion};
pub use deferred::Deferred;
pub use single::Single;
