use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::stream::FusedStream;
use futures_util::{FutureExt, Stream};

use super::deferred::Factory;

/// One subscription to a [`Deferred`](super::Deferred).
///
/// The work starts on first poll. Yields exactly one item, then `None`.
/// Dropping a `Single` before it yields cancels the work.
#[must_use = "streams do nothing unless polled"]
pub struct Single<T, E> {
    factory: Option<Factory<T, E>>,
    running: Option<BoxFuture<'static, Result<T, E>>>,
}

impl<T, E> Single<T, E> {
    pub(super) fn new(factory: Factory<T, E>) -> Self {
        Self {
            factory: Some(factory),
            running: None,
        }
    }

    /// Whether the work has been started and is still pending.
    pub fn is_running(&self) -> bool { self.running.is_some() }
}

impl<T, E> Stream for Single<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(factory) = this.factory.take() {
            this.running = Some(factory());
        }

        let Some(future) = this.running.as_mut() else {
            return Poll::Ready(None);
        };

        match future.poll_unpin(cx) {
            Poll::Ready(result) => {
                this.running = None;
                Poll::Ready(Some(result))
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_terminated() { (0, Some(0)) } else { (1, Some(1)) }
    }
}

impl<T, E> FusedStream for Single<T, E> {
    fn is_terminated(&self) -> bool { self.factory.is_none() && self.running.is_none() }
}

impl<T, E> std::fmt::Debug for Single<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Single")
            .field("started", &self.factory.is_none())
            .field("running", &self.running.is_some())
            .finish()
    }
}
