use thiserror::Error;
use tokio::sync::oneshot;

/// The producer side of a callback-bridged subscription was dropped without
/// ever completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("producer finished without a value")]
pub struct Abandoned;

/// One-shot completion passed to callback-style producers.
#[derive(Debug)]
pub struct Completion<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Completion<T, E> {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Result<T, E>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Deliver the outcome. Ignored if the subscriber has already gone away.
    pub fn complete(self, result: Result<T, E>) { let _ = self.tx.send(result); }

    pub fn succeed(self, value: T) { self.complete(Ok(value)); }

    pub fn fail(self, error: E) { self.complete(Err(error)); }

    /// Whether the subscriber has been dropped.
    pub fn is_cancelled(&self) -> bool { self.tx.is_closed() }
}
