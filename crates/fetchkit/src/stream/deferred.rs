use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::warn;

use super::completion::{Abandoned, Completion};
use super::single::Single;
use crate::net::RequestHandle;

pub(super) type Factory<T, E> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Reusable description of work that yields one value or one error.
///
/// Creating a `Deferred` does nothing. Each call to [`Deferred::subscribe`],
/// [`Deferred::value`] or [`Deferred::sink`] runs the work from scratch; no
/// result is shared between subscriptions.
///
/// # Examples
///
/// ```
/// use fetchkit::Deferred;
/// use futures_util::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let answer = Deferred::<u32, std::io::Error>::new(|| async { Ok(42) });
/// let mut single = answer.subscribe();
/// assert_eq!(single.next().await.unwrap().unwrap(), 42);
/// assert!(single.next().await.is_none());
/// # }
/// ```
pub struct Deferred<T, E> {
    factory: Factory<T, E>,
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T, E> std::fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

impl<T, E> Deferred<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a future-producing closure. The closure runs once per subscription.
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// Bridge a callback-style producer.
    ///
    /// `start` runs once per subscription. It receives the [`Completion`] to
    /// fulfil and returns the handle of the work it started. Dropping the
    /// subscription drops that handle. A completion dropped without a value
    /// ends the subscription with `E::from(Abandoned)`.
    pub fn from_callback<F>(start: F) -> Self
    where
        F: Fn(Completion<T, E>) -> RequestHandle + Send + Sync + 'static,
        E: From<Abandoned>,
    {
        Self::new(move || {
            let (completion, rx) = Completion::channel();
            let handle = start(completion);
            async move {
                let _handle = handle;
                rx.await.unwrap_or_else(|_| Err(E::from(Abandoned)))
            }
        })
    }

    /// Start a new subscription.
    pub fn subscribe(&self) -> Single<T, E> { Single::new(Arc::clone(&self.factory)) }

    /// Subscribe and wait for the single outcome.
    pub async fn value(&self) -> Result<T, E> { (self.factory)().await }

    /// Subscribe on the current tokio runtime and push the outcome to
    /// `on_complete`.
    ///
    /// Cancelling or dropping the returned handle unsubscribes; `on_complete`
    /// is then never called. Outside a runtime nothing is started and
    /// `on_complete` is dropped; use [`Deferred::subscribe`] to drive the work
    /// from another executor.
    pub fn sink<F>(&self, on_complete: F) -> RequestHandle
    where
        F: FnOnce(Result<T, E>) + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, sink not started");
            return RequestHandle::noop();
        };

        let factory = Arc::clone(&self.factory);
        let task = runtime.spawn(async move {
            on_complete(factory().await);
        });
        RequestHandle::new(task.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use futures_util::StreamExt;
    use futures_util::stream::FusedStream;
    use tokio::sync::oneshot;

    use super::*;

    fn counting() -> (Deferred<usize, Abandoned>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let deferred = Deferred::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(n) }
        });
        (deferred, runs)
    }

    #[tokio::test]
    async fn test_lazy_until_polled() {
        let (deferred, runs) = counting();
        let single = deferred.subscribe();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        drop(single);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_yields_once() {
        let (deferred, _) = counting();
        let mut single = deferred.subscribe();
        assert!(!single.is_terminated());
        assert_eq!(single.next().await, Some(Ok(1)));
        assert!(single.is_terminated());
        assert_eq!(single.next().await, None);
    }

    #[tokio::test]
    async fn test_each_subscription_reruns() {
        let (deferred, runs) = counting();
        assert_eq!(deferred.value().await, Ok(1));
        assert_eq!(deferred.clone().subscribe().next().await, Some(Ok(2)));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_from_callback_success() {
        let deferred = Deferred::<&str, Abandoned>::from_callback(|completion| {
            let task = tokio::spawn(async move { completion.succeed("done") });
            RequestHandle::new(task.abort_handle())
        });
        assert_eq!(deferred.value().await, Ok("done"));
    }

    #[tokio::test]
    async fn test_from_callback_abandoned() {
        let deferred = Deferred::<u8, Abandoned>::from_callback(|completion| {
            drop(completion);
            RequestHandle::noop()
        });
        assert_eq!(deferred.value().await, Err(Abandoned));
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) { self.0.store(true, Ordering::SeqCst); }
    }

    #[tokio::test]
    async fn test_dropping_subscription_cancels_callback_work() {
        let dropped = Arc::new(AtomicBool::new(false));
        let delivered = Arc::new(AtomicBool::new(false));
        let (dropped_flag, delivered_flag) = (Arc::clone(&dropped), Arc::clone(&delivered));

        let deferred = Deferred::<(), Abandoned>::from_callback(move |completion| {
            let guard = SetOnDrop(Arc::clone(&dropped_flag));
            let delivered = Arc::clone(&delivered_flag);
            let task = tokio::spawn(async move {
                let _guard = guard;
                tokio::time::sleep(Duration::from_secs(60)).await;
                delivered.store(true, Ordering::SeqCst);
                completion.succeed(());
            });
            RequestHandle::new(task.abort_handle())
        });

        let mut single = deferred.subscribe();
        let pending = tokio::time::timeout(Duration::from_millis(20), single.next()).await;
        assert!(pending.is_err());
        assert!(single.is_running());
        drop(single);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !dropped.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert!(!delivered.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_sink_pushes_outcome() {
        let (deferred, _) = counting();
        let (tx, rx) = oneshot::channel();
        deferred
            .sink(move |result| {
                let _ = tx.send(result);
            })
            .detach();
        assert_eq!(rx.await.unwrap(), Ok(1));
    }

    #[test]
    fn test_sink_outside_runtime_starts_nothing() {
        let (deferred, runs) = counting();
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);

        let handle = deferred.sink(move |_| flag.store(true, Ordering::SeqCst));

        assert!(handle.is_finished());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(Arc::strong_count(&called), 1);
    }

    #[tokio::test]
    async fn test_completion_sees_dropped_subscription() {
        let stash: Arc<Mutex<Option<Completion<(), Abandoned>>>> = Arc::default();
        let slot = Arc::clone(&stash);
        let deferred = Deferred::<(), Abandoned>::from_callback(move |completion| {
            *slot.lock().unwrap() = Some(completion);
            RequestHandle::noop()
        });

        let mut single = deferred.subscribe();
        assert!(tokio::time::timeout(Duration::from_millis(20), single.next()).await.is_err());
        let completion = stash.lock().unwrap().take().unwrap();
        assert!(!completion.is_cancelled());

        drop(single);
        assert!(completion.is_cancelled());
        completion.succeed(());
    }

    #[tokio::test]
    async fn test_sink_cancel_suppresses_outcome() {
        let deferred = Deferred::<(), Abandoned>::new(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        let (tx, rx) = oneshot::channel();
        deferred
            .sink(move |result| {
                let _ = tx.send(result);
            })
            .cancel();
        assert!(rx.await.is_err());
    }
}
