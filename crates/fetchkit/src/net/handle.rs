use tokio::task::AbortHandle;

/// Cancellation handle for an in-flight callback-style request.
///
/// Dropping the handle cancels the request. Once cancelled, the request's
/// callback is never invoked. Use [`RequestHandle::detach`] to let the request
/// run to completion without keeping the handle around.
#[derive(Debug)]
#[must_use = "dropping a RequestHandle cancels the request"]
pub struct RequestHandle {
    abort: Option<AbortHandle>,
}

impl RequestHandle {
    pub fn new(abort: AbortHandle) -> Self { Self { abort: Some(abort) } }

    /// A handle with nothing to cancel, for work that finished synchronously.
    pub fn noop() -> Self { Self { abort: None } }

    pub fn cancel(mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }

    pub fn detach(mut self) { self.abort = None; }

    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().is_none_or(AbortHandle::is_finished)
    }
}

impl Drop for RequestHandle {
    fn drop(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            flag.store(true, Ordering::SeqCst);
        });

        drop(RequestHandle::new(task.abort_handle()));

        assert!(task.await.unwrap_err().is_cancelled());
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_detach_keeps_task_running() {
        let task = tokio::spawn(async { 42 });
        RequestHandle::new(task.abort_handle()).detach();
        assert_eq!(task.await.unwrap(), 42);
    }

    #[test]
    fn test_noop() {
        let handle = RequestHandle::noop();
        assert!(handle.is_finished());
        handle.cancel();
    }
}
