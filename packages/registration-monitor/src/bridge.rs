//! Bridge between blocking admin API calls and the async scheduler.
//!
//! The admin client's HTTP calls are synchronous; running one directly on a
//! runtime worker would stall every other handler scheduled there for the
//! duration of the network round-trip. `run_blocking` moves the call onto
//! the runtime's dedicated blocking pool and suspends the calling task until
//! the result arrives.

use tracing::error;

/// Run a blocking operation off the async scheduler and await its result.
///
/// Returns `None` when the worker aborted before producing a result; callers
/// treat that the same as an operation-level failure. There is no
/// cancellation - once started, the operation always runs to completion.
pub async fn run_blocking<T, F>(op: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Blocking worker aborted: {}", e);
            None
        }
    }
}
