//! Fire-and-forget side effects (emails, alert messages).
//!
//! The request that triggers a side effect never waits for it; failures
//! are only visible in the logs.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Spawn `fut` on the runtime and log its error under `tag`.
///
/// The returned handle is only useful to tests; handlers drop it.
pub fn spawn_logged<F, E>(tag: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(()) => tracing::debug!(task = tag, "Background task finished"),
            Err(e) => tracing::warn!(task = tag, error = %e, "Background task failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failures_are_swallowed() {
        let handle = spawn_logged("test", async { Err::<(), _>("boom") });
        assert!(handle.await.is_ok());
    }
}
