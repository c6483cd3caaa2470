//! Call-wide deadline and cancellation

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{self, Result};

/// Bounds every await of one call: each hop, and the body reads of the final
/// response.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallGuard {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl CallGuard {
    pub(crate) fn new(timeout: Duration, cancel: Option<CancellationToken>) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancel,
        }
    }

    pub(crate) async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .map_err(|_elapsed| error::timeout()),
                None => Ok(fut.await),
            }
        };

        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(error::canceled()),
                out = bounded => out,
            },
            None => bounded.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_elapses() {
        let guard = CallGuard::new(Duration::from_millis(10), None);
        let err = guard
            .run(tokio::time::sleep(Duration::from_secs(5)))
            .await
            .expect_err("should time out");
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn cancelled_token_wins_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        let guard = CallGuard::new(Duration::from_secs(60), Some(token));
        let err = guard.run(async { 1 }).await.expect_err("should be canceled");
        assert!(err.is_canceled());
    }

    #[tokio::test]
    async fn completes_within_bounds() {
        let guard = CallGuard::new(Duration::from_secs(60), Some(CancellationToken::new()));
        assert_eq!(guard.run(async { 7 }).await.expect("should complete"), 7);
    }
}
