//! Connect-phase deadlines
//!
//! Everything before a connection reaches the pool is bounded in two phases.
//! The dial (TCP connect plus any proxy tunnel) gets the dial timeout; once
//! [`Dialed`] reports the socket ready, the remainder of the connect future
//! (the TLS handshake) gets the handshake timeout on its own.
//!
//! The two layers sit on either side of the TLS connector and find each
//! other through a task-local set while the outer layer calls inward.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::Uri;
use tokio::sync::Notify;
use tower::Service;

use crate::error::{BoxError, TimedOut};

tokio::task_local! {
    static DIAL_DONE: Arc<Notify>;
}

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Signals the enclosing [`ConnectDeadline`] when the wrapped dial completes.
#[derive(Debug, Clone)]
pub(crate) struct Dialed<C> {
    inner: C,
}

impl<C> Dialed<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C> Service<Uri> for Dialed<C>
where
    C: Service<Uri>,
    C::Future: Send + 'static,
{
    type Response = C::Response;
    type Error = C::Error;
    type Future = BoxFuture<C::Response, C::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, dst: Uri) -> Self::Future {
        let done = DIAL_DONE.try_with(Arc::clone).ok();
        let dialing = self.inner.call(dst);
        Box::pin(async move {
            let result = dialing.await;
            if let (Ok(_), Some(done)) = (&result, done) {
                done.notify_one();
            }
            result
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ConnectDeadline<C> {
    inner: C,
    dial: Duration,
    handshake: Duration,
}

impl<C> ConnectDeadline<C> {
    pub(crate) fn new(inner: C, dial: Duration, handshake: Duration) -> Self {
        Self {
            inner,
            dial,
            handshake,
        }
    }
}

impl<C> Service<Uri> for ConnectDeadline<C>
where
    C: Service<Uri>,
    C::Response: Send + 'static,
    C::Error: Into<BoxError> + Send,
    C::Future: Send + 'static,
{
    type Response = C::Response;
    type Error = BoxError;
    type Future = BoxFuture<C::Response, BoxError>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, dst: Uri) -> Self::Future {
        let (dial, handshake) = (self.dial, self.handshake);
        let done = Arc::new(Notify::new());
        let inner = &mut self.inner;
        let connecting = DIAL_DONE.sync_scope(Arc::clone(&done), || inner.call(dst));

        Box::pin(async move {
            tokio::pin!(connecting);

            let dialed = tokio::time::timeout(dial, async {
                tokio::select! {
                    biased;
                    result = &mut connecting => Some(result),
                    () = done.notified() => None,
                }
            })
            .await;

            let outcome = match dialed {
                Ok(Some(result)) => result,
                Ok(None) => match tokio::time::timeout(handshake, connecting).await {
                    Ok(result) => result,
                    Err(_elapsed) => {
                        tracing::debug!(timeout = ?handshake, "TLS handshake timed out");
                        return Err(Box::new(TimedOut) as BoxError);
                    }
                },
                Err(_elapsed) => return Err(Box::new(TimedOut) as BoxError),
            };
            outcome.map_err(Into::<BoxError>::into)
        })
    }
}
