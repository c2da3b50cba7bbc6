//! Cancellation and deadlines for store operations.
//!
//! Every table operation takes a [`Context`]. An operation whose context is
//! already cancelled (or past its deadline) fails before any engine call is
//! made; an operation that is cancelled while the engine is working is
//! abandoned at the next await point and reports [`CancelReason`].

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct TokenState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cancellation token shared between the caller and in-flight operations.
///
/// Clones observe the same state; cancelling any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Token sharing cancellation state with this one.
    pub fn child_token(&self) -> Self {
        self.clone()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Why an operation did not run to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "context cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

impl std::error::Error for CancelReason {}

/// Per-call cancellation token plus an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Keeps the earlier of the existing and the new deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already done.
    pub fn check(&self) -> Result<(), CancelReason> {
        if self.token.is_cancelled() {
            return Err(CancelReason::Cancelled);
        }
        if matches!(self.deadline, Some(deadline) if Instant::now() >= deadline) {
            return Err(CancelReason::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` until it completes or the context is cancelled/expired.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CancelReason>
    where
        F: Future<Output = T>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(CancelReason::Cancelled),
            _ = deadline => Err(CancelReason::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_clone_shares_state() {
        let token = CancellationToken::new();
        let child = token.child_token();
        child.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_check() {
        let ctx = Context::background();
        assert!(ctx.check().is_ok());

        let token = CancellationToken::new();
        let ctx = Context::with_token(token.clone());
        token.cancel();
        assert_eq!(ctx.check(), Err(CancelReason::Cancelled));
    }

    #[tokio::test]
    async fn test_expired_deadline_fails_fast() {
        let ctx = Context::background().with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(ctx.check(), Err(CancelReason::DeadlineExceeded));

        let result = ctx.run(async { 1 }).await;
        assert_eq!(result, Err(CancelReason::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_with_deadline_keeps_earliest() {
        let soon = Instant::now() + Duration::from_secs(1);
        let later = soon + Duration::from_secs(10);
        let ctx = Context::background().with_deadline(soon).with_deadline(later);
        assert_eq!(ctx.deadline(), Some(soon));
    }

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_run_interrupted_by_cancel() {
        let token = CancellationToken::new();
        let ctx = Context::with_token(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(30)))
            .await;
        assert_eq!(result, Err(CancelReason::Cancelled));
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_interrupted_by_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(30)))
            .await;
        assert_eq!(result, Err(CancelReason::DeadlineExceeded));
    }
}
