//! # Request Context
//!
//! Cancellation and deadline carried through every store call.
//!
//! ```text
//! server shutdown token
//!      │ child_token()
//!      ▼
//! Context { token, deadline = now + request timeout }
//!      │
//!      ├──► biz:   ctx.check()? between steps
//!      └──► store: query raced against token + deadline (bookstore-db)
//! ```
//!
//! The core only inspects the context; racing futures against it needs a
//! timer and lives in the database crate.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::{CoreError, CoreResult};

/// Cancellation/deadline scope for one request.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled unless [`Context::cancel`] is called.
    pub fn new() -> Self {
        Context::default()
    }

    /// Builds a context driven by an existing token (e.g. a child of the
    /// server's shutdown token).
    pub fn with_token(token: CancellationToken) -> Self {
        Context {
            token,
            deadline: None,
        }
    }

    /// Sets the deadline to `now + timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// Cancels this context and every context derived from the same token.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once cancelled or past the deadline.
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns [`CoreError::Cancelled`] once the context is done.
    pub fn check(&self) -> CoreResult<()> {
        if self.is_done() {
            return Err(CoreError::Cancelled);
        }
        Ok(())
    }
}
