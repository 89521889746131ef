//! Notification sink port.
//!
//! Delivery is best-effort: the engine logs and discards failures so a
//! messaging outage never blocks a status transition.

use crate::workflow::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult = Result<(), NotifierError>;

/// Fire-and-forget message to an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    recipient: EmailAddress,
    subject: String,
    body: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(
        recipient: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Returns the recipient address.
    #[must_use]
    pub const fn recipient(&self) -> &EmailAddress {
        &self.recipient
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Notification delivery contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails; callers treat the
    /// failure as non-fatal.
    async fn send(&self, notification: &Notification) -> NotifierResult;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The recipient or sender address was rejected by the transport.
    #[error("invalid notification address: {0}")]
    InvalidAddress(String),

    /// Transport-layer delivery failure.
    #[error("delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a transport delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
