//! In-memory recording notifier.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::workflow::ports::{Notification, Notifier, NotifierError, NotifierResult};

/// Notifier that records every notification instead of delivering it.
///
/// Used by tests to assert on emission without a transport.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every notification recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when the internal lock is poisoned.
    pub fn sent(&self) -> Result<Vec<Notification>, NotifierError> {
        let sent = self
            .sent
            .read()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> NotifierResult {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(notification.clone());
        Ok(())
    }
}
