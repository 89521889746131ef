//! SMTP adapter for the notification port.

use crate::workflow::ports::{Notification, Notifier, NotifierError, NotifierResult};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use thiserror::Error;

/// SMTP relay settings, deserialized from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Relay host name.
    pub smtp_host: String,
    /// Relay account name.
    pub smtp_username: String,
    /// Relay account password.
    pub smtp_password: String,
    /// Sender address placed on outgoing messages.
    pub smtp_sender: String,
}

impl SmtpConfig {
    /// Reads the configuration from `SMTP_HOST`, `SMTP_USERNAME`,
    /// `SMTP_PASSWORD`, and `SMTP_SENDER`.
    ///
    /// # Errors
    ///
    /// Returns [`SmtpConfigError::Environment`] when a variable is missing.
    pub fn from_env() -> Result<Self, SmtpConfigError> {
        Ok(envy::from_env::<Self>()?)
    }
}

/// Errors raised while constructing the SMTP notifier.
#[derive(Debug, Error)]
pub enum SmtpConfigError {
    /// Missing or malformed environment variables.
    #[error("smtp environment configuration: {0}")]
    Environment(#[from] envy::Error),

    /// The relay host or sender address was rejected.
    #[error("invalid smtp relay or sender: {0}")]
    Invalid(String),
}

/// Notifier delivering messages over an SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Creates a notifier for the configured relay.
    ///
    /// # Errors
    ///
    /// Returns [`SmtpConfigError::Invalid`] when the relay host or sender
    /// address cannot be used.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpConfigError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(config.smtp_host.as_str())
            .map_err(|err| SmtpConfigError::Invalid(err.to_string()))?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let sender = config
            .smtp_sender
            .parse::<Mailbox>()
            .map_err(|err| SmtpConfigError::Invalid(err.to_string()))?;
        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> NotifierResult {
        let recipient = notification
            .recipient()
            .as_str()
            .parse::<Mailbox>()
            .map_err(|err| NotifierError::InvalidAddress(err.to_string()))?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(notification.subject())
            .body(notification.body().to_owned())
            .map_err(NotifierError::delivery)?;

        self.transport
            .send(message)
            .await
            .map_err(NotifierError::delivery)?;
        Ok(())
    }
}
