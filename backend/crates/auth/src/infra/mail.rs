//! Mailer Implementations
//!
//! No real SMTP transport ships here. [`TracingMailer`] writes messages
//! to the log, which is how codes reach operators in development;
//! [`RecordingMailer`] captures them for assertions in tests.

use std::sync::Mutex;

use crate::domain::mailer::{MailMessage, Mailer};
use crate::error::{AuthError, AuthResult};

/// Logs outbound mail instead of delivering it.
#[derive(Debug, Default, Clone)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send(&self, message: &MailMessage) -> AuthResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Outbound mail"
        );
        Ok(())
    }
}

/// Captures outbound mail for inspection.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, in order.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AuthResult<()> {
        self.sent
            .lock()
            .map_err(|_| AuthError::Mail("mailbox lock poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;

    #[tokio::test]
    async fn test_recording_mailer_captures_messages() {
        let mailer = RecordingMailer::new();
        let email = Email::new("user@example.com").unwrap();

        mailer
            .send(&MailMessage::confirmation_code(&email, "abc123"))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "user@example.com");
        assert!(sent[0].body.contains("abc123"));
    }
}
