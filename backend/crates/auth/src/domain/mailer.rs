//! Outbound Mail Port
//!
//! Delivery is an external collaborator. The core composes one message
//! per successful sign-up and hands it off; it never blocks user
//! provisioning on delivery.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// One outbound message.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// The fixed confirmation-code template.
    pub fn confirmation_code(to: &Email, code: &str) -> Self {
        Self {
            to: to.as_str().to_string(),
            subject: "confirmation code".to_string(),
            body: format!("Your confirmation code: {code}"),
        }
    }
}

/// Mail delivery trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Attempt delivery of a single message
    async fn send(&self, message: &MailMessage) -> AuthResult<()>;
}
