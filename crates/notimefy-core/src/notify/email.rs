//! SMTP delivery via lettre.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{Message, SmtpTransport, Transport};

use super::{Notification, Notifier};
use crate::config::{SmtpConfig, SmtpTls};
use crate::error::NotifyError;

pub struct EmailNotifier {
    from: Mailbox,
    to: Mailbox,
    transport: SmtpTransport,
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

impl EmailNotifier {
    /// Prepare a transport for `config`. No connection is made until a
    /// notification is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if an address does not parse or the TLS parameters
    /// for the relay cannot be built.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from = mailbox(config.sender())?;
        let to = mailbox(&config.to)?;

        let builder = match config.tls {
            SmtpTls::Starttls => SmtpTransport::starttls_relay(&config.host)?,
            SmtpTls::Wrapper => SmtpTransport::relay(&config.host)?,
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .build();

        Ok(Self {
            from,
            to,
            transport,
        })
    }

    fn message(&self, notification: &Notification) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body())?;
        Ok(message)
    }
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = self.message(notification)?;
        self.transport.send(&message)?;
        tracing::info!(to = %self.to, subject = %notification.subject(), "Notification email sent");
        Ok(())
    }
}
