//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::messaging::env_non_empty;
use crate::templates::RenderedEmail;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a message could not be handed to the SMTP relay.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP relay rejected or unreachable: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// `SMTP_FROM` or the recipient is not a valid mailbox.
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not assemble message: {0}")]
    Build(#[from] lettre::error::Error),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "no-reply@portfolio.local";

/// Default display name used in the sender and in email headers.
const DEFAULT_APP_NAME: &str = "Portfolio";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Bare sender address.
    pub from_address: String,
    /// Application name shown as sender name and in subjects.
    pub app_name: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Read the SMTP settings. `None` when `SMTP_HOST` is unset or blank,
    /// in which case every email is skipped.
    ///
    /// | Variable        | Default                     |
    /// |-----------------|-----------------------------|
    /// | `SMTP_HOST`     | required                    |
    /// | `SMTP_PORT`     | `587`                       |
    /// | `SMTP_FROM`     | `no-reply@portfolio.local`  |
    /// | `SMTP_USER`     | unset                       |
    /// | `SMTP_PASSWORD` | unset                       |
    /// | `APP_NAME`      | `Portfolio`                 |
    pub fn from_env() -> Option<Self> {
        let smtp_host = env_non_empty("SMTP_HOST")?;
        let smtp_port = env_non_empty("SMTP_PORT")
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Some(Self {
            smtp_host,
            smtp_port,
            from_address: env_non_empty("SMTP_FROM")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            app_name: app_name_from_env(),
            smtp_user: env_non_empty("SMTP_USER"),
            smtp_password: env_non_empty("SMTP_PASSWORD"),
        })
    }
}

/// `APP_NAME` or the default, for templates rendered without a mailer.
pub fn app_name_from_env() -> String {
    env_non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends HTML emails through a pooled SMTP transport.
pub struct Mailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build the SMTP transport. Connections are opened lazily on send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Application name used in templates.
    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    /// Send a rendered email to a single recipient.
    pub async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), EmailError> {
        let from = Mailbox::new(
            Some(self.config.app_name.clone()),
            self.config.from_address.parse()?,
        );

        let message = Message::builder()
            .from(from)
            .to(to.parse()?)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())?;

        self.transport.send(message).await?;

        tracing::info!(to, subject = %email.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_smtp_host_disables_email() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn bad_recipient_is_address_error() {
        let parsed: Result<lettre::Address, _> = "enquirer-at-nowhere".parse();
        let err = EmailError::from(parsed.unwrap_err());
        assert!(err.to_string().starts_with("Invalid email address"));
    }

    #[tokio::test]
    async fn mailer_is_built_lazily_without_a_connection() {
        let mailer = Mailer::new(EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 2525,
            from_address: "no-reply@example.com".to_string(),
            app_name: "Test".to_string(),
            smtp_user: Some("user".to_string()),
            smtp_password: Some("pass".to_string()),
        })
        .expect("transport should build");
        assert_eq!(mailer.app_name(), "Test");
    }
}
