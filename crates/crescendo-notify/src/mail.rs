//! SMTP mail transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crescendo_core::config::notify::MailConfig;
use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::MailTransport;

/// Sends notification mail through an SMTP relay (STARTTLS).
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailTransport {
    /// Create a transport from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid SMTP relay '{}': {e}", config.smtp_host),
                    e,
                )
            })?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid from address '{}'", self.from_address),
                    e,
                )
            })?)
            .to(to.parse().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Transport,
                    format!("Invalid recipient address '{to}'"),
                    e,
                )
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Transport, "Failed to assemble mail", e)
            })?;

        self.mailer.send(message).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("SMTP delivery to '{to}' failed: {e}"),
                e,
            )
        })?;

        tracing::info!(to, subject, "Notification mail sent");
        Ok(())
    }
}
