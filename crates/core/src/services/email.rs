//! Email delivery.

use std::sync::Arc;

use async_trait::async_trait;
use council_common::config::{EmailProviderKind, EmailSettings};
use council_common::{AppError, AppResult};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// An HTML email addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Email delivery result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDeliveryResult {
    /// Whether the email was sent successfully
    pub success: bool,
    /// Message ID from provider (if available)
    pub message_id: Option<String>,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl EmailDeliveryResult {
    fn sent(message_id: Option<String>) -> Self {
        Self {
            success: true,
            message_id,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Make one delivery attempt.
    async fn send(&self, email: OutgoingEmail) -> AppResult<EmailDeliveryResult>;
}

/// Shared handle to an email transport.
pub type EmailTransportRef = Arc<dyn EmailTransport>;

/// Email service backed by SMTP or the Resend HTTP API.
#[derive(Clone)]
pub struct EmailService {
    settings: Option<EmailSettings>,
    http_client: reqwest::Client,
}

impl EmailService {
    /// Create a new email service. `None` disables delivery.
    #[must_use]
    pub fn new(settings: Option<EmailSettings>) -> Self {
        Self {
            settings,
            http_client: reqwest::Client::new(),
        }
    }

    /// Check if email service is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.settings.is_some()
    }

    fn sender(settings: &EmailSettings) -> String {
        format!("{} <{}>", settings.from_name, settings.from_address)
    }

    async fn send_smtp(
        settings: &EmailSettings,
        email: OutgoingEmail,
    ) -> AppResult<EmailDeliveryResult> {
        let Some(host) = settings.smtp_host.as_deref() else {
            return Ok(EmailDeliveryResult::failed("SMTP host not configured"));
        };

        let from: Mailbox = Self::sender(settings)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid sender address: {e}")))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML);
        for to in &email.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| AppError::Validation(format!("Invalid recipient {to}: {e}")))?;
            builder = builder.to(mailbox);
        }
        let message = builder
            .body(email.html)
            .map_err(|e| AppError::Email(format!("Failed to build message: {e}")))?;

        let message_id = message
            .headers()
            .get_raw("Message-ID")
            .map(|v| v.trim_matches(['<', '>']).to_string());

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::Email(format!("SMTP relay setup failed: {e}")))?
            .port(settings.smtp_port);
        if let (Some(user), Some(pass)) = (&settings.smtp_username, &settings.smtp_password) {
            transport = transport.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        let mailer = transport.build();

        match mailer.send(message).await {
            Ok(_) => Ok(EmailDeliveryResult::sent(message_id)),
            Err(e) => {
                tracing::warn!(error = %e, host = %host, "SMTP delivery failed");
                Ok(EmailDeliveryResult::failed(e.to_string()))
            }
        }
    }

    async fn send_resend(
        &self,
        settings: &EmailSettings,
        email: OutgoingEmail,
    ) -> AppResult<EmailDeliveryResult> {
        let Some(api_key) = settings.api_key.as_deref() else {
            return Ok(EmailDeliveryResult::failed("Resend API key not configured"));
        };

        let body = serde_json::json!({
            "from": Self::sender(settings),
            "to": email.to,
            "subject": email.subject,
            "html": email.html,
        });

        let response = self
            .http_client
            .post(RESEND_ENDPOINT)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Resend request failed: {e}")))?;

        if response.status().is_success() {
            #[derive(Deserialize)]
            struct ResendResponse {
                id: Option<String>,
            }
            let result: ResendResponse = response
                .json()
                .await
                .unwrap_or(ResendResponse { id: None });
            Ok(EmailDeliveryResult::sent(result.id))
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Resend rejected email");
            Ok(EmailDeliveryResult::failed(error_text))
        }
    }
}

#[async_trait]
impl EmailTransport for EmailService {
    async fn send(&self, email: OutgoingEmail) -> AppResult<EmailDeliveryResult> {
        let Some(settings) = self.settings.as_ref() else {
            tracing::warn!(subject = %email.subject, "Email service not configured");
            return Ok(EmailDeliveryResult::failed("Email service not configured"));
        };

        match settings.provider {
            EmailProviderKind::Smtp => Self::send_smtp(settings, email).await,
            EmailProviderKind::Resend => self.send_resend(settings, email).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: EmailProviderKind) -> EmailSettings {
        EmailSettings {
            provider,
            from_address: "council@example.edu".to_string(),
            from_name: "XIE Student Council".to_string(),
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            api_key: None,
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: vec!["student@example.edu".to_string()],
            subject: "Notice".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_failure() {
        let service = EmailService::new(None);
        assert!(!service.is_enabled());

        let result = service.send(email()).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Email service not configured"));
    }

    #[tokio::test]
    async fn test_smtp_without_host_fails_without_network() {
        let service = EmailService::new(Some(settings(EmailProviderKind::Smtp)));

        let result = service.send(email()).await.unwrap();

        assert!(!result.success);
        assert!(result.message_id.is_none());
    }

    #[tokio::test]
    async fn test_resend_without_api_key_fails_without_network() {
        let service = EmailService::new(Some(settings(EmailProviderKind::Resend)));

        let result = service.send(email()).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Resend API key not configured"));
    }

    #[test]
    fn test_sender_format() {
        let s = settings(EmailProviderKind::Smtp);
        assert_eq!(
            EmailService::sender(&s),
            "XIE Student Council <council@example.edu>"
        );
    }
}
