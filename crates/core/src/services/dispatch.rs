//! Notice email dispatch.
//!
//! A dispatch resolves the optional draft, composes the branded HTML body,
//! makes exactly one delivery attempt and records one email log row with the
//! outcome.

use chrono::{DateTime, Datelike, Utc};
use council_common::config::SiteConfig;
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::email_log::{self, EmailStatus};
use council_db::repositories::{DraftRepository, EmailLogRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail};

use super::email::{EmailTransportRef, OutgoingEmail};
use super::export::escape_html;

/// Number of log rows shown on the admin email page.
pub const RECENT_LOG_LIMIT: u64 = 50;

/// Input for sending a notice email.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEmailInput {
    #[serde(default, alias = "draft_id")]
    pub draft_id: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub subject: String,
    #[validate(length(min = 1, max = 500))]
    pub recipients: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub custom_message: Option<String>,
}

impl DispatchEmailInput {
    fn check(&self) -> AppResult<()> {
        self.validate()?;

        if self.subject.trim().is_empty() {
            return Err(AppError::Validation("subject must not be blank".to_string()));
        }
        if let Some(bad) = self.recipients.iter().find(|r| !r.validate_email()) {
            return Err(AppError::Validation(format!(
                "invalid recipient address: {bad}"
            )));
        }

        Ok(())
    }
}

/// Result of one dispatch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
    /// ID of the email log row, if it could be written.
    pub log_id: Option<String>,
}

/// Email log entry for the admin history view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogResponse {
    pub id: String,
    pub draft_id: Option<String>,
    pub subject: String,
    pub recipients: Vec<String>,
    pub sent_at: String,
    pub status: EmailStatus,
}

impl From<email_log::Model> for EmailLogResponse {
    fn from(log: email_log::Model) -> Self {
        let recipients = log.recipient_list();
        Self {
            id: log.id,
            draft_id: log.draft_id,
            subject: log.subject,
            recipients,
            sent_at: log.sent_at.to_rfc3339(),
            status: log.status,
        }
    }
}

fn with_line_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// Compose the notice email body.
///
/// The custom message block comes before the draft content block; either is
/// omitted when empty.
#[must_use]
pub fn compose_html(
    site: &SiteConfig,
    custom_message: Option<&str>,
    draft_content: Option<&str>,
    year: i32,
) -> String {
    let council = escape_html(&site.council_name);
    let institute = escape_html(&site.institute_name);

    let custom_block = custom_message
        .filter(|m| !m.is_empty())
        .map(|m| {
            format!(
                "<div class=\"custom-message\"><p>{}</p></div>\n",
                with_line_breaks(m)
            )
        })
        .unwrap_or_default();
    let draft_block = draft_content
        .filter(|c| !c.is_empty())
        .map(|c| format!("<div class=\"draft-content\">{}</div>\n", with_line_breaks(c)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background: linear-gradient(to right, #2563eb, #9333ea); color: white; padding: 30px; text-align: center; border-radius: 8px 8px 0 0; }}
  .content {{ background: #f9fafb; padding: 30px; border-radius: 0 0 8px 8px; }}
  .custom-message {{ background: white; padding: 20px; margin-bottom: 20px; border-left: 4px solid #2563eb; border-radius: 4px; }}
  .draft-content {{ background: white; padding: 20px; border-radius: 4px; white-space: pre-wrap; }}
  .footer {{ text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 14px; }}
</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>🏆 {council}</h1>
<p>{institute}</p>
</div>
<div class="content">
{custom_block}{draft_block}<div class="footer">
<p>This is an official communication from {council}</p>
<p>&copy; {year} {institute}</p>
</div>
</div>
</div>
</body>
</html>
"#
    )
}

/// Service that sends notice emails and keeps the email log.
#[derive(Clone)]
pub struct DispatchService {
    draft_repo: DraftRepository,
    email_log_repo: EmailLogRepository,
    transport: EmailTransportRef,
    site: SiteConfig,
    id_gen: IdGenerator,
}

impl DispatchService {
    /// Create a new dispatch service.
    #[must_use]
    pub const fn new(
        draft_repo: DraftRepository,
        email_log_repo: EmailLogRepository,
        transport: EmailTransportRef,
        site: SiteConfig,
    ) -> Self {
        Self {
            draft_repo,
            email_log_repo,
            transport,
            site,
            id_gen: IdGenerator::new(),
        }
    }

    /// Send a notice email now.
    pub async fn dispatch(&self, input: DispatchEmailInput) -> AppResult<DispatchOutcome> {
        self.dispatch_at(input, Utc::now()).await
    }

    /// Send a notice email, stamping the log row with `now`.
    pub async fn dispatch_at(
        &self,
        input: DispatchEmailInput,
        now: DateTime<Utc>,
    ) -> AppResult<DispatchOutcome> {
        input.check()?;

        let draft_content = match input.draft_id.as_deref() {
            Some(draft_id) => self.resolve_draft_content(draft_id).await,
            None => None,
        };

        let html = compose_html(
            &self.site,
            input.custom_message.as_deref(),
            draft_content.as_deref(),
            now.year(),
        );

        let email = OutgoingEmail {
            to: input.recipients.clone(),
            subject: input.subject.clone(),
            html,
        };

        let result = match self.transport.send(email).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, subject = %input.subject, "Email transport error");
                super::email::EmailDeliveryResult {
                    success: false,
                    message_id: None,
                    error: Some(e.to_string()),
                }
            }
        };

        let status = if result.success {
            EmailStatus::Sent
        } else {
            EmailStatus::Failed
        };

        let log = email_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            draft_id: Set(input.draft_id.clone()),
            subject: Set(input.subject.clone()),
            recipients: Set(serde_json::json!(input.recipients)),
            sent_at: Set(now.into()),
            status: Set(status),
        };

        let log_id = match self.email_log_repo.create(log).await {
            Ok(row) => Some(row.id),
            Err(e) => {
                tracing::error!(error = %e, subject = %input.subject, "Failed to write email log");
                None
            }
        };

        tracing::info!(
            subject = %input.subject,
            recipients = input.recipients.len(),
            status = ?status,
            "Email dispatched"
        );

        Ok(DispatchOutcome {
            success: result.success,
            message_id: result.message_id,
            error: result.error,
            log_id,
        })
    }

    async fn resolve_draft_content(&self, draft_id: &str) -> Option<String> {
        match self.draft_repo.find_by_id(draft_id).await {
            Ok(Some(draft)) => Some(draft.content),
            Ok(None) => {
                tracing::warn!(draft_id = %draft_id, "Draft not found, sending custom message only");
                None
            }
            Err(e) => {
                tracing::warn!(draft_id = %draft_id, error = %e, "Draft lookup failed");
                None
            }
        }
    }

    /// Most recent email log rows.
    pub async fn recent_logs(&self) -> AppResult<Vec<EmailLogResponse>> {
        let logs = self.email_log_repo.find_recent(RECENT_LOG_LIMIT).await?;
        Ok(logs.into_iter().map(EmailLogResponse::from).collect())
    }
}
