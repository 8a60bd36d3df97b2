//! Running a document's submission actions.
//!
//! Actions run in declaration order. A failing webhook is logged and
//! recorded, and the remaining actions still run. A redirect ends the run.

use element::{ActionKind, Settings};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors delivering a webhook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid webhook url `{0}`")]
    InvalidUrl(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

/// Delivers webhook payloads. Implemented by the host.
pub trait WebhookClient {
    fn post(&mut self, url: &str, payload: &Value) -> Result<(), DispatchError>;
}

/// A client that delivers nothing and records what it would have sent.
#[derive(Debug, Default)]
pub struct DryRunClient {
    pub sent: Vec<(String, Value)>,
}

impl WebhookClient for DryRunClient {
    fn post(&mut self, url: &str, payload: &Value) -> Result<(), DispatchError> {
        tracing::info!("Would POST {} bytes to {}", payload.to_string().len(), url);
        self.sent.push((url.to_string(), payload.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedWebhook {
    pub url: String,
    pub error: String,
}

/// What a submission run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Webhook urls that accepted the payload.
    pub delivered: Vec<String>,
    pub failed: Vec<FailedWebhook>,
    /// Inline messages to show, in order.
    pub messages: Vec<String>,
    /// Where to navigate, if a redirect ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Enabled actions not attempted because a redirect ran first.
    pub skipped: usize,
}

fn check_url(url: &str) -> Result<(), DispatchError> {
    let valid = ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme));
    if valid {
        Ok(())
    } else {
        Err(DispatchError::InvalidUrl(url.to_string()))
    }
}

/// Attempt each enabled action of `settings` with `payload`.
pub fn run_actions(
    settings: &Settings,
    payload: &Value,
    client: &mut dyn WebhookClient,
) -> SubmissionReport {
    let mut report = SubmissionReport::default();
    let actions: Vec<_> = settings.enabled_actions().collect();

    for (i, action) in actions.iter().enumerate() {
        match &action.kind {
            ActionKind::Webhook { url } => {
                match check_url(url).and_then(|()| client.post(url, payload)) {
                    Ok(()) => {
                        tracing::debug!("Delivered submission to {}", url);
                        report.delivered.push(url.clone());
                    }
                    Err(e) => {
                        tracing::warn!("Webhook {} failed: {}", url, e);
                        report.failed.push(FailedWebhook {
                            url: url.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
            ActionKind::Message { text } => report.messages.push(text.clone()),
            ActionKind::Redirect { url } => {
                report.redirect = Some(url.clone());
                report.skipped = actions.len() - i - 1;
                break;
            }
        }
    }

    report
}
