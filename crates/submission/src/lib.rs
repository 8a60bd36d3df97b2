//! Form submission: value validation and the submission-action pipeline.

mod actions;
mod validate;

pub use actions::{run_actions, DispatchError, DryRunClient, FailedWebhook, SubmissionReport, WebhookClient};
pub use validate::{validate_submission, FieldError, FieldErrorKind};
