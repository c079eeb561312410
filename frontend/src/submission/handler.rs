//! The submit flow of the TOPSIS form.
//!
//! `handle_submit` runs one full cycle: clear messages, validate, enter the
//! busy state, post, report the outcome, leave the busy state. It performs
//! every visible effect through [`FormPorts`] and every network effect
//! through [`SubmitTransport`], and it returns the outcome so callers and
//! tests can inspect it.
//!
//! The busy state is held by a drop guard. It is released after the outcome
//! is displayed, and also when the future is dropped mid-flight or a port
//! panics.

use common::model::submission::FormFields;
use common::validation::{validate, ValidationError};

use crate::config::SubmitConfig;

use super::ports::{BusyGuard, FormPorts};
use super::transport::{SubmissionPayload, SubmitTransport, TransportError};

pub const SUCCESS_FALLBACK: &str = "Result file has been sent to your email successfully.";
pub const SERVER_ERROR_FALLBACK: &str = "An error occurred during processing.";
pub const UNREADABLE_RESPONSE: &str = "The server returned an unreadable response.";

/// Values read from the form at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput<F> {
    /// First selected file, if any.
    pub file: Option<F>,
    pub fields: FormFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the submission; carries the message shown.
    Success(String),
    /// Blocked before any request was made.
    Rejected(ValidationError),
    /// The server answered with a failure status; carries the message shown.
    ServerError(String),
    /// No usable response; carries the message shown.
    TransportError(String),
}

impl SubmitOutcome {
    /// Text placed in the success or error area for this outcome.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Success(message)
            | SubmitOutcome::ServerError(message)
            | SubmitOutcome::TransportError(message) => message.clone(),
            SubmitOutcome::Rejected(err) => err.to_string(),
        }
    }
}

fn into_payload<F>(input: FormInput<F>) -> Result<SubmissionPayload<F>, ValidationError> {
    validate(input.file.is_some(), &input.fields)?;
    let file = input.file.ok_or(ValidationError::MissingFile)?;
    let FormFields {
        weights,
        impacts,
        email,
    } = input.fields;
    Ok(SubmissionPayload {
        file,
        weights,
        impacts,
        email,
    })
}

fn transport_message(config: &SubmitConfig, err: &TransportError) -> String {
    match err {
        TransportError::Decode(_) => UNREADABLE_RESPONSE.to_string(),
        TransportError::Connect(_) => {
            let mut message = format!(
                "Failed to connect to the server ({}). Check console for details.",
                config.endpoint
            );
            if let Some(hint) = &config.environment_hint {
                message.push(' ');
                message.push_str(hint);
            }
            message
        }
    }
}

/// Runs one submit cycle and returns its outcome.
pub async fn handle_submit<P, T>(
    ports: &P,
    transport: &T,
    config: &SubmitConfig,
    input: FormInput<T::File>,
) -> SubmitOutcome
where
    P: FormPorts + ?Sized,
    T: SubmitTransport,
{
    ports.clear_messages();

    let payload = match into_payload(input) {
        Ok(payload) => payload,
        Err(err) => {
            ports.show_error(&err.to_string());
            return SubmitOutcome::Rejected(err);
        }
    };

    let _busy = BusyGuard::enter(ports);

    let outcome = match transport.post(&config.endpoint, payload).await {
        Ok(reply) if reply.ok => SubmitOutcome::Success(
            reply
                .body
                .message
                .unwrap_or_else(|| SUCCESS_FALLBACK.to_string()),
        ),
        Ok(reply) => SubmitOutcome::ServerError(
            reply
                .body
                .error
                .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
        ),
        Err(err) => {
            log::error!("Submission error: {}", err);
            SubmitOutcome::TransportError(transport_message(config, &err))
        }
    };

    match &outcome {
        SubmitOutcome::Success(message) => {
            ports.show_success(message);
            ports.reset_form();
        }
        SubmitOutcome::ServerError(message) | SubmitOutcome::TransportError(message) => {
            ports.show_error(message);
        }
        SubmitOutcome::Rejected(_) => {}
    }

    outcome
}
