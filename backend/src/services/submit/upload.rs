//! Reading the multipart form of `POST /submit`.
//!
//! `read_submission` drains the payload into a [`SubmissionForm`], keeping
//! the raw bytes of the `file` part and the text of the other parts. Unknown
//! parts are skipped. `SubmissionForm::into_request` then applies the checks
//! in the order the endpoint reports them.

use actix_multipart::{Field, Multipart};
use common::model::criteria::Criteria;
use common::model::submission::FormFields;
use common::requests::{FIELD_EMAIL, FIELD_FILE, FIELD_IMPACTS, FIELD_WEIGHTS};
use common::validation::{validate, ValidationError};
use futures_util::StreamExt;
use lettre::message::Mailbox;

use crate::services::topsis::InputFormat;

use super::SubmitError;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-side name, as sent in the content disposition.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Parts of the multipart form, as received.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub file: Option<UploadedFile>,
    pub weights: Option<String>,
    pub impacts: Option<String>,
    pub email: Option<String>,
}

/// A submission that passed every check and is ready to be ranked.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub file: UploadedFile,
    pub format: InputFormat,
    pub criteria: Criteria,
    /// The address as typed, used in the reply.
    pub email: String,
    pub recipient: Mailbox,
}

/// Drains the multipart payload. The total size of all parts is capped at `limit`.
pub async fn read_submission(mut payload: Multipart, limit: usize) -> Result<SubmissionForm, SubmitError> {
    let mut form = SubmissionForm::default();
    let mut budget = limit;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some(FIELD_FILE) => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let bytes = read_field(&mut field, &mut budget, limit).await?;
                form.file = Some(UploadedFile { filename, bytes });
            }
            Some(FIELD_WEIGHTS) => form.weights = Some(read_text(&mut field, &mut budget, limit).await?),
            Some(FIELD_IMPACTS) => form.impacts = Some(read_text(&mut field, &mut budget, limit).await?),
            Some(FIELD_EMAIL) => form.email = Some(read_text(&mut field, &mut budget, limit).await?),
            _ => {
                read_field(&mut field, &mut budget, limit).await?;
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, budget: &mut usize, limit: usize) -> Result<Vec<u8>, SubmitError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        *budget = budget
            .checked_sub(chunk.len())
            .ok_or(SubmitError::TooLarge { limit })?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field, budget: &mut usize, limit: usize) -> Result<String, SubmitError> {
    let bytes = read_field(field, budget, limit).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SubmissionForm {
    /// Checks the received parts, in order:
    /// file part, file name, text parts, shared form validation, recipient
    /// address, numeric weights, file format (`.csv`, `.xlsx` or `.xls`).
    pub fn into_request(self) -> Result<SubmitRequest, SubmitError> {
        let file = self.file.ok_or(SubmitError::NoFilePart)?;
        if file.filename.is_empty() {
            return Err(SubmitError::NoSelectedFile);
        }

        let (Some(weights), Some(impacts), Some(email)) = (
            non_empty(self.weights),
            non_empty(self.impacts),
            non_empty(self.email),
        ) else {
            return Err(SubmitError::MissingFormData);
        };

        let fields = FormFields {
            weights,
            impacts,
            email,
        };
        validate(true, &fields)?;
        // The shared pattern is looser than RFC 5322.
        let recipient: Mailbox = fields
            .email
            .parse()
            .map_err(|_| ValidationError::InvalidEmail)?;
        let criteria = Criteria::parse(&fields.weights, &fields.impacts)?;

        let format = InputFormat::from_path(&file.filename).ok_or(SubmitError::UnsupportedFormat)?;

        Ok(SubmitRequest {
            file,
            format,
            criteria,
            email: fields.email,
            recipient,
        })
    }
}
