//! Shapes exchanged between the submission form and the `/submit` endpoint.
//!
//! `FormFields` carries the three text inputs exactly as the user typed them.
//! The file itself is not part of this struct because its representation
//! differs per side (a browser `File` in the frontend, raw bytes in the
//! backend); only its presence matters for validation.
//!
//! `SubmitResponse` is the JSON body returned by the backend for every
//! request, successful or not.

use serde::{Deserialize, Serialize};

/// Raw text of the weights, impacts and email inputs.
///
/// Values are kept untrimmed: they are validated on a trimmed view but sent
/// to the server as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    /// Comma separated weights, e.g. `"1,1,2"`.
    pub weights: String,
    /// Comma separated impacts, e.g. `"+,-,+"`.
    pub impacts: String,
    /// Destination address for the result file.
    pub email: String,
}

impl FormFields {
    pub fn new(
        weights: impl Into<String>,
        impacts: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            weights: weights.into(),
            impacts: impacts.into(),
            email: email.into(),
        }
    }
}

/// JSON body of a `/submit` reply.
///
/// A successful reply sets `success` and may carry a `message` meant for the
/// user. A failed reply carries `error`. Every field is optional so that a
/// partial or foreign body still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
