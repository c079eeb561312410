//! Sending a validated submission to the backend.

use common::model::submission::SubmitResponse;
use common::requests::{FIELD_EMAIL, FIELD_FILE, FIELD_IMPACTS, FIELD_WEIGHTS};
use gloo_net::http::Request;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// A submission that passed validation, ready to be encoded as multipart.
///
/// The text fields are the raw input values, not the trimmed tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload<F> {
    pub file: F,
    pub weights: String,
    pub impacts: String,
    pub email: String,
}

/// What came back from the server: the status class and the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerReply {
    pub ok: bool,
    pub body: SubmitResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was received.
    #[error("request failed: {0}")]
    Connect(String),
    /// A response arrived but its body was not the expected JSON.
    #[error("unreadable response body: {0}")]
    Decode(String),
}

pub trait SubmitTransport {
    type File;

    async fn post(
        &self,
        endpoint: &str,
        payload: SubmissionPayload<Self::File>,
    ) -> Result<ServerReply, TransportError>;
}

/// `fetch` based transport used in the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl SubmitTransport for BrowserTransport {
    type File = web_sys::File;

    async fn post(
        &self,
        endpoint: &str,
        payload: SubmissionPayload<web_sys::File>,
    ) -> Result<ServerReply, TransportError> {
        let form = to_form_data(&payload).map_err(|e| TransportError::Connect(js_message(&e)))?;

        let response = Request::post(endpoint)
            .body(form)
            .map_err(|e| TransportError::Connect(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let ok = response.ok();
        let body = response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(ServerReply { ok, body })
    }
}

fn to_form_data(payload: &SubmissionPayload<web_sys::File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(FIELD_FILE, &payload.file, &payload.file.name())?;
    form.append_with_str(FIELD_WEIGHTS, &payload.weights)?;
    form.append_with_str(FIELD_IMPACTS, &payload.impacts)?;
    form.append_with_str(FIELD_EMAIL, &payload.email)?;
    Ok(form)
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
