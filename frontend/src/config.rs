//! Where the form sends its submissions.
//!
//! The endpoint is derived from one value, the API base URL, fixed at build
//! time through the `TOPSIS_API_BASE` environment variable. An empty base
//! means "same origin", which is the case when the page is served by the
//! backend itself. The page location is only consulted to add a hint to
//! connection errors when the page was opened straight from disk.

use common::requests::SUBMIT_PATH;

const FILE_PROTOCOL_HINT: &str = "The page was opened from a local file; open it through the server or rebuild with TOPSIS_API_BASE set.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Absolute or same-origin URL of the submission endpoint.
    pub endpoint: String,
    /// Appended to connection error messages when set.
    pub environment_hint: Option<String>,
}

impl SubmitConfig {
    pub fn new(api_base: &str) -> Self {
        Self {
            endpoint: format!("{}{}", api_base.trim_end_matches('/'), SUBMIT_PATH),
            environment_hint: None,
        }
    }

    pub fn with_environment_hint(mut self, hint: impl Into<String>) -> Self {
        self.environment_hint = Some(hint.into());
        self
    }

    /// Builds the configuration for the running page.
    pub fn from_environment() -> Self {
        let config = Self::new(option_env!("TOPSIS_API_BASE").unwrap_or_default());
        match page_protocol().as_deref() {
            Some("file:") => config.with_environment_hint(FILE_PROTOCOL_HINT),
            _ => config,
        }
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self::new("")
    }
}

fn page_protocol() -> Option<String> {
    web_sys::window()?.location().protocol().ok()
}
