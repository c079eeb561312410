//! Wire constants of the `/submit` endpoint, shared by the form and the server.

/// Path of the submission endpoint, relative to the API base.
pub const SUBMIT_PATH: &str = "/submit";

/// Multipart field carrying the decision matrix file.
pub const FIELD_FILE: &str = "file";
/// Multipart field carrying the raw weights text.
pub const FIELD_WEIGHTS: &str = "weights";
/// Multipart field carrying the raw impacts text.
pub const FIELD_IMPACTS: &str = "impacts";
/// Multipart field carrying the destination address.
pub const FIELD_EMAIL: &str = "email";
