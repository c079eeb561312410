//! The submission endpoint of the TOPSIS form.
//!
//! - `POST /submit`: multipart upload with a `file` part (the decision
//!   matrix as CSV or Excel) and the text parts `weights`, `impacts` and `email`. The
//!   form is checked with the same rules as the browser, the matrix is
//!   ranked on a blocking thread, and the result CSV is mailed to `email`.
//!   Every reply is a JSON `SubmitResponse`: `{"success": true, "message": ..}`
//!   on success, `{"error": ..}` otherwise.

use actix_web::web::{post, resource};
use actix_web::Resource;
use common::requests::SUBMIT_PATH;

mod error;
mod process;
mod upload;

pub use error::SubmitError;

/// Configures and returns the Actix resource for the submission route.
pub fn configure_routes() -> Resource {
    resource(SUBMIT_PATH).route(post().to(process::process))
}
