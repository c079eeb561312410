//! # Submission Processing
//!
//! Handler of `POST /submit`.
//!
//! ## Workflow:
//!
//! 1.  **Form**: the multipart payload is read and checked by
//!     `upload::read_submission` and `SubmissionForm::into_request`.
//! 2.  **Delivery check**: without a configured mailer the request is refused
//!     before any work is done.
//! 3.  **Ranking**: on a blocking thread, the upload (CSV or Excel) is stored
//!     under the upload directory with a name derived from its MD5 hash,
//!     ranked, and the
//!     result is written to the output directory as
//!     `result_<unix seconds>_<uuid>.csv`.
//! 4.  **Mail**: the result is sent to the submitted address as an attachment.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::submission::SubmitResponse;
use log::{info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::services::topsis::{rank_table, read_input, write_result};
use crate::state::AppState;

use super::upload::{read_submission, SubmitRequest};
use super::SubmitError;

/// A ranked result, written to disk and ready to be mailed.
struct RankedResult {
    path: PathBuf,
    file_name: String,
    contents: Vec<u8>,
}

/// Actix web handler for `POST /submit`.
///
/// - `200 OK` with `{"success": true, "message": ..}` once the result is mailed.
/// - Otherwise the status of the `SubmitError` with `{"error": ..}`.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match submit(&state, payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            warn!("Submission rejected: {}", e);
            e.error_response()
        }
    }
}

async fn submit(state: &AppState, payload: Multipart) -> Result<SubmitResponse, SubmitError> {
    let form = read_submission(payload, state.config.max_upload_bytes).await?;
    let request = form.into_request()?;

    let mailer = state.mailer.as_ref().ok_or(SubmitError::MailNotConfigured)?;

    let email = request.email.clone();
    let recipient = request.recipient.clone();
    let config = state.config.clone();
    let result = web::block(move || rank_upload(&config, request)).await??;
    info!(
        "Ranked upload into {} ({} bytes)",
        result.path.display(),
        result.contents.len()
    );

    mailer
        .send_result(recipient, &result.file_name, result.contents)
        .await?;
    info!("Result {} sent to {}", result.file_name, email);

    Ok(SubmitResponse::succeeded(format!(
        "Result file has been sent to {}.",
        email
    )))
}

fn rank_upload(config: &ServerConfig, request: SubmitRequest) -> Result<RankedResult, SubmitError> {
    fs::create_dir_all(&config.upload_dir)?;
    fs::create_dir_all(&config.output_dir)?;

    let digest = format!("{:x}", md5::compute(&request.file.bytes));
    let upload_path = config
        .upload_dir
        .join(format!("{}.{}", digest, request.format.extension()));
    fs::write(&upload_path, &request.file.bytes)?;

    let table = read_input(request.format, &request.file.bytes)?;
    let ranking = rank_table(&table, &request.criteria)?;

    let mut contents = Vec::new();
    write_result(&table, &ranking, &mut contents)?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let file_name = format!("result_{}_{}.csv", stamp, Uuid::new_v4().simple());
    let path = config.output_dir.join(&file_name);
    fs::write(&path, &contents)?;

    Ok(RankedResult {
        path,
        file_name,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::services::mailer::Mailer;
    use crate::services::submit::configure_routes;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use std::sync::Arc;
    use tempfile::TempDir;

    const BOUNDARY: &str = "topsis-test-boundary";
    const MATRIX: &str = "Model,Price,Storage,Camera\nM1,250,16,12\nM2,200,16,8\nM3,300,32,16\n";

    struct Part<'a> {
        name: &'a str,
        filename: Option<&'a str>,
        value: &'a str,
    }

    fn text(name: &'static str, value: &'static str) -> Part<'static> {
        Part {
            name,
            filename: None,
            value,
        }
    }

    fn file(filename: &'static str, value: &'static str) -> Part<'static> {
        Part {
            name: "file",
            filename: Some(filename),
            value,
        }
    }

    fn multipart_body(parts: &[Part]) -> String {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match part.filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                    part.name, filename
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )),
            }
            body.push_str(part.value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    struct Fixture {
        dir: TempDir,
        state: AppState,
    }

    impl Fixture {
        fn new(with_mailer: bool) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut config = ServerConfig::from_lookup(|_| None);
            config.upload_dir = dir.path().join("uploads");
            config.output_dir = dir.path().join("outputs");
            let mail = MailConfig {
                from_address: "noreply@topsis.local".to_string(),
                smtp: None,
                outbox_dir: with_mailer.then(|| dir.path().join("outbox")),
            };
            if with_mailer {
                fs::create_dir_all(dir.path().join("outbox")).unwrap();
            }
            let state = AppState {
                config: Arc::new(config),
                mailer: Mailer::from_config(&mail).unwrap().map(Arc::new),
            };
            Self { dir, state }
        }

        fn count(&self, sub: &str) -> usize {
            fs::read_dir(self.dir.path().join(sub))
                .map(|entries| entries.count())
                .unwrap_or(0)
        }
    }

    async fn post(state: AppState, parts: &[Part<'_>]) -> (StatusCode, SubmitResponse) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/submit")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: SubmitResponse = test::read_body_json(resp).await;
        (status, body)
    }

    fn valid_parts() -> Vec<Part<'static>> {
        vec![
            file("phones.csv", MATRIX),
            text("weights", "1,1,1"),
            text("impacts", "-,+,+"),
            text("email", "user@example.com"),
        ]
    }

    #[actix_web::test]
    async fn ranks_and_mails_a_valid_submission() {
        let fixture = Fixture::new(true);
        let (status, body) = post(fixture.state.clone(), &valid_parts()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.success, Some(true));
        assert_eq!(
            body.message.as_deref(),
            Some("Result file has been sent to user@example.com.")
        );
        assert_eq!(fixture.count("uploads"), 1);
        assert_eq!(fixture.count("outputs"), 1);
        assert_eq!(fixture.count("outbox"), 1);
    }

    #[actix_web::test]
    async fn missing_file_part_is_reported() {
        let fixture = Fixture::new(true);
        let parts = vec![
            text("weights", "1,1,1"),
            text("impacts", "-,+,+"),
            text("email", "user@example.com"),
        ];

        let (status, body) = post(fixture.state.clone(), &parts).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("No file part"));
    }

    #[actix_web::test]
    async fn invalid_impacts_use_the_form_message() {
        let fixture = Fixture::new(true);
        let mut parts = valid_parts();
        parts[2] = text("impacts", "-,+,*");

        let (status, body) = post(fixture.state.clone(), &parts).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("Impacts must be either + or -"));
        assert_eq!(fixture.count("outputs"), 0);
    }

    #[actix_web::test]
    async fn undeliverable_address_is_rejected_before_ranking() {
        let fixture = Fixture::new(true);
        let mut parts = valid_parts();
        parts[3] = text("email", "a,b@c.de");

        let (status, body) = post(fixture.state.clone(), &parts).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error.as_deref(),
            Some("Please enter a valid email address.")
        );
        assert_eq!(fixture.count("uploads"), 0);
        assert_eq!(fixture.count("outputs"), 0);
        assert_eq!(fixture.count("outbox"), 0);
    }

    #[actix_web::test]
    async fn unsupported_extension_is_rejected() {
        let fixture = Fixture::new(true);
        let mut parts = valid_parts();
        parts[0] = file("phones.txt", MATRIX);

        let (status, body) = post(fixture.state.clone(), &parts).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error.as_deref(),
            Some("The file must be a .csv, .xlsx or .xls file")
        );
    }

    #[actix_web::test]
    async fn criteria_not_matching_columns_is_unprocessable() {
        let fixture = Fixture::new(true);
        let mut parts = valid_parts();
        parts[1] = text("weights", "1,1");
        parts[2] = text("impacts", "+,+");

        let (status, body) = post(fixture.state.clone(), &parts).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error.as_deref(),
            Some("Number of weights (2) does not match number of numeric columns (3).")
        );
        assert_eq!(fixture.count("outbox"), 0);
    }

    #[actix_web::test]
    async fn refuses_work_without_mail_delivery() {
        let fixture = Fixture::new(false);

        let (status, body) = post(fixture.state.clone(), &valid_parts()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body.error.as_deref(),
            Some("Email delivery is not configured on the server.")
        );
        assert_eq!(fixture.count("uploads"), 0);
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected() {
        let mut fixture = Fixture::new(true);
        let mut config = (*fixture.state.config).clone();
        config.max_upload_bytes = 16;
        fixture.state.config = Arc::new(config);

        let (status, body) = post(fixture.state.clone(), &valid_parts()).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body.error.as_deref(),
            Some("The upload exceeds the limit of 16 bytes")
        );
    }
}
