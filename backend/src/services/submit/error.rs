use actix_multipart::MultipartError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::criteria::CriteriaError;
use common::model::submission::SubmitResponse;
use common::validation::ValidationError;
use thiserror::Error;

use crate::services::mailer::MailError;
use crate::services::topsis::RankingError;

/// Everything that can end a submission early. The `Display` text is the
/// `error` field of the JSON reply.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Stored as text: the error must be `Send` to leave `web::block`.
    #[error("Invalid multipart payload: {0}")]
    Multipart(String),

    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Missing form data")]
    MissingFormData,

    #[error("The upload exceeds the limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Criteria(#[from] CriteriaError),

    #[error("The file must be a .csv, .xlsx or .xls file")]
    UnsupportedFormat,

    #[error("{0}")]
    Ranking(#[from] RankingError),

    #[error("Email delivery is not configured on the server.")]
    MailNotConfigured,

    #[error("Failed to send email: {0}")]
    Mail(#[from] MailError),

    #[error("Failed to store files: {0}")]
    Io(#[from] std::io::Error),

    #[error("The ranking task was interrupted")]
    Interrupted(#[from] BlockingError),
}

impl From<MultipartError> for SubmitError {
    fn from(err: MultipartError) -> Self {
        SubmitError::Multipart(err.to_string())
    }
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmitError::Multipart(_)
            | SubmitError::NoFilePart
            | SubmitError::NoSelectedFile
            | SubmitError::MissingFormData
            | SubmitError::Validation(_)
            | SubmitError::Criteria(_)
            | SubmitError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            SubmitError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SubmitError::Ranking(RankingError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            SubmitError::Ranking(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SubmitError::MailNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            SubmitError::Mail(_) | SubmitError::Io(_) | SubmitError::Interrupted(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubmitResponse::failed(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_mistakes_are_bad_requests() {
        for err in [
            SubmitError::NoFilePart,
            SubmitError::MissingFormData,
            SubmitError::Validation(ValidationError::InvalidEmail),
            SubmitError::UnsupportedFormat,
            SubmitError::from(MultipartError::Incomplete),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn ranking_failures_are_unprocessable() {
        let err = SubmitError::from(RankingError::TooFewCriteria { found: 1 });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_string(),
            "Input file must contain at least 2 numeric columns."
        );
    }

    #[test]
    fn errors_can_leave_a_blocking_task() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<SubmitError>();
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = SubmitError::from(ValidationError::CountMismatch);
        assert_eq!(
            err.to_string(),
            "Number of weights and impacts must be the same."
        );
    }
}
