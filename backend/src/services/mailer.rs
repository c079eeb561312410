//! Delivery of result files by email.
//!
//! [`Mailer`] wraps one of two `lettre` transports:
//! - an async SMTP relay (STARTTLS, optional credentials) when `SMTP_HOST`
//!   is set;
//! - an async file transport writing one `.eml` file per message into
//!   `MAIL_OUTBOX_DIR`, for local runs without a relay.
//!
//! With neither configured, [`Mailer::from_config`] returns `None` and the
//! submit endpoint refuses work it could not deliver.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;
use thiserror::Error;

use crate::config::MailConfig;

pub const RESULT_SUBJECT: &str = "TOPSIS Analysis Results";
pub const RESULT_BODY: &str = "Please find attached the results of your TOPSIS analysis.";

#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Outbox error: {0}")]
    Outbox(#[from] lettre::transport::file::Error),

    /// The sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Outbox(AsyncFileTransport<Tokio1Executor>),
}

pub struct Mailer {
    from: Mailbox,
    transport: Transport,
}

impl Mailer {
    /// Builds the mailer described by `config`, or `None` when mail is not
    /// configured at all.
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>, MailError> {
        let from: Mailbox = config.from_address.parse()?;

        if let Some(smtp) = &config.smtp {
            let mut builder =
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?.port(smtp.port);
            if let (Some(user), Some(pass)) = (&smtp.user, &smtp.password) {
                builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
            }
            return Ok(Some(Self {
                from,
                transport: Transport::Smtp(builder.build()),
            }));
        }

        Ok(config.outbox_dir.as_ref().map(|dir| Self {
            from,
            transport: Transport::Outbox(AsyncFileTransport::<Tokio1Executor>::new(dir)),
        }))
    }

    pub fn kind(&self) -> &'static str {
        match self.transport {
            Transport::Smtp(_) => "smtp",
            Transport::Outbox(_) => "outbox",
        }
    }

    /// Sends `contents` to `to` as a CSV attachment named `file_name`.
    pub async fn send_result(&self, to: Mailbox, file_name: &str, contents: Vec<u8>) -> Result<(), MailError> {
        let message = result_message(&self.from, to.clone(), file_name, contents)?;

        match &self.transport {
            Transport::Smtp(transport) => {
                transport.send(message).await?;
            }
            Transport::Outbox(transport) => {
                let id = transport.send(message).await?;
                info!("Result mail for {} written to outbox as {}", to, id);
            }
        }
        Ok(())
    }
}

fn result_message(from: &Mailbox, to: Mailbox, file_name: &str, contents: Vec<u8>) -> Result<Message, MailError> {
    let csv = ContentType::parse("text/csv").map_err(|e| MailError::Build(e.to_string()))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(RESULT_SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(RESULT_BODY.to_string()))
                .singlepart(Attachment::new(file_name.to_string()).body(contents, csv)),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn mail_config(outbox: Option<PathBuf>) -> MailConfig {
        MailConfig {
            from_address: "noreply@topsis.local".to_string(),
            smtp: None,
            outbox_dir: outbox,
        }
    }

    #[test]
    fn no_transport_configured_yields_none() {
        assert!(Mailer::from_config(&mail_config(None)).unwrap().is_none());
    }

    #[test]
    fn invalid_sender_is_rejected() {
        let mut config = mail_config(None);
        config.from_address = "not-an-email".to_string();
        let err = Mailer::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[test]
    fn result_message_carries_subject_and_attachment() {
        let from: Mailbox = "noreply@topsis.local".parse().unwrap();
        let message = result_message(
            &from,
            "user@example.com".parse().unwrap(),
            "result.csv",
            b"A,B\n1,2\n".to_vec(),
        )
        .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: TOPSIS Analysis Results"));
        assert!(raw.contains("filename=\"result.csv\""));
    }

    #[actix_web::test]
    async fn outbox_writes_one_message_per_result() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Mailer::from_config(&mail_config(Some(dir.path().to_path_buf())))
            .unwrap()
            .unwrap();
        assert_eq!(mailer.kind(), "outbox");

        mailer
            .send_result(
                "user@example.com".parse().unwrap(),
                "result.csv",
                b"A,B\n1,2\n".to_vec(),
            )
            .await
            .unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);
        let raw = std::fs::read_to_string(&written[0]).unwrap();
        assert!(raw.contains("To: user@example.com"));
    }
}
