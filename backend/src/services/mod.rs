pub mod mailer;
pub mod submit;
pub mod topsis;
