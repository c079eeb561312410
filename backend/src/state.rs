//! Shared application state, injected into the Actix app as `web::Data`.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` when neither SMTP nor an outbox is configured; submissions are
    /// then refused.
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub fn new(config: ServerConfig, mailer: Option<Mailer>) -> Self {
        Self {
            config: Arc::new(config),
            mailer: mailer.map(Arc::new),
        }
    }
}
