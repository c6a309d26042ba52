use std::sync::Arc;

use crate::advisor::session::SessionStore;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::TextGenerator;
use crate::mailer::MailSender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub knowledge: Arc<KnowledgeBase>,
    /// `None` when GOOGLE_API_KEY is unset. Flows fall back to a fixed notice.
    pub llm: Option<Arc<dyn TextGenerator>>,
    /// `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn MailSender>>,
    pub sessions: SessionStore,
}
