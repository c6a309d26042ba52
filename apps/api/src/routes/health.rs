use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus what the knowledge loader found, including any files that failed.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let kb = &state.knowledge;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careguide-api",
        "knowledge": {
            "dementia": kb.dementia.len(),
            "caregiver": kb.caregiver.len(),
            "services": kb.services.len(),
            "hospice": kb.hospice.len(),
            "load_errors": kb.load_errors,
        },
        "ai_enabled": state.llm.is_some(),
        "email_enabled": state.mailer.is_some(),
    }))
}
