//! Axum route handlers for the advisory API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::advisor::prompts::{build_advisor_prompt, build_hospice_prompt, HOSPICE_SYSTEM};
use crate::advisor::reply::generate_or_notice;
use crate::advisor::services::{build_prescription, Prescription};
use crate::advisor::session::Turn;
use crate::advisor::subsidy::{estimate_subsidy, IncomeType, SubsidyEstimate};
use crate::advisor::CHRONIC_CONDITIONS;
use crate::errors::AppError;
use crate::knowledge::{retrieve_snippets, score_triggers, KnowledgeSnippet, MatchResult};
use crate::llm_client::prompts::ADVISOR_SYSTEM;
use crate::mailer::{format_answer_email, MailError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
    pub situation: String,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AdviseResponse {
    pub dementia_matches: Vec<MatchResult>,
    pub caregiver_matches: Vec<MatchResult>,
    pub ai_reply: String,
    pub ai_available: bool,
    pub prescription: Option<Prescription>,
}

#[derive(Debug, Deserialize)]
pub struct HospiceAskRequest {
    pub question: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct HospiceAskResponse {
    pub session_id: Uuid,
    pub snippets: Vec<KnowledgeSnippet>,
    pub reply: String,
    pub ai_available: bool,
    pub history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct SessionHistoryResponse {
    pub session_id: Uuid,
    pub history: Vec<Turn>,
}

#[derive(Debug, Deserialize)]
pub struct SubsidyQuery {
    pub cms_level: u8,
    #[serde(default)]
    pub income_type: IncomeType,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub to: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub sent: bool,
    pub subject: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/advise
///
/// Scores the situation against both scenario knowledge bases, asks the LLM for advice,
/// and attaches service cards for the best dementia match.
pub async fn handle_advise(
    State(state): State<AppState>,
    Json(request): Json<AdviseRequest>,
) -> Result<Json<AdviseResponse>, AppError> {
    if request.situation.trim().is_empty() {
        return Err(AppError::Validation("situation cannot be empty".to_string()));
    }

    let kb = &state.knowledge;
    let dementia_matches = score_triggers(&request.situation, &kb.dementia);
    let caregiver_matches = score_triggers(&request.situation, &kb.caregiver);
    info!(
        "Advice request: {} dementia / {} caregiver matches",
        dementia_matches.len(),
        caregiver_matches.len()
    );

    let prompt = build_advisor_prompt(
        &request.situation,
        &request.chronic_conditions,
        &dementia_matches,
        &caregiver_matches,
    );
    let reply = generate_or_notice(state.llm.as_deref(), &prompt, ADVISOR_SYSTEM).await;

    let prescription = build_prescription(&dementia_matches, &kb.services);

    Ok(Json(AdviseResponse {
        dementia_matches,
        caregiver_matches,
        ai_reply: reply.text,
        ai_available: reply.available,
        prescription,
    }))
}

/// POST /api/v1/hospice/ask
///
/// Retrieval-augmented hospice Q&A. Successful answers are appended to the session's
/// bounded history and fed back into later prompts.
pub async fn handle_hospice_ask(
    State(state): State<AppState>,
    Json(request): Json<HospiceAskRequest>,
) -> Result<Json<HospiceAskResponse>, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    let prior = state.sessions.history(session_id).unwrap_or_default();

    // untrimmed query, as sent
    let snippets = retrieve_snippets(&request.question, &state.knowledge.hospice);
    info!(
        "Hospice question in session {session_id}: {} snippets retrieved",
        snippets.len()
    );

    let prompt = build_hospice_prompt(question, &snippets, &prior);
    let reply = generate_or_notice(state.llm.as_deref(), &prompt, HOSPICE_SYSTEM).await;

    // notices are not conversation turns
    let history = if reply.available {
        state.sessions.record(
            session_id,
            Turn {
                question: question.to_string(),
                answer: reply.text.clone(),
                asked_at: Utc::now(),
            },
        )
    } else {
        prior
    };

    Ok(Json(HospiceAskResponse {
        session_id,
        snippets,
        reply: reply.text,
        ai_available: reply.available,
        history,
    }))
}

/// GET /api/v1/hospice/sessions/:id
pub async fn handle_session_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionHistoryResponse>, AppError> {
    let history = state
        .sessions
        .history(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    Ok(Json(SessionHistoryResponse {
        session_id,
        history,
    }))
}

/// GET /api/v1/subsidy?cms_level=7&income_type=general
pub async fn handle_subsidy(
    Query(params): Query<SubsidyQuery>,
) -> Result<Json<SubsidyEstimate>, AppError> {
    Ok(Json(estimate_subsidy(params.cms_level, params.income_type)?))
}

/// GET /api/v1/chronic-conditions
pub async fn handle_chronic_conditions() -> Json<Vec<&'static str>> {
    Json(CHRONIC_CONDITIONS.to_vec())
}

/// POST /api/v1/email
///
/// Sends a question/answer pair to the given address using the fixed template.
pub async fn handle_send_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    if request.question.trim().is_empty() || request.answer.trim().is_empty() {
        return Err(AppError::Validation(
            "question and answer cannot be empty".to_string(),
        ));
    }

    let mailer = state.mailer.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Email delivery is not configured".to_string())
    })?;

    let email = format_answer_email(&request.question, &request.answer);
    mailer
        .send(&request.to, &email)
        .await
        .map_err(|e| match e {
            err @ MailError::Address { .. } => AppError::Validation(err.to_string()),
            other => AppError::Mail(other.to_string()),
        })?;

    Ok(Json(EmailResponse {
        sent: true,
        subject: email.subject,
    }))
}
