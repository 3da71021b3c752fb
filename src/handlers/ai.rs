// src/handlers/ai.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, services::ai_service::BriefingAnalysis};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BriefingPayload {
    #[validate(length(min = 1, message = "required"))]
    pub text: String,
}

// POST /api/ai/briefing
#[utoipa::path(
    post,
    path = "/api/ai/briefing",
    tag = "IA",
    request_body = BriefingPayload,
    responses(
        (status = 200, description = "Análise estruturada do briefing", body = BriefingAnalysis),
        (status = 502, description = "Colaborador de IA indisponível")
    )
)]
pub async fn analyze_briefing(
    State(app_state): State<AppState>,
    Json(payload): Json<BriefingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let analysis = app_state.ai_service.analyze_briefing(&payload.text).await?;
    Ok((StatusCode::OK, Json(analysis)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPayload {
    #[validate(length(min = 1, message = "required"))]
    pub client_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub notes: String,
    pub budget: Option<Decimal>,
}

// POST /api/ai/proposal
#[utoipa::path(
    post,
    path = "/api/ai/proposal",
    tag = "IA",
    request_body = ProposalPayload,
    responses(
        (status = 200, description = "Proposta comercial gerada"),
        (status = 502, description = "Colaborador de IA indisponível")
    )
)]
pub async fn generate_proposal(
    State(app_state): State<AppState>,
    Json(payload): Json<ProposalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let proposal = app_state
        .ai_service
        .generate_proposal(&payload.client_name, &payload.notes, payload.budget)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "proposal": proposal }))))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormsPayload {
    // Texto normativo colado pelo arquiteto (plano diretor, código de obras).
    #[validate(length(min = 1, message = "required"))]
    pub context: String,
    #[validate(length(min = 1, message = "required"))]
    pub question: String,
}

// POST /api/ai/norms
#[utoipa::path(
    post,
    path = "/api/ai/norms",
    tag = "IA",
    request_body = NormsPayload,
    responses(
        (status = 200, description = "Parecer técnico sobre o texto normativo"),
        (status = 502, description = "Colaborador de IA indisponível")
    )
)]
pub async fn analyze_norms(
    State(app_state): State<AppState>,
    Json(payload): Json<NormsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let answer = app_state
        .ai_service
        .analyze_regulatory(&payload.context, &payload.question)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "answer": answer }))))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodboardPayload {
    #[validate(length(min = 1, message = "required"))]
    pub prompt: String,
}

// POST /api/ai/moodboard
#[utoipa::path(
    post,
    path = "/api/ai/moodboard",
    tag = "IA",
    request_body = MoodboardPayload,
    responses(
        (status = 200, description = "Moodboard como data URL base64 (imageUrl = null quando o modelo não devolveu imagem)"),
        (status = 502, description = "Colaborador de IA indisponível")
    )
)]
pub async fn generate_moodboard(
    State(app_state): State<AppState>,
    Json(payload): Json<MoodboardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let image_url = app_state.ai_service.generate_moodboard(&payload.prompt).await?;
    Ok((StatusCode::OK, Json(json!({ "imageUrl": image_url }))))
}
