// src/handlers/documents.rs

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDocumentPayload {
    #[validate(length(min = 1, message = "required"))]
    pub client_name: String,

    /// Corpo da proposta (normalmente o texto gerado em /api/ai/proposal).
    #[validate(length(min = 1, message = "required"))]
    pub body: String,

    pub budget: Option<Decimal>,

    /// Quando o projeto já existe, o PDF sai com QR code do portal.
    pub project_id: Option<Uuid>,
}

// POST /api/documents/proposal -> application/pdf
pub async fn generate_proposal_document(
    State(app_state): State<AppState>,
    Json(payload): Json<ProposalDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O QR só entra se o projeto de fato existir.
    let portal_url = match payload.project_id {
        Some(id) => {
            let project = app_state.project_service.get_project(id).await?;
            Some(format!("https://spazio.app/portal/{}", project.id))
        }
        None => None,
    };

    let pdf = app_state.document_service.generate_proposal_pdf(
        &payload.client_name,
        &payload.body,
        payload.budget,
        portal_url.as_deref(),
    )?;

    let filename = format!("proposta-{}.pdf", payload.client_name.replace(' ', "-"));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    ))
}
