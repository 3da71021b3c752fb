// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{Lead, LeadStatus, LeadTemperature, LossReason, Task},
    services::crm_service::LeadChanges,
};

// =============================================================================
//  ÁREA 1: LEADS (CRUD + TRANSIÇÃO)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Marcos Vinicius")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "marcos@email.com")]
    pub email: Option<String>,

    #[schema(example = "11988887777")]
    pub phone: Option<String>,

    #[schema(example = "Instagram")]
    pub source: Option<String>,

    pub notes: Option<String>,

    #[schema(example = "85000")]
    pub budget: Option<Decimal>,

    pub temperature: Option<LeadTemperature>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-06-01")]
    pub next_action_date: Option<NaiveDate>,
}

// POST /api/crm/leads
#[utoipa::path(
    post,
    path = "/api/crm/leads",
    tag = "CRM",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead criado na Prospecção", body = Lead),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state
        .crm_service
        .create_lead(
            payload.name,
            payload.email.unwrap_or_default(),
            payload.phone.unwrap_or_default(),
            payload.source.unwrap_or_else(|| "Instagram".to_string()),
            payload.notes.unwrap_or_default(),
            payload.budget,
            payload.temperature,
            payload.next_action_date,
        )
        .await;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/crm/leads
#[utoipa::path(
    get,
    path = "/api/crm/leads",
    tag = "CRM",
    responses(
        (status = 200, description = "Leads ativos do funil", body = Vec<Lead>)
    )
)]
pub async fn list_leads(State(app_state): State<AppState>) -> impl IntoResponse {
    let leads = app_state.crm_service.list_leads().await;
    (StatusCode::OK, Json(leads))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub budget: Option<Decimal>,
    pub temperature: Option<LeadTemperature>,
    #[schema(value_type = Option<String>, format = Date)]
    pub next_action_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

// PUT /api/crm/leads/{id}
#[utoipa::path(
    put,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    request_body = UpdateLeadPayload,
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 200, description = "Lead atualizado", body = Lead),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state
        .crm_service
        .update_lead(
            id,
            LeadChanges {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                source: payload.source,
                notes: payload.notes,
                budget: payload.budget,
                temperature: payload.temperature,
                next_action_date: payload.next_action_date,
                address: payload.address,
                tax_id: payload.tax_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionLeadPayload {
    #[schema(example = "BRIEFING")]
    pub status: LeadStatus,
}

// POST /api/crm/leads/{id}/transition
//
// O gatilho pode ser drag-and-drop, botão ou teclado; o backend só conhece
// a intenção de transição.
#[utoipa::path(
    post,
    path = "/api/crm/leads/{id}/transition",
    tag = "CRM",
    request_body = TransitionLeadPayload,
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 200, description = "Lead movido de coluna", body = Lead),
        (status = 400, description = "Perda exige o fluxo com motivo"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn transition_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.crm_service.set_status(id, payload.status).await?;
    Ok((StatusCode::OK, Json(lead)))
}

// =============================================================================
//  ÁREA 2: FLUXO DE PERDA
// =============================================================================

// POST /api/crm/leads/{id}/loss-request
#[utoipa::path(
    post,
    path = "/api/crm/leads/{id}/loss-request",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Fluxo de perda aberto, nada mutado"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn request_loss(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.request_loss(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmLossPayload {
    #[schema(example = "PRICE_TOO_HIGH")]
    pub reason: LossReason,
}

// POST /api/crm/leads/{id}/loss-confirm
#[utoipa::path(
    post,
    path = "/api/crm/leads/{id}/loss-confirm",
    tag = "CRM",
    request_body = ConfirmLossPayload,
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Lead removido do funil"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn confirm_loss(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmLossPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.confirm_loss(id, payload.reason).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/crm/loss-cancel
#[utoipa::path(
    post,
    path = "/api/crm/loss-cancel",
    tag = "CRM",
    responses(
        (status = 204, description = "Perda pendente descartada")
    )
)]
pub async fn cancel_loss(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state.crm_service.cancel_loss().await;
    StatusCode::NO_CONTENT
}

// =============================================================================
//  ÁREA 3: TAREFAS DO LEAD
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Enviar portfólio de coberturas luxo")]
    pub description: String,
}

// POST /api/crm/leads/{id}/tasks
#[utoipa::path(
    post,
    path = "/api/crm/leads/{id}/tasks",
    tag = "CRM",
    request_body = CreateTaskPayload,
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn add_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state.crm_service.add_task(id, payload.description).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// PATCH /api/crm/leads/{id}/tasks/{taskId}
#[utoipa::path(
    patch,
    path = "/api/crm/leads/{id}/tasks/{task_id}",
    tag = "CRM",
    params(
        ("id" = Uuid, Path, description = "ID do lead"),
        ("task_id" = Uuid, Path, description = "ID da tarefa")
    ),
    responses(
        (status = 200, description = "Tarefa alternada", body = Task),
        (status = 404, description = "Lead ou tarefa não encontrados")
    )
)]
pub async fn toggle_task(
    State(app_state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.crm_service.toggle_task(id, task_id).await?;
    Ok((StatusCode::OK, Json(task)))
}

// DELETE /api/crm/leads/{id}/tasks/{taskId}
#[utoipa::path(
    delete,
    path = "/api/crm/leads/{id}/tasks/{task_id}",
    tag = "CRM",
    params(
        ("id" = Uuid, Path, description = "ID do lead"),
        ("task_id" = Uuid, Path, description = "ID da tarefa")
    ),
    responses(
        (status = 204, description = "Tarefa removida"),
        (status = 404, description = "Lead ou tarefa não encontrados")
    )
)]
pub async fn remove_task(
    State(app_state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.remove_task(id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 4: FOLLOW-UP COM IA
// =============================================================================

// POST /api/crm/leads/{id}/follow-up
//
// Gera a mensagem de WhatsApp para o estágio atual do lead.
pub async fn generate_follow_up(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.crm_service.list_leads().await;
    let lead = leads
        .into_iter()
        .find(|l| l.id == id)
        .ok_or(AppError::LeadNotFound)?;

    let message = app_state
        .ai_service
        .generate_follow_up(&lead.name, lead.status.label())
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "message": message }))))
}
