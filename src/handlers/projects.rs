// src/handlers/projects.rs

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
    models::projects::{
        DailyLog, MaterialApproval, Project, ProjectFinancials, ProjectPortal, ProjectStage,
    },
};

// =============================================================================
//  ÁREA 1: PROJETOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Apartamento Leblon - Bloco A")]
    pub title: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João da Silva")]
    pub client_name: String,

    #[schema(example = "45000")]
    pub total_value: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-12-20")]
    pub deadline: NaiveDate,
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projetos",
    request_body = CreateProjectPayload,
    responses(
        (status = 201, description = "Projeto aberto no Briefing", body = Project),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let project = app_state
        .project_service
        .create_project(
            payload.title,
            payload.client_name,
            payload.total_value,
            payload.deadline,
        )
        .await;

    Ok((StatusCode::CREATED, Json(project)))
}

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projetos",
    responses(
        (status = 200, description = "Portfólio do estúdio", body = Vec<Project>)
    )
)]
pub async fn list_projects(State(app_state): State<AppState>) -> impl IntoResponse {
    let projects = app_state.project_service.list_projects().await;
    (StatusCode::OK, Json(projects))
}

// GET /api/projects/{id}
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Detalhe do projeto", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.get_project(id).await?;
    Ok((StatusCode::OK, Json(project)))
}

// DELETE /api/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 204, description = "Projeto excluído"),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.project_service.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: TRANSIÇÃO E GOVERNANÇA
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionProjectPayload {
    #[schema(example = "CONSTRUCTION")]
    pub stage: ProjectStage,
}

// POST /api/projects/{id}/transition
#[utoipa::path(
    post,
    path = "/api/projects/{id}/transition",
    tag = "Projetos",
    request_body = TransitionProjectPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Etapa atualizada", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn transition_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.set_stage(id, payload.stage).await?;
    Ok((StatusCode::OK, Json(project)))
}

// POST /api/projects/{id}/rrt
#[utoipa::path(
    post,
    path = "/api/projects/{id}/rrt",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "RRT emitida (idempotente)", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn issue_rrt(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.issue_rrt(id).await?;
    Ok((StatusCode::OK, Json(project)))
}

// POST /api/projects/{id}/milestone-charge
#[utoipa::path(
    post,
    path = "/api/projects/{id}/milestone-charge",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Cobrança lançada, saldo saturado no contrato", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn charge_milestone(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.charge_milestone(id).await?;
    Ok((StatusCode::OK, Json(project)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPayload {
    #[schema(example = 75, maximum = 100)]
    pub progress: u8,
}

// PATCH /api/projects/{id}/progress
#[utoipa::path(
    patch,
    path = "/api/projects/{id}/progress",
    tag = "Projetos",
    request_body = ProgressPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Percentual físico atualizado", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn set_progress(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProgressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state
        .project_service
        .set_progress(id, payload.progress)
        .await?;
    Ok((StatusCode::OK, Json(project)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostsPayload {
    #[schema(example = "4200")]
    pub costs: Decimal,
}

// PATCH /api/projects/{id}/costs
#[utoipa::path(
    patch,
    path = "/api/projects/{id}/costs",
    tag = "Projetos",
    request_body = CostsPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Custos operacionais atualizados", body = Project),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn record_costs(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CostsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state
        .project_service
        .record_costs(id, payload.costs)
        .await?;
    Ok((StatusCode::OK, Json(project)))
}

// GET /api/projects/{id}/financials
#[utoipa::path(
    get,
    path = "/api/projects/{id}/financials",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Percentuais derivados do contrato", body = ProjectFinancials),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn project_financials(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let financials = app_state.project_service.financials(id).await?;
    Ok((StatusCode::OK, Json(financials)))
}

// =============================================================================
//  ÁREA 3: DIÁRIO DE OBRA E CURADORIA
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Início do assentamento do piso na sala.")]
    pub content: String,

    pub image_url: Option<String>,
}

// POST /api/projects/{id}/logs
#[utoipa::path(
    post,
    path = "/api/projects/{id}/logs",
    tag = "Projetos",
    request_body = CreateLogPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 201, description = "Registro adicionado ao diário", body = DailyLog),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn add_daily_log(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let log = app_state
        .project_service
        .add_daily_log(id, payload.content, payload.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mármore Carrara")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Bancada Cozinha")]
    pub category: String,

    #[validate(length(min = 1, message = "required"))]
    pub image_url: String,
}

// POST /api/projects/{id}/materials
#[utoipa::path(
    post,
    path = "/api/projects/{id}/materials",
    tag = "Projetos",
    request_body = CreateMaterialPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 201, description = "Material enviado para curadoria", body = MaterialApproval),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn add_material(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let material = app_state
        .project_service
        .add_material(id, payload.name, payload.category, payload.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(material)))
}

// POST /api/projects/{id}/materials/{materialId}/approve
#[utoipa::path(
    post,
    path = "/api/projects/{id}/materials/{material_id}/approve",
    tag = "Projetos",
    params(
        ("id" = Uuid, Path, description = "ID do projeto"),
        ("material_id" = Uuid, Path, description = "ID do material")
    ),
    responses(
        (status = 200, description = "Material aprovado pelo cliente", body = MaterialApproval),
        (status = 404, description = "Projeto ou material não encontrados")
    )
)]
pub async fn approve_material(
    State(app_state): State<AppState>,
    Path((id, material_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let material = app_state
        .project_service
        .approve_material(id, material_id)
        .await?;
    Ok((StatusCode::OK, Json(material)))
}

// GET /api/projects/{id}/portal
#[utoipa::path(
    get,
    path = "/api/projects/{id}/portal",
    tag = "Projetos",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Portal do Cliente", body = ProjectPortal),
        (status = 404, description = "Projeto não encontrado")
    )
)]
pub async fn client_portal(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let portal = app_state.project_service.portal(id).await?;
    Ok((StatusCode::OK, Json(portal)))
}
