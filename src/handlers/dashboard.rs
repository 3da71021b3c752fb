// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    config::AppState,
    models::dashboard::{DashboardSummary, RevenueChartEntry, StageCountEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo operacional e financeiro", body = DashboardSummary)
    )
)]
pub async fn get_summary(State(app_state): State<AppState>) -> impl IntoResponse {
    let summary = app_state.dashboard_service.summary().await;
    (StatusCode::OK, Json(summary))
}

// GET /api/dashboard/lead-funnel
#[utoipa::path(
    get,
    path = "/api/dashboard/lead-funnel",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagem por etapa do funil (inclui etapas zeradas)", body = Vec<StageCountEntry>)
    )
)]
pub async fn get_lead_funnel(State(app_state): State<AppState>) -> impl IntoResponse {
    let funnel = app_state.dashboard_service.lead_funnel().await;
    (StatusCode::OK, Json(funnel))
}

// GET /api/dashboard/project-flow
#[utoipa::path(
    get,
    path = "/api/dashboard/project-flow",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Fluxo operacional do estúdio", body = Vec<StageCountEntry>)
    )
)]
pub async fn get_project_flow(State(app_state): State<AppState>) -> impl IntoResponse {
    let flow = app_state.dashboard_service.project_flow().await;
    (StatusCode::OK, Json(flow))
}

// GET /api/dashboard/revenue-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita realizada por mês", body = Vec<RevenueChartEntry>)
    )
)]
pub async fn get_revenue_chart(State(app_state): State<AppState>) -> impl IntoResponse {
    let chart = app_state.dashboard_service.revenue_chart().await;
    (StatusCode::OK, Json(chart))
}
