// src/handlers/finance.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::finance::{FinanceSummary, Transaction, TransactionKind, TransactionStatus},
};

fn validate_amount(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if *amount <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("positive_amount");
        err.message = Some("O valor do lançamento deve ser positivo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    #[serde(rename = "type")]
    #[schema(example = "INCOME")]
    pub kind: TransactionKind,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Projeto")]
    pub category: String,

    #[validate(custom(function = "validate_amount"))]
    #[schema(example = "8500")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Primeira parcela - Apt Ipanema")]
    pub description: String,

    // Lançamentos manuais entram como liquidados por padrão.
    pub status: Option<TransactionStatus>,

    pub project_id: Option<Uuid>,
}

// POST /api/finance/transactions
#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Lançamento registrado", body = Transaction),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .create_transaction(
            payload.kind,
            payload.category,
            payload.amount,
            payload.date,
            payload.description,
            payload.status.unwrap_or(TransactionStatus::Paid),
            payload.project_id,
        )
        .await;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/finance/transactions
#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Conciliação bancária", body = Vec<Transaction>)
    )
)]
pub async fn list_transactions(State(app_state): State<AppState>) -> impl IntoResponse {
    let transactions = app_state.finance_service.list_transactions().await;
    (StatusCode::OK, Json(transactions))
}

// GET /api/finance/summary
#[utoipa::path(
    get,
    path = "/api/finance/summary",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Cards do topo da tela financeira", body = FinanceSummary)
    )
)]
pub async fn summary(State(app_state): State<AppState>) -> impl IntoResponse {
    let summary = app_state.finance_service.summary().await;
    (StatusCode::OK, Json(summary))
}
