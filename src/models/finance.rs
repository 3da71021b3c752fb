// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,  // Receita (+)
    Expense, // Despesa (-)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Paid,    // Liquidado
    Pending, // Pendente
}

// --- Structs ---

/// Um lançamento da conciliação bancária. Depois de criado nunca é editado
/// nem excluído; o status é definitivo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub status: TransactionStatus,

    #[serde(default)]
    pub project_id: Option<Uuid>,
}

impl Transaction {
    /// Contribuição com sinal para os totais de caixa:
    /// +amount para receita, -amount para despesa.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Só lançamentos liquidados entram nos agregados "realizados".
    pub fn is_realized(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}

/// Cards do topo da tela financeira.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    /// Receitas liquidadas (Saldo em Caixa).
    pub realized_income: Decimal,
    /// Despesas pendentes (Contas a Pagar).
    pub pending_expense: Decimal,
    /// Soma com sinal de tudo que já liquidou.
    pub realized_balance: Decimal,
    /// Saldo devedor dos contratos ativos (a receber dos projetos).
    pub receivable_balance: Decimal,
}
