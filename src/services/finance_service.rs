// src/services/finance_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    models::finance::{FinanceSummary, Transaction, TransactionKind, TransactionStatus},
    models::projects::ProjectStage,
    store::{ProjectStore, TransactionStore},
};

/// Conciliação bancária do estúdio. Lançamentos são imutáveis depois de
/// criados; os agregados são recalculados em cima do snapshot a cada
/// consulta.
#[derive(Clone)]
pub struct FinanceService {
    store: TransactionStore,
    projects: ProjectStore,
}

impl FinanceService {
    pub fn new(store: TransactionStore, projects: ProjectStore) -> Self {
        Self { store, projects }
    }

    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.store.snapshot().await
    }

    pub async fn create_transaction(
        &self,
        kind: TransactionKind,
        category: String,
        amount: Decimal,
        date: NaiveDate,
        description: String,
        status: TransactionStatus,
        project_id: Option<Uuid>,
    ) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            kind,
            category,
            amount,
            date,
            description,
            status,
            project_id,
        };

        let mut transactions = self.store.snapshot().await;
        transactions.insert(0, transaction.clone());
        self.store.replace_all(transactions).await;
        transaction
    }

    pub async fn summary(&self) -> FinanceSummary {
        let transactions = self.store.snapshot().await;
        let projects = self.projects.snapshot().await;

        let realized_income = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income && t.is_realized())
            .map(|t| t.amount)
            .sum();

        let pending_expense = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.status == TransactionStatus::Pending)
            .map(|t| t.amount)
            .sum();

        // Só o que já liquidou entra no saldo realizado, com sinal.
        let realized_balance = transactions
            .iter()
            .filter(|t| t.is_realized())
            .map(|t| t.signed_amount())
            .sum();

        // Saldo devedor dos contratos que ainda estão rodando.
        let receivable_balance = projects
            .iter()
            .filter(|p| p.stage != ProjectStage::Completed)
            .map(|p| p.total_value - p.paid_value)
            .sum();

        FinanceSummary {
            realized_income,
            pending_expense,
            realized_balance,
            receivable_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::tests::temp_store;
    use chrono::Utc;

    async fn empty_service() -> FinanceService {
        let blob = temp_store();
        // Esvazia os dois datasets de seed para o teste controlar tudo.
        let transactions = TransactionStore::open(blob.clone()).await;
        transactions.replace_all(Vec::new()).await;
        let projects = ProjectStore::open(blob).await;
        projects.replace_all(Vec::new()).await;
        FinanceService::new(transactions, projects)
    }

    #[tokio::test]
    async fn summary_counts_only_what_the_contract_says() {
        let svc = empty_service().await;
        let today = Utc::now().date_naive();

        svc.create_transaction(
            TransactionKind::Income,
            "Projeto".into(),
            Decimal::new(8_500, 0),
            today,
            "Primeira parcela".into(),
            TransactionStatus::Paid,
            None,
        )
        .await;
        svc.create_transaction(
            TransactionKind::Income,
            "Consultoria".into(),
            Decimal::new(1_000, 0),
            today,
            "Parcela prevista".into(),
            TransactionStatus::Pending,
            None,
        )
        .await;
        svc.create_transaction(
            TransactionKind::Expense,
            "Marketing".into(),
            Decimal::new(500, 0),
            today,
            "Anúncios".into(),
            TransactionStatus::Paid,
            None,
        )
        .await;
        svc.create_transaction(
            TransactionKind::Expense,
            "Software".into(),
            Decimal::new(250, 0),
            today,
            "Assinatura".into(),
            TransactionStatus::Pending,
            None,
        )
        .await;

        let summary = svc.summary().await;
        // Receita pendente não entra no caixa realizado.
        assert_eq!(summary.realized_income, Decimal::new(8_500, 0));
        assert_eq!(summary.pending_expense, Decimal::new(250, 0));
        // 8500 - 500, com sinal, só liquidados.
        assert_eq!(summary.realized_balance, Decimal::new(8_000, 0));
        assert_eq!(summary.receivable_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn transactions_are_prepended_and_never_mutated() {
        let svc = empty_service().await;
        let today = Utc::now().date_naive();

        let first = svc
            .create_transaction(
                TransactionKind::Income,
                "Projeto".into(),
                Decimal::new(100, 0),
                today,
                "A".into(),
                TransactionStatus::Paid,
                None,
            )
            .await;
        let second = svc
            .create_transaction(
                TransactionKind::Expense,
                "Outros".into(),
                Decimal::new(50, 0),
                today,
                "B".into(),
                TransactionStatus::Pending,
                None,
            )
            .await;

        let listed = svc.list_transactions().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }
}
