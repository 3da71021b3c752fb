// src/store/transaction_store.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::finance::{Transaction, TransactionKind, TransactionStatus};
use crate::store::blob::{BlobStore, JsonCollection};

const TRANSACTIONS_KEY: &str = "finance_transactions_v1";

#[derive(Clone)]
pub struct TransactionStore {
    collection: JsonCollection<Transaction>,
}

impl TransactionStore {
    pub async fn open(blob: BlobStore) -> Self {
        Self {
            collection: JsonCollection::open(
                blob,
                TRANSACTIONS_KEY,
                seed_transactions,
                normalize_transaction,
            )
            .await,
        }
    }

    pub async fn snapshot(&self) -> Vec<Transaction> {
        self.collection.snapshot().await
    }

    pub async fn replace_all(&self, transactions: Vec<Transaction>) {
        self.collection.replace_all(transactions).await;
    }
}

fn normalize_transaction(transaction: &mut Transaction) {
    // O valor do lançamento é sempre positivo; o sinal vem do tipo.
    if transaction.amount < Decimal::ZERO {
        transaction.amount = -transaction.amount;
    }
}

fn seed_transactions() -> Vec<Transaction> {
    let today = Utc::now().date_naive();
    vec![
        Transaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Income,
            category: "Projeto".into(),
            amount: Decimal::new(8_500, 0),
            date: today - Duration::days(20),
            description: "Primeira parcela - Apt Ipanema".into(),
            status: TransactionStatus::Paid,
            project_id: None,
        },
        Transaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            category: "Marketing".into(),
            amount: Decimal::new(500, 0),
            date: today - Duration::days(18),
            description: "Anúncios Instagram".into(),
            status: TransactionStatus::Paid,
            project_id: None,
        },
        Transaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            category: "Software".into(),
            amount: Decimal::new(250, 0),
            date: today - Duration::days(15),
            description: "Assinatura Spazio OS".into(),
            status: TransactionStatus::Pending,
            project_id: None,
        },
        Transaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Income,
            category: "Consultoria".into(),
            amount: Decimal::new(1_200, 0),
            date: today - Duration::days(10),
            description: "Visita técnica obra Ricardo".into(),
            status: TransactionStatus::Paid,
            project_id: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::tests::temp_store;

    #[tokio::test]
    async fn negative_amounts_are_normalized_to_positive() {
        let blob = temp_store();
        blob.write(
            TRANSACTIONS_KEY,
            r#"[{
                "id": "7f2b1d1e-53a4-4b08-9a53-0cde17640f5a",
                "type": "EXPENSE",
                "category": "Outros",
                "amount": -300.0,
                "date": "2024-02-01",
                "description": "Lançamento com sinal invertido",
                "status": "PAID"
            }]"#,
        )
        .await;

        let store = TransactionStore::open(blob).await;
        let transactions = store.snapshot().await;
        assert_eq!(transactions[0].amount, Decimal::new(300, 0));
        // A contribuição com sinal continua negativa por ser despesa.
        assert_eq!(transactions[0].signed_amount(), Decimal::new(-300, 0));
    }
}
