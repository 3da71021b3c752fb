// src/store/lead_store.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::crm::{Lead, LeadStatus, LeadTemperature, Task};
use crate::store::blob::{BlobStore, JsonCollection};

// Mesma chave versionada que o app sempre usou para o funil.
const LEADS_KEY: &str = "crm_leads_v3";

/// Lista canônica de leads ativos. Leads perdidos não existem aqui:
/// a confirmação de perda remove o registro.
#[derive(Clone)]
pub struct LeadStore {
    collection: JsonCollection<Lead>,
}

impl LeadStore {
    pub async fn open(blob: BlobStore) -> Self {
        Self {
            collection: JsonCollection::open(blob, LEADS_KEY, seed_leads, normalize_lead).await,
        }
    }

    pub async fn snapshot(&self) -> Vec<Lead> {
        self.collection.snapshot().await
    }

    pub async fn replace_all(&self, leads: Vec<Lead>) {
        self.collection.replace_all(leads).await;
    }

    pub async fn find(&self, id: Uuid) -> Option<Lead> {
        self.collection
            .snapshot()
            .await
            .into_iter()
            .find(|l| l.id == id)
    }
}

/// Saneamento aplicado a cada registro no load, além dos defaults do serde.
fn normalize_lead(lead: &mut Lead) {
    // Budget negativo não tem significado no funil.
    if lead.budget.is_some_and(|b| b < Decimal::ZERO) {
        lead.budget = None;
    }
    // Um registro antigo nunca pode reaparecer no board como Perdido.
    if lead.status.is_terminal() {
        lead.status = LeadStatus::Prospection;
    }
}

/// Dataset inicial do estúdio, usado quando o blob não existe ou não parseia.
fn seed_leads() -> Vec<Lead> {
    let today = Utc::now().date_naive();
    vec![
        Lead {
            id: Uuid::new_v4(),
            name: "Marcos Vinicius".into(),
            email: "marcos@email.com".into(),
            phone: "11988887777".into(),
            source: "Instagram".into(),
            status: LeadStatus::Prospection,
            temperature: Some(LeadTemperature::Hot),
            // Data propositalmente atrasada, para o alerta do board.
            next_action_date: Some(today - Duration::days(5)),
            budget: Some(Decimal::new(85_000, 0)),
            notes: "Interesse em reforma de cobertura no Itaim. Busca estilo industrial chic."
                .into(),
            address: Some("Av. Paulista, 1000 - SP".into()),
            tax_id: Some("123.456.789-00".into()),
            created_at: Utc::now(),
            tasks: vec![Task {
                id: Uuid::new_v4(),
                description: "Enviar portfólio de coberturas luxo".into(),
                completed: false,
            }],
        },
        Lead {
            id: Uuid::new_v4(),
            name: "Clara Nunes".into(),
            email: "clara@email.com".into(),
            phone: "11977776666".into(),
            source: "Indicação".into(),
            status: LeadStatus::Briefing,
            temperature: Some(LeadTemperature::Warm),
            next_action_date: Some(today + Duration::days(30)),
            budget: Some(Decimal::new(15_000, 0)),
            notes: "Consultoria de design de interiores para living.".into(),
            address: None,
            tax_id: None,
            created_at: Utc::now(),
            tasks: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::tests::temp_store;

    #[tokio::test]
    async fn malformed_blob_loads_seed_dataset() {
        let blob = temp_store();
        blob.write(LEADS_KEY, "{not json").await;

        let store = LeadStore::open(blob).await;
        let leads = store.snapshot().await;
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Marcos Vinicius");
    }

    #[tokio::test]
    async fn normalize_drops_negative_budget_and_lost_status() {
        let blob = temp_store();
        blob.write(
            LEADS_KEY,
            r#"[{
                "id": "7f2b1d1e-53a4-4b08-9a53-0cde17640f5a",
                "name": "Registro antigo",
                "status": "LOST",
                "budget": -10.0
            }]"#,
        )
        .await;

        let store = LeadStore::open(blob).await;
        let leads = store.snapshot().await;
        assert_eq!(leads[0].status, LeadStatus::Prospection);
        assert_eq!(leads[0].budget, None);
    }

    #[tokio::test]
    async fn replace_all_survives_reopen() {
        let blob = temp_store();
        let store = LeadStore::open(blob.clone()).await;

        let mut leads = store.snapshot().await;
        leads.retain(|l| l.name == "Clara Nunes");
        store.replace_all(leads.clone()).await;

        let reopened = LeadStore::open(blob).await;
        assert_eq!(reopened.snapshot().await, leads);
    }
}
