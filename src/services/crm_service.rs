// src/services/crm_service.rs

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Lead, LeadStatus, LeadTemperature, LossReason, Task},
    services::NotificationService,
    store::LeadStore,
};

/// Campos editáveis de um lead. `None` = não mexe no campo.
#[derive(Debug, Default)]
pub struct LeadChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub budget: Option<Decimal>,
    pub temperature: Option<LeadTemperature>,
    pub next_action_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

/// Motor de transição do funil comercial.
///
/// O gatilho (drag-and-drop, botão, atalho de teclado) é indiferente: tudo
/// chega aqui como `set_status` ou como o fluxo de perda em três passos
/// (request -> confirm | cancel). O marcador de perda pendente imita o
/// modelo do arrasto: um segundo request sobrescreve o primeiro.
#[derive(Clone)]
pub struct CrmService {
    store: LeadStore,
    notifier: NotificationService,
    pending_loss: Arc<RwLock<Option<Uuid>>>,
}

impl CrmService {
    pub fn new(store: LeadStore, notifier: NotificationService) -> Self {
        Self {
            store,
            notifier,
            pending_loss: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn list_leads(&self) -> Vec<Lead> {
        self.store.snapshot().await
    }

    pub async fn create_lead(
        &self,
        name: String,
        email: String,
        phone: String,
        source: String,
        notes: String,
        budget: Option<Decimal>,
        temperature: Option<LeadTemperature>,
        next_action_date: Option<NaiveDate>,
    ) -> Lead {
        let lead = Lead {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            source,
            status: LeadStatus::Prospection,
            temperature,
            next_action_date,
            budget,
            notes,
            address: None,
            tax_id: None,
            created_at: Utc::now(),
            tasks: Vec::new(),
        };

        let mut leads = self.store.snapshot().await;
        leads.insert(0, lead.clone());
        self.store.replace_all(leads).await;

        self.notifier.notify(
            "Novo Lead",
            &format!("{} entrou no funil via {}.", lead.name, lead.source),
        );
        lead
    }

    pub async fn update_lead(&self, id: Uuid, changes: LeadChanges) -> Result<Lead, AppError> {
        self.mutate_lead(id, |lead| {
            if let Some(name) = changes.name {
                lead.name = name;
            }
            if let Some(email) = changes.email {
                lead.email = email;
            }
            if let Some(phone) = changes.phone {
                lead.phone = phone;
            }
            if let Some(source) = changes.source {
                lead.source = source;
            }
            if let Some(notes) = changes.notes {
                lead.notes = notes;
            }
            if let Some(budget) = changes.budget {
                lead.budget = Some(budget);
            }
            if let Some(temperature) = changes.temperature {
                lead.temperature = Some(temperature);
            }
            if let Some(date) = changes.next_action_date {
                lead.next_action_date = Some(date);
            }
            if let Some(address) = changes.address {
                lead.address = Some(address);
            }
            if let Some(tax_id) = changes.tax_id {
                lead.tax_id = Some(tax_id);
            }
        })
        .await
    }

    /// Move o lead para outra coluna do funil. Saltos arbitrários valem;
    /// `Lost` não passa por aqui (exige o fluxo de perda com motivo).
    pub async fn set_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead, AppError> {
        if status.is_terminal() {
            return Err(AppError::LossRequiresReason);
        }
        self.mutate_lead(id, |lead| lead.status = status).await
    }

    /// Abre o fluxo de perda para um lead. Não mutaciona nada: só registra
    /// a intenção, que `confirm_loss` consome ou `cancel_loss` descarta.
    pub async fn request_loss(&self, id: Uuid) -> Result<(), AppError> {
        if self.store.find(id).await.is_none() {
            return Err(AppError::LeadNotFound);
        }
        let mut pending = self.pending_loss.write().await;
        *pending = Some(id);
        Ok(())
    }

    /// Confirma a perda: remove o lead da coleção ativa (hard delete).
    /// O motivo é obrigatório por construção e fica registrado no log e no
    /// push, não no lead, que deixa de existir.
    pub async fn confirm_loss(&self, id: Uuid, reason: LossReason) -> Result<(), AppError> {
        let mut leads = self.store.snapshot().await;
        let position = leads
            .iter()
            .position(|l| l.id == id)
            .ok_or(AppError::LeadNotFound)?;
        let lead = leads.remove(position);
        self.store.replace_all(leads).await;

        let mut pending = self.pending_loss.write().await;
        if *pending == Some(id) {
            *pending = None;
        }

        tracing::info!(
            lead = %lead.name,
            motivo = reason.label(),
            "Negócio perdido e removido do funil."
        );
        self.notifier.notify(
            "Negócio Perdido",
            &format!("{} saiu do funil. Motivo: {}.", lead.name, reason.label()),
        );
        Ok(())
    }

    /// Descarta a perda pendente. O lead e o resto do store ficam
    /// exatamente como estavam.
    pub async fn cancel_loss(&self) {
        let mut pending = self.pending_loss.write().await;
        *pending = None;
    }

    pub async fn pending_loss(&self) -> Option<Uuid> {
        *self.pending_loss.read().await
    }

    // --- TAREFAS ---

    pub async fn add_task(&self, lead_id: Uuid, description: String) -> Result<Task, AppError> {
        let task = Task {
            id: Uuid::new_v4(),
            description,
            completed: false,
        };
        let created = task.clone();
        self.mutate_lead(lead_id, move |lead| lead.tasks.push(task))
            .await?;
        Ok(created)
    }

    pub async fn toggle_task(&self, lead_id: Uuid, task_id: Uuid) -> Result<Task, AppError> {
        let mut leads = self.store.snapshot().await;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or(AppError::LeadNotFound)?;
        let task = lead
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(AppError::TaskNotFound)?;
        task.completed = !task.completed;
        let toggled = task.clone();

        self.store.replace_all(leads).await;
        Ok(toggled)
    }

    pub async fn remove_task(&self, lead_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        let mut leads = self.store.snapshot().await;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or(AppError::LeadNotFound)?;
        let before = lead.tasks.len();
        lead.tasks.retain(|t| t.id != task_id);
        if lead.tasks.len() == before {
            return Err(AppError::TaskNotFound);
        }

        self.store.replace_all(leads).await;
        Ok(())
    }

    /// Protocolo padrão de mutação: lista nova completa, depois replace.
    async fn mutate_lead(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut Lead),
    ) -> Result<Lead, AppError> {
        let mut leads = self.store.snapshot().await;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::LeadNotFound)?;
        apply(lead);
        let updated = lead.clone();

        self.store.replace_all(leads).await;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::tests::temp_store;

    async fn service() -> CrmService {
        let store = LeadStore::open(temp_store()).await;
        CrmService::new(store, NotificationService::new(None))
    }

    #[tokio::test]
    async fn set_status_moves_lead_between_columns() {
        let crm = service().await;
        let lead = crm
            .create_lead(
                "Helena Prado".into(),
                "helena@email.com".into(),
                "11911112222".into(),
                "Indicação".into(),
                String::new(),
                None,
                None,
                None,
            )
            .await;
        assert_eq!(lead.status, LeadStatus::Prospection);

        // Salto arbitrário, sem passar pelas etapas intermediárias.
        let moved = crm.set_status(lead.id, LeadStatus::Concept).await.unwrap();
        assert_eq!(moved.status, LeadStatus::Concept);
    }

    #[tokio::test]
    async fn set_status_to_lost_is_rejected() {
        let crm = service().await;
        let lead = crm.list_leads().await.remove(0);
        let result = crm.set_status(lead.id, LeadStatus::Lost).await;
        assert!(matches!(result, Err(AppError::LossRequiresReason)));
    }

    #[tokio::test]
    async fn unknown_lead_is_a_reported_error() {
        let crm = service().await;
        let result = crm.set_status(Uuid::new_v4(), LeadStatus::Signed).await;
        assert!(matches!(result, Err(AppError::LeadNotFound)));
    }

    #[tokio::test]
    async fn confirmed_loss_destroys_the_lead() {
        let crm = service().await;
        let lead = crm.list_leads().await.remove(0);

        crm.request_loss(lead.id).await.unwrap();
        assert_eq!(crm.pending_loss().await, Some(lead.id));

        crm.confirm_loss(lead.id, LossReason::PriceTooHigh)
            .await
            .unwrap();

        // Sumiu de toda leitura subsequente, e o marcador foi consumido.
        assert!(crm.list_leads().await.iter().all(|l| l.id != lead.id));
        assert_eq!(crm.pending_loss().await, None);
    }

    #[tokio::test]
    async fn cancel_loss_leaves_the_store_unchanged() {
        let crm = service().await;
        let before = crm.list_leads().await;
        let lead_id = before[0].id;

        crm.request_loss(lead_id).await.unwrap();
        crm.cancel_loss().await;

        assert_eq!(crm.list_leads().await, before);
        assert_eq!(crm.pending_loss().await, None);
    }

    #[tokio::test]
    async fn second_loss_request_overwrites_the_first() {
        let crm = service().await;
        let leads = crm.list_leads().await;

        crm.request_loss(leads[0].id).await.unwrap();
        crm.request_loss(leads[1].id).await.unwrap();
        assert_eq!(crm.pending_loss().await, Some(leads[1].id));
    }

    #[tokio::test]
    async fn tasks_can_be_added_toggled_and_removed() {
        let crm = service().await;
        let lead = crm.list_leads().await.remove(0);

        let task = crm
            .add_task(lead.id, "Agendar visita técnica".into())
            .await
            .unwrap();
        assert!(!task.completed);

        let toggled = crm.toggle_task(lead.id, task.id).await.unwrap();
        assert!(toggled.completed);

        crm.remove_task(lead.id, task.id).await.unwrap();
        let result = crm.toggle_task(lead.id, task.id).await;
        assert!(matches!(result, Err(AppError::TaskNotFound)));
    }
}
