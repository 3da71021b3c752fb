// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

/// Etapas do pipeline comercial, na ordem do funil.
/// `Lost` fica fora da ordenação visível: é o estado absorvente que encerra
/// o ciclo de vida do lead (nunca aparece como coluna do board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    Prospection,
    TechnicalVisit,
    Briefing,
    Concept,
    Signed,
    Lost,
}

impl LeadStatus {
    /// As colunas do board, na ordem fixa do funil (Lost não entra).
    pub const PIPELINE: [LeadStatus; 5] = [
        LeadStatus::Prospection,
        LeadStatus::TechnicalVisit,
        LeadStatus::Briefing,
        LeadStatus::Concept,
        LeadStatus::Signed,
    ];

    /// Posição da etapa na ordenação do funil. `None` para o estado Lost.
    pub fn position(&self) -> Option<usize> {
        Self::PIPELINE.iter().position(|s| s == self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Lost)
    }

    /// Nome exibido (usado em prompts, documentos e notificações).
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Prospection => "Prospecção",
            LeadStatus::TechnicalVisit => "Visita Técnica",
            LeadStatus::Briefing => "Briefing",
            LeadStatus::Concept => "Anteprojeto",
            LeadStatus::Signed => "Contrato Assinado",
            LeadStatus::Lost => "Perdido",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadTemperature {
    Hot,
    Warm,
    Cold,
}

/// Motivos de perda aceitos pelo fluxo de descarte. O conjunto é fechado:
/// um motivo fora da lista nem desserializa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LossReason {
    PriceTooHigh,
    ChoseCompetitor,
    Postponed,
    NoFit,
    NoResponse,
}

impl LossReason {
    pub fn label(&self) -> &'static str {
        match self {
            LossReason::PriceTooHigh => "Preço muito alto",
            LossReason::ChoseCompetitor => "Escolheu concorrente",
            LossReason::Postponed => "Projeto adiado",
            LossReason::NoFit => "Sem aderência",
            LossReason::NoResponse => "Sem resposta",
        }
    }
}

// --- STRUCTS ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Um lead do funil comercial.
///
/// Os `#[serde(default)]` espelham o carregamento defensivo do blob:
/// registros gravados por versões antigas do app podem não ter os campos
/// mais novos (temperature, tasks...) e entram com o valor neutro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,

    // Canal de origem (Instagram, Indicação...)
    #[serde(default)]
    pub source: String,

    pub status: LeadStatus,

    #[serde(default)]
    pub temperature: Option<LeadTemperature>,

    // Próximo follow-up agendado. Dia de calendário, sem hora.
    #[serde(default)]
    pub next_action_date: Option<NaiveDate>,

    #[serde(default)]
    pub budget: Option<Decimal>,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_fixed() {
        assert_eq!(LeadStatus::Prospection.position(), Some(0));
        assert_eq!(LeadStatus::Signed.position(), Some(4));
        assert_eq!(LeadStatus::Lost.position(), None);
        assert!(LeadStatus::Lost.is_terminal());
        assert!(!LeadStatus::Briefing.is_terminal());
    }

    #[test]
    fn lead_missing_optional_fields_gets_defaults() {
        // Registro no formato de uma versão antiga do blob: sem tasks,
        // sem temperature e sem nextActionDate.
        let raw = r#"{
            "id": "7f2b1d1e-53a4-4b08-9a53-0cde17640f5a",
            "name": "Marcos Vinicius",
            "status": "PROSPECTION"
        }"#;
        let lead: Lead = serde_json::from_str(raw).expect("registro antigo deve desserializar");
        assert!(lead.tasks.is_empty());
        assert_eq!(lead.temperature, None);
        assert_eq!(lead.next_action_date, None);
        assert_eq!(lead.email, "");
    }
}
