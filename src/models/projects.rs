// src/models/projects.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

/// Ciclo de vida de um projeto, na ordem do fluxo do estúdio.
/// A ordem é fixa em tempo de compilação; o motor de transição aceita
/// saltos arbitrários, mas o stepper do portal sempre renderiza a sequência
/// completa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStage {
    Briefing,
    Concept,
    Executive,
    Construction,
    Completed,
}

impl ProjectStage {
    pub const ALL: [ProjectStage; 5] = [
        ProjectStage::Briefing,
        ProjectStage::Concept,
        ProjectStage::Executive,
        ProjectStage::Construction,
        ProjectStage::Completed,
    ];

    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStage::Briefing => "Briefing",
            ProjectStage::Concept => "Anteprojeto",
            ProjectStage::Executive => "Executivo",
            ProjectStage::Construction => "Obra/Acompanhamento",
            ProjectStage::Completed => "Finalizado",
        }
    }
}

/// Status do documento de Responsabilidade Técnica. Transição one-way
/// Pending -> Paid, com número gerado na emissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RrtStatus {
    #[default]
    Pending,
    Paid,
}

/// Curadoria de materiais do portal do cliente. Aprovação é one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialStatus {
    #[default]
    Pending,
    Approved,
}

// --- STRUCTS ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialApproval {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub status: MaterialStatus,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(default)]
    pub client_name: String,

    pub title: String,
    pub stage: ProjectStage,

    pub start_date: NaiveDate,
    pub deadline: NaiveDate,

    // Financeiro do contrato. paid_value nunca passa de total_value
    // (saturado na cobrança de milestone e na normalização de load).
    pub total_value: Decimal,
    #[serde(default)]
    pub paid_value: Decimal,
    #[serde(default)]
    pub costs: Decimal,

    // Percentual físico da obra, 0 a 100.
    #[serde(default)]
    pub progress: u8,

    #[serde(default)]
    pub rrt_status: RrtStatus,
    #[serde(default)]
    pub rrt_number: Option<String>,

    #[serde(default)]
    pub daily_logs: Vec<DailyLog>,
    #[serde(default)]
    pub material_approvals: Vec<MaterialApproval>,
}

// --- STEPPER DO PORTAL ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageState {
    Completed,
    Current,
    Locked,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageStep {
    pub stage: ProjectStage,
    pub label: String,
    pub state: StageState,
}

/// Visão derivada da etapa atual: uma entrada por etapa, na ordem do ciclo,
/// com o estado que o stepper do portal renderiza.
pub fn stage_stepper(current: ProjectStage) -> Vec<StageStep> {
    let current_pos = current.position();
    ProjectStage::ALL
        .iter()
        .map(|stage| {
            let pos = stage.position();
            let state = if pos < current_pos {
                StageState::Completed
            } else if pos == current_pos {
                StageState::Current
            } else {
                StageState::Locked
            };
            StageStep {
                stage: *stage,
                label: stage.label().to_string(),
                state,
            }
        })
        .collect()
}

/// Visão gerencial do contrato: percentuais derivados na hora, nunca
/// persistidos. `margin_percent` fica indefinida em contrato zerado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFinancials {
    pub total_value: Decimal,
    pub paid_value: Decimal,
    pub costs: Decimal,
    pub outstanding_balance: Decimal,
    pub paid_percent: Decimal,
    pub margin_percent: Option<Decimal>,
}

/// Payload do Portal do Cliente: o recorte do projeto que o cliente vê.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPortal {
    pub id: Uuid,
    pub title: String,
    pub deadline: NaiveDate,
    pub progress: u8,
    pub paid_percent: Decimal,
    pub stepper: Vec<StageStep>,
    pub daily_logs: Vec<DailyLog>,
    pub material_approvals: Vec<MaterialApproval>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepper_marks_past_current_and_locked() {
        let steps = stage_stepper(ProjectStage::Construction);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].state, StageState::Completed); // Briefing
        assert_eq!(steps[1].state, StageState::Completed); // Anteprojeto
        assert_eq!(steps[2].state, StageState::Completed); // Executivo
        assert_eq!(steps[3].state, StageState::Current); // Obra
        assert_eq!(steps[4].state, StageState::Locked); // Finalizado
    }

    #[test]
    fn stepper_at_first_stage_locks_everything_ahead() {
        let steps = stage_stepper(ProjectStage::Briefing);
        assert_eq!(steps[0].state, StageState::Current);
        assert!(steps[1..].iter().all(|s| s.state == StageState::Locked));
    }
}
