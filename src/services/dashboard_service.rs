// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    models::crm::{Lead, LeadStatus},
    models::dashboard::{DashboardSummary, RevenueChartEntry, StageCountEntry},
    models::finance::{Transaction, TransactionKind, TransactionStatus},
    models::projects::{Project, ProjectStage},
    store::{LeadStore, ProjectStore, TransactionStore},
};

// =============================================================================
//  VIEWS DERIVADAS (funções puras, recalculadas a cada chamada)
// =============================================================================

/// Distribuição do funil de leads: uma entrada por etapa, na ordem do
/// pipeline, incluindo etapas zeradas (o eixo do gráfico não pode encolher).
pub fn lead_distribution(leads: &[Lead]) -> Vec<StageCountEntry> {
    LeadStatus::PIPELINE
        .iter()
        .map(|stage| StageCountEntry {
            name: stage.label().to_string(),
            count: leads.iter().filter(|l| l.status == *stage).count(),
        })
        .collect()
}

/// Fluxo operacional dos projetos, mesma regra do funil.
pub fn project_distribution(projects: &[Project]) -> Vec<StageCountEntry> {
    ProjectStage::ALL
        .iter()
        .map(|stage| StageCountEntry {
            name: stage.label().to_string(),
            count: projects.iter().filter(|p| p.stage == *stage).count(),
        })
        .collect()
}

/// Follow-up atrasado: dia de calendário estritamente antes de hoje.
/// Hora do dia é ignorada; sem data agendada nunca está atrasado.
pub fn is_overdue(next_action_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match next_action_date {
        Some(date) => date < today,
        None => false,
    }
}

/// Margem do contrato em percentual inteiro arredondado.
/// `None` quando o contrato é zero (margem indefinida, o caller decide o
/// que mostrar).
pub fn margin_percent(total_value: Decimal, costs: Decimal) -> Option<Decimal> {
    if total_value == Decimal::ZERO {
        return None;
    }
    Some(((total_value - costs) / total_value * Decimal::ONE_HUNDRED).round())
}

/// Percentual recebido do contrato, saturado em [0, 100] para exibição.
/// Contrato zero conta como 0% recebido.
pub fn paid_percent(paid_value: Decimal, total_value: Decimal) -> Decimal {
    if total_value == Decimal::ZERO {
        return Decimal::ZERO;
    }
    (paid_value / total_value * Decimal::ONE_HUNDRED)
        .max(Decimal::ZERO)
        .min(Decimal::ONE_HUNDRED)
}

/// Série mensal de receita realizada (receitas liquidadas, agrupadas por
/// YYYY-MM em ordem cronológica).
pub fn revenue_by_month(transactions: &[Transaction]) -> Vec<RevenueChartEntry> {
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.kind == TransactionKind::Income && t.is_realized() {
            let month = format!("{:04}-{:02}", t.date.year(), t.date.month());
            *months.entry(month).or_insert(Decimal::ZERO) += t.amount;
        }
    }
    months
        .into_iter()
        .map(|(month, total)| RevenueChartEntry { month, total })
        .collect()
}

// =============================================================================
//  SERVICE
// =============================================================================

#[derive(Clone)]
pub struct DashboardService {
    leads: LeadStore,
    projects: ProjectStore,
    transactions: TransactionStore,
}

impl DashboardService {
    pub fn new(leads: LeadStore, projects: ProjectStore, transactions: TransactionStore) -> Self {
        Self {
            leads,
            projects,
            transactions,
        }
    }

    pub async fn summary(&self) -> DashboardSummary {
        let leads = self.leads.snapshot().await;
        let projects = self.projects.snapshot().await;
        let transactions = self.transactions.snapshot().await;
        let today = Utc::now().date_naive();

        let realized_revenue = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income && t.is_realized())
            .map(|t| t.amount)
            .sum();
        let pending_costs = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.status == TransactionStatus::Pending)
            .map(|t| t.amount)
            .sum();

        DashboardSummary {
            active_projects: projects
                .iter()
                .filter(|p| p.stage != ProjectStage::Completed)
                .count(),
            pipeline_leads: leads.len(),
            overdue_followups: leads
                .iter()
                .filter(|l| is_overdue(l.next_action_date, today))
                .count(),
            realized_revenue,
            pending_costs,
        }
    }

    pub async fn lead_funnel(&self) -> Vec<StageCountEntry> {
        lead_distribution(&self.leads.snapshot().await)
    }

    pub async fn project_flow(&self) -> Vec<StageCountEntry> {
        project_distribution(&self.projects.snapshot().await)
    }

    pub async fn revenue_chart(&self) -> Vec<RevenueChartEntry> {
        revenue_by_month(&self.transactions.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use uuid::Uuid;

    fn lead_at(status: LeadStatus) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: "Teste".into(),
            email: String::new(),
            phone: String::new(),
            source: String::new(),
            status,
            temperature: None,
            next_action_date: None,
            budget: None,
            notes: String::new(),
            address: None,
            tax_id: None,
            created_at: DateTime::UNIX_EPOCH,
            tasks: Vec::new(),
        }
    }

    #[test]
    fn distribution_covers_every_stage_in_order_even_when_empty() {
        let entries = lead_distribution(&[]);
        assert_eq!(entries.len(), LeadStatus::PIPELINE.len());
        assert_eq!(entries[0].name, "Prospecção");
        assert_eq!(entries[4].name, "Contrato Assinado");
        assert!(entries.iter().all(|e| e.count == 0));
    }

    #[test]
    fn distribution_counts_sum_to_list_length() {
        let leads = vec![
            lead_at(LeadStatus::Prospection),
            lead_at(LeadStatus::Prospection),
            lead_at(LeadStatus::Briefing),
            lead_at(LeadStatus::Signed),
        ];
        let entries = lead_distribution(&leads);
        assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), leads.len());
        assert_eq!(entries[0].count, 2); // Prospecção
        assert_eq!(entries[1].count, 0); // Visita Técnica continua presente
        assert_eq!(entries[2].count, 1); // Briefing
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(is_overdue(Some(today - Duration::days(1)), today));
        assert!(!is_overdue(Some(today), today));
        assert!(!is_overdue(Some(today + Duration::days(1)), today));
        assert!(!is_overdue(None, today));
    }

    #[test]
    fn margin_percent_matches_contract() {
        assert_eq!(
            margin_percent(Decimal::new(100, 0), Decimal::new(25, 0)),
            Some(Decimal::new(75, 0))
        );
        assert_eq!(
            margin_percent(Decimal::new(100, 0), Decimal::ZERO),
            Some(Decimal::ONE_HUNDRED)
        );
        // Contrato zero: indefinida, sem pânico.
        assert_eq!(margin_percent(Decimal::ZERO, Decimal::ZERO), None);
    }

    #[test]
    fn paid_percent_is_clamped_for_display() {
        assert_eq!(
            paid_percent(Decimal::new(50, 0), Decimal::new(200, 0)),
            Decimal::new(25, 0)
        );
        // Registro antigo fora do invariante não estoura a barra.
        assert_eq!(
            paid_percent(Decimal::new(300, 0), Decimal::new(200, 0)),
            Decimal::ONE_HUNDRED
        );
        assert_eq!(paid_percent(Decimal::new(10, 0), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn revenue_by_month_groups_only_realized_income() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let t = |kind, status, amount: i64, date| Transaction {
            id: Uuid::new_v4(),
            kind,
            category: "Projeto".into(),
            amount: Decimal::new(amount, 0),
            date,
            description: String::new(),
            status,
            project_id: None,
        };

        let transactions = vec![
            t(TransactionKind::Income, TransactionStatus::Paid, 1000, date(2024, 1, 10)),
            t(TransactionKind::Income, TransactionStatus::Paid, 500, date(2024, 1, 25)),
            t(TransactionKind::Income, TransactionStatus::Pending, 900, date(2024, 1, 30)),
            t(TransactionKind::Expense, TransactionStatus::Paid, 400, date(2024, 1, 5)),
            t(TransactionKind::Income, TransactionStatus::Paid, 700, date(2024, 2, 2)),
        ];

        let series = revenue_by_month(&transactions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month, "2024-01");
        assert_eq!(series[0].total, Decimal::new(1500, 0));
        assert_eq!(series[1].month, "2024-02");
        assert_eq!(series[1].total, Decimal::new(700, 0));
    }
}
