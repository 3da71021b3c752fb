// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Resumo (Os Cards do Topo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_projects: usize,   // Projetos fora de Finalizado
    pub pipeline_leads: usize,    // Leads no funil
    pub overdue_followups: usize, // Leads com próximo passo atrasado
    pub realized_revenue: Decimal,
    pub pending_costs: Decimal,
}

// 2. Distribuição por etapa (funil de leads e fluxo de projetos).
// Sempre uma entrada por etapa, na ordem do modelo, incluindo as zeradas,
// para o eixo do gráfico não pular de tamanho.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageCountEntry {
    pub name: String,
    pub count: usize,
}

// 3. Série mensal de receita realizada (gráfico de crescimento).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChartEntry {
    pub month: String, // YYYY-MM
    pub total: Decimal,
}
