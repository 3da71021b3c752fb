// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- CRM ---
        handlers::crm::create_lead,
        handlers::crm::list_leads,
        handlers::crm::update_lead,
        handlers::crm::transition_lead,
        handlers::crm::request_loss,
        handlers::crm::confirm_loss,
        handlers::crm::cancel_loss,
        handlers::crm::add_task,
        handlers::crm::toggle_task,
        handlers::crm::remove_task,

        // --- Projetos ---
        handlers::projects::create_project,
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::delete_project,
        handlers::projects::transition_project,
        handlers::projects::issue_rrt,
        handlers::projects::charge_milestone,
        handlers::projects::set_progress,
        handlers::projects::record_costs,
        handlers::projects::project_financials,
        handlers::projects::add_daily_log,
        handlers::projects::add_material,
        handlers::projects::approve_material,
        handlers::projects::client_portal,

        // --- Financeiro ---
        handlers::finance::create_transaction,
        handlers::finance::list_transactions,
        handlers::finance::summary,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_lead_funnel,
        handlers::dashboard::get_project_flow,
        handlers::dashboard::get_revenue_chart,

        // --- IA ---
        handlers::ai::analyze_briefing,
        handlers::ai::generate_proposal,
        handlers::ai::analyze_norms,
        handlers::ai::generate_moodboard,
    ),
    components(
        schemas(
            // --- CRM ---
            models::crm::LeadStatus,
            models::crm::LeadTemperature,
            models::crm::LossReason,
            models::crm::Lead,
            models::crm::Task,
            handlers::crm::CreateLeadPayload,
            handlers::crm::UpdateLeadPayload,
            handlers::crm::TransitionLeadPayload,
            handlers::crm::ConfirmLossPayload,
            handlers::crm::CreateTaskPayload,

            // --- Projetos ---
            models::projects::ProjectStage,
            models::projects::RrtStatus,
            models::projects::MaterialStatus,
            models::projects::Project,
            models::projects::DailyLog,
            models::projects::MaterialApproval,
            models::projects::StageState,
            models::projects::StageStep,
            models::projects::ProjectPortal,
            models::projects::ProjectFinancials,
            handlers::projects::CreateProjectPayload,
            handlers::projects::TransitionProjectPayload,
            handlers::projects::ProgressPayload,
            handlers::projects::CostsPayload,
            handlers::projects::CreateLogPayload,
            handlers::projects::CreateMaterialPayload,

            // --- Financeiro ---
            models::finance::TransactionKind,
            models::finance::TransactionStatus,
            models::finance::Transaction,
            models::finance::FinanceSummary,
            handlers::finance::CreateTransactionPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::StageCountEntry,
            models::dashboard::RevenueChartEntry,

            // --- IA ---
            services::ai_service::BriefingAnalysis,
            handlers::ai::BriefingPayload,
            handlers::ai::ProposalPayload,
            handlers::ai::NormsPayload,
            handlers::ai::MoodboardPayload,
        )
    ),
    tags(
        (name = "CRM", description = "Pipeline Comercial (Kanban de Leads)"),
        (name = "Projetos", description = "Portfólio, Obra e Portal do Cliente"),
        (name = "Financeiro", description = "Conciliação Bancária do Estúdio"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais"),
        (name = "IA", description = "Assistente Generativo (Briefing, Propostas, Normas, Moodboards)")
    )
)]
pub struct ApiDoc;
