//src/main.rs

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;
mod store;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Pipeline comercial (kanban de leads)
    let crm_routes = Router::new()
        .route(
            "/leads",
            post(handlers::crm::create_lead).get(handlers::crm::list_leads),
        )
        .route("/leads/{id}", put(handlers::crm::update_lead))
        .route("/leads/{id}/transition", post(handlers::crm::transition_lead))
        .route("/leads/{id}/loss-request", post(handlers::crm::request_loss))
        .route("/leads/{id}/loss-confirm", post(handlers::crm::confirm_loss))
        .route("/loss-cancel", post(handlers::crm::cancel_loss))
        .route("/leads/{id}/tasks", post(handlers::crm::add_task))
        .route(
            "/leads/{id}/tasks/{task_id}",
            patch(handlers::crm::toggle_task).delete(handlers::crm::remove_task),
        )
        .route(
            "/leads/{id}/follow-up",
            post(handlers::crm::generate_follow_up),
        );

    // Portfólio, obra e portal do cliente
    let project_routes = Router::new()
        .route(
            "/",
            post(handlers::projects::create_project).get(handlers::projects::list_projects),
        )
        .route(
            "/{id}",
            get(handlers::projects::get_project).delete(handlers::projects::delete_project),
        )
        .route(
            "/{id}/transition",
            post(handlers::projects::transition_project),
        )
        .route("/{id}/rrt", post(handlers::projects::issue_rrt))
        .route(
            "/{id}/milestone-charge",
            post(handlers::projects::charge_milestone),
        )
        .route("/{id}/progress", patch(handlers::projects::set_progress))
        .route("/{id}/costs", patch(handlers::projects::record_costs))
        .route(
            "/{id}/financials",
            get(handlers::projects::project_financials),
        )
        .route("/{id}/logs", post(handlers::projects::add_daily_log))
        .route("/{id}/materials", post(handlers::projects::add_material))
        .route(
            "/{id}/materials/{material_id}/approve",
            post(handlers::projects::approve_material),
        )
        .route("/{id}/portal", get(handlers::projects::client_portal));

    let finance_routes = Router::new()
        .route(
            "/transactions",
            post(handlers::finance::create_transaction).get(handlers::finance::list_transactions),
        )
        .route("/summary", get(handlers::finance::summary));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/lead-funnel", get(handlers::dashboard::get_lead_funnel))
        .route("/project-flow", get(handlers::dashboard::get_project_flow))
        .route(
            "/revenue-chart",
            get(handlers::dashboard::get_revenue_chart),
        );

    let ai_routes = Router::new()
        .route("/briefing", post(handlers::ai::analyze_briefing))
        .route("/proposal", post(handlers::ai::generate_proposal))
        .route("/norms", post(handlers::ai::analyze_norms))
        .route("/moodboard", post(handlers::ai::generate_moodboard));

    let document_routes = Router::new().route(
        "/proposal",
        post(handlers::documents::generate_proposal_document),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/commands", get(handlers::commands::list_commands))
        .nest("/api/crm", crm_routes)
        .nest("/api/projects", project_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/ai", ai_routes)
        .nest("/api/documents", document_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
