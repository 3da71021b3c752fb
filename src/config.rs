// src/config.rs

use std::env;

use anyhow::Context;

use crate::services::{
    AiService, CrmService, DashboardService, DocumentService, FinanceService, NotificationService,
    ProjectService,
    notification_service::TelegramConfig,
};
use crate::store::{BlobStore, LeadStore, ProjectStore, TransactionStore};

#[derive(Clone)]
pub struct AppState {
    pub crm_service: CrmService,
    pub project_service: ProjectService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub ai_service: AiService,
    pub document_service: DocumentService,
}

impl AppState {
    /// Carrega a configuração (uma vez, no boot) e monta o grafo de
    /// dependências. Configuração obrigatória ausente é erro de startup,
    /// nunca um crash no meio de uma chamada.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // A chave do colaborador de IA é obrigatória: sem ela o workspace
        // inteiro de IA ficaria quebrado em runtime.
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY deve ser definida (configuração, nunca no fonte)")?;

        // Telegram é opcional: sem credenciais o push fica desabilitado.
        let telegram = match (env::var("TELEGRAM_BOT_TOKEN"), env::var("TELEGRAM_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        let data_dir = env::var("SPAZIO_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let fonts_dir = env::var("SPAZIO_FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        let blob = BlobStore::open(&data_dir)
            .with_context(|| format!("Falha ao abrir o diretório de dados '{data_dir}'"))?;
        tracing::info!("✅ Blobs de dados em '{}'", data_dir);

        // --- Monta o grafo de dependências ---
        let lead_store = LeadStore::open(blob.clone()).await;
        let project_store = ProjectStore::open(blob.clone()).await;
        let transaction_store = TransactionStore::open(blob).await;

        let notifier = NotificationService::new(telegram);
        let crm_service = CrmService::new(lead_store.clone(), notifier.clone());
        let project_service = ProjectService::new(project_store.clone(), notifier);
        let finance_service =
            FinanceService::new(transaction_store.clone(), project_store.clone());
        let dashboard_service = DashboardService::new(lead_store, project_store, transaction_store);
        let ai_service = AiService::new(gemini_api_key);
        let document_service = DocumentService::new(fonts_dir);

        Ok(Self {
            crm_service,
            project_service,
            finance_service,
            dashboard_service,
            ai_service,
            document_service,
        })
    }
}
