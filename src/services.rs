pub mod ai_service;
pub use ai_service::AiService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod finance_service;
pub use finance_service::FinanceService;
pub mod notification_service;
pub use notification_service::NotificationService;
pub mod project_service;
pub use project_service::ProjectService;
