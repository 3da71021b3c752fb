use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Projeto não encontrado")]
    ProjectNotFound,

    #[error("Tarefa não encontrada")]
    TaskNotFound,

    #[error("Material não encontrado")]
    MaterialNotFound,

    // Mover um lead para Perdido sem passar pelo fluxo de perda
    // (que exige o motivo) é rejeitado.
    #[error("Perda exige um motivo")]
    LossRequiresReason,

    #[error("Colaborador de IA indisponível: {0}")]
    AiUnavailable(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::LeadNotFound => (StatusCode::NOT_FOUND, "Lead não encontrado."),
            AppError::ProjectNotFound => (StatusCode::NOT_FOUND, "Projeto não encontrado."),
            AppError::TaskNotFound => (StatusCode::NOT_FOUND, "Tarefa não encontrada."),
            AppError::MaterialNotFound => (StatusCode::NOT_FOUND, "Material não encontrado."),
            AppError::LossRequiresReason => (
                StatusCode::BAD_REQUEST,
                "Descartar um lead exige um motivo de perda confirmado.",
            ),
            // O painel que chamou a IA mostra a mensagem inline; o resto da
            // aplicação continua utilizável.
            AppError::AiUnavailable(ref msg) => {
                tracing::warn!("Falha no colaborador de IA: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "O assistente de IA está indisponível no momento. Tente novamente.",
                )
            }

            // Todos os outros erros viram 500. O `tracing` loga a mensagem
            // detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
