// src/services/notification_service.rs

use std::time::Duration;

use serde_json::json;

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Push de celular via Telegram. Fire-and-forget: a chamada despacha uma
/// task e retorna na hora; falha de rede ou do bot fica só no log, nunca
/// chega ao usuário e nunca é retentada.
#[derive(Clone)]
pub struct NotificationService {
    client: reqwest::Client,
    config: Option<TelegramConfig>,
}

impl NotificationService {
    pub fn new(config: Option<TelegramConfig>) -> Self {
        if config.is_none() {
            tracing::warn!("⚠️ Token ou chat do Telegram não configurados, push desabilitado.");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Falha ao criar o cliente HTTP");
        Self { client, config }
    }

    pub fn notify(&self, title: &str, message: &str) {
        let Some(config) = self.config.clone() else {
            tracing::debug!("Push ignorado (sem credenciais): {}", title);
            return;
        };

        tracing::info!("🚀 [SPAZIO PUSH] Enviando: {}", title);

        // Texto formatado com Markdown (negrito e itálico).
        let text = format!("🚨 *{title}*\n\n{message}\n\n_Enviado via Spazio OS_");
        let url = format!("https://api.telegram.org/bot{}/sendMessage", config.bot_token);
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&json!({
                    "chat_id": config.chat_id,
                    "text": text,
                    "parse_mode": "Markdown",
                }))
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("✅ Notificação enviada para o celular!");
                }
                Ok(resp) => {
                    tracing::error!("❌ Telegram respondeu {}", resp.status());
                }
                Err(e) => {
                    tracing::error!("❌ Erro de rede no push: {}", e);
                }
            }
        });
    }
}
