// src/services/ai_service.rs

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::common::error::AppError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const FLASH_MODEL: &str = "gemini-3-flash-preview";
const PRO_MODEL: &str = "gemini-3-pro-preview";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Resultado estruturado da análise de briefing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BriefingAnalysis {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub profile_summary: String,
}

impl Default for BriefingAnalysis {
    fn default() -> Self {
        Self {
            styles: Vec::new(),
            materials: Vec::new(),
            profile_summary: "Não foi possível estruturar a análise do briefing.".into(),
        }
    }
}

/// Cliente do colaborador de IA generativa (Gemini REST).
///
/// Toda operação é falível e lenta por natureza: timeout curto no cliente,
/// erro vira `AppError::AiUnavailable` e o chamador decide tentar de novo
/// com uma chamada nova. Não há retry nem backoff aqui dentro.
#[derive(Clone)]
pub struct AiService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AiService {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Falha ao criar o cliente HTTP");
        Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Endpoint alternativo, usado nos testes.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, model: &str, body: Value) -> Result<Value, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AiUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AiUnavailable(format!(
                "resposta {} do modelo {}",
                response.status(),
                model
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::AiUnavailable(e.to_string()))
    }

    fn extract_text(payload: &Value) -> Result<String, AppError> {
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| AppError::AiUnavailable("resposta sem texto".into()))
    }

    /// Analisa um briefing e devolve estilos, materiais e perfil do cliente.
    /// A resposta é pedida como JSON mas tratada como não confiável: tiramos
    /// cercas de markdown e, se ainda assim não parsear, caímos no shape
    /// default em vez de falhar.
    pub async fn analyze_briefing(&self, briefing: &str) -> Result<BriefingAnalysis, AppError> {
        let prompt = format!(
            "Analise o seguinte briefing de arquitetura/design e forneça 3 sugestões de estilo, \
             uma lista de materiais recomendados e um resumo do perfil do cliente. \
             Responda em JSON com as chaves styles, materials e profileSummary. \
             Briefing: {briefing}"
        );

        let payload = self
            .generate(
                FLASH_MODEL,
                json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": { "responseMimeType": "application/json" },
                }),
            )
            .await?;

        let text = Self::extract_text(&payload)?;
        Ok(parse_briefing(&text))
    }

    /// Mensagem de follow-up de WhatsApp para um lead numa etapa do funil.
    pub async fn generate_follow_up(
        &self,
        lead_name: &str,
        status_label: &str,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Escreva uma mensagem de WhatsApp para o cliente {lead_name} que está no estágio \
             \"{status_label}\". O tom deve ser EXTREMAMENTE persuasivo, elegante e \"agressivo\" \
             no sentido de exclusividade e urgência velada. Foque na transformação de vida e no \
             valor emocional do projeto. Estilo: Proximidade e Autoridade."
        );

        let payload = self
            .generate(FLASH_MODEL, json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .await?;
        Self::extract_text(&payload)
    }

    /// Estrutura de proposta comercial persuasiva a partir das notas do lead.
    pub async fn generate_proposal(
        &self,
        lead_name: &str,
        notes: &str,
        budget: Option<Decimal>,
    ) -> Result<String, AppError> {
        let budget_line = budget
            .map(|b| format!("O investimento estimado discutido foi de R$ {b}."))
            .unwrap_or_default();
        let prompt = format!(
            "Você é um arquiteto renomado com alto poder de fechamento. \
             Gere uma estrutura de proposta comercial persuasiva para {lead_name} baseada nas \
             seguintes notas: \"{notes}\". {budget_line}\n\n\
             A proposta deve seguir este roteiro:\n\
             1. O SONHO: Validação emocional.\n\
             2. O DIAGNÓSTICO: Problemas técnicos e estéticos.\n\
             3. A SOLUÇÃO EXCLUSIVA: Sua abordagem única.\n\
             4. ETAPAS DA JORNADA: Processo de trabalho.\n\
             5. O PRÓXIMO PASSO: CTA forte."
        );

        let payload = self
            .generate(PRO_MODEL, json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .await?;
        Self::extract_text(&payload)
    }

    /// Consultoria sobre texto normativo (plano diretor, código de obras).
    pub async fn analyze_regulatory(
        &self,
        context: &str,
        question: &str,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Você é um consultor técnico de arquitetura e urbanismo. \
             Baseado no texto normativo fornecido abaixo, responda à seguinte dúvida: \
             \"{question}\"\n\nTexto Normativo/Plano Diretor:\n{context}\n\n\
             Responda de forma técnica, citando possíveis artigos ou diretrizes mencionados no \
             texto. Seja direto e preciso."
        );

        let payload = self
            .generate(PRO_MODEL, json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .await?;
        Self::extract_text(&payload)
    }

    /// Gera um moodboard e devolve a imagem como data URL base64.
    /// `None` quando o modelo respondeu sem nenhuma parte de imagem.
    pub async fn generate_moodboard(&self, style: &str) -> Result<Option<String>, AppError> {
        let prompt = format!(
            "Um moodboard profissional de arquitetura e design de interiores de alto padrão. \
             Deve conter amostras de materiais, paleta de cores, e uma imagem conceito do \
             ambiente. Estilo solicitado: {style}. Estética minimalista, clean e luxuosa."
        );

        let payload = self
            .generate(
                IMAGE_MODEL,
                json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } },
                }),
            )
            .await?;

        let parts = payload["candidates"][0]["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        for part in parts {
            if let Some(data) = part["inlineData"]["data"].as_str() {
                return Ok(Some(format!("data:image/png;base64,{data}")));
            }
        }
        Ok(None)
    }
}

/// Parse defensivo do JSON de briefing: o modelo às vezes devolve o objeto
/// dentro de uma cerca ```json ... ```, às vezes devolve prosa.
fn parse_briefing(raw: &str) -> BriefingAnalysis {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    match serde_json::from_str::<BriefingAnalysis>(cleaned) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!("Análise de briefing fora do formato esperado: {}", e);
            BriefingAnalysis::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_briefing_strips_markdown_fences() {
        let raw = "```json\n{\"styles\": [\"Industrial\"], \"materials\": [\"Concreto\"], \
                   \"profileSummary\": \"Perfil urbano\"}\n```";
        let analysis = parse_briefing(raw);
        assert_eq!(analysis.styles, vec!["Industrial"]);
        assert_eq!(analysis.materials, vec!["Concreto"]);
        assert_eq!(analysis.profile_summary, "Perfil urbano");
    }

    #[test]
    fn parse_briefing_falls_back_on_prose() {
        let analysis = parse_briefing("O cliente busca um estilo aconchegante.");
        assert_eq!(analysis, BriefingAnalysis::default());
    }

    #[tokio::test]
    async fn unreachable_collaborator_maps_to_ai_unavailable() {
        // Porta de descarte: a conexão é recusada na hora.
        let service = AiService::new("test-key".into()).with_base_url("http://127.0.0.1:9");

        let first = service.analyze_briefing("briefing qualquer").await;
        assert!(matches!(first, Err(AppError::AiUnavailable(_))));

        // Uma nova tentativa é simplesmente uma chamada nova, sem estado preso.
        let second = service.generate_follow_up("Clara", "Briefing").await;
        assert!(matches!(second, Err(AppError::AiUnavailable(_))));
    }
}
