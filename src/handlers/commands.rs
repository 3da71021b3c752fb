// src/handlers/commands.rs

use axum::{Json, extract::Query, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

// Paleta de comandos (Cmd+K). A tabela é fixa; o cliente cuida de setas,
// Enter e Escape, o backend cuida da lista e do filtro.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    Navigation,
    Action,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: CommandKind,
    /// Seção de destino (NAVIGATION) ou intenção disparada (ACTION).
    pub target: &'static str,
}

const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        id: "nav-dashboard",
        label: "Ir para Dashboard",
        kind: CommandKind::Navigation,
        target: "dashboard",
    },
    CommandEntry {
        id: "nav-crm",
        label: "Ir para CRM / Vendas",
        kind: CommandKind::Navigation,
        target: "crm",
    },
    CommandEntry {
        id: "nav-projects",
        label: "Ir para Projetos",
        kind: CommandKind::Navigation,
        target: "projects",
    },
    CommandEntry {
        id: "nav-finance",
        label: "Ir para Financeiro",
        kind: CommandKind::Navigation,
        target: "finance",
    },
    CommandEntry {
        id: "act-lead",
        label: "Novo Lead",
        kind: CommandKind::Action,
        target: "new-lead",
    },
    CommandEntry {
        id: "act-project",
        label: "Novo Projeto",
        kind: CommandKind::Action,
        target: "new-project",
    },
    CommandEntry {
        id: "act-invoice",
        label: "Lançar Receita/Despesa",
        kind: CommandKind::Action,
        target: "new-transaction",
    },
];

#[derive(Debug, Deserialize)]
pub struct CommandQuery {
    pub q: Option<String>,
}

/// Filtra a paleta por substring do label, sem diferenciar maiúsculas.
fn filter_commands(query: Option<&str>) -> Vec<CommandEntry> {
    let needle = query.unwrap_or_default().to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| cmd.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// GET /api/commands?q=
pub async fn list_commands(Query(params): Query<CommandQuery>) -> impl IntoResponse {
    let commands = filter_commands(params.q.as_deref());
    (StatusCode::OK, Json(commands))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_the_whole_palette() {
        assert_eq!(filter_commands(None).len(), COMMANDS.len());
        assert_eq!(filter_commands(Some("")).len(), COMMANDS.len());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let hits = filter_commands(Some("novo"));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|c| c.kind == CommandKind::Action));

        let finance = filter_commands(Some("FINANCEIRO"));
        assert_eq!(finance.len(), 1);
        assert_eq!(finance[0].id, "nav-finance");
    }

    #[test]
    fn no_match_returns_empty_list() {
        assert!(filter_commands(Some("inventário")).is_empty());
    }
}
