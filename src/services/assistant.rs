//! AI assistant orchestrator.
//!
//! Linear pipeline: resolve the caller's company (optional), build a
//! monitoring context block, compose the prompt, stream the generation and
//! accumulate fragments, then fall back to canned text when the stream
//! yields nothing or fails. Upstream failure is downgraded to a normal
//! reply carrying an `error` field - the chat UI always gets a usable
//! bubble; only missing input or a missing API credential surface as hard
//! HTTP errors, and those are checked before any of this runs.

use futures::StreamExt;

use crate::ai::TextGenerator;
use crate::config::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::MonitoringData;

pub const SYSTEM_INSTRUCTION: &str = "Você é o assistente do dashboard de monitoramento, \
especializado em infraestrutura de rede, segurança e bancos de dados. Responda de forma \
objetiva, em português, com base no contexto de monitoramento fornecido. Nunca revele \
dados sensíveis como senhas, chaves ou endereços internos.";

const APOLOGY: &str = "Desculpe, não consegui consultar o assistente de IA agora. \
Tente novamente em instantes.";

const GENERIC_FALLBACK: &str = "Me diga o que você gostaria de priorizar no monitoramento: \
firewalls, switches, banco de dados ou links de internet?";

/// Ordered (keywords, response) pairs for the no-output fallback; first
/// matching keyword wins, so keep the enumeration order.
const FALLBACK_RESPONSES: &[(&[&str], &str)] = &[
    (
        &["firewall"],
        "No momento seus firewalls estão operando normalmente, sem ameaças críticas \
         registradas nas últimas horas.",
    ),
    (
        &["switch"],
        "Os switches da sua rede estão online, com portas ativas e tráfego dentro do esperado.",
    ),
    (
        &["banco", "database"],
        "O servidor de banco de dados está em estado de atenção: acompanhe as conexões ativas \
         e as queries mais lentas.",
    ),
    (
        &["internet", "link"],
        "Seus links de internet estão estáveis, com latência dentro da faixa normal.",
    ),
];

/// Reply returned to the chat UI. `error` is populated when the external
/// service failed and the response text is canned.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub response: String,
    pub error: Option<String>,
}

/// Build the monitoring context block for an optional user id.
///
/// Any miss along the way - no user id, unknown user, user without a
/// company, company without records, unreachable database - degrades to
/// the fixed mock block rather than failing the request.
pub async fn build_context(user_id: Option<i64>) -> String {
    let Some(user_id) = user_id else {
        return mock_context();
    };

    let pool = match DatabaseManager::pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("assistant context skipped, database unavailable: {}", e);
            return mock_context();
        }
    };

    let company_id: Option<i64> =
        match sqlx::query_scalar::<_, Option<i64>>("SELECT company_id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&pool)
            .await
        {
            Ok(row) => row.flatten(),
            Err(e) => {
                tracing::warn!("assistant identity lookup failed for user {}: {}", user_id, e);
                None
            }
        };

    let Some(company_id) = company_id else {
        return mock_context();
    };

    let records = sqlx::query_as::<_, MonitoringData>(
        "SELECT id, company_id, device_type, device_name, status, metrics, timestamp \
         FROM monitoring_data \
         WHERE company_id = $1 \
         ORDER BY timestamp DESC \
         LIMIT $2",
    )
    .bind(company_id)
    .bind(config().assistant.context_records)
    .fetch_all(&pool)
    .await;

    match records {
        Ok(records) if !records.is_empty() => format_records(&records),
        Ok(_) => mock_context(),
        Err(e) => {
            tracing::warn!("assistant monitoring lookup failed for company {}: {}", company_id, e);
            mock_context()
        }
    }
}

/// Serialize monitoring rows into a context block labelled with the count.
pub fn format_records(records: &[MonitoringData]) -> String {
    let mut block = if records.len() == 1 {
        "Contexto de monitoramento (1 registro mais recente):".to_string()
    } else {
        format!(
            "Contexto de monitoramento ({} registros mais recentes, do mais novo ao mais antigo):",
            records.len()
        )
    };
    for record in records {
        block.push_str(&format!(
            "\n- [{}] {} ({}): {} | métricas: {}",
            record.timestamp.to_rfc3339(),
            record.device_name,
            record.device_type,
            record.status,
            record.metrics
        ));
    }
    block
}

/// Fixed context used when no per-company records are reachable.
pub fn mock_context() -> String {
    "Dados de monitoramento detalhados indisponíveis no momento. Dispositivos conhecidos:\n\
     - Firewall Principal (firewall): online\n\
     - Switch Core (switch): online\n\
     - Database Server (database): warning\n\
     - Link Internet Principal (internet): online"
        .to_string()
}

/// Concatenate system instruction, context block and the user prompt.
pub fn compose_prompt(context: &str, prompt: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n\n{context}\n\nPergunta do usuário: {prompt}")
}

/// Run the generation: single attempt, fragments accumulated in arrival
/// order. Empty output falls back by keyword; any failure becomes a canned
/// apology plus the failure text in `error`.
pub async fn run(
    generator: &dyn TextGenerator,
    full_prompt: &str,
    user_prompt: &str,
) -> AssistantReply {
    let mut stream = match generator.generate(full_prompt).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("assistant generation failed to start: {}", e);
            return AssistantReply { response: APOLOGY.to_string(), error: Some(e.to_string()) };
        }
    };

    let mut accumulated = String::new();
    while let Some(fragment) = stream.next().await {
        match fragment {
            Ok(text) => accumulated.push_str(&text),
            Err(e) => {
                tracing::warn!("assistant stream failed: {}", e);
                return AssistantReply { response: APOLOGY.to_string(), error: Some(e.to_string()) };
            }
        }
    }

    if accumulated.trim().is_empty() {
        return AssistantReply { response: keyword_fallback(user_prompt).to_string(), error: None };
    }

    AssistantReply { response: accumulated, error: None }
}

/// Canned reply for an empty generation, chosen by first matching keyword.
pub fn keyword_fallback(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    for &(keywords, response) in FALLBACK_RESPONSES {
        if keywords.iter().any(|keyword| prompt.contains(keyword)) {
            return response;
        }
    }
    GENERIC_FALLBACK
}
