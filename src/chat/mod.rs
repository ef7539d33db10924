//! Keyword-matching chat surface. No AI involved: a fixed, ordered list of
//! (keyword, response) pairs checked by substring against the lowercased
//! message, first hit wins. An ordered slice rather than a map because the
//! choice is order-sensitive when a message contains several keywords.

/// Enumeration order matters; do not sort.
pub const CANNED_RESPONSES: &[(&str, &str)] = &[
    (
        "widgets",
        "Entendi! Vou adicionar widgets para você. Que tipo de informação você quer visualizar? \
         Status dos dispositivos, gráficos de performance, alertas críticos?",
    ),
    (
        "firewall",
        "Perfeito! Vou configurar o dashboard para exibir o status dos firewalls, tentativas de \
         invasão bloqueadas e regras ativas.",
    ),
    (
        "switch",
        "Ótimo! Adicionarei informações sobre switches: portas ativas, tráfego de rede e \
         dispositivos conectados.",
    ),
    (
        "banco",
        "Entendido! Vou incluir métricas de banco de dados: conexões ativas, queries lentas e \
         uso de memória.",
    ),
    (
        "internet",
        "Configurando! Vou mostrar informações dos links de internet: latência, banda utilizada \
         e disponibilidade.",
    ),
    (
        "pronto",
        "Dashboard configurado com sucesso! Você será redirecionado em instantes.",
    ),
];

pub const DEFAULT_RESPONSE: &str = "Como posso ajudar você a personalizar seu dashboard?";

/// Map a free-text message to a canned response. Case-insensitive substring
/// match, fixed enumeration order, first match wins.
pub fn respond(message: &str) -> &'static str {
    let message = message.to_lowercase();
    for &(keyword, response) in CANNED_RESPONSES {
        if message.contains(keyword) {
            return response;
        }
    }
    DEFAULT_RESPONSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keyword_case_insensitive() {
        let reply = respond("me ajuda com FIREWALL");
        assert!(reply.starts_with("Perfeito! Vou configurar o dashboard"));
    }

    #[test]
    fn matches_substring_inside_sentence() {
        let reply = respond("quero ver o banco de dados");
        assert!(reply.contains("banco de dados"));
    }

    #[test]
    fn first_match_wins_in_enumeration_order() {
        // "widgets" precedes "firewall" in the list, so it wins even though
        // both keywords are present.
        let reply = respond("widgets do firewall");
        assert!(reply.starts_with("Entendi! Vou adicionar widgets"));
    }

    #[test]
    fn unmatched_message_gets_default_prompt() {
        assert_eq!(respond("bom dia"), DEFAULT_RESPONSE);
    }

    #[test]
    fn pronto_closes_the_flow() {
        assert!(respond("pronto!").contains("configurado com sucesso"));
    }
}
