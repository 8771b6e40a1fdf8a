//! Message normalization performed before handing a [`StreamInput`] to a
//! provider: cache hints, tool-call ID sanitization, empty-content pruning.

use conduit_protocol::ProviderType;

use crate::chunk::WireMessage;

/// Number of leading/trailing messages that receive a cache breakpoint hint.
const CACHE_HINT_WINDOW: usize = 2;

/// Mark the first and last `CACHE_HINT_WINDOW` messages as cache
/// breakpoints, the way providers that bill for prompt caching expect.
/// No-op on message lists shorter than `2 * CACHE_HINT_WINDOW` (every
/// message would be hinted anyway; cheaper to hint all of them once).
pub fn inject_cache_hints(messages: &mut [WireMessage]) {
    let len = messages.len();
    if len == 0 {
        return;
    }
    let window = CACHE_HINT_WINDOW.min(len);
    for msg in messages.iter_mut().take(window) {
        msg.cache_hint = true;
    }
    for msg in messages.iter_mut().rev().take(window) {
        msg.cache_hint = true;
    }
}

/// Drop empty assistant messages, which some providers (Anthropic among
/// them) reject outright.
pub fn drop_empty_assistant_messages(messages: &mut Vec<WireMessage>) {
    messages.retain(|m| {
        !matches!(m.role, crate::chunk::WireRole::Assistant) || !m.is_empty()
    });
}

/// Sanitize a tool-call ID to the character set a given provider accepts.
pub fn sanitize_tool_call_id(id: &str, provider: ProviderType) -> String {
    match provider {
        ProviderType::Anthropic => id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect(),
        // Mistral-family tool-call IDs must be exactly 9 alphanumeric
        // characters.
        ProviderType::Volcengine | ProviderType::Zai => {
            let alnum: String = id.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
            if alnum.len() >= 9 {
                alnum[..9].to_string()
            } else {
                format!("{alnum:0<9}").chars().take(9).collect()
            }
        }
        ProviderType::Openai | ProviderType::Gemini | ProviderType::OpenaiCompat => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::WireRole;

    #[test]
    fn cache_hints_mark_first_and_last_window() {
        let mut messages: Vec<WireMessage> = (0..10)
            .map(|i| WireMessage::text(WireRole::User, format!("m{i}")))
            .collect();
        inject_cache_hints(&mut messages);

        let hinted: Vec<bool> = messages.iter().map(|m| m.cache_hint).collect();
        assert_eq!(
            hinted,
            vec![true, true, false, false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn cache_hints_on_short_list_hints_everything() {
        let mut messages: Vec<WireMessage> =
            vec![WireMessage::text(WireRole::User, "only one")];
        inject_cache_hints(&mut messages);
        assert!(messages[0].cache_hint);
    }

    #[test]
    fn drops_empty_assistant_but_keeps_empty_user() {
        let mut messages = vec![
            WireMessage::text(WireRole::Assistant, ""),
            WireMessage::text(WireRole::User, ""),
            WireMessage::text(WireRole::Assistant, "hi"),
        ];
        drop_empty_assistant_messages(&mut messages);
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0].role, WireRole::User));
    }

    #[test]
    fn anthropic_id_sanitization_keeps_allowed_chars_only() {
        let sanitized = sanitize_tool_call_id("call!!@#123", ProviderType::Anthropic);
        assert_eq!(sanitized, "call____123");
    }

    #[test]
    fn mistral_family_id_is_exactly_nine_alphanumeric() {
        let long = sanitize_tool_call_id("abcdefghijk", ProviderType::Volcengine);
        assert_eq!(long.len(), 9);
        let short = sanitize_tool_call_id("ab", ProviderType::Zai);
        assert_eq!(short.len(), 9);
    }
}
