/// Build the composite storage key for a (session, agent) conversation.
///
/// Backends that store both parts in a single column use this layout;
/// `#` never appears in agent ids, so the key splits unambiguously.
#[must_use]
pub fn composite_key(session_key: &str, agent_id: &str) -> String {
    format!("{session_key}#{agent_id}")
}

#[cfg(test)]
mod tests {
    use super::composite_key;

    #[test]
    fn key_joins_session_and_agent() {
        assert_eq!(composite_key("abc", "order-management"), "abc#order-management");
    }
}
