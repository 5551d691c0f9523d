//! Ambient values of the request being served, passed explicitly into every call.

use std::collections::BTreeMap;

/// Key under which the correlation id is stored.
pub const LOG_ID: &str = "logId";

/// Request-scoped values set by the surrounding framework. Read-only for the invoker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    values: BTreeMap<String, String>,
}

impl CallContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying only a correlation id.
    pub fn with_correlation_id(id: impl Into<String>) -> Self {
        Self::new().with(LOG_ID, id)
    }

    /// Returns the context with `key` set to `value`, replacing any earlier value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Looks up an ambient value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The value stored under [`LOG_ID`].
    pub fn correlation_id(&self) -> Option<&str> {
        self.get(LOG_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_correlation_id() {
        assert_eq!(CallContext::new().correlation_id(), None);
    }

    #[test]
    fn test_correlation_id_is_read_from_log_id() {
        let ctx = CallContext::new().with("tenant", "acme").with(LOG_ID, "req-1");
        assert_eq!(ctx.correlation_id(), Some("req-1"));
        assert_eq!(ctx.get("tenant"), Some("acme"));
        assert_eq!(ctx, CallContext::with_correlation_id("req-1").with("tenant", "acme"));
    }
}
