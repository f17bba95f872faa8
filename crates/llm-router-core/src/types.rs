//! Core types for llm-router — the backend-agnostic request/response model.
//!
//! Callers build [`Message`]s and a [`Parameters`] map; adapters hand back a
//! [`ChatResponse`]. Vendor-native shapes never leak through these types
//! except via [`ChatResponse::raw`].

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// The author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// The wire name (`"system"`, `"user"`, `"assistant"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parse a wire name. Exact, lowercase match only.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat turn: a role and its text.
///
/// Serialized as `{"role": "...", "content": "..."}`, which is also the
/// OpenAI wire shape. Unknown fields are rejected on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// ─────────────────────────────────────────────
// Parameters
// ─────────────────────────────────────────────

/// Optional named tuning values (`temperature`, `max_tokens`, …).
///
/// Ordered, so "first unknown key" in validation errors is deterministic.
pub type Parameters = BTreeMap<String, serde_json::Value>;

// ─────────────────────────────────────────────
// Usage
// ─────────────────────────────────────────────

/// Token counters reported by a backend.
///
/// The key set is backend-specific (`prompt_tokens` for OpenAI,
/// `input_tokens` for Anthropic, …). A counter the backend did not report
/// is stored as `None` and serialized as `"unknown"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    counters: BTreeMap<String, Option<u64>>,
}

impl Usage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `keys` out of a vendor `usage` object. Missing or non-integer
    /// fields become `None`; `usage` itself may be absent.
    pub fn from_fields(usage: Option<&serde_json::Value>, keys: &[&str]) -> Self {
        let counters = keys
            .iter()
            .map(|key| {
                let value = usage.and_then(|u| u.get(*key)).and_then(|v| v.as_u64());
                (key.to_string(), value)
            })
            .collect();
        Usage { counters }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<u64>) {
        self.counters.insert(key.into(), value);
    }

    /// The counter for `key`, if the backend reported it.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counters.get(key).copied().flatten()
    }

    /// Whether `key` is part of this backend's counter set (known or not).
    pub fn contains(&self, key: &str) -> bool {
        self.counters.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u64>)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl Serialize for Usage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.counters.len()))?;
        for (key, value) in &self.counters {
            match value {
                Some(n) => map.serialize_entry(key, n)?,
                None => map.serialize_entry(key, "unknown")?,
            }
        }
        map.end()
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.counters {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            match value {
                Some(n) => write!(f, "{key}={n}")?,
                None => write!(f, "{key}=unknown")?,
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Normalized response
// ─────────────────────────────────────────────

/// The normalized result of one chat call, whatever backend answered.
#[derive(Clone, Debug, Serialize)]
pub struct ChatResponse {
    /// Registry name of the backend that answered (e.g. `"openai"`).
    pub provider: String,
    /// The model id the caller asked for.
    pub model: String,
    /// Primary text content; empty when the backend returned none.
    pub content: String,
    /// Backend-specific token counters.
    pub usage: Usage,
    /// The backend's untouched response body.
    pub raw: serde_json::Value,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serialization() {
        let msg = Message::system("You are a helpful assistant.");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json, json!({"role": "system", "content": "You are a helpful assistant."}));
    }

    #[test]
    fn test_message_deserialization() {
        let msg: Message = serde_json::from_value(json!({"role": "assistant", "content": "42"})).unwrap();
        assert_eq!(msg, Message::assistant("42"));
    }

    #[test]
    fn test_message_rejects_unknown_role() {
        let result: Result<Message, _> =
            serde_json::from_value(json!({"role": "tool", "content": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_message_rejects_extra_fields() {
        let result: Result<Message, _> =
            serde_json::from_value(json!({"role": "user", "content": "x", "name": "bob"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("system"), Some(Role::System));
        assert_eq!(Role::parse("User"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    // ── Usage ──

    #[test]
    fn test_usage_from_fields() {
        let raw = json!({"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6});
        let usage = Usage::from_fields(
            Some(&raw),
            &["prompt_tokens", "completion_tokens", "total_tokens"],
        );

        assert_eq!(usage.get("prompt_tokens"), Some(5));
        assert_eq!(usage.get("completion_tokens"), Some(1));
        assert_eq!(usage.get("total_tokens"), Some(6));
        assert_eq!(usage.len(), 3);
    }

    #[test]
    fn test_usage_missing_counter_is_unknown() {
        let raw = json!({"input_tokens": 12});
        let usage = Usage::from_fields(Some(&raw), &["input_tokens", "output_tokens"]);

        assert_eq!(usage.get("input_tokens"), Some(12));
        assert_eq!(usage.get("output_tokens"), None);
        assert!(usage.contains("output_tokens"));

        let json = serde_json::to_value(&usage).unwrap();
        assert_eq!(json, json!({"input_tokens": 12, "output_tokens": "unknown"}));
    }

    #[test]
    fn test_usage_absent_object() {
        let usage = Usage::from_fields(None, &["prompt_tokens"]);
        assert_eq!(usage.get("prompt_tokens"), None);
        assert_eq!(usage.to_string(), "prompt_tokens=unknown");
    }

    #[test]
    fn test_usage_display() {
        let mut usage = Usage::new();
        usage.insert("output_tokens", Some(3));
        usage.insert("input_tokens", Some(7));
        assert_eq!(usage.to_string(), "input_tokens=7, output_tokens=3");
    }

    #[test]
    fn test_chat_response_serialization() {
        let resp = ChatResponse {
            provider: "openai".into(),
            model: "gpt-4o".into(),
            content: "hi".into(),
            usage: Usage::from_fields(None, &["total_tokens"]),
            raw: json!({"id": "x"}),
        };
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["provider"], "openai");
        assert_eq!(json["usage"]["total_tokens"], "unknown");
        assert_eq!(json["raw"]["id"], "x");
    }
}
