//! Request validation shared by every adapter.
//!
//! Adapters call [`validate_request`] before building any vendor payload, so
//! the rules cannot drift between backends.

use serde_json::Value;

use crate::error::RouterError;
use crate::types::{Message, Parameters, Role};

/// Model ids must be non-empty.
pub fn validate_model(model: &str) -> Result<(), RouterError> {
    if model.trim().is_empty() {
        return Err(RouterError::invalid("model name must be a non-empty string"));
    }
    Ok(())
}

/// Messages must be non-empty and every content must be non-blank.
pub fn validate_messages(messages: &[Message]) -> Result<(), RouterError> {
    if messages.is_empty() {
        return Err(RouterError::invalid("messages must be a non-empty list"));
    }
    for (i, message) in messages.iter().enumerate() {
        if message.content.trim().is_empty() {
            return Err(RouterError::invalid(format!(
                "message {i} ({}) content must be a non-empty string",
                message.role
            )));
        }
    }
    Ok(())
}

/// Reject the first parameter name (in key order) not in `allowed`.
pub fn validate_parameters(parameters: &Parameters, allowed: &[&str]) -> Result<(), RouterError> {
    if let Some(key) = parameters.keys().find(|k| !allowed.contains(&k.as_str())) {
        return Err(RouterError::invalid(format!("unknown parameter: {key}")));
    }
    Ok(())
}

/// Model, then messages, then parameters.
pub fn validate_request(
    model: &str,
    messages: &[Message],
    parameters: &Parameters,
    allowed: &[&str],
) -> Result<(), RouterError> {
    validate_model(model)?;
    validate_messages(messages)?;
    validate_parameters(parameters, allowed)
}

/// Parse untyped JSON (e.g. from a file or CLI) into messages.
///
/// The value must be a non-empty array of objects with exactly the keys
/// `role` and `content`, both non-empty strings, `role` being one of
/// `system`, `user`, `assistant`.
pub fn parse_messages(value: &Value) -> Result<Vec<Message>, RouterError> {
    let items = match value.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(RouterError::invalid("messages must be a non-empty list of objects")),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let obj = item
                .as_object()
                .ok_or_else(|| RouterError::invalid(format!("message {i} must be an object")))?;

            if obj.len() != 2 || !obj.contains_key("role") || !obj.contains_key("content") {
                return Err(RouterError::invalid(format!(
                    "message {i} must contain only 'role' and 'content' keys"
                )));
            }

            let role = non_empty_str(obj.get("role"));
            let content = non_empty_str(obj.get("content"));
            let (Some(role), Some(content)) = (role, content) else {
                return Err(RouterError::invalid(format!(
                    "message {i} 'role' and 'content' must be non-empty strings"
                )));
            };

            let role = Role::parse(role).ok_or_else(|| {
                RouterError::invalid(format!(
                    "message {i} has unrecognized role '{role}' (expected system, user, or assistant)"
                ))
            })?;

            Ok(Message::new(role, content))
        })
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, Value)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_validate_model() {
        assert!(validate_model("gpt-4o").is_ok());
        assert!(validate_model("").unwrap_err().is_invalid_argument());
        assert!(validate_model("   ").is_err());
    }

    #[test]
    fn test_validate_messages_empty() {
        let err = validate_messages(&[]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_validate_messages_names_offending_index() {
        let messages = vec![Message::system("ok"), Message::user("fine"), Message::assistant(" ")];
        let err = validate_messages(&messages).unwrap_err();
        assert!(err.to_string().contains("message 2"));
    }

    #[test]
    fn test_validate_parameters_first_unknown_key() {
        let allowed = ["temperature", "top_p"];
        let p = params(&[
            ("temperature", json!(0.7)),
            ("zeta", json!(1)),
            ("beta", json!(1)),
        ]);
        let err = validate_parameters(&p, &allowed).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: unknown parameter: beta");
    }

    #[test]
    fn test_validate_parameters_ok() {
        let p = params(&[("temperature", json!(0.2))]);
        assert!(validate_parameters(&p, &["temperature"]).is_ok());
        assert!(validate_parameters(&Parameters::new(), &[]).is_ok());
    }

    #[test]
    fn test_validate_request_checks_model_first() {
        let err = validate_request("", &[], &Parameters::new(), &[]).unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    // ── parse_messages ──

    #[test]
    fn test_parse_messages_ok() {
        let value = json!([
            {"role": "system", "content": "Be terse."},
            {"role": "user", "content": "Hi"}
        ]);
        let messages = parse_messages(&value).unwrap();
        assert_eq!(messages, vec![Message::system("Be terse."), Message::user("Hi")]);
    }

    #[test]
    fn test_parse_messages_rejects_empty_and_non_array() {
        assert!(parse_messages(&json!([])).is_err());
        assert!(parse_messages(&json!({"role": "user"})).is_err());
    }

    #[test]
    fn test_parse_messages_rejects_extra_key() {
        let value = json!([{"role": "user", "content": "hi", "name": "x"}]);
        let err = parse_messages(&value).unwrap_err();
        assert!(err.to_string().contains("message 0"));
    }

    #[test]
    fn test_parse_messages_rejects_bad_role() {
        let value = json!([
            {"role": "user", "content": "hi"},
            {"role": "tool", "content": "x"}
        ]);
        let err = parse_messages(&value).unwrap_err();
        assert!(err.to_string().contains("message 1"));
        assert!(err.to_string().contains("tool"));
    }

    #[test]
    fn test_parse_messages_rejects_non_string_content() {
        let value = json!([{"role": "user", "content": 3}]);
        assert!(parse_messages(&value).is_err());
        let value = json!([{"role": "user", "content": ""}]);
        assert!(parse_messages(&value).is_err());
    }
}
