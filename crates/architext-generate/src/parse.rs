use serde::de::DeserializeOwned;
use serde_json::Value;

use architext_core::Validate;

use crate::engine::InvokeError;

/// Turn raw model text into a validated result.
///
/// Accepts a bare JSON object or one embedded in prose or a code fence, and
/// coerces numeric strings (`"$1,200"`) where the schema asks for numbers.
/// Anything else that does not fit is an error; nothing partial is returned.
pub fn decode<T: DeserializeOwned + Validate>(raw: &str, schema: &Value) -> Result<T, InvokeError> {
    let mut value = extract_json_object(raw).ok_or(InvokeError::NoJson)?;
    coerce(&mut value, schema, schema);
    let result: T = serde_json::from_value(value)?;
    result.validate()?;
    Ok(result)
}

/// Extract the JSON object from raw LLM output.
fn extract_json_object(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(v);
    }

    // Fall back to the outermost braces (handles ```json fences and chatter)
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

fn resolve<'a>(schema: &'a Value, root: &'a Value) -> &'a Value {
    let Some(reference) = schema.get("$ref").and_then(Value::as_str) else {
        return schema;
    };
    let name = reference
        .strip_prefix("#/$defs/")
        .or_else(|| reference.strip_prefix("#/definitions/"));
    name.and_then(|n| {
        root.get("$defs")
            .or_else(|| root.get("definitions"))
            .and_then(|defs| defs.get(n))
    })
    .unwrap_or(schema)
}

fn expects(schema: &Value, ty: &str) -> bool {
    match schema.get("type") {
        Some(Value::String(t)) => t == ty,
        Some(Value::Array(ts)) => ts.iter().any(|t| t == ty),
        _ => false,
    }
}

fn coerce(value: &mut Value, schema: &Value, root: &Value) {
    let schema = resolve(schema, root);

    let amount = match &*value {
        Value::String(s) if expects(schema, "number") => parse_amount(s),
        _ => None,
    };
    if let Some(n) = amount {
        *value = n;
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                for (key, sub) in props {
                    if let Some(v) = map.get_mut(key) {
                        coerce(v, sub, root);
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for item in items {
                    coerce(item, item_schema, root);
                }
            }
        }
        _ => {}
    }
}

/// "$1,234.50", "1234.5 USD" -> 1234.5
fn parse_amount(s: &str) -> Option<Value> {
    let cleaned: String = s
        .trim()
        .trim_end_matches("USD")
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let n: f64 = cleaned.parse().ok()?;
    serde_json::Number::from_f64(n).map(Value::Number)
}
