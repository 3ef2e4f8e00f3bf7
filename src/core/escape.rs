use serde_json::Value;

/// Coerces a JSON value into its CSV cell text. Null becomes the empty
/// string; objects and arrays keep their canonical JSON text so they can be
/// re-inflated later.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Escapes one CSV cell. Values containing a comma, double quote, LF, or CR
/// are wrapped in double quotes with embedded quotes doubled; plain values
/// pass through unchanged. An empty string stays empty.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
