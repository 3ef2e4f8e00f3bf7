use crate::core::escape::field_text;
use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde_json::{Map, Value};

/// Union of the field names across all records, in first-seen order.
pub fn derive_headers(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for key in record.data.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

/// Maps a record onto the header list, one cell per header. Absent or null
/// fields become empty cells; nested objects and arrays become their JSON
/// text. Cells are returned unescaped; escaping happens at the table layer.
pub fn flatten_record(record: &Record, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| record.data.get(h).map(field_text).unwrap_or_default())
        .collect()
}

/// Like [`flatten_record`] but for a raw JSON value, which must be an
/// object.
pub fn flatten_value(value: &Value, headers: &[String]) -> Result<Vec<String>> {
    match value {
        Value::Object(map) => {
            let record = Record::new(map.clone());
            Ok(flatten_record(&record, headers))
        }
        other => Err(EtlError::invalid_input(format!(
            "cannot flatten non-object value: {}",
            other
        ))),
    }
}

/// Controls the optional post-processing steps applied while inflating.
#[derive(Debug, Clone)]
pub struct InflateOptions {
    /// Columns whose cells are re-inflated from JSON text when they look
    /// like an object.
    pub structured_columns: Vec<String>,
    /// Coerce non-empty all-digit cells to JSON numbers. Off in the plain
    /// codec profile, on in the serving profile.
    pub coerce_numeric: bool,
}

impl Default for InflateOptions {
    fn default() -> Self {
        Self {
            structured_columns: vec!["address".to_string(), "company".to_string()],
            coerce_numeric: false,
        }
    }
}

impl InflateOptions {
    /// Profile used by the HTTP serving path: identifier-style all-digit
    /// cells come back as numbers.
    pub fn serving() -> Self {
        Self {
            coerce_numeric: true,
            ..Self::default()
        }
    }
}

/// Rebuilds a record from a header list and a row of raw cells.
///
/// Cells map positionally; a missing cell is the empty string and extra
/// cells are dropped. A duplicated header name keeps the later occurrence's
/// value.
pub fn inflate_row(headers: &[String], values: &[String], options: &InflateOptions) -> Record {
    let mut data = Map::new();
    for (j, header) in headers.iter().enumerate() {
        let raw = values.get(j).map(String::as_str).unwrap_or("");
        let value = if options.structured_columns.iter().any(|c| c == header) {
            reinflate_structured(raw)
        } else if options.coerce_numeric {
            coerce_cell(raw)
        } else {
            Value::String(raw.to_string())
        };
        data.insert(header.clone(), value);
    }
    Record::new(data)
}

/// Best-effort re-inflation of a structured cell. Tries strict JSON first,
/// then a normalized form that tolerates bare keys and single quotes
/// (matching what loosely serialized upstream objects look like). Falls
/// back to the raw string; never errors.
fn reinflate_structured(raw: &str) -> Value {
    if !(raw.starts_with('{') && raw.ends_with('}')) {
        return Value::String(raw.to_string());
    }
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return value;
    }
    let re = Regex::new(r"([A-Za-z0-9_]+):").unwrap();
    let normalized = re.replace_all(raw, "\"$1\":").replace('\'', "\"");
    match serde_json::from_str::<Value>(&normalized) {
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

fn coerce_cell(raw: &str) -> Value {
    let digits = Regex::new(r"^\d+$").unwrap();
    if digits.is_match(raw) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::Number(n.into());
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record::new(map),
            _ => panic!("test record must be an object"),
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_headers_first_seen_union() {
        let records = vec![
            record(json!({"id": 1, "name": "Jane"})),
            record(json!({"id": 2, "email": "j@example.com", "name": "Joe"})),
        ];
        assert_eq!(derive_headers(&records), headers(&["id", "name", "email"]));
    }

    #[test]
    fn test_flatten_absent_and_null_fields_are_empty() {
        let r = record(json!({"id": 1, "name": null}));
        let cells = flatten_record(&r, &headers(&["id", "name", "email"]));
        assert_eq!(cells, vec!["1", "", ""]);
    }

    #[test]
    fn test_flatten_nested_object_becomes_json_text() {
        let r = record(json!({"id": 7, "address": {"city": "Gwenborough", "zipcode": "92998"}}));
        let cells = flatten_record(&r, &headers(&["id", "address"]));
        assert_eq!(cells[1], "{\"city\":\"Gwenborough\",\"zipcode\":\"92998\"}");
    }

    #[test]
    fn test_flatten_value_rejects_non_objects() {
        let err = flatten_value(&json!([1, 2]), &headers(&["id"])).unwrap_err();
        assert!(matches!(err, EtlError::InvalidInput { .. }));
        let err = flatten_value(&Value::Null, &headers(&["id"])).unwrap_err();
        assert!(matches!(err, EtlError::InvalidInput { .. }));
    }

    #[test]
    fn test_inflate_short_row_pads_with_empty() {
        let r = inflate_row(
            &headers(&["id", "name", "email"]),
            &["1".to_string(), "Jane Doe".to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data["id"], json!("1"));
        assert_eq!(r.data["name"], json!("Jane Doe"));
        assert_eq!(r.data["email"], json!(""));
    }

    #[test]
    fn test_inflate_long_row_drops_extras() {
        let r = inflate_row(
            &headers(&["id", "name"]),
            &["1".to_string(), "Jane".to_string(), "extra".to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data.len(), 2);
        assert_eq!(r.data["name"], json!("Jane"));
    }

    #[test]
    fn test_inflate_duplicate_header_last_wins() {
        let r = inflate_row(
            &headers(&["id", "name", "name"]),
            &["1".to_string(), "First".to_string(), "Second".to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data["name"], json!("Second"));
    }

    #[test]
    fn test_structured_column_parses_strict_json() {
        let r = inflate_row(
            &headers(&["address"]),
            &["{\"city\":\"Gwenborough\"}".to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data["address"], json!({"city": "Gwenborough"}));
    }

    #[test]
    fn test_structured_column_parses_loose_object_literal() {
        let r = inflate_row(
            &headers(&["company"]),
            &["{name: 'Romaguera-Crona', bs: 'synergize'}".to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(
            r.data["company"],
            json!({"name": "Romaguera-Crona", "bs": "synergize"})
        );
    }

    #[test]
    fn test_structured_column_falls_back_to_raw_string() {
        let raw = "{not json at all";
        let r = inflate_row(
            &headers(&["address"]),
            &[raw.to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data["address"], json!(raw));

        let garbage = "{]}";
        let r = inflate_row(
            &headers(&["address"]),
            &[garbage.to_string()],
            &InflateOptions::default(),
        );
        assert_eq!(r.data["address"], json!(garbage));
    }

    #[test]
    fn test_numeric_coercion_only_in_serving_profile() {
        let h = headers(&["id", "phone"]);
        let row = vec!["42".to_string(), "1-770-736-8031".to_string()];

        let plain = inflate_row(&h, &row, &InflateOptions::default());
        assert_eq!(plain.data["id"], json!("42"));

        let serving = inflate_row(&h, &row, &InflateOptions::serving());
        assert_eq!(serving.data["id"], json!(42));
        assert_eq!(serving.data["phone"], json!("1-770-736-8031"));
    }

    #[test]
    fn test_numeric_coercion_skips_empty_and_huge_cells() {
        let h = headers(&["id"]);
        let r = inflate_row(&h, &["".to_string()], &InflateOptions::serving());
        assert_eq!(r.data["id"], json!(""));

        let huge = "9".repeat(40);
        let r = inflate_row(&h, &[huge.clone()], &InflateOptions::serving());
        assert_eq!(r.data["id"], json!(huge));
    }
}
