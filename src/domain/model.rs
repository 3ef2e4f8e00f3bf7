use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One logical entity with named fields. Key order is insertion order
/// (serde_json `preserve_order`), which keeps derived header order stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub headers: Vec<String>,
    pub csv_output: String,
    pub record_count: usize,
}
