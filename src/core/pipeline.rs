use crate::core::row::derive_headers;
use crate::core::table::records_to_table;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Upstream user schema, used as the header row when the fetch returns no
/// records so an empty run still writes a header-only table.
const DEFAULT_HEADERS: [&str; 8] = [
    "id", "name", "username", "email", "address", "phone", "website", "company",
];

pub struct UsersPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> UsersPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for UsersPipeline<S, C> {
    /// Fetches the upstream JSON array. A non-2xx status, a non-array body,
    /// or a non-object array element is fatal; an empty array is valid.
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Making API request to: {}", self.config.api_endpoint());
        let response = self.client.get(self.config.api_endpoint()).send().await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(EtlError::upstream(format!(
                "unexpected status {} from {}",
                response.status(),
                self.config.api_endpoint()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let items = match body {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(EtlError::upstream(format!(
                    "expected a JSON array, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match item {
                serde_json::Value::Object(data) => records.push(Record::new(data)),
                other => {
                    return Err(EtlError::upstream(format!(
                        "expected array elements to be objects, got {}",
                        json_type_name(&other)
                    )))
                }
            }
        }
        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let headers = if data.is_empty() {
            DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
        } else {
            derive_headers(&data)
        };
        let csv_output = records_to_table(&data, &headers);
        Ok(TransformResult {
            headers,
            record_count: data.len(),
            csv_output,
        })
    }

    /// Single full-content write; runs only after a successful fetch and
    /// encode, so a prior file is never clobbered by a failed run.
    async fn load(&self, result: TransformResult) -> Result<String> {
        let file = self.config.csv_file();
        tracing::debug!(
            "Writing {} bytes of CSV to {}/{}",
            result.csv_output.len(),
            self.config.data_dir(),
            file
        );
        self.storage
            .write_file(file, result.csv_output.as_bytes())
            .await?;
        Ok(format!("{}/{}", self.config.data_dir(), file))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
