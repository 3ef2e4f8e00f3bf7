use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs a pipeline's stages in order: extract, transform, load. The codec
/// layer never logs; stage progress and the final summary are reported here.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!("Encoded {} records as CSV", transformed.record_count);

        let record_count = transformed.record_count;
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Saved {} records to {}", record_count, output_path);

        Ok(output_path)
    }
}
