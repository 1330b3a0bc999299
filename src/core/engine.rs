use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one manifest run through the pipeline stages.
pub struct Engine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let batch_id = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();
        tracing::info!(%batch_id, "Starting manifest run");

        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} raw rows", rows.len());

        let built = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Built {} shipments ({} rows skipped without an order id)",
            built.shipments.len(),
            built.skipped
        );

        let outcome = self.pipeline.manifest(&built).await?;
        if outcome.dry_run {
            tracing::info!(
                "Dry run: payload built for {} shipments, courier call skipped",
                outcome.payload.shipments.len()
            );
        } else {
            let resolved = outcome
                .results
                .iter()
                .filter(|r| !r.waybill.is_empty())
                .count();
            tracing::info!(
                "Reconciled {} orders, {} waybills assigned",
                outcome.results.len(),
                resolved
            );
        }

        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
