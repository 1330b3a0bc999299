use crate::adapters::courier::CourierClient;
use crate::core::builder::ShipmentBuilder;
use crate::core::reconcile::reconcile;
use crate::core::{
    BuildOutcome, ConfigProvider, ManifestOutcome, ManifestPayload, Pipeline, RawRecord, Shipment,
    Storage,
};
use crate::utils::error::{PipelineError, Result};
use std::collections::HashMap;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const OUTPUT_BUNDLE: &str = "manifest_output.zip";

/// Orders CSV in, output bundle out: extract rows, build canonical
/// shipments, manifest the operator's selection with the courier, reconcile
/// the waybills and export the results.
pub struct ManifestPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    courier: CourierClient,
}

impl<S: Storage, C: ConfigProvider> ManifestPipeline<S, C> {
    pub fn new(storage: S, config: C, courier: CourierClient) -> Self {
        Self {
            storage,
            config,
            courier,
        }
    }

    /// Operator selection in request order, deduplicated; an empty `--select`
    /// means every built order.
    fn resolve_selection(&self, outcome: &BuildOutcome) -> Vec<String> {
        let requested = self.config.selected_orders();
        if requested.is_empty() {
            return outcome.shipments.iter().map(|s| s.order.clone()).collect();
        }

        let mut selection: Vec<String> = Vec::with_capacity(requested.len());
        for order in requested {
            let trimmed = order.trim();
            if !trimmed.is_empty() && !selection.iter().any(|s| s == trimmed) {
                selection.push(trimmed.to_string());
            }
        }
        selection
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ManifestPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let input = self.config.input_file();
        tracing::debug!("Reading orders CSV: {}", input);
        let data = self.storage.read_file(input).await?;

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let columns: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            rows.push(RawRecord::new(columns));
        }
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<RawRecord>) -> Result<BuildOutcome> {
        let builder = ShipmentBuilder::new(self.config.shipment_defaults().clone());
        let outcome = builder.build_all(&rows);
        if outcome.skipped > 0 {
            tracing::warn!(
                "Skipped {} rows lacking an order identifier",
                outcome.skipped
            );
        }
        Ok(outcome)
    }

    async fn manifest(&self, outcome: &BuildOutcome) -> Result<ManifestOutcome> {
        let selection = self.resolve_selection(outcome);
        if selection.is_empty() {
            return Err(PipelineError::EmptySelection);
        }

        let mut shipments: Vec<Shipment> = Vec::with_capacity(selection.len());
        for order in &selection {
            match outcome.shipments.iter().find(|s| &s.order == order) {
                Some(shipment) => shipments.push(shipment.clone()),
                None => tracing::warn!("Selected order {} was not imported", order),
            }
        }
        if shipments.is_empty() {
            return Err(PipelineError::EmptySelection);
        }

        let payload = ManifestPayload {
            shipments,
            pickup_location: self.config.pickup_location().clone(),
        };

        if self.config.dry_run() {
            return Ok(ManifestOutcome {
                payload,
                response: None,
                results: vec![],
                dry_run: true,
            });
        }

        let response = self.courier.create_manifest(&payload).await?;
        let results = reconcile(&selection, &response)?;

        Ok(ManifestOutcome {
            payload,
            response: Some(response),
            results,
            dry_run: false,
        })
    }

    async fn load(&self, outcome: ManifestOutcome) -> Result<String> {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("payload.json", FileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(&outcome.payload)?.as_bytes())?;

            if let Some(response) = &outcome.response {
                zip.start_file::<_, ()>("response.json", FileOptions::default())?;
                zip.write_all(serde_json::to_string_pretty(response)?.as_bytes())?;
            }

            if !outcome.dry_run {
                zip.start_file::<_, ()>("manifest_results.csv", FileOptions::default())?;
                zip.write_all(&results_csv(&outcome)?)?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        let output_file = format!("{}/{}", self.config.output_path(), OUTPUT_BUNDLE);
        tracing::debug!(
            "Writing output bundle ({} bytes) to {}",
            zip_data.len(),
            output_file
        );
        self.storage.write_file(&output_file, &zip_data).await?;

        Ok(output_file)
    }
}

fn results_csv(outcome: &ManifestOutcome) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["order", "waybill", "status"])?;
    for result in &outcome.results {
        writer.write_record([
            result.order.as_str(),
            result.waybill.as_str(),
            result.status.as_deref().unwrap_or(""),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))
}
