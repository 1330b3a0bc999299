use crate::domain::model::{
    BuildOutcome, ManifestOutcome, PickupLocation, RawRecord, ShipmentDefaults,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Operator selection; empty means "all imported orders".
    fn selected_orders(&self) -> &[String];
    fn dry_run(&self) -> bool;
    fn shipment_defaults(&self) -> &ShipmentDefaults;
    fn pickup_location(&self) -> &PickupLocation;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, rows: Vec<RawRecord>) -> Result<BuildOutcome>;
    async fn manifest(&self, outcome: &BuildOutcome) -> Result<ManifestOutcome>;
    async fn load(&self, outcome: ManifestOutcome) -> Result<String>;
}
