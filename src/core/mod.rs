pub mod builder;
pub mod engine;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod resolve;

pub use crate::domain::model::{
    BuildOutcome, ManifestOutcome, ManifestPayload, ManifestResult, PaymentMode, PickupLocation,
    RawRecord, Shipment, ShipmentDefaults, ShippingMode,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
