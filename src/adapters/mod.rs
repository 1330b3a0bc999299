// Adapters layer: concrete implementations for external systems.

pub mod courier;
pub mod storage;

pub use courier::CourierClient;
pub use storage::LocalStorage;
