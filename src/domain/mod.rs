// Domain layer: canonical models and ports (interfaces). No knowledge of
// concrete storage, transport or configuration formats.

pub mod model;
pub mod ports;
