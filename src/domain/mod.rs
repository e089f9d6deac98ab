// Domain layer: models and ports. No runtime dependencies beyond serde/chrono.

pub mod model;
pub mod ports;
