// Domain layer: models and ports. The core and config layers depend on this, never the reverse.

pub mod model;
pub mod ports;
