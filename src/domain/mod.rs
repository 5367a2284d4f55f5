// Domain layer: result models and the ports the runner, reporters and config plug into.

pub mod model;
pub mod ports;
