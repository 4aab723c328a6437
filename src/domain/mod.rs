// Domain layer: request/report models and the ports the probe is wired through.

pub mod model;
pub mod ports;
