// Domain layer: records, ports (interfaces) and the pure transform / ranking logic.

pub mod model;
pub mod ports;

pub mod services;
