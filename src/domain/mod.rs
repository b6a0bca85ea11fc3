// Domain layer: request/response models and ports (engine, source).

pub mod model;
pub mod ports;
