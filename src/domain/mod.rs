// Domain layer: course records, load diagnostics and the storage port.

pub mod model;
pub mod ports;
