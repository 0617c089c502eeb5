// Domain layer: request/response models, the department catalog and the completion port.

pub mod catalog;
pub mod model;
pub mod ports;
