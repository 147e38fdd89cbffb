// Domain layer: the subscriber record and the store port.

pub mod model;
pub mod ports;
