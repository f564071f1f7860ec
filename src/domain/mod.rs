// Domain layer: listing model, ports and moderation rules. No I/O here.

pub mod model;
pub mod moderation;
pub mod ports;
