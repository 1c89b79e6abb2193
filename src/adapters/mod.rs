// Adapters layer: concrete implementations of the domain ports (JSON model
// document) and the structured-object exchange surface.

pub mod bridge;
pub mod model_file;
