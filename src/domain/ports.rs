use crate::domain::model::{Opening, SlotPlan};
use crate::utils::error::Result;

/// Supplies the current selection from the host model. Openings come back
/// with `calc_type` already derived from the identifier.
pub trait SelectionSource: Send + Sync {
    fn selected_openings(&self) -> Result<Vec<Opening>>;

    /// Height of the first wall whose identifier contains `wall_id_pattern`,
    /// `None` when no wall matches. Callers fall back to the configured
    /// floor height.
    fn floor_height_from_wall(&self, wall_id_pattern: &str) -> Result<Option<f64>>;
}

/// Receives slot plans and mutates the host model's text fields. Targets are
/// written sequentially; a failed target must not poison the others.
pub trait AnnotationSink: Send + Sync {
    fn write_target(&mut self, plan: &SlotPlan) -> Result<()>;

    /// Flushes accumulated mutations to the backing store.
    fn persist(&mut self) -> Result<()>;
}
