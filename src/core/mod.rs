pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod format;

pub use crate::domain::model::{
    CalcParams, CalcType, CalculationResult, CassetteSize, Opening, OpeningKind, PlankSize,
    SlotPlan, TargetObjects,
};
pub use crate::domain::ports::{AnnotationSink, SelectionSource};
pub use crate::utils::error::Result;
