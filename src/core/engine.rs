use crate::config::Settings;
use crate::core::aggregate::aggregate;
use crate::core::format::build_slot_plans;
use crate::domain::model::{CalcParams, CalculationResult, Opening, TargetObjects};
use crate::domain::ports::{AnnotationSink, SelectionSource};
use crate::utils::error::Result;

/// Outcome of a full selection-to-write-back run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub opening_count: usize,
    pub result: CalculationResult,
    pub write_success: bool,
}

/// Drives the whole flow against one model document: read the selection,
/// aggregate it, write the grouped rows back to the target objects. The
/// model is a single value because selection and write-back address the
/// same document.
pub struct CutlistEngine<M: SelectionSource + AnnotationSink> {
    settings: Settings,
    model: M,
}

impl<M: SelectionSource + AnnotationSink> CutlistEngine<M> {
    pub fn new(settings: Settings, model: M) -> Self {
        Self { settings, model }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Currently selected openings, classified by the source.
    pub fn selection(&self) -> Result<Vec<Opening>> {
        self.model.selected_openings()
    }

    /// Floor height from the wall configured in the settings, falling back
    /// to the configured height when no wall matches.
    pub fn floor_height(&self) -> Result<f64> {
        self.floor_height_from(&self.settings.wall_id_for_floor_height)
    }

    /// Floor height from the first wall matching `wall_id_pattern`. Heights
    /// that are absent or not positive fall back to the configured value.
    pub fn floor_height_from(&self, wall_id_pattern: &str) -> Result<f64> {
        match self.model.floor_height_from_wall(wall_id_pattern)? {
            Some(height) if height > 0.0 => Ok(height),
            _ => {
                tracing::debug!(
                    "📁 No usable wall height for '{}', using configured {}",
                    wall_id_pattern,
                    self.settings.floor_height
                );
                Ok(self.settings.floor_height)
            }
        }
    }

    /// Calculation parameters from the settings, with the floor height
    /// refreshed from the model.
    pub fn calc_params(&self) -> Result<CalcParams> {
        let mut params = self.settings.to_calc_params();
        params.floor_height = self.floor_height()?;
        Ok(params)
    }

    pub fn calculate(&self, openings: &[Opening], params: &CalcParams) -> CalculationResult {
        let result = aggregate(openings, params);
        if self.settings.show_duplicate_warning && !result.duplicate_ids.is_empty() {
            tracing::warn!(
                "⚠️ Duplicate opening identifiers in selection: {}",
                result.duplicate_ids.join(", ")
            );
        }
        result
    }

    pub fn write_back(&mut self, result: &CalculationResult) -> Result<bool> {
        let targets = self.settings.to_target_objects();
        self.write_back_to(result, &targets)
    }

    /// Writes each non-empty section to its target object. A failed target
    /// is logged and skipped so the remaining targets still get their rows;
    /// the returned flag is true only when every write landed.
    pub fn write_back_to(
        &mut self,
        result: &CalculationResult,
        targets: &TargetObjects,
    ) -> Result<bool> {
        let plans = build_slot_plans(result, targets);
        let mut success = true;
        for plan in &plans {
            if plan.truncated > 0 && self.settings.warn_on_overflow {
                tracing::warn!(
                    "⚠️ Target '{}' holds {} rows, dropping {}",
                    plan.target_id,
                    plan.capacity,
                    plan.truncated
                );
            }
            if let Err(error) = self.model.write_target(plan) {
                tracing::warn!("❌ Write to '{}' failed: {}", plan.target_id, error);
                success = false;
            }
        }
        self.model.persist()?;
        Ok(success)
    }

    /// Full flow: selection, parameters, aggregation, write-back.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting cut-list aggregation");

        let openings = self.selection()?;
        tracing::info!("📥 Selected {} openings", openings.len());

        let params = self.calc_params()?;
        let result = self.calculate(&openings, &params);
        tracing::info!(
            "🔄 Aggregated {} cassette, {} plank and {} slope rows",
            result.cassettes.len(),
            result.planks.len(),
            result.left_slopes.len() + result.right_slopes.len()
        );

        let write_success = self.write_back(&result)?;
        if write_success {
            tracing::info!("💾 Results written to target objects");
        } else {
            tracing::warn!("⚠️ Some target objects were not updated");
        }

        Ok(RunSummary {
            opening_count: openings.len(),
            result,
            write_success,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CalcType, OpeningKind, SlotPlan};
    use crate::utils::error::CutlistError;

    #[derive(Default)]
    struct MockModel {
        openings: Vec<Opening>,
        wall_height: Option<f64>,
        fail_target: Option<String>,
        written: Vec<SlotPlan>,
        persisted: bool,
    }

    impl SelectionSource for MockModel {
        fn selected_openings(&self) -> Result<Vec<Opening>> {
            Ok(self.openings.clone())
        }

        fn floor_height_from_wall(&self, _wall_id_pattern: &str) -> Result<Option<f64>> {
            Ok(self.wall_height)
        }
    }

    impl AnnotationSink for MockModel {
        fn write_target(&mut self, plan: &SlotPlan) -> Result<()> {
            if self.fail_target.as_deref() == Some(plan.target_id.as_str()) {
                return Err(CutlistError::TargetNotFound {
                    id: plan.target_id.clone(),
                });
            }
            self.written.push(plan.clone());
            Ok(())
        }

        fn persist(&mut self) -> Result<()> {
            self.persisted = true;
            Ok(())
        }
    }

    fn opening(id: &str, calc_type: CalcType) -> Opening {
        Opening {
            id: id.to_string(),
            kind: OpeningKind::Window,
            width: 1.2,
            height: 1.5,
            sill_height: 0.9,
            calc_type,
        }
    }

    fn engine_with(model: MockModel) -> CutlistEngine<MockModel> {
        CutlistEngine::new(Settings::default(), model)
    }

    #[test]
    fn test_run_writes_and_persists() {
        let model = MockModel {
            openings: vec![opening("ОК-1 (01)", CalcType::Type1)],
            ..MockModel::default()
        };
        let mut engine = engine_with(model);

        let summary = engine.run().unwrap();

        assert_eq!(summary.opening_count, 1);
        assert!(summary.write_success);
        assert!(summary.result.success);
        // Cassettes, planks and both slope targets for the types-1/2 family.
        let targets: Vec<&str> = engine
            .model()
            .written
            .iter()
            .map(|p| p.target_id.as_str())
            .collect();
        assert_eq!(
            targets,
            vec!["OK-1_2_CASS", "OK-1_2_PLNK", "OK-1_2_LOTK", "OK-1_2_ROTK"]
        );
        assert!(engine.model().persisted);
    }

    #[test]
    fn test_failed_target_does_not_stop_remaining_writes() {
        let model = MockModel {
            openings: vec![opening("ОК-1 (01)", CalcType::Type1)],
            fail_target: Some("OK-1_2_PLNK".to_string()),
            ..MockModel::default()
        };
        let mut engine = engine_with(model);

        let summary = engine.run().unwrap();

        assert!(!summary.write_success);
        let targets: Vec<&str> = engine
            .model()
            .written
            .iter()
            .map(|p| p.target_id.as_str())
            .collect();
        assert_eq!(targets, vec!["OK-1_2_CASS", "OK-1_2_LOTK", "OK-1_2_ROTK"]);
        assert!(engine.model().persisted);
    }

    #[test]
    fn test_floor_height_prefers_wall() {
        let engine = engine_with(MockModel {
            wall_height: Some(3.3),
            ..MockModel::default()
        });
        assert_eq!(engine.floor_height().unwrap(), 3.3);
        assert_eq!(engine.calc_params().unwrap().floor_height, 3.3);
    }

    #[test]
    fn test_floor_height_falls_back_to_settings() {
        let absent = engine_with(MockModel::default());
        assert_eq!(absent.floor_height().unwrap(), 2.99);

        let zero = engine_with(MockModel {
            wall_height: Some(0.0),
            ..MockModel::default()
        });
        assert_eq!(zero.floor_height().unwrap(), 2.99);
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let mut engine = engine_with(MockModel::default());

        let summary = engine.run().unwrap();

        assert_eq!(summary.opening_count, 0);
        assert!(summary.write_success);
        assert!(engine.model().written.is_empty());
    }
}
