use crate::domain::model::{CalculationResult, CassetteSize, PlankSize, SlotPlan, TargetObjects};

/// Index of the first text field on a target object.
pub const FIELD_BASE: usize = 3;
/// Index of the last text field on a target object.
pub const FIELD_MAX: usize = 18;
/// Placeholder written into cleared slots.
pub const BLANK: &str = " ";

// Slot capacities, fixed by the destination objects.
pub const MAX_PLANKS0: usize = 8;
pub const MAX_SLOPES0: usize = 8;
pub const MAX_CASSETTES12: usize = 16;
pub const MAX_PLANKS12: usize = 8;
pub const MAX_SLOPES12: usize = 16;

pub fn cassette_line(cassette: &CassetteSize) -> String {
    format!(
        "Размер: U x V : {}x{} мм; Количество: {} шт.",
        cassette.x, cassette.y, cassette.count
    )
}

/// Family 0 labels the length axis Z; families 1/2 label it W.
pub fn plank_line(plank: &PlankSize) -> String {
    let axis = if plank.calc_type == 0 { "Z" } else { "W" };
    format!(
        "Размер: {}x{} мм; Длина {} = {} мм; Количество: {} шт.",
        plank.width, plank.length, axis, plank.length, plank.count
    )
}

/// Slopes use the Z axis label in both families.
pub fn slope_line(slope: &PlankSize) -> String {
    format!(
        "Размер: {}x{} мм; Длина Z = {} мм; Количество: {} шт.",
        slope.width, slope.length, slope.length, slope.count
    )
}

/// Formatted output lines split by category and family, before routing.
#[derive(Debug, Clone, Default)]
pub struct FormattedLines {
    pub cassette_lines: Vec<String>,
    pub plank_lines0: Vec<String>,
    pub plank_lines12: Vec<String>,
    pub left_slope_lines0: Vec<String>,
    pub left_slope_lines12: Vec<String>,
    pub right_slope_lines0: Vec<String>,
    pub right_slope_lines12: Vec<String>,
}

pub fn format_lines(result: &CalculationResult) -> FormattedLines {
    let mut lines = FormattedLines::default();

    for cassette in &result.cassettes {
        lines.cassette_lines.push(cassette_line(cassette));
    }
    for plank in &result.planks {
        let line = plank_line(plank);
        if plank.calc_type == 0 {
            lines.plank_lines0.push(line);
        } else {
            lines.plank_lines12.push(line);
        }
    }
    for slope in &result.left_slopes {
        let line = slope_line(slope);
        if slope.calc_type == 0 {
            lines.left_slope_lines0.push(line);
        } else {
            lines.left_slope_lines12.push(line);
        }
    }
    for slope in &result.right_slopes {
        let line = slope_line(slope);
        if slope.calc_type == 0 {
            lines.right_slope_lines0.push(line);
        } else {
            lines.right_slope_lines12.push(line);
        }
    }

    lines
}

/// Routes formatted lines to their targets. A category produces a plan only
/// when its target id is non-empty and it has at least one line. Lines over
/// capacity are dropped in order, with the dropped count recorded.
pub fn build_slot_plans(result: &CalculationResult, targets: &TargetObjects) -> Vec<SlotPlan> {
    let lines = format_lines(result);
    let mut plans = Vec::new();

    // Family 0 targets first, then families 1/2, as the original writes them.
    if let Some(plan) = slot_plan(&targets.plank_id0, lines.plank_lines0, MAX_PLANKS0) {
        plans.push(plan);
    }
    if let Some(plan) = slot_plan(&targets.left_slope_id0, lines.left_slope_lines0, MAX_SLOPES0) {
        plans.push(plan);
    }
    if let Some(plan) = slot_plan(&targets.right_slope_id0, lines.right_slope_lines0, MAX_SLOPES0)
    {
        plans.push(plan);
    }
    if let Some(plan) = slot_plan(&targets.cassette_id12, lines.cassette_lines, MAX_CASSETTES12) {
        plans.push(plan);
    }
    if let Some(plan) = slot_plan(&targets.plank_id12, lines.plank_lines12, MAX_PLANKS12) {
        plans.push(plan);
    }
    if let Some(plan) = slot_plan(&targets.left_slope_id12, lines.left_slope_lines12, MAX_SLOPES12)
    {
        plans.push(plan);
    }
    if let Some(plan) =
        slot_plan(&targets.right_slope_id12, lines.right_slope_lines12, MAX_SLOPES12)
    {
        plans.push(plan);
    }

    plans
}

fn slot_plan(target_id: &str, mut lines: Vec<String>, capacity: usize) -> Option<SlotPlan> {
    if target_id.is_empty() || lines.is_empty() {
        return None;
    }
    let truncated = lines.len().saturating_sub(capacity);
    lines.truncate(capacity);
    Some(SlotPlan {
        target_id: target_id.to_string(),
        lines,
        capacity,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plank(width: i32, length: i32, count: u32, family: i32) -> PlankSize {
        PlankSize {
            width,
            length,
            count,
            calc_type: family,
        }
    }

    #[test]
    fn test_cassette_line_wording() {
        let line = cassette_line(&CassetteSize {
            x: 1065,
            y: 1250,
            count: 1,
        });
        assert_eq!(line, "Размер: U x V : 1065x1250 мм; Количество: 1 шт.");
    }

    #[test]
    fn test_plank_line_axis_per_family() {
        assert_eq!(
            plank_line(&plank(285, 1250, 2, 0)),
            "Размер: 285x1250 мм; Длина Z = 1250 мм; Количество: 2 шт."
        );
        assert_eq!(
            plank_line(&plank(160, 1250, 2, 1)),
            "Размер: 160x1250 мм; Длина W = 1250 мм; Количество: 2 шт."
        );
    }

    #[test]
    fn test_slope_line_always_z() {
        assert_eq!(
            slope_line(&plank(225, 1500, 1, 1)),
            "Размер: 225x1500 мм; Длина Z = 1500 мм; Количество: 1 шт."
        );
        assert!(slope_line(&plank(285, 1500, 1, 0)).contains("Длина Z"));
    }

    #[test]
    fn test_format_lines_split_by_family() {
        let result = CalculationResult {
            cassettes: vec![CassetteSize {
                x: 1,
                y: 2,
                count: 3,
            }],
            planks: vec![plank(285, 1000, 2, 0), plank(160, 1000, 2, 1)],
            left_slopes: vec![plank(225, 1500, 1, 1)],
            right_slopes: vec![plank(285, 1500, 1, 0)],
            duplicate_ids: vec![],
            success: true,
            error_message: String::new(),
        };

        let lines = format_lines(&result);

        assert_eq!(lines.cassette_lines.len(), 1);
        assert_eq!(lines.plank_lines0.len(), 1);
        assert_eq!(lines.plank_lines12.len(), 1);
        assert_eq!(lines.left_slope_lines0.len(), 0);
        assert_eq!(lines.left_slope_lines12.len(), 1);
        assert_eq!(lines.right_slope_lines0.len(), 1);
        assert_eq!(lines.right_slope_lines12.len(), 0);
    }

    #[test]
    fn test_overflow_dropped_in_order() {
        // 20 distinct plank rows against the 8-line plank capacity.
        let planks: Vec<PlankSize> = (0..20).map(|i| plank(160, 1000 + i, 2, 1)).collect();
        let result = CalculationResult {
            planks,
            success: true,
            ..CalculationResult::default()
        };

        let plans = build_slot_plans(&result, &TargetObjects::default());

        assert_eq!(plans.len(), 1);
        let plan = &plans[0];
        assert_eq!(plan.target_id, "OK-1_2_PLNK");
        assert_eq!(plan.lines.len(), 8);
        assert_eq!(plan.truncated, 12);
        // Retained lines keep their order.
        assert!(plan.lines[0].contains("160x1000"));
        assert!(plan.lines[7].contains("160x1007"));
    }

    #[test]
    fn test_empty_target_id_skips_category() {
        let result = CalculationResult {
            planks: vec![plank(160, 1000, 2, 1)],
            success: true,
            ..CalculationResult::default()
        };
        let targets = TargetObjects {
            plank_id12: String::new(),
            ..TargetObjects::default()
        };

        assert!(build_slot_plans(&result, &targets).is_empty());
    }

    #[test]
    fn test_no_lines_no_plan() {
        let result = CalculationResult {
            success: true,
            ..CalculationResult::default()
        };

        assert!(build_slot_plans(&result, &TargetObjects::default()).is_empty());
    }

    #[test]
    fn test_plan_capacities_per_category() {
        let result = CalculationResult {
            cassettes: vec![CassetteSize {
                x: 1,
                y: 2,
                count: 3,
            }],
            planks: vec![plank(285, 1000, 2, 0), plank(160, 1000, 2, 1)],
            left_slopes: vec![plank(285, 1500, 1, 0), plank(225, 1500, 1, 1)],
            right_slopes: vec![plank(285, 1500, 1, 0), plank(225, 1500, 1, 1)],
            duplicate_ids: vec![],
            success: true,
            error_message: String::new(),
        };

        let plans = build_slot_plans(&result, &TargetObjects::default());

        let by_target: std::collections::HashMap<&str, usize> = plans
            .iter()
            .map(|p| (p.target_id.as_str(), p.capacity))
            .collect();
        assert_eq!(by_target["OK-0_PLNK"], MAX_PLANKS0);
        assert_eq!(by_target["OK-0_LOTK"], MAX_SLOPES0);
        assert_eq!(by_target["OK-0_ROTK"], MAX_SLOPES0);
        assert_eq!(by_target["OK-1_2_CASS"], MAX_CASSETTES12);
        assert_eq!(by_target["OK-1_2_PLNK"], MAX_PLANKS12);
        assert_eq!(by_target["OK-1_2_LOTK"], MAX_SLOPES12);
        assert_eq!(by_target["OK-1_2_ROTK"], MAX_SLOPES12);
        // Family 0 plans precede family 1/2 plans.
        assert_eq!(plans[0].target_id, "OK-0_PLNK");
        assert_eq!(plans[3].target_id, "OK-1_2_CASS");
    }
}
