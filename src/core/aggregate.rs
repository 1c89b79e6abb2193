use std::collections::BTreeMap;

use crate::domain::model::{
    CalcParams, CalcType, CalculationResult, CassetteSize, Opening, PlankSize,
};

/// Meters to millimeters, truncated toward zero. Truncation (not rounding)
/// is load-bearing: downstream manufacturing tolerances assume it.
fn mm(meters: f64) -> i32 {
    (meters * 1000.0) as i32
}

/// Identifiers occurring at least twice, each reported once, sorted.
/// Empty identifiers count like any other value.
pub fn find_duplicates(openings: &[Opening]) -> Vec<String> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for opening in openings {
        *counts.entry(opening.id.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Aggregates every opening into grouped cassette/plank/slope rows.
///
/// All openings participate regardless of classification; the family only
/// selects the parameter set (type 0 vs types 1/2, with unknown falling to
/// the latter) and whether cassettes are emitted. Identical dimension tuples
/// accumulate counts; rows come out in the sorted order of their
/// (length, width) and (x, y) keys, family-0 rows first.
pub fn aggregate(openings: &[Opening], params: &CalcParams) -> CalculationResult {
    let mut cassette_groups: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut plank_groups0: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut plank_groups12: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut left_slope_groups0: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut left_slope_groups12: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut right_slope_groups0: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    let mut right_slope_groups12: BTreeMap<(i32, i32), u32> = BTreeMap::new();

    for opening in openings {
        let is_type0 = opening.calc_type == CalcType::Type0;
        let plank_width = if is_type0 {
            params.plank_width0
        } else {
            params.plank_width12
        };
        let slope_width = if is_type0 {
            params.slope_width0
        } else {
            params.slope_width12
        };

        // Two planks per opening, one per jamb.
        let plank_length = mm(opening.width) + params.offset_y;
        let plank_groups = if is_type0 {
            &mut plank_groups0
        } else {
            &mut plank_groups12
        };
        *plank_groups.entry((plank_length, plank_width)).or_insert(0) += 2;

        // One slope per side, counted separately even though the dimensions
        // are identical.
        let slope_length = mm(opening.height);
        let (left_groups, right_groups) = if is_type0 {
            (&mut left_slope_groups0, &mut right_slope_groups0)
        } else {
            (&mut left_slope_groups12, &mut right_slope_groups12)
        };
        *left_groups.entry((slope_length, slope_width)).or_insert(0) += 1;
        *right_groups.entry((slope_length, slope_width)).or_insert(0) += 1;

        if opening.calc_type.contributes_cassettes() {
            let cassette_x = mm(opening.sill_height) + params.offset_x;
            let cassette_y = mm(opening.width) + params.offset_y;
            *cassette_groups.entry((cassette_x, cassette_y)).or_insert(0) += 1;

            // Type 2 adds the upper cassette. 190 and 20 are fixed
            // manufacturing allowances, not parameters.
            if opening.calc_type == CalcType::Type2 {
                let cassette_x2 = mm(params.floor_height)
                    - (190 + mm(opening.height) + mm(opening.sill_height) + 20)
                    + params.offset_top;
                *cassette_groups.entry((cassette_x2, cassette_y)).or_insert(0) += 1;
            }
        }
    }

    CalculationResult {
        cassettes: cassette_groups
            .into_iter()
            .map(|((x, y), count)| CassetteSize { x, y, count })
            .collect(),
        planks: plank_rows(plank_groups0, 0)
            .chain(plank_rows(plank_groups12, 1))
            .collect(),
        left_slopes: plank_rows(left_slope_groups0, 0)
            .chain(plank_rows(left_slope_groups12, 1))
            .collect(),
        right_slopes: plank_rows(right_slope_groups0, 0)
            .chain(plank_rows(right_slope_groups12, 1))
            .collect(),
        duplicate_ids: find_duplicates(openings),
        success: true,
        error_message: String::new(),
    }
}

fn plank_rows(
    groups: BTreeMap<(i32, i32), u32>,
    family_tag: i32,
) -> impl Iterator<Item = PlankSize> {
    groups
        .into_iter()
        .map(move |((length, width), count)| PlankSize {
            width,
            length,
            count,
            calc_type: family_tag,
        })
}
