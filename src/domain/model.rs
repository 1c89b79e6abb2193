use serde::{Deserialize, Serialize};

/// Manufacturing family derived from an opening identifier.
/// `Unknown` is a valid outcome: such openings still aggregate, using the
/// types-1/2 parameter set, but contribute no cassettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum CalcType {
    Type0,
    Type1,
    Type2,
    #[default]
    Unknown,
}

impl From<i32> for CalcType {
    fn from(value: i32) -> Self {
        match value {
            0 => CalcType::Type0,
            1 => CalcType::Type1,
            2 => CalcType::Type2,
            _ => CalcType::Unknown,
        }
    }
}

impl From<CalcType> for i32 {
    fn from(value: CalcType) -> Self {
        match value {
            CalcType::Type0 => 0,
            CalcType::Type1 => 1,
            CalcType::Type2 => 2,
            CalcType::Unknown => -1,
        }
    }
}

impl CalcType {
    pub fn contributes_cassettes(&self) -> bool {
        matches!(self, CalcType::Type1 | CalcType::Type2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    #[default]
    Window,
    Door,
}

/// One window/door instance. Measurements are meters; `calc_type` is derived
/// from the identifier, never read from the model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: String,
    #[serde(default)]
    pub kind: OpeningKind,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub sill_height: f64,
    #[serde(default)]
    pub calc_type: CalcType,
}

/// Parameters for one aggregation run. Widths and offsets are millimeters,
/// `floor_height` is meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcParams {
    pub plank_width0: i32,
    pub slope_width0: i32,
    pub plank_width12: i32,
    pub slope_width12: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub offset_top: i32,
    pub floor_height: f64,
}

impl Default for CalcParams {
    fn default() -> Self {
        Self {
            plank_width0: 285,
            slope_width0: 285,
            plank_width12: 160,
            slope_width12: 225,
            offset_x: 165,
            offset_y: 50,
            offset_top: 745,
            floor_height: 2.99,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CassetteSize {
    pub x: i32,
    pub y: i32,
    pub count: u32,
}

/// A grouped plank or slope row. `calc_type` is the family tag: 0 for the
/// type-0 family, 1 for anything else (types 1 and 2 share one destination
/// and are not distinguished here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlankSize {
    pub width: i32,
    pub length: i32,
    pub count: u32,
    pub calc_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub cassettes: Vec<CassetteSize>,
    pub planks: Vec<PlankSize>,
    pub left_slopes: Vec<PlankSize>,
    pub right_slopes: Vec<PlankSize>,
    #[serde(rename = "duplicates")]
    pub duplicate_ids: Vec<String>,
    pub success: bool,
    pub error_message: String,
}

/// Named destination objects for write-back. An empty id means "no target";
/// that category is skipped silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetObjects {
    pub plank_id0: String,
    pub left_slope_id0: String,
    pub right_slope_id0: String,
    pub cassette_id12: String,
    pub plank_id12: String,
    pub left_slope_id12: String,
    pub right_slope_id12: String,
}

impl Default for TargetObjects {
    fn default() -> Self {
        Self {
            plank_id0: "OK-0_PLNK".to_string(),
            left_slope_id0: "OK-0_LOTK".to_string(),
            right_slope_id0: "OK-0_ROTK".to_string(),
            cassette_id12: "OK-1_2_CASS".to_string(),
            plank_id12: "OK-1_2_PLNK".to_string(),
            left_slope_id12: "OK-1_2_LOTK".to_string(),
            right_slope_id12: "OK-1_2_ROTK".to_string(),
        }
    }
}

/// Write instruction for one target object: `lines[i]` goes to text field
/// `3 + i`, the remaining slots up to `capacity` are cleared. `truncated`
/// counts lines dropped over capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPlan {
    pub target_id: String,
    pub lines: Vec<String>,
    pub capacity: usize,
    pub truncated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_type_roundtrip() {
        assert_eq!(CalcType::from(0), CalcType::Type0);
        assert_eq!(CalcType::from(2), CalcType::Type2);
        assert_eq!(CalcType::from(-1), CalcType::Unknown);
        assert_eq!(CalcType::from(99), CalcType::Unknown);
        assert_eq!(i32::from(CalcType::Unknown), -1);
    }

    #[test]
    fn test_calc_params_defaults() {
        let params = CalcParams::default();
        assert_eq!(params.plank_width0, 285);
        assert_eq!(params.slope_width0, 285);
        assert_eq!(params.plank_width12, 160);
        assert_eq!(params.slope_width12, 225);
        assert_eq!(params.offset_x, 165);
        assert_eq!(params.offset_y, 50);
        assert_eq!(params.offset_top, 745);
        assert_eq!(params.floor_height, 2.99);
    }

    #[test]
    fn test_opening_decodes_without_optional_fields() {
        let opening: Opening =
            serde_json::from_str(r#"{"id": "ОК-1 (01)", "width": 1.2, "height": 1.5}"#).unwrap();
        assert_eq!(opening.kind, OpeningKind::Window);
        assert_eq!(opening.sill_height, 0.0);
        assert_eq!(opening.calc_type, CalcType::Unknown);
    }

    #[test]
    fn test_default_targets() {
        let targets = TargetObjects::default();
        assert_eq!(targets.plank_id0, "OK-0_PLNK");
        assert_eq!(targets.cassette_id12, "OK-1_2_CASS");
        assert_eq!(targets.right_slope_id12, "OK-1_2_ROTK");
    }
}
