#[cfg(feature = "cli")]
pub mod cli;
pub mod store;

use crate::domain::model::{CalcParams, TargetObjects};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};

/// Per-family settings block. The type-0 block leaves `cassette_id` empty:
/// that family has no cassette target.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSettings {
    pub plank_width: i32,
    pub slope_width: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub x2_coeff: i32,
    pub cassette_id: String,
    pub plank_id: String,
    pub left_slope_id: String,
    pub right_slope_id: String,
}

/// Persisted panel settings, one instance per user.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_type: i32,
    pub wall_id_for_floor_height: String,
    pub show_duplicate_warning: bool,
    pub warn_on_overflow: bool,
    pub floor_height: f64,
    pub type0: TypeSettings,
    pub type1_2: TypeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_type: 0,
            wall_id_for_floor_height: "СН-МД1".to_string(),
            show_duplicate_warning: true,
            warn_on_overflow: false,
            floor_height: 2.99,
            type0: TypeSettings {
                plank_width: 285,
                slope_width: 285,
                offset_x: 165,
                offset_y: 50,
                x2_coeff: 745,
                cassette_id: String::new(),
                plank_id: "OK-0_PLNK".to_string(),
                left_slope_id: "OK-0_LOTK".to_string(),
                right_slope_id: "OK-0_ROTK".to_string(),
            },
            type1_2: TypeSettings {
                plank_width: 160,
                slope_width: 225,
                offset_x: 165,
                offset_y: 50,
                x2_coeff: 745,
                cassette_id: "OK-1_2_CASS".to_string(),
                plank_id: "OK-1_2_PLNK".to_string(),
                left_slope_id: "OK-1_2_LOTK".to_string(),
                right_slope_id: "OK-1_2_ROTK".to_string(),
            },
        }
    }
}

impl Settings {
    /// Aggregation parameters derived from the settings. Offsets are shared
    /// between families; the type-0 block is their source, and `offsetTop`
    /// comes from the types-1/2 x2 coefficient.
    pub fn to_calc_params(&self) -> CalcParams {
        CalcParams {
            plank_width0: self.type0.plank_width,
            slope_width0: self.type0.slope_width,
            plank_width12: self.type1_2.plank_width,
            slope_width12: self.type1_2.slope_width,
            offset_x: self.type0.offset_x,
            offset_y: self.type0.offset_y,
            offset_top: self.type1_2.x2_coeff,
            floor_height: self.floor_height,
        }
    }

    pub fn to_target_objects(&self) -> TargetObjects {
        TargetObjects {
            plank_id0: self.type0.plank_id.clone(),
            left_slope_id0: self.type0.left_slope_id.clone(),
            right_slope_id0: self.type0.right_slope_id.clone(),
            cassette_id12: self.type1_2.cassette_id.clone(),
            plank_id12: self.type1_2.plank_id.clone(),
            left_slope_id12: self.type1_2.left_slope_id.clone(),
            right_slope_id12: self.type1_2.right_slope_id.clone(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_range("defaultType", self.default_type, 0, 2)?;
        validate_non_empty_string("wallIdForFloorHeight", &self.wall_id_for_floor_height)?;
        validate_range("floorHeight", self.floor_height, 0.1, 100.0)?;
        validate_positive_number("type0.plankWidth", self.type0.plank_width, 1)?;
        validate_positive_number("type0.slopeWidth", self.type0.slope_width, 1)?;
        validate_positive_number("type1_2.plankWidth", self.type1_2.plank_width, 1)?;
        validate_positive_number("type1_2.slopeWidth", self.type1_2.slope_width, 1)?;
        Ok(())
    }
}
