use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::utils::error::{CutlistError, Result};

const SETTINGS_FILE: &str = "settings.csv";
const HEADER: (&str, &str) = ("key", "value");

/// Settings persistence: `key;value` CSV rows under the per-user config
/// directory. Files written by older versions use bare `key=value` lines and
/// are still accepted on load.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<user config dir>/cassette-cutlist/settings.csv`.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| CutlistError::ConfigError {
            message: "no per-user configuration directory available".to_string(),
        })?;
        Ok(Self {
            path: base.join("cassette-cutlist").join(SETTINGS_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings; a missing file yields the defaults. Unknown keys are
    /// ignored, unparsable values keep their default.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::debug!("📁 No settings file at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(&self.path)?;
        parse_settings(&text)
    }

    /// Rewrites the whole file in the CSV format.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(Vec::new());
        writer.write_record([HEADER.0, HEADER.1])?;
        for (key, value) in settings_rows(settings) {
            writer.write_record([key, value.as_str()])?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| CutlistError::ConfigError {
                message: format!("settings serialization failed: {}", e),
            })?;

        fs::write(&self.path, data)?;
        tracing::debug!("💾 Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Resets the store to default settings and returns them.
    pub fn reset(&self) -> Result<Settings> {
        let defaults = Settings::default();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

fn parse_settings(text: &str) -> Result<Settings> {
    let mut settings = Settings::default();

    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line == format!("{};{}", HEADER.0, HEADER.1) {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(text.as_bytes());
        for record in reader.records() {
            let record = record?;
            let key = record.get(0).unwrap_or("");
            let value = record.get(1).unwrap_or("");
            apply_row(&mut settings, key, value);
        }
    } else {
        // Legacy format: headerless `key=value` lines, split at the first `=`.
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if let Some((key, value)) = line.split_once('=') {
                apply_row(&mut settings, key, value);
            }
        }
    }

    Ok(settings)
}

fn apply_row(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "defaultType" => set_i32(&mut settings.default_type, value),
        "wallIdForFloorHeight" => settings.wall_id_for_floor_height = value.to_string(),
        "showDuplicateWarning" => set_bool(&mut settings.show_duplicate_warning, value),
        "warnOnOverflow" => set_bool(&mut settings.warn_on_overflow, value),
        "floorHeight" => set_f64(&mut settings.floor_height, value),
        "type0.plankWidth" => set_i32(&mut settings.type0.plank_width, value),
        "type0.slopeWidth" => set_i32(&mut settings.type0.slope_width, value),
        "type0.offsetX" => set_i32(&mut settings.type0.offset_x, value),
        "type0.offsetY" => set_i32(&mut settings.type0.offset_y, value),
        "type0.plankId" => settings.type0.plank_id = value.to_string(),
        "type0.leftSlopeId" => settings.type0.left_slope_id = value.to_string(),
        "type0.rightSlopeId" => settings.type0.right_slope_id = value.to_string(),
        "type1_2.plankWidth" => set_i32(&mut settings.type1_2.plank_width, value),
        "type1_2.slopeWidth" => set_i32(&mut settings.type1_2.slope_width, value),
        "type1_2.offsetX" => set_i32(&mut settings.type1_2.offset_x, value),
        "type1_2.offsetY" => set_i32(&mut settings.type1_2.offset_y, value),
        "type1_2.x2Coeff" => set_i32(&mut settings.type1_2.x2_coeff, value),
        "type1_2.cassetteId" => settings.type1_2.cassette_id = value.to_string(),
        "type1_2.plankId" => settings.type1_2.plank_id = value.to_string(),
        "type1_2.leftSlopeId" => settings.type1_2.left_slope_id = value.to_string(),
        "type1_2.rightSlopeId" => settings.type1_2.right_slope_id = value.to_string(),
        _ => {}
    }
}

// The type-0 block persists no x2Coeff/cassetteId key: that family has no
// cassette target, and older files never carried them.
fn settings_rows(settings: &Settings) -> Vec<(&'static str, String)> {
    vec![
        ("defaultType", settings.default_type.to_string()),
        (
            "wallIdForFloorHeight",
            settings.wall_id_for_floor_height.clone(),
        ),
        (
            "showDuplicateWarning",
            bool01(settings.show_duplicate_warning),
        ),
        ("warnOnOverflow", bool01(settings.warn_on_overflow)),
        ("floorHeight", settings.floor_height.to_string()),
        ("type0.plankWidth", settings.type0.plank_width.to_string()),
        ("type0.slopeWidth", settings.type0.slope_width.to_string()),
        ("type0.offsetX", settings.type0.offset_x.to_string()),
        ("type0.offsetY", settings.type0.offset_y.to_string()),
        ("type0.plankId", settings.type0.plank_id.clone()),
        ("type0.leftSlopeId", settings.type0.left_slope_id.clone()),
        ("type0.rightSlopeId", settings.type0.right_slope_id.clone()),
        (
            "type1_2.plankWidth",
            settings.type1_2.plank_width.to_string(),
        ),
        (
            "type1_2.slopeWidth",
            settings.type1_2.slope_width.to_string(),
        ),
        ("type1_2.offsetX", settings.type1_2.offset_x.to_string()),
        ("type1_2.offsetY", settings.type1_2.offset_y.to_string()),
        ("type1_2.x2Coeff", settings.type1_2.x2_coeff.to_string()),
        ("type1_2.cassetteId", settings.type1_2.cassette_id.clone()),
        ("type1_2.plankId", settings.type1_2.plank_id.clone()),
        (
            "type1_2.leftSlopeId",
            settings.type1_2.left_slope_id.clone(),
        ),
        (
            "type1_2.rightSlopeId",
            settings.type1_2.right_slope_id.clone(),
        ),
    ]
}

fn bool01(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn set_i32(field: &mut i32, value: &str) {
    if let Ok(parsed) = value.trim().parse() {
        *field = parsed;
    }
}

fn set_f64(field: &mut f64, value: &str) {
    if let Ok(parsed) = value.trim().parse() {
        *field = parsed;
    }
}

fn set_bool(field: &mut bool, value: &str) {
    if let Ok(parsed) = value.trim().parse::<i32>() {
        *field = parsed != 0;
    }
}
