use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::classify::classify;
use crate::core::format::{BLANK, FIELD_BASE, FIELD_MAX};
use crate::domain::model::{Opening, OpeningKind, SlotPlan};
use crate::domain::ports::{AnnotationSink, SelectionSource};
use crate::utils::error::{CutlistError, Result};

/// JSON stand-in for the host application's model: the openings the user
/// selected, the walls, and the annotation objects with their numbered
/// text fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDocument {
    pub openings: Vec<OpeningRow>,
    pub walls: Vec<WallRow>,
    pub objects: Vec<ObjectRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningRow {
    pub id: String,
    pub kind: OpeningKind,
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRow {
    pub id: String,
    pub height: f64,
}

/// Annotation object. Everything besides `id` is a flat string field,
/// `Text_3` through `Text_18` among them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// File-backed implementation of both model ports. Writes accumulate in
/// memory until `persist`.
#[derive(Debug)]
pub struct ModelFileAdapter {
    path: PathBuf,
    document: ModelDocument,
    dirty: bool,
}

impl ModelFileAdapter {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let document: ModelDocument = serde_json::from_str(&text)?;
        tracing::debug!(
            "📁 Opened model {} ({} openings, {} walls, {} objects)",
            path.display(),
            document.openings.len(),
            document.walls.len(),
            document.objects.len()
        );
        Ok(Self {
            path,
            document,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ModelDocument {
        &self.document
    }
}

impl SelectionSource for ModelFileAdapter {
    /// Every opening in the document, with its family classified from the
    /// identifier. Any `calcType` stored in the file is ignored.
    fn selected_openings(&self) -> Result<Vec<Opening>> {
        Ok(self
            .document
            .openings
            .iter()
            .map(|row| Opening {
                id: row.id.clone(),
                kind: row.kind,
                width: row.width,
                height: row.height,
                sill_height: row.sill_height,
                calc_type: classify(&row.id),
            })
            .collect())
    }

    /// Height of the first wall whose identifier contains the pattern.
    fn floor_height_from_wall(&self, wall_id_pattern: &str) -> Result<Option<f64>> {
        Ok(self
            .document
            .walls
            .iter()
            .find(|wall| wall.id.contains(wall_id_pattern))
            .map(|wall| wall.height))
    }
}

impl AnnotationSink for ModelFileAdapter {
    fn write_target(&mut self, plan: &SlotPlan) -> Result<()> {
        let object = self
            .document
            .objects
            .iter_mut()
            .find(|object| object.id == plan.target_id)
            .ok_or_else(|| CutlistError::TargetNotFound {
                id: plan.target_id.clone(),
            })?;

        for (i, line) in plan.lines.iter().enumerate() {
            let field = FIELD_BASE + i;
            if field > FIELD_MAX {
                break;
            }
            object.fields.insert(field_name(field), line.clone());
        }
        // Unused slots up to the capacity are blanked, not removed, so stale
        // rows from a previous run never survive.
        for i in plan.lines.len()..plan.capacity {
            let field = FIELD_BASE + i;
            if field > FIELD_MAX {
                break;
            }
            object.fields.insert(field_name(field), BLANK.to_string());
        }

        self.dirty = true;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, text)?;
        self.dirty = false;
        tracing::debug!("💾 Model document saved to {}", self.path.display());
        Ok(())
    }
}

fn field_name(slot: usize) -> String {
    format!("Text_{}", slot)
}
