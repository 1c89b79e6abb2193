use serde_json::{json, Map, Value};

use crate::config::Settings;
use crate::core::aggregate::{aggregate, find_duplicates};
use crate::core::classify::classify;
use crate::core::engine::CutlistEngine;
use crate::domain::model::{
    CalcParams, CalcType, CalculationResult, CassetteSize, Opening, OpeningKind, PlankSize,
    TargetObjects,
};
use crate::domain::ports::{AnnotationSink, SelectionSource};

/// Wall identifier used when `GetFloorHeightFromWall` is called without one.
const DEFAULT_WALL_ID: &str = "СН-МД1";

/// Structured-object dispatcher over the typed engine. Requests and replies
/// use the same generic exchange format the panel's JavaScript API spoke;
/// all decoding happens here, the core never sees a `Value`.
pub struct ExchangeBridge<M: SelectionSource + AnnotationSink> {
    engine: CutlistEngine<M>,
}

impl<M: SelectionSource + AnnotationSink> ExchangeBridge<M> {
    pub fn new(engine: CutlistEngine<M>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &CutlistEngine<M> {
        &self.engine
    }

    /// Routes one request to its operation. Unknown operations and invalid
    /// payloads come back as `{success: false, errorMessage}` replies, never
    /// as errors.
    pub fn dispatch(&mut self, operation: &str, param: &Value) -> Value {
        tracing::debug!("🔄 Bridge request: {}", operation);
        match operation {
            "Ping" => Value::String("Pong from Cassette Panel!".to_string()),
            "GetCassetteSelection" => self.get_selection(),
            "GetFloorHeightFromWall" => self.get_floor_height(param),
            "GetCassetteSettings" => settings_tree(self.engine.settings()),
            "CalculateCassettes" => self.calculate(param),
            "WriteCassetteResults" => self.write_results(param),
            other => failure(&format!("Неизвестная операция: {}", other)),
        }
    }

    fn get_selection(&self) -> Value {
        let openings = match self.engine.selection() {
            Ok(openings) => openings,
            Err(error) => return failure(&error.user_friendly_message()),
        };
        let duplicates = find_duplicates(&openings);
        let count = openings.len();
        json!({
            "windows": openings,
            "duplicates": duplicates,
            "count": count,
            "success": true,
        })
    }

    fn get_floor_height(&self, param: &Value) -> Value {
        let mut wall_id = as_str(param);
        if wall_id.is_empty() {
            wall_id = DEFAULT_WALL_ID.to_string();
        }
        let height = match self.engine.model().floor_height_from_wall(&wall_id) {
            Ok(height) => height.unwrap_or(0.0),
            Err(error) => return failure(&error.user_friendly_message()),
        };
        json!({ "height": height, "found": height > 0.0 })
    }

    fn calculate(&self, param: &Value) -> Value {
        let Some(request) = param.as_object() else {
            return failure("Неверные параметры");
        };

        let openings: Vec<Opening> = request
            .get("windows")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(decode_opening)
                    .collect()
            })
            .unwrap_or_default();
        let params = decode_params(request.get("params").and_then(Value::as_object));

        let result = aggregate(&openings, &params);
        match serde_json::to_value(&result) {
            Ok(value) => value,
            Err(error) => failure(&format!("Ошибка сериализации: {}", error)),
        }
    }

    fn write_results(&mut self, param: &Value) -> Value {
        let Some(request) = param.as_object() else {
            return failure("Неверные параметры");
        };

        let Some(result_value) = request.get("result") else {
            return failure("Отсутствует объект result");
        };
        let Some(result_object) = result_value.as_object() else {
            return failure("result не является объектом");
        };
        let result = decode_result(result_object);
        let targets = decode_targets(request.get("targets").and_then(Value::as_object));
        // A `params.type` field is accepted for compatibility but never
        // consulted: rows route by their own family tag.

        match self.engine.write_back_to(&result, &targets) {
            Ok(true) => json!({ "success": true, "errorMessage": "" }),
            _ => failure("Не удалось записать результаты в объекты"),
        }
    }
}

fn failure(message: &str) -> Value {
    json!({ "success": false, "errorMessage": message })
}

fn settings_tree(settings: &Settings) -> Value {
    json!({
        "defaultType": settings.default_type,
        "wallIdForFloorHeight": settings.wall_id_for_floor_height,
        "showDuplicateWarning": settings.show_duplicate_warning,
        "warnOnOverflow": settings.warn_on_overflow,
        "floorHeight": settings.floor_height,
        "type0": {
            "plankWidth": settings.type0.plank_width,
            "slopeWidth": settings.type0.slope_width,
            "offsetX": settings.type0.offset_x,
            "offsetY": settings.type0.offset_y,
            "plankId": settings.type0.plank_id,
            "leftSlopeId": settings.type0.left_slope_id,
            "rightSlopeId": settings.type0.right_slope_id,
        },
        "type1_2": {
            "plankWidth": settings.type1_2.plank_width,
            "slopeWidth": settings.type1_2.slope_width,
            "offsetX": settings.type1_2.offset_x,
            "offsetY": settings.type1_2.offset_y,
            "x2Coeff": settings.type1_2.x2_coeff,
            "cassetteId": settings.type1_2.cassette_id,
            "plankId": settings.type1_2.plank_id,
            "leftSlopeId": settings.type1_2.left_slope_id,
            "rightSlopeId": settings.type1_2.right_slope_id,
        },
    })
}

fn decode_opening(object: &Map<String, Value>) -> Opening {
    let id = str_field(object, "id");
    let kind = if str_field(object, "kind") == "door" {
        OpeningKind::Door
    } else {
        OpeningKind::Window
    };
    // Embeddings that classified on their side send calcType along; anything
    // else gets classified from the identifier here.
    let calc_type = match object.get("calcType") {
        Some(value) => CalcType::from(as_i32(value, -1)),
        None => classify(&id),
    };
    Opening {
        id,
        kind,
        width: f64_field(object, "width", 0.0),
        height: f64_field(object, "height", 0.0),
        sill_height: f64_field(object, "sillHeight", 0.0),
        calc_type,
    }
}

fn decode_params(object: Option<&Map<String, Value>>) -> CalcParams {
    let mut params = CalcParams::default();
    if let Some(object) = object {
        params.floor_height = f64_field(object, "floorHeight", params.floor_height);
        params.plank_width0 = i32_field(object, "plankWidth0", params.plank_width0);
        params.slope_width0 = i32_field(object, "slopeWidth0", params.slope_width0);
        params.plank_width12 = i32_field(object, "plankWidth12", params.plank_width12);
        params.slope_width12 = i32_field(object, "slopeWidth12", params.slope_width12);
        params.offset_x = i32_field(object, "offsetX", params.offset_x);
        params.offset_y = i32_field(object, "offsetY", params.offset_y);
        params.offset_top = i32_field(object, "offsetTop", params.offset_top);
    }
    params
}

fn decode_result(object: &Map<String, Value>) -> CalculationResult {
    CalculationResult {
        cassettes: rows_of(object, "cassettes", decode_cassette),
        planks: rows_of(object, "planks", decode_plank),
        left_slopes: rows_of(object, "leftSlopes", decode_plank),
        right_slopes: rows_of(object, "rightSlopes", decode_plank),
        duplicate_ids: Vec::new(),
        success: true,
        error_message: String::new(),
    }
}

fn rows_of<T>(
    object: &Map<String, Value>,
    key: &str,
    decode: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(decode)
                .collect()
        })
        .unwrap_or_default()
}

fn decode_cassette(object: &Map<String, Value>) -> CassetteSize {
    CassetteSize {
        x: i32_field(object, "x", 0),
        y: i32_field(object, "y", 0),
        count: i32_field(object, "count", 0).max(0) as u32,
    }
}

fn decode_plank(object: &Map<String, Value>) -> PlankSize {
    PlankSize {
        width: i32_field(object, "width", 0),
        length: i32_field(object, "length", 0),
        count: i32_field(object, "count", 0).max(0) as u32,
        calc_type: i32_field(object, "calcType", 0),
    }
}

/// Absent target fields stay empty, so their categories are skipped.
fn decode_targets(object: Option<&Map<String, Value>>) -> TargetObjects {
    let mut targets = TargetObjects {
        plank_id0: String::new(),
        left_slope_id0: String::new(),
        right_slope_id0: String::new(),
        cassette_id12: String::new(),
        plank_id12: String::new(),
        left_slope_id12: String::new(),
        right_slope_id12: String::new(),
    };
    if let Some(object) = object {
        targets.plank_id0 = str_field(object, "plankId0");
        targets.left_slope_id0 = str_field(object, "leftSlopeId0");
        targets.right_slope_id0 = str_field(object, "rightSlopeId0");
        targets.cassette_id12 = str_field(object, "cassetteId12");
        targets.plank_id12 = str_field(object, "plankId12");
        targets.left_slope_id12 = str_field(object, "leftSlopeId12");
        targets.right_slope_id12 = str_field(object, "rightSlopeId12");
    }
    targets
}

// Lenient coercions matching the panel's JS-value helpers: numbers accept
// strings (comma tolerated as decimal separator), integers accept floats,
// everything else falls back to the default.

fn as_str(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn as_f64(value: &Value, default: f64) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(default),
        Value::String(text) => text.trim().replace(',', ".").parse().unwrap_or(default),
        _ => default,
    }
}

fn as_i32(value: &Value, default: i32) -> i32 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(|v| v as i32)
            .or_else(|| number.as_f64().map(|v| v as i32))
            .unwrap_or(default),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i32>()
                .ok()
                .or_else(|| text.replace(',', ".").parse::<f64>().ok().map(|v| v as i32))
                .unwrap_or(default)
        }
        _ => default,
    }
}

fn str_field(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).map(as_str).unwrap_or_default()
}

fn f64_field(object: &Map<String, Value>, key: &str, default: f64) -> f64 {
    object.get(key).map_or(default, |value| as_f64(value, default))
}

fn i32_field(object: &Map<String, Value>, key: &str, default: i32) -> i32 {
    object.get(key).map_or(default, |value| as_i32(value, default))
}
