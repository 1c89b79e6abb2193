use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use cassette_cutlist::{CutlistEngine, ExchangeBridge, ModelFileAdapter, Settings};

fn write_model(dir: &TempDir) -> PathBuf {
    let document = json!({
        "openings": [
            {"id": "ОК-1 (01)", "kind": "window", "width": 1.2, "height": 1.5, "sillHeight": 0.9},
            {"id": "ОК-1 (01)", "kind": "window", "width": 1.0, "height": 1.5, "sillHeight": 0.9},
            {"id": "ДВ-0 (05)", "kind": "door", "width": 0.9, "height": 2.1}
        ],
        "walls": [
            {"id": "СН-МД1 (02)", "height": 3.3}
        ],
        "objects": [
            {"id": "OK-1_2_CASS"}, {"id": "OK-1_2_PLNK"},
            {"id": "OK-1_2_LOTK"}, {"id": "OK-1_2_ROTK"}
        ]
    });
    let path = dir.path().join("model.json");
    fs::write(&path, document.to_string()).unwrap();
    path
}

fn bridge_over(path: &PathBuf) -> ExchangeBridge<ModelFileAdapter> {
    let adapter = ModelFileAdapter::open(path).unwrap();
    ExchangeBridge::new(CutlistEngine::new(Settings::default(), adapter))
}

#[test]
fn test_selection_reply_shape() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    let reply = bridge.dispatch("GetCassetteSelection", &Value::Null);

    assert_eq!(reply["success"], json!(true));
    assert_eq!(reply["count"], json!(3));
    assert_eq!(reply["duplicates"], json!(["ОК-1 (01)"]));
    let windows = reply["windows"].as_array().unwrap();
    assert_eq!(windows[0]["id"], json!("ОК-1 (01)"));
    assert_eq!(windows[0]["calcType"], json!(1));
    assert_eq!(windows[0]["sillHeight"], json!(0.9));
    assert_eq!(windows[2]["kind"], json!("door"));
    assert_eq!(windows[2]["calcType"], json!(0));
}

#[test]
fn test_floor_height_from_document_wall() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    let reply = bridge.dispatch("GetFloorHeightFromWall", &json!("СН-МД1"));
    assert_eq!(reply, json!({"height": 3.3, "found": true}));

    // An empty argument falls back to the default wall pattern, which this
    // document happens to match.
    let reply = bridge.dispatch("GetFloorHeightFromWall", &json!(""));
    assert_eq!(reply["found"], json!(true));

    let reply = bridge.dispatch("GetFloorHeightFromWall", &json!("СН-МД9"));
    assert_eq!(reply, json!({"height": 0.0, "found": false}));
}

#[test]
fn test_selection_feeds_calculate() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    // The panel flow: take the selection reply and hand its windows straight
    // back to the calculation operation.
    let selection = bridge.dispatch("GetCassetteSelection", &Value::Null);
    let reply = bridge.dispatch(
        "CalculateCassettes",
        &json!({
            "windows": selection["windows"],
            "params": {"floorHeight": 3.3}
        }),
    );

    assert_eq!(reply["success"], json!(true));
    assert_eq!(reply["duplicates"], json!(["ОК-1 (01)"]));
    // Two type-1 windows of different widths, one type-0 door.
    assert_eq!(
        reply["cassettes"],
        json!([
            {"x": 1065, "y": 1050, "count": 1},
            {"x": 1065, "y": 1250, "count": 1}
        ])
    );
    let planks = reply["planks"].as_array().unwrap();
    assert_eq!(planks[0]["calcType"], json!(0));
    assert_eq!(planks[0]["length"], json!(950));
    assert_eq!(planks.len(), 3);
}

#[test]
fn test_calculate_then_write_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    let result = bridge.dispatch(
        "CalculateCassettes",
        &json!({
            "windows": [
                {"id": "ОК-1 (01)", "width": 1.2, "height": 1.5, "sillHeight": 0.9}
            ]
        }),
    );
    let reply = bridge.dispatch(
        "WriteCassetteResults",
        &json!({
            "result": result,
            "targets": {
                "cassetteId12": "OK-1_2_CASS",
                "plankId12": "OK-1_2_PLNK",
                "leftSlopeId12": "OK-1_2_LOTK",
                "rightSlopeId12": "OK-1_2_ROTK"
            }
        }),
    );

    assert_eq!(reply, json!({"success": true, "errorMessage": ""}));

    let reopened = ModelFileAdapter::open(&path).unwrap();
    let cass = reopened
        .document()
        .objects
        .iter()
        .find(|object| object.id == "OK-1_2_CASS")
        .unwrap();
    assert_eq!(
        cass.fields.get("Text_3").map(String::as_str),
        Some("Размер: U x V : 1065x1250 мм; Количество: 1 шт.")
    );
    assert_eq!(cass.fields.get("Text_4").map(String::as_str), Some(" "));
}

#[test]
fn test_write_to_missing_target_reports_failure() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    let reply = bridge.dispatch(
        "WriteCassetteResults",
        &json!({
            "result": {
                "planks": [{"width": 160, "length": 1250, "count": 2, "calcType": 1}]
            },
            "targets": {"plankId12": "NO_SUCH_OBJECT"}
        }),
    );

    assert_eq!(reply["success"], json!(false));
    assert_eq!(
        reply["errorMessage"],
        json!("Не удалось записать результаты в объекты")
    );
}

#[test]
fn test_settings_reply_matches_engine_settings() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir);
    let mut bridge = bridge_over(&path);

    let reply = bridge.dispatch("GetCassetteSettings", &Value::Null);

    assert_eq!(reply["showDuplicateWarning"], json!(true));
    assert_eq!(reply["floorHeight"], json!(2.99));
    assert_eq!(reply["type0"]["plankId"], json!("OK-0_PLNK"));
    assert_eq!(reply["type1_2"]["slopeWidth"], json!(225));
}
