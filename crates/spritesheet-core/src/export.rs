use crate::model::SheetLayout;
use serde_json::{Value, json};

/// Serialize the sheet as `{ width, height, frames: [...], meta }`, frames in
/// placement order. Suitable for generic tooling and simple consumption.
pub fn to_json_array(sheet: &SheetLayout) -> Value {
    let frames: Vec<Value> = sheet
        .frames
        .iter()
        .map(|fr| {
            json!({
                "name": fr.name,
                "frame": {"x": fr.x, "y": fr.y, "w": fr.w, "h": fr.h},
            })
        })
        .collect();
    json!({
        "width": sheet.width,
        "height": sheet.height,
        "frames": frames,
        "meta": &sheet.meta,
    })
}

/// Flatten frames keyed by name.
/// Shape: `{ frames: { name: { frame, sourceSize } }, size, meta }`, the
/// TexturePacker-like JSON hash many pipelines expect. With duplicate names
/// the last frame wins.
pub fn to_json_hash(sheet: &SheetLayout) -> Value {
    let mut frames = serde_json::Map::new();
    for fr in &sheet.frames {
        frames.insert(
            fr.name.clone(),
            json!({
                "frame": {"x": fr.x, "y": fr.y, "w": fr.w, "h": fr.h},
                "sourceSize": {"w": fr.w, "h": fr.h},
            }),
        );
    }
    json!({
        "frames": frames,
        "size": {"w": sheet.width, "h": sheet.height},
        "meta": &sheet.meta,
    })
}
