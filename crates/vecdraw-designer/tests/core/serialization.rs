use crate::support::{assert_same_shapes, line, rect, text};
use parking_lot::Mutex;
use std::sync::Arc;
use vecdraw_core::{ChangeKind, ColorData, DrawingEvent, EventFilter, Point2D};
use vecdraw_designer::{DesignFile, Drawing, GridState, Shape};

fn sample_drawing() -> Drawing {
    let mut drawing = Drawing::new();
    let group = Shape::group(vec![
        rect(0.0, 0.0, 10.0, 10.0),
        line(20.0, 0.0, 30.0, 10.0),
    ])
    .unwrap();
    drawing
        .add_shape(rect(5.0, 5.0, 40.0, 20.0).with_fill(ColorData::RED))
        .unwrap();
    drawing.add_shape(text("caption").with_rotation(30.0).unwrap()).unwrap();
    drawing
        .add_shape(
            Shape::polygon(vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(10.0, 0.0),
                Point2D::new(5.0, 8.0),
            ])
            .unwrap(),
        )
        .unwrap();
    drawing.add_shape(group).unwrap();
    drawing
        .set_grid(GridState {
            visible: false,
            spacing: 4.0,
        })
        .unwrap();
    drawing
}

#[test]
fn test_design_round_trips_through_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("sample.vdraw");
    let original = sample_drawing();

    DesignFile::from_drawing(&original, "Sample")
        .save_to_file(&path)
        .unwrap();
    let loaded = DesignFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.metadata.name, "Sample");

    let mut restored = Drawing::new();
    loaded.apply_to(&mut restored).unwrap();

    assert_same_shapes(original.shapes(), restored.shapes());
    assert_eq!(restored.grid(), original.grid());
    assert_eq!(restored.census(), original.census());
}

#[test]
fn test_new_design_is_empty() {
    let design = DesignFile::new("Blank");
    assert!(design.shapes.is_empty());
    assert_eq!(design.metadata.created, design.metadata.modified);
    assert_eq!(design.grid, GridState::default());
}

#[test]
fn test_touch_updates_modified_time() {
    let mut design = DesignFile::new("Blank");
    let created = design.metadata.created;
    design.touch();
    assert!(design.metadata.modified >= created);
    assert_eq!(design.metadata.created, created);
}

#[test]
fn test_invalid_shape_is_rejected_without_touching_drawing() {
    let design = DesignFile::from_drawing(&sample_drawing(), "Broken");
    let mut value = serde_json::to_value(&design).unwrap();
    value["shapes"][0]["kind"]["bounds"]["width"] = serde_json::json!(0.0);
    let broken: DesignFile = serde_json::from_value(value).unwrap();

    let mut drawing = Drawing::new();
    drawing.add_shape(rect(1.0, 1.0, 1.0, 1.0)).unwrap();
    let before = drawing.snapshot();

    assert!(broken.apply_to(&mut drawing).is_err());
    assert_same_shapes(&before, drawing.shapes());
}

#[test]
fn test_duplicate_identity_is_rejected() {
    let shape = rect(0.0, 0.0, 5.0, 5.0);
    let mut design = DesignFile::new("Dupes");
    design.shapes = vec![shape.clone(), shape];

    let mut drawing = Drawing::new();
    let error = design.apply_to(&mut drawing).unwrap_err();
    assert!(error.to_string().contains("invalid shapes"));
    assert!(drawing.is_empty());
}

#[test]
fn test_missing_file_reports_context() {
    let temp_dir = tempfile::tempdir().unwrap();
    let error = DesignFile::load_from_file(temp_dir.path().join("absent.vdraw")).unwrap_err();
    assert!(error.to_string().contains("Failed to read design file"));
}

#[test]
fn test_malformed_json_reports_context() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("garbage.vdraw");
    std::fs::write(&path, "{ not json").unwrap();

    let error = DesignFile::load_from_file(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse design file"));
}

#[test]
fn test_optional_fields_default_when_absent() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Minimal",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-01T00:00:00Z"
        },
        "shapes": []
    }"#;
    let design: DesignFile = serde_json::from_str(json).unwrap();
    assert_eq!(design.grid, GridState::default());
    assert!(design.metadata.author.is_empty());
}

#[test]
fn test_invalid_grid_is_rejected_without_touching_drawing() {
    let mut design = DesignFile::from_drawing(&sample_drawing(), "Broken grid");
    design.grid.spacing = 0.0;

    let mut drawing = Drawing::new();
    drawing.add_shape(rect(1.0, 1.0, 1.0, 1.0)).unwrap();
    let before = drawing.snapshot();
    let events = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&events);
    drawing.subscribe(EventFilter::All, move |_: &DrawingEvent| *counter.lock() += 1);

    let error = design.apply_to(&mut drawing).unwrap_err();
    assert!(error.to_string().contains("invalid grid settings"));
    assert_same_shapes(&before, drawing.shapes());
    assert_eq!(drawing.grid(), GridState::default());
    assert_eq!(*events.lock(), 0);
}

#[test]
fn test_apply_emits_single_load_event() {
    let design = DesignFile::from_drawing(&sample_drawing(), "Sample");
    let mut drawing = Drawing::new();
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&kinds);
    drawing.subscribe(EventFilter::All, move |event: &DrawingEvent| {
        sink.lock().push(event.kind)
    });

    design.apply_to(&mut drawing).unwrap();
    assert_eq!(*kinds.lock(), vec![ChangeKind::Load]);
    assert_eq!(drawing.grid(), design.grid);
}

#[test]
fn test_group_child_sharing_top_level_identity_is_rejected() {
    let child = rect(0.0, 0.0, 5.0, 5.0);
    let group = Shape::group(vec![child.clone(), line(10.0, 0.0, 20.0, 5.0)]).unwrap();
    let mut design = DesignFile::new("Shared child");
    design.shapes = vec![group, child];

    let mut drawing = Drawing::new();
    let error = design.apply_to(&mut drawing).unwrap_err();
    assert!(error.to_string().contains("invalid shapes"));
    assert!(drawing.is_empty());
}
