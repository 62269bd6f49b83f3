use crate::support::{assert_same_shapes, line, rect, text, Fixture};
use vecdraw_core::{ColorData, CommandError, DrawingError, Point2D, Rect, ShapeId, Vector2D};
use vecdraw_designer::{
    AddShapeCommand, BringToFrontCommand, ChangeFillColorCommand, ChangeFontSizeCommand,
    ChangeStrokeColorCommand, ChangeTextCommand, Command, CompositeCommand, CopyCommand,
    CutCommand, DeleteShapeCommand, DrawingCommand, DuplicateCommand, MoveShapeCommand,
    PasteCommand, Placement, ReflectHorizontalCommand, ReflectVerticalCommand,
    ResizeShapeCommand, RotateShapeCommand, SendToBackCommand, Shape,
};

fn three_shapes() -> (Fixture, Vec<ShapeId>) {
    Fixture::with_shapes(vec![
        rect(0.0, 0.0, 10.0, 10.0).with_fill(ColorData::GREEN),
        line(20.0, 0.0, 30.0, 10.0),
        text("label"),
    ])
}

/// execute; undo restores the prior state, and redo reproduces execute
fn assert_reversible(fixture: &mut Fixture, command: DrawingCommand) {
    let before = fixture.drawing.snapshot();
    fixture.run(command).unwrap();
    let after = fixture.drawing.snapshot();

    assert!(fixture.undo().unwrap());
    assert_same_shapes(&before, fixture.drawing.shapes());

    assert!(fixture.redo().unwrap());
    assert_same_shapes(&after, fixture.drawing.shapes());

    assert!(fixture.undo().unwrap());
    assert_same_shapes(&before, fixture.drawing.shapes());
}

#[test]
fn test_add_and_delete_are_reversible() {
    let (mut fixture, ids) = three_shapes();
    assert_reversible(&mut fixture, AddShapeCommand::new(rect(5.0, 5.0, 1.0, 1.0)).into());
    assert_reversible(
        &mut fixture,
        AddShapeCommand::at_index(rect(5.0, 5.0, 1.0, 1.0), 1).into(),
    );
    assert_reversible(&mut fixture, DeleteShapeCommand::new(ids[1]).into());
}

#[test]
fn test_transform_commands_are_reversible() {
    let (mut fixture, ids) = three_shapes();
    let target = Rect::from_xywh(3.0, 4.0, 50.0, 25.0).unwrap();

    assert_reversible(
        &mut fixture,
        MoveShapeCommand::new(ids[0], Vector2D::new(7.0, -3.0)).into(),
    );
    for &id in &ids {
        assert_reversible(&mut fixture, ResizeShapeCommand::new(id, target).into());
        assert_reversible(&mut fixture, RotateShapeCommand::new(id, 135.0).into());
        assert_reversible(&mut fixture, ReflectHorizontalCommand::new(id).into());
        assert_reversible(&mut fixture, ReflectVerticalCommand::new(id).into());
    }
}

#[test]
fn test_style_commands_are_reversible() {
    let (mut fixture, ids) = three_shapes();
    for &id in &ids {
        assert_reversible(
            &mut fixture,
            ChangeStrokeColorCommand::new(id, ColorData::RED).into(),
        );
        assert_reversible(
            &mut fixture,
            ChangeFillColorCommand::new(id, ColorData::BLUE).into(),
        );
    }

    let font = ChangeFontSizeCommand::new(&fixture.drawing, ids[2], 30.0).unwrap();
    assert_reversible(&mut fixture, font.into());
    let content = ChangeTextCommand::new(&fixture.drawing, ids[2], "a longer label").unwrap();
    assert_reversible(&mut fixture, content.into());
}

#[test]
fn test_ordering_commands_are_reversible() {
    let (mut fixture, ids) = three_shapes();
    assert_reversible(&mut fixture, BringToFrontCommand::new(ids[0]).into());
    assert_reversible(&mut fixture, SendToBackCommand::new(ids[2]).into());
}

#[test]
fn test_move_undo_applies_negated_delta() {
    let (mut fixture, ids) = three_shapes();
    fixture
        .run(MoveShapeCommand::new(ids[0], Vector2D::new(10.0, 20.0)))
        .unwrap();
    assert_eq!(
        fixture.drawing.get(ids[0]).unwrap().bounds().top_left(),
        Point2D::new(10.0, 20.0)
    );
    fixture.undo().unwrap();
    assert_eq!(
        fixture.drawing.get(ids[0]).unwrap().bounds().top_left(),
        Point2D::ORIGIN
    );
}

#[test]
fn test_unprepared_command_refuses_to_run() {
    let (mut fixture, ids) = three_shapes();
    let mut command = RotateShapeCommand::new(ids[0], 90.0);

    assert!(matches!(
        fixture.execute(&mut command),
        Err(CommandError::NotPrepared { .. })
    ));
    assert!(matches!(
        fixture.undo_one(&mut command),
        Err(CommandError::NotPrepared { .. })
    ));
    assert_eq!(fixture.drawing.get(ids[0]).unwrap().rotation(), 0.0);
}

#[test]
fn test_text_commands_reject_non_text_at_construction() {
    let (fixture, ids) = three_shapes();
    assert!(matches!(
        ChangeFontSizeCommand::new(&fixture.drawing, ids[0], 20.0),
        Err(CommandError::Precondition { .. })
    ));
    assert!(matches!(
        ChangeTextCommand::new(&fixture.drawing, ids[1], "x"),
        Err(CommandError::Precondition { .. })
    ));
    assert!(matches!(
        ChangeFontSizeCommand::new(&fixture.drawing, ids[2], -1.0),
        Err(CommandError::Precondition { .. })
    ));
}

#[test]
fn test_resize_rejects_degenerate_target_at_prepare() {
    let (mut fixture, ids) = three_shapes();
    let flat = Rect::from_xywh(0.0, 0.0, 0.0, 0.0).unwrap();

    assert!(fixture.run(ResizeShapeCommand::new(ids[0], flat)).is_err());
    assert!(!fixture.history.can_undo());
}

#[test]
fn test_delete_restores_original_index() {
    let (mut fixture, ids) = three_shapes();
    let mut command = DeleteShapeCommand::new(ids[1]);
    fixture.prepare(&mut command).unwrap();
    fixture.execute(&mut command).unwrap();
    assert_eq!(fixture.drawing.ids(), vec![ids[0], ids[2]]);

    fixture.undo_one(&mut command).unwrap();
    assert_eq!(command.last_restore(), Some(Placement::Exact(1)));
    assert_eq!(fixture.drawing.ids(), ids);
}

#[test]
fn test_delete_undo_appends_when_index_is_stale() {
    let (mut fixture, ids) = three_shapes();
    let mut command = DeleteShapeCommand::new(ids[2]);
    fixture.prepare(&mut command).unwrap();
    fixture.execute(&mut command).unwrap();

    fixture.drawing.remove_shape(ids[0]).unwrap();
    fixture.drawing.remove_shape(ids[1]).unwrap();

    fixture.undo_one(&mut command).unwrap();
    assert_eq!(command.last_restore(), Some(Placement::Appended(0)));
    assert_eq!(fixture.drawing.ids(), vec![ids[2]]);
}

#[test]
fn test_bring_to_front_undo_restores_index_after_intervening_edits() {
    let (mut fixture, mut ids) = three_shapes();
    let extra = rect(50.0, 50.0, 5.0, 5.0);
    ids.push(extra.id());
    fixture.drawing.add_shape(extra).unwrap();

    let mut command = BringToFrontCommand::new(ids[0]);
    fixture.prepare(&mut command).unwrap();
    assert_eq!(command.original_index(), Some(0));
    fixture.execute(&mut command).unwrap();
    assert_eq!(fixture.index(ids[0]), 3);

    // Unrelated edits between execute and undo
    fixture.drawing.remove_shape(ids[3]).unwrap();
    let late = rect(70.0, 70.0, 5.0, 5.0);
    let late_id = late.id();
    fixture.drawing.add_shape(late).unwrap();

    fixture.undo_one(&mut command).unwrap();
    assert_eq!(command.last_restore(), Some(Placement::Exact(0)));
    assert_eq!(fixture.drawing.ids(), vec![ids[0], ids[1], ids[2], late_id]);
}

#[test]
fn test_bring_to_front_undo_appends_when_index_is_stale() {
    let (mut fixture, mut ids) = three_shapes();
    let extra = rect(50.0, 50.0, 5.0, 5.0);
    ids.push(extra.id());
    fixture.drawing.add_shape(extra).unwrap();

    let mut command = BringToFrontCommand::new(ids[2]);
    fixture.prepare(&mut command).unwrap();
    assert_eq!(command.original_index(), Some(2));
    fixture.execute(&mut command).unwrap();

    for &id in &[ids[0], ids[1], ids[3]] {
        fixture.drawing.remove_shape(id).unwrap();
    }

    fixture.undo_one(&mut command).unwrap();
    assert_eq!(command.last_restore(), Some(Placement::Appended(0)));
    assert_eq!(fixture.drawing.ids(), vec![ids[2]]);
}

#[test]
fn test_send_to_back_undo_restores_index() {
    let (mut fixture, ids) = three_shapes();
    let mut command = SendToBackCommand::new(ids[2]);
    fixture.prepare(&mut command).unwrap();
    fixture.execute(&mut command).unwrap();
    assert_eq!(fixture.drawing.ids(), vec![ids[2], ids[0], ids[1]]);

    fixture.undo_one(&mut command).unwrap();
    assert_eq!(command.last_restore(), Some(Placement::Exact(2)));
    assert_eq!(fixture.drawing.ids(), ids);
}

#[test]
fn test_cut_undo_keeps_clipboard() {
    let (mut fixture, ids) = three_shapes();
    fixture.run(CutCommand::new(ids[1])).unwrap();

    assert!(!fixture.drawing.contains(ids[1]));
    assert_eq!(fixture.clipboard.get().unwrap().id(), ids[1]);

    fixture.undo().unwrap();
    assert_eq!(fixture.drawing.ids(), ids);
    assert_eq!(fixture.clipboard.get().unwrap().id(), ids[1]);
}

#[test]
fn test_copy_fills_clipboard_and_undo_is_noop() {
    let (mut fixture, ids) = three_shapes();
    let before = fixture.drawing.snapshot();
    fixture.run(CopyCommand::new(ids[0])).unwrap();

    // Later edits to the source do not reach the clipboard
    fixture
        .drawing
        .move_shape(ids[0], Vector2D::new(100.0, 0.0))
        .unwrap();
    let copied = fixture.clipboard.get().unwrap();
    assert!(copied.same_state(&before[0]));

    fixture
        .drawing
        .move_shape(ids[0], Vector2D::new(-100.0, 0.0))
        .unwrap();
    fixture.undo().unwrap();
    assert_same_shapes(&before, fixture.drawing.shapes());
    assert!(!fixture.clipboard.is_empty());
}

#[test]
fn test_paste_adds_offset_copy_with_new_identity() {
    let (mut fixture, ids) = three_shapes();
    fixture.run(CopyCommand::new(ids[0])).unwrap();

    let mut paste = PasteCommand::new(Vector2D::new(10.0, 10.0));
    fixture.prepare(&mut paste).unwrap();
    let pasted = paste.pasted_id().unwrap();
    fixture.run(paste).unwrap();

    assert_ne!(pasted, ids[0]);
    let shape = fixture.drawing.get(pasted).unwrap();
    assert_eq!(shape.bounds(), Rect::from_xywh(10.0, 10.0, 10.0, 10.0).unwrap());
    assert_eq!(shape.fill_color(), Some(ColorData::GREEN));
    assert_eq!(fixture.index(pasted), 3);
}

#[test]
fn test_paste_undo_removes_exactly_that_instance() {
    let (mut fixture, ids) = three_shapes();
    fixture.run(CopyCommand::new(ids[0])).unwrap();
    fixture
        .run(PasteCommand::new(Vector2D::new(10.0, 10.0)))
        .unwrap();
    fixture
        .run(PasteCommand::new(Vector2D::new(10.0, 10.0)))
        .unwrap();
    assert_eq!(fixture.drawing.len(), 5);
    let first_paste = fixture.drawing.ids()[3];
    let second_paste = fixture.drawing.ids()[4];
    assert_ne!(first_paste, second_paste);

    fixture.undo().unwrap();
    assert!(fixture.drawing.contains(first_paste));
    assert!(!fixture.drawing.contains(second_paste));

    // Redo brings back the same instance, not a fresh one
    fixture.redo().unwrap();
    assert!(fixture.drawing.contains(second_paste));
}

#[test]
fn test_paste_with_empty_clipboard_fails() {
    let (mut fixture, _) = three_shapes();
    let result = fixture.run(PasteCommand::new(Vector2D::new(10.0, 10.0)));
    assert_eq!(result, Err(CommandError::ClipboardEmpty));
    assert_eq!(fixture.drawing.len(), 3);
    assert!(!fixture.history.can_undo());
}

#[test]
fn test_duplicate_leaves_clipboard_alone() {
    let (mut fixture, ids) = three_shapes();
    let mut duplicate = DuplicateCommand::new(ids[1], Vector2D::new(5.0, 5.0));
    fixture.prepare(&mut duplicate).unwrap();
    let copy_id = duplicate.duplicate_id().unwrap();
    fixture.run(duplicate).unwrap();

    assert!(fixture.clipboard.is_empty());
    let original = fixture.drawing.get(ids[1]).unwrap().bounds();
    let copy = fixture.drawing.get(copy_id).unwrap().bounds();
    assert_eq!(copy, original.translate(Vector2D::new(5.0, 5.0)));

    fixture.undo().unwrap();
    assert!(!fixture.drawing.contains(copy_id));
}

#[test]
fn test_add_from_prototype_mints_identity() {
    let (mut fixture, _) = three_shapes();
    let prototype = rect(0.0, 0.0, 4.0, 4.0);
    let command = AddShapeCommand::from_prototype(&prototype, Vector2D::new(1.0, 2.0));
    let id = command.shape_id();
    fixture.run(command).unwrap();

    assert_ne!(id, prototype.id());
    assert_eq!(
        fixture.drawing.get(id).unwrap().bounds(),
        Rect::from_xywh(1.0, 2.0, 4.0, 4.0).unwrap()
    );
}

#[test]
fn test_add_at_out_of_range_index_fails_at_prepare() {
    let (mut fixture, _) = three_shapes();
    let result = fixture.run(AddShapeCommand::at_index(rect(0.0, 0.0, 1.0, 1.0), 9));
    assert!(matches!(
        result,
        Err(CommandError::Drawing(DrawingError::IndexOutOfRange { index: 9, len: 3 }))
    ));
    assert_eq!(fixture.drawing.len(), 3);
}

#[test]
fn test_composite_runs_as_one_step() {
    let (mut fixture, ids) = three_shapes();
    let before = fixture.drawing.snapshot();
    let batch = CompositeCommand::new(
        "Delete",
        ids.iter()
            .map(|&id| DrawingCommand::from(DeleteShapeCommand::new(id)))
            .collect(),
    );
    fixture.run(batch).unwrap();

    assert!(fixture.drawing.is_empty());
    assert_eq!(fixture.history.undo_depth(), 1);
    assert_eq!(fixture.history.undo_name(), Some("Delete"));

    fixture.undo().unwrap();
    assert_same_shapes(&before, fixture.drawing.shapes());
}

#[test]
fn test_composite_rolls_back_on_failure() {
    let (mut fixture, ids) = three_shapes();
    let before = fixture.drawing.snapshot();
    let missing = Shape::rectangle(Rect::from_xywh(0.0, 0.0, 1.0, 1.0).unwrap())
        .unwrap()
        .id();
    let batch = CompositeCommand::new(
        "Move",
        vec![
            MoveShapeCommand::new(ids[0], Vector2D::new(5.0, 5.0)).into(),
            MoveShapeCommand::new(ids[1], Vector2D::new(5.0, 5.0)).into(),
            MoveShapeCommand::new(missing, Vector2D::new(5.0, 5.0)).into(),
        ],
    );

    assert!(fixture.run(batch).is_err());
    assert_same_shapes(&before, fixture.drawing.shapes());
    assert!(!fixture.history.can_undo());
}

#[test]
fn test_empty_composite_is_rejected() {
    let (mut fixture, _) = three_shapes();
    assert!(matches!(
        fixture.run(CompositeCommand::new("Nothing", Vec::new())),
        Err(CommandError::Precondition { .. })
    ));
}

#[test]
fn test_commands_on_missing_shape_fail_cleanly() {
    let (mut fixture, _) = three_shapes();
    let ghost = rect(0.0, 0.0, 1.0, 1.0).id();
    let before = fixture.drawing.snapshot();

    let attempts: Vec<DrawingCommand> = vec![
        DeleteShapeCommand::new(ghost).into(),
        MoveShapeCommand::new(ghost, Vector2D::new(1.0, 1.0)).into(),
        RotateShapeCommand::new(ghost, 10.0).into(),
        ChangeStrokeColorCommand::new(ghost, ColorData::RED).into(),
        CutCommand::new(ghost).into(),
        CopyCommand::new(ghost).into(),
        BringToFrontCommand::new(ghost).into(),
        ReflectVerticalCommand::new(ghost).into(),
    ];
    for command in attempts {
        let name = command.name().to_string();
        assert!(
            matches!(
                fixture.run(command),
                Err(CommandError::Drawing(DrawingError::ShapeNotFound { .. }))
            ),
            "{name} should report the missing shape"
        );
    }
    assert_same_shapes(&before, fixture.drawing.shapes());
    assert!(fixture.clipboard.is_empty());
}

#[test]
fn test_non_finite_offsets_are_rejected_at_prepare() {
    let (mut fixture, ids) = three_shapes();
    fixture.run(CopyCommand::new(ids[0])).unwrap();
    let before = fixture.drawing.snapshot();
    let depth = fixture.history.undo_depth();
    let nan = Vector2D::new(f64::NAN, 0.0);
    let inf = Vector2D::new(0.0, f64::NEG_INFINITY);

    let attempts: Vec<DrawingCommand> = vec![
        MoveShapeCommand::new(ids[0], nan).into(),
        MoveShapeCommand::new(ids[1], inf).into(),
        PasteCommand::new(nan).into(),
        DuplicateCommand::new(ids[2], inf).into(),
        AddShapeCommand::from_prototype(&rect(0.0, 0.0, 4.0, 4.0), nan).into(),
    ];
    for command in attempts {
        let name = command.name().to_string();
        assert!(
            matches!(fixture.run(command), Err(CommandError::Precondition { .. })),
            "{name} accepted a non-finite offset"
        );
    }

    assert_same_shapes(&before, fixture.drawing.shapes());
    assert_eq!(fixture.history.undo_depth(), depth);
}

#[test]
fn test_add_rejects_shape_with_corrupt_geometry() {
    let (mut fixture, _) = three_shapes();
    let mut corrupt = rect(0.0, 0.0, 4.0, 4.0);
    corrupt.translate(Vector2D::new(f64::INFINITY, 0.0));

    assert!(matches!(
        fixture.run(AddShapeCommand::new(corrupt)),
        Err(CommandError::Shape(_))
    ));
    assert_eq!(fixture.drawing.len(), 3);
}
