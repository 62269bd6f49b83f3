use crate::support::{rect, Fixture};
use vecdraw_core::{CommandError, DrawingError, Vector2D};
use vecdraw_designer::{AddShapeCommand, CommandManager, MoveShapeCommand, RotateShapeCommand};

#[test]
fn test_empty_history_is_a_no_op() {
    let mut fixture = Fixture::new();
    assert!(!fixture.history.can_undo());
    assert!(!fixture.history.can_redo());
    assert!(!fixture.undo().unwrap());
    assert!(!fixture.redo().unwrap());
    assert_eq!(fixture.history.undo_name(), None);
}

#[test]
fn test_new_action_discards_redo() {
    let mut fixture = Fixture::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 1.0, 1.0);
    let (ida, idb) = (a.id(), b.id());

    fixture.run(AddShapeCommand::new(a)).unwrap();
    fixture.undo().unwrap();
    assert!(fixture.history.can_redo());

    fixture.run(AddShapeCommand::new(b)).unwrap();
    assert!(!fixture.history.can_redo());
    assert!(!fixture.redo().unwrap());
    assert_eq!(fixture.drawing.ids(), vec![idb]);
    assert!(!fixture.drawing.contains(ida));
}

#[test]
fn test_undo_and_redo_move_between_stacks() {
    let (mut fixture, ids) = Fixture::with_shapes(vec![rect(0.0, 0.0, 1.0, 1.0)]);
    fixture
        .run(MoveShapeCommand::new(ids[0], Vector2D::new(1.0, 0.0)))
        .unwrap();
    fixture
        .run(RotateShapeCommand::new(ids[0], 45.0))
        .unwrap();
    assert_eq!(fixture.history.undo_depth(), 2);
    assert_eq!(fixture.history.undo_name(), Some("Rotate Shape"));

    fixture.undo().unwrap();
    assert_eq!(fixture.history.undo_depth(), 1);
    assert_eq!(fixture.history.redo_depth(), 1);
    assert_eq!(fixture.history.redo_name(), Some("Rotate Shape"));
    assert_eq!(fixture.history.undo_name(), Some("Move Shape"));

    fixture.redo().unwrap();
    assert_eq!(fixture.drawing.get(ids[0]).unwrap().rotation(), 45.0);
    assert!(!fixture.history.can_redo());
}

#[test]
fn test_redo_reuses_prepared_snapshot() {
    let (mut fixture, ids) = Fixture::with_shapes(vec![rect(0.0, 0.0, 10.0, 10.0)]);
    fixture
        .run(RotateShapeCommand::new(ids[0], 90.0))
        .unwrap();
    fixture.undo().unwrap();

    // Out-of-band edit between undo and redo
    fixture.drawing.set_shape_rotation(ids[0], 45.0).unwrap();

    fixture.redo().unwrap();
    assert_eq!(fixture.drawing.get(ids[0]).unwrap().rotation(), 90.0);

    // Undo goes back to the state captured at prepare, not to 45
    fixture.undo().unwrap();
    assert_eq!(fixture.drawing.get(ids[0]).unwrap().rotation(), 0.0);
}

#[test]
fn test_failed_undo_keeps_command_on_undo_stack() {
    let mut fixture = Fixture::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let ida = a.id();
    fixture.run(AddShapeCommand::new(a)).unwrap();

    fixture.drawing.remove_shape(ida).unwrap();

    assert_eq!(
        fixture.undo(),
        Err(CommandError::Drawing(DrawingError::ShapeNotFound { id: ida }))
    );
    assert!(fixture.history.can_undo());
    assert!(!fixture.history.can_redo());
}

#[test]
fn test_failed_redo_keeps_command_on_redo_stack() {
    let mut fixture = Fixture::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let ida = a.id();
    fixture.run(AddShapeCommand::new(a.clone())).unwrap();
    fixture.undo().unwrap();

    // Same identity re-added out of band blocks the redo
    fixture.drawing.add_shape(a).unwrap();

    assert!(matches!(
        fixture.redo(),
        Err(CommandError::Drawing(DrawingError::DuplicateShape { id })) if id == ida
    ));
    assert!(fixture.history.can_redo());
    assert!(!fixture.history.can_undo());
}

#[test]
fn test_failed_execute_is_not_recorded() {
    let (mut fixture, ids) = Fixture::with_shapes(vec![rect(0.0, 0.0, 1.0, 1.0)]);
    fixture
        .run(MoveShapeCommand::new(ids[0], Vector2D::new(1.0, 1.0)))
        .unwrap();
    fixture.undo().unwrap();

    assert!(fixture
        .run(RotateShapeCommand::new(ids[0], f64::NAN))
        .is_err());
    assert!(!fixture.history.can_undo());
    // A failed command does not count as a new action
    assert!(fixture.history.can_redo());
}

#[test]
fn test_history_is_unbounded() {
    let (mut fixture, ids) = Fixture::with_shapes(vec![rect(0.0, 0.0, 1.0, 1.0)]);
    for _ in 0..200 {
        fixture
            .run(MoveShapeCommand::new(ids[0], Vector2D::new(1.0, 0.0)))
            .unwrap();
    }
    assert_eq!(fixture.history.undo_depth(), 200);
    while fixture.undo().unwrap() {}
    assert_eq!(fixture.drawing.get(ids[0]).unwrap().bounds().left(), 0.0);
}

#[test]
fn test_clear_stacks() {
    let mut fixture = Fixture::new();
    fixture
        .run(AddShapeCommand::new(rect(0.0, 0.0, 1.0, 1.0)))
        .unwrap();
    fixture
        .run(AddShapeCommand::new(rect(1.0, 0.0, 1.0, 1.0)))
        .unwrap();
    fixture.undo().unwrap();

    fixture.history.clear_stacks();
    assert!(!fixture.history.can_undo());
    assert!(!fixture.history.can_redo());
    assert_eq!(fixture.drawing.len(), 1);
}

#[test]
fn test_manager_default_is_empty() {
    let manager = CommandManager::default();
    assert_eq!(manager.undo_depth(), 0);
    assert_eq!(manager.redo_depth(), 0);
}
