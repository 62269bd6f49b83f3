use crate::support::{rect, Fixture};
use proptest::prelude::*;
use vecdraw_core::{ColorData, Rect, Vector2D};
use vecdraw_designer::{
    BringToFrontCommand, ChangeFillColorCommand, ChangeStrokeColorCommand, DrawingCommand,
    MoveShapeCommand, RotateShapeCommand, SendToBackCommand,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn close_rect(a: Rect, b: Rect) -> bool {
    close(a.left(), b.left())
        && close(a.top(), b.top())
        && close(a.width(), b.width())
        && close(a.height(), b.height())
}

fn coord() -> impl Strategy<Value = f64> {
    -1_000.0..1_000.0f64
}

fn extent() -> impl Strategy<Value = f64> {
    1.0..500.0f64
}

proptest! {
    #[test]
    fn rotation_is_always_normalized(degrees in -10_000.0..10_000.0f64) {
        let mut shape = rect(0.0, 0.0, 10.0, 10.0);
        shape.set_rotation(degrees).unwrap();
        prop_assert!((0.0..360.0).contains(&shape.rotation()));
    }

    #[test]
    fn double_reflection_restores_bounds(
        x in coord(), y in coord(), w in extent(), h in extent(),
    ) {
        let mut shape = rect(x, y, w, h);
        let original = shape.bounds();

        shape.reflect_horizontal();
        prop_assert!(close_rect(shape.bounds(), original));
        shape.reflect_horizontal();
        shape.reflect_vertical();
        shape.reflect_vertical();
        prop_assert!(close_rect(shape.bounds(), original));
    }

    #[test]
    fn move_undo_returns_to_start(
        x in coord(), y in coord(), dx in coord(), dy in coord(),
    ) {
        let (mut fixture, ids) = Fixture::with_shapes(vec![rect(x, y, 10.0, 10.0)]);
        let original = fixture.drawing.get(ids[0]).unwrap().bounds();

        fixture.run(MoveShapeCommand::new(ids[0], Vector2D::new(dx, dy))).unwrap();
        fixture.undo().unwrap();

        prop_assert!(close_rect(fixture.drawing.get(ids[0]).unwrap().bounds(), original));
    }

    #[test]
    fn rotate_undo_is_exact(initial in 0.0..360.0f64, target in -720.0..720.0f64) {
        let shape = rect(0.0, 0.0, 10.0, 10.0).with_rotation(initial).unwrap();
        let before = shape.rotation();
        let (mut fixture, ids) = Fixture::with_shapes(vec![shape]);

        fixture.run(RotateShapeCommand::new(ids[0], target)).unwrap();
        fixture.undo().unwrap();

        prop_assert_eq!(fixture.drawing.get(ids[0]).unwrap().rotation(), before);
    }

    #[test]
    fn recolor_undo_is_exact(r in 0i64..256, g in 0i64..256, b in 0i64..256, a in 0.0..=1.0f64) {
        let (mut fixture, ids) = Fixture::with_shapes(vec![
            rect(0.0, 0.0, 10.0, 10.0).with_fill(ColorData::GREEN),
        ]);
        let color = ColorData::new(r, g, b, a);

        fixture.run(ChangeStrokeColorCommand::new(ids[0], color)).unwrap();
        fixture.run(ChangeFillColorCommand::new(ids[0], color)).unwrap();
        let shape = fixture.drawing.get(ids[0]).unwrap();
        prop_assert_eq!(shape.stroke_color(), color);
        prop_assert_eq!(shape.fill_color(), Some(color));

        fixture.undo().unwrap();
        fixture.undo().unwrap();
        let shape = fixture.drawing.get(ids[0]).unwrap();
        prop_assert_eq!(shape.stroke_color(), ColorData::BLACK);
        prop_assert_eq!(shape.fill_color(), Some(ColorData::GREEN));
    }

    #[test]
    fn clone_with_new_id_differs_only_in_identity(
        x in coord(), y in coord(), w in extent(), h in extent(), degrees in 0.0..360.0f64,
    ) {
        let shape = rect(x, y, w, h).with_rotation(degrees).unwrap();
        let copy = shape.clone_with_new_id();

        prop_assert_ne!(copy.id(), shape.id());
        prop_assert_eq!(copy.bounds(), shape.bounds());
        prop_assert_eq!(copy.rotation(), shape.rotation());
        prop_assert_eq!(copy.kind(), shape.kind());
    }

    #[test]
    fn restacking_undoes_to_original_order(
        moves in prop::collection::vec((any::<bool>(), 0usize..6), 1..20),
    ) {
        let (mut fixture, ids) = Fixture::with_shapes(
            (0..6).map(|i| rect(i as f64, 0.0, 1.0, 1.0)).collect(),
        );
        for (to_front, pick) in &moves {
            let command: DrawingCommand = if *to_front {
                BringToFrontCommand::new(ids[*pick]).into()
            } else {
                SendToBackCommand::new(ids[*pick]).into()
            };
            fixture.run(command).unwrap();
        }
        while fixture.undo().unwrap() {}

        prop_assert_eq!(fixture.drawing.ids(), ids);
    }
}
