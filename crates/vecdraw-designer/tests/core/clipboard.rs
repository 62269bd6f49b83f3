use crate::support::{rect, text, Fixture};
use vecdraw_core::{ColorData, Vector2D};
use vecdraw_designer::{Clipboard, CopyCommand, DrawingEditor, PasteCommand};

#[test]
fn test_set_stores_a_snapshot() {
    let mut clipboard = Clipboard::new();
    let mut shape = rect(0.0, 0.0, 10.0, 10.0);
    clipboard.set(&shape);

    shape.translate(Vector2D::new(50.0, 50.0));
    shape.set_stroke_color(ColorData::RED);

    let stored = clipboard.get().unwrap();
    assert_eq!(stored.bounds().left(), 0.0);
    assert_eq!(stored.stroke_color(), ColorData::BLACK);
}

#[test]
fn test_each_get_is_independent() {
    let mut clipboard = Clipboard::new();
    clipboard.set(&text("hello"));

    let mut first = clipboard.get().unwrap();
    first.set_text("changed").unwrap();
    let second = clipboard.get().unwrap();

    assert_eq!(second.as_text().unwrap().content(), "hello");
}

#[test]
fn test_set_replaces_previous_content() {
    let mut clipboard = Clipboard::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 1.0, 1.0);
    clipboard.set(&a);
    clipboard.set(&b);
    assert_eq!(clipboard.get().unwrap().id(), b.id());
}

#[test]
fn test_repeated_paste_yields_distinct_shapes() {
    let (mut fixture, ids) = Fixture::with_shapes(vec![rect(0.0, 0.0, 10.0, 10.0)]);
    fixture.run(CopyCommand::new(ids[0])).unwrap();
    for _ in 0..3 {
        fixture
            .run(PasteCommand::new(Vector2D::new(10.0, 10.0)))
            .unwrap();
    }

    let mut all = fixture.drawing.ids();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);
    // Every paste is offset from the clipboard snapshot, not from the last paste
    for shape in &fixture.drawing.shapes()[1..] {
        assert_eq!(shape.bounds().left(), 10.0);
    }
}

#[test]
fn test_editors_share_one_clipboard() {
    let clipboard = Clipboard::shared();
    let mut source = DrawingEditor::new(clipboard.clone());
    let mut target = DrawingEditor::new(clipboard.clone());

    let id = source.add_rectangle(0.0, 0.0, 20.0, 10.0).unwrap();
    source.copy(id).unwrap();

    let pasted = target.paste().unwrap();
    assert_ne!(pasted, id);
    assert_eq!(target.drawing().len(), 1);
    assert_eq!(
        target.drawing().get(pasted).unwrap().bounds().left(),
        10.0
    );
    assert!(!clipboard.lock().is_empty());
}
