//! Fixtures shared by the core test modules.
#![allow(dead_code)]

use vecdraw_core::{CommandError, Point2D, Rect, ShapeId};
use vecdraw_designer::{
    Clipboard, Command, CommandManager, Drawing, DrawingCommand, EditContext, Shape,
};

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::rectangle(Rect::from_xywh(x, y, w, h).unwrap()).unwrap()
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
    Shape::line(Point2D::new(x1, y1), Point2D::new(x2, y2)).unwrap()
}

pub fn text(content: &str) -> Shape {
    Shape::text(content, Point2D::new(5.0, 5.0), 10.0, "Sans").unwrap()
}

/// Deep comparison of two shape lists, Z-order included
pub fn assert_same_shapes(expected: &[Shape], actual: &[Shape]) {
    assert_eq!(expected.len(), actual.len(), "shape count differs");
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        assert!(e.same_state(a), "shape at index {i} differs: {e:?} vs {a:?}");
    }
}

/// A drawing, clipboard and history wired together
#[derive(Default)]
pub struct Fixture {
    pub drawing: Drawing,
    pub clipboard: Clipboard,
    pub history: CommandManager,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixture preloaded with shapes, returning their ids bottom to top
    pub fn with_shapes(shapes: Vec<Shape>) -> (Self, Vec<ShapeId>) {
        let mut fixture = Self::new();
        let ids = shapes.iter().map(Shape::id).collect();
        for shape in shapes {
            fixture.drawing.add_shape(shape).unwrap();
        }
        (fixture, ids)
    }

    pub fn run(&mut self, command: impl Into<DrawingCommand>) -> Result<(), CommandError> {
        let mut ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        self.history.execute_command(command, &mut ctx)
    }

    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let mut ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        self.history.undo(&mut ctx)
    }

    pub fn redo(&mut self) -> Result<bool, CommandError> {
        let mut ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        self.history.redo(&mut ctx)
    }

    /// Drive a command by hand, outside the history
    pub fn prepare<C: Command>(&mut self, command: &mut C) -> Result<(), CommandError> {
        let ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        command.prepare(&ctx)
    }

    pub fn execute<C: Command>(&mut self, command: &mut C) -> Result<(), CommandError> {
        let mut ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        command.execute(&mut ctx)
    }

    pub fn undo_one<C: Command>(&mut self, command: &mut C) -> Result<(), CommandError> {
        let mut ctx = EditContext::new(&mut self.drawing, &mut self.clipboard);
        command.undo(&mut ctx)
    }

    pub fn index(&self, id: ShapeId) -> usize {
        self.drawing.shape_index(id).unwrap()
    }
}
