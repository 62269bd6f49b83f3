use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use vecdraw_core::constants::DEFAULT_HIT_TOLERANCE;
use vecdraw_core::geometry::normalize_degrees;
use vecdraw_core::{ColorData, Point2D, Rect, ShapeError, ShapeId, Vector2D};

use super::{
    EllipseShape, GroupShape, LineSegment, PolygonShape, RectangleShape, ShapeGeometry, TextShape,
};
use crate::visitor::ShapeVisitor;

/// Geometry variant of a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle(RectangleShape),
    Ellipse(EllipseShape),
    Line(LineSegment),
    Polygon(PolygonShape),
    Text(TextShape),
    Group(GroupShape),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::Line(_) => "line",
            ShapeKind::Polygon(_) => "polygon",
            ShapeKind::Text(_) => "text",
            ShapeKind::Group(_) => "group",
        }
    }

    fn geometry(&self) -> &dyn ShapeGeometry {
        match self {
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Ellipse(s) => s,
            ShapeKind::Line(s) => s,
            ShapeKind::Polygon(s) => s,
            ShapeKind::Text(s) => s,
            ShapeKind::Group(s) => s,
        }
    }

    fn geometry_mut(&mut self) -> &mut dyn ShapeGeometry {
        match self {
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Ellipse(s) => s,
            ShapeKind::Line(s) => s,
            ShapeKind::Polygon(s) => s,
            ShapeKind::Text(s) => s,
            ShapeKind::Group(s) => s,
        }
    }

    /// Lines and text have no interior to fill
    pub fn supports_fill(&self) -> bool {
        !matches!(self, ShapeKind::Line(_) | ShapeKind::Text(_))
    }
}

/// Stroke and fill of a shape and, for groups, of every descendant.
///
/// Captured before a recolor so undo can restore per-child colors exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    stroke: ColorData,
    fill: Option<ColorData>,
    children: Vec<StyleState>,
}

/// Rotation of a shape and, for groups, of every descendant
#[derive(Debug, Clone, PartialEq)]
pub struct RotationState {
    rotation: f64,
    children: Vec<RotationState>,
}

/// A drawable entity with a stable identity.
///
/// Equality and hashing compare identity only. Use [`Shape::same_state`]
/// to compare geometry and style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    /// Degrees in `[0, 360)`, clockwise about the bounds center
    #[serde(default)]
    rotation: f64,
    stroke: ColorData,
    #[serde(default)]
    fill: Option<ColorData>,
    kind: ShapeKind,
}

impl Shape {
    /// Wrap a geometry variant with a fresh identity and default style
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_id(ShapeId::new(), kind)
    }

    pub(crate) fn with_id(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            rotation: 0.0,
            stroke: ColorData::BLACK,
            fill: None,
            kind,
        }
    }

    pub fn rectangle(bounds: Rect) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Rectangle(RectangleShape::new(bounds)?)))
    }

    pub fn ellipse(bounds: Rect) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Ellipse(EllipseShape::new(bounds)?)))
    }

    pub fn line(start: Point2D, end: Point2D) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Line(LineSegment::new(start, end)?)))
    }

    pub fn polygon(vertices: Vec<Point2D>) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Polygon(PolygonShape::new(vertices)?)))
    }

    pub fn text(
        content: impl Into<String>,
        origin: Point2D,
        font_size: f64,
        font_name: impl Into<String>,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Text(TextShape::new(
            content, origin, font_size, font_name,
        )?)))
    }

    pub fn group(children: Vec<Shape>) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeKind::Group(GroupShape::new(children)?)))
    }

    /// Builder-style stroke color
    pub fn with_stroke(mut self, color: ColorData) -> Self {
        self.set_stroke_color(color);
        self
    }

    /// Builder-style fill color, ignored for lines and text
    pub fn with_fill(mut self, color: ColorData) -> Self {
        self.set_fill_color(color);
        self
    }

    /// Builder-style rotation
    pub fn with_rotation(mut self, degrees: f64) -> Result<Self, ShapeError> {
        self.set_rotation(degrees)?;
        Ok(self)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn stroke_color(&self) -> ColorData {
        self.stroke
    }

    pub fn fill_color(&self) -> Option<ColorData> {
        self.fill
    }

    pub fn supports_fill(&self) -> bool {
        self.kind.supports_fill()
    }

    pub fn as_text(&self) -> Option<&TextShape> {
        match &self.kind {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupShape> {
        match &self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ShapeKind::Text(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    /// Axis-aligned bounds, never including rotation
    pub fn bounds(&self) -> Rect {
        self.kind.geometry().bounds()
    }

    /// Hit test with the default line tolerance
    pub fn contains(&self, p: &Point2D) -> bool {
        self.contains_point(p, DEFAULT_HIT_TOLERANCE)
    }

    /// Hit test honoring rotation.
    ///
    /// The query point is rotated by `-rotation` about the bounds center
    /// before the unrotated test. Groups defer to their children, which
    /// carry their own rotation.
    pub fn contains_point(&self, p: &Point2D, tolerance: f64) -> bool {
        if self.is_group() || self.rotation == 0.0 {
            return self.kind.geometry().contains_local(p, tolerance);
        }
        let center = self.bounds().center();
        let local = p.rotate_about(&center, -self.rotation);
        self.kind.geometry().contains_local(&local, tolerance)
    }

    pub fn translate(&mut self, delta: Vector2D) {
        self.kind.geometry_mut().translate(delta);
    }

    /// Replace the unrotated bounding box. Unchanged on error.
    pub fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        self.kind.geometry_mut().resize(new_bounds)
    }

    /// Store `degrees` normalized into `[0, 360)`, propagating into groups
    pub fn set_rotation(&mut self, degrees: f64) -> Result<(), ShapeError> {
        if !degrees.is_finite() {
            return Err(ShapeError::invalid("rotation", "must be finite"));
        }
        self.apply_rotation(normalize_degrees(degrees));
        Ok(())
    }

    fn apply_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
        if let ShapeKind::Group(group) = &mut self.kind {
            for child in group.children_mut() {
                child.apply_rotation(degrees);
            }
        }
    }

    pub fn set_stroke_color(&mut self, color: ColorData) {
        self.stroke = color;
        if let ShapeKind::Group(group) = &mut self.kind {
            for child in group.children_mut() {
                child.set_stroke_color(color);
            }
        }
    }

    /// No-op for lines and text
    pub fn set_fill_color(&mut self, color: ColorData) {
        if !self.supports_fill() {
            return;
        }
        self.fill = Some(color);
        if let ShapeKind::Group(group) = &mut self.kind {
            for child in group.children_mut() {
                child.set_fill_color(color);
            }
        }
    }

    pub fn style_state(&self) -> StyleState {
        StyleState {
            stroke: self.stroke,
            fill: self.fill,
            children: self
                .as_group()
                .map(|g| g.children().iter().map(Shape::style_state).collect())
                .unwrap_or_default(),
        }
    }

    pub fn restore_style(&mut self, state: &StyleState) {
        self.stroke = state.stroke;
        self.fill = state.fill;
        if let ShapeKind::Group(group) = &mut self.kind {
            for (child, child_state) in group.children_mut().iter_mut().zip(&state.children) {
                child.restore_style(child_state);
            }
        }
    }

    pub fn rotation_state(&self) -> RotationState {
        RotationState {
            rotation: self.rotation,
            children: self
                .as_group()
                .map(|g| g.children().iter().map(Shape::rotation_state).collect())
                .unwrap_or_default(),
        }
    }

    pub fn restore_rotation(&mut self, state: &RotationState) {
        self.rotation = state.rotation;
        if let ShapeKind::Group(group) = &mut self.kind {
            for (child, child_state) in group.children_mut().iter_mut().zip(&state.children) {
                child.restore_rotation(child_state);
            }
        }
    }

    /// Fails with `Unsupported` on anything but text
    pub fn set_font_size(&mut self, size: f64) -> Result<(), ShapeError> {
        match &mut self.kind {
            ShapeKind::Text(text) => text.set_font_size(size),
            other => Err(ShapeError::Unsupported {
                operation: "set_font_size".to_string(),
                kind: other.name().to_string(),
            }),
        }
    }

    /// Fails with `Unsupported` on anything but text
    pub fn set_text(&mut self, content: impl Into<String>) -> Result<(), ShapeError> {
        match &mut self.kind {
            ShapeKind::Text(text) => text.set_content(content),
            other => Err(ShapeError::Unsupported {
                operation: "set_text".to_string(),
                kind: other.name().to_string(),
            }),
        }
    }

    /// Mirror left-to-right about the bounds' vertical center line.
    ///
    /// Applying it twice restores the shape.
    pub fn reflect_horizontal(&mut self) {
        let axis = self.bounds().center().x;
        self.mirror_x(axis);
    }

    /// Mirror top-to-bottom about the bounds' horizontal center line.
    ///
    /// Applying it twice restores the shape.
    pub fn reflect_vertical(&mut self) {
        let axis = self.bounds().center().y;
        self.mirror_y(axis);
    }

    pub(crate) fn mirror_x(&mut self, axis: f64) {
        self.kind.geometry_mut().mirror_x(axis);
        self.rotation = normalize_degrees(-self.rotation);
    }

    pub(crate) fn mirror_y(&mut self, axis: f64) {
        self.kind.geometry_mut().mirror_y(axis);
        self.rotation = normalize_degrees(-self.rotation);
    }

    /// Independent copy with fresh identities for itself and all descendants
    pub fn clone_with_new_id(&self) -> Shape {
        let mut copy = self.clone();
        copy.id = ShapeId::new();
        if let ShapeKind::Group(group) = &mut copy.kind {
            group.renew_child_ids();
        }
        copy
    }

    /// Deep comparison of identity, geometry, rotation and style
    pub fn same_state(&self, other: &Shape) -> bool {
        if self.id != other.id
            || self.rotation != other.rotation
            || self.stroke != other.stroke
            || self.fill != other.fill
        {
            return false;
        }
        match (&self.kind, &other.kind) {
            (ShapeKind::Group(a), ShapeKind::Group(b)) => {
                a.len() == b.len()
                    && a.children()
                        .iter()
                        .zip(b.children())
                        .all(|(x, y)| x.same_state(y))
            }
            (a, b) => a == b,
        }
    }

    /// Check geometry and rotation, for shapes that bypassed constructors
    pub fn validate(&self) -> Result<(), ShapeError> {
        if !self.rotation.is_finite() || !(0.0..360.0).contains(&self.rotation) {
            return Err(ShapeError::invalid(
                "rotation",
                format!("must be in [0, 360), got {}", self.rotation),
            ));
        }
        self.kind.geometry().validate()
    }

    /// Double-dispatch to the visitor method for this variant
    pub fn accept<V: ShapeVisitor + ?Sized>(&self, visitor: &mut V) {
        match &self.kind {
            ShapeKind::Rectangle(rect) => visitor.visit_rectangle(self, rect),
            ShapeKind::Ellipse(ellipse) => visitor.visit_ellipse(self, ellipse),
            ShapeKind::Line(line) => visitor.visit_line(self, line),
            ShapeKind::Polygon(polygon) => visitor.visit_polygon(self, polygon),
            ShapeKind::Text(text) => visitor.visit_text(self, text),
            ShapeKind::Group(group) => visitor.visit_group(self, group),
        }
    }

    pub(crate) fn take_group_children(&mut self) -> Option<Vec<Shape>> {
        match &mut self.kind {
            ShapeKind::Group(group) => Some(group.take_children()),
            _ => None,
        }
    }

    pub(crate) fn restore_group_children(&mut self, children: Vec<Shape>) {
        if let ShapeKind::Group(group) = &mut self.kind {
            group.restore_children(children);
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
