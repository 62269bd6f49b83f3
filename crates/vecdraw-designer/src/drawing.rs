//! Drawing document aggregate.
//!
//! Owns the shapes in Z-order (index 0 is the bottom) together with an
//! identity-to-index map, so lookups and "reinsert at index" are exact.
//! Every successful mutation emits exactly one [`DrawingEvent`] after the
//! change is visible. Failed mutations emit nothing and change nothing.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use vecdraw_core::constants::DEFAULT_HIT_TOLERANCE;
use vecdraw_core::{
    ChangeKind, ColorData, DrawingError, DrawingEvent, DrawingId, DrawingObserver, EventFilter,
    ObserverRegistry, Point2D, Rect, ShapeError, ShapeId, SubscriptionId, Vector2D,
};

use crate::model::{RotationState, Shape, StyleState};
use crate::visitor::ShapeCensus;

/// Grid display settings stored with the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    pub visible: bool,
    pub spacing: f64,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            visible: true,
            spacing: 10.0,
        }
    }
}

impl GridState {
    pub fn validate(&self) -> Result<(), DrawingError> {
        if self.spacing.is_finite() && self.spacing > 0.0 {
            Ok(())
        } else {
            Err(DrawingError::InvalidGrid {
                spacing: self.spacing,
            })
        }
    }
}

/// Where an index-targeted insertion actually landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inserted at the requested index.
    Exact(usize),
    /// The requested index was stale; appended at this index instead.
    Appended(usize),
}

impl Placement {
    pub fn index(&self) -> usize {
        match self {
            Placement::Exact(i) | Placement::Appended(i) => *i,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Placement::Exact(_))
    }
}

#[derive(Debug, Default)]
pub struct Drawing {
    id: DrawingId,
    shapes: Vec<Shape>,
    positions: HashMap<ShapeId, usize>,
    grid: GridState,
    observers: ObserverRegistry,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(grid: GridState) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn id(&self) -> DrawingId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes bottom to top
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    /// Identity-preserving copy of the shape list
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.positions.get(&id).map(|&i| &self.shapes[i])
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Z-order index of a shape, `None` when absent
    pub fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn grid(&self) -> GridState {
        self.grid
    }

    pub fn census(&self) -> ShapeCensus {
        ShapeCensus::of(&self.shapes)
    }

    /// Top-most shape under `p`
    pub fn shape_at(&self, p: &Point2D) -> Option<&Shape> {
        self.shape_at_with_tolerance(p, DEFAULT_HIT_TOLERANCE)
    }

    pub fn shape_at_with_tolerance(&self, p: &Point2D, tolerance: f64) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(p, tolerance))
    }

    /// Shapes whose unrotated bounds touch `area`, bottom to top
    pub fn shapes_in(&self, area: &Rect) -> Vec<&Shape> {
        self.shapes
            .iter()
            .filter(|s| s.bounds().intersects(area))
            .collect()
    }

    pub fn subscribe<O>(&mut self, filter: EventFilter, observer: O) -> SubscriptionId
    where
        O: DrawingObserver + 'static,
    {
        self.observers.subscribe(filter, observer)
    }

    pub fn subscribe_shared(
        &mut self,
        filter: EventFilter,
        observer: Arc<dyn DrawingObserver>,
    ) -> SubscriptionId {
        self.observers.subscribe_shared(filter, observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Append on top of the Z-order, returning the new index
    pub fn add_shape(&mut self, shape: Shape) -> Result<usize, DrawingError> {
        let index = self.shapes.len();
        self.add_shape_at(shape, index)?;
        Ok(index)
    }

    /// Insert at `index`, which must be in `[0, len]`
    pub fn add_shape_at(&mut self, shape: Shape, index: usize) -> Result<(), DrawingError> {
        if index > self.shapes.len() {
            return Err(DrawingError::IndexOutOfRange {
                index,
                len: self.shapes.len(),
            });
        }
        let id = shape.id();
        if self.positions.contains_key(&id) {
            return Err(DrawingError::DuplicateShape { id });
        }
        self.shapes.insert(index, shape);
        self.reindex_from(index);
        tracing::debug!("Added {} at index {}", id, index);
        self.emit(ChangeKind::Add, Some(id));
        Ok(())
    }

    /// Insert at `index` if still valid, otherwise append
    pub fn insert_or_append(
        &mut self,
        shape: Shape,
        index: usize,
    ) -> Result<Placement, DrawingError> {
        if index <= self.shapes.len() {
            self.add_shape_at(shape, index)?;
            Ok(Placement::Exact(index))
        } else {
            let id = shape.id();
            let appended = self.add_shape(shape)?;
            tracing::warn!(
                "Index {} no longer valid for {}, appended at {}",
                index,
                id,
                appended
            );
            Ok(Placement::Appended(appended))
        }
    }

    /// Remove a shape, returning it. `None` if it was not in the drawing.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.take_shape(id).map(|(_, shape)| shape)
    }

    /// Remove a shape, returning it with the index it occupied
    pub fn take_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.positions.remove(&id)?;
        let shape = self.shapes.remove(index);
        self.reindex_from(index);
        tracing::debug!("Removed {} from index {}", id, index);
        self.emit(ChangeKind::Remove, Some(id));
        Some((index, shape))
    }

    /// Move a shape to the top. Returns its previous index.
    pub fn bring_to_front(&mut self, id: ShapeId) -> Result<usize, DrawingError> {
        let last = self.shapes.len().saturating_sub(1);
        self.reorder(id, last)
    }

    /// Move a shape to the bottom. Returns its previous index.
    pub fn send_to_back(&mut self, id: ShapeId) -> Result<usize, DrawingError> {
        self.reorder(id, 0)
    }

    /// Move an existing shape to `index`, appending if `index` is past the
    /// end of the list without it
    pub fn relocate_shape(
        &mut self,
        id: ShapeId,
        index: usize,
    ) -> Result<Placement, DrawingError> {
        let current = self.index_of(id)?;
        let last = self.shapes.len() - 1;
        let placement = if index <= last {
            Placement::Exact(index)
        } else {
            tracing::warn!(
                "Index {} no longer valid for {}, appended at {}",
                index,
                id,
                last
            );
            Placement::Appended(last)
        };
        self.move_within(current, placement.index());
        self.emit(ChangeKind::Modify, Some(id));
        Ok(placement)
    }

    fn reorder(&mut self, id: ShapeId, target: usize) -> Result<usize, DrawingError> {
        let current = self.index_of(id)?;
        self.move_within(current, target);
        self.emit(ChangeKind::Modify, Some(id));
        Ok(current)
    }

    fn move_within(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let shape = self.shapes.remove(from);
        self.shapes.insert(to, shape);
        self.reindex_from(from.min(to));
    }

    /// Swap in another state of an existing shape, keeping its Z-order slot.
    /// Returns the state it replaced.
    pub fn replace_shape(&mut self, shape: Shape) -> Result<Shape, DrawingError> {
        shape.validate()?;
        let id = shape.id();
        let index = self.index_of(id)?;
        let previous = std::mem::replace(&mut self.shapes[index], shape);
        self.emit(ChangeKind::Transform, Some(id));
        Ok(previous)
    }

    pub fn move_shape(&mut self, id: ShapeId, delta: Vector2D) -> Result<(), DrawingError> {
        if !delta.is_finite() {
            return Err(ShapeError::invalid("delta", "must be finite").into());
        }
        self.update_shape(id, ChangeKind::Transform, |s| {
            s.translate(delta);
            Ok(())
        })
    }

    pub fn resize_shape(&mut self, id: ShapeId, bounds: &Rect) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Transform, |s| s.resize(bounds))
    }

    pub fn set_shape_rotation(&mut self, id: ShapeId, degrees: f64) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Transform, |s| s.set_rotation(degrees))
    }

    pub fn restore_shape_rotation(
        &mut self,
        id: ShapeId,
        state: &RotationState,
    ) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Transform, |s| {
            s.restore_rotation(state);
            Ok(())
        })
    }

    pub fn set_shape_stroke_color(
        &mut self,
        id: ShapeId,
        color: ColorData,
    ) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Modify, |s| {
            s.set_stroke_color(color);
            Ok(())
        })
    }

    /// No visible effect on lines and text, but still notifies
    pub fn set_shape_fill_color(
        &mut self,
        id: ShapeId,
        color: ColorData,
    ) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Modify, |s| {
            s.set_fill_color(color);
            Ok(())
        })
    }

    pub fn restore_shape_style(
        &mut self,
        id: ShapeId,
        state: &StyleState,
    ) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Modify, |s| {
            s.restore_style(state);
            Ok(())
        })
    }

    pub fn set_shape_font_size(&mut self, id: ShapeId, size: f64) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Modify, |s| s.set_font_size(size))
    }

    pub fn set_shape_text(&mut self, id: ShapeId, content: &str) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Modify, |s| s.set_text(content))
    }

    pub fn reflect_shape_horizontal(&mut self, id: ShapeId) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Transform, |s| {
            s.reflect_horizontal();
            Ok(())
        })
    }

    pub fn reflect_shape_vertical(&mut self, id: ShapeId) -> Result<(), DrawingError> {
        self.update_shape(id, ChangeKind::Transform, |s| {
            s.reflect_vertical();
            Ok(())
        })
    }

    pub fn set_grid(&mut self, grid: GridState) -> Result<(), DrawingError> {
        grid.validate()?;
        self.grid = grid;
        self.emit(ChangeKind::Grid, None);
        Ok(())
    }

    /// Remove every shape
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.positions.clear();
        self.emit(ChangeKind::Load, None);
    }

    /// Replace the whole shape list, validating first
    pub fn load(&mut self, shapes: Vec<Shape>) -> Result<(), DrawingError> {
        self.load_design(shapes, self.grid)
    }

    /// Replace shapes and grid together with a single `LOAD` notification.
    /// Nothing changes unless both are valid.
    pub fn load_design(
        &mut self,
        shapes: Vec<Shape>,
        grid: GridState,
    ) -> Result<(), DrawingError> {
        grid.validate()?;
        let positions = index_shapes(&shapes)?;
        self.shapes = shapes;
        self.positions = positions;
        self.grid = grid;
        tracing::info!("Loaded {} shapes into {}", self.shapes.len(), self.id);
        self.emit(ChangeKind::Load, None);
        Ok(())
    }

    /// Edit the shape list directly with a single `LOAD` notification.
    ///
    /// If the closure leaves an invalid shape or a duplicate identity
    /// behind, the previous list is restored and an error returned.
    pub fn modify_in_bulk<F>(&mut self, edit: F) -> Result<(), DrawingError>
    where
        F: FnOnce(&mut Vec<Shape>),
    {
        let backup = self.shapes.clone();
        edit(&mut self.shapes);
        match index_shapes(&self.shapes) {
            Ok(positions) => {
                self.positions = positions;
                self.emit(ChangeKind::Load, None);
                Ok(())
            }
            Err(e) => {
                self.shapes = backup;
                Err(e)
            }
        }
    }

    fn index_of(&self, id: ShapeId) -> Result<usize, DrawingError> {
        self.shape_index(id)
            .ok_or(DrawingError::ShapeNotFound { id })
    }

    fn update_shape<T, F>(
        &mut self,
        id: ShapeId,
        kind: ChangeKind,
        mutate: F,
    ) -> Result<T, DrawingError>
    where
        F: FnOnce(&mut Shape) -> Result<T, ShapeError>,
    {
        let index = self.index_of(id)?;
        let value = mutate(&mut self.shapes[index])?;
        self.emit(kind, Some(id));
        Ok(value)
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, shape) in self.shapes.iter().enumerate().skip(start) {
            self.positions.insert(shape.id(), i);
        }
    }

    fn emit(&self, kind: ChangeKind, shape_id: Option<ShapeId>) {
        let event = DrawingEvent {
            source: self.id,
            kind,
            shape_id,
        };
        self.observers.notify(&event);
    }
}

/// Validate `shapes` and map top-level identities to indices. Identities
/// must be unique across the whole tree, group children included.
fn index_shapes(shapes: &[Shape]) -> Result<HashMap<ShapeId, usize>, DrawingError> {
    let mut seen = HashSet::new();
    let mut positions = HashMap::with_capacity(shapes.len());
    for (i, shape) in shapes.iter().enumerate() {
        shape.validate()?;
        collect_ids(shape, &mut seen)?;
        positions.insert(shape.id(), i);
    }
    Ok(positions)
}

fn collect_ids(shape: &Shape, seen: &mut HashSet<ShapeId>) -> Result<(), DrawingError> {
    if !seen.insert(shape.id()) {
        return Err(DrawingError::DuplicateShape { id: shape.id() });
    }
    if let Some(group) = shape.as_group() {
        for child in group.children() {
            collect_ids(child, seen)?;
        }
    }
    Ok(())
}
