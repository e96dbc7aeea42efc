//! The drawing surface contract used by layout.

use glam::Vec2;

use crate::bounds::Bounds;
use crate::primitives::{
    EllipsePrimitive, LinePrimitive, PrimitiveId, RectPrimitive, TextPrimitive,
};

/// Result of creating a primitive: its handle and its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawn {
    pub id: PrimitiveId,
    pub bounds: Bounds,
}

/// A 2D surface that creates primitives and reports their geometry.
///
/// Bounding boxes must be available as soon as a primitive is created, since
/// layout positions later primitives relative to earlier ones.
pub trait Surface {
    fn text(&mut self, text: TextPrimitive) -> Drawn;

    fn line(&mut self, line: LinePrimitive) -> Drawn;

    fn rect(&mut self, rect: RectPrimitive) -> Drawn;

    fn ellipse(&mut self, ellipse: EllipsePrimitive) -> Drawn;

    /// Bounding box of one primitive, `None` if the handle is unknown.
    fn bounds_of(&self, id: PrimitiveId) -> Option<Bounds>;

    /// Union of every primitive's bounds, `None` on an empty surface.
    fn bounds(&self) -> Option<Bounds>;

    /// Move a primitive and return its new bounds.
    fn translate(&mut self, id: PrimitiveId, delta: Vec2) -> Option<Bounds>;

    /// Paint `id` beneath `below`. A primitive already beneath it stays put.
    fn lower(&mut self, id: PrimitiveId, below: PrimitiveId);

    /// Remove every primitive.
    fn clear(&mut self);
}
