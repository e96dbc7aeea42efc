//! Whole-document rendering.

use glam::Vec2;
use scissors_core::ast::Document;
use scissors_render_2d::{Bounds, EllipsePrimitive, Stroke, Surface};

use crate::engine::LayoutEngine;
use crate::ids::IdAllocator;

/// Outcome of rendering a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    /// Height occupied by the root element's subtree
    pub height: f32,
    /// Bounding box of everything on the surface
    pub scroll_region: Bounds,
}

/// Clear `surface` and draw the whole document with its root at the origin.
///
/// Every call starts a fresh [`IdAllocator`], so rendering the same document
/// twice produces the same identifiers and geometry.
pub fn render_document<S: Surface + ?Sized>(
    engine: &LayoutEngine,
    doc: &Document,
    surface: &mut S,
) -> RenderSummary {
    log::info!("Rendering <{}>", doc.root.name);
    surface.clear();

    let ids = IdAllocator::new();
    let extent = engine.layout_root(&doc.root, surface, Vec2::ZERO, &ids);

    if engine.options().draw_origin_marker {
        surface.ellipse(EllipsePrimitive::circle(0.0, 0.0, 1.0).with_stroke(Stroke::default()));
    }

    let scroll_region = surface.bounds().unwrap_or_default();
    log::info!(
        "Rendered {} level(s), height {}, scroll region {}x{}",
        ids.counters().len(),
        extent.height,
        scroll_region.width,
        scroll_region.height
    );

    RenderSummary {
        height: extent.height,
        scroll_region,
    }
}
