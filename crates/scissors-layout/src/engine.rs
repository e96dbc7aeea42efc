//! The recursive diagram layout.
//!
//! Each node is drawn with its top-left corner at the origin it is given.
//! Attributes hang off a spine below the element label, children hang off a
//! spine to the right of the label and the attribute block. A node returns
//! the height its subtree occupied so the parent can stack the next row
//! beneath it.

use glam::Vec2;
use scissors_core::ast::{Attribute, CharacterData, ElementNode, Node};
use scissors_core::types::Color;
use scissors_render_2d::{
    Bounds, Drawn, Font, FontFamily, FontMetrics, FontWeight, LinePrimitive, PrimitiveId,
    RectPrimitive, Stroke, Surface, TextPrimitive,
};

use crate::dedent::dedent;
use crate::ids::IdAllocator;
use crate::options::LayoutOptions;

/// Space occupied by a laid-out subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub height: f32,
    /// Only attributes report a width.
    pub width: Option<f32>,
}

impl Extent {
    pub const EMPTY: Self = Self {
        height: 0.0,
        width: None,
    };

    fn height_only(height: f32) -> Self {
        Self {
            height,
            width: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Fonts {
    label: Font,
    attribute_name: Font,
    text: Font,
    node_id: Font,
}

struct BlockStyle {
    foreground: Color,
    background: Color,
    border: Color,
}

/// Lays out document nodes onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    options: LayoutOptions,
    fonts: Fonts,
}

impl LayoutEngine {
    /// Create an engine, resolving its fonts once through `metrics`.
    pub fn new<M: FontMetrics + ?Sized>(options: LayoutOptions, metrics: &M) -> Self {
        let size = options.font_height;
        let fonts = Fonts {
            label: metrics.font(size, FontWeight::Bold, FontFamily::SansSerif),
            attribute_name: metrics.font(size, FontWeight::Normal, FontFamily::SansSerif),
            text: metrics.font(size, FontWeight::Normal, FontFamily::Monospace),
            node_id: metrics.font(
                options.id_font_height(),
                FontWeight::Normal,
                FontFamily::SansSerif,
            ),
        };
        Self { options, fonts }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Draw `node` and its subtree with its top-left corner at `origin`.
    ///
    /// # Panics
    ///
    /// If the surface reports a negative or non-finite box for a primitive,
    /// or the drawn geometry yields a negative or non-finite extent.
    pub fn layout<S: Surface + ?Sized>(
        &self,
        node: &Node,
        surface: &mut S,
        origin: Vec2,
        ids: &IdAllocator,
    ) -> Extent {
        let extent = match node {
            Node::Element(element) => {
                Extent::height_only(self.layout_element(element, surface, origin, ids))
            }
            Node::Attribute(attribute) => self.layout_attribute(attribute, surface, origin),
            Node::Text(data) | Node::CData(data) => {
                let palette = &self.options.palette;
                let style = BlockStyle {
                    foreground: palette.text,
                    background: palette.text_background,
                    border: palette.text_border,
                };
                Extent::height_only(self.layout_block(data, surface, origin, &style))
            }
            Node::Comment(data) => {
                let palette = &self.options.palette;
                let style = BlockStyle {
                    foreground: palette.comment,
                    background: palette.comment_background,
                    border: palette.comment_border,
                };
                Extent::height_only(self.layout_block(data, surface, origin, &style))
            }
            Node::ProcessingInstruction(pi) => {
                log::trace!("skipping processing instruction <?{}?>", pi.target);
                Extent::EMPTY
            }
        };

        check_extent(node.kind(), extent);
        extent
    }

    /// [`LayoutEngine::layout`] for a borrowed root element.
    pub fn layout_root<S: Surface + ?Sized>(
        &self,
        root: &ElementNode,
        surface: &mut S,
        origin: Vec2,
        ids: &IdAllocator,
    ) -> Extent {
        let extent = Extent::height_only(self.layout_element(root, surface, origin, ids));
        check_extent("element", extent);
        extent
    }

    fn layout_element<S: Surface + ?Sized>(
        &self,
        element: &ElementNode,
        surface: &mut S,
        origin: Vec2,
        ids: &IdAllocator,
    ) -> f32 {
        let options = &self.options;
        let palette = &options.palette;
        let margin = options.line_margin;
        let segment = options.segment_length;
        let tick = options.tick_offset();

        let id = ids.next_id();
        let tag = checked(surface.text(
            TextPrimitive::new(origin.x, origin.y, id.to_string(), self.fonts.node_id)
                .with_color(palette.node_id),
        ));
        surface.translate(
            tag.id,
            Vec2::new(-tag.bounds.width, -tag.bounds.height + margin),
        );

        let label = checked(surface.text(
            TextPrimitive::new(origin.x, origin.y, element.name.as_str(), self.fonts.label)
                .with_color(palette.label),
        ))
        .bounds;
        let mut bottom = label.bottom();

        // Attribute rows, stacked under the label.
        let mut attribute_width: f32 = 0.0;
        if !element.attributes.is_empty() {
            let x0 = label.left() + options.attribute_padding;
            let y0 = label.bottom() + margin;
            self.connector(surface, x0, y0, x0, y0 + tick);

            let mut y1 = y0;
            let mut last_row = 0.0;
            for attribute in &element.attributes {
                let extent =
                    self.layout_attribute(attribute, surface, Vec2::new(x0 + segment + margin, y1));
                attribute_width = attribute_width.max(extent.width.unwrap_or(0.0));
                if extent.height > 0.0 {
                    self.connector(surface, x0, y1 + tick, x0 + segment, y1 + tick);
                    last_row = extent.height;
                    y1 += extent.height;
                }
            }
            self.connector(surface, x0, y0 + tick, x0, y1 - last_row + tick);
            bottom = bottom.max(y1);
        }

        // Child rows, to the right of both the label and the attributes.
        let x0 = (label.right() + margin)
            .max(label.left() + options.attribute_padding + segment + margin + attribute_width);
        let y0 = label.top();
        let gap = options.sibling_gap();
        let mut y1 = y0;
        let mut last_row = 0.0;
        for child in &element.children {
            let origin = Vec2::new(x0 + 2.0 * segment + margin, y1);
            let extent = self.layout(child, surface, origin, &ids.descend());
            if !extent.is_empty() {
                self.connector(surface, x0 + segment, y1 + tick, x0 + 2.0 * segment, y1 + tick);
                last_row = extent.height;
                y1 += extent.height + gap;
            }
        }
        if y1 > y0 {
            y1 -= gap;
            self.connector(surface, label.right() + margin, y0 + tick, x0 + segment, y0 + tick);
            self.connector(surface, x0 + segment, y0 + tick, x0 + segment, y1 - last_row + tick);
            bottom = bottom.max(y1);
        }

        let height = bottom - label.top();
        log::trace!(
            "{id} <{}> at ({}, {}): height {height}",
            element.name,
            origin.x,
            origin.y
        );
        height
    }

    fn layout_attribute<S: Surface + ?Sized>(
        &self,
        attribute: &Attribute,
        surface: &mut S,
        origin: Vec2,
    ) -> Extent {
        let palette = &self.options.palette;
        let name = checked(surface.text(
            TextPrimitive::new(
                origin.x,
                origin.y,
                format!("{} = ", attribute.name),
                self.fonts.attribute_name,
            )
            .with_color(palette.attribute_name),
        ))
        .bounds;
        let value = checked(surface.text(
            TextPrimitive::new(name.right(), origin.y, attribute.value.as_str(), self.fonts.label)
                .with_color(palette.attribute_value),
        ))
        .bounds;

        let row = name.union(&value);
        Extent {
            height: row.height,
            width: Some(value.right() - name.left()),
        }
    }

    fn layout_block<S: Surface + ?Sized>(
        &self,
        data: &CharacterData,
        surface: &mut S,
        origin: Vec2,
        style: &BlockStyle,
    ) -> f32 {
        if data.is_blank() {
            return 0.0;
        }

        let mut y = origin.y;
        let mut block: Option<(PrimitiveId, Bounds)> = None;
        for line in dedent(&data.data) {
            let line = line.trim_end();
            if !line.is_empty() {
                let drawn = checked(surface.text(
                    TextPrimitive::new(origin.x, y, line, self.fonts.text)
                        .with_color(style.foreground),
                ));
                block = Some(match block {
                    Some((first, bounds)) => (first, bounds.union(&drawn.bounds)),
                    None => (drawn.id, drawn.bounds),
                });
            }
            let bottom = block.map_or(y, |(_, bounds)| bounds.bottom());
            y = (y + self.options.font_height).max(bottom);
        }

        let Some((first, bounds)) = block else {
            return 0.0;
        };
        let frame = checked(surface.rect(
            RectPrimitive::from_bounds(bounds.expand(self.options.line_margin))
                .with_fill(style.background)
                .with_stroke(Stroke::new(style.border, 1.0)),
        ));
        surface.lower(frame.id, first);

        bounds.height
    }

    fn connector<S: Surface + ?Sized>(&self, surface: &mut S, x0: f32, y0: f32, x1: f32, y1: f32) {
        surface.line(LinePrimitive::new(x0, y0, x1, y1).with_color(self.options.palette.line));
    }
}

fn checked(drawn: Drawn) -> Drawn {
    assert!(
        drawn.bounds.is_well_formed(),
        "surface returned malformed bounds {:?} for {:?}",
        drawn.bounds,
        drawn.id
    );
    drawn
}

fn check_extent(kind: &str, extent: Extent) {
    assert!(
        extent.height.is_finite() && extent.height >= 0.0,
        "{kind} node produced invalid height {}",
        extent.height
    );
    if let Some(width) = extent.width {
        assert!(
            width.is_finite() && width >= 0.0,
            "{kind} node produced invalid width {width}"
        );
    }
}
