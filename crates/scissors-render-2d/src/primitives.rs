//! Draw primitives.
//!
//! These are the retained records a [`crate::Scene`] keeps and exporters walk.

use glam::Vec2;
use scissors_core::types::Color;

use crate::bounds::Bounds;
use crate::font::Font;

/// Handle of a primitive on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimitiveId(pub u32);

/// A drawing command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderCommand {
    /// Draw a text run
    Text(TextPrimitive),
    /// Draw a line segment
    Line(LinePrimitive),
    /// Draw a rectangle
    Rect(RectPrimitive),
    /// Draw an ellipse/circle
    Ellipse(EllipsePrimitive),
}

impl RenderCommand {
    /// Bounding box of the drawn shape.
    pub fn bounds(&self) -> Bounds {
        match self {
            RenderCommand::Text(text) => text.bounds(),
            RenderCommand::Line(line) => Bounds::from_points(line.from, line.to),
            RenderCommand::Rect(rect) => Bounds::new(rect.x, rect.y, rect.width, rect.height),
            RenderCommand::Ellipse(ellipse) => Bounds::new(
                ellipse.center.x - ellipse.radius_x,
                ellipse.center.y - ellipse.radius_y,
                2.0 * ellipse.radius_x,
                2.0 * ellipse.radius_y,
            ),
        }
    }

    /// Move the shape by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            RenderCommand::Text(text) => text.position += delta,
            RenderCommand::Line(line) => {
                line.from += delta;
                line.to += delta;
            }
            RenderCommand::Rect(rect) => {
                rect.x += delta.x;
                rect.y += delta.y;
            }
            RenderCommand::Ellipse(ellipse) => ellipse.center += delta,
        }
    }
}

/// A single line of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextPrimitive {
    pub position: Vec2,
    pub text: String,
    pub font: Font,
    pub color: Color,
}

impl TextPrimitive {
    pub fn new(x: f32, y: f32, text: impl Into<String>, font: Font) -> Self {
        Self {
            position: Vec2::new(x, y),
            text: text.into(),
            font,
            color: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_vecs(self.position, self.font.measure(&self.text))
    }
}

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinePrimitive {
    pub from: Vec2,
    pub to: Vec2,
    pub stroke: Stroke,
}

impl LinePrimitive {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            from: Vec2::new(x0, y0),
            to: Vec2::new(x1, y1),
            stroke: Stroke::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.stroke.color = color;
        self
    }
}

/// A rectangle primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectPrimitive {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
        }
    }

    pub fn from_bounds(bounds: Bounds) -> Self {
        Self::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// An ellipse/circle primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipsePrimitive {
    pub center: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl EllipsePrimitive {
    pub fn circle(center_x: f32, center_y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(center_x, center_y),
            radius_x: radius,
            radius_y: radius,
            fill: None,
            stroke: None,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// Stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{ApproximateMetrics, FontFamily, FontMetrics, FontWeight};

    #[test]
    fn test_text_bounds_anchor_top_left() {
        let font = ApproximateMetrics::uniform(0.5, 1.0).font(
            10.0,
            FontWeight::Bold,
            FontFamily::SansSerif,
        );
        let text = TextPrimitive::new(3.0, 4.0, "abc", font);
        assert_eq!(text.bounds(), Bounds::new(3.0, 4.0, 15.0, 10.0));
    }

    #[test]
    fn test_line_bounds_and_translate() {
        let mut command = RenderCommand::Line(LinePrimitive::new(10.0, 20.0, 10.0, 5.0));
        assert_eq!(command.bounds(), Bounds::new(10.0, 5.0, 0.0, 15.0));

        command.translate(Vec2::new(1.0, 1.0));
        assert_eq!(command.bounds(), Bounds::new(11.0, 6.0, 0.0, 15.0));
    }

    #[test]
    fn test_ellipse_bounds() {
        let command = RenderCommand::Ellipse(EllipsePrimitive::circle(0.0, 0.0, 1.0));
        assert_eq!(command.bounds(), Bounds::new(-1.0, -1.0, 2.0, 2.0));
    }
}
