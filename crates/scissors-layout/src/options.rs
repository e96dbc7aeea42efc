//! Layout configuration.

use scissors_core::types::Color;

/// Options for diagram layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Pixel height of the label, attribute and text fonts
    pub font_height: f32,
    /// Gap between a primitive and the connector next to it
    pub line_margin: f32,
    /// Length of one horizontal connector segment
    pub segment_length: f32,
    /// Indent of the attribute spine from the label's left edge
    pub attribute_padding: f32,
    /// Identifier tag size relative to `font_height`
    pub id_font_scale: f32,
    /// Draw a small circle at the document origin
    pub draw_origin_marker: bool,
    pub palette: Palette,
}

impl LayoutOptions {
    /// Vertical gap between sibling child rows.
    pub fn sibling_gap(&self) -> f32 {
        2.0 * self.line_margin
    }

    /// Offset from a row's top to the connector tick drawn into it, in
    /// whole pixels.
    pub fn tick_offset(&self) -> f32 {
        (self.font_height / 2.0).floor()
    }

    /// Identifier tag font height, in whole pixels.
    pub fn id_font_height(&self) -> f32 {
        (self.font_height * self.id_font_scale).trunc()
    }

    pub fn with_font_height(mut self, font_height: f32) -> Self {
        self.font_height = font_height;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            font_height: 15.0,
            line_margin: 5.0,
            segment_length: 20.0,
            attribute_padding: 10.0,
            id_font_scale: 0.7,
            draw_origin_marker: true,
            palette: Palette::default(),
        }
    }
}

/// Colours used by the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub line: Color,
    pub label: Color,
    pub attribute_name: Color,
    pub attribute_value: Color,
    pub text: Color,
    pub text_background: Color,
    pub text_border: Color,
    pub comment: Color,
    pub comment_background: Color,
    pub comment_border: Color,
    pub node_id: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line: Color::from_rgb8(0x77, 0x77, 0x77),
            label: Color::BLACK,
            attribute_name: Color::BLACK,
            attribute_value: Color::from_rgb8(0x00, 0x00, 0x88),
            text: Color::from_rgb8(0x00, 0x66, 0x00),
            text_background: Color::WHITE,
            text_border: Color::BLACK,
            comment: Color::from_rgb8(0x33, 0x33, 0x33),
            comment_background: Color::from_rgb8(0xbb, 0xbb, 0xbb),
            comment_border: Color::from_rgb8(0xbb, 0xbb, 0xbb),
            node_id: Color::from_rgb8(0xbb, 0xbb, 0x77),
        }
    }
}
