//! SVG export for rendered scenes.

use scissors_core::types::Color;
use scissors_core::ExportError;
use scissors_render_2d::{
    EllipsePrimitive, FontWeight, LinePrimitive, RectPrimitive, RenderCommand, Scene, Stroke,
    TextPrimitive,
};

/// Export options for SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Space added around the scroll region.
    pub padding: f32,
    /// Background fill, `None` for transparent.
    pub background: Option<Color>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            padding: 10.0,
            background: Some(Color::WHITE),
        }
    }
}

/// Export a scene to SVG.
pub fn export(scene: &Scene) -> Result<String, ExportError> {
    export_with_options(scene, &SvgOptions::default())
}

/// Export a scene to SVG with custom options.
///
/// The `viewBox` is the scene's scroll region grown by the padding, so the
/// diagram keeps its own coordinates, including negative ones.
pub fn export_with_options(scene: &Scene, options: &SvgOptions) -> Result<String, ExportError> {
    if scene.is_empty() {
        return Err(ExportError::EmptyScene);
    }

    let region = scene.scroll_region().expand(options.padding);
    let width = region.width.max(1.0);
    let height = region.height.max(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">
"#,
        width, height, region.x, region.y, width, height
    ));

    let mut writer = SvgWriter {
        svg: &mut svg,
        indent: 1,
    };

    if let Some(background) = options.background {
        writer.write_indent();
        writer.svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} />\n",
            region.x,
            region.y,
            width,
            height,
            paint_attr("fill", &background)
        ));
    }

    for command in scene.commands() {
        writer.export_command(command);
    }

    svg.push_str("</svg>\n");
    log::debug!("SVG export: {} primitive(s), {} byte(s)", scene.len(), svg.len());

    Ok(svg)
}

struct SvgWriter<'a> {
    svg: &'a mut String,
    indent: usize,
}

impl<'a> SvgWriter<'a> {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.svg.push_str("  ");
        }
    }

    fn export_command(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::Text(text) => self.export_text(text),
            RenderCommand::Line(line) => self.export_line(line),
            RenderCommand::Rect(rect) => self.export_rect(rect),
            RenderCommand::Ellipse(ellipse) => self.export_ellipse(ellipse),
        }
    }

    fn export_text(&mut self, text: &TextPrimitive) {
        let font = &text.font;
        let weight = match font.weight {
            FontWeight::Bold => " font-weight=\"bold\"",
            FontWeight::Normal => "",
        };

        self.write_indent();
        self.svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\"{} font-size=\"{}\" font-family=\"{}\"{} xml:space=\"preserve\">{}</text>\n",
            text.position.x,
            text.position.y + font.ascent,
            paint_attr("fill", &text.color),
            font.size,
            font.family.css_name(),
            weight,
            escape_xml(&text.text)
        ));
    }

    fn export_line(&mut self, line: &LinePrimitive) {
        self.write_indent();
        self.svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} />\n",
            line.from.x,
            line.from.y,
            line.to.x,
            line.to.y,
            stroke_attrs(Some(&line.stroke))
        ));
    }

    fn export_rect(&mut self, rect: &RectPrimitive) {
        self.write_indent();
        self.svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{} />\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill_attr(rect.fill.as_ref()),
            stroke_attrs(rect.stroke.as_ref())
        ));
    }

    fn export_ellipse(&mut self, ellipse: &EllipsePrimitive) {
        self.write_indent();
        self.svg.push_str(&format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}{} />\n",
            ellipse.center.x,
            ellipse.center.y,
            ellipse.radius_x,
            ellipse.radius_y,
            fill_attr(ellipse.fill.as_ref()),
            stroke_attrs(ellipse.stroke.as_ref())
        ));
    }
}

fn fill_attr(fill: Option<&Color>) -> String {
    match fill {
        Some(color) => paint_attr("fill", color),
        None => " fill=\"none\"".to_string(),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            "{} stroke-width=\"{}\"",
            paint_attr("stroke", &stroke.color),
            stroke.width
        ),
        None => String::new(),
    }
}

fn paint_attr(name: &str, color: &Color) -> String {
    let mut attr = format!(" {}=\"{}\"", name, color_to_svg(color));
    if color.a < 1.0 {
        attr.push_str(&format!(" {}-opacity=\"{}\"", name, color.a));
    }
    attr
}

fn color_to_svg(color: &Color) -> String {
    let (r, g, b, _) = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
