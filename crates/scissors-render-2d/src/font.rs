//! Font handles and metrics.
//!
//! A [`FontMetrics`] provider turns a pixel height, weight and family into a
//! [`Font`] handle. The handle carries everything the surface needs to size a
//! text run, so the surface never has to call back into the provider.

use glam::Vec2;

/// Font family class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontFamily {
    #[default]
    SansSerif,
    Monospace,
}

impl FontFamily {
    /// Generic CSS family name.
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Monospace => "monospace",
        }
    }
}

/// Font weight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A sized font, ready for text creation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
    /// Nominal size in pixels
    pub size: f32,
    /// Horizontal advance per character
    pub advance: f32,
    /// Height of one line of text
    pub line_height: f32,
    /// Distance from the top of a line to its baseline
    pub ascent: f32,
}

impl Font {
    /// Size of a single-line text run.
    pub fn measure(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * self.advance, self.line_height)
    }
}

/// Produces font handles for a pixel height and style.
pub trait FontMetrics {
    fn font(&self, size: f32, weight: FontWeight, family: FontFamily) -> Font;
}

/// Character-count based metrics.
///
/// Widths are estimated from a per-family advance ratio; real glyph shaping
/// is not needed for a diagram whose geometry only has to be consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    /// Advance of proportional text, as a fraction of the size
    pub sans_advance: f32,
    /// Advance of monospace text, as a fraction of the size
    pub mono_advance: f32,
    /// Extra advance factor for bold text
    pub bold_factor: f32,
    /// Line height as a multiple of the size
    pub line_height: f32,
    /// Baseline offset as a fraction of the size
    pub ascent: f32,
}

impl ApproximateMetrics {
    /// Every family and weight shares one advance ratio.
    pub fn uniform(advance: f32, line_height: f32) -> Self {
        Self {
            sans_advance: advance,
            mono_advance: advance,
            bold_factor: 1.0,
            line_height,
            ascent: 0.8,
        }
    }
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            sans_advance: 0.55,
            mono_advance: 0.6,
            bold_factor: 1.08,
            line_height: 1.2,
            ascent: 0.8,
        }
    }
}

impl FontMetrics for ApproximateMetrics {
    fn font(&self, size: f32, weight: FontWeight, family: FontFamily) -> Font {
        let ratio = match family {
            FontFamily::SansSerif => self.sans_advance,
            FontFamily::Monospace => self.mono_advance,
        };
        let advance = match weight {
            FontWeight::Normal => size * ratio,
            FontWeight::Bold => size * ratio * self.bold_factor,
        };

        Font {
            family,
            weight,
            size,
            advance,
            line_height: size * self.line_height,
            ascent: size * self.ascent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_counts_chars() {
        let metrics = ApproximateMetrics::uniform(0.5, 1.0);
        let font = metrics.font(10.0, FontWeight::Normal, FontFamily::SansSerif);
        assert_eq!(font.measure("hello"), Vec2::new(25.0, 10.0));
        assert_eq!(font.measure("αβγ"), Vec2::new(15.0, 10.0));
        assert_eq!(font.measure(""), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_default_bold_is_wider() {
        let metrics = ApproximateMetrics::default();
        let normal = metrics.font(15.0, FontWeight::Normal, FontFamily::SansSerif);
        let bold = metrics.font(15.0, FontWeight::Bold, FontFamily::SansSerif);
        assert!(bold.advance > normal.advance);
        assert_eq!(bold.line_height, normal.line_height);
    }

    #[test]
    fn test_monospace_uses_its_own_ratio() {
        let metrics = ApproximateMetrics::default();
        let mono = metrics.font(10.0, FontWeight::Normal, FontFamily::Monospace);
        assert!((mono.advance - 6.0).abs() < 1e-4);
        assert_eq!(mono.family.css_name(), "monospace");
    }
}
