//! Export formats for rendered Scissors diagrams.
//!
//! Supported formats:
//! - SVG (vector image sized to the diagram's scroll region)
//! - JSON (the scene's primitives, for tooling and tests)

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "svg")]
pub mod svg;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use scissors_core::ExportError;
use scissors_render_2d::Scene;

#[cfg(feature = "svg")]
pub use svg::SvgOptions;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Svg,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown format '{other}' (expected svg or json)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Svg => write!(f, "svg"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Export a scene to SVG.
#[cfg(feature = "svg")]
pub fn export_svg(scene: &Scene) -> Result<String, ExportError> {
    svg::export(scene)
}

/// Export a scene to SVG with custom options.
#[cfg(feature = "svg")]
pub fn export_svg_with_options(scene: &Scene, options: &SvgOptions) -> Result<String, ExportError> {
    svg::export_with_options(scene, options)
}

/// Export a scene to JSON.
#[cfg(feature = "json")]
pub fn export_json(scene: &Scene) -> Result<String, ExportError> {
    json::export(scene)
}

/// Export a scene in `format`.
#[cfg(all(feature = "svg", feature = "json"))]
pub fn export(scene: &Scene, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Svg => export_svg(scene),
        ExportFormat::Json => export_json(scene),
    }
}

/// Write exported output to `path`.
pub fn write_to_path(path: impl AsRef<Path>, contents: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, contents)?;
    log::info!("Wrote {} byte(s) to {}", contents.len(), path.display());
    Ok(())
}
