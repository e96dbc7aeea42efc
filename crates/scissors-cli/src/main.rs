use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use scissors_core::ScissorsError;
use scissors_export::ExportFormat;
use scissors_layout::{render_document, LayoutEngine, LayoutOptions};
use scissors_render_2d::{ApproximateMetrics, Scene};

const DEFAULT_INPUT: &str = "common.bkl";

#[derive(Parser, Debug)]
#[command(
    name = "scissors",
    version,
    about = "Render an XML document as a tree diagram"
)]
struct Args {
    /// XML file to render
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// svg or json (default: from the output extension, else svg)
    #[arg(long, value_parser = parse_format)]
    format: Option<ExportFormat>,

    /// Base font height in pixels (default: 15)
    #[arg(long, value_name = "PX", value_parser = parse_font_height)]
    font_height: Option<f32>,

    /// Do not draw the origin marker
    #[arg(long)]
    no_origin_marker: bool,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse()
}

fn parse_font_height(s: &str) -> Result<f32, String> {
    let height: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid font height '{s}'"))?;
    if !(height.is_finite() && height > 0.0) {
        return Err(format!("font height must be positive, got {s}"));
    }
    Ok(height)
}

/// Use the output file's extension when no format was given.
fn resolve_format(args: &Args) -> ExportFormat {
    if let Some(format) = args.format {
        return format;
    }
    let extension = args
        .output
        .as_deref()
        .and_then(|path| path.extension())
        .and_then(|extension| extension.to_str());
    match extension {
        Some(extension) if extension.eq_ignore_ascii_case("json") => ExportFormat::Json,
        _ => ExportFormat::Svg,
    }
}

fn run(args: Args) -> Result<(), ScissorsError> {
    let doc = scissors_parser::load_file(&args.input)?;

    let mut layout = LayoutOptions {
        draw_origin_marker: !args.no_origin_marker,
        ..LayoutOptions::default()
    };
    if let Some(height) = args.font_height {
        layout.font_height = height;
    }

    let engine = LayoutEngine::new(layout, &ApproximateMetrics::default());
    let mut scene = Scene::new();
    let summary = render_document(&engine, &doc, &mut scene);
    log::debug!("scroll region {:?}", summary.scroll_region);

    let format = resolve_format(&args);
    let rendered = scissors_export::export(&scene, format)?;
    match args.output {
        Some(path) => scissors_export::write_to_path(path, &rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(scissors_core::ExportError::from)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
