//! Tree-diagram layout for Scissors documents.
//!
//! Layout is a single recursive pass: each node draws its primitives onto a
//! [`Surface`](scissors_render_2d::Surface) at absolute coordinates and
//! returns the height its subtree occupied, which the parent uses to place
//! the next sibling.
//!
//! # Example
//!
//! ```
//! use scissors_layout::{render_document, LayoutEngine, LayoutOptions};
//! use scissors_render_2d::{ApproximateMetrics, Scene};
//!
//! let doc = scissors_parser::parse_document(r#"<a x="1"><b/>hello</a>"#).unwrap();
//! let engine = LayoutEngine::new(LayoutOptions::default(), &ApproximateMetrics::default());
//! let mut scene = Scene::new();
//! let summary = render_document(&engine, &doc, &mut scene);
//! assert!(summary.height > 0.0);
//! ```

mod dedent;
mod engine;
mod ids;
mod options;
mod render;

pub use dedent::{dedent, dedent_lines, split_lines};
pub use engine::{Extent, LayoutEngine};
pub use ids::{DepthMarker, IdAllocator, NodeId};
pub use options::{LayoutOptions, Palette};
pub use render::{render_document, RenderSummary};
