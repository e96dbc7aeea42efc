//! 2D drawing surface for Scissors diagrams.
//!
//! Layout draws through the [`Surface`] trait and reads back bounding boxes
//! immediately after each primitive is created. [`Scene`] is the retained
//! implementation: it keeps every primitive in paint order so exporters can
//! walk it afterwards.

mod bounds;
pub mod font;
pub mod primitives;
pub mod scene;
mod surface;

pub use bounds::Bounds;
pub use font::{ApproximateMetrics, Font, FontFamily, FontMetrics, FontWeight};
pub use primitives::*;
pub use scene::{Scene, SceneItem};
pub use surface::{Drawn, Surface};
