//! Shape renderers.
//!
//! One renderer per primitive kind. Renderers are stateful (pipelines and
//! buffers are created lazily on first use) and each draw call consumes a
//! prepared slice of primitives in paint order.

mod common;
mod line;
mod rect;
mod text;

pub use line::{LineRenderer, LineSegment};
pub use rect::RectRenderer;
pub use text::{TextRenderer, TextRun};
