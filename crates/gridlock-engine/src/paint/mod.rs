//! Paint model shared between the command stream and renderers.
//!
//! Colors are straight (non-premultiplied) RGBA; the GPU pipelines blend with
//! classic `SrcAlpha / OneMinusSrcAlpha`.

mod color;

pub use color::Color;
