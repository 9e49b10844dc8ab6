//! Queued drawing commands.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in append order
//! - track how far the render pass has progressed (the dirty cursor)
//! - expose the batch-scoped producer API (`Graphics::begin` .. `Batch::finish`)
//!
//! The render thread drains this module through [`Graphics::render_pending`];
//! everything GPU-specific lives in `render`.

mod cmd;
mod graphics;
mod log;

pub use cmd::{Command, TextAlign};
pub use graphics::{Batch, CommandExecutor, Graphics};
pub use log::CommandLog;
