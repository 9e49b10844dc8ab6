//! Gridlock engine crate.
//!
//! Owns the decoupled rendering pipeline: a queued graphics context drained by
//! a dedicated render thread, a serial background work scheduler, and the
//! passive watchdog that flags overlong tasks. Higher layers (the studio app)
//! only see `Graphics`, `WorkQueue` and the `App` callbacks.

pub mod device;
pub mod window;
pub mod work;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
