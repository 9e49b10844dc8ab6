//! Windowing and the runtime driver.
//!
//! Owns the winit event loop, starts the worker/watchdog/render threads and
//! translates platform events into application callbacks.

mod events;
mod runtime;

pub use events::{Key, MouseButton};
pub use runtime::{Runtime, RuntimeConfig};
