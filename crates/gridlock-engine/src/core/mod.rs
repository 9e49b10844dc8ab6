//! Engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and
//! application code, plus the session-liveness flag every background loop
//! polls.

mod app;
mod session;

pub use app::{App, AppCtx};
pub use session::SessionFlag;
