//! Time subsystem.
//!
//! Provides the fixed-rate pacing the render loop sleeps on when the queue
//! is clean.

mod pacer;

pub use pacer::FramePacer;
