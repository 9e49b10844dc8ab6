use std::path::PathBuf;

use crate::coords::Vec2;
use crate::scene::Graphics;
use crate::work::WorkQueue;

/// Handles the runtime exposes to application callbacks.
///
/// Cheap to clone; every field is a shared handle onto runtime state.
#[derive(Clone)]
pub struct AppCtx {
    /// Command recorder shared with the render thread.
    pub graphics: Graphics,
    /// Serial background queue. Submitting blocks when the queue is full.
    pub work: WorkQueue,
    /// Size of the window's drawable area in pixels.
    pub window_size: Vec2,
}

/// An application driven by the runtime.
///
/// All callbacks run off the platform event thread: `setup`, `update` and
/// the input callbacks run on the worker thread, `draw` runs wherever a
/// repaint is triggered. Implementations therefore must be `Send`. Every
/// callback except [`draw`] has a no-op default.
///
/// [`draw`]: App::draw
pub trait App: Send + 'static {
    /// Runs once on the worker thread before the first update.
    fn setup(&mut self, _ctx: &AppCtx) {}

    /// Records the scene. Called whenever the window needs repainting; the
    /// commands recorded here replace any earlier scene.
    fn draw(&mut self, ctx: &AppCtx);

    /// Periodic tick on the worker thread, paced at the update rate. A slow
    /// tick delays the next one rather than piling up queued ticks.
    fn update(&mut self, _ctx: &AppCtx) {}

    fn key_pressed(&mut self, _ctx: &AppCtx, _key: crate::window::Key) {}

    /// `position` is in pixels from the window's top-left corner.
    fn mouse_pressed(&mut self, _ctx: &AppCtx, _button: crate::window::MouseButton, _position: Vec2) {
    }

    fn window_resized(&mut self, _ctx: &AppCtx, _new_size: Vec2) {}

    /// Files dropped onto the window.
    fn paths_dropped(&mut self, _ctx: &AppCtx, _paths: Vec<PathBuf>) {}
}
