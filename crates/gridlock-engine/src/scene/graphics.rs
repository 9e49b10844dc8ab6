use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{Command, CommandLog, TextAlign};

/// Executes queued commands against some backend.
///
/// The render thread implements this on top of wgpu; tests implement it with
/// a recording vec.
pub trait CommandExecutor {
    fn execute(&mut self, cmd: &Command);
}

impl<F: FnMut(&Command)> CommandExecutor for F {
    fn execute(&mut self, cmd: &Command) {
        self(cmd)
    }
}

/// Shared handle to the command queue.
///
/// Cloning is cheap; all clones refer to the same log. A single mutex is
/// shared between every producer batch and the render pass, which is what
/// makes a batch atomic: commands appended between [`begin`](Self::begin) and
/// [`Batch::finish`] become visible to the render pass as one unit, and the
/// render pass can never observe a half-appended batch.
#[derive(Debug, Clone, Default)]
pub struct Graphics {
    log: Arc<Mutex<CommandLog>>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a batch of drawing operations, blocking while the render pass
    /// (or another batch) holds the queue.
    ///
    /// The returned [`Batch`] holds the lock; drop it or call
    /// [`Batch::finish`] to publish the batch. A `finish` without a matching
    /// `begin` cannot be expressed: `finish` consumes the batch value.
    pub fn begin(&self) -> Batch<'_> {
        Batch {
            log: lock(&self.log),
        }
    }

    /// True when commands beyond the render cursor are waiting.
    pub fn is_dirty(&self) -> bool {
        lock(&self.log).is_dirty()
    }

    /// Forces the next render pass to replay the whole log from index 0.
    ///
    /// Invoked from damage/resize handling, where previously presented pixels
    /// can no longer be trusted.
    pub fn make_dirty(&self) {
        lock(&self.log).make_dirty()
    }

    pub fn len(&self) -> usize {
        lock(&self.log).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.log).is_empty()
    }

    /// Runs one render pass: executes every pending command in append order
    /// under the queue lock, then advances the cursor past them.
    ///
    /// Returns the number of commands executed; 0 means the pass was a no-op
    /// and nothing needs presenting.
    pub fn render_pending<E: CommandExecutor + ?Sized>(&self, executor: &mut E) -> usize {
        let mut log = lock(&self.log);
        let count = log.pending().len();
        for cmd in log.pending() {
            executor.execute(cmd);
        }
        log.mark_rendered();
        count
    }
}

// A poisoned queue mutex only means a producer panicked between appends;
// every individual append left the log structurally intact, so recover the
// guard instead of propagating the poison.
fn lock(log: &Arc<Mutex<CommandLog>>) -> MutexGuard<'_, CommandLog> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A `begin()`..`finish()` span of queue mutations.
///
/// Holds the queue lock for its whole lifetime, so the render pass observes
/// either none or all of the batch.
pub struct Batch<'g> {
    log: MutexGuard<'g, CommandLog>,
}

impl Batch<'_> {
    /// Clears the screen, filling it with `color`.
    ///
    /// Discards all previously queued commands and rewinds the render cursor;
    /// the next render pass starts from this `Clear`.
    pub fn clear(&mut self, color: Color) {
        self.log.clear(color);
    }

    /// Fills `rect` with `color`.
    pub fn rectangle(&mut self, rect: Rect, color: Color) {
        self.log.push(Command::Rect { rect, color });
    }

    /// Draws a uniformly colored line, `thickness` px in cross-section.
    pub fn line(&mut self, start: Vec2, end: Vec2, color: Color, thickness: f32) {
        self.gradient_line(start, end, color, color, thickness);
    }

    /// Draws a line fading linearly from `color` at `start` to `color2` at
    /// `end`.
    pub fn gradient_line(
        &mut self,
        start: Vec2,
        end: Vec2,
        color: Color,
        color2: Color,
        thickness: f32,
    ) {
        self.log.push(Command::Line {
            start,
            end,
            thickness,
            color,
            color2,
        });
    }

    /// Writes `text` centred within `rect`.
    pub fn write(&mut self, text: impl Into<String>, rect: Rect, color: Color) {
        self.write_aligned(text, rect, color, TextAlign::Centre);
    }

    /// Writes `text` vertically centred in `rect`, horizontally placed
    /// according to `align`.
    pub fn write_aligned(
        &mut self,
        text: impl Into<String>,
        rect: Rect,
        color: Color,
        align: TextAlign,
    ) {
        self.log.push(Command::Write {
            text: text.into(),
            rect,
            color,
            align,
        });
    }

    /// Draws the outline of `rect` as four lines of the given `thickness`.
    pub fn rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32) {
        let a = rect.top_left();
        let b = a + rect.size.vertical();
        let c = a + rect.size;
        let d = a + rect.size.horizontal();

        self.line(a, b, color, thickness);
        self.line(b, c, color, thickness);
        self.line(c, d, color, thickness);
        self.line(d, a, color, thickness);
    }

    /// Publishes the batch, releasing the queue lock.
    ///
    /// Dropping the batch has the same effect; `finish` exists so call sites
    /// can mark the end of a frame explicitly.
    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(graphics: &Graphics) -> Vec<Command> {
        let mut seen = Vec::new();
        graphics.render_pending(&mut |cmd: &Command| seen.push(cmd.clone()));
        seen
    }

    #[test]
    fn batch_renders_in_append_order() {
        let graphics = Graphics::new();

        let mut batch = graphics.begin();
        batch.clear(Color::WHITE);
        batch.rectangle(Rect::new(0.0, 0.0, 5.0, 5.0), Color::RED);
        batch.write("5", Rect::new(1.0, 1.0, 3.0, 3.0), Color::BLACK);
        batch.finish();

        let seen = record(&graphics);
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], Command::Clear { .. }));
        assert!(matches!(seen[1], Command::Rect { .. }));
        assert!(matches!(seen[2], Command::Write { .. }));
        assert_eq!(graphics.len(), 3);
        assert!(!graphics.is_dirty());
    }

    #[test]
    fn second_pass_without_mutation_executes_nothing() {
        let graphics = Graphics::new();
        graphics.begin().clear(Color::WHITE);

        assert_eq!(graphics.render_pending(&mut |_: &Command| {}), 1);
        assert!(!graphics.is_dirty());
        assert_eq!(graphics.render_pending(&mut |_: &Command| {}), 0);
    }

    #[test]
    fn clear_restarts_replay_from_the_fresh_clear() {
        let graphics = Graphics::new();

        {
            let mut batch = graphics.begin();
            batch.clear(Color::WHITE);
            batch.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        }
        record(&graphics);

        graphics.begin().clear(Color::BLACK);
        let seen = record(&graphics);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], Command::Clear { color: Color::BLACK });
    }

    #[test]
    fn make_dirty_replays_full_history() {
        let graphics = Graphics::new();
        {
            let mut batch = graphics.begin();
            batch.clear(Color::WHITE);
            batch.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        }
        assert_eq!(record(&graphics).len(), 2);
        assert!(!graphics.is_dirty());

        graphics.make_dirty();
        assert!(graphics.is_dirty());
        assert_eq!(record(&graphics).len(), 2);
    }

    #[test]
    fn batches_are_atomic_across_threads() {
        let graphics = Graphics::new();
        let remote = graphics.clone();

        let mut batch = graphics.begin();
        batch.clear(Color::WHITE);

        // A render pass on another thread must block until the batch ends.
        let handle = std::thread::spawn(move || {
            let mut count = 0usize;
            remote.render_pending(&mut |_: &Command| count += 1);
            count
        });

        batch.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        std::thread::sleep(std::time::Duration::from_millis(20));
        batch.rectangle(Rect::new(1.0, 0.0, 1.0, 1.0), Color::GREEN);
        batch.finish();

        // The pass sees the complete batch, never a prefix of it.
        assert_eq!(handle.join().expect("render thread panicked"), 3);
    }

    #[test]
    fn rectangle_outline_appends_four_lines() {
        let graphics = Graphics::new();
        graphics
            .begin()
            .rectangle_outline(Rect::new(0.0, 0.0, 4.0, 4.0), Color::GREY, 1.0);

        let seen = record(&graphics);
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|c| matches!(c, Command::Line { .. })));
    }
}
