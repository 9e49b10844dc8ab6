use super::Command;
use crate::paint::Color;

/// Ordered log of queued commands plus the render cursor.
///
/// The cursor marks the boundary between already-presented and pending
/// commands. Invariants:
/// - `0 <= rendered <= commands.len()`
/// - only the render pass advances the cursor
/// - only `clear` and `make_dirty` reset it to 0
///
/// `CommandLog` itself is not thread-safe; `Graphics` wraps it in the single
/// mutex shared by producers and the render pass.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<Command>,
    rendered: usize,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Index of the first command the render pass has not presented yet.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.rendered
    }

    /// True when commands beyond the cursor are waiting to be presented.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.rendered < self.commands.len()
    }

    /// Forces a full replay on the next render pass.
    ///
    /// Used when previously presented pixels are invalid (window damage or
    /// resize); history before the cursor becomes pending again.
    #[inline]
    pub fn make_dirty(&mut self) {
        self.rendered = 0;
    }

    #[inline]
    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Discards the entire log and starts a new sequence with a single
    /// `Clear` command. Clearing invalidates everything presented so far, so
    /// the cursor is reset to 0.
    pub fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(Command::Clear { color });
        self.rendered = 0;
    }

    /// The commands from the cursor to the end, in append order.
    #[inline]
    pub fn pending(&self) -> &[Command] {
        &self.commands[self.rendered..]
    }

    /// Advances the cursor past every command currently in the log.
    ///
    /// Call only after the pending range has been executed.
    #[inline]
    pub fn mark_rendered(&mut self) {
        self.rendered = self.commands.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    fn rect_cmd() -> Command {
        Command::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Color::RED,
        }
    }

    #[test]
    fn dirty_tracks_cursor_versus_length() {
        let mut log = CommandLog::new();
        assert!(!log.is_dirty());

        log.push(rect_cmd());
        assert!(log.is_dirty());
        assert_eq!(log.pending().len(), 1);

        log.mark_rendered();
        assert!(!log.is_dirty());
        assert_eq!(log.cursor(), log.len());
        assert!(log.pending().is_empty());
    }

    #[test]
    fn clear_replaces_log_and_resets_cursor() {
        let mut log = CommandLog::new();
        log.push(rect_cmd());
        log.push(rect_cmd());
        log.mark_rendered();

        log.clear(Color::WHITE);
        assert_eq!(log.len(), 1);
        assert_eq!(log.cursor(), 0);
        assert!(matches!(log.pending()[0], Command::Clear { .. }));
    }

    #[test]
    fn make_dirty_rewinds_to_start() {
        let mut log = CommandLog::new();
        log.clear(Color::WHITE);
        log.push(rect_cmd());
        log.mark_rendered();
        assert!(!log.is_dirty());

        log.make_dirty();
        assert!(log.is_dirty());
        assert_eq!(log.pending().len(), 2);
    }
}
