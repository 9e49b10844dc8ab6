use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Horizontal alignment of text within its rectangle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Centre,
    Right,
}

impl TextAlign {
    /// Ratio of free horizontal space placed to the left of the text.
    #[inline]
    pub fn ratio(self) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Centre => 0.5,
            TextAlign::Right => 1.0,
        }
    }
}

/// One queued drawing operation.
///
/// Commands are immutable and self-contained: they carry every parameter
/// needed to execute later, on the render thread, with no reference back to
/// the producer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fill the whole surface with `color`. Issued by `Batch::clear`, which
    /// also discards all earlier commands.
    Clear { color: Color },

    /// Fill `rect` with `color`.
    Rect { rect: Rect, color: Color },

    /// A line from `start` to `end`, `thickness` px across, fading from
    /// `color` at the start to `color2` at the end.
    Line {
        start: Vec2,
        end: Vec2,
        thickness: f32,
        color: Color,
        color2: Color,
    },

    /// Text drawn within `rect`, vertically centred, horizontally placed
    /// according to `align`.
    Write {
        text: String,
        rect: Rect,
        color: Color,
        align: TextAlign,
    },
}
