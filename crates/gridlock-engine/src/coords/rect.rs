use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn top_left(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn bottom_right(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < (self.origin.x + self.size.x)
            && p.y < (self.origin.y + self.size.y)
    }

    /// The largest square that fits inside this rectangle, centered.
    #[inline]
    pub fn min_square(self) -> Rect {
        let side = self.size.x.min(self.size.y);
        Rect::from_origin_size(
            self.center() - Vec2::splat(side / 2.0),
            Vec2::splat(side),
        )
    }

    /// Scales both dimensions by `factor` around the center.
    #[inline]
    pub fn resize_by(self, factor: f32) -> Rect {
        let size = self.size * factor;
        Rect::from_origin_size(self.center() - size / 2.0, size)
    }

    /// Sets the height to `height`, keeping the center fixed.
    #[inline]
    pub fn resize_vertical(self, height: f32) -> Rect {
        Rect::new(
            self.origin.x,
            self.center().y - height / 2.0,
            self.size.x,
            height,
        )
    }

    /// Scales only the height by `factor`, keeping the center fixed.
    #[inline]
    pub fn resize_vertical_by(self, factor: f32) -> Rect {
        self.resize_vertical(self.size.y * factor)
    }

    /// Moves the rectangle down by `ratio` of its own height.
    #[inline]
    pub fn translate_vertical_relative(self, ratio: f32) -> Rect {
        Rect::from_origin_size(
            self.origin + Vec2::new(0.0, self.size.y * ratio),
            self.size,
        )
    }

    /// Splits into a top part of `ratio` height and the remaining bottom part.
    #[inline]
    pub fn split_vertical(self, ratio: f32) -> (Rect, Rect) {
        let top_h = self.size.y * ratio;
        let top = Rect::from_origin_size(self.origin, Vec2::new(self.size.x, top_h));
        let bottom = Rect::new(
            self.origin.x,
            self.origin.y + top_h,
            self.size.x,
            self.size.y - top_h,
        );
        (top, bottom)
    }

    /// Insets all four edges by `padding`.
    #[inline]
    pub fn with_padding(self, padding: f32) -> Rect {
        Rect::from_origin_size(
            self.origin + Vec2::splat(padding),
            self.size - Vec2::splat(padding * 2.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn edges_and_center() {
        let rect = r(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn min_square_is_centered() {
        let sq = r(0.0, 0.0, 200.0, 100.0).min_square();
        assert_eq!(sq.size, Vec2::splat(100.0));
        assert_eq!(sq.origin, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn resize_by_keeps_center() {
        let rect = r(0.0, 0.0, 100.0, 50.0);
        let shrunk = rect.resize_by(0.5);
        assert_eq!(shrunk.center(), rect.center());
        assert_eq!(shrunk.size, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn split_vertical_partitions_height() {
        let (top, bottom) = r(0.0, 0.0, 100.0, 100.0).split_vertical(0.7);
        assert_eq!(top.size.y, 70.0);
        assert_eq!(bottom.origin.y, 70.0);
        assert_eq!(bottom.size.y, 30.0);
        assert_eq!(top.size.x, bottom.size.x);
    }

    #[test]
    fn padding_insets_all_edges() {
        let padded = r(0.0, 0.0, 100.0, 100.0).with_padding(10.0);
        assert_eq!(padded, r(10.0, 10.0, 80.0, 80.0));
    }
}
