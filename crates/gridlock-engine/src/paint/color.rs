/// Straight-alpha RGBA color, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Greyscale color from a single brightness value.
    #[inline]
    pub const fn greyscale(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { r: self.r, g: self.g, b: self.b, a }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Blends two colors, `ratio = 0` giving `a` and `ratio = 1` giving `b`.
    ///
    /// RGB channels are mixed in a gamma-aware way (squared before the lerp,
    /// square-rooted after), which avoids the muddy midpoints of a naive lerp.
    /// Alpha is mixed linearly.
    pub fn mix(ratio: f32, a: Color, b: Color) -> Color {
        let inv = 1.0 - ratio;
        Color {
            r: (a.r * a.r * inv + b.r * b.r * ratio).sqrt(),
            g: (a.g * a.g * inv + b.g * b.g * ratio).sqrt(),
            b: (a.b * a.b * inv + b.b * b.b * ratio).sqrt(),
            a: a.a * inv + b.a * ratio,
        }
    }

    // Named palette.

    pub const RED: Color = Color::rgb(0.8, 0.2, 0.2);
    pub const GREEN: Color = Color::rgb(0.2, 0.8, 0.2);
    pub const BLUE: Color = Color::rgb(0.0, 0.4, 0.9);

    pub const YELLOW: Color = Color::rgb(0.9, 0.9, 0.3);
    pub const ORANGE: Color = Color::rgb(0.9, 0.6, 0.3);
    pub const PINK: Color = Color::rgb(0.9, 0.3, 0.9);
    pub const PURPLE: Color = Color::rgb(0.45, 0.0, 0.7);
    pub const CYAN: Color = Color::rgb(0.3, 0.6, 0.9);

    pub const WHITE: Color = Color::greyscale(0.95);
    pub const ULTRA_LIGHT_GREY: Color = Color::greyscale(0.85);
    pub const LIGHT_GREY: Color = Color::greyscale(0.75);
    pub const LIGHTER_GREY: Color = Color::rgb(0.59, 0.58, 0.6);
    pub const GREY: Color = Color::rgb(0.33, 0.33, 0.35);
    pub const DARK_GREY: Color = Color::rgb(0.19, 0.19, 0.2);
    pub const CHARCOAL: Color = Color::rgb(0.13, 0.13, 0.14);
    pub const BLACK: Color = Color::greyscale(0.1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints_are_identities() {
        assert_eq!(Color::mix(0.0, Color::RED, Color::BLUE), Color::RED);
        assert_eq!(Color::mix(1.0, Color::RED, Color::BLUE), Color::BLUE);
    }

    #[test]
    fn mix_midpoint_is_gamma_aware() {
        let m = Color::mix(0.5, Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0));
        // sqrt(0.5), not 0.5
        assert!((m.r - 0.5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::CYAN.with_alpha(0.25);
        assert_eq!((c.r, c.g, c.b), (0.3, 0.6, 0.9));
        assert_eq!(c.a, 0.25);
    }
}
