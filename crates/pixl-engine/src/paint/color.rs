/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// Canvas texels are stored as `Rgba8Unorm`, so a `Color` written by a stroke
/// round-trips through 8-bit quantization (see [`Color::to_rgba8`]).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to `[0, 1]`; NaN channels become 0.
    #[inline]
    pub fn clamped(self) -> Self {
        fn ch(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self::new(ch(self.r), ch(self.g), ch(self.b), ch(self.a))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes to 8-bit channels the way a `unorm8` texture store does
    /// (clamp, scale by 255, round to nearest).
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        let q = |v: f32| (v * 255.0).round() as u8;
        [q(c.r), q(c.g), q(c.b), q(c.a)]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_limits_channels() {
        let c = Color::new(-0.5, 1.5, 0.25, 2.0).clamped();
        assert_eq!(c, Color::new(0.0, 1.0, 0.25, 1.0));
    }

    #[test]
    fn clamped_zeroes_nan() {
        let c = Color::new(f32::NAN, 0.5, 0.25, f32::NAN).clamped();
        assert_eq!(c, Color::new(0.0, 0.5, 0.25, 0.0));
    }

    #[test]
    fn clamped_saturates_infinities() {
        let c = Color::new(f32::INFINITY, f32::NEG_INFINITY, 0.5, 1.0).clamped();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn to_rgba8_rounds_to_nearest() {
        assert_eq!(Color::RED.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::new(0.5, 0.0, 1.0, 0.0).to_rgba8(), [128, 0, 255, 0]);
    }

    #[test]
    fn from_rgba8_inverts_quantization() {
        let c = Color::from_rgba8(12, 200, 0, 255);
        assert_eq!(c.to_rgba8(), [12, 200, 0, 255]);
    }
}
