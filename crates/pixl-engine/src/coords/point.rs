use core::ops::{Add, Mul, Sub};

/// Point in normalized canvas space (`[0, 1] × [0, 1]`, origin top-left).
///
/// The mapping to texels is independent of the on-screen zoom: `(0, 0)` is
/// the top-left corner of texel `(0, 0)` and `(1, 1)` the bottom-right corner
/// of the last texel.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamps both coordinates into `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }

    /// Returns the texel containing this point, clamped to the canvas.
    #[inline]
    pub fn to_texel(self, size: CanvasSize) -> Texel {
        let p = self.clamped();
        Texel::from_pixel_space(p.x * size.width as f32, p.y * size.height as f32, size)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for CanvasPoint {
    type Output = CanvasPoint;
    #[inline]
    fn add(self, rhs: CanvasPoint) -> CanvasPoint {
        CanvasPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for CanvasPoint {
    type Output = CanvasPoint;
    #[inline]
    fn sub(self, rhs: CanvasPoint) -> CanvasPoint {
        CanvasPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for CanvasPoint {
    type Output = CanvasPoint;
    #[inline]
    fn mul(self, rhs: f32) -> CanvasPoint {
        CanvasPoint::new(self.x * rhs, self.y * rhs)
    }
}

/// Canvas dimensions in texels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn texel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Integer texel coordinate, `(0, 0)` top-left.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Texel {
    pub x: u32,
    pub y: u32,
}

impl Texel {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Floors a pixel-space position and clamps it to `[0, dim - 1]`.
    ///
    /// Mirrors `texel_at` in `raster.wgsl`.
    #[inline]
    pub fn from_pixel_space(px: f32, py: f32, size: CanvasSize) -> Self {
        let fx = px.max(0.0).floor() as u32;
        let fy = py.max(0.0).floor() as u32;
        Self::new(
            fx.min(size.width.saturating_sub(1)),
            fy.min(size.height.saturating_sub(1)),
        )
    }

    #[inline]
    pub fn index(self, size: CanvasSize) -> usize {
        self.y as usize * size.width as usize + self.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S4: CanvasSize = CanvasSize::new(4, 4);

    #[test]
    fn origin_maps_to_first_texel() {
        assert_eq!(CanvasPoint::new(0.0, 0.0).to_texel(S4), Texel::new(0, 0));
    }

    #[test]
    fn far_corner_is_clamped_to_last_texel() {
        assert_eq!(CanvasPoint::new(1.0, 1.0).to_texel(S4), Texel::new(3, 3));
    }

    #[test]
    fn out_of_range_points_are_clamped() {
        assert_eq!(CanvasPoint::new(-3.0, 7.0).to_texel(S4), Texel::new(0, 3));
    }

    #[test]
    fn interior_point_floors() {
        // 0.49 * 4 = 1.96 → 1; 0.5 * 4 = 2.0 → 2
        assert_eq!(CanvasPoint::new(0.49, 0.5).to_texel(S4), Texel::new(1, 2));
    }

    #[test]
    fn non_square_canvas_uses_per_axis_dimension() {
        let size = CanvasSize::new(8, 2);
        assert_eq!(CanvasPoint::new(0.5, 0.5).to_texel(size), Texel::new(4, 1));
    }

    #[test]
    fn texel_index_is_row_major() {
        assert_eq!(Texel::new(1, 2).index(S4), 9);
    }
}
