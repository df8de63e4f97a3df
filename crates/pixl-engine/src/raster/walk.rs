use crate::coords::{CanvasPoint, CanvasSize, Texel};

/// Visits every texel the rasterize pass writes for the segment `from → to`.
///
/// Same arithmetic as `cs_main` in `raster.wgsl`: both endpoints are clamped
/// into the canvas and scaled to pixel space, the end texel is stamped, then
/// the walk takes `ceil(max(|dx|, |dy|))` evenly spaced steps from `from`, so
/// consecutive samples are never more than one texel apart on either axis.
/// Texels may be visited more than once.
pub fn walk_segment(
    from: CanvasPoint,
    to: CanvasPoint,
    size: CanvasSize,
    mut visit: impl FnMut(Texel),
) {
    if size.is_empty() {
        return;
    }

    let (fx, fy) = to_pixel_space(from, size);
    let (tx, ty) = to_pixel_space(to, size);
    let steps = (tx - fx).abs().max((ty - fy).abs()).ceil() as u32;

    visit(Texel::from_pixel_space(tx, ty, size));
    for k in 0..steps {
        let t = k as f32 / steps as f32;
        visit(Texel::from_pixel_space(mix(fx, tx, t), mix(fy, ty, t), size));
    }
}

/// Visits the texels of every segment in one rasterize batch.
///
/// Point `i` connects back to point `i - 1`; the first point connects to
/// itself and so stamps a single texel.
pub fn walk_batch(points: &[CanvasPoint], size: CanvasSize, mut visit: impl FnMut(Texel)) {
    for (i, &current) in points.iter().enumerate() {
        let previous = if i > 0 { points[i - 1] } else { current };
        walk_segment(previous, current, size, &mut visit);
    }
}

/// Splits `points` into batches of at most `capacity` points.
///
/// Consecutive batches share their boundary point, so the segment crossing
/// the boundary is drawn by the later batch.
pub fn split_batches(
    points: &[CanvasPoint],
    capacity: usize,
) -> impl Iterator<Item = &[CanvasPoint]> {
    let capacity = capacity.max(2);
    let mut start = Some(0);
    std::iter::from_fn(move || {
        let s = start?;
        if s >= points.len() {
            start = None;
            return None;
        }
        let end = (s + capacity).min(points.len());
        start = if end == points.len() { None } else { Some(end - 1) };
        Some(&points[s..end])
    })
}

#[inline]
fn to_pixel_space(p: CanvasPoint, size: CanvasSize) -> (f32, f32) {
    let p = p.clamped();
    (p.x * size.width as f32, p.y * size.height as f32)
}

/// WGSL `mix`.
#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
