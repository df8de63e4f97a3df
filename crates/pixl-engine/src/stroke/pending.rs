use crate::coords::CanvasPoint;

/// Bounded run of stroke points waiting for the next rasterize pass.
///
/// After a flush only the last point stays behind, as the start anchor of the
/// next batch, so consecutive batches draw one continuous line.
#[derive(Debug, Clone)]
pub struct PendingSegments {
    points: Vec<CanvasPoint>,
    capacity: usize,
}

impl PendingSegments {
    /// `capacity` is clamped to 2 (anchor plus one new point).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn as_slice(&self) -> &[CanvasPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<CanvasPoint> {
        self.points.last().copied()
    }

    /// Appends a point. The caller flushes a full buffer first.
    pub fn push(&mut self, point: CanvasPoint) {
        debug_assert!(!self.is_full(), "pending segment buffer overflow");
        self.points.push(point);
    }

    /// Drops everything but the last point.
    pub fn retain_anchor(&mut self) {
        if let Some(anchor) = self.last() {
            self.points.clear();
            self.points.push(anchor);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f32) -> CanvasPoint {
        CanvasPoint::new(v, v)
    }

    #[test]
    fn fills_up_to_capacity() {
        let mut buf = PendingSegments::new(3);
        buf.push(p(0.1));
        buf.push(p(0.2));
        assert!(!buf.is_full());
        buf.push(p(0.3));
        assert!(buf.is_full());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn retain_anchor_keeps_last_point() {
        let mut buf = PendingSegments::new(4);
        buf.push(p(0.1));
        buf.push(p(0.2));
        buf.push(p(0.3));
        buf.retain_anchor();
        assert_eq!(buf.as_slice(), &[p(0.3)]);
    }

    #[test]
    fn retain_anchor_on_empty_is_noop() {
        let mut buf = PendingSegments::new(4);
        buf.retain_anchor();
        assert!(buf.is_empty());
    }

    #[test]
    fn capacity_never_below_two() {
        assert_eq!(PendingSegments::new(0).capacity(), 2);
    }
}
