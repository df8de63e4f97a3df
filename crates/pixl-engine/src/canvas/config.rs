use crate::coords::CanvasSize;
use crate::device::SetupError;
use crate::paint::Color;

/// Points a single rasterize batch holds unless configured otherwise.
pub const DEFAULT_BATCH_CAPACITY: usize = 10;

/// Canvas configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Canvas width in texels.
    pub width: u32,

    /// Canvas height in texels.
    pub height: u32,

    /// Maximum stroke points per rasterize batch.
    ///
    /// Bounds pointer throughput between ticks; a full batch is flushed before
    /// more points are accepted.
    pub batch_capacity: usize,

    /// Initial texel color.
    pub background: Color,
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_batch_capacity(mut self, batch_capacity: usize) -> Self {
        self.batch_capacity = batch_capacity;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    /// Rejects configurations no canvas can be built from.
    ///
    /// A batch needs room for the carried-over anchor plus one new point.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.batch_capacity < 2 {
            return Err(SetupError::InvalidConfig(format!(
                "batch capacity must be at least 2, got {}",
                self.batch_capacity
            )));
        }
        if !self.background.is_finite() {
            return Err(SetupError::InvalidConfig("background color is not finite".to_string()));
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            background: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CanvasConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = CanvasConfig::new(0, 16).validate().unwrap_err();
        assert!(matches!(err, SetupError::InvalidConfig(_)));
    }

    #[test]
    fn batch_must_hold_anchor_and_one_point() {
        assert!(CanvasConfig::new(4, 4).with_batch_capacity(1).validate().is_err());
        assert!(CanvasConfig::new(4, 4).with_batch_capacity(2).validate().is_ok());
    }

    #[test]
    fn non_finite_background_is_rejected() {
        let cfg = CanvasConfig::new(4, 4).with_background(Color::new(f32::NAN, 0.0, 0.0, 1.0));
        assert!(cfg.validate().is_err());
    }
}
