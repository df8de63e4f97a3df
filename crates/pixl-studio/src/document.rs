use pixl_engine::canvas::CanvasConfig;
use pixl_engine::window::LogicalSize;

pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 8;

/// Canvas dimensions plus the on-screen magnification.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSettings {
    pub width: u32,
    pub height: u32,
    zoom: u32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            zoom: 2,
        }
    }
}

impl DocumentSettings {
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Sets the zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: i64) {
        self.zoom = zoom.clamp(MIN_ZOOM as i64, MAX_ZOOM as i64) as u32;
    }

    pub fn increase_zoom(&mut self) {
        self.set_zoom(self.zoom as i64 + 1);
    }

    pub fn decrease_zoom(&mut self) {
        self.set_zoom(self.zoom as i64 - 1);
    }

    /// Window client size showing the whole canvas at the current zoom.
    pub fn window_size(&self) -> LogicalSize<f64> {
        LogicalSize::new(
            (self.width * self.zoom) as f64,
            (self.height * self.zoom) as f64,
        )
    }

    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig::new(self.width, self.height)
    }
}
