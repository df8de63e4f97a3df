mod app;
mod document;
mod palette;

use anyhow::Result;

use pixl_engine::device::GpuInit;
use pixl_engine::logging::{init_logging, LoggingConfig};
use pixl_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::document::DocumentSettings;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let document = DocumentSettings::default();
    log::info!(
        "opening {}x{} canvas at {}x zoom",
        document.width,
        document.height,
        document.zoom()
    );

    let config = RuntimeConfig {
        title: "pixl studio".to_string(),
        initial_size: document.window_size(),
        canvas: document.canvas_config(),
    };

    Runtime::run(config, GpuInit::default(), StudioApp::new(document))
}
