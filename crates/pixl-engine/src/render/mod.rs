//! GPU passes over the canvas texture.
//!
//! Two fixed pipelines, each owning its own GPU resources:
//! - `RasterPass` (compute) writes stroke segments into the canvas texture
//! - `CompositePass` (render) samples the canvas and overlays the cursor
//!
//! Convention: points arrive in normalized canvas space (`[0, 1]²`, +Y down);
//! shaders scale by the texture dimensions.

mod common;
mod composite;
mod ctx;
mod raster;

pub use composite::CompositePass;
pub use ctx::{RenderCtx, RenderTarget};
pub use raster::RasterPass;
