//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - scoping command recording to one submitted batch per frame

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::{SessionError, SetupError, SurfaceErrorAction};
pub use frame::FrameEncoder;
pub use gpu::Gpu;
pub use init::GpuInit;
