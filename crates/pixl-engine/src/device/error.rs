/// Failure while bringing up the GPU canvas.
///
/// All variants are fatal for the instance being constructed; no retry is
/// attempted. Callers may construct a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),

    #[error("no compatible GPU adapter: {0}")]
    NoAdapter(String),

    #[error("failed to create GPU device: {0}")]
    NoDevice(String),

    #[error("output surface unsupported: {0}")]
    SurfaceUnsupported(String),

    #[error("canvas {width}x{height} exceeds the device texture limit of {limit}")]
    CanvasTooLarge { width: u32, height: u32, limit: u32 },
}

impl From<wgpu::RequestAdapterError> for SetupError {
    fn from(value: wgpu::RequestAdapterError) -> Self {
        SetupError::NoAdapter(value.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for SetupError {
    fn from(value: wgpu::RequestDeviceError) -> Self {
        SetupError::NoDevice(value.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for SetupError {
    fn from(value: wgpu::CreateSurfaceError) -> Self {
        SetupError::SurfaceUnsupported(value.to_string())
    }
}

/// Unrecoverable failure of a running drawing session.
///
/// There is no per-frame recoverable error path: once one of these is
/// returned the engine must be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("GPU device lost: {0}")]
    DeviceLost(String),

    #[error("out of memory while acquiring the surface image")]
    OutOfMemory,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip presenting the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
