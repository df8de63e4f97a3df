use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::coords::{CanvasPoint, CanvasSize};
use crate::device::{FrameEncoder, Gpu, GpuInit, SessionError, SetupError, SurfaceErrorAction};
use crate::paint::Color;
use crate::raster::split_batches;
use crate::render::{CompositePass, RasterPass, RenderCtx, RenderTarget};

use super::{CanvasConfig, CanvasTarget};

/// GPU canvas: the persistent canvas texture, both pipelines and the
/// presentation surface.
///
/// All GPU resources are created once in [`CanvasSurface::new`] and live for
/// the session. The canvas texture is written only by rasterize and clear
/// passes; the composite pass reads it.
pub struct CanvasSurface<'w> {
    gpu: Gpu<'w>,
    config: CanvasConfig,
    texture: wgpu::Texture,
    raster: RasterPass,
    composite: CompositePass,
    frame: FrameEncoder,
}

impl<'w> CanvasSurface<'w> {
    /// Acquires the GPU, configures `target` for presentation and allocates
    /// the canvas texture, filled with the configured background.
    ///
    /// `surface_size` is the drawable size of `target` in physical pixels.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        surface_size: PhysicalSize<u32>,
        init: GpuInit,
        config: CanvasConfig,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let gpu = Gpu::new(target, surface_size, init).await?;

        let limit = gpu.device().limits().max_texture_dimension_2d;
        if config.width > limit || config.height > limit {
            return Err(SetupError::CanvasTooLarge {
                width: config.width,
                height: config.height,
                limit,
            });
        }

        let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("pixl canvas texture"),
            size: extent(config.size()),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let texels = solid_rows(config.size(), config.background, 4 * config.width);
        gpu.queue().write_texture(
            texture.as_image_copy(),
            &texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * config.width),
                rows_per_image: Some(config.height),
            },
            extent(config.size()),
        );

        let raster = RasterPass::new(gpu.device(), &view, config.batch_capacity);
        let composite = CompositePass::new(gpu.device(), gpu.surface_format(), &view);

        log::debug!(
            "canvas ready: {}x{} texels, batch capacity {}",
            config.width,
            config.height,
            config.batch_capacity
        );

        Ok(Self {
            gpu,
            config,
            texture,
            raster,
            composite,
            frame: FrameEncoder::new(),
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    /// Number of frames submitted so far.
    pub fn frames_submitted(&self) -> u64 {
        self.frame.frames_submitted()
    }

    /// Reconfigures the presentation surface. The canvas texture is untouched.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn ensure_device(&self) -> Result<(), SessionError> {
        match self.gpu.lost_reason() {
            Some(reason) => Err(SessionError::DeviceLost(reason)),
            None => Ok(()),
        }
    }
}

impl CanvasTarget for CanvasSurface<'_> {
    fn size(&self) -> CanvasSize {
        self.config.size()
    }

    fn batch_capacity(&self) -> usize {
        self.raster.capacity()
    }

    fn rasterize_segments(&mut self, points: &[CanvasPoint], color: Color) -> Result<(), SessionError> {
        self.ensure_device()?;
        if points.is_empty() {
            return Ok(());
        }

        let device = self.gpu.device();
        let queue = self.gpu.queue();
        let encoder = self.frame.encoder(device);
        let capacity = self.raster.capacity();
        for batch in split_batches(points, capacity) {
            self.raster.encode(device, queue, encoder, batch, color);
        }
        Ok(())
    }

    fn composite(&mut self, cursor: Option<CanvasPoint>, color: Color) -> Result<(), SessionError> {
        self.ensure_device()?;

        let view = match self.frame.surface_view() {
            Some(view) => view,
            None => match self.gpu.acquire_surface_texture() {
                Ok(texture) => self.frame.attach_surface(texture),
                Err(err) => {
                    return match self.gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => Err(SessionError::OutOfMemory),
                        // Rasterized strokes still reach the canvas at submit.
                        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                    };
                }
            },
        };

        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());
        let encoder = self.frame.encoder(ctx.device);
        let mut target = RenderTarget::new(encoder, &view);
        self.composite.encode(&ctx, &mut target, cursor, color);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), SessionError> {
        self.ensure_device()?;

        let size = self.config.size();
        let bytes_per_row = padded_bytes_per_row(size.width);
        let staging = self
            .gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("pixl canvas clear staging"),
                contents: &solid_rows(size, color, bytes_per_row),
                usage: wgpu::BufferUsages::COPY_SRC,
            });

        // Recorded into the frame so it orders after strokes already encoded.
        let encoder = self.frame.encoder(self.gpu.device());
        encoder.copy_buffer_to_texture(
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(size.height),
                },
            },
            self.texture.as_image_copy(),
            extent(size),
        );
        Ok(())
    }

    fn submit_frame(&mut self) -> Result<(), SessionError> {
        self.ensure_device()?;
        self.frame.submit(self.gpu.queue());
        self.raster.end_frame();
        Ok(())
    }
}

fn extent(size: CanvasSize) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}

/// Row pitch for buffer-to-texture copies, aligned as wgpu requires.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = 4 * width;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Builds `height` rows of `color` texels with the given row pitch.
fn solid_rows(size: CanvasSize, color: Color, bytes_per_row: u32) -> Vec<u8> {
    let texel = color.to_rgba8();
    let mut row = vec![0u8; bytes_per_row as usize];
    for chunk in row[..4 * size.width as usize].chunks_exact_mut(4) {
        chunk.copy_from_slice(&texel);
    }
    row.repeat(size.height as usize)
}
