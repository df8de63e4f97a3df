use wgpu::util::DeviceExt;

use crate::coords::CanvasPoint;
use crate::paint::Color;

use super::common::{min_binding_size, StrokeUniform};

/// Must match `@workgroup_size` in `raster.wgsl`.
pub(super) const WORKGROUP_SIZE: u32 = 64;

/// How a batch's points and color reach the pass buffers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Upload {
    /// `queue.write_buffer`; lands before the frame's command buffer runs.
    Queue,
    /// Staging buffer copied by the encoder, ordered with the dispatches.
    Staged,
}

impl Upload {
    /// Queue writes are only safe for the first batch of a frame; any later
    /// one would overwrite the data the earlier dispatches read.
    fn for_batch(index_in_frame: u32) -> Self {
        if index_in_frame == 0 { Upload::Queue } else { Upload::Staged }
    }
}

/// Compute pass that writes stroke segments into the canvas texture.
///
/// Owns the pipeline plus the fixed-size stroke uniform and point storage
/// buffer. The first batch of a frame uploads through the queue; further
/// batches stage their data through the frame's command encoder, so several
/// batches recorded into one frame each see their own points and color.
/// Call [`end_frame`](Self::end_frame) after each submit.
pub struct RasterPass {
    pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
    stroke_ubo: wgpu::Buffer,
    points_ssbo: wgpu::Buffer,
    capacity: usize,
    batches_in_frame: u32,
}

impl RasterPass {
    /// Builds the pipeline; `canvas_view` must be an `Rgba8Unorm` view with
    /// storage-binding usage. `capacity` is the maximum points per batch.
    pub fn new(device: &wgpu::Device, canvas_view: &wgpu::TextureView, capacity: usize) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pixl raster shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/raster.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixl raster bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: min_binding_size::<StrokeUniform>(),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: min_binding_size::<[f32; 2]>(),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pixl raster pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("pixl raster pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let stroke_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixl raster stroke ubo"),
            size: std::mem::size_of::<StrokeUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let points_ssbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixl raster points ssbo"),
            size: (capacity.max(1) * std::mem::size_of::<[f32; 2]>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixl raster bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(canvas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: stroke_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: points_ssbo.as_entire_binding(),
                },
            ],
        });

        Self {
            pipeline,
            bind_group,
            stroke_ubo,
            points_ssbo,
            capacity,
            batches_in_frame: 0,
        }
    }

    /// Maximum number of points a single [`encode`](Self::encode) accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resets per-frame upload bookkeeping once the frame is submitted.
    pub fn end_frame(&mut self) {
        self.batches_in_frame = 0;
    }

    /// Records one batch: uploads `points` and `color`, then dispatches one
    /// invocation per point.
    pub fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        points: &[CanvasPoint],
        color: Color,
    ) {
        debug_assert!(points.len() <= self.capacity, "raster batch exceeds capacity");
        let points = &points[..points.len().min(self.capacity)];
        if points.is_empty() {
            return;
        }

        let uniform = StrokeUniform {
            color: color.to_array(),
            count: points.len() as u32,
            _pad: [0; 3],
        };
        let raw: Vec<[f32; 2]> = points.iter().map(|p| p.to_array()).collect();

        match Upload::for_batch(self.batches_in_frame) {
            Upload::Queue => {
                queue.write_buffer(&self.stroke_ubo, 0, bytemuck::bytes_of(&uniform));
                queue.write_buffer(&self.points_ssbo, 0, bytemuck::cast_slice(&raw));
            }
            Upload::Staged => self.stage(device, encoder, &uniform, &raw),
        }
        self.batches_in_frame += 1;

        let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("pixl raster pass"),
            timestamp_writes: None,
        });
        cpass.set_pipeline(&self.pipeline);
        cpass.set_bind_group(0, &self.bind_group, &[]);
        cpass.dispatch_workgroups((points.len() as u32).div_ceil(WORKGROUP_SIZE), 1, 1);
    }

    fn stage(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        uniform: &StrokeUniform,
        raw: &[[f32; 2]],
    ) {
        let stroke_staging = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixl raster stroke staging"),
            contents: bytemuck::bytes_of(uniform),
            usage: wgpu::BufferUsages::COPY_SRC,
        });
        let points_staging = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixl raster points staging"),
            contents: bytemuck::cast_slice(raw),
            usage: wgpu::BufferUsages::COPY_SRC,
        });

        encoder.copy_buffer_to_buffer(
            &stroke_staging,
            0,
            &self.stroke_ubo,
            0,
            std::mem::size_of::<StrokeUniform>() as u64,
        );
        encoder.copy_buffer_to_buffer(
            &points_staging,
            0,
            &self.points_ssbo,
            0,
            std::mem::size_of_val(raw) as u64,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_batch_of_a_frame_uses_queue_writes() {
        assert_eq!(Upload::for_batch(0), Upload::Queue);
        assert_eq!(Upload::for_batch(1), Upload::Staged);
        assert_eq!(Upload::for_batch(7), Upload::Staged);
    }
}
