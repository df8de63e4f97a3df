use crate::canvas::{CanvasConfig, CanvasTarget};
use crate::coords::{CanvasPoint, CanvasSize, Texel};
use crate::device::{SessionError, SetupError};
use crate::paint::Color;

use super::walk::{split_batches, walk_batch};

/// Kind of work recorded into a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pass {
    /// A rasterize batch of this many points.
    Rasterize { points: usize },
    Composite,
    Clear,
}

/// CPU canvas with the same observable behavior as the GPU surface.
///
/// Runs the rasterize walk on an 8-bit texel buffer and composites into a
/// separate output image, which is "presented" on submit. Unlike the GPU
/// target it exposes readback of both, which makes it the headless backend
/// for tests and tools.
pub struct SoftwareCanvas {
    size: CanvasSize,
    capacity: usize,
    texels: Vec<[u8; 4]>,

    /// Composite output of the open frame.
    output: Option<Vec<[u8; 4]>>,
    presented: Option<Vec<[u8; 4]>>,

    open_passes: Vec<Pass>,
    last_batch: Vec<Pass>,
    frames_submitted: u64,
}

impl SoftwareCanvas {
    pub fn new(config: CanvasConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let size = config.size();
        Ok(Self {
            size,
            capacity: config.batch_capacity,
            texels: vec![config.background.to_rgba8(); size.texel_count()],
            output: None,
            presented: None,
            open_passes: Vec::new(),
            last_batch: Vec::new(),
            frames_submitted: 0,
        })
    }

    /// Committed canvas texels, row-major.
    pub fn texels(&self) -> &[[u8; 4]] {
        &self.texels
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        self.texels[Texel::new(x, y).index(self.size)]
    }

    /// Coordinates of every committed texel equal to `color` (after 8-bit
    /// quantization), in row-major order.
    pub fn texels_with(&self, color: Color) -> Vec<Texel> {
        let want = color.to_rgba8();
        (0..self.size.height)
            .flat_map(|y| (0..self.size.width).map(move |x| Texel::new(x, y)))
            .filter(|t| self.texels[t.index(self.size)] == want)
            .collect()
    }

    /// Image presented by the most recent submit that carried a composite.
    pub fn presented(&self) -> Option<&[[u8; 4]]> {
        self.presented.as_deref()
    }

    pub fn presented_texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.presented
            .as_ref()
            .map(|img| img[Texel::new(x, y).index(self.size)])
    }

    /// Passes of the most recently submitted batch, in encoding order.
    pub fn last_batch(&self) -> &[Pass] {
        &self.last_batch
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }
}

impl CanvasTarget for SoftwareCanvas {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn batch_capacity(&self) -> usize {
        self.capacity
    }

    fn rasterize_segments(&mut self, points: &[CanvasPoint], color: Color) -> Result<(), SessionError> {
        let texel = color.to_rgba8();
        let size = self.size;
        for batch in split_batches(points, self.capacity) {
            walk_batch(batch, size, |t| self.texels[t.index(size)] = texel);
            self.open_passes.push(Pass::Rasterize { points: batch.len() });
        }
        Ok(())
    }

    fn composite(&mut self, cursor: Option<CanvasPoint>, color: Color) -> Result<(), SessionError> {
        let mut image = self.texels.clone();
        if let Some(cursor) = cursor {
            image[cursor.to_texel(self.size).index(self.size)] = color.to_rgba8();
        }
        self.output = Some(image);
        self.open_passes.push(Pass::Composite);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), SessionError> {
        self.texels.fill(color.to_rgba8());
        self.open_passes.push(Pass::Clear);
        Ok(())
    }

    fn submit_frame(&mut self) -> Result<(), SessionError> {
        if self.open_passes.is_empty() {
            return Ok(());
        }
        if let Some(image) = self.output.take() {
            self.presented = Some(image);
        }
        self.last_batch = std::mem::take(&mut self.open_passes);
        self.frames_submitted += 1;
        Ok(())
    }
}
