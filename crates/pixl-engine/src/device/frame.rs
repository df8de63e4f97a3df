/// Command recording scope for one frame.
///
/// The encoder is acquired by the first encoding call of a frame and released
/// exactly once by [`FrameEncoder::submit`], which also presents the surface
/// image attached by the composite pass. Holding the surface image prevents
/// acquisition of subsequent images, so a frame must be submitted promptly.
#[derive(Default)]
pub struct FrameEncoder {
    encoder: Option<wgpu::CommandEncoder>,
    surface_texture: Option<wgpu::SurfaceTexture>,
    frames_submitted: u64,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches submitted so far.
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Returns the frame's encoder, creating it on first use.
    pub fn encoder(&mut self, device: &wgpu::Device) -> &mut wgpu::CommandEncoder {
        self.encoder.get_or_insert_with(|| {
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("pixl frame encoder"),
            })
        })
    }

    /// Attaches the surface image this frame presents into and returns a view of it.
    ///
    /// A frame presents at most one image; attaching a second one before
    /// `submit` is a sequencing bug in the caller.
    pub fn attach_surface(&mut self, texture: wgpu::SurfaceTexture) -> wgpu::TextureView {
        debug_assert!(
            self.surface_texture.is_none(),
            "surface image acquired twice within one frame"
        );
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.surface_texture = Some(texture);
        view
    }

    /// View of the already attached surface image, if any.
    pub fn surface_view(&self) -> Option<wgpu::TextureView> {
        self.surface_texture.as_ref().map(|t| {
            t.texture
                .create_view(&wgpu::TextureViewDescriptor::default())
        })
    }

    /// Submits everything recorded since the last submit as one command
    /// buffer, then presents the attached surface image.
    ///
    /// Returns `false` when nothing was recorded.
    pub fn submit(&mut self, queue: &wgpu::Queue) -> bool {
        let Some(encoder) = self.encoder.take() else {
            debug_assert!(self.surface_texture.is_none());
            return false;
        };

        queue.submit(std::iter::once(encoder.finish()));
        if let Some(texture) = self.surface_texture.take() {
            texture.present();
        }

        self.frames_submitted = self.frames_submitted.wrapping_add(1);
        true
    }
}

impl Drop for FrameEncoder {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            log::debug!("dropping frame with unsubmitted commands");
        }
    }
}
