//! Shared GPU types used by the canvas passes.

use bytemuck::{Pod, Zeroable};

// ── stroke uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct StrokeUniform {
    pub color: [f32; 4],
    pub count: u32,
    pub _pad: [u32; 3], // 16-byte alignment
}

// ── cursor uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CursorUniform {
    pub color: [f32; 4],
    pub position: [f32; 2],
    pub visible: u32,
    pub _pad: u32,
}

// ── full-screen quad ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // NDC
    pub uv: [f32; 2],  // 0..1, +Y down
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Triangle-strip order: top-left, top-right, bottom-left, bottom-right.
pub(super) const FULLSCREEN_QUAD: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, 1.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0], uv: [1.0, 0.0] },
    QuadVertex { pos: [-1.0, -1.0], uv: [0.0, 1.0] },
    QuadVertex { pos: [1.0, -1.0], uv: [1.0, 1.0] },
];

// ── binding sizes ─────────────────────────────────────────────────────────

/// Minimum binding size for a uniform/storage element of type `T`.
///
/// All callers pass non-zero-sized `Pod` structs, so `None` never reaches wgpu
/// in practice; it would only disable the size check.
pub(super) fn min_binding_size<T>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // WGSL uniform layout: vec4 + u32 padded to the struct's 16-byte alignment.
    #[test]
    fn stroke_uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<StrokeUniform>(), 32);
    }

    #[test]
    fn cursor_uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CursorUniform>(), 32);
        assert_eq!(std::mem::offset_of!(CursorUniform, position), 16);
        assert_eq!(std::mem::offset_of!(CursorUniform, visible), 24);
    }

    #[test]
    fn quad_spans_clip_space_and_uv_space() {
        for v in FULLSCREEN_QUAD {
            assert_eq!(v.pos[0].abs(), 1.0);
            assert_eq!(v.pos[1].abs(), 1.0);
            // uv.y grows downward while clip-space y grows upward.
            assert_eq!(v.uv[0], (v.pos[0] + 1.0) / 2.0);
            assert_eq!(v.uv[1], (1.0 - v.pos[1]) / 2.0);
        }
    }
}
