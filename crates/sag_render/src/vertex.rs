#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

/// Index pattern for one quad emitted by [`SpriteVertex::quad`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

impl SpriteVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Four corners of an axis-aligned quad in screen space (y down), in the
    /// order top-left, top-right, bottom-right, bottom-left.
    ///
    /// `rect` is `[x, y, w, h]`, `uv` is `[u0, v0, u1, v1]` with v0 at the top.
    pub fn quad(rect: [f32; 4], uv: [f32; 4], color: [f32; 4]) -> [SpriteVertex; 4] {
        let [x, y, w, h] = rect;
        let [u0, v0, u1, v1] = uv;
        [
            SpriteVertex {
                position: [x, y],
                tex_coords: [u0, v0],
                color,
            },
            SpriteVertex {
                position: [x + w, y],
                tex_coords: [u1, v0],
                color,
            },
            SpriteVertex {
                position: [x + w, y + h],
                tex_coords: [u1, v1],
                color,
            },
            SpriteVertex {
                position: [x, y + h],
                tex_coords: [u0, v1],
                color,
            },
        ]
    }
}
