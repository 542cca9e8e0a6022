//! Fixed quad geometry driving the 1:1 mapping.

use std::sync::Arc;

use glow::HasContext;

use crate::error::{ProbeError, Result};

// Row-major corner order in both spaces. Corner i of the source grid must
// correspond to corner i of the clip grid; the equality of the mapping is
// what makes texel centers land exactly on destination pixel centers.
#[rustfmt::skip]
pub(crate) static SOURCE_GRID: &[f32; 8] = &[
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
];

#[rustfmt::skip]
pub(crate) static CLIP_GRID: &[f32; 8] = &[
    -1.0, -1.0,
     1.0, -1.0,
    -1.0,  1.0,
     1.0,  1.0,
];

/// Two triangles split along the diagonal joining corners 1 and 2,
/// covering the viewport exactly once.
pub(crate) static QUAD_INDICES: &[u16; 6] = &[0, 1, 2, 3, 1, 2];

/// VAO wiring the two vertex streams to the resolved attribute locations,
/// with the shared index list bound as element state.
pub struct QuadGeometry {
    ctx: Arc<glow::Context>,
    vao: glow::VertexArray,
    source_vbo: glow::Buffer,
    clip_vbo: glow::Buffer,
    index_buffer: glow::Buffer,
}

impl QuadGeometry {
    pub const INDEX_COUNT: i32 = QUAD_INDICES.len() as i32;

    pub fn new(ctx: Arc<glow::Context>, texture_coord: u32, clip_coord: u32) -> Result<Self> {
        unsafe {
            let source_vbo = upload_buffer(
                &ctx,
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(SOURCE_GRID),
            )?;
            let clip_vbo =
                upload_buffer(&ctx, glow::ARRAY_BUFFER, bytemuck::cast_slice(CLIP_GRID))?;

            let vao = ctx.create_vertex_array().map_err(ProbeError::GlError)?;
            ctx.bind_vertex_array(Some(vao));

            // ELEMENT_ARRAY_BUFFER binding is VAO state; keep it bound.
            let index_buffer = upload_buffer(
                &ctx,
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(QUAD_INDICES),
            )?;

            ctx.bind_buffer(glow::ARRAY_BUFFER, Some(source_vbo));
            ctx.vertex_attrib_pointer_f32(texture_coord, 2, glow::FLOAT, false, 0, 0);
            ctx.bind_buffer(glow::ARRAY_BUFFER, Some(clip_vbo));
            ctx.vertex_attrib_pointer_f32(clip_coord, 2, glow::FLOAT, false, 0, 0);
            ctx.bind_buffer(glow::ARRAY_BUFFER, None);

            // Enablement is VAO state; it persists across bind cycles.
            ctx.enable_vertex_attrib_array(texture_coord);
            ctx.enable_vertex_attrib_array(clip_coord);
            ctx.bind_vertex_array(None);

            Ok(QuadGeometry {
                ctx,
                vao,
                source_vbo,
                clip_vbo,
                index_buffer,
            })
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.ctx.bind_vertex_array(Some(self.vao));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.ctx.bind_vertex_array(None);
        }
    }
}

impl Drop for QuadGeometry {
    fn drop(&mut self) {
        unsafe {
            self.ctx.delete_vertex_array(self.vao);
            self.ctx.delete_buffer(self.index_buffer);
            self.ctx.delete_buffer(self.clip_vbo);
            self.ctx.delete_buffer(self.source_vbo);
        }
    }
}

unsafe fn upload_buffer(ctx: &glow::Context, target: u32, data: &[u8]) -> Result<glow::Buffer> {
    let buffer = ctx.create_buffer().map_err(ProbeError::GlError)?;
    ctx.bind_buffer(target, Some(buffer));
    ctx.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_corners_map_to_clip_corners_in_order() {
        // The invariant behind the whole probe: corner i of [0,1]² is
        // corner i of [-1,1]² under x -> 2x - 1, per component.
        for corner in 0..4 {
            for component in 0..2 {
                let src = SOURCE_GRID[corner * 2 + component];
                let clip = CLIP_GRID[corner * 2 + component];
                assert_eq!(clip, 2.0 * src - 1.0, "corner {corner}");
            }
        }
    }

    #[test]
    fn indices_cover_the_quad_along_the_shared_diagonal() {
        assert_eq!(QUAD_INDICES.len(), 6);
        // Both triangles share the edge {1, 2}.
        let (first, second) = QUAD_INDICES.split_at(3);
        for shared in [1, 2] {
            assert!(first.contains(&shared));
            assert!(second.contains(&shared));
        }
        // Each corner is referenced at least once.
        for corner in 0..4u16 {
            assert!(QUAD_INDICES.contains(&corner));
        }
    }
}
