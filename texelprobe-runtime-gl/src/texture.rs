//! The source texture under test.

use std::marker::PhantomData;
use std::sync::Arc;

use glow::HasContext;

use crate::error::{ProbeError, Result};
use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::pattern::TestPattern;
use texelprobe_common::{FilterMode, Size};

/// GPU copy of the test pattern. Content is uploaded once; only the
/// filter state is mutated between passes.
pub struct SourceTexture<F: GlTexelFormat> {
    ctx: Arc<glow::Context>,
    handle: glow::Texture,
    size: Size<u32>,
    _format: PhantomData<F>,
}

impl<F: GlTexelFormat> SourceTexture<F> {
    pub fn upload(ctx: Arc<glow::Context>, pattern: &TestPattern<F>) -> Result<Self> {
        let size = pattern.size();
        let handle = unsafe {
            let handle = ctx.create_texture().map_err(ProbeError::GlError)?;

            ctx.bind_texture(glow::TEXTURE_2D, Some(handle));
            ctx.tex_storage_2d(
                glow::TEXTURE_2D,
                1,
                F::INTERNAL_FORMAT,
                size.width as i32,
                size.height as i32,
            );

            ctx.pixel_store_i32(glow::UNPACK_ROW_LENGTH, 0);
            ctx.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            ctx.bind_buffer(glow::PIXEL_UNPACK_BUFFER, None);

            ctx.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                size.width as i32,
                size.height as i32,
                F::PIXEL_FORMAT,
                F::PIXEL_TYPE,
                glow::PixelUnpackData::Slice(Some(bytemuck::cast_slice(pattern.channels()))),
            );

            ctx.bind_texture(glow::TEXTURE_2D, None);
            handle
        };

        Ok(SourceTexture {
            ctx,
            handle,
            size,
            _format: PhantomData,
        })
    }

    /// Set both minification and magnification filter in place.
    pub fn set_filter(&self, filter: FilterMode) {
        let gl_filter = u32::from(filter) as i32;
        unsafe {
            self.ctx.bind_texture(glow::TEXTURE_2D, Some(self.handle));
            self.ctx
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, gl_filter);
            self.ctx
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, gl_filter);
        }
    }

    /// Bind to texture unit 0, where the sampler uniform points.
    pub fn bind(&self) {
        unsafe {
            self.ctx.active_texture(glow::TEXTURE0);
            self.ctx.bind_texture(glow::TEXTURE_2D, Some(self.handle));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.ctx.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }
}

impl<F: GlTexelFormat> Drop for SourceTexture<F> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.delete_texture(self.handle);
        }
    }
}
