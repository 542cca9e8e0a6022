//! The offscreen render target.

use std::marker::PhantomData;
use std::sync::Arc;

use glow::HasContext;

use crate::error::{ProbeError, Result};
use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::Size;

/// A framebuffer whose sole color attachment is a texture of the same
/// extent and format as the source texture, so readback values compare
/// directly against upload values.
pub struct OffscreenTarget<F: GlTexelFormat> {
    ctx: Arc<glow::Context>,
    framebuffer: glow::Framebuffer,
    image: glow::Texture,
    size: Size<u32>,
    _format: PhantomData<F>,
}

impl<F: GlTexelFormat> OffscreenTarget<F> {
    pub fn new(ctx: Arc<glow::Context>, size: Size<u32>) -> Result<Self> {
        unsafe {
            let image = ctx.create_texture().map_err(ProbeError::GlError)?;
            ctx.bind_texture(glow::TEXTURE_2D, Some(image));
            ctx.tex_storage_2d(
                glow::TEXTURE_2D,
                1,
                F::INTERNAL_FORMAT,
                size.width as i32,
                size.height as i32,
            );
            ctx.bind_texture(glow::TEXTURE_2D, None);

            let framebuffer = ctx.create_framebuffer().map_err(ProbeError::GlError)?;
            ctx.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            ctx.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(image),
                0,
            );

            let status = ctx.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                ctx.bind_framebuffer(glow::FRAMEBUFFER, None);
                ctx.delete_framebuffer(framebuffer);
                ctx.delete_texture(image);
                return Err(ProbeError::FramebufferInit(status));
            }
            ctx.bind_framebuffer(glow::FRAMEBUFFER, None);

            Ok(OffscreenTarget {
                ctx,
                framebuffer,
                image,
                size,
                _format: PhantomData,
            })
        }
    }

    /// Bind as the active render target and set the viewport to the full
    /// attachment extent.
    pub fn bind(&self) {
        unsafe {
            self.ctx
                .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
            self.ctx
                .viewport(0, 0, self.size.width as i32, self.size.height as i32);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.ctx.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    pub fn clear(&self) {
        unsafe {
            self.ctx.clear_color(0.0, 0.0, 0.0, 0.0);
            self.ctx.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// Blocking readback of the color attachment in the source format.
    ///
    /// `glReadPixels` waits for all pending draws touching this
    /// framebuffer, so this is the sole synchronization point of a pass.
    pub fn read_back(&self) -> Result<Vec<F::Channel>> {
        let mut texels =
            vec![<F::Channel as bytemuck::Zeroable>::zeroed(); self.size.texels() * 4];
        unsafe {
            self.ctx
                .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
            self.ctx.read_pixels(
                0,
                0,
                self.size.width as i32,
                self.size.height as i32,
                F::PIXEL_FORMAT,
                F::PIXEL_TYPE,
                glow::PixelPackData::Slice(Some(bytemuck::cast_slice_mut(&mut texels))),
            );

            let code = self.ctx.get_error();
            if code != glow::NO_ERROR {
                return Err(ProbeError::GlCall {
                    stage: "readback",
                    code,
                });
            }
        }
        Ok(texels)
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }
}

impl<F: GlTexelFormat> Drop for OffscreenTarget<F> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.delete_framebuffer(self.framebuffer);
            self.ctx.delete_texture(self.image);
        }
    }
}
