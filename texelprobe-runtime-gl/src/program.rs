//! The pass-through sampling program.

use std::sync::Arc;

use glow::HasContext;

use crate::error::{ProbeError, Result};

/// Vertex stage: forwards the clip-space corner and hands the source-space
/// coordinate to the rasterizer untouched.
const VERTEX_SRC: &str = "\
#version 310 es

in vec2 TextureCoord;
in vec2 ClipSpaceCoord;

out vec2 UV;

void main()
{
    gl_Position = vec4(ClipSpaceCoord, 0.0, 1.0);
    UV = TextureCoord;
}
";

/// Fragment stage: one sample, written unmodified. The sampler uniform is
/// left at its default binding of texture unit 0.
const FRAGMENT_SRC: &str = "\
#version 310 es
precision highp float;

in vec2 UV;

uniform sampler2D Texture;

out vec4 fragColor;

void main()
{
    fragColor = texture(Texture, UV);
}
";

pub const TEXTURE_COORD_ATTRIBUTE: &str = "TextureCoord";
pub const CLIP_COORD_ATTRIBUTE: &str = "ClipSpaceCoord";

/// A linked vertex+fragment program with its two resolved attribute
/// locations.
pub struct ShaderPipeline {
    ctx: Arc<glow::Context>,
    program: glow::Program,
    pub texture_coord: u32,
    pub clip_coord: u32,
}

impl ShaderPipeline {
    pub fn new(ctx: Arc<glow::Context>) -> Result<Self> {
        let vertex = compile_stage(&ctx, glow::VERTEX_SHADER, VERTEX_SRC)?;
        let fragment = match compile_stage(&ctx, glow::FRAGMENT_SHADER, FRAGMENT_SRC) {
            Ok(fragment) => fragment,
            Err(e) => {
                unsafe { ctx.delete_shader(vertex) };
                return Err(e);
            }
        };

        let program = link_program(&ctx, &[vertex, fragment])?;

        let texture_coord = resolve_attribute(&ctx, program, TEXTURE_COORD_ATTRIBUTE)?;
        let clip_coord = resolve_attribute(&ctx, program, CLIP_COORD_ATTRIBUTE)?;

        Ok(ShaderPipeline {
            ctx,
            program,
            texture_coord,
            clip_coord,
        })
    }

    pub fn bind(&self) {
        unsafe { self.ctx.use_program(Some(self.program)) };
    }

    pub fn unbind(&self) {
        unsafe { self.ctx.use_program(None) };
    }
}

impl Drop for ShaderPipeline {
    fn drop(&mut self) {
        unsafe { self.ctx.delete_program(self.program) };
    }
}

/// Compile one stage, surfacing the compiler diagnostic on failure. The
/// shader object is released before the error is returned, so a failed
/// compile never leaks a handle.
pub fn compile_stage(ctx: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = ctx.create_shader(stage).map_err(ProbeError::GlError)?;
        ctx.shader_source(shader, source);
        ctx.compile_shader(shader);

        if !ctx.get_shader_compile_status(shader) {
            let log = ctx.get_shader_info_log(shader);
            ctx.delete_shader(shader);
            return Err(ProbeError::ShaderCompile { log });
        }
        Ok(shader)
    }
}

/// Attach, link, then detach and delete every stage regardless of the
/// link outcome.
pub fn link_program(ctx: &glow::Context, shaders: &[glow::Shader]) -> Result<glow::Program> {
    unsafe {
        let program = ctx.create_program().map_err(ProbeError::GlError)?;
        for shader in shaders {
            ctx.attach_shader(program, *shader);
        }

        ctx.link_program(program);
        let linked = ctx.get_program_link_status(program);
        let log = if linked {
            String::new()
        } else {
            ctx.get_program_info_log(program)
        };

        for shader in shaders {
            ctx.detach_shader(program, *shader);
            ctx.delete_shader(*shader);
        }

        if !linked {
            ctx.delete_program(program);
            return Err(ProbeError::Link { log });
        }
        Ok(program)
    }
}

fn resolve_attribute(ctx: &glow::Context, program: glow::Program, name: &str) -> Result<u32> {
    unsafe { ctx.get_attrib_location(program, name) }
        .ok_or_else(|| ProbeError::AttributeNotFound(name.to_owned()))
}
