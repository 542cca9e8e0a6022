//! GL-side resources and the render-and-verify sequence.
//!
//! Everything in this crate assumes a GLES 3.1 context is current on the
//! calling thread; constructing any object before `MakeCurrent` succeeded
//! is a caller error and is why the device crate hands out the
//! `glow::Context` only after binding.

mod error;
mod framebuffer;
mod geometry;
mod probe;
mod program;
mod texture;

pub use error::{ProbeError, Result};
pub use framebuffer::OffscreenTarget;
pub use geometry::QuadGeometry;
pub use probe::{compare_texels, PassReport, SampleProbe, PROBED_MODES};
pub use program::{compile_stage, link_program, ShaderPipeline};
pub use texture::SourceTexture;
