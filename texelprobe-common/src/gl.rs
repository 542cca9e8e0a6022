//! OpenGL enum mappings for the common types.

use crate::texel::{RgbaF32, RgbaU8, TexelFormat};
use crate::FilterMode;

impl From<FilterMode> for u32 {
    fn from(value: FilterMode) -> Self {
        match value {
            FilterMode::Nearest => glow::NEAREST,
            FilterMode::Linear => glow::LINEAR,
        }
    }
}

/// GL upload/readback enums for a texel format.
///
/// Readback uses the same format and type as the upload so the two
/// buffers are directly comparable.
pub trait GlTexelFormat: TexelFormat {
    const INTERNAL_FORMAT: u32;
    const PIXEL_FORMAT: u32 = glow::RGBA;
    const PIXEL_TYPE: u32;
}

impl GlTexelFormat for RgbaF32 {
    const INTERNAL_FORMAT: u32 = glow::RGBA32F;
    const PIXEL_TYPE: u32 = glow::FLOAT;
}

impl GlTexelFormat for RgbaU8 {
    const INTERNAL_FORMAT: u32 = glow::RGBA8;
    const PIXEL_TYPE: u32 = glow::UNSIGNED_BYTE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_modes_map_to_gl() {
        assert_eq!(u32::from(FilterMode::Nearest), glow::NEAREST);
        assert_eq!(u32::from(FilterMode::Linear), glow::LINEAR);
    }
}
