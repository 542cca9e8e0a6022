//! The two-pass draw/readback/compare sequence.

use std::sync::Arc;

use glow::HasContext;

use crate::error::{ProbeError, Result};
use crate::framebuffer::OffscreenTarget;
use crate::geometry::QuadGeometry;
use crate::program::ShaderPipeline;
use crate::texture::SourceTexture;
use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::pattern::TestPattern;
use texelprobe_common::{FilterMode, Verdict};

/// Both filter modes, in the order they are probed.
pub const PROBED_MODES: [FilterMode; 2] = [FilterMode::Nearest, FilterMode::Linear];

/// Outcome of one sampling pass. The readback buffer is kept for
/// artifact encoding.
pub struct PassReport<F: GlTexelFormat> {
    pub mode: FilterMode,
    pub verdict: Verdict,
    pub readback: Vec<F::Channel>,
}

/// Owns every GPU object of the probe and runs the passes.
///
/// Because the quad maps source-space corners to clip-space corners
/// exactly and the target has the source's extent, texel centers coincide
/// with destination pixel centers, and a conforming sampler reproduces
/// the source under both filter modes. Linear interpolation between
/// coincident samples degenerates to a copy.
pub struct SampleProbe<F: GlTexelFormat> {
    ctx: Arc<glow::Context>,
    pipeline: ShaderPipeline,
    geometry: QuadGeometry,
    source: SourceTexture<F>,
    target: OffscreenTarget<F>,
    pattern: TestPattern<F>,
}

impl<F: GlTexelFormat> SampleProbe<F> {
    /// Build all GPU state against the current context and upload the
    /// pattern once.
    pub fn new(ctx: Arc<glow::Context>, pattern: TestPattern<F>) -> Result<Self> {
        let pipeline = ShaderPipeline::new(Arc::clone(&ctx))?;
        let geometry = QuadGeometry::new(
            Arc::clone(&ctx),
            pipeline.texture_coord,
            pipeline.clip_coord,
        )?;
        let source = SourceTexture::upload(Arc::clone(&ctx), &pattern)?;
        let target = OffscreenTarget::new(Arc::clone(&ctx), pattern.size())?;

        Ok(SampleProbe {
            ctx,
            pipeline,
            geometry,
            source,
            target,
            pattern,
        })
    }

    /// Run one pass per probed mode, strictly sequentially, reusing the
    /// uploaded texture with its filter state mutated in place.
    pub fn run(&mut self) -> Result<Vec<PassReport<F>>> {
        self.pipeline.bind();
        self.geometry.bind();
        self.target.bind();
        self.source.bind();

        let result = PROBED_MODES
            .iter()
            .map(|mode| self.sample_pass(*mode))
            .collect();

        self.source.unbind();
        self.target.unbind();
        self.geometry.unbind();
        self.pipeline.unbind();

        result
    }

    fn sample_pass(&self, mode: FilterMode) -> Result<PassReport<F>> {
        self.source.set_filter(mode);
        self.target.clear();

        unsafe {
            self.ctx.draw_elements(
                glow::TRIANGLES,
                QuadGeometry::INDEX_COUNT,
                glow::UNSIGNED_SHORT,
                0,
            );
            let code = self.ctx.get_error();
            if code != glow::NO_ERROR {
                return Err(ProbeError::GlCall {
                    stage: "draw",
                    code,
                });
            }
        }

        let readback = self.target.read_back()?;
        let verdict = compare_texels::<F>(self.pattern.channels(), &readback);
        log::debug!("{mode} pass read {} channels: {verdict}", readback.len());

        Ok(PassReport {
            mode,
            verdict,
            readback,
        })
    }
}

/// Element-wise comparison in format-native units. Exact equality, no
/// tolerance: a single mis-sampled channel must flip the verdict.
pub fn compare_texels<F: GlTexelFormat>(
    expected: &[F::Channel],
    actual: &[F::Channel],
) -> Verdict {
    if expected.len() == actual.len() && expected.iter().eq(actual.iter()) {
        Verdict::Equal
    } else {
        Verdict::Different
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texelprobe_common::texel::{RgbaF32, RgbaU8};
    use texelprobe_common::Size;

    #[test]
    fn identical_buffers_compare_equal() {
        let pattern = TestPattern::<RgbaF32>::new(Size::new(3, 3));
        let readback = pattern.channels().to_vec();
        assert_eq!(
            compare_texels::<RgbaF32>(pattern.channels(), &readback),
            Verdict::Equal
        );
    }

    #[test]
    fn any_single_channel_flip_is_detected() {
        let pattern = TestPattern::<RgbaF32>::new(Size::new(3, 3));
        for i in 0..pattern.channels().len() {
            let mut readback = pattern.channels().to_vec();
            readback[i] += 0.5;
            assert_eq!(
                compare_texels::<RgbaF32>(pattern.channels(), &readback),
                Verdict::Different,
                "flipped channel {i} went unnoticed"
            );
        }
    }

    #[test]
    fn byte_comparison_is_exact() {
        let pattern = TestPattern::<RgbaU8>::new(Size::new(3, 3));
        let mut readback = pattern.channels().to_vec();
        assert_eq!(
            compare_texels::<RgbaU8>(pattern.channels(), &readback),
            Verdict::Equal
        );

        // An off-by-one in a single texel is a defect, not noise.
        readback[4 * 4] ^= 1;
        assert_eq!(
            compare_texels::<RgbaU8>(pattern.channels(), &readback),
            Verdict::Different
        );
    }

    #[test]
    fn truncated_readback_compares_different() {
        let pattern = TestPattern::<RgbaU8>::new(Size::new(3, 3));
        let readback = pattern.channels()[..8 * 4].to_vec();
        assert_eq!(
            compare_texels::<RgbaU8>(pattern.channels(), &readback),
            Verdict::Different
        );
    }

    #[test]
    fn nan_readback_never_compares_equal() {
        // A driver writing NaN into a float target must not slip through.
        let pattern = TestPattern::<RgbaF32>::new(Size::new(3, 3));
        let mut readback = pattern.channels().to_vec();
        readback[0] = f32::NAN;
        assert_eq!(
            compare_texels::<RgbaF32>(pattern.channels(), &readback),
            Verdict::Different
        );
    }

    #[test]
    fn probed_modes_run_nearest_first() {
        assert_eq!(PROBED_MODES, [FilterMode::Nearest, FilterMode::Linear]);
    }
}
