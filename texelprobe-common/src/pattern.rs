//! The asymmetric source pattern drawn through the sampler.

use crate::texel::TexelFormat;
use crate::Size;

/// A W×H RGBA grid holding the probe's source content: every texel is the
/// border color except the single center texel.
///
/// The asymmetry makes any blur, shift, or half-texel offset detectable
/// through exact comparison; a symmetric pattern could survive a mirrored
/// or transposed sampling path unnoticed.
pub struct TestPattern<F: TexelFormat> {
    size: Size<u32>,
    channels: Vec<F::Channel>,
}

impl<F: TexelFormat> TestPattern<F> {
    /// Generate the pattern at the given extent. The center texel sits at
    /// `(width / 2, height / 2)`; odd extents place it symmetrically.
    pub fn new(size: Size<u32>) -> Self {
        let center = (size.width / 2, size.height / 2);
        let mut channels = Vec::with_capacity(size.texels() * 4);
        for y in 0..size.height {
            for x in 0..size.width {
                if (x, y) == center {
                    channels.extend_from_slice(&F::CENTER);
                } else {
                    channels.extend_from_slice(&F::BORDER);
                }
            }
        }

        TestPattern { size, channels }
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// The pattern content as a flat channel slice, row-major, RGBA.
    pub fn channels(&self) -> &[F::Channel] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texel::{RgbaF32, RgbaU8};

    fn texel_at<F: TexelFormat>(pattern: &TestPattern<F>, x: u32, y: u32) -> &[F::Channel] {
        let idx = ((y * pattern.size().width + x) * 4) as usize;
        &pattern.channels()[idx..idx + 4]
    }

    #[test]
    fn three_by_three_has_single_center_texel() {
        let pattern = TestPattern::<RgbaF32>::new(Size::new(3, 3));
        assert_eq!(pattern.channels().len(), 9 * 4);

        for y in 0..3 {
            for x in 0..3 {
                let expected: &[f32] = if (x, y) == (1, 1) {
                    &RgbaF32::CENTER
                } else {
                    &RgbaF32::BORDER
                };
                assert_eq!(texel_at(&pattern, x, y), expected, "texel ({x}, {y})");
            }
        }
    }

    #[test]
    fn larger_odd_extent_centers_the_marker() {
        let pattern = TestPattern::<RgbaU8>::new(Size::new(5, 7));
        assert_eq!(texel_at(&pattern, 2, 3), &RgbaU8::CENTER);

        let center_count = (0..7)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| texel_at(&pattern, x, y) == &RgbaU8::CENTER)
            .count();
        assert_eq!(center_count, 1);
    }

    #[test]
    fn byte_pattern_matches_float_layout() {
        let float = TestPattern::<RgbaF32>::new(Size::new(3, 3));
        let byte = TestPattern::<RgbaU8>::new(Size::new(3, 3));
        assert_eq!(float.channels().len(), byte.channels().len());
    }
}
