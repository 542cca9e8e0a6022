//! Texel channel formats supported by the probe.
//!
//! The probe pipeline is identical for floating-point and byte textures
//! except for the channel type and the GL format enums, so both variants
//! are expressed through one `TexelFormat` implementation each rather
//! than duplicated pipelines.

use std::fmt::Debug;

/// A four-channel RGBA texel layout with a fixed channel representation.
///
/// `BORDER` and `CENTER` are the two pattern colors in format-native
/// units; comparisons between upload and readback happen in these units
/// with no tolerance.
pub trait TexelFormat: 'static {
    type Channel: bytemuck::Pod + PartialEq + Debug + Send + Sync;

    const NAME: &'static str;
    const BORDER: [Self::Channel; 4];
    const CENTER: [Self::Channel; 4];

    /// Lossy conversion for artifact encoding only; never used in
    /// comparisons.
    fn to_byte(channel: Self::Channel) -> u8;
}

/// 32-bit floating point RGBA.
pub struct RgbaF32;

/// 8-bit normalized RGBA.
pub struct RgbaU8;

impl TexelFormat for RgbaF32 {
    type Channel = f32;

    const NAME: &'static str = "rgba32f";
    // Deliberately outside [0, 1]: an unwanted normalization or clamp on
    // the sampling path shows up as a mismatch.
    const BORDER: [f32; 4] = [0.0, 0.0, 0.0, -1.0];
    const CENTER: [f32; 4] = [-1.0, -1.0, -1.0, -1.0];

    fn to_byte(channel: f32) -> u8 {
        (channel.clamp(0.0, 1.0) * 255.0) as u8
    }
}

impl TexelFormat for RgbaU8 {
    type Channel = u8;

    const NAME: &'static str = "rgba8";
    const BORDER: [u8; 4] = [0, 0, 0, 255];
    const CENTER: [u8; 4] = [255, 255, 255, 255];

    fn to_byte(channel: u8) -> u8 {
        channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_channels_encode_to_bytes_clamped() {
        assert_eq!(RgbaF32::to_byte(-1.0), 0);
        assert_eq!(RgbaF32::to_byte(0.0), 0);
        assert_eq!(RgbaF32::to_byte(1.0), 255);
        assert_eq!(RgbaF32::to_byte(2.0), 255);
    }

    #[test]
    fn byte_channels_pass_through() {
        assert_eq!(RgbaU8::to_byte(0), 0);
        assert_eq!(RgbaU8::to_byte(137), 137);
        assert_eq!(RgbaU8::to_byte(255), 255);
    }

    #[test]
    fn pattern_colors_differ_per_format() {
        assert_ne!(RgbaF32::BORDER, RgbaF32::CENTER);
        assert_ne!(RgbaU8::BORDER, RgbaU8::CENTER);
    }
}
