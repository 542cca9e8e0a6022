#[cfg(feature = "opengl")]
pub mod gl;

pub mod pattern;
pub mod texel;

use std::fmt;

/// Texture minification/magnification policy probed by a sampling pass.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FilterMode {
    Nearest = 0,
    Linear,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Nearest => f.write_str("nearest neighbour"),
            FilterMode::Linear => f.write_str("linear interpolation"),
        }
    }
}

/// Outcome of comparing a readback buffer against the uploaded pattern.
///
/// Under exact 1:1 alignment both filter modes must reproduce the source,
/// so `Different` signals a sampling defect rather than a filtering artifact.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Equal,
    Different,
}

impl Verdict {
    pub fn is_equal(&self) -> bool {
        *self == Verdict::Equal
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Equal => f.write_str("EQUAL"),
            Verdict::Different => f.write_str("DIFFERENT"),
        }
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    /// Number of texels covered by this extent.
    pub fn texels(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
