//! PNG dumps of the pattern and readbacks.
//!
//! The encoder's job is exactly "raw RGBA buffer of given dimensions to
//! a file"; channel conversion to 8 bits is lossy and only for viewing,
//! never for comparison.

use std::path::Path;

use anyhow::Context;

use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::Size;

pub fn dump_png<F: GlTexelFormat>(
    dir: &Path,
    name: &str,
    size: Size<u32>,
    channels: &[F::Channel],
) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create {}", dir.display()))?;

    let bytes: Vec<u8> = channels.iter().map(|c| F::to_byte(*c)).collect();
    let image = image::RgbaImage::from_raw(size.width, size.height, bytes)
        .context("channel buffer does not match the image extent")?;

    let path = dir.join(format!("{name}.png"));
    image
        .save(&path)
        .with_context(|| format!("could not write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
