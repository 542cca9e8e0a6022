use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use glow::HasContext;

use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::pattern::TestPattern;
use texelprobe_common::texel::{RgbaF32, RgbaU8};
use texelprobe_common::Size;
use texelprobe_device::{DeviceContext, NativeFormat};
use texelprobe_runtime_gl::SampleProbe;

mod artifacts;
mod report;

/// Render a small asymmetric texture through a 1:1 vertex-to-pixel
/// mapping and verify that nearest and linear sampling reproduce it
/// exactly.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The DRM render node to probe.
    #[arg(short, long, default_value = "/dev/dri/by-path/platform-gpu-card")]
    device: PathBuf,

    /// Width and height of the probe texture.
    #[arg(short, long, default_value_t = 3)]
    size: u32,

    /// Texel format of the source texture and render target.
    #[arg(value_enum, short, long, default_value = "float")]
    format: TexelKind,

    /// Directory to write PNG dumps of the source pattern and of each
    /// pass's readback.
    #[arg(long)]
    dump_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TexelKind {
    /// 32-bit floating point RGBA.
    #[clap(name = "float")]
    Float,
    /// 8-bit normalized RGBA.
    #[clap(name = "byte")]
    Byte,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    // Exit status: 0 when every pass reproduced the source, 1 when any
    // pass diverged, 2 when the probe could not be set up at all.
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<bool> {
    match args.format {
        TexelKind::Float => probe_device::<RgbaF32>(args),
        TexelKind::Byte => probe_device::<RgbaU8>(args),
    }
}

fn probe_device<F: GlTexelFormat>(args: &Args) -> anyhow::Result<bool> {
    let size = Size::new(args.size, args.size);

    let device = DeviceContext::open(&args.device, NativeFormat::Xrgb8888, size)?;
    report::print_egl_info(device.driver_info());

    let mut gl = device.load_gl();
    install_debug_hook(&mut gl);
    report::print_gl_info(&gl);
    let gl = Arc::new(gl);

    let pattern = TestPattern::<F>::new(size);
    if let Some(dir) = &args.dump_dir {
        artifacts::dump_png::<F>(dir, "SourceTexture", size, pattern.channels())?;
    }

    let mut probe = SampleProbe::new(Arc::clone(&gl), pattern)?;
    let reports = probe.run()?;

    report::print_results::<F>(size, &reports);
    if let Some(dir) = &args.dump_dir {
        for pass in &reports {
            let name = format!("TargetTexture-{}", report::mode_label(pass.mode));
            artifacts::dump_png::<F>(dir, &name, size, &pass.readback)?;
        }
    }

    Ok(reports.iter().all(|pass| pass.verdict.is_equal()))
}

/// Route driver debug messages through the logger when KHR_debug is
/// available.
fn install_debug_hook(gl: &mut glow::Context) {
    if !gl.supports_debug() {
        log::debug!("driver exposes no debug output");
        return;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|_source, msg_type, _id, severity, message| {
            log::debug!("[gl] type {msg_type:#x} severity {severity:#x}: {message}");
        });
        gl.debug_message_control(glow::DONT_CARE, glow::DONT_CARE, glow::DONT_CARE, &[], true);
    }
}
