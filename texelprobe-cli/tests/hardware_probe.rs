//! On-target end-to-end probe run.
//!
//! These tests require:
//! - a DRM render node (default: /dev/dri/renderD128, override with
//!   TEXELPROBE_NODE)
//! - a GLES 3.1 driver reachable through libEGL.so.1
//! - render permission on the node (usually the `render` group)
//!
//! Run with: cargo test --test hardware_probe -- --ignored

#![cfg(target_os = "linux")]

use std::sync::Arc;

use texelprobe_common::pattern::TestPattern;
use texelprobe_common::texel::RgbaF32;
use texelprobe_common::Size;
use texelprobe_device::{DeviceContext, NativeFormat};
use texelprobe_runtime_gl::{compile_stage, ProbeError, SampleProbe};

fn render_node() -> String {
    std::env::var("TEXELPROBE_NODE").unwrap_or_else(|_| "/dev/dri/renderD128".into())
}

#[test]
#[ignore = "requires a DRM render node with a GLES 3.1 driver"]
fn one_to_one_sampling_reproduces_the_source() {
    let size = Size::new(3, 3);
    let device = DeviceContext::open(render_node(), NativeFormat::Xrgb8888, size)
        .expect("device bootstrap failed");
    let gl = Arc::new(device.load_gl());

    let mut probe = SampleProbe::<RgbaF32>::new(Arc::clone(&gl), TestPattern::new(size))
        .expect("probe setup failed");
    let reports = probe.run().expect("probe run failed");

    for pass in &reports {
        assert!(
            pass.verdict.is_equal(),
            "{} pass diverged from the source pattern",
            pass.mode
        );
    }
}

#[test]
#[ignore = "requires a DRM render node with a GLES 3.1 driver"]
fn repeated_passes_read_back_identically() {
    let size = Size::new(3, 3);
    let device = DeviceContext::open(render_node(), NativeFormat::Xrgb8888, size)
        .expect("device bootstrap failed");
    let gl = Arc::new(device.load_gl());

    let mut probe = SampleProbe::<RgbaF32>::new(Arc::clone(&gl), TestPattern::new(size))
        .expect("probe setup failed");

    let first = probe.run().expect("first run failed");
    let second = probe.run().expect("second run failed");

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.mode, b.mode);
        assert_eq!(a.readback, b.readback, "{} pass is not idempotent", a.mode);
    }
}

#[test]
#[ignore = "requires a DRM render node with a GLES 3.1 driver"]
fn invalid_shader_source_fails_with_a_diagnostic() {
    let size = Size::new(3, 3);
    let device = DeviceContext::open(render_node(), NativeFormat::Xrgb8888, size)
        .expect("device bootstrap failed");
    let gl = device.load_gl();

    let result = compile_stage(&gl, glow::FRAGMENT_SHADER, "#version 310 es\nnot a shader");
    match result {
        Err(ProbeError::ShaderCompile { log }) => {
            assert!(!log.is_empty(), "compiler produced no diagnostic")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("garbage source produced a usable shader handle"),
    }
}
