//! Human-readable result reporting.

use glow::HasContext;

use texelprobe_common::gl::GlTexelFormat;
use texelprobe_common::{FilterMode, Size, Verdict};
use texelprobe_device::DriverInfo;
use texelprobe_runtime_gl::PassReport;

pub fn print_egl_info(info: &DriverInfo) {
    println!("**** EGL information ****");
    println!("vendor: \"{}\"", info.vendor);
    println!("version: \"{}\"", info.version);
    println!("client APIs: \"{}\"", info.client_apis);
}

pub fn print_gl_info(gl: &glow::Context) {
    println!("**** OpenGL information ****");
    unsafe {
        println!("vendor: \"{}\"", gl.get_parameter_string(glow::VENDOR));
        println!("version: \"{}\"", gl.get_parameter_string(glow::VERSION));
        println!(
            "shading language version: \"{}\"",
            gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
        );
        println!("renderer: \"{}\"", gl.get_parameter_string(glow::RENDERER));
    }
}

pub fn print_results<F: GlTexelFormat>(size: Size<u32>, reports: &[PassReport<F>]) {
    println!();
    println!(
        "One-to-one mapping of a {}x{} {} texture using...",
        size.width,
        size.height,
        F::NAME
    );
    for pass in reports {
        println!("{}", result_line(pass.mode, pass.verdict));
    }
}

/// File-name label for a pass's artifact dump.
pub fn mode_label(mode: FilterMode) -> &'static str {
    match mode {
        FilterMode::Nearest => "Nearest",
        FilterMode::Linear => "Linear",
    }
}

fn result_line(mode: FilterMode, verdict: Verdict) -> String {
    // Ellipses align the two mode names under the header line.
    let prefix = match mode {
        FilterMode::Nearest => "......",
        FilterMode::Linear => "...",
    };
    format!("{prefix}{mode}. Result is {verdict}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_lines_name_the_mode_and_verdict() {
        assert_eq!(
            result_line(FilterMode::Nearest, Verdict::Equal),
            "......nearest neighbour. Result is EQUAL"
        );
        assert_eq!(
            result_line(FilterMode::Linear, Verdict::Different),
            "...linear interpolation. Result is DIFFERENT"
        );
    }

    #[test]
    fn mode_labels_are_file_name_safe() {
        assert_eq!(mode_label(FilterMode::Nearest), "Nearest");
        assert_eq!(mode_label(FilterMode::Linear), "Linear");
    }
}
