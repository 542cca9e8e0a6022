//! Render-node bootstrap for the sampling probe.
//!
//! Everything here happens before the first GL call: opening the DRM
//! render node, standing up a GBM device, matching an EGL config to the
//! surface's native format, and binding a GLES 3 context to the calling
//! thread. No display server is involved.

mod config;
mod context;
mod error;

pub use context::{DeviceContext, DriverInfo, RenderNode};
pub use error::{DeviceError, Result};

/// Native surface/visual formats accepted by the probe. Re-exported so
/// callers do not need a direct `gbm` dependency for the one enum.
pub use gbm::Format as NativeFormat;
