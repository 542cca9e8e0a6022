use std::ffi::c_void;
use std::fs::{File, OpenOptions};
use std::os::unix::io::{AsFd, BorrowedFd};
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use gbm::AsRaw;
use khronos_egl as egl;

use crate::config::{match_visual, CONFIG_ATTRIBUTES, CONTEXT_ATTRIBUTES};
use crate::error::{DeviceError, Result};
use texelprobe_common::Size;

type EglInstance = egl::DynamicInstance<egl::EGL1_4>;

/// An opened DRM render node. Owns the file descriptor; it is closed only
/// after every GBM object built on top of it is gone.
pub struct RenderNode(File);

impl AsFd for RenderNode {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.0.as_fd()
    }
}

impl RenderNode {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map(RenderNode)
            .map_err(|source| DeviceError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// EGL implementation strings, reported before the probe results.
#[derive(Debug, Clone)]
pub struct DriverInfo {
    pub vendor: String,
    pub version: String,
    pub client_apis: String,
}

/// An initialized EGL display over a GBM device.
///
/// The display was obtained from the device's raw handle, so the device
/// lives inside this struct and falls only after `eglTerminate`.
struct DisplayHandle {
    egl: Arc<EglInstance>,
    raw: egl::Display,
    gbm: gbm::Device<RenderNode>,
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if let Err(e) = self.egl.terminate(self.raw) {
            log::warn!("could not terminate the EGL display: {e}");
        }
    }
}

struct ContextHandle {
    egl: Arc<EglInstance>,
    display: Arc<DisplayHandle>,
    raw: egl::Context,
}

impl Drop for ContextHandle {
    fn drop(&mut self) {
        if let Err(e) = self.egl.destroy_context(self.display.raw, self.raw) {
            log::warn!("could not destroy the EGL context: {e}");
        }
    }
}

/// A window surface backed by a GBM scanout surface. The GBM surface is
/// destroyed after the EGL surface wrapping it.
struct SurfaceHandle {
    egl: Arc<EglInstance>,
    display: Arc<DisplayHandle>,
    raw: egl::Surface,
    _gbm_surface: gbm::Surface<()>,
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        if let Err(e) = self.egl.destroy_surface(self.display.raw, self.raw) {
            log::warn!("could not destroy the EGL surface: {e}");
        }
    }
}

/// A bound, current GLES rendering context over a GBM device.
///
/// Construction performs the whole bootstrap: open node, create GBM
/// device, initialize the EGL display, select the config whose native
/// visual id matches the surface format, create context and surface, and
/// make both current on the calling thread. Each resource is an owning
/// handle, so a failure at any step still releases everything acquired
/// so far, in reverse acquisition order.
///
/// The context is exclusively owned by the constructing thread; GL calls
/// from any other thread are invalid.
pub struct DeviceContext {
    egl: Arc<EglInstance>,
    // Field order is teardown order: `drop` releases the thread binding,
    // then the surface, context, and display connection fall in
    // declaration order.
    _surface: SurfaceHandle,
    _context: ContextHandle,
    display: Arc<DisplayHandle>,
    info: DriverInfo,
}

impl DeviceContext {
    /// Bootstrap a current rendering context on `path`.
    ///
    /// `format` is both the GBM surface format and the native visual id
    /// the display config must carry. `surface_size` only sizes the GBM
    /// surface backing the window surface; rendering targets an FBO.
    pub fn open(
        path: impl AsRef<Path>,
        format: gbm::Format,
        surface_size: Size<u32>,
    ) -> Result<Self> {
        let node = RenderNode::open(path.as_ref())?;
        log::debug!("opened render node {}", path.as_ref().display());

        let gbm = gbm::Device::new(node).map_err(DeviceError::GbmDevice)?;

        let egl = Arc::new(
            unsafe { EglInstance::load_required() }
                .map_err(|e| DeviceError::EglLoad(e.to_string()))?,
        );

        let raw_display = unsafe { egl.get_display(gbm.as_raw() as *mut c_void) }
            .ok_or(DeviceError::DisplayInit(egl::Error::BadDisplay))?;
        let (major, minor) = egl
            .initialize(raw_display)
            .map_err(DeviceError::DisplayInit)?;
        log::debug!("initialized EGL {major}.{minor}");

        let display = Arc::new(DisplayHandle {
            egl: Arc::clone(&egl),
            raw: raw_display,
            gbm,
        });

        egl.bind_api(egl::OPENGL_ES_API)
            .map_err(DeviceError::DisplayInit)?;

        let config = Self::select_config(&egl, display.raw, format as u32)?;

        let context = ContextHandle {
            egl: Arc::clone(&egl),
            display: Arc::clone(&display),
            raw: egl
                .create_context(display.raw, config, None, &CONTEXT_ATTRIBUTES)
                .map_err(DeviceError::ContextCreation)?,
        };

        let gbm_surface = display
            .gbm
            .create_surface::<()>(
                surface_size.width,
                surface_size.height,
                format,
                gbm::BufferObjectFlags::SCANOUT | gbm::BufferObjectFlags::RENDERING,
            )
            .map_err(DeviceError::GbmSurface)?;

        let surface = SurfaceHandle {
            egl: Arc::clone(&egl),
            display: Arc::clone(&display),
            raw: unsafe {
                egl.create_window_surface(
                    display.raw,
                    config,
                    gbm_surface.as_raw() as egl::NativeWindowType,
                    None,
                )
            }
            .map_err(DeviceError::SurfaceCreation)?,
            _gbm_surface: gbm_surface,
        };

        egl.make_current(
            display.raw,
            Some(surface.raw),
            Some(surface.raw),
            Some(context.raw),
        )
        .map_err(DeviceError::Bind)?;

        let info = DriverInfo {
            vendor: Self::query_string(&egl, display.raw, egl::VENDOR),
            version: Self::query_string(&egl, display.raw, egl::VERSION),
            client_apis: Self::query_string(&egl, display.raw, egl::CLIENT_APIS),
        };

        Ok(DeviceContext {
            egl,
            _surface: surface,
            _context: context,
            display,
            info,
        })
    }

    /// Enumerate configs satisfying the fixed attribute list, then take
    /// the first whose native visual id equals `target_visual`.
    fn select_config(
        egl: &EglInstance,
        display: egl::Display,
        target_visual: u32,
    ) -> Result<egl::Config> {
        let count = egl
            .matching_config_count(display, &CONFIG_ATTRIBUTES)
            .map_err(DeviceError::ConfigQuery)?;

        let mut configs = Vec::with_capacity(count);
        egl.choose_config(display, &CONFIG_ATTRIBUTES, &mut configs)
            .map_err(DeviceError::ConfigQuery)?;
        log::debug!("driver offered {} candidate configs", configs.len());

        let visual_ids = configs.iter().map(|config| {
            egl.get_config_attrib(display, *config, egl::NATIVE_VISUAL_ID)
                .ok()
                .map(|id| id as u32)
        });

        match_visual(visual_ids, target_visual)
            .map(|index| configs[index])
            .ok_or(DeviceError::NoMatchingConfig(target_visual))
    }

    fn query_string(egl: &EglInstance, display: egl::Display, name: egl::Int) -> String {
        egl.query_string(Some(display), name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|_| String::from("unknown"))
    }

    /// Load the GL entry points through `eglGetProcAddress`.
    ///
    /// Only valid while this context is current, which holds from
    /// construction until drop on the constructing thread.
    pub fn load_gl(&self) -> glow::Context {
        unsafe {
            glow::Context::from_loader_function(|symbol| {
                match self.egl.get_proc_address(symbol) {
                    Some(f) => f as *const c_void,
                    None => ptr::null(),
                }
            })
        }
    }

    pub fn driver_info(&self) -> &DriverInfo {
        &self.info
    }
}

impl Drop for DeviceContext {
    fn drop(&mut self) {
        // Release the thread binding before the handles destroy the
        // objects it refers to.
        if let Err(e) = self.egl.make_current(self.display.raw, None, None, None) {
            log::warn!("could not release the current context: {e}");
        }
    }
}
