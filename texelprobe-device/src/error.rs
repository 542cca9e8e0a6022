use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("could not open render node `{}`", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not create GBM device over the render node")]
    GbmDevice(#[source] std::io::Error),
    #[error("libEGL could not be loaded: {0}")]
    EglLoad(String),
    #[error("EGL display initialization failed")]
    DisplayInit(#[source] khronos_egl::Error),
    #[error("EGL config enumeration failed")]
    ConfigQuery(#[source] khronos_egl::Error),
    #[error("no EGL config matches native visual id {0:#010x}")]
    NoMatchingConfig(u32),
    #[error("EGL context creation failed")]
    ContextCreation(#[source] khronos_egl::Error),
    #[error("GBM surface creation failed")]
    GbmSurface(#[source] std::io::Error),
    #[error("EGL window surface creation failed")]
    SurfaceCreation(#[source] khronos_egl::Error),
    #[error("could not make the context current on this thread")]
    Bind(#[source] khronos_egl::Error),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
