use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("shader compilation failed: {log}")]
    ShaderCompile { log: String },
    #[error("program link failed: {log}")]
    Link { log: String },
    #[error("attribute `{0}` not present in the linked program")]
    AttributeNotFound(String),
    #[error("fbo initialization error {0:#06x}")]
    FramebufferInit(u32),
    #[error("gl object allocation failed: {0}")]
    GlError(String),
    #[error("gl reported {code:#06x} during {stage}")]
    GlCall { stage: &'static str, code: u32 },
}

pub type Result<T> = std::result::Result<T, ProbeError>;
