use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Error string reported by SDL or one of its satellite libraries.
    #[error("sdl: {0}")]
    Sdl(String),

    #[error("error reading {path:?}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program link error: {0}")]
    ProgramLink(String),

    /// Raw `glGetError` code.
    #[error("gl error: 0x{0:04x}")]
    Gl(u32),

    #[error("loading image {path:?} error: {reason}")]
    Image { path: PathBuf, reason: String },

    #[error("font error: {0}")]
    Font(String),

    #[error("audio error: {0}")]
    Audio(String),
}

impl From<String> for BackendError {
    fn from(e: String) -> Self {
        BackendError::Sdl(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_compile_message_names_stage() {
        let e = BackendError::ShaderCompile {
            stage: "vertex",
            log: "0:1: syntax error".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "vertex shader compilation error: 0:1: syntax error"
        );
    }

    #[test]
    fn gl_error_is_hex() {
        assert_eq!(BackendError::Gl(0x0502).to_string(), "gl error: 0x0502");
    }

    #[test]
    fn sdl_strings_convert() {
        let e: BackendError = "No available video device".to_string().into();
        assert!(matches!(e, BackendError::Sdl(ref s) if s == "No available video device"));
    }

    #[test]
    fn asset_error_keeps_io_source() {
        use std::error::Error as _;
        let e = BackendError::Asset {
            path: PathBuf::from("vertex_default.vs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("vertex_default.vs"));
    }
}
