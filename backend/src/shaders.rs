use super::error::BackendError;
use super::system::GlPlatform;
use gl::{types::GLenum, *};
use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};

const INFO_LOG_LEN: i32 = 1024;

/// Vertex/fragment source file names for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderFiles {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderFiles {
    pub fn for_platform(platform: GlPlatform) -> ShaderFiles {
        match platform {
            GlPlatform::Desktop => ShaderFiles {
                vertex: "vertex_default.vs",
                fragment: "fragment_default.fs",
            },
            GlPlatform::Web => ShaderFiles {
                vertex: "vertex_web.vs",
                fragment: "fragment_web.fs",
            },
        }
    }

    pub fn resolve(&self, dir: &Path) -> (PathBuf, PathBuf) {
        (dir.join(self.vertex), dir.join(self.fragment))
    }
}

/// A linked GL program. Deleted on drop.
#[derive(Debug)]
pub struct Shaders {
    program_id: u32,
}

fn read_source(path: &Path) -> Result<String, BackendError> {
    fs::read_to_string(path).map_err(|source| BackendError::Asset {
        path: path.to_path_buf(),
        source,
    })
}

struct StageGuard(u32);

impl Drop for StageGuard {
    fn drop(&mut self) {
        if self.0 != 0 {
            unsafe { gl::DeleteShader(self.0) };
        }
    }
}

impl Shaders {
    pub fn from_files(vertex_file: &Path, fragment_file: &Path) -> Result<Shaders, BackendError> {
        let vertex_code = read_source(vertex_file)?;
        let fragment_code = read_source(fragment_file)?;
        log::debug!("compiling shaders {:?} + {:?}", vertex_file, fragment_file);
        Shaders::from_str(&vertex_code, &fragment_code)
    }

    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders, BackendError> {
        let vertex_shader = StageGuard(Self::create(VERTEX_SHADER, "vertex")?);
        Self::compile(vertex_shader.0, vertex_code, "vertex")?;

        let fragment_shader = StageGuard(Self::create(FRAGMENT_SHADER, "fragment")?);
        Self::compile(fragment_shader.0, fragment_code, "fragment")?;

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader.0) };
        unsafe { gl::AttachShader(shader_program, fragment_shader.0) };
        unsafe { gl::LinkProgram(shader_program) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let mut v: Vec<u8> = vec![0; INFO_LOG_LEN as usize];
            let mut log_len = 0_i32;
            unsafe {
                gl::GetProgramInfoLog(shader_program, INFO_LOG_LEN, &mut log_len, v.as_mut_ptr().cast());
                gl::DeleteProgram(shader_program);
            }
            v.truncate(log_len.max(0) as usize);
            return Err(BackendError::ProgramLink(
                String::from_utf8_lossy(&v).into_owned(),
            ));
        }

        // stage objects go with their guards
        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn create(kind: GLenum, stage: &'static str) -> Result<u32, BackendError> {
        let id = unsafe { gl::CreateShader(kind) };
        if id == 0 {
            return Err(BackendError::ShaderCompile {
                stage,
                log: "glCreateShader failed".to_string(),
            });
        }
        Ok(id)
    }

    fn compile(shader_id: u32, shader_code: &str, stage: &'static str) -> Result<(), BackendError> {
        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as i32),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut v: Vec<u8> = vec![0; INFO_LOG_LEN as usize];
            let mut log_len = 0_i32;
            unsafe {
                gl::GetShaderInfoLog(shader_id, INFO_LOG_LEN, &mut log_len, v.as_mut_ptr().cast());
            }
            v.truncate(log_len.max(0) as usize);

            return Err(BackendError::ShaderCompile {
                stage,
                log: String::from_utf8_lossy(&v).into_owned(),
            });
        }
        Ok(())
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    /// Sets an int uniform if the program has it; silently skips otherwise.
    pub fn try_set_i32(&self, name: &str, value: i32) {
        let Ok(c_name) = CString::new(name) else {
            return;
        };
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };

        if location == -1 {
            log::debug!("program({}): no active uniform '{}'", self.program_id, name);
            return;
        }

        unsafe { gl::Uniform1i(location, value) };
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
