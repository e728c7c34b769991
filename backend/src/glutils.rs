use super::error::BackendError;
use super::math::AttribLayout;
use gl::{types::*, *};
use std::ffi::CStr;
use std::path::Path;

pub fn check_gl_err() -> Result<(), BackendError> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    Err(BackendError::Gl(err))
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));

    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::debug!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_buffer_data_element_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ELEMENT_ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// `stride` and `attrib.offset` are counted in floats.
pub fn gl_vertex_attrib_ptr_enab(attrib: &AttribLayout, stride: u32) {
    unsafe {
        gl::VertexAttribPointer(
            attrib.index,
            attrib.size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (attrib.offset * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(attrib.index) };
}

/// Owned 2D texture name, deleted on drop.
#[derive(Debug)]
pub struct Texture {
    id: u32,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn bind(&self) {
        unsafe { gl::BindTexture(TEXTURE_2D, self.id) };
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::debug!("deleting texture {}", self.id);
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

pub const RGBA_MIPMAP_PARAMS: [(GLenum, GLenum, GLenum); 4] = [
    (TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE),
    (TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE),
    (TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR_MIPMAP_LINEAR),
    (TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR),
];

pub fn load_texture_rgba(filename: &Path) -> Result<Texture, BackendError> {
    load_texture_params(filename, &RGBA_MIPMAP_PARAMS)
}

/// Decodes `filename` forced to four channels and uploads it as an RGBA
/// texture with a full mipmap chain.
pub fn load_texture_params(
    filename: &Path,
    params: &[(GLenum, GLenum, GLenum)],
) -> Result<Texture, BackendError> {
    // decode first so a bad file never leaves a texture name behind
    unsafe {
        stb_image::stb_image::stbi_set_flip_vertically_on_load(1);
    }
    let img = match stb_image::image::load_with_depth(filename, 4, false) {
        stb_image::image::LoadResult::ImageF32(_) => {
            return Err(BackendError::Image {
                path: filename.to_path_buf(),
                reason: "32-bit images not supported here".to_string(),
            });
        }
        stb_image::image::LoadResult::ImageU8(img) => img,
        stb_image::image::LoadResult::Error(e) => {
            return Err(BackendError::Image {
                path: filename.to_path_buf(),
                reason: e,
            })
        }
    };

    let mut texture = Texture {
        id: 0,
        width: img.width as u32,
        height: img.height as u32,
    };
    unsafe { gl::GenTextures(1, &mut texture.id) };
    texture.bind();

    for (t, n, p) in params {
        unsafe { gl::TexParameteri(*t, *n, *p as i32) };
    }

    unsafe {
        gl::TexImage2D(
            TEXTURE_2D,
            0,
            RGBA as i32,
            img.width as i32,
            img.height as i32,
            0,
            RGBA,
            UNSIGNED_BYTE,
            img.data.as_ptr().cast(),
        )
    };
    check_gl_err()?;
    unsafe { gl::GenerateMipmap(TEXTURE_2D) };

    log::debug!(
        "texture {} loaded from {:?} ({}x{})",
        texture.id,
        filename,
        texture.width,
        texture.height
    );
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    // decoding fails before any GL call, so no context is needed

    #[test]
    fn missing_image_is_image_error() {
        let err = load_texture_rgba(Path::new("/nonexistent/logo.png")).unwrap_err();
        match err {
            BackendError::Image { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/logo.png"))
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn garbage_image_is_image_error() {
        let path = std::env::temp_dir().join("sdl-starter-not-a-png.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let res = load_texture_rgba(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(res, Err(BackendError::Image { .. })));
    }

    #[test]
    fn rgba_params_use_mipmapped_minification() {
        assert!(RGBA_MIPMAP_PARAMS
            .iter()
            .any(|&(_, n, p)| n == TEXTURE_MIN_FILTER && p == LINEAR_MIPMAP_LINEAR));
        assert!(RGBA_MIPMAP_PARAMS
            .iter()
            .filter(|&&(_, n, _)| n == TEXTURE_WRAP_S || n == TEXTURE_WRAP_T)
            .all(|&(_, _, p)| p == CLAMP_TO_EDGE));
    }
}
