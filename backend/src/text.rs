use super::error::BackendError;
pub use sdl2::pixels::Color;
use sdl2::ttf::Sdl2TtfContext;
use std::path::Path;

/// Where a rendered line would go on screen, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Dimensions of a rasterized line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBitmap {
    pub width: u32,
    pub height: u32,
}

impl TextBitmap {
    /// Destination anchored at the top-left corner, unscaled.
    pub fn dest_rect(&self) -> TextRect {
        TextRect {
            x: 0.0,
            y: 0.0,
            w: self.width as f32,
            h: self.height as f32,
        }
    }
}

/// Owns the SDL_ttf library; TTF_Quit runs when this is dropped.
///
/// Holds an SDL handle after the ttf context so SDL_Quit can never run
/// before TTF_Quit.
pub struct TextRenderer {
    ttf: Sdl2TtfContext,
    _sdl: sdl2::Sdl,
}

impl TextRenderer {
    pub fn new(sdl: &sdl2::Sdl) -> Result<TextRenderer, BackendError> {
        let ttf = sdl2::ttf::init().map_err(|e| BackendError::Font(e.to_string()))?;
        Ok(TextRenderer {
            ttf,
            _sdl: sdl.clone(),
        })
    }

    /// Renders `text` once with a solid (non antialiased) fill. The font and
    /// the surface are released before returning.
    pub fn render_line(
        &self,
        font_path: &Path,
        point_size: u16,
        text: &str,
        color: Color,
    ) -> Result<TextBitmap, BackendError> {
        if text.is_empty() {
            return Err(BackendError::Font("refusing to render empty text".to_string()));
        }

        let font = self
            .ttf
            .load_font(font_path, point_size)
            .map_err(|e| BackendError::Font(format!("{font_path:?}: {e}")))?;

        let surface = font
            .render(text)
            .solid(color)
            .map_err(|e| BackendError::Font(e.to_string()))?;

        let bitmap = TextBitmap {
            width: surface.width(),
            height: surface.height(),
        };
        log::debug!(
            "rendered {:?} at {}pt: {}x{}",
            text,
            point_size,
            bitmap.width,
            bitmap.height
        );
        Ok(bitmap)
    }
}
