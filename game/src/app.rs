use crate::config::AppConfig;
use anyhow::Context;
use backend::audio::AudioPlayer;
use backend::glutils::{self, Texture};
use backend::math::Vec4;
use backend::mesh::Mesh;
use backend::shaders::{ShaderFiles, Shaders};
use backend::system::{AppStatus, System};
use backend::text::{Color, TextRect, TextRenderer};
use std::path::Path;

const TEXTURE_UNIT: i32 = 0;

/// Background color for a point in time, in seconds since start.
///
/// The green and blue waves are handed to the clear swapped, so blue follows
/// the slow wave.
pub fn clear_color(seconds: f32) -> Vec4 {
    let red = (seconds.sin() + 1.0) / 2.0;
    let green = ((seconds / 2.0).sin() + 1.0) / 2.0;
    let blue = (seconds.sin() * 2.0 + 1.0) / 2.0;
    Vec4::new(
        red.clamp(0.0, 1.0),
        blue.clamp(0.0, 1.0),
        green.clamp(0.0, 1.0),
        1.0,
    )
}

// Fields drop top to bottom: GPU objects, then the GL context and window,
// then audio, then SDL_ttf. The text renderer holds the last SDL handle, so
// SDL_Quit runs right after TTF_Quit.
pub struct App {
    texture: Texture,
    mesh: Mesh,
    shaders: Shaders,
    system: System,
    audio: AudioPlayer,
    _text: TextRenderer,
    /// Where the greeting would be drawn; computed at startup only.
    pub message_dest: TextRect,
}

impl App {
    pub fn new(base: &Path, config: &AppConfig) -> anyhow::Result<App> {
        let mut system =
            System::new(&config.window_settings()).context("creating window and GL context")?;
        let text = TextRenderer::new(&system.sdl_context).context("initializing SDL_ttf")?;

        let shader_dir = base.join(&config.assets.shader_dir);
        let (vs, fs) = ShaderFiles::for_platform(system.platform).resolve(&shader_dir);
        let shaders = Shaders::from_files(&vs, &fs)?;
        shaders.use_program();
        shaders.try_set_i32("u_texture", TEXTURE_UNIT);

        let mesh = Mesh::quad().context("uploading quad")?;

        let bitmap = text.render_line(
            &base.join(&config.assets.font),
            config.text.point_size,
            &config.text.message,
            Color::RGB(255, 255, 255),
        )?;
        let message_dest = bitmap.dest_rect();
        log::debug!("message destination {:?}", message_dest);

        let texture = glutils::load_texture_rgba(&base.join(&config.assets.image))?;

        let audio = AudioPlayer::open(
            &system.audio_subsystem,
            &base.join(&config.assets.music),
            config.audio_settings(),
        )?;

        system.show_window();
        log::info!("Application started successfully!");

        Ok(App {
            texture,
            mesh,
            shaders,
            system,
            audio,
            _text: text,
            message_dest,
        })
    }

    /// One frame: events, clear, draw the quad, present.
    pub fn iterate(&mut self) -> AppStatus {
        let status = self.system.process_io_events();

        let (w, h) = self.system.drawable_size();
        self.system.set_viewport(w, h);

        let seconds = self.system.ticks() as f32 / 1000.0;
        self.system.clear_screen(&clear_color(seconds));

        self.shaders.use_program();
        self.texture.bind();
        self.mesh.draw();

        self.system.draw_to_screen();
        status
    }

    pub fn run(&mut self) -> AppStatus {
        loop {
            match self.iterate() {
                AppStatus::Continue => continue,
                status => {
                    log::debug!(
                        "leaving frame loop: {:?} (music playing: {})",
                        status,
                        self.audio.is_playing()
                    );
                    return status;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn clear_color_at_start() {
        let c = clear_color(0.0);
        assert!(close(c.x, 0.5));
        assert!(close(c.y, 0.5));
        assert!(close(c.z, 0.5));
        assert_eq!(c.w, 1.0);
    }

    #[test]
    fn clear_color_quarter_turn() {
        // sin = 1: red 1, fast blue wave 1.5 clamped, slow wave sin(pi/4)
        let c = clear_color(PI / 2.0);
        assert!(close(c.x, 1.0));
        assert!(close(c.y, 1.0));
        assert!(close(c.z, ((PI / 4.0).sin() + 1.0) / 2.0));
    }

    #[test]
    fn clear_color_never_leaves_unit_range() {
        for i in 0..2000 {
            let c = clear_color(i as f32 * 0.01);
            for ch in c.as_array() {
                assert!((0.0..=1.0).contains(&ch), "channel {ch} at step {i}");
            }
        }
    }

    #[test]
    fn fast_blue_wave_bottoms_out() {
        // sin = -1 gives (-2 + 1)/2 = -0.5 before clamping
        let c = clear_color(3.0 * PI / 2.0);
        assert!(close(c.x, 0.0));
        assert_eq!(c.y, 0.0);
    }
}
