use super::error::BackendError;
use super::glutils;
use super::math::Vec4;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};
use std::path::PathBuf;

/// Outcome of one step of the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Continue,
    Success,
}

/// Which GL flavour the host wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlPlatform {
    Desktop,
    Web,
}

impl GlPlatform {
    pub fn from_platform_name(name: &str) -> GlPlatform {
        if name == "Emscripten" {
            GlPlatform::Web
        } else {
            GlPlatform::Desktop
        }
    }

    pub fn current() -> GlPlatform {
        Self::from_platform_name(sdl2::get_platform())
    }

    /// (major, minor) requested for the core profile context.
    pub fn context_version(self) -> (u8, u8) {
        match self {
            GlPlatform::Desktop => (3, 3),
            GlPlatform::Web => (3, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "SDL Minimal Sample".to_string(),
            width: 400,
            height: 400,
            vsync: true,
        }
    }
}

// Field order is drop order: GL context goes before the window, the window
// before the video subsystem.
pub struct System {
    pub platform: GlPlatform,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub audio_subsystem: sdl2::AudioSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(settings: &WindowSettings) -> Result<System, BackendError> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let audio_subsystem = sdl_context.audio()?;
        let timer = sdl_context.timer()?;

        let platform = GlPlatform::current();
        let (major, minor) = platform.context_version();

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_depth_size(24);
        gl_attr.set_stencil_size(8);

        let window = video_subsystem
            .window(&settings.title, settings.width, settings.height)
            .opengl()
            .resizable()
            .hidden()
            .build()
            .map_err(|e| BackendError::Sdl(format!("Error while building OpenGL window: {e}")))?;

        let gl_ctx = window.gl_create_context()?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        log::debug!(
            "GL context {:?} {}.{} on {:?}",
            gl_attr.context_profile(),
            major,
            minor,
            platform
        );
        glutils::log_opengl_info();

        if settings.vsync {
            if let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        let event_pump = sdl_context.event_pump()?;

        Ok(System {
            platform,
            event_pump,
            timer,
            gl_ctx,
            window,
            video_subsystem,
            audio_subsystem,
            sdl_context,
        })
    }

    /// Shows the window, hidden until everything else is set up, and reports
    /// its logical and backbuffer sizes.
    pub fn show_window(&mut self) {
        self.window.show();
        let (width, height) = self.window.size();
        let (bbwidth, bbheight) = self.window.drawable_size();
        log::info!("Window size: {width}x{height}");
        log::info!("Backbuffer size: {bbwidth}x{bbheight}");
        if width != bbwidth {
            log::info!("This is a highdpi environment.");
        }
    }

    /// Directory holding the executable; assets are resolved against it.
    pub fn base_path() -> Result<PathBuf, BackendError> {
        sdl2::filesystem::base_path()
            .map(PathBuf::from)
            .map_err(|e| BackendError::Sdl(e.to_string()))
    }

    pub fn process_io_events(&mut self) -> AppStatus {
        let mut status = AppStatus::Continue;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => status = AppStatus::Success,
                _ => {}
            }
        }
        status
    }

    /// Milliseconds since SDL was initialized.
    pub fn ticks(&self) -> u32 {
        self.timer.ticks()
    }

    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    pub fn set_viewport(&self, w: u32, h: u32) {
        unsafe { gl::Viewport(0, 0, w as i32, h as i32) };
    }

    pub fn clear_screen(&mut self, color: &Vec4) {
        let [r, g, b, a] = color.as_array();
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }
}
