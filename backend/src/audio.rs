use super::error::BackendError;
use sdl2::mixer::{self, InitFlag, Music, Sdl2MixerContext};
use std::path::Path;

pub const FREQUENCY: i32 = 44_100;
pub const CHANNELS: i32 = 2;
pub const CHUNK_SIZE: i32 = 1024;

#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    /// 0..=128, out-of-range values are clamped.
    pub volume: i32,
    pub fade_out_ms: i32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        AudioSettings {
            volume: mixer::MAX_VOLUME,
            fade_out_ms: 1000,
        }
    }
}

pub fn clamp_volume(volume: i32) -> i32 {
    volume.clamp(0, mixer::MAX_VOLUME)
}

/// Background music on the default playback device.
///
/// Dropping the player fades the music out, waits for the fade to finish,
/// then closes the device and shuts the mixer down.
pub struct AudioPlayer {
    music: Option<Music<'static>>,
    fade_out_ms: i32,
    _mixer: Sdl2MixerContext,
    _audio: sdl2::AudioSubsystem,
}

impl AudioPlayer {
    pub fn open(
        audio: &sdl2::AudioSubsystem,
        music_file: &Path,
        settings: AudioSettings,
    ) -> Result<AudioPlayer, BackendError> {
        mixer::open_audio(FREQUENCY, mixer::DEFAULT_FORMAT, CHANNELS, CHUNK_SIZE)
            .map_err(BackendError::Audio)?;

        let mixer_ctx = match mixer::init(InitFlag::OGG) {
            Ok(ctx) => ctx,
            Err(e) => {
                mixer::close_audio();
                return Err(BackendError::Audio(e));
            }
        };

        let music = match Music::from_file(music_file) {
            Ok(m) => m,
            Err(e) => {
                mixer::close_audio();
                return Err(BackendError::Audio(format!("{music_file:?}: {e}")));
            }
        };

        let player = AudioPlayer {
            music: Some(music),
            fade_out_ms: settings.fade_out_ms.max(0),
            _mixer: mixer_ctx,
            _audio: audio.clone(),
        };

        Music::set_volume(clamp_volume(settings.volume));
        // a single pass, no looping
        if let Some(music) = player.music.as_ref() {
            music.play(1).map_err(BackendError::Audio)?;
        }
        log::info!("Playing {:?}", music_file);

        Ok(player)
    }

    pub fn is_playing(&self) -> bool {
        Music::is_playing()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        if self.fade_out_ms > 0 && Music::is_playing() {
            if let Err(e) = Music::fade_out(self.fade_out_ms) {
                log::warn!("music fade out failed: {e}");
            }
        }
        // Mix_FreeMusic blocks until the fade has finished.
        drop(self.music.take());
        mixer::close_audio();
        log::debug!("audio device closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume(-5), 0);
        assert_eq!(clamp_volume(64), 64);
        assert_eq!(clamp_volume(1000), mixer::MAX_VOLUME);
    }

    #[test]
    fn device_opens_at_cd_rate_stereo() {
        assert_eq!(FREQUENCY, 44_100);
        assert_ne!(FREQUENCY, mixer::DEFAULT_FREQUENCY);
        assert_eq!(CHANNELS, 2);
        assert_eq!(CHUNK_SIZE, 1024);
    }

    #[test]
    fn defaults_play_full_volume_with_one_second_fade() {
        let s = AudioSettings::default();
        assert_eq!(s.volume, 128);
        assert_eq!(s.fade_out_ms, 1000);
    }
}
