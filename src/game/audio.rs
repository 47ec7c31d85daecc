use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use std::error::Error;
use std::path::Path;

pub const HIGH_SCORE_SOUND: &str = "HighScore.ogg";

/// Sound effect playback.
pub struct GameAudioManager {
    audio_manager: AudioManager<DefaultBackend>,
    high_score_data: Option<StaticSoundData>,
}

impl GameAudioManager {
    /// Opens the default audio device and loads sound effects from `assets_dir`.
    ///
    /// Fails only if the device cannot be opened. A missing sound file is logged and that
    /// effect stays silent.
    pub fn new(assets_dir: &Path) -> Result<Self, Box<dyn Error>> {
        let audio_manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        let path = assets_dir.join(HIGH_SCORE_SOUND);
        let high_score_data = match StaticSoundData::from_file(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("Failed to load sound {}: {e}", path.display());
                None
            }
        };

        Ok(GameAudioManager {
            audio_manager,
            high_score_data,
        })
    }

    pub fn play_high_score(&mut self) -> Result<(), Box<dyn Error>> {
        if let Some(data) = &self.high_score_data {
            self.audio_manager.play(data.clone())?;
        }
        Ok(())
    }
}
