//! Game state shared by every screen.
//!
//! [`GameContext`] gathers what screens draw with and read from each frame: the canvas and font,
//! loaded assets, the scrolling background, key bindings, queued input, audio and the high score
//! store. It replaces any process-wide state; the window driver owns one and passes it to the
//! active screen on every call.

pub mod audio;
pub mod flight;
pub mod high_score;
pub mod keys;

use self::audio::GameAudioManager;
use self::high_score::HighScoreStore;
use self::keys::{Controls, PlatformEvent};
use crate::assets::Assets;
use crate::background::Background;
use crate::renderer::canvas::Canvas;
use crate::renderer::font::FontTable;
use std::collections::VecDeque;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: u32 = 320;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The player left the playing field.
    FieldBorderCollision,
    /// The player hit an obstacle.
    RectangleCollision,
}

impl GameOverReason {
    pub fn description(self) -> &'static str {
        match self {
            GameOverReason::FieldBorderCollision => "You flew too far away from the field",
            GameOverReason::RectangleCollision => "You crashed into a bamboo shoot",
        }
    }
}

/// Outcome of a finished run, handed to the score screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: u32,
    pub reason: GameOverReason,
}

pub struct GameContext {
    /// The logical screen every screen draws into.
    pub canvas: Canvas,
    pub font: FontTable,
    pub assets: Assets,
    pub background: Background,
    pub controls: Controls,
    pub high_scores: HighScoreStore,
    /// `None` when no audio device is available.
    pub audio: Option<GameAudioManager>,
    /// Input received since the last frame, oldest first.
    pub events: VecDeque<PlatformEvent>,
    fullscreen_toggle_requested: bool,
}

impl GameContext {
    pub fn new(
        font: FontTable,
        assets: Assets,
        background: Background,
        controls: Controls,
        high_scores: HighScoreStore,
        audio: Option<GameAudioManager>,
    ) -> Self {
        Self {
            canvas: Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            font,
            assets,
            background,
            controls,
            high_scores,
            audio,
            events: VecDeque::new(),
            fullscreen_toggle_requested: false,
        }
    }

    /// Asks the window driver to switch display mode after this frame.
    pub fn request_fullscreen_toggle(&mut self) {
        self.fullscreen_toggle_requested = true;
    }

    /// Returns and clears a pending display mode switch.
    pub fn take_fullscreen_toggle(&mut self) -> bool {
        std::mem::take(&mut self.fullscreen_toggle_requested)
    }

    pub fn play_high_score_sound(&mut self) {
        if let Some(audio) = self.audio.as_mut() {
            if let Err(e) = audio.play_high_score() {
                log::warn!("Failed to play high score sound: {e}");
            }
        }
    }

    /// A context with generated assets, no audio and a high score kept in `save_dir`.
    #[cfg(test)]
    pub fn headless(save_dir: &std::path::Path) -> Self {
        let font = FontTable::new();
        let assets = Assets::generated(&font);
        Self::new(
            font,
            assets,
            Background::generated(),
            Controls::default(),
            HighScoreStore::new(save_dir),
            None,
        )
    }
}
