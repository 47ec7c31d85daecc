//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds everything a running session needs
//! once the window exists: the GPU presenter, the shared [`GameContext`] and the screen
//! dispatcher.

use crate::assets::Assets;
use crate::background::Background;
use crate::config::Settings;
use crate::game::audio::GameAudioManager;
use crate::game::flight::FlightScreen;
use crate::game::high_score::HighScoreStore;
use crate::game::keys::Controls;
use crate::game::{GameContext, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::font::FontTable;
use crate::renderer::wgpu_lib::WgpuRenderer;
use crate::screens::ScreenDispatcher;
use anyhow::Result;
use std::time::Instant;
use winit::window::Window;

pub struct AppState {
    pub wgpu_renderer: WgpuRenderer,
    pub ctx: GameContext,
    pub dispatcher: ScreenDispatcher,
    /// When the previous frame started; `None` before the first frame.
    pub last_frame: Option<Instant>,
}

impl AppState {
    /// Initializes the GPU, loads assets and settings, and shows the title screen.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
        settings: &Settings,
    ) -> Result<Self> {
        let size = window.inner_size();
        let wgpu_renderer = WgpuRenderer::new(
            instance,
            surface,
            (size.width, size.height),
            (SCREEN_WIDTH, SCREEN_HEIGHT),
            settings.display.vsync,
        )
        .await?;

        let assets_dir = &settings.paths.assets;
        let font = FontTable::new();
        let assets = Assets::load(assets_dir, &font);
        let background = Background::load(assets_dir);

        let audio = match GameAudioManager::new(assets_dir) {
            Ok(audio) => Some(audio),
            Err(e) => {
                log::warn!("Audio disabled: {e}");
                None
            }
        };

        let high_scores = HighScoreStore::new(&settings.save_dir());
        log::info!("High score file: {}", high_scores.path().display());

        let mut ctx = GameContext::new(
            font,
            assets,
            background,
            Controls::from_settings(&settings.controls),
            high_scores,
            audio,
        );

        let mut dispatcher = ScreenDispatcher::new(Box::new(FlightScreen::new()));
        dispatcher.start(&mut ctx);

        Ok(Self {
            wgpu_renderer,
            ctx,
            dispatcher,
            last_frame: None,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }
}
