//! Event handler module.
//!
//! Contains the App struct and its event handling logic.

use crate::app::app_state::AppState;
use crate::config::Settings;
use crate::game::keys::PlatformEvent;
use crate::game::{SCREEN_HEIGHT, SCREEN_WIDTH};
use anyhow::{Context, Result};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window, WindowId},
};

pub const WINDOW_TITLE: &str = "Bamboo Flight";

/// Window lifecycle and event routing.
///
/// The window and [`AppState`] are created on the first `resumed` call. Keyboard and close
/// events are queued on the game context and consumed by the active screen on the next redraw.
pub struct App {
    pub instance: wgpu::Instance,
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
    settings: Settings,
    failed: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            settings,
            failed: false,
        }
    }

    /// Whether startup failed and the event loop was stopped because of it.
    pub fn failed(&self) -> bool {
        self.failed
    }

    async fn set_window(&mut self, window: Window) -> Result<()> {
        let window = Arc::new(window);

        let surface = self
            .instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        let state = AppState::new(&self.instance, surface, &window, &self.settings).await?;

        window.request_redraw();
        self.window = Some(window);
        self.state = Some(state);
        Ok(())
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let scale = self.settings.display.effective_scale();
        let mut attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale))
            .with_min_inner_size(PhysicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        if self.settings.display.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        event_loop
            .create_window(attributes)
            .context("failed to create window")
    }

    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        match &mut self.state {
            Some(state) => state.resize_surface(width, height),
            None => log::warn!("Cannot resize surface without state initialized"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let result = self
            .create_window(event_loop)
            .and_then(|window| pollster::block_on(self.set_window(window)));
        if let Err(e) = result {
            log::error!("Startup failed: {e:#}");
            self.failed = true;
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                state.ctx.events.push_back(PlatformEvent::CloseRequested);
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: key,
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                state.ctx.events.push_back(PlatformEvent::Key {
                    key,
                    state: key_state,
                });
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window.as_ref() else {
                    return;
                };
                if !state.handle_redraw(window) {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
