//! Per-frame update.
//!
//! Contains the frame step run on every redraw and the fullscreen toggle it may trigger.

use super::app_state::AppState;
use std::time::{Duration, Instant};
use winit::window::{Fullscreen, Window};

/// Elapsed time assumed for the very first frame.
const FIRST_FRAME_MS: u32 = 16;

impl AppState {
    /// Runs one frame of the active screen and presents it.
    ///
    /// Returns `false` once a screen asks to exit.
    pub fn handle_redraw(&mut self, window: &Window) -> bool {
        let now = Instant::now();
        let elapsed_ms = frame_millis(self.last_frame.map(|last| now.duration_since(last)));
        self.last_frame = Some(now);

        if !self.dispatcher.run_frame(&mut self.ctx, elapsed_ms) {
            log::info!("Exit requested");
            return false;
        }

        if self.ctx.take_fullscreen_toggle() {
            toggle_fullscreen(window);
        }

        if !window.is_minimized().unwrap_or(false) {
            self.wgpu_renderer.present(&self.ctx.canvas);
        }
        true
    }
}

/// Milliseconds to feed the screens for a frame that took `elapsed`.
fn frame_millis(elapsed: Option<Duration>) -> u32 {
    match elapsed {
        Some(elapsed) => u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX),
        None => FIRST_FRAME_MS,
    }
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
        log::info!("Switched to windowed mode");
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        log::info!("Switched to fullscreen mode");
    }
}
