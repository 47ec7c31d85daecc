//! Title screen: an animated header over the controls summary.

use super::{Flow, HeaderImage, MenuState, Screen};
use crate::game::GameContext;
use crate::game::keys::{Controls, GameKey};

/// Duration of one header animation step.
pub const TITLE_FRAME_TIME_MS: u32 = 50;
/// Steps in one full header animation loop.
pub const TITLE_ANIMATION_FRAMES: usize = 144;

/// Header image shown at each animation step. Frames 0-1 and 4-5 bob up and down, 2-3 and 6-7
/// blink.
#[rustfmt::skip]
const HEADER_FRAME_ANIMATION: [u8; TITLE_ANIMATION_FRAMES] = [
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 2, 3,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 2, 3,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 6, 7,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 6, 7,
    4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5,
];

#[derive(Debug, Default)]
pub struct TitleScreen {
    menu: MenuState,
    /// Current step in [`HEADER_FRAME_ANIMATION`].
    header_frame: usize,
    /// Milliseconds spent in the current step.
    header_frame_time: u32,
}

impl TitleScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.menu.message()
    }

    pub fn header_frame(&self) -> usize {
        self.header_frame
    }

    /// Header image for the current animation step.
    pub fn header_image(&self) -> usize {
        HEADER_FRAME_ANIMATION[self.header_frame] as usize
    }

    fn advance_animation(&mut self, elapsed_ms: u32) {
        let loop_ms = TITLE_FRAME_TIME_MS * TITLE_ANIMATION_FRAMES as u32;
        // Whole loops since the last frame change nothing.
        let remainder = elapsed_ms % loop_ms;
        let total = self.header_frame_time + remainder;

        self.header_frame =
            (self.header_frame + (total / TITLE_FRAME_TIME_MS) as usize) % TITLE_ANIMATION_FRAMES;
        self.header_frame_time = total % TITLE_FRAME_TIME_MS;
    }
}

impl Screen for TitleScreen {
    /// Builds the welcome text unless it is still around from before.
    fn activate(&mut self, ctx: &mut GameContext) {
        if !self.menu.has_message() {
            self.menu.set_message(welcome_message(&ctx.controls));
        }
    }

    fn deactivate(&mut self) {
        self.menu.release();
    }

    fn gather_input(&mut self, ctx: &mut GameContext) -> Flow {
        self.menu.gather_input(ctx)
    }

    fn do_logic(&mut self, ctx: &mut GameContext, elapsed_ms: u32) -> Flow {
        self.advance_animation(elapsed_ms);
        ctx.background.advance(elapsed_ms);
        Flow::Continue
    }

    fn output_frame(&self, ctx: &mut GameContext) {
        self.menu.draw(ctx, HeaderImage::Title(self.header_image()));
    }
}

pub fn welcome_message(controls: &Controls) -> String {
    let exit = controls.prompt(GameKey::Exit);
    format!(
        "Press {} to play\n{} to toggle fullscreen\nor {exit} to exit\n\n\
         In-game:\n{} to rise\n{} to pause\n{exit} to exit",
        controls.prompt(GameKey::Confirm),
        controls.prompt(GameKey::ToggleFullscreen),
        controls.prompt(GameKey::Boost),
        controls.prompt(GameKey::Pause),
    )
}
