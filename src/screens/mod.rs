//! Screen state machine.
//!
//! Exactly one screen is active at a time. Every frame the [`dispatcher::ScreenDispatcher`] asks
//! it to gather input, advance its logic and draw itself. Input and logic can end the frame loop
//! or ask for another screen; the switch happens once the frame is over.
//!
//! ```text
//! Title --confirm--> Game --run over--> Score --confirm--> Game
//! ```

pub mod dispatcher;
pub mod score;
pub mod title;

use crate::game::{GameContext, SCREEN_HEIGHT, SCREEN_WIDTH, ScoreReport};
use crate::renderer::canvas::{Color, Rect};
use crate::renderer::text::{HorizontalAlignment, VerticalAlignment};
use image::RgbaImage;

pub use dispatcher::{ActiveScreen, ScreenDispatcher};
pub use score::ScoreScreen;
pub use title::TitleScreen;

/// A screen to switch to at the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ToTitle,
    ToGame,
    ToScore(ScoreReport),
}

/// What a screen wants after handling input or logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Switch(Transition),
    /// Leave the frame loop and shut down.
    Exit,
}

/// The per-frame callbacks of a screen.
pub trait Screen {
    /// Runs once when the screen becomes active, before its first frame.
    fn activate(&mut self, _ctx: &mut GameContext) {}

    /// Runs once when another screen takes over.
    fn deactivate(&mut self) {}

    /// Drains queued input from `ctx.events`.
    fn gather_input(&mut self, ctx: &mut GameContext) -> Flow;

    /// Advances the screen by `elapsed_ms` milliseconds.
    fn do_logic(&mut self, ctx: &mut GameContext, elapsed_ms: u32) -> Flow;

    /// Draws the screen into `ctx.canvas`.
    fn output_frame(&self, ctx: &mut GameContext);
}

/// Input handling and layout shared by the title and score screens.
///
/// Both show a header image over a block of outlined text, start a run on a full
/// press-and-release of the confirm key, and drop their text when they are left.
#[derive(Debug, Default)]
pub struct MenuState {
    waiting_for_release: bool,
    message: Option<String>,
}

impl MenuState {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub fn release(&mut self) {
        self.message = None;
        self.waiting_for_release = false;
    }

    /// Handles queued events until one of them ends the screen.
    ///
    /// Events after that one stay queued for the next screen.
    pub fn gather_input(&mut self, ctx: &mut GameContext) -> Flow {
        while let Some(event) = ctx.events.pop_front() {
            let controls = &ctx.controls;
            if !self.waiting_for_release && controls.is_confirm_press(&event) {
                self.waiting_for_release = true;
            } else if self.waiting_for_release && controls.is_confirm_release(&event) {
                self.release();
                return Flow::Switch(Transition::ToGame);
            } else if controls.is_exit_request(&event) {
                self.release();
                return Flow::Exit;
            } else if controls.is_toggle_fullscreen(&event) {
                ctx.request_fullscreen_toggle();
            }
        }
        Flow::Continue
    }

    /// Clears the screen, draws the background, centres `header` in the top quarter and the
    /// message in the rest.
    pub fn draw(&self, ctx: &mut GameContext, header: HeaderImage) {
        let GameContext {
            canvas,
            font,
            assets,
            background,
            ..
        } = ctx;

        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        background.draw(canvas);

        let header = match header {
            HeaderImage::Title(frame) => assets.title_frame(frame),
            HeaderImage::GameOver => Some(&assets.game_over_header),
        };
        if let Some(image) = header {
            let (x, y) = header_position(image);
            canvas.blit(image, x, y);
        }

        if let Some(message) = &self.message {
            font.draw_text_outlined(
                canvas,
                message,
                Color::WHITE,
                Color::BLACK,
                message_area(),
                HorizontalAlignment::Center,
                VerticalAlignment::Middle,
            );
        }
    }
}

/// Which header a menu screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderImage {
    Title(usize),
    GameOver,
}

/// Top-left corner that centres `image` in the top quarter of the screen.
pub fn header_position(image: &RgbaImage) -> (i32, i32) {
    let x = (SCREEN_WIDTH as i32 - image.width() as i32) / 2;
    let y = ((SCREEN_HEIGHT / 4) as i32 - image.height() as i32) / 2;
    (x, y)
}

/// The lower three quarters of the screen.
pub fn message_area() -> Rect {
    let top = SCREEN_HEIGHT / 4;
    Rect::new(0, top as i32, SCREEN_WIDTH, SCREEN_HEIGHT - top)
}
