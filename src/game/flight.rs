//! Stand-in gameplay screen.
//!
//! The player falls under gravity and rises while boost is held. The run scores one point per
//! second survived and ends as soon as the player leaves the top or bottom of the field.

use super::keys::GameKey;
use super::{GameContext, GameOverReason, SCREEN_HEIGHT, SCREEN_WIDTH, ScoreReport};
use crate::renderer::canvas::{Color, Rect};
use crate::renderer::text::{HorizontalAlignment, VerticalAlignment};
use crate::screens::{Flow, Screen, Transition};

/// Downward acceleration in pixels per second squared.
const GRAVITY: f32 = 360.0;
/// Upward acceleration while boosting, in pixels per second squared.
const BOOST: f32 = 720.0;
/// Speed limit in either direction, in pixels per second.
const MAX_SPEED: f32 = 240.0;
/// Longest physics step; longer frames are split.
const MAX_STEP_MS: u32 = 16;
const PLAYER_X: i32 = 64;

#[derive(Debug, Default)]
pub struct FlightScreen {
    /// Top edge of the player sprite.
    player_y: f32,
    /// Pixels per second, positive is down.
    speed: f32,
    boosting: bool,
    paused: bool,
    survived_ms: u64,
}

impl FlightScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        (self.survived_ms / 1000).min(u32::MAX as u64) as u32
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player_y(&self) -> f32 {
        self.player_y
    }

    fn step(&mut self, dt: f32) {
        let accel = if self.boosting { GRAVITY - BOOST } else { GRAVITY };
        self.speed = (self.speed + accel * dt).clamp(-MAX_SPEED, MAX_SPEED);
        self.player_y += self.speed * dt;
    }

    fn out_of_field(&self, player_height: u32) -> bool {
        self.player_y + player_height as f32 <= 0.0 || self.player_y >= SCREEN_HEIGHT as f32
    }
}

impl Screen for FlightScreen {
    fn activate(&mut self, ctx: &mut GameContext) {
        *self = Self {
            player_y: (SCREEN_HEIGHT as f32 - ctx.assets.player.height() as f32) / 2.0,
            ..Self::default()
        };
    }

    fn gather_input(&mut self, ctx: &mut GameContext) -> Flow {
        while let Some(event) = ctx.events.pop_front() {
            let controls = &ctx.controls;
            if controls.is_exit_request(&event) {
                return Flow::Exit;
            } else if controls.is_toggle_fullscreen(&event) {
                ctx.request_fullscreen_toggle();
            } else if controls.is_pause_press(&event) {
                self.paused = !self.paused;
            } else if controls.is_boost_press(&event) {
                self.boosting = true;
            } else if controls.is_boost_release(&event) {
                self.boosting = false;
            }
        }
        Flow::Continue
    }

    fn do_logic(&mut self, ctx: &mut GameContext, elapsed_ms: u32) -> Flow {
        if self.paused {
            return Flow::Continue;
        }
        ctx.background.advance(elapsed_ms);

        let mut remaining = elapsed_ms;
        while remaining > 0 {
            let step = remaining.min(MAX_STEP_MS);
            self.step(step as f32 / 1000.0);
            self.survived_ms += step as u64;
            remaining -= step;

            if self.out_of_field(ctx.assets.player.height()) {
                return Flow::Switch(Transition::ToScore(ScoreReport {
                    score: self.score(),
                    reason: GameOverReason::FieldBorderCollision,
                }));
            }
        }
        Flow::Continue
    }

    fn output_frame(&self, ctx: &mut GameContext) {
        let GameContext {
            canvas,
            font,
            assets,
            background,
            controls,
            ..
        } = ctx;

        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        background.draw(canvas);
        canvas.blit(&assets.player, PLAYER_X, self.player_y.round() as i32);

        font.draw_text_outlined(
            canvas,
            &format!("Score: {}", self.score()),
            Color::WHITE,
            Color::BLACK,
            Rect::new(4, 4, SCREEN_WIDTH - 8, 12),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        );

        if self.paused {
            font.draw_text_outlined(
                canvas,
                &format!(
                    "Paused\n\nPress {} to resume",
                    controls.prompt(GameKey::Pause)
                ),
                Color::WHITE,
                Color::BLACK,
                Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT),
                HorizontalAlignment::Center,
                VerticalAlignment::Middle,
            );
        }
    }
}
