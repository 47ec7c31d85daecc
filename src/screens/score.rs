//! Game over screen: the run's result and the high score.

use super::{Flow, HeaderImage, MenuState, Screen};
use crate::game::keys::{Controls, GameKey};
use crate::game::{GameContext, GameOverReason, ScoreReport};

#[derive(Debug, Default)]
pub struct ScoreScreen {
    menu: MenuState,
    report: Option<ScoreReport>,
}

impl ScoreScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run result shown on the next activation.
    pub fn set_report(&mut self, report: ScoreReport) {
        self.report = Some(report);
    }

    pub fn message(&self) -> Option<&str> {
        self.menu.message()
    }
}

impl Screen for ScoreScreen {
    /// Compares the run against the stored high score, records and celebrates a new one, and
    /// rebuilds the message.
    fn activate(&mut self, ctx: &mut GameContext) {
        let report = self.report.unwrap_or_else(|| {
            log::warn!("Score screen entered without a result");
            ScoreReport {
                score: 0,
                reason: GameOverReason::FieldBorderCollision,
            }
        });

        let high_score = ctx.high_scores.load();
        if report.score > high_score {
            ctx.play_high_score_sound();
            match ctx.high_scores.save(report.score) {
                Ok(()) => log::info!("New high score {}", report.score),
                Err(e) => log::warn!(
                    "Failed to save high score to {}: {e}",
                    ctx.high_scores.path().display()
                ),
            }
        }

        self.menu
            .set_message(score_message(&ctx.controls, report, high_score));
    }

    fn deactivate(&mut self) {
        self.menu.release();
    }

    fn gather_input(&mut self, ctx: &mut GameContext) -> Flow {
        self.menu.gather_input(ctx)
    }

    fn do_logic(&mut self, ctx: &mut GameContext, elapsed_ms: u32) -> Flow {
        ctx.background.advance(elapsed_ms);
        Flow::Continue
    }

    fn output_frame(&self, ctx: &mut GameContext) {
        self.menu.draw(ctx, HeaderImage::GameOver);
    }
}

/// Game over text for `report`, given the high score stored before this run.
pub fn score_message(controls: &Controls, report: ScoreReport, high_score: u32) -> String {
    let record = if report.score > high_score {
        format!("NEW High Score: {}", report.score)
    } else {
        format!("High Score: {high_score}")
    };
    format!(
        "{}\n\nYour score was {}\n\n{record}\n\n\
         Press {} to play again\n{} to toggle fullscreen\nor {} to exit",
        report.reason.description(),
        report.score,
        controls.prompt(GameKey::Confirm),
        controls.prompt(GameKey::ToggleFullscreen),
        controls.prompt(GameKey::Exit),
    )
}
