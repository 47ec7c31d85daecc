//! Screen dispatcher.
//!
//! Routes the per-frame callbacks to whichever screen is active and applies screen switches at
//! frame boundaries.

use super::{Flow, Screen, ScoreScreen, TitleScreen, Transition};
use crate::game::GameContext;

/// Tag of the screen that currently receives frame callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScreen {
    Title,
    Game,
    Score,
}

/// Owns the three screens and routes each frame to the active one.
///
/// Screen switches requested during a frame are applied by [`ScreenDispatcher::end_frame`]: the
/// outgoing screen is deactivated, then the incoming one is activated before it sees its first
/// frame. A switch never interrupts the frame in flight; the screen that started the frame still
/// runs its logic and draws it.
pub struct ScreenDispatcher {
    active: Option<ActiveScreen>,
    pending: Option<Transition>,
    title: TitleScreen,
    game: Box<dyn Screen>,
    score: ScoreScreen,
}

impl ScreenDispatcher {
    /// An inert dispatcher; nothing runs until a transition is installed.
    pub fn new(game: Box<dyn Screen>) -> Self {
        Self {
            active: None,
            pending: None,
            title: TitleScreen::new(),
            game,
            score: ScoreScreen::new(),
        }
    }

    /// Installs and activates the title screen.
    pub fn start(&mut self, ctx: &mut GameContext) {
        self.install(Transition::ToTitle);
        self.end_frame(ctx);
    }

    pub fn active(&self) -> Option<ActiveScreen> {
        self.active
    }

    pub fn title(&self) -> &TitleScreen {
        &self.title
    }

    pub fn score(&self) -> &ScoreScreen {
        &self.score
    }

    /// Requests a switch at the end of the current frame. A later request replaces an
    /// earlier one.
    pub fn install(&mut self, transition: Transition) {
        self.pending = Some(transition);
    }

    fn screen_mut(&mut self, tag: ActiveScreen) -> &mut dyn Screen {
        match tag {
            ActiveScreen::Title => &mut self.title,
            ActiveScreen::Game => self.game.as_mut(),
            ActiveScreen::Score => &mut self.score,
        }
    }

    /// Records a switch, or reports `false` for exit.
    fn follow(&mut self, flow: Flow) -> bool {
        match flow {
            Flow::Continue => true,
            Flow::Switch(transition) => {
                self.install(transition);
                true
            }
            Flow::Exit => false,
        }
    }

    /// Runs input, logic and rendering of the screen active at the start of the frame, then
    /// applies any pending switch.
    ///
    /// Returns `false` when the game should exit.
    pub fn run_frame(&mut self, ctx: &mut GameContext, elapsed_ms: u32) -> bool {
        if let Some(tag) = self.active {
            let flow = self.screen_mut(tag).gather_input(ctx);
            if !self.follow(flow) {
                return false;
            }

            let flow = self.screen_mut(tag).do_logic(ctx, elapsed_ms);
            if !self.follow(flow) {
                return false;
            }

            self.screen_mut(tag).output_frame(ctx);
        }

        self.end_frame(ctx);
        true
    }

    /// Applies the pending switch, if any.
    pub fn end_frame(&mut self, ctx: &mut GameContext) {
        let Some(transition) = self.pending.take() else {
            return;
        };

        if let Some(tag) = self.active {
            self.screen_mut(tag).deactivate();
        }

        let next = match transition {
            Transition::ToTitle => ActiveScreen::Title,
            Transition::ToGame => ActiveScreen::Game,
            Transition::ToScore(report) => {
                self.score.set_report(report);
                ActiveScreen::Score
            }
        };
        log::debug!("Screen {:?} -> {next:?}", self.active);

        self.screen_mut(next).activate(ctx);
        self.active = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::{Background, ParallaxLayer};
    use crate::game::keys::PlatformEvent;
    use crate::game::{GameOverReason, ScoreReport};
    use image::RgbaImage;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use winit::keyboard::{Key, NamedKey};

    /// Records its callbacks and ends the run on demand.
    #[derive(Default)]
    struct ScriptedGame {
        log: Rc<RefCell<Vec<&'static str>>>,
        end_with: Option<ScoreReport>,
    }

    impl Screen for ScriptedGame {
        fn activate(&mut self, _ctx: &mut GameContext) {
            self.log.borrow_mut().push("activate");
        }

        fn deactivate(&mut self) {
            self.log.borrow_mut().push("deactivate");
        }

        fn gather_input(&mut self, ctx: &mut GameContext) -> Flow {
            self.log.borrow_mut().push("input");
            ctx.events.clear();
            Flow::Continue
        }

        fn do_logic(&mut self, _ctx: &mut GameContext, _elapsed_ms: u32) -> Flow {
            self.log.borrow_mut().push("logic");
            match self.end_with.take() {
                Some(report) => Flow::Switch(Transition::ToScore(report)),
                None => Flow::Continue,
            }
        }

        fn output_frame(&self, _ctx: &mut GameContext) {
            self.log.borrow_mut().push("output");
        }
    }

    fn save_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bamboo-flight-dispatch-{name}-{}", std::process::id()))
    }

    fn space(pressed: bool) -> PlatformEvent {
        let key = Key::Named(NamedKey::Space);
        if pressed {
            PlatformEvent::pressed(key)
        } else {
            PlatformEvent::released(key)
        }
    }

    #[test]
    fn test_starts_inert() {
        let dir = save_dir("inert");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());

        assert_eq!(dispatcher.active(), None);
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), None);

        dispatcher.start(&mut ctx);
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Title));
        assert!(dispatcher.title().message().is_some());
    }

    /// Press then release on the title starts a run after the frame ends.
    #[test]
    fn test_confirm_release_switches_to_game() {
        let dir = save_dir("confirm");
        let mut ctx = GameContext::headless(&dir);
        let log = Rc::new(RefCell::new(Vec::new()));
        let game = ScriptedGame {
            log: log.clone(),
            end_with: None,
        };
        let mut dispatcher = ScreenDispatcher::new(Box::new(game));
        dispatcher.start(&mut ctx);

        ctx.events.push_back(space(true));
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Title));

        ctx.events.push_back(space(false));
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Game));
        assert_eq!(dispatcher.title().message(), None);
        assert_eq!(*log.borrow(), vec!["activate"]);

        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(*log.borrow(), vec!["activate", "input", "logic", "output"]);
    }

    /// A release without a preceding press is ignored.
    #[test]
    fn test_release_alone_does_nothing() {
        let dir = save_dir("release");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);

        ctx.events.push_back(space(false));
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Title));
    }

    #[test]
    fn test_events_after_switch_stay_queued() {
        let dir = save_dir("queued");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);

        ctx.events.push_back(space(true));
        ctx.events.push_back(space(false));
        ctx.events.push_back(PlatformEvent::CloseRequested);
        assert!(dispatcher.run_frame(&mut ctx, 16));

        assert_eq!(dispatcher.active(), Some(ActiveScreen::Game));
        assert_eq!(ctx.events.len(), 1);
    }

    #[test]
    fn test_exit_request_stops_loop() {
        let dir = save_dir("exit");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);

        ctx.events.push_back(PlatformEvent::pressed(Key::Named(NamedKey::Escape)));
        assert!(!dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.title().message(), None);
    }

    #[test]
    fn test_fullscreen_toggle_is_requested() {
        let dir = save_dir("fullscreen");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);

        ctx.events.push_back(PlatformEvent::pressed(Key::Named(NamedKey::F11)));
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert!(ctx.take_fullscreen_toggle());
        assert!(!ctx.take_fullscreen_toggle());
    }

    /// Game -> Score -> Game, with the score message rebuilt for each result.
    #[test]
    fn test_run_over_shows_score_then_replays() {
        let dir = save_dir("replay");
        let mut ctx = GameContext::headless(&dir);
        let log = Rc::new(RefCell::new(Vec::new()));
        let game = ScriptedGame {
            log: log.clone(),
            end_with: Some(ScoreReport {
                score: 3,
                reason: GameOverReason::RectangleCollision,
            }),
        };
        let mut dispatcher = ScreenDispatcher::new(Box::new(game));
        dispatcher.start(&mut ctx);
        dispatcher.install(Transition::ToGame);
        dispatcher.end_frame(&mut ctx);

        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Score));
        assert_eq!(
            *log.borrow(),
            vec!["activate", "input", "logic", "output", "deactivate"]
        );
        assert!(
            dispatcher
                .score()
                .message()
                .is_some_and(|m| m.starts_with("You crashed into a bamboo shoot"))
        );

        ctx.events.push_back(space(true));
        ctx.events.push_back(space(false));
        assert!(dispatcher.run_frame(&mut ctx, 16));
        assert_eq!(dispatcher.active(), Some(ActiveScreen::Game));
        assert_eq!(dispatcher.score().message(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    /// Leaving the title drops its text; coming back builds it again.
    #[test]
    fn test_title_message_rebuilt_on_reentry() {
        let dir = save_dir("reentry");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);
        let first = dispatcher.title().message().map(str::to_owned);

        dispatcher.install(Transition::ToGame);
        dispatcher.end_frame(&mut ctx);
        assert_eq!(dispatcher.title().message(), None);

        dispatcher.install(Transition::ToTitle);
        dispatcher.end_frame(&mut ctx);
        assert_eq!(dispatcher.title().message().map(str::to_owned), first);
    }

    /// The frame that leaves the title still advances and draws it, without the released text.
    #[test]
    fn test_switch_frame_is_still_drawn() {
        let dir = save_dir("switch-frame");
        let mut ctx = GameContext::headless(&dir);
        let log = Rc::new(RefCell::new(Vec::new()));
        let game = ScriptedGame {
            log: log.clone(),
            end_with: None,
        };
        let mut dispatcher = ScreenDispatcher::new(Box::new(game));
        dispatcher.start(&mut ctx);

        ctx.background = Background::new(vec![ParallaxLayer::new(RgbaImage::new(320, 8), 10.0)]);
        let marker = crate::renderer::canvas::Color::rgb(1, 2, 3);
        ctx.canvas.set_draw_color(marker);
        ctx.canvas.clear();

        ctx.events.push_back(space(true));
        ctx.events.push_back(space(false));
        assert!(dispatcher.run_frame(&mut ctx, 100));

        assert_eq!(dispatcher.active(), Some(ActiveScreen::Game));
        assert_eq!(ctx.background.layers()[0].offset, 1.0);
        assert_ne!(ctx.canvas.pixel(0, 0), Some(marker));
        let white = crate::renderer::canvas::Color::WHITE;
        assert!(
            (60..240u32)
                .flat_map(|y| (0..320u32).map(move |x| (x, y)))
                .all(|(x, y)| ctx.canvas.pixel(x, y) != Some(white))
        );
        assert_eq!(*log.borrow(), vec!["activate"]);
    }

    /// The title draws its header and text onto the canvas.
    #[test]
    fn test_title_renders_message() {
        let dir = save_dir("render");
        let mut ctx = GameContext::headless(&dir);
        let mut dispatcher = ScreenDispatcher::new(Box::<ScriptedGame>::default());
        dispatcher.start(&mut ctx);
        assert!(dispatcher.run_frame(&mut ctx, 16));

        let white = crate::renderer::canvas::Color::WHITE;
        let lit = (60..240u32)
            .flat_map(|y| (0..320u32).map(move |x| (x, y)))
            .filter(|&(x, y)| ctx.canvas.pixel(x, y) == Some(white))
            .count();
        assert!(lit > 100);
    }
}
