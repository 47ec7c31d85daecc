//! Keyboard input classification.
//!
//! Window events are queued as [`PlatformEvent`]s and screens ask [`Controls`] what each one
//! means. Key bindings come from the `[controls]` settings, so prompts shown to the player always
//! name the key that is actually bound.

use crate::config::ControlSettings;
use winit::event::ElementState;
use winit::keyboard::{Key, NamedKey};

/// An input event captured from the window, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A non-repeat key press or release.
    Key { key: Key, state: ElementState },
    /// The window's close button or the platform's quit request.
    CloseRequested,
}

impl PlatformEvent {
    pub fn pressed(key: Key) -> Self {
        Self::Key {
            key,
            state: ElementState::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self::Key {
            key,
            state: ElementState::Released,
        }
    }
}

/// Game actions that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Start a run from the title or score screen.
    Confirm,
    /// Fly upwards while held.
    Boost,
    /// Pause or resume a run.
    Pause,
    /// Leave the game.
    Exit,
    /// Switch between windowed and fullscreen.
    ToggleFullscreen,
}

/// A single physical key, either a named key or a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBinding {
    Named(NamedKey),
    /// Stored lowercase; matched case-insensitively.
    Character(String),
}

macro_rules! match_key_name {
    ($name:expr, { $($key:ident),* $(,)? }) => {{
        let name: &str = $name;
        $(
            if name.eq_ignore_ascii_case(stringify!($key)) {
                return Some(KeyBinding::Named(NamedKey::$key));
            }
        )*
    }};
}

impl KeyBinding {
    /// Parses a key name such as `"Space"`, `"F11"` or `"q"`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        match_key_name!(name, {
            Space, Enter, Escape, Tab, Backspace, Delete, Insert, Home, End, PageUp, PageDown,
            ArrowUp, ArrowDown, ArrowLeft, ArrowRight, Shift, Control, Alt,
            F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        });

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => {
                Some(KeyBinding::Character(c.to_lowercase().collect()))
            }
            _ => None,
        }
    }

    pub fn matches(&self, key: &Key) -> bool {
        match (self, key) {
            (KeyBinding::Named(bound), Key::Named(named)) => bound == named,
            (KeyBinding::Character(bound), Key::Character(c)) => c.to_lowercase() == *bound,
            _ => false,
        }
    }

    /// Human-readable key name for on-screen prompts.
    pub fn prompt(&self) -> String {
        match self {
            KeyBinding::Named(named) => format!("{named:?}"),
            KeyBinding::Character(c) => c.to_uppercase(),
        }
    }
}

/// The active key bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    confirm: KeyBinding,
    boost: KeyBinding,
    pause: KeyBinding,
    exit: KeyBinding,
    toggle_fullscreen: KeyBinding,
}

impl Controls {
    /// Builds bindings from settings. Names that fail to parse keep the default binding.
    pub fn from_settings(settings: &ControlSettings) -> Self {
        let defaults = ControlSettings::default();
        let bind = |action: &str, name: &str, fallback: &str| {
            KeyBinding::parse(name).unwrap_or_else(|| {
                log::warn!("Unknown key {name:?} for {action}, using {fallback}");
                KeyBinding::parse(fallback).unwrap_or(KeyBinding::Named(NamedKey::Space))
            })
        };

        Self {
            confirm: bind("confirm", &settings.confirm, &defaults.confirm),
            boost: bind("boost", &settings.boost, &defaults.boost),
            pause: bind("pause", &settings.pause, &defaults.pause),
            exit: bind("exit", &settings.exit, &defaults.exit),
            toggle_fullscreen: bind(
                "toggle_fullscreen",
                &settings.toggle_fullscreen,
                &defaults.toggle_fullscreen,
            ),
        }
    }

    pub fn binding(&self, action: GameKey) -> &KeyBinding {
        match action {
            GameKey::Confirm => &self.confirm,
            GameKey::Boost => &self.boost,
            GameKey::Pause => &self.pause,
            GameKey::Exit => &self.exit,
            GameKey::ToggleFullscreen => &self.toggle_fullscreen,
        }
    }

    /// Key name to show the player for `action`.
    pub fn prompt(&self, action: GameKey) -> String {
        self.binding(action).prompt()
    }

    fn is_key(&self, action: GameKey, event: &PlatformEvent, wanted: ElementState) -> bool {
        match event {
            PlatformEvent::Key { key, state } => {
                *state == wanted && self.binding(action).matches(key)
            }
            PlatformEvent::CloseRequested => false,
        }
    }

    pub fn is_confirm_press(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::Confirm, event, ElementState::Pressed)
    }

    pub fn is_confirm_release(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::Confirm, event, ElementState::Released)
    }

    /// The exit key was pressed or the window was asked to close.
    pub fn is_exit_request(&self, event: &PlatformEvent) -> bool {
        matches!(event, PlatformEvent::CloseRequested)
            || self.is_key(GameKey::Exit, event, ElementState::Pressed)
    }

    pub fn is_toggle_fullscreen(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::ToggleFullscreen, event, ElementState::Pressed)
    }

    pub fn is_boost_press(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::Boost, event, ElementState::Pressed)
    }

    pub fn is_boost_release(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::Boost, event, ElementState::Released)
    }

    pub fn is_pause_press(&self, event: &PlatformEvent) -> bool {
        self.is_key(GameKey::Pause, event, ElementState::Pressed)
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::from_settings(&ControlSettings::default())
    }
}
