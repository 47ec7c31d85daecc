//! Application module.
//!
//! This module ties the window, the GPU presenter and the screens together.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds all session state
//! - [`event_handler`]: Contains the [`App`] struct and window event handling
//! - [`update`]: Contains the per-frame step
//!
//! # Event Flow
//!
//! 1. **Input Events**: Key and close events are queued on the game context
//! 2. **Frame**: On redraw the active screen gathers input, updates and draws to the canvas
//! 3. **Present**: The canvas is uploaded and shown, letterboxed, in the window
//!
//! # Threading Model
//!
//! Everything runs on the event loop thread. Frames are paced by the surface present mode.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
