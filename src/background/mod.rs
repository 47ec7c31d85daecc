//! Background scenery drawn behind every screen.

pub mod parallax;

pub use parallax::{Background, ParallaxLayer};
