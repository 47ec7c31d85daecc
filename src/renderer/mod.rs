//! Main renderer module.
//!
//! Screens draw into an offscreen [`canvas::Canvas`] at the logical resolution, using the bitmap
//! [`font::FontTable`] for text. The [`wgpu_lib::WgpuRenderer`] then presents the canvas to the
//! window.

/// Offscreen render target with a current draw color.
pub mod canvas;
/// Proportional bitmap font table.
pub mod font;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Text layout and outlined text rendering.
pub mod text;
/// Core WGPU presenter.
pub mod wgpu_lib;
