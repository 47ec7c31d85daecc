//! # Assets Module
//!
//! Images are loaded from the assets directory at startup. Any image that is missing or fails to
//! decode is logged and replaced by a generated stand-in, so the game always has a full set.

use crate::renderer::canvas::{Canvas, Color, Rect};
use crate::renderer::font::FontTable;
use crate::renderer::text::{HorizontalAlignment, VerticalAlignment};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Number of frames in the animated title header.
pub const TITLE_FRAME_COUNT: usize = 8;

const GAME_TITLE: &str = "Bamboo Flight";

/// Every image the screens draw, apart from the background layers.
pub struct Assets {
    /// `TitleHeader1.png` to `TitleHeader8.png`.
    pub title_frames: Vec<RgbaImage>,
    pub game_over_header: RgbaImage,
    pub player: RgbaImage,
}

impl Assets {
    pub fn load(dir: &Path, font: &FontTable) -> Self {
        let title_frames = (0..TITLE_FRAME_COUNT)
            .map(|i| {
                load_image(dir, &format!("TitleHeader{}.png", i + 1), || {
                    generated_title_frame(font, i)
                })
            })
            .collect();

        Self {
            title_frames,
            game_over_header: load_image(dir, "GameOverHeader.png", || {
                generated_game_over_header(font)
            }),
            player: load_image(dir, "Bee.png", generated_player),
        }
    }

    /// The full generated set, without touching the filesystem.
    pub fn generated(font: &FontTable) -> Self {
        Self {
            title_frames: (0..TITLE_FRAME_COUNT)
                .map(|i| generated_title_frame(font, i))
                .collect(),
            game_over_header: generated_game_over_header(font),
            player: generated_player(),
        }
    }

    /// Title header frame `index`, wrapping around the frame count.
    pub fn title_frame(&self, index: usize) -> Option<&RgbaImage> {
        if self.title_frames.is_empty() {
            return None;
        }
        self.title_frames.get(index % self.title_frames.len())
    }
}

/// Loads `dir/name` as RGBA, or logs the failure and returns `fallback()`.
pub fn load_image(dir: &Path, name: &str, fallback: impl FnOnce() -> RgbaImage) -> RgbaImage {
    let path = dir.join(name);
    match image::open(&path) {
        Ok(img) => {
            log::info!("Loaded {}", path.display());
            img.to_rgba8()
        }
        Err(e) => {
            log::warn!("Failed to load {}: {e}; using generated image", path.display());
            fallback()
        }
    }
}

/// Draws outlined text into a transparent image, then scales it up without smoothing.
fn outlined_banner(
    font: &FontTable,
    text: &str,
    fill: Color,
    (width, height): (u32, u32),
    y_offset: i32,
    zoom: u32,
) -> RgbaImage {
    let mut canvas = Canvas::new(width, height);
    font.draw_text_outlined(
        &mut canvas,
        text,
        fill,
        Color::BLACK,
        Rect::new(0, y_offset, width, height),
        HorizontalAlignment::Center,
        VerticalAlignment::Middle,
    );
    imageops::resize(
        &canvas.into_image(),
        width * zoom,
        height * zoom,
        FilterType::Nearest,
    )
}

fn generated_title_frame(font: &FontTable, frame: usize) -> RgbaImage {
    const BOB: [i32; TITLE_FRAME_COUNT] = [0, -1, -2, -1, 0, 1, 2, 1];
    let fill = if matches!(frame, 2 | 3 | 6 | 7) {
        Color::rgb(255, 220, 64)
    } else {
        Color::rgb(140, 220, 90)
    };
    outlined_banner(
        font,
        GAME_TITLE,
        fill,
        (110, 24),
        BOB[frame % TITLE_FRAME_COUNT],
        2,
    )
}

fn generated_game_over_header(font: &FontTable) -> RgbaImage {
    outlined_banner(font, "GAME OVER", Color::rgb(230, 60, 40), (80, 20), 0, 2)
}

/// A small striped bee facing right.
fn generated_player() -> RgbaImage {
    const W: u32 = 16;
    const H: u32 = 12;
    let mut img = RgbaImage::new(W, H);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        let body = ((fx - 8.0) / 7.0).powi(2) + ((fy - 7.5) / 4.0).powi(2) <= 1.0;
        let wing = ((fx - 7.0) / 3.5).powi(2) + ((fy - 3.0) / 2.5).powi(2) <= 1.0;

        *pixel = if body {
            if x >= 13 && y == 6 {
                Rgba([0, 0, 0, 255]) // eye
            } else if (x / 3) % 2 == 1 {
                Rgba([40, 30, 10, 255])
            } else {
                Rgba([250, 200, 40, 255])
            }
        } else if wing {
            Rgba([220, 240, 255, 200])
        } else {
            Rgba([0, 0, 0, 0])
        };
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_use_generated_images() {
        let font = FontTable::new();
        let dir = std::env::temp_dir().join("bamboo-flight-no-such-assets");
        let assets = Assets::load(&dir, &font);

        assert_eq!(assets.title_frames.len(), TITLE_FRAME_COUNT);
        assert_eq!(assets.title_frames[0].dimensions(), (220, 48));
        assert!(assets.game_over_header.pixels().any(|p| p.0[3] == 255));
        assert_eq!(assets.player.dimensions(), (16, 12));
    }

    #[test]
    fn test_title_frame_wraps() {
        let assets = Assets::generated(&FontTable::new());
        assert_eq!(assets.title_frame(9), assets.title_frame(1));
    }

    /// Blinking frames use a different fill color.
    #[test]
    fn test_generated_frames_blink() {
        let font = FontTable::new();
        assert_ne!(generated_title_frame(&font, 0), generated_title_frame(&font, 4 + 2));
        assert_ne!(generated_title_frame(&font, 0), generated_title_frame(&font, 1));
    }
}
