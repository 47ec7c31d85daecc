//! Scrolling parallax background.
//!
//! The background is a stack of horizontally tiling layers drawn back to front, each aligned to
//! the bottom of the screen and scrolling left at its own speed. Layers that cannot be loaded
//! from disk are generated procedurally with random shapes.

use crate::assets::load_image;
use crate::game::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::canvas::Canvas;
use image::{Rgba, RgbaImage};
use rand::Rng;
use std::path::Path;

/// Layer file stems from farthest to nearest, with their scroll speeds in pixels per second.
pub const LAYERS: [(&str, f32); 8] = [
    ("Sky", 0.0),
    ("Mountains", 4.0),
    ("Clouds3", 8.0),
    ("Clouds2", 12.0),
    ("Clouds1", 16.0),
    ("Grass3", 32.0),
    ("Grass2", 48.0),
    ("Grass1", 64.0),
];

/// One tiling image and its scroll state.
pub struct ParallaxLayer {
    pub image: RgbaImage,
    /// Scroll position in pixels, always within `0..image.width()`.
    pub offset: f32,
    /// Pixels per second.
    pub speed: f32,
}

impl ParallaxLayer {
    pub fn new(image: RgbaImage, speed: f32) -> Self {
        Self {
            image,
            offset: 0.0,
            speed,
        }
    }

    fn advance(&mut self, elapsed_ms: u32) {
        let width = self.image.width() as f32;
        if width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed * elapsed_ms as f32 / 1000.0).rem_euclid(width);
    }

    fn draw(&self, canvas: &mut Canvas) {
        let width = self.image.width() as i32;
        if width == 0 {
            return;
        }
        let y = canvas.height() as i32 - self.image.height() as i32;
        let mut x = -(self.offset as i32);
        while x < canvas.width() as i32 {
            canvas.blit(&self.image, x, y);
            x += width;
        }
    }
}

pub struct Background {
    layers: Vec<ParallaxLayer>,
}

impl Background {
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self { layers }
    }

    /// Loads `<name>.png` for every layer in [`LAYERS`] from `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut rng = rand::thread_rng();
        let layers = LAYERS
            .iter()
            .map(|&(name, speed)| {
                let image = load_image(dir, &format!("{name}.png"), || {
                    generate_layer(name, &mut rng)
                });
                ParallaxLayer::new(image, speed)
            })
            .collect();
        Self { layers }
    }

    /// Every layer generated, without touching the filesystem.
    pub fn generated() -> Self {
        let mut rng = rand::thread_rng();
        let layers = LAYERS
            .iter()
            .map(|&(name, speed)| ParallaxLayer::new(generate_layer(name, &mut rng), speed))
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// Scrolls every layer by `elapsed_ms` worth of movement.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for layer in &mut self.layers {
            layer.advance(elapsed_ms);
        }
    }

    /// Draws all layers, farthest first.
    pub fn draw(&self, canvas: &mut Canvas) {
        for layer in &self.layers {
            layer.draw(canvas);
        }
    }
}

fn generate_layer(name: &str, rng: &mut impl Rng) -> RgbaImage {
    match name {
        "Sky" => sky(),
        "Mountains" => ridge(rng, 110, 40.0, Rgba([96, 112, 150, 255])),
        "Clouds3" => clouds(rng, 150, 4, 200),
        "Clouds2" => clouds(rng, 130, 3, 225),
        "Clouds1" => clouds(rng, 110, 3, 250),
        "Grass3" => ridge(rng, 44, 8.0, Rgba([70, 140, 60, 255])),
        "Grass2" => ridge(rng, 30, 6.0, Rgba([50, 120, 45, 255])),
        _ => ridge(rng, 18, 4.0, Rgba([35, 95, 35, 255])),
    }
}

fn sky() -> RgbaImage {
    RgbaImage::from_fn(SCREEN_WIDTH, SCREEN_HEIGHT, |_, y| {
        let t = y as f32 / SCREEN_HEIGHT as f32;
        let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
        Rgba([lerp(70.0, 180.0), lerp(130.0, 220.0), lerp(210.0, 250.0), 255])
    })
}

/// A strip whose top edge is a sum of sine waves with random phases, tiling seamlessly.
fn ridge(rng: &mut impl Rng, height: u32, amplitude: f32, color: Rgba<u8>) -> RgbaImage {
    let tau = std::f32::consts::TAU;
    let phases: [f32; 3] = [
        rng.gen_range(0.0..tau),
        rng.gen_range(0.0..tau),
        rng.gen_range(0.0..tau),
    ];
    let width = SCREEN_WIDTH as f32;

    RgbaImage::from_fn(SCREEN_WIDTH, height, |x, y| {
        let u = x as f32 / width * tau;
        let wave = (u * 2.0 + phases[0]).sin() * 0.5
            + (u * 5.0 + phases[1]).sin() * 0.3
            + (u * 11.0 + phases[2]).sin() * 0.2;
        let top = amplitude * (1.0 - wave);
        if y as f32 >= top {
            color
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Soft white ellipses scattered across a transparent strip.
fn clouds(rng: &mut impl Rng, height: u32, count: usize, alpha: u8) -> RgbaImage {
    let mut img = RgbaImage::new(SCREEN_WIDTH, height);
    let top_band = (height / 3).max(1) as f32;

    for _ in 0..count {
        let cx = rng.gen_range(0.0..SCREEN_WIDTH as f32);
        let cy = rng.gen_range(8.0..top_band + 8.0);
        let rx = rng.gen_range(18.0..40.0f32);
        let ry = rng.gen_range(5.0..10.0f32);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            // Measure across the wrap seam so the strip tiles.
            let mut dx = (x as f32 - cx).abs();
            dx = dx.min(SCREEN_WIDTH as f32 - dx);
            let dy = y as f32 - cy;
            if (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0 {
                *pixel = Rgba([255, 255, 255, alpha]);
            }
        }
    }
    img
}
