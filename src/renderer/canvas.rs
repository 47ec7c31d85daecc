//! Offscreen render target for the logical game screen.
//!
//! Every screen draws into a [`Canvas`] sized to the fixed logical resolution. The canvas keeps
//! a current draw color that point, rectangle and clear operations use, mirroring a classic
//! 2D renderer API. Once a frame is complete, the presenter uploads the raw RGBA bytes to the GPU.

use image::{Rgba, RgbaImage};
use std::ops::{Deref, DerefMut};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

/// An integer rectangle in canvas pixel coordinates.
///
/// The origin may lie outside the canvas; drawing is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns a rectangle moved by `(dx, dy)` with the same size.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }

    /// Returns a rectangle with the same origin, shrunk by `dw` and `dh` (saturating at zero).
    pub const fn shrink(self, dw: u32, dh: u32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            w: self.w.saturating_sub(dw),
            h: self.h.saturating_sub(dh),
        }
    }
}

/// CPU-side render target with a current draw color.
#[derive(Debug, Clone)]
pub struct Canvas {
    target: RgbaImage,
    draw_color: Color,
}

impl Canvas {
    /// Creates a transparent canvas with a black draw color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: RgbaImage::new(width, height),
            draw_color: Color::BLACK,
        }
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Temporarily replaces the draw color.
    ///
    /// The previous color is restored when the returned guard is dropped, so callers can draw
    /// through the guard without leaking their color into unrelated drawing.
    pub fn with_draw_color(&mut self, color: Color) -> DrawColorGuard<'_> {
        let previous = self.draw_color;
        self.draw_color = color;
        DrawColorGuard {
            canvas: self,
            previous,
        }
    }

    /// Fills the whole canvas with the draw color.
    pub fn clear(&mut self) {
        let pixel = Rgba::from(self.draw_color);
        for p in self.target.pixels_mut() {
            *p = pixel;
        }
    }

    /// Sets a single pixel to the draw color. Points outside the canvas are ignored.
    pub fn draw_point(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width() && y < self.height() {
            self.target.put_pixel(x, y, Rgba::from(self.draw_color));
        }
    }

    /// Alpha-blends `sprite` onto the canvas with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, sprite: &RgbaImage, x: i32, y: i32) {
        image::imageops::overlay(&mut self.target, sprite, x as i64, y as i64);
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.target.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }

    /// Raw RGBA8 bytes, row-major, `4 * width` bytes per row.
    pub fn as_raw(&self) -> &[u8] {
        self.target.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.target
    }
}

/// Restores the canvas draw color on drop. See [`Canvas::with_draw_color`].
pub struct DrawColorGuard<'a> {
    canvas: &'a mut Canvas,
    previous: Color,
}

impl Deref for DrawColorGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for DrawColorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for DrawColorGuard<'_> {
    fn drop(&mut self) {
        self.canvas.draw_color = self.previous;
    }
}
