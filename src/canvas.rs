// RGB canvas + software polygon rasterization.
// The buffer is row-major, 3 bytes per pixel, and is what every other part of
// the crate hands around: the generator draws into it, the folder encodes it,
// the preview packs it for the window.

use image::RgbImage;

use crate::error::{Error, Result};
use crate::geometry::Point;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bitwise complement per channel.
    pub const fn inverted(self) -> Self {
        Self::new(!self.r, !self.g, !self.b)
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    antialias: bool,
    pixels: Vec<u8>, // width * height * 3, row-major RGB
}

impl Canvas {
    /// A background-filled canvas. Zero on either axis is `InvalidDimension`.
    pub fn new(width: u32, height: u32, background: Color, antialias: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension {
                width,
                height,
                width_margin: 0,
                height_margin: 0,
            });
        }
        let mut canvas = Self {
            width,
            height,
            background,
            antialias,
            pixels: vec![0; width as usize * height as usize * 3],
        };
        canvas.reset();
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Raw RGB bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The color at (x, y), or None outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Color::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
        ))
    }

    /// Flood the whole buffer with the background color.
    /// Visual: whatever was drawn before is gone; the canvas is uniform again.
    pub fn reset(&mut self) {
        let bg = self.background;
        for px in self.pixels.chunks_exact_mut(3) {
            px[0] = bg.r;
            px[1] = bg.g;
            px[2] = bg.b;
        }
    }

    /// Paint the closed contour solid, even-odd rule, sampled at pixel
    /// centers. With antialiasing on, the edges are additionally drawn as
    /// coverage-blended lines. Fewer than three points paints nothing, and
    /// geometry outside the canvas is clipped.
    pub fn fill(&mut self, contour: &[Point], color: Color) {
        let n = contour.len();
        if n < 3 {
            return;
        }

        // 1) Vertical extent of the contour, clamped to the rows whose
        //    centers (y + 0.5) can actually lie inside it.
        let (min_y, max_y) = contour
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let y_start = min_y.max(0);
        let y_end = max_y.saturating_sub(1).min(self.height as i32 - 1);

        // 2) Scanline pass. Vertices are integers and centers are k + 0.5,
        //    so a scanline never runs exactly through a vertex and every
        //    crossing is a proper one.
        let mut xs: Vec<f64> = Vec::with_capacity(n);
        for y in y_start..=y_end {
            let yc = y as f64 + 0.5;
            xs.clear();
            for i in 0..n {
                let a = contour[i];
                let b = contour[(i + 1) % n];
                let (ay, by) = (a.y as f64, b.y as f64);
                if (ay <= yc) != (by <= yc) {
                    let t = (yc - ay) / (by - ay);
                    xs.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
                }
            }
            xs.sort_unstable_by(|p, q| p.total_cmp(q));

            // 3) Even-odd: every [entry, exit) pair is an interior span.
            for pair in xs.chunks_exact(2) {
                self.fill_span(y, pair[0], pair[1], color);
            }
        }

        // 4) Optional smooth edges on top of the solid interior.
        if self.antialias {
            for i in 0..n {
                self.draw_edge_aa(contour[i], contour[(i + 1) % n], color);
            }
        }
    }

    /// A new canvas with every channel bitwise-complemented.
    /// Visual: black shape on white becomes white shape on black.
    pub fn inverted(&self) -> Canvas {
        let mut out = self.clone();
        for byte in &mut out.pixels {
            *byte = !*byte;
        }
        out.background = self.background.inverted();
        out
    }

    /// Copy into an `image` buffer for encoding to disk.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let i = self.index(x, y);
            image::Rgb([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
        })
    }

    /// Pack the buffer as 0x00RRGGBB words for a minifb window.
    pub fn to_argb_buffer(&self) -> Vec<u32> {
        self.pixels
            .chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | (px[2] as u32))
            .collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Set one pixel if (x, y) is inside the canvas.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
    }

    /// Mix `color` over the existing pixel by `coverage` in [0, 1].
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f64) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return;
        }
        let t = coverage.clamp(0.0, 1.0);
        let i = self.index(x, y);
        let mix = |old: u8, new: u8| (old as f64 + (new as f64 - old as f64) * t).round() as u8;
        self.pixels[i] = mix(self.pixels[i], color.r);
        self.pixels[i + 1] = mix(self.pixels[i + 1], color.g);
        self.pixels[i + 2] = mix(self.pixels[i + 2], color.b);
    }

    /// Paint the pixels of row `y` whose centers fall inside [xl, xr].
    fn fill_span(&mut self, y: i32, xl: f64, xr: f64, color: Color) {
        let start = ((xl - 0.5).ceil() as i32).max(0);
        let end = ((xr - 0.5).floor() as i32).min(self.width as i32 - 1);
        for x in start..=end {
            self.put_pixel(x, y, color);
        }
    }

    /// Wu-style antialiased line from a to b, blended over the buffer.
    /// Visual: the staircase along the contour softens into a smooth edge.
    fn draw_edge_aa(&mut self, a: Point, b: Point, color: Color) {
        let (mut x0, mut y0) = (a.x as f64, a.y as f64);
        let (mut x1, mut y1) = (b.x as f64, b.y as f64);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

        // Endpoints are integers, so there is no fractional end cap to
        // special-case; walk the major axis and split coverage between the
        // two pixels the minor coordinate straddles.
        let mut y = y0;
        for x in (x0 as i32)..=(x1 as i32) {
            let base = y.floor();
            let f = y - base;
            let yi = base as i32;
            if steep {
                self.blend_pixel(yi, x, color, 1.0 - f);
                self.blend_pixel(yi.saturating_add(1), x, color, f);
            } else {
                self.blend_pixel(x, yi, color, 1.0 - f);
                self.blend_pixel(x, yi.saturating_add(1), color, f);
            }
            y += gradient;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A triangle that sits comfortably inside an 80x60 canvas.
    const TRIANGLE: [Point; 3] = [Point::new(10, 10), Point::new(60, 12), Point::new(30, 50)];

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10, Color::WHITE, false),
            Err(Error::InvalidDimension { width: 0, .. })
        ));
        assert!(matches!(
            Canvas::new(10, 0, Color::WHITE, false),
            Err(Error::InvalidDimension { height: 0, .. })
        ));
    }

    #[test]
    fn reset_restores_the_background_and_is_idempotent() {
        let mut canvas = Canvas::new(32, 32, Color::RED, false).unwrap();
        let fresh = canvas.pixels().to_vec();
        canvas.fill(&TRIANGLE, Color::BLACK);
        assert_ne!(canvas.pixels(), fresh.as_slice());
        canvas.reset();
        assert_eq!(canvas.pixels(), fresh.as_slice());
        canvas.reset();
        assert_eq!(canvas.pixels(), fresh.as_slice());
    }

    #[test]
    fn triangle_fill_paints_interior_and_spares_corners() {
        let mut canvas = Canvas::new(80, 60, Color::WHITE, false).unwrap();
        canvas.fill(&TRIANGLE, Color::BLACK);
        assert_eq!(canvas.pixel(30, 25), Some(Color::BLACK));
        for (x, y) in [(0, 0), (79, 0), (0, 59), (79, 59)] {
            assert_eq!(canvas.pixel(x, y), Some(Color::WHITE));
        }
    }

    #[test]
    fn antialiasing_keeps_the_interior_solid() {
        let mut canvas = Canvas::new(80, 60, Color::WHITE, true).unwrap();
        canvas.fill(&TRIANGLE, Color::BLACK);
        assert_eq!(canvas.pixel(30, 25), Some(Color::BLACK));
        for (x, y) in [(0, 0), (79, 0), (0, 59), (79, 59)] {
            assert_eq!(canvas.pixel(x, y), Some(Color::WHITE));
        }
    }

    #[test]
    fn fewer_than_three_points_paints_nothing() {
        let mut canvas = Canvas::new(16, 16, Color::WHITE, true).unwrap();
        let fresh = canvas.pixels().to_vec();
        canvas.fill(&[Point::new(2, 2), Point::new(12, 12)], Color::BLACK);
        assert_eq!(canvas.pixels(), fresh.as_slice());
    }

    #[test]
    fn contours_hanging_off_the_canvas_are_clipped() {
        let mut canvas = Canvas::new(20, 20, Color::WHITE, true).unwrap();
        let contour = [Point::new(-10, -10), Point::new(30, -5), Point::new(10, 30)];
        canvas.fill(&contour, Color::BLACK);
        assert_eq!(canvas.pixel(10, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 5), Some(Color::BLACK));
    }

    #[test]
    fn contours_at_the_coordinate_floor_are_clipped() {
        // All the way off-canvas at the integer floor; fill must clip, not
        // overflow on the row range.
        let mut canvas = Canvas::new(20, 20, Color::WHITE, true).unwrap();
        let fresh = canvas.pixels().to_vec();
        let contour = [
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MIN + 5, i32::MIN),
            Point::new(i32::MIN + 2, i32::MIN),
        ];
        canvas.fill(&contour, Color::BLACK);
        assert_eq!(canvas.pixels(), fresh.as_slice());
    }

    #[test]
    fn inversion_complements_and_round_trips() {
        let mut canvas = Canvas::new(40, 40, Color::WHITE, false).unwrap();
        canvas.fill(&TRIANGLE, Color::BLACK);
        let inv = canvas.inverted();
        assert_eq!(inv.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(inv.pixel(30, 25), Some(Color::WHITE));
        assert_eq!(inv.background(), Color::BLACK);
        assert_eq!(inv.inverted().pixels(), canvas.pixels());
    }

    #[test]
    fn argb_buffer_packs_rgb_into_words() {
        let canvas = Canvas::new(1, 1, Color::RED, false).unwrap();
        assert_eq!(canvas.to_argb_buffer(), vec![0x00FF0000]);
        let canvas = Canvas::new(2, 1, Color::new(0x12, 0x34, 0x56), false).unwrap();
        assert_eq!(canvas.to_argb_buffer(), vec![0x00123456, 0x00123456]);
    }

    #[test]
    fn image_export_matches_the_buffer() {
        let canvas = Canvas::new(3, 2, Color::BLUE, false).unwrap();
        let img = canvas.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &image::Rgb([0, 0, 255]));
    }

    #[test]
    fn color_inversion_is_involutive() {
        let c = Color::new(12, 200, 97);
        assert_eq!(c.inverted().inverted(), c);
        assert_eq!(Color::WHITE.inverted(), Color::BLACK);
    }
}
