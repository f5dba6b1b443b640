// The facade: one configured generator owning a reusable canvas and an RNG,
// turning config + randomness into a finished polygon image per call.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::canvas::{Canvas, Color};
use crate::error::Result;
use crate::sampler;
use crate::shape;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeKind {
    Convex,
    Concave,
}

/// Everything a generator needs to know, in one plain struct.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub vertex_count: usize,
    pub width_margin: u32,
    pub height_margin: u32,
    pub background: Color,
    pub foreground: Color,
    pub antialias: bool,
    pub kind: ShapeKind,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            vertex_count: 5,
            width_margin: 0,
            height_margin: 0,
            background: Color::WHITE,
            foreground: Color::BLACK,
            antialias: true,
            kind: ShapeKind::Convex,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    pub fn with_margins(mut self, width_margin: u32, height_margin: u32) -> Self {
        self.width_margin = width_margin;
        self.height_margin = height_margin;
        self
    }

    pub fn with_colors(mut self, background: Color, foreground: Color) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }
}

pub struct PolygonGenerator {
    config: GeneratorConfig,
    canvas: Canvas,
    rng: StdRng,
}

impl PolygonGenerator {
    /// A generator with OS-entropy randomness.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A generator whose whole output stream is reproducible from `seed`.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self> {
        let canvas = Canvas::new(
            config.width,
            config.height,
            config.background,
            config.antialias,
        )?;
        Ok(Self {
            config,
            canvas,
            rng,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The canvas as of the last `generate` call (background-only before the
    /// first one, or after a failed one).
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Switch between convex and concave without touching the canvas.
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.config.kind = kind;
    }

    /// Draw one fresh polygon with the configured vertex count.
    pub fn generate(&mut self) -> Result<&Canvas> {
        self.generate_with(self.config.vertex_count)
    }

    /// Draw one fresh polygon with `vertex_count` vertices, overriding the
    /// configured count for this call only.
    ///
    /// The canvas is reset up front, so on error it is left background-only
    /// rather than holding a half-drawn shape.
    pub fn generate_with(&mut self, vertex_count: usize) -> Result<&Canvas> {
        self.canvas.reset();
        let vertices = sampler::sample_points(
            &mut self.rng,
            vertex_count,
            self.config.width,
            self.config.height,
            self.config.width_margin,
            self.config.height_margin,
        )?;
        let contour = match self.config.kind {
            ShapeKind::Convex => shape::convex_contour(
                &mut self.rng,
                vertices,
                vertex_count,
                self.config.width,
                self.config.height,
            )?,
            ShapeKind::Concave => shape::concave_contour(vertices, vertex_count)?,
        };
        self.canvas.fill(&contour, self.config.foreground);
        Ok(&self.canvas)
    }
}
