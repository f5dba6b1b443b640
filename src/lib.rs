//! Random polygon raster images: sample vertices, build a convex or concave
//! contour, rasterize it onto an RGB canvas, then save or preview the result.

pub mod batch;
pub mod canvas;
pub mod error;
pub mod folder;
pub mod generator;
pub mod geometry;
pub mod preview;
pub mod sampler;
pub mod shape;

pub use canvas::{Canvas, Color};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, PolygonGenerator, ShapeKind};
