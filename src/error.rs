// One error type for the whole crate.
// Every variant carries the numbers that explain *why* the operation failed.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The canvas is zero-sized, or the margins leave no room to sample in.
    #[error("no valid coordinates in {width}x{height} with margins ({width_margin}, {height_margin})")]
    InvalidDimension {
        width: u32,
        height: u32,
        width_margin: u32,
        height_margin: u32,
    },

    /// A polygon was requested with more sides than there are points to use,
    /// or with fewer than the three any polygon needs.
    #[error("requested a {requested}-sided polygon but only {available} vertices are available")]
    InsufficientVertices { requested: usize, available: usize },

    /// The convex hull never reached the requested vertex count.
    #[error("hull stuck below {target} vertices after {rounds} injection rounds")]
    ConvergenceFailure { target: usize, rounds: usize },

    /// The convex hull grew past the requested vertex count.
    #[error("hull reached {reached} vertices, past the target of {target}")]
    HullOvershoot { target: usize, reached: usize },

    /// The output directory and all of its renamed siblings already exist.
    #[error("`{path}` and {attempts} renamed siblings already exist")]
    NameCollision { path: String, attempts: usize },

    /// File extension the image encoder does not know.
    #[error("unsupported image format `{0}`")]
    UnsupportedFormat(String),

    /// Creating or updating the preview window failed.
    #[error("window: {0}")]
    Window(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
