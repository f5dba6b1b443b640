// Output directory handling: create-with-rename, then save canvases into it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::info;

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// How many `_copy_(i)` siblings are tried before giving up.
const RENAME_ATTEMPTS: usize = 20;

/// A directory that images get saved into.
#[derive(Debug)]
pub struct OutputFolder {
    path: PathBuf,
}

impl OutputFolder {
    /// Create `path` as a fresh directory. If it already exists, fall back to
    /// `{path}_copy_(0)`, `{path}_copy_(1)`, ... up to a fixed cap, and fail
    /// with `NameCollision` once the cap is exhausted.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let base = path.as_ref();
        if let Some(parent) = base.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        if try_create(base)? {
            info!("created output folder {}", base.display());
            return Ok(Self { path: base.to_path_buf() });
        }

        for i in 0..RENAME_ATTEMPTS {
            let candidate = PathBuf::from(format!("{}_copy_({i})", base.display()));
            if try_create(&candidate)? {
                info!(
                    "{} already exists, using {} instead",
                    base.display(),
                    candidate.display()
                );
                return Ok(Self { path: candidate });
            }
        }

        Err(Error::NameCollision {
            path: base.display().to_string(),
            attempts: RENAME_ATTEMPTS,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode the canvas as `{name}.{format}` inside the folder and return
    /// the full path. The format is picked by extension; anything the encoder
    /// does not know is `UnsupportedFormat`.
    pub fn save_image(&self, name: &str, canvas: &Canvas, format: &str) -> Result<PathBuf> {
        let encoder = ImageFormat::from_extension(format)
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;
        let file = self.path.join(format!("{name}.{format}"));
        canvas.to_image().save_with_format(&file, encoder)?;
        Ok(file)
    }
}

/// Ok(true) if the directory was created, Ok(false) if it already existed.
fn try_create(path: &Path) -> Result<bool> {
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}
