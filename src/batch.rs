// Background batch generation: one worker thread, progress over a channel,
// cancellation through a shared flag checked between images.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::error::Error;
use crate::folder::OutputFolder;
use crate::generator::PolygonGenerator;

/// One progress message from the worker. `Finished` or `Cancelled` is always
/// the last event on the channel.
#[derive(Debug)]
pub enum BatchEvent {
    Saved { index: usize, path: PathBuf },
    Failed { index: usize, error: Error },
    Cancelled { completed: usize },
    Finished { saved: usize, failed: usize },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BatchSummary {
    pub saved: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Handle to a running batch: listen on `events`, `cancel` it, `wait` for it.
pub struct BatchHandle {
    cancel: Arc<AtomicBool>,
    events: Receiver<BatchEvent>,
    worker: JoinHandle<BatchSummary>,
}

impl BatchHandle {
    /// Ask the worker to stop before the next image. Already-saved files stay.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Live progress stream; iteration ends when the worker is done.
    pub fn events(&self) -> &Receiver<BatchEvent> {
        &self.events
    }

    /// Block until the worker is done and return the final tally.
    pub fn wait(self) -> BatchSummary {
        match self.worker.join() {
            Ok(summary) => summary,
            // A panicked worker saved nothing we can count on.
            Err(_) => BatchSummary {
                saved: 0,
                failed: 0,
                cancelled: true,
            },
        }
    }
}

/// Generate `count` images named `{prefix}_{index}.{format}` into `folder`
/// on a background thread.
///
/// A generation or save failure is reported on the channel and the batch
/// moves on to the next image; nothing is retried.
pub fn run_batch(
    mut generator: PolygonGenerator,
    folder: OutputFolder,
    count: usize,
    prefix: String,
    format: String,
) -> BatchHandle {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let (tx, events) = mpsc::channel();

    let worker = thread::spawn(move || {
        let mut saved = 0usize;
        let mut failed = 0usize;
        for index in 0..count {
            if flag.load(Ordering::Relaxed) {
                info!("batch cancelled after {} of {count} images", saved + failed);
                let _ = tx.send(BatchEvent::Cancelled {
                    completed: saved + failed,
                });
                return BatchSummary {
                    saved,
                    failed,
                    cancelled: true,
                };
            }

            let name = format!("{prefix}_{index}");
            let outcome = match generator.generate() {
                Ok(canvas) => folder.save_image(&name, canvas, &format),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(path) => {
                    saved += 1;
                    let _ = tx.send(BatchEvent::Saved { index, path });
                }
                Err(error) => {
                    failed += 1;
                    warn!("image {index}: {error}");
                    let _ = tx.send(BatchEvent::Failed { index, error });
                }
            }
        }
        info!("batch finished: {saved} saved, {failed} failed");
        let _ = tx.send(BatchEvent::Finished { saved, failed });
        BatchSummary {
            saved,
            failed,
            cancelled: false,
        }
    });

    BatchHandle {
        cancel,
        events,
        worker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::generator::{GeneratorConfig, ShapeKind};
    use std::fs;
    use std::path::Path;

    fn small_generator(seed: u64) -> PolygonGenerator {
        let config = GeneratorConfig::default()
            .with_size(32, 32)
            .with_vertex_count(5)
            .with_margins(2, 2)
            .with_colors(Color::WHITE, Color::RED)
            .with_kind(ShapeKind::Concave);
        PolygonGenerator::with_seed(config, seed).unwrap()
    }

    fn scratch(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("polygen-batch-{tag}-{}", std::process::id()))
    }

    fn saved_files(dir: &Path) -> usize {
        fs::read_dir(dir).map(|it| it.count()).unwrap_or(0)
    }

    #[test]
    fn batch_saves_every_image_and_finishes() {
        let dir = scratch("ok");
        let _ = fs::remove_dir_all(&dir);
        let folder = OutputFolder::create(&dir).unwrap();
        let handle = run_batch(
            small_generator(21),
            folder,
            3,
            "poly".to_string(),
            "png".to_string(),
        );

        let mut saves = 0;
        let mut finished = None;
        for event in handle.events().iter() {
            match event {
                BatchEvent::Saved { path, .. } => {
                    assert!(path.exists());
                    saves += 1;
                }
                BatchEvent::Finished { saved, failed } => finished = Some((saved, failed)),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(saves, 3);
        assert_eq!(finished, Some((3, 0)));

        let summary = handle.wait();
        assert_eq!(
            summary,
            BatchSummary { saved: 3, failed: 0, cancelled: false }
        );
        assert_eq!(saved_files(&dir), 3);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_batch_finishes_immediately() {
        let dir = scratch("empty");
        let _ = fs::remove_dir_all(&dir);
        let folder = OutputFolder::create(&dir).unwrap();
        let handle = run_batch(
            small_generator(1),
            folder,
            0,
            "poly".to_string(),
            "png".to_string(),
        );
        let summary = handle.wait();
        assert_eq!(
            summary,
            BatchSummary { saved: 0, failed: 0, cancelled: false }
        );
        assert_eq!(saved_files(&dir), 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn cancel_stops_the_batch_early_or_not_at_all() {
        let dir = scratch("cancel");
        let _ = fs::remove_dir_all(&dir);
        let folder = OutputFolder::create(&dir).unwrap();
        let handle = run_batch(
            small_generator(8),
            folder,
            200,
            "poly".to_string(),
            "png".to_string(),
        );

        // Wait for the first save so the worker is demonstrably running,
        // then pull the plug.
        let first = handle.events().recv().unwrap();
        assert!(matches!(first, BatchEvent::Saved { index: 0, .. }));
        handle.cancel();

        let summary = handle.wait();
        let completed = summary.saved + summary.failed;
        assert!(completed >= 1);
        // Either the cancel landed between images, or the worker had already
        // run to completion; both are well-formed ends.
        if summary.cancelled {
            assert!(completed < 200);
        } else {
            assert_eq!(completed, 200);
        }
        assert_eq!(saved_files(&dir), summary.saved);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn per_image_failures_do_not_stop_the_batch() {
        let dir = scratch("fail");
        let _ = fs::remove_dir_all(&dir);
        let folder = OutputFolder::create(&dir).unwrap();
        // A 2-vertex request fails in the shape stage on every single image.
        let config = GeneratorConfig::default()
            .with_size(32, 32)
            .with_vertex_count(2);
        let generator = PolygonGenerator::with_seed(config, 4).unwrap();
        let handle = run_batch(generator, folder, 4, "poly".to_string(), "png".to_string());

        let mut failures = 0;
        for event in handle.events().iter() {
            match event {
                BatchEvent::Failed { error, .. } => {
                    assert!(matches!(error, Error::InsufficientVertices { .. }));
                    failures += 1;
                }
                BatchEvent::Finished { saved, failed } => {
                    assert_eq!((saved, failed), (0, 4));
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(failures, 4);
        assert_eq!(
            handle.wait(),
            BatchSummary { saved: 0, failed: 4, cancelled: false }
        );
        assert_eq!(saved_files(&dir), 0);
        let _ = fs::remove_dir_all(&dir);
    }
}
