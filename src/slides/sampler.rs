use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Context as _;

use crate::config::BrightnessConfig;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::slides::brightness::{Brightness, classify};

/// Source of encoded image bytes.
pub trait ImageLoader: Send + Sync {
    /// Fetch the encoded bytes behind `url`.
    fn load(&self, url: &str) -> VitrineResult<Vec<u8>>;
}

impl<F> ImageLoader for F
where
    F: Fn(&str) -> VitrineResult<Vec<u8>> + Send + Sync,
{
    fn load(&self, url: &str) -> VitrineResult<Vec<u8>> {
        self(url)
    }
}

/// Loads images from a directory; urls are paths relative to it.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, url: &str) -> VitrineResult<Vec<u8>> {
        let rel = normalize_rel_path(url)?;
        let path = self.root.join(&rel);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Normalize an image path relative to a loader root.
///
/// Uses `/` separators and drops `.` segments. Absolute paths and `..` are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> VitrineResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(VitrineError::validation("image path must be non-empty"));
    }
    if s.starts_with('/') || s.split('/').next().is_some_and(|p| p.ends_with(':')) {
        return Err(VitrineError::validation("image paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(VitrineError::validation("image paths must not contain '..'"));
            }
            _ => out.push(part),
        }
    }
    if out.is_empty() {
        return Err(VitrineError::validation("image path must contain a file name"));
    }
    Ok(out.join("/"))
}

struct Sample {
    generation: u64,
    brightness: Brightness,
}

/// Samples slide brightness on detached worker threads.
///
/// Every [`request`](Self::request) bumps the generation; results tagged with an older
/// generation are discarded when they arrive.
pub struct BrightnessSampler {
    loader: Arc<dyn ImageLoader>,
    cfg: BrightnessConfig,
    tx: mpsc::Sender<Sample>,
    rx: mpsc::Receiver<Sample>,
    generation: u64,
}

impl std::fmt::Debug for BrightnessSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrightnessSampler")
            .field("cfg", &self.cfg)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl BrightnessSampler {
    /// Sampler reading image bytes through `loader`.
    pub fn new(loader: Arc<dyn ImageLoader>, cfg: BrightnessConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            loader,
            cfg,
            tx,
            rx,
            generation: 0,
        }
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start sampling `url`, superseding any request still in flight.
    #[tracing::instrument(skip(self))]
    pub fn request(&mut self, url: &str) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let loader = Arc::clone(&self.loader);
        let cfg = self.cfg.clone();
        let tx = self.tx.clone();
        let url = url.to_owned();

        let spawned = std::thread::Builder::new()
            .name("vitrine-brightness".into())
            .spawn(move || {
                let brightness = match loader.load(&url) {
                    Ok(bytes) => classify(&bytes, &cfg),
                    Err(err) => {
                        tracing::warn!(
                            %url,
                            error = %err,
                            "slide image load failed; assuming dark"
                        );
                        Brightness::FALLBACK
                    }
                };
                // The receiver is gone once the slideshow unmounts.
                let _ = tx.send(Sample {
                    generation,
                    brightness,
                });
            });
        if let Err(err) = spawned {
            tracing::warn!(error = %err, "could not start brightness worker; assuming dark");
            let _ = self.tx.send(Sample {
                generation,
                brightness: Brightness::FALLBACK,
            });
        }
        generation
    }

    /// Latest result for the current generation, if one arrived since the last poll.
    pub fn poll(&mut self) -> Option<Brightness> {
        let mut latest = None;
        while let Ok(sample) = self.rx.try_recv() {
            latest = self.accept(sample).or(latest);
        }
        latest
    }

    /// Block until the current request reports or `timeout` passes; a timeout settles dark.
    pub fn wait(&mut self, timeout: Duration) -> Brightness {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(sample) => {
                    if let Some(b) = self.accept(sample) {
                        return b;
                    }
                }
                Err(_) => {
                    tracing::warn!(
                        generation = self.generation,
                        ?timeout,
                        "brightness sample timed out; assuming dark"
                    );
                    return Brightness::FALLBACK;
                }
            }
        }
    }

    fn accept(&self, sample: Sample) -> Option<Brightness> {
        if sample.generation == self.generation {
            Some(sample.brightness)
        } else {
            tracing::debug!(
                stale = sample.generation,
                current = self.generation,
                "discarded stale brightness sample"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slides/sampler.rs"]
mod tests;
