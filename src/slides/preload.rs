use crate::foundation::core::ContentList;
use crate::slides::sampler::ImageLoader;

/// Counts image loads before a preload-gated slideshow is shown.
///
/// Failed loads count as loaded so a broken image never blocks entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreloadGate {
    total: usize,
    loaded: usize,
    failed: usize,
}

impl PreloadGate {
    /// Gate waiting on `total` images.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            loaded: 0,
            failed: 0,
        }
    }

    /// Record one finished load. Extra reports past `total` are ignored.
    pub fn record(&mut self, ok: bool) {
        if self.done() >= self.total {
            return;
        }
        if ok {
            self.loaded += 1;
        } else {
            self.failed += 1;
        }
    }

    fn done(&self) -> usize {
        self.loaded + self.failed
    }

    /// Images that failed to load.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Return `true` once every image has reported, successfully or not.
    pub fn is_ready(&self) -> bool {
        self.done() >= self.total
    }

    /// Fraction of finished loads in `[0, 1]`; an empty gate is complete.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.done() as f64 / self.total as f64
    }
}

/// Load every slide image of `content` through `loader`, counting failures as loaded.
#[tracing::instrument(skip_all, fields(total = content.len()))]
pub fn preload_content(loader: &dyn ImageLoader, content: &ContentList) -> PreloadGate {
    let mut gate = PreloadGate::new(content.len());
    for item in content.iter() {
        let ok = match loader.load(&item.image_url) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(url = %item.image_url, error = %err, "preload failed");
                false
            }
        };
        gate.record(ok);
    }
    gate
}

#[cfg(test)]
#[path = "../../tests/unit/slides/preload.rs"]
mod tests;
