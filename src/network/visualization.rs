//! The rendering capability contract.
//!
//! Some algorithms also produce graphics. Their rendering lifecycle is driven
//! entirely by the rendering thread: `prepare()` once, then `update()` and
//! `render()` every frame, and `finalize()` on shutdown. The only
//! synchronization with the worker thread is the render-request flag and the
//! immutable dataset snapshots handed over through connectors.

use crate::error::Result;
use crate::types::BoundingBox;
use std::sync::atomic::{AtomicBool, Ordering};

/// Interface for algorithms that output graphics.
pub trait Visualization: Send + Sync {
    /// Acquire drawing resources. Runs on the rendering thread before the
    /// first frame.
    fn prepare(&self) -> Result<()>;

    /// Called between frames. Rebuild drawing resources if new data is
    /// pending; must be cheap when nothing changed.
    fn update(&self);

    /// Draw the current frame.
    fn render(&self) -> Result<()>;

    /// Release drawing resources. Runs on the rendering thread after the
    /// last frame.
    fn finalize(&self);

    /// The spatial extent of the rendered geometry, used for camera framing.
    /// Degenerate until data has been produced. Must be fast; this is called
    /// from the rendering thread.
    fn bounding_box(&self) -> BoundingBox;

    /// Mark that new data is ready and an update/render cycle is needed.
    /// Called from the worker thread out of `process()`.
    fn request_render(&self);

    /// True if an update/render cycle has been requested.
    fn is_render_requested(&self) -> bool;
}

/// Shared implementation of the render-request flag.
///
/// `process()` on the worker thread sets the flag; `update()` on the render
/// thread atomically test-and-clears it to decide whether to rebuild
/// resources.
#[derive(Debug, Default)]
pub struct RenderRequest {
    requested: AtomicBool,
}

impl RenderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Read the flag without clearing it.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Atomically clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_request_take_clears() {
        let flag = RenderRequest::new();
        assert!(!flag.is_requested());

        flag.request();
        assert!(flag.is_requested());

        assert!(flag.take());
        assert!(!flag.is_requested());
        assert!(!flag.take());
    }
}
