//! File readers: black-box producers of typed datasets.
//!
//! A reader declares which paths it can handle and either returns a dataset
//! or fails with a descriptive, recoverable error. The network picks the
//! first capable reader and never retries on failure.

pub mod obj;

use crate::error::Result;
use crate::types::Dataset;
use std::path::Path;

pub use obj::ObjReader;

/// Contract for file-format readers.
pub trait Reader: Send + Sync {
    /// Human-readable name of this reader.
    fn name(&self) -> &str;

    /// True if this reader can handle the given path (usually by extension).
    fn can_load(&self, path: &Path) -> bool;

    /// Load the file into a dataset.
    fn load(&self, path: &Path) -> Result<Dataset>;
}
