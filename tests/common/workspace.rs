//! Temporary working directory for integration tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use imgproc::codec;
use imgproc::models::NamedFilter;
use imgproc::services::{DirectoryFilterStore, FilterStore};
use pixel_filters::Image;

/// A temp directory holding a filter store plus input and output images
pub struct TestWorkspace {
    dir: TempDir,
    pub store: DirectoryFilterStore,
}

impl TestWorkspace {
    /// Create a workspace with an empty `filters/` store
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = DirectoryFilterStore::new(dir.path().join("filters"))
            .expect("Failed to open filter store");
        Self { dir, store }
    }

    /// Root of the workspace
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path for a file in the workspace
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `image` as a PNG and return its path
    pub fn write_png(&self, name: &str, image: &Image) -> PathBuf {
        let path = self.file(name);
        codec::save_image(&path, image).expect("Failed to write PNG");
        path
    }

    /// Read a PNG written to the workspace
    pub fn read_png(&self, name: &str) -> Image {
        codec::load_image(&self.file(name)).expect("Failed to read PNG")
    }

    /// Write a text file (pipelines, config) and return its path
    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Save a kernel into the store
    pub fn save_filter(&self, name: &str, kernel: Vec<Vec<f64>>, divisor: f64, offset: f64) {
        self.store
            .save(&NamedFilter::new(name, kernel, divisor, offset))
            .expect("Failed to save filter");
    }
}
