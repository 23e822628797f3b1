use pixel_filters::{Filter, FilterError, Image};

use super::history::History;

/// An image being edited: the loaded original, the current result, and undo history
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Image,
    current: Image,
    history: History,
}

impl EditSession {
    pub fn new(image: Image) -> Self {
        Self::with_history(image, History::new())
    }

    pub fn with_history(image: Image, history: History) -> Self {
        Self {
            original: image.clone(),
            current: image,
            history,
        }
    }

    pub fn original(&self) -> &Image {
        &self.original
    }

    pub fn current(&self) -> &Image {
        &self.current
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply `filter` to the current image.
    ///
    /// On failure the current image and history are unchanged.
    pub fn apply(&mut self, filter: &Filter) -> Result<(), FilterError> {
        let result = filter.apply(&self.current)?;
        let label = filter.to_string();
        let previous = std::mem::replace(&mut self.current, result);
        self.history.push(previous, label.as_str());
        tracing::info!(filter = %label, undo_depth = self.history.len(), "Applied filter");
        Ok(())
    }

    /// Apply filters in order, stopping at the first failure.
    ///
    /// Returns how many were applied before the failure along with the error.
    pub fn apply_all(&mut self, filters: &[Filter]) -> Result<usize, (usize, FilterError)> {
        for (index, filter) in filters.iter().enumerate() {
            self.apply(filter).map_err(|e| (index, e))?;
        }
        Ok(filters.len())
    }

    /// Restore the image before the last applied filter
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                tracing::info!(filter = %snapshot.label, "Undid filter");
                self.current = snapshot.image;
                true
            }
            None => false,
        }
    }

    /// Back to the original image with empty history
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.history.clear();
    }

    /// Replace the image being edited and clear history
    pub fn load(&mut self, image: Image) {
        self.original = image.clone();
        self.current = image;
        self.history.clear();
    }

    pub fn into_current(self) -> Image {
        self.current
    }
}
