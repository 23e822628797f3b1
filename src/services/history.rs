use pixel_filters::Image;
use std::collections::VecDeque;

/// A saved image together with what produced the state after it
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub image: Image,
    /// Name of the filter applied on top of this image
    pub label: String,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

/// Last-in-first-out stack of full image snapshots
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` snapshots, dropping the oldest first
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn push(&mut self, image: Image, label: impl Into<String>) {
        if self.limit == Some(0) {
            return;
        }
        self.snapshots.push_back(Snapshot {
            image,
            label: label.into(),
            taken_at: chrono::Utc::now(),
        });
        if let Some(limit) = self.limit {
            while self.snapshots.len() > limit {
                if let Some(dropped) = self.snapshots.pop_front() {
                    tracing::debug!(label = %dropped.label, "History limit reached, dropping oldest snapshot");
                }
            }
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    /// Most recent snapshot without removing it
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Labels from oldest to newest
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.snapshots.iter().map(|s| s.label.as_str())
    }
}
