use crate::error::StoreError;
use crate::models::NamedFilter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Extension of stored filter documents
pub const FILTER_EXTENSION: &str = "json";

/// Trait for named-kernel persistence
pub trait FilterStore: Send + Sync {
    /// Store or replace a filter under its name
    fn save(&self, filter: &NamedFilter) -> Result<(), StoreError>;

    /// Load a filter by name
    fn load(&self, name: &str) -> Result<NamedFilter, StoreError>;

    /// All stored names, sorted
    fn list_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Reject names that are empty or could escape the store directory.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let bad = name.trim().is_empty()
        || name.contains(['/', '\\', '\0'])
        || name == "."
        || name.contains("..");
    if bad {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Reject filters whose kernel cannot be turned into a convolution.
pub fn validate_kernel(filter: &NamedFilter) -> Result<(), StoreError> {
    filter
        .to_convolution()
        .map(|_| ())
        .map_err(|source| StoreError::InvalidKernel {
            name: filter.name.clone(),
            source,
        })
}

/// One JSON document per filter in a directory, with an in-memory cache
pub struct DirectoryFilterStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, NamedFilter>>,
}

impl DirectoryFilterStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened filter store");
        Ok(Self {
            dir,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{FILTER_EXTENSION}"))
    }
}

impl FilterStore for DirectoryFilterStore {
    fn save(&self, filter: &NamedFilter) -> Result<(), StoreError> {
        validate_name(&filter.name)?;
        validate_kernel(filter)?;
        let path = self.path_for(&filter.name);
        let json = serde_json::to_string_pretty(filter)?;
        std::fs::write(&path, json)?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(filter.name.clone(), filter.clone());
        tracing::info!(name = %filter.name, path = %path.display(), "Saved filter");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<NamedFilter, StoreError> {
        validate_name(name)?;
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(filter) = cache.get(name) {
                tracing::debug!(name, "Filter cache hit");
                return Ok(filter.clone());
            }
        }

        let path = self.path_for(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let filter: NamedFilter = serde_json::from_str(&content).map_err(|source| {
            tracing::warn!(%source, path = %path.display(), "Malformed filter document");
            StoreError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        validate_kernel(&filter).inspect_err(|e| {
            tracing::warn!(error = %e, path = %path.display(), "Stored filter has an unusable kernel");
        })?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(name.to_string(), filter.clone());
        Ok(filter)
    }

    fn list_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(FILTER_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory filter storage
pub struct InMemoryFilterStore {
    filters: RwLock<HashMap<String, NamedFilter>>,
}

impl InMemoryFilterStore {
    pub fn new() -> Self {
        Self {
            filters: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore for InMemoryFilterStore {
    fn save(&self, filter: &NamedFilter) -> Result<(), StoreError> {
        validate_name(&filter.name)?;
        validate_kernel(filter)?;
        let mut filters = self.filters.write().unwrap_or_else(PoisonError::into_inner);
        filters.insert(filter.name.clone(), filter.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<NamedFilter, StoreError> {
        validate_name(name)?;
        let filters = self.filters.read().unwrap_or_else(PoisonError::into_inner);
        filters
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn list_names(&self) -> Result<Vec<String>, StoreError> {
        let filters = self.filters.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = filters.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
