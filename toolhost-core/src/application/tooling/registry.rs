use super::descriptor::{ToolDescriptor, ToolSchema};
use super::error::{DiscoveryError, ToolLoadError};
use super::loader::load_tool;
use super::scanner::scan_folder;
use crate::config::ToolSettings;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info, warn};

type ToolTable = BTreeMap<String, ToolDescriptor>;

/// Immutable view of the registry at one point in time.
///
/// A chat round advertises and dispatches against the same snapshot, so a
/// concurrent registration is either fully visible or not visible at all.
#[derive(Clone, Default)]
pub struct ToolSnapshot {
    tools: Arc<ToolTable>,
}

impl ToolSnapshot {
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(ToolDescriptor::schema).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Result of loading a tool directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    pub loaded: usize,
    pub failed: usize,
    /// Names that were loaded, in load order
    pub names: Vec<String>,
}

/// Live name → descriptor table with copy-on-write updates.
pub struct ToolRegistry {
    tools: RwLock<Arc<ToolTable>>,
    settings: ToolSettings,
}

impl ToolRegistry {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            tools: RwLock::new(Arc::new(ToolTable::new())),
            settings,
        }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> ToolSnapshot {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        ToolSnapshot {
            tools: Arc::clone(&tools),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.snapshot().names()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Insert or replace a descriptor; returns `true` if a tool of that name existed.
    pub fn register(&self, descriptor: ToolDescriptor) -> bool {
        let name = descriptor.name.clone();
        let replaced = self.publish(|table| table.insert(name.clone(), descriptor).is_some());
        if replaced {
            warn!(tool = %name, "Replaced previously registered tool");
        } else {
            info!(tool = %name, "Registered tool");
        }
        replaced
    }

    /// Load one artifact and register it under its derived name.
    pub async fn register_path(&self, path: &Path) -> Result<String, ToolLoadError> {
        let descriptor = load_tool(path, &self.settings).await.inspect_err(|err| {
            error!(path = %path.display(), error = %err, "Tool registration failed");
        })?;
        let name = descriptor.name.clone();
        self.register(descriptor);
        Ok(name)
    }

    /// Load every artifact in `dir`.
    ///
    /// A missing directory is created and yields an empty summary. Artifacts
    /// that fail to load are logged and skipped; the rest become visible in
    /// one atomic update.
    pub async fn load_all(&self, dir: &Path) -> Result<DiscoverySummary, DiscoveryError> {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| DiscoveryError::Create {
                path: dir.to_path_buf(),
                source,
            })?;
            info!(path = %dir.display(), "Created tool directory");
            return Ok(DiscoverySummary::default());
        }

        let candidates = scan_folder(dir, &self.settings.prefix)?;
        let mut summary = DiscoverySummary::default();
        let mut loaded = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match load_tool(&candidate.path, &self.settings).await {
                Ok(descriptor) => {
                    summary.loaded += 1;
                    summary.names.push(descriptor.name.clone());
                    loaded.push(descriptor);
                }
                Err(err) => {
                    summary.failed += 1;
                    error!(
                        tool = %candidate.name,
                        path = %candidate.path.display(),
                        error = %err,
                        "Failed to load tool"
                    );
                }
            }
        }

        self.publish(|table| {
            for descriptor in loaded {
                table.insert(descriptor.name.clone(), descriptor);
            }
        });

        info!(
            loaded = summary.loaded,
            failed = summary.failed,
            path = %dir.display(),
            "Tool loading complete"
        );
        Ok(summary)
    }

    fn publish<R>(&self, update: impl FnOnce(&mut ToolTable) -> R) -> R {
        let mut current = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ToolTable::clone(&current);
        let result = update(&mut next);
        *current = Arc::new(next);
        result
    }
}
