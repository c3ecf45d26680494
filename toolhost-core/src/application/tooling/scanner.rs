//! Tool directory scanner
//!
//! Finds candidate tool artifacts: regular files whose name starts with the
//! configured prefix. Whether a candidate is actually loadable is decided by
//! the loader, so a broken artifact is reported instead of silently skipped.

use super::error::DiscoveryError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// A file in the tool directory that looks like a tool artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTool {
    /// External tool name derived from the file name
    pub name: String,
    pub path: PathBuf,
}

/// Scan a folder for tool artifacts.
///
/// Entries are returned sorted by path so loading order (and therefore
/// last-write-wins between duplicate names) is deterministic.
pub fn scan_folder(
    folder_path: impl AsRef<Path>,
    prefix: &str,
) -> Result<Vec<DiscoveredTool>, DiscoveryError> {
    let folder = folder_path.as_ref();

    info!(path = %folder.display(), prefix, "Scanning tool folder");

    let entries = std::fs::read_dir(folder).map_err(|source| {
        warn!(path = %folder.display(), error = %source, "Failed to read tool folder");
        DiscoveryError::Read {
            path: folder.to_path_buf(),
            source,
        }
    })?;

    let mut tools = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry, skipping");
                continue;
            }
        };

        let path = entry.path();
        trace!(path = %path.display(), "Checking file");

        if path.is_dir() {
            trace!(path = %path.display(), "Skipping directory");
            continue;
        }

        let Some(name) = derive_tool_name(&path, prefix) else {
            trace!(path = %path.display(), "Skipping file without tool prefix");
            continue;
        };

        debug!(name = %name, path = %path.display(), "Found tool artifact");
        tools.push(DiscoveredTool { name, path });
    }

    tools.sort_by(|a, b| a.path.cmp(&b.path));

    info!(
        count = tools.len(),
        path = %folder.display(),
        "Tool scan complete"
    );

    Ok(tools)
}

/// Derive the external tool name from an artifact path.
///
/// The file stem with `prefix` stripped: `tool/tool-weather.sh` -> `weather`.
/// Returns `None` when the prefix is missing or nothing remains after it.
pub fn derive_tool_name(path: &Path, prefix: &str) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Check if a file is executable.
///
/// - **Windows**: `.exe`, `.cmd` or `.bat` extensions
/// - **Unix**: any executable permission bit
#[cfg(target_os = "windows")]
pub fn is_executable(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    matches!(ext.as_deref(), Some("exe") | Some("cmd") | Some("bat"))
}

#[cfg(not(target_os = "windows"))]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = path.metadata() {
        metadata.permissions().mode() & 0o111 != 0
    } else {
        false
    }
}
