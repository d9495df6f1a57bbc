use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::snapshot::DOCUMENT_SUFFIX;

/// Where installed bundles are searched for.
#[derive(Debug, Clone)]
pub struct LocateConfig {
    pub system_roots: Vec<PathBuf>,
    pub user_roots: Vec<PathBuf>,
    pub max_depth: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        let system_roots = vec![
            PathBuf::from("/usr/lib/pedalgrid/bundles"),
            PathBuf::from("/usr/share/pedalgrid/bundles"),
        ];
        let mut user_roots = Vec::new();
        if let Some(home) = dirs::home_dir() {
            user_roots.push(home.join(".pedalgrid/bundles"));
        }
        Self {
            system_roots,
            user_roots,
            max_depth: 3,
        }
    }
}

fn holds_document(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry.path().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX))
    })
}

/// Directories under the configured roots that contain at least one graph
/// document, sorted and deduplicated.
pub fn installed_bundles(config: &LocateConfig) -> Vec<PathBuf> {
    let mut bundles = Vec::new();
    for root in config.system_roots.iter().chain(config.user_roots.iter()) {
        if !root.exists() {
            continue;
        }
        let walker = WalkDir::new(root).max_depth(config.max_depth).into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if let Some(io) = err.io_error() {
                        log::debug!("skipping entry under {}: {}", root.display(), io);
                    }
                    continue;
                }
            };
            if entry.path().is_dir() && holds_document(entry.path()) {
                bundles.push(entry.path().to_path_buf());
            }
        }
    }
    bundles.sort();
    bundles.dedup();
    bundles
}
