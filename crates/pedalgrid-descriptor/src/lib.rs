//! Canonical plugin and pedalboard descriptor extraction for PedalGrid.
//!
//! Metadata problems never abort an extraction: they accumulate in the
//! descriptor's sorted `errors`/`warnings` lists. Only missing bundles and
//! structurally unusable input surface as [`ExtractError`].

use std::path::{Path, PathBuf};

use pedalgrid_graph::{GraphError, GraphSnapshot, Subject};
use thiserror::Error;

mod category;
mod coerce;
mod descriptor;
mod diagnostics;
mod modgui;
mod pedalboard;
mod plugin;
mod port;
mod unit;

pub use category::classify;
pub use coerce::{first_or, is_integer, numeric, Numeric};
pub use descriptor::*;
pub use modgui::plugin_has_modgui;
pub use pedalboard::{extract_pedalboard_descriptor, extract_pedalboard_name};
pub use unit::{standard_unit, UnitSpec};

/// Preconditions an extraction cannot recover from.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no bundles provided")]
    NoBundles,
    #[error("loaded bundles contain no plugins")]
    NoPlugins,
    #[error("bundle {bundle} holds {count} top-level graphs instead of one")]
    PluginCount { bundle: PathBuf, count: usize },
    #[error("bundle {0} is not a pedalboard")]
    NotAPedalboard(PathBuf),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// How descriptor paths are rendered.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Keep filesystem paths absolute; `false` strips the bundle prefix,
    /// which is what gets published.
    pub absolute_paths: bool,
    /// Installs under this directory count as user-modifiable.
    pub user_dir: Option<PathBuf>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            absolute_paths: true,
            user_dir: dirs::home_dir(),
        }
    }
}

/// Builds the descriptor of one plugin already loaded into `snap`.
///
/// This never fails: every metadata problem is reported inside the
/// descriptor itself.
pub fn extract_plugin_descriptor(
    snap: &GraphSnapshot,
    plugin: &Subject,
    opts: &ExtractOptions,
) -> PluginDescriptor {
    plugin::plugin_descriptor(snap, plugin, opts)
}

/// Loads every given bundle into one snapshot and extracts all plugins
/// found, with bundle-relative paths.
pub fn extract_all_plugin_descriptors(
    bundles: &[PathBuf],
) -> Result<Vec<PluginDescriptor>, ExtractError> {
    if bundles.is_empty() {
        return Err(ExtractError::NoBundles);
    }
    let mut snap = GraphSnapshot::new();
    for bundle in bundles {
        snap.load_bundle(bundle)?;
    }
    if snap.plugins().is_empty() {
        return Err(ExtractError::NoPlugins);
    }
    let opts = ExtractOptions {
        absolute_paths: false,
        user_dir: None,
    };
    log::debug!("extracting {} plugins", snap.plugins().len());
    Ok(snap
        .plugins()
        .iter()
        .map(|plugin| plugin::plugin_descriptor(&snap, plugin, &opts))
        .collect())
}

/// Shortcut: load one bundle and check whether its plugin ships a GUI.
pub fn bundle_has_modgui(path: &Path) -> Result<bool, ExtractError> {
    let mut snap = GraphSnapshot::new();
    snap.load_bundle(path)?;
    Ok(snap
        .plugins()
        .iter()
        .any(|plugin| plugin_has_modgui(&snap, plugin)))
}
