//! Web-GUI resource resolution and validation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pedalgrid_graph::{GraphSnapshot, Node, Subject, vocab, Iri};

use crate::descriptor::{GuiDescriptor, GuiPort};
use crate::diagnostics::Diagnostics;
use crate::ExtractOptions;

/// Picks the GUI resource the extraction will use. Several GUIs may be
/// declared; candidates without a resources directory are skipped, and a
/// user-directory install wins over a system one.
fn select_candidate(
    snap: &GraphSnapshot,
    plugin: &Subject,
    opts: &ExtractOptions,
) -> Option<Subject> {
    let v = vocab();
    let mut selected = None;
    for node in snap.find(plugin, &v.modgui.gui) {
        let Some(gui) = node.to_subject() else {
            continue;
        };
        let Some(resdir) = snap
            .get(&gui, &v.modgui.resources_directory)
            .and_then(|n| n.to_path())
        else {
            continue;
        };
        selected = Some(gui);
        if !opts.absolute_paths {
            break;
        }
        if let Some(user_dir) = &opts.user_dir {
            if resdir.starts_with(user_dir) {
                break;
            }
        }
    }
    selected
}

/// True when the plugin declares a GUI whose resources directory exists on
/// disk. Individual resource files are only validated by a full extraction.
pub fn plugin_has_modgui(snap: &GraphSnapshot, plugin: &Subject) -> bool {
    let opts = ExtractOptions::default();
    let Some(gui) = select_candidate(snap, plugin, &opts) else {
        return false;
    };
    snap.get(&gui, &vocab().modgui.resources_directory)
        .and_then(|n| n.to_path())
        .is_some_and(|dir| dir.exists())
}

fn relativize(path: &Path, bundle_with_sep: &str) -> String {
    path.display()
        .to_string()
        .replacen(bundle_with_sep, "", 1)
}

struct ResourceScope<'a> {
    snap: &'a GraphSnapshot,
    gui: Subject,
    bundle_with_sep: String,
    absolute: bool,
}

impl ResourceScope<'_> {
    fn node(&self, predicate: &Iri) -> Option<Node> {
        self.snap.get(&self.gui, predicate)
    }

    /// Resolves one declared resource file: `(stored path, exists on disk)`.
    fn file(&self, predicate: &Iri) -> Option<(String, bool)> {
        let path = self.node(predicate)?.to_path()?;
        let exists = path.exists();
        let stored = if self.absolute {
            path.display().to_string()
        } else {
            relativize(&path, &self.bundle_with_sep)
        };
        Some((stored, exists))
    }
}

fn apply_template_data(gui: &mut GuiDescriptor, raw: &str) {
    // tolerant parse of the deprecated sideband file
    let Ok(data) = serde_json::from_str::<serde_json::Value>(raw) else {
        return;
    };
    let fetch = |key: &str| data.get(key).and_then(|v| v.as_str()).map(String::from);
    if let Some(author) = fetch("author") {
        gui.brand = Some(author);
    }
    if let Some(label) = fetch("label") {
        gui.label = Some(label);
    }
    if let Some(color) = fetch("color") {
        gui.color = Some(color);
    }
    if let Some(knob) = fetch("knob") {
        gui.knob = Some(knob);
    }
    if let Some(controls) = data.get("controls").and_then(|v| v.as_array()) {
        gui.ports = controls
            .iter()
            .enumerate()
            .map(|(index, ctrl)| GuiPort {
                index: index as i64,
                symbol: ctrl
                    .get("symbol")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                name: ctrl
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
    }
}

fn resolve_gui_ports(
    snap: &GraphSnapshot,
    scope: &ResourceScope<'_>,
    diag: &mut Diagnostics,
) -> Option<Vec<GuiPort>> {
    let v = vocab();
    let mut ports: Vec<GuiPort> = Vec::new();
    let mut symbols = HashSet::new();
    let mut invalid = false;
    let mut duplicated = false;

    for node in snap.find(&scope.gui, &v.modgui.port) {
        let Some(port) = node.to_subject() else {
            invalid = true;
            continue;
        };
        let index = snap.get(&port, &v.lv2.index).and_then(|n| n.as_int());
        let symbol = snap.get(&port, &v.lv2.symbol).map(|n| n.as_string());
        let name = snap.get(&port, &v.lv2.name).map(|n| n.as_string());
        let (Some(index), Some(symbol), Some(name)) = (index, symbol, name) else {
            invalid = true;
            continue;
        };
        if !symbols.insert(symbol.clone()) {
            duplicated = true;
        }
        // last declaration of an index wins
        if let Some(existing) = ports.iter_mut().find(|p| p.index == index) {
            existing.symbol = symbol;
            existing.name = name;
        } else {
            ports.push(GuiPort {
                index,
                symbol,
                name,
            });
        }
    }

    if invalid {
        diag.error("modgui has some invalid port data");
    }
    if duplicated {
        diag.error("modgui has some duplicated port symbols");
    }
    if ports.is_empty() {
        return None;
    }
    ports.sort_by_key(|p| p.index);
    Some(ports)
}

/// Resolves the plugin's GUI resources into a descriptor, recording an error
/// for every mandatory resource that is missing or absent on disk.
pub(crate) fn resolve_gui(
    snap: &GraphSnapshot,
    plugin: &Subject,
    bundle: &Path,
    diag: &mut Diagnostics,
    opts: &ExtractOptions,
) -> Option<GuiDescriptor> {
    let v = vocab();
    let Some(gui_subject) = select_candidate(snap, plugin, opts) else {
        diag.warning("no modgui available");
        return None;
    };
    let Some(resdir) = snap
        .get(&gui_subject, &v.modgui.resources_directory)
        .and_then(|n| n.to_path())
    else {
        diag.error("modgui has no resourcesDirectory data");
        return None;
    };

    let bundle_with_sep = format!("{}/", bundle.display());
    let scope = ResourceScope {
        snap,
        gui: gui_subject,
        bundle_with_sep: bundle_with_sep.clone(),
        absolute: opts.absolute_paths,
    };

    let mut gui = GuiDescriptor::default();
    if opts.absolute_paths {
        gui.resources_directory = resdir.display().to_string();
        gui.using_see_also = bundle.join("modgui.graph.json").is_file();
        let outside_bundle = !gui.resources_directory.contains(&bundle_with_sep);
        let in_user_dir = opts
            .user_dir
            .as_ref()
            .is_some_and(|dir| resdir.starts_with(dir));
        gui.modifiable_in_place = (outside_bundle || gui.using_see_also) && in_user_dir;
    } else {
        gui.resources_directory = relativize(&resdir, &bundle_with_sep);
    }

    match scope.file(&v.modgui.icon_template) {
        Some((path, true)) => gui.icon_template = Some(path),
        Some((_, false)) => diag.error("modgui iconTemplate file is missing"),
        None => diag.error("modgui has no iconTemplate data"),
    }
    match scope.file(&v.modgui.settings_template) {
        Some((path, true)) => gui.settings_template = Some(path),
        Some((_, false)) => diag.error("modgui settingsTemplate file is missing"),
        None => {}
    }
    match scope.file(&v.modgui.javascript) {
        Some((path, true)) => gui.javascript = Some(path),
        Some((_, false)) => diag.error("modgui javascript file is missing"),
        None => {}
    }
    match scope.file(&v.modgui.stylesheet) {
        Some((path, true)) => gui.stylesheet = Some(path),
        Some((_, false)) => diag.error("modgui stylesheet file is missing"),
        None => diag.error("modgui has no stylesheet data"),
    }

    if let Some(data_node) = scope.node(&v.modgui.template_data) {
        diag.warning("modgui is using old deprecated templateData");
        if let Some(path) = data_node.to_path() {
            if let Ok(raw) = fs::read_to_string(&path) {
                apply_template_data(&mut gui, &raw);
            }
        }
    }

    // declared screenshot/thumbnail paths are published even when the file
    // is absent; the error alone reports the gap
    match scope.file(&v.modgui.screenshot) {
        Some((path, exists)) => {
            if !exists {
                diag.error("modgui screenshot file is missing");
            }
            gui.screenshot = Some(path);
        }
        None => diag.error("modgui has no screenshot data"),
    }
    match scope.file(&v.modgui.thumbnail) {
        Some((path, exists)) => {
            if !exists {
                diag.error("modgui thumbnail file is missing");
            }
            gui.thumbnail = Some(path);
        }
        None => diag.error("modgui has no thumbnail data"),
    }

    // declared extras override anything the deprecated sideband provided
    let string_of = |predicate| scope.node(predicate).map(|n| n.as_string());
    if let Some(brand) = string_of(&v.modgui.brand) {
        gui.brand = Some(brand);
    }
    if let Some(label) = string_of(&v.modgui.label) {
        gui.label = Some(label);
    }
    if let Some(model) = string_of(&v.modgui.model) {
        gui.model = Some(model);
    }
    if let Some(panel) = string_of(&v.modgui.panel) {
        gui.panel = Some(panel);
    }
    if let Some(color) = string_of(&v.modgui.color) {
        gui.color = Some(color);
    }
    if let Some(knob) = string_of(&v.modgui.knob) {
        gui.knob = Some(knob);
    }
    if let Some(ports) = resolve_gui_ports(snap, &scope, diag) {
        gui.ports = ports;
    }

    Some(gui)
}
