//! Whole-plugin descriptor extraction.

use std::collections::BTreeMap;
use std::path::Path;

use pedalgrid_graph::{GraphSnapshot, Subject, vocab};

use crate::category::classify;
use crate::coerce::string_first_or;
use crate::descriptor::{Author, PluginDescriptor, PortGroup, Preset, Stability};
use crate::diagnostics::Diagnostics;
use crate::modgui;
use crate::port::{build_port, truncate_chars, PortContext};
use crate::ExtractOptions;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn resolve_version(
    snap: &GraphSnapshot,
    plugin: &Subject,
    diag: &mut Diagnostics,
) -> (i64, i64, String, Stability) {
    let v = vocab();
    let minor = snap.get(plugin, &v.lv2.minor_version).and_then(|n| n.as_int());
    let micro = snap.get(plugin, &v.lv2.micro_version).and_then(|n| n.as_int());
    match (minor, micro) {
        (None, None) => diag.error("plugin is missing version information"),
        (None, Some(_)) => diag.error("plugin is missing minorVersion"),
        (Some(_), None) => diag.error("plugin is missing microVersion"),
        (Some(_), Some(_)) => {}
    }
    let minor = minor.unwrap_or(0);
    let micro = micro.unwrap_or(0);
    let stability = if minor == 0 {
        Stability::Experimental
    } else if minor % 2 != 0 || micro % 2 != 0 {
        Stability::Testing
    } else {
        Stability::Stable
    };
    (minor, micro, format!("{minor}.{micro}"), stability)
}

fn resolve_author(
    snap: &GraphSnapshot,
    plugin: &Subject,
    project: Option<&Subject>,
    bundle_uri: &str,
    diag: &mut Diagnostics,
) -> Author {
    let v = vocab();
    let maintainer = snap
        .get(plugin, &v.doap.maintainer)
        .or_else(|| project.and_then(|p| snap.get(p, &v.doap.maintainer)))
        .and_then(|n| n.to_subject());

    let mut author = Author::default();
    if let Some(maintainer) = &maintainer {
        author.name = string_first_or(&snap.find(maintainer, &v.foaf.name));
        author.homepage = string_first_or(&snap.find(maintainer, &v.foaf.homepage));
        author.email = string_first_or(&snap.find(maintainer, &v.foaf.mbox));
    }
    if author.name.is_empty() {
        diag.error("plugin author name is missing");
    }
    if author.homepage.is_empty() {
        // second stage: the containing project's maintainer may declare one
        if let Some(project) = project {
            if let Some(fallback) = snap
                .get(project, &v.doap.maintainer)
                .and_then(|n| n.to_subject())
            {
                author.homepage = string_first_or(&snap.find(&fallback, &v.foaf.homepage));
            }
        }
    }
    if author.homepage.is_empty() {
        diag.warning("plugin author homepage is missing");
    }
    if !author.email.is_empty() {
        if !bundle_uri.is_empty() && author.email.starts_with(bundle_uri) {
            author.email = author.email.replacen(bundle_uri, "", 1);
            diag.warning("plugin author email entry is missing 'mailto:' prefix");
        } else if let Some(stripped) = author.email.strip_prefix("mailto:") {
            author.email = stripped.to_string();
        }
    }
    author
}

fn resolve_brand(author_name: &str, pg_brand: String, diag: &mut Diagnostics) -> String {
    if pg_brand.is_empty() {
        let derived = author_name
            .split(" - ")
            .next()
            .unwrap_or("")
            .split(' ')
            .next()
            .unwrap_or("")
            .trim_end_matches(',')
            .trim_end_matches(';');
        diag.warning("plugin brand is missing");
        truncate_chars(derived, 16)
    } else if char_len(&pg_brand) > 16 {
        diag.error("plugin brand has more than 16 characters");
        truncate_chars(&pg_brand, 16)
    } else {
        pg_brand
    }
}

fn resolve_label(name: &str, bundle: &str, pg_label: String, diag: &mut Diagnostics) -> String {
    if pg_label.is_empty() {
        if char_len(name) <= 24 {
            return name.to_string();
        }
        let head = name.split(" - ").next().unwrap_or(name);
        let words: Vec<&str> = head.split(' ').collect();
        let pick = if words.len() > 1
            && !bundle.is_empty()
            && bundle.to_lowercase().contains(&words[0].to_lowercase())
            && !words[1].starts_with(['(', '['])
        {
            words[1]
        } else {
            words.first().copied().unwrap_or("")
        };
        diag.warning("plugin label is missing");
        truncate_chars(pick, 24)
    } else if char_len(&pg_label) > 24 {
        diag.error("plugin label has more than 24 characters");
        truncate_chars(&pg_label, 24)
    } else {
        pg_label
    }
}

fn resolve_presets(
    snap: &GraphSnapshot,
    plugin: &Subject,
    diag: &mut Diagnostics,
) -> Vec<Preset> {
    let v = vocab();
    let mut presets = BTreeMap::new();
    for subject in snap.subjects_with(&v.lv2.applies_to, &plugin.to_node()) {
        let is_preset = snap
            .find(&subject, &v.rdf.type_)
            .iter()
            .any(|n| n.iri() == Some(&v.pset.preset));
        if !is_preset {
            continue;
        }
        let uri = subject.as_uri_string();
        let label = string_first_or(&snap.find(&subject, &v.rdfs.label));
        if uri.is_empty() {
            let shown = if label.is_empty() { "<unknown>" } else { label.as_str() };
            diag.error(format!("preset with label '{shown}' has no uri"));
        }
        if label.is_empty() {
            let shown = if uri.is_empty() { "<unknown>" } else { uri.as_str() };
            diag.error(format!("preset with uri '{shown}' has no label"));
        }
        // incomplete presets stay in the output; only the error is recorded
        presets.insert(uri, label);
    }
    presets
        .into_iter()
        .map(|(uri, label)| Preset { uri, label })
        .collect()
}

/// Builds the full descriptor for one plugin in the snapshot. Validation
/// problems land in the descriptor's `errors`/`warnings` lists; the call
/// itself never fails.
pub(crate) fn plugin_descriptor(
    snap: &GraphSnapshot,
    plugin: &Subject,
    opts: &ExtractOptions,
) -> PluginDescriptor {
    let v = vocab();
    let mut diag = Diagnostics::new();

    let bundle_dir = snap
        .bundle_of(plugin)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let bundle = if bundle_dir.as_os_str().is_empty() {
        String::new()
    } else {
        format!("{}/", bundle_dir.display())
    };
    let bundle_uri = if bundle.is_empty() {
        String::new()
    } else {
        format!("file://{bundle}")
    };

    let uri = plugin.as_uri_string();
    if uri.is_empty() {
        diag.error("plugin uri is missing or invalid");
    } else if uri.starts_with("file:") {
        diag.error("plugin uri is local, and thus not suitable for redistribution");
    }

    let name = string_first_or(&snap.find(plugin, &v.doap.name));
    if name.is_empty() {
        diag.error("plugin name is missing");
    }

    let mut binary = snap
        .get(plugin, &v.lv2.binary)
        .and_then(|n| n.to_path())
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if binary.is_empty() {
        diag.error("plugin binary is missing");
    } else if !opts.absolute_paths && !bundle.is_empty() {
        binary = binary.replacen(&bundle, "", 1);
    }

    let project = snap
        .get(plugin, &v.lv2.project)
        .and_then(|n| n.to_subject());

    let mut licenses = snap.strings(plugin, &v.doap.license);
    if licenses.is_empty() {
        if let Some(project) = &project {
            licenses = snap.strings(project, &v.doap.license);
        }
    }
    licenses.sort();
    let mut license = licenses.into_iter().next().unwrap_or_default();
    if license.is_empty() {
        diag.error("plugin license is missing");
    } else if !bundle_uri.is_empty() && license.starts_with(&bundle_uri) {
        license = license.replacen(&bundle_uri, "", 1);
        diag.warning("plugin license entry is a local path instead of a string");
    }

    let mut comment = string_first_or(&snap.find(plugin, &v.rdfs.comment))
        .trim()
        .to_string();
    // a run of one repeated character is filler, not a comment
    let filler = comment
        .chars()
        .next()
        .is_some_and(|first| comment.chars().all(|c| c == first));
    if filler {
        comment.clear();
    }
    if comment.is_empty() {
        diag.error("plugin comment is missing");
    }

    let (minor_version, micro_version, version, stability) =
        resolve_version(snap, plugin, &mut diag);
    let author = resolve_author(snap, plugin, project.as_ref(), &bundle_uri, &mut diag);

    let brand = resolve_brand(
        &author.name,
        string_first_or(&snap.find(plugin, &v.pg.brand)),
        &mut diag,
    );
    let label = resolve_label(
        &name,
        &bundle,
        string_first_or(&snap.find(plugin, &v.pg.label)),
        &mut diag,
    );

    let mut bundles = Vec::new();
    if opts.absolute_paths {
        for doc in snap.documents_of(plugin) {
            if let Some(parent) = doc.parent() {
                let entry = format!("{}/", parent.display());
                if !bundles.contains(&entry) {
                    bundles.push(entry);
                }
            }
        }
        if !bundle.is_empty() && !bundles.contains(&bundle) {
            bundles.push(bundle.clone());
        }
        bundles.sort();
    }

    let mut ports: BTreeMap<String, PortGroup> = ["audio", "control", "midi", "cv"]
        .into_iter()
        .map(|kind| (kind.to_string(), PortGroup::default()))
        .collect();
    let mut ctx = PortContext::new(snap, &mut diag);
    for (index, node) in snap.find(plugin, &v.lv2.port).into_iter().enumerate() {
        let Some(port) = node.to_subject() else {
            continue;
        };
        let (types, descriptor) = build_port(&mut ctx, &port, index as u32);
        let is_input = types.iter().any(|t| t == "Input");
        for kind in types.iter().filter(|t| *t != "Input" && *t != "Output") {
            let group = ports.entry(kind.to_lowercase()).or_default();
            if is_input {
                group.input.push(descriptor.clone());
            } else {
                group.output.push(descriptor.clone());
            }
        }
    }

    let gui = modgui::resolve_gui(snap, plugin, &bundle_dir, &mut diag, opts);
    let presets = resolve_presets(snap, plugin, &mut diag);
    let category = classify(&snap.find(plugin, &v.rdf.type_));

    let (errors, warnings) = diag.into_sorted();
    PluginDescriptor {
        uri,
        name,
        binary,
        brand,
        label,
        license,
        comment,
        category,
        minor_version,
        micro_version,
        version,
        stability,
        author,
        bundles,
        gui,
        ports,
        presets,
        errors,
        warnings,
    }
}
