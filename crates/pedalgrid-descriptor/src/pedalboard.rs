//! Pedalboard bundle extraction.
//!
//! Pedalboards are stricter than plugins: a bundle must contain exactly one
//! top-level graph and it must be typed as a pedalboard, otherwise the call
//! fails instead of reporting diagnostics.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pedalgrid_graph::{GraphSnapshot, Subject, vocab, NS_ATOM, NS_LV2, NS_PG};

use crate::coerce::{int_first_or, string_first_or};
use crate::descriptor::{
    BlockInstance, BoardSize, Connection, HardwarePorts, PedalboardDescriptor, PedalboardUnit,
};
use crate::ExtractError;

fn load_single(path: &Path) -> Result<(GraphSnapshot, Subject, PathBuf), ExtractError> {
    let mut snap = GraphSnapshot::new();
    let bundle = snap.load_bundle(path)?;
    let count = snap.plugins().len();
    if count != 1 {
        return Err(ExtractError::PluginCount {
            bundle: path.to_path_buf(),
            count,
        });
    }
    let board = snap.plugins()[0].clone();
    let is_pedalboard = snap
        .find(&board, &vocab().rdf.type_)
        .iter()
        .any(|n| n.iri() == Some(&vocab().board.pedalboard));
    if !is_pedalboard {
        return Err(ExtractError::NotAPedalboard(path.to_path_buf()));
    }
    Ok((snap, board, bundle))
}

/// Name of the pedalboard stored in `path`, without building the full
/// descriptor.
pub fn extract_pedalboard_name(path: &Path) -> Result<String, ExtractError> {
    let (snap, board, _) = load_single(path)?;
    Ok(string_first_or(&snap.find(&board, &vocab().doap.name)))
}

fn basename(uri: &str) -> String {
    uri.rsplit('/').next().unwrap_or(uri).to_string()
}

/// Boards saved before units declared themselves carry no unit statement;
/// the MIDI-mode switch ports only ever existed on the bigger unit.
fn infer_unit(snap: &GraphSnapshot, board: &Subject) -> PedalboardUnit {
    let legacy_big = snap
        .strings(board, &vocab().lv2.port)
        .iter()
        .any(|uri| uri.ends_with("/midi_legacy_mode") || uri.ends_with("/midi_separated_mode"));
    if legacy_big {
        PedalboardUnit {
            name: "PedalGrid X".to_string(),
            model: "gridx:aarch64-a53".to_string(),
        }
    } else {
        PedalboardUnit {
            name: "PedalGrid".to_string(),
            model: "grid:arm-a7".to_string(),
        }
    }
}

fn count_hardware(snap: &GraphSnapshot, board: &Subject) -> HardwarePorts {
    let v = vocab();
    let input_port = format!("{NS_LV2}InputPort");
    let output_port = format!("{NS_LV2}OutputPort");
    let audio_port = format!("{NS_LV2}AudioPort");
    let cv_port = format!("{NS_LV2}CVPort");
    let pg_cv_port = format!("{NS_PG}CVPort");
    let atom_port = format!("{NS_ATOM}AtomPort");

    let mut hardware = HardwarePorts::default();
    let mut seen = HashSet::new();
    for node in snap.find(board, &v.lv2.port) {
        let uri = node.as_string();
        if !seen.insert(uri.clone()) {
            continue;
        }
        if uri.ends_with("/control_in") || uri.ends_with("/control_out") {
            continue;
        }
        let Some(port) = node.to_subject() else {
            continue;
        };
        let types = snap.strings(&port, &v.rdf.type_);
        let input = types.iter().any(|t| *t == input_port);
        let output = types.iter().any(|t| *t == output_port);
        let bucket = if types.iter().any(|t| *t == audio_port) {
            &mut hardware.audio
        } else if types.iter().any(|t| *t == cv_port || *t == pg_cv_port) {
            &mut hardware.cv
        } else if types.iter().any(|t| *t == atom_port) {
            &mut hardware.midi
        } else {
            continue;
        };
        if input {
            bucket.ins += 1;
        } else if output {
            bucket.outs += 1;
        }
    }
    hardware
}

fn collect_connections(
    snap: &GraphSnapshot,
    board: &Subject,
    bundle_with_sep: &str,
) -> Vec<Connection> {
    let v = vocab();
    let mut connections = Vec::new();
    for node in snap.find(board, &v.ingen.arc) {
        let Some(arc) = node.to_subject() else {
            continue;
        };
        let tail = snap.get(&arc, &v.ingen.tail).and_then(|n| n.to_path());
        let head = snap.get(&arc, &v.ingen.head).and_then(|n| n.to_path());
        let (Some(tail), Some(head)) = (tail, head) else {
            continue;
        };
        connections.push(Connection {
            source: tail.display().to_string().replacen(bundle_with_sep, "", 1),
            target: head.display().to_string().replacen(bundle_with_sep, "", 1),
        });
    }
    connections
}

fn collect_blocks(
    snap: &GraphSnapshot,
    board: &Subject,
    bundle_with_sep: &str,
) -> Vec<BlockInstance> {
    let v = vocab();
    let mut blocks = Vec::new();
    for node in snap.find(board, &v.ingen.block) {
        let Some(block) = node.to_subject() else {
            continue;
        };
        let prototype = snap
            .get(&block, &v.lv2.prototype)
            .or_else(|| snap.get(&block, &v.ingen.prototype));
        let Some(prototype) = prototype else {
            continue;
        };
        let instance = block
            .to_path()
            .map(|p| p.display().to_string().replacen(bundle_with_sep, "", 1))
            .unwrap_or_default();
        blocks.push(BlockInstance {
            instance,
            uri: prototype.as_string(),
            x: snap
                .get(&block, &v.ingen.canvas_x)
                .and_then(|n| n.as_f64())
                .unwrap_or(0.0),
            y: snap
                .get(&block, &v.ingen.canvas_y)
                .and_then(|n| n.as_f64())
                .unwrap_or(0.0),
            enabled: snap
                .get(&block, &v.ingen.enabled)
                .and_then(|n| n.as_bool())
                .unwrap_or(false),
            builder: snap
                .get(&block, &v.pg.builder_version)
                .and_then(|n| n.as_int())
                .unwrap_or(0),
            release: snap
                .get(&block, &v.pg.release_number)
                .and_then(|n| n.as_int())
                .unwrap_or(0),
            minor_version: snap
                .get(&block, &v.lv2.minor_version)
                .and_then(|n| n.as_int())
                .unwrap_or(0),
            micro_version: snap
                .get(&block, &v.lv2.micro_version)
                .and_then(|n| n.as_int())
                .unwrap_or(0),
            build_id: snap
                .get(&block, &v.pg.build_id)
                .map(|n| n.as_string())
                .unwrap_or_default(),
            build_environment: snap
                .get(&block, &v.pg.build_environment)
                .map(|n| n.as_string())
                .unwrap_or_default(),
        });
    }
    blocks
}

/// Full descriptor of the pedalboard stored in `path`.
pub fn extract_pedalboard_descriptor(path: &Path) -> Result<PedalboardDescriptor, ExtractError> {
    let v = vocab();
    let (snap, board, bundle) = load_single(path)?;
    let bundle_with_sep = format!("{}/", bundle.display());

    let author = snap
        .get(&board, &v.doap.maintainer)
        .and_then(|n| n.to_subject())
        .map(|m| string_first_or(&snap.find(&m, &v.foaf.name)))
        .unwrap_or_default();

    let unit_name = string_first_or(&snap.find(&board, &v.board.unit_name));
    let unit_model = string_first_or(&snap.find(&board, &v.board.unit_model));
    let unit = if unit_name.is_empty() || unit_model.is_empty() {
        infer_unit(&snap, &board)
    } else {
        PedalboardUnit {
            name: unit_name,
            model: unit_model,
        }
    };

    Ok(PedalboardDescriptor {
        name: string_first_or(&snap.find(&board, &v.doap.name)),
        uri: board.as_uri_string(),
        author,
        unit,
        hardware: count_hardware(&snap, &board),
        size: BoardSize {
            width: int_first_or(&snap.find(&board, &v.board.width)),
            height: int_first_or(&snap.find(&board, &v.board.height)),
        },
        screenshot: basename(&string_first_or(&snap.find(&board, &v.board.screenshot))),
        thumbnail: basename(&string_first_or(&snap.find(&board, &v.board.thumbnail))),
        connections: collect_connections(&snap, &board, &bundle_with_sep),
        plugins: collect_blocks(&snap, &board, &bundle_with_sep),
    })
}
