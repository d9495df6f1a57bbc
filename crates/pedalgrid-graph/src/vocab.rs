use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::node::Iri;

pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const NS_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const NS_LV2: &str = "http://lv2plug.in/ns/lv2core#";
pub const NS_DOAP: &str = "http://usefulinc.com/ns/doap#";
pub const NS_FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const NS_ATOM: &str = "http://lv2plug.in/ns/ext/atom#";
pub const NS_MIDI: &str = "http://lv2plug.in/ns/ext/midi#";
pub const NS_UNITS: &str = "http://lv2plug.in/ns/extensions/units#";
pub const NS_PPROPS: &str = "http://lv2plug.in/ns/ext/port-props#";
pub const NS_PSET: &str = "http://lv2plug.in/ns/ext/presets#";
pub const NS_INGEN: &str = "http://drobilla.net/ns/ingen#";
pub const NS_PG: &str = "http://pedalgrid.audio/ns/ext#";
pub const NS_MODGUI: &str = "http://pedalgrid.audio/ns/modgui#";
pub const NS_BOARD: &str = "http://pedalgrid.audio/ns/board#";

/// Prefixes every graph document may use without declaring them.
pub fn well_known_prefixes() -> BTreeMap<String, String> {
    [
        ("rdf", NS_RDF),
        ("rdfs", NS_RDFS),
        ("lv2", NS_LV2),
        ("doap", NS_DOAP),
        ("foaf", NS_FOAF),
        ("atom", NS_ATOM),
        ("midi", NS_MIDI),
        ("units", NS_UNITS),
        ("pprops", NS_PPROPS),
        ("pset", NS_PSET),
        ("ingen", NS_INGEN),
        ("pg", NS_PG),
        ("modgui", NS_MODGUI),
        ("pgboard", NS_BOARD),
    ]
    .into_iter()
    .map(|(prefix, base)| (prefix.to_string(), base.to_string()))
    .collect()
}

struct Ns(&'static str);

impl Ns {
    fn term(&self, name: &str) -> Iri {
        Iri::new(format!("{}{}", self.0, name))
    }
}

pub struct RdfVocab {
    pub type_: Iri,
    pub value: Iri,
}

pub struct RdfsVocab {
    pub label: Iri,
    pub comment: Iri,
}

pub struct Lv2Vocab {
    pub plugin: Iri,
    pub port: Iri,
    pub name: Iri,
    pub symbol: Iri,
    pub short_name: Iri,
    pub shortname_legacy: Iri,
    pub default: Iri,
    pub minimum: Iri,
    pub maximum: Iri,
    pub port_property: Iri,
    pub designation: Iri,
    pub index: Iri,
    pub project: Iri,
    pub prototype: Iri,
    pub minor_version: Iri,
    pub micro_version: Iri,
    pub binary: Iri,
    pub applies_to: Iri,
    pub latency: Iri,
    pub scale_point: Iri,
    pub input_port: Iri,
    pub output_port: Iri,
    pub audio_port: Iri,
    pub control_port: Iri,
    pub cv_port: Iri,
}

pub struct DoapVocab {
    pub name: Iri,
    pub license: Iri,
    pub maintainer: Iri,
}

pub struct FoafVocab {
    pub name: Iri,
    pub homepage: Iri,
    pub mbox: Iri,
}

pub struct AtomVocab {
    pub atom_port: Iri,
    pub buffer_type: Iri,
    pub supports: Iri,
    pub sequence: Iri,
}

pub struct MidiVocab {
    pub midi_event: Iri,
}

pub struct UnitsVocab {
    pub unit: Iri,
    pub render: Iri,
    pub symbol: Iri,
}

pub struct PpropsVocab {
    pub range_steps: Iri,
}

pub struct PsetVocab {
    pub preset: Iri,
}

pub struct IngenVocab {
    pub arc: Iri,
    pub head: Iri,
    pub tail: Iri,
    pub block: Iri,
    pub canvas_x: Iri,
    pub canvas_y: Iri,
    pub enabled: Iri,
    pub prototype: Iri,
}

pub struct PgVocab {
    pub brand: Iri,
    pub label: Iri,
    pub default: Iri,
    pub minimum: Iri,
    pub maximum: Iri,
    pub range_steps: Iri,
    pub cv_port: Iri,
    pub builder_version: Iri,
    pub release_number: Iri,
    pub build_id: Iri,
    pub build_environment: Iri,
}

pub struct ModguiVocab {
    pub gui: Iri,
    pub resources_directory: Iri,
    pub icon_template: Iri,
    pub settings_template: Iri,
    pub javascript: Iri,
    pub stylesheet: Iri,
    pub template_data: Iri,
    pub screenshot: Iri,
    pub thumbnail: Iri,
    pub brand: Iri,
    pub label: Iri,
    pub model: Iri,
    pub panel: Iri,
    pub color: Iri,
    pub knob: Iri,
    pub port: Iri,
}

pub struct BoardVocab {
    pub pedalboard: Iri,
    pub unit_name: Iri,
    pub unit_model: Iri,
    pub width: Iri,
    pub height: Iri,
    pub screenshot: Iri,
    pub thumbnail: Iri,
}

/// Every vocabulary term the extraction engine queries, interned eagerly so
/// repeated lookups hand out the identical `Iri`.
pub struct Vocab {
    pub rdf: RdfVocab,
    pub rdfs: RdfsVocab,
    pub lv2: Lv2Vocab,
    pub doap: DoapVocab,
    pub foaf: FoafVocab,
    pub atom: AtomVocab,
    pub midi: MidiVocab,
    pub units: UnitsVocab,
    pub pprops: PpropsVocab,
    pub pset: PsetVocab,
    pub ingen: IngenVocab,
    pub pg: PgVocab,
    pub modgui: ModguiVocab,
    pub board: BoardVocab,
}

impl Vocab {
    fn build() -> Self {
        let rdf = Ns(NS_RDF);
        let rdfs = Ns(NS_RDFS);
        let lv2 = Ns(NS_LV2);
        let doap = Ns(NS_DOAP);
        let foaf = Ns(NS_FOAF);
        let atom = Ns(NS_ATOM);
        let midi = Ns(NS_MIDI);
        let units = Ns(NS_UNITS);
        let pprops = Ns(NS_PPROPS);
        let pset = Ns(NS_PSET);
        let ingen = Ns(NS_INGEN);
        let pg = Ns(NS_PG);
        let modgui = Ns(NS_MODGUI);
        let board = Ns(NS_BOARD);
        Vocab {
            rdf: RdfVocab {
                type_: rdf.term("type"),
                value: rdf.term("value"),
            },
            rdfs: RdfsVocab {
                label: rdfs.term("label"),
                comment: rdfs.term("comment"),
            },
            lv2: Lv2Vocab {
                plugin: lv2.term("Plugin"),
                port: lv2.term("port"),
                name: lv2.term("name"),
                symbol: lv2.term("symbol"),
                short_name: lv2.term("shortName"),
                shortname_legacy: lv2.term("shortname"),
                default: lv2.term("default"),
                minimum: lv2.term("minimum"),
                maximum: lv2.term("maximum"),
                port_property: lv2.term("portProperty"),
                designation: lv2.term("designation"),
                index: lv2.term("index"),
                project: lv2.term("project"),
                prototype: lv2.term("prototype"),
                minor_version: lv2.term("minorVersion"),
                micro_version: lv2.term("microVersion"),
                binary: lv2.term("binary"),
                applies_to: lv2.term("appliesTo"),
                latency: lv2.term("latency"),
                scale_point: lv2.term("scalePoint"),
                input_port: lv2.term("InputPort"),
                output_port: lv2.term("OutputPort"),
                audio_port: lv2.term("AudioPort"),
                control_port: lv2.term("ControlPort"),
                cv_port: lv2.term("CVPort"),
            },
            doap: DoapVocab {
                name: doap.term("name"),
                license: doap.term("license"),
                maintainer: doap.term("maintainer"),
            },
            foaf: FoafVocab {
                name: foaf.term("name"),
                homepage: foaf.term("homepage"),
                mbox: foaf.term("mbox"),
            },
            atom: AtomVocab {
                atom_port: atom.term("AtomPort"),
                buffer_type: atom.term("bufferType"),
                supports: atom.term("supports"),
                sequence: atom.term("Sequence"),
            },
            midi: MidiVocab {
                midi_event: midi.term("MidiEvent"),
            },
            units: UnitsVocab {
                unit: units.term("unit"),
                render: units.term("render"),
                symbol: units.term("symbol"),
            },
            pprops: PpropsVocab {
                range_steps: pprops.term("rangeSteps"),
            },
            pset: PsetVocab {
                preset: pset.term("Preset"),
            },
            ingen: IngenVocab {
                arc: ingen.term("arc"),
                head: ingen.term("head"),
                tail: ingen.term("tail"),
                block: ingen.term("block"),
                canvas_x: ingen.term("canvasX"),
                canvas_y: ingen.term("canvasY"),
                enabled: ingen.term("enabled"),
                prototype: ingen.term("prototype"),
            },
            pg: PgVocab {
                brand: pg.term("brand"),
                label: pg.term("label"),
                default: pg.term("default"),
                minimum: pg.term("minimum"),
                maximum: pg.term("maximum"),
                range_steps: pg.term("rangeSteps"),
                cv_port: pg.term("CVPort"),
                builder_version: pg.term("builderVersion"),
                release_number: pg.term("releaseNumber"),
                build_id: pg.term("buildId"),
                build_environment: pg.term("buildEnvironment"),
            },
            modgui: ModguiVocab {
                gui: modgui.term("gui"),
                resources_directory: modgui.term("resourcesDirectory"),
                icon_template: modgui.term("iconTemplate"),
                settings_template: modgui.term("settingsTemplate"),
                javascript: modgui.term("javascript"),
                stylesheet: modgui.term("stylesheet"),
                template_data: modgui.term("templateData"),
                screenshot: modgui.term("screenshot"),
                thumbnail: modgui.term("thumbnail"),
                brand: modgui.term("brand"),
                label: modgui.term("label"),
                model: modgui.term("model"),
                panel: modgui.term("panel"),
                color: modgui.term("color"),
                knob: modgui.term("knob"),
                port: modgui.term("port"),
            },
            board: BoardVocab {
                pedalboard: board.term("Pedalboard"),
                unit_name: board.term("unitName"),
                unit_model: board.term("unitModel"),
                width: board.term("width"),
                height: board.term("height"),
                screenshot: board.term("screenshot"),
                thumbnail: board.term("thumbnail"),
            },
        }
    }
}

static VOCAB: Lazy<Vocab> = Lazy::new(Vocab::build);

pub fn vocab() -> &'static Vocab {
    &VOCAB
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn terms_expand_against_their_namespace() {
        let v = vocab();
        assert_eq!(v.rdf.type_.as_str(), format!("{NS_RDF}type"));
        assert_eq!(v.lv2.short_name.as_str(), format!("{NS_LV2}shortName"));
        assert_eq!(
            v.modgui.resources_directory.as_str(),
            format!("{NS_MODGUI}resourcesDirectory")
        );
    }

    #[test]
    fn repeated_lookup_returns_the_same_term() {
        assert_eq!(vocab().lv2.port, vocab().lv2.port);
    }

    #[test]
    fn well_known_prefixes_cover_the_core_namespaces() {
        let prefixes = well_known_prefixes();
        assert_eq!(prefixes.get("lv2").map(String::as_str), Some(NS_LV2));
        assert_eq!(prefixes.get("pgboard").map(String::as_str), Some(NS_BOARD));
    }
}
