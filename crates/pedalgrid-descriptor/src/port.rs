//! Per-port descriptor building and validation.

use std::collections::HashSet;

use pedalgrid_graph::{GraphSnapshot, Node, Subject, vocab, NS_LV2, NS_UNITS};

use crate::coerce::{numeric, string_first_or, Numeric};
use crate::descriptor::{Num, PortDescriptor, PortRanges, PortUnits, ScalePoint};
use crate::diagnostics::Diagnostics;
use crate::unit::standard_unit;

/// Shared state while walking one plugin's ports: the diagnostics sink and
/// the plugin-wide name/symbol dedup sets.
pub(crate) struct PortContext<'a> {
    pub snap: &'a GraphSnapshot,
    pub diag: &'a mut Diagnostics,
    pub seen_names: HashSet<String>,
    pub seen_symbols: HashSet<String>,
}

impl<'a> PortContext<'a> {
    pub fn new(snap: &'a GraphSnapshot, diag: &'a mut Diagnostics) -> Self {
        Self {
            snap,
            diag,
            seen_names: HashSet::new(),
            seen_symbols: HashSet::new(),
        }
    }
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Deterministic short-name derivation: cut suffixes at `/`, ` (` or ` [`,
/// then drop vowels (first character always kept), then hard-truncate to 16.
pub(crate) fn short_port_name(name: &str) -> String {
    if char_len(name) <= 16 {
        return name.to_string();
    }
    let cut = name
        .split('/')
        .next()
        .unwrap_or(name)
        .split(" (")
        .next()
        .unwrap_or(name)
        .split(" [")
        .next()
        .unwrap_or(name)
        .trim();
    let mut short = cut.to_string();
    if char_len(&short) > 16 {
        let mut chars = cut.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        let rest: String = chars
            .filter(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
            .collect();
        short = format!("{first}{rest}");
        if char_len(&short) > 16 {
            short = truncate_chars(&short, 16);
        }
    }
    short.trim().to_string()
}

/// Coerces one range value under the port's integer/float policy, emitting
/// the matching warning or error. `fallback` is used for malformed literals.
fn coerce_range_value(
    diag: &mut Diagnostics,
    node: &Node,
    integer: bool,
    field: &str,
    port_name: &str,
    fallback: Num,
) -> Num {
    match numeric(node) {
        Numeric::Integer(i) => {
            if integer {
                Num::Int(i)
            } else {
                diag.warning(format!(
                    "port '{port_name}' does not have integer property but {field} value is an integer"
                ));
                Num::Float(i as f64)
            }
        }
        Numeric::Float(f) => {
            if integer {
                diag.warning(format!(
                    "port '{port_name}' has integer property but {field} value is not an integer"
                ));
                Num::Int(f as i64)
            } else {
                Num::Float(f)
            }
        }
        Numeric::Malformed => {
            diag.error(format!(
                "port '{port_name}' {field} value is not an integer or float"
            ));
            fallback
        }
    }
}

fn resolve_ranges(
    ctx: &mut PortContext<'_>,
    port: &Subject,
    port_name: &str,
    types: &[String],
    properties: &[String],
    designation: &str,
) -> PortRanges {
    let v = vocab();
    let snap = ctx.snap;
    let integer = properties.iter().any(|p| p == "integer");
    let is_cv = types.iter().any(|t| t == "CV");

    let minimum_node = snap
        .get(port, &v.pg.minimum)
        .or_else(|| snap.get(port, &v.lv2.minimum));
    let maximum_node = snap
        .get(port, &v.pg.maximum)
        .or_else(|| snap.get(port, &v.lv2.maximum));
    let default_node = snap
        .get(port, &v.pg.default)
        .or_else(|| snap.get(port, &v.lv2.default));

    let (Some(minimum_node), Some(maximum_node)) = (minimum_node, maximum_node) else {
        // no declared bounds: fall back to the canonical range
        let ranges = if integer {
            PortRanges {
                minimum: Num::Int(0),
                maximum: Num::Int(1),
                default: Num::Int(0),
            }
        } else {
            PortRanges {
                minimum: Num::Float(if is_cv { -1.0 } else { 0.0 }),
                maximum: Num::Float(1.0),
                default: Num::Float(0.0),
            }
        };
        let latency = format!("{NS_LV2}latency");
        if !is_cv && designation != latency {
            ctx.diag
                .error(format!("port '{port_name}' is missing value ranges"));
        }
        return ranges;
    };

    let minimum = coerce_range_value(
        ctx.diag,
        &minimum_node,
        integer,
        "minimum",
        port_name,
        if integer { Num::Int(0) } else { Num::Float(0.0) },
    );
    let mut maximum = coerce_range_value(
        ctx.diag,
        &maximum_node,
        integer,
        "maximum",
        port_name,
        if integer { Num::Int(1) } else { Num::Float(1.0) },
    );

    if minimum.as_f64() >= maximum.as_f64() {
        maximum = if integer {
            Num::Int(minimum.as_f64() as i64 + 1)
        } else {
            Num::Float(minimum.as_f64() + 0.1)
        };
        ctx.diag.error(format!(
            "port '{port_name}' minimum value is equal or higher than its maximum"
        ));
    }

    let default = match default_node {
        Some(node) => {
            let fallback = if integer { minimum } else { Num::Float(0.0) };
            let mut default =
                coerce_range_value(ctx.diag, &node, integer, "default", port_name, fallback);
            let mut test_min = minimum.as_f64();
            let mut test_max = maximum.as_f64();
            if properties.iter().any(|p| p == "sampleRate") {
                test_min *= 48000.0;
                test_max *= 48000.0;
            }
            if !(test_min <= default.as_f64() && default.as_f64() <= test_max) {
                default = minimum;
                ctx.diag
                    .error(format!("port '{port_name}' default value is out of bounds"));
            }
            default
        }
        None => {
            if types.iter().any(|t| t == "Input") {
                ctx.diag
                    .error(format!("port '{port_name}' is missing default value"));
            }
            minimum
        }
    };

    PortRanges {
        minimum,
        maximum,
        default,
    }
}

fn resolve_scale_points(
    ctx: &mut PortContext<'_>,
    port: &Subject,
    port_name: &str,
    integer: bool,
    ranges: &PortRanges,
) -> Vec<ScalePoint> {
    let v = vocab();
    // (sort key, value, label); deduplicated by value, last label wins
    let mut collected: Vec<(f64, Num, String)> = Vec::new();

    for node in ctx.snap.find(port, &v.lv2.scale_point) {
        let Some(point) = node.to_subject() else {
            ctx.diag.error("a port scalepoint is missing its label");
            continue;
        };
        let label = match ctx.snap.get(&point, &v.rdfs.label) {
            Some(node) => node.as_string(),
            None => {
                ctx.diag.error("a port scalepoint is missing its label");
                continue;
            }
        };
        if label.is_empty() {
            ctx.diag.error("a port scalepoint label is empty");
            continue;
        }
        let Some(value_node) = ctx.snap.get(&point, &v.rdf.value) else {
            ctx.diag
                .error(format!("port scalepoint '{label}' is missing its value"));
            continue;
        };
        let value = match numeric(&value_node) {
            Numeric::Integer(i) => {
                if !integer {
                    ctx.diag.warning(format!(
                        "port '{port_name}' scalepoint '{label}' value is an integer"
                    ));
                }
                Num::Int(i)
            }
            Numeric::Float(f) => {
                if integer {
                    ctx.diag.warning(format!(
                        "port '{port_name}' scalepoint '{label}' value is not an integer"
                    ));
                }
                Num::Float(f)
            }
            Numeric::Malformed => {
                ctx.diag.error(format!(
                    "port '{port_name}' scalepoint '{label}' value is not an integer or float"
                ));
                ranges.minimum
            }
        };
        let key = value.as_f64();
        if ranges.minimum.as_f64() <= key && key <= ranges.maximum.as_f64() {
            if let Some(existing) = collected.iter_mut().find(|(k, _, _)| *k == key) {
                existing.1 = value;
                existing.2 = label;
            } else {
                collected.push((key, value, label));
            }
        } else {
            ctx.diag.error(format!(
                "port scalepoint '{label}' has an out-of-bounds value:\n{} < {} < {}",
                ranges.minimum, value, ranges.maximum
            ));
        }
    }

    collected.sort_by(|a, b| a.0.total_cmp(&b.0));
    collected
        .into_iter()
        .map(|(_, value, label)| ScalePoint { value, label })
        .collect()
}

fn resolve_units(
    ctx: &mut PortContext<'_>,
    port: &Subject,
    port_name: &str,
) -> Option<PortUnits> {
    let v = vocab();
    let unit_node = ctx.snap.get(port, &v.units.unit)?;
    let uri = unit_node.as_string();

    let (label, render, symbol) = if uri.starts_with("http://lv2plug.in/ns/") {
        let mut mini = uri.strip_prefix(NS_UNITS).unwrap_or(&uri).to_string();
        let alnum = !mini.is_empty() && mini.chars().all(|c| c.is_ascii_alphanumeric());
        if !alnum {
            ctx.diag
                .error(format!("port '{port_name}' has wrong standard unit uri"));
            mini = mini
                .rsplit('#')
                .next()
                .unwrap_or("")
                .rsplit('/')
                .next()
                .unwrap_or("")
                .to_string();
        }
        match standard_unit(&mini) {
            Some(spec) => (
                spec.label.to_string(),
                spec.render.to_string(),
                spec.symbol.to_string(),
            ),
            None => {
                if alnum {
                    ctx.diag.error(format!(
                        "port '{port_name}' has unknown standard unit '{mini}'"
                    ));
                }
                (String::new(), String::new(), String::new())
            }
        }
    } else {
        // custom unit: label, render and symbol must all be declared
        let subject = unit_node.to_subject();
        let fetch = |predicate| {
            subject
                .as_ref()
                .and_then(|s| ctx.snap.get(s, predicate))
                .map(|n| n.as_string())
        };
        let label = fetch(&v.rdfs.label);
        let render = fetch(&v.units.render);
        let symbol = fetch(&v.units.symbol);
        if label.is_none() {
            ctx.diag
                .error(format!("port '{port_name}' has custom unit with no label"));
        }
        if render.is_none() {
            ctx.diag
                .error(format!("port '{port_name}' has custom unit with no render"));
        }
        if symbol.is_none() {
            ctx.diag
                .error(format!("port '{port_name}' has custom unit with no symbol"));
        }
        (
            label.unwrap_or_default(),
            render.unwrap_or_default(),
            symbol.unwrap_or_default(),
        )
    };

    if label.is_empty() || render.is_empty() || symbol.is_empty() {
        return None;
    }
    Some(PortUnits {
        label,
        render,
        symbol,
    })
}

/// Builds one port's descriptor. Returns the raw type tags (direction tags
/// still included) so the engine can bucket the port.
pub(crate) fn build_port(
    ctx: &mut PortContext<'_>,
    port: &Subject,
    index: u32,
) -> (Vec<String>, PortDescriptor) {
    let v = vocab();

    let mut name = ctx
        .snap
        .get(port, &v.lv2.name)
        .map(|n| n.as_string())
        .unwrap_or_default();
    if name.is_empty() {
        name = format!("_{index}");
        ctx.diag.error(format!("port with index {index} has no name"));
    }

    let mut symbol = ctx
        .snap
        .get(port, &v.lv2.symbol)
        .map(|n| n.as_string())
        .unwrap_or_default();
    if symbol.is_empty() {
        symbol = format!("_{index}");
        ctx.diag
            .error(format!("port with index {index} has no symbol"));
    }

    if !ctx.seen_names.insert(name.clone()) {
        ctx.diag
            .warning(format!("port name '{name}' is not unique"));
    }
    if !ctx.seen_symbols.insert(symbol.clone()) {
        ctx.diag
            .error(format!("port symbol '{symbol}' is not unique"));
    }

    let mut short_name = string_first_or(&ctx.snap.find(port, &v.lv2.short_name));
    if short_name.is_empty() {
        short_name = short_port_name(&name);
        if char_len(&short_name) > 16 {
            ctx.diag.warning(format!(
                "port '{name}' name is too big, reduce the name size or provide a shortName"
            ));
        }
    } else if char_len(&short_name) > 16 {
        short_name = truncate_chars(&short_name, 16);
        ctx.diag.error(format!(
            "port '{name}' short name has more than 16 characters"
        ));
    }
    if ctx.snap.get(port, &v.lv2.shortname_legacy).is_some() {
        ctx.diag.error(format!(
            "port '{name}' short name is using old style 'shortname' instead of 'shortName'"
        ));
    }

    // type tags: local name with one "Port" suffix stripped
    let mut types: Vec<String> = ctx
        .snap
        .strings(port, &v.rdf.type_)
        .iter()
        .map(|uri| {
            uri.rsplit('#')
                .next()
                .unwrap_or(uri.as_str())
                .replacen("Port", "", 1)
        })
        .collect();

    let supports_midi = ctx
        .snap
        .find(port, &v.atom.supports)
        .iter()
        .any(|n| n.iri() == Some(&v.midi.midi_event));
    let buffer_type = string_first_or(&ctx.snap.find(port, &v.atom.buffer_type));
    if types.iter().any(|t| t == "Atom")
        && supports_midi
        && buffer_type == v.atom.sequence.as_str()
    {
        types.push("MIDI".to_string());
    }

    let comment = string_first_or(&ctx.snap.find(port, &v.rdfs.comment));
    let designation = string_first_or(&ctx.snap.find(port, &v.lv2.designation));
    let range_steps = ctx
        .snap
        .get(port, &v.pg.range_steps)
        .or_else(|| ctx.snap.get(port, &v.pprops.range_steps))
        .and_then(|n| n.as_int());

    let mut properties: Vec<String> = ctx
        .snap
        .strings(port, &v.lv2.port_property)
        .iter()
        .map(|uri| uri.rsplit('#').next().unwrap_or(uri.as_str()).to_string())
        .collect();
    properties.sort();

    let is_control = types.iter().any(|t| t == "Control");
    let is_cv = types.iter().any(|t| t == "CV");

    let mut ranges = None;
    let mut scale_points = Vec::new();
    if is_control || is_cv {
        let integer = properties.iter().any(|p| p == "integer");
        if integer && is_cv {
            ctx.diag
                .error(format!("port '{name}' has integer property and CV type"));
        }
        let resolved = resolve_ranges(ctx, port, &name, &types, &properties, &designation);
        scale_points = resolve_scale_points(ctx, port, &name, integer, &resolved);
        if properties.iter().any(|p| p == "enumeration") && scale_points.len() <= 1 {
            ctx.diag.error(format!(
                "port '{name}' wants to use enumeration but doesn't have enough values"
            ));
            properties.retain(|p| p != "enumeration");
        }
        ranges = Some(resolved);
    }

    let units = if is_control {
        resolve_units(ctx, port, &name)
    } else {
        None
    };

    let descriptor = PortDescriptor {
        index,
        name,
        symbol,
        short_name,
        comment,
        designation,
        properties,
        range_steps,
        ranges,
        units,
        scale_points,
    };
    (types, descriptor)
}

#[cfg(test)]
mod tests {
    use pedalgrid_graph::Iri;
    use pretty_assertions::assert_eq;

    use super::*;

    fn subject(uri: &str) -> Subject {
        Subject::Iri(Iri::new(uri))
    }

    fn iri_node(uri: String) -> Node {
        Node::Iri(Iri::new(uri))
    }

    struct PortSpec<'a> {
        snap: &'a mut GraphSnapshot,
        port: Subject,
    }

    impl<'a> PortSpec<'a> {
        fn new(snap: &'a mut GraphSnapshot, uri: &str) -> Self {
            Self {
                snap,
                port: subject(uri),
            }
        }

        fn typed(self, local: &str) -> Self {
            let node = iri_node(format!("{NS_LV2}{local}"));
            self.snap
                .insert(self.port.clone(), vocab().rdf.type_.clone(), node);
            self
        }

        fn set(self, predicate: &Iri, node: Node) -> Self {
            self.snap.insert(self.port.clone(), predicate.clone(), node);
            self
        }

        fn named(self, name: &str, symbol: &str) -> Self {
            let v = vocab();
            self.set(&v.lv2.name.clone(), Node::Str(name.into()))
                .set(&v.lv2.symbol.clone(), Node::Str(symbol.into()))
        }

        fn port(&self) -> Subject {
            self.port.clone()
        }
    }

    fn control_input(snap: &mut GraphSnapshot, uri: &str, name: &str, symbol: &str) -> Subject {
        PortSpec::new(snap, uri)
            .typed("InputPort")
            .typed("ControlPort")
            .named(name, symbol)
            .port()
    }

    #[test]
    fn short_name_derivation_is_deterministic_and_short() {
        let derived = short_port_name("Compressor Advanced");
        assert!(derived.chars().count() <= 16);
        assert_eq!(derived, short_port_name("Compressor Advanced"));
        assert_eq!(derived, "Cmprssr Advncd");
    }

    #[test]
    fn short_name_keeps_short_names_and_cuts_suffixes() {
        assert_eq!(short_port_name("Gain"), "Gain");
        assert_eq!(short_port_name("Level (post filter stage)"), "Level");
        assert_eq!(short_port_name("Feedback/Resonance Amount"), "Feedback");
    }

    #[test]
    fn integer_port_with_float_minimum_warns_and_truncates() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#gain", "Gain", "gain");
        snap.insert(
            port.clone(),
            v.lv2.port_property.clone(),
            iri_node(format!("{NS_LV2}integer")),
        );
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Int(10));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Int(2));

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);

        let ranges = descriptor.ranges.unwrap();
        assert_eq!(ranges.minimum, Num::Int(0));
        assert_eq!(ranges.maximum, Num::Int(10));
        assert_eq!(ranges.default, Num::Int(2));
        assert!(diag.warnings().iter().any(|w| w
            .contains("integer property but minimum value is not an integer")));
        assert!(diag.errors().is_empty());
    }

    #[test]
    fn inverted_bounds_are_forced_apart() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#a", "A", "a");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(1.0));

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);

        let ranges = descriptor.ranges.unwrap();
        assert_eq!(ranges.minimum, Num::Float(1.0));
        assert_eq!(ranges.maximum, Num::Float(1.1));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("minimum value is equal or higher than its maximum")));
    }

    #[test]
    fn missing_ranges_default_per_port_kind() {
        let mut snap = GraphSnapshot::new();
        let cv = PortSpec::new(&mut snap, "http://example.org/p#cv")
            .typed("OutputPort")
            .typed("CVPort")
            .named("CV Out", "cv_out")
            .port();
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &cv, 0);
        let ranges = descriptor.ranges.unwrap();
        assert_eq!(ranges.minimum, Num::Float(-1.0));
        assert_eq!(ranges.maximum, Num::Float(1.0));
        // CV ports may omit ranges without an error
        assert!(diag.errors().is_empty());

        let mut snap = GraphSnapshot::new();
        let control = control_input(&mut snap, "http://example.org/p#c", "C", "c");
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &control, 0);
        assert_eq!(descriptor.ranges.unwrap().minimum, Num::Float(0.0));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("is missing value ranges")));
    }

    #[test]
    fn latency_designation_tolerates_missing_ranges() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = PortSpec::new(&mut snap, "http://example.org/p#latency")
            .typed("OutputPort")
            .typed("ControlPort")
            .named("Latency", "latency")
            .set(
                &v.lv2.designation.clone(),
                iri_node(format!("{NS_LV2}latency")),
            )
            .port();
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        build_port(&mut ctx, &port, 0);
        assert!(diag.errors().is_empty());
    }

    #[test]
    fn sample_rate_property_scales_the_default_check() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#f", "Freq", "freq");
        snap.insert(
            port.clone(),
            v.lv2.port_property.clone(),
            iri_node(format!("{NS_LV2}sampleRate")),
        );
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(0.5));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(1000.0));

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        // 1000.0 is inside [0, 0.5 * 48000], so the default survives
        assert_eq!(descriptor.ranges.unwrap().default, Num::Float(1000.0));
        assert!(diag.errors().is_empty());
    }

    #[test]
    fn out_of_bounds_default_resets_to_minimum() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#d", "Depth", "depth");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(4.0));

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        assert_eq!(descriptor.ranges.unwrap().default, Num::Float(0.0));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("default value is out of bounds")));
    }

    #[test]
    fn scale_points_sort_ascending_and_drop_out_of_bounds() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#m", "Mode", "mode");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(10.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(1.0));
        for (value, label, sp_uri) in [
            (5.0, "Five", "http://example.org/p#sp5"),
            (1.0, "One", "http://example.org/p#sp1"),
            (3.0, "Three", "http://example.org/p#sp3"),
            (15.0, "Fifteen", "http://example.org/p#sp15"),
        ] {
            let point = subject(sp_uri);
            snap.insert(port.clone(), v.lv2.scale_point.clone(), point.to_node());
            snap.insert(point.clone(), v.rdfs.label.clone(), Node::Str(label.into()));
            snap.insert(point.clone(), v.rdf.value.clone(), Node::Float(value));
        }

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        let values: Vec<Num> = descriptor.scale_points.iter().map(|p| p.value).collect();
        assert_eq!(
            values,
            vec![Num::Float(1.0), Num::Float(3.0), Num::Float(5.0)]
        );
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("'Fifteen' has an out-of-bounds value")));
    }

    #[test]
    fn enumeration_needs_at_least_two_scale_points() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#e", "Enum", "enum");
        snap.insert(
            port.clone(),
            v.lv2.port_property.clone(),
            iri_node(format!("{NS_LV2}enumeration")),
        );
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(0.0));

        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        assert!(!descriptor.properties.iter().any(|p| p == "enumeration"));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("wants to use enumeration")));
    }

    #[test]
    fn duplicate_symbols_error_but_duplicate_names_only_warn() {
        let mut snap = GraphSnapshot::new();
        let a = control_input(&mut snap, "http://example.org/p#1", "Gain", "gain");
        let b = control_input(&mut snap, "http://example.org/p#2", "Gain", "gain");
        let v = vocab();
        for port in [&a, &b] {
            snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
            snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
            snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(0.5));
        }
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        build_port(&mut ctx, &a, 0);
        build_port(&mut ctx, &b, 1);
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("port symbol 'gain' is not unique")));
        assert!(diag
            .warnings()
            .iter()
            .any(|w| w.contains("port name 'Gain' is not unique")));
    }

    #[test]
    fn missing_name_and_symbol_get_placeholders() {
        let mut snap = GraphSnapshot::new();
        let port = PortSpec::new(&mut snap, "http://example.org/p#anon")
            .typed("InputPort")
            .typed("AudioPort")
            .port();
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (types, descriptor) = build_port(&mut ctx, &port, 3);
        assert_eq!(descriptor.name, "_3");
        assert_eq!(descriptor.symbol, "_3");
        assert!(types.iter().any(|t| t == "Audio"));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("port with index 3 has no name")));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("port with index 3 has no symbol")));
    }

    #[test]
    fn atom_midi_ports_gain_the_synthetic_tag() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = PortSpec::new(&mut snap, "http://example.org/p#midi_in")
            .named("MIDI In", "midi_in")
            .port();
        snap.insert(
            port.clone(),
            v.rdf.type_.clone(),
            Node::Iri(Iri::new("http://lv2plug.in/ns/ext/atom#AtomPort")),
        );
        snap.insert(
            port.clone(),
            v.rdf.type_.clone(),
            iri_node(format!("{NS_LV2}InputPort")),
        );
        snap.insert(
            port.clone(),
            v.atom.supports.clone(),
            Node::Iri(v.midi.midi_event.clone()),
        );
        snap.insert(
            port.clone(),
            v.atom.buffer_type.clone(),
            Node::Iri(v.atom.sequence.clone()),
        );
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (types, _) = build_port(&mut ctx, &port, 0);
        assert!(types.iter().any(|t| t == "MIDI"));
        assert!(types.iter().any(|t| t == "Atom"));
    }

    #[test]
    fn standard_units_resolve_and_unknown_units_error() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#hz", "Rate", "rate");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(0.5));
        snap.insert(
            port.clone(),
            v.units.unit.clone(),
            Node::Iri(Iri::new(format!("{NS_UNITS}hz"))),
        );
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        let units = descriptor.units.unwrap();
        assert_eq!(units.label, "hertz");
        assert_eq!(units.symbol, "Hz");
        assert!(diag.errors().is_empty());

        let mut snap = GraphSnapshot::new();
        let port = control_input(&mut snap, "http://example.org/p#odd", "Odd", "odd");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(0.5));
        snap.insert(
            port.clone(),
            v.units.unit.clone(),
            Node::Iri(Iri::new(format!("{NS_UNITS}parsecs"))),
        );
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        assert!(descriptor.units.is_none());
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("has unknown standard unit 'parsecs'")));
    }

    #[test]
    fn custom_units_require_all_three_parts() {
        let mut snap = GraphSnapshot::new();
        let v = vocab();
        let port = control_input(&mut snap, "http://example.org/p#cu", "Amount", "amount");
        snap.insert(port.clone(), v.lv2.minimum.clone(), Node::Float(0.0));
        snap.insert(port.clone(), v.lv2.maximum.clone(), Node::Float(1.0));
        snap.insert(port.clone(), v.lv2.default.clone(), Node::Float(0.5));
        let unit = subject("http://example.org/p#stompunit");
        snap.insert(port.clone(), v.units.unit.clone(), unit.to_node());
        snap.insert(
            unit.clone(),
            v.rdfs.label.clone(),
            Node::Str("stomps".into()),
        );
        // render and symbol missing
        let mut diag = Diagnostics::new();
        let mut ctx = PortContext::new(&snap, &mut diag);
        let (_, descriptor) = build_port(&mut ctx, &port, 0);
        assert!(descriptor.units.is_none());
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("custom unit with no render")));
        assert!(diag
            .errors()
            .iter()
            .any(|e| e.contains("custom unit with no symbol")));
    }
}
