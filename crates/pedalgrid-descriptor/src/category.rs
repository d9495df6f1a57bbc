//! Taxonomy-type to category-path classification.

use pedalgrid_graph::{Node, NS_LV2, NS_PG};

fn standard_paths(term: &str) -> Option<&'static [&'static str]> {
    Some(match term {
        "DelayPlugin" => &["Delay"],
        "DistortionPlugin" => &["Distortion"],
        "WaveshaperPlugin" => &["Distortion", "Waveshaper"],
        "DynamicsPlugin" => &["Dynamics"],
        "AmplifierPlugin" => &["Dynamics", "Amplifier"],
        "CompressorPlugin" => &["Dynamics", "Compressor"],
        "ExpanderPlugin" => &["Dynamics", "Expander"],
        "GatePlugin" => &["Dynamics", "Gate"],
        "LimiterPlugin" => &["Dynamics", "Limiter"],
        "FilterPlugin" => &["Filter"],
        "AllpassPlugin" => &["Filter", "Allpass"],
        "BandpassPlugin" => &["Filter", "Bandpass"],
        "CombPlugin" => &["Filter", "Comb"],
        "EQPlugin" => &["Filter", "Equaliser"],
        "MultiEQPlugin" => &["Filter", "Equaliser", "Multiband"],
        "ParaEQPlugin" => &["Filter", "Equaliser", "Parametric"],
        "HighpassPlugin" => &["Filter", "Highpass"],
        "LowpassPlugin" => &["Filter", "Lowpass"],
        "GeneratorPlugin" => &["Generator"],
        "ConstantPlugin" => &["Generator", "Constant"],
        "InstrumentPlugin" => &["Generator", "Instrument"],
        "OscillatorPlugin" => &["Generator", "Oscillator"],
        "ModulatorPlugin" => &["Modulator"],
        "ChorusPlugin" => &["Modulator", "Chorus"],
        "FlangerPlugin" => &["Modulator", "Flanger"],
        "PhaserPlugin" => &["Modulator", "Phaser"],
        "ReverbPlugin" => &["Reverb"],
        "SimulatorPlugin" => &["Simulator"],
        "SpatialPlugin" => &["Spatial"],
        "SpectralPlugin" => &["Spectral"],
        "PitchPlugin" => &["Spectral", "Pitch Shifter"],
        "UtilityPlugin" => &["Utility"],
        "AnalyserPlugin" => &["Utility", "Analyser"],
        "ConverterPlugin" => &["Utility", "Converter"],
        "FunctionPlugin" => &["Utility", "Function"],
        "MixerPlugin" => &["Utility", "Mixer"],
        _ => return None,
    })
}

fn vendor_paths(term: &str) -> Option<&'static [&'static str]> {
    Some(match term {
        "DelayPlugin" => &["Delay"],
        "DistortionPlugin" => &["Distortion"],
        "DynamicsPlugin" => &["Dynamics"],
        "FilterPlugin" => &["Filter"],
        "GeneratorPlugin" => &["Generator"],
        "ModulatorPlugin" => &["Modulator"],
        "ReverbPlugin" => &["Reverb"],
        "SimulatorPlugin" => &["Simulator"],
        "SpatialPlugin" => &["Spatial"],
        "SpectralPlugin" => &["Spectral"],
        "UtilityPlugin" => &["Utility"],
        "MIDIPlugin" => &["Utility", "MIDI"],
        "ControlVoltagePlugin" => &["ControlVoltage"],
        _ => return None,
    })
}

fn collect(
    types: &[Node],
    namespace: &str,
    table: fn(&str) -> Option<&'static [&'static str]>,
    categories: &mut Vec<String>,
) {
    for node in types {
        let uri = node.as_string();
        let Some(term) = uri.strip_prefix(namespace) else {
            continue;
        };
        if let Some(paths) = table(term) {
            for path in paths {
                if !categories.iter().any(|c| c == path) {
                    categories.push((*path).to_string());
                }
            }
        }
    }
}

/// Category path for a plugin's declared taxonomy types. Vendor vocabulary
/// fully overrides the standard vocabulary; no merging.
pub fn classify(types: &[Node]) -> Vec<String> {
    let mut categories = Vec::new();
    collect(types, NS_PG, vendor_paths, &mut categories);
    if !categories.is_empty() {
        return categories;
    }
    collect(types, NS_LV2, standard_paths, &mut categories);
    categories
}

#[cfg(test)]
mod tests {
    use pedalgrid_graph::Iri;
    use pretty_assertions::assert_eq;

    use super::*;

    fn type_node(namespace: &str, term: &str) -> Node {
        Node::Iri(Iri::new(format!("{namespace}{term}")))
    }

    #[test]
    fn vendor_vocabulary_wins_outright() {
        let types = vec![
            type_node(NS_LV2, "FilterPlugin"),
            type_node(NS_PG, "ControlVoltagePlugin"),
        ];
        assert_eq!(classify(&types), vec!["ControlVoltage"]);
    }

    #[test]
    fn standard_vocabulary_is_the_fallback() {
        let types = vec![type_node(NS_LV2, "CompressorPlugin")];
        assert_eq!(classify(&types), vec!["Dynamics", "Compressor"]);
    }

    #[test]
    fn unknown_types_yield_no_category() {
        let types = vec![
            type_node(NS_LV2, "Plugin"),
            Node::Iri(Iri::new("http://other.example/SomePlugin")),
        ];
        assert_eq!(classify(&types), Vec::<String>::new());
    }

    #[test]
    fn repeated_paths_are_collected_once() {
        let types = vec![
            type_node(NS_LV2, "EQPlugin"),
            type_node(NS_LV2, "ParaEQPlugin"),
        ];
        assert_eq!(
            classify(&types),
            vec!["Filter", "Equaliser", "Parametric"]
        );
    }
}
