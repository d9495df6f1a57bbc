//! Fixed table of the standard unit vocabulary.

pub struct UnitSpec {
    pub label: &'static str,
    pub render: &'static str,
    pub symbol: &'static str,
}

/// {label, render format, symbol} for a standard unit's local name.
pub fn standard_unit(name: &str) -> Option<UnitSpec> {
    let (label, render, symbol) = match name {
        "s" => ("seconds", "%f s", "s"),
        "ms" => ("milliseconds", "%f ms", "ms"),
        "min" => ("minutes", "%f mins", "min"),
        "bar" => ("bars", "%f bars", "bars"),
        "beat" => ("beats", "%f beats", "beats"),
        "frame" => ("audio frames", "%f frames", "frames"),
        "m" => ("metres", "%f m", "m"),
        "cm" => ("centimetres", "%f cm", "cm"),
        "mm" => ("millimetres", "%f mm", "mm"),
        "km" => ("kilometres", "%f km", "km"),
        "inch" => ("inches", "%f\"", "in"),
        "mile" => ("miles", "%f mi", "mi"),
        "db" => ("decibels", "%f dB", "dB"),
        "pc" => ("percent", "%f%%", "%"),
        "coef" => ("coefficient", "* %f", "*"),
        "hz" => ("hertz", "%f Hz", "Hz"),
        "khz" => ("kilohertz", "%f kHz", "kHz"),
        "mhz" => ("megahertz", "%f MHz", "MHz"),
        "bpm" => ("beats per minute", "%f BPM", "BPM"),
        "oct" => ("octaves", "%f octaves", "oct"),
        "cent" => ("cents", "%f ct", "ct"),
        "semitone12TET" => ("semitones", "%f semi", "semi"),
        "degree" => ("degrees", "%f deg", "deg"),
        "midiNote" => ("MIDI note", "MIDI note %d", "note"),
        "volts" => ("volts", "%f v", "v"),
        _ => return None,
    };
    Some(UnitSpec {
        label,
        render,
        symbol,
    })
}
