//! Output records of the extraction engine.
//!
//! All of these are immutable value records built fresh per extraction call.
//! Serialized field names follow the platform's established camelCase JSON
//! spelling (`shortName`, `scalePoints`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A range or scale-point value that keeps its declared literal type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(i) => *i as f64,
            Num::Float(f) => *f,
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(i) => write!(f, "{i}"),
            Num::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRanges {
    pub minimum: Num,
    pub maximum: Num,
    pub default: Num,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortUnits {
    pub label: String,
    pub render: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalePoint {
    pub value: Num,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDescriptor {
    pub index: u32,
    pub name: String,
    pub symbol: String,
    pub short_name: String,
    pub comment: String,
    pub designation: String,
    pub properties: Vec<String>,
    pub range_steps: Option<i64>,
    pub ranges: Option<PortRanges>,
    pub units: Option<PortUnits>,
    pub scale_points: Vec<ScalePoint>,
}

/// Ports of one type bucket, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortGroup {
    pub input: Vec<PortDescriptor>,
    pub output: Vec<PortDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuiPort {
    pub index: i64,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiDescriptor {
    pub resources_directory: String,
    pub using_see_also: bool,
    pub modifiable_in_place: bool,
    pub icon_template: Option<String>,
    pub settings_template: Option<String>,
    pub javascript: Option<String>,
    pub stylesheet: Option<String>,
    pub screenshot: Option<String>,
    pub thumbnail: Option<String>,
    pub brand: Option<String>,
    pub label: Option<String>,
    pub model: Option<String>,
    pub panel: Option<String>,
    pub color: Option<String>,
    pub knob: Option<String>,
    pub ports: Vec<GuiPort>,
}

/// Derived from version-number parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Experimental,
    Testing,
    Stable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub homepage: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub uri: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    pub uri: String,
    pub name: String,
    pub binary: String,
    pub brand: String,
    pub label: String,
    pub license: String,
    pub comment: String,
    pub category: Vec<String>,
    pub minor_version: i64,
    pub micro_version: i64,
    pub version: String,
    pub stability: Stability,
    pub author: Author,
    pub bundles: Vec<String>,
    pub gui: Option<GuiDescriptor>,
    pub ports: BTreeMap<String, PortGroup>,
    pub presets: Vec<Preset>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PedalboardUnit {
    pub name: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IoCount {
    pub ins: u32,
    pub outs: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HardwarePorts {
    pub audio: IoCount,
    pub cv: IoCount,
    pub midi: IoCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoardSize {
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstance {
    pub instance: String,
    pub uri: String,
    pub x: f64,
    pub y: f64,
    pub enabled: bool,
    pub builder: i64,
    pub release: i64,
    pub minor_version: i64,
    pub micro_version: i64,
    pub build_id: String,
    pub build_environment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PedalboardDescriptor {
    pub name: String,
    pub uri: String,
    pub author: String,
    pub unit: PedalboardUnit,
    pub hardware: HardwarePorts,
    pub size: BoardSize,
    pub screenshot: String,
    pub thumbnail: String,
    pub connections: Vec<Connection>,
    pub plugins: Vec<BlockInstance>,
}
