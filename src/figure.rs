//! Declarative figure description. Field names follow the plotly JSON schema
//! so the serialized form can be handed to a plotly frontend as-is.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Traces in draw order. Later traces paint over earlier ones.
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Markers,
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Tozeroy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Star,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    pub hoverinfo: String,
    pub showlegend: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Diameter in pixels, one per point.
    pub size: Vec<f64>,
    pub color: String,
    /// One per point.
    pub opacity: Vec<f64>,
    pub symbol: Symbol,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub range: [f64; 2],
    pub showgrid: bool,
    pub showticklabels: bool,
    pub zeroline: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    /// Pixels.
    pub height: u32,
    pub margin: Margin,
}
