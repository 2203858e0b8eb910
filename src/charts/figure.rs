//! Figure descriptors
//!
//! A minimal subset of the plotly figure schema. Descriptors are built on the
//! server and serialized as-is; the display layer hands them to plotly
//! without touching them. Optional fields are omitted from the JSON so
//! plotly applies its own defaults.

use std::sync::Arc;

use serde::Serialize;

/// A complete figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.data.push(trace.into());
        self
    }

    pub fn add_trace(&mut self, trace: impl Into<Trace>) {
        self.data.push(trace.into());
    }

    /// A figure with no traces renders as the blank styled frame.
    pub fn is_blank(&self) -> bool {
        self.data.is_empty()
    }

    /// Title text, if any
    pub fn title(&self) -> Option<&str> {
        self.layout.title.as_ref().and_then(|t| t.text.as_deref())
    }
}

/// One plotly trace, tagged by its `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Sunburst(SunburstTrace),
    Choroplethmapbox(ChoroplethTrace),
}

impl From<ScatterTrace> for Trace {
    fn from(trace: ScatterTrace) -> Self {
        Trace::Scatter(trace)
    }
}

impl From<BarTrace> for Trace {
    fn from(trace: BarTrace) -> Self {
        Trace::Bar(trace)
    }
}

impl From<SunburstTrace> for Trace {
    fn from(trace: SunburstTrace) -> Self {
        Trace::Sunburst(trace)
    }
}

impl From<ChoroplethTrace> for Trace {
    fn from(trace: ChoroplethTrace) -> Self {
        Trace::Choroplethmapbox(trace)
    }
}

/// Axis data. Missing values serialize as `null`, which plotly skips.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    Years(Vec<i32>),
    Numbers(Vec<Option<f64>>),
    Counts(Vec<Option<u64>>),
    Labels(Vec<String>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Years(v) => v.len(),
            Series::Numbers(v) => v.len(),
            Series::Counts(v) => v.len(),
            Series::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Series,
    pub y: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl ScatterTrace {
    pub fn lines(x: Series, y: Series) -> Self {
        Self::with_mode(x, y, "lines")
    }

    pub fn markers(x: Series, y: Series) -> Self {
        Self::with_mode(x, y, "markers")
    }

    fn with_mode(x: Series, y: Series, mode: &str) -> Self {
        Self {
            x,
            y,
            mode: Some(mode.to_string()),
            name: None,
            line: None,
            marker: None,
            text: None,
            hovertemplate: None,
            showlegend: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Series,
    pub y: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

/// Hierarchical trace; `parents` of a root entry is the empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<u64>,
    pub branchvalues: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texttemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

/// Choropleth over a mapbox base map. Locations are matched against the
/// feature `id` of the shared GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub geojson: Arc<serde_json::Value>,
    pub locations: Vec<String>,
    pub z: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    pub coloraxis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Line {
    pub fn colored(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            width: None,
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-point colors (sunburst sectors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Marker {
    pub fn colored(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coloraxis: Option<ColorAxis>,
}

impl Layout {
    /// Set the title text, keeping any existing placement and font.
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title.get_or_insert_with(Title::default).text = Some(text.into());
    }

    pub fn set_x_title(&mut self, text: impl Into<String>) {
        self.xaxis.get_or_insert_with(Axis::default).set_title(text);
    }

    pub fn set_y_title(&mut self, text: impl Into<String>) {
        self.yaxis.get_or_insert_with(Axis::default).set_title(text);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn sized(size: u32) -> Self {
        Self {
            size: Some(size),
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
}

impl Axis {
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title.get_or_insert_with(AxisTitle::default).text = Some(text.into());
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AxisTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub fn zero() -> Self {
        Self {
            l: 0,
            r: 0,
            t: 0,
            b: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: LatLon,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAxis {
    pub colorscale: String,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub len: f64,
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_type_tag() {
        let trace: Trace = ScatterTrace::lines(Series::Years(vec![1990]), Series::Numbers(vec![None])).into();
        let value = serde_json::to_value(&trace).unwrap();

        assert_eq!(value["type"], "scatter");
        assert_eq!(value["mode"], "lines");
        assert_eq!(value["x"], json!([1990]));
        assert_eq!(value["y"], json!([null]));
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_empty_layout_serializes_to_empty_object() {
        let value = serde_json::to_value(Figure::default()).unwrap();
        assert_eq!(value, json!({"data": [], "layout": {}}));
    }

    #[test]
    fn test_title_helpers_keep_existing_fields() {
        let mut layout = Layout {
            title: Some(Title {
                x: Some(0.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        layout.set_title("Evolução do IDH");
        layout.set_y_title("IDH");

        let title = layout.title.as_ref().unwrap();
        assert_eq!(title.text.as_deref(), Some("Evolução do IDH"));
        assert_eq!(title.x, Some(0.5));
        assert_eq!(layout.yaxis.unwrap().title_text(), Some("IDH"));
    }
}
