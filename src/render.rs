use crate::figure::{Axis, Figure, Fill, Layout, Line, Margin, Marker, Mode, Symbol, Trace};
use crate::stars::StarField;
use crate::wave::WaveCurve;

pub const CANVAS_RANGE: [f64; 2] = [0.0, 100.0];
pub const FIGURE_HEIGHT: u32 = 600;
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";
pub const STAR_COLOR: &str = "white";
pub const OCEAN_LINE_WIDTH: f64 = 2.0;

fn hidden_axis() -> Axis {
    Axis {
        range: CANVAS_RANGE,
        showgrid: false,
        showticklabels: false,
        zeroline: false,
    }
}

/// Sky layer: one white star glyph per star, sized and faded per row.
fn sky_trace(stars: &StarField) -> Trace {
    Trace {
        kind: "scatter".into(),
        name: "sky".into(),
        x: stars.x.clone(),
        y: stars.y.clone(),
        mode: Mode::Markers,
        marker: Some(Marker {
            size: stars.size.clone(),
            color: STAR_COLOR.into(),
            opacity: stars.brightness.clone(),
            symbol: Symbol::Star,
        }),
        line: None,
        fill: None,
        fillcolor: None,
        hoverinfo: "skip".into(),
        showlegend: false,
    }
}

/// Ocean layer: the wave line, filled down to y = 0.
fn ocean_trace(wave: &WaveCurve, ocean_color: &str) -> Trace {
    Trace {
        kind: "scatter".into(),
        name: "ocean".into(),
        x: wave.x.clone(),
        y: wave.y.clone(),
        mode: Mode::Lines,
        marker: None,
        line: Some(Line {
            color: ocean_color.into(),
            width: OCEAN_LINE_WIDTH,
        }),
        fill: Some(Fill::Tozeroy),
        fillcolor: Some(ocean_color.into()),
        hoverinfo: "skip".into(),
        showlegend: false,
    }
}

/// Compose the scene into one figure. Stars go down first and the ocean is
/// painted over them, so the water hides the lowest part of the sky.
/// `ocean_color` is not validated.
pub fn render(stars: &StarField, wave: &WaveCurve, ocean_color: &str) -> Figure {
    Figure {
        data: vec![sky_trace(stars), ocean_trace(wave, ocean_color)],
        layout: Layout {
            plot_bgcolor: TRANSPARENT.into(),
            paper_bgcolor: TRANSPARENT.into(),
            xaxis: hidden_axis(),
            yaxis: hidden_axis(),
            height: FIGURE_HEIGHT,
            margin: Margin::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Rng, STAR_SEED};
    use crate::stars::generate_stars;
    use crate::wave::generate_wave;

    fn default_figure() -> Figure {
        let stars = generate_stars(&mut Rng::new(STAR_SEED), 200, 3.0);
        render(&stars, &generate_wave(0.5), "#1e3a5f")
    }

    #[test]
    fn sky_then_ocean() {
        let fig = default_figure();
        let names: Vec<&str> = fig.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["sky", "ocean"]);
    }

    #[test]
    fn sky_layer_style() {
        let fig = default_figure();
        let sky = fig.trace("sky").unwrap();
        assert_eq!(sky.mode, Mode::Markers);
        assert_eq!(sky.x.len(), 200);
        let marker = sky.marker.as_ref().unwrap();
        assert_eq!(marker.symbol, Symbol::Star);
        assert_eq!(marker.color, "white");
        assert_eq!(marker.size.len(), 200);
        assert_eq!(marker.opacity.len(), 200);
        assert_eq!(sky.hoverinfo, "skip");
        assert!(!sky.showlegend);
    }

    #[test]
    fn ocean_layer_uses_color_for_fill_and_line() {
        let fig = default_figure();
        let ocean = fig.trace("ocean").unwrap();
        assert_eq!(ocean.fill, Some(Fill::Tozeroy));
        assert_eq!(ocean.fillcolor.as_deref(), Some("#1e3a5f"));
        assert_eq!(ocean.line.as_ref().map(|l| l.color.as_str()), Some("#1e3a5f"));
        assert_eq!(ocean.line.as_ref().map(|l| l.width), Some(2.0));
        assert!(!ocean.showlegend);
    }

    #[test]
    fn canvas_is_bare() {
        let fig = default_figure();
        let l = &fig.layout;
        assert_eq!(l.height, 600);
        assert_eq!(l.margin, Margin { l: 0, r: 0, t: 0, b: 0 });
        assert_eq!(l.plot_bgcolor, TRANSPARENT);
        assert_eq!(l.paper_bgcolor, TRANSPARENT);
        for axis in [&l.xaxis, &l.yaxis] {
            assert_eq!(axis.range, [0.0, 100.0]);
            assert!(!axis.showgrid && !axis.showticklabels && !axis.zeroline);
        }
    }

    #[test]
    fn bad_color_passes_through() {
        let fig = render(&StarField::default(), &generate_wave(0.5), "not-a-color");
        assert_eq!(fig.trace("ocean").unwrap().fillcolor.as_deref(), Some("not-a-color"));
    }

    #[test]
    fn serializes_plotly_names() {
        let json = serde_json::to_value(default_figure()).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["marker"]["symbol"], "star");
        assert_eq!(json["data"][1]["fill"], "tozeroy");
        assert_eq!(json["data"][1]["mode"], "lines");
        assert!(json["data"][0].get("fill").is_none());
        assert_eq!(json["layout"]["margin"]["l"], 0);
        // the sky trace is the only marker layer and it only draws stars
        assert!(serde_json::from_str::<Symbol>("\"circle\"").is_err());
    }
}
