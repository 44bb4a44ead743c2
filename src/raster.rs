//! Software rasterizer for [`Figure`]s. Draws the same traces a plotting
//! frontend would, for PNG previews and the CLI.

use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;

use crate::error::RenderError;
use crate::figure::{Figure, Fill, Mode, Trace};

/// Straight (non-premultiplied) RGBA in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: self.a * alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Porter-Duff "source over" onto `dst`.
    #[inline]
    pub fn over(self, dst: Color) -> Color {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Color {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a,
        }
    }

    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)` or one of the
/// names `white`, `black`, `transparent`.
pub fn parse_color(s: &str) -> Result<Color, RenderError> {
    let invalid = || RenderError::InvalidColor(s.to_string());
    let t = s.trim();

    match t.to_ascii_lowercase().as_str() {
        "white" => return Ok(Color::WHITE),
        "black" => return Ok(Color::BLACK),
        "transparent" => return Ok(Color::TRANSPARENT),
        _ => {}
    }

    if let Some(hex) = t.strip_prefix('#') {
        // from_str_radix alone would let a leading '+' through
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };
        return match hex.len() {
            3 => Ok(Color::rgb8(nibble(0)?, nibble(1)?, nibble(2)?, 1.0)),
            6 => Ok(Color::rgb8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            _ => Err(invalid()),
        };
    }

    let (args, want) = if let Some(rest) = t.strip_prefix("rgba(") {
        (rest, 4)
    } else if let Some(rest) = t.strip_prefix("rgb(") {
        (rest, 3)
    } else {
        return Err(invalid());
    };
    let args = args.strip_suffix(')').ok_or_else(invalid)?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != want {
        return Err(invalid());
    }
    let unsigned = |p: &str, frac: bool| {
        !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit() || (frac && b == b'.'))
    };
    let channel = |p: &str| {
        if !unsigned(p, false) {
            return Err(invalid());
        }
        p.parse::<u8>().map_err(|_| invalid())
    };
    let alpha = match parts.get(3) {
        Some(&p) if unsigned(p, true) => p.parse::<f32>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
        None => 1.0,
    };
    if !(0.0..=1.0).contains(&alpha) {
        return Err(invalid());
    }
    Ok(Color::rgb8(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Maps data coordinates to pixel space. Zero margins, so the plot area is
/// the whole canvas.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    w: f64,
    h: f64,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Viewport {
    fn px(&self, x: f64) -> f64 {
        (x - self.x0) / (self.x1 - self.x0) * self.w
    }

    fn py(&self, y: f64) -> f64 {
        (self.y1 - y) / (self.y1 - self.y0) * self.h
    }
}

struct Glyph {
    cx: f64,
    cy: f64,
    radius: f64,
    color: Color,
}

/// A trace resolved to pixel space, colors parsed.
enum Layer {
    Markers(Vec<Glyph>),
    Area {
        /// Surface height in pixels per canvas column, `None` outside the curve.
        surface: Vec<Option<f64>>,
        baseline: f64,
        fill: Option<Color>,
        line: Option<(Color, f64)>,
    },
}

fn prepare_markers(trace: &Trace, vp: &Viewport) -> Result<Layer, RenderError> {
    let Some(marker) = &trace.marker else {
        return Ok(Layer::Markers(Vec::new()));
    };
    let color = parse_color(&marker.color)?;
    let glyphs = trace
        .x
        .iter()
        .zip(&trace.y)
        .enumerate()
        .map(|(i, (&x, &y))| Glyph {
            cx: vp.px(x),
            cy: vp.py(y),
            radius: marker.size.get(i).copied().unwrap_or(6.0) / 2.0,
            color: color.with_alpha(marker.opacity.get(i).copied().unwrap_or(1.0) as f32),
        })
        .collect();
    Ok(Layer::Markers(glyphs))
}

fn prepare_area(trace: &Trace, vp: &Viewport) -> Result<Layer, RenderError> {
    let fill = match (trace.fill, &trace.fillcolor) {
        (Some(Fill::Tozeroy), Some(c)) => Some(parse_color(c)?),
        _ => None,
    };
    let line = match &trace.line {
        Some(l) => Some((parse_color(&l.color)?, l.width)),
        None => None,
    };

    let pts: Vec<(f64, f64)> = trace
        .x
        .iter()
        .zip(&trace.y)
        .map(|(&x, &y)| (vp.px(x), vp.py(y)))
        .collect();

    let surface = (0..vp.w as usize)
        .map(|col| {
            let xc = col as f64 + 0.5;
            let hi = pts.partition_point(|&(px, _)| px <= xc);
            match hi {
                0 => None,
                n if n >= pts.len() => pts.last().filter(|p| p.0 == xc).map(|p| p.1),
                n => {
                    let (ax, ay) = pts[n - 1];
                    let (bx, by) = pts[n];
                    Some(ay + (by - ay) * (xc - ax) / (bx - ax))
                }
            }
        })
        .collect();

    Ok(Layer::Area {
        surface,
        baseline: vp.py(0.0),
        fill,
        line,
    })
}

fn prepare(trace: &Trace, vp: &Viewport) -> Result<Layer, RenderError> {
    match trace.mode {
        Mode::Markers => prepare_markers(trace, vp),
        Mode::Lines => prepare_area(trace, vp),
    }
}

/// Even-odd point in polygon test.
fn inside_polygon(px: f64, py: f64, poly: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Five-pointed star, point up, inner radius at the regular-pentagram ratio.
fn star_outline(cx: f64, cy: f64, r: f64) -> [(f64, f64); 10] {
    let inner = r * 0.381_966;
    let mut pts = [(0.0, 0.0); 10];
    for (k, p) in pts.iter_mut().enumerate() {
        let angle = -std::f64::consts::FRAC_PI_2 + k as f64 * std::f64::consts::PI / 5.0;
        let rad = if k % 2 == 0 { r } else { inner };
        *p = (cx + rad * angle.cos(), cy + rad * angle.sin());
    }
    pts
}

fn paint_glyphs(glyphs: &[Glyph], yc: f64, row: &mut [Color]) {
    let w = row.len();
    for g in glyphs {
        if (yc - g.cy).abs() > g.radius {
            continue;
        }
        let outline = star_outline(g.cx, g.cy, g.radius);
        let lo = (g.cx - g.radius).floor().max(0.0) as usize;
        let hi = ((g.cx + g.radius).ceil().max(0.0) as usize).min(w);
        for (col, px) in row.iter_mut().enumerate().take(hi).skip(lo) {
            let xc = col as f64 + 0.5;
            if inside_polygon(xc, yc, &outline) {
                *px = g.color.over(*px);
            }
        }
    }
}

fn paint_area(
    surface: &[Option<f64>],
    baseline: f64,
    fill: Option<Color>,
    line: Option<(Color, f64)>,
    yc: f64,
    row: &mut [Color],
) {
    for (px, s) in row.iter_mut().zip(surface) {
        let Some(s) = *s else { continue };
        if let Some(fill) = fill {
            let (top, bottom) = if s <= baseline { (s, baseline) } else { (baseline, s) };
            if yc >= top && yc <= bottom {
                *px = fill.over(*px);
            }
        }
        if let Some((color, width)) = line {
            if (yc - s).abs() <= width / 2.0 {
                *px = color.over(*px);
            }
        }
    }
}

/// Rasterize `figure` to RGBA8, `width` pixels wide and `layout.height` tall.
/// Traces are painted in order over the paper and plot backgrounds.
pub fn rasterize(figure: &Figure, width: usize) -> Result<Vec<u8>, RenderError> {
    let layout = &figure.layout;
    let h = layout.height as usize;
    if width == 0 || h == 0 {
        return Err(RenderError::EmptyCanvas { w: width, h });
    }
    let paper = parse_color(&layout.paper_bgcolor)?;
    let background = parse_color(&layout.plot_bgcolor)?.over(paper);

    let vp = Viewport {
        w: width as f64,
        h: h as f64,
        x0: layout.xaxis.range[0],
        x1: layout.xaxis.range[1],
        y0: layout.yaxis.range[0],
        y1: layout.yaxis.range[1],
    };
    let layers = figure
        .data
        .iter()
        .map(|t| prepare(t, &vp))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rgba = vec![0u8; width * h * 4];
    rgba.par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, out)| {
            let yc = y as f64 + 0.5;
            let mut row = vec![background; width];
            for layer in &layers {
                match layer {
                    Layer::Markers(glyphs) => paint_glyphs(glyphs, yc, &mut row),
                    Layer::Area { surface, baseline, fill, line } => {
                        paint_area(surface, *baseline, *fill, *line, yc, &mut row)
                    }
                }
            }
            for (px, c) in out.chunks_exact_mut(4).zip(&row) {
                px.copy_from_slice(&c.to_rgba8());
            }
        });

    Ok(rgba)
}

pub fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        rgba,
        w as u32,
        h as u32,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

pub fn png_data_url(rgba: &[u8], w: usize, h: usize) -> Result<String, RenderError> {
    let png = encode_png(rgba, w, h)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", b64))
}
