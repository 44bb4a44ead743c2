pub mod api;
pub mod config;
pub mod error;
pub mod figure;
pub mod page;
pub mod raster;
pub mod render;
pub mod rng;
pub mod stars;
pub mod wave;

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveTime};
use serde::Serialize;

use config::SceneParams;
use figure::Figure;
use stars::{StarCache, StarField};
use wave::WaveCurve;

/// Everything one pass over the controls produces.
pub struct Scene {
    pub stars: Arc<StarField>,
    pub wave: WaveCurve,
    pub figure: Figure,
    pub info: Info,
}

/// Read-only side panel values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    pub time: String,
    pub stars: String,
    pub waves: String,
}

impl Info {
    pub fn new(params: &SceneParams, time: NaiveTime) -> Self {
        Self {
            time: time.format("%H:%M:%S").to_string(),
            stars: group_thousands(params.num_stars),
            waves: format!("{:.1}", params.wave_height),
        }
    }

    /// Side panel for the local wall clock.
    pub fn now(params: &SceneParams) -> Self {
        Self::new(params, Local::now().time())
    }
}

/// Decimal with `,` between groups of three digits.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Clone, Debug, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Generate and compose one scene. Parameters are not validated here, callers
/// taking untrusted input run [`SceneParams::validate`] first.
pub fn build_scene(params: &SceneParams, cache: &mut StarCache) -> (Scene, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Star field, memoized on (count, size)
    let t = Instant::now();
    let stars = cache.stars(params.num_stars, params.star_size as f64);
    timings.push(Timing {
        name: "stars",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Wave, always recomputed
    let t = Instant::now();
    let wave = wave::generate_wave(params.wave_height);
    timings.push(Timing {
        name: "wave",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Compose layers
    let t = Instant::now();
    let figure = render::render(&stars, &wave, &params.ocean_color);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    for t in &timings {
        log::debug!("{:8} {:8.3} ms", t.name, t.ms);
    }

    let scene = Scene {
        stars,
        wave,
        figure,
        info: Info::now(params),
    };

    (scene, timings)
}
