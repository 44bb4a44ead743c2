use std::path::PathBuf;

use anyhow::{Context, Result};
use celestial_ocean::config::SceneParams;
use celestial_ocean::raster;
use celestial_ocean::stars::StarCache;

const DEFAULT_WIDTH: usize = 900;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = SceneParams::default();

    let params = SceneParams {
        num_stars: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.num_stars),
        star_size: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.star_size),
        wave_height: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.wave_height),
        ocean_color: args.get(4).cloned().unwrap_or(defaults.ocean_color),
    };
    let out_dir: PathBuf = args
        .get(5)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let width: usize = args.get(6).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_WIDTH);

    params.validate()?;
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    log::info!(
        "Rendering scene stars={} size={} wave={:.1} color={}",
        params.num_stars,
        params.star_size,
        params.wave_height,
        params.ocean_color
    );

    let mut cache = StarCache::default();
    let (scene, timings) = celestial_ocean::build_scene(&params, &mut cache);

    log::info!("Timings:");
    for t in &timings {
        log::info!("  {:20} {:8.3} ms", t.name, t.ms);
    }

    // 1. Figure description
    let figure_path = out_dir.join("figure.json");
    let json = serde_json::to_string_pretty(&scene.figure)?;
    std::fs::write(&figure_path, json)
        .with_context(|| format!("failed to write {}", figure_path.display()))?;
    log::info!("Saved {}", figure_path.display());

    // 2. Raster preview
    let height = scene.figure.layout.height as usize;
    let rgba = raster::rasterize(&scene.figure, width)?;
    let png = raster::encode_png(&rgba, width, height)?;
    let png_path = out_dir.join("scene.png");
    std::fs::write(&png_path, png)
        .with_context(|| format!("failed to write {}", png_path.display()))?;
    log::info!("Saved {}", png_path.display());

    log::info!(
        "🕐 {}  ✨ {} stars  🌊 {}",
        scene.info.time,
        scene.info.stars,
        scene.info.waves
    );
    Ok(())
}
