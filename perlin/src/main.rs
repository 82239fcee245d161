//! Prints a shaded preview of a noise field.
//!
//! Usage: `perlin [CONFIG]`. Reads `perlin.json5` from the working directory
//! when no path is given, and falls back to defaults if that file is missing.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use perlin_core::NoiseField;

use crate::config::{DEFAULT_CONFIG_PATH, PerlinConfig};
use crate::preview::Preview;

mod config;
mod logging;
mod preview;

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let loaded = PerlinConfig::read(&path)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    logging::init(&config.logging)?;
    if !found {
        log::warn!("No config at {}, using defaults", path.display());
    }
    config.validate()?;

    let start = Instant::now();
    let noise = NoiseField::from_config(&config.noise)?;
    tracing::info!(
        seed = noise.seed(),
        octaves = noise.octaves(),
        "Noise field ready"
    );

    let preview = Preview::render(&noise, &config.preview)?;
    let stats = noise.cache().stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        "Rendered {}x{} preview in {:?}",
        config.preview.width,
        config.preview.height,
        start.elapsed()
    );

    let mut out = io::stdout().lock();
    for row in &preview.rows {
        writeln!(out, "{row}")?;
    }
    writeln!(
        out,
        "min {:.4}  max {:.4}  mean {:.4}",
        preview.stats.min, preview.stats.max, preview.stats.mean
    )?;
    Ok(())
}
