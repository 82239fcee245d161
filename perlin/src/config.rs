//! Configuration file of the preview tool.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, bail};
use perlin_core::NoiseConfig;
use serde::{Deserialize, Serialize};

/// Path read when no config path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "perlin.json5";

/// Top level settings, read from a JSON5 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerlinConfig {
    /// Noise field settings.
    pub noise: NoiseConfig,
    /// What slice of the field to print.
    pub preview: PreviewConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl PerlinConfig {
    /// Reads and parses `path`. Returns `None` if the file does not exist.
    pub fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("couldn't read config at {}", path.display()));
            }
        };
        Self::parse(&content)
            .with_context(|| format!("couldn't parse config at {}", path.display()))
            .map(Some)
    }

    /// Parses a JSON5 document.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json5::from_str(content)?)
    }

    /// Rejects settings the tool cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.noise.validate()?;
        self.preview.validate()
    }
}

/// Size and extent of the printed slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Characters per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Field units covered by one row.
    pub scale: f64,
    /// Tile periods for the two previewed axes.
    pub tile_sizes: Option<Vec<u32>>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 24,
            scale: 2.0,
            tile_sizes: None,
        }
    }
}

impl PreviewConfig {
    fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("preview size must be non-zero, got {}x{}", self.width, self.height);
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("preview scale must be positive, got {}", self.scale);
        }
        if let Some(tiles) = &self.tile_sizes {
            if tiles.len() != 2 {
                bail!("preview tile_sizes needs exactly 2 entries, got {}", tiles.len());
            }
        }
        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Colored output.
    pub color: bool,
    /// Prefix lines with a timestamp.
    pub timestamp: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: true,
            timestamp: true,
        }
    }
}
