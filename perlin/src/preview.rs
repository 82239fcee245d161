//! ASCII rendering of a 2D slice of a noise field.

use anyhow::bail;
use perlin_core::NoiseField;

use crate::config::PreviewConfig;

/// Characters from lowest to highest value.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Value range of a rendered slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceStats {
    /// Lowest sampled value.
    pub min: f64,
    /// Highest sampled value.
    pub max: f64,
    /// Average over every sample.
    pub mean: f64,
}

/// A rendered slice, one string per row.
#[derive(Debug, Clone)]
pub struct Preview {
    pub rows: Vec<String>,
    pub stats: SliceStats,
}

impl Preview {
    /// Samples `noise` on the `z = 0` plane spanned by its first two axes.
    ///
    /// Fields locked to more than two dimensions are sampled with the
    /// remaining coordinates set to zero.
    pub fn render(noise: &NoiseField, config: &PreviewConfig) -> anyhow::Result<Self> {
        let dimensions = noise.dimensions().unwrap_or(2);
        if dimensions < 2 {
            bail!("a preview needs at least 2 dimensions, the field has {dimensions}");
        }
        let tiles = config.tile_sizes.as_ref().map(|tiles| {
            let mut padded = tiles.clone();
            padded.resize(dimensions, 1);
            padded
        });

        let step_x = config.scale / config.width as f64;
        let step_y = step_x * CELL_ASPECT;
        let mut point = vec![0.0; dimensions];
        let mut rows = Vec::with_capacity(config.height);
        let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);

        for row in 0..config.height {
            let mut line = String::with_capacity(config.width);
            point[1] = row as f64 * step_y;
            for col in 0..config.width {
                point[0] = col as f64 * step_x;
                let value = match &tiles {
                    Some(tiles) => noise.evaluate_tiled(&point, tiles.as_slice())?,
                    None => noise.evaluate(&point)?,
                };
                min = min.min(value);
                max = max.max(value);
                sum += value;
                line.push(shade(value));
            }
            rows.push(line);
        }

        let mean = sum / (config.width * config.height) as f64;
        Ok(Self {
            rows,
            stats: SliceStats { min, max, mean },
        })
    }
}

/// Maps a value in `[-1, 1]` onto [`RAMP`]. Values outside are clamped.
fn shade(value: f64) -> char {
    let last = RAMP.len() - 1;
    let t = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
    let index = (t * last as f64).round() as usize;
    char::from(RAMP[index.min(last)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_config() -> PreviewConfig {
        PreviewConfig {
            width: 16,
            height: 6,
            scale: 2.0,
            tile_sizes: None,
        }
    }

    #[test]
    fn test_shade_ends() {
        assert_eq!(shade(-1.0), ' ');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(-5.0), ' ');
        assert_eq!(shade(5.0), '@');
        assert_eq!(shade(f64::NAN), ' ');
    }

    #[test]
    fn test_render_size_and_stats() {
        let noise = NoiseField::new(3.0, Some(777)).unwrap();
        let preview = Preview::render(&noise, &preview_config()).unwrap();

        assert_eq!(preview.rows.len(), 6);
        assert!(preview.rows.iter().all(|row| row.chars().count() == 16));
        let SliceStats { min, max, mean } = preview.stats;
        assert!(-1.0 <= min && min <= mean && mean <= max && max <= 1.0);
        assert_eq!(noise.dimensions(), Some(2));
    }

    #[test]
    fn test_render_pads_higher_dimensions() {
        let noise = NoiseField::builder()
            .octaves(2.0)
            .seed(5)
            .dimensions(4)
            .build()
            .unwrap();
        let mut config = preview_config();
        config.tile_sizes = Some(vec![2, 2]);
        let preview = Preview::render(&noise, &config).unwrap();
        assert_eq!(preview.rows.len(), 6);
    }

    #[test]
    fn test_render_rejects_one_dimension() {
        let noise = NoiseField::builder().seed(5).dimensions(1).build().unwrap();
        assert!(Preview::render(&noise, &preview_config()).is_err());
    }
}
