//! Threshold color bands.

use crate::models::{ColorBand, Direction, MetricKey};

/// Points either side of the threshold treated as marginal.
pub const DEFAULT_BAND_MARGIN: f64 = 5.0;

/// Band a percentage against a threshold.
///
/// Higher-is-better: at least `threshold + margin` is good, at least
/// `threshold - margin` is marginal. Lower-is-better mirrors this.
pub fn band(value: f64, threshold: f64, direction: Direction, margin: f64) -> ColorBand {
    let margin = margin.abs();
    match direction {
        Direction::HigherIsBetter => {
            if value >= threshold + margin {
                ColorBand::Good
            } else if value >= threshold - margin {
                ColorBand::Marginal
            } else {
                ColorBand::Poor
            }
        }
        Direction::LowerIsBetter => {
            if value <= threshold - margin {
                ColorBand::Good
            } else if value <= threshold + margin {
                ColorBand::Marginal
            } else {
                ColorBand::Poor
            }
        }
    }
}

/// Band a metric's percentage using its catalog threshold and direction.
/// `None` for metrics without a threshold.
pub fn band_for(key: MetricKey, value: f64, margin: f64) -> Option<ColorBand> {
    let def = key.definition();
    def.threshold
        .map(|threshold| band(value, threshold, def.direction, margin))
}
