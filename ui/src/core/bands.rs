//! Clinical severity bands drawn behind the percentile curve.
//!
//! Edges follow the usual seven-band percentile partition
//! `0, 2, 9, 25, 75, 91, 98, 100`. The last band includes 100.

use serde::{Deserialize, Serialize};

use super::profile::{PERCENTILE_MAX, PERCENTILE_MIN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBand {
    pub lower: f64,
    pub upper: f64,
    pub name: &'static str,
    /// `#rrggbb`
    pub color: &'static str,
}

impl SeverityBand {
    pub fn contains(&self, percentile: f64) -> bool {
        percentile >= self.lower && (percentile < self.upper || self.upper >= PERCENTILE_MAX)
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

pub const SEVERITY_BANDS: [SeverityBand; 7] = [
    SeverityBand {
        lower: 0.0,
        upper: 2.0,
        name: "Extrêmement bas",
        color: "#e53935",
    },
    SeverityBand {
        lower: 2.0,
        upper: 9.0,
        name: "Très bas",
        color: "#fb8c00",
    },
    SeverityBand {
        lower: 9.0,
        upper: 25.0,
        name: "Moyen faible",
        color: "#fdd835",
    },
    SeverityBand {
        lower: 25.0,
        upper: 75.0,
        name: "Moyen",
        color: "#43a047",
    },
    SeverityBand {
        lower: 75.0,
        upper: 91.0,
        name: "Moyen fort",
        color: "#1e88e5",
    },
    SeverityBand {
        lower: 91.0,
        upper: 98.0,
        name: "Très élevé",
        color: "#8e24aa",
    },
    SeverityBand {
        lower: 98.0,
        upper: 100.0,
        name: "Exceptionnellement élevé",
        color: "#f06292",
    },
];

/// How the band table is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandScheme {
    /// One solid rectangle per band.
    #[default]
    Solid,
    /// Vertical gradient with a colour stop at each band midpoint.
    Gradient,
}

/// Band holding `percentile`. Values outside `[0, 100]` clamp to the outer bands.
pub fn classify(percentile: f64) -> &'static SeverityBand {
    let clamped = if percentile.is_nan() {
        PERCENTILE_MIN
    } else {
        percentile.clamp(PERCENTILE_MIN, PERCENTILE_MAX)
    };
    SEVERITY_BANDS
        .iter()
        .find(|band| band.contains(clamped))
        .unwrap_or(&SEVERITY_BANDS[SEVERITY_BANDS.len() - 1])
}

/// Gradient stops as `(percentile, colour)`, one per band midpoint.
pub fn gradient_stops() -> Vec<(f64, &'static str)> {
    SEVERITY_BANDS
        .iter()
        .map(|band| (band.midpoint(), band.color))
        .collect()
}

/// True when the bands tile `[0, 100]` in order with no gap or overlap.
pub fn covers_percentile_range(bands: &[SeverityBand]) -> bool {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return false;
    };
    first.lower == PERCENTILE_MIN
        && last.upper == PERCENTILE_MAX
        && bands.iter().all(|band| band.lower < band.upper)
        && bands.windows(2).all(|pair| pair[0].upper == pair[1].lower)
}
