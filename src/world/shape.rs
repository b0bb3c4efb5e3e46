//! Deterministic track shape.
//!
//! Curvature and elevation are pure functions of the segment index, so a
//! rebuilt track always has exactly the same bends and hills.

use std::ops::Range;

/// A run of segments sharing one curvature value.
struct CurveSection {
    segments: Range<usize>,
    curve: f32,
}

const CURVES: &[CurveSection] = &[
    CurveSection {
        segments: 301..700,
        curve: 0.2,
    },
    CurveSection {
        segments: 1101..usize::MAX,
        curve: -0.3,
    },
];

/// Segments covered by the single sine hill.
const HILL: Range<usize> = 751..1000;
const HILL_FREQUENCY: f32 = 0.02;
const HILL_AMPLITUDE: f32 = 800.0;

/// Lateral curvature contribution of the segment at `index`.
pub fn curve_at(index: usize) -> f32 {
    CURVES
        .iter()
        .find(|section| section.segments.contains(&index))
        .map_or(0.0, |section| section.curve)
}

/// Elevation of the segment at `index` in world units.
pub fn elevation_at(index: usize) -> f32 {
    if !HILL.contains(&index) {
        return 0.0;
    }
    let phase = (index - (HILL.start - 1)) as f32 * HILL_FREQUENCY;
    phase.sin() * HILL_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_before_first_bend() {
        assert_eq!(curve_at(0), 0.0);
        assert_eq!(curve_at(300), 0.0);
        assert_eq!(curve_at(301), 0.2);
        assert_eq!(curve_at(699), 0.2);
        assert_eq!(curve_at(700), 0.0);
        assert_eq!(curve_at(1101), -0.3);
        assert_eq!(curve_at(1599), -0.3);
    }

    #[test]
    fn hill_rises_and_is_flat_elsewhere() {
        assert_eq!(elevation_at(750), 0.0);
        assert_eq!(elevation_at(1000), 0.0);
        assert!(elevation_at(751) > 0.0);
        // sin peaks near phase pi/2, i.e. ~78 segments into the hill
        assert!((elevation_at(750 + 78) - HILL_AMPLITUDE).abs() < 1.0);
    }
}
