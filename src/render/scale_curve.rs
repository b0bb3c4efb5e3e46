//! Piecewise-linear distance-to-scale curves.
//!
//! A curve is an ordered table of bands. Each band linearly interpolates from
//! `scale_at_min` (at its near edge) to `scale_at_max` (at its far edge), and
//! adjacent bands share their boundary value so the curve has no jumps.
//! Distances past the last band are out of range and sample as `None`.

/// One interpolation row of a [`ScaleCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    pub min_distance: f32,
    pub max_distance: f32,
    pub scale_at_min: f32,
    pub scale_at_max: f32,
}

impl ScaleBand {
    pub const fn new(min_distance: f32, max_distance: f32, scale_at_min: f32, scale_at_max: f32) -> Self {
        Self {
            min_distance,
            max_distance,
            scale_at_min,
            scale_at_max,
        }
    }

    pub fn sample(&self, distance: f32) -> f32 {
        let span = self.max_distance - self.min_distance;
        if span <= 0.0 {
            return self.scale_at_min;
        }
        let t = (self.max_distance - distance) / span;
        self.scale_at_max + t * (self.scale_at_min - self.scale_at_max)
    }
}

/// Scenery scale bands, distances in segment lengths. Beyond the last band
/// (120 segments) scenery is culled, making twelve bands in all.
pub const SCENERY_BANDS: [ScaleBand; 11] = [
    ScaleBand::new(0.0, 1.0, 2.2, 1.8),
    ScaleBand::new(1.0, 3.0, 1.8, 1.3),
    ScaleBand::new(3.0, 6.0, 1.3, 0.85),
    ScaleBand::new(6.0, 12.0, 0.85, 0.55),
    ScaleBand::new(12.0, 20.0, 0.55, 0.35),
    ScaleBand::new(20.0, 30.0, 0.35, 0.22),
    ScaleBand::new(30.0, 45.0, 0.22, 0.14),
    ScaleBand::new(45.0, 60.0, 0.14, 0.09),
    ScaleBand::new(60.0, 80.0, 0.09, 0.06),
    ScaleBand::new(80.0, 100.0, 0.06, 0.04),
    ScaleBand::new(100.0, 120.0, 0.04, 0.02),
];

/// Traffic close-up boost: up to +45% over the nearest six segments.
pub const TRAFFIC_NEAR_BOOST: [ScaleBand; 1] = [ScaleBand::new(0.0, 6.0, 1.45, 1.0)];

/// Traffic shadow opacity (0-255), strongest right next to the camera.
pub const TRAFFIC_SHADOW_ALPHA: [ScaleBand; 1] = [ScaleBand::new(0.0, 12.0, 200.0, 60.0)];

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleCurve {
    bands: Vec<ScaleBand>,
}

impl ScaleCurve {
    /// Build a curve from bands whose distances are in segment lengths.
    pub fn in_segments(bands: &[ScaleBand], segment_length: f32) -> Self {
        let mut bands: Vec<ScaleBand> = bands
            .iter()
            .map(|band| ScaleBand {
                min_distance: band.min_distance * segment_length,
                max_distance: band.max_distance * segment_length,
                ..*band
            })
            .collect();
        bands.sort_by(|a, b| a.max_distance.total_cmp(&b.max_distance));
        Self { bands }
    }

    pub fn bands(&self) -> &[ScaleBand] {
        &self.bands
    }

    /// Farthest distance the curve covers.
    pub fn max_distance(&self) -> f32 {
        self.bands.last().map_or(0.0, |band| band.max_distance)
    }

    /// Scale at `distance`, or `None` past the last band.
    ///
    /// A distance exactly on a boundary belongs to the nearer band.
    pub fn sample(&self, distance: f32) -> Option<f32> {
        let first = self.bands.first()?;
        let distance = distance.max(first.min_distance);
        let index = self.bands.partition_point(|band| band.max_distance < distance);
        self.bands.get(index).map(|band| band.sample(distance))
    }
}
