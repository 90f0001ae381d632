//! Floor-plan coordinates and travel-time utilities.
//!
//! Robot motion is not planned: a trip is reduced to a scalar duration,
//! `distance / speed`, where the distance comes from a [`DistanceMetric`]
//! evaluated on two floor points.  Coordinates are metres on the warehouse
//! floor with the workstations along `y = 0`.

/// A position on the warehouse floor, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `[x, y]` array form, the point type used by the R-tree index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Extra metre charged when leaving a storage row towards the stations.
    ///
    /// Rows sit back to back in pairs; a pod on an even (truncated) row
    /// coordinate has to be carried across its partner row before it reaches
    /// the cross aisle, which costs one additional metre.
    #[inline]
    pub fn aisle_crossing_penalty(self) -> f64 {
        if (self.y.trunc() as i64).rem_euclid(2) == 0 { 1.0 } else { 0.0 }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// How distances between floor points are measured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// City-block distance `|dx| + |dy|`.  Robots drive along the aisle grid,
    /// so this is the default.
    #[default]
    Manhattan,
    /// Straight-line distance.
    Euclidean,
}

impl DistanceMetric {
    /// Distance in metres between `a` and `b`.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        match self {
            DistanceMetric::Manhattan => dx + dy,
            DistanceMetric::Euclidean => dx.hypot(dy),
        }
    }

    /// Seconds needed to drive from `a` to `b` at constant `speed` (m/s).
    #[inline]
    pub fn travel_secs(self, a: Point, b: Point, speed: f64) -> f64 {
        travel_secs(self.distance(a, b), speed)
    }
}

/// Seconds needed to cover `distance` metres at constant `speed` (m/s).
#[inline]
pub fn travel_secs(distance: f64, speed: f64) -> f64 {
    distance / speed
}
