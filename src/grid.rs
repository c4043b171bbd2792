use crate::{constants::MAX_GRID_POINTS, error::Error};

/// Altitude grid, in km.
/// Linear space starting from `start` ranging to `end` (included).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltitudeGrid {
    /// lowest altitude
    pub start: f64,
    /// highest altitude
    pub end: f64,
    /// spacing (increment value)
    pub spacing: f64,
}

impl AltitudeGrid {
    /// Builds a new altitude grid. Bounds are reordered so the grid is
    /// always ascending.
    pub fn new(start: f64, end: f64, spacing: f64) -> Result<Self, Error> {
        if !start.is_finite() || !end.is_finite() || !spacing.is_finite() {
            return Err(Error::InvalidGrid);
        }
        // spacing must advance every altitude of the grid
        let top = start.abs().max(end.abs());
        if start != end && spacing.abs() <= 4.0 * f64::EPSILON * top {
            return Err(Error::InvalidGrid);
        }
        Ok(Self {
            start: start.min(end),
            end: start.max(end),
            spacing: spacing.abs(),
        })
    }
    /// Single altitude grid
    pub fn single(altitude: f64) -> Result<Self, Error> {
        Self::new(altitude, altitude, 0.0)
    }
    /// Returns true if self is a single point space
    pub fn is_single_point(&self) -> bool {
        self.end == self.start
    }
    // Returns grid length, in terms of data points, capped to [MAX_GRID_POINTS]
    pub fn length(&self) -> usize {
        if self.is_single_point() {
            return 1;
        }
        let n = ((self.end - self.start) / self.spacing + 1.0E-9).floor() as usize + 1;
        n.min(MAX_GRID_POINTS)
    }
    /// Grid altitudes, ascending
    pub fn altitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.length()).map(move |i| self.start + i as f64 * self.spacing)
    }
}

impl TryFrom<(f64, f64, f64)> for AltitudeGrid {
    type Error = Error;
    fn try_from(tuple: (f64, f64, f64)) -> Result<Self, Self::Error> {
        Self::new(tuple.0, tuple.1, tuple.2)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn grid_length() {
        let grid = AltitudeGrid::new(100.0, 500.0, 50.0).unwrap();
        assert_eq!(grid.length(), 9);
        let altitudes = grid.altitudes().collect::<Vec<_>>();
        assert_eq!(altitudes.first(), Some(&100.0));
        assert_eq!(altitudes.last(), Some(&500.0));

        let grid = AltitudeGrid::new(500.0, 100.0, -50.0).unwrap();
        assert_eq!(grid.start, 100.0);
        assert_eq!(grid.length(), 9);

        let grid = AltitudeGrid::new(60.0, 2000.0, 1.0).unwrap();
        assert_eq!(grid.length(), MAX_GRID_POINTS);

        assert_eq!(AltitudeGrid::single(300.0).unwrap().length(), 1);
        assert!(AltitudeGrid::new(100.0, 200.0, 0.0).is_err());
        assert!(AltitudeGrid::new(f64::NAN, 200.0, 1.0).is_err());
    }
    #[test]
    fn vanishing_spacing() {
        // below the floating point resolution of the altitudes
        assert!(AltitudeGrid::new(100.0, 200.0, 1.0E-15).is_err());
        assert!(AltitudeGrid::new(1.0E6, 1.0E6 + 1.0, 1.0E-12).is_err());
        assert!(AltitudeGrid::new(200.0, 100.0, -1.0E-15).is_err());

        let grid = AltitudeGrid::new(100.0, 100.001, 1.0E-6).unwrap();
        assert_eq!(grid.length(), MAX_GRID_POINTS);
        let altitudes = grid.altitudes().collect::<Vec<_>>();
        for pair in altitudes.windows(2) {
            assert!(pair[1] > pair[0], "not increasing: {:?}", pair);
        }
    }
}
