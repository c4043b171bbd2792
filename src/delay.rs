//! Slant TEC and ionospheric range delay along a line of sight
use nalgebra::Vector3;

#[cfg(feature = "log")]
use log::debug;

use crate::{
    coefficients::CoefficientSource,
    constants::{Heights, SPEED_OF_LIGHT},
    engine::{IriEngine, Location, ProfileRequest},
    epoch::EpochSpec,
    error::Error,
    geomag::GeomagneticResolver,
    grid::AltitudeGrid,
    indices::IndexProvider,
    options::{ModelOptions, UserOverrides},
};

/// Number of integration intervals along the line of sight
const INTERVALS: usize = 20;

/// Group delay factor (m³/s²)
const GAMMA: f64 = 40.3;

/// Bisection resolution on the ray parameter
const RAY_TOLERANCE: f64 = 1.0E-6;

/// Content and delay of one line of sight
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlantDelay {
    /// Slant TEC (m⁻²)
    pub tec: f64,
    /// Integrated path length (m)
    pub path_length: f64,
    /// Range delay (m)
    pub range_delay: f64,
    /// Time delay (s)
    pub time_delay: f64,
}

impl SlantDelay {
    /// Slant TEC in TEC units (10¹⁶ m⁻²)
    pub fn tecu(&self) -> f64 {
        self.tec / 1.0E16
    }
}

/// [IonosphereDelay] integrates the modelled electron density
/// between two ECEF positions, at given epoch.
pub struct IonosphereDelay<'a, C: CoefficientSource, I: IndexProvider, G: GeomagneticResolver> {
    engine: &'a mut IriEngine<C, I, G>,
    epoch: EpochSpec,
    options: ModelOptions,
    overrides: UserOverrides,
}

impl<'a, C: CoefficientSource, I: IndexProvider, G: GeomagneticResolver> IonosphereDelay<'a, C, I, G> {
    /// Builds a new [IonosphereDelay] with default options.
    /// Temperatures and ion composition are not needed here.
    pub fn new(engine: &'a mut IriEngine<C, I, G>, epoch: EpochSpec) -> Self {
        Self {
            engine,
            epoch,
            options: ModelOptions {
                temperatures: false,
                ions: false,
                ..Default::default()
            },
            overrides: UserOverrides::default(),
        }
    }
    /// Copies and returns [Self] with given options
    pub fn with_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }
    /// Copies and returns [Self] with given overrides
    pub fn with_overrides(mut self, overrides: UserOverrides) -> Self {
        self.overrides = overrides;
        self
    }
    fn altitude(position: &Vector3<f64>) -> Result<f64, Error> {
        let (_, altitude) = Location::from_ecef(position[0], position[1], position[2])?;
        Ok(altitude)
    }
    /// Ray parameter (0..=1) where the path leaves the modelled density,
    /// from a `start` below the density top.
    fn exit(start: &Vector3<f64>, direction: &Vector3<f64>) -> Result<f64, Error> {
        if Self::altitude(&(start + direction))? <= Heights::DENSITY_TOP {
            return Ok(1.0);
        }
        let (mut low, mut high) = (0.0_f64, 1.0_f64);
        while high - low > RAY_TOLERANCE {
            let mid = 0.5 * (low + high);
            if Self::altitude(&(start + direction * mid))? > Heights::DENSITY_TOP {
                high = mid;
            } else {
                low = mid;
            }
        }
        Ok(low)
    }
    /// Integrates the electron density from `station` to `target`
    /// (ECEF, m), or to the density top when the target lies above,
    /// at carrier `frequency` (Hz).
    pub fn slant(&mut self, station: (f64, f64, f64), target: (f64, f64, f64), frequency: f64) -> Result<SlantDelay, Error> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(Error::InvalidFrequency(frequency));
        }
        let start = Vector3::new(station.0, station.1, station.2);
        let end = Vector3::new(target.0, target.1, target.2);
        let mut direction = end - start;

        if Self::altitude(&start)? >= Heights::DENSITY_TOP {
            return Ok(SlantDelay::default());
        }
        direction *= Self::exit(&start, &direction)?;

        let path_length = direction.norm();
        let step = path_length / INTERVALS as f64;

        let mut tec = 0.0;
        for i in 0..INTERVALS {
            let point = start + direction * ((i as f64 + 0.5) / INTERVALS as f64);
            let (location, altitude) = Location::from_ecef(point[0], point[1], point[2])?;
            if altitude < Heights::DENSITY_BOTTOM_DAY {
                continue;
            }
            let request = ProfileRequest::new(location, self.epoch, AltitudeGrid::single(altitude)?)
                .with_options(self.options)
                .with_overrides(self.overrides);
            if let Some(density) = self.engine.electron_density(&request, altitude)? {
                tec += density * step;
            }
        }

        let range_delay = GAMMA * tec / frequency.powi(2);

        #[cfg(feature = "log")]
        if self.options.messages {
            debug!(
                "slant path {:.1} km: {:.3} TECu, {:.3} m at {:.3} MHz",
                path_length / 1.0E3,
                tec / 1.0E16,
                range_delay,
                frequency / 1.0E6
            );
        }

        Ok(SlantDelay {
            tec,
            path_length,
            range_delay,
            time_delay: range_delay / SPEED_OF_LIGHT,
        })
    }
}
