//! Resolved request conditions, shared by every sub-model
use crate::{
    epoch::{EpochSpec, Season},
    error::Error,
    geomag::{GeomagneticResolver, MagneticGeometry},
    indices::{IndexProvider, Indices},
    options::{ModelOptions, UserOverrides},
    solar::SolarGeometry,
};

/// Everything a sub-model may depend on, resolved once per request
#[derive(Debug, Clone, Copy)]
pub(crate) struct Conditions {
    /// Geographic latitude (degrees)
    pub latitude: f64,
    /// Geographic east longitude (degrees)
    pub longitude: f64,
    pub year: i32,
    pub month: u8,
    pub doy: u16,
    pub days_in_year: u16,
    pub decimal_year: f64,
    pub local_hour: f64,
    pub universal_hour: f64,
    pub magnetic: MagneticGeometry,
    pub solar: SolarGeometry,
    pub indices: Indices,
    /// Northern hemisphere season
    pub season: Season,
    /// Season of the hemisphere of this location
    pub local_season: Season,
    pub options: ModelOptions,
    pub overrides: UserOverrides,
}

impl Conditions {
    /// Resolves geometry, solar position and activity indices
    /// of a request at given location (degrees)
    pub(crate) fn resolve<I: IndexProvider, G: GeomagneticResolver>(
        latitude: f64,
        longitude: f64,
        epoch: &EpochSpec,
        options: ModelOptions,
        overrides: UserOverrides,
        indices: &I,
        field: &G,
    ) -> Result<Self, Error> {
        let (local_hour, universal_hour) = epoch.hours(longitude);
        let doy = epoch.day_of_year();
        let decimal_year = epoch.decimal_year();
        let magnetic = field.resolve(latitude, longitude, decimal_year, options.field)?;
        let indices = Indices::resolve(
            indices,
            epoch.year,
            epoch.month,
            epoch.day,
            universal_hour,
            &overrides,
        )?;
        let season = Season::from_day_of_year(doy);
        Ok(Self {
            latitude,
            longitude,
            year: epoch.year,
            month: epoch.month,
            doy,
            days_in_year: epoch.days_in_year(),
            decimal_year,
            local_hour,
            universal_hour,
            magnetic,
            solar: SolarGeometry::new(doy, local_hour, latitude, longitude),
            indices,
            season,
            local_season: if latitude < 0.0 {
                season.opposite()
            } else {
                season
            },
            options,
            overrides,
        })
    }
    /// Latitude dependent scaling of the E region and valley parameters
    pub fn dela(&self) -> f64 {
        let modip = self.magnetic.modip.abs();
        if modip < 18.0 {
            4.32
        } else {
            1.0 + (-(modip - 30.0) / 10.0).exp()
        }
    }
    /// Day of year, shifted by half a year in the southern hemisphere
    pub fn seasonal_day(&self) -> u16 {
        if self.latitude >= 0.0 {
            self.doy
        } else {
            let day = self.doy + self.days_in_year / 2;
            if day > self.days_in_year {
                day - self.days_in_year
            } else {
                day
            }
        }
    }
    /// Month, shifted by half a year in the southern hemisphere
    pub fn seasonal_month(&self) -> u8 {
        if self.latitude >= 0.0 {
            self.month
        } else if self.month > 6 {
            self.month - 6
        } else {
            self.month + 6
        }
    }
    /// Solar zenith angle (degrees)
    pub fn zenith(&self) -> f64 {
        self.solar.zenith
    }
    /// Emits model messages, when enabled
    #[cfg(feature = "log")]
    pub fn verbose(&self) -> bool {
        self.options.messages
    }
}
