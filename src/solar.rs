//! Solar geometry (Newbern Smith)
use crate::constants::Heights;

/// Sunrise/sunset sentinel: the sun never sets (positive)
/// or never rises (negative) at that height.
pub const POLAR_SENTINEL: f64 = 99.0;

// Fourier periods (rad/day)
const P1: f64 = 0.017203534;
const P2: f64 = 0.034407068;
const P3: f64 = 0.051610602;
const P4: f64 = 0.068814136;
const P6: f64 = 0.103221204;

/// Sun as seen from one reference height
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionSun {
    /// Reference height (km)
    pub height: f64,
    /// Local time of sunrise, or ±[POLAR_SENTINEL]
    pub sunrise: f64,
    /// Local time of sunset, or ±[POLAR_SENTINEL]
    pub sunset: f64,
    /// Night flag at the request local time
    pub night: bool,
}

impl RegionSun {
    /// Polar day: the sun never sets at this height
    pub fn polar_day(&self) -> bool {
        self.sunrise.abs() > 25.0 && self.sunrise > 0.0
    }
    /// Polar night: the sun never rises at this height
    pub fn polar_night(&self) -> bool {
        self.sunrise.abs() > 25.0 && self.sunrise < 0.0
    }
}

/// Night rule, handling day intervals crossing midnight
pub(crate) fn is_night(hour: f64, sunrise: f64, sunset: f64) -> bool {
    if sunrise.abs() > 25.0 {
        sunrise < 0.0
    } else if sunrise <= sunset {
        hour > sunset || hour < sunrise
    } else {
        hour > sunset && hour < sunrise
    }
}

/// Raw solar position at one height
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SunPosition {
    pub declination: f64,
    pub zenith: f64,
    pub sunrise: f64,
    pub sunset: f64,
}

/// Solar declination, zenith angle and sunrise/sunset at `height` (km)
/// for given day of year, local hour, latitude and east longitude (degrees).
pub(crate) fn sun_position(doy: u16, hour: f64, latitude: f64, longitude: f64, height: f64) -> SunPosition {
    let wlon = 360.0 - longitude;
    let td = doy as f64 + (hour + wlon / 15.0) / 24.0;
    let te = td + 0.9369;

    let declination = 23.256 * (P1 * (te - 82.242)).sin()
        + 0.381 * (P2 * (te - 44.855)).sin()
        + 0.167 * (P3 * (te - 23.355)).sin()
        - 0.013 * (P4 * (te + 11.97)).sin()
        + 0.011 * (P6 * (te - 10.41)).sin()
        + 0.339137;
    let dc = declination.to_radians();

    // equation of time
    let tf = te - 0.5;
    let eqt = -7.38 * (P1 * (tf - 4.0)).sin() - 9.87 * (P2 * (tf + 9.0)).sin()
        + 0.27 * (P3 * (tf - 53.0)).sin()
        - 0.2 * (P4 * (tf - 17.0)).cos();
    let et = (eqt / 4.0).to_radians();

    let fa = latitude.to_radians();
    let phi = (15.0 * (hour - 12.0)).to_radians() + et;

    let a = fa.sin() * dc.sin();
    let b = fa.cos() * dc.cos();
    let cosx = (a + b * phi.cos()).clamp(-1.0, 1.0);
    let zenith = cosx.acos().to_degrees();

    // refraction and semi diameter, horizon depression at height
    let chih = 90.83 + 0.0347 * (height.max(0.0) * 1000.0).sqrt();
    let secphi = if b.abs() < 1.0E-12 {
        // at the poles, only the declination matters
        if a < chih.to_radians().cos() {
            2.0
        } else {
            -2.0
        }
    } else {
        (chih.to_radians().cos() - a) / b
    };

    let (sunrise, sunset) = if secphi > 1.0 {
        (-POLAR_SENTINEL, -POLAR_SENTINEL)
    } else if secphi < -1.0 {
        (POLAR_SENTINEL, POLAR_SENTINEL)
    } else {
        let hangle = secphi.acos();
        let mut sunrise = 12.0 - (hangle + et).to_degrees() / 15.0;
        let mut sunset = 12.0 + (hangle - et).to_degrees() / 15.0;
        if sunrise < 0.0 {
            sunrise += 24.0;
        }
        if sunset >= 24.0 {
            sunset -= 24.0;
        }
        (sunrise, sunset)
    };

    SunPosition {
        declination,
        zenith,
        sunrise,
        sunset,
    }
}

/// [SolarGeometry] at the D, E, F1 and F reference heights
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarGeometry {
    /// Declination (degrees)
    pub declination: f64,
    /// Zenith angle (degrees)
    pub zenith: f64,
    /// Zenith angle at local noon (degrees)
    pub noon_zenith: f64,
    /// D region (70 km)
    pub d: RegionSun,
    /// E region (110 km)
    pub e: RegionSun,
    /// F1 region (200 km)
    pub f1: RegionSun,
    /// F region (300 km)
    pub f: RegionSun,
}

impl SolarGeometry {
    /// Solar geometry at given day of year, local hour,
    /// latitude and east longitude (degrees)
    pub fn new(doy: u16, hour: f64, latitude: f64, longitude: f64) -> Self {
        let region = |height: f64| {
            let pos = sun_position(doy, hour, latitude, longitude, height);
            (
                pos,
                RegionSun {
                    height,
                    sunrise: pos.sunrise,
                    sunset: pos.sunset,
                    night: is_night(hour, pos.sunrise, pos.sunset),
                },
            )
        };
        let (_, d) = region(Heights::D_REFERENCE);
        let (pos, e) = region(Heights::E_PEAK);
        let (_, f1) = region(Heights::F1_REFERENCE);
        let (_, f) = region(Heights::F_REFERENCE);
        let noon = sun_position(doy, 12.0, latitude, longitude, Heights::E_PEAK);
        Self {
            declination: pos.declination,
            zenith: pos.zenith,
            noon_zenith: noon.zenith,
            d,
            e,
            f1,
            f,
        }
    }
    /// Sun seen from an arbitrary height
    pub fn at_height(doy: u16, hour: f64, latitude: f64, longitude: f64, height: f64) -> RegionSun {
        let pos = sun_position(doy, hour, latitude, longitude, height);
        RegionSun {
            height,
            sunrise: pos.sunrise,
            sunset: pos.sunset,
            night: is_night(hour, pos.sunrise, pos.sunset),
        }
    }
}
