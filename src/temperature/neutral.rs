//! Neutral temperature: Jacchia type exospheric temperature and Bates profile
use crate::constants::Heights;

/// Temperature at the lower boundary (K)
pub(crate) const T120: f64 = 386.0;

/// Temperature gradient at the lower boundary (K/km)
const T120_GRADIENT: f64 = 12.0;

/// Diurnal amplitude of the exospheric temperature
const DIURNAL_AMPLITUDE: f64 = 0.3;

/// Earth radius used for geopotential heights (km)
const GEOPOTENTIAL_RADIUS: f64 = 6356.77;

/// Bates temperature profile
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct NeutralTemperature {
    /// Exospheric temperature (K)
    pub texos: f64,
    /// texos - T(120 km)
    pub tlbd: f64,
    /// Shape factor (1/km)
    pub sigma: f64,
}

impl NeutralTemperature {
    /// Profile at given local hour, latitude and declination (degrees),
    /// daily and 81-day mean F10.7
    pub fn new(hour: f64, latitude: f64, declination: f64, f107: f64, f107_81: f64) -> Self {
        let texos = exospheric(hour, latitude, declination, f107, f107_81);
        let tlbd = texos - T120;
        Self {
            texos,
            tlbd,
            sigma: T120_GRADIENT / tlbd,
        }
    }
    fn geopotential(height: f64) -> f64 {
        (height - Heights::TEMPERATURE_BOTTOM) * (GEOPOTENTIAL_RADIUS + Heights::TEMPERATURE_BOTTOM)
            / (GEOPOTENTIAL_RADIUS + height)
    }
    /// Tn (K)
    pub fn tn(&self, height: f64) -> f64 {
        self.texos - self.tlbd * (-self.sigma * Self::geopotential(height)).exp()
    }
    /// dTn/dh (K/km)
    pub fn dtndh(&self, height: f64) -> f64 {
        let dzg = (GEOPOTENTIAL_RADIUS + Heights::TEMPERATURE_BOTTOM) / (GEOPOTENTIAL_RADIUS + height);
        self.tlbd * self.sigma * (-self.sigma * Self::geopotential(height)).exp() * dzg * dzg
    }
    /// Tn at `target` of the tangent to the profile at `height`
    pub fn tangent(&self, height: f64, target: f64) -> f64 {
        self.tn(height) + self.dtndh(height) * (target - height)
    }
}

/// Jacchia (1971) exospheric temperature (K)
pub(crate) fn exospheric(hour: f64, latitude: f64, declination: f64, f107: f64, f107_81: f64) -> f64 {
    let tc = 379.0 + 3.24 * f107_81 + 1.3 * (f107 - f107_81);
    let eta = ((latitude - declination) / 2.0).abs().to_radians();
    let theta = ((latitude + declination) / 2.0).abs().to_radians();

    let hour_angle = 15.0 * (hour - 12.0);
    let mut tau = hour_angle - 37.0 + 6.0 * (hour_angle + 43.0).to_radians().sin();
    while tau > 180.0 {
        tau -= 360.0;
    }
    while tau < -180.0 {
        tau += 360.0;
    }
    let sm = theta.sin().powf(2.2);
    let cm = eta.cos().powf(2.2);
    let cn = (tau / 2.0).to_radians().cos().powi(3);
    tc * (1.0 + DIURNAL_AMPLITUDE * (sm + (cm - sm) * cn))
}
