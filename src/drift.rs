//! Equatorial vertical E x B drift.
//! Simplified analytic approximation of the climatological drift pattern,
//! not the published coefficient set.
use std::f64::consts::PI;

use crate::conditions::Conditions;

/// Drift is modelled below this dip latitude (degrees)
const MAX_DIP_LATITUDE: f64 = 25.0;

/// Pre-reversal enhancement center (LT hours) and width
const PRE_REVERSAL: (f64, f64) = (18.8, 0.7);

/// Vertical drift (m/s, positive upwards) at local `hour`, east `longitude`,
/// day of year and daily F10.7. Day time uplift, evening pre-reversal
/// enhancement growing with solar flux near the equinoxes (and December
/// in the American sector), night time downward drift.
pub(crate) fn vertical_drift(hour: f64, longitude: f64, doy: u16, days_in_year: u16, f107: f64) -> f64 {
    let days = days_in_year as f64;
    let doy = doy as f64;
    let day_amplitude = 20.0 + 0.05 * (f107 - 100.0);
    let night_amplitude = (15.0 + 0.05 * (f107 - 100.0)).max(5.0);

    let equinox = (1.0 + (4.0 * PI * (doy - 80.0) / days).cos()) / 2.0;
    let american = longitude > -150.0 && longitude < 0.0;
    let december = if american {
        (1.0 + (2.0 * PI * (doy - 355.0) / days).cos()) / 2.0
    } else {
        0.0
    };
    let pre_reversal = (0.15 * (f107 - 60.0)).max(0.0) * (0.5 + 0.5 * equinox + 0.3 * december);

    let lt = hour.rem_euclid(24.0);
    let base = if (6.0..=18.0).contains(&lt) {
        day_amplitude * (PI * (lt - 6.0) / 12.0).sin()
    } else {
        let t = if lt > 18.0 { lt - 18.0 } else { lt + 6.0 };
        -night_amplitude * (PI * t / 12.0).sin()
    };
    let (center, width) = PRE_REVERSAL;
    base + pre_reversal * (-((lt - center) / width).powi(2)).exp()
}

/// Drift for this request, if enabled and close enough to the dip equator
pub(crate) fn drift(cond: &Conditions) -> Option<f64> {
    if !cond.options.drift || cond.magnetic.dip_latitude.abs() >= MAX_DIP_LATITUDE {
        return None;
    }
    Some(vertical_drift(
        cond.local_hour,
        cond.longitude,
        cond.doy,
        cond.days_in_year,
        cond.indices.f107_daily,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conditions::fixture::conditions;
    #[test]
    fn diurnal_pattern() {
        let noon = vertical_drift(12.0, -50.0, 80, 365, 150.0);
        let midnight = vertical_drift(0.0, -50.0, 80, 365, 150.0);
        assert!(noon > 15.0 && noon < 30.0, "{}", noon);
        assert!(midnight < -10.0);
        // pre-reversal enhancement grows with flux
        let low = vertical_drift(19.0, -50.0, 80, 365, 70.0);
        let high = vertical_drift(19.0, -50.0, 80, 365, 220.0);
        assert!(high > low + 10.0);
        assert_eq!(vertical_drift(25.0, -50.0, 80, 365, 150.0), vertical_drift(1.0, -50.0, 80, 365, 150.0));
    }
    #[test]
    fn equatorial_only() {
        let mut cond = conditions(40.0, -75.0, 172, 12.0, 50.0);
        assert!(drift(&cond).is_none());
        let mut equator = conditions(-12.0, -75.0, 172, 12.0, 50.0);
        assert!(drift(&equator).is_some());
        equator.options.drift = false;
        assert!(drift(&equator).is_none());
        cond.options.drift = true;
        assert!(drift(&cond).is_none());
    }
}
