//! Electron temperature at reference heights, and the Te profile joining them
use std::f64::consts::LN_2;

use itertools::Itertools;

use crate::{
    constants::Heights,
    epoch::Season,
    math::{eptr, hpol},
};

use super::neutral::NeutralTemperature;

/// Number of reference heights
pub(crate) const REFERENCES: usize = 7;

/// Transition half widths between profile segments (km)
const TRANSITIONS: [f64; REFERENCES - 2] = [5.0, 5.0, 10.0, 20.0, 20.0];

/// Highest L value used by the Intercosmos model
const MAX_L_SHELL: f64 = 10.0;

/// Brace and Theis reference heights above the Te maximum (km)
pub(crate) const BRACE_THEIS_HEIGHTS: [f64; 5] = [300.0, 400.0, 600.0, 1400.0, 3000.0];

/// Intercosmos reference heights above the Te maximum (km)
pub(crate) const INTERCOSMOS_HEIGHTS: [f64; 5] = [300.0, 550.0, 900.0, 1500.0, 2500.0];

/// Brace and Theis (AE-C, ISIS) Te (K) at 300, 400, 1400 and 3000 km.
/// Day and night values grow with dip latitude; smooth transitions
/// around 06 and 18.5 LT; winter slightly hotter.
pub(crate) fn brace_theis(dip_latitude: f64, hour: f64, season: Season) -> [f64; 4] {
    const DAY: [(f64, f64); 4] = [(1500.0, 700.0), (1900.0, 800.0), (2400.0, 1200.0), (2900.0, 1500.0)];
    const NIGHT: [(f64, f64); 4] = [(900.0, 400.0), (1000.0, 500.0), (1700.0, 1000.0), (2300.0, 1400.0)];
    let s2 = dip_latitude.to_radians().sin().powi(2);
    let seasonal = match season {
        Season::Summer => 0.95,
        Season::Winter => 1.08,
        Season::Spring | Season::Autumn => 1.0,
    };
    let mut te = [0.0; 4];
    for (i, te) in te.iter_mut().enumerate() {
        let day = DAY[i].0 + DAY[i].1 * s2;
        let night = NIGHT[i].0 + NIGHT[i].1 * s2;
        *te = seasonal * hpol(hour, day, night, 6.0, 18.5, 1.0, 1.5);
    }
    te
}

/// AEROS (Spenner and Plugge) Te (K) at 600 km
pub(crate) fn aeros_600(mlat: f64, hour: f64, sunrise: f64, sunset: f64) -> f64 {
    let ett = (-mlat / 11.35).exp();
    let day = 2900.0 - 5600.0 * ett / (ett + 1.0).powi(2);
    let night = 839.0 + 1161.0 / (1.0 + (-(mlat.abs() - 45.0) / 5.0).exp());
    hpol(hour, day, night, sunrise, sunset, 1.5, 1.5)
}

/// Intercosmos type Te (K) at `height`, from the L value at that height,
/// day/night weights and daily F10.7
pub(crate) fn intercosmos(height: f64, l_shell: f64, hour: f64, sunrise: f64, sunset: f64, f107: f64) -> f64 {
    let l_shell = l_shell.clamp(1.0, MAX_L_SHELL);
    // invariant latitude
    let s2 = 1.0 - 1.0 / l_shell;
    let ln = (height / 250.0).ln();
    let day = 1400.0 + 900.0 * ln + 800.0 * s2;
    let night = 800.0 + 800.0 * ln + 600.0 * s2;
    hpol(hour, day, night, sunrise, sunset, 1.0, 1.0) * (1.0 + 5.0E-4 * (f107 - 100.0))
}

/// Te (K) from electron density (m⁻³) at `height` (300 or 400 km type
/// correlation). A positive `covington` index adds the solar activity term.
pub(crate) fn te_from_density(height: f64, density: f64, covington: f64) -> f64 {
    let y = 1051.0
        + (17.01 * height - 2746.0)
            * (-5.122E-4 * height + (6.094E-12 - 3.353E-14 * height) * density).exp();
    let activity = if covington < 0.0 {
        1.0
    } else {
        let acov = covington.abs();
        1.0 + (0.117 + 2.02E-3 * acov) / (1.0 + (-(acov - 102.5) / 5.0).exp())
    };
    y * activity
}

/// Te maximum (height, K) at given hour, from the geomagnetic latitude
pub(crate) fn te_maximum(mlat: f64, hour: f64, sunrise: f64, sunset: f64, night: &NeutralTemperature) -> (f64, f64) {
    const NIGHT_HEIGHT: f64 = 150.0;
    let hmax_day = 210.0 + 60.0 * (-(mlat / 22.41).powi(2)).exp();
    let tmax_day = 1500.0 + 800.0 * (-(mlat / 33.0).powi(2)).exp();
    let tmax_night = night.tn(NIGHT_HEIGHT) + 20.0;
    (
        hpol(hour, hmax_day, NIGHT_HEIGHT, sunrise, sunset, 1.0, 1.0),
        hpol(hour, tmax_day, tmax_night, sunrise, sunset, 1.0, 1.0),
    )
}

/// Te profile: linear segments between reference heights,
/// joined by Epstein transitions
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ElectronTemperature {
    /// Reference heights (km), from 120 km to the top height
    pub heights: [f64; REFERENCES],
    /// Te at the reference heights (K), after correction
    pub values: [f64; REFERENCES],
    /// Segment gradients (K/km)
    pub gradients: [f64; REFERENCES - 1],
}

impl ElectronTemperature {
    /// Enforces Te >= Tn at every reference height, then corrects the
    /// values so that the smoothed profile passes through them
    pub fn new(heights: [f64; REFERENCES], raw: [f64; REFERENCES], tn: &NeutralTemperature) -> Self {
        let mut values = raw;
        values[1] = values[1].max(tn.tn(heights[1]));
        let mut previous = (values[1] - values[0]) / (heights[1] - heights[0]);
        for i in 2..REFERENCES {
            values[i] = values[i].max(tn.tn(heights[i]));
            let gradient = (values[i] - values[i - 1]) / (heights[i] - heights[i - 1]);
            values[i - 1] -= (gradient - previous) * TRANSITIONS[i - 2] * LN_2;
            previous = gradient;
        }
        let mut gradients = [0.0; REFERENCES - 1];
        let points = heights.iter().zip(values.iter()).tuple_windows();
        for (g, ((h0, t0), (h1, t1))) in gradients.iter_mut().zip(points) {
            *g = (t1 - t0) / (h1 - h0);
        }
        Self {
            heights,
            values,
            gradients,
        }
    }
    /// Top reference height (km)
    pub fn top(&self) -> f64 {
        self.heights[REFERENCES - 1]
    }
    /// Te (K)
    pub fn te(&self, height: f64) -> f64 {
        let h0 = self.heights[0];
        let mut sum = self.values[0] + self.gradients[0] * (height - h0);
        for (i, dte) in TRANSITIONS.iter().enumerate() {
            let hx = self.heights[i + 1];
            let aa = eptr(height, *dte, hx);
            let bb = eptr(h0, *dte, hx);
            sum += (self.gradients[i + 1] - self.gradients[i]) * (aa - bb) * dte;
        }
        sum
    }
}

impl Default for ElectronTemperature {
    fn default() -> Self {
        let mut heights = [Heights::TEMPERATURE_BOTTOM; REFERENCES];
        for (i, h) in heights.iter_mut().enumerate() {
            *h += 100.0 * i as f64;
        }
        Self {
            heights,
            values: [0.0; REFERENCES],
            gradients: [0.0; REFERENCES - 1],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn density_correlation() {
        // denser plasma is colder
        let dense = te_from_density(300.0, 1.0E12, -100.0);
        let tenuous = te_from_density(300.0, 1.0E11, -100.0);
        assert!(dense < tenuous);
        assert!((dense - 1088.0).abs() < 5.0, "{}", dense);
        assert!(te_from_density(300.0, 1.0E11, 150.0) > tenuous);
    }
    #[test]
    fn reference_models() {
        let day = brace_theis(45.0, 12.0, Season::Spring);
        let night = brace_theis(45.0, 0.0, Season::Spring);
        for i in 0..4 {
            assert!(day[i] > night[i]);
            if i > 0 {
                assert!(day[i] > day[i - 1]);
            }
        }
        assert!(aeros_600(40.0, 12.0, 6.0, 18.0) > 1000.0);
        let low = intercosmos(900.0, 1.5, 12.0, 6.0, 18.0, 100.0);
        let high = intercosmos(900.0, 6.0, 12.0, 6.0, 18.0, 100.0);
        assert!(high > low);
        assert_eq!(intercosmos(900.0, 60.0, 12.0, 6.0, 18.0, 100.0), intercosmos(900.0, 10.0, 12.0, 6.0, 18.0, 100.0));
    }
    #[test]
    fn smoothed_profile() {
        let tn = NeutralTemperature::new(12.0, 40.0, 23.0, 100.0, 100.0);
        let heights = [120.0, 240.0, 300.0, 550.0, 900.0, 1500.0, 2500.0];
        let raw = [tn.tn(120.0), 2000.0, 1800.0, 2300.0, 2700.0, 3000.0, 3500.0];
        let te = ElectronTemperature::new(heights, raw, &tn);
        assert_eq!(te.te(120.0), raw[0]);
        for i in 2..REFERENCES - 1 {
            // passes close to the reference values
            assert!((te.te(heights[i]) - raw[i]).abs() < 50.0, "{} {}", heights[i], te.te(heights[i]));
        }
        for h in (120..2500).step_by(10) {
            assert!(te.te(h as f64) >= tn.tn(h as f64) - 1.0);
        }
    }
}
