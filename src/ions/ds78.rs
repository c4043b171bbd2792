//! Danilov-Semenov (1978) O+ and O2+ relative densities, with NO+, H+ and
//! He+ derived from them (Danilov-Yaichnikov 1985 scheme)
#[cfg(feature = "log")]
use log::debug;

use crate::{
    conditions::Conditions,
    constants::{MaxIterNumber, ARGMAX},
    math::{epstep, eptr},
};

use super::IonDensities;

/// Share of He+ in the light ions (%)
const HELIUM_SHARE: f64 = 10.0;

/// Relative density (%) of O+ at the reference height
const O_REFERENCE: f64 = 100.0;

/// O+ transition half widths (km)
const O_TRANSITIONS: [f64; 4] = [9.0, 5.0, 5.0, 25.0];

/// O2+ transition half widths (km)
const O2_TRANSITIONS: [f64; 2] = [5.0, 5.0];

/// Parameter set, tagged by latitude band (1: below 30°, 2: above),
/// activity (1: Covington below 100, 2: above), season (2: summer,
/// 3: equinox, 4: winter) and time of day (1: day, 2: night).
/// A None tag matches any value.
struct Tagged<const N: usize> {
    header: [Option<u8>; 4],
    values: [f64; N],
}

impl<const N: usize> Tagged<N> {
    const fn new(header: [Option<u8>; 4], values: [f64; N]) -> Self {
        Self { header, values }
    }
    fn matches(&self, key: &[u8; 4]) -> bool {
        self.header
            .iter()
            .zip(key.iter())
            .all(|(tag, k)| tag.map_or(true, |tag| tag == *k))
    }
}

/// First set matching the key, the last set otherwise
fn select<const N: usize>(sets: &[Tagged<N>], key: &[u8; 4]) -> [f64; N] {
    sets.iter()
        .find(|set| set.matches(key))
        .or(sets.last())
        .map(|set| set.values)
        .unwrap_or([0.0; N])
}

/// Lower O+ gradients and first transition height, each as
/// (y2, y1, sc, hx) step on the cosine of the zenith angle
const O_LOWER: [Tagged<12>; 2] = [
    Tagged::new(
        [Some(1), None, None, None],
        [0.05, 0.04, 0.05, 0.3, 0.012, 0.01, 0.05, 0.3, 195.0, 215.0, 0.05, 0.3],
    ),
    Tagged::new(
        [None, None, None, None],
        [0.05, 0.04, 0.05, 0.3, 0.012, 0.01, 0.05, 0.3, 190.0, 210.0, 0.05, 0.3],
    ),
];

/// Upper O+ segment: upper transition height, gradients below and
/// above it, height of 1% O+
const O_UPPER: [Tagged<4>; 5] = [
    Tagged::new([None, Some(2), None, Some(2)], [900.0, -0.003, -0.004, 1500.0]),
    Tagged::new([None, None, None, Some(2)], [800.0, -0.003, -0.004, 1400.0]),
    Tagged::new([None, Some(2), Some(2), Some(1)], [1300.0, -0.002, -0.003, 2100.0]),
    Tagged::new([None, Some(2), None, Some(1)], [1400.0, -0.002, -0.003, 2200.0]),
    Tagged::new([None, None, None, None], [1200.0, -0.003, -0.0035, 2000.0]),
];

/// O2+: reference height and density, then (a, b) pairs of
/// a + b cos(zenith) for two transition heights and three gradients
const O2: [Tagged<12>; 2] = [
    Tagged::new(
        [None, None, None, Some(2)],
        [130.0, 50.0, 160.0, 0.0, 230.0, 0.0, 0.0, 0.0, -0.02, 0.0, -0.04, 0.0],
    ),
    Tagged::new(
        [None, None, None, None],
        [130.0, 40.0, 150.0, 20.0, 220.0, 20.0, 0.005, 0.0, -0.02, -0.005, -0.04, 0.0],
    ),
];

/// Relative density made of exponential segments joined by Epstein
/// transitions, passing through `maximum` at `reference`
#[derive(Debug, Copy, Clone, PartialEq)]
struct RelativeDensity {
    reference: f64,
    maximum: f64,
    gradients: [f64; 5],
    heights: [f64; 4],
    transitions: [f64; 4],
    segments: usize,
}

impl RelativeDensity {
    /// Relative density (%)
    fn at(&self, height: f64) -> f64 {
        let mut sum = (height - self.reference) * self.gradients[0];
        for i in 0..self.segments {
            let (dx, hx) = (self.transitions[i], self.heights[i]);
            let aa = eptr(height, dx, hx);
            let bb = eptr(self.reference, dx, hx);
            sum += (self.gradients[i + 1] - self.gradients[i]) * (aa - bb) * dx;
        }
        if sum.abs() < ARGMAX {
            self.maximum * sum.exp()
        } else if sum > 0.0 {
            self.maximum * ARGMAX.exp()
        } else {
            0.0
        }
    }
}

/// DS-78 composition model of one request
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Ds78 {
    oxygen: RelativeDensity,
    molecular_oxygen: RelativeDensity,
    /// Height of the O+ maximum (km)
    pub peak_height: f64,
    /// NO+ to O2+ ratio above the O+ maximum
    pub no_ratio: f64,
}

impl Ds78 {
    pub fn new(cond: &Conditions) -> Self {
        let night = cond.solar.f.night;
        let high_activity = cond.indices.covington >= 100.0;
        let key = [
            if cond.latitude.abs() < 30.0 { 1 } else { 2 },
            if high_activity { 2 } else { 1 },
            match cond.local_season.index() {
                1 => 3,
                s => s as u8,
            },
            if night { 2 } else { 1 },
        ];
        let z = if night {
            0.0
        } else {
            cond.zenith().to_radians().cos()
        };

        let lower = select(&O_LOWER, &key);
        let upper = select(&O_UPPER, &key);
        let step = |i: usize| epstep(lower[i], lower[i + 1], lower[i + 2], lower[i + 3], z);

        let mut gradients = [step(0), step(4), 0.0, upper[1], upper[2]];
        let mut heights = [
            step(8),
            if key[1] == 2 && key[2] == 2 {
                237.0
            } else {
                290.0
            },
            0.0,
            upper[0],
        ];
        let one_percent = upper[3];

        // the upper gradient steepens until the plateau is at least 20 km wide
        let ln100 = 100.0_f64.ln();
        for _ in 0..MaxIterNumber::ION_ADJUSTMENT {
            heights[2] = (ln100 - gradients[4] * (heights[3] - one_percent)) / gradients[3] + heights[3];
            if heights[2] > heights[1] + 20.0 {
                break;
            }
            gradients[3] -= 0.001;
        }

        let mut oxygen = RelativeDensity {
            reference: (heights[1] + heights[2]) / 2.0,
            maximum: O_REFERENCE,
            gradients,
            heights,
            transitions: O_TRANSITIONS,
            segments: 4,
        };

        // O+ maximum, coarse to fine
        let mut dx = 5.0;
        let mut x = heights[1];
        let mut ymax = 0.0;
        let mut y = 0.0;
        for _ in 0..MaxIterNumber::ION_ADJUSTMENT {
            x += dx;
            y = oxygen.at(x);
            if y <= ymax {
                if dx <= 0.1 {
                    break;
                }
                x -= dx;
                dx /= 5.0;
            } else {
                ymax = y;
            }
        }
        let peak_height = x - dx / 2.0;

        for _ in 0..MaxIterNumber::ION_ADJUSTMENT {
            if y < 100.0 {
                break;
            }
            oxygen.maximum -= 0.01;
            y = oxygen.at(peak_height);
        }
        let remainder = 100.0 - y;

        let o2 = select(&O2, &key);
        let pair = |i: usize| o2[i] + o2[i + 1] * z;
        let heights = [pair(2), pair(4), 0.0, 0.0];
        let mut gradients = [pair(6), pair(8), pair(10), 0.0, 0.0];
        let (reference, maximum) = (o2[0], o2[1]);
        let slope = if reference > heights[0] {
            gradients[1]
        } else {
            gradients[0]
        };
        let ln_lower = maximum.ln() + slope * (heights[0] - reference);
        let reference = (heights[0] + heights[1]) / 2.0;
        let mut molecular_oxygen = RelativeDensity {
            reference,
            maximum: (ln_lower + gradients[1] * (reference - heights[0])).exp(),
            gradients,
            heights,
            transitions: [O2_TRANSITIONS[0], O2_TRANSITIONS[1], 0.0, 0.0],
            segments: 2,
        };

        // O2+ may not exceed the remainder at the O+ maximum
        let mut y = molecular_oxygen.at(peak_height);
        for _ in 0..MaxIterNumber::ION_ADJUSTMENT {
            if y <= remainder {
                break;
            }
            gradients[2] -= 0.02;
            molecular_oxygen.gradients = gradients;
            y = molecular_oxygen.at(peak_height);
        }
        #[cfg(feature = "log")]
        if y > remainder && cond.verbose() {
            debug!("DS-78: O2+ exceeds the O+ remainder at {:.1} km", peak_height);
        }

        let no_ratio = if y < 1.0 { 0.0 } else { (remainder - y) / y };

        Self {
            oxygen,
            molecular_oxygen,
            peak_height,
            no_ratio,
        }
    }
    /// Relative densities (%). N+ and cluster ions are not modelled.
    pub fn percent(&self, height: f64) -> IonDensities {
        let o = self.oxygen.at(height);
        let o2 = self.molecular_oxygen.at(height);
        let (no, h, he) = if height > self.peak_height {
            let rest = (100.0 - o - o2 - self.no_ratio * o2).max(0.0);
            (
                self.no_ratio * o2,
                rest * (1.0 - HELIUM_SHARE / 100.0),
                rest * HELIUM_SHARE / 100.0,
            )
        } else {
            ((100.0 - o2 - o).max(0.0), 0.0, 0.0)
        };
        IonDensities {
            oxygen: Some(o),
            hydrogen: Some(h),
            helium: Some(he),
            molecular_oxygen: Some(o2),
            nitric_oxide: Some(no),
            nitrogen: None,
            cluster: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conditions::fixture::conditions;

    #[test]
    fn parameter_selection() {
        let night_high = select(&O_UPPER, &[2, 2, 3, 2]);
        assert_eq!(night_high[0], 900.0);
        let night = select(&O_UPPER, &[1, 1, 4, 2]);
        assert_eq!(night[0], 800.0);
        let day = select(&O_UPPER, &[2, 1, 2, 1]);
        assert_eq!(day[0], 1200.0);
        assert_eq!(select(&O_LOWER, &[1, 1, 3, 1])[8], 195.0);
    }
    #[test]
    fn composition() {
        for hour in [0.0, 12.0] {
            let cond = conditions(40.0, -75.0, 172, hour, 50.0);
            let model = Ds78::new(&cond);
            assert!(model.peak_height > 237.0 && model.peak_height < 600.0, "{:?}", model);
            for h in (100..2000).step_by(25) {
                let ions = model.percent(h as f64);
                let sum = ions.total();
                assert!((sum - 100.0).abs() < 0.5, "{} km: {:?}", h, ions);
                assert!(ions.nitrogen.is_none() && ions.cluster.is_none());
            }
            // molecular ions below, O+ at the maximum, light ions on top
            let low = model.percent(110.0);
            assert!(low.molecular_oxygen.unwrap() + low.nitric_oxide.unwrap() > 95.0);
            let peak = model.percent(model.peak_height);
            assert!(peak.oxygen.unwrap() > 98.0 && peak.oxygen.unwrap() < 100.0);
            let top = model.percent(2000.0);
            assert!(top.hydrogen.unwrap() > top.oxygen.unwrap());
            assert!(top.hydrogen.unwrap() > top.helium.unwrap());
        }
    }
}
