//! Seven species composition: Danilov-Smirnova (1995) type model below
//! 300 km, Triskova-Truhlik-Smilauer (2003) type model above 400 km,
//! blended in between and renormalised
use crate::{conditions::Conditions, epoch::Season};

use super::IonDensities;

/// Top of the pure lower model (km)
const LOWER_TOP: f64 = 300.0;

/// Bottom of the pure upper model (km)
const UPPER_BOTTOM: f64 = 400.0;

/// N+ share of O+ in the lower model
const LOWER_NITROGEN_SHARE: f64 = 0.03;

/// Logistic step from 0 to 100 %
fn step(x: f64) -> f64 {
    100.0 / (1.0 + (-x).exp())
}

/// Relative densities (%) of O+, H+, He+, O2+, NO+, N+ and cluster ions
type Species = [f64; 7];

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Ds95 {
    /// Solar zenith angle (degrees)
    zenith: f64,
    season: Season,
    /// Daily F10.7
    f107: f64,
    /// Geomagnetic latitude (degrees)
    mlat: f64,
    /// Day time weight, 1 at 14 LT, 0 at 02 LT
    day: f64,
}

impl Ds95 {
    pub fn new(cond: &Conditions) -> Self {
        let phase = std::f64::consts::PI * (cond.local_hour - 14.0) / 12.0;
        Self {
            zenith: cond.zenith(),
            season: cond.local_season,
            f107: cond.indices.f107_daily,
            mlat: cond.magnetic.latitude,
            day: (1.0 + phase.cos()) / 2.0,
        }
    }
    /// Lower model: cluster ions below ~85 km, molecular ions, O+
    /// growing above ~190 km. NO+ takes over from O2+ with height.
    fn lower(&self, height: f64) -> Species {
        let cosx = self.zenith.to_radians().cos().max(0.0);
        let sunlit = self.zenith < 90.0;
        let hc = if sunlit { 82.0 } else { 86.0 };
        let cluster = step(-(height - hc) / 3.0);

        let summer = if self.season == Season::Summer { -5.0 } else { 0.0 };
        let ho = 190.0 + 15.0 * (1.0 - cosx) - 0.05 * (self.f107 - 100.0) + summer;
        let o = step((height - ho) / 18.0);
        let n = LOWER_NITROGEN_SHARE * o;

        let molecular = (100.0 - cluster - o - n).max(0.0);
        let ratio = (1.2 + (height - 100.0) / 60.0).clamp(1.2, 4.0);
        let no = molecular * ratio / (1.0 + ratio);
        let o2 = molecular / (1.0 + ratio);
        [o, 0.0, 0.0, o2, no, n, cluster]
    }
    /// Upper model: O+ to light ion transition height rising by day,
    /// with solar activity and towards the magnetic equator
    fn upper(&self, height: f64) -> Species {
        let c = self.mlat.to_radians().cos();
        let transition = (650.0 + 350.0 * self.day + 1.5 * (self.f107 - 100.0) + 150.0 * c * c).max(500.0);
        let light = step((height - transition) / 90.0);
        let he = light * (0.05 + 0.1 * self.day);
        let heavy = 100.0 - light;
        let dn = (height - 500.0) / 300.0;
        let n = 0.05 * heavy * (-dn * dn).exp();
        [heavy - n, light - he, he, 0.0, 0.0, n, 0.0]
    }
    /// Relative densities (%), summing to 100
    pub fn percent(&self, height: f64) -> IonDensities {
        let w = ((height - LOWER_TOP) / (UPPER_BOTTOM - LOWER_TOP)).clamp(0.0, 1.0);
        let lower = self.lower(height);
        let upper = self.upper(height);
        let mut species = [0.0; 7];
        for (i, s) in species.iter_mut().enumerate() {
            *s = ((1.0 - w) * lower[i] + w * upper[i]).max(0.0);
        }
        let total: f64 = species.iter().sum();
        if total > 0.0 {
            species.iter_mut().for_each(|s| *s *= 100.0 / total);
        }
        IonDensities {
            oxygen: Some(species[0]),
            hydrogen: Some(species[1]),
            helium: Some(species[2]),
            molecular_oxygen: Some(species[3]),
            nitric_oxide: Some(species[4]),
            nitrogen: Some(species[5]),
            cluster: Some(species[6]),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conditions::fixture::conditions;

    #[test]
    fn normalised() {
        for hour in [0.0, 12.0] {
            let model = Ds95::new(&conditions(40.0, -75.0, 172, hour, 50.0));
            for h in (75..=2000).step_by(25) {
                let ions = model.percent(h as f64);
                assert!((ions.total() - 100.0).abs() < 1E-9, "{} km {:?}", h, ions);
            }
        }
    }
    #[test]
    fn layering() {
        let model = Ds95::new(&conditions(40.0, -75.0, 172, 12.0, 50.0));
        let d = model.percent(75.0);
        assert!(d.cluster.unwrap() > 50.0);
        let e = model.percent(110.0);
        assert!(e.nitric_oxide.unwrap() > e.molecular_oxygen.unwrap());
        assert!(e.nitric_oxide.unwrap() + e.molecular_oxygen.unwrap() > 90.0);
        let f = model.percent(350.0);
        assert!(f.oxygen.unwrap() > 80.0);
        let top = model.percent(2000.0);
        assert!(top.hydrogen.unwrap() > top.oxygen.unwrap());
        // lower transition at night
        let night = Ds95::new(&conditions(40.0, -75.0, 172, 2.0, 50.0));
        assert!(night.percent(800.0).hydrogen > model.percent(800.0).hydrogen);
    }
}
