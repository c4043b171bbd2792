//! Solar and geomagnetic activity indices
#[cfg(feature = "log")]
use log::debug;

use crate::{epoch::MonthBlend, error::Error, options::UserOverrides};

mod ap;
mod igrz;

pub use ap::{ApRecord, ApTable};
pub use igrz::IgRzTable;

/// Number of 3-hour ap values used by the storm model
pub const AP_HISTORY_LEN: usize = 13;

/// 12-month running means of one month
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthlyIndices {
    /// Sunspot number
    pub rz12: f64,
    /// Ionospheric global index
    pub ig12: f64,
}

/// Daily solar radio flux
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyFlux {
    /// F10.7 of the day
    pub daily: f64,
    /// 81-day mean F10.7 centered on that day
    pub mean_81: f64,
}

/// Source of activity indices
pub trait IndexProvider {
    /// Rz12 and IG12 of given month, if known
    fn monthly(&self, year: i32, month: u8) -> Option<MonthlyIndices>;
    /// Daily F10.7, if known
    fn daily_flux(&self, _year: i32, _month: u8, _day: u8) -> Option<DailyFlux> {
        None
    }
    /// ap of the 3-hour slot containing `hour` (UT) and of the
    /// twelve previous slots, most recent first.
    fn ap_history(
        &self,
        _year: i32,
        _month: u8,
        _day: u8,
        _hour: f64,
    ) -> Option<[f64; AP_HISTORY_LEN]> {
        None
    }
}

/// Providers may be chained: the first answer wins
impl<A: IndexProvider, B: IndexProvider> IndexProvider for (A, B) {
    fn monthly(&self, year: i32, month: u8) -> Option<MonthlyIndices> {
        self.0
            .monthly(year, month)
            .or_else(|| self.1.monthly(year, month))
    }
    fn daily_flux(&self, year: i32, month: u8, day: u8) -> Option<DailyFlux> {
        self.0
            .daily_flux(year, month, day)
            .or_else(|| self.1.daily_flux(year, month, day))
    }
    fn ap_history(
        &self,
        year: i32,
        month: u8,
        day: u8,
        hour: f64,
    ) -> Option<[f64; AP_HISTORY_LEN]> {
        self.0
            .ap_history(year, month, day, hour)
            .or_else(|| self.1.ap_history(year, month, day, hour))
    }
}

/// Constant indices, regardless of the epoch
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedIndices {
    pub rz12: f64,
    pub ig12: f64,
    pub f107_daily: Option<f64>,
    pub ap: Option<[f64; AP_HISTORY_LEN]>,
}

impl FixedIndices {
    /// Builds [FixedIndices] from Rz12 only, IG12 is derived from it
    pub fn new(rz12: f64) -> Self {
        Self {
            rz12,
            ig12: ig12_from_rz12(rz12),
            f107_daily: None,
            ap: None,
        }
    }
    /// Copies and defines the daily F10.7
    pub fn with_f107(&self, f107: f64) -> Self {
        let mut s = *self;
        s.f107_daily = Some(f107);
        s
    }
    /// Copies and defines a constant ap history
    pub fn with_ap(&self, ap: f64) -> Self {
        let mut s = *self;
        s.ap = Some([ap; AP_HISTORY_LEN]);
        s
    }
}

impl IndexProvider for FixedIndices {
    fn monthly(&self, _: i32, _: u8) -> Option<MonthlyIndices> {
        Some(MonthlyIndices {
            rz12: self.rz12,
            ig12: self.ig12,
        })
    }
    fn daily_flux(&self, _: i32, _: u8, _: u8) -> Option<DailyFlux> {
        self.f107_daily.map(|daily| DailyFlux {
            daily,
            mean_81: daily,
        })
    }
    fn ap_history(&self, _: i32, _: u8, _: u8, _: f64) -> Option<[f64; AP_HISTORY_LEN]> {
        self.ap
    }
}

/// IG12 from Rz12 (quadratic fit, capped at 274)
pub fn ig12_from_rz12(rz12: f64) -> f64 {
    (-12.349154 + (1.4683266 - 2.67690893E-3 * rz12) * rz12).min(274.0)
}

/// Rz12 from IG12, inverse of [ig12_from_rz12] on its increasing branch
pub fn rz12_from_ig12(ig12: f64) -> f64 {
    let (a, b, c) = (2.67690893E-3, 1.4683266, 12.349154);
    let discriminant = b * b - 4.0 * a * (ig12 + c);
    if discriminant <= 0.0 {
        b / 2.0 / a
    } else {
        (b - discriminant.sqrt()) / 2.0 / a
    }
}

/// Covington index (12-month mean F10.7) from Rz12
pub fn covington(rz12: f64) -> f64 {
    63.75 + rz12 * (0.728 + 8.9E-4 * rz12)
}

/// Resolved activity indices for one request
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Indices {
    pub rz12: f64,
    pub ig12: f64,
    /// Daily F10.7
    pub f107_daily: f64,
    /// 81-day mean F10.7
    pub f107_81: f64,
    /// Covington index, derived from Rz12
    pub covington: f64,
    /// ap history (most recent first), when available
    pub ap: Option<[f64; AP_HISTORY_LEN]>,
    /// Indices of the current and neighbor months, each month map
    /// being weighted by its own activity level
    pub months: [MonthlyIndices; 2],
}

impl Indices {
    /// Covington index saturated at 188
    pub fn covington_saturated(&self) -> f64 {
        self.covington.min(188.0)
    }
    /// Resolves indices for given date and UT hour. User overrides take
    /// precedence and replace the index of both months. An index that is
    /// not overridden always comes from the provider.
    pub fn resolve<P: IndexProvider>(
        provider: &P,
        year: i32,
        month: u8,
        day: u8,
        ut: f64,
        overrides: &UserOverrides,
    ) -> Result<Self, Error> {
        let blend = MonthBlend::new(year, month, day);
        let months = match (overrides.rz12, overrides.ig12) {
            (Some(rz12), Some(ig12)) => [MonthlyIndices { rz12, ig12 }; 2],
            (user_rz12, user_ig12) => {
                let current = provider
                    .monthly(year, month)
                    .ok_or(Error::IndicesUnavailable { year, month })?;
                let neighbor = provider
                    .monthly(blend.neighbor_year, blend.neighbor)
                    .unwrap_or_else(|| {
                        #[cfg(feature = "log")]
                        debug!(
                            "no indices for {}-{:02}, using {}-{:02} only",
                            blend.neighbor_year, blend.neighbor, year, month
                        );
                        current
                    });
                [current, neighbor].map(|m| MonthlyIndices {
                    rz12: user_rz12.unwrap_or(m.rz12),
                    ig12: user_ig12.unwrap_or(m.ig12),
                })
            },
        };
        let rz12 = blend.blend(months[0].rz12, months[1].rz12);
        let ig12 = blend.blend(months[0].ig12, months[1].ig12);

        let covington = covington(rz12);
        let flux = provider.daily_flux(year, month, day);
        let f107_daily = overrides
            .f107_daily
            .or(flux.map(|f| f.daily))
            .unwrap_or(covington);
        let f107_81 = flux.map(|f| f.mean_81).unwrap_or(covington);

        Ok(Self {
            rz12,
            ig12,
            f107_daily,
            f107_81,
            covington,
            ap: provider.ap_history(year, month, day, ut),
            months,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn ig_rz_conversion() {
        assert!((ig12_from_rz12(0.0) + 12.349154).abs() < 1E-9);
        for rz in [0.0, 50.0, 100.0, 150.0] {
            let ig = ig12_from_rz12(rz);
            assert!((rz12_from_ig12(ig) - rz).abs() < 1E-6);
        }
        assert!((covington(100.0) - 145.45).abs() < 1E-9);
    }
    #[test]
    fn overrides_precedence() {
        let provider = FixedIndices::new(80.0).with_f107(150.0);
        let none = UserOverrides::default();
        let indices = Indices::resolve(&provider, 2007, 6, 21, 12.0, &none).unwrap();
        assert_eq!(indices.rz12, 80.0);
        assert_eq!(indices.f107_daily, 150.0);
        assert!(indices.ap.is_none());

        let overrides = UserOverrides {
            rz12: Some(120.0),
            f107_daily: Some(180.0),
            ..Default::default()
        };
        let indices = Indices::resolve(&provider, 2007, 6, 21, 12.0, &overrides).unwrap();
        assert_eq!(indices.rz12, 120.0);
        assert_eq!(indices.ig12, ig12_from_rz12(80.0));
        assert!(indices.months.iter().all(|m| m.rz12 == 120.0));
        assert_eq!(indices.f107_daily, 180.0);
        assert_eq!(indices.covington_saturated(), covington(120.0).min(188.0));
    }
    #[test]
    fn unavailable() {
        let provider = IgRzTable::default();
        let none = UserOverrides::default();
        assert!(matches!(
            Indices::resolve(&provider, 2007, 6, 21, 12.0, &none),
            Err(Error::IndicesUnavailable { year: 2007, month: 6 })
        ));
        // a single override still needs the other index
        let overrides = UserOverrides {
            ig12: Some(60.0),
            ..Default::default()
        };
        assert!(Indices::resolve(&provider, 2007, 6, 21, 12.0, &overrides).is_err());

        let overrides = UserOverrides {
            rz12: Some(40.0),
            ig12: Some(60.0),
            ..Default::default()
        };
        let indices = Indices::resolve(&provider, 2007, 6, 21, 12.0, &overrides).unwrap();
        assert_eq!((indices.rz12, indices.ig12), (40.0, 60.0));
        assert_eq!(indices.f107_daily, indices.covington);
    }
    #[test]
    fn chained_providers() {
        let a = IgRzTable::default();
        let b = FixedIndices::new(10.0).with_ap(7.0);
        let chain = (a, b);
        assert_eq!(chain.monthly(2000, 1).map(|m| m.rz12), Some(10.0));
        assert_eq!(chain.ap_history(2000, 1, 1, 0.0), Some([7.0; 13]));
    }
}
