//! E, F1 and F2 peak parameters
#[cfg(feature = "log")]
use log::debug;

use crate::{
    conditions::Conditions,
    constants::{Heights, Plasma},
    error::Error,
    math::hpol,
    options::{BottomsideThickness, F1Occurrence, F2Height},
    storm::storm_ratio,
};

mod e;
mod f1;
mod f2;

pub use f1::F1Probabilities;

/// Night time NmD (m⁻³)
const NMD_NIGHT: f64 = 4.0E8;

/// foF2 and M(3000)F2 evaluated from the coefficient maps
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct F2MapValues {
    pub fof2: f64,
    pub m3000: f64,
}

/// Peak parameters of all regions
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeakParameters {
    /// foE (MHz)
    pub foe: f64,
    /// NmE (m⁻³)
    pub nme: f64,
    /// hmE (km)
    pub hme: f64,
    /// foF1 (MHz)
    pub fof1: f64,
    /// NmF1 (m⁻³)
    pub nmf1: f64,
    /// hmF1 (km), once located. None when the F1 layer is absent.
    pub hmf1: Option<f64>,
    /// F1 shape parameter
    pub c1: f64,
    /// True when the F1 layer is part of the profile
    pub f1_present: bool,
    pub f1_probabilities: F1Probabilities,
    /// foF2 (MHz), storm corrected
    pub fof2: f64,
    /// NmF2 (m⁻³)
    pub nmf2: f64,
    /// hmF2 (km)
    pub hmf2: f64,
    /// M(3000)F2 propagation factor
    pub m3000: f64,
    /// Bottomside thickness (km)
    pub b0: f64,
    /// Bottomside shape
    pub b1: f64,
    /// Ratio of the half density height to hmF2
    pub half_density_ratio: f64,
    /// Storm correction applied to foF2, if any
    pub storm_ratio: Option<f64>,
    /// NmD (m⁻³)
    pub nmd: f64,
    /// hmD (km)
    pub hmd: f64,
}

impl PeakParameters {
    /// Resolves every peak. `maps` is required unless both foF2 and hmF2
    /// are user supplied.
    pub(crate) fn solve(cond: &Conditions, maps: Option<F2MapValues>) -> Result<Self, Error> {
        let overrides = &cond.overrides;
        let indices = &cond.indices;
        let solar = &cond.solar;
        let hour = cond.local_hour;
        let zenith = cond.zenith();
        let rz12 = indices.rz12;
        let dip_latitude = cond.magnetic.dip_latitude;
        let missing = Error::CoefficientLoad {
            family: cond.options.f2_map,
            month: cond.month,
        };

        let foe = match overrides.e_peak {
            Some(peak) => peak.frequency(),
            None => e::foe_edinburgh(
                indices.covington,
                zenith,
                solar.noon_zenith,
                cond.latitude.abs(),
            ),
        };
        let nme = overrides
            .e_peak
            .map(|peak| peak.density())
            .unwrap_or_else(|| Plasma::density(foe));
        let hme = overrides.hme.unwrap_or(Heights::E_PEAK);

        let mut fof2 = match (overrides.f2_peak, maps) {
            (Some(peak), _) => peak.frequency(),
            (None, Some(maps)) => maps.fof2,
            (None, None) => return Err(missing),
        };
        let ratio = fof2 / foe;

        let (hmf2, m3000) = match (overrides.f2_height, maps) {
            (Some(F2Height::Height(h)), Some(maps)) => (h, maps.m3000),
            (Some(F2Height::Height(h)), None) => (h, f2::m3000(dip_latitude, rz12, ratio, h)),
            (Some(F2Height::M3000(m)), _) => (f2::hmf2(dip_latitude, rz12, ratio, m), m),
            (None, Some(maps)) => (
                f2::hmf2(dip_latitude, rz12, ratio, maps.m3000),
                maps.m3000,
            ),
            (None, None) => return Err(missing),
        };

        let mut storm = None;
        if cond.options.storm && overrides.f2_peak.is_none() {
            match indices.ap {
                Some(ap) => {
                    let r = storm_ratio(&ap, cond.magnetic.latitude, cond.local_season);
                    fof2 *= r;
                    storm = Some(r);
                },
                None => {
                    #[cfg(feature = "log")]
                    if cond.verbose() {
                        debug!("storm model skipped: no ap history");
                    }
                },
            }
        }
        let nmf2 = match overrides.f2_peak {
            Some(peak) => peak.density(),
            None => Plasma::density(fof2),
        };

        let b1 = f2::b1(hour, solar.f1.sunrise, solar.f1.sunset);
        let half_density_ratio = if solar.f.night {
            0.91 - hmf2 / 4000.0
        } else {
            f2::gulyaeva_ratio(cond.seasonal_day(), zenith)
        };
        let b0 = match cond.options.bottomside_thickness {
            BottomsideThickness::Gulyaeva => f2::gulyaeva_b0(hmf2, half_density_ratio, b1),
            BottomsideThickness::Table => f2::table_b0(
                hour,
                solar.f1.sunrise,
                solar.f1.sunset,
                cond.local_season,
                rz12,
                cond.magnetic.modip,
            ),
        };

        let fof1 = match overrides.f1_peak {
            Some(peak) => peak.frequency(),
            None => f1::fof1(dip_latitude.abs(), rz12, zenith),
        };
        let nmf1 = overrides
            .f1_peak
            .map(|peak| peak.density())
            .unwrap_or_else(|| Plasma::density(fof1));
        let c1 = f1::c1(
            cond.magnetic.modip,
            hour,
            solar.f1.sunset,
            solar.f1.sunrise,
        );

        let user_f1 = overrides.f1_peak.is_some();
        let (probability, with_l) = f1::probability(zenith, cond.magnetic.latitude, rz12);
        let legacy = if user_f1 || (!solar.f.night && fof1 > 0.0) {
            1.0
        } else {
            0.0
        };
        let f1_present = match cond.options.f1_occurrence {
            F1Occurrence::Probability => user_f1 || probability >= 0.5,
            F1Occurrence::ProbabilityWithL => user_f1 || with_l >= 0.5,
            F1Occurrence::Legacy => legacy > 0.0,
        };

        let nmd = e::nmd(zenith, rz12, NMD_NIGHT);
        let hmd = hpol(hour, 81.0, 88.0, solar.d.sunrise, solar.d.sunset, 1.0, 1.0);

        Ok(Self {
            foe,
            nme,
            hme,
            fof1,
            nmf1,
            hmf1: None,
            c1,
            f1_present,
            f1_probabilities: F1Probabilities {
                legacy,
                probability,
                with_l,
            },
            fof2,
            nmf2,
            hmf2,
            m3000,
            b0,
            b1,
            half_density_ratio,
            storm_ratio: storm,
            nmd,
            hmd,
        })
    }
    /// Half density height (km)
    pub fn half_density_height(&self) -> f64 {
        self.half_density_ratio * self.hmf2
    }
    /// Drops the F1 layer
    pub(crate) fn suppress_f1(&mut self) {
        self.f1_present = false;
        self.hmf1 = None;
        self.c1 = 0.0;
    }
}
