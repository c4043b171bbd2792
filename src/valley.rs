//! E valley, hmF1 and intermediate region boundary
#[cfg(feature = "log")]
use log::{debug, warn};

use crate::{
    conditions::Conditions,
    constants::{MaxIterNumber, Tolerance},
    math::{hpol, regula_falsi},
    peak::PeakParameters,
    profile::bottomside::{F1Segment, F2Bottomside},
};

/// Valley depth (%) by season, before latitude scaling
const SEASONAL_DEPTH: [f64; 4] = [5.0, 5.0, 5.0, 10.0];

/// Valley top gradient (1/km) by season, before latitude scaling
const SEASONAL_GRADIENT: [f64; 4] = [0.016, 0.01, 0.016, 0.016];

/// Lower boundary of the F1/F2 segment
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary {
    /// Not searched (layer bottomside)
    #[default]
    Unresolved,
    /// Height where the F1 (or F2) formula meets NmE
    Height(f64),
    /// No such height: straight line between hef and hz
    Fallback,
}

/// E valley and intermediate region description
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValleyParameters {
    /// Valley depth, percentage of NmE
    pub depth: f64,
    /// Valley width above hmE (km), 0 when the valley is dropped
    pub width: f64,
    /// Height of the deepest point above hmE (km)
    pub hdeep: f64,
    /// Density gradient at the valley top (1/km)
    pub dlndh: f64,
    /// Valley top (km)
    pub hef: f64,
    pub boundary: Boundary,
    /// Slope of the intermediate segment
    pub slope: f64,
    /// Upper limit of the intermediate segment (km)
    pub hz: f64,
    /// True when the boundary search failed
    pub used_fallback: bool,
    /// Exponential (night) form of the valley polynomial
    pub night: bool,
    /// Valley polynomial coefficients (x², x³, x⁴, x⁵)
    pub polynomial: [f64; 4],
}

/// Coefficients of `1 + e1 x² + e2 x³ + e3 x⁴ + e4 x⁵` fitting a valley of
/// given depth (%) at `hdeep`, upper boundary `width` and upper gradient
/// `dlndh`. A negative depth selects the exponential form.
/// Returns None when the polynomial has another extremum within the valley.
pub(crate) fn valley_polynomial(hdeep: f64, depth: f64, width: f64, dlndh: f64) -> Option<[f64; 4]> {
    let z1 = if depth > 0.0 {
        -depth / (100.0 * hdeep * hdeep)
    } else {
        (1.0 - depth.abs() / 100.0).ln() / (hdeep * hdeep)
    };
    let z3 = dlndh / (2.0 * width);
    let z4 = hdeep - width;

    let e4 = 2.0 * (z1 * (width - 2.0 * hdeep) * width + z3 * z4 * hdeep)
        / (hdeep * width * z4 * z4 * z4);
    let e3 = z1 * (2.0 * width - 3.0 * hdeep) / (hdeep * z4 * z4) - (2.0 * hdeep + width) * e4;
    let e2 = -2.0 * z1 / hdeep - 2.0 * hdeep * e3 - 3.0 * hdeep * hdeep * e4;
    let e1 = z1 - hdeep * (e2 + hdeep * (e3 + hdeep * e4));
    let polynomial = [e1, e2, e3, e4];
    if polynomial.iter().any(|e| !e.is_finite()) {
        return None;
    }

    // roots of the derivative, other than 0 and hdeep
    let b = 4.0 * e3 / (5.0 * e4) + hdeep;
    let c = -2.0 * e1 / (5.0 * e4 * hdeep);
    let discriminant = b * b / 4.0 - c;
    if discriminant < 0.0 {
        return Some(polynomial);
    }
    let root = discriminant.sqrt();
    let half = b / 2.0;
    let inside = |x: f64| x > 0.0 && x < width;
    let x = -half + root;
    if inside(x) {
        return None;
    }
    let other = if root.abs() <= 1.0E-15 {
        c / x
    } else {
        -half - root
    };
    if inside(other) {
        None
    } else {
        Some(polynomial)
    }
}

impl ValleyParameters {
    /// Valley base density (m⁻³)
    pub fn base_density(&self, nme: f64) -> f64 {
        (1.0 - self.depth.abs() / 100.0) * nme
    }
    /// Height of the deepest valley point (km)
    pub fn base_height(&self, hme: f64) -> f64 {
        hme + self.hdeep
    }
    fn signed_depth(&self) -> f64 {
        if self.night {
            -self.depth
        } else {
            self.depth
        }
    }
    /// Valley shape from day/night interpolation around E region
    /// sunrise and sunset. The valley is dropped when shallower than 1 %,
    /// or when its polynomial is not monotonic on both sides of `hdeep`.
    pub(crate) fn new(cond: &Conditions, peaks: &PeakParameters) -> Self {
        let hour = cond.local_hour;
        let e = &cond.solar.e;
        let dela = cond.dela();
        let season = cond.local_season.index() - 1;
        let ep = |day: f64, night: f64| hpol(hour, day, night, e.sunrise, e.sunset, 1.0, 1.0);

        let hdeep = ep(10.5 / dela, 28.0);
        let mut width = ep(17.8 / dela, 45.0 + 22.0 / dela);
        let depth = ep(SEASONAL_DEPTH[season] / dela, 81.0);
        let dlndh = ep(SEASONAL_GRADIENT[season] / dela, 0.06);

        let mut valley = Self {
            depth,
            width,
            hdeep,
            dlndh,
            hef: peaks.hme,
            boundary: Boundary::Unresolved,
            slope: 0.0,
            hz: peaks.hme,
            used_fallback: false,
            night: e.night,
            polynomial: [0.0; 4],
        };

        if depth >= 1.0 {
            match valley_polynomial(hdeep, valley.signed_depth(), width, dlndh) {
                Some(polynomial) => valley.polynomial = polynomial,
                None => {
                    #[cfg(feature = "log")]
                    if cond.verbose() {
                        debug!("valley dropped: additional extremum");
                    }
                    width = 0.0;
                },
            }
        } else {
            width = 0.0;
        }
        valley.width = width;
        valley.hef = peaks.hme + width;
        valley.hz = valley.hef;
        valley
    }
    /// Full search: valley, hmF1 and intermediate region boundary
    pub(crate) fn solve(cond: &Conditions, peaks: &mut PeakParameters) -> Self {
        let mut valley = Self::new(cond, peaks);
        valley.locate_f1(cond, peaks);
        valley.locate_boundary(cond, peaks);
        valley
    }
    /// Lowers hef until the F2 bottomside falls below 0.9 NmF1, then
    /// searches hmF1 between hef and hmF2. The F1 layer is suppressed
    /// when this fails. The valley is recomputed whenever hef moved.
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    pub(crate) fn locate_f1(&mut self, cond: &Conditions, peaks: &mut PeakParameters) {
        if !peaks.f1_present {
            peaks.suppress_f1();
            return;
        }
        let f2 = F2Bottomside::new(peaks);
        let threshold = 0.9 * peaks.nmf1;

        for _ in 0..MaxIterNumber::F1_SEARCH {
            let hef_old = self.hef;
            match self.search_hmf1(peaks, &f2, threshold) {
                Some(hmf1) => peaks.hmf1 = Some(hmf1),
                None => {
                    #[cfg(feature = "log")]
                    if cond.verbose() {
                        debug!("F1 layer suppressed: no hmF1 above hef={:.1}", self.hef);
                    }
                    peaks.suppress_f1();
                },
            }
            if self.hef == hef_old {
                return;
            }
            self.width = self.hef - peaks.hme;
            match valley_polynomial(self.hdeep, self.signed_depth(), self.width, self.dlndh) {
                Some(polynomial) => {
                    self.polynomial = polynomial;
                    return;
                },
                None => {
                    #[cfg(feature = "log")]
                    if cond.verbose() {
                        debug!("valley dropped after hef={:.1} update", self.hef);
                    }
                    self.width = 0.0;
                    self.hef = peaks.hme;
                    if !peaks.f1_present {
                        return;
                    }
                },
            }
        }
    }
    fn search_hmf1(&mut self, peaks: &PeakParameters, f2: &F2Bottomside, threshold: f64) -> Option<f64> {
        if peaks.nme >= threshold {
            return None;
        }
        let mut density = f2.density(self.hef);
        let mut steps = 0;
        while density > threshold {
            self.hef -= 1.0;
            steps += 1;
            if self.hef <= peaks.hme || steps > MaxIterNumber::HEF_DESCENT {
                return None;
            }
            density = f2.density(self.hef);
        }
        regula_falsi(
            self.hef,
            peaks.hmf2,
            density,
            peaks.nmf2,
            Tolerance::HMF1,
            peaks.nmf1,
            |h| f2.density(h),
        )
    }
    /// Searches the height where the F1 segment (F2 bottomside without F1
    /// layer) reaches NmE, between hef and hmF1 (or halfway to hmF2).
    /// Falls back to a straight line when the search fails.
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    pub(crate) fn locate_boundary(&mut self, cond: &Conditions, peaks: &PeakParameters) {
        let segment = F1Segment::new(peaks);
        let (hf1, xf1) = match segment.hmf1 {
            Some(hmf1) => (hmf1, peaks.nmf1),
            None => {
                let h = (peaks.hmf2 + self.hef) / 2.0;
                (h, segment.f2.density(h))
            },
        };
        let hf2 = self.hef;
        let xf2 = segment.density(hf2);

        let hst = if xf2 > peaks.nme {
            None
        } else {
            regula_falsi(
                hf1,
                hf2,
                xf1,
                xf2,
                Tolerance::BOUNDARY,
                peaks.nme,
                |h| segment.density(h),
            )
        };

        match hst {
            Some(hst) => {
                self.hz = (hst + hf1) / 2.0;
                let d = self.hz - hst;
                let span = hst - self.hef;
                self.slope = if span.abs() > f64::EPSILON {
                    d * d / span
                } else {
                    0.0
                };
                self.boundary = Boundary::Height(hst);
                self.used_fallback = false;
            },
            None => {
                self.hz = (self.hef + hf1) / 2.0;
                self.slope = (segment.density(self.hz) - peaks.nme) / (self.hz - self.hef);
                self.boundary = Boundary::Fallback;
                self.used_fallback = true;
                #[cfg(feature = "log")]
                if cond.verbose() {
                    warn!(
                        "intermediate region: linear interpolation between hef={:.1} and hz={:.1}",
                        self.hef, self.hz
                    );
                }
            },
        }
    }
}
