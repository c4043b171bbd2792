//! Analytic bottomside: F2, F1, intermediate and E/valley segments
use crate::{
    constants::ARGMAX,
    peak::PeakParameters,
    profile::dregion::DRegion,
    valley::{Boundary, ValleyParameters},
};

/// F2 bottomside: NmF2 exp(-x^B1) / cosh(x), x = (hmF2 - h) / B0
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct F2Bottomside {
    pub nmf2: f64,
    pub hmf2: f64,
    pub b0: f64,
    pub b1: f64,
}

impl F2Bottomside {
    pub fn new(peaks: &PeakParameters) -> Self {
        Self {
            nmf2: peaks.nmf2,
            hmf2: peaks.hmf2,
            b0: peaks.b0,
            b1: peaks.b1,
        }
    }
    pub fn density(&self, height: f64) -> f64 {
        let x = ((self.hmf2 - height) / self.b0).max(0.0);
        let z = x.powf(self.b1).min(ARGMAX);
        self.nmf2 * (-z).exp() / x.cosh()
    }
}

/// F1 segment: F2 bottomside evaluated at a height
/// stretched by the C1 shape parameter below hmF1
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct F1Segment {
    pub f2: F2Bottomside,
    pub hmf1: Option<f64>,
    pub c1: f64,
}

impl F1Segment {
    pub fn new(peaks: &PeakParameters) -> Self {
        Self {
            f2: F2Bottomside::new(peaks),
            hmf1: peaks.hmf1.filter(|_| peaks.f1_present),
            c1: peaks.c1,
        }
    }
    pub fn density(&self, height: f64) -> f64 {
        let h1bar = match self.hmf1 {
            Some(hmf1) if height < hmf1 => {
                let x = (hmf1 - height) / hmf1;
                hmf1 * (1.0 - x.powf(1.0 + self.c1))
            },
            _ => height,
        };
        self.f2.density(h1bar)
    }
}

/// Full bottomside, from the D region up to hmF2
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct AnalyticBottomside {
    pub f1: F1Segment,
    pub valley: ValleyParameters,
    pub nme: f64,
    pub hme: f64,
    /// Lower limit of the F2 segment: hmF1, or hz without F1 layer
    pub f2_base: f64,
    pub d_region: DRegion,
}

impl AnalyticBottomside {
    pub fn new(peaks: &PeakParameters, valley: &ValleyParameters, d_region: DRegion) -> Self {
        let f1 = F1Segment::new(peaks);
        Self {
            f2_base: f1.hmf1.unwrap_or(valley.hz),
            f1,
            valley: *valley,
            nme: peaks.nme,
            hme: peaks.hme,
            d_region,
        }
    }
    /// Intermediate region, between hef and hz
    fn intermediate(&self, height: f64) -> f64 {
        let v = &self.valley;
        match v.boundary {
            Boundary::Height(hst) if hst == v.hef => self.f1.density(height),
            Boundary::Height(_) => {
                let t = v.slope;
                let root = (t * (v.hz - height + 0.25 * t)).max(0.0).sqrt();
                let h1bar = v.hz + 0.5 * t - t.signum() * root;
                self.f1.density(h1bar)
            },
            Boundary::Fallback | Boundary::Unresolved => self.nme + v.slope * (height - v.hef),
        }
    }
    /// E peak and valley polynomial, between hmE and hef
    fn e_valley(&self, height: f64) -> f64 {
        let e = &self.valley.polynomial;
        let t3 = height - self.hme;
        let t1 = t3 * t3 * (e[0] + t3 * (e[1] + t3 * (e[2] + t3 * e[3])));
        if self.valley.night {
            self.nme * t1.exp()
        } else {
            self.nme * (1.0 + t1)
        }
    }
    /// Density (m⁻³) below hmF2
    pub fn density(&self, height: f64) -> f64 {
        if height >= self.f2_base {
            self.f1.f2.density(height)
        } else if height >= self.valley.hz {
            self.f1.density(height)
        } else if height >= self.valley.hef {
            self.intermediate(height)
        } else if height >= self.hme {
            self.e_valley(height)
        } else {
            self.d_region.density(height)
        }
    }
}
