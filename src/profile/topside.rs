//! Topside formulas, above hmF2
use std::f64::consts::{LN_10, PI};

use crate::{
    conditions::Conditions,
    constants::{Heights, ARGMAX},
    math::{eptr, hpol},
    options::TopsideVariant,
    peak::PeakParameters,
};

/// Highest L value used by the TTS correction
const TTS_MAX_L_SHELL: f64 = 10.0;

/// Exponential correction of the Booker profile
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct TopsideCorrection {
    /// Correction starts at this height (km)
    pub hcor1: f64,
    /// log10 correction per km
    pub tc3: f64,
}

/// Booker type topside (IRI-2001)
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct BookerTopside {
    pub nmf2: f64,
    pub hmf2: f64,
    pub eta: f64,
    pub zeta: f64,
    pub beta: f64,
    pub delta: f64,
    pub correction: Option<TopsideCorrection>,
}

impl BookerTopside {
    pub fn new(cond: &Conditions, peaks: &PeakParameters) -> Self {
        let mlat = cond.magnetic.latitude;
        let fof2 = peaks.fof2;
        let cov = if cond.options.topside_flux_limit {
            cond.indices.covington_saturated()
        } else {
            cond.indices.covington
        };
        let cos2 = mlat.to_radians().cos().powi(2);
        let flu = (cov - 40.0) / 30.0;

        let ex = (-mlat / 15.0).exp();
        let epin = 4.0 * ex / (1.0 + ex).powi(2);
        let eta = -0.02 * epin + 0.058798 - flu * (0.014065 - 0.0069724 * cos2)
            + fof2 * (0.0024287 + 0.004281 * cos2 - 1.528E-4 * fof2);
        let zeta = 0.078922 - 0.0046702 * cos2 - flu * (0.019132 - 0.0076545 * cos2)
            + fof2 * (0.0032513 + 0.006029 * cos2 - 2.0872E-4 * fof2);
        let beta = -128.03 + 20.253 * cos2 - flu * (8.0755 + 0.65896 * cos2)
            + fof2 * (0.44041 + 0.71458 * cos2 - 0.042966 * fof2);

        let z = (94.5 / beta).exp();
        let z1 = z + 1.0;
        let z2 = z / (beta * z1 * z1);
        let delta = (eta / z1 - zeta / 2.0) / (eta * z2 + zeta / 400.0);

        let correction = if cond.options.topside == TopsideVariant::Corrected {
            Some(Self::correction(cond, peaks.hmf2))
        } else {
            None
        };

        Self {
            nmf2: peaks.nmf2,
            hmf2: peaks.hmf2,
            eta,
            zeta,
            beta,
            delta,
            correction,
        }
    }
    fn correction(cond: &Conditions, hmf2: f64) -> TopsideCorrection {
        let modip = cond.magnetic.modip;
        let f = &cond.solar.f;
        let bell = |x: f64| x / (1.0 + x).powi(2);
        let zmp1 = bell((modip / 10.0).exp());
        let zmp2 = bell((modip / 19.0).exp());
        let sp = |day: f64, night: f64| hpol(cond.local_hour, day, night, f.sunrise, f.sunset, 1.0, 1.0);
        let r2 = sp(-0.84 - 0.64 * zmp1, -0.84 - 1.6 * zmp1);
        let x1 = sp(550.0 - 1900.0 * zmp2, 230.0 - 700.0 * zmp2);
        TopsideCorrection {
            hcor1: hmf2 + x1,
            tc3: r2 / (1500.0 - x1),
        }
    }
    pub fn density(&self, height: f64) -> f64 {
        let dxdh = (1000.0 - self.hmf2) / 700.0;
        let x0 = 300.0 - self.delta;
        let xmx0 = (height - self.hmf2) / dxdh;
        let x = xmx0 + x0;
        let eptr1 = eptr(x, self.beta, 394.5) - eptr(x0, self.beta, 394.5);
        let eptr2 = eptr(x, 100.0, 300.0) - eptr(x0, 100.0, 300.0);
        let y = (dxdh * (self.beta * self.eta * eptr1 + self.zeta * (100.0 * eptr2 - xmx0)))
            .clamp(-ARGMAX, ARGMAX);
        let tcor = match self.correction {
            Some(c) if height > c.hcor1 => c.tc3 * (height - c.hcor1) * LN_10,
            _ => 0.0,
        };
        self.nmf2 * (-y + tcor).exp()
    }
}

/// NeQuick topside, thickness recomputed from foF2, M(3000)F2 and hmF2
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct NeQuickTopside {
    pub nmf2: f64,
    pub hmf2: f64,
    pub b2top: f64,
}

impl NeQuickTopside {
    pub fn new(peaks: &PeakParameters, rz12: f64) -> Self {
        let (fof2, hmf2) = (peaks.fof2, peaks.hmf2);
        let dndhmx = 0.01 * (-3.467 + 1.714 * fof2.ln() + 2.02 * peaks.m3000.ln()).exp();
        let b2bot = 0.04774 * fof2 * fof2 / dndhmx;
        let b2k = 3.22 - 0.0538 * fof2 - 0.00664 * hmf2 + 0.113 * hmf2 / b2bot + 0.00257 * rz12;
        let ee = (2.0 * (b2k - 1.0)).exp();
        let b2k = (b2k * ee + 1.0) / (ee + 1.0);
        Self {
            nmf2: peaks.nmf2,
            hmf2,
            b2top: b2k * b2bot,
        }
    }
    pub fn density(&self, height: f64) -> f64 {
        const R: f64 = 100.0;
        const G: f64 = 0.125;
        let dh = height - self.hmf2;
        let z = dh / (self.b2top * (1.0 + R * G * dh / (R * self.b2top + G * dh)));
        if z > 40.0 {
            return 4.0 * self.nmf2 * (-z).exp();
        }
        let ee = z.exp();
        4.0 * self.nmf2 * ee / (1.0 + ee).powi(2)
    }
}

/// Simplified approximation of the TTS topside: Booker profile replaced
/// above 400 km by a plasmasphere type decay, whose scale height depends
/// on local time, daily flux and L-shell. It does not carry the published
/// TTS coefficients.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct TtsTopside {
    pub booker: BookerTopside,
    /// Density at the anchor height (m⁻³)
    pub anchor_density: f64,
    /// Scale height at the anchor height (km)
    pub scale_height: f64,
}

impl TtsTopside {
    pub fn new(cond: &Conditions, booker: BookerTopside) -> Self {
        let f107 = cond.indices.f107_daily;
        let diurnal = (PI * (cond.local_hour - 14.0) / 12.0).cos();
        Self {
            anchor_density: booker.density(Heights::TTS_TOPSIDE_BOTTOM),
            scale_height: 55.0 + 0.15 * (f107 - 70.0).max(0.0) + 15.0 * diurnal,
            booker,
        }
    }
    /// Density above 400 km, `l_shell` being the L value at that height
    pub fn density(&self, height: f64, l_shell: f64) -> f64 {
        let l_shell = l_shell.clamp(1.0, TTS_MAX_L_SHELL);
        // scale height growth rate, smaller on the outer shells
        let g = 0.05 + 0.15 / l_shell;
        let dh = height - Heights::TTS_TOPSIDE_BOTTOM;
        self.anchor_density * (1.0 + g * dh / self.scale_height).powf(-1.0 / g)
    }
}

/// Topside profile, one per variant
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Topside {
    Booker(BookerTopside),
    NeQuick(NeQuickTopside),
    Tts(TtsTopside),
}

impl Topside {
    pub fn new(cond: &Conditions, peaks: &PeakParameters) -> Self {
        match cond.options.topside {
            TopsideVariant::Legacy | TopsideVariant::Corrected => {
                Self::Booker(BookerTopside::new(cond, peaks))
            },
            TopsideVariant::NeQuick => Self::NeQuick(NeQuickTopside::new(peaks, cond.indices.rz12)),
            TopsideVariant::Tts => Self::Tts(TtsTopside::new(cond, BookerTopside::new(cond, peaks))),
        }
    }
    /// True when [Self::density] expects the L value at this height
    pub fn needs_l_shell(&self, height: f64) -> bool {
        matches!(self, Self::Tts(_)) && height >= Heights::TTS_TOPSIDE_BOTTOM
    }
    /// Density (m⁻³) at or above hmF2. The TTS variant falls back to
    /// the Booker profile when no L value is provided.
    pub fn density(&self, height: f64, l_shell: Option<f64>) -> f64 {
        match self {
            Self::Booker(booker) => booker.density(height),
            Self::NeQuick(nequick) => nequick.density(height),
            Self::Tts(tts) => match l_shell {
                Some(l) if height >= Heights::TTS_TOPSIDE_BOTTOM => tts.density(height, l),
                _ => tts.booker.density(height),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{conditions::fixture::conditions, peak::F2MapValues};

    fn topside(variant: TopsideVariant, hour: f64) -> (PeakParameters, Topside) {
        let mut cond = conditions(40.0, -75.0, 172, hour, 50.0);
        cond.options.topside = variant;
        let maps = F2MapValues {
            fof2: 9.0,
            m3000: 3.0,
        };
        let peaks = PeakParameters::solve(&cond, Some(maps)).unwrap();
        let topside = Topside::new(&cond, &peaks);
        (peaks, topside)
    }

    #[test]
    fn continuity_at_peak() {
        for variant in [
            TopsideVariant::Legacy,
            TopsideVariant::Corrected,
            TopsideVariant::NeQuick,
            TopsideVariant::Tts,
        ] {
            for hour in [0.0, 12.0] {
                let (peaks, topside) = topside(variant, hour);
                let at_peak = topside.density(peaks.hmf2, Some(2.5));
                assert!((at_peak - peaks.nmf2).abs() / peaks.nmf2 < 1E-9, "{:?}", variant);
                let above = topside.density(peaks.hmf2 + 0.01, Some(2.5));
                assert!((above - peaks.nmf2).abs() / peaks.nmf2 < 1E-4, "{:?}", variant);
                for h in [600.0, 1000.0, 2000.0] {
                    let n = topside.density(h, Some(2.5));
                    assert!(n > 0.0 && n < peaks.nmf2, "{:?} {} {}", variant, h, n);
                }
            }
        }
    }
    #[test]
    fn nequick_decay() {
        let (peaks, topside) = topside(TopsideVariant::NeQuick, 12.0);
        let mut previous = peaks.nmf2;
        for h in (350..=2000).step_by(50) {
            let n = topside.density(h as f64, None);
            assert!(n < previous);
            previous = n;
        }
        match topside {
            Topside::NeQuick(nq) => assert!(nq.b2top > 10.0 && nq.b2top < 200.0, "{}", nq.b2top),
            _ => panic!("wrong variant"),
        }
    }
    #[test]
    fn tts_anchor() {
        let (_, topside) = topside(TopsideVariant::Tts, 12.0);
        assert!(topside.needs_l_shell(400.0));
        assert!(!topside.needs_l_shell(399.0));
        let Topside::Tts(tts) = topside else {
            panic!("wrong variant");
        };
        let booker = tts.booker.density(400.0);
        assert!((topside.density(400.0, Some(3.0)) - booker).abs() / booker < 1E-12);
        // without L value: plain Booker profile
        assert_eq!(topside.density(800.0, None), tts.booker.density(800.0));
        // denser plasmasphere on inner shells
        assert!(topside.density(1500.0, Some(1.5)) > topside.density(1500.0, Some(8.0)));
        assert_eq!(topside.density(1500.0, Some(40.0)), topside.density(1500.0, Some(10.0)));
    }
    #[test]
    fn corrected_topside() {
        let (peaks, corrected) = topside(TopsideVariant::Corrected, 12.0);
        let (_, legacy) = topside(TopsideVariant::Legacy, 12.0);
        let Topside::Booker(booker) = corrected else {
            panic!("wrong variant");
        };
        let hcor1 = booker.correction.unwrap().hcor1;
        assert!(hcor1 > peaks.hmf2);
        let h = hcor1 - 1.0;
        assert_eq!(corrected.density(h, None), legacy.density(h, None));
        assert_ne!(corrected.density(hcor1 + 500.0, None), legacy.density(hcor1 + 500.0, None));
    }
}
