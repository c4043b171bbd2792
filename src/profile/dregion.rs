//! D region models
use crate::{
    conditions::Conditions,
    math::hpol,
    peak::PeakParameters,
};

/// Exponent limit of the D to E transition
const XKK_MAX: f64 = 5.0;

/// Standard D region: exponential polynomial around hmD,
/// then a power law joining the E peak.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DRegion {
    pub nmd: f64,
    pub hmd: f64,
    pub nme: f64,
    pub hme: f64,
    /// Junction height of both formulas
    pub hdx: f64,
    fp1: f64,
    fp2: f64,
    fp3_above: f64,
    fp3_below: f64,
    d1: f64,
    xkk: f64,
}

impl DRegion {
    pub fn new(cond: &Conditions, peaks: &PeakParameters) -> Self {
        let hour = cond.local_hour;
        let d = &cond.solar.d;
        let dp = |day: f64, night: f64| hpol(hour, day, night, d.sunrise, d.sunset, 1.0, 1.0);
        let f0 = dp(0.03 / cond.dela() + 0.02, 0.05);
        let f1 = dp(4.6, 4.5);
        let f2 = dp(-11.5, -4.0);

        let fp1 = f0;
        let fp2 = -fp1 * fp1 / 2.0;
        let fp3_above = (-f1 * fp2 - fp1 + 1.0 / f1) / (f1 * f1);
        let fp3_below = (-f2 * fp2 - fp1 - 1.0 / f2) / (f2 * f2);

        let (nmd, hmd, nme, hme) = (peaks.nmd, peaks.hmd, peaks.nme, peaks.hme);
        let hdx = hmd + f1;

        // the power law meets the polynomial at hdx, with the same slope
        let x = hdx - hmd;
        let xdx = nmd * (x * (fp1 + x * (fp2 + x * fp3_above))).exp();
        let dxdx = xdx * (fp1 + x * (2.0 * fp2 + 3.0 * x * fp3_above));
        let x = hme - hdx;
        let ln = (xdx / nme).ln();
        let mut xkk = -dxdx * x / (xdx * ln);
        let d1 = if xkk > XKK_MAX || !xkk.is_finite() || xkk <= 0.0 {
            xkk = XKK_MAX;
            -ln / x.powf(xkk)
        } else {
            dxdx / (xdx * xkk * x.powf(xkk - 1.0))
        };

        Self {
            nmd,
            hmd,
            nme,
            hme,
            hdx,
            fp1,
            fp2,
            fp3_above,
            fp3_below,
            d1,
            xkk,
        }
    }
    /// Density (m⁻³) below hmE
    pub fn density(&self, height: f64) -> f64 {
        if height > self.hdx {
            return self.nme * (-self.d1 * (self.hme - height).powf(self.xkk)).exp();
        }
        let z = height - self.hmd;
        let fp3 = if z > 0.0 {
            self.fp3_above
        } else {
            self.fp3_below
        };
        self.nmd * (z * (self.fp1 + z * (self.fp2 + z * fp3))).exp()
    }
}

/// FIRI type D and E region densities (log10 m⁻³), from 60 to 140 km,
/// for overhead sun and night conditions
const FIRI_HEIGHTS: [f64; 13] = [
    60.0, 65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 100.0, 110.0, 120.0, 130.0, 140.0,
];
const FIRI_DAY: [f64; 13] = [
    8.3, 8.6, 8.9, 9.15, 9.45, 9.75, 10.1, 10.5, 10.9, 11.15, 11.12, 11.1, 11.1,
];
const FIRI_NIGHT: [f64; 13] = [
    6.3, 6.5, 6.7, 6.9, 7.2, 7.6, 8.0, 8.4, 8.8, 9.3, 9.4, 9.5, 9.6,
];

/// FIRI type density (m⁻³) at given height, zenith angle (degrees) and
/// daily F10.7. None outside 60..140 km.
pub(crate) fn firi(height: f64, zenith: f64, f107: f64) -> Option<f64> {
    let first = FIRI_HEIGHTS[0];
    let last = FIRI_HEIGHTS[FIRI_HEIGHTS.len() - 1];
    if !(first..=last).contains(&height) {
        return None;
    }
    let i = FIRI_HEIGHTS
        .windows(2)
        .position(|w| height <= w[1])
        .unwrap_or(FIRI_HEIGHTS.len() - 2);
    let (h0, h1) = (FIRI_HEIGHTS[i], FIRI_HEIGHTS[i + 1]);
    let lerp = |table: &[f64; 13]| table[i] + (table[i + 1] - table[i]) * (height - h0) / (h1 - h0);

    let sun = if zenith < 90.0 {
        zenith.to_radians().cos().sqrt()
    } else {
        0.0
    };
    let flux = 0.5 * (f107.max(60.0) / 75.0).log10();
    let log = lerp(&FIRI_NIGHT) + (lerp(&FIRI_DAY) - lerp(&FIRI_NIGHT) + flux) * sun;
    Some(10.0_f64.powf(log))
}

/// Danilov et al. (1995) heights (km)
const DANILOV_HEIGHTS: usize = 7;

const DANILOV_DAY: [f64; DANILOV_HEIGHTS] = [1.3, 1.8, 2.2, 2.6, 3.0, 3.5, 4.0];
const DANILOV_TWILIGHT: [f64; DANILOV_HEIGHTS] = [0.3, 0.7, 1.1, 1.5, 2.0, 2.6, 3.2];

/// Danilov type D region, log10 densities (cm⁻³) at 60, 65, .. 90 km,
/// for given zenith angle, month, daily F10.7, stratospheric
/// warming `sw` and winter anomaly `wa` knobs (both in [0, 1]).
pub(crate) fn danilov(zenith: f64, month: u8, f107: f64, sw: f64, wa: f64) -> [f64; DANILOV_HEIGHTS] {
    let sun = zenith.to_radians().cos().max(0.0);
    let season = 0.1 * (2.0 * std::f64::consts::PI * (month as f64 - 1.0) / 12.0).cos();
    let flux = 0.2 * (f107.max(60.0) / 75.0).log10();
    let mut elg = [0.0; DANILOV_HEIGHTS];
    for (i, elg) in elg.iter_mut().enumerate() {
        // warming and anomaly effects fade toward 90 km
        let lower = 1.0 - i as f64 / DANILOV_HEIGHTS as f64;
        *elg = DANILOV_TWILIGHT[i]
            + (DANILOV_DAY[i] - DANILOV_TWILIGHT[i]) * sun
            + flux * (i as f64 / 6.0)
            + season
            + 0.3 * sw * lower
            + 0.5 * wa * lower;
    }
    elg
}

/// Number of diagnostic heights (60 to 110 km, every 5 km)
pub const DIAGNOSTIC_HEIGHTS: usize = 11;

/// Danilov knob combinations (SW, WA)
pub const DANILOV_KNOBS: [(f64, f64); 5] = [(0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (0.0, 0.5), (0.0, 1.0)];

/// D region densities (m⁻³) at 60, 65, .. 110 km, by model.
/// `None` where a model is not defined.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DRegionDiagnostics {
    /// Standard model (from 65 km)
    pub standard: [Option<f64>; DIAGNOSTIC_HEIGHTS],
    /// FIRI type model
    pub firi: [Option<f64>; DIAGNOSTIC_HEIGHTS],
    /// Danilov et al. model (60 to 90 km), one row per [DANILOV_KNOBS] entry
    pub danilov: [[Option<f64>; DIAGNOSTIC_HEIGHTS]; 5],
}

impl DRegionDiagnostics {
    /// Diagnostic heights (km)
    pub fn heights() -> impl Iterator<Item = f64> {
        (0..DIAGNOSTIC_HEIGHTS).map(|i| 60.0 + 5.0 * i as f64)
    }
    pub(crate) fn new(cond: &Conditions, d_region: &DRegion, below_e: impl Fn(f64) -> f64) -> Self {
        let zenith = cond.zenith();
        let f107 = cond.indices.f107_daily;
        let mut diag = Self::default();
        for (i, h) in Self::heights().enumerate() {
            if h >= 65.0 {
                diag.standard[i] = Some(if h < d_region.hme {
                    d_region.density(h)
                } else {
                    below_e(h)
                });
            }
            diag.firi[i] = firi(h, zenith, f107);
        }
        for (row, (sw, wa)) in DANILOV_KNOBS.iter().enumerate() {
            let elg = danilov(zenith, cond.month, f107, *sw, *wa);
            for (i, elg) in elg.iter().enumerate() {
                diag.danilov[row][i] = Some(10.0_f64.powf(elg + 6.0));
            }
        }
        diag
    }
}
