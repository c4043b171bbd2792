//! F2 layer height and bottomside thickness
use crate::{
    epoch::Season,
    math::{epst, hpol},
};

// Bilitza et al. (1979) hmF2 terms, depending on Rz12 and dip latitude only
fn delta_m(dip_latitude: f64, rz12: f64, ratio: f64) -> f64 {
    let f1 = 0.00232 * rz12 + 0.222;
    let f2 = 1.2 - 0.0116 * (0.0239 * rz12).exp();
    let f3 = 0.096 * (rz12 - 25.0) / 150.0;
    let f4 = 1.0 - rz12 / 150.0 * (-dip_latitude * dip_latitude / 1600.0).exp();
    let x = ratio.max(1.7);
    f1 * f4 / (x - f2) + f3
}

/// hmF2 (km) from M(3000)F2, the foF2/foE ratio,
/// dip latitude (degrees) and Rz12
pub(crate) fn hmf2(dip_latitude: f64, rz12: f64, ratio: f64, m3000: f64) -> f64 {
    1490.0 / (m3000 + delta_m(dip_latitude, rz12, ratio)) - 176.0
}

/// M(3000)F2 that [hmf2] turns into given peak height
pub(crate) fn m3000(dip_latitude: f64, rz12: f64, ratio: f64, hmf2: f64) -> f64 {
    1490.0 / (hmf2 + 176.0) - delta_m(dip_latitude, rz12, ratio)
}

/// B1 shape parameter: 1.9 by day, 2.6 by night
pub(crate) fn b1(hour: f64, sunrise: f64, sunset: f64) -> f64 {
    hpol(hour, 1.9, 2.6, sunrise, sunset, 1.0, 1.0)
}

/// Gulyaeva ratio of the half density height to hmF2, from the
/// (hemisphere) seasonal day and zenith angle
pub(crate) fn gulyaeva_ratio(seasonal_day: u16, zenith: f64) -> f64 {
    let sx = 2.0 - (seasonal_day as f64 * 0.017214206).cos();
    let xs = (zenith - 20.0 * sx) / 15.0;
    0.8 - 0.2 / (1.0 + xs.exp())
}

/// Gulyaeva B0 (km): the profile reaches NmF2 / 2 at `ratio * hmF2`
pub(crate) fn gulyaeva_b0(hmf2: f64, ratio: f64, b1: f64) -> f64 {
    let bcoef = b1 * (b1 * (0.0046 * b1 - 0.0548) + 0.2546) + 0.3606;
    hmf2 * (1.0 - ratio) / bcoef
}

/// B0 table (km), indexed [equatorial/mid latitude][low/high activity][season][day/night]
const B0_TABLE: [[[[f64; 2]; 4]; 2]; 2] = [
    [
        [[114.0, 64.0], [134.0, 77.0], [128.0, 66.0], [75.0, 73.0]],
        [[113.0, 115.0], [150.0, 116.0], [138.0, 123.0], [94.0, 132.0]],
    ],
    [
        [[72.0, 84.0], [83.0, 89.0], [75.0, 85.0], [57.0, 76.0]],
        [[102.0, 100.0], [120.0, 110.0], [107.0, 103.0], [76.0, 86.0]],
    ],
];

/// Tabulated B0 (km): day/night interpolation around sunrise/sunset,
/// linear in Rz12 between 10 and 100 (saturated), Epstein blended between
/// the equatorial (|modip| < 18°) and mid latitude sets.
pub(crate) fn table_b0(
    hour: f64,
    sunrise: f64,
    sunset: f64,
    season: Season,
    rz12: f64,
    modip: f64,
) -> f64 {
    let s = season.index() - 1;
    let activity = ((rz12 - 10.0) / 90.0).clamp(0.0, 1.0);
    let zone = |z: usize| {
        let low = &B0_TABLE[z][0][s];
        let high = &B0_TABLE[z][1][s];
        let day = low[0] + (high[0] - low[0]) * activity;
        let night = low[1] + (high[1] - low[1]) * activity;
        hpol(hour, day, night, sunrise, sunset, 1.0, 1.0)
    };
    let equatorial = epst(modip, 3.0, -18.0) * (1.0 - epst(modip, 3.0, 18.0));
    zone(1) + (zone(0) - zone(1)) * equatorial
}
