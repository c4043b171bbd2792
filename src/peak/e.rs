//! E and D region peaks

/// foE (MHz) from the Edinburgh (Kouris-Muggeleton) formula, with
/// its night time floor. `cov` is the 12-month mean F10.7,
/// `zenith` and `noon_zenith` in degrees, `abs_lat` the absolute
/// geographic latitude.
pub(crate) fn foe_edinburgh(cov: f64, zenith: f64, noon_zenith: f64, abs_lat: f64) -> f64 {
    let a = 1.0 + 0.0094 * (cov - 66.0);
    let sl = abs_lat.to_radians().cos();
    let (sm, c) = if abs_lat < 32.0 {
        (-1.93 + 1.92 * sl, 23.0 + 116.0 * sl)
    } else {
        (0.11 - 0.49 * sl, 92.0 + 35.0 * sl)
    };

    let noon = noon_zenith.min(89.999);
    let b = noon.to_radians().cos().powf(sm);

    let sp = if abs_lat > 12.0 { 1.2 } else { 1.31 };
    // smooth transition through the terminator
    let xhic = zenith - 3.0 * (1.0 + ((zenith - 89.98) / 3.0).exp()).ln();
    let d = xhic.to_radians().cos().powf(sp);

    let floor = (0.121 + 0.0015 * (cov - 60.0)).powi(2);
    let abcd = a * b * c * d;
    abcd.max(floor).powf(0.25)
}

/// NmD (m⁻³) for given zenith angle (degrees) and Rz12,
/// never below the night value `floor`
pub(crate) fn nmd(zenith: f64, rz12: f64, floor: f64) -> f64 {
    if zenith >= 90.0 {
        return floor;
    }
    let y = 6.05E8 + 0.088E8 * rz12;
    let cosx = zenith.to_radians().cos();
    let arg = -0.1 / cosx.powf(2.7);
    let nmd = if arg < -40.0 { 0.0 } else { y * arg.exp() };
    nmd.max(floor)
}
