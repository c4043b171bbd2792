//! Epstein family of step, transition and layer functions
use crate::constants::ARGMAX;

/// Epstein step function: smooth transition from 0 to 1
/// centered on `hx` with `sc` thickness.
pub(crate) fn epst(x: f64, sc: f64, hx: f64) -> f64 {
    let d1 = (x - hx) / sc;
    if d1.abs() < ARGMAX {
        1.0 / (1.0 + (-d1).exp())
    } else if d1 > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Epstein transition function: integral of [epst]
pub(crate) fn eptr(x: f64, sc: f64, hx: f64) -> f64 {
    let d1 = (x - hx) / sc;
    if d1.abs() < ARGMAX {
        (1.0 + d1.exp()).ln()
    } else if d1 > 0.0 {
        d1
    } else {
        0.0
    }
}

/// Epstein layer function: derivative of [epst]
pub(crate) fn epla(x: f64, sc: f64, hx: f64) -> f64 {
    let d1 = (x - hx) / sc;
    if d1.abs() < ARGMAX {
        let d0 = d1.exp();
        let d2 = 1.0 + d0;
        d0 / (d2 * d2)
    } else {
        0.0
    }
}

/// Step from `y1` to `y2`
pub(crate) fn epstep(y2: f64, y1: f64, sc: f64, hx: f64, x: f64) -> f64 {
    y1 + (y2 - y1) * epst(x, sc, hx)
}

/// Rawer layer function, zero with zero slope at `xm`
pub(crate) fn rlay(x: f64, xm: f64, sc: f64, hx: f64) -> f64 {
    let y1 = eptr(x, sc, hx);
    let y1m = eptr(xm, sc, hx);
    let y2m = epst(xm, sc, hx);
    y1 - y1m - (x - xm) * y2m / sc
}

/// First derivative of [rlay]
pub(crate) fn d1lay(x: f64, xm: f64, sc: f64, hx: f64) -> f64 {
    (epst(x, sc, hx) - epst(xm, sc, hx)) / sc
}

/// Second derivative of [rlay]
pub(crate) fn d2lay(x: f64, _xm: f64, sc: f64, hx: f64) -> f64 {
    epla(x, sc, hx) / sc / sc
}

/// Smooth day/night interpolation of a parameter.
/// Switches from `night` to `day` at `sunrise` (transition `dsa`)
/// and back at `sunset` (transition `dsu`).
/// Polar day or night (sunrise sentinel beyond ±25h) selects
/// the value directly.
pub(crate) fn hpol(
    hour: f64,
    day: f64,
    night: f64,
    sunrise: f64,
    sunset: f64,
    dsa: f64,
    dsu: f64,
) -> f64 {
    if sunset.abs() > 25.0 {
        if sunset > 0.0 {
            day
        } else {
            night
        }
    } else {
        night + (day - night) * epst(hour, dsa, sunrise) + (night - day) * epst(hour, dsu, sunset)
    }
}
