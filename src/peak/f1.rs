//! F1 layer: critical frequency, shape and occurrence
use std::f64::consts::PI;

/// Occurrence probabilities of the F1 layer
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct F1Probabilities {
    /// Legacy rule: 1 when day time with foF1 > 0 (or user foF1), 0 otherwise
    pub legacy: f64,
    /// Scotto et al. probability
    pub probability: f64,
    /// Scotto et al. probability, including the L condition
    pub with_l: f64,
}

/// foF1 (MHz) after Ducharme et al., from absolute dip latitude,
/// Rz12 and zenith angle (degrees). Zero at night, negative when the
/// zenith angle exceeds the F1 cutoff angle.
pub(crate) fn fof1(abs_dip_latitude: f64, rz12: f64, zenith: f64) -> f64 {
    if zenith > 90.0 {
        return 0.0;
    }
    let dla = abs_dip_latitude;
    let f0 = 4.35 + dla * (0.0058 - 1.2E-4 * dla);
    let f100 = 5.348 + dla * (0.011 - 2.3E-4 * dla);
    let fs = f0 + (f100 - f0) * rz12 / 100.0;
    let xmue = 0.093 + dla * (0.0046 - 5.4E-5 * dla) + 3.0E-4 * rz12;
    let fof1 = fs * zenith.to_radians().cos().powf(xmue);

    let chi0 = 49.84733 + 0.349504 * dla;
    let chi100 = 38.96113 + 0.509932 * dla;
    let chim = chi0 + (chi100 - chi0) * rz12 / 100.0;
    if zenith > chim {
        -fof1
    } else {
        fof1
    }
}

/// F1 shape parameter C1 (Reinisch & Huang)
pub(crate) fn c1(modip: f64, hour: f64, sunset: f64, sunrise: f64) -> f64 {
    let abs_modip = modip.abs();
    let dela = if abs_modip >= 18.0 {
        1.0 + (-(abs_modip - 30.0) / 10.0).exp()
    } else {
        4.32
    };
    let c1_old = 0.09 + 0.11 / dela;
    let c1 = if sunset == sunrise {
        2.5 * c1_old
    } else {
        2.5 * c1_old * ((hour - 12.0) / (sunset - sunrise) * PI).cos()
    };
    c1.max(0.0)
}

/// Scotto et al. F1 occurrence probabilities (without, with the L condition)
/// from zenith angle, geomagnetic latitude (degrees) and Rz12
pub(crate) fn probability(zenith: f64, mlat: f64, rz12: f64) -> (f64, f64) {
    let xarg = 0.5 + 0.5 * zenith.to_radians().cos();
    let a = 2.98 + 0.0854 * rz12;
    let b = 0.0107 - 0.0022 * rz12;
    let c = -0.000256 + 0.0000147 * rz12;
    let gamma = a + (b + c * mlat) * mlat;
    let cut = |p: f64| if p < 1.0E-4 { 0.0 } else { p };
    (cut(xarg.powf(gamma)), cut(xarg.powf(0.8 * gamma)))
}
