//! Storm time foF2 correction
use crate::{epoch::Season, indices::AP_HISTORY_LEN};

/// Weighted ap below which no correction applies
const QUIET_AP: f64 = 20.0;

/// e-folding time of the ap history weights (hours)
const MEMORY_HOURS: f64 = 12.0;

/// Response per 100 units of weighted ap, by hemisphere season (summer,
/// winter, equinox) and absolute geomagnetic latitude band (0-20°, 20-40°,
/// 40-60°, above 60°)
const RESPONSE: [[f64; 4]; 3] = [
    [0.05, -0.15, -0.35, -0.45],
    [0.15, 0.05, -0.10, -0.25],
    [0.10, -0.05, -0.25, -0.35],
];

/// Time weighted ap: each 3-hour slot weighs exp(-age / 12 h)
pub(crate) fn weighted_ap(ap: &[f64; AP_HISTORY_LEN]) -> f64 {
    let (sum, norm) = ap
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, norm), (slot, ap)| {
            let w = (-3.0 * slot as f64 / MEMORY_HOURS).exp();
            (sum + w * ap, norm + w)
        });
    sum / norm
}

/// foF2 storm ratio from the ap history (most recent first), geomagnetic
/// latitude (degrees) and hemisphere season. 1.0 in quiet conditions,
/// always within [0.2, 1.6].
pub(crate) fn storm_ratio(ap: &[f64; AP_HISTORY_LEN], mlat: f64, local_season: Season) -> f64 {
    let apw = weighted_ap(ap);
    if apw <= QUIET_AP {
        return 1.0;
    }
    let season = match local_season {
        Season::Summer => 0,
        Season::Winter => 1,
        Season::Spring | Season::Autumn => 2,
    };
    let band = ((mlat.abs() / 20.0) as usize).min(3);
    (1.0 + RESPONSE[season][band] * (apw - QUIET_AP) / 100.0).clamp(0.2, 1.6)
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn quiet_time() {
        assert_eq!(storm_ratio(&[5.0; 13], 50.0, Season::Summer), 1.0);
        assert!((weighted_ap(&[7.0; 13]) - 7.0).abs() < 1E-12);
    }
    #[test]
    fn storm_time() {
        let ratio = storm_ratio(&[120.0; 13], 50.0, Season::Summer);
        assert!((ratio - 0.65).abs() < 1E-9, "ratio {}", ratio);
        // positive phase at low latitudes in winter
        assert!(storm_ratio(&[120.0; 13], 10.0, Season::Winter) > 1.0);
        assert_eq!(storm_ratio(&[400.0; 13], 70.0, Season::Summer), 0.2);
        // recent activity dominates
        let mut recent = [0.0; 13];
        recent[0] = 200.0;
        let mut old = [0.0; 13];
        old[12] = 200.0;
        assert!(weighted_ap(&recent) > weighted_ap(&old));
    }
}
