//! Spread-F occurrence probability.
//! Simplified analytic approximation of the Brazilian sector occurrence
//! tables, not the published table values.
use std::f64::consts::PI;

use crate::conditions::Conditions;

/// Number of half hour slots, from 17:45 to 06:15 LT
pub(crate) const SLOTS: usize = 25;

/// First slot start (LT hours)
const FIRST_SLOT: f64 = 17.75;

/// Day time hours without spread-F
const DAY_TIME: (f64, f64) = (7.25, 17.75);

/// Modelled latitude band (degrees)
const MAX_LATITUDE: f64 = 25.0;

/// Occurrence probability (0..=1) for every half hour slot. Peaks
/// before midnight, in the December season and at high solar flux,
/// decreasing away from the equator.
pub(crate) fn occurrence(doy: u16, days_in_year: u16, f107: f64, latitude: f64) -> [f64; SLOTS] {
    let seasonal = 0.55 + 0.45 * (2.0 * PI * (doy as f64 - 355.0) / days_in_year as f64).cos();
    let activity = (0.3 + f107 / 250.0).min(1.0);
    let latitudinal = 1.0 - 0.5 * (latitude.abs() / MAX_LATITUDE).min(1.0);
    let mut slots = [0.0; SLOTS];
    for (i, slot) in slots.iter_mut().enumerate() {
        let center = FIRST_SLOT + 0.5 * i as f64 + 0.25;
        let diurnal = (-((center - 22.5) / 2.5).powi(2)).exp();
        *slot = (seasonal * activity * latitudinal * diurnal).clamp(0.0, 1.0);
    }
    slots
}

/// Slot index of given local hour, hours after midnight
/// belonging to the previous evening
pub(crate) fn slot(hour: f64) -> Option<usize> {
    let hour = if hour < 12.0 { hour + 24.0 } else { hour };
    let index = ((hour - FIRST_SLOT) / 0.5) as i32;
    if hour >= FIRST_SLOT && (index as usize) < SLOTS {
        Some(index as usize)
    } else {
        None
    }
}

/// Spread-F probability of this request, if enabled, at night time
/// and at low latitude
pub(crate) fn probability(cond: &Conditions) -> Option<f64> {
    let hour = cond.local_hour;
    if !cond.options.spread_f || (hour > DAY_TIME.0 && hour < DAY_TIME.1) {
        return None;
    }
    if cond.latitude.abs() > MAX_LATITUDE {
        return None;
    }
    let slots = occurrence(
        cond.doy,
        cond.days_in_year,
        cond.indices.f107_daily,
        cond.latitude,
    );
    slot(hour).map(|i| slots[i])
}
