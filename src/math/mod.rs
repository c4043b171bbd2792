//! Analytic building blocks shared by all sub-models
mod epstein;
mod regula_falsi;

pub(crate) use epstein::{d1lay, d2lay, epla, epst, epstep, eptr, hpol, rlay};
pub(crate) use regula_falsi::regula_falsi;
