//! Model constants

/// Maximal number of altitude points per profile.
/// Excess grid points are silently dropped.
pub const MAX_GRID_POINTS: usize = 500;

/// Argument limit of exponential terms
pub(crate) const ARGMAX: f64 = 88.0;

/// Plasma frequency (MHz) to peak density (m⁻³) conversion
pub(crate) struct Plasma;

impl Plasma {
    /// Nm = FACTOR * fo²
    pub const FACTOR: f64 = 1.24E10;
    /// Values below this threshold are plasma frequencies, not densities
    pub const FREQUENCY_BOUND: f64 = 100.0;

    pub fn density(fo_mhz: f64) -> f64 {
        Self::FACTOR * fo_mhz * fo_mhz
    }

    pub fn frequency(nm: f64) -> f64 {
        (nm / Self::FACTOR).sqrt()
    }
}

/// Reference heights (km)
pub(crate) struct Heights;

impl Heights {
    pub const E_PEAK: f64 = 110.0;
    pub const D_REFERENCE: f64 = 70.0;
    pub const F1_REFERENCE: f64 = 200.0;
    pub const F_REFERENCE: f64 = 300.0;
    pub const DENSITY_BOTTOM_DAY: f64 = 65.0;
    pub const DENSITY_BOTTOM_NIGHT: f64 = 80.0;
    pub const DENSITY_TOP: f64 = 2000.0;
    pub const TEMPERATURE_BOTTOM: f64 = 120.0;
    pub const ION_BOTTOM: f64 = 100.0;
    pub const ION_BOTTOM_DS95: f64 = 75.0;
    pub const ION_TOP: f64 = 2000.0;
    pub const SPECIAL_D_REGION_TOP: f64 = 140.0;
    pub const TTS_TOPSIDE_BOTTOM: f64 = 400.0;
    pub const TI_ANCHOR: f64 = 430.0;
}

/// Root finder tolerances (km)
pub(crate) struct Tolerance;

impl Tolerance {
    /// hmF1 search
    pub const HMF1: f64 = 0.001;
    /// intermediate region boundary search
    pub const BOUNDARY: f64 = 0.001;
    /// Ti/Tn transition height search
    pub const TRANSITION: f64 = 0.01;
}

pub(crate) struct MaxIterNumber;

impl MaxIterNumber {
    /// Maximum number of regula falsi iterations
    pub const REGULA_FALSI: usize = 200;
    /// Maximum number of 1 km steps when lowering the F1 search height
    pub const HEF_DESCENT: usize = 1000;
    /// Maximum number of valley/F1 search rounds
    pub const F1_SEARCH: usize = 3;
    /// Maximum number of O+/O2+ gradient adjustments
    pub const ION_ADJUSTMENT: usize = 2000;
}

/// Earth related constants
pub(crate) struct Earth;

impl Earth {
    /// Mean radius (km)
    pub const RADIUS_KM: f64 = 6371.2;
    /// Dipole moment (gauss)
    pub const DIPOLE_MOMENT: f64 = 0.311653;
}

/// Speed of light (m/s)
pub(crate) const SPEED_OF_LIGHT: f64 = 299_792_458.0;
