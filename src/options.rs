//! Model configuration
use bitflags::bitflags;
use strum::{Display, EnumString};

use crate::constants::Plasma;

/// foF2 (and M(3000)F2) coefficient family
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum F2MapFamily {
    /// CCIR 1967 maps
    #[strum(serialize = "ccir", serialize = "CCIR")]
    Ccir,
    /// URSI 1988 maps (foF2 only, M(3000)F2 remains CCIR)
    #[default]
    #[strum(serialize = "ursi", serialize = "URSI")]
    Ursi,
}

/// Bottomside thickness (B0) method
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BottomsideThickness {
    /// Bilitza B0 table
    #[default]
    #[strum(serialize = "table")]
    Table,
    /// Gulyaeva half density height
    #[strum(serialize = "gulyaeva")]
    Gulyaeva,
}

/// Bottomside formalism
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BottomsideVariant {
    /// Closed form E, valley, F1 and F2 segments
    #[default]
    #[strum(serialize = "analytic")]
    Analytic,
    /// Superposition of 4 Epstein type layers
    #[strum(serialize = "lay", serialize = "layer")]
    Layer,
}

/// Topside formula
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TopsideVariant {
    /// Booker type profile (IRI-2001)
    #[strum(serialize = "legacy")]
    Legacy,
    /// Legacy profile with an exponential correction term
    #[strum(serialize = "corrected")]
    Corrected,
    /// NeQuick topside
    #[default]
    #[strum(serialize = "nequick")]
    NeQuick,
    /// Legacy profile corrected above 400 km with a simplified
    /// TTS type plasmaspheric decay
    #[strum(serialize = "tts")]
    Tts,
}

/// F1 layer occurrence rule
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum F1Occurrence {
    /// Scotto et al. probability, F1 when probability >= 0.5
    #[default]
    #[strum(serialize = "probability")]
    Probability,
    /// Same, including the L condition
    #[strum(serialize = "probability-l")]
    ProbabilityWithL,
    /// F1 whenever sun is up and foF1 > 0
    #[strum(serialize = "legacy")]
    Legacy,
}

/// Electron temperature model at the reference heights
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElectronTemperatureModel {
    /// Brace and Theis: 300, 400, 600, 1400 and 3000 km
    #[strum(serialize = "brace-theis")]
    BraceTheis,
    /// Intercosmos: 300, 550, 900, 1500 and 2500 km
    #[default]
    #[strum(serialize = "intercosmos")]
    Intercosmos,
}

/// Ion composition model
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IonCompositionModel {
    /// Danilov-Semenov 1978 / Danilov-Yaichnikov 1985
    #[strum(serialize = "ds78")]
    Ds78,
    /// Danilov-Smirnova 1995 / Triskova-Truhlik-Smilauer 2003
    #[default]
    #[strum(serialize = "ds95")]
    Ds95,
}

/// Ion density units
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IonUnits {
    /// Percentage of electron density
    #[default]
    #[strum(serialize = "percent")]
    Percent,
    /// m⁻³
    #[strum(serialize = "absolute")]
    Absolute,
}

/// D region model
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DRegionVariant {
    /// Bottomside formula extended downward
    #[default]
    #[strum(serialize = "standard")]
    Standard,
    /// FIRI below 140 km, plus Danilov diagnostics
    #[strum(serialize = "special")]
    Special,
}

/// Magnetic field model selection, forwarded to the geomagnetic resolver
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldModel {
    #[default]
    #[strum(serialize = "current")]
    Current,
    /// Older (1975 epoch) field model
    #[strum(serialize = "legacy")]
    Legacy,
}

fn default_true() -> bool {
    true
}

/// [ModelOptions] selects one variant per sub-model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelOptions {
    /// Compute electron density
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub density: bool,
    /// Compute plasma temperatures
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub temperatures: bool,
    /// Compute ion composition
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub ions: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub f2_map: F2MapFamily,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bottomside_thickness: BottomsideThickness,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bottomside: BottomsideVariant,
    #[cfg_attr(feature = "serde", serde(default))]
    pub topside: TopsideVariant,
    /// Limits the solar flux used by the topside formula (188 flux units)
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub topside_flux_limit: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub f1_occurrence: F1Occurrence,
    #[cfg_attr(feature = "serde", serde(default))]
    pub electron_temperature: ElectronTemperatureModel,
    /// Uses the Te(Ne) correlation at 300 and 400 km, whenever densities are provided
    #[cfg_attr(feature = "serde", serde(default))]
    pub te_ne_correlation: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ion_composition: IonCompositionModel,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ion_units: IonUnits,
    #[cfg_attr(feature = "serde", serde(default))]
    pub d_region: DRegionVariant,
    #[cfg_attr(feature = "serde", serde(default))]
    pub field: FieldModel,
    /// Storm time foF2 correction
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub storm: bool,
    /// Equatorial vertical ion drift
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub drift: bool,
    /// Spread-F occurrence probability
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub spread_f: bool,
    /// Model messages (requires the "log" feature)
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub messages: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            density: true,
            temperatures: true,
            ions: true,
            f2_map: Default::default(),
            bottomside_thickness: Default::default(),
            bottomside: Default::default(),
            topside: Default::default(),
            topside_flux_limit: true,
            f1_occurrence: Default::default(),
            electron_temperature: Default::default(),
            te_ne_correlation: false,
            ion_composition: Default::default(),
            ion_units: Default::default(),
            d_region: Default::default(),
            field: Default::default(),
            storm: true,
            drift: true,
            spread_f: true,
            messages: true,
        }
    }
}

/// Peak density override
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeakDensity {
    /// Critical frequency (MHz)
    Frequency(f64),
    /// Peak density (m⁻³)
    Density(f64),
}

impl PeakDensity {
    /// Interprets a raw value: values below 100 are critical frequencies
    pub fn from_raw(value: f64) -> Self {
        if value < Plasma::FREQUENCY_BOUND {
            Self::Frequency(value)
        } else {
            Self::Density(value)
        }
    }
    /// Peak density (m⁻³)
    pub fn density(&self) -> f64 {
        match self {
            Self::Frequency(fo) => Plasma::density(*fo),
            Self::Density(nm) => *nm,
        }
    }
    /// Critical frequency (MHz)
    pub fn frequency(&self) -> f64 {
        match self {
            Self::Frequency(fo) => *fo,
            Self::Density(nm) => Plasma::frequency(*nm),
        }
    }
}

/// F2 peak height override
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum F2Height {
    /// Peak height (km)
    Height(f64),
    /// Propagation factor M(3000)F2, hmF2 then derives from it
    M3000(f64),
}

impl F2Height {
    /// Interprets a raw value: values below 50 are M(3000)F2 factors
    pub fn from_raw(value: f64) -> Self {
        if value < 50.0 {
            Self::M3000(value)
        } else {
            Self::Height(value)
        }
    }
}

/// User supplied values, taking precedence over the model
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserOverrides {
    pub f2_peak: Option<PeakDensity>,
    pub f2_height: Option<F2Height>,
    pub f1_peak: Option<PeakDensity>,
    /// hmF1 (km), only used by the [BottomsideVariant::Layer] bottomside
    pub hmf1: Option<f64>,
    pub e_peak: Option<PeakDensity>,
    /// hmE (km)
    pub hme: Option<f64>,
    pub rz12: Option<f64>,
    pub ig12: Option<f64>,
    /// Daily F10.7 solar radio flux
    pub f107_daily: Option<f64>,
    /// Electron densities (m⁻³) at the 300 and 400 km reference heights,
    /// used by the Te(Ne) correlation
    pub te_ne_densities: [Option<f64>; 2],
}

bitflags! {
    /// Legacy switch bundle. A set bit enables the named behavior,
    /// an unset bit selects the model default.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LegacySwitches: u32 {
        const NO_DENSITY = 0x01;
        const NO_TEMPERATURES = 0x02;
        const NO_IONS = 0x04;
        const GULYAEVA_B0 = 0x08;
        const CCIR_F2_MAP = 0x10;
        const OLD_ION_COMPOSITION = 0x20;
        const UNLIMITED_TOPSIDE_FLUX = 0x40;
        const USER_FOF2 = 0x80;
        const USER_HMF2 = 0x100;
        const LAYER_FORMALISM = 0x200;
        const USER_FOF1 = 0x400;
        const USER_HMF1 = 0x800;
        const USER_FOE = 0x1000;
        const USER_HME = 0x2000;
        const USER_RZ12 = 0x4000;
        const OLD_FIELD_MODEL = 0x8000;
        const NO_F1_PROBABILITY = 0x1_0000;
        const F1_L_CONDITION = 0x2_0000;
        const NO_DRIFT = 0x4_0000;
        const ION_ABSOLUTE = 0x8_0000;
        const SPECIAL_D_REGION = 0x10_0000;
        const NO_STORM = 0x20_0000;
        const USER_IG12 = 0x40_0000;
        const NO_SPREAD_F = 0x80_0000;
        const TOPSIDE_A = 0x100_0000;
        const TOPSIDE_B = 0x200_0000;
        const BRACE_THEIS_TE = 0x400_0000;
        const TE_NE_CORRELATION = 0x800_0000;
        const NO_MESSAGES = 0x1000_0000;
        const USER_F107 = 0x2000_0000;
    }
}

impl LegacySwitches {
    /// Converts this bundle to [ModelOptions]
    pub fn options(&self) -> ModelOptions {
        let topside = match (
            self.contains(Self::TOPSIDE_A),
            self.contains(Self::TOPSIDE_B),
        ) {
            (true, true) => TopsideVariant::Legacy,
            (false, true) => TopsideVariant::Corrected,
            (false, false) => TopsideVariant::NeQuick,
            (true, false) => TopsideVariant::Tts,
        };
        let f1_occurrence = if self.contains(Self::NO_F1_PROBABILITY) {
            F1Occurrence::Legacy
        } else if self.contains(Self::F1_L_CONDITION) {
            F1Occurrence::ProbabilityWithL
        } else {
            F1Occurrence::Probability
        };
        ModelOptions {
            density: !self.contains(Self::NO_DENSITY),
            temperatures: !self.contains(Self::NO_TEMPERATURES),
            ions: !self.contains(Self::NO_IONS),
            f2_map: if self.contains(Self::CCIR_F2_MAP) {
                F2MapFamily::Ccir
            } else {
                F2MapFamily::Ursi
            },
            bottomside_thickness: if self.contains(Self::GULYAEVA_B0) {
                BottomsideThickness::Gulyaeva
            } else {
                BottomsideThickness::Table
            },
            bottomside: if self.contains(Self::LAYER_FORMALISM) {
                BottomsideVariant::Layer
            } else {
                BottomsideVariant::Analytic
            },
            topside,
            topside_flux_limit: !self.contains(Self::UNLIMITED_TOPSIDE_FLUX),
            f1_occurrence,
            electron_temperature: if self.contains(Self::BRACE_THEIS_TE) {
                ElectronTemperatureModel::BraceTheis
            } else {
                ElectronTemperatureModel::Intercosmos
            },
            te_ne_correlation: self.contains(Self::TE_NE_CORRELATION),
            ion_composition: if self.contains(Self::OLD_ION_COMPOSITION) {
                IonCompositionModel::Ds78
            } else {
                IonCompositionModel::Ds95
            },
            ion_units: if self.contains(Self::ION_ABSOLUTE) {
                IonUnits::Absolute
            } else {
                IonUnits::Percent
            },
            d_region: if self.contains(Self::SPECIAL_D_REGION) {
                DRegionVariant::Special
            } else {
                DRegionVariant::Standard
            },
            field: if self.contains(Self::OLD_FIELD_MODEL) {
                FieldModel::Legacy
            } else {
                FieldModel::Current
            },
            storm: !self.contains(Self::NO_STORM),
            drift: !self.contains(Self::NO_DRIFT),
            spread_f: !self.contains(Self::NO_SPREAD_F),
            messages: !self.contains(Self::NO_MESSAGES),
        }
    }
    /// Retains the overrides enabled by this bundle.
    /// A user hmF1 is only honoured in layer mode.
    pub fn honoured(&self, overrides: &UserOverrides) -> UserOverrides {
        let keep = |flag: Self, value: Option<f64>| {
            if self.contains(flag) {
                value
            } else {
                None
            }
        };
        UserOverrides {
            f2_peak: overrides.f2_peak.filter(|_| self.contains(Self::USER_FOF2)),
            f2_height: overrides
                .f2_height
                .filter(|_| self.contains(Self::USER_HMF2)),
            f1_peak: overrides.f1_peak.filter(|_| self.contains(Self::USER_FOF1)),
            hmf1: keep(Self::USER_HMF1 | Self::LAYER_FORMALISM, overrides.hmf1),
            e_peak: overrides.e_peak.filter(|_| self.contains(Self::USER_FOE)),
            hme: keep(Self::USER_HME, overrides.hme),
            rz12: keep(Self::USER_RZ12, overrides.rz12),
            ig12: keep(Self::USER_IG12, overrides.ig12),
            f107_daily: keep(Self::USER_F107, overrides.f107_daily),
            te_ne_densities: if self.contains(Self::TE_NE_CORRELATION) {
                overrides.te_ne_densities
            } else {
                [None, None]
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn default_options() {
        let opts = ModelOptions::default();
        assert_eq!(opts.topside, TopsideVariant::NeQuick);
        assert_eq!(opts.f2_map, F2MapFamily::Ursi);
        assert_eq!(LegacySwitches::empty().options(), opts);
    }
    #[test]
    fn topside_bits() {
        for (flags, expected) in [
            (
                LegacySwitches::TOPSIDE_A | LegacySwitches::TOPSIDE_B,
                TopsideVariant::Legacy,
            ),
            (LegacySwitches::TOPSIDE_B, TopsideVariant::Corrected),
            (LegacySwitches::empty(), TopsideVariant::NeQuick),
            (LegacySwitches::TOPSIDE_A, TopsideVariant::Tts),
        ] {
            assert_eq!(flags.options().topside, expected);
        }
    }
    #[test]
    fn honoured_overrides() {
        let overrides = UserOverrides {
            f2_peak: Some(PeakDensity::from_raw(10.0)),
            hmf1: Some(180.0),
            rz12: Some(100.0),
            ..Default::default()
        };
        let flags = LegacySwitches::USER_FOF2 | LegacySwitches::USER_HMF1;
        let honoured = flags.honoured(&overrides);
        assert!(honoured.f2_peak.is_some());
        assert!(honoured.hmf1.is_none(), "hmF1 requires layer mode");
        assert!(honoured.rz12.is_none());

        let flags = flags | LegacySwitches::LAYER_FORMALISM;
        assert_eq!(flags.honoured(&overrides).hmf1, Some(180.0));
    }
    #[test]
    fn peak_density() {
        let peak = PeakDensity::from_raw(9.0);
        assert_eq!(peak, PeakDensity::Frequency(9.0));
        assert!((peak.density() - 1.0044E12).abs() < 1E6);
        let peak = PeakDensity::from_raw(1.0E12);
        assert!((peak.frequency() - 8.98).abs() < 0.01);
        assert_eq!(F2Height::from_raw(3.1), F2Height::M3000(3.1));
        assert_eq!(F2Height::from_raw(300.0), F2Height::Height(300.0));
    }
    #[test]
    fn variant_parsing() {
        assert_eq!(
            TopsideVariant::from_str("nequick").unwrap(),
            TopsideVariant::NeQuick
        );
        assert_eq!(F2MapFamily::from_str("CCIR").unwrap(), F2MapFamily::Ccir);
        assert_eq!(F2MapFamily::Ursi.to_string(), "ursi");
    }
}
