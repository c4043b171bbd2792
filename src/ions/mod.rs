//! Ion composition
use strum::{Display, EnumIter, EnumString};

use crate::{
    conditions::Conditions,
    constants::Heights,
    options::{IonCompositionModel, IonUnits},
};

mod ds78;
mod ds95;

use ds78::Ds78;
use ds95::Ds95;

/// Modelled ion species
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IonSpecies {
    #[strum(serialize = "O+")]
    Oxygen,
    #[strum(serialize = "H+")]
    Hydrogen,
    #[strum(serialize = "He+")]
    Helium,
    #[strum(serialize = "O2+")]
    MolecularOxygen,
    #[strum(serialize = "NO+")]
    NitricOxide,
    #[strum(serialize = "N+")]
    Nitrogen,
    /// Cluster ions
    #[strum(serialize = "cluster")]
    Cluster,
}

/// Ion densities at one height, in percent of the electron density or
/// in m⁻³ depending on [IonUnits]. None when not modelled.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonDensities {
    pub oxygen: Option<f64>,
    pub hydrogen: Option<f64>,
    pub helium: Option<f64>,
    pub molecular_oxygen: Option<f64>,
    pub nitric_oxide: Option<f64>,
    pub nitrogen: Option<f64>,
    pub cluster: Option<f64>,
}

impl IonDensities {
    /// Density of given species
    pub fn get(&self, species: IonSpecies) -> Option<f64> {
        match species {
            IonSpecies::Oxygen => self.oxygen,
            IonSpecies::Hydrogen => self.hydrogen,
            IonSpecies::Helium => self.helium,
            IonSpecies::MolecularOxygen => self.molecular_oxygen,
            IonSpecies::NitricOxide => self.nitric_oxide,
            IonSpecies::Nitrogen => self.nitrogen,
            IonSpecies::Cluster => self.cluster,
        }
    }
    /// Sum of the modelled species
    pub fn total(&self) -> f64 {
        [
            self.oxygen,
            self.hydrogen,
            self.helium,
            self.molecular_oxygen,
            self.nitric_oxide,
            self.nitrogen,
            self.cluster,
        ]
        .iter()
        .flatten()
        .sum()
    }
    /// True when no species is modelled
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
    fn scaled(&self, factor: f64) -> Self {
        let scale = |v: Option<f64>| v.map(|v| v * factor);
        Self {
            oxygen: scale(self.oxygen),
            hydrogen: scale(self.hydrogen),
            helium: scale(self.helium),
            molecular_oxygen: scale(self.molecular_oxygen),
            nitric_oxide: scale(self.nitric_oxide),
            nitrogen: scale(self.nitrogen),
            cluster: scale(self.cluster),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Model {
    Ds78(Ds78),
    Ds95(Ds95),
}

/// Composition model of one request
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct IonComposition {
    model: Model,
    units: IonUnits,
    /// Lowest height with a composition (km)
    pub bottom: f64,
}

impl IonComposition {
    pub fn new(cond: &Conditions) -> Self {
        let (model, bottom) = match cond.options.ion_composition {
            IonCompositionModel::Ds78 => (Model::Ds78(Ds78::new(cond)), Heights::ION_BOTTOM),
            IonCompositionModel::Ds95 => (Model::Ds95(Ds95::new(cond)), Heights::ION_BOTTOM_DS95),
        };
        Self {
            model,
            units: cond.options.ion_units,
            bottom,
        }
    }
    /// Composition at given height, None outside the validity band.
    /// Absolute densities require the electron density (m⁻³).
    pub fn at(&self, height: f64, electron_density: Option<f64>) -> Option<IonDensities> {
        if height < self.bottom || height > Heights::ION_TOP {
            return None;
        }
        let percent = match &self.model {
            Model::Ds78(ds78) => ds78.percent(height),
            Model::Ds95(ds95) => ds95.percent(height),
        };
        match self.units {
            IonUnits::Percent => Some(percent),
            IonUnits::Absolute => electron_density.map(|ne| percent.scaled(ne / 100.0)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conditions::fixture::conditions;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn species() {
        assert_eq!(IonSpecies::iter().count(), 7);
        assert_eq!(IonSpecies::MolecularOxygen.to_string(), "O2+");
        assert_eq!(IonSpecies::from_str("NO+").unwrap(), IonSpecies::NitricOxide);
        let ions = IonDensities {
            oxygen: Some(60.0),
            hydrogen: Some(40.0),
            ..Default::default()
        };
        assert_eq!(ions.total(), 100.0);
        assert_eq!(ions.get(IonSpecies::Hydrogen), Some(40.0));
        assert!(ions.get(IonSpecies::Cluster).is_none());
        assert!(!ions.is_empty());
        assert!(IonDensities::default().is_empty());
    }
    #[test]
    fn validity_band() {
        let mut cond = conditions(40.0, -75.0, 172, 12.0, 50.0);
        let ds95 = IonComposition::new(&cond);
        assert_eq!(ds95.bottom, 75.0);
        assert!(ds95.at(74.0, None).is_none());
        assert!(ds95.at(75.0, None).is_some());
        assert!(ds95.at(2001.0, None).is_none());

        cond.options.ion_composition = IonCompositionModel::Ds78;
        let ds78 = IonComposition::new(&cond);
        assert_eq!(ds78.bottom, 100.0);
        assert!(ds78.at(90.0, None).is_none());
        let ions = ds78.at(300.0, None).unwrap();
        assert!(ions.nitrogen.is_none());
    }
    #[test]
    fn absolute_units() {
        let mut cond = conditions(40.0, -75.0, 172, 12.0, 50.0);
        cond.options.ion_units = IonUnits::Absolute;
        let model = IonComposition::new(&cond);
        assert!(model.at(300.0, None).is_none());
        let ions = model.at(300.0, Some(1.0E12)).unwrap();
        assert!((ions.total() - 1.0E12).abs() < 1.0E3);
    }
}
