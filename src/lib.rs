#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

/*
 * iri-profile: empirical ionosphere profile engine.
 * This crate is shipped under the Mozilla Public License 2.0.
 *
 * Documentation: https://docs.rs/iri-profile
 */

#[macro_use]
extern crate num_derive;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod coefficients;
pub mod delay;
pub mod engine;
pub mod geomag;
pub mod indices;
pub mod ions;
pub mod options;
pub mod peak;
pub mod profile;
pub mod solar;
pub mod temperature;
pub mod valley;

mod bibliography;
mod conditions;
mod constants;
mod drift;
mod epoch;
mod error;
mod grid;
mod math;
mod spread_f;
mod storm;

#[cfg(test)]
mod tests;

#[cfg(docsrs)]
pub use bibliography::Bibliography;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        coefficients::{
            CoefficientSource, CoefficientStore, CoefficientTable, FileCoefficientSource,
            HarmonicMap, HarmonicSet, MapKind, MonthlyMaps,
        },
        constants::MAX_GRID_POINTS,
        delay::{IonosphereDelay, SlantDelay},
        engine::{DerivedScalars, GridPoint, IriEngine, Location, Profile, ProfileRequest, Tec},
        epoch::{EpochSpec, HourSpec, Season},
        error::{Error, ParsingError},
        geomag::{DipoleField, FieldLine, GeomagneticResolver, MagneticGeometry},
        grid::AltitudeGrid,
        indices::{ApRecord, ApTable, DailyFlux, FixedIndices, IgRzTable, IndexProvider, Indices, MonthlyIndices},
        ions::{IonDensities, IonSpecies},
        options::{
            BottomsideThickness, BottomsideVariant, DRegionVariant, ElectronTemperatureModel,
            F1Occurrence, F2Height, F2MapFamily, FieldModel, IonCompositionModel, IonUnits,
            LegacySwitches, ModelOptions, PeakDensity, TopsideVariant, UserOverrides,
        },
        peak::{F1Probabilities, PeakParameters},
        profile::{DRegionDiagnostics, LayQuality},
        solar::{RegionSun, SolarGeometry},
        temperature::Temperatures,
        valley::{Boundary, ValleyParameters},
    };

    // pub re-export
    pub use hifitime::Epoch;
}
