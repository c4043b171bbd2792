//! foF2 and M(3000)F2 coefficient tables
use std::collections::HashMap;

#[cfg(feature = "log")]
use log::debug;

use crate::{epoch::MonthBlend, error::Error, indices::MonthlyIndices, options::F2MapFamily};

mod ascii;
mod harmonic;

pub use ascii::{read_maps, FileCoefficientSource};
pub use harmonic::{HarmonicMap, HarmonicSet, MapKind};

/// Both maps of one calendar month
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthlyMaps {
    /// foF2 map (13 x 76 x 2)
    pub fof2: HarmonicMap,
    /// M(3000)F2 map (9 x 49 x 2)
    pub m3000: HarmonicMap,
}

/// Provider of monthly coefficient maps
pub trait CoefficientSource {
    /// Returns the maps for given family and month (1..=12).
    /// M(3000)F2 maps are always the CCIR ones.
    fn load(&self, family: F2MapFamily, month: u8) -> Result<MonthlyMaps, Error>;
}

/// Activity interpolation weight, saturating at both bracket limits
pub(crate) fn activity_weight(index: f64) -> f64 {
    (index / 100.0).clamp(0.0, 1.0)
}

/// [CoefficientTable] is ready to evaluate: activity interpolated maps
/// of the requested month and its neighbor, plus the month blending weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoefficientTable {
    pub family: F2MapFamily,
    pub month: u8,
    pub neighbor: u8,
    /// Neighbor month share in [0, 1]
    pub month_weight: f64,
    /// foF2 high activity share of the month and its neighbor (IG12 driven)
    pub fof2_weights: [f64; 2],
    /// M(3000)F2 high activity share of the month and its neighbor (Rz12 driven)
    pub m3000_weights: [f64; 2],
    fof2: [HarmonicSet; 2],
    m3000: [HarmonicSet; 2],
}

impl CoefficientTable {
    fn new(
        family: F2MapFamily,
        blend: &MonthBlend,
        current: &MonthlyMaps,
        neighbor: &MonthlyMaps,
        fof2_weights: [f64; 2],
        m3000_weights: [f64; 2],
    ) -> Self {
        Self {
            family,
            month: blend.month,
            neighbor: blend.neighbor,
            month_weight: blend.weight,
            fof2_weights,
            m3000_weights,
            fof2: [
                current.fof2.at_activity(fof2_weights[0]),
                neighbor.fof2.at_activity(fof2_weights[1]),
            ],
            m3000: [
                current.m3000.at_activity(m3000_weights[0]),
                neighbor.m3000.at_activity(m3000_weights[1]),
            ],
        }
    }
    fn blend(&self, sets: &[HarmonicSet; 2], modip: f64, lat: f64, lon: f64, ut: f64) -> f64 {
        let current = sets[0].evaluate(modip, lat, lon, ut);
        if self.month_weight == 0.0 {
            return current;
        }
        let neighbor = sets[1].evaluate(modip, lat, lon, ut);
        current + (neighbor - current) * self.month_weight
    }
    /// foF2 (MHz) at given modified dip, latitude, east longitude (degrees)
    /// and universal time (hours)
    pub fn fof2(&self, modip: f64, latitude: f64, longitude: f64, ut: f64) -> f64 {
        self.blend(&self.fof2, modip, latitude, longitude, ut)
    }
    /// M(3000)F2 propagation factor
    pub fn m3000(&self, modip: f64, latitude: f64, longitude: f64, ut: f64) -> f64 {
        self.blend(&self.m3000, modip, latitude, longitude, ut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TableKey {
    family: F2MapFamily,
    year: i32,
    month: u8,
    neighbor: u8,
    month_weight: f64,
    fof2_weights: [f64; 2],
    m3000_weights: [f64; 2],
}

/// [CoefficientStore] owns a [CoefficientSource] and caches
/// raw monthly maps (per family and month) and the last interpolated table.
/// The interpolated table is reused as long as month, neighbor month and
/// weights are unchanged.
#[derive(Debug)]
pub struct CoefficientStore<S: CoefficientSource> {
    source: S,
    months: HashMap<(F2MapFamily, u8), MonthlyMaps>,
    table: Option<(TableKey, CoefficientTable)>,
    loads: usize,
    interpolations: usize,
}

impl<S: CoefficientSource> CoefficientStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            months: HashMap::new(),
            table: None,
            loads: 0,
            interpolations: 0,
        }
    }
    /// Number of monthly maps obtained from the source so far
    pub fn loads(&self) -> usize {
        self.loads
    }
    /// Number of interpolated tables built so far
    pub fn interpolations(&self) -> usize {
        self.interpolations
    }
    /// Drops every cached table
    pub fn clear(&mut self) {
        self.months.clear();
        self.table = None;
    }
    fn cache_month(&mut self, family: F2MapFamily, month: u8) -> Result<(), Error> {
        if self.months.contains_key(&(family, month)) {
            return Ok(());
        }
        let maps = self.source.load(family, month).map_err(|e| match e {
            Error::CoefficientLoad { .. } | Error::InvalidMonth(_) => e,
            _ => {
                #[cfg(feature = "log")]
                debug!("{} month {}: {}", family, month, e);
                Error::CoefficientLoad { family, month }
            },
        })?;
        self.loads += 1;
        self.months.insert((family, month), maps);
        Ok(())
    }
    /// Returns the interpolated table for given date. `activity` holds the
    /// indices of the month and of its neighbor month: each month map is
    /// interpolated at its own level (IG12 drives the foF2 map, Rz12 the
    /// M(3000)F2 map).
    pub fn table(
        &mut self,
        family: F2MapFamily,
        year: i32,
        month: u8,
        day: u8,
        activity: &[MonthlyIndices; 2],
    ) -> Result<&CoefficientTable, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        let blend = MonthBlend::new(year, month, day);
        let key = TableKey {
            family,
            year,
            month,
            neighbor: blend.neighbor,
            month_weight: blend.weight,
            fof2_weights: activity.map(|m| activity_weight(m.ig12)),
            m3000_weights: activity.map(|m| activity_weight(m.rz12)),
        };

        let cached = matches!(&self.table, Some((k, _)) if *k == key);
        if !cached {
            self.cache_month(family, month)?;
            self.cache_month(family, blend.neighbor)?;
            let current = self
                .months
                .get(&(family, month))
                .ok_or(Error::CoefficientLoad { family, month })?;
            let neighbor = self
                .months
                .get(&(family, blend.neighbor))
                .ok_or(Error::CoefficientLoad {
                    family,
                    month: blend.neighbor,
                })?;
            let table = CoefficientTable::new(
                family,
                &blend,
                current,
                neighbor,
                key.fof2_weights,
                key.m3000_weights,
            );
            self.interpolations += 1;
            self.table = Some((key, table));
        }

        match &self.table {
            Some((_, table)) => Ok(table),
            None => Err(Error::CoefficientLoad { family, month }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    struct Constant {
        calls: Cell<usize>,
    }

    impl CoefficientSource for Constant {
        fn load(&self, _: F2MapFamily, month: u8) -> Result<MonthlyMaps, Error> {
            self.calls.set(self.calls.get() + 1);
            let mut fof2 = HarmonicMap::new(
                MapKind::CriticalFrequency,
                vec![0.0; MapKind::CriticalFrequency.len()],
            )?;
            let mut m3000 = HarmonicMap::new(
                MapKind::PropagationFactor,
                vec![0.0; MapKind::PropagationFactor.len()],
            )?;
            *fof2.get_mut(0, 0, 0).unwrap() = month as f64;
            *fof2.get_mut(0, 0, 1).unwrap() = 2.0 * month as f64 + 4.0;
            *m3000.get_mut(0, 0, 0).unwrap() = 3.0;
            *m3000.get_mut(0, 0, 1).unwrap() = 2.8;
            Ok(MonthlyMaps { fof2, m3000 })
        }
    }

    fn activity(ig12: f64, rz12: f64) -> [MonthlyIndices; 2] {
        [MonthlyIndices { rz12, ig12 }; 2]
    }
    #[test]
    fn saturation() {
        let mut store = CoefficientStore::new(Constant {
            calls: Cell::new(0),
        });
        let a = store
            .table(F2MapFamily::Ccir, 2007, 6, 15, &activity(250.0, 250.0))
            .unwrap()
            .fof2(50.0, 40.0, 0.0, 12.0);
        let b = store
            .table(F2MapFamily::Ccir, 2007, 6, 15, &activity(100.0, 100.0))
            .unwrap()
            .fof2(50.0, 40.0, 0.0, 12.0);
        assert_eq!(a, b);
        assert_eq!(a, 16.0);
        assert_eq!(activity_weight(-20.0), 0.0);
    }
    #[test]
    fn month_interpolation() {
        let mut store = CoefficientStore::new(Constant {
            calls: Cell::new(0),
        });
        let table = store
            .table(F2MapFamily::Ursi, 2007, 6, 1, &activity(0.0, 0.0))
            .unwrap();
        assert_eq!(table.neighbor, 5);
        let fo = table.fof2(0.0, 0.0, 0.0, 0.0);
        assert!(fo > 5.0 && fo < 6.0, "bad blend {}", fo);
        assert!((table.m3000(0.0, 0.0, 0.0, 0.0) - 3.0).abs() < 1E-12);
    }
    #[test]
    fn cache_idempotence() {
        let mut store = CoefficientStore::new(Constant {
            calls: Cell::new(0),
        });
        let a = store
            .table(F2MapFamily::Ursi, 2007, 6, 20, &activity(80.0, 60.0))
            .unwrap()
            .clone();
        assert_eq!(store.loads(), 2);
        let b = store
            .table(F2MapFamily::Ursi, 2007, 6, 20, &activity(80.0, 60.0))
            .unwrap()
            .clone();
        assert_eq!(a, b);
        assert_eq!(store.loads(), 2);
        assert_eq!(store.interpolations(), 1);

        // new activity: re-interpolation only
        let _ = store
            .table(F2MapFamily::Ursi, 2007, 6, 20, &activity(90.0, 60.0))
            .unwrap();
        assert_eq!(store.loads(), 2);
        assert_eq!(store.interpolations(), 2);
        assert!(store
            .table(F2MapFamily::Ursi, 2007, 13, 20, &activity(90.0, 60.0))
            .is_err());
    }
}
