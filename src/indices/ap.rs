//! `ap.dat` daily records
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::{
    epoch::day_number,
    error::{Error, ParsingError},
    indices::{DailyFlux, IndexProvider, MonthlyIndices, AP_HISTORY_LEN},
};

/// One day of `ap.dat`
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApRecord {
    /// 3-hourly ap values (00-03 UT first)
    pub ap: [f64; 8],
    /// Daily F10.7, if known
    pub f107: Option<f64>,
}

impl FromStr for ApRecord {
    type Err = ParsingError;
    /// Parses one `(3i3,8i3,f5.1)` line, date columns excluded
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line.len() < 33 {
            return Err(ParsingError::ApRecord);
        }
        let (_, mut rem) = line.split_at(9);
        let mut ap = [0.0_f64; 8];
        for value in ap.iter_mut() {
            let (field, next) = rem.split_at(3);
            *value = f64::from_str(field.trim()).map_err(|_| ParsingError::ApRecord)?;
            rem = next;
        }
        let f107 = if rem.trim().is_empty() {
            None
        } else {
            let field = &rem[..rem.len().min(5)];
            let value = f64::from_str(field.trim()).map_err(|_| ParsingError::ApRecord)?;
            if value > 0.0 {
                Some(value)
            } else {
                None
            }
        };
        Ok(Self { ap, f107 })
    }
}

/// [ApTable] indexes daily ap records by date
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ApTable {
    records: BTreeMap<i64, ApRecord>,
}

fn parse_date(line: &str) -> Result<(i32, u8, u8), ParsingError> {
    let (yy, rem) = line.split_at(3);
    let (mm, rem) = rem.split_at(3);
    let (dd, _) = rem.split_at(3);
    let yy = i32::from_str(yy.trim()).map_err(|_| ParsingError::ApRecord)?;
    let mm = u8::from_str(mm.trim()).map_err(|_| ParsingError::ApRecord)?;
    let dd = u8::from_str(dd.trim()).map_err(|_| ParsingError::ApRecord)?;
    let year = if yy < 50 {
        2000 + yy
    } else if yy < 100 {
        1900 + yy
    } else {
        yy
    };
    Ok((year, mm, dd))
}

impl ApTable {
    /// Parses an `ap.dat` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let fd = std::fs::File::open(path)?;
        Self::from_reader(fd)
    }
    /// Parses `ap.dat` content
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut records = BTreeMap::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if line.len() < 33 {
                return Err(ParsingError::ApRecord.into());
            }
            let (year, month, day) = parse_date(&line)?;
            let record = ApRecord::from_str(&line)?;
            records.insert(day_number(year, month, day), record);
        }
        Ok(Self { records })
    }
    /// Number of daily records
    pub fn len(&self) -> usize {
        self.records.len()
    }
    /// True if this table is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Record of given day
    pub fn record(&self, year: i32, month: u8, day: u8) -> Option<&ApRecord> {
        self.records.get(&day_number(year, month, day))
    }
}

impl IndexProvider for ApTable {
    fn monthly(&self, _: i32, _: u8) -> Option<MonthlyIndices> {
        None
    }
    fn daily_flux(&self, year: i32, month: u8, day: u8) -> Option<DailyFlux> {
        let n = day_number(year, month, day);
        let daily = self.records.get(&n)?.f107?;
        let window = self
            .records
            .range(n - 40..=n + 40)
            .filter_map(|(_, r)| r.f107)
            .collect::<Vec<_>>();
        let mean_81 = window.iter().sum::<f64>() / window.len() as f64;
        Some(DailyFlux { daily, mean_81 })
    }
    fn ap_history(
        &self,
        year: i32,
        month: u8,
        day: u8,
        hour: f64,
    ) -> Option<[f64; AP_HISTORY_LEN]> {
        let mut n = day_number(year, month, day);
        let mut slot = ((hour / 3.0).floor() as i64).clamp(0, 7) as usize;
        let mut history = [0.0; AP_HISTORY_LEN];
        for value in history.iter_mut() {
            *value = self.records.get(&n)?.ap[slot];
            if slot == 0 {
                slot = 7;
                n -= 1;
            } else {
                slot -= 1;
            }
        }
        Some(history)
    }
}
