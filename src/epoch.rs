//! Calendar and time handling
use hifitime::Epoch;

use crate::error::Error;

/// Time of day specification
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourSpec {
    /// Local (solar) time, in decimal hours
    Local(f64),
    /// Universal time, in decimal hours
    Universal(f64),
}

/// [EpochSpec] describes the date and time of a profile request.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochSpec {
    /// Gregorian year
    pub year: i32,
    /// Month (1..=12)
    pub month: u8,
    /// Day of month
    pub day: u8,
    /// Time of day
    pub hour: HourSpec,
}

/// Northern hemisphere season
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Autumn = 3,
    Winter = 4,
}

impl Season {
    /// Season index (1..=4)
    pub fn index(&self) -> usize {
        *self as usize
    }
    /// Season for given day of year, northern hemisphere convention.
    pub fn from_day_of_year(doy: u16) -> Self {
        let season = ((doy as f64 + 45.0) / 92.0) as i32;
        num_traits::FromPrimitive::from_i32(season).unwrap_or(Season::Winter)
    }
    /// Season seen from the other hemisphere
    pub fn opposite(&self) -> Self {
        match self {
            Self::Spring => Self::Autumn,
            Self::Summer => Self::Winter,
            Self::Autumn => Self::Spring,
            Self::Winter => Self::Summer,
        }
    }
}

impl EpochSpec {
    /// Builds a new [EpochSpec] at given local time
    pub fn local(year: i32, month: u8, day: u8, hour: f64) -> Result<Self, Error> {
        Self::new(year, month, day, HourSpec::Local(hour))
    }
    /// Builds a new [EpochSpec] at given universal time
    pub fn universal(year: i32, month: u8, day: u8, hour: f64) -> Result<Self, Error> {
        Self::new(year, month, day, HourSpec::Universal(hour))
    }
    /// Builds a new [EpochSpec] from year and day of year
    pub fn from_day_of_year(year: i32, doy: u16, hour: HourSpec) -> Result<Self, Error> {
        let (month, day) = month_day(year, doy).ok_or(Error::InvalidDate)?;
        Self::new(year, month, day, hour)
    }
    fn new(year: i32, month: u8, day: u8, hour: HourSpec) -> Result<Self, Error> {
        if month == 0 || month > 12 || day == 0 || day > days_in_month(year, month) {
            return Err(Error::InvalidDate);
        }
        let h = match hour {
            HourSpec::Local(h) | HourSpec::Universal(h) => h,
        };
        if !h.is_finite() || !(0.0..=24.0).contains(&h) {
            return Err(Error::InvalidDate);
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
        })
    }
    /// Day of year (1..=366)
    pub fn day_of_year(&self) -> u16 {
        day_of_year(self.year, self.month, self.day)
    }
    /// Number of days in this year
    pub fn days_in_year(&self) -> u16 {
        if is_leap(self.year) {
            366
        } else {
            365
        }
    }
    /// Decimal year
    pub fn decimal_year(&self) -> f64 {
        self.year as f64 + (self.day_of_year() as f64 - 0.5) / self.days_in_year() as f64
    }
    /// Returns (local hour, universal hour) at given longitude.
    pub fn hours(&self, longitude: f64) -> (f64, f64) {
        match self.hour {
            HourSpec::Local(lt) => (lt, wrap_hour(lt - longitude / 15.0)),
            HourSpec::Universal(ut) => (wrap_hour(ut + longitude / 15.0), ut),
        }
    }
}

impl From<Epoch> for EpochSpec {
    /// Interprets [Epoch] as universal time
    fn from(epoch: Epoch) -> Self {
        let (year, month, day, hh, mm, ss, ns) = epoch.to_gregorian_utc();
        let hour = hh as f64 + mm as f64 / 60.0 + (ss as f64 + ns as f64 * 1.0E-9) / 3600.0;
        Self {
            year,
            month,
            day,
            hour: HourSpec::Universal(hour),
        }
    }
}

fn wrap_hour(h: f64) -> f64 {
    let mut h = h;
    while h < 0.0 {
        h += 24.0;
    }
    while h >= 24.0 {
        h -= 24.0;
    }
    h
}

pub(crate) fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap(year) {
                29
            } else {
                28
            }
        },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let mut doy = day as u16;
    for m in 1..month {
        doy += days_in_month(year, m) as u16;
    }
    doy
}

pub(crate) fn month_day(year: i32, doy: u16) -> Option<(u8, u8)> {
    let mut rem = doy;
    if doy == 0 {
        return None;
    }
    for month in 1..=12 {
        let n = days_in_month(year, month) as u16;
        if rem <= n {
            return Some((month, rem as u8));
        }
        rem -= n;
    }
    None
}

/// Days elapsed since 1970-01-01 (proleptic gregorian)
pub(crate) fn day_number(year: i32, month: u8, day: u8) -> i64 {
    let y = (if month <= 2 { year - 1 } else { year }) as i64;
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Inverse of [day_number]
pub(crate) fn civil_date(days: i64) -> (i32, u8, u8) {
    let z = days + 719468;
    let era = (if z >= 0 { z } else { z - 146096 }) / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = (yoe + era * 400 + if month <= 2 { 1 } else { 0 }) as i32;
    (year, month, day)
}

/// Monthly values are representative of mid-month (15th, 14th in February).
/// [MonthBlend] describes how to blend the current month with the closest
/// neighboring month.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct MonthBlend {
    pub year: i32,
    pub month: u8,
    pub neighbor_year: i32,
    pub neighbor: u8,
    /// Weight of the neighbor month, in [0, 1]
    pub weight: f64,
}

fn pivot_day(month: u8) -> u8 {
    if month == 2 {
        14
    } else {
        15
    }
}

impl MonthBlend {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        let (neighbor_year, neighbor) = if day < pivot_day(month) {
            if month == 1 {
                (year - 1, 12)
            } else {
                (year, month - 1)
            }
        } else if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let now = day_number(year, month, day) as f64;
        let pivot = day_number(year, month, pivot_day(month)) as f64;
        let neighbor_pivot = day_number(neighbor_year, neighbor, pivot_day(neighbor)) as f64;

        let weight = ((now - pivot) / (neighbor_pivot - pivot)).clamp(0.0, 1.0);

        Self {
            year,
            month,
            neighbor_year,
            neighbor,
            weight,
        }
    }
    /// Blends current month value `current` with the neighbor month value
    pub fn blend(&self, current: f64, neighbor: f64) -> f64 {
        current + (neighbor - current) * self.weight
    }
}
