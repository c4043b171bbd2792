use thiserror::Error;

use crate::options::F2MapFamily;

/// Errors that may rise when parsing coefficient, index or ap files
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Invalid floating point number in coefficient file
    #[error("invalid coefficient value")]
    CoefficientValue,
    /// Coefficient file does not contain the expected number of values
    #[error("coefficient file holds {found} values, expecting {expected}")]
    CoefficientCount { found: usize, expected: usize },
    /// Missing header line in index file
    #[error("missing ig_rz header")]
    IndexHeader,
    /// Invalid time span description in index file
    #[error("invalid ig_rz time span")]
    IndexTimeSpan,
    /// Invalid index value
    #[error("invalid index value")]
    IndexValue,
    /// Index file does not describe the announced time span
    #[error("index file holds {found} values, expecting {expected}")]
    IndexCount { found: usize, expected: usize },
    /// Invalid daily record in ap file
    #[error("invalid ap record")]
    ApRecord,
}

/// Errors that may abort a profile computation
#[derive(Error, Debug)]
pub enum Error {
    /// Coefficient table could not be obtained for the requested month:
    /// no partial profile is produced.
    #[error("failed to load {family} coefficients for month {month}")]
    CoefficientLoad { family: F2MapFamily, month: u8 },
    /// Coefficient table could not be interpreted
    #[error("coefficient table parsing error: {0}")]
    CoefficientParsing(#[source] ParsingError),
    /// Harmonic map with unexpected dimensions
    #[error("harmonic map dimension mismatch")]
    MapDimension,
    /// Invalid month number
    #[error("invalid month {0}")]
    InvalidMonth(u8),
    /// Invalid calendar date
    #[error("invalid date")]
    InvalidDate,
    /// Geomagnetic geometry could not be resolved at this location
    #[error("geomagnetic resolution failed at ({latitude}°, {longitude}°)")]
    GeomagneticResolution { latitude: f64, longitude: f64 },
    /// Solar indices unavailable for this epoch and no override given
    #[error("solar indices unavailable for {year}-{month:02}")]
    IndicesUnavailable { year: i32, month: u8 },
    /// Invalid altitude grid
    #[error("invalid altitude grid")]
    InvalidGrid,
    /// Invalid location
    #[error("invalid location")]
    InvalidLocation,
    /// Carrier frequency must be finite and positive
    #[error("invalid carrier frequency {0} Hz")]
    InvalidFrequency(f64),
    /// Index or ap file parsing error
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    /// I/O error while reading a table file
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
