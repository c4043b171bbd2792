//! ASCII coefficient files (`ccirNN.asc`, `ursiNN.asc`)
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

use crate::{
    coefficients::{CoefficientSource, HarmonicMap, MapKind, MonthlyMaps},
    error::{Error, ParsingError},
    options::F2MapFamily,
};

/// Width of one coefficient field
const FIELD_WIDTH: usize = 15;

/// Parses one coefficient file content: fixed width fields,
/// four per line, after one blank column.
pub(crate) fn parse_values<R: BufRead>(reader: R) -> Result<Vec<f64>, Error> {
    let mut values = Vec::with_capacity(MapKind::CriticalFrequency.len());
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.len() < 2 {
            continue;
        }
        let (_, mut rem) = line.split_at(1);
        while !rem.is_empty() {
            let split = rem.len().min(FIELD_WIDTH);
            let (field, next) = rem.split_at(split);
            let field = field.trim();
            if !field.is_empty() {
                let value = f64::from_str(&field.replace(['D', 'd'], "E"))
                    .map_err(|_| ParsingError::CoefficientValue)?;
                values.push(value);
            }
            rem = next;
        }
    }
    Ok(values)
}

/// Splits the values of one file into foF2 and (optionally) M(3000)F2 maps
pub(crate) fn split_maps(
    values: Vec<f64>,
    with_m3000: bool,
) -> Result<(HarmonicMap, Option<HarmonicMap>), Error> {
    let fof2_len = MapKind::CriticalFrequency.len();
    let m3000_len = MapKind::PropagationFactor.len();
    let expected = if with_m3000 {
        fof2_len + m3000_len
    } else {
        fof2_len
    };
    if values.len() < expected {
        return Err(Error::CoefficientParsing(ParsingError::CoefficientCount {
            found: values.len(),
            expected,
        }));
    }
    let mut values = values;
    values.truncate(expected);
    let m3000 = values.split_off(fof2_len);
    let fof2 = HarmonicMap::new(MapKind::CriticalFrequency, values)?;
    if with_m3000 {
        Ok((
            fof2,
            Some(HarmonicMap::new(MapKind::PropagationFactor, m3000)?),
        ))
    } else {
        Ok((fof2, None))
    }
}

/// [FileCoefficientSource] reads coefficient files from a directory.
/// Files are named `ccirNN.asc` and `ursiNN.asc`, NN being month + 10.
/// Gzip compressed files (`.asc.gz`) are supported with the "flate2" feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCoefficientSource {
    directory: PathBuf,
}

impl FileCoefficientSource {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }
    /// File name for given family and month
    pub fn file_name(family: F2MapFamily, month: u8) -> String {
        format!("{}{:02}.asc", family, month as u16 + 10)
    }
    fn read(&self, family: F2MapFamily, month: u8) -> Result<Vec<f64>, Error> {
        let path = self.directory.join(Self::file_name(family, month));
        if path.exists() {
            #[cfg(feature = "log")]
            debug!("loading {}", path.display());
            let fd = std::fs::File::open(&path)?;
            return parse_values(BufReader::new(fd));
        }
        #[cfg(feature = "flate2")]
        {
            let mut gz = path.clone().into_os_string();
            gz.push(".gz");
            let gz = PathBuf::from(gz);
            if gz.exists() {
                #[cfg(feature = "log")]
                debug!("loading {}", gz.display());
                let fd = std::fs::File::open(&gz)?;
                return parse_values(BufReader::new(GzDecoder::new(fd)));
            }
        }
        Err(Error::CoefficientLoad { family, month })
    }
}

impl CoefficientSource for FileCoefficientSource {
    fn load(&self, family: F2MapFamily, month: u8) -> Result<MonthlyMaps, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        let ccir = self
            .read(F2MapFamily::Ccir, month)
            .map_err(|e| match e {
                Error::Io(_) => Error::CoefficientLoad {
                    family: F2MapFamily::Ccir,
                    month,
                },
                e => e,
            })?;
        let (ccir_fof2, m3000) = split_maps(ccir, true)?;
        let m3000 = m3000.ok_or(Error::MapDimension)?;
        let fof2 = match family {
            F2MapFamily::Ccir => ccir_fof2,
            F2MapFamily::Ursi => {
                let ursi = self.read(F2MapFamily::Ursi, month)?;
                split_maps(ursi, false)?.0
            },
        };
        Ok(MonthlyMaps { fof2, m3000 })
    }
}

/// Reads coefficient values from any [Read]er
pub fn read_maps<R: Read>(reader: R, with_m3000: bool) -> Result<(HarmonicMap, Option<HarmonicMap>), Error> {
    let values = parse_values(BufReader::new(reader))?;
    split_maps(values, with_m3000)
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn fixed_width_fields() {
        let content =
            " 0.52396593E+01-0.56523629E-01-0.18704616E-01 0.12028541E-01\n 0.31221000E+00\n";
        let values = parse_values(content.as_bytes()).unwrap();
        assert_eq!(values, vec![5.2396593, -0.056523629, -0.018704616, 0.012028541, 0.31221]);
        assert!(parse_values(" 0.5239659XE+01".as_bytes()).is_err());
    }
    #[test]
    fn file_names() {
        assert_eq!(
            FileCoefficientSource::file_name(F2MapFamily::Ccir, 1),
            "ccir11.asc"
        );
        assert_eq!(
            FileCoefficientSource::file_name(F2MapFamily::Ursi, 12),
            "ursi22.asc"
        );
    }
    #[test]
    fn short_file() {
        let values = vec![0.0; 100];
        match split_maps(values, true) {
            Err(Error::CoefficientParsing(ParsingError::CoefficientCount { found, expected })) => {
                assert_eq!(found, 100);
                assert_eq!(expected, 1976 + 882);
            },
            other => panic!("unexpected result {:?}", other),
        }
    }
    #[test]
    fn missing_directory() {
        let source = FileCoefficientSource::new("/this/does/not/exist");
        match source.load(F2MapFamily::Ursi, 6) {
            Err(Error::CoefficientLoad { family, month }) => {
                assert_eq!(family, F2MapFamily::Ccir);
                assert_eq!(month, 6);
            },
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            source.load(F2MapFamily::Ccir, 13),
            Err(Error::InvalidMonth(13))
        ));
    }
}
