//! `ig_rz.dat` monthly indices
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::{
    error::{Error, ParsingError},
    indices::{IndexProvider, MonthlyIndices},
};

/// [IgRzTable] holds 12-month running means of IG and Rz,
/// from the month preceding `start` up to the month following `end`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IgRzTable {
    /// Date of last update (day, month, year)
    pub updated: (u8, u8, i32),
    /// First month described (year, month)
    pub start: (i32, u8),
    /// Last month described (year, month)
    pub end: (i32, u8),
    ig12: Vec<f64>,
    rz12: Vec<f64>,
}

fn tokens(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

impl IgRzTable {
    /// Parses an `ig_rz.dat` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let fd = std::fs::File::open(path)?;
        Self::from_reader(fd)
    }
    /// Parses `ig_rz.dat` content: update date (dd,mm,yyyy), time span
    /// (imst,iyst,imend,iyend), then IG12 values and Rz12 values.
    /// Lines starting with `#` are comments.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            if line.trim_start().starts_with('#') {
                continue;
            }
            content.push_str(&line);
            content.push('\n');
        }

        let mut tokens = tokens(&content);
        let mut header = [0_i32; 7];
        for (i, value) in header.iter_mut().enumerate() {
            let token = tokens.next().ok_or(if i < 3 {
                ParsingError::IndexHeader
            } else {
                ParsingError::IndexTimeSpan
            })?;
            *value = i32::from_str(token.trim()).map_err(|_| {
                if i < 3 {
                    ParsingError::IndexHeader
                } else {
                    ParsingError::IndexTimeSpan
                }
            })?;
        }

        let [upd_d, upd_m, upd_y, imst, iyst, imend, iyend] = header;
        if !(1..=12).contains(&imst) || !(1..=12).contains(&imend) {
            return Err(ParsingError::IndexTimeSpan.into());
        }
        let months = (iyend - iyst) * 12 + imend - imst + 1;
        if months < 1 {
            return Err(ParsingError::IndexTimeSpan.into());
        }
        let count = months as usize + 2;

        let values = tokens
            .map(|t| f64::from_str(t).map_err(|_| ParsingError::IndexValue))
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() < 2 * count {
            return Err(ParsingError::IndexCount {
                found: values.len(),
                expected: 2 * count,
            }
            .into());
        }

        Ok(Self {
            updated: (upd_d as u8, upd_m as u8, upd_y),
            start: (iyst, imst as u8),
            end: (iyend, imend as u8),
            ig12: values[..count].to_vec(),
            rz12: values[count..2 * count].to_vec(),
        })
    }
    fn index(&self, year: i32, month: u8) -> Option<usize> {
        let offset = (year - self.start.0) * 12 + month as i32 - self.start.1 as i32 + 1;
        if offset < 0 || offset as usize >= self.ig12.len() {
            None
        } else {
            Some(offset as usize)
        }
    }
}

impl IndexProvider for IgRzTable {
    fn monthly(&self, year: i32, month: u8) -> Option<MonthlyIndices> {
        let index = self.index(year, month)?;
        Some(MonthlyIndices {
            rz12: *self.rz12.get(index)?,
            ig12: *self.ig12.get(index)?,
        })
    }
}
