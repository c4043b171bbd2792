//! Bivariate harmonic maps (time harmonics x geographic functions)
use crate::error::Error;

/// Kind of harmonic map
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapKind {
    /// foF2 map
    CriticalFrequency,
    /// M(3000)F2 map
    PropagationFactor,
}

impl MapKind {
    /// Maximal time harmonic order
    pub const fn order(&self) -> usize {
        match self {
            Self::CriticalFrequency => 6,
            Self::PropagationFactor => 4,
        }
    }
    /// Number of coefficients per geographic function (2 * order + 1)
    pub const fn harmonics(&self) -> usize {
        2 * self.order() + 1
    }
    /// Number of geographic functions
    pub const fn terms(&self) -> usize {
        match self {
            Self::CriticalFrequency => 76,
            Self::PropagationFactor => 49,
        }
    }
    /// Highest power of sin(modip) per longitude order
    pub const fn latitude_powers(&self) -> &'static [usize] {
        match self {
            Self::CriticalFrequency => &[11, 11, 8, 4, 1, 0, 0, 0, 0],
            Self::PropagationFactor => &[6, 7, 5, 2, 1, 0, 0],
        }
    }
    /// Number of coefficients for both activity brackets
    pub const fn len(&self) -> usize {
        2 * self.harmonics() * self.terms()
    }
}

/// [HarmonicMap] stores the coefficients of one month, for both
/// activity brackets (index 0 and index 100).
/// Layout is harmonic index fastest, then geographic term, then bracket.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HarmonicMap {
    pub kind: MapKind,
    values: Vec<f64>,
}

impl HarmonicMap {
    /// Builds a new [HarmonicMap] from raw values, laid out as in coefficient files
    pub fn new(kind: MapKind, values: Vec<f64>) -> Result<Self, Error> {
        if values.len() != kind.len() {
            return Err(Error::MapDimension);
        }
        Ok(Self { kind, values })
    }
    /// Coefficient accessor, None when out of bounds
    pub fn get(&self, harmonic: usize, term: usize, bracket: usize) -> Option<f64> {
        if harmonic >= self.kind.harmonics() || term >= self.kind.terms() || bracket > 1 {
            return None;
        }
        let index = harmonic + self.kind.harmonics() * (term + self.kind.terms() * bracket);
        self.values.get(index).copied()
    }
    /// Mutable coefficient accessor
    pub fn get_mut(&mut self, harmonic: usize, term: usize, bracket: usize) -> Option<&mut f64> {
        if harmonic >= self.kind.harmonics() || term >= self.kind.terms() || bracket > 1 {
            return None;
        }
        let index = harmonic + self.kind.harmonics() * (term + self.kind.terms() * bracket);
        self.values.get_mut(index)
    }
    /// Interpolates both brackets, `weight` being the share of the high activity bracket.
    pub fn at_activity(&self, weight: f64) -> HarmonicSet {
        let size = self.kind.harmonics() * self.kind.terms();
        let (low, high) = self.values.split_at(size);
        HarmonicSet {
            kind: self.kind,
            values: low
                .iter()
                .zip(high.iter())
                .map(|(low, high)| low * (1.0 - weight) + high * weight)
                .collect(),
        }
    }
}

/// Coefficients of a single activity level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HarmonicSet {
    pub kind: MapKind,
    values: Vec<f64>,
}

impl HarmonicSet {
    /// Evaluates the map at given modified dip, latitude, east longitude (degrees)
    /// and universal time (hours).
    pub fn evaluate(&self, modip: f64, latitude: f64, longitude: f64, ut: f64) -> f64 {
        let order = self.kind.order();
        let harmonics = self.kind.harmonics();
        let powers = self.kind.latitude_powers();

        let hou = (15.0 * ut - 180.0).to_radians();
        let (s1, c1) = hou.sin_cos();
        let mut sines = vec![s1; order];
        let mut cosines = vec![c1; order];
        for i in 1..order {
            cosines[i] = c1 * cosines[i - 1] - s1 * sines[i - 1];
            sines[i] = c1 * sines[i - 1] + s1 * cosines[i - 1];
        }

        // diurnal coefficient of each geographic function
        let coef = self
            .values
            .chunks_exact(harmonics)
            .map(|sfe| {
                let mut c = sfe[0];
                for j in 0..order {
                    c += sfe[2 * j + 1] * sines[j] + sfe[2 * j + 2] * cosines[j];
                }
                c
            })
            .collect::<Vec<_>>();

        let smodip = modip.to_radians().sin();
        let mut xsinx = Vec::with_capacity(powers[0] + 2);
        xsinx.push(1.0);

        let mut sum = coef[0];
        let mut ss = smodip;
        for j in 0..powers[0] {
            sum += coef[1 + j] * ss;
            xsinx.push(ss);
            ss *= smodip;
        }
        xsinx.push(ss);

        let mut np = powers[0] + 1;
        let clat = latitude.to_radians().cos();
        let mut ss = clat;
        for (j, power) in powers.iter().enumerate().skip(1) {
            let (s2, s1) = (longitude * j as f64).to_radians().sin_cos();
            for x in xsinx.iter().take(power + 1) {
                sum += coef[np] * x * ss * s1;
                sum += coef[np + 1] * x * ss * s2;
                np += 2;
            }
            ss *= clat;
        }
        sum
    }
}
