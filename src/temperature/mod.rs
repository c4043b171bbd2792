//! Neutral, ion and electron temperatures
#[cfg(feature = "log")]
use log::debug;

use crate::{
    conditions::Conditions,
    constants::{Heights, Tolerance},
    error::Error,
    geomag::FieldLine,
    math::{eptr, hpol, regula_falsi},
    options::ElectronTemperatureModel,
};

mod electron;
mod neutral;

pub(crate) use electron::ElectronTemperature;
pub(crate) use neutral::NeutralTemperature;

use electron::{REFERENCES, BRACE_THEIS_HEIGHTS, INTERCOSMOS_HEIGHTS};

/// Temperatures at one height (K)
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Temperatures {
    pub neutral: f64,
    pub ion: f64,
    pub electron: f64,
}

/// Ti profile: tangent to Tn at `hs`, Ti(430 km) anchored,
/// following the Te gradients above the Ti=Te crossing
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct IonTemperature {
    /// Transition height from Tn to Ti (km)
    pub hs: f64,
    /// Tn at hs
    pub tnhs: f64,
    /// Segment gradients (K/km)
    gradients: [f64; 5],
    /// Segment limits (km)
    limits: [f64; 4],
    /// Transition half widths (km)
    transitions: [f64; 4],
    /// Number of segments
    segments: usize,
}

impl IonTemperature {
    /// Ti (K), valid above hs
    pub fn ti(&self, height: f64) -> f64 {
        let mut sum = self.gradients[0] * (height - self.hs) + self.tnhs;
        for i in 0..self.segments - 1 {
            let (dti, hx) = (self.transitions[i], self.limits[i]);
            let aa = eptr(height, dti, hx);
            let bb = eptr(self.hs, dti, hx);
            sum += (self.gradients[i + 1] - self.gradients[i]) * (aa - bb) * dti;
        }
        sum
    }
}

/// Coarse to fine search of the lowest height where Ti reaches Te,
/// the step being divided by 10 at each pass. None below `top`.
fn crossing_height(ion: &IonTemperature, electron: &ElectronTemperature, top: f64) -> Option<f64> {
    let mut step = 500.0;
    let mut x = 500.0;
    loop {
        x += step;
        if x >= top {
            return None;
        }
        if ion.ti(x) < electron.te(x) {
            continue;
        }
        x -= step;
        step /= 10.0;
        if step <= 0.1 {
            return Some(x + 5.0 * step);
        }
    }
}

/// Temperature model of one request
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct TemperatureProfile {
    pub neutral: NeutralTemperature,
    pub electron: ElectronTemperature,
    pub ion: IonTemperature,
    /// Ti at 430 km (K)
    pub ti_anchor: f64,
    /// Ti = Te crossing height (km), if any below the top height
    pub crossing: Option<f64>,
}

impl TemperatureProfile {
    /// Builds the temperature model. `field_line` resolves the field
    /// at given height, for the Intercosmos reference values.
    pub(crate) fn new<F>(cond: &Conditions, field_line: F) -> Result<Self, Error>
    where
        F: Fn(f64) -> Result<FieldLine, Error>,
    {
        let hour = cond.local_hour;
        let mlat = cond.magnetic.latitude;
        let indices = &cond.indices;
        let (f1, f) = (&cond.solar.f1, &cond.solar.f);

        let neutral = NeutralTemperature::new(
            hour,
            cond.latitude,
            cond.solar.declination,
            indices.f107_daily,
            indices.f107_81,
        );
        let night = NeutralTemperature::new(
            0.0,
            cond.latitude,
            cond.solar.declination,
            indices.f107_daily,
            indices.f107_81,
        );

        let (hmax, tmax) = electron::te_maximum(mlat, hour, f1.sunrise, f1.sunset, &night);
        let brace_theis = electron::brace_theis(cond.magnetic.dip_latitude, hour, cond.local_season);

        let mut heights = [0.0; REFERENCES];
        let mut raw = [0.0; REFERENCES];
        heights[0] = Heights::TEMPERATURE_BOTTOM;
        raw[0] = neutral.tn(Heights::TEMPERATURE_BOTTOM);
        heights[1] = hmax;
        raw[1] = tmax;

        match cond.options.electron_temperature {
            ElectronTemperatureModel::BraceTheis => {
                heights[2..].copy_from_slice(&BRACE_THEIS_HEIGHTS);
                raw[2] = brace_theis[0];
                raw[3] = brace_theis[1];
                raw[4] = electron::aeros_600(mlat, hour, f.sunrise, f.sunset);
                raw[5] = brace_theis[2];
                raw[6] = brace_theis[3];
            },
            ElectronTemperatureModel::Intercosmos => {
                heights[2..].copy_from_slice(&INTERCOSMOS_HEIGHTS);
                raw[2] = brace_theis[0];
                for i in 3..REFERENCES {
                    let line = field_line(heights[i])?;
                    raw[i] = electron::intercosmos(
                        heights[i],
                        line.l_shell,
                        hour,
                        f.sunrise,
                        f.sunset,
                        indices.f107_daily,
                    );
                }
            },
        }

        if cond.options.te_ne_correlation {
            for (i, density) in cond.overrides.te_ne_densities.iter().enumerate() {
                if let Some(density) = density {
                    raw[i + 2] = electron::te_from_density(heights[i + 2], *density, -indices.covington);
                }
            }
        }

        let electron = ElectronTemperature::new(heights, raw, &neutral);

        // Ti(430 km), day (AEROS) and night values
        let anchor = Heights::TI_ANCHOR;
        let z1 = (-0.09 * mlat).exp();
        let ti_day = 1240.0 - 1400.0 * z1 / (1.0 + z1).powi(2);
        let abs_mlat = mlat.abs();
        let z3 = (abs_mlat * (0.47 + 0.024 * abs_mlat)).to_radians().cos();
        let ti_night = 1200.0 - 300.0 * z3.signum() * z3.abs().sqrt();
        let mut ti_anchor = if ti_day > ti_night {
            hpol(hour, ti_day, ti_night, f.sunrise, f.sunset, 1.0, 1.0)
        } else {
            ti_night
        };
        let tn_anchor = night.tn(anchor);
        let te_anchor = electron.te(anchor).max(tn_anchor);
        ti_anchor = ti_anchor.min(te_anchor).max(tn_anchor);

        // tangent on the Tn profile reaching Ti(430 km)
        let (low, high) = (130.0, 500.0);
        let tangent = |h: f64| neutral.tangent(h, anchor);
        let hs = regula_falsi(
            low,
            high,
            tangent(low),
            tangent(high),
            Tolerance::TRANSITION,
            ti_anchor,
            tangent,
        );
        let (hs, tnhs, slope) = match hs {
            Some(hs) => (hs, neutral.tn(hs), neutral.dtndh(hs)),
            None => {
                #[cfg(feature = "log")]
                if cond.verbose() {
                    debug!("Ti: no tangent to Tn reaching {:.0} K at 430 km", ti_anchor);
                }
                let hs = 200.0;
                let tnhs = neutral.tn(hs);
                (hs, tnhs, (ti_anchor - tnhs) / (anchor - hs))
            },
        };

        let mut ion = IonTemperature {
            hs,
            tnhs,
            gradients: [
                slope,
                hpol(hour, 3.0, 0.0, f.sunrise, f.sunset, 1.0, 1.0),
                0.0,
                0.0,
                0.0,
            ],
            limits: [anchor, 0.0, 0.0, 0.0],
            transitions: [10.0, 10.0, 20.0, 20.0],
            segments: 2,
        };

        let crossing = crossing_height(&ion, &electron, electron.top());
        if let Some(crossing) = crossing {
            // Ti follows Te above the crossing
            let g = &electron.gradients;
            ion.limits[1] = crossing;
            if crossing > heights[5] {
                ion.segments = 3;
                ion.gradients[2] = g[5];
            } else if crossing > heights[4] {
                ion.segments = 4;
                ion.gradients[2] = g[4];
                ion.gradients[3] = g[5];
                ion.limits[2] = heights[5];
            } else {
                ion.segments = 5;
                ion.transitions[0] = 5.0;
                ion.transitions[1] = 5.0;
                ion.gradients[2] = g[3];
                ion.gradients[3] = g[4];
                ion.gradients[4] = g[5];
                ion.limits[2] = heights[4];
                ion.limits[3] = heights[5];
            }
        }

        Ok(Self {
            neutral,
            electron,
            ion,
            ti_anchor,
            crossing,
        })
    }
    /// Highest height with temperatures (km)
    pub fn top(&self) -> f64 {
        self.electron.top()
    }
    /// Te maximum (height km, K)
    pub fn te_peak(&self) -> (f64, f64) {
        (self.electron.heights[1], self.electron.values[1])
    }
    /// Temperatures with Tn <= Ti <= Te, None outside 120 km .. top height
    pub fn at(&self, height: f64) -> Option<Temperatures> {
        if height < Heights::TEMPERATURE_BOTTOM || height > self.top() {
            return None;
        }
        let neutral = self.neutral.tn(height);
        let ion = if height >= self.ion.hs {
            self.ion.ti(height).max(neutral)
        } else {
            neutral
        };
        let electron = self.electron.te(height).max(ion);
        Some(Temperatures {
            neutral,
            ion,
            electron,
        })
    }
}
