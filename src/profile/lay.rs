//! Layer (LAY) bottomside: sum of 4 Rawer layers, fitted in log10 space
#[cfg(feature = "log")]
use log::{debug, warn};

use nalgebra::{Matrix4, Vector4};

use crate::{
    conditions::Conditions,
    math::{d1lay, rlay},
    peak::PeakParameters,
    profile::bottomside::F2Bottomside,
    valley::ValleyParameters,
};

/// Weight of value constraints
const VALUE_WEIGHT: f64 = 1.0;

/// Weight of slope constraints
const SLOPE_WEIGHT: f64 = 100.0;

/// Largest acceptable fit residual (log10 units)
const MAX_RESIDUAL: f64 = 0.3;

/// Outcome of the layer fit
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayQuality {
    /// First choice of layer heights
    #[default]
    Ok,
    /// Fitted with the second choice of the F2 layer height
    SecondChoice,
    /// No acceptable fit: no density below hmF2
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Constraint {
    /// log10(N/NmF2) at given height
    Value { height: f64, target: f64 },
    /// d log10(N/NmF2) / dh at given height
    Slope { height: f64, target: f64 },
}

impl Constraint {
    fn weight(&self) -> f64 {
        match self {
            Self::Value { .. } => VALUE_WEIGHT,
            Self::Slope { .. } => SLOPE_WEIGHT,
        }
    }
    fn target(&self) -> f64 {
        match self {
            Self::Value { target, .. } | Self::Slope { target, .. } => *target,
        }
    }
}

/// hmF1 used by the layer bottomside: user value, or zenith angle dependent
pub(crate) fn f1_height(cond: &Conditions) -> f64 {
    cond.overrides
        .hmf1
        .unwrap_or(165.0 + 0.6428 * cond.zenith())
}

/// Fitted layer bottomside
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct LayerBottomside {
    pub nmf2: f64,
    pub hmf2: f64,
    pub amplitudes: [f64; 4],
    pub heights: [f64; 4],
    pub thickness: [f64; 4],
    pub quality: LayQuality,
}

impl LayerBottomside {
    /// Fits the four layers. `hmf1` is the layer F1 height ([f1_height]).
    pub fn new(cond: &Conditions, peaks: &PeakParameters, valley: &ValleyParameters, hmf1: f64) -> Self {
        let hmf2 = peaks.hmf2;
        let nmf2 = peaks.nmf2;
        let hhalf = peaks.half_density_height();
        let hv1 = peaks.hme + valley.width;
        let hv2 = valley.base_height(peaks.hme);
        let vner = valley.base_density(peaks.nme);
        let ratio = |n: f64| (n / nmf2).log10();

        let mut constraints = vec![Constraint::Value {
            height: hhalf,
            target: 0.5_f64.log10(),
        }];
        if peaks.f1_present && !cond.solar.f.night {
            constraints.push(Constraint::Value {
                height: hmf1,
                target: ratio(peaks.nmf1),
            });
            constraints.push(Constraint::Slope {
                height: hmf1,
                target: 0.0,
            });
        } else {
            let f2 = F2Bottomside::new(peaks);
            constraints.push(Constraint::Value {
                height: hmf1,
                target: ratio(f2.density(hmf1)),
            });
        }
        constraints.extend([
            Constraint::Value {
                height: hv1,
                target: ratio(peaks.nme),
            },
            Constraint::Value {
                height: hv2,
                target: ratio(vner),
            },
            Constraint::Value {
                height: peaks.hme,
                target: ratio(peaks.nme),
            },
            Constraint::Slope {
                height: peaks.hme,
                target: 0.0,
            },
            Constraint::Slope {
                height: hv2,
                target: 0.0,
            },
        ]);

        let thickness = [
            ((hmf2 - hhalf) / 2.0).max(5.0),
            (0.1 * (hmf2 - hmf1)).max(5.0),
            (valley.width / 4.0).max(2.0),
            3.0,
        ];
        let first = [hmf2, hmf1, hv2, peaks.hme];
        let second = [(hmf2 + hhalf) / 2.0, hmf1, hv2, peaks.hme];

        let mut layer = Self {
            nmf2,
            hmf2,
            amplitudes: [0.0; 4],
            heights: first,
            thickness,
            quality: LayQuality::Ok,
        };

        for (heights, quality) in [(first, LayQuality::Ok), (second, LayQuality::SecondChoice)] {
            layer.heights = heights;
            if let Some(amplitudes) = layer.fit(&constraints) {
                layer.amplitudes = amplitudes;
                layer.quality = quality;
                #[cfg(feature = "log")]
                if quality == LayQuality::SecondChoice && cond.verbose() {
                    debug!("layer bottomside: second choice of the F2 layer height");
                }
                return layer;
            }
        }

        #[cfg(feature = "log")]
        if cond.verbose() {
            warn!("layer bottomside: no acceptable fit, density omitted below hmF2");
        }
        layer.quality = LayQuality::Failed;
        layer
    }
    fn basis(&self, constraint: &Constraint, layer: usize) -> f64 {
        let (hx, sc) = (self.heights[layer], self.thickness[layer]);
        match constraint {
            Constraint::Value { height, .. } => rlay(*height, self.hmf2, sc, hx),
            Constraint::Slope { height, .. } => d1lay(*height, self.hmf2, sc, hx),
        }
    }
    /// Weighted least squares amplitudes, None when singular or
    /// when a value constraint is missed by more than [MAX_RESIDUAL]
    fn fit(&self, constraints: &[Constraint]) -> Option<[f64; 4]> {
        let mut normal = Matrix4::<f64>::zeros();
        let mut rhs = Vector4::<f64>::zeros();
        for c in constraints {
            let row = Vector4::from_fn(|i, _| self.basis(c, i));
            normal += c.weight() * row * row.transpose();
            rhs += c.weight() * c.target() * row;
        }
        let solution = normal.lu().solve(&rhs)?;
        if solution.iter().any(|a| !a.is_finite()) {
            return None;
        }
        let residual = constraints
            .iter()
            .filter(|c| matches!(c, Constraint::Value { .. }))
            .map(|c| {
                let model: f64 = (0..4).map(|i| solution[i] * self.basis(c, i)).sum();
                (model - c.target()).abs()
            })
            .fold(0.0_f64, f64::max);
        if residual > MAX_RESIDUAL {
            return None;
        }
        Some([solution[0], solution[1], solution[2], solution[3]])
    }
    /// log10(N / NmF2)
    pub fn log_ratio(&self, height: f64) -> f64 {
        (0..4)
            .map(|i| self.amplitudes[i] * rlay(height, self.hmf2, self.thickness[i], self.heights[i]))
            .sum()
    }
    /// Density (m⁻³) below hmF2, None after a failed fit
    pub fn density(&self, height: f64) -> Option<f64> {
        match self.quality {
            LayQuality::Failed => None,
            _ => Some(self.nmf2 * 10.0_f64.powf(self.log_ratio(height))),
        }
    }
}
