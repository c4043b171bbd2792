//! Electron density profile
use crate::{
    conditions::Conditions,
    constants::Heights,
    options::{BottomsideVariant, DRegionVariant},
    peak::PeakParameters,
    valley::ValleyParameters,
};

pub(crate) mod bottomside;
pub(crate) mod dregion;
pub(crate) mod lay;
pub(crate) mod topside;

pub use dregion::{DRegionDiagnostics, DANILOV_KNOBS, DIAGNOSTIC_HEIGHTS};
pub use lay::LayQuality;

use bottomside::AnalyticBottomside;
use dregion::DRegion;
use lay::LayerBottomside;
use topside::Topside;

/// Bottomside formalism, once resolved
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Bottomside {
    Analytic(AnalyticBottomside),
    Layer(LayerBottomside),
}

/// Complete density model of one request
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DensityProfile {
    pub hmf2: f64,
    /// Lowest height with a density (km)
    pub bottom: f64,
    pub bottomside: Bottomside,
    pub topside: Topside,
    pub d_region: DRegion,
    /// Solar zenith angle and daily flux, when FIRI replaces the lower heights
    special_d_region: Option<(f64, f64)>,
}

impl DensityProfile {
    /// Builds the density model. `valley` must have been solved for
    /// the [BottomsideVariant::Analytic] bottomside.
    pub(crate) fn new(cond: &Conditions, peaks: &PeakParameters, valley: &ValleyParameters) -> Self {
        let d_region = DRegion::new(cond, peaks);
        let bottomside = match cond.options.bottomside {
            BottomsideVariant::Analytic => {
                Bottomside::Analytic(AnalyticBottomside::new(peaks, valley, d_region))
            },
            BottomsideVariant::Layer => Bottomside::Layer(LayerBottomside::new(
                cond,
                peaks,
                valley,
                lay::f1_height(cond),
            )),
        };
        let special_d_region = match cond.options.d_region {
            DRegionVariant::Special => Some((cond.zenith(), cond.indices.f107_daily)),
            DRegionVariant::Standard => None,
        };
        Self {
            hmf2: peaks.hmf2,
            bottom: if cond.solar.d.night {
                Heights::DENSITY_BOTTOM_NIGHT
            } else {
                Heights::DENSITY_BOTTOM_DAY
            },
            bottomside,
            topside: Topside::new(cond, peaks),
            d_region,
            special_d_region,
        }
    }
    /// Layer fit outcome, in layer mode
    pub fn lay_quality(&self) -> Option<LayQuality> {
        match &self.bottomside {
            Bottomside::Layer(layer) => Some(layer.quality),
            Bottomside::Analytic(_) => None,
        }
    }
    /// True when [Self::density] expects the L value at this height
    pub fn needs_l_shell(&self, height: f64) -> bool {
        self.topside.needs_l_shell(height)
    }
    /// Density (m⁻³) regardless of the validity band
    pub(crate) fn evaluate(&self, height: f64, l_shell: Option<f64>) -> Option<f64> {
        if let Some((zenith, f107)) = self.special_d_region {
            if height <= Heights::SPECIAL_D_REGION_TOP {
                return dregion::firi(height, zenith, f107);
            }
        }
        self.standard(height, l_shell)
    }
    /// Density (m⁻³) of the standard D region, bottomside and topside models
    pub(crate) fn standard(&self, height: f64, l_shell: Option<f64>) -> Option<f64> {
        if height >= self.hmf2 {
            return Some(self.topside.density(height, l_shell));
        }
        match &self.bottomside {
            Bottomside::Analytic(analytic) => Some(analytic.density(height)),
            Bottomside::Layer(layer) => {
                if height < self.d_region.hme {
                    Some(self.d_region.density(height))
                } else {
                    layer.density(height)
                }
            },
        }
    }
    /// Density (m⁻³), None outside the validity band or where
    /// the selected model is undefined
    pub fn density(&self, height: f64, l_shell: Option<f64>) -> Option<f64> {
        if height < self.bottom || height > Heights::DENSITY_TOP {
            return None;
        }
        self.evaluate(height, l_shell)
    }
}
