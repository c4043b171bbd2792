//! Profile engine: resolves a request and samples every sub-model
//! over the altitude grid
#[cfg(feature = "log")]
use log::debug;

use crate::{
    coefficients::{CoefficientSource, CoefficientStore},
    conditions::Conditions,
    constants::Heights,
    drift,
    epoch::{EpochSpec, Season},
    error::Error,
    geomag::{FieldLine, GeomagneticResolver},
    grid::AltitudeGrid,
    indices::IndexProvider,
    ions::{IonComposition, IonDensities},
    options::{BottomsideVariant, DRegionVariant, LegacySwitches, ModelOptions, TopsideVariant, UserOverrides},
    peak::{F1Probabilities, F2MapValues, PeakParameters},
    profile::{lay, DRegionDiagnostics, DensityProfile, LayQuality},
    spread_f,
    temperature::TemperatureProfile,
    valley::ValleyParameters,
};

/// Height above which the TEC integration step is 10 km (km)
const TEC_COARSE_HEIGHT: f64 = 1000.0;

/// Geographic location
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Latitude (degrees)
    pub latitude: f64,
    /// East longitude (degrees, -180..180)
    pub longitude: f64,
}

impl Location {
    /// Builds a new [Location]. Longitude is wrapped to -180..180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
            return Err(Error::InvalidLocation);
        }
        let mut longitude = longitude.rem_euclid(360.0);
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
    /// Location and altitude (km) of an ECEF position (m), WGS84
    pub fn from_ecef(x: f64, y: f64, z: f64) -> Result<(Self, f64), Error> {
        let (lat, lon, alt) = map_3d::ecef2geodetic(x, y, z, map_3d::Ellipsoid::WGS84);
        let location = Self::new(map_3d::rad2deg(lat), map_3d::rad2deg(lon))?;
        Ok((location, alt / 1000.0))
    }
}

/// Profile request
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileRequest {
    pub location: Location,
    pub epoch: EpochSpec,
    pub grid: AltitudeGrid,
    pub options: ModelOptions,
    pub overrides: UserOverrides,
    /// Upper height of the vertical TEC integration (km), if requested
    pub tec_upper: Option<f64>,
}

impl ProfileRequest {
    /// New request with default options and no overrides
    pub fn new(location: Location, epoch: EpochSpec, grid: AltitudeGrid) -> Self {
        Self {
            location,
            epoch,
            grid,
            options: ModelOptions::default(),
            overrides: UserOverrides::default(),
            tec_upper: None,
        }
    }
    /// Copies and returns [Self] with given options
    pub fn with_options(&self, options: ModelOptions) -> Self {
        let mut s = *self;
        s.options = options;
        s
    }
    /// Copies and returns [Self] with given overrides
    pub fn with_overrides(&self, overrides: UserOverrides) -> Self {
        let mut s = *self;
        s.overrides = overrides;
        s
    }
    /// Copies and returns [Self] configured by a legacy switch bundle:
    /// options derive from the switches, and only the overrides
    /// they enable are retained.
    pub fn with_legacy_switches(&self, switches: LegacySwitches, overrides: &UserOverrides) -> Self {
        let mut s = *self;
        s.options = switches.options();
        s.overrides = switches.honoured(overrides);
        s
    }
    /// Copies and returns [Self] with the vertical TEC integrated up to `upper` km
    pub fn with_tec(&self, upper: f64) -> Self {
        let mut s = *self;
        s.tec_upper = Some(upper);
        s
    }
    /// Copies and returns [Self] at another location
    pub fn with_location(&self, location: Location) -> Self {
        let mut s = *self;
        s.location = location;
        s
    }
}

/// Values at one grid height. None: not computed, or outside
/// the validity band of the model.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPoint {
    /// Height (km)
    pub height: f64,
    /// Electron density (m⁻³)
    pub electron_density: Option<f64>,
    /// Neutral temperature (K)
    pub neutral_temperature: Option<f64>,
    /// Ion temperature (K)
    pub ion_temperature: Option<f64>,
    /// Electron temperature (K)
    pub electron_temperature: Option<f64>,
    pub ions: IonDensities,
}

/// Vertical total electron content
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tec {
    /// Upper integration height (km)
    pub upper: f64,
    /// Total content (m⁻²)
    pub total: f64,
    /// Share of the content above hmF2 (%)
    pub topside: f64,
}

impl Tec {
    /// Total content in TEC units (10¹⁶ m⁻²)
    pub fn tecu(&self) -> f64 {
        self.total / 1.0E16
    }
}

/// Scalar outputs of one request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedScalars {
    /// NmF2 (m⁻³)
    pub nmf2: f64,
    /// hmF2 (km)
    pub hmf2: f64,
    pub fof2: f64,
    /// NmF1 (m⁻³), when the F1 layer is present
    pub nmf1: Option<f64>,
    /// hmF1 (km), when the F1 layer is present
    pub hmf1: Option<f64>,
    pub fof1: Option<f64>,
    /// NmE (m⁻³)
    pub nme: f64,
    /// hmE (km)
    pub hme: f64,
    pub foe: f64,
    /// NmD (m⁻³)
    pub nmd: f64,
    /// hmD (km)
    pub hmd: f64,
    /// Half density height (km)
    pub half_density_height: f64,
    /// Bottomside thickness (km)
    pub b0: f64,
    /// Bottomside shape
    pub b1: f64,
    pub m3000: f64,
    /// Valley base density (m⁻³)
    pub valley_base_density: f64,
    /// Valley base height (km)
    pub valley_base_height: f64,
    /// Valley top (km)
    pub hef: f64,
    /// True when the intermediate region boundary search failed
    pub used_fallback: bool,
    /// Layer fit outcome, in layer mode
    pub lay_quality: Option<LayQuality>,
    /// Te maximum (K)
    pub te_peak: Option<f64>,
    /// Height of the Te maximum (km)
    pub te_peak_height: Option<f64>,
    /// (height km, Te K) at the reference heights above the Te maximum
    pub te_references: Vec<(f64, f64)>,
    /// Ti at 430 km (K)
    pub ti_anchor: Option<f64>,
    /// Ti = Te crossing height (km)
    pub crossing_height: Option<f64>,
    /// Zenith angle (degrees)
    pub zenith: f64,
    /// Zenith angle at local noon (degrees)
    pub noon_zenith: f64,
    /// Declination (degrees)
    pub declination: f64,
    /// Inclination (degrees)
    pub dip: f64,
    /// Dip latitude (degrees)
    pub dip_latitude: f64,
    /// Modified dip latitude (degrees)
    pub modip: f64,
    /// Geomagnetic latitude (degrees)
    pub magnetic_latitude: f64,
    /// E region and valley latitude scaling
    pub dela: f64,
    /// Sunrise at 200 km (LT hours)
    pub sunrise: f64,
    /// Sunset at 200 km (LT hours)
    pub sunset: f64,
    /// Northern hemisphere season
    pub season: Season,
    /// Season of the hemisphere of the location
    pub local_season: Season,
    pub local_hour: f64,
    pub universal_hour: f64,
    pub day_of_year: u16,
    pub rz12: f64,
    pub ig12: f64,
    /// Covington index
    pub covington: f64,
    /// Daily F10.7
    pub f107_daily: f64,
    /// 81-day mean F10.7
    pub f107_81: f64,
    /// F1 shape parameter
    pub c1: f64,
    pub f1_probabilities: F1Probabilities,
    /// Storm correction applied to foF2
    pub storm_ratio: Option<f64>,
    /// Equatorial vertical drift (m/s)
    pub drift: Option<f64>,
    /// Spread-F occurrence probability
    pub spread_f: Option<f64>,
    /// Vertical TEC, if requested
    pub tec: Option<Tec>,
    /// D region model comparison, with the special D region option
    pub d_region: Option<DRegionDiagnostics>,
}

/// [Profile] is the result of one request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Profile {
    /// Grid points, height ascending
    pub points: Vec<GridPoint>,
    pub scalars: DerivedScalars,
}

impl Profile {
    /// Grid heights (km)
    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.height)
    }
    /// (height, electron density) pairs, where computed
    pub fn electron_densities(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.electron_density.map(|ne| (p.height, ne)))
    }
}

/// Every sub-model of one request, ready for evaluation
pub(crate) struct Model {
    cond: Conditions,
    pub peaks: PeakParameters,
    pub valley: ValleyParameters,
    pub density: DensityProfile,
    pub temperature: Option<TemperatureProfile>,
    pub ions: Option<IonComposition>,
}

impl Model {
    fn field_line<G: GeomagneticResolver>(&self, field: &G, height: f64) -> Result<FieldLine, Error> {
        field.field_line(
            self.cond.latitude,
            self.cond.longitude,
            height,
            self.cond.decimal_year,
            self.cond.options.field,
        )
    }
    /// Density regardless of the options, None outside the validity band
    pub fn density<G: GeomagneticResolver>(&self, field: &G, height: f64) -> Result<Option<f64>, Error> {
        let l_shell = if self.density.needs_l_shell(height) {
            Some(self.field_line(field, height)?.l_shell)
        } else {
            None
        };
        Ok(self.density.density(height, l_shell))
    }
    fn point<G: GeomagneticResolver>(&self, field: &G, height: f64) -> Result<GridPoint, Error> {
        let options = &self.cond.options;
        let needs_density = options.density || self.ions.is_some();
        let density = if needs_density {
            self.density(field, height)?
        } else {
            None
        };
        let temperatures = self.temperature.and_then(|t| t.at(height));
        let ions = self
            .ions
            .and_then(|ions| ions.at(height, density))
            .unwrap_or_default();
        Ok(GridPoint {
            height,
            electron_density: density.filter(|_| options.density),
            neutral_temperature: temperatures.map(|t| t.neutral),
            ion_temperature: temperatures.map(|t| t.ion),
            electron_temperature: temperatures.map(|t| t.electron),
            ions,
        })
    }
    /// Trapezoidal integration of the density from the lowest density
    /// height to `upper` (km): 1 km steps below 1000 km, 10 km above
    fn vertical_tec<G: GeomagneticResolver>(&self, field: &G, upper: f64) -> Result<Tec, Error> {
        let hmf2 = self.peaks.hmf2;
        let sample = |h: f64| -> Result<f64, Error> {
            if h < self.density.bottom {
                return Ok(0.0);
            }
            let l_shell = if self.density.needs_l_shell(h) {
                Some(self.field_line(field, h)?.l_shell)
            } else {
                None
            };
            Ok(self.density.evaluate(h, l_shell).unwrap_or(0.0))
        };
        let (mut total, mut topside) = (0.0, 0.0);
        let mut h = Heights::DENSITY_BOTTOM_DAY;
        let mut n0 = sample(h)?;
        while h < upper {
            let step = if h < TEC_COARSE_HEIGHT { 1.0 } else { 10.0 };
            let next = (h + step).min(upper);
            let n1 = sample(next)?;
            let area = 0.5 * (n0 + n1) * (next - h) * 1.0E3;
            total += area;
            if h >= hmf2 {
                topside += area;
            } else if next > hmf2 {
                topside += area * (next - hmf2) / (next - h);
            }
            h = next;
            n0 = n1;
        }
        Ok(Tec {
            upper,
            total,
            topside: if total > 0.0 {
                100.0 * topside / total
            } else {
                0.0
            },
        })
    }
    fn scalars(&self) -> DerivedScalars {
        let cond = &self.cond;
        let peaks = &self.peaks;
        let valley = &self.valley;
        let f1 = peaks.hmf1.filter(|_| peaks.f1_present);
        let temperature = self.temperature.as_ref();
        let d_region = match cond.options.d_region {
            DRegionVariant::Special => Some(DRegionDiagnostics::new(cond, &self.density.d_region, |h| {
                self.density.standard(h, None).unwrap_or(0.0)
            })),
            DRegionVariant::Standard => None,
        };
        DerivedScalars {
            nmf2: peaks.nmf2,
            hmf2: peaks.hmf2,
            fof2: peaks.fof2,
            nmf1: f1.map(|_| peaks.nmf1),
            hmf1: f1,
            fof1: f1.map(|_| peaks.fof1),
            nme: peaks.nme,
            hme: peaks.hme,
            foe: peaks.foe,
            nmd: peaks.nmd,
            hmd: peaks.hmd,
            half_density_height: peaks.half_density_height(),
            b0: peaks.b0,
            b1: peaks.b1,
            m3000: peaks.m3000,
            valley_base_density: valley.base_density(peaks.nme),
            valley_base_height: valley.base_height(peaks.hme),
            hef: valley.hef,
            used_fallback: valley.used_fallback,
            lay_quality: self.density.lay_quality(),
            te_peak: temperature.map(|t| t.te_peak().1),
            te_peak_height: temperature.map(|t| t.te_peak().0),
            te_references: temperature
                .map(|t| {
                    t.electron
                        .heights
                        .iter()
                        .zip(t.electron.values.iter())
                        .skip(2)
                        .map(|(h, te)| (*h, *te))
                        .collect()
                })
                .unwrap_or_default(),
            ti_anchor: temperature.map(|t| t.ti_anchor),
            crossing_height: temperature.and_then(|t| t.crossing),
            zenith: cond.zenith(),
            noon_zenith: cond.solar.noon_zenith,
            declination: cond.solar.declination,
            dip: cond.magnetic.dip,
            dip_latitude: cond.magnetic.dip_latitude,
            modip: cond.magnetic.modip,
            magnetic_latitude: cond.magnetic.latitude,
            dela: cond.dela(),
            sunrise: cond.solar.f1.sunrise,
            sunset: cond.solar.f1.sunset,
            season: cond.season,
            local_season: cond.local_season,
            local_hour: cond.local_hour,
            universal_hour: cond.universal_hour,
            day_of_year: cond.doy,
            rz12: cond.indices.rz12,
            ig12: cond.indices.ig12,
            covington: cond.indices.covington,
            f107_daily: cond.indices.f107_daily,
            f107_81: cond.indices.f107_81,
            c1: peaks.c1,
            f1_probabilities: peaks.f1_probabilities,
            storm_ratio: peaks.storm_ratio,
            drift: drift::drift(cond),
            spread_f: spread_f::probability(cond),
            tec: None,
            d_region,
        }
    }
}

/// [IriEngine] computes ionosphere profiles. It owns the coefficient
/// cache, which is reused from one request to the next.
#[derive(Debug)]
pub struct IriEngine<C: CoefficientSource, I: IndexProvider, G: GeomagneticResolver> {
    store: CoefficientStore<C>,
    indices: I,
    field: G,
}

impl<C: CoefficientSource, I: IndexProvider, G: GeomagneticResolver> IriEngine<C, I, G> {
    /// Builds a new [IriEngine] from its collaborators
    pub fn new(coefficients: C, indices: I, field: G) -> Self {
        Self {
            store: CoefficientStore::new(coefficients),
            indices,
            field,
        }
    }
    /// Coefficient cache
    pub fn store(&self) -> &CoefficientStore<C> {
        &self.store
    }
    /// Geomagnetic resolver
    pub fn field(&self) -> &G {
        &self.field
    }
    /// Resolves every sub-model of a request
    pub(crate) fn model(&mut self, request: &ProfileRequest) -> Result<Model, Error> {
        let location = &request.location;
        let options = request.options;
        let cond = Conditions::resolve(
            location.latitude,
            location.longitude,
            &request.epoch,
            options,
            request.overrides,
            &self.indices,
            &self.field,
        )?;

        #[cfg(feature = "log")]
        if cond.verbose() {
            debug!(
                "({:.2}°, {:.2}°) {}-{:02}-{:02} LT={:.2} UT={:.2} Rz12={:.1} IG12={:.1}",
                cond.latitude,
                cond.longitude,
                cond.year,
                cond.month,
                request.epoch.day,
                cond.local_hour,
                cond.universal_hour,
                cond.indices.rz12,
                cond.indices.ig12
            );
        }

        let overrides = &cond.overrides;
        let skip_maps = overrides.f2_peak.is_some()
            && overrides.f2_height.is_some()
            && options.topside != TopsideVariant::NeQuick;
        let maps = if skip_maps {
            None
        } else {
            let table = self.store.table(
                options.f2_map,
                cond.year,
                cond.month,
                request.epoch.day,
                &cond.indices.months,
            )?;
            let modip = cond.magnetic.modip;
            Some(F2MapValues {
                fof2: table.fof2(modip, cond.latitude, cond.longitude, cond.universal_hour),
                m3000: table.m3000(modip, cond.latitude, cond.longitude, cond.universal_hour),
            })
        };

        let mut peaks = PeakParameters::solve(&cond, maps)?;
        let valley = match options.bottomside {
            BottomsideVariant::Analytic => ValleyParameters::solve(&cond, &mut peaks),
            BottomsideVariant::Layer => {
                let valley = ValleyParameters::new(&cond, &peaks);
                let hmf1 = lay::f1_height(&cond);
                let suppressed =
                    peaks.nme >= 0.9 * peaks.nmf1 || hmf1 <= peaks.hme || hmf1 >= peaks.hmf2;
                if peaks.f1_present && !suppressed {
                    peaks.hmf1 = Some(hmf1);
                } else {
                    #[cfg(feature = "log")]
                    if peaks.f1_present && cond.verbose() {
                        debug!("F1 layer suppressed: NmE={:.3E} NmF1={:.3E}", peaks.nme, peaks.nmf1);
                    }
                    peaks.suppress_f1();
                }
                valley
            },
        };

        let density = DensityProfile::new(&cond, &peaks, &valley);

        let temperature = if options.temperatures {
            let field = &self.field;
            let (lat, lon, year) = (cond.latitude, cond.longitude, cond.decimal_year);
            Some(TemperatureProfile::new(&cond, |h| {
                field.field_line(lat, lon, h, year, options.field)
            })?)
        } else {
            None
        };

        let ions = if options.ions {
            Some(IonComposition::new(&cond))
        } else {
            None
        };

        Ok(Model {
            cond,
            peaks,
            valley,
            density,
            temperature,
            ions,
        })
    }
    /// Computes the profile of a request over its altitude grid
    pub fn profile(&mut self, request: &ProfileRequest) -> Result<Profile, Error> {
        let model = self.model(request)?;
        let points = request
            .grid
            .altitudes()
            .map(|h| model.point(&self.field, h))
            .collect::<Result<Vec<_>, Error>>()?;
        let mut scalars = model.scalars();
        if let Some(upper) = request.tec_upper {
            scalars.tec = Some(model.vertical_tec(&self.field, upper)?);
        }
        Ok(Profile { points, scalars })
    }
    /// Vertical TEC of a request, up to `upper` km
    pub fn vertical_tec(&mut self, request: &ProfileRequest, upper: f64) -> Result<Tec, Error> {
        if !upper.is_finite() {
            return Err(Error::InvalidGrid);
        }
        let model = self.model(request)?;
        model.vertical_tec(&self.field, upper)
    }
    /// Electron density (m⁻³) of a request at a single height,
    /// None outside the validity band
    pub fn electron_density(&mut self, request: &ProfileRequest, height: f64) -> Result<Option<f64>, Error> {
        let model = self.model(request)?;
        model.density(&self.field, height)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn location() {
        let loc = Location::new(40.0, 285.0).unwrap();
        assert_eq!(loc.longitude, -75.0);
        assert_eq!(Location::new(40.0, -75.0).unwrap().longitude, -75.0);
        assert_eq!(Location::new(0.0, 180.0).unwrap().longitude, 180.0);
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());

        let (loc, alt) = Location::from_ecef(6378137.0, 0.0, 0.0).unwrap();
        assert!(loc.latitude.abs() < 1E-9 && loc.longitude.abs() < 1E-9);
        assert!(alt.abs() < 1E-6);
    }
    #[test]
    fn request_builder() {
        let request = ProfileRequest::new(
            Location::new(40.0, -75.0).unwrap(),
            EpochSpec::local(2007, 6, 21, 12.0).unwrap(),
            AltitudeGrid::new(100.0, 500.0, 50.0).unwrap(),
        );
        assert_eq!(request.options, ModelOptions::default());
        assert!(request.tec_upper.is_none());
        let overrides = UserOverrides {
            rz12: Some(80.0),
            hmf1: Some(180.0),
            ..Default::default()
        };
        let legacy = request.with_legacy_switches(
            LegacySwitches::USER_RZ12 | LegacySwitches::TOPSIDE_A | LegacySwitches::TOPSIDE_B,
            &overrides,
        );
        assert_eq!(legacy.options.topside, TopsideVariant::Legacy);
        assert_eq!(legacy.overrides.rz12, Some(80.0));
        assert!(legacy.overrides.hmf1.is_none());
        assert_eq!(request.with_tec(1000.0).tec_upper, Some(1000.0));
    }
}
