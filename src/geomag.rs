//! Geomagnetic geometry
use crate::{
    constants::Earth,
    error::Error,
    options::FieldModel,
};

/// Magnetic geometry at one location
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagneticGeometry {
    /// Inclination (degrees)
    pub dip: f64,
    /// Modified dip latitude (Rawer), in degrees
    pub modip: f64,
    /// Dip latitude, atan(tan(dip) / 2), in degrees
    pub dip_latitude: f64,
    /// Geomagnetic latitude (degrees)
    pub latitude: f64,
    /// Geomagnetic longitude (degrees, 0..360)
    pub longitude: f64,
}

/// Field line description at one point
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldLine {
    /// McIlwain L parameter (Earth radii)
    pub l_shell: f64,
    /// Field strength (gauss)
    pub field_strength: f64,
    /// Inclination (degrees)
    pub dip: f64,
}

/// Resolves the magnetic geometry of a location
pub trait GeomagneticResolver {
    /// Geometry at geographic `latitude`, east `longitude` (degrees)
    /// and `decimal_year`, using given field model.
    fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
        decimal_year: f64,
        model: FieldModel,
    ) -> Result<MagneticGeometry, Error>;
    /// Field line at given location and height (km)
    fn field_line(
        &self,
        latitude: f64,
        longitude: f64,
        height: f64,
        decimal_year: f64,
        model: FieldModel,
    ) -> Result<FieldLine, Error>;
}

/// Modified dip latitude from dip and geographic latitude (degrees)
pub fn modified_dip(dip: f64, latitude: f64) -> f64 {
    let coslat = latitude.to_radians().cos();
    if coslat < 1.0E-9 {
        return 90.0_f64.copysign(dip);
    }
    (dip.to_radians() / coslat.sqrt()).atan().to_degrees()
}

/// Centered dipole field
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DipoleField {
    /// North pole coordinates (latitude, east longitude) for [FieldModel::Current]
    pub pole: (f64, f64),
    /// North pole coordinates for [FieldModel::Legacy]
    pub legacy_pole: (f64, f64),
    /// Dipole moment (gauss at the equator)
    pub moment: f64,
}

impl Default for DipoleField {
    fn default() -> Self {
        Self {
            pole: (79.8, -71.8),
            legacy_pole: (78.8, -70.9),
            moment: Earth::DIPOLE_MOMENT,
        }
    }
}

impl DipoleField {
    fn pole(&self, model: FieldModel) -> (f64, f64) {
        match model {
            FieldModel::Current => self.pole,
            FieldModel::Legacy => self.legacy_pole,
        }
    }
    /// Geomagnetic (latitude, longitude), degrees
    pub fn geomagnetic(&self, latitude: f64, longitude: f64, model: FieldModel) -> (f64, f64) {
        let (plat, plon) = self.pole(model);
        let (sp, cp) = plat.to_radians().sin_cos();
        let (s, c) = latitude.to_radians().sin_cos();
        let dlon = (longitude - plon).to_radians();

        let sinm = (s * sp + c * cp * dlon.cos()).clamp(-1.0, 1.0);
        let mlat = sinm.asin().to_degrees();

        let y = c * dlon.sin();
        let x = c * dlon.cos() * sp - s * cp;
        let mut mlon = y.atan2(x).to_degrees();
        if mlon < 0.0 {
            mlon += 360.0;
        }
        (mlat, mlon)
    }
    fn validate(latitude: f64, longitude: f64) -> Result<(), Error> {
        if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
            return Err(Error::GeomagneticResolution {
                latitude,
                longitude,
            });
        }
        Ok(())
    }
}

impl GeomagneticResolver for DipoleField {
    fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
        _: f64,
        model: FieldModel,
    ) -> Result<MagneticGeometry, Error> {
        Self::validate(latitude, longitude)?;
        let (mlat, mlon) = self.geomagnetic(latitude, longitude, model);
        let dip = (2.0 * mlat.to_radians().tan()).atan().to_degrees();
        Ok(MagneticGeometry {
            dip,
            modip: modified_dip(dip, latitude),
            dip_latitude: (0.5 * dip.to_radians().tan()).atan().to_degrees(),
            latitude: mlat,
            longitude: mlon,
        })
    }
    fn field_line(
        &self,
        latitude: f64,
        longitude: f64,
        height: f64,
        _: f64,
        model: FieldModel,
    ) -> Result<FieldLine, Error> {
        Self::validate(latitude, longitude)?;
        let (mlat, _) = self.geomagnetic(latitude, longitude, model);
        let (s, c) = mlat.to_radians().sin_cos();
        let r = (Earth::RADIUS_KM + height) / Earth::RADIUS_KM;
        let l_shell = if c * c > 1.0E-12 {
            r / c / c
        } else {
            f64::INFINITY
        };
        Ok(FieldLine {
            l_shell,
            field_strength: self.moment / r.powi(3) * (1.0 + 3.0 * s * s).sqrt(),
            dip: (2.0 * mlat.to_radians().tan()).atan().to_degrees(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn pole_and_equator() {
        let field = DipoleField::default();
        let geo = field
            .resolve(79.8, -71.8, 2007.5, FieldModel::Current)
            .unwrap();
        assert!((geo.latitude - 90.0).abs() < 1E-6);
        assert!((geo.dip - 90.0).abs() < 1E-4);

        // geographic north pole sits on the 180° geomagnetic meridian
        let (_, mlon) = field.geomagnetic(90.0, 0.0, FieldModel::Current);
        assert!((mlon - 180.0).abs() < 1E-6);

        let geo = field
            .resolve(40.0, -75.0, 2007.5, FieldModel::Current)
            .unwrap();
        assert!(geo.latitude > 45.0 && geo.latitude < 55.0, "{:?}", geo);
        assert!(geo.dip > geo.latitude);
        assert!((geo.dip_latitude - geo.latitude).abs() < 1E-9);
        assert!(geo.modip > 0.0 && geo.modip < 90.0);
        assert!(field
            .resolve(f64::NAN, 0.0, 2007.5, FieldModel::Current)
            .is_err());
        assert!(field
            .resolve(91.0, 0.0, 2007.5, FieldModel::Legacy)
            .is_err());
    }
    #[test]
    fn l_shell() {
        let field = DipoleField::default();
        let line = field
            .field_line(40.0, -75.0, 0.0, 2007.5, FieldModel::Current)
            .unwrap();
        assert!(line.l_shell > 2.0 && line.l_shell < 3.5, "{:?}", line);
        let higher = field
            .field_line(40.0, -75.0, 1000.0, 2007.5, FieldModel::Current)
            .unwrap();
        assert!(higher.l_shell > line.l_shell);
        assert!(higher.field_strength < line.field_strength);
        assert!(modified_dip(0.0, 0.0).abs() < 1E-12);
        assert_eq!(modified_dip(80.0, 90.0), 90.0);
    }
}
