#[cfg(feature = "serde")]
mod export {
    use iri_profile::prelude::*;

    #[test]
    fn partial_options() {
        let options: ModelOptions =
            serde_json::from_str(r#"{"topside": "Tts", "ions": false}"#).unwrap();
        assert_eq!(options.topside, TopsideVariant::Tts);
        assert!(!options.ions);
        assert!(options.density && options.temperatures && options.storm);
        assert_eq!(options.f2_map, F2MapFamily::Ursi);

        let overrides: UserOverrides =
            serde_json::from_str(r#"{"f2_peak": {"Frequency": 9.5}, "rz12": 80.0}"#).unwrap();
        assert_eq!(overrides.f2_peak, Some(PeakDensity::Frequency(9.5)));
        assert_eq!(overrides.rz12, Some(80.0));
        assert!(overrides.hme.is_none());
    }

    #[test]
    fn profile_export() {
        let grid = AltitudeGrid::new(200.0, 400.0, 100.0).unwrap();
        let point = GridPoint {
            height: 300.0,
            electron_density: Some(1.0E12),
            ..Default::default()
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["height"], 300.0);
        assert_eq!(json["electron_density"], 1.0E12);
        assert!(json["ion_temperature"].is_null());
        assert_eq!(serde_json::to_value(grid).unwrap()["spacing"], 100.0);
    }
}
