use crate::prelude::*;
use crate::tests::toolkit::{engine, request};

#[test]
fn peak_overrides() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let model = engine.profile(&request).unwrap().scalars;

    let overrides = UserOverrides {
        f2_peak: Some(PeakDensity::Density(1.5E12)),
        f2_height: Some(F2Height::Height(320.0)),
        e_peak: Some(PeakDensity::Frequency(3.2)),
        hme: Some(105.0),
        ..Default::default()
    };
    let scalars = engine
        .profile(&request.with_overrides(overrides))
        .unwrap()
        .scalars;
    assert_eq!(scalars.nmf2, 1.5E12);
    assert_eq!(scalars.hmf2, 320.0);
    assert_eq!(scalars.foe, 3.2);
    assert_eq!(scalars.hme, 105.0);
    assert_ne!(scalars.nmf2, model.nmf2);

    // each peak independently
    let e_only = UserOverrides {
        e_peak: Some(PeakDensity::Density(2.0E11)),
        ..Default::default()
    };
    let scalars = engine
        .profile(&request.with_overrides(e_only))
        .unwrap()
        .scalars;
    assert_eq!(scalars.nme, 2.0E11);
    assert_eq!(scalars.nmf2, model.nmf2);
    assert_eq!(scalars.hmf2, model.hmf2);
}

#[test]
fn f1_override() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let overrides = UserOverrides {
        f1_peak: Some(PeakDensity::Frequency(5.0)),
        ..Default::default()
    };
    let scalars = engine
        .profile(&request.with_overrides(overrides))
        .unwrap()
        .scalars;
    assert_eq!(scalars.fof1, Some(5.0));
    assert_eq!(scalars.f1_probabilities.legacy, 1.0);
    let hmf1 = scalars.hmf1.unwrap();
    assert!(hmf1 > scalars.hme && hmf1 < scalars.hmf2);
}

#[test]
fn storm_correction() {
    let indices = FixedIndices::new(50.0).with_ap(120.0);
    let mut engine = engine(indices);
    let request = request(50.0, 10.0, 172, 12.0, (100.0, 500.0, 100.0));
    let quiet = engine
        .profile(&request.with_options(ModelOptions {
            storm: false,
            ..Default::default()
        }))
        .unwrap()
        .scalars;
    assert!(quiet.storm_ratio.is_none());

    let storm = engine.profile(&request).unwrap().scalars;
    let ratio = storm.storm_ratio.unwrap();
    assert!((storm.fof2 - quiet.fof2 * ratio).abs() < 1.0E-9);

    // a user foF2 disables the storm model
    let overrides = UserOverrides {
        f2_peak: Some(PeakDensity::Frequency(9.0)),
        ..Default::default()
    };
    let user = engine
        .profile(&request.with_overrides(overrides))
        .unwrap()
        .scalars;
    assert!(user.storm_ratio.is_none());
    assert_eq!(user.fof2, 9.0);
}

#[test]
fn activity_overrides() {
    let tables = FixedIndices {
        ig12: 42.0,
        ..FixedIndices::new(50.0)
    };
    let mut engine = engine(tables);
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 100.0));
    let model = engine.profile(&request).unwrap().scalars;
    assert_eq!((model.rz12, model.ig12), (50.0, 42.0));

    // user Rz12 leaves IG12, hence the foF2 map, untouched
    let overrides = UserOverrides {
        rz12: Some(150.0),
        f107_daily: Some(190.0),
        ..Default::default()
    };
    let scalars = engine
        .profile(&request.with_overrides(overrides))
        .unwrap()
        .scalars;
    assert_eq!(scalars.rz12, 150.0);
    assert_eq!(scalars.ig12, 42.0);
    assert_eq!(scalars.fof2, model.fof2);
    assert_ne!(scalars.m3000, model.m3000);
    assert_eq!(scalars.f107_daily, 190.0);

    // and the other way around
    let overrides = UserOverrides {
        ig12: Some(70.0),
        ..Default::default()
    };
    let scalars = engine
        .profile(&request.with_overrides(overrides))
        .unwrap()
        .scalars;
    assert_eq!((scalars.rz12, scalars.ig12), (50.0, 70.0));
    assert_eq!(scalars.m3000, model.m3000);
    assert_ne!(scalars.fof2, model.fof2);

    let scalars = engine.profile(&request).unwrap().scalars;
    assert_eq!(scalars.rz12, 50.0);
}

#[test]
fn legacy_switches() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 100.0));
    let overrides = UserOverrides {
        f2_peak: Some(PeakDensity::Frequency(10.0)),
        hme: Some(108.0),
        ..Default::default()
    };

    // foF2 is only honoured with its switch
    let ignored = request.with_legacy_switches(LegacySwitches::USER_HME, &overrides);
    let scalars = engine.profile(&ignored).unwrap().scalars;
    assert_ne!(scalars.fof2, 10.0);
    assert_eq!(scalars.hme, 108.0);

    let honoured = request.with_legacy_switches(
        LegacySwitches::USER_FOF2 | LegacySwitches::NO_IONS | LegacySwitches::NO_TEMPERATURES,
        &overrides,
    );
    let profile = engine.profile(&honoured).unwrap();
    assert_eq!(profile.scalars.fof2, 10.0);
    assert_eq!(profile.scalars.hme, 110.0);
    for point in profile.points.iter() {
        assert!(point.ions.is_empty());
        assert!(point.electron_temperature.is_none());
        assert!(point.electron_density.is_some());
    }
}
