use crate::prelude::*;
use crate::tests::toolkit::{check_regions, check_temperatures, engine, request};

#[test]
fn topside_continuity() {
    let mut engine = engine(FixedIndices::new(50.0));
    let base = request(40.0, -75.0, 172, 12.0, (100.0, 1500.0, 50.0));
    for topside in [
        TopsideVariant::Legacy,
        TopsideVariant::Corrected,
        TopsideVariant::NeQuick,
        TopsideVariant::Tts,
    ] {
        let request = base.with_options(ModelOptions {
            topside,
            ..Default::default()
        });
        let scalars = engine.profile(&request).unwrap().scalars;
        let (hmf2, nmf2) = (scalars.hmf2, scalars.nmf2);
        let below = engine.electron_density(&request, hmf2 - 0.01).unwrap().unwrap();
        let above = engine.electron_density(&request, hmf2 + 0.01).unwrap().unwrap();
        assert!((below - nmf2).abs() / nmf2 < 1.0E-4, "{}: {} {}", topside, below, nmf2);
        assert!((above - nmf2).abs() / nmf2 < 1.0E-4, "{}: {} {}", topside, above, nmf2);

        let profile = engine.profile(&request).unwrap();
        let topside_densities = profile
            .electron_densities()
            .filter(|(h, _)| *h > hmf2)
            .collect::<Vec<_>>();
        for (h, ne) in topside_densities.iter() {
            assert!(*ne > 0.0 && *ne < nmf2, "{}: h={} Ne={}", topside, h, ne);
        }
        if matches!(topside, TopsideVariant::Legacy | TopsideVariant::NeQuick) {
            for pair in topside_densities.windows(2) {
                assert!(pair[1].1 < pair[0].1, "{}: {:?}", topside, pair);
            }
        }
    }
}

#[test]
fn ion_composition_models() {
    let mut engine = engine(FixedIndices::new(50.0));
    let base = request(40.0, -75.0, 172, 12.0, (80.0, 2000.0, 40.0));

    let ds78 = base.with_options(ModelOptions {
        ion_composition: IonCompositionModel::Ds78,
        ..Default::default()
    });
    let profile = engine.profile(&ds78).unwrap();
    for point in profile.points.iter() {
        if point.height < 100.0 {
            assert!(point.ions.is_empty());
        } else {
            assert!(point.ions.nitrogen.is_none());
            assert!((point.ions.total() - 100.0).abs() < 1.0, "h={}", point.height);
        }
    }

    let absolute = base.with_options(ModelOptions {
        ion_units: IonUnits::Absolute,
        ..Default::default()
    });
    let profile = engine.profile(&absolute).unwrap();
    for point in profile.points.iter() {
        if let Some(ne) = point.electron_density {
            let total = point.ions.total();
            assert!((total - ne).abs() / ne < 1.0E-2, "h={} {} {}", point.height, total, ne);
        }
    }

    // absolute densities still resolve the electron density
    let hidden = base.with_options(ModelOptions {
        ion_units: IonUnits::Absolute,
        density: false,
        ..Default::default()
    });
    let profile = engine.profile(&hidden).unwrap();
    assert!(profile.points.iter().all(|p| p.electron_density.is_none()));
    assert!(profile.points.iter().any(|p| !p.ions.is_empty()));
}

#[test]
fn electron_temperature_models() {
    let mut engine = engine(FixedIndices::new(50.0));
    let base = request(40.0, -75.0, 172, 12.0, (120.0, 3000.0, 60.0));

    let intercosmos = engine.profile(&base).unwrap();
    let brace_theis = engine
        .profile(&base.with_options(ModelOptions {
            electron_temperature: ElectronTemperatureModel::BraceTheis,
            ..Default::default()
        }))
        .unwrap();
    check_temperatures(&intercosmos);
    check_temperatures(&brace_theis);

    let top = |profile: &Profile| {
        profile
            .points
            .iter()
            .filter(|p| p.electron_temperature.is_some())
            .map(|p| p.height)
            .fold(0.0, f64::max)
    };
    assert!(top(&intercosmos) <= 2500.0);
    assert_eq!(top(&brace_theis), 3000.0);
    let heights = brace_theis
        .scalars
        .te_references
        .iter()
        .map(|(h, _)| *h)
        .collect::<Vec<_>>();
    assert_eq!(heights, vec![300.0, 400.0, 600.0, 1400.0, 3000.0]);

    // Te(Ne) correlation, with user densities at 300 and 400 km
    let overrides = UserOverrides {
        te_ne_densities: [Some(5.0E11), Some(3.0E11)],
        ..Default::default()
    };
    let correlated = base
        .with_options(ModelOptions {
            te_ne_correlation: true,
            ..Default::default()
        })
        .with_overrides(overrides);
    let profile = engine.profile(&correlated).unwrap();
    check_temperatures(&profile);
    assert_ne!(profile.scalars.te_references, intercosmos.scalars.te_references);
}

#[test]
fn map_and_thickness_options() {
    let mut engine = engine(FixedIndices::new(50.0));
    let base = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let ursi = engine.profile(&base).unwrap().scalars;
    let ccir = engine
        .profile(&base.with_options(ModelOptions {
            f2_map: F2MapFamily::Ccir,
            ..Default::default()
        }))
        .unwrap()
        .scalars;
    // synthetic URSI maps are 0.3 MHz above CCIR
    assert!(ursi.fof2 > ccir.fof2);
    assert_eq!(ursi.m3000, ccir.m3000);

    let gulyaeva = engine
        .profile(&base.with_options(ModelOptions {
            bottomside_thickness: BottomsideThickness::Gulyaeva,
            ..Default::default()
        }))
        .unwrap()
        .scalars;
    assert_ne!(gulyaeva.b0, ursi.b0);
    assert!(gulyaeva.b0 > 0.0);
    check_regions(&gulyaeva);
}

#[test]
fn field_and_f1_options() {
    let mut engine = engine(FixedIndices::new(50.0));
    let base = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let current = engine.profile(&base).unwrap().scalars;
    let legacy = engine
        .profile(&base.with_options(ModelOptions {
            field: FieldModel::Legacy,
            ..Default::default()
        }))
        .unwrap()
        .scalars;
    assert_ne!(current.modip, legacy.modip);

    let probabilities = current.f1_probabilities;
    for p in [probabilities.probability, probabilities.with_l, probabilities.legacy] {
        assert!((0.0..=1.0).contains(&p));
    }
    let legacy_f1 = engine
        .profile(&base.with_options(ModelOptions {
            f1_occurrence: F1Occurrence::Legacy,
            ..Default::default()
        }))
        .unwrap()
        .scalars;
    // day time, the legacy rule always allows the F1 layer
    assert_eq!(legacy_f1.f1_probabilities.legacy, 1.0);
    check_regions(&legacy_f1);
}

#[test]
fn disabled_outputs() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(-12.0, -45.0, 355, 22.0, (100.0, 500.0, 50.0));
    let options = ModelOptions {
        density: false,
        temperatures: false,
        ions: false,
        drift: false,
        spread_f: false,
        ..Default::default()
    };
    let profile = engine.profile(&request.with_options(options)).unwrap();
    for point in profile.points.iter() {
        assert!(point.electron_density.is_none());
        assert!(point.electron_temperature.is_none());
        assert!(point.ions.is_empty());
    }
    assert!(profile.scalars.drift.is_none());
    assert!(profile.scalars.spread_f.is_none());
    assert!(profile.scalars.te_peak.is_none());
    assert!(profile.scalars.te_references.is_empty());
    // scalars are still available
    check_regions(&profile.scalars);
}
