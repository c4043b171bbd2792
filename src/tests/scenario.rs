use crate::prelude::*;
use crate::tests::toolkit::{
    check_heights, check_regions, check_temperatures, engine, request,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn summer_noon_mid_latitude() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let profile = engine.profile(&request).unwrap();

    assert_eq!(profile.points.len(), 9);
    check_heights(&profile, &request.grid);

    let scalars = &profile.scalars;
    assert!(scalars.hmf2 > 250.0 && scalars.hmf2 < 400.0, "hmF2={}", scalars.hmf2);
    assert!(scalars.nmf2 > scalars.nme, "NmF2={} NmE={}", scalars.nmf2, scalars.nme);
    check_regions(scalars);
    assert_eq!(scalars.day_of_year, 172);
    assert_eq!(scalars.season, Season::Summer);
    assert_eq!(scalars.local_season, Season::Summer);
    assert!(scalars.zenith < 30.0);
    assert!(scalars.sunrise < 6.0 && scalars.sunset > 18.0);

    // single F2 peak
    let densities = profile.electron_densities().collect::<Vec<_>>();
    assert_eq!(densities.len(), 9);
    let (peak, _) = densities
        .iter()
        .fold((0.0, 0.0), |(h, nm), (hh, ne)| if *ne > nm { (*hh, *ne) } else { (h, nm) });
    assert!((peak - scalars.hmf2).abs() <= 50.0);
    for (h, ne) in densities.iter() {
        assert!(*ne > 0.0 && *ne <= scalars.nmf2 * 1.0001, "h={} Ne={}", h, ne);
    }
    let above = densities.iter().filter(|(h, _)| *h > scalars.hmf2).collect::<Vec<_>>();
    for pair in above.windows(2) {
        assert!(pair[1].1 < pair[0].1);
    }

    // temperatures, from 120 km
    check_temperatures(&profile);
    assert!(profile.points[0].electron_temperature.is_none());
    let te = profile
        .points
        .iter()
        .filter_map(|p| p.electron_temperature.map(|te| (p.height, te)))
        .collect::<Vec<_>>();
    assert_eq!(te.first().map(|(h, _)| *h), Some(150.0));
    let (_, last) = te[te.len() - 1];
    assert!(last > te[0].1);
    assert!(scalars.te_peak.is_some() && scalars.te_peak_height.is_some());
    assert_eq!(scalars.te_references.len(), 5);
    assert!(scalars.ti_anchor.is_some());

    // ion composition (percent)
    for point in profile.points.iter() {
        let total = point.ions.total();
        assert!((total - 100.0).abs() < 1.0, "h={} total={}", point.height, total);
    }

    // options enabled by default
    assert!(scalars.drift.is_none());
    assert!(scalars.spread_f.is_none());
    assert!(scalars.d_region.is_none());
    assert!(scalars.lay_quality.is_none());
    assert!(scalars.tec.is_none());
}

#[test]
fn validity_bands() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (50.0, 2500.0, 10.0));
    let profile = engine.profile(&request).unwrap();
    assert_eq!(profile.points.len(), 246);

    for point in profile.points.iter() {
        let h = point.height;
        assert_eq!(point.electron_density.is_some(), (65.0..=2000.0).contains(&h), "h={}", h);
        assert_eq!(point.ions.is_empty(), !(75.0..=2000.0).contains(&h), "h={}", h);
        if h < 120.0 {
            assert!(point.electron_temperature.is_none());
        }
    }
    // Intercosmos temperatures are modelled up to 2500 km
    assert!(profile.points.last().unwrap().electron_temperature.is_some());
}

#[test]
fn grid_truncation() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (60.0, 2000.0, 1.0));
    assert_eq!(request.grid.length(), MAX_GRID_POINTS);
    let profile = engine.profile(&request).unwrap();
    assert_eq!(profile.points.len(), MAX_GRID_POINTS);
    check_heights(&profile, &request.grid);
    assert_eq!(profile.points.last().unwrap().height, 559.0);

    let single = request.with_options(ModelOptions::default());
    let single = ProfileRequest {
        grid: AltitudeGrid::single(300.0).unwrap(),
        ..single
    };
    let profile = engine.profile(&single).unwrap();
    assert_eq!(profile.points.len(), 1);
    assert_eq!(profile.points[0].height, 300.0);
}

#[test]
fn night_profile() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 355, 0.0, (60.0, 600.0, 20.0));
    let profile = engine.profile(&request).unwrap();
    let scalars = &profile.scalars;
    check_regions(scalars);
    assert!(scalars.hmf1.is_none());
    assert!(scalars.zenith > 90.0);
    assert_eq!(scalars.season, Season::Winter);

    // night time D region starts at 80 km
    for point in profile.points.iter() {
        assert_eq!(point.electron_density.is_some(), point.height >= 80.0, "h={}", point.height);
    }
    check_temperatures(&profile);
    assert!(profile.scalars.te_peak.unwrap() > 0.0);
}

#[test]
fn southern_hemisphere() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(-40.0, 150.0, 172, 12.0, (100.0, 500.0, 50.0));
    let profile = engine.profile(&request).unwrap();
    assert_eq!(profile.scalars.season, Season::Summer);
    assert_eq!(profile.scalars.local_season, Season::Winter);
    check_regions(&profile.scalars);
    check_temperatures(&profile);
}

#[test]
fn layer_bottomside() {
    let mut engine = engine(FixedIndices::new(50.0));
    let analytic = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 10.0));
    let options = ModelOptions {
        bottomside: BottomsideVariant::Layer,
        ..Default::default()
    };
    let layer = analytic.with_options(options);

    let a = engine.profile(&analytic).unwrap();
    let l = engine.profile(&layer).unwrap();
    assert!(l.scalars.lay_quality.is_some());
    check_regions(&l.scalars);
    assert_eq!(a.scalars.nmf2, l.scalars.nmf2);
    assert_eq!(a.scalars.hmf2, l.scalars.hmf2);
    if let Some(hmf1) = l.scalars.hmf1 {
        assert!((hmf1 - (165.0 + 0.6428 * l.scalars.zenith)).abs() < 1.0E-9);
    }
    // shared topside
    for (pa, pl) in a.points.iter().zip(l.points.iter()) {
        if pa.height > a.scalars.hmf2 {
            assert_eq!(pa.electron_density, pl.electron_density);
        }
    }
}

#[test]
fn special_d_region() {
    let mut engine = engine(FixedIndices::new(50.0));
    let standard = request(40.0, -75.0, 172, 12.0, (65.0, 200.0, 5.0));
    let special = standard.with_options(ModelOptions {
        d_region: DRegionVariant::Special,
        ..Default::default()
    });
    let s = engine.profile(&standard).unwrap();
    let d = engine.profile(&special).unwrap();

    let diagnostics = d.scalars.d_region.unwrap();
    assert!(diagnostics.standard.iter().any(|v| v.is_some()));
    assert!(diagnostics.firi.iter().any(|v| v.is_some()));
    assert!(s.scalars.d_region.is_none());

    // identical above the D region
    for (ps, pd) in s.points.iter().zip(d.points.iter()) {
        if ps.height > 140.0 {
            assert_eq!(ps.electron_density, pd.electron_density);
        }
    }
}

#[test]
fn vertical_tec() {
    let mut engine = engine(FixedIndices::new(50.0));
    let request = request(40.0, -75.0, 172, 12.0, (100.0, 500.0, 50.0));
    let tec = engine.vertical_tec(&request, 2000.0).unwrap();
    assert_eq!(tec.upper, 2000.0);
    assert!(tec.tecu() > 1.0 && tec.tecu() < 200.0, "{} TECu", tec.tecu());
    assert!(tec.topside > 20.0 && tec.topside < 95.0, "topside {}%", tec.topside);

    let lower = engine.vertical_tec(&request, 1000.0).unwrap();
    assert!(lower.total < tec.total);

    let profile = engine.profile(&request.with_tec(2000.0)).unwrap();
    assert_eq!(profile.scalars.tec, Some(tec));
    assert!(engine.vertical_tec(&request, f64::NAN).is_err());
}

#[test]
fn equatorial_sub_models() {
    let mut engine = engine(FixedIndices::new(100.0));
    let evening = request(-12.0, -45.0, 355, 22.0, (100.0, 500.0, 100.0));
    let profile = engine.profile(&evening).unwrap();
    assert!(profile.scalars.drift.is_some());
    let spread_f = profile.scalars.spread_f.unwrap();
    assert!(spread_f > 0.0 && spread_f <= 1.0);

    let noon = request(-12.0, -45.0, 355, 12.0, (100.0, 500.0, 100.0));
    let profile = engine.profile(&noon).unwrap();
    assert!(profile.scalars.drift.unwrap() > 0.0);
    assert!(profile.scalars.spread_f.is_none());
}

#[test]
fn random_locations() {
    let mut rng = StdRng::seed_from_u64(0x1f2);
    let mut engine = engine(FixedIndices::new(80.0));
    for _ in 0..20 {
        let latitude = rng.gen_range(-60.0..60.0);
        let longitude = rng.gen_range(-180.0..180.0);
        let doy = rng.gen_range(1..=365);
        let hour = rng.gen_range(0.0..24.0);
        let request = request(latitude, longitude, doy, hour, (80.0, 1000.0, 20.0));
        let profile = engine.profile(&request).unwrap();
        let scalars = &profile.scalars;
        check_regions(scalars);
        check_temperatures(&profile);
        for (h, ne) in profile.electron_densities() {
            assert!(ne.is_finite() && ne > 0.0, "({}, {}) h={} Ne={}", latitude, longitude, h, ne);
        }
    }
}

#[test]
fn invalid_requests() {
    assert!(matches!(Location::new(95.0, 0.0), Err(Error::InvalidLocation)));
    assert!(matches!(AltitudeGrid::new(100.0, 200.0, 0.0), Err(Error::InvalidGrid)));
    assert!(matches!(EpochSpec::local(2007, 2, 30, 12.0), Err(Error::InvalidDate)));
    assert!(matches!(EpochSpec::local(2007, 2, 3, 25.0), Err(Error::InvalidDate)));
}
