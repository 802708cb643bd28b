use shuttlego::shared::geo::{Coordinate, Distance};

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.distance(&coord_b);
    // Paris to London is roughly 343 km as the crow flies.
    assert!((d.as_kilometers() - 343.0).abs() < 5.0);
}

#[test]
fn distance_identical_test() {
    let coord = Coordinate {
        latitude: 37.2412,
        longitude: 127.1055,
    };
    assert_eq!(coord.distance(&coord).as_meters(), 0.0);
}

#[test]
fn distance_antipodal_test() {
    let coord_a = Coordinate {
        latitude: 37.2412,
        longitude: 127.1055,
    };
    let coord_b = Coordinate {
        latitude: -37.2412,
        longitude: 127.1055 - 180.0,
    };
    let d = coord_a.distance(&coord_b);
    assert!(d.as_kilometers().is_finite());
    assert!(d > Distance::from_kilometers(20_000.0));
}

#[test]
fn distance_symmetric_test() {
    let coord_a = Coordinate {
        latitude: 37.2660,
        longitude: 127.0001,
    };
    let coord_b = Coordinate {
        latitude: 37.2412,
        longitude: 127.1055,
    };
    assert_eq!(coord_a.distance(&coord_b), coord_b.distance(&coord_a));
}
