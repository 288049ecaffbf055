// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

// extern crate we're testing, same as any other code would do.
extern crate osgb_wgs84;

use angle_sc::is_within_tolerance;
use osgb_wgs84::grid_reference::{classify, GridReferenceKind};
use osgb_wgs84::{
    easting_northing_to_land_ranger, easting_northing_to_lat_lon, grid_reference_to_lat_lon,
    lat_lon_to_easting_northing, Degrees, Error, GeoPoint, GridCoordinate, Metres,
};

#[test]
fn test_greenwich() {
    // The Royal Observatory, Greenwich
    let point = easting_northing_to_lat_lon(538_874, 177_344).unwrap();
    assert!(is_within_tolerance(51.4778, point.lat().0, 1e-3));
    assert!(is_within_tolerance(-0.0014, point.lon().0, 1e-3));

    let coord = lat_lon_to_easting_northing(&point).unwrap();
    assert!(is_within_tolerance(538_874.0, coord.easting().0, 0.5));
    assert!(is_within_tolerance(177_344.0, coord.northing().0, 0.5));
}

#[test]
fn test_grid_reference_forms_agree() {
    let land_ranger = grid_reference_to_lat_lon("SJ83009800").unwrap();
    let numeric = grid_reference_to_lat_lon("383000,398000").unwrap();
    assert_eq!(numeric, land_ranger);

    let point = easting_northing_to_lat_lon(383_000, 398_000).unwrap();
    assert_eq!(point, numeric);
}

#[test]
fn test_grid_reference_errors() {
    assert_eq!(GridReferenceKind::Invalid, classify("AB1234"));
    assert!(matches!(
        grid_reference_to_lat_lon("AB1234"),
        Err(Error::Parse { .. })
    ));
    assert!(matches!(
        grid_reference_to_lat_lon("326000;674500"),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn test_land_ranger_labels() {
    assert_eq!("SV000000", easting_northing_to_land_ranger(0, 0).unwrap());
    assert_eq!(
        "SJ830980",
        easting_northing_to_land_ranger(383_000, 398_000).unwrap()
    );
    assert!(matches!(
        easting_northing_to_land_ranger(600_000, 0),
        Err(Error::OutOfRange { .. })
    ));

    // Land Ranger labels round trip at 100 metre resolution.
    let label = easting_northing_to_land_ranger(337_000, 172_000).unwrap();
    assert_eq!("ST370720", label);
    assert_eq!(
        easting_northing_to_lat_lon(337_000, 172_000).unwrap(),
        grid_reference_to_lat_lon(&label).unwrap()
    );
}

#[test]
fn test_lat_lon_round_trip() {
    let mut lat = 50.0;
    while lat <= 58.5 {
        let mut lon = -6.0;
        while lon <= 1.5 {
            let point = GeoPoint::new(Degrees(lat), Degrees(lon));
            let coord = lat_lon_to_easting_northing(&point).unwrap();
            let result = osgb_wgs84::national_grid::grid_to_lat_lon(&coord).unwrap();
            assert!(is_within_tolerance(lat, result.lat().0, 1e-4));
            assert!(is_within_tolerance(lon, result.lon().0, 1e-4));

            lon += 0.75;
        }
        lat += 0.5;
    }
}

#[test]
fn test_invalid_lat_lon() {
    let point = GeoPoint::new(Degrees(f64::NAN), Degrees(0.0));
    assert!(matches!(
        lat_lon_to_easting_northing(&point),
        Err(Error::InvalidCoordinate(_))
    ));

    let coord = GridCoordinate::new(Metres(f64::INFINITY), Metres(0.0));
    assert!(matches!(
        osgb_wgs84::national_grid::grid_to_lat_lon(&coord),
        Err(Error::InvalidCoordinate(_))
    ));
}
