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

//! The national_grid module contains functions for converting between
//! National Grid eastings and northings and latitudes and longitudes.
//!
//! The National Grid is a Transverse Mercator projection of the Airy 1830
//! ellipsoid. The formulae are those published by the Ordnance Survey in
//! "A guide to coordinate systems in Great Britain", Annex C.

#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

use crate::ellipsoid::{calculate_meridional_radius, calculate_transverse_radius};
use crate::error::{Error, Result};
use crate::helmert::{osgb36_to_wgs84, wgs84_to_osgb36};
use crate::{
    Degrees, Ellipsoid, GeoPoint, GridCoordinate, Metres, Radians, Validate, AIRY1830_ELLIPSOID,
};

/// The scale factor on the central meridian.
pub const F0: f64 = 0.999_601_271_7;

/// The latitude of the true origin.
pub const LAT0: Degrees = Degrees(49.0);

/// The longitude of the true origin, the central meridian.
pub const LON0: Degrees = Degrees(-2.0);

/// The northing of the true origin.
pub const N0: Metres = Metres(-100_000.0);

/// The easting of the true origin.
pub const E0: Metres = Metres(400_000.0);

/// The precision of the footpoint latitude solution: 0.01mm.
pub const MERIDIONAL_ARC_PRECISION: Metres = Metres(0.000_01);

/// The maximum number of iterations of the footpoint latitude solution.
pub const MAX_ITERATIONS: u32 = 100;

/// Calculate the meridional arc: the distance along the central meridian
/// from the latitude of the true origin, scaled by `F0`.
/// * `lat` - the latitude.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
pub fn calculate_meridional_arc(lat: Radians, ellipsoid: &Ellipsoid) -> Metres {
    let n = ellipsoid.n();
    let n2 = n * n;
    let n3 = n2 * n;

    let lat0 = LAT0.0.to_radians();
    let delta = lat.0 - lat0;
    let sigma = lat.0 + lat0;

    let ma = (1.0 + n + 1.25 * n2 + 1.25 * n3) * delta;
    let mb = (3.0 * n + 3.0 * n2 + 2.625 * n3) * libm::sin(delta) * libm::cos(sigma);
    let mc = (1.875 * n2 + 1.875 * n3) * libm::sin(2.0 * delta) * libm::cos(2.0 * sigma);
    let md = (35.0 / 24.0) * n3 * libm::sin(3.0 * delta) * libm::cos(3.0 * sigma);

    Metres(ellipsoid.b().0 * F0 * (ma - mb + mc - md))
}

/// Calculate the footpoint latitude of a northing: the latitude on the
/// central meridian whose meridional arc is the northing.
/// * `northing` - the grid northing.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the footpoint latitude and the number of iterations taken.
///
/// # Errors
///
/// Returns `Error::Convergence` if the latitude has not converged after
/// `MAX_ITERATIONS`.
pub fn calculate_footpoint_latitude(
    northing: Metres,
    ellipsoid: &Ellipsoid,
) -> Result<(Radians, u32)> {
    solve_footpoint_latitude(northing, ellipsoid, MAX_ITERATIONS)
}

fn solve_footpoint_latitude(
    northing: Metres,
    ellipsoid: &Ellipsoid,
    max_iterations: u32,
) -> Result<(Radians, u32)> {
    let a_f0 = ellipsoid.a().0 * F0;

    let mut lat = LAT0.0.to_radians();
    let mut residual = northing.0 - N0.0;
    let mut iterations = 0;
    while MERIDIONAL_ARC_PRECISION.0 <= libm::fabs(residual) {
        if iterations == max_iterations {
            log::warn!("meridional arc did not converge, residual: {residual:e}");
            return Err(Error::Convergence {
                solver: "meridional arc",
                iterations,
            });
        }
        iterations += 1;

        lat += residual / a_f0;
        residual = northing.0 - N0.0 - calculate_meridional_arc(Radians(lat), ellipsoid).0;
        log::trace!("meridional arc iteration {iterations}: residual {residual:e}");
    }
    log::debug!("meridional arc converged in {iterations} iterations");

    Ok((Radians(lat), iterations))
}

/// Convert a grid position into an OSGB36 latitude and longitude.
/// * `coord` - the grid position.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `coord` is not finite or
/// `Error::Convergence` if the footpoint latitude does not converge.
pub fn grid_to_osgb36(coord: &GridCoordinate) -> Result<GeoPoint> {
    if !coord.is_valid() {
        return Err(Error::InvalidCoordinate("easting or northing"));
    }

    let ellipsoid: &Ellipsoid = &AIRY1830_ELLIPSOID;
    let (lat, _) = calculate_footpoint_latitude(coord.northing(), ellipsoid)?;
    let lat = lat.0;

    let a_f0 = ellipsoid.a().0 * F0;
    let e_2 = ellipsoid.e_2();
    let sin_lat = libm::sin(lat);
    let nu = calculate_transverse_radius(Metres(a_f0), e_2, sin_lat).0;
    let rho = calculate_meridional_radius(Metres(a_f0), e_2, sin_lat).0;
    let eta2 = nu / rho - 1.0;

    let tan_lat = libm::tan(lat);
    let tan2 = tan_lat * tan_lat;
    let tan4 = tan2 * tan2;
    let tan6 = tan4 * tan2;
    let sec_lat = 1.0 / libm::cos(lat);
    let nu3 = nu * nu * nu;
    let nu5 = nu3 * nu * nu;
    let nu7 = nu5 * nu * nu;

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
    let ix = tan_lat / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
    let x = sec_lat / nu;
    let xi = sec_lat / (6.0 * nu3) * (nu / rho + 2.0 * tan2);
    let xii = sec_lat / (120.0 * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
    let xiia = sec_lat / (5040.0 * nu7) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

    let de = coord.easting().0 - E0.0;
    let de2 = de * de;
    let de3 = de2 * de;
    let de4 = de2 * de2;
    let de5 = de3 * de2;
    let de6 = de4 * de2;
    let de7 = de5 * de2;

    let lat = lat - vii * de2 + viii * de4 - ix * de6;
    let lon = LON0.0.to_radians() + x * de - xi * de3 + xii * de5 - xiia * de7;

    Ok(GeoPoint::new(Degrees(lat.to_degrees()), Degrees(lon.to_degrees())))
}

/// Convert an OSGB36 latitude and longitude into a grid position.
/// * `point` - the OSGB36 position, its height is ignored.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `point` is not valid.
pub fn osgb36_to_grid(point: &GeoPoint) -> Result<GridCoordinate> {
    if !point.is_valid() {
        return Err(Error::InvalidCoordinate("latitude or longitude"));
    }

    let ellipsoid: &Ellipsoid = &AIRY1830_ELLIPSOID;
    let lat = point.lat().0.to_radians();

    let a_f0 = ellipsoid.a().0 * F0;
    let e_2 = ellipsoid.e_2();
    let sin_lat = libm::sin(lat);
    let cos_lat = libm::cos(lat);
    let nu = calculate_transverse_radius(Metres(a_f0), e_2, sin_lat).0;
    let rho = calculate_meridional_radius(Metres(a_f0), e_2, sin_lat).0;
    let eta2 = nu / rho - 1.0;

    let tan_lat = libm::tan(lat);
    let tan2 = tan_lat * tan_lat;
    let tan4 = tan2 * tan2;
    let cos3 = cos_lat * cos_lat * cos_lat;
    let cos5 = cos3 * cos_lat * cos_lat;

    let m = calculate_meridional_arc(Radians(lat), ellipsoid).0;
    let i = m + N0.0;
    let ii = nu / 2.0 * sin_lat * cos_lat;
    let iii = nu / 24.0 * sin_lat * cos3 * (5.0 - tan2 + 9.0 * eta2);
    let iiia = nu / 720.0 * sin_lat * cos5 * (61.0 - 58.0 * tan2 + tan4);
    let iv = nu * cos_lat;
    let v = nu / 6.0 * cos3 * (nu / rho - tan2);
    let vi = nu / 120.0 * cos5 * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

    let p = point.lon().0.to_radians() - LON0.0.to_radians();
    let p2 = p * p;
    let p3 = p2 * p;
    let p4 = p2 * p2;
    let p5 = p3 * p2;
    let p6 = p4 * p2;

    Ok(GridCoordinate::new(
        Metres(E0.0 + iv * p + v * p3 + vi * p5),
        Metres(i + ii * p2 + iii * p4 + iiia * p6),
    ))
}

/// Convert a grid position into a WGS-84 position.
/// * `coord` - the grid position.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `coord` is not finite or
/// `Error::Convergence` if an iterative solution does not converge.
pub fn grid_to_lat_lon(coord: &GridCoordinate) -> Result<GeoPoint> {
    let point = grid_to_osgb36(coord)?;
    osgb36_to_wgs84(&point)
}

/// Convert a WGS-84 position into a grid position.
/// * `point` - the WGS-84 position.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `point` is not valid or
/// `Error::Convergence` if the datum transformation does not converge.
pub fn lat_lon_to_grid(point: &GeoPoint) -> Result<GridCoordinate> {
    let point = wgs84_to_osgb36(point)?;
    osgb36_to_grid(&point)
}
