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

//! osgb-wgs84
//!
//! [![crates.io](https://img.shields.io/crates/v/osgb-wgs84.svg)](https://crates.io/crates/osgb-wgs84)
//! [![docs.io](https://docs.rs/osgb-wgs84/badge.svg)](https://docs.rs/osgb-wgs84/)
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for converting between positions on the
//! [British National Grid](https://en.wikipedia.org/wiki/Ordnance_Survey_National_Grid)
//! and [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! latitudes and longitudes.
//!
//! The National Grid is a Transverse Mercator projection of the OSGB36 datum,
//! which is based on the Airy 1830 ellipsoid. GPS positions are WGS-84
//! positions on a different ellipsoid, so converting between them is a two
//! stage process:
//!
//! - a Transverse Mercator projection between grid eastings and northings
//!   and OSGB36 latitudes and longitudes, see the `national_grid` module;
//! - a seven parameter [Helmert transformation](https://en.wikipedia.org/wiki/Helmert_transformation)
//!   between the earth centred Cartesian coordinates of the two ellipsoids,
//!   see the `helmert` module.
//!
//! The accuracy of the datum transformation is around 5 metres, which is
//! the accuracy of the Ordnance Survey's published Helmert parameters.
//!
//! ## Grid references
//!
//! Grid references may be given as "Land Ranger" references: two letters
//! selecting a 100 km square followed by 6 or 8 digits, e.g. `SV000000`;
//! or as a numeric "easting,northing" pair, e.g. `326000,674500`.
//! See the `grid_reference` module.
//!
//! Only major square "S" is currently supported by the Land Ranger codec.
//!
//! ## Design
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `Error`;
//! - [log](https://crates.io/crates/log) - to report solver progress.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod error;
pub mod grid_reference;
pub mod helmert;
pub mod national_grid;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use error::{Error, Result};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use alloc::string::String;
use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `b` - the Semiminor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, b: Metres, f: f64) -> Self {
        Self {
            a,
            b,
            f,
            e_2: ellipsoid::calculate_sq_eccentricity(a, b),
            n: ellipsoid::calculate_3rd_flattening(a, b),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::B, ellipsoid::wgs84::F)
    }

    /// Construct an `Ellipsoid` with the Airy 1830 parameters.
    #[must_use]
    pub fn airy1830() -> Self {
        Self::new(
            ellipsoid::airy1830::A,
            ellipsoid::airy1830::B,
            ellipsoid::airy1830::F,
        )
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The transverse radius of curvature (nu) at a latitude.
    /// * `sin_lat` - the sine of the latitude.
    #[must_use]
    pub fn calculate_transverse_radius(&self, sin_lat: f64) -> Metres {
        ellipsoid::calculate_transverse_radius(self.a, self.e_2, sin_lat)
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();

    /// A static instance of the Airy 1830 `Ellipsoid`, used by OSGB36.
    pub static ref AIRY1830_ELLIPSOID: Ellipsoid = Ellipsoid::airy1830();
}

/// A geographic position: a latitude and longitude in degrees and a height
/// above the ellipsoid in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lat: Degrees,
    lon: Degrees,
    height: Metres,
}

impl Validate for GeoPoint {
    /// Test whether a `GeoPoint` is valid.
    /// Whether |latitude| <= 90°, |longitude| <= 180° and height is finite.
    fn is_valid(&self) -> bool {
        libm::fabs(self.lat.0) <= 90.0
            && libm::fabs(self.lon.0) <= 180.0
            && self.height.0.is_finite()
    }
}

impl GeoPoint {
    /// Construct a `GeoPoint` on the surface of the ellipsoid.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    #[must_use]
    pub const fn new(lat: Degrees, lon: Degrees) -> Self {
        Self::with_height(lat, lon, Metres(0.0))
    }

    /// Construct a `GeoPoint` at a height above the ellipsoid.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    /// * `height` - the height above the ellipsoid.
    #[must_use]
    pub const fn with_height(lat: Degrees, lon: Degrees, height: Metres) -> Self {
        Self { lat, lon, height }
    }

    /// The latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// The height above the ellipsoid.
    #[must_use]
    pub const fn height(&self) -> Metres {
        self.height
    }

    /// The latitude and longitude, without the height.
    #[must_use]
    pub fn lat_long(&self) -> LatLong {
        LatLong::new(self.lat, self.lon)
    }
}

impl From<&LatLong> for GeoPoint {
    /// A `GeoPoint` on the surface of the ellipsoid.
    fn from(lat_long: &LatLong) -> Self {
        Self::new(lat_long.lat(), lat_long.lon())
    }
}

/// An absolute National Grid position: an easting and northing in metres
/// from the false origin of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCoordinate {
    easting: Metres,
    northing: Metres,
}

impl Validate for GridCoordinate {
    /// Test whether a `GridCoordinate` is valid, i.e. finite.
    fn is_valid(&self) -> bool {
        self.easting.0.is_finite() && self.northing.0.is_finite()
    }
}

impl GridCoordinate {
    /// Constructor.
    /// * `easting` - the distance east of the false origin.
    /// * `northing` - the distance north of the false origin.
    #[must_use]
    pub const fn new(easting: Metres, northing: Metres) -> Self {
        Self { easting, northing }
    }

    /// The distance east of the false origin.
    #[must_use]
    pub const fn easting(&self) -> Metres {
        self.easting
    }

    /// The distance north of the false origin.
    #[must_use]
    pub const fn northing(&self) -> Metres {
        self.northing
    }
}

impl From<(u32, u32)> for GridCoordinate {
    /// A `GridCoordinate` from whole metre easting and northing.
    fn from((easting, northing): (u32, u32)) -> Self {
        Self::new(Metres(f64::from(easting)), Metres(f64::from(northing)))
    }
}

/// Convert a grid reference into a WGS-84 position.
/// * `text` - a Land Ranger or numeric grid reference.
///
/// # Errors
///
/// Returns `Error::Parse` if `text` is not a valid grid reference,
/// `Error::Convergence` if the projection does not converge or
/// `Error::InvalidCoordinate` if the position is too far from the
/// National Grid to be a valid latitude and longitude.
///
/// # Examples
/// ```
/// use osgb_wgs84::grid_reference_to_lat_lon;
///
/// let point = grid_reference_to_lat_lon("326000,674500").unwrap();
/// assert!((point.lat().0 - 55.9578).abs() < 1e-3);
/// assert!((point.lon().0 + 3.1868).abs() < 1e-3);
/// ```
pub fn grid_reference_to_lat_lon(text: &str) -> Result<GeoPoint> {
    let coord = grid_reference::decode(text)?;
    national_grid::grid_to_lat_lon(&coord)
}

/// Convert a National Grid easting and northing into a WGS-84 position.
/// * `easting`, `northing` - the grid position in whole metres.
///
/// # Errors
///
/// Returns `Error::Convergence` if the projection does not converge or
/// `Error::InvalidCoordinate` if the position is too far from the
/// National Grid to be a valid latitude and longitude.
///
/// # Examples
/// ```
/// use osgb_wgs84::easting_northing_to_lat_lon;
///
/// // The Royal Observatory, Greenwich
/// let point = easting_northing_to_lat_lon(538_874, 177_344).unwrap();
/// assert!((point.lat().0 - 51.4778).abs() < 1e-3);
/// assert!((point.lon().0 + 0.0014).abs() < 1e-3);
/// ```
pub fn easting_northing_to_lat_lon(easting: u32, northing: u32) -> Result<GeoPoint> {
    national_grid::grid_to_lat_lon(&GridCoordinate::from((easting, northing)))
}

/// Convert a National Grid easting and northing into a Land Ranger
/// grid reference at 100 metre resolution.
/// * `easting`, `northing` - the grid position in whole metres.
///
/// # Errors
///
/// Returns `Error::OutOfRange` if the position is not in major square S.
///
/// # Examples
/// ```
/// use osgb_wgs84::easting_northing_to_land_ranger;
///
/// assert_eq!("SJ830980", easting_northing_to_land_ranger(383_000, 398_000).unwrap());
/// ```
pub fn easting_northing_to_land_ranger(easting: u32, northing: u32) -> Result<String> {
    grid_reference::encode_land_ranger(&GridCoordinate::from((easting, northing)))
}

/// Convert a WGS-84 position into a National Grid easting and northing.
/// * `point` - the WGS-84 position.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `point` is not valid or
/// `Error::Convergence` if the datum transformation does not converge.
pub fn lat_lon_to_easting_northing(point: &GeoPoint) -> Result<GridCoordinate> {
    national_grid::lat_lon_to_grid(point)
}
