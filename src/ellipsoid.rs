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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor and Semiminor axes, together with the parameters of
//! the two ellipsoids used by the National Grid: Airy 1830 and WGS 84.

#![allow(clippy::suboptimal_flops)]

pub mod airy1830;
pub mod wgs84;

pub use icao_units::si::Metres;

/// Calculate the square of the Eccentricity of an ellipsoid from its axes.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `b` - the Semiminor axis of an ellipsoid.
/// # Examples
/// ```
/// use osgb_wgs84::ellipsoid::{airy1830, calculate_sq_eccentricity};
///
/// // The Airy 1830 sq_eccentricity.
/// assert_eq!(
///     0.006670539761597337,
///     calculate_sq_eccentricity(airy1830::A, airy1830::B)
/// );
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(a: Metres, b: Metres) -> f64 {
    (a.0 * a.0 - b.0 * b.0) / (a.0 * a.0)
}

/// Calculate the third flattening of an ellipsoid from its axes.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `b` - the Semiminor axis of an ellipsoid.
/// # Examples
/// ```
/// use osgb_wgs84::ellipsoid::{airy1830, calculate_3rd_flattening};
///
/// // The Airy 1830 3rd flattening.
/// assert_eq!(
///     0.0016732202503250534,
///     calculate_3rd_flattening(airy1830::A, airy1830::B)
/// );
/// ```
#[must_use]
pub fn calculate_3rd_flattening(a: Metres, b: Metres) -> f64 {
    (a.0 - b.0) / (a.0 + b.0)
}

/// Calculate the transverse radius of curvature (nu) at a latitude.
/// * `a` - the (possibly scaled) Semimajor axis of an ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// * `sin_lat` - the sine of the latitude.
#[must_use]
pub fn calculate_transverse_radius(a: Metres, e_2: f64, sin_lat: f64) -> Metres {
    Metres(a.0 / libm::sqrt(1.0 - e_2 * sin_lat * sin_lat))
}

/// Calculate the meridional radius of curvature (rho) at a latitude.
/// * `a` - the (possibly scaled) Semimajor axis of an ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// * `sin_lat` - the sine of the latitude.
#[must_use]
pub fn calculate_meridional_radius(a: Metres, e_2: f64, sin_lat: f64) -> Metres {
    Metres(a.0 * (1.0 - e_2) / libm::pow(1.0 - e_2 * sin_lat * sin_lat, 1.5))
}
