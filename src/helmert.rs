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

//! The helmert module contains functions for transforming positions between
//! geodetic datums.
//!
//! A position is converted into earth centred Cartesian coordinates on the
//! ellipsoid of its datum, moved into the frame of the other datum by a
//! seven parameter Helmert transformation and converted back into a
//! latitude, longitude and height on the ellipsoid of the other datum.

#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]

use crate::error::{Error, Result};
use crate::{Degrees, Ellipsoid, GeoPoint, Metres, Validate, AIRY1830_ELLIPSOID, WGS84_ELLIPSOID};
use angle_sc::Angle;

/// The maximum number of iterations of the latitude solution.
pub const MAX_ITERATIONS: u32 = 100;

/// The parameters of a seven parameter Helmert transformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelmertParams {
    /// Translation along the x axis.
    pub tx: Metres,
    /// Translation along the y axis.
    pub ty: Metres,
    /// Translation along the z axis.
    pub tz: Metres,
    /// Rotation about the x axis in arc seconds.
    pub rx: f64,
    /// Rotation about the y axis in arc seconds.
    pub ry: f64,
    /// Rotation about the z axis in arc seconds.
    pub rz: f64,
    /// Scale change in parts per million.
    pub s: f64,
}

/// The Ordnance Survey's OSGB36 to WGS-84 transformation parameters.
pub const OSGB36_TO_WGS84: HelmertParams = HelmertParams {
    tx: Metres(446.448),
    ty: Metres(-125.157),
    tz: Metres(542.060),
    rx: 0.1502,
    ry: 0.2470,
    rz: 0.8421,
    s: -20.4894,
};

/// The Ordnance Survey's WGS-84 to OSGB36 transformation parameters.
pub const WGS84_TO_OSGB36: HelmertParams = HelmertParams {
    tx: Metres(-446.448),
    ty: Metres(125.157),
    tz: Metres(-542.060),
    rx: -0.1502,
    ry: -0.2470,
    rz: -0.8421,
    s: 20.4894,
};

/// Earth centred Cartesian coordinates in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian {
    /// Towards the prime meridian on the Equator.
    pub x: f64,
    /// Towards 90° East on the Equator.
    pub y: f64,
    /// Towards the North pole.
    pub z: f64,
}

impl HelmertParams {
    /// Apply the transformation to a Cartesian position.
    /// The rotations are assumed to be small, so the rotation matrix is
    /// linearised.
    /// * `p` - the position in the source frame.
    ///
    /// returns the position in the destination frame.
    #[must_use]
    pub fn transform(&self, p: &Cartesian) -> Cartesian {
        let rx = (self.rx / 3600.0).to_radians();
        let ry = (self.ry / 3600.0).to_radians();
        let rz = (self.rz / 3600.0).to_radians();
        let s1 = self.s / 1e6 + 1.0;

        Cartesian {
            x: self.tx.0 + p.x * s1 - p.y * rz + p.z * ry,
            y: self.ty.0 + p.x * rz + p.y * s1 - p.z * rx,
            z: self.tz.0 - p.x * ry + p.y * rx + p.z * s1,
        }
    }
}

/// Convert a geographic position into Cartesian coordinates.
/// * `point` - the position on `ellipsoid`.
/// * `ellipsoid` - the `Ellipsoid` of the position's datum.
#[must_use]
pub fn to_cartesian(point: &GeoPoint, ellipsoid: &Ellipsoid) -> Cartesian {
    let lat = Angle::from(point.lat());
    let lon = Angle::from(point.lon());
    let sin_lat = lat.sin().0;
    let cos_lat = lat.cos().0;
    let h = point.height().0;

    let e_2 = ellipsoid.e_2();
    let nu = ellipsoid.calculate_transverse_radius(sin_lat).0;

    Cartesian {
        x: (nu + h) * cos_lat * lon.cos().0,
        y: (nu + h) * cos_lat * lon.sin().0,
        z: ((1.0 - e_2) * nu + h) * sin_lat,
    }
}

/// Convert Cartesian coordinates into a geographic position.
/// The latitude is refined iteratively until successive values differ by
/// less than 4 metres on the surface of the ellipsoid.
/// * `p` - the Cartesian coordinates.
/// * `ellipsoid` - the `Ellipsoid` of the destination datum.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `p` is not finite or
/// `Error::Convergence` if the latitude has not converged after
/// `MAX_ITERATIONS`.
pub fn from_cartesian(p: &Cartesian, ellipsoid: &Ellipsoid) -> Result<GeoPoint> {
    if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
        return Err(Error::InvalidCoordinate("cartesian coordinates"));
    }
    solve_geographic(p, ellipsoid, MAX_ITERATIONS)
}

fn solve_geographic(p: &Cartesian, ellipsoid: &Ellipsoid, max_iterations: u32) -> Result<GeoPoint> {
    let e_2 = ellipsoid.e_2();
    let precision = 4.0 / ellipsoid.a().0;

    let xy = libm::sqrt(p.x * p.x + p.y * p.y);
    let mut phi = libm::atan2(p.z, xy * (1.0 - e_2));
    let mut delta = f64::INFINITY;
    let mut iterations = 0;
    while precision < delta {
        if iterations == max_iterations {
            log::warn!("geographic latitude did not converge, delta: {delta:e}");
            return Err(Error::Convergence {
                solver: "geographic latitude",
                iterations,
            });
        }
        iterations += 1;

        let sin_phi = libm::sin(phi);
        let nu = ellipsoid.calculate_transverse_radius(sin_phi).0;
        let previous = phi;
        phi = libm::atan2(p.z + e_2 * nu * sin_phi, xy);
        delta = libm::fabs(phi - previous);
        log::trace!("geographic latitude iteration {iterations}: delta {delta:e}");
    }
    log::debug!("geographic latitude converged in {iterations} iterations");

    // Valid at the poles, where cos(phi) is zero.
    let sin_phi = libm::sin(phi);
    let nu = ellipsoid.calculate_transverse_radius(sin_phi).0;
    let a = ellipsoid.a().0;
    let height = xy * libm::cos(phi) + p.z * sin_phi - a * a / nu;
    Ok(GeoPoint::with_height(
        Degrees(phi.to_degrees()),
        Degrees::from(Angle::from_y_x(p.y, p.x)),
        Metres(height),
    ))
}

/// Transform a position from one datum to another.
/// * `point` - the position on `from`.
/// * `from` - the `Ellipsoid` of the source datum.
/// * `helmert` - the transformation from the source to the destination frame.
/// * `to` - the `Ellipsoid` of the destination datum.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinate` if `point` is not valid or
/// `Error::Convergence` if the latitude solution does not converge.
pub fn convert(
    point: &GeoPoint,
    from: &Ellipsoid,
    helmert: &HelmertParams,
    to: &Ellipsoid,
) -> Result<GeoPoint> {
    if !point.is_valid() {
        return Err(Error::InvalidCoordinate("latitude, longitude or height"));
    }

    let p = helmert.transform(&to_cartesian(point, from));
    from_cartesian(&p, to)
}

/// Transform an OSGB36 position into a WGS-84 position.
/// * `point` - the OSGB36 position.
///
/// # Errors
///
/// See `convert`.
pub fn osgb36_to_wgs84(point: &GeoPoint) -> Result<GeoPoint> {
    convert(point, &AIRY1830_ELLIPSOID, &OSGB36_TO_WGS84, &WGS84_ELLIPSOID)
}

/// Transform a WGS-84 position into an OSGB36 position.
/// * `point` - the WGS-84 position.
///
/// # Errors
///
/// See `convert`.
pub fn wgs84_to_osgb36(point: &GeoPoint) -> Result<GeoPoint> {
    convert(point, &WGS84_ELLIPSOID, &WGS84_TO_OSGB36, &AIRY1830_ELLIPSOID)
}
