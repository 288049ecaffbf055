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

//! The error module contains the `Error` type returned by the fallible
//! functions of this library.

use alloc::string::String;
use thiserror::Error;

/// The errors that may occur when parsing grid references or converting
/// between the National Grid and WGS 84.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The text is not a valid Land-Ranger or numeric grid reference.
    #[error("invalid grid reference {reference:?}: {reason}")]
    Parse {
        reference: String,
        reason: &'static str,
    },

    /// The coordinate lies outside of major square S.
    #[error("grid coordinate ({easting}, {northing}) is outside major square S")]
    OutOfRange { easting: f64, northing: f64 },

    /// An iterative solver did not converge within its iteration limit.
    #[error("{solver} did not converge within {iterations} iterations")]
    Convergence {
        solver: &'static str,
        iterations: u32,
    },

    /// A coordinate is not finite or lies outside of its valid range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),
}

impl Error {
    pub(crate) fn parse(reference: &str, reason: &'static str) -> Self {
        Self::Parse {
            reference: String::from(reference),
            reason,
        }
    }
}

/// A `Result` with this library's `Error`.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let error = Error::parse("AB1234", "wrong length");
        assert_eq!(
            "invalid grid reference \"AB1234\": wrong length",
            error.to_string()
        );

        let error = Error::OutOfRange {
            easting: 600_000.0,
            northing: 0.0,
        };
        assert_eq!(
            "grid coordinate (600000, 0) is outside major square S",
            error.to_string()
        );

        let error = Error::Convergence {
            solver: "meridional arc",
            iterations: 100,
        };
        assert_eq!(
            "meridional arc did not converge within 100 iterations",
            error.to_string()
        );

        let error = Error::InvalidCoordinate("northing is not finite");
        assert_eq!(
            "invalid coordinate: northing is not finite",
            error.to_string()
        );
    }

    #[test]
    fn test_error_traits() {
        let error = Error::parse("XX", "wrong length");
        let error_clone = error.clone();
        assert!(error_clone == error);

        println!("Error: {:?}", error);
    }
}
