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

//! The grid_reference module contains functions for parsing and formatting
//! National Grid references.
//!
//! Two forms of grid reference are supported:
//!
//! - "Land Ranger" references: two letters followed by 6 or 8 digits,
//!   e.g. `SJ830980` or `SJ83009800`. The first letter selects a 500 km
//!   major square and the second letter a 100 km minor square within it.
//!   The digits are the easting and northing within the minor square at
//!   100 metre or 10 metre resolution respectively.
//! - numeric references: an "easting,northing" pair of whole metres,
//!   e.g. `326000,674500`.
//!
//! Only major square "S" is currently supported: the major square letter is
//! validated but does not offset the decoded position, and positions are
//! only encoded within major square "S".

use crate::error::{Error, Result};
use crate::{GridCoordinate, Metres};
use alloc::format;
use alloc::string::String;

/// The letters of the National Grid squares, in row order from the
/// north west corner. `I` is not used.
pub const LAND_RANGER_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// The side of a major square in metres.
pub const MAJOR_SQUARE_SIZE: u32 = 500_000;

/// The side of a minor square in metres.
pub const MINOR_SQUARE_SIZE: u32 = 100_000;

/// The number of squares along each side of a 5×5 grid of squares.
const SQUARES_PER_SIDE: u8 = 5;

/// The form of a grid reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridReferenceKind {
    /// Two square letters followed by 6 or 8 digits.
    LandRanger,
    /// An "easting,northing" pair of whole metres.
    Numeric,
    /// Neither form.
    Invalid,
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|c| c.is_ascii_digit())
}

fn is_land_ranger_letter(c: u8) -> bool {
    LAND_RANGER_LETTERS.contains(&c)
}

fn is_land_ranger(text: &str) -> bool {
    let bytes = text.as_bytes();
    matches!(bytes.len(), 8 | 10)
        && is_land_ranger_letter(bytes[0])
        && is_land_ranger_letter(bytes[1])
        && text.get(2..).is_some_and(is_digits)
}

fn split_numeric(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(easting), Some(northing), None) => Some((easting.trim(), northing.trim())),
        _ => None,
    }
}

fn is_numeric(text: &str) -> bool {
    split_numeric(text).is_some_and(|(easting, northing)| is_digits(easting) && is_digits(northing))
}

/// Classify a grid reference.
/// * `text` - the grid reference.
///
/// # Examples
/// ```
/// use osgb_wgs84::grid_reference::{classify, GridReferenceKind};
///
/// assert_eq!(GridReferenceKind::LandRanger, classify("SV000000"));
/// assert_eq!(GridReferenceKind::Numeric, classify("326000,674500"));
/// assert_eq!(GridReferenceKind::Invalid, classify("AB1234"));
/// ```
#[must_use]
pub fn classify(text: &str) -> GridReferenceKind {
    if is_land_ranger(text) {
        GridReferenceKind::LandRanger
    } else if is_numeric(text) {
        GridReferenceKind::Numeric
    } else {
        GridReferenceKind::Invalid
    }
}

/// The column and row of a square letter in its 5×5 grid of squares.
/// Columns increase eastwards and rows northwards from the south west corner.
/// * `letter` - the square letter.
///
/// returns the (column, row) of the square, or None if `letter` is not
/// a square letter.
#[must_use]
pub fn letter_to_cell(letter: char) -> Option<(u8, u8)> {
    let index = LAND_RANGER_LETTERS
        .iter()
        .position(|&c| char::from(c) == letter)?;
    let index = u8::try_from(index).ok()?;
    Some((
        index % SQUARES_PER_SIDE,
        SQUARES_PER_SIDE - 1 - index / SQUARES_PER_SIDE,
    ))
}

/// The square letter of a column and row in a 5×5 grid of squares.
/// * `col`, `row` - the column and row of the square.
///
/// returns the square letter, or None if `col` or `row` are outside the grid.
#[must_use]
pub fn cell_to_letter(col: u8, row: u8) -> Option<char> {
    if col < SQUARES_PER_SIDE && row < SQUARES_PER_SIDE {
        let index = (SQUARES_PER_SIDE - 1 - row) * SQUARES_PER_SIDE + col;
        Some(char::from(LAND_RANGER_LETTERS[usize::from(index)]))
    } else {
        None
    }
}

/// Decode a Land Ranger grid reference.
/// * `text` - two square letters followed by 6 or 8 digits.
///
/// # Errors
///
/// Returns `Error::Parse` if `text` is not a Land Ranger grid reference.
pub fn decode_land_ranger(text: &str) -> Result<GridCoordinate> {
    if !matches!(text.len(), 8 | 10) {
        return Err(Error::parse(text, "wrong length"));
    }
    let (Some(letters), Some(digits)) = (text.get(..2), text.get(2..)) else {
        return Err(Error::parse(text, "invalid square letters"));
    };
    let mut letters = letters.chars();
    let (Some(major), Some(minor)) = (letters.next(), letters.next()) else {
        return Err(Error::parse(text, "invalid square letters"));
    };
    if letter_to_cell(major).is_none() {
        return Err(Error::parse(text, "unknown major square letter"));
    }
    let Some((col, row)) = letter_to_cell(minor) else {
        return Err(Error::parse(text, "unknown minor square letter"));
    };
    if !is_digits(digits) {
        return Err(Error::parse(text, "non-digit offset"));
    }

    // TODO: offset by the position of the major square, currently only "S".
    if major != 'S' {
        log::debug!("grid reference {text}: major square {major} decoded as S");
    }

    let (x, y) = digits.split_at(digits.len() / 2);
    let scale = if x.len() == 3 { 100 } else { 10 };
    let x: u32 = x.parse().map_err(|_| Error::parse(text, "invalid easting"))?;
    let y: u32 = y.parse().map_err(|_| Error::parse(text, "invalid northing"))?;

    Ok(GridCoordinate::from((
        MINOR_SQUARE_SIZE * u32::from(col) + x * scale,
        MINOR_SQUARE_SIZE * u32::from(row) + y * scale,
    )))
}

/// Encode a position in major square S as a Land Ranger grid reference
/// at 100 metre resolution.
/// * `coord` - the grid position.
///
/// # Errors
///
/// Returns `Error::OutOfRange` unless 0 <= easting, northing < 500 km.
///
/// # Examples
/// ```
/// use osgb_wgs84::GridCoordinate;
/// use osgb_wgs84::grid_reference::encode_land_ranger;
///
/// let coord = GridCoordinate::from((383_050, 398_099));
/// assert_eq!("SJ830980", encode_land_ranger(&coord).unwrap());
/// ```
pub fn encode_land_ranger(coord: &GridCoordinate) -> Result<String> {
    let Metres(easting) = coord.easting();
    let Metres(northing) = coord.northing();
    let out_of_range = || Error::OutOfRange { easting, northing };

    let range = 0.0..f64::from(MAJOR_SQUARE_SIZE);
    if !(range.contains(&easting) && range.contains(&northing)) {
        return Err(out_of_range());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (easting_m, northing_m) = (easting as u32, northing as u32);
    let col = u8::try_from(easting_m / MINOR_SQUARE_SIZE).map_err(|_| out_of_range())?;
    let row = u8::try_from(northing_m / MINOR_SQUARE_SIZE).map_err(|_| out_of_range())?;
    let letter = cell_to_letter(col, row).ok_or_else(out_of_range)?;

    Ok(format!(
        "S{letter}{:03}{:03}",
        (easting_m % MINOR_SQUARE_SIZE) / 100,
        (northing_m % MINOR_SQUARE_SIZE) / 100
    ))
}

fn parse_whole_metres(text: &str, value: &str) -> Result<u32> {
    if !is_digits(value) {
        return Err(Error::parse(text, "non-digit easting or northing"));
    }
    value
        .parse()
        .map_err(|_| Error::parse(text, "easting or northing too large"))
}

/// Decode a numeric "easting,northing" grid reference.
/// * `text` - the easting and northing in whole metres separated by a comma.
///
/// # Errors
///
/// Returns `Error::Parse` if `text` is not a numeric grid reference.
pub fn decode_numeric(text: &str) -> Result<GridCoordinate> {
    let (easting, northing) =
        split_numeric(text).ok_or_else(|| Error::parse(text, "expected easting,northing"))?;
    Ok(GridCoordinate::from((
        parse_whole_metres(text, easting)?,
        parse_whole_metres(text, northing)?,
    )))
}

/// Decode a Land Ranger or numeric grid reference.
/// * `text` - the grid reference.
///
/// # Errors
///
/// Returns `Error::Parse` if `text` is neither form of grid reference.
///
/// # Examples
/// ```
/// use osgb_wgs84::GridCoordinate;
/// use osgb_wgs84::grid_reference::decode;
///
/// assert_eq!(GridCoordinate::from((383_000, 398_000)), decode("SJ830980").unwrap());
/// assert_eq!(GridCoordinate::from((326_000, 674_500)), decode("326000,674500").unwrap());
/// ```
pub fn decode(text: &str) -> Result<GridCoordinate> {
    match classify(text) {
        GridReferenceKind::LandRanger => decode_land_ranger(text),
        GridReferenceKind::Numeric => decode_numeric(text),
        GridReferenceKind::Invalid => Err(Error::parse(
            text,
            "not a Land Ranger or numeric grid reference",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(GridReferenceKind::LandRanger, classify("SV000000"));
        assert_eq!(GridReferenceKind::LandRanger, classify("SV00000000"));
        assert_eq!(GridReferenceKind::LandRanger, classify("TQ388773"));
        assert_eq!(GridReferenceKind::Numeric, classify("326000,674500"));
        assert_eq!(GridReferenceKind::Numeric, classify(" 326000 , 674500 "));

        assert_eq!(GridReferenceKind::Invalid, classify("AB1234"));
        assert_eq!(GridReferenceKind::Invalid, classify("SV0000000"));
        assert_eq!(GridReferenceKind::Invalid, classify("SI123456"));
        assert_eq!(GridReferenceKind::Invalid, classify("sv000000"));
        assert_eq!(GridReferenceKind::Invalid, classify("SV00000A"));
        assert_eq!(GridReferenceKind::Invalid, classify("1,2,3"));
        assert_eq!(GridReferenceKind::Invalid, classify("326000,"));
        assert_eq!(GridReferenceKind::Invalid, classify("-326000,674500"));
        assert_eq!(GridReferenceKind::Invalid, classify("é1234567"));
        assert_eq!(GridReferenceKind::Invalid, classify(""));
    }

    #[test]
    fn test_letter_to_cell() {
        assert_eq!(Some((0, 4)), letter_to_cell('A'));
        assert_eq!(Some((4, 4)), letter_to_cell('E'));
        assert_eq!(Some((2, 2)), letter_to_cell('N'));
        assert_eq!(Some((0, 0)), letter_to_cell('V'));
        assert_eq!(Some((4, 0)), letter_to_cell('Z'));
        assert_eq!(None, letter_to_cell('I'));
        assert_eq!(None, letter_to_cell('a'));
    }

    #[test]
    fn test_cell_to_letter() {
        for &c in LAND_RANGER_LETTERS {
            let letter = char::from(c);
            let (col, row) = letter_to_cell(letter).unwrap();
            assert_eq!(Some(letter), cell_to_letter(col, row));
        }
        assert_eq!(None, cell_to_letter(5, 0));
        assert_eq!(None, cell_to_letter(0, 5));
    }

    #[test]
    fn test_decode_land_ranger() {
        assert_eq!(
            GridCoordinate::from((0, 0)),
            decode_land_ranger("SV000000").unwrap()
        );
        assert_eq!(
            GridCoordinate::from((383_000, 398_000)),
            decode_land_ranger("SJ830980").unwrap()
        );
        assert_eq!(
            GridCoordinate::from((383_010, 398_010)),
            decode_land_ranger("SJ83019801").unwrap()
        );
        assert_eq!(
            GridCoordinate::from((499_900, 499_900)),
            decode_land_ranger("SE999999").unwrap()
        );

        // The major square does not offset the position.
        assert_eq!(
            GridCoordinate::from((112_300, 345_600)),
            decode_land_ranger("TG123456").unwrap()
        );
    }

    #[test]
    fn test_decode_land_ranger_errors() {
        assert_eq!(
            Err(Error::parse("SV0000000", "wrong length")),
            decode_land_ranger("SV0000000")
        );
        assert_eq!(
            Err(Error::parse("IV000000", "unknown major square letter")),
            decode_land_ranger("IV000000")
        );
        assert_eq!(
            Err(Error::parse("SI000000", "unknown minor square letter")),
            decode_land_ranger("SI000000")
        );
        assert_eq!(
            Err(Error::parse("SV00O000", "non-digit offset")),
            decode_land_ranger("SV00O000")
        );
        assert!(decode_land_ranger("é1234567").is_err());
    }

    #[test]
    fn test_encode_land_ranger() {
        assert_eq!(
            "SV000000",
            encode_land_ranger(&GridCoordinate::from((0, 0))).unwrap()
        );
        assert_eq!(
            "SJ830980",
            encode_land_ranger(&GridCoordinate::from((383_050, 398_099))).unwrap()
        );
        assert_eq!(
            "SE999999",
            encode_land_ranger(&GridCoordinate::from((499_999, 499_999))).unwrap()
        );
        assert_eq!(
            "SV001002",
            encode_land_ranger(&GridCoordinate::new(Metres(100.5), Metres(299.9))).unwrap()
        );
    }

    #[test]
    fn test_encode_land_ranger_out_of_range() {
        assert_eq!(
            Err(Error::OutOfRange {
                easting: 600_000.0,
                northing: 0.0
            }),
            encode_land_ranger(&GridCoordinate::from((600_000, 0)))
        );
        assert!(encode_land_ranger(&GridCoordinate::from((500_000, 0))).is_err());
        assert!(encode_land_ranger(&GridCoordinate::from((0, 500_000))).is_err());
        assert!(
            encode_land_ranger(&GridCoordinate::new(Metres(-0.5), Metres(0.0))).is_err()
        );
        assert!(
            encode_land_ranger(&GridCoordinate::new(Metres(f64::NAN), Metres(0.0))).is_err()
        );
    }

    #[test]
    fn test_land_ranger_round_trip() {
        for easting in (0..MAJOR_SQUARE_SIZE).step_by(24_700) {
            for northing in (0..MAJOR_SQUARE_SIZE).step_by(31_300) {
                let coord = GridCoordinate::from((easting, northing));
                let text = encode_land_ranger(&coord).unwrap();
                assert_eq!(GridReferenceKind::LandRanger, classify(&text));
                assert_eq!(coord, decode_land_ranger(&text).unwrap());
            }
        }
    }

    #[test]
    fn test_decode_numeric() {
        assert_eq!(
            GridCoordinate::from((326_000, 674_500)),
            decode_numeric("326000,674500").unwrap()
        );
        assert_eq!(
            GridCoordinate::from((326_000, 674_500)),
            decode_numeric(" 326000 , 674500 ").unwrap()
        );

        assert_eq!(
            Err(Error::parse("326000;674500", "expected easting,northing")),
            decode_numeric("326000;674500")
        );
        assert_eq!(
            Err(Error::parse("-1,2", "non-digit easting or northing")),
            decode_numeric("-1,2")
        );
        assert_eq!(
            Err(Error::parse("99999999999,1", "easting or northing too large")),
            decode_numeric("99999999999,1")
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(GridCoordinate::from((0, 0)), decode("SV000000").unwrap());
        assert_eq!(
            GridCoordinate::from((326_000, 674_500)),
            decode("326000,674500").unwrap()
        );
        assert_eq!(
            Err(Error::parse(
                "AB1234",
                "not a Land Ranger or numeric grid reference"
            )),
            decode("AB1234")
        );
    }
}
