/*
Copyright 2024 Mercator Scales Overlay developers

This file is part of Mercator Scales Overlay (MSO).

Mercator Scales Overlay (MSO) is a free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation; either version 3 of the License, or
(at your option) any later version.

Mercator Scales Overlay (MSO) is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with Mercator Scales Overlay (MSO). If not, see https://www.gnu.org/licenses/.
*/

//! Module with the interval selection algorithms: the lookup of a
//! nominal ground distance for a zoom level and the rounding of raw
//! values to human-friendly steps of the form `{1,2,5} * 10^k`.

use serde::Deserialize;

use crate::errors::DomainError;
use crate::Float;

/// One record of the zoom to ground-distance lookup table.
///
/// `start` and `end` are inclusive zoom levels; `interval` is the
/// nominal ground distance in meters between major tick marks.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct ZoomLevelInterval {
    pub start: u8,
    pub end: u8,
    pub interval: Float,
}

/// Default lookup table covering zoom levels 1 to 20.
pub fn default_zoom_intervals() -> Vec<ZoomLevelInterval> {
    [
        (1, 2, 5_000_000.0),
        (3, 3, 2_000_000.0),
        (4, 4, 1_000_000.0),
        (5, 5, 500_000.0),
        (6, 7, 200_000.0),
        (8, 8, 100_000.0),
        (9, 9, 50_000.0),
        (10, 10, 20_000.0),
        (11, 11, 10_000.0),
        (12, 12, 5_000.0),
        (13, 13, 2_000.0),
        (14, 14, 1_000.0),
        (15, 15, 500.0),
        (16, 16, 200.0),
        (17, 17, 100.0),
        (18, 18, 50.0),
        (19, 19, 20.0),
        (20, 20, 10.0),
    ]
    .iter()
    .map(|&(start, end, interval)| ZoomLevelInterval {
        start,
        end,
        interval,
    })
    .collect()
}

/// Finds the ground-distance interval for a zoom level.
///
/// Returns the interval of the first record whose inclusive range
/// contains `zoom`, or `None` when the table has no matching record;
/// the caller then skips the affected products for this redraw.
pub fn zoom_interval(zoom: u8, table: &[ZoomLevelInterval]) -> Option<Float> {
    table
        .iter()
        .find(|record| record.start <= zoom && zoom <= record.end)
        .map(|record| record.interval)
}

/// Splits a positive value into base-10 scientific form, returning
/// `(mantissa, exponent)` with the mantissa in `[1, 10)`.
pub(crate) fn scientific_parts(value: Float) -> (Float, i32) {
    let mut exponent = value.log10().floor() as i32;
    let mut mantissa = value / 10.0_f64.powi(exponent);

    // log10 rounding can leave the mantissa just outside [1, 10)
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    if mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    (mantissa, exponent)
}

/// Rounds a positive raw value to the nearest conventional step of the
/// form `{1, 2, 5} * 10^k`, producing the usual 1, 2, 5, 10, 20, 50, ...
/// sequence for axis and isoline spacing.
pub fn nice_step(raw: Float) -> Result<Float, DomainError> {
    if !raw.is_finite() || raw <= 0.0 {
        return Err(DomainError::NonPositiveStep(
            "step base must be positive and finite",
        ));
    }

    let (mantissa, exponent) = scientific_parts(raw);

    let bucket = if mantissa < 1.5 {
        1.0
    } else if mantissa < 3.5 {
        2.0
    } else if mantissa < 7.5 {
        5.0
    } else {
        10.0
    };

    Ok(bucket * 10.0_f64.powi(exponent))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::{default_zoom_intervals, nice_step, scientific_parts, zoom_interval};
    use crate::Float;

    #[test]
    fn default_table_lookup() {
        let table = default_zoom_intervals();

        assert_eq!(zoom_interval(6, &table), Some(200_000.0));
        assert_eq!(zoom_interval(7, &table), Some(200_000.0));
        assert_eq!(zoom_interval(20, &table), Some(10.0));
        assert_eq!(zoom_interval(1, &table), Some(5_000_000.0));
        assert_eq!(zoom_interval(0, &table), None);
        assert_eq!(zoom_interval(21, &table), None);
    }

    #[test]
    fn scientific_decomposition() {
        let (mantissa, exponent) = scientific_parts(0.0032);
        assert_approx_eq!(Float, mantissa, 3.2, epsilon = 1e-12);
        assert_eq!(exponent, -3);

        let (mantissa, exponent) = scientific_parts(47.0);
        assert_approx_eq!(Float, mantissa, 4.7, epsilon = 1e-12);
        assert_eq!(exponent, 1);

        let (mantissa, exponent) = scientific_parts(1.0);
        assert_approx_eq!(Float, mantissa, 1.0);
        assert_eq!(exponent, 0);

        let (mantissa, exponent) = scientific_parts(1000.0);
        assert_approx_eq!(Float, mantissa, 1.0);
        assert_eq!(exponent, 3);
    }

    #[test]
    fn steps_are_rounded_to_one_two_five() {
        assert_approx_eq!(Float, nice_step(0.0032).unwrap(), 0.005, epsilon = 1e-12);
        assert_approx_eq!(Float, nice_step(47.0).unwrap(), 50.0);
        assert_approx_eq!(Float, nice_step(1.4).unwrap(), 1.0);
        assert_approx_eq!(Float, nice_step(1.5).unwrap(), 2.0);
        assert_approx_eq!(Float, nice_step(3.5).unwrap(), 5.0);
        assert_approx_eq!(Float, nice_step(8.0).unwrap(), 10.0);
        assert_approx_eq!(Float, nice_step(200.0).unwrap(), 200.0);
    }

    #[test]
    fn rejects_non_positive_bases() {
        assert!(nice_step(0.0).is_err());
        assert!(nice_step(-2.0).is_err());
        assert!(nice_step(Float::NAN).is_err());
        assert!(nice_step(Float::INFINITY).is_err());
    }
}
