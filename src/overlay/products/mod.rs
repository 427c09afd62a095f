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

//! Module with the visual products recomputed on every viewport change.
//!
//! Each product is a pure function from the viewport and configuration
//! to a list of draw commands. Products are independent: a failure in
//! one (degenerate projection, missing zoom record) never affects the
//! others.

pub mod distortion;
pub mod isolines;
pub mod scale_bars;
pub mod scale_lines;

use std::f64::consts::PI;

use crate::errors::DomainError;
use crate::overlay::geodesy::Ellipsoid;
use crate::overlay::viewport::{MapViewport, ScreenPoint};
use crate::Float;

/// Latitude in radians at pixel row `y` of the viewport's left column.
///
/// The result is not clamped; callers pass it through
/// [`Ellipsoid::clamp_latitude`] (or a scale-factor function, which
/// clamps internally) before any scale evaluation.
pub(crate) fn latitude_at(viewport: &dyn MapViewport, y: Float) -> Float {
    viewport
        .pixel_to_lat_lng(ScreenPoint { x: 0.0, y })
        .lat
        .to_radians()
}

/// Guards a scan against a misconfigured scale function: a non-finite
/// factor would otherwise keep the boundary loops from terminating.
pub(crate) fn finite_scale(factor: Float) -> Result<Float, DomainError> {
    if factor.is_finite() {
        Ok(factor)
    } else {
        Err(DomainError::NonFiniteScale("during viewport scan"))
    }
}

/// Angular spacing in degrees of longitude that corresponds to a ground
/// distance of `interval` meters along the parallel at latitude `phi`.
pub(crate) fn tick_spacing_degrees(
    ellipsoid: &Ellipsoid,
    phi: Float,
    interval: Float,
) -> Result<Float, DomainError> {
    let spacing = interval / (ellipsoid.prime_vertical_radius(phi) * phi.cos()) * 180.0 / PI;

    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(DomainError::NonPositiveStep(
            "longitude spacing is degenerate at this latitude",
        ));
    }

    Ok(spacing)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::tick_spacing_degrees;
    use crate::constants::{WGS84_A, WGS84_B, WEB_MERCATOR_LIMIT_PHI};
    use crate::overlay::geodesy::Ellipsoid;
    use crate::Float;

    #[test]
    fn equator_spacing_matches_arc_over_semi_major_axis() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();

        // 200 km along the equator, N(0) = a
        let spacing = tick_spacing_degrees(&ellps, 0.0, 200_000.0).unwrap();
        assert_approx_eq!(
            Float,
            spacing,
            (200_000.0 / WGS84_A).to_degrees(),
            epsilon = 1e-9
        );
        assert_approx_eq!(Float, spacing, 1.7966, epsilon = 1e-4);
    }

    #[test]
    fn spacing_widens_towards_the_poles() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();

        let near_equator = tick_spacing_degrees(&ellps, 0.1, 100_000.0).unwrap();
        let near_limit = tick_spacing_degrees(&ellps, WEB_MERCATOR_LIMIT_PHI, 100_000.0).unwrap();

        assert!(near_limit > near_equator);
    }
}
