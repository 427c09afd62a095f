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

//! Module with the reference ellipsoid and the series coefficients
//! derived from it.

use float_cmp::approx_eq;

use crate::constants::{EPSILON, WEB_MERCATOR_LIMIT_PHI};
use crate::errors::DomainError;
use crate::Float;

/// Reference ellipsoid with the derived constants needed by the
/// meridian-arc series and the scale-factor formulas.
///
/// Constructed once from the two axis lengths, never mutated, and shared
/// read-only by every other component. The forward (`c1..c5`) and inverse
/// (`ic1..ic5`) coefficients belong to a Helmert-type meridian-arc series
/// truncated at the fifth order of the third flattening `n`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis in meters.
    pub a: Float,

    /// Semi-minor axis in meters.
    pub b: Float,

    /// First eccentricity squared, `(a^2 - b^2) / a^2`. Always in `(0, 1)`.
    pub e2: Float,

    /// Third flattening, `(a - b) / (a + b)`. Always in `(0, 1)`.
    pub n: Float,

    /// Latitude bound of the Web Mercator projection in radians.
    pub limit_phi: Float,

    /// Tolerance for numeric latitude comparisons.
    pub epsilon: Float,

    /// Rectifying-sphere radius coefficient of the arc-length series.
    pub(super) big_a: Float,

    pub(super) c1: Float,
    pub(super) c2: Float,
    pub(super) c3: Float,
    pub(super) c4: Float,
    pub(super) c5: Float,

    pub(super) ic1: Float,
    pub(super) ic2: Float,
    pub(super) ic3: Float,
    pub(super) ic4: Float,
    pub(super) ic5: Float,
}

impl Ellipsoid {
    /// Ellipsoid constructor from semi-major and semi-minor axis lengths
    /// in meters. Derives all series coefficients once.
    pub fn new(a: Float, b: Float) -> Result<Self, DomainError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(DomainError::InvalidEllipsoid("axes must be finite"));
        }

        if a <= 0.0 || b <= 0.0 {
            return Err(DomainError::InvalidEllipsoid("axes must be positive"));
        }

        if approx_eq!(Float, a, b) {
            return Err(DomainError::InvalidEllipsoid("axes cannot be equal"));
        }

        if a < b {
            return Err(DomainError::InvalidEllipsoid(
                "semi-major axis must exceed semi-minor axis",
            ));
        }

        let e2 = (a * a - b * b) / (a * a);
        let n = (a - b) / (a + b);
        let n2 = n * n;

        let big_a = a * (1.0 - n) * (1.0 - n2) * (1.0 + 9.0 / 4.0 * n2 + 225.0 / 64.0 * n2 * n2);

        let c1 = -1.5 * n + 31.0 / 24.0 * n2 * n - 669.0 / 640.0 * n2 * n2 * n;
        let c2 = 15.0 / 8.0 * n2 - 435.0 / 128.0 * n2 * n2;
        let c3 = -35.0 / 12.0 * n2 * n + 651.0 / 80.0 * n2 * n2 * n;
        let c4 = 315.0 / 64.0 * n2 * n2;
        let c5 = -693.0 / 80.0 * n2 * n2 * n;

        let ic1 = 1.5 * n - 29.0 / 12.0 * n2 * n + 553.0 / 80.0 * n2 * n2 * n;
        let ic2 = 21.0 / 8.0 * n2 - 1537.0 / 128.0 * n2 * n2;
        let ic3 = 151.0 / 24.0 * n2 * n - 32373.0 / 640.0 * n2 * n2 * n;
        let ic4 = 1097.0 / 64.0 * n2 * n2;
        let ic5 = 8011.0 / 150.0 * n2 * n2 * n;

        Ok(Ellipsoid {
            a,
            b,
            e2,
            n,
            limit_phi: WEB_MERCATOR_LIMIT_PHI,
            epsilon: EPSILON,
            big_a,
            c1,
            c2,
            c3,
            c4,
            c5,
            ic1,
            ic2,
            ic3,
            ic4,
            ic5,
        })
    }

    /// Clamps a latitude (in radians) to the valid Web Mercator range.
    ///
    /// Every latitude obtained from a pixel conversion must pass through
    /// this clamp before a scale factor is evaluated for it.
    pub fn clamp_latitude(&self, phi: Float) -> Float {
        phi.clamp(-self.limit_phi, self.limit_phi)
    }

    /// Radius of curvature in the prime vertical, `N = a / sqrt(1 - e2 sin^2 phi)`.
    /// Used to convert ground distances along a parallel into angular spacing.
    pub fn prime_vertical_radius(&self, phi: Float) -> Float {
        let sin_phi = phi.sin();
        self.a / (1.0 - self.e2 * sin_phi * sin_phi).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::Ellipsoid;
    use crate::constants::{WGS84_A, WGS84_B};
    use crate::Float;

    #[test]
    fn derived_constants_within_invariants() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();

        assert!(ellps.e2 > 0.0 && ellps.e2 < 1.0);
        assert!(ellps.n > 0.0 && ellps.n < 1.0);

        // WGS84 reference values
        assert_approx_eq!(Float, ellps.e2, 0.006_694_380_004, epsilon = 1e-8);
        assert_approx_eq!(Float, ellps.n, 0.001_679_220_4, epsilon = 1e-8);

        // rectifying radius, quarter meridian divided by pi/2
        assert!((ellps.big_a - 6_367_449.146).abs() < 1.0);
    }

    #[test]
    fn rejects_degenerate_axes() {
        assert!(Ellipsoid::new(WGS84_B, WGS84_A).is_err());
        assert!(Ellipsoid::new(WGS84_A, WGS84_A).is_err());
        assert!(Ellipsoid::new(WGS84_A, -1.0).is_err());
        assert!(Ellipsoid::new(0.0, 0.0).is_err());
        assert!(Ellipsoid::new(Float::NAN, WGS84_B).is_err());
        assert!(Ellipsoid::new(Float::INFINITY, WGS84_B).is_err());
    }

    #[test]
    fn clamps_latitude_to_web_mercator_range() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();

        assert_approx_eq!(Float, ellps.clamp_latitude(2.0), ellps.limit_phi);
        assert_approx_eq!(Float, ellps.clamp_latitude(-2.0), -ellps.limit_phi);
        assert_approx_eq!(Float, ellps.clamp_latitude(0.5), 0.5);
    }

    #[test]
    fn prime_vertical_radius_grows_towards_poles() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();

        assert_approx_eq!(Float, ellps.prime_vertical_radius(0.0), WGS84_A);
        assert!(ellps.prime_vertical_radius(1.0) > ellps.prime_vertical_radius(0.5));
    }
}
