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

//! Module with the linear scale factors of the Web Mercator projection.
//!
//! Both factors are even functions of latitude and diverge towards the
//! poles, hence every input latitude is clamped to the Web Mercator
//! range before evaluation.

use super::ellipsoid::Ellipsoid;
use crate::Float;

/// Direction along which a linear scale factor is measured.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ScaleKind {
    Meridian,
    Parallel,
}

impl ScaleKind {
    /// Linear scale factor of this kind at latitude `phi` (in radians).
    pub fn scale_factor(self, ellipsoid: &Ellipsoid, phi: Float) -> Float {
        match self {
            ScaleKind::Meridian => ellipsoid.meridian_scale(phi),
            ScaleKind::Parallel => ellipsoid.parallel_scale(phi),
        }
    }

    /// Human-readable name used in labels and log messages.
    pub fn label(self) -> &'static str {
        match self {
            ScaleKind::Meridian => "meridian",
            ScaleKind::Parallel => "parallel",
        }
    }

    /// Theoretical scale factor of this kind exactly at the equator.
    ///
    /// The generic formulas flip sign behaviour across the equator, so
    /// isoline labels at the sign change use this constant instead of an
    /// interpolated value.
    pub fn equator_value(self, ellipsoid: &Ellipsoid) -> Float {
        match self {
            ScaleKind::Meridian => 1.0 / (1.0 - ellipsoid.e2),
            ScaleKind::Parallel => 1.0,
        }
    }
}

impl Ellipsoid {
    /// Linear scale factor along the meridian at latitude `phi` (radians).
    ///
    /// `phi` is clamped to the Web Mercator range first.
    pub fn meridian_scale(&self, phi: Float) -> Float {
        let phi = self.clamp_latitude(phi);
        let sin_phi = phi.sin();

        ((1.0 - self.e2 * sin_phi * sin_phi).powi(3)).sqrt() / ((1.0 - self.e2) * phi.cos())
    }

    /// Linear scale factor along the parallel at latitude `phi` (radians).
    ///
    /// `phi` is clamped to the Web Mercator range first.
    pub fn parallel_scale(&self, phi: Float) -> Float {
        let phi = self.clamp_latitude(phi);
        let sin_phi = phi.sin();

        (1.0 - self.e2 * sin_phi * sin_phi).sqrt() / phi.cos()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::{Ellipsoid, ScaleKind};
    use crate::constants::{WGS84_A, WGS84_B};
    use crate::Float;

    fn wgs84() -> Ellipsoid {
        Ellipsoid::new(WGS84_A, WGS84_B).unwrap()
    }

    #[test]
    fn equator_values() {
        let ellps = wgs84();

        assert_approx_eq!(Float, ellps.parallel_scale(0.0), 1.0);
        assert_approx_eq!(Float, ellps.meridian_scale(0.0), 1.0 / (1.0 - ellps.e2));

        assert_approx_eq!(
            Float,
            ScaleKind::Meridian.equator_value(&ellps),
            ellps.meridian_scale(0.0)
        );
        assert_approx_eq!(
            Float,
            ScaleKind::Parallel.equator_value(&ellps),
            ellps.parallel_scale(0.0)
        );
    }

    #[test]
    fn even_symmetry_about_the_equator() {
        let ellps = wgs84();

        let mut phi = 0.0;
        while phi <= ellps.limit_phi {
            assert_approx_eq!(Float, ellps.meridian_scale(phi), ellps.meridian_scale(-phi));
            assert_approx_eq!(Float, ellps.parallel_scale(phi), ellps.parallel_scale(-phi));
            phi += 0.1;
        }
    }

    #[test]
    fn grows_monotonically_away_from_the_equator() {
        let ellps = wgs84();

        let mut previous_mer = ellps.meridian_scale(0.0);
        let mut previous_par = ellps.parallel_scale(0.0);
        let mut phi = 0.05;
        while phi <= ellps.limit_phi {
            let mer = ellps.meridian_scale(phi);
            let par = ellps.parallel_scale(phi);
            assert!(mer > previous_mer);
            assert!(par > previous_par);
            previous_mer = mer;
            previous_par = par;
            phi += 0.05;
        }
    }

    #[test]
    fn out_of_range_latitudes_are_clamped() {
        let ellps = wgs84();

        assert_approx_eq!(
            Float,
            ellps.meridian_scale(2.0),
            ellps.meridian_scale(ellps.limit_phi)
        );
        assert_approx_eq!(
            Float,
            ellps.parallel_scale(-3.0),
            ellps.parallel_scale(ellps.limit_phi)
        );
        assert!(ellps.meridian_scale(2.0).is_finite());
    }
}
