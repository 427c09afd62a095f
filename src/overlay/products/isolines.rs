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

//! Module detecting the pixel rows where the linear scale factor crosses
//! a rounded grid multiple, producing isoline positions and labels.
//!
//! The scan walks the viewport bottom to top, tracking each row's
//! distance to the nearest lower multiple of the chosen step. A crossing
//! is emitted when that distance decreases between rows, or at the first
//! latitude sign flip. The two triggers are checked in that order and
//! can in principle both fire near the equator; the sign-flip branch
//! then wins, substitutes the theoretical equator constant for the
//! interpolated value and disarms itself for the rest of the scan.

use super::{finite_scale, latitude_at};
use crate::errors::DomainError;
use crate::overlay::configuration::Config;
use crate::overlay::geodesy::{Ellipsoid, ScaleKind};
use crate::overlay::intervals::{nice_step, scientific_parts};
use crate::overlay::render::{DrawCommand, TextAlign, TextBaseline};
use crate::overlay::viewport::{MapViewport, ScreenPoint};
use crate::Float;

/// One detected isoline crossing.
///
/// `y` is the scan row at which the crossing was detected; `digits` is
/// the decimal precision implied by the step's magnitude, for labelling.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IsolineCrossing {
    pub y: Float,
    pub value: Float,
    pub digits: i32,
}

/// Sign with the convention `sign(0) = 0`, so that a row exactly on the
/// equator contributes no offset to the grid distance.
fn sign(value: Float) -> Float {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Chooses the isoline step and label precision for the visible scale
/// range.
///
/// Viewports crossing the equator measure the range from the theoretical
/// minimum of 1 and space isolines more densely (divisor 2.5 instead
/// of 5), since the factor varies on both sides of the sign change.
fn isoline_step(
    scale_top: Float,
    scale_bottom: Float,
    phi_top: Float,
    phi_bottom: Float,
) -> Result<(Float, i32), DomainError> {
    let (range, divisor) = if phi_top * phi_bottom < 0.0 {
        (scale_top.max(scale_bottom) - 1.0, 2.5)
    } else {
        ((scale_top - scale_bottom).abs(), 5.0)
    };

    let raw = range / divisor;
    if !raw.is_finite() || raw <= 0.0 {
        return Err(DomainError::NonPositiveStep(
            "visible scale range is degenerate",
        ));
    }

    // label precision follows the magnitude of the halved (or fractional)
    // base the step is rounded from
    let base = if raw < 1.0 { raw } else { raw / 2.0 };
    let (_, exponent) = scientific_parts(base);
    let step = nice_step(base)?;

    Ok((step, -exponent))
}

/// Scans the viewport for scale-factor grid crossings.
///
/// `top_stop` is the row at which the scan ends (a bottom scale bar
/// reserves its band by stopping the scan early).
pub fn detect_crossings<K, P>(
    scale_at: K,
    latitude_of: P,
    ellipsoid: &Ellipsoid,
    kind: ScaleKind,
    height: Float,
    top_stop: Float,
) -> Result<Vec<IsolineCrossing>, DomainError>
where
    K: Fn(Float) -> Float,
    P: Fn(Float) -> Float,
{
    let scale_top = finite_scale(scale_at(0.0))?;
    let scale_bottom = finite_scale(scale_at(height))?;
    let phi_top = ellipsoid.clamp_latitude(latitude_of(0.0));
    let phi_bottom = ellipsoid.clamp_latitude(latitude_of(height));

    let (step, digits) = isoline_step(scale_top, scale_bottom, phi_top, phi_bottom)?;

    let mut crossings = Vec::new();

    let mut y = height;
    let mut previous_dif = 0.0;
    let mut previous_phi = -ellipsoid.limit_phi;
    let mut previous_scale = kind.equator_value(ellipsoid);
    let mut equator_armed = true;

    loop {
        y -= 1.0;

        let factor = finite_scale(scale_at(y))?;
        let phi = latitude_of(y);
        let dif = factor + sign(phi) * (factor % step);

        if previous_dif > dif || (previous_phi * phi <= 0.0 && equator_armed) {
            let value = if previous_phi * phi <= 0.0 {
                equator_armed = false;
                kind.equator_value(ellipsoid)
            } else {
                previous_scale
            };

            crossings.push(IsolineCrossing { y, value, digits });
        }

        previous_dif = dif;
        previous_phi = phi;
        previous_scale = factor;

        if y < top_stop {
            break;
        }
    }

    Ok(crossings)
}

/// Renders the isolines of one scale kind as full-width lines with
/// left-aligned value labels.
pub fn isoline_commands(
    ellipsoid: &Ellipsoid,
    kind: ScaleKind,
    viewport: &dyn MapViewport,
    config: &Config,
) -> Result<Vec<DrawCommand>, DomainError> {
    let size = viewport.size();

    let top_stop = if config.products.bottom_scale_bar {
        12.0
    } else {
        0.0
    };

    let scale_at = |y: Float| kind.scale_factor(ellipsoid, latitude_at(viewport, y));
    let latitude_of = |y: Float| latitude_at(viewport, y);

    let crossings = detect_crossings(scale_at, latitude_of, ellipsoid, kind, size.height, top_stop)?;

    let (color, label_x) = match kind {
        ScaleKind::Meridian => (&config.style.color_meridian, 12.0),
        ScaleKind::Parallel => (&config.style.color_parallel, 72.0),
    };

    let mut commands = Vec::new();

    for crossing in &crossings {
        commands.push(DrawCommand::Line {
            from: ScreenPoint {
                x: 0.0,
                y: crossing.y + 1.0,
            },
            to: ScreenPoint {
                x: size.width,
                y: crossing.y + 1.0,
            },
            color: color.clone(),
            weight: config.style.weight,
        });
        commands.push(DrawCommand::Text {
            at: ScreenPoint {
                x: label_x,
                y: crossing.y - 1.0,
            },
            content: format!(
                "{:.*}",
                crossing.digits.max(0) as usize,
                crossing.value
            ),
            color: color.clone(),
            font: config.style.font.clone(),
            align: TextAlign::Left,
            baseline: TextBaseline::Bottom,
        });
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::{detect_crossings, isoline_step};
    use crate::constants::{WGS84_A, WGS84_B};
    use crate::overlay::geodesy::{Ellipsoid, ScaleKind};
    use crate::Float;

    fn wgs84() -> Ellipsoid {
        Ellipsoid::new(WGS84_A, WGS84_B).unwrap()
    }

    #[test]
    fn step_selection_prefers_denser_isolines_across_the_equator() {
        // same scale range, once with and once without a sign change
        let (step_across, _) = isoline_step(1.2, 1.15, 0.01, -0.01).unwrap();
        let (step_one_side, _) = isoline_step(1.2, 1.15, 0.02, 0.01).unwrap();

        // across: (1.2 - 1) / 2.5 = 0.08 -> 0.1; one side: 0.05 / 5 = 0.01
        assert_approx_eq!(Float, step_across, 0.1, epsilon = 1e-12);
        assert_approx_eq!(Float, step_one_side, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn step_digits_follow_magnitude() {
        let (step, digits) = isoline_step(1.01, 1.002, 0.3, 0.2).unwrap();

        // range 0.008 / 5 = 0.0016 -> step 0.002 with 3 decimal digits
        assert_approx_eq!(Float, step, 0.002, epsilon = 1e-12);
        assert_eq!(digits, 3);
    }

    #[test]
    fn degenerate_range_is_rejected() {
        assert!(isoline_step(1.0, 1.0, 0.2, 0.1).is_err());
    }

    #[test]
    fn equator_crossing_emits_the_forced_constant_once() {
        let ellps = wgs84();
        let height = 200.0;

        // linear pixel-to-latitude map crossing the equator at row 100
        let phi_at = move |y: Float| (height / 2.0 - y) / (height / 2.0) * 0.0024;
        let scale_at = move |y: Float| ellps.meridian_scale(phi_at(y));

        let crossings =
            detect_crossings(scale_at, phi_at, &ellps, ScaleKind::Meridian, height, 0.0).unwrap();

        assert_eq!(crossings.len(), 1);
        assert_approx_eq!(Float, crossings[0].y, 100.0);
        assert_approx_eq!(
            Float,
            crossings[0].value,
            1.0 / (1.0 - ellps.e2),
            epsilon = 1e-12
        );
    }

    #[test]
    fn monotonic_range_emits_grid_crossings() {
        let ellps = wgs84();
        let height = 400.0;

        // northern-hemisphere viewport from 0.5 to 1.0 rad
        let phi_at = move |y: Float| 1.0 - y / height * 0.5;
        let scale_at = move |y: Float| ellps.parallel_scale(phi_at(y));

        let crossings =
            detect_crossings(scale_at, phi_at, &ellps, ScaleKind::Parallel, height, 0.0).unwrap();

        // the sign-flip seed fires at the bottom row, the rest are grid
        // crossings with values between the endpoint scales
        assert!(crossings.len() > 1);
        let bottom = ellps.parallel_scale(phi_at(height));
        let top = ellps.parallel_scale(phi_at(0.0));
        for crossing in &crossings[1..] {
            assert!(crossing.value >= bottom && crossing.value <= top);
        }
    }

    #[test]
    fn non_finite_scale_fails_fast() {
        let ellps = wgs84();

        let result = detect_crossings(
            |_| Float::NAN,
            |_| 0.5,
            &ellps,
            ScaleKind::Meridian,
            100.0,
            0.0,
        );

        assert!(result.is_err());
    }
}
