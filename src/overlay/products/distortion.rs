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

//! Module locating the pixel rows at which scale distortion crosses the
//! configured threshold, and shading the viewport beyond them.
//!
//! The search runs two one-directional scans from the viewport centre,
//! a coarse 10px phase that skips the under-threshold region cheaply and
//! a 1px phase that walks back to the exact boundary row. The scale
//! factor grows monotonically away from the centre latitude, so a linear
//! scan from a known under-threshold point is sufficient and the fine
//! phase is bounded by one coarse step.

use super::{finite_scale, latitude_at};
use crate::errors::DomainError;
use crate::overlay::configuration::Config;
use crate::overlay::geodesy::{Ellipsoid, ScaleKind};
use crate::overlay::render::{DrawCommand, Fill, TextAlign, TextBaseline};
use crate::overlay::viewport::{MapViewport, ScreenPoint};
use crate::Float;

/// Opacity of the shaded over-threshold regions.
const MASK_ALPHA: Float = 0.2;

/// Pixel rows at which the distortion threshold is crossed.
///
/// `None` means the threshold is never crossed within the visible
/// viewport in that direction.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct BoundaryResult {
    pub north_y: Option<Float>,
    pub south_y: Option<Float>,
}

/// Locates the rows where `|scale - centre scale|` crosses
/// `threshold_percent` percent of the centre scale.
///
/// `scale_at` must be total over the scanned rows (latitudes already
/// clamped to the Web Mercator range); a non-finite factor fails the
/// search immediately instead of stalling the loops.
pub fn find_boundaries<K>(
    scale_at: K,
    height: Float,
    threshold_percent: Float,
) -> Result<BoundaryResult, DomainError>
where
    K: Fn(Float) -> Float,
{
    let center_scale = finite_scale(scale_at(height / 2.0))?;
    let delta = threshold_percent * center_scale / 100.0;

    // north: coarse 10px steps up while under threshold, then 1px back down
    let mut y = height / 2.0;
    loop {
        y -= 10.0;
        let factor = finite_scale(scale_at(y))?;
        if !(y >= -10.0 && (factor - center_scale).abs() < delta) {
            break;
        }
    }
    loop {
        y += 1.0;
        let factor = finite_scale(scale_at(y))?;
        if (factor - center_scale).abs() <= delta {
            break;
        }
    }
    y -= 1.0;
    let north_y = if y > 0.0 { Some(y) } else { None };

    // south: mirrored
    let mut y = height / 2.0;
    loop {
        y += 10.0;
        let factor = finite_scale(scale_at(y))?;
        if !(y < height + 10.0 && (factor - center_scale).abs() < delta) {
            break;
        }
    }
    loop {
        y -= 1.0;
        let factor = finite_scale(scale_at(y))?;
        if (factor - center_scale).abs() <= delta {
            break;
        }
    }
    y += 1.0;
    let south_y = if y < height { Some(y) } else { None };

    Ok(BoundaryResult { north_y, south_y })
}

/// Shades the viewport regions whose distortion exceeds the threshold
/// and labels them with the threshold value.
pub fn mask_commands(
    ellipsoid: &Ellipsoid,
    kind: ScaleKind,
    viewport: &dyn MapViewport,
    config: &Config,
) -> Result<Vec<DrawCommand>, DomainError> {
    let size = viewport.size();

    let scale_at = |y: Float| kind.scale_factor(ellipsoid, latitude_at(viewport, y));
    let boundaries = find_boundaries(scale_at, size.height, config.distortion_threshold)?;

    let color = match kind {
        ScaleKind::Meridian => &config.style.color_meridian,
        ScaleKind::Parallel => &config.style.color_parallel,
    };

    // parallel-scale labels sit one line lower/higher so that both masks
    // stay readable when drawn together
    let label_shift = match kind {
        ScaleKind::Meridian => 0.0,
        ScaleKind::Parallel => 14.0,
    };

    let label = format!(
        "Distortion of {} scale > {}%",
        kind.label(),
        config.distortion_threshold
    );

    let mut commands = Vec::new();

    if let Some(north_y) = boundaries.north_y {
        commands.push(DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: north_y,
            fill: Fill::Tinted {
                color: color.clone(),
                alpha: MASK_ALPHA,
            },
        });
        commands.push(DrawCommand::Text {
            at: ScreenPoint {
                x: size.width - 12.0,
                y: north_y / 2.0 + label_shift,
            },
            content: label.clone(),
            color: color.clone(),
            font: config.style.font.clone(),
            align: TextAlign::Right,
            baseline: TextBaseline::Middle,
        });
    }

    if let Some(south_y) = boundaries.south_y {
        commands.push(DrawCommand::Rect {
            x: 0.0,
            y: south_y,
            width: size.width,
            height: size.height - south_y,
            fill: Fill::Tinted {
                color: color.clone(),
                alpha: MASK_ALPHA,
            },
        });
        commands.push(DrawCommand::Text {
            at: ScreenPoint {
                x: size.width - 12.0,
                y: (size.height + south_y) / 2.0 - label_shift,
            },
            content: label,
            color: color.clone(),
            font: config.style.font.clone(),
            align: TextAlign::Right,
            baseline: TextBaseline::Middle,
        });
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::find_boundaries;
    use crate::constants::{WGS84_A, WGS84_B};
    use crate::overlay::geodesy::Ellipsoid;
    use crate::Float;

    #[test]
    fn flat_scale_leaves_both_boundaries_absent() {
        let result = find_boundaries(|_| 1.0, 512.0, 5.0).unwrap();

        assert_eq!(result.north_y, None);
        assert_eq!(result.south_y, None);
    }

    #[test]
    fn non_finite_scale_fails_fast() {
        assert!(find_boundaries(|_| Float::NAN, 512.0, 5.0).is_err());
        assert!(find_boundaries(|y| if y < 200.0 { Float::INFINITY } else { 1.0 }, 512.0, 5.0)
            .is_err());
    }

    #[test]
    fn meridian_scale_boundaries_bracket_the_centre() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();
        let height = 512.0;

        // linear pixel-to-latitude map spanning 1.2 rad on each side
        let phi_at = move |y: Float| (height / 2.0 - y) / (height / 2.0) * 1.2;
        let scale_at = move |y: Float| ellps.meridian_scale(phi_at(y));

        let result = find_boundaries(scale_at, height, 5.0).unwrap();

        let north_y = result.north_y.unwrap();
        let south_y = result.south_y.unwrap();

        assert!(north_y < south_y);
        assert!(north_y > 0.0 && north_y < height);
        assert!(south_y > 0.0 && south_y < height);

        // the boundary row sits within a pixel of the exact threshold
        let center_scale = scale_at(height / 2.0);
        let delta = 5.0 * center_scale / 100.0;
        let reached = (scale_at(north_y) - center_scale).abs();
        assert!(reached >= delta);
        assert!((reached - delta).abs() < 0.02);

        // symmetric map, symmetric boundaries
        assert!((north_y - (height - south_y)).abs() <= 2.0);
    }

    #[test]
    fn boundary_off_screen_is_reported_absent() {
        let ellps = Ellipsoid::new(WGS84_A, WGS84_B).unwrap();
        let height = 512.0;

        // narrow latitude span keeps distortion under threshold everywhere
        let scale_at =
            move |y: Float| ellps.meridian_scale((height / 2.0 - y) / (height / 2.0) * 0.01);

        let result = find_boundaries(scale_at, height, 5.0).unwrap();

        assert_eq!(result.north_y, None);
        assert_eq!(result.south_y, None);
    }
}
