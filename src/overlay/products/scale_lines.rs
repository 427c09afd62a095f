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

//! Module with the ground-distance scale lines drawn across the map.
//!
//! Horizontal lines extend the major latitude ticks over the full
//! viewport width. Vertical lines are not straight: the ground distance
//! of one interval along a parallel shrinks with latitude, so each line
//! is built row by row, offset from its base meridian by the difference
//! between the row-local and the reference angular interval.

use super::{latitude_at, tick_spacing_degrees};
use crate::errors::DomainError;
use crate::overlay::configuration::Config;
use crate::overlay::geodesy::Ellipsoid;
use crate::overlay::products::scale_bars::latitude_ticks;
use crate::overlay::render::DrawCommand;
use crate::overlay::viewport::{LatLng, MapViewport, ScreenPoint};
use crate::Float;

/// Full-width horizontal lines at the major latitude tick rows.
pub fn horizontal_commands(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
) -> Result<Vec<DrawCommand>, DomainError> {
    let size = viewport.size();

    let ticks = latitude_ticks(ellipsoid, viewport, interval, size.width);

    let mut commands = Vec::new();
    for &phi in &ticks.majors {
        let y = viewport
            .lat_lng_to_pixel(LatLng {
                lat: phi.to_degrees(),
                lng: 0.0,
            })
            .y;

        commands.push(DrawCommand::Line {
            from: ScreenPoint { x: 0.0, y },
            to: ScreenPoint { x: size.width, y },
            color: config.style.color.clone(),
            weight: config.style.weight,
        });
    }

    Ok(commands)
}

/// One curved vertical scale line based at longitude `base_lng`.
///
/// `line` counts the slots outward from the centre and `direction` is
/// +1 east of it, -1 west; together they accumulate the per-row offset
/// so neighbouring lines stay one row-local interval apart.
fn vertical_line(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
    base_lng: Float,
    reference_spacing: Float,
    line: usize,
    direction: Float,
) -> Result<DrawCommand, DomainError> {
    let size = viewport.size();

    let mut points = vec![ScreenPoint {
        x: viewport
            .lat_lng_to_pixel(LatLng {
                lat: 0.0,
                lng: base_lng,
            })
            .x,
        y: 0.0,
    }];

    let mut y = 1.0;
    while y <= size.height {
        let phi = latitude_at(viewport, y);
        let row_spacing = tick_spacing_degrees(ellipsoid, phi, interval)?;

        let offset = (row_spacing / 2.0 - reference_spacing / 2.0)
            + (row_spacing - reference_spacing) * line as Float;

        let x = viewport
            .lat_lng_to_pixel(LatLng {
                lat: 0.0,
                lng: base_lng + direction * offset,
            })
            .x;

        points.push(ScreenPoint { x, y });
        y += 1.0;
    }

    Ok(DrawCommand::PolyLine {
        points,
        color: config.style.color.clone(),
        weight: config.style.weight,
    })
}

/// Curved vertical scale lines over the whole viewport.
///
/// The reference spacing is taken at the viewport edge closer to the
/// equator, where the angular interval is narrowest on screen.
pub fn vertical_commands(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
) -> Result<Vec<DrawCommand>, DomainError> {
    let size = viewport.size();

    let center = viewport.pixel_to_lat_lng(ScreenPoint {
        x: size.width / 2.0,
        y: size.height / 2.0,
    });

    let reference_y = if center.lat > 0.0 { size.height } else { 0.0 };

    let reference = viewport.pixel_to_lat_lng(ScreenPoint {
        x: size.width / 2.0,
        y: reference_y,
    });
    let left = viewport.pixel_to_lat_lng(ScreenPoint {
        x: 0.0,
        y: reference_y,
    });
    let right = viewport.pixel_to_lat_lng(ScreenPoint {
        x: size.width,
        y: reference_y,
    });

    let spacing = tick_spacing_degrees(ellipsoid, reference.lat.to_radians(), interval)?;

    let mut commands = Vec::new();

    let mut line = 0;
    let mut lng = reference.lng + spacing / 2.0;
    while lng < right.lng {
        commands.push(vertical_line(
            ellipsoid, viewport, config, interval, lng, spacing, line, 1.0,
        )?);
        line += 1;
        lng += spacing;
    }

    let mut line = 0;
    let mut lng = reference.lng - spacing / 2.0;
    while lng > left.lng {
        commands.push(vertical_line(
            ellipsoid, viewport, config, interval, lng, spacing, line, -1.0,
        )?);
        line += 1;
        lng -= spacing;
    }

    Ok(commands)
}
