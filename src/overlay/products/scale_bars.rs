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

//! Module with the edge scale bars.
//!
//! A bar is a faded band along a viewport edge with tick marks at
//! ellipsoid-accurate ground distances and a centred distance label.
//! Latitude ticks are spaced in meridian-arc space and mapped back
//! through the inverse arc series, so their pixel spacing widens with
//! distortion; longitude ticks use the angular equivalent of the ground
//! interval along the parallel at the edge's centre latitude.
//! Major ticks sit at half-interval offsets from the edge centre,
//! minor ticks at tenth-interval offsets.

use super::tick_spacing_degrees;
use crate::errors::DomainError;
use crate::overlay::configuration::Config;
use crate::overlay::geodesy::Ellipsoid;
use crate::overlay::render::{DrawCommand, Edge, Fill, TextAlign, TextBaseline};
use crate::overlay::viewport::{LatLng, MapViewport, ScreenPoint};
use crate::Float;

/// Width of the faded band behind each bar, in pixels.
const BAND_WIDTH: Float = 10.0;

/// Latitudes (in radians) of the tick marks of one vertical bar.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LatitudeTicks {
    pub majors: Vec<Float>,
    pub minors: Vec<Float>,
}

/// Longitudes (in degrees) of the tick marks of one horizontal bar.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LongitudeTicks {
    pub majors: Vec<Float>,
    pub minors: Vec<Float>,
}

/// Computes tick latitudes for a vertical bar at viewport column `edge_x`.
///
/// Ticks beyond the Web Mercator latitude limit are dropped.
pub fn latitude_ticks(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    interval: Float,
    edge_x: Float,
) -> LatitudeTicks {
    let size = viewport.size();

    let phi_at = |y: Float| {
        viewport
            .pixel_to_lat_lng(ScreenPoint { x: edge_x, y })
            .lat
            .to_radians()
    };

    let arc_center = ellipsoid.arc_length(phi_at(size.height / 2.0));
    let arc_top = ellipsoid.arc_length(phi_at(0.0));
    let arc_bottom = ellipsoid.arc_length(phi_at(size.height));

    let mut ticks = LatitudeTicks::default();

    let mut s = arc_center + interval / 2.0;
    while s < arc_top {
        let phi = ellipsoid.latitude_for_arc(s);
        if phi.abs() < ellipsoid.limit_phi {
            ticks.majors.push(phi);
        }
        s += interval;
    }

    let mut s = arc_center - interval / 2.0;
    while s > arc_bottom {
        let phi = ellipsoid.latitude_for_arc(s);
        if phi.abs() < ellipsoid.limit_phi {
            ticks.majors.push(phi);
        }
        s -= interval;
    }

    let mut s = arc_center;
    while s < arc_top {
        let phi = ellipsoid.latitude_for_arc(s);
        if phi.abs() < ellipsoid.limit_phi {
            ticks.minors.push(phi);
        }
        s += interval / 10.0;
    }

    let mut s = arc_center - interval / 10.0;
    while s > arc_bottom {
        let phi = ellipsoid.latitude_for_arc(s);
        if phi.abs() < ellipsoid.limit_phi {
            ticks.minors.push(phi);
        }
        s -= interval / 10.0;
    }

    ticks
}

/// Computes tick longitudes for a horizontal bar at viewport row `edge_y`.
pub fn longitude_ticks(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    interval: Float,
    edge_y: Float,
) -> Result<LongitudeTicks, DomainError> {
    let size = viewport.size();

    let center = viewport.pixel_to_lat_lng(ScreenPoint {
        x: size.width / 2.0,
        y: edge_y,
    });
    let left = viewport.pixel_to_lat_lng(ScreenPoint { x: 0.0, y: edge_y });
    let right = viewport.pixel_to_lat_lng(ScreenPoint {
        x: size.width,
        y: edge_y,
    });

    let spacing = tick_spacing_degrees(ellipsoid, center.lat.to_radians(), interval)?;

    let mut ticks = LongitudeTicks::default();

    let mut lng = center.lng + spacing / 2.0;
    while lng < right.lng {
        ticks.majors.push(lng);
        lng += spacing;
    }

    let mut lng = center.lng - spacing / 2.0;
    while lng > left.lng {
        ticks.majors.push(lng);
        lng -= spacing;
    }

    let mut lng = center.lng;
    while lng < right.lng {
        ticks.minors.push(lng);
        lng += spacing / 10.0;
    }

    let mut lng = center.lng - spacing / 10.0;
    while lng > left.lng {
        ticks.minors.push(lng);
        lng -= spacing / 10.0;
    }

    Ok(ticks)
}

/// Ground-distance label of a bar, switching to kilometers at 1000 m.
fn interval_label(interval: Float) -> String {
    if interval >= 1000.0 {
        format!("{} km", interval / 1000.0)
    } else {
        format!("{} m", interval)
    }
}

fn latitude_tick_command(
    viewport: &dyn MapViewport,
    config: &Config,
    phi: Float,
    tick_size: Float,
    edge_x: Float,
) -> DrawCommand {
    // ticks point inward from either edge
    let size = if edge_x < tick_size {
        -tick_size
    } else {
        tick_size
    };

    let y = viewport
        .lat_lng_to_pixel(LatLng {
            lat: phi.to_degrees(),
            lng: 0.0,
        })
        .y;

    DrawCommand::Line {
        from: ScreenPoint { x: edge_x, y },
        to: ScreenPoint {
            x: edge_x - size,
            y,
        },
        color: config.style.color.clone(),
        weight: config.style.weight,
    }
}

fn longitude_tick_command(
    viewport: &dyn MapViewport,
    config: &Config,
    lng: Float,
    tick_size: Float,
    edge_y: Float,
) -> DrawCommand {
    let size = if edge_y < tick_size {
        -tick_size
    } else {
        tick_size
    };

    let x = viewport.lat_lng_to_pixel(LatLng { lat: 0.0, lng }).x;

    DrawCommand::Line {
        from: ScreenPoint { x, y: edge_y },
        to: ScreenPoint {
            x,
            y: edge_y - size,
        },
        color: config.style.color.clone(),
        weight: config.style.weight,
    }
}

fn horizontal_bar_commands(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
    edge: Edge,
) -> Result<Vec<DrawCommand>, DomainError> {
    let size = viewport.size();

    let (edge_y, band_y, label_y, baseline) = match edge {
        Edge::Top => (0.0, 0.0, 12.0, TextBaseline::Top),
        _ => (
            size.height,
            size.height - BAND_WIDTH,
            size.height - 12.0,
            TextBaseline::Bottom,
        ),
    };

    let mut commands = vec![
        DrawCommand::Rect {
            x: 0.0,
            y: band_y,
            width: size.width,
            height: BAND_WIDTH,
            fill: Fill::EdgeFade(edge),
        },
        DrawCommand::Line {
            from: ScreenPoint { x: 0.0, y: edge_y },
            to: ScreenPoint {
                x: size.width,
                y: edge_y,
            },
            color: config.style.color.clone(),
            weight: config.style.weight,
        },
    ];

    let ticks = longitude_ticks(ellipsoid, viewport, interval, edge_y)?;
    for &lng in &ticks.majors {
        commands.push(longitude_tick_command(
            viewport,
            config,
            lng,
            config.ticks.major_size,
            edge_y,
        ));
    }
    for &lng in &ticks.minors {
        commands.push(longitude_tick_command(
            viewport,
            config,
            lng,
            config.ticks.minor_size,
            edge_y,
        ));
    }

    commands.push(DrawCommand::Text {
        at: ScreenPoint {
            x: size.width / 2.0,
            y: label_y,
        },
        content: interval_label(interval),
        color: config.style.color.clone(),
        font: config.style.font.clone(),
        align: TextAlign::Center,
        baseline,
    });

    Ok(commands)
}

fn vertical_bar_commands(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
    edge: Edge,
) -> Vec<DrawCommand> {
    let size = viewport.size();

    let (edge_x, band_x, label_x, align) = match edge {
        Edge::Left => (0.0, 0.0, 12.0, TextAlign::Left),
        _ => (
            size.width,
            size.width - BAND_WIDTH,
            size.width - 12.0,
            TextAlign::Right,
        ),
    };

    let mut commands = vec![
        DrawCommand::Rect {
            x: band_x,
            y: 0.0,
            width: BAND_WIDTH,
            height: size.height,
            fill: Fill::EdgeFade(edge),
        },
        DrawCommand::Line {
            from: ScreenPoint { x: edge_x, y: 0.0 },
            to: ScreenPoint {
                x: edge_x,
                y: size.height,
            },
            color: config.style.color.clone(),
            weight: config.style.weight,
        },
    ];

    let ticks = latitude_ticks(ellipsoid, viewport, interval, edge_x);
    for &phi in &ticks.majors {
        commands.push(latitude_tick_command(
            viewport,
            config,
            phi,
            config.ticks.major_size,
            edge_x,
        ));
    }
    for &phi in &ticks.minors {
        commands.push(latitude_tick_command(
            viewport,
            config,
            phi,
            config.ticks.minor_size,
            edge_x,
        ));
    }

    commands.push(DrawCommand::Text {
        at: ScreenPoint {
            x: label_x,
            y: size.height / 2.0,
        },
        content: interval_label(interval),
        color: config.style.color.clone(),
        font: config.style.font.clone(),
        align,
        baseline: TextBaseline::Middle,
    });

    commands
}

/// Renders every enabled edge scale bar.
pub fn commands(
    ellipsoid: &Ellipsoid,
    viewport: &dyn MapViewport,
    config: &Config,
    interval: Float,
) -> Result<Vec<DrawCommand>, DomainError> {
    let mut commands = Vec::new();

    if config.products.top_scale_bar {
        commands.append(&mut horizontal_bar_commands(
            ellipsoid, viewport, config, interval, Edge::Top,
        )?);
    }

    if config.products.right_scale_bar {
        commands.append(&mut vertical_bar_commands(
            ellipsoid,
            viewport,
            config,
            interval,
            Edge::Right,
        ));
    }

    if config.products.bottom_scale_bar {
        commands.append(&mut horizontal_bar_commands(
            ellipsoid,
            viewport,
            config,
            interval,
            Edge::Bottom,
        )?);
    }

    if config.products.left_scale_bar {
        commands.append(&mut vertical_bar_commands(
            ellipsoid,
            viewport,
            config,
            interval,
            Edge::Left,
        ));
    }

    Ok(commands)
}
