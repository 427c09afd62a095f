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

//! Module with the capability interface through which the core consumes
//! the host map viewport, plus a self-contained spherical Web Mercator
//! viewport used by the offline driver and the tests.

use std::f64::consts::PI;

use crate::constants::TILE_SIZE;
use crate::Float;

/// Maximum latitude (in degrees) representable on the square
/// Web Mercator world, `atan(sinh(pi))`.
const MERCATOR_LAT_MAX: Float = 85.051_128_779_806_59;

/// A point in viewport-relative pixel coordinates, y growing downwards.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct ScreenPoint {
    pub x: Float,
    pub y: Float,
}

/// Geographic coordinates in degrees.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct LatLng {
    pub lat: Float,
    pub lng: Float,
}

/// Viewport extent in pixels.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct ScreenSize {
    pub width: Float,
    pub height: Float,
}

/// The narrow interface the overlay core needs from the host map display.
///
/// The host owns pan, zoom and resize; on every change it asks the core
/// to recompute, passing an implementation of this trait. The core never
/// caches anything derived from it across calls.
pub trait MapViewport {
    /// Converts a viewport-relative pixel position to geographic coordinates.
    fn pixel_to_lat_lng(&self, point: ScreenPoint) -> LatLng;

    /// Converts geographic coordinates to a viewport-relative pixel position.
    fn lat_lng_to_pixel(&self, coords: LatLng) -> ScreenPoint;

    /// Current viewport extent in pixels.
    fn size(&self) -> ScreenSize;

    /// Current integer zoom level.
    fn zoom(&self) -> u8;
}

/// A fixed spherical Web Mercator viewport over the standard 256px
/// slippy-map pixel grid.
///
/// This is not a map display: it exists so that the offline driver and
/// the tests can exercise the core without a host, using the same
/// pixel/geographic relationship a typical web map provides.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct StaticViewport {
    zoom: u8,
    size: ScreenSize,
    /// World-pixel coordinates of the viewport's top-left corner.
    origin: ScreenPoint,
}

impl StaticViewport {
    /// Creates a viewport of `size` pixels centred on `center` at `zoom`.
    pub fn new(center: LatLng, zoom: u8, size: ScreenSize) -> Self {
        let center_world = Self::project(center, zoom);
        let origin = ScreenPoint {
            x: center_world.x - size.width / 2.0,
            y: center_world.y - size.height / 2.0,
        };

        StaticViewport { zoom, size, origin }
    }

    fn world_size(zoom: u8) -> Float {
        TILE_SIZE * (1_u64 << zoom) as Float
    }

    /// Geographic coordinates to absolute world-pixel coordinates.
    fn project(coords: LatLng, zoom: u8) -> ScreenPoint {
        let world = Self::world_size(zoom);

        let lat = coords.lat.clamp(-MERCATOR_LAT_MAX, MERCATOR_LAT_MAX);
        let sin_lat = lat.to_radians().sin();

        ScreenPoint {
            x: (coords.lng + 180.0) / 360.0 * world,
            y: (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * world,
        }
    }

    /// Absolute world-pixel coordinates back to geographic coordinates.
    fn unproject(point: ScreenPoint, zoom: u8) -> LatLng {
        let world = Self::world_size(zoom);

        LatLng {
            lat: (PI * (1.0 - 2.0 * point.y / world)).sinh().atan().to_degrees(),
            lng: point.x / world * 360.0 - 180.0,
        }
    }
}

impl MapViewport for StaticViewport {
    fn pixel_to_lat_lng(&self, point: ScreenPoint) -> LatLng {
        Self::unproject(
            ScreenPoint {
                x: self.origin.x + point.x,
                y: self.origin.y + point.y,
            },
            self.zoom,
        )
    }

    fn lat_lng_to_pixel(&self, coords: LatLng) -> ScreenPoint {
        let world = Self::project(coords, self.zoom);

        ScreenPoint {
            x: world.x - self.origin.x,
            y: world.y - self.origin.y,
        }
    }

    fn size(&self) -> ScreenSize {
        self.size
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::{LatLng, MapViewport, ScreenPoint, ScreenSize, StaticViewport};
    use crate::Float;

    fn viewport() -> StaticViewport {
        StaticViewport::new(
            LatLng { lat: 45.0, lng: 16.0 },
            6,
            ScreenSize {
                width: 1024.0,
                height: 512.0,
            },
        )
    }

    #[test]
    fn centre_pixel_maps_to_centre_coordinates() {
        let viewport = viewport();

        let center = viewport.pixel_to_lat_lng(ScreenPoint { x: 512.0, y: 256.0 });
        assert_approx_eq!(Float, center.lat, 45.0, epsilon = 1e-9);
        assert_approx_eq!(Float, center.lng, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn pixel_round_trip() {
        let viewport = viewport();

        let point = ScreenPoint { x: 100.0, y: 400.0 };
        let round_trip = viewport.lat_lng_to_pixel(viewport.pixel_to_lat_lng(point));

        assert_approx_eq!(Float, round_trip.x, point.x, epsilon = 1e-6);
        assert_approx_eq!(Float, round_trip.y, point.y, epsilon = 1e-6);
    }

    #[test]
    fn latitude_decreases_downwards() {
        let viewport = viewport();

        let top = viewport.pixel_to_lat_lng(ScreenPoint { x: 0.0, y: 0.0 });
        let bottom = viewport.pixel_to_lat_lng(ScreenPoint { x: 0.0, y: 512.0 });

        assert!(top.lat > bottom.lat);
    }
}
