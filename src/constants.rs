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

//! Module containing constants used by the overlay core.

use crate::Float;

///WGS84 ellipsoid semi-major axis
pub const WGS84_A: Float = 6_378_137.0;

///WGS84 ellipsoid semi-minor axis
pub const WGS84_B: Float = 6_356_752.3142;

///Latitude (in radians, ~85.05 degrees) beyond which the Web Mercator
///scale factor is treated as undefined
pub const WEB_MERCATOR_LIMIT_PHI: Float = 1.484_419_982;

///Tolerance used for numeric comparisons of latitudes and scale factors
pub const EPSILON: Float = 1e-10;

///Square tile edge of the slippy-map pixel grid
pub const TILE_SIZE: Float = 256.0;
