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

//! Mercator Scales Overlay (MSO) is the computational core of a map overlay
//! that visualises scales and distortions of the Web Mercator projection.
//!
//! Given the current viewport of a host map display, the core computes edge
//! scale bars with ellipsoid-accurate tick positions, masks over the regions
//! where linear scale distortion exceeds a configured threshold, isolines of
//! constant meridian or parallel scale, and curved ground-distance scale
//! lines. All results are emitted as plain geometric draw commands; the host
//! owns the viewport, the rendering surface and the layer lifecycle.

pub mod constants;
pub mod errors;
pub mod overlay;

/// Floating-point type used by all geodetic and screen-space computations.
pub type Float = f64;
