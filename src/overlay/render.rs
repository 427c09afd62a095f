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

//! Module with the draw-command types handed to the external renderer.
//!
//! The core emits only geometry, numeric values and opaque style tokens;
//! parsing colour strings and managing drawing state are the renderer's
//! concern.

use crate::overlay::viewport::ScreenPoint;
use crate::Float;

/// Viewport edge, used to orient edge-fade gradients.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Fill style of a rectangle.
///
/// Colours are opaque tokens passed through from the configuration;
/// `EdgeFade` asks the renderer for a white gradient fading away from
/// the named viewport edge.
#[derive(Clone, PartialEq, Debug)]
pub enum Fill {
    Solid(String),
    Tinted { color: String, alpha: Float },
    EdgeFade(Edge),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// One primitive drawing operation in viewport pixel coordinates.
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: String,
        weight: Float,
    },
    PolyLine {
        points: Vec<ScreenPoint>,
        color: String,
        weight: Float,
    },
    Rect {
        x: Float,
        y: Float,
        width: Float,
        height: Float,
        fill: Fill,
    },
    Text {
        at: ScreenPoint,
        content: String,
        color: String,
        font: String,
        align: TextAlign,
        baseline: TextBaseline,
    },
}
