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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Error while reading config.yaml: {0}")]
    Config(#[from] ConfigError),

    #[error("Error in geodetic computation: {0}")]
    Domain(#[from] DomainError),

    #[error("Error while writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Error while writing output records: {0}")]
    OutputRecords(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot open config.yaml: {0}")]
    CantOpenFile(#[from] std::io::Error),

    #[error("Cannot deserialize config.yaml: {0}")]
    CantDeserialize(#[from] serde_yaml::Error),

    #[error("Configuration component is out of bounds {0}")]
    OutOfBounds(&'static str),
}

/// Errors for inputs outside the domain of the geodetic formulas
/// and interval algorithms.
///
/// Situations where a result is merely absent (no zoom-interval record,
/// distortion boundary outside the viewport) are represented as `None`
/// by the respective functions, not as errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("Ellipsoid axes are invalid: {0}")]
    InvalidEllipsoid(&'static str),

    #[error("Interval base is out of domain: {0}")]
    NonPositiveStep(&'static str),

    #[error("Scale factor is not finite: {0}")]
    NonFiniteScale(&'static str),
}
