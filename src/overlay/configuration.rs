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

//! Module responsible for parsing and checking the configuration file.
//!
//! The configuration file uses [YAML](https://en.wikipedia.org/wiki/YAML)
//! and `serde` to enforce strong typing and automatic type checking.
//! Every section is optional and defaults to the conventional overlay
//! setup: WGS84 axes, top and right scale bars, meridian distortion mask
//! at 5%, and the standard zoom lookup table.
//!
//! The structures and their fields in this module directly correspond to
//! the fields inside `config.yaml` so you can check this documentation
//! for more details how to set the config file.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::constants::{WGS84_A, WGS84_B};
use crate::errors::ConfigError;
use crate::overlay::intervals::{default_zoom_intervals, ZoomLevelInterval};
use crate::Float;

/// Axis lengths of the reference ellipsoid in meters.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct EllipsoidAxes {
    /// Semi-major axis. Must exceed the semi-minor axis.
    #[serde(default = "EllipsoidAxes::default_a")]
    pub a: Float,

    /// Semi-minor axis. Must be positive.
    #[serde(default = "EllipsoidAxes::default_b")]
    pub b: Float,
}

impl EllipsoidAxes {
    fn default_a() -> Float {
        WGS84_A
    }

    fn default_b() -> Float {
        WGS84_B
    }

    /// Checks if the axes describe a valid oblate ellipsoid.
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(ConfigError::OutOfBounds("Ellipsoid axes must be finite"));
        }

        if self.b <= 0.0 {
            return Err(ConfigError::OutOfBounds(
                "Ellipsoid semi-minor axis must be positive",
            ));
        }

        if self.a <= self.b {
            return Err(ConfigError::OutOfBounds(
                "Ellipsoid semi-major axis must exceed the semi-minor axis",
            ));
        }

        Ok(())
    }
}

impl Default for EllipsoidAxes {
    fn default() -> Self {
        EllipsoidAxes {
            a: EllipsoidAxes::default_a(),
            b: EllipsoidAxes::default_b(),
        }
    }
}

/// Style tokens passed through to the renderer unparsed.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Style {
    /// Colour of scale bars, ticks and scale lines.
    #[serde(default = "Style::default_color")]
    pub color: String,

    /// Colour of meridian-scale products (mask, isolines).
    #[serde(default = "Style::default_color_meridian")]
    pub color_meridian: String,

    /// Colour of parallel-scale products (mask, isolines).
    #[serde(default = "Style::default_color_parallel")]
    pub color_parallel: String,

    /// Line weight in pixels.
    #[serde(default = "Style::default_weight")]
    pub weight: Float,

    /// Font token for labels.
    #[serde(default = "Style::default_font")]
    pub font: String,
}

impl Style {
    fn default_color() -> String {
        "#000".to_string()
    }

    fn default_color_meridian() -> String {
        "#00f".to_string()
    }

    fn default_color_parallel() -> String {
        "#0f0".to_string()
    }

    fn default_weight() -> Float {
        0.8
    }

    fn default_font() -> String {
        "11px Arial".to_string()
    }

    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ConfigError::OutOfBounds("Line weight must be positive"));
        }

        Ok(())
    }
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: Style::default_color(),
            color_meridian: Style::default_color_meridian(),
            color_parallel: Style::default_color_parallel(),
            weight: Style::default_weight(),
            font: Style::default_font(),
        }
    }
}

/// Flags selecting which visual products are recomputed per redraw.
///
/// Every product is computed independently; any subset can be enabled.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct Products {
    pub top_scale_bar: bool,
    pub right_scale_bar: bool,
    pub bottom_scale_bar: bool,
    pub left_scale_bar: bool,
    pub vertical_scale_lines: bool,
    pub horizontal_scale_lines: bool,
    pub meridian_distortion_mask: bool,
    pub parallel_distortion_mask: bool,
    pub meridian_scale_isolines: bool,
    pub parallel_scale_isolines: bool,
}

impl Default for Products {
    fn default() -> Self {
        Products {
            top_scale_bar: true,
            right_scale_bar: true,
            bottom_scale_bar: false,
            left_scale_bar: false,
            vertical_scale_lines: false,
            horizontal_scale_lines: false,
            meridian_distortion_mask: true,
            parallel_distortion_mask: false,
            meridian_scale_isolines: false,
            parallel_scale_isolines: false,
        }
    }
}

/// Tick mark sizes in pixels.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Ticks {
    #[serde(default = "Ticks::default_major_size")]
    pub major_size: Float,

    #[serde(default = "Ticks::default_minor_size")]
    pub minor_size: Float,
}

impl Ticks {
    fn default_major_size() -> Float {
        10.0
    }

    fn default_minor_size() -> Float {
        4.0
    }

    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if self.major_size <= 0.0 || self.minor_size <= 0.0 {
            return Err(ConfigError::OutOfBounds("Tick sizes must be positive"));
        }

        Ok(())
    }
}

impl Default for Ticks {
    fn default() -> Self {
        Ticks {
            major_size: Ticks::default_major_size(),
            minor_size: Ticks::default_minor_size(),
        }
    }
}

/// Viewport used by the offline driver; a host map display supplies
/// its own viewport instead.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Latitude (in degrees) of the viewport centre.
    pub center_lat: Float,

    /// Longitude (in degrees) of the viewport centre.
    pub center_lon: Float,

    /// Integer zoom level.
    pub zoom: u8,

    /// Viewport width in pixels.
    pub width: Float,

    /// Viewport height in pixels.
    pub height: Float,
}

impl ViewportConfig {
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if !(-90.0..90.0).contains(&self.center_lat) {
            return Err(ConfigError::OutOfBounds(
                "Viewport centre latitude is too low or too high",
            ));
        }

        if !(-180.0..180.0).contains(&self.center_lon) {
            return Err(ConfigError::OutOfBounds(
                "Viewport centre longitude is too low or too high",
            ));
        }

        if self.zoom > 25 {
            return Err(ConfigError::OutOfBounds("Viewport zoom level is too high"));
        }

        if self.width < 1.0 || self.height < 1.0 {
            return Err(ConfigError::OutOfBounds(
                "Viewport extent cannot be smaller than one pixel",
            ));
        }

        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            center_lat: 0.0,
            center_lon: 0.0,
            zoom: 3,
            width: 1024.0,
            height: 512.0,
        }
    }
}

/// Main config structure representing the fields in the
/// configuration file.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ellipsoid: EllipsoidAxes,

    pub style: Style,

    pub products: Products,

    /// Distortion threshold in percent of the centre scale.
    pub distortion_threshold: Float,

    pub ticks: Ticks,

    /// Zoom to ground-distance lookup table, ordered by zoom with
    /// non-overlapping inclusive ranges.
    pub zoom_intervals: Vec<ZoomLevelInterval>,

    pub viewport: ViewportConfig,
}

impl Config {
    /// Config structure constructor, responsible for
    /// deserializing configuration and checking it.
    pub fn new_from_file(file_path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read(file_path)?;
        let config: Config = serde_yaml::from_slice(data.as_slice())?;

        config.check_bounds()?;

        Ok(config)
    }

    /// Checks every section against its bounds.
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        self.ellipsoid.check_bounds()?;
        self.style.check_bounds()?;
        self.ticks.check_bounds()?;
        self.viewport.check_bounds()?;

        if !self.distortion_threshold.is_finite()
            || self.distortion_threshold <= 0.0
            || self.distortion_threshold > 100.0
        {
            return Err(ConfigError::OutOfBounds(
                "Distortion threshold must be in (0, 100] percent",
            ));
        }

        if self.zoom_intervals.is_empty() {
            return Err(ConfigError::OutOfBounds(
                "Zoom interval table cannot be empty",
            ));
        }

        for record in &self.zoom_intervals {
            if record.start > record.end {
                return Err(ConfigError::OutOfBounds(
                    "Zoom interval record has start above end",
                ));
            }

            if !record.interval.is_finite() || record.interval <= 0.0 {
                return Err(ConfigError::OutOfBounds(
                    "Zoom interval distance must be positive",
                ));
            }
        }

        for pair in self.zoom_intervals.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(ConfigError::OutOfBounds(
                    "Zoom interval ranges must be ordered and non-overlapping",
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ellipsoid: EllipsoidAxes::default(),
            style: Style::default(),
            products: Products::default(),
            distortion_threshold: 5.0,
            ticks: Ticks::default(),
            zoom_intervals: default_zoom_intervals(),
            viewport: ViewportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::constants::{WGS84_A, WGS84_B};

    #[test]
    fn defaults_describe_the_conventional_overlay() {
        let config = Config::default();

        assert_eq!(config.ellipsoid.a, WGS84_A);
        assert_eq!(config.ellipsoid.b, WGS84_B);
        assert_eq!(config.distortion_threshold, 5.0);
        assert!(config.products.top_scale_bar);
        assert!(config.products.right_scale_bar);
        assert!(config.products.meridian_distortion_mask);
        assert!(!config.products.meridian_scale_isolines);
        assert_eq!(config.zoom_intervals.len(), 18);

        config.check_bounds().unwrap();
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "
products:
  meridian_scale_isolines: true
distortion_threshold: 10.0
viewport:
  center_lat: 45.0
  zoom: 6
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.check_bounds().unwrap();

        assert!(config.products.meridian_scale_isolines);
        assert!(config.products.top_scale_bar);
        assert_eq!(config.distortion_threshold, 10.0);
        assert_eq!(config.viewport.center_lat, 45.0);
        assert_eq!(config.viewport.zoom, 6);
        assert_eq!(config.viewport.width, 1024.0);
        assert_eq!(config.ellipsoid.a, WGS84_A);
    }

    #[test]
    fn rejects_out_of_bounds_values() {
        let mut config = Config::default();
        config.distortion_threshold = 0.0;
        assert!(config.check_bounds().is_err());

        let mut config = Config::default();
        config.ellipsoid.a = config.ellipsoid.b;
        assert!(config.check_bounds().is_err());

        let mut config = Config::default();
        config.zoom_intervals.clear();
        assert!(config.check_bounds().is_err());

        let mut config = Config::default();
        config.zoom_intervals[1].start = 1;
        assert!(config.check_bounds().is_err());

        let mut config = Config::default();
        config.zoom_intervals[0].interval = -5.0;
        assert!(config.check_bounds().is_err());
    }
}
