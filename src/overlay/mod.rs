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

//! Module containing the actual overlay core.
//!
//! The host map display drives the core through [`ScaleOverlay::redraw`]:
//! on every pan, zoom or resize it passes the current viewport and
//! receives the full list of draw commands for the enabled products.
//! Every call recomputes from scratch; nothing but the immutable
//! ellipsoid is carried between calls, so repeated or superseded
//! notifications are harmless.

pub mod configuration;
pub mod geodesy;
pub mod intervals;
pub mod products;
pub mod render;
pub mod viewport;

use std::{fs, path::Path};

use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::{DomainError, OverlayError};
use crate::overlay::configuration::Config;
use crate::overlay::geodesy::{Ellipsoid, ScaleKind};
use crate::overlay::render::{DrawCommand, Fill};
use crate::overlay::viewport::{LatLng, MapViewport, ScreenSize, StaticViewport};
use crate::Float;

/// The overlay core: configuration plus the ellipsoid derived from it.
///
/// Constructed once; each [`redraw`](ScaleOverlay::redraw) is a pure
/// function of the passed viewport.
#[derive(Clone, PartialEq, Debug)]
pub struct ScaleOverlay {
    config: Config,
    ellipsoid: Ellipsoid,
}

impl ScaleOverlay {
    /// Overlay constructor, validating the configuration and deriving
    /// the ellipsoid constants.
    pub fn new(config: Config) -> Result<Self, OverlayError> {
        config.check_bounds()?;

        let ellipsoid = Ellipsoid::new(config.ellipsoid.a, config.ellipsoid.b)?;

        Ok(ScaleOverlay { config, ellipsoid })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Recomputes every enabled visual product for the given viewport.
    ///
    /// Products are independent: one failing (missing zoom-interval
    /// record, degenerate projection) is logged and skipped without
    /// affecting the others. Commands are ordered back to front: masks,
    /// bars, scale lines, isolines.
    pub fn redraw(&self, viewport: &dyn MapViewport) -> Vec<DrawCommand> {
        let products = &self.config.products;
        let mut commands = Vec::new();

        if products.meridian_distortion_mask {
            self.collect(
                &mut commands,
                "meridian distortion mask",
                products::distortion::mask_commands(
                    &self.ellipsoid,
                    ScaleKind::Meridian,
                    viewport,
                    &self.config,
                ),
            );
        }

        if products.parallel_distortion_mask {
            self.collect(
                &mut commands,
                "parallel distortion mask",
                products::distortion::mask_commands(
                    &self.ellipsoid,
                    ScaleKind::Parallel,
                    viewport,
                    &self.config,
                ),
            );
        }

        let interval = intervals::zoom_interval(viewport.zoom(), &self.config.zoom_intervals);

        if let Some(interval) = interval {
            let any_bar = products.top_scale_bar
                || products.right_scale_bar
                || products.bottom_scale_bar
                || products.left_scale_bar;

            if any_bar {
                self.collect(
                    &mut commands,
                    "edge scale bars",
                    products::scale_bars::commands(&self.ellipsoid, viewport, &self.config, interval),
                );
            }

            if products.vertical_scale_lines {
                self.collect(
                    &mut commands,
                    "vertical scale lines",
                    products::scale_lines::vertical_commands(
                        &self.ellipsoid,
                        viewport,
                        &self.config,
                        interval,
                    ),
                );
            }

            if products.horizontal_scale_lines {
                self.collect(
                    &mut commands,
                    "horizontal scale lines",
                    products::scale_lines::horizontal_commands(
                        &self.ellipsoid,
                        viewport,
                        &self.config,
                        interval,
                    ),
                );
            }
        } else {
            debug!(
                "No ground-distance interval configured for zoom level {}, skipping bars and scale lines",
                viewport.zoom()
            );
        }

        if products.meridian_scale_isolines {
            self.collect(
                &mut commands,
                "meridian scale isolines",
                products::isolines::isoline_commands(
                    &self.ellipsoid,
                    ScaleKind::Meridian,
                    viewport,
                    &self.config,
                ),
            );
        }

        if products.parallel_scale_isolines {
            self.collect(
                &mut commands,
                "parallel scale isolines",
                products::isolines::isoline_commands(
                    &self.ellipsoid,
                    ScaleKind::Parallel,
                    viewport,
                    &self.config,
                ),
            );
        }

        commands
    }

    fn collect(
        &self,
        out: &mut Vec<DrawCommand>,
        product: &str,
        result: Result<Vec<DrawCommand>, DomainError>,
    ) {
        match result {
            Ok(mut commands) => out.append(&mut commands),
            Err(err) => warn!("Skipping {} for this redraw: {}", product, err),
        }
    }
}

/// Main function of the offline driver, responsible for all steps.
///
/// It reads the provided configuration, recomputes the overlay once for
/// the configured static viewport and writes the draw commands to the
/// output directory.
pub fn run() -> Result<(), OverlayError> {
    info!("Preparing the overlay core");

    debug!("Reading configuration from config.yaml");
    let config = Config::new_from_file(Path::new("config.yaml"))?;

    let viewport = StaticViewport::new(
        LatLng {
            lat: config.viewport.center_lat,
            lng: config.viewport.center_lon,
        },
        config.viewport.zoom,
        ScreenSize {
            width: config.viewport.width,
            height: config.viewport.height,
        },
    );

    let overlay = ScaleOverlay::new(config)?;

    info!("Recomputing overlay products");
    let commands = overlay.redraw(&viewport);

    info!("Writing output");
    save_commands(&commands)?;

    Ok(())
}

/// Flat record of one draw command for the CSV output.
#[derive(Serialize)]
struct CommandRecord {
    kind: &'static str,
    x1: Option<Float>,
    y1: Option<Float>,
    x2: Option<Float>,
    y2: Option<Float>,
    fill: Option<String>,
    color: Option<String>,
    weight: Option<Float>,
    content: Option<String>,
}

impl From<&DrawCommand> for CommandRecord {
    fn from(command: &DrawCommand) -> Self {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                weight,
            } => CommandRecord {
                kind: "line",
                x1: Some(from.x),
                y1: Some(from.y),
                x2: Some(to.x),
                y2: Some(to.y),
                fill: None,
                color: Some(color.clone()),
                weight: Some(*weight),
                content: None,
            },
            DrawCommand::PolyLine {
                points,
                color,
                weight,
            } => CommandRecord {
                kind: "polyline",
                x1: points.first().map(|p| p.x),
                y1: points.first().map(|p| p.y),
                x2: points.last().map(|p| p.x),
                y2: points.last().map(|p| p.y),
                fill: None,
                color: Some(color.clone()),
                weight: Some(*weight),
                content: Some(format!("{} vertices", points.len())),
            },
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => CommandRecord {
                kind: "rect",
                x1: Some(*x),
                y1: Some(*y),
                x2: Some(x + width),
                y2: Some(y + height),
                fill: Some(match fill {
                    Fill::Solid(color) => color.clone(),
                    Fill::Tinted { color, alpha } => format!("{} @ {}", color, alpha),
                    Fill::EdgeFade(edge) => format!("fade {:?}", edge).to_lowercase(),
                }),
                color: None,
                weight: None,
                content: None,
            },
            DrawCommand::Text {
                at,
                content,
                color,
                ..
            } => CommandRecord {
                kind: "text",
                x1: Some(at.x),
                y1: Some(at.y),
                x2: None,
                y2: None,
                fill: None,
                color: Some(color.clone()),
                weight: None,
                content: Some(content.clone()),
            },
        }
    }
}

/// Writes the draw commands of one recomputation to
/// `./output/overlay_commands.csv`.
fn save_commands(commands: &[DrawCommand]) -> Result<(), OverlayError> {
    let out_dir = Path::new("./output/");

    if !out_dir.is_dir() {
        debug!("Output directory does not exist so creating a new one");
        fs::create_dir(out_dir)?;
    }

    let out_path = out_dir.join("overlay_commands.csv");
    let mut out_file = csv::Writer::from_path(out_path)?;

    for command in commands {
        out_file.serialize(CommandRecord::from(command))?;
    }

    out_file.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{configuration::Config, ScaleOverlay};
    use crate::overlay::render::{DrawCommand, Fill};
    use crate::overlay::viewport::{LatLng, ScreenSize, StaticViewport};

    fn viewport_at(lat: f64, zoom: u8) -> StaticViewport {
        StaticViewport::new(
            LatLng { lat, lng: 16.0 },
            zoom,
            ScreenSize {
                width: 1024.0,
                height: 512.0,
            },
        )
    }

    fn all_products_config() -> Config {
        let mut config = Config::default();
        config.products.bottom_scale_bar = true;
        config.products.left_scale_bar = true;
        config.products.vertical_scale_lines = true;
        config.products.horizontal_scale_lines = true;
        config.products.parallel_distortion_mask = true;
        config.products.meridian_scale_isolines = true;
        config.products.parallel_scale_isolines = true;
        config
    }

    #[test]
    fn full_redraw_produces_every_product() {
        let overlay = ScaleOverlay::new(all_products_config()).unwrap();
        let commands = overlay.redraw(&viewport_at(45.0, 6));

        let has_band = commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { fill: Fill::EdgeFade(_), .. }));
        let has_polyline = commands
            .iter()
            .any(|c| matches!(c, DrawCommand::PolyLine { .. }));
        let has_text = commands.iter().any(|c| matches!(c, DrawCommand::Text { .. }));

        assert!(has_band);
        assert!(has_polyline);
        assert!(has_text);
    }

    #[test]
    fn missing_zoom_interval_skips_bars_but_not_masks() {
        let mut config = all_products_config();
        config.viewport.zoom = 0;
        let overlay = ScaleOverlay::new(config).unwrap();

        // zoom 0 has no table record; masks and isolines must survive
        let commands = overlay.redraw(&viewport_at(45.0, 0));

        let has_band = commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { fill: Fill::EdgeFade(_), .. }));
        let has_mask = commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { fill: Fill::Tinted { .. }, .. }));

        assert!(!has_band);
        assert!(has_mask);
    }

    #[test]
    fn disabled_products_emit_nothing() {
        let mut config = Config::default();
        config.products = super::configuration::Products {
            top_scale_bar: false,
            right_scale_bar: false,
            bottom_scale_bar: false,
            left_scale_bar: false,
            vertical_scale_lines: false,
            horizontal_scale_lines: false,
            meridian_distortion_mask: false,
            parallel_distortion_mask: false,
            meridian_scale_isolines: false,
            parallel_scale_isolines: false,
        };

        let overlay = ScaleOverlay::new(config).unwrap();
        assert!(overlay.redraw(&viewport_at(45.0, 6)).is_empty());
    }
}
