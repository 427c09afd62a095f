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

//! Offline driver for the overlay core.
//!
//! Reads the viewport and overlay configuration from `config.yaml`,
//! recomputes every requested visual product once and writes the resulting
//! draw commands to the output directory, so that the geometry can be
//! inspected without a host map display.

use env_logger::Env;
use log::{error, info};

/// The main program function.
/// Prepares the runtime environment and calls [`mercator_scales::overlay::run`].
///
/// To provide meaningful and high-quality error messages the `env_logger`
/// needs to be initiated before any log messages are possible to occur.
fn main() {
    #[cfg(not(feature = "debug"))]
    let logger_env = Env::new().filter_or("MSO_LOG_LEVEL", "info");

    #[cfg(feature = "debug")]
    let logger_env = Env::new().filter_or("MSO_LOG_LEVEL", "debug");

    env_logger::Builder::from_env(logger_env)
        .format_timestamp_millis()
        .init();

    match mercator_scales::overlay::run() {
        Ok(_) => info!("Overlay recomputation finished. Check the output directory and log."),
        Err(err) => error!("Overlay recomputation failed with error: {}", err),
    }
}
