// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ocrmark - desktop tool for boxing and labelling OCR text regions.
//!
//! Marker settings are read from the file named by `OCRMARK_SETTINGS`
//! (YAML or JSON) when it is set.

mod app;
mod ui;

use anyhow::Result;
use app::OcrMarkApp;
use ocrmark::io::serialization;
use ocrmark::MarkerSettings;
use std::path::PathBuf;

const SETTINGS_ENV: &str = "OCRMARK_SETTINGS";

fn load_settings() -> MarkerSettings {
    let Some(path) = std::env::var_os(SETTINGS_ENV).map(PathBuf::from) else {
        return MarkerSettings::default();
    };
    match serialization::import_settings(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::error!("Failed to load settings, using defaults: {:#}", e);
            MarkerSettings::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = load_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("ocrmark"),
        ..Default::default()
    };

    eframe::run_native(
        "ocrmark",
        options,
        Box::new(move |_cc| Ok(Box::new(OcrMarkApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
