// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles exporting and importing project data and marker
//! settings in YAML and JSON formats. The format is picked from the file
//! extension.

use crate::config::MarkerSettings;
use crate::models::Project;
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> Result<Format> {
    let extension = path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

fn write<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let text = match format_of(path)? {
        Format::Yaml => serde_yaml::to_string(data)?,
        Format::Json => serde_json::to_string_pretty(data)?,
    };
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = format_of(path)?;
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data = match format {
        Format::Yaml => serde_yaml::from_str(&text).with_context(|| format!("Invalid YAML in {}", path.display()))?,
        Format::Json => serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))?,
    };
    Ok(data)
}

/// Export project data to a `.yaml`/`.yml` or `.json` file.
pub fn export_project(data: &Project, path: &Path) -> Result<()> {
    write(data, path)
}

/// Import project data from a `.yaml`/`.yml` or `.json` file.
pub fn import_project(path: &Path) -> Result<Project> {
    read(path)
}

/// Load marker settings from a `.yaml`/`.yml` or `.json` file.
pub fn import_settings(path: &Path) -> Result<MarkerSettings> {
    read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DragCommitRule;
    use crate::models::{Coordinate, ImageInfo, Mark, ProjectSettings};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ocrmark_{}_{}", std::process::id(), name))
    }

    fn sample() -> Project {
        let mut edited = Mark::new("2", Coordinate::new(5.0, 40.0, 80.0, 52.5), "TOTAL 12.00");
        edited.is_edit = true;
        Project::new(ImageInfo::new(640, 480, "receipt.png"))
            .with_marks(vec![
                Mark::new("1", Coordinate::new(5.0, 5.0, 120.0, 20.0), "ACME STORE").focused(),
                edited,
            ])
            .with_settings(ProjectSettings {
                border_color: Some("black".to_string()),
                ..ProjectSettings::default()
            })
    }

    #[test]
    fn test_export_import_both_formats() {
        for name in ["project.yaml", "project.json"] {
            let path = temp_path(name);
            export_project(&sample(), &path).unwrap();
            let loaded = import_project(&path).unwrap();
            std::fs::remove_file(&path).ok();
            assert_eq!(loaded, sample(), "{}", name);
        }
    }

    #[test]
    fn test_json_uses_camel_case() {
        let path = temp_path("fields.json");
        export_project(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("\"labelList\""));
        assert!(text.contains("\"minX\""));
        assert!(text.contains("\"isFocus\""));
        assert!(text.contains("\"borderColor\""));
        assert!(!text.contains("focusBorderColor"));
    }

    #[test]
    fn test_import_hand_written_yaml() {
        let path = temp_path("hand.yml");
        std::fs::write(
            &path,
            "img: {width: 100, height: 50}\nlabelList:\n  - id: a\n    coord: {minX: 1, minY: 2, maxX: 3, maxY: 4}\n    content: hello\n",
        )
        .unwrap();
        let project = import_project(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(project.img, ImageInfo::new(100, 50, ""));
        assert_eq!(project.label_list[0].content, "hello");
        assert!(project.settings.is_none());
    }

    #[test]
    fn test_import_settings() {
        let path = temp_path("settings.yaml");
        std::fs::write(&path, "needCalculateScroll: true\ndragCommitRule: delta-positive\n").unwrap();
        let settings = import_settings(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(settings.need_calculate_scroll);
        assert_eq!(settings.drag_commit_rule, DragCommitRule::DeltaPositive);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = export_project(&sample(), Path::new("project.txt")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
