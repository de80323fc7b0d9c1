// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state.
//!
//! A project bundles the annotated image, its mark list and optional
//! display settings. Projects are treated as immutable snapshots: the
//! operations in [`super::operations`] return new projects.

use super::mark::Mark;
use serde::{Deserialize, Serialize};

/// The raster being annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Where the pixels come from (a file path for the desktop host).
    #[serde(default)]
    pub source: String,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32, source: impl Into<String>) -> Self {
        Self {
            width,
            height,
            source: source.into(),
        }
    }
}

/// Optional per-project border colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_border_color: Option<String>,
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub label_list: Vec<Mark>,
    pub img: ImageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
}

impl Project {
    /// Create an empty project for the given image.
    pub fn new(img: ImageInfo) -> Self {
        Self {
            label_list: Vec::new(),
            img,
            settings: None,
        }
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.label_list = marks;
        self
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Look up a mark by id.
    pub fn find(&self, id: &str) -> Option<&Mark> {
        self.label_list.iter().find(|mark| mark.id == id)
    }

    /// The focused mark, if any.
    pub fn focused(&self) -> Option<&Mark> {
        self.label_list.iter().find(|mark| mark.is_focus)
    }
}
