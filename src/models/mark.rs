// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mark data structures.
//!
//! This module defines the rectangle coordinate in image space and the
//! mark (one annotated rectangle with its OCR text and state flags).

use super::viewport::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image space.
///
/// `min_x <= max_x` and `min_y <= max_y` are expected but not enforced;
/// use [`Coordinate::normalized`] when the corners come from a free drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Coordinate {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build a rectangle from two corners in the order they were given.
    ///
    /// `start` lands in the min fields and `end` in the max fields.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Same rectangle with min/max swapped where needed.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.min_x.min(self.max_x),
            self.min_y.min(self.max_y),
            self.min_x.max(self.max_x),
            self.min_y.max(self.max_y),
        )
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Coordinate) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// One annotated rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    /// Caller-assigned identifier, unique within a project.
    pub id: String,
    pub coord: Coordinate,
    /// Recognized or user-entered text.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_focus: bool,
    /// Set once the content or rectangle has been changed by the user.
    #[serde(default)]
    pub is_edit: bool,
}

impl Mark {
    /// Create an unfocused, unedited mark.
    pub fn new(id: impl Into<String>, coord: Coordinate, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coord,
            content: content.into(),
            is_focus: false,
            is_edit: false,
        }
    }

    /// Builder-style focus flag, handy when adding a mark that should be selected.
    pub fn focused(mut self) -> Self {
        self.is_focus = true;
        self
    }
}
