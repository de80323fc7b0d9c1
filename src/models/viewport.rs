// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport data structures.
//!
//! The viewport vector describes how image space maps onto the render
//! surface: `screen = image * magnification + offset`.

use super::project::ImageInfo;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point. Depending on context it lives in image, surface or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a container or scaled image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Image-to-screen mapping: magnification, offset and a carried rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportVector {
    pub magnification: f64,
    pub offset: Point,
    /// Kept for file compatibility. Rendering ignores it.
    #[serde(default)]
    pub rotation_deg: f64,
}

impl Default for ViewportVector {
    fn default() -> Self {
        Self {
            magnification: 1.0,
            offset: Point::ZERO,
            rotation_deg: 0.0,
        }
    }
}

impl ViewportVector {
    pub fn new(magnification: f64, offset: Point) -> Self {
        Self {
            magnification,
            offset,
            rotation_deg: 0.0,
        }
    }

    /// Fit `img` inside `container`, centered along the slack axis.
    ///
    /// The wider-than-container case fills the width; otherwise the height.
    /// Degenerate sizes fall back to the identity vector.
    pub fn fit(container: Size, img: &ImageInfo) -> Self {
        let (img_w, img_h) = (f64::from(img.width), f64::from(img.height));
        if container.width <= 0.0 || container.height <= 0.0 || img_w <= 0.0 || img_h <= 0.0 {
            log::debug!("Cannot fit {}x{} image into {:?}", img.width, img.height, container);
            return Self::default();
        }

        let container_ratio = container.width / container.height;
        let img_ratio = img_w / img_h;

        if img_ratio > container_ratio {
            let magnification = container.width / img_w;
            Self::new(
                magnification,
                Point::new(0.0, (container.height - img_h * magnification) / 2.0),
            )
        } else {
            let magnification = container.height / img_h;
            Self::new(
                magnification,
                Point::new((container.width - img_w * magnification) / 2.0, 0.0),
            )
        }
    }

    /// Copy of this vector with another offset.
    pub fn with_offset(&self, offset: Point) -> Self {
        Self { offset, ..*self }
    }

    /// Whether the rotation collapses to the identity (a multiple of 360°).
    pub fn is_upright(&self) -> bool {
        (self.rotation_deg / 90.0) % 4.0 == 0.0
    }
}
