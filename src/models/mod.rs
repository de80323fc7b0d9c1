// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: marks, projects, viewport and the mark operations.

pub mod mark;
pub mod operations;
pub mod project;
pub mod viewport;

pub use mark::{Coordinate, Mark};
pub use project::{ImageInfo, Project, ProjectSettings};
pub use viewport::{Point, Size, ViewportVector};
