// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ocrmark - rectangle mark annotation over images.
//!
//! The core maps between image space and the render surface under pan and
//! zoom ([`util::geometry`]), edits immutable project snapshots
//! ([`models::operations`]) and turns pointer gestures into those edits
//! ([`interaction`]). [`session::MarkerSession`] bundles everything for a
//! host UI; the `ocrmark` binary is such a host built on egui.

pub mod config;
pub mod history;
pub mod interaction;
pub mod io;
pub mod models;
pub mod previewer;
pub mod render;
pub mod session;
pub mod util;

pub use config::{DragCommitRule, MarkerSettings};
pub use interaction::{Commit, Interaction, MarkRegion, ModeKind, PointerEvent, PointerKind, Scene, SurfaceRegion};
pub use models::{Coordinate, ImageInfo, Mark, Point, Project, ProjectSettings, Size, ViewportVector};
pub use render::{DisplayList, RenderSurface};
pub use session::MarkerSession;
