// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker settings.
//!
//! Settings are plain serde data so they can be loaded from a YAML or JSON
//! file (see [`crate::io::serialization::import_settings`]). Every key is
//! optional.

use crate::models::Point;
use serde::{Deserialize, Serialize};

/// When a pan or callback gesture is allowed to commit on pointer-up.
///
/// `start` is where the pointer went down, `last_move` the last position seen
/// by a move event (`None` when the pointer never moved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragCommitRule {
    /// The last move position is positive on both axes.
    #[default]
    PointerPositive,
    /// The drag went right and down.
    DeltaPositive,
    /// Any move at all.
    AnyMovement,
}

impl DragCommitRule {
    pub fn allows(self, start: Point, last_move: Option<Point>) -> bool {
        let Some(end) = last_move else {
            return false;
        };
        match self {
            DragCommitRule::PointerPositive => end.x > 0.0 && end.y > 0.0,
            DragCommitRule::DeltaPositive => end.x > start.x && end.y > start.y,
            DragCommitRule::AnyMovement => true,
        }
    }
}

/// Interaction settings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerSettings {
    /// Subtract ancestor scroll offsets (up to three levels) when translating
    /// pointer positions during box marking.
    pub need_calculate_scroll: bool,
    pub drag_commit_rule: DragCommitRule,
}
