// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer interaction state machine.
//!
//! [`Interaction`] is always in exactly one mode. Starting a mode tears down
//! the current one (dropping any half-finished gesture) before the new one
//! takes events, and every entry or exit repaints the surface.
//!
//! The machine never mutates project data. Completed gestures come back as a
//! [`Commit`] holding a new viewport vector or a new project snapshot, which
//! the host stores. Callback marking hands its result to the host callback
//! instead.

mod gesture;

pub use gesture::{PointerEvent, PointerKind, SurfaceRegion};

use crate::config::{DragCommitRule, MarkerSettings};
use crate::models::operations::{change_mark_coordinate, focus_mark, merge_marks};
use crate::models::{Coordinate, Mark, Point, Project, ViewportVector};
use crate::render::{self, RenderSurface};
use crate::util::geometry::{point_in_rect, rect_contains, screen_to_image};
use gesture::Latch;

/// What a callback-marking gesture produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkRegion {
    /// The dragged box in image space.
    pub coord: Coordinate,
    /// Raw page positions of the drag: min is where it started, max where it ended.
    pub position: Coordinate,
}

/// Host hook invoked when a callback-marking gesture completes.
pub type AfterMarkCallback = Box<dyn FnMut(MarkRegion)>;

/// Read-only view of the host state an event is processed against.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub project: &'a Project,
    pub vector: &'a ViewportVector,
    pub region: &'a SurfaceRegion,
}

impl Scene<'_> {
    fn draw<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        project: &Project,
        vector: &ViewportVector,
        transient: Option<&Coordinate>,
    ) {
        render::draw(surface, self.region.size, project, vector, transient);
    }
}

/// Result of a completed gesture for the host to store.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Vector(ViewportVector),
    Project(Project),
}

/// The interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Idle,
    Panning,
    Selecting,
    BoxMarking,
    CallbackMarking,
}

enum Mode {
    Idle,
    Panning {
        latch: Option<Latch>,
    },
    Selecting,
    BoxMarking {
        latch: Option<Latch>,
    },
    CallbackMarking {
        latch: Option<Latch>,
        callback: AfterMarkCallback,
    },
}

impl Mode {
    fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::Panning { .. } => ModeKind::Panning,
            Mode::Selecting => ModeKind::Selecting,
            Mode::BoxMarking { .. } => ModeKind::BoxMarking,
            Mode::CallbackMarking { .. } => ModeKind::CallbackMarking,
        }
    }

    fn latch(&self) -> Option<&Latch> {
        match self {
            Mode::Panning { latch } | Mode::BoxMarking { latch } | Mode::CallbackMarking { latch, .. } => {
                latch.as_ref()
            }
            Mode::Idle | Mode::Selecting => None,
        }
    }
}

/// Pointer-driven interaction for one render surface.
pub struct Interaction {
    mode: Mode,
    settings: MarkerSettings,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(MarkerSettings::default())
    }
}

impl Interaction {
    pub fn new(settings: MarkerSettings) -> Self {
        Self {
            mode: Mode::Idle,
            settings,
        }
    }

    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn settings(&self) -> &MarkerSettings {
        &self.settings
    }

    /// Whether a pointer-down has been latched and not yet released.
    pub fn gesture_in_progress(&self) -> bool {
        self.mode.latch().is_some()
    }

    /// Drag to pan the image.
    pub fn start_pan<S: RenderSurface + ?Sized>(&mut self, scene: &Scene<'_>, surface: &mut S) {
        self.enter(Mode::Panning { latch: None }, scene, surface);
    }

    /// Click to focus a mark.
    pub fn start_select<S: RenderSurface + ?Sized>(&mut self, scene: &Scene<'_>, surface: &mut S) {
        self.enter(Mode::Selecting, scene, surface);
    }

    /// Drag a box to merge the marks inside it or to move the focused mark.
    pub fn start_box_mark<S: RenderSurface + ?Sized>(&mut self, scene: &Scene<'_>, surface: &mut S) {
        self.enter(Mode::BoxMarking { latch: None }, scene, surface);
    }

    /// Drag a box and hand it to `callback`.
    pub fn start_mark_with_callback<S, F>(&mut self, scene: &Scene<'_>, surface: &mut S, callback: F)
    where
        S: RenderSurface + ?Sized,
        F: FnMut(MarkRegion) + 'static,
    {
        let mode = Mode::CallbackMarking {
            latch: None,
            callback: Box::new(callback),
        };
        self.enter(mode, scene, surface);
    }

    /// Back to idle. A gesture in progress is dropped without effect.
    pub fn end<S: RenderSurface + ?Sized>(&mut self, scene: &Scene<'_>, surface: &mut S) {
        self.enter(Mode::Idle, scene, surface);
    }

    fn enter<S: RenderSurface + ?Sized>(&mut self, mode: Mode, scene: &Scene<'_>, surface: &mut S) {
        let previous = std::mem::replace(&mut self.mode, Mode::Idle);
        if previous.kind() != ModeKind::Idle {
            log::debug!(
                "Tearing down {:?}{}",
                previous.kind(),
                if previous.latch().is_some() { " (gesture dropped)" } else { "" }
            );
        }
        drop(previous);

        self.mode = mode;
        log::debug!("Interaction mode: {:?}", self.mode.kind());
        scene.draw(surface, scene.project, scene.vector, None);
    }

    /// Feed one pointer event to the active mode.
    pub fn handle<S: RenderSurface + ?Sized>(
        &mut self,
        event: PointerEvent,
        scene: &Scene<'_>,
        surface: &mut S,
    ) -> Option<Commit> {
        let rule = self.settings.drag_commit_rule;
        let marking_origin = scene.region.marking_origin(self.settings.need_calculate_scroll);

        match &mut self.mode {
            Mode::Idle => None,
            Mode::Panning { latch } => pan(latch, event, scene, surface, rule),
            Mode::Selecting => select(event, scene, surface),
            Mode::BoxMarking { latch } => box_mark(latch, event, scene, surface, marking_origin),
            Mode::CallbackMarking { latch, callback } => {
                mark_with_callback(latch, callback, event, scene, surface, marking_origin, rule)
            }
        }
    }
}

fn pan<S: RenderSurface + ?Sized>(
    latch: &mut Option<Latch>,
    event: PointerEvent,
    scene: &Scene<'_>,
    surface: &mut S,
    rule: DragCommitRule,
) -> Option<Commit> {
    match event.kind {
        PointerKind::Down => {
            *latch = Some(Latch::new(event.position));
            None
        }
        PointerKind::Move => {
            let active = latch.as_mut()?;
            active.record(event.position);
            let provisional = scene.vector.with_offset(scene.vector.offset + active.delta());
            scene.draw(surface, scene.project, &provisional, None);
            None
        }
        PointerKind::Up => {
            let finished = latch.take()?;
            if !rule.allows(finished.start, finished.last_move) {
                scene.draw(surface, scene.project, scene.vector, None);
                return None;
            }
            let panned = scene.vector.with_offset(scene.vector.offset + finished.delta());
            log::debug!("Panned to ({:.1}, {:.1})", panned.offset.x, panned.offset.y);
            scene.draw(surface, scene.project, &panned, None);
            Some(Commit::Vector(panned))
        }
        PointerKind::Click => None,
    }
}

fn select<S: RenderSurface + ?Sized>(
    event: PointerEvent,
    scene: &Scene<'_>,
    surface: &mut S,
) -> Option<Commit> {
    if event.kind != PointerKind::Click {
        return None;
    }
    let hit = scene
        .project
        .label_list
        .iter()
        .find(|mark| point_in_rect(event.position, &mark.coord, scene.vector, scene.region.origin))?;
    log::debug!("Selected mark {}", hit.id);
    let next = focus_mark(scene.project, &hit.id);
    if next == *scene.project {
        return None;
    }
    scene.draw(surface, &next, scene.vector, None);
    Some(Commit::Project(next))
}

/// Image-space box spanned by a latch, corners normalized.
fn image_box(latch: &Latch, vector: &ViewportVector, origin: Point) -> Coordinate {
    Coordinate::from_corners(
        screen_to_image(latch.start, vector, origin),
        screen_to_image(latch.end(), vector, origin),
    )
    .normalized()
}

/// Shared down/move handling of the two marking modes.
///
/// Returns `true` when the event was consumed.
fn track_box<S: RenderSurface + ?Sized>(
    latch: &mut Option<Latch>,
    event: PointerEvent,
    scene: &Scene<'_>,
    surface: &mut S,
    origin: Point,
) -> bool {
    match event.kind {
        PointerKind::Down => {
            *latch = Some(Latch::new(event.position));
            true
        }
        PointerKind::Move => {
            if let Some(active) = latch.as_mut() {
                active.record(event.position);
                let transient = image_box(active, scene.vector, origin);
                scene.draw(surface, scene.project, scene.vector, Some(&transient));
            }
            true
        }
        PointerKind::Up | PointerKind::Click => false,
    }
}

fn box_mark<S: RenderSurface + ?Sized>(
    latch: &mut Option<Latch>,
    event: PointerEvent,
    scene: &Scene<'_>,
    surface: &mut S,
    origin: Point,
) -> Option<Commit> {
    if track_box(latch, event, scene, surface, origin) || event.kind != PointerKind::Up {
        return None;
    }
    let finished = latch.take()?;
    if finished.last_move.is_none() {
        // A click without drag marks nothing
        scene.draw(surface, scene.project, scene.vector, None);
        return None;
    }

    let coord = image_box(&finished, scene.vector, origin);
    let inside: Vec<Mark> = scene
        .project
        .label_list
        .iter()
        .filter(|mark| rect_contains(&coord, &mark.coord))
        .cloned()
        .collect();

    let next = if inside.len() >= 2 {
        Some(merge_marks(scene.project, &inside))
    } else {
        scene.project.focused().map(|focused| {
            let moved = Mark {
                coord,
                ..focused.clone()
            };
            change_mark_coordinate(scene.project, &moved)
        })
    };

    scene.draw(surface, next.as_ref().unwrap_or(scene.project), scene.vector, None);
    next.map(Commit::Project)
}

fn mark_with_callback<S: RenderSurface + ?Sized>(
    latch: &mut Option<Latch>,
    callback: &mut AfterMarkCallback,
    event: PointerEvent,
    scene: &Scene<'_>,
    surface: &mut S,
    origin: Point,
    rule: DragCommitRule,
) -> Option<Commit> {
    if track_box(latch, event, scene, surface, origin) || event.kind != PointerKind::Up {
        return None;
    }
    let finished = latch.take()?;
    if !rule.allows(finished.start, finished.last_move) {
        scene.draw(surface, scene.project, scene.vector, None);
        return None;
    }
    // The transient box stays on screen until the host redraws
    callback(MarkRegion {
        coord: image_box(&finished, scene.vector, origin),
        position: Coordinate::from_corners(finished.start, finished.end()),
    });
    None
}
