// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Host-side marker session.
//!
//! [`MarkerSession`] is the glue a host UI talks to. It owns the canonical
//! project snapshot, the viewport vector, the surface placement and the
//! interaction machine, stores whatever a gesture or mark operation
//! produces, and repaints the surface after every change.
//!
//! Until both a project and a surface region are known, the interaction
//! and zoom calls do nothing.

use crate::config::MarkerSettings;
use crate::history::History;
use crate::interaction::{Commit, Interaction, MarkRegion, ModeKind, PointerEvent, Scene, SurfaceRegion};
use crate::models::operations;
use crate::models::{Mark, Project, ViewportVector};
use crate::render::{self, RenderSurface};
use crate::util::geometry;
use std::cmp::Ordering;

/// Project, viewport and interaction state bound to one render surface.
pub struct MarkerSession<S: RenderSurface> {
    surface: S,
    interaction: Interaction,
    project: Option<Project>,
    vector: Option<ViewportVector>,
    region: Option<SurfaceRegion>,
    history: History<Project>,
}

impl<S: RenderSurface> MarkerSession<S> {
    pub fn new(surface: S, settings: MarkerSettings) -> Self {
        Self {
            surface,
            interaction: Interaction::new(settings),
            project: None,
            vector: None,
            region: None,
            history: History::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn vector(&self) -> Option<&ViewportVector> {
        self.vector.as_ref()
    }

    pub fn region(&self) -> Option<&SurfaceRegion> {
        self.region.as_ref()
    }

    pub fn mode(&self) -> ModeKind {
        self.interaction.mode()
    }

    pub fn settings(&self) -> &MarkerSettings {
        self.interaction.settings()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Place or move the surface. The first placement fits the image.
    pub fn set_region(&mut self, region: SurfaceRegion) {
        let changed = self.region.as_ref() != Some(&region);
        self.region = Some(region);
        if self.vector.is_none() {
            self.init();
        } else if changed {
            self.redraw();
        }
    }

    /// Replace the project. A different image resets the viewport and history.
    pub fn set_project(&mut self, project: Project) {
        let image_changed = self.project.as_ref().map_or(true, |p| p.img != project.img);
        self.project = Some(project);
        if image_changed {
            self.history.clear();
            self.init();
        } else {
            self.redraw();
        }
    }

    /// Fit the image into the surface again.
    pub fn init(&mut self) {
        let (Some(project), Some(region)) = (&self.project, &self.region) else {
            return;
        };
        let vector = ViewportVector::fit(region.size, &project.img);
        log::info!(
            "Viewport fitted: magnification {:.3}, offset ({:.1}, {:.1})",
            vector.magnification,
            vector.offset.x,
            vector.offset.y
        );
        self.vector = Some(vector);
        self.redraw();
    }

    /// Repaint without any transient box.
    pub fn clear_rect(&mut self) {
        self.redraw();
    }

    pub fn zoom_in_2x(&mut self) {
        self.zoom(2.0);
    }

    pub fn zoom_out_half(&mut self) {
        self.zoom(0.5);
    }

    /// Zoom about the surface center.
    pub fn zoom(&mut self, factor: f64) {
        let Some(vector) = self.vector else {
            return;
        };
        let container = self.region.as_ref().map(|region| region.size);
        self.vector = Some(geometry::zoom(container, &vector, factor));
        self.redraw();
    }

    pub fn start_drag(&mut self) {
        self.with_scene(|interaction, scene, surface| interaction.start_pan(scene, surface));
    }

    pub fn start_select(&mut self) {
        self.with_scene(|interaction, scene, surface| interaction.start_select(scene, surface));
    }

    pub fn start_mark(&mut self) {
        self.with_scene(|interaction, scene, surface| interaction.start_box_mark(scene, surface));
    }

    pub fn start_mark_with_callback(&mut self, callback: impl FnMut(MarkRegion) + 'static) {
        self.with_scene(|interaction, scene, surface| {
            interaction.start_mark_with_callback(scene, surface, callback)
        });
    }

    /// Leave the current mode and repaint.
    pub fn end_operate(&mut self) {
        self.with_scene(|interaction, scene, surface| interaction.end(scene, surface));
    }

    /// Forward a pointer event. Returns `true` when it changed the project or viewport.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let commit = self.with_scene(|interaction, scene, surface| interaction.handle(event, scene, surface));
        match commit.flatten() {
            Some(Commit::Vector(vector)) => {
                self.vector = Some(vector);
                true
            }
            Some(Commit::Project(project)) => {
                self.commit(project);
                true
            }
            None => false,
        }
    }

    pub fn focus_mark(&mut self, id: &str) {
        self.apply(|project| operations::focus_mark(project, id));
    }

    pub fn edit_mark_content(&mut self, target: &Mark) {
        self.apply(|project| operations::change_mark_content(project, target));
    }

    /// Delete `id`, or the focused mark when no id is given.
    pub fn delete_mark(&mut self, id: Option<&str>) {
        let target = match id {
            Some(id) => Some(id.to_string()),
            None => self.project.as_ref().and_then(|p| p.focused()).map(|m| m.id.clone()),
        };
        if let Some(target) = target {
            self.apply(|project| operations::delete_mark(project, &target));
        }
    }

    pub fn add_mark(&mut self, mark: Mark) {
        self.apply(|project| operations::add_mark(project, mark));
    }

    /// Sort marks, in reading order unless a comparator is given.
    pub fn sort_marks(&mut self, comparator: Option<&dyn Fn(&Mark, &Mark) -> Ordering>) {
        self.apply(|project| operations::sort_by_coordinate(project, comparator));
    }

    pub fn undo(&mut self) {
        let Some(current) = self.project.clone() else {
            return;
        };
        if let Some(previous) = self.history.undo(current) {
            self.project = Some(previous);
            log::info!("Undo");
            self.redraw();
        }
    }

    pub fn redo(&mut self) {
        let Some(current) = self.project.clone() else {
            return;
        };
        if let Some(next) = self.history.redo(current) {
            self.project = Some(next);
            log::info!("Redo");
            self.redraw();
        }
    }

    fn apply(&mut self, operation: impl FnOnce(&Project) -> Project) {
        let Some(project) = &self.project else {
            return;
        };
        let next = operation(project);
        self.commit(next);
        self.redraw();
    }

    /// Store a new snapshot, remembering the old one when it differs.
    fn commit(&mut self, next: Project) {
        if let Some(previous) = self.project.replace(next) {
            if Some(&previous) != self.project.as_ref() {
                self.history.push(previous);
            }
        }
    }

    fn with_scene<R>(
        &mut self,
        run: impl FnOnce(&mut Interaction, &Scene<'_>, &mut S) -> R,
    ) -> Option<R> {
        let (Some(project), Some(vector), Some(region)) = (&self.project, &self.vector, &self.region) else {
            log::debug!("No surface or project yet, ignoring");
            return None;
        };
        let scene = Scene {
            project,
            vector,
            region,
        };
        Some(run(&mut self.interaction, &scene, &mut self.surface))
    }

    fn redraw(&mut self) {
        if let (Some(project), Some(vector), Some(region)) = (&self.project, &self.vector, &self.region) {
            render::draw(&mut self.surface, region.size, project, vector, None);
        }
    }
}
