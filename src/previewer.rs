// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Read-only previewer.
//!
//! Shows an image with a plain list of boxes (for example OCR output) that
//! the user can zoom and drag around but not edit.

use crate::config::MarkerSettings;
use crate::interaction::{ModeKind, PointerEvent, SurfaceRegion};
use crate::models::{Coordinate, ImageInfo, Mark, Project, ProjectSettings};
use crate::render::RenderSurface;
use crate::session::MarkerSession;

pub struct Previewer<S: RenderSurface> {
    session: MarkerSession<S>,
    image: Option<ImageInfo>,
    coords: Vec<Coordinate>,
    settings: Option<ProjectSettings>,
}

impl<S: RenderSurface> Previewer<S> {
    pub fn new(surface: S, settings: MarkerSettings) -> Self {
        Self {
            session: MarkerSession::new(surface, settings),
            image: None,
            coords: Vec::new(),
            settings: None,
        }
    }

    pub fn session(&self) -> &MarkerSession<S> {
        &self.session
    }

    pub fn set_region(&mut self, region: SurfaceRegion) {
        self.session.set_region(region);
    }

    /// Show another image, keeping the current boxes.
    pub fn set_image(&mut self, image: ImageInfo, settings: Option<ProjectSettings>) {
        self.image = Some(image);
        self.settings = settings;
        self.rebuild();
    }

    /// Replace the boxes. Returns `false` when they are unchanged.
    pub fn set_coords(&mut self, coords: Vec<Coordinate>) -> bool {
        if coords == self.coords {
            return false;
        }
        self.coords = coords;
        self.rebuild();
        true
    }

    pub fn zoom_in_2x(&mut self) {
        self.session.zoom_in_2x();
    }

    pub fn zoom_out_half(&mut self) {
        self.session.zoom_out_half();
    }

    /// Switch dragging on or off. Returns whether dragging is now on.
    pub fn toggle_drag(&mut self) -> bool {
        if self.is_dragging() {
            self.session.end_operate();
        } else {
            self.session.start_drag();
        }
        self.is_dragging()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.mode() == ModeKind::Panning
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.session.handle_pointer(event)
    }

    fn rebuild(&mut self) {
        let Some(image) = &self.image else {
            return;
        };
        let marks = self
            .coords
            .iter()
            .enumerate()
            .map(|(index, coord)| Mark::new(index.to_string(), *coord, ""))
            .collect();
        let mut project = Project::new(image.clone()).with_marks(marks);
        project.settings = self.settings.clone();
        self.session.set_project(project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, Size};
    use crate::render::DisplayList;

    fn previewer() -> Previewer<DisplayList> {
        let mut previewer = Previewer::new(DisplayList::new(), MarkerSettings::default());
        previewer.set_region(SurfaceRegion::new(Point::ZERO, Size::new(100.0, 100.0)));
        previewer.set_image(ImageInfo::new(100, 100, "scan.png"), None);
        previewer
    }

    #[test]
    fn test_coords_become_indexed_marks() {
        let mut previewer = previewer();
        assert!(previewer.set_coords(vec![
            Coordinate::new(1.0, 1.0, 5.0, 5.0),
            Coordinate::new(10.0, 10.0, 20.0, 20.0),
        ]));
        let project = previewer.session().project().unwrap();
        let ids: Vec<_> = project.label_list.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1"]);
        assert!(project.label_list.iter().all(|m| m.content.is_empty() && !m.is_edit));
        assert_eq!(previewer.session().surface().strokes().count(), 2);
    }

    #[test]
    fn test_same_coords_do_not_rebuild() {
        let mut previewer = previewer();
        let coords = vec![Coordinate::new(1.0, 1.0, 5.0, 5.0)];
        assert!(previewer.set_coords(coords.clone()));
        let generation = previewer.session().surface().generation();
        assert!(!previewer.set_coords(coords));
        assert_eq!(previewer.session().surface().generation(), generation);
    }

    #[test]
    fn test_toggle_drag_and_pan() {
        let mut previewer = previewer();
        assert!(previewer.toggle_drag());
        previewer.handle_pointer(PointerEvent::down(10.0, 10.0));
        previewer.handle_pointer(PointerEvent::moved(30.0, 25.0));
        assert!(previewer.handle_pointer(PointerEvent::up(30.0, 25.0)));
        assert_eq!(previewer.session().vector().unwrap().offset, Point::new(20.0, 15.0));
        assert!(!previewer.toggle_drag());
        assert_eq!(previewer.session().mode(), ModeKind::Idle);
    }

    #[test]
    fn test_zoom() {
        let mut previewer = previewer();
        previewer.zoom_in_2x();
        let vector = previewer.session().vector().unwrap();
        assert_eq!(vector.magnification, 2.0);
        assert_eq!(vector.offset, Point::new(-50.0, -50.0));
        previewer.zoom_out_half();
        assert_eq!(previewer.session().vector().unwrap().magnification, 1.0);
    }
}
