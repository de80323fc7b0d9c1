// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and mark interaction.
//!
//! The canvas feeds egui pointer input to the marker session as
//! down/move/up/click events and replays the session's display list with
//! the egui painter every frame.

use ocrmark::render::{DisplayList, DrawCommand, Rgba};
use ocrmark::util::geometry::ScreenRect;
use ocrmark::{MarkerSession, Point, PointerEvent, PointerKind, Size, SurfaceRegion};

const BACKGROUND: egui::Color32 = egui::Color32::from_gray(40);
const STROKE_WIDTH: f32 = 1.5;

/// Display the canvas. Returns `true` when a gesture changed the project or viewport.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut MarkerSession<DisplayList>,
    image_texture: Option<&egui::TextureHandle>,
) -> bool {
    let available = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click_and_drag());

    if session.project().is_none() {
        ui.painter().rect_filled(rect, 0.0, BACKGROUND);
        show_welcome(ui, rect);
        return false;
    }

    session.set_region(SurfaceRegion::new(
        to_point(rect.min),
        Size::new(f64::from(rect.width()), f64::from(rect.height())),
    ));

    let mut changed = false;
    for event in pointer_events(ui, &response) {
        changed |= session.handle_pointer(event);
    }

    paint(&ui.painter_at(rect), rect, session.surface(), image_texture);
    changed
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(f64::from(pos.x), f64::from(pos.y))
}

pub fn to_color(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Translate this frame's pointer input into marker events.
///
/// Presses and moves only count while the canvas is hovered, so windows
/// floating above it keep their clicks.
fn pointer_events(ui: &egui::Ui, response: &egui::Response) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let hovered = response.hovered();
    ui.input(|i| {
        let Some(pos) = i.pointer.interact_pos() else {
            return;
        };
        if i.pointer.primary_pressed() && hovered {
            events.push(PointerEvent::new(PointerKind::Down, to_point(pos)));
        }
        if i.pointer.is_moving() && (hovered || response.dragged()) {
            events.push(PointerEvent::new(PointerKind::Move, to_point(pos)));
        }
        if i.pointer.primary_released() {
            events.push(PointerEvent::new(PointerKind::Up, to_point(pos)));
        }
    });
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::new(PointerKind::Click, to_point(pos)));
        }
    }
    events
}

/// Replay the display list inside `rect`.
fn paint(
    painter: &egui::Painter,
    rect: egui::Rect,
    list: &DisplayList,
    image_texture: Option<&egui::TextureHandle>,
) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let to_screen = |r: &ScreenRect| {
        egui::Rect::from_min_size(
            rect.min + egui::vec2(r.x as f32, r.y as f32),
            egui::vec2(r.width as f32, r.height as f32),
        )
    };

    for command in list.commands() {
        match command {
            DrawCommand::Image { rect: image_rect, .. } => {
                if let Some(texture) = image_texture {
                    painter.image(
                        texture.id(),
                        to_screen(image_rect),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            }
            DrawCommand::StrokeRect { rect: mark_rect, color } => {
                painter.rect_stroke(
                    to_screen(mark_rect),
                    0.0,
                    egui::Stroke::new(STROKE_WIDTH, to_color(*color)),
                );
            }
        }
    }
}

/// Welcome message when no image is loaded.
fn show_welcome(ui: &mut egui::Ui, rect: egui::Rect) {
    ui.allocate_ui_at_rect(rect, |ui| {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("ocrmark")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("Box, merge and label OCR text regions")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("File → Open Image... to begin")
                        .color(egui::Color32::from_gray(180)),
                );
            });
        });
    });
}
