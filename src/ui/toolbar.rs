// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and interaction mode selection UI.
//!
//! This module provides the toolbar for switching between drag, select,
//! box and add modes, plus the zoom buttons.

use ocrmark::ModeKind;

/// Toolbar button the user pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Enter(ModeKind),
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

/// Display the toolbar with mode selection buttons.
pub fn show(ui: &mut egui::Ui, mode: ModeKind) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        ui.separator();

        let modes = [
            (ModeKind::Idle, "⏹ None"),
            (ModeKind::Panning, "✋ Drag"),
            (ModeKind::Selecting, "⬆ Select"),
            (ModeKind::BoxMarking, "▭ Box"),
            (ModeKind::CallbackMarking, "➕ Add"),
        ];
        for (kind, label) in modes {
            if ui.selectable_label(mode == kind, label).clicked() && mode != kind {
                action = ToolbarAction::Enter(kind);
            }
        }

        ui.separator();

        if ui.button("🔍+").on_hover_text("Zoom in 2x").clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.button("🔍-").on_hover_text("Zoom out 0.5x").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        if ui.button("Fit").on_hover_text("Fit the image to the canvas").clicked() {
            action = ToolbarAction::ResetZoom;
        }

        ui.separator();

        let mode_text = match mode {
            ModeKind::Idle => "Pick a mode to interact with the image",
            ModeKind::Panning => "Drag to move the image",
            ModeKind::Selecting => "Click a box to focus it",
            ModeKind::BoxMarking => "Drag around 2+ boxes to merge them, or redraw the focused box",
            ModeKind::CallbackMarking => "Drag a new box, then enter its text",
        };

        ui.label(egui::RichText::new(mode_text).italics().weak());
    });

    action
}
