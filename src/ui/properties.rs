// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mark list panel.
//!
//! This module lists the project's marks, lets the user focus one, edit
//! the focused mark's text and delete marks.

use super::canvas::to_color;
use ocrmark::render::{Palette, Rgba};
use ocrmark::{Mark, Project};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    FocusMark(String),
    EditContent(Mark),
    DeleteMark(String),
    SortMarks,
}

/// Row highlight matching the canvas border, `None` for plain marks.
fn row_color(mark: &Mark, palette: &Palette) -> Option<Rgba> {
    if mark.is_focus {
        Some(palette.focus)
    } else if mark.is_edit {
        Some(palette.edited)
    } else {
        None
    }
}

/// Display the mark list. `draft` holds the text being typed for the focused mark.
pub fn show(ui: &mut egui::Ui, project: Option<&Project>, draft: &mut String) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.horizontal(|ui| {
        ui.heading("Marks");
        if ui.small_button("Sort").on_hover_text("Reading order").clicked() {
            action = PropertiesAction::SortMarks;
        }
    });
    ui.separator();

    let Some(project) = project else {
        ui.label(egui::RichText::new("No image loaded").weak());
        return action;
    };
    if project.label_list.is_empty() {
        ui.label(egui::RichText::new("No marks yet").weak());
        return action;
    }

    let palette = Palette::from_settings(project.settings.as_ref());
    egui::ScrollArea::vertical().show(ui, |ui| {
        for mark in &project.label_list {
            let color = row_color(mark, &palette).map_or(ui.visuals().text_color(), to_color);

            ui.horizontal(|ui| {
                let text = if mark.content.is_empty() { "(empty)" } else { mark.content.as_str() };
                if ui
                    .selectable_label(mark.is_focus, egui::RichText::new(text).color(color))
                    .clicked()
                {
                    *draft = mark.content.clone();
                    action = PropertiesAction::FocusMark(mark.id.clone());
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    action = PropertiesAction::DeleteMark(mark.id.clone());
                }
            });

            if mark.is_focus {
                ui.horizontal(|ui| {
                    let response = ui.text_edit_singleline(draft);
                    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Apply").clicked() || submitted {
                        action = PropertiesAction::EditContent(Mark {
                            content: draft.clone(),
                            ..mark.clone()
                        });
                    }
                });
                ui.label(
                    egui::RichText::new(format!(
                        "({:.0}, {:.0}) – ({:.0}, {:.0})",
                        mark.coord.min_x, mark.coord.min_y, mark.coord.max_x, mark.coord.max_y
                    ))
                    .small()
                    .weak(),
                );
            }
            ui.add_space(4.0);
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrmark::render::DEFAULT_EDITED_COLOR;
    use ocrmark::{Coordinate, ProjectSettings};

    #[test]
    fn test_row_color_follows_project_settings() {
        let settings = ProjectSettings {
            focus_border_color: Some("#ff0000".to_string()),
            ..ProjectSettings::default()
        };
        let palette = Palette::from_settings(Some(&settings));

        let coord = Coordinate::new(0.0, 0.0, 10.0, 10.0);
        let focused = Mark::new("a", coord, "A").focused();
        let mut edited = Mark::new("b", coord, "B");
        edited.is_edit = true;
        let plain = Mark::new("c", coord, "C");

        assert_eq!(row_color(&focused, &palette), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(row_color(&edited, &palette), Some(DEFAULT_EDITED_COLOR));
        assert_eq!(row_color(&plain, &palette), None);
    }
}
