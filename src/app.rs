// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the marker session, loads images and
//! annotation files in the background and routes menu, toolbar, panel and
//! keyboard input to the session.

use crate::ui::{canvas, properties, toolbar};
use ocrmark::io::media::{self, LoadedImage};
use ocrmark::io::serialization;
use ocrmark::{DisplayList, Mark, MarkRegion, MarkerSession, MarkerSettings, ModeKind, Project};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Result of background image loading operation.
struct LoadedImageData {
    image: LoadedImage,
    project: Project,
}

/// A box drawn in add mode that still needs its text.
struct PendingMark {
    region: MarkRegion,
    text: String,
}

/// Main application state.
pub struct OcrMarkApp {
    session: MarkerSession<DisplayList>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Counter for generating mark ids
    mark_counter: usize,

    /// Text being edited for the focused mark
    content_draft: String,

    /// Regions finished in add mode, sent from the session callback
    region_sender: Sender<MarkRegion>,
    region_receiver: Receiver<MarkRegion>,

    /// Box waiting for the user to type its text
    pending_mark: Option<PendingMark>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl Default for OcrMarkApp {
    fn default() -> Self {
        Self::new(MarkerSettings::default())
    }
}

impl OcrMarkApp {
    /// Create a new application instance.
    pub fn new(settings: MarkerSettings) -> Self {
        let (region_sender, region_receiver) = channel();
        Self {
            session: MarkerSession::new(DisplayList::new(), settings),
            image_texture: None,
            mark_counter: 0,
            content_draft: String::new(),
            region_sender,
            region_receiver,
            pending_mark: None,
            image_loader: None,
            loading_message: None,
        }
    }

    /// Switch the interaction mode.
    fn enter_mode(&mut self, kind: ModeKind) {
        match kind {
            ModeKind::Idle => self.session.end_operate(),
            ModeKind::Panning => self.session.start_drag(),
            ModeKind::Selecting => self.session.start_select(),
            ModeKind::BoxMarking => self.session.start_mark(),
            ModeKind::CallbackMarking => {
                let sender = self.region_sender.clone();
                self.session.start_mark_with_callback(move |region| {
                    let _ = sender.send(region);
                });
            }
        }
        log::info!("Mode: {:?}", self.session.mode());
    }

    /// Next mark id not used by the current project.
    fn next_mark_id(&mut self) -> String {
        loop {
            self.mark_counter += 1;
            let id = format!("mark-{}", self.mark_counter);
            let taken = self.session.project().is_some_and(|p| p.find(&id).is_some());
            if !taken {
                return id;
            }
        }
    }

    fn finish_pending_mark(&mut self, accept: bool) {
        let Some(pending) = self.pending_mark.take() else {
            return;
        };
        if accept {
            let id = self.next_mark_id();
            self.session.add_mark(Mark::new(id, pending.region.coord, pending.text));
            log::info!(
                "Added mark, total: {}",
                self.session.project().map_or(0, |p| p.label_list.len())
            );
        }
        self.session.clear_rect();
    }

    /// Export the project to a file.
    fn export_project(&self, path: PathBuf) {
        let Some(project) = self.session.project() else {
            return;
        };
        match serialization::export_project(project, &path) {
            Ok(()) => log::info!("Exported {} marks to {}", project.label_list.len(), path.display()),
            Err(e) => log::error!("Failed to export project: {:#}", e),
        }
    }

    fn spawn_loader<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<LoadedImageData, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    /// Load an image file and start an empty project for it (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        self.spawn_loader("Loading image...", move || {
            let image = media::load_image(&path).map_err(|e| format!("{:#}", e))?;
            log::info!("Loaded image: {} ({}x{})", path.display(), image.width, image.height);
            let project = Project::new(image.info(path.to_string_lossy()));
            Ok(LoadedImageData { image, project })
        });
    }

    /// Import a project file and load the image it refers to (asynchronously).
    fn import_project(&mut self, path: PathBuf) {
        self.spawn_loader("Loading annotations and image...", move || {
            let project = serialization::import_project(&path).map_err(|e| format!("{:#}", e))?;
            log::info!("Imported {} marks from {}", project.label_list.len(), path.display());

            let image_path = Path::new(&project.img.source);
            if !image_path.exists() {
                return Err(format!("Referenced image not found: {}", image_path.display()));
            }
            let image = media::load_image(image_path).map_err(|e| format!("{:#}", e))?;
            if (image.width, image.height) != (project.img.width, project.img.height) {
                log::warn!(
                    "Image is {}x{} but the project says {}x{}",
                    image.width,
                    image.height,
                    project.img.width,
                    project.img.height
                );
            }
            Ok(LoadedImageData { image, project })
        });
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(LoadedImageData { image, project }) => {
                let size = [image.width as usize, image.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                self.image_texture = Some(ctx.load_texture("loaded_image", color_image, egui::TextureOptions::LINEAR));

                self.mark_counter = project.label_list.len();
                self.pending_mark = None;
                self.content_draft = project.focused().map(|m| m.content.clone()).unwrap_or_default();
                self.session.set_project(project);
                log::info!("Image loaded successfully");
            }
            Err(e) => log::error!("Failed to load image: {}", e),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Annotations...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Annotations", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_project(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_project = self.session.project().is_some();
                    ui.add_enabled_ui(has_project, |ui| {
                        ui.menu_button("Export Annotations", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("marks.yaml")
                                    .save_file()
                                {
                                    self.export_project(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("marks.json")
                                    .save_file()
                                {
                                    self.export_project(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.session.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.session.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.session.can_redo(), egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.session.redo();
                        ui.close_menu();
                    }

                    ui.separator();

                    let has_focus = self.session.project().and_then(|p| p.focused()).is_some();
                    if ui.add_enabled(has_focus, egui::Button::new("Delete Selected")).clicked() {
                        self.session.delete_mark(None);
                        ui.close_menu();
                    }
                    if ui.button("Sort by Position").clicked() {
                        self.session.sort_marks(None);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.session.zoom_in_2x();
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.session.zoom_out_half();
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.session.init();
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Window asking for the text of a freshly drawn box.
    fn pending_mark_window(&mut self, ctx: &egui::Context) {
        let Some(pending) = &mut self.pending_mark else {
            return;
        };
        let mut decision = None;
        let anchor = egui::pos2(pending.region.position.max_x as f32, pending.region.position.max_y as f32);

        egui::Window::new("New mark")
            .collapsible(false)
            .resizable(false)
            .default_pos(anchor)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut pending.text);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    decision = Some(true);
                }
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        if let Some(accept) = decision {
            self.finish_pending_mark(accept);
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.pending_mark.is_some() {
                self.finish_pending_mark(false);
            } else {
                self.enter_mode(ModeKind::Idle);
            }
        }

        // Only process if no text field is focused (to avoid deleting while editing text)
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.session.delete_mark(None);
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.session.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.session.redo();
        }
    }
}

impl eframe::App for OcrMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.menu_bar(ctx);

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.session.mode()))
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::Enter(kind) => self.enter_mode(kind),
            toolbar::ToolbarAction::ZoomIn => self.session.zoom_in_2x(),
            toolbar::ToolbarAction::ZoomOut => self.session.zoom_out_half(),
            toolbar::ToolbarAction::ResetZoom => self.session.init(),
            toolbar::ToolbarAction::None => {}
        }

        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, self.session.project(), &mut self.content_draft))
            .inner;
        match properties_action {
            properties::PropertiesAction::FocusMark(id) => self.session.focus_mark(&id),
            properties::PropertiesAction::EditContent(mark) => self.session.edit_mark_content(&mark),
            properties::PropertiesAction::DeleteMark(id) => self.session.delete_mark(Some(&id)),
            properties::PropertiesAction::SortMarks => self.session.sort_marks(None),
            properties::PropertiesAction::None => {}
        }

        self.handle_keyboard(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
            } else if canvas::show(ui, &mut self.session, self.image_texture.as_ref()) {
                if let Some(focused) = self.session.project().and_then(|p| p.focused()) {
                    self.content_draft = focused.content.clone();
                }
            }
        });

        while let Ok(region) = self.region_receiver.try_recv() {
            log::info!(
                "Box drawn at ({:.1}, {:.1}) - ({:.1}, {:.1})",
                region.coord.min_x,
                region.coord.min_y,
                region.coord.max_x,
                region.coord.max_y
            );
            self.pending_mark = Some(PendingMark {
                region,
                text: String::new(),
            });
        }

        self.pending_mark_window(ctx);
    }
}
