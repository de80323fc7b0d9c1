// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Render step.
//!
//! [`draw`] paints a project onto any [`RenderSurface`]: the image first,
//! then every mark rectangle, then an optional transient rectangle (the box
//! being dragged). [`DisplayList`] is a retained surface that records the
//! commands so a host can replay them every frame.

use crate::models::{Coordinate, ImageInfo, Project, ProjectSettings, Size, ViewportVector};
use crate::util::geometry::{scaled_image_size, to_screen_rect, ScreenRect};

pub const DEFAULT_FOCUS_COLOR: Rgba = Rgba::rgb(0x2A, 0x6D, 0xE7);
pub const DEFAULT_EDITED_COLOR: Rgba = Rgba::rgb(0xDA, 0x1E, 0x28);
pub const DEFAULT_NORMAL_COLOR: Rgba = Rgba::rgb(0x23, 0xA1, 0x23);

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic color name.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let named = match text.to_ascii_lowercase().as_str() {
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => return None,
        };
        Some(named)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, i) in rgb.iter_mut().zip(0..3) {
                    *slot = channel(&hex[i..=i])? * 17;
                }
                Some(Self::rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 | 8 => {
                let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
                Some(Self {
                    r: channel(&hex[0..2])?,
                    g: channel(&hex[2..4])?,
                    b: channel(&hex[4..6])?,
                    a,
                })
            }
            _ => None,
        }
    }
}

/// Border colors resolved from project settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub focus: Rgba,
    pub edited: Rgba,
    pub normal: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS_COLOR,
            edited: DEFAULT_EDITED_COLOR,
            normal: DEFAULT_NORMAL_COLOR,
        }
    }
}

impl Palette {
    /// Resolve the settings colors, keeping defaults for missing or invalid ones.
    pub fn from_settings(settings: Option<&ProjectSettings>) -> Self {
        let defaults = Self::default();
        let Some(settings) = settings else {
            return defaults;
        };
        let pick = |value: &Option<String>, fallback: Rgba| {
            value
                .as_deref()
                .map(|text| {
                    Rgba::parse(text).unwrap_or_else(|| {
                        log::warn!("Ignoring unparseable border color {:?}", text);
                        fallback
                    })
                })
                .unwrap_or(fallback)
        };
        Self {
            focus: pick(&settings.focus_border_color, defaults.focus),
            edited: pick(&settings.edited_border_color, defaults.edited),
            normal: pick(&settings.border_color, defaults.normal),
        }
    }
}

/// The drawing primitives the render step needs.
///
/// Coordinates are surface-local: `(0, 0)` is the surface's top-left corner.
pub trait RenderSurface {
    /// Clear the whole surface of the given size.
    fn clear(&mut self, size: Size);

    /// Draw the project image stretched into `rect`.
    fn draw_image(&mut self, image: &ImageInfo, rect: ScreenRect);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: ScreenRect, color: Rgba);
}

/// Paint `project` under `vector` onto `surface`.
///
/// Marks are colored focus over edited over normal; `transient` is drawn
/// last in the edited color.
pub fn draw<S: RenderSurface + ?Sized>(
    surface: &mut S,
    size: Size,
    project: &Project,
    vector: &ViewportVector,
    transient: Option<&Coordinate>,
) {
    let palette = Palette::from_settings(project.settings.as_ref());

    surface.clear(size);

    if !vector.is_upright() {
        log::debug!("Rotation {}° is not supported, drawing upright", vector.rotation_deg);
    }
    let image_size = scaled_image_size(&project.img, vector);
    surface.draw_image(
        &project.img,
        ScreenRect::new(vector.offset.x, vector.offset.y, image_size.width, image_size.height),
    );

    for mark in &project.label_list {
        let color = if mark.is_focus {
            palette.focus
        } else if mark.is_edit {
            palette.edited
        } else {
            palette.normal
        };
        surface.stroke_rect(to_screen_rect(&mark.coord, vector), color);
    }

    if let Some(coord) = transient {
        surface.stroke_rect(to_screen_rect(coord, vector), palette.edited);
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { source: String, rect: ScreenRect },
    StrokeRect { rect: ScreenRect, color: Rgba },
}

/// Retained surface: remembers the commands issued since the last clear.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
    /// Bumped on every clear so hosts can tell a repaint happened.
    generation: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All stroked rectangles in drawing order.
    pub fn strokes(&self) -> impl Iterator<Item = (&ScreenRect, &Rgba)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokeRect { rect, color } => Some((rect, color)),
            DrawCommand::Image { .. } => None,
        })
    }
}

impl RenderSurface for DisplayList {
    fn clear(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
        self.generation += 1;
    }

    fn draw_image(&mut self, image: &ImageInfo, rect: ScreenRect) {
        self.commands.push(DrawCommand::Image {
            source: image.source.clone(),
            rect,
        });
    }

    fn stroke_rect(&mut self, rect: ScreenRect, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }
}
