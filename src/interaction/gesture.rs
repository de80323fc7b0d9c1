// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer events, surface placement and per-gesture latch state.

use crate::models::{Point, Size};

/// Kind of pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Click,
}

/// A pointer event with its position in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, Point::new(x, y))
    }
}

/// Where the render surface sits on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceRegion {
    /// Top-left corner of the surface in page space.
    pub origin: Point,
    pub size: Size,
    /// Scroll offsets of the enclosing containers, innermost first.
    pub ancestor_scroll: Vec<Point>,
}

impl SurfaceRegion {
    /// How many ancestor levels contribute to the scroll correction.
    pub const MAX_SCROLL_DEPTH: usize = 3;

    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size,
            ancestor_scroll: Vec::new(),
        }
    }

    pub fn with_ancestor_scroll(mut self, scroll: Vec<Point>) -> Self {
        self.ancestor_scroll = scroll;
        self
    }

    /// Summed scroll of the nearest ancestors.
    pub fn scroll_offset(&self) -> Point {
        self.ancestor_scroll
            .iter()
            .take(Self::MAX_SCROLL_DEPTH)
            .fold(Point::ZERO, |acc, scroll| acc + *scroll)
    }

    /// Surface origin used to translate marking gestures.
    pub fn marking_origin(&self, need_calculate_scroll: bool) -> Point {
        if need_calculate_scroll {
            self.origin - self.scroll_offset()
        } else {
            self.origin
        }
    }
}

/// Latched state of one gesture, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Latch {
    pub start: Point,
    pub last_move: Option<Point>,
}

impl Latch {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            last_move: None,
        }
    }

    pub fn record(&mut self, position: Point) {
        self.last_move = Some(position);
    }

    /// Last known position; the start point when nothing moved.
    pub fn end(&self) -> Point {
        self.last_move.unwrap_or(self.start)
    }

    pub fn delta(&self) -> Point {
        self.end() - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_uses_three_levels() {
        let region = SurfaceRegion::new(Point::new(100.0, 100.0), Size::new(50.0, 50.0))
            .with_ancestor_scroll(vec![
                Point::new(1.0, 10.0),
                Point::new(2.0, 20.0),
                Point::new(4.0, 40.0),
                Point::new(1000.0, 1000.0),
            ]);
        assert_eq!(region.scroll_offset(), Point::new(7.0, 70.0));
        assert_eq!(region.marking_origin(true), Point::new(93.0, 30.0));
        assert_eq!(region.marking_origin(false), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_latch_delta() {
        let mut latch = Latch::new(Point::new(10.0, 10.0));
        assert_eq!(latch.delta(), Point::ZERO);
        latch.record(Point::new(15.0, 4.0));
        assert_eq!(latch.delta(), Point::new(5.0, -6.0));
    }
}
