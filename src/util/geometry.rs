// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between image space
//! and render-surface space under a [`ViewportVector`]. The forward map is
//! `screen = image * magnification + offset`; every function here is either
//! that map or its exact inverse, so drawing and hit-testing never drift.

use crate::models::{Coordinate, ImageInfo, Point, Size, ViewportVector};

/// A rectangle on the render surface as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Map an image-space point onto the surface.
pub fn to_screen_point(point: Point, vector: &ViewportVector) -> Point {
    Point::new(
        point.x * vector.magnification + vector.offset.x,
        point.y * vector.magnification + vector.offset.y,
    )
}

/// Map an image-space rectangle onto the surface.
pub fn to_screen_rect(coord: &Coordinate, vector: &ViewportVector) -> ScreenRect {
    let origin = to_screen_point(Point::new(coord.min_x, coord.min_y), vector);
    ScreenRect::new(
        origin.x,
        origin.y,
        coord.width() * vector.magnification,
        coord.height() * vector.magnification,
    )
}

/// Size of the image once drawn at the current magnification.
pub fn scaled_image_size(img: &ImageInfo, vector: &ViewportVector) -> Size {
    Size::new(
        f64::from(img.width) * vector.magnification,
        f64::from(img.height) * vector.magnification,
    )
}

/// Whether `point` lies strictly inside the drawn rectangle of `coord`.
///
/// `point` is in the same space as `surface_origin` (page space); points
/// on the border do not count.
pub fn point_in_rect(
    point: Point,
    coord: &Coordinate,
    vector: &ViewportVector,
    surface_origin: Point,
) -> bool {
    let min = to_screen_point(Point::new(coord.min_x, coord.min_y), vector) + surface_origin;
    let max = to_screen_point(Point::new(coord.max_x, coord.max_y), vector) + surface_origin;
    point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
}

/// Whether `inner` lies strictly inside `outer`. Both are in image space.
pub fn rect_contains(outer: &Coordinate, inner: &Coordinate) -> bool {
    outer.min_x < inner.min_x
        && outer.min_y < inner.min_y
        && outer.max_x > inner.max_x
        && outer.max_y > inner.max_y
}

/// Inverse of the forward map: page-space point to image space.
pub fn screen_to_image(point: Point, vector: &ViewportVector, surface_origin: Point) -> Point {
    Point::new(
        (point.x - surface_origin.x - vector.offset.x) / vector.magnification,
        (point.y - surface_origin.y - vector.offset.y) / vector.magnification,
    )
}

/// Offset that keeps the image centered in `container` after scaling by `factor`.
pub fn zoom_about_center(container: Size, offset: Point, factor: f64) -> Point {
    // The margin not covered by the offset on both sides scales with the image
    let rest_x = container.width - 2.0 * offset.x;
    let rest_y = container.height - 2.0 * offset.y;
    Point::new(
        (container.width - factor * rest_x) / 2.0,
        (container.height - factor * rest_y) / 2.0,
    )
}

/// Zoom `vector` by `factor` about the container center.
///
/// Without a container the vector is returned unchanged.
pub fn zoom(container: Option<Size>, vector: &ViewportVector, factor: f64) -> ViewportVector {
    let Some(container) = container else {
        return *vector;
    };
    if !(factor.is_finite() && factor > 0.0) {
        log::debug!("zoom: ignoring factor {}", factor);
        return *vector;
    }
    ViewportVector {
        magnification: vector.magnification * factor,
        offset: zoom_about_center(container, vector.offset, factor),
        ..*vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(magnification: f64, x: f64, y: f64) -> ViewportVector {
        ViewportVector::new(magnification, Point::new(x, y))
    }

    #[test]
    fn test_screen_rect() {
        let rect = to_screen_rect(&Coordinate::new(10.0, 20.0, 30.0, 60.0), &vector(2.0, 5.0, -5.0));
        assert_eq!(rect, ScreenRect::new(25.0, 35.0, 40.0, 80.0));
    }

    #[test]
    fn test_scaled_image_size() {
        let img = ImageInfo::new(640, 480, "scan.png");
        assert_eq!(scaled_image_size(&img, &vector(0.5, 0.0, 0.0)), Size::new(320.0, 240.0));
    }

    #[test]
    fn test_screen_to_image_roundtrip() {
        let vectors = [
            vector(1.0, 0.0, 0.0),
            vector(0.37, 12.5, -40.0),
            vector(3.0, -250.0, 17.25),
            vector(1e-3, 1e4, 1e4),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(123.4, 567.8),
            Point::new(-20.0, 1e5),
            Point::new(0.001, 3.3),
        ];
        for v in &vectors {
            for p in &points {
                let back = screen_to_image(to_screen_point(*p, v), v, Point::ZERO);
                assert!((back.x - p.x).abs() < 1e-6 * (1.0 + p.x.abs()), "{:?} {:?}", v, p);
                assert!((back.y - p.y).abs() < 1e-6 * (1.0 + p.y.abs()), "{:?} {:?}", v, p);
            }
        }
    }

    #[test]
    fn test_screen_to_image_subtracts_surface_origin() {
        let v = vector(2.0, 10.0, 10.0);
        let origin = Point::new(100.0, 50.0);
        let page = to_screen_point(Point::new(7.0, 9.0), &v) + origin;
        assert_eq!(screen_to_image(page, &v, origin), Point::new(7.0, 9.0));
    }

    #[test]
    fn test_point_in_rect_is_strict() {
        let coord = Coordinate::new(10.0, 10.0, 20.0, 20.0);
        let v = vector(1.0, 0.0, 0.0);
        let origin = Point::ZERO;
        assert!(!point_in_rect(Point::new(10.0, 15.0), &coord, &v, origin));
        assert!(point_in_rect(Point::new(10.0 + 1e-9, 15.0), &coord, &v, origin));
        assert!(!point_in_rect(Point::new(20.0, 15.0), &coord, &v, origin));
        assert!(!point_in_rect(Point::new(15.0, 10.0), &coord, &v, origin));
        assert!(!point_in_rect(Point::new(25.0, 15.0), &coord, &v, origin));
    }

    #[test]
    fn test_point_in_rect_with_transform_and_origin() {
        let coord = Coordinate::new(10.0, 10.0, 20.0, 20.0);
        let v = vector(2.0, 5.0, 5.0);
        let origin = Point::new(100.0, 200.0);
        // drawn at (125, 225) .. (145, 245) in page space
        assert!(point_in_rect(Point::new(130.0, 230.0), &coord, &v, origin));
        assert!(!point_in_rect(Point::new(30.0, 30.0), &coord, &v, origin));
    }

    #[test]
    fn test_rect_contains_is_strict() {
        let outer = Coordinate::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_contains(&outer, &Coordinate::new(1.0, 1.0, 99.0, 99.0)));
        assert!(!rect_contains(&outer, &Coordinate::new(0.0, 1.0, 99.0, 99.0)));
        assert!(!rect_contains(&outer, &Coordinate::new(50.0, 50.0, 150.0, 60.0)));
        assert!(!rect_contains(&outer, &outer));
    }

    #[test]
    fn test_zoom_about_center() {
        let offset = zoom_about_center(Size::new(100.0, 100.0), Point::ZERO, 2.0);
        assert_eq!(offset, Point::new(-50.0, -50.0));

        // Zooming back out restores the original offset
        let back = zoom_about_center(Size::new(100.0, 100.0), offset, 0.5);
        assert_eq!(back, Point::ZERO);
    }

    #[test]
    fn test_zoom_keeps_container_center_fixed() {
        let container = Size::new(300.0, 200.0);
        let v = vector(0.5, 30.0, 10.0);
        let center = Point::new(150.0, 100.0);
        let before = screen_to_image(center, &v, Point::ZERO);
        let zoomed = zoom(Some(container), &v, 2.0);
        assert_eq!(zoomed.magnification, 1.0);
        let after = screen_to_image(center, &zoomed, Point::ZERO);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_without_container_is_noop() {
        let v = vector(1.5, 3.0, 4.0);
        assert_eq!(zoom(None, &v, 2.0), v);
    }

    #[test]
    fn test_zoom_rejects_non_positive_factor() {
        let container = Some(Size::new(100.0, 100.0));
        let v = vector(1.5, 3.0, 4.0);
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(zoom(container, &v, factor), v, "factor {}", factor);
        }
    }
}
