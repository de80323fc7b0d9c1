// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mark operations.
//!
//! Every function takes a project snapshot and returns a new one; the input
//! is never modified. Targets that are no longer in the mark list turn the
//! operation into a no-op (the unchanged project is returned).
//!
//! At most one mark is focused after any of these calls.

use super::mark::{Coordinate, Mark};
use super::project::Project;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Prepend `mark`. A focused newcomer takes the focus from any other mark.
#[must_use]
pub fn add_mark(project: &Project, mark: Mark) -> Project {
    let mut next = project.clone();
    if mark.is_focus {
        next.label_list.iter_mut().for_each(|m| m.is_focus = false);
    }
    next.label_list.insert(0, mark);
    next
}

/// Remove the mark with `id`.
#[must_use]
pub fn delete_mark(project: &Project, id: &str) -> Project {
    let Some(index) = project.label_list.iter().position(|m| m.id == id) else {
        log::debug!("delete_mark: no mark with id {}", id);
        return project.clone();
    };
    let mut next = project.clone();
    next.label_list.remove(index);
    next
}

/// Focus the mark with `id` and clear every other focus flag.
#[must_use]
pub fn focus_mark(project: &Project, id: &str) -> Project {
    if project.find(id).is_none() {
        log::debug!("focus_mark: no mark with id {}", id);
        return project.clone();
    }
    let mut next = project.clone();
    for mark in &mut next.label_list {
        mark.is_focus = mark.id == id;
    }
    next
}

/// Replace the content of the mark matching `target.id`.
///
/// The mark is flagged as edited and loses focus.
#[must_use]
pub fn change_mark_content(project: &Project, target: &Mark) -> Project {
    update_mark(project, &target.id, |mark| {
        mark.content = target.content.clone();
        mark.is_edit = true;
        mark.is_focus = false;
    })
}

/// Replace the rectangle of the mark matching `target.id` and flag it as edited.
#[must_use]
pub fn change_mark_coordinate(project: &Project, target: &Mark) -> Project {
    update_mark(project, &target.id, |mark| {
        mark.coord = target.coord;
        mark.is_edit = true;
    })
}

/// Merge `marks` into one mark covering all of them.
///
/// Marks no longer in the project are dropped first. The first survivor (in
/// the order given) keeps its id, content and list position; the others are
/// removed. With fewer than two survivors the project is returned unchanged.
#[must_use]
pub fn merge_marks(project: &Project, marks: &[Mark]) -> Project {
    let mut seen = HashSet::new();
    let survivors: Vec<&Mark> = marks
        .iter()
        .filter_map(|m| project.find(&m.id))
        .filter(|m| seen.insert(m.id.as_str()))
        .collect();

    let [first, rest @ ..] = survivors.as_slice() else {
        log::debug!("merge_marks: nothing to merge");
        return project.clone();
    };
    if rest.is_empty() {
        log::debug!("merge_marks: only {} is still present", first.id);
        return project.clone();
    }

    let coord = rest
        .iter()
        .fold(first.coord, |acc: Coordinate, m| acc.union(&m.coord));
    let merged = Mark {
        id: first.id.clone(),
        coord,
        content: first.content.clone(),
        is_focus: false,
        is_edit: true,
    };
    let removed: HashSet<&str> = rest.iter().map(|m| m.id.as_str()).collect();

    let mut next = project.clone();
    next.label_list = project
        .label_list
        .iter()
        .filter(|m| !removed.contains(m.id.as_str()))
        .map(|m| if m.id == merged.id { merged.clone() } else { m.clone() })
        .collect();
    log::debug!("Merged {} marks into {}", survivors.len(), merged.id);
    next
}

/// Reading-order key: rows top to bottom, then left to right.
pub fn reading_order_key(project: &Project, mark: &Mark) -> f64 {
    mark.coord.min_y * f64::from(project.img.width) + mark.coord.min_x
}

/// Sort marks, by default in reading order (see [`reading_order_key`]).
///
/// The sort is stable, so re-sorting a sorted list leaves it unchanged.
#[must_use]
pub fn sort_by_coordinate(
    project: &Project,
    comparator: Option<&dyn Fn(&Mark, &Mark) -> Ordering>,
) -> Project {
    let mut next = project.clone();
    match comparator {
        Some(compare) => next.label_list.sort_by(|a, b| compare(a, b)),
        None => next.label_list.sort_by(|a, b| {
            reading_order_key(project, a).total_cmp(&reading_order_key(project, b))
        }),
    }
    next
}

fn update_mark(project: &Project, id: &str, apply: impl FnOnce(&mut Mark)) -> Project {
    let mut next = project.clone();
    match next.label_list.iter_mut().find(|m| m.id == id) {
        Some(mark) => apply(mark),
        None => log::debug!("No mark with id {} to update", id),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ImageInfo;

    fn mark(id: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Mark {
        Mark::new(id, Coordinate::new(min_x, min_y, max_x, max_y), format!("text {}", id))
    }

    fn project(marks: Vec<Mark>) -> Project {
        Project::new(ImageInfo::new(100, 100, "page.png")).with_marks(marks)
    }

    fn focus_count(project: &Project) -> usize {
        project.label_list.iter().filter(|m| m.is_focus).count()
    }

    fn ids(project: &Project) -> Vec<&str> {
        project.label_list.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_add_mark_prepends() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0)]);
        let next = add_mark(&p, mark("b", 2.0, 2.0, 3.0, 3.0));
        assert_eq!(ids(&next), vec!["b", "a"]);
        // Input untouched
        assert_eq!(ids(&p), vec!["a"]);
    }

    #[test]
    fn test_add_focused_mark_steals_focus() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0).focused()]);
        let next = add_mark(&p, mark("b", 2.0, 2.0, 3.0, 3.0).focused());
        assert_eq!(focus_count(&next), 1);
        assert!(next.find("b").unwrap().is_focus);
        assert!(p.find("a").unwrap().is_focus);
    }

    #[test]
    fn test_delete_mark() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0), mark("b", 0.0, 0.0, 1.0, 1.0)]);
        assert_eq!(ids(&delete_mark(&p, "a")), vec!["b"]);
        assert_eq!(delete_mark(&p, "missing"), p);
    }

    #[test]
    fn test_focus_mark_moves_focus() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0).focused(), mark("b", 0.0, 0.0, 1.0, 1.0)]);
        let next = focus_mark(&p, "b");
        assert!(!next.find("a").unwrap().is_focus);
        assert!(next.find("b").unwrap().is_focus);
        assert_eq!(focus_count(&next), 1);

        // Re-focusing the focused mark keeps it focused
        let again = focus_mark(&next, "b");
        assert!(again.find("b").unwrap().is_focus);
        assert_eq!(focus_count(&again), 1);
    }

    #[test]
    fn test_focus_missing_is_noop() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0).focused()]);
        assert_eq!(focus_mark(&p, "zzz"), p);
    }

    #[test]
    fn test_focus_exclusivity_over_sequence() {
        let mut p = project(vec![]);
        for i in 0..5 {
            let mut m = mark(&i.to_string(), 0.0, 0.0, 1.0, 1.0);
            m.is_focus = i % 2 == 0;
            p = add_mark(&p, m);
            assert!(focus_count(&p) <= 1);
        }
        for id in ["3", "1", "4", "nope"] {
            p = focus_mark(&p, id);
            assert!(focus_count(&p) <= 1);
        }
        let mut edited = p.find("4").unwrap().clone();
        edited.content = "hello".to_string();
        p = change_mark_content(&p, &edited);
        assert_eq!(focus_count(&p), 0);
    }

    #[test]
    fn test_change_mark_content() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0).focused()]);
        let mut target = p.label_list[0].clone();
        target.content = "invoice no.".to_string();
        let next = change_mark_content(&p, &target);
        let changed = next.find("a").unwrap();
        assert_eq!(changed.content, "invoice no.");
        assert!(changed.is_edit);
        assert!(!changed.is_focus);
        assert_eq!(p.label_list[0].content, "text a");
    }

    #[test]
    fn test_change_mark_coordinate_keeps_focus() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0).focused()]);
        let mut target = p.label_list[0].clone();
        target.coord = Coordinate::new(5.0, 5.0, 9.0, 9.0);
        let next = change_mark_coordinate(&p, &target);
        let changed = next.find("a").unwrap();
        assert_eq!(changed.coord, Coordinate::new(5.0, 5.0, 9.0, 9.0));
        assert!(changed.is_edit);
        assert!(changed.is_focus);
    }

    #[test]
    fn test_change_missing_mark_is_noop() {
        let p = project(vec![mark("a", 0.0, 0.0, 1.0, 1.0)]);
        let ghost = mark("ghost", 1.0, 1.0, 2.0, 2.0);
        assert_eq!(change_mark_content(&p, &ghost), p);
        assert_eq!(change_mark_coordinate(&p, &ghost), p);
    }

    #[test]
    fn test_merge_bounding_box() {
        let a = mark("a", 0.0, 0.0, 10.0, 10.0);
        let b = mark("b", 5.0, 5.0, 20.0, 20.0).focused();
        let p = project(vec![mark("x", 50.0, 50.0, 60.0, 60.0), a.clone(), b.clone()]);

        let next = merge_marks(&p, &[a, b]);
        assert_eq!(ids(&next), vec!["x", "a"]);
        let merged = next.find("a").unwrap();
        assert_eq!(merged.coord, Coordinate::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(merged.content, "text a");
        assert!(merged.is_edit);
        assert!(!merged.is_focus);
        assert_eq!(focus_count(&next), 0);
    }

    #[test]
    fn test_merge_order_decides_survivor() {
        let a = mark("a", 0.0, 0.0, 10.0, 10.0);
        let b = mark("b", 5.0, 5.0, 20.0, 20.0);
        let p = project(vec![a.clone(), b.clone()]);

        let next = merge_marks(&p, &[b, a]);
        assert_eq!(ids(&next), vec!["b"]);
        assert_eq!(next.label_list[0].content, "text b");
    }

    #[test]
    fn test_merge_skips_vanished_marks() {
        let a = mark("a", 0.0, 0.0, 10.0, 10.0);
        let b = mark("b", 5.0, 5.0, 20.0, 20.0);
        let c = mark("c", 30.0, 30.0, 40.0, 40.0);
        let p = project(vec![a.clone(), c.clone()]);

        let next = merge_marks(&p, &[b.clone(), a.clone(), c]);
        assert_eq!(ids(&next), vec!["a"]);
        assert_eq!(next.label_list[0].coord, Coordinate::new(0.0, 0.0, 40.0, 40.0));

        // Only one survivor: nothing happens
        assert_eq!(merge_marks(&p, &[b, a.clone()]), p);
        // Same mark twice does not count as two
        assert_eq!(merge_marks(&p, &[a.clone(), a]), p);
        assert_eq!(merge_marks(&p, &[]), p);
    }

    #[test]
    fn test_sort_reading_order() {
        // keys: 50, 10, 30 with image width 100
        let p = project(vec![
            mark("fifty", 50.0, 0.0, 60.0, 5.0),
            mark("ten", 10.0, 0.0, 20.0, 5.0),
            mark("thirty", 30.0, 0.0, 40.0, 5.0),
        ]);
        let sorted = sort_by_coordinate(&p, None);
        assert_eq!(ids(&sorted), vec!["ten", "thirty", "fifty"]);
        assert_eq!(sort_by_coordinate(&sorted, None), sorted);
    }

    #[test]
    fn test_sort_rows_before_columns() {
        let p = project(vec![mark("second_row", 0.0, 20.0, 5.0, 25.0), mark("first_row", 90.0, 2.0, 95.0, 8.0)]);
        let sorted = sort_by_coordinate(&p, None);
        assert_eq!(ids(&sorted), vec!["first_row", "second_row"]);
    }

    #[test]
    fn test_sort_custom_comparator() {
        let p = project(vec![mark("b", 0.0, 0.0, 1.0, 1.0), mark("c", 0.0, 0.0, 1.0, 1.0), mark("a", 0.0, 0.0, 1.0, 1.0)]);
        let by_id_desc = |x: &Mark, y: &Mark| y.id.cmp(&x.id);
        let sorted = sort_by_coordinate(&p, Some(&by_id_desc));
        assert_eq!(ids(&sorted), vec!["c", "b", "a"]);
    }
}
