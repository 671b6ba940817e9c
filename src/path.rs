use grid_util::point::Point;

use crate::cell::Role;
use crate::grid::Grid;
use crate::{FxIndexMap, Step, StepObserver};

/// Walks a predecessor map backwards from a goal, yielding each predecessor in turn until a
/// cell without one (the start) has been yielded. The goal itself is not yielded.
pub struct PathWalk<'a> {
    parents: &'a FxIndexMap<Point, Point>,
    current: Point,
}

impl<'a> PathWalk<'a> {
    pub fn new(parents: &'a FxIndexMap<Point, Point>, goal: Point) -> PathWalk<'a> {
        PathWalk {
            parents,
            current: goal,
        }
    }
}

impl Iterator for PathWalk<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let parent = *self.parents.get(&self.current)?;
        self.current = parent;
        Some(parent)
    }
}

/// Marks the path ending in `end` on the grid one cell at a time, notifying `observer` after
/// each cell. The start keeps its own role. Returns the path from start to end, or just `[end]`
/// if `end` has no predecessor.
pub fn reconstruct_path<O: StepObserver + ?Sized>(
    grid: &mut Grid,
    parents: &FxIndexMap<Point, Point>,
    end: Point,
    observer: &mut O,
) -> Vec<Point> {
    let mut path = vec![end];
    for point in PathWalk::new(parents, end) {
        grid.mark(point, Role::Path);
        observer.on_step(grid, &Step::PathMarked(point));
        path.push(point);
    }
    path.reverse();
    path
}
