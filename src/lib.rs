//! # astar_grid_visualizer
//!
//! Step-by-step [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on a
//! paintable, 4-connected, uniform-cost grid. The search reports every expansion and every
//! path-marking step to a [StepObserver], so a renderer can animate the growth of the frontier
//! and the reconstruction of the final path. Nothing in the engine depends on a rendering
//! surface: [visualizer::Visualizer] is a headless adapter that maps pixels to cells and drives
//! any [visualizer::Canvas].
//!
//! Positions are [Point]s where `x` is the row and `y` is the column.
pub mod astar;
pub mod cell;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod visualizer;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub use astar::{find_path, AstarSearch, CancelFlag, SearchOutcome, SearchReport, SearchState};
pub use cell::{Cell, Role};
pub use error::{GridError, SearchRequestError};
pub use grid::Grid;
pub use grid_util::point::Point;
pub use heuristic::{Heuristic, Manhattan, Weighted, Zero};
pub use path::{reconstruct_path, PathWalk};

/// Number of rows (and columns) of a grid when none is given.
pub const DEFAULT_ROWS: usize = 50;
/// Pixel width (and height) of the square drawing surface when none is given.
pub const DEFAULT_WIDTH: u32 = 800;
/// Cost of moving between two orthogonally adjacent cells.
pub const EDGE_COST: u32 = 1;
/// Upper bound of traversable neighbours on a 4-connected grid.
pub(crate) const N_SMALLVEC_SIZE: usize = 4;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A single observable event of a search. Each one corresponds to a redraw-worthy change of
/// the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `current` was taken off the frontier and its neighbours were relaxed; `opened` holds the
    /// cells that entered the frontier during this expansion.
    Expanded { current: Point, opened: Vec<Point> },
    /// A cell of the reconstructed path was marked, walking from the end towards the start.
    PathMarked(Point),
    /// The search is over.
    Finished(SearchOutcome),
}

/// Receives a notification after every search step. The engine blocks until it returns.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid, step: &Step);
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid, &Step),
{
    fn on_step(&mut self, grid: &Grid, step: &Step) {
        self(grid, step)
    }
}

/// Records every step it sees, which allows replaying or inspecting a search without drawing.
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    pub steps: Vec<Step>,
}

impl StepLog {
    pub fn new() -> StepLog {
        StepLog::default()
    }
    /// Number of expansions seen so far.
    pub fn expansions(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Expanded { .. }))
            .count()
    }
    /// Cells marked as part of the path, in the order they were marked (end towards start).
    pub fn path_marks(&self) -> Vec<Point> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::PathMarked(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl StepObserver for StepLog {
    fn on_step(&mut self, _grid: &Grid, step: &Step) {
        self.steps.push(step.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_log_counts() {
        let grid = Grid::new(2, 2).unwrap();
        let mut log = StepLog::new();
        log.on_step(
            &grid,
            &Step::Expanded {
                current: Point::new(0, 0),
                opened: vec![Point::new(1, 0)],
            },
        );
        log.on_step(&grid, &Step::PathMarked(Point::new(1, 0)));
        log.on_step(&grid, &Step::Finished(SearchOutcome::Found));
        assert_eq!(log.expansions(), 1);
        assert_eq!(log.path_marks(), vec![Point::new(1, 0)]);
    }

    #[test]
    fn closures_are_observers() {
        let grid = Grid::new(2, 2).unwrap();
        let mut calls = 0;
        let mut observer = |_: &Grid, _: &Step| calls += 1;
        observer.on_step(&grid, &Step::Finished(SearchOutcome::NotFound));
        observer.on_step(&grid, &Step::Finished(SearchOutcome::NotFound));
        assert_eq!(calls, 2);
    }
}
