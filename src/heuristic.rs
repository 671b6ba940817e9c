//! Estimates of the remaining distance between two cells.
//!
//! A* only returns shortest paths if the estimate never exceeds the true remaining cost
//! (admissibility). [Heuristic::is_admissible] lets the search tell whether that guarantee still
//! holds; it warns and flags its report instead of silently claiming an optimal path.
use grid_util::point::Point;

pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> u32;
    /// Whether [estimate](Self::estimate) never overestimates the remaining cost on a
    /// 4-connected unit-cost grid.
    fn is_admissible(&self) -> bool {
        true
    }
}

/// `|Δrow| + |Δcol|`. Admissible and consistent for unit-cost orthogonal moves.
pub fn manhattan(from: Point, to: Point) -> u32 {
    from.x.abs_diff(to.x) + from.y.abs_diff(to.y)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: Point, to: Point) -> u32 {
        manhattan(from, to)
    }
}

/// No estimate at all, which turns the search into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zero;

impl Heuristic for Zero {
    fn estimate(&self, _: Point, _: Point) -> u32 {
        0
    }
}

/// Scales another heuristic by a constant factor (weighted A*). Factors above 1 favour cells
/// close to the goal and usually expand fewer cells, at the price of the shortest-path
/// guarantee.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weighted<H> {
    pub inner: H,
    pub factor: f32,
}

impl<H: Heuristic> Weighted<H> {
    pub fn new(inner: H, factor: f32) -> Weighted<H> {
        Weighted { inner, factor }
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    fn estimate(&self, from: Point, to: Point) -> u32 {
        (self.inner.estimate(from, to) as f32 * self.factor.max(0.0)) as u32
    }
    fn is_admissible(&self) -> bool {
        self.inner.is_admissible() && self.factor <= 1.0
    }
}
