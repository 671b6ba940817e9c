//! A* over the cached adjacency of a [Grid], reporting every expansion to a [StepObserver].
//!
//! Frontier entries are ordered by estimated total cost and, for equal estimates, by the order
//! in which they were discovered. Positions themselves are never compared, so among several
//! shortest paths the one returned is fully determined by the neighbour order of the grid and
//! the discovery counter.
use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::{info, warn};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

use crate::cell::Role;
use crate::error::GridError;
use crate::grid::Grid;
use crate::heuristic::{Heuristic, Manhattan};
use crate::path::reconstruct_path;
use crate::{FxIndexMap, Step, StepObserver, EDGE_COST, N_SMALLVEC_SIZE};

#[derive(Clone, Debug)]
struct FrontierEntry {
    estimated_cost: u32,
    count: u64,
    point: Point,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.count == other.count
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest estimate first, then earliest discovery.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.count.cmp(&self.count),
            s => s,
        }
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    Found,
    /// The frontier ran dry: no path exists with the current barriers.
    NotFound,
    /// The [CancelFlag] was raised before the search ended.
    Cancelled,
}

/// Cooperative cancellation shared between a search and its host. The search checks it before
/// every expansion.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, atomic::Ordering::SeqCst);
    }
    pub fn reset(&self) {
        self.0.store(false, atomic::Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(atomic::Ordering::SeqCst)
    }
}

/// Bookkeeping of a single search. Missing scores stand for an infinite cost.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    g_score: FxHashMap<Point, u32>,
    f_score: FxHashMap<Point, u32>,
    came_from: FxIndexMap<Point, Point>,
    open_set: BinaryHeap<FrontierEntry>,
    open_hash: FxHashSet<Point>,
    count: u64,
}

impl SearchState {
    fn new(start: Point, estimate: u32) -> SearchState {
        let mut state = SearchState::default();
        state.g_score.insert(start, 0);
        state.f_score.insert(start, estimate);
        state.open_set.push(FrontierEntry {
            estimated_cost: estimate,
            count: 0,
            point: start,
        });
        state.open_hash.insert(start);
        state
    }

    fn pop(&mut self) -> Option<Point> {
        let FrontierEntry { point, .. } = self.open_set.pop()?;
        self.open_hash.remove(&point);
        Some(point)
    }

    fn push(&mut self, point: Point, estimated_cost: u32) {
        self.count += 1;
        self.open_set.push(FrontierEntry {
            estimated_cost,
            count: self.count,
            point,
        });
        self.open_hash.insert(point);
    }

    /// Best known cost from the start, [None] if the cell was never reached.
    pub fn g_score(&self, point: Point) -> Option<u32> {
        self.g_score.get(&point).copied()
    }
    pub fn f_score(&self, point: Point) -> Option<u32> {
        self.f_score.get(&point).copied()
    }
    pub fn predecessor(&self, point: Point) -> Option<Point> {
        self.came_from.get(&point).copied()
    }
    /// Predecessor of every reached cell except the start, in order of first discovery.
    pub fn came_from(&self) -> &FxIndexMap<Point, Point> {
        &self.came_from
    }
    /// Whether the cell is discovered and not yet expanded.
    pub fn is_open(&self, point: Point) -> bool {
        self.open_hash.contains(&point)
    }
    pub fn open_len(&self) -> usize {
        self.open_hash.len()
    }
}

/// Everything a finished search has to tell.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Cells from start to end, both included. Empty unless the end was found.
    pub path: Vec<Point>,
    /// Cost of the path, which is its number of moves.
    pub cost: Option<u32>,
    /// Number of cells taken off the frontier and expanded.
    pub expanded: usize,
    /// Whether the heuristic was admissible, so that the path is a shortest one.
    pub optimal: bool,
    pub state: SearchState,
}

impl SearchReport {
    pub fn found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }
}

/// A* configured with a [Heuristic] and an optional [CancelFlag].
#[derive(Clone, Debug)]
pub struct AstarSearch<H = Manhattan> {
    pub heuristic: H,
    pub cancel: Option<CancelFlag>,
}

impl Default for AstarSearch<Manhattan> {
    fn default() -> Self {
        AstarSearch::new()
    }
}

impl AstarSearch<Manhattan> {
    pub fn new() -> AstarSearch<Manhattan> {
        AstarSearch {
            heuristic: Manhattan,
            cancel: None,
        }
    }
}

impl<H: Heuristic> AstarSearch<H> {
    pub fn with_heuristic(heuristic: H) -> AstarSearch<H> {
        AstarSearch {
            heuristic,
            cancel: None,
        }
    }

    pub fn cancel_on(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, CancelFlag::is_cancelled)
    }

    /// Searches from `start` to `end` over the neighbour lists of `grid`, which must have been
    /// recomputed since the last barrier edit. Frontier and visited cells are marked on the grid
    /// as the search goes, and `observer` is notified after every expansion, after every path
    /// cell and once at the end.
    pub fn run<O: StepObserver + ?Sized>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        observer: &mut O,
    ) -> Result<SearchReport, GridError> {
        grid.cell(start)?;
        grid.cell(end)?;
        if grid.neighbours_dirty {
            warn!("Neighbours are stale, the search may miss or cross barriers");
        }
        let optimal = self.heuristic.is_admissible();
        if !optimal {
            warn!("Heuristic is not admissible, the path found may not be a shortest one");
        }
        info!("Searching for a path from {} to {}", start, end);

        let mut state = SearchState::new(start, self.heuristic.estimate(start, end));
        let mut path = Vec::new();
        let mut expanded = 0;
        let outcome = loop {
            if self.cancelled() {
                warn!("Search cancelled after {} expansions", expanded);
                break SearchOutcome::Cancelled;
            }
            let Some(current) = state.pop() else {
                break SearchOutcome::NotFound;
            };
            if current == end {
                path = reconstruct_path(grid, &state.came_from, end, observer);
                if end != start {
                    grid.set_end_role(end);
                }
                break SearchOutcome::Found;
            }

            let neighbors = grid
                .cell(current)?
                .neighbors()
                .iter()
                .copied()
                .collect::<SmallVec<[Point; N_SMALLVEC_SIZE]>>();
            let tentative_g = state
                .g_score(current)
                .unwrap_or(u32::MAX)
                .saturating_add(EDGE_COST);
            let mut opened = Vec::new();
            for neighbor in neighbors {
                if tentative_g < state.g_score(neighbor).unwrap_or(u32::MAX) {
                    let f = tentative_g.saturating_add(self.heuristic.estimate(neighbor, end));
                    state.came_from.insert(neighbor, current);
                    state.g_score.insert(neighbor, tentative_g);
                    state.f_score.insert(neighbor, f);
                    if !state.is_open(neighbor) {
                        state.push(neighbor, f);
                        grid.mark(neighbor, Role::Frontier);
                        opened.push(neighbor);
                    }
                }
            }
            expanded += 1;
            observer.on_step(grid, &Step::Expanded { current, opened });
            if current != start {
                grid.mark(current, Role::Visited);
            }
        };
        observer.on_step(grid, &Step::Finished(outcome));

        let cost = match outcome {
            SearchOutcome::Found => state.g_score(end),
            _ => None,
        };
        match outcome {
            SearchOutcome::Found => info!(
                "Found a path of {} moves from {} to {} after {} expansions",
                cost.unwrap_or_default(),
                start,
                end,
                expanded
            ),
            SearchOutcome::NotFound => info!("{} is not reachable from {}", end, start),
            SearchOutcome::Cancelled => {}
        }
        Ok(SearchReport {
            outcome,
            path,
            cost,
            expanded,
            optimal,
            state,
        })
    }
}

/// Runs a Manhattan-distance A* search from `start` to `end` and tells whether a path was found.
/// See [AstarSearch::run].
pub fn find_path<O: StepObserver + ?Sized>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    observer: &mut O,
) -> Result<bool, GridError> {
    AstarSearch::new()
        .run(grid, start, end, observer)
        .map(|report| report.found())
}
