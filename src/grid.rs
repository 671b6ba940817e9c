use core::fmt;

use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, Role};
use crate::error::GridError;
use crate::{DEFAULT_ROWS, DEFAULT_WIDTH, N_SMALLVEC_SIZE};

/// Order in which neighbours are recorded: down, up, right, left. The search relaxes neighbours
/// in this order, which together with insertion-order tie-breaking fixes the path it returns.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A square grid of [Cell]s. Keeps track of the start and end designations, whether the cached
/// adjacency is stale, and the connected components of the non-barrier cells in a
/// [UnionFind] structure.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    width: u32,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
    pub neighbours_dirty: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::build(DEFAULT_ROWS, DEFAULT_WIDTH)
    }
}

impl Grid {
    /// Creates a `rows`×`rows` grid of empty cells laid out on a square surface `width` pixels
    /// wide. Every cell needs at least one pixel.
    pub fn new(rows: usize, width: u32) -> Result<Grid, GridError> {
        if rows == 0 || (width as usize) < rows {
            return Err(GridError::InvalidGeometry { rows, width });
        }
        Ok(Grid::build(rows, width))
    }

    fn build(rows: usize, width: u32) -> Grid {
        let cells = iproduct!(0..rows, 0..rows)
            .map(|(row, col)| Cell::new(row, col))
            .collect();
        Grid {
            rows,
            width,
            cells,
            start: None,
            end: None,
            neighbours_dirty: true,
            components: UnionFind::new(rows * rows),
            components_dirty: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Pixel width of the drawing surface.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Pixel size of a single cell.
    pub fn gap(&self) -> u32 {
        self.width / self.rows as u32
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as usize) < self.rows && (point.y as usize) < self.rows
    }

    fn index(&self, point: Point) -> Result<usize, GridError> {
        if self.in_bounds(point) {
            Ok(point.x as usize * self.rows + point.y as usize)
        } else {
            Err(GridError::OutOfRange {
                row: point.x as i64,
                col: point.y as i64,
                rows: self.rows,
            })
        }
    }

    pub fn cell(&self, point: Point) -> Result<&Cell, GridError> {
        let ix = self.index(point)?;
        Ok(&self.cells[ix])
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        if row >= self.rows || col >= self.rows {
            return Err(GridError::OutOfRange {
                row: row as i64,
                col: col as i64,
                rows: self.rows,
            });
        }
        Ok(&self.cells[row * self.rows + col])
    }

    pub fn role(&self, point: Point) -> Result<Role, GridError> {
        self.cell(point).map(Cell::role)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Paints `role` onto the cell at `point`, keeping at most one start and one end. Painting a
    /// start or end elsewhere moves it; painting over the current start or end drops it.
    pub fn paint(&mut self, point: Point, role: Role) -> Result<(), GridError> {
        let ix = self.index(point)?;
        let previous = self.cells[ix].role();
        let designated = match role {
            Role::Start => self.start == Some(point),
            Role::End => self.end == Some(point),
            _ => true,
        };
        if previous == role && designated {
            return Ok(());
        }
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        match role {
            Role::Start => {
                if let Some(old) = self.start.replace(point) {
                    self.set_role_unchecked(old, Role::Empty);
                }
            }
            Role::End => {
                if let Some(old) = self.end.replace(point) {
                    self.set_role_unchecked(old, Role::Empty);
                }
            }
            _ => {}
        }
        if previous == Role::Barrier || role == Role::Barrier {
            self.neighbours_dirty = true;
            self.components_dirty = true;
        }
        debug!("Painting {} as {:?} (was {:?})", point, role, previous);
        self.cells[ix].set_role(role);
        Ok(())
    }

    /// Paints the cell at `point` back to [Role::Empty].
    pub fn reset(&mut self, point: Point) -> Result<(), GridError> {
        self.paint(point, Role::Empty)
    }

    fn set_role_unchecked(&mut self, point: Point, role: Role) {
        let ix = point.x as usize * self.rows + point.y as usize;
        self.cells[ix].set_role(role);
    }

    /// Sets a search mark on a cell. The start and end keep their roles, so a search never
    /// erases the endpoints it runs between.
    pub(crate) fn mark(&mut self, point: Point, role: Role) {
        if let Ok(ix) = self.index(point) {
            let cell = &mut self.cells[ix];
            if !cell.is_endpoint() {
                cell.set_role(role);
            }
        }
    }

    /// Gives the cell at `point` the End role without touching the grid's start or end. Cells
    /// holding the start or end role are left alone.
    pub(crate) fn set_end_role(&mut self, point: Point) {
        if let Ok(ix) = self.index(point) {
            let cell = &mut self.cells[ix];
            if !cell.is_endpoint() {
                cell.set_role(Role::End);
            }
        }
    }

    /// Rebuilds the neighbour list of every cell from the four orthogonal directions, leaving
    /// out positions beyond the border and barrier cells. Has to be called after barrier edits
    /// and before a search, as the search only follows these lists.
    pub fn recompute_neighbors(&mut self) {
        let lists = self
            .cells
            .iter()
            .map(|cell| self.open_neighbours(cell.position()))
            .collect::<Vec<_>>();
        for (cell, neighbors) in self.cells.iter_mut().zip(lists) {
            cell.set_neighbors(neighbors);
        }
        self.neighbours_dirty = false;
    }

    fn open_neighbours(&self, point: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        DIRECTIONS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.cell(*p).map_or(false, |c| !c.is_barrier()))
            .collect()
    }

    /// Resets every cell to [Role::Empty] and forgets the start and end.
    pub fn clear(&mut self) {
        info!("Clearing {}x{} grid", self.rows, self.rows);
        *self = Grid::build(self.rows, self.width);
    }

    /// Turns frontier, visited and path cells back into empty ones, keeping the start, the end
    /// and the barriers.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.role().is_search_mark() {
                cell.set_role(Role::Empty);
            }
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up orthogonally adjacent non-barrier
    /// cells to the same component.
    pub fn generate_components(&mut self) {
        let n = self.rows;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..n, 0..n) {
            let ix = row * n + col;
            if self.cells[ix].is_barrier() {
                continue;
            }
            // Linking down and right covers every edge once.
            if row + 1 < n && !self.cells[ix + n].is_barrier() {
                self.components.union(ix, ix + n);
            }
            if col + 1 < n && !self.cells[ix + 1].is_barrier() {
                self.components.union(ix, ix + 1);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: Point) -> Result<usize, GridError> {
        Ok(self.components.find(self.index(point)?))
    }

    /// Checks if start and goal are on the same component. Only meaningful after
    /// [update](Self::update) or [generate_components](Self::generate_components).
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        match (self.index(start), self.index(goal)) {
            (Ok(s), Ok(g)) => {
                !self.cells[s].is_barrier()
                    && !self.cells[g].is_barrier()
                    && self.components.equiv(s, g)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows) {
            let line = row.iter().map(|c| c.role().symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
