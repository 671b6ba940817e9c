use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// What a cell currently represents. Barriers are the only role the search itself reads; the
/// others exist so a renderer can show the state of the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered but not yet expanded (in the open set).
    Frontier,
    /// Expanded; its cost from the start is final.
    Visited,
    Path,
}

impl Role {
    /// Roles produced by a search, as opposed to roles painted by the user.
    pub fn is_search_mark(self) -> bool {
        matches!(self, Role::Frontier | Role::Visited | Role::Path)
    }
    /// Character used when printing a grid.
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Barrier => '#',
            Role::Frontier => 'o',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }
}

/// A node of the grid graph. Two cells are equal when they sit at the same position.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Point,
    role: Role,
    neighbors: SmallVec<[Point; N_SMALLVEC_SIZE]>,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            position: Point::new(row as i32, col as i32),
            role: Role::Empty,
            neighbors: SmallVec::new(),
        }
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn row(&self) -> usize {
        self.position.x as usize
    }
    pub fn col(&self) -> usize {
        self.position.y as usize
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }
    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }
    /// Whether this cell is the start or the end of a search.
    pub fn is_endpoint(&self) -> bool {
        matches!(self.role, Role::Start | Role::End)
    }
    /// Traversable neighbours as of the last [Grid::recompute_neighbors](crate::Grid::recompute_neighbors).
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }
    pub(crate) fn set_neighbors(&mut self, neighbors: SmallVec<[Point; N_SMALLVEC_SIZE]>) {
        self.neighbors = neighbors;
    }
    /// Top-left pixel of this cell for a given cell size. Rows advance along x.
    pub fn pixel_origin(&self, gap: u32) -> (u32, u32) {
        (self.row() as u32 * gap, self.col() as u32 * gap)
    }
}
