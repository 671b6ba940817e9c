//! Headless glue between an input/rendering surface and the search.
//!
//! A [Visualizer] owns the [Grid], turns pixel positions into cells, applies paint actions and
//! runs searches, redrawing a [Canvas] after every step. Colours only exist here; the engine
//! works on [Role]s alone.
use grid_util::point::Point;
use log::{debug, info, warn};

use crate::astar::{AstarSearch, CancelFlag, SearchOutcome, SearchReport};
use crate::cell::Role;
use crate::error::{GridError, SearchRequestError};
use crate::grid::Grid;
use crate::{Step, DEFAULT_ROWS, DEFAULT_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const PURPLE: Rgb = Rgb(128, 0, 128);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GREY: Rgb = Rgb(128, 128, 128);
pub const TURQUOISE: Rgb = Rgb(64, 224, 208);

/// Colour of the lines separating cells.
pub const GRID_LINE: Rgb = GREY;

pub fn role_color(role: Role) -> Rgb {
    match role {
        Role::Empty => WHITE,
        Role::Start => ORANGE,
        Role::End => TURQUOISE,
        Role::Barrier => BLACK,
        Role::Frontier => GREEN,
        Role::Visited => RED,
        Role::Path => PURPLE,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualizerConfig {
    /// Number of rows and columns.
    pub rows: usize,
    /// Pixel width and height of the drawing surface.
    pub width: u32,
}

impl Default for VisualizerConfig {
    fn default() -> VisualizerConfig {
        VisualizerConfig {
            rows: DEFAULT_ROWS,
            width: DEFAULT_WIDTH,
        }
    }
}

impl VisualizerConfig {
    /// Pixel size of a cell.
    pub fn gap(&self) -> u32 {
        self.width / self.rows.max(1) as u32
    }

    /// Maps a pixel to the cell under it. Rows advance along x and columns along y.
    pub fn pixel_to_cell(&self, x: i32, y: i32) -> Result<Point, GridError> {
        let gap = self.gap().max(1) as i32;
        let row = x.div_euclid(gap);
        let col = y.div_euclid(gap);
        let rows = self.rows as i32;
        if x < 0 || y < 0 || row >= rows || col >= rows {
            return Err(GridError::OutOfRange {
                row: row as i64,
                col: col as i64,
                rows: self.rows,
            });
        }
        Ok(Point::new(row, col))
    }
}

/// A drawing surface. [Visualizer] calls [draw](Canvas::draw) once per handled event and once
/// per search step.
pub trait Canvas {
    fn draw(&mut self, grid: &Grid);
    /// Polled after every search step; returning [true] cancels the running search and stops
    /// the host loop.
    fn quit_requested(&mut self) -> bool {
        false
    }
}

/// User actions, with pixel positions relative to the top-left corner of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button: places the start, then the end, then barriers.
    Primary { x: i32, y: i32 },
    /// Secondary button: resets a cell.
    Secondary { x: i32, y: i32 },
    /// Starts a search between the placed start and end.
    Run,
    /// Throws away everything painted so far.
    Clear,
    Quit,
}

/// Whether the host loop should keep going after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Visualizer<C> {
    pub config: VisualizerConfig,
    grid: Grid,
    canvas: C,
    cancel: CancelFlag,
    last_report: Option<SearchReport>,
}

impl<C: Canvas> Visualizer<C> {
    pub fn new(config: VisualizerConfig, canvas: C) -> Result<Visualizer<C>, GridError> {
        let grid = Grid::new(config.rows, config.width)?;
        Ok(Visualizer {
            config,
            grid,
            canvas,
            cancel: CancelFlag::new(),
            last_report: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn canvas(&self) -> &C {
        &self.canvas
    }
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
    /// Report of the most recent search, if any.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
    /// Flag the running search polls. Raising it from elsewhere cancels the search.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Applies a single event and redraws, also when the event is rejected. Clicks outside the
    /// surface are ignored.
    pub fn handle(&mut self, event: InputEvent) -> Result<Flow, GridError> {
        let flow = match event {
            InputEvent::Primary { x, y } => match self.cell_under(x, y) {
                Some(point) => self.place(point).map(|_| Flow::Continue),
                None => Ok(Flow::Continue),
            },
            InputEvent::Secondary { x, y } => match self.cell_under(x, y) {
                Some(point) => self.grid.reset(point).map(|_| Flow::Continue),
                None => Ok(Flow::Continue),
            },
            InputEvent::Run => self.run_search().map(|report| {
                if report.outcome == SearchOutcome::Cancelled {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }),
            InputEvent::Clear => {
                self.grid.clear();
                self.last_report = None;
                Ok(Flow::Continue)
            }
            InputEvent::Quit => Ok(Flow::Quit),
        };
        self.canvas.draw(&self.grid);
        flow
    }

    /// Host loop: handles events until one of them asks to quit or they run out. Invalid search
    /// requests are logged and skipped, like clicks outside the surface.
    pub fn run<I>(&mut self, events: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.canvas.draw(&self.grid);
        for event in events {
            if self.canvas.quit_requested() {
                break;
            }
            match self.handle(event) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(GridError::InvalidSearchRequest(e)) => warn!("Ignoring run request: {}", e),
                Err(e) => return Err(e),
            }
        }
        info!("Leaving visualizer loop");
        Ok(())
    }

    fn cell_under(&self, x: i32, y: i32) -> Option<Point> {
        match self.config.pixel_to_cell(x, y) {
            Ok(point) => Some(point),
            Err(e) => {
                debug!("Ignoring click at ({}, {}): {}", x, y, e);
                None
            }
        }
    }

    fn place(&mut self, point: Point) -> Result<(), GridError> {
        let start = self.grid.start();
        let end = self.grid.end();
        if start.is_none() && end != Some(point) {
            self.grid.paint(point, Role::Start)
        } else if end.is_none() && start != Some(point) {
            self.grid.paint(point, Role::End)
        } else if start != Some(point) && end != Some(point) {
            self.grid.paint(point, Role::Barrier)
        } else {
            Ok(())
        }
    }

    /// Checks that a search can run between the placed start and end.
    pub fn validate(&self) -> Result<(Point, Point), GridError> {
        let start = self.grid.start().ok_or(SearchRequestError::MissingStart)?;
        let end = self.grid.end().ok_or(SearchRequestError::MissingEnd)?;
        if start == end {
            return Err(SearchRequestError::SameCell.into());
        }
        if self.grid.cell(start)?.is_barrier() || self.grid.cell(end)?.is_barrier() {
            return Err(SearchRequestError::BarrierEndpoint.into());
        }
        Ok((start, end))
    }

    /// Wipes the marks of the previous search, recomputes the adjacency and searches, drawing
    /// after every step.
    pub fn run_search(&mut self) -> Result<SearchReport, GridError> {
        let (start, end) = self.validate()?;
        self.grid.clear_search_marks();
        self.grid.recompute_neighbors();
        self.grid.update();
        if !self.grid.reachable(start, end) {
            info!("{} and {} lie in different components", start, end);
        }
        self.cancel.reset();
        let search = AstarSearch::new().cancel_on(self.cancel.clone());
        let canvas = &mut self.canvas;
        let cancel = &self.cancel;
        let mut redraw = |grid: &Grid, _: &Step| {
            canvas.draw(grid);
            if canvas.quit_requested() {
                cancel.cancel();
            }
        };
        let report = search.run(&mut self.grid, start, end, &mut redraw)?;
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
