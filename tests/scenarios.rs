use astar_grid_visualizer::visualizer::{Canvas, InputEvent, Visualizer, VisualizerConfig};
use astar_grid_visualizer::*;

fn p(row: i32, col: i32) -> Point {
    Point::new(row, col)
}

fn painted(rows: usize, start: Point, end: Point, barriers: &[Point]) -> Grid {
    let mut grid = Grid::new(rows, 800).unwrap();
    grid.paint(start, Role::Start).unwrap();
    grid.paint(end, Role::End).unwrap();
    for b in barriers {
        grid.paint(*b, Role::Barrier).unwrap();
    }
    grid.recompute_neighbors();
    grid
}

// |S....|
// |.....|
// |.....|
// |.....|
// |....E|
#[test]
fn open_five_by_five() {
    let mut grid = painted(5, p(0, 0), p(4, 4), &[]);
    let mut log = StepLog::new();
    assert!(find_path(&mut grid, p(0, 0), p(4, 4), &mut log).unwrap());
    let marked = log.path_marks();
    // Eight moves: seven inner path cells plus the start.
    assert_eq!(marked.len(), 8);
    assert_eq!(marked.last(), Some(&p(0, 0)));
    let path_cells = grid.cells().filter(|c| c.role() == Role::Path).count();
    assert_eq!(path_cells, 7);
}

#[test]
fn no_barriers_means_manhattan_length() {
    for (start, end) in [
        (p(0, 0), p(9, 9)),
        (p(3, 7), p(8, 1)),
        (p(9, 0), p(0, 9)),
        (p(5, 5), p(5, 6)),
    ] {
        let mut grid = painted(10, start, end, &[]);
        let report = AstarSearch::new()
            .run(&mut grid, start, end, &mut StepLog::new())
            .unwrap();
        let manhattan = (start.x - end.x).abs() + (start.y - end.y).abs();
        assert_eq!(report.path.len() as i32 - 1, manhattan);
        assert_eq!(report.cost, Some(manhattan as u32));
    }
}

// |S.#.E|
// |..#..|
// |..#..|
// |..#..|
// |..#..|
#[test]
fn wall_across_the_grid() {
    let wall = (0..5).map(|row| p(row, 2)).collect::<Vec<_>>();
    let mut grid = painted(5, p(0, 0), p(0, 4), &wall);
    let report = AstarSearch::new()
        .run(&mut grid, p(0, 0), p(0, 4), &mut StepLog::new())
        .unwrap();
    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert!(!report.state.came_from().contains_key(&p(0, 4)));
    // Nothing beyond the wall was touched.
    for row in 0..5 {
        for col in 3..5 {
            let role = grid.role(p(row, col)).unwrap();
            assert!(role == Role::Empty || role == Role::End);
        }
    }
}

#[test]
fn end_in_a_corner_pocket() {
    let mut grid = painted(6, p(5, 5), p(0, 0), &[p(0, 1), p(1, 0)]);
    let report = AstarSearch::new()
        .run(&mut grid, p(5, 5), p(0, 0), &mut StepLog::new())
        .unwrap();
    assert!(!report.found());
    assert_eq!(report.state.predecessor(p(0, 0)), None);
    grid.generate_components();
    assert!(!grid.reachable(p(5, 5), p(0, 0)));
}

#[test]
fn clear_behaves_like_a_fresh_grid() {
    let mut grid = painted(5, p(0, 0), p(4, 4), &[p(1, 1), p(2, 2), p(3, 3)]);
    find_path(&mut grid, p(0, 0), p(4, 4), &mut StepLog::new()).unwrap();
    grid.clear();
    assert!(grid.cells().all(|c| c.role() == Role::Empty));

    let mut fresh = Grid::new(5, 800).unwrap();
    for g in [&mut grid, &mut fresh] {
        g.paint(p(0, 4), Role::Start).unwrap();
        g.paint(p(4, 0), Role::End).unwrap();
        g.recompute_neighbors();
    }
    let mut cleared_log = StepLog::new();
    let mut fresh_log = StepLog::new();
    let cleared = AstarSearch::new()
        .run(&mut grid, p(0, 4), p(4, 0), &mut cleared_log)
        .unwrap();
    let fresh_report = AstarSearch::new()
        .run(&mut fresh, p(0, 4), p(4, 0), &mut fresh_log)
        .unwrap();
    assert_eq!(cleared.path, fresh_report.path);
    assert_eq!(cleared_log.steps, fresh_log.steps);
    assert_eq!(grid.to_string(), fresh.to_string());
}

/// Replaying the recorded steps onto a bare grid reproduces the final picture.
#[test]
fn steps_replay_the_search() {
    let barriers = [p(1, 1), p(1, 2), p(1, 3), p(3, 1), p(3, 2), p(3, 3)];
    let mut grid = painted(5, p(0, 0), p(4, 4), &barriers);
    let mut log = StepLog::new();
    let report = AstarSearch::new()
        .run(&mut grid, p(0, 0), p(4, 4), &mut log)
        .unwrap();
    assert!(report.found());

    let mut replay = painted(5, p(0, 0), p(4, 4), &barriers);
    for step in &log.steps {
        let marks: Vec<(Point, Role)> = match step {
            Step::Expanded { current, opened } => {
                let mut marks = opened.iter().map(|o| (*o, Role::Frontier)).collect::<Vec<_>>();
                if *current != p(0, 0) {
                    marks.push((*current, Role::Visited));
                }
                marks
            }
            Step::PathMarked(point) => vec![(*point, Role::Path)],
            Step::Finished(_) => vec![],
        };
        for (point, role) in marks {
            if !replay.cell(point).unwrap().is_endpoint() {
                replay.paint(point, role).unwrap();
            }
        }
    }
    assert_eq!(replay.to_string(), grid.to_string());
}

struct Silent;

impl Canvas for Silent {
    fn draw(&mut self, _: &Grid) {}
}

#[test]
fn visualizer_session() {
    let config = VisualizerConfig { rows: 10, width: 200 };
    let mut vis = Visualizer::new(config, Silent).unwrap();
    let gap = config.gap() as i32;
    let at = |row: i32, col: i32| InputEvent::Primary {
        x: row * gap + 1,
        y: col * gap + 1,
    };
    let mut events = vec![at(0, 0), at(9, 9)];
    events.extend((0..9).map(|row| at(row, 5)));
    events.push(InputEvent::Run);
    vis.run(events).unwrap();
    let report = vis.last_report().unwrap();
    assert!(report.found());
    assert_eq!(report.cost, Some(18));
    assert!(report.path.contains(&p(9, 5)));
}
