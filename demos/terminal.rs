use astar_grid_visualizer::visualizer::{
    role_color, Canvas, InputEvent, Rgb, Visualizer, VisualizerConfig,
};
use astar_grid_visualizer::Grid;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

// Paints the following 20x20 scene with simulated clicks, then animates the search in the
// terminal using 24-bit background colours:
//  - S at the top left, E at the bottom right
//  - two staggered walls with a gap at opposite ends
//
// Set RUST_LOG=info to see the search log on stderr.

const ROWS: usize = 20;
const WIDTH: u32 = 400;

struct Terminal {
    frame_delay: Duration,
}

impl Canvas for Terminal {
    fn draw(&mut self, grid: &Grid) {
        let mut out = String::from("\x1b[H");
        for row in grid.cells().collect::<Vec<_>>().chunks(grid.rows()) {
            for cell in row {
                let Rgb(r, g, b) = role_color(cell.role());
                out.push_str(&format!("\x1b[48;2;{};{};{}m  ", r, g, b));
            }
            out.push_str("\x1b[0m\n");
        }
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(out.as_bytes());
        let _ = stdout.flush();
        thread::sleep(self.frame_delay);
    }
}

fn main() {
    env_logger::init();
    let config = VisualizerConfig {
        rows: ROWS,
        width: WIDTH,
    };
    let gap = config.gap() as i32;
    let click = |row: i32, col: i32| InputEvent::Primary {
        x: row * gap + gap / 2,
        y: col * gap + gap / 2,
    };

    let mut events = vec![click(0, 0), click(ROWS as i32 - 1, ROWS as i32 - 1)];
    events.extend((0..ROWS as i32 - 3).map(|row| click(row, 6)));
    events.extend((3..ROWS as i32).map(|row| click(row, 13)));
    events.push(InputEvent::Run);

    let canvas = Terminal {
        frame_delay: Duration::from_millis(15),
    };
    print!("\x1b[2J");
    let mut visualizer = match Visualizer::new(config, canvas) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    if let Err(e) = visualizer.run(events) {
        eprintln!("{}", e);
        return;
    }
    match visualizer.last_report() {
        Some(report) if report.found() => {
            println!("Path of {} moves:", report.cost.unwrap_or_default());
            println!("{:?}", report.path);
        }
        Some(_) => println!("No path"),
        None => println!("Nothing was searched"),
    }
}
