use crate::agent::Rgb;
use crate::grid::{Cell, Heading};

// Board geometry, in board units. One cell is CELL_SIZE units wide.
pub const BOARD_WIDTH: i32 = 800;
pub const BOARD_HEIGHT: i32 = 600;
pub const CELL_SIZE: i32 = 10;

/// Design rate for presentation loops. The simulation itself only counts ticks.
pub const TICK_RATE_HZ: u32 = 10;

pub const MAX_AGENTS: usize = 3;
pub const MAX_NAME_LEN: usize = 20;

pub const DEFAULT_PLAYER_NAMES: [&str; 2] = ["Player 1", "Player 2"];
pub const PRIMARY_AI_NAME: &str = "AI 1";
pub const SECONDARY_AI_NAME: &str = "AI 2";

pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);

/// Fixed spawn slots: left-center moving right, right-center moving left,
/// top-center moving down. The third slot only exists in dual-AI matches.
pub const SPAWNS: [(Cell, Heading, Rgb); MAX_AGENTS] = [
    (Cell::new(100, 300), Heading::Right, BLUE),
    (Cell::new(700, 300), Heading::Left, RED),
    (Cell::new(400, 100), Heading::Down, GREEN),
];

// Planner tuning.
pub const TRAP_RADIUS: f64 = 50.0;
pub const PRIMARY_TRAP_WEIGHT: f64 = 0.1;
pub const SECONDARY_TRAP_WEIGHT: f64 = 0.3;

/// `(primary, secondary)` look-ahead ceilings, indexed by difficulty.
pub const LOOKAHEAD_STEPS: [(u32, u32); 4] = [(20, 10), (30, 15), (40, 20), (60, 30)];
