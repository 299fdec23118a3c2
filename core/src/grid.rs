use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH, CELL_SIZE};

/// A grid-aligned board position in board units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }

    #[inline]
    pub fn is_aligned(self) -> bool {
        self.x.rem_euclid(CELL_SIZE) == 0 && self.y.rem_euclid(CELL_SIZE) == 0
    }

    /// Euclidean distance in board units.
    pub fn distance(self, other: Cell) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }
}

/// Cardinal direction of travel. Declaration order is the planner's tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Right,
    Left,
    Up,
    Down,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Left, Heading::Up, Heading::Down];

    /// One-cell displacement `(dx, dy)`; `y` grows downward.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (CELL_SIZE, 0),
            Self::Left => (-CELL_SIZE, 0),
            Self::Up => (0, -CELL_SIZE),
            Self::Down => (0, CELL_SIZE),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    #[inline]
    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.opposite() == other
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|heading| heading.delta() == (dx, dy))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl std::str::FromStr for Heading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "r" => Ok(Self::Right),
            "left" | "l" => Ok(Self::Left),
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            other => Err(format!("unknown heading '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_edges() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(BOARD_WIDTH - CELL_SIZE, BOARD_HEIGHT - CELL_SIZE).in_bounds());
        assert!(!Cell::new(-CELL_SIZE, 0).in_bounds());
        assert!(!Cell::new(0, -CELL_SIZE).in_bounds());
        assert!(!Cell::new(BOARD_WIDTH, 0).in_bounds());
        assert!(!Cell::new(0, BOARD_HEIGHT).in_bounds());
    }

    #[test]
    fn headings_are_unit_cell_steps() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.delta();
            assert_eq!(dx.abs() + dy.abs(), CELL_SIZE, "heading={heading:?}");
            assert_eq!(Heading::from_delta(dx, dy), Some(heading));
            assert!(heading.opposite().is_reverse_of(heading));
            assert!(!heading.is_reverse_of(heading));
        }
        assert_eq!(Heading::from_delta(3, 0), None);
    }

    #[test]
    fn step_and_distance() {
        let origin = Cell::new(100, 300);
        assert_eq!(origin.step(Heading::Right), Cell::new(110, 300));
        assert_eq!(origin.step(Heading::Up), Cell::new(100, 290));
        assert_eq!(Cell::new(0, 0).distance(Cell::new(30, 40)), 50.0);
        assert!(Cell::new(110, 290).is_aligned());
        assert!(!Cell::new(105, 290).is_aligned());
    }

    #[test]
    fn heading_parse_is_case_insensitive() {
        assert_eq!(" UP ".parse::<Heading>(), Ok(Heading::Up));
        assert_eq!("Left".parse::<Heading>(), Ok(Heading::Left));
        assert!("north".parse::<Heading>().is_err());
    }
}
