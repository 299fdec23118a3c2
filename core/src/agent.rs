use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Heading};

pub type AgentIndex = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Planner role. The primary AI looks further ahead; the secondary harasses harder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiRole {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "role")]
pub enum Controller {
    Human,
    Ai(AiRole),
}

impl Controller {
    pub fn ai_role(self) -> Option<AiRole> {
        match self {
            Self::Human => None,
            Self::Ai(role) => Some(role),
        }
    }

    pub fn is_human(self) -> bool {
        matches!(self, Self::Human)
    }
}

/// A light cycle and the trail it has laid.
///
/// `heading` is the direction for the next move; `moved_heading` is the one the
/// agent last travelled with. Steering is checked against the latter so that
/// several intents inside one tick can never add up to a U-turn.
#[derive(Clone, Debug)]
pub struct Agent {
    index: AgentIndex,
    name: String,
    color: Rgb,
    controller: Controller,
    position: Cell,
    heading: Heading,
    moved_heading: Heading,
    trail: Vec<Cell>,
    alive: bool,
}

impl Agent {
    pub fn new(
        index: AgentIndex,
        name: impl Into<String>,
        color: Rgb,
        controller: Controller,
        spawn: Cell,
        heading: Heading,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            color,
            controller,
            position: spawn,
            heading,
            moved_heading: heading,
            trail: vec![spawn],
            alive: true,
        }
    }

    #[inline]
    pub fn index(&self) -> AgentIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn controller(&self) -> Controller {
        self.controller
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[inline]
    pub fn moved_heading(&self) -> Heading {
        self.moved_heading
    }

    pub fn trail(&self) -> &[Cell] {
        &self.trail
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Accepts `heading` unless it reverses the last move. Returns whether it was taken.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading.is_reverse_of(self.moved_heading) {
            return false;
        }
        self.heading = heading;
        true
    }

    /// Moves one cell along the current heading and lays the new head. Returns the head.
    pub(crate) fn advance(&mut self) -> Cell {
        self.position = self.position.step(self.heading);
        self.moved_heading = self.heading;
        self.trail.push(self.position);
        self.position
    }

    pub(crate) fn eliminate(&mut self) {
        self.alive = false;
    }
}
