//! Wall and trail blocking over the union of all trails.
//!
//! [`Occupancy`] counts how many trail entries sit on each cell, across every
//! agent. Trails may legitimately overlap (an invulnerable cycle crossing
//! another trail, two heads meeting) so a plain set would lose information
//! when excluding the current heads.

use std::collections::HashMap;

use crate::agent::Agent;
use crate::grid::Cell;

#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    counts: HashMap<Cell, u32>,
    total: usize,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_agents<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut occupancy = Self::new();
        for agent in agents {
            for cell in agent.trail() {
                occupancy.insert(*cell);
            }
        }
        occupancy
    }

    pub fn insert(&mut self, cell: Cell) {
        *self.counts.entry(cell).or_insert(0) += 1;
        self.total += 1;
    }

    #[inline]
    pub fn count(&self, cell: Cell) -> u32 {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.count(cell) > 0
    }

    /// Number of trail entries, overlapping cells counted once per entry.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Blocked for a hypothetical future head: off the board, or on any trail
    /// cell, current heads included.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !cell.in_bounds() || self.contains(cell)
    }

    /// Post-move test for an agent that has just laid its head: off the board,
    /// or the head sits on a trail entry that is not some agent's current head.
    /// Heads that meet on one cell do not block each other this tick.
    pub fn is_blocked_for(&self, agent: &Agent, agents: &[Agent]) -> bool {
        let head = agent.position();
        if !head.in_bounds() {
            return true;
        }
        let heads_here = agents
            .iter()
            .filter(|other| other.position() == head)
            .count() as u32;
        self.count(head) > heads_here
    }
}
