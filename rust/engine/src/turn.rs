use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::Player;

/// Direction of play around the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending seat order (+1)
    Clockwise,
    /// Descending seat order (-1)
    CounterClockwise,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Tracks whose turn it is and which way play moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTracker {
    pub current: usize,
    pub direction: Direction,
}

impl Default for TurnTracker {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TurnTracker {
    pub fn new(current: usize) -> Self {
        Self {
            current,
            direction: Direction::Clockwise,
        }
    }

    /// Index of the next seat satisfying `is_live`, without moving.
    ///
    /// Looks at most `seats` steps ahead, so a table with no live seat ends
    /// in [`GameError::NoActivePlayers`] instead of spinning.
    pub fn peek_where(
        &self,
        seats: usize,
        is_live: impl Fn(usize) -> bool,
    ) -> Result<usize, GameError> {
        if seats == 0 {
            return Err(GameError::NoActivePlayers);
        }
        let n = seats as isize;
        for step in 1..=n {
            let idx = (self.current as isize + step * self.direction.step()).rem_euclid(n) as usize;
            if is_live(idx) {
                return Ok(idx);
            }
        }
        Err(GameError::NoActivePlayers)
    }

    pub fn advance_where(
        &mut self,
        seats: usize,
        is_live: impl Fn(usize) -> bool,
    ) -> Result<usize, GameError> {
        self.current = self.peek_where(seats, is_live)?;
        Ok(self.current)
    }

    /// Moves to the next active (non-folded, non-eliminated) player.
    pub fn advance(&mut self, players: &[Player]) -> Result<usize, GameError> {
        self.advance_where(players.len(), |i| players[i].is_active())
    }

    pub fn peek(&self, players: &[Player]) -> Result<usize, GameError> {
        self.peek_where(players.len(), |i| players[i].is_active())
    }

    /// Passes over the next active player.
    pub fn skip(&mut self, players: &[Player]) -> Result<usize, GameError> {
        self.advance(players)?;
        self.advance(players)
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Stays put if the current seat is live, otherwise advances.
    pub fn settle_where(
        &mut self,
        seats: usize,
        is_live: impl Fn(usize) -> bool,
    ) -> Result<usize, GameError> {
        if self.current < seats && is_live(self.current) {
            return Ok(self.current);
        }
        self.advance_where(seats, is_live)
    }
}
