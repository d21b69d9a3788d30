use std::time::{Duration, Instant};

use crate::game::{Placement, Player};

/// A piece falling from the top row to where it landed.
///
/// The session already holds the piece at `placement`; this only decides
/// where to draw it until the fall completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropAnimation {
    placement: Placement,
    player: Player,
    started: Instant,
    step: Duration,
}

impl DropAnimation {
    pub fn new(placement: Placement, player: Player, started: Instant, step: Duration) -> Self {
        DropAnimation {
            placement,
            player,
            started,
            step,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Row the piece is drawn on at `now`
    pub fn current_row(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let rows = (elapsed.as_millis() / self.step.as_millis().max(1)) as usize;
        rows.min(self.placement.row)
    }

    /// The piece has rested on its final row for one full step
    pub fn is_finished(&self, now: Instant) -> bool {
        let total = self.step * (self.placement.row as u32 + 1);
        now.saturating_duration_since(self.started) >= total
    }
}
