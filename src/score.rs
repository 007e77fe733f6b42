use crate::config::PICKUP_BONUS;

/// Run score. Only collisions with pickups move it, and only upward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
}

impl Scoreboard {
    pub fn get(&self) -> u32 {
        self.score
    }

    pub(crate) fn award_pickup(&mut self) {
        self.score = self.score.saturating_add(PICKUP_BONUS);
    }

    pub(crate) fn reset(&mut self) {
        self.score = 0;
    }
}
