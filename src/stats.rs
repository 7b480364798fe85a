//! Career statistics, stored as five whitespace-separated counters:
//! games played, won, lost, shots fired, hits.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub games_played: u64,
    pub games_won: u64,
    pub games_lost: u64,
    pub total_shots_fired: u64,
    pub total_hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("expected 5 counters, found {0}")]
    WrongFieldCount(usize),
    #[error("counter {index} is not a non-negative integer")]
    BadCounter { index: usize },
}

impl Stats {
    /// Hit percentage over all recorded shots, 0 when nothing was fired.
    pub fn accuracy(&self) -> f32 {
        if self.total_shots_fired == 0 {
            0.0
        } else {
            (100.0 * self.total_hits as f64 / self.total_shots_fired as f64) as f32
        }
    }

    /// Fold one finished game into the totals. Counters saturate.
    pub fn record_game(&mut self, won: bool, shots: u32, hits: u32) {
        self.games_played = self.games_played.saturating_add(1);
        if won {
            self.games_won = self.games_won.saturating_add(1);
        } else {
            self.games_lost = self.games_lost.saturating_add(1);
        }
        self.total_shots_fired = self.total_shots_fired.saturating_add(u64::from(shots));
        self.total_hits = self.total_hits.saturating_add(u64::from(hits));
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.games_played,
            self.games_won,
            self.games_lost,
            self.total_shots_fired,
            self.total_hits
        )
    }
}

impl FromStr for Stats {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut counters = [0u64; 5];
        let mut count = 0usize;
        for (index, token) in s.split_whitespace().enumerate() {
            if index < counters.len() {
                counters[index] = token
                    .parse()
                    .map_err(|_| StatsError::BadCounter { index })?;
            }
            count += 1;
        }
        if count != counters.len() {
            return Err(StatsError::WrongFieldCount(count));
        }
        let [games_played, games_won, games_lost, total_shots_fired, total_hits] = counters;
        Ok(Stats {
            games_played,
            games_won,
            games_lost,
            total_shots_fired,
            total_hits,
        })
    }
}
