//! Lifetime play statistics: games, wins, streaks, times.

use super::store::KeyValueStore;
use crate::constants::{
    KEY_BEST_STREAK, KEY_BEST_TIME, KEY_CURRENT_STREAK, KEY_GAMES_LOST, KEY_GAMES_WON,
    KEY_HINTS_USED, KEY_PERFECT_GAMES, KEY_TOTAL_GAMES, KEY_TOTAL_MOVES, KEY_TOTAL_TIME,
    MAX_STARS,
};
use crate::engine::PuzzleEngine;
use crate::error::Result;
use log::debug;

/// Outcome of one finished game, as fed to [`StatsStore::record_game`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRecord {
    pub won: bool,
    pub moves: u32,
    pub time_seconds: f64,
    pub hints_used: u32,
    /// Won with the top star rating and no hints.
    pub perfect: bool,
}

impl GameRecord {
    /// Summarise a finished engine session. `None` while the game is in progress.
    pub fn from_engine<R>(engine: &PuzzleEngine<R>) -> Option<Self> {
        if !engine.is_game_over() {
            return None;
        }
        let won = engine.player_won();
        Some(Self {
            won,
            moves: engine.current_turn() as u32,
            time_seconds: engine.elapsed_time(),
            hints_used: engine.hints_used(),
            perfect: won && engine.star_rating() == MAX_STARS && engine.hints_used() == 0,
        })
    }

    /// A game given up before it finished, counted as a loss.
    pub fn forfeit<R>(engine: &PuzzleEngine<R>) -> Self {
        Self {
            won: false,
            moves: engine.current_turn() as u32,
            time_seconds: engine.elapsed_time(),
            hints_used: engine.hints_used(),
            perfect: false,
        }
    }
}

/// Lifetime milestones derived from the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    FirstGame,
    TenWins,
    FiftyWins,
    HundredWins,
    PerfectGame,
    FiveWinStreak,
    TenWinStreak,
    SpeedDemon,
}

impl Milestone {
    pub const ALL: [Milestone; 8] = [
        Milestone::FirstGame,
        Milestone::TenWins,
        Milestone::FiftyWins,
        Milestone::HundredWins,
        Milestone::PerfectGame,
        Milestone::FiveWinStreak,
        Milestone::TenWinStreak,
        Milestone::SpeedDemon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstGame => "First Game",
            Self::TenWins => "10 Wins",
            Self::FiftyWins => "50 Wins",
            Self::HundredWins => "100 Wins",
            Self::PerfectGame => "Perfect Game",
            Self::FiveWinStreak => "5 Win Streak",
            Self::TenWinStreak => "10 Win Streak",
            Self::SpeedDemon => "Speed Demon",
        }
    }
}

/// Play statistics kept in an injected [`KeyValueStore`].
#[derive(Debug)]
pub struct StatsStore<S> {
    store: S,
}

impl<S: KeyValueStore> StatsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn get_u32(&self, key: &str) -> u32 {
        u32::try_from(self.store.get_int(key, 0)).unwrap_or(0)
    }

    /// Add one finished game. All counters move together or not at all.
    pub fn record_game(&mut self, record: GameRecord) -> Result<()> {
        let total_games = self.total_games() + 1;
        let total_moves = self.total_moves() + record.moves;
        let total_time = self.total_time() + record.time_seconds;
        let total_hints = self.hints_used() + record.hints_used;
        let games_won = self.games_won() + 1;
        let games_lost = self.games_lost() + 1;
        let streak = self.current_streak() + 1;
        let best_streak = self.best_streak();
        let perfect_games = self.perfect_games() + 1;
        let best_time = self.store.get_float(KEY_BEST_TIME, f64::MAX);

        self.store.transact(|s| {
            s.put_int(KEY_TOTAL_GAMES, i64::from(total_games));
            s.put_int(KEY_TOTAL_MOVES, i64::from(total_moves));
            s.put_float(KEY_TOTAL_TIME, total_time);
            s.put_int(KEY_HINTS_USED, i64::from(total_hints));

            if record.won {
                s.put_int(KEY_GAMES_WON, i64::from(games_won));
                s.put_int(KEY_CURRENT_STREAK, i64::from(streak));
                if streak > best_streak {
                    s.put_int(KEY_BEST_STREAK, i64::from(streak));
                }
                if record.perfect {
                    s.put_int(KEY_PERFECT_GAMES, i64::from(perfect_games));
                }
                if record.time_seconds > 0.0 && record.time_seconds < best_time {
                    s.put_float(KEY_BEST_TIME, record.time_seconds);
                }
            } else {
                s.put_int(KEY_GAMES_LOST, i64::from(games_lost));
                s.put_int(KEY_CURRENT_STREAK, 0);
            }
        })?;

        debug!("Recorded game (won: {}, moves: {})", record.won, record.moves);
        Ok(())
    }

    pub fn total_games(&self) -> u32 {
        self.get_u32(KEY_TOTAL_GAMES)
    }

    pub fn games_won(&self) -> u32 {
        self.get_u32(KEY_GAMES_WON)
    }

    pub fn games_lost(&self) -> u32 {
        self.get_u32(KEY_GAMES_LOST)
    }

    pub fn total_moves(&self) -> u32 {
        self.get_u32(KEY_TOTAL_MOVES)
    }

    pub fn total_time(&self) -> f64 {
        self.store.get_float(KEY_TOTAL_TIME, 0.0)
    }

    pub fn perfect_games(&self) -> u32 {
        self.get_u32(KEY_PERFECT_GAMES)
    }

    pub fn hints_used(&self) -> u32 {
        self.get_u32(KEY_HINTS_USED)
    }

    /// Fastest timed win in seconds, 0 if there is none yet.
    pub fn best_time(&self) -> f64 {
        self.store.get_float(KEY_BEST_TIME, 0.0)
    }

    pub fn current_streak(&self) -> u32 {
        self.get_u32(KEY_CURRENT_STREAK)
    }

    pub fn best_streak(&self) -> u32 {
        self.get_u32(KEY_BEST_STREAK)
    }

    pub fn win_rate_percentage(&self) -> u32 {
        let total = self.total_games();
        if total == 0 {
            return 0;
        }
        self.games_won() * 100 / total
    }

    pub fn average_moves(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.total_moves()) / f64::from(total)
    }

    pub fn average_time(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.0;
        }
        self.total_time() / f64::from(total)
    }

    pub fn summary(&self) -> String {
        format!(
            "Games: {} | W: {} | L: {} | Win%: {}% | Avg Moves: {:.1} | Streak: {}",
            self.total_games(),
            self.games_won(),
            self.games_lost(),
            self.win_rate_percentage(),
            self.average_moves(),
            self.current_streak()
        )
    }

    pub fn has_milestone(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::FirstGame => self.total_games() >= 1,
            Milestone::TenWins => self.games_won() >= 10,
            Milestone::FiftyWins => self.games_won() >= 50,
            Milestone::HundredWins => self.games_won() >= 100,
            Milestone::PerfectGame => self.perfect_games() >= 1,
            Milestone::FiveWinStreak => self.best_streak() >= 5,
            Milestone::TenWinStreak => self.best_streak() >= 10,
            Milestone::SpeedDemon => {
                let best = self.best_time();
                best > 0.0 && best < 60.0
            }
        }
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        Milestone::ALL
            .iter()
            .copied()
            .filter(|&m| self.has_milestone(m))
            .collect()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.store.transact(|s| s.clear())?;
        debug!("Statistics reset");
        Ok(())
    }
}
