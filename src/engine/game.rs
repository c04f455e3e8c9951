//! Game session state machine.
//!
//! A [`PuzzleEngine`] owns one attempt at a level: the hidden code, the row
//! being filled, the completed rows and the hint/time budgets. Once the game is
//! won or lost it rejects further guesses until [`PuzzleEngine::start_new_game`].

use super::logic::{calculate_feedback, generate_code};
use super::{Feedback, GameStatus, GuessRecord, Hint};
use crate::error::{MastermindError, Result};
use crate::level::Level;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Slack for rounding accumulated over many small clock ticks.
const CLOCK_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct PuzzleEngine<R = StdRng> {
    level: Level,
    rng: R,
    secret_code: Vec<usize>,
    history: Vec<GuessRecord>,
    current_row: Vec<Option<usize>>,
    status: GameStatus,
    hints_remaining: u32,
    elapsed_time: f64,
}

impl PuzzleEngine {
    /// Create an engine seeded from the operating system and start a game.
    pub fn new(level: Level) -> Self {
        Self::with_rng(level, StdRng::from_os_rng())
    }
}

impl<R: Rng> PuzzleEngine<R> {
    /// Create an engine drawing codes and hints from `rng`, and start a game.
    pub fn with_rng(level: Level, rng: R) -> Self {
        let code_length = level.code_length();
        let mut engine = Self {
            hints_remaining: level.hints_available(),
            level,
            rng,
            secret_code: Vec::with_capacity(code_length),
            history: Vec::new(),
            current_row: vec![None; code_length],
            status: GameStatus::InProgress,
            elapsed_time: 0.0,
        };
        engine.start_new_game();
        engine
    }

    /// Discard the current session and start over with a fresh secret code.
    pub fn start_new_game(&mut self) {
        self.secret_code = generate_code(
            self.level.num_colors(),
            self.level.code_length(),
            self.level.allows_duplicates(),
            &mut self.rng,
        );
        self.history.clear();
        self.current_row = vec![None; self.level.code_length()];
        self.status = GameStatus::InProgress;
        self.hints_remaining = self.level.hints_available();
        self.elapsed_time = 0.0;
        debug!(
            "New game on level {} ({} colors, {} pegs, {} turns)",
            self.level.level_number(),
            self.level.num_colors(),
            self.level.code_length(),
            self.level.max_turns()
        );
    }

    fn check_color(&self, color: usize) -> Result<()> {
        if color >= self.level.num_colors() {
            return Err(MastermindError::ColorOutOfRange {
                color,
                num_colors: self.level.num_colors(),
            });
        }
        Ok(())
    }

    /// Place one color in the next empty slot of the current row.
    ///
    /// Returns the row's feedback when this move completes it, `None` otherwise.
    pub fn make_move(&mut self, color: usize) -> Result<Option<Feedback>> {
        if self.is_game_over() {
            return Err(MastermindError::GameOver);
        }
        self.check_color(color)?;

        let Some(slot) = self.current_row.iter().position(Option::is_none) else {
            // A full row is always scored on the move that fills it
            return Ok(None);
        };
        self.current_row[slot] = Some(color);

        if slot + 1 < self.level.code_length() {
            return Ok(None);
        }
        let guess: Vec<usize> = self.current_row.iter().flatten().copied().collect();
        Ok(Some(self.complete_row(guess)))
    }

    /// Submit a whole row at once. Any partially filled row is replaced.
    pub fn make_guess(&mut self, guess: &[usize]) -> Result<Feedback> {
        if self.is_game_over() {
            return Err(MastermindError::GameOver);
        }
        if guess.len() != self.level.code_length() {
            return Err(MastermindError::WrongGuessLength {
                expected: self.level.code_length(),
                actual: guess.len(),
            });
        }
        for &color in guess {
            self.check_color(color)?;
        }
        Ok(self.complete_row(guess.to_vec()))
    }

    fn complete_row(&mut self, guess: Vec<usize>) -> Feedback {
        let feedback = calculate_feedback(&guess, &self.secret_code);
        self.history.push(GuessRecord { guess, feedback });
        self.current_row = vec![None; self.level.code_length()];

        debug!(
            "Turn {}: {} black, {} white",
            self.history.len(),
            feedback.black_pegs,
            feedback.white_pegs
        );

        if feedback.is_win(self.level.code_length()) {
            self.status = GameStatus::Won;
            debug!("Level {} won in {} turns", self.level.level_number(), self.history.len());
        } else if self.history.len() >= self.level.max_turns() {
            self.status = GameStatus::Lost;
            debug!("Level {} lost: out of turns", self.level.level_number());
        }
        feedback
    }

    /// Spend a hint to learn the correct color of a slot in the current row
    /// that is still empty or holds the wrong color.
    ///
    /// Returns `None` without spending anything when no hints remain or the
    /// game is over.
    pub fn use_hint(&mut self) -> Option<Hint> {
        if self.hints_remaining == 0 || self.is_game_over() {
            return None;
        }

        let eligible: Vec<usize> = self
            .current_row
            .iter()
            .zip(&self.secret_code)
            .enumerate()
            .filter(|(_, (slot, secret))| slot.map_or(true, |c| c != **secret))
            .map(|(i, _)| i)
            .collect();
        let position = if eligible.is_empty() {
            0
        } else {
            eligible[self.rng.random_range(0..eligible.len())]
        };

        self.hints_remaining -= 1;
        debug!("Hint used on slot {position}, {} left", self.hints_remaining);
        Some(Hint {
            position,
            color: self.secret_code[position],
        })
    }

    /// Advance the clock of a timed level by `delta_seconds`.
    ///
    /// Returns true on the call that runs the clock out, which ends the game as
    /// a loss. Untimed levels and finished games ignore the call.
    pub fn update_time(&mut self, delta_seconds: f64) -> bool {
        if !self.level.is_timed() || self.is_game_over() {
            return false;
        }
        let limit = f64::from(self.level.time_limit_seconds());
        self.elapsed_time += delta_seconds;
        if self.elapsed_time + CLOCK_EPSILON >= limit {
            self.elapsed_time = limit;
            self.status = GameStatus::Lost;
            debug!("Level {} lost: time expired", self.level.level_number());
            return true;
        }
        false
    }
}

impl<R> PuzzleEngine<R> {
    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn player_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Index of the row being filled, which is also the number of completed turns.
    pub fn current_turn(&self) -> usize {
        self.history.len()
    }

    pub fn max_turns(&self) -> usize {
        self.level.max_turns()
    }

    pub fn turns_remaining(&self) -> usize {
        self.level.max_turns().saturating_sub(self.history.len())
    }

    /// Next slot to be filled in the current row, `None` once the game is over.
    pub fn current_position(&self) -> Option<usize> {
        if self.is_game_over() {
            return None;
        }
        Some(
            self.current_row
                .iter()
                .position(Option::is_none)
                .unwrap_or(self.current_row.len()),
        )
    }

    pub fn is_current_row_complete(&self) -> bool {
        !self.is_game_over() && self.current_row.iter().all(Option::is_some)
    }

    /// The row in progress, `None` once the game is over.
    pub fn current_guess(&self) -> Option<&[Option<usize>]> {
        if self.is_game_over() {
            return None;
        }
        Some(&self.current_row)
    }

    /// Completed rows in turn order.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn guess(&self, turn: usize) -> Option<&[usize]> {
        self.history.get(turn).map(|r| r.guess.as_slice())
    }

    pub fn feedback(&self, turn: usize) -> Option<Feedback> {
        self.history.get(turn).map(|r| r.feedback)
    }

    /// The secret code, revealed only once the game is over.
    pub fn secret_code(&self) -> Option<&[usize]> {
        if self.is_game_over() {
            Some(&self.secret_code)
        } else {
            None
        }
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn hints_used(&self) -> u32 {
        self.level.hints_available() - self.hints_remaining
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Seconds left on a timed level, 0 for untimed levels.
    pub fn remaining_time(&self) -> f64 {
        if self.level.is_timed() {
            (f64::from(self.level.time_limit_seconds()) - self.elapsed_time).max(0.0)
        } else {
            0.0
        }
    }

    /// 1-3 stars for a win, 0 otherwise.
    pub fn star_rating(&self) -> u8 {
        if self.player_won() {
            self.level.star_rating(self.history.len())
        } else {
            0
        }
    }

    #[cfg(test)]
    pub(crate) fn set_secret_code(&mut self, code: Vec<usize>) {
        self.secret_code = code;
    }
}
