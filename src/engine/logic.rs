//! Secret code generation and peg scoring.

use super::Feedback;
use rand::Rng;

/// Generate a secret code of `code_length` colors drawn from `0..num_colors`.
///
/// Without duplicates each slot is redrawn until it differs from every earlier
/// slot.
///
/// # Panics
///
/// If there are no colors, or fewer colors than slots without duplicates.
/// Levels from [`crate::level::LevelBuilder::build`] never hit this.
pub fn generate_code<R: Rng>(
    num_colors: usize,
    code_length: usize,
    allow_duplicates: bool,
    rng: &mut R,
) -> Vec<usize> {
    assert!(
        num_colors > 0 && (allow_duplicates || num_colors >= code_length),
        "cannot draw {code_length} pegs from {num_colors} colors"
    );
    let mut code = Vec::with_capacity(code_length);
    while code.len() < code_length {
        let color = rng.random_range(0..num_colors);
        if !allow_duplicates && code.contains(&color) {
            continue;
        }
        code.push(color);
    }
    code
}

/// Score a guess against the secret code.
///
/// Exact matches are counted first and removed from both sides. Each remaining
/// guess color then consumes the leftmost unmatched secret slot of that color.
pub fn calculate_feedback(guess: &[usize], secret: &[usize]) -> Feedback {
    let len = guess.len().min(secret.len());
    let mut secret_used = vec![false; len];
    let mut guess_used = vec![false; len];
    let mut black_pegs = 0;
    let mut white_pegs = 0;

    // Pass 1: exact matches
    for i in 0..len {
        if guess[i] == secret[i] {
            black_pegs += 1;
            secret_used[i] = true;
            guess_used[i] = true;
        }
    }

    // Pass 2: right color, wrong slot
    for i in 0..len {
        if guess_used[i] {
            continue;
        }
        if let Some(j) = (0..len).find(|&j| !secret_used[j] && secret[j] == guess[i]) {
            white_pegs += 1;
            secret_used[j] = true;
        }
    }

    Feedback::new(black_pegs, white_pegs)
}
