//! Integration test: playing catalog levels through the puzzle engine

use mastermind_hd::engine::calculate_feedback;
use mastermind_hd::{ErrorKind, Feedback, GameStatus, LevelCatalog, PuzzleEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine_for_level(n: u32, seed: u64) -> PuzzleEngine<ChaCha8Rng> {
    let catalog = LevelCatalog::new();
    let level = catalog.get_level(n).unwrap().clone();
    PuzzleEngine::with_rng(level, ChaCha8Rng::seed_from_u64(seed))
}

/// A guess that can never match: every slot uses a color absent from the secret,
/// or when every color is present, the secret rotated by one.
fn losing_guess(secret: &[usize], num_colors: usize) -> Vec<usize> {
    match (0..num_colors).find(|c| !secret.contains(c)) {
        Some(absent) => vec![absent; secret.len()],
        None => {
            let mut rotated = secret.to_vec();
            rotated.rotate_left(1);
            rotated
        }
    }
}

/// Solve by enumerating every code consistent with the feedback so far.
fn solve(engine: &mut PuzzleEngine<ChaCha8Rng>) {
    let num_colors = engine.level().num_colors();
    let len = engine.level().code_length();
    let total = num_colors.pow(len as u32);
    let duplicates = engine.level().allows_duplicates();
    let decode = |mut idx: usize| {
        let mut code = vec![0; len];
        for slot in code.iter_mut() {
            *slot = idx % num_colors;
            idx /= num_colors;
        }
        code
    };

    while !engine.is_game_over() {
        let candidate = (0..total).map(decode).find(|code| {
            let mut distinct = code.clone();
            distinct.sort();
            distinct.dedup();
            (duplicates || distinct.len() == len)
                && engine
                    .history()
                    .iter()
                    .all(|r| calculate_feedback(&r.guess, code) == r.feedback)
        });
        engine.make_guess(&candidate.unwrap()).unwrap();
    }
}

#[test]
fn test_secret_codes_respect_level_constraints() {
    let catalog = LevelCatalog::new();
    for (seed, level) in catalog.all_levels().iter().enumerate() {
        let rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let mut engine = PuzzleEngine::with_rng(level.clone(), rng);
        // Reveal the code by exhausting the turns
        while !engine.is_game_over() {
            let guess = vec![0; level.code_length()];
            engine.make_guess(&guess).unwrap();
        }
        if engine.player_won() {
            continue;
        }
        let secret = engine.secret_code().unwrap();
        assert_eq!(secret.len(), level.code_length());
        assert!(secret.iter().all(|&c| c < level.num_colors()));
        if !level.allows_duplicates() {
            let mut sorted = secret.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), secret.len(), "level {}", level.level_number());
        }
    }
}

#[test]
fn test_make_move_returns_feedback_only_on_last_slot() {
    let mut engine = engine_for_level(10, 7);
    let len = engine.level().code_length();
    for slot in 0..len {
        let result = engine.make_move(slot % engine.level().num_colors()).unwrap();
        if slot + 1 < len {
            assert_eq!(result, None);
        } else {
            assert!(result.is_some());
        }
    }
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_solver_wins_and_earns_stars() {
    for seed in 0..5 {
        let mut engine = engine_for_level(3, seed);
        solve(&mut engine);
        assert_eq!(engine.status(), GameStatus::Won);
        let turns = engine.current_turn();
        let expected = engine.level().star_rating(turns);
        assert_eq!(engine.star_rating(), expected);
        let last = engine.feedback(turns - 1).unwrap();
        assert_eq!(last, Feedback::new(4, 0));
    }
}

#[test]
fn test_turn_exhaustion_on_catalog_level() {
    // Level 6: 10 turns, no duplicates
    let secret = secret_for_level(6, 11);

    let mut engine = engine_for_level(6, 11);
    let guess = losing_guess(&secret, 4);
    for turn in 0..10 {
        assert_eq!(engine.status(), GameStatus::InProgress, "turn {turn}");
        engine.make_guess(&guess).unwrap();
    }
    assert_eq!(engine.status(), GameStatus::Lost);
    let err = engine.make_guess(&guess).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_timed_level_expires() {
    // Level 91: 120 second limit
    let mut engine = engine_for_level(91, 3);
    let mut expired = 0;
    for _ in 0..130 {
        if engine.update_time(1.0) {
            expired += 1;
        }
    }
    assert_eq!(expired, 1);
    assert_eq!(engine.status(), GameStatus::Lost);
    assert_eq!(engine.remaining_time(), 0.0);
    assert_eq!(engine.star_rating(), 0);
}

#[test]
fn test_invalid_arguments_leave_state_unchanged() {
    let mut engine = engine_for_level(1, 5);
    engine.make_move(0).unwrap();
    let before = engine.current_guess().unwrap().to_vec();

    let err = engine.make_move(3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = engine.make_guess(&[0, 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(engine.current_guess().unwrap(), before.as_slice());
    assert_eq!(engine.current_turn(), 0);
}

#[test]
fn test_hints_match_secret() {
    // Level 1 has 5 hints
    let mut engine = engine_for_level(1, 9);
    let mut hints = Vec::new();
    while let Some(hint) = engine.use_hint() {
        hints.push(hint);
    }
    assert_eq!(hints.len(), 5);
    assert_eq!(engine.hints_remaining(), 0);

    while !engine.is_game_over() {
        engine.make_guess(&[0, 0, 0]).unwrap();
    }
    if let Some(secret) = engine.secret_code() {
        for hint in hints {
            assert_eq!(secret[hint.position], hint.color);
        }
    }
}

/// The secret a fresh engine with `seed` draws, read back from a finished twin.
fn secret_for_level(n: u32, seed: u64) -> Vec<usize> {
    let mut twin = engine_for_level(n, seed);
    let guess = vec![0; twin.level().code_length()];
    while !twin.is_game_over() {
        twin.make_guess(&guess).unwrap();
    }
    twin.secret_code().unwrap().to_vec()
}

#[test]
fn test_win_by_placing_pegs_one_at_a_time() {
    let secret = secret_for_level(2, 21);
    let mut engine = engine_for_level(2, 21);
    let len = secret.len();

    for (slot, &color) in secret.iter().enumerate() {
        let result = engine.make_move(color).unwrap();
        if slot + 1 < len {
            assert_eq!(result, None);
        } else {
            assert_eq!(result, Some(Feedback::new(len, 0)));
        }
    }
    assert_eq!(engine.status(), GameStatus::Won);
    assert_eq!(engine.current_turn(), 1);
    assert_eq!(engine.star_rating(), 3);
    let err = engine.make_move(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_whole_guess_replaces_placed_pegs() {
    let secret = secret_for_level(2, 21);
    let mut engine = engine_for_level(2, 21);
    engine.make_move(secret[0]).unwrap();
    engine.make_move(secret[1]).unwrap();

    let feedback = engine.make_guess(&secret).unwrap();
    assert!(feedback.is_win(secret.len()));
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.guess(0), Some(secret.as_slice()));
    assert_eq!(engine.status(), GameStatus::Won);
}
