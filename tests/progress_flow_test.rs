//! Integration test: finished games flowing into progress and statistics

use mastermind_hd::{
    GameRecord, JsonFileStore, LevelCatalog, MastermindError, MemoryStore, ProgressStore,
    PuzzleEngine, StatsStore,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("mastermind-flow-{}", std::process::id()))
        .join(name)
}

/// Win `level` by brute force over the catalog engine, returning the stars earned.
fn win_level(n: u32, seed: u64) -> (u8, GameRecord) {
    let level = LevelCatalog::new().get_level(n).unwrap().clone();
    let num_colors = level.num_colors();
    let len = level.code_length();
    let mut engine = PuzzleEngine::with_rng(level, ChaCha8Rng::seed_from_u64(seed));

    // Learn the code from a throwaway copy that runs out of turns
    let mut twin = engine.clone();
    while !twin.is_game_over() {
        twin.make_guess(&vec![num_colors - 1; len]).unwrap();
    }
    let secret = twin.secret_code().unwrap().to_vec();

    engine.make_guess(&secret).unwrap();
    assert!(engine.player_won());
    (engine.star_rating(), GameRecord::from_engine(&engine).unwrap())
}

#[test]
fn test_completing_levels_unlocks_the_next() {
    let mut progress = ProgressStore::new(MemoryStore::new()).unwrap();
    let mut stats = StatsStore::new(MemoryStore::new());

    for n in 1..=3 {
        assert!(progress.is_level_unlocked(n));
        let (stars, record) = win_level(n, u64::from(n));
        assert_eq!(stars, 3);
        progress.complete_level(n, stars).unwrap();
        stats.record_game(record).unwrap();
    }

    assert_eq!(progress.highest_unlocked_level(), 4);
    assert_eq!(progress.total_levels_completed(), 3);
    assert_eq!(progress.total_stars(), 9);
    assert_eq!(stats.games_won(), 3);
    assert_eq!(stats.perfect_games(), 3);
    assert_eq!(stats.current_streak(), 3);
}

#[test]
fn test_best_stars_are_monotonic() {
    let mut progress = ProgressStore::new(MemoryStore::new()).unwrap();
    progress.unlock_level(5).unwrap();
    progress.complete_level(5, 1).unwrap();
    progress.complete_level(5, 2).unwrap();
    assert_eq!(progress.level_stars(5), 2);
    assert!(progress.is_level_unlocked(6));
    progress.complete_level(5, 1).unwrap();
    assert_eq!(progress.level_stars(5), 2);
}

#[test]
fn test_invalid_stars_change_nothing() {
    let mut progress = ProgressStore::new(MemoryStore::new()).unwrap();
    let before = progress.store().clone();
    assert!(matches!(
        progress.complete_level(1, 5),
        Err(MastermindError::StarsOutOfRange(5))
    ));
    assert_eq!(progress.store(), &before);
}

#[test]
fn test_progress_survives_reopen() {
    let path = temp_path("progress.json");
    fs::remove_file(&path).ok();

    {
        let mut progress = ProgressStore::new(JsonFileStore::open(&path)).unwrap();
        progress.set_music_enabled(false).unwrap();
        progress.complete_level(1, 3).unwrap();
        progress.complete_level(2, 2).unwrap();
    }

    let progress = ProgressStore::new(JsonFileStore::open(&path)).unwrap();
    assert_eq!(progress.highest_unlocked_level(), 3);
    assert_eq!(progress.level_stars(1), 3);
    assert_eq!(progress.level_stars(2), 2);
    assert!(progress.is_level_completed(2));
    assert!(!progress.is_music_enabled());
    assert!(progress.is_sound_enabled());

    fs::remove_file(path).ok();
}

#[test]
fn test_stats_survive_reopen() {
    let path = temp_path("stats.json");
    fs::remove_file(&path).ok();

    {
        let mut stats = StatsStore::new(JsonFileStore::open(&path));
        let (_, record) = win_level(4, 1);
        stats.record_game(record).unwrap();
    }

    let stats = StatsStore::new(JsonFileStore::open(&path));
    assert_eq!(stats.total_games(), 1);
    assert_eq!(stats.games_won(), 1);
    assert_eq!(stats.total_moves(), 1);

    fs::remove_file(path).ok();
}
