//! Level unlocks, completions and best star ratings.

use super::store::KeyValueStore;
use crate::constants::{
    level_completed_key, level_stars_key, FIRST_LEVEL, KEY_HIGHEST_UNLOCKED, KEY_MUSIC_ENABLED,
    KEY_SOUND_ENABLED, MAX_STARS, MIN_STARS, PERFECT_TOTAL_STARS, TOTAL_LEVELS,
};
use crate::error::{MastermindError, Result};
use log::debug;

/// Player progress over the level catalog, kept in an injected [`KeyValueStore`].
///
/// Every mutating call validates first, then applies all of its writes in one
/// [`KeyValueStore::transact`], so a failed flush leaves the state untouched.
#[derive(Debug)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Wrap `store`, writing first-run defaults if it has never been initialised.
    pub fn new(mut store: S) -> Result<Self> {
        if !store.contains(KEY_HIGHEST_UNLOCKED) {
            store.transact(|s| {
                s.put_int(KEY_HIGHEST_UNLOCKED, FIRST_LEVEL as i64);
                s.put_bool(KEY_SOUND_ENABLED, true);
                s.put_bool(KEY_MUSIC_ENABLED, true);
            })?;
            debug!("Initialised fresh progress");
        }
        Ok(Self { store })
    }

    pub fn highest_unlocked_level(&self) -> u32 {
        let stored = self.store.get_int(KEY_HIGHEST_UNLOCKED, FIRST_LEVEL as i64);
        u32::try_from(stored)
            .unwrap_or(FIRST_LEVEL)
            .clamp(FIRST_LEVEL, TOTAL_LEVELS)
    }

    pub fn is_level_unlocked(&self, level: u32) -> bool {
        level <= self.highest_unlocked_level()
    }

    /// Raise the highest unlocked level to at least `level`. Never lowers it.
    pub fn unlock_level(&mut self, level: u32) -> Result<()> {
        if let Some(level) = self.unlock_target(level) {
            self.store
                .transact(|s| s.put_int(KEY_HIGHEST_UNLOCKED, i64::from(level)))?;
            debug!("Unlocked up to level {level}");
        }
        Ok(())
    }

    /// New highest unlocked level if `level` would raise it.
    fn unlock_target(&self, level: u32) -> Option<u32> {
        let level = level.min(TOTAL_LEVELS);
        (level > self.highest_unlocked_level()).then_some(level)
    }

    /// Record a win on `level` with `stars`, keeping the best rating and
    /// unlocking the following level.
    pub fn complete_level(&mut self, level: u32, stars: u8) -> Result<()> {
        if !(MIN_STARS..=MAX_STARS).contains(&stars) {
            return Err(MastermindError::StarsOutOfRange(stars));
        }
        if !(FIRST_LEVEL..=TOTAL_LEVELS).contains(&level) {
            return Err(MastermindError::LevelOutOfRange(level));
        }

        let stars_key = level_stars_key(level);
        let improved = i64::from(stars) > self.store.get_int(&stars_key, 0);
        let unlock = if level < TOTAL_LEVELS {
            self.unlock_target(level + 1)
        } else {
            None
        };
        self.store.transact(|s| {
            if improved {
                s.put_int(&stars_key, i64::from(stars));
            }
            s.put_bool(&level_completed_key(level), true);
            if let Some(next) = unlock {
                s.put_int(KEY_HIGHEST_UNLOCKED, i64::from(next));
            }
        })?;
        debug!("Completed level {level} with {stars} stars");
        Ok(())
    }

    /// Best star rating on `level`, 0 if never completed.
    pub fn level_stars(&self, level: u32) -> u8 {
        let stars = self.store.get_int(&level_stars_key(level), 0);
        u8::try_from(stars.clamp(0, i64::from(MAX_STARS))).unwrap_or(0)
    }

    pub fn is_level_completed(&self, level: u32) -> bool {
        self.store.get_bool(&level_completed_key(level), false)
    }

    pub fn total_stars(&self) -> u32 {
        (FIRST_LEVEL..=TOTAL_LEVELS)
            .map(|level| u32::from(self.level_stars(level)))
            .sum()
    }

    pub fn total_levels_completed(&self) -> u32 {
        (FIRST_LEVEL..=TOTAL_LEVELS)
            .filter(|&level| self.is_level_completed(level))
            .count() as u32
    }

    pub fn completion_percentage(&self) -> u32 {
        self.total_levels_completed() * 100 / TOTAL_LEVELS
    }

    /// Three stars on every level.
    pub fn is_perfect_completion(&self) -> bool {
        self.total_stars() == PERFECT_TOTAL_STARS
    }

    /// Forget all level progress. Sound and music settings survive.
    pub fn reset_all_progress(&mut self) -> Result<()> {
        let sound = self.is_sound_enabled();
        let music = self.is_music_enabled();

        self.store.transact(|s| {
            s.clear();
            s.put_int(KEY_HIGHEST_UNLOCKED, FIRST_LEVEL as i64);
            s.put_bool(KEY_SOUND_ENABLED, sound);
            s.put_bool(KEY_MUSIC_ENABLED, music);
        })?;
        debug!("Progress reset");
        Ok(())
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.store.get_bool(KEY_SOUND_ENABLED, true)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<()> {
        self.store
            .transact(|s| s.put_bool(KEY_SOUND_ENABLED, enabled))?;
        Ok(())
    }

    pub fn is_music_enabled(&self) -> bool {
        self.store.get_bool(KEY_MUSIC_ENABLED, true)
    }

    pub fn set_music_enabled(&mut self, enabled: bool) -> Result<()> {
        self.store
            .transact(|s| s.put_bool(KEY_MUSIC_ENABLED, enabled))?;
        Ok(())
    }

    /// Access the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::store::{FlakyStore, MemoryStore};

    fn fresh() -> ProgressStore<MemoryStore> {
        ProgressStore::new(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_fresh_progress() {
        let progress = fresh();
        assert_eq!(progress.highest_unlocked_level(), 1);
        assert!(progress.is_level_unlocked(1));
        assert!(!progress.is_level_unlocked(2));
        assert!(progress.is_sound_enabled());
        assert!(progress.is_music_enabled());
        assert_eq!(progress.total_stars(), 0);
        assert_eq!(progress.total_levels_completed(), 0);
    }

    #[test]
    fn test_existing_store_is_not_reinitialised() {
        let mut store = MemoryStore::new();
        store.put_int(KEY_HIGHEST_UNLOCKED, 7);
        store.put_bool(KEY_SOUND_ENABLED, false);
        let progress = ProgressStore::new(store).unwrap();
        assert_eq!(progress.highest_unlocked_level(), 7);
        assert!(!progress.is_sound_enabled());
    }

    #[test]
    fn test_unlock_is_monotonic() {
        let mut progress = fresh();
        progress.unlock_level(10).unwrap();
        assert_eq!(progress.highest_unlocked_level(), 10);
        progress.unlock_level(4).unwrap();
        assert_eq!(progress.highest_unlocked_level(), 10);
        progress.unlock_level(10).unwrap();
        assert_eq!(progress.highest_unlocked_level(), 10);
    }

    #[test]
    fn test_complete_level_keeps_best_stars() {
        let mut progress = fresh();
        progress.unlock_level(5).unwrap();
        progress.complete_level(5, 1).unwrap();
        assert_eq!(progress.level_stars(5), 1);

        progress.complete_level(5, 2).unwrap();
        assert_eq!(progress.level_stars(5), 2);
        assert!(progress.is_level_unlocked(6));

        progress.complete_level(5, 1).unwrap();
        assert_eq!(progress.level_stars(5), 2);
        assert!(progress.is_level_completed(5));
    }

    #[test]
    fn test_complete_level_rejects_bad_stars() {
        let mut progress = fresh();
        assert!(matches!(
            progress.complete_level(1, 0),
            Err(MastermindError::StarsOutOfRange(0))
        ));
        assert!(matches!(
            progress.complete_level(1, 4),
            Err(MastermindError::StarsOutOfRange(4))
        ));
        assert!(!progress.is_level_completed(1));
        assert_eq!(progress.highest_unlocked_level(), 1);
    }

    #[test]
    fn test_complete_level_rejects_bad_level() {
        let mut progress = fresh();
        assert!(matches!(
            progress.complete_level(101, 3),
            Err(MastermindError::LevelOutOfRange(101))
        ));
        assert_eq!(progress.total_levels_completed(), 0);
    }

    #[test]
    fn test_complete_last_level_does_not_unlock_past_end() {
        let mut progress = fresh();
        progress.unlock_level(100).unwrap();
        progress.complete_level(100, 3).unwrap();
        assert_eq!(progress.highest_unlocked_level(), 100);
    }

    #[test]
    fn test_totals_and_perfect_completion() {
        let mut progress = fresh();
        for level in 1..=100 {
            progress.complete_level(level, 3).unwrap();
        }
        assert_eq!(progress.total_levels_completed(), 100);
        assert_eq!(progress.total_stars(), 300);
        assert_eq!(progress.completion_percentage(), 100);
        assert!(progress.is_perfect_completion());
    }

    #[test]
    fn test_reset_preserves_audio_settings() {
        let mut progress = fresh();
        progress.set_sound_enabled(false).unwrap();
        progress.complete_level(1, 3).unwrap();
        progress.complete_level(2, 2).unwrap();

        progress.reset_all_progress().unwrap();
        assert_eq!(progress.highest_unlocked_level(), 1);
        assert_eq!(progress.total_stars(), 0);
        assert!(!progress.is_level_completed(1));
        assert!(!progress.is_sound_enabled());
        assert!(progress.is_music_enabled());
    }

    fn failing() -> ProgressStore<FlakyStore> {
        let mut progress = ProgressStore::new(FlakyStore::default()).unwrap();
        progress.complete_level(1, 2).unwrap();
        progress.store.fail_flush = true;
        progress
    }

    #[test]
    fn test_failed_flush_leaves_completion_unapplied() {
        let mut progress = failing();
        assert!(matches!(
            progress.complete_level(2, 3),
            Err(MastermindError::Persistence(_))
        ));
        assert!(!progress.is_level_completed(2));
        assert_eq!(progress.level_stars(2), 0);
        assert_eq!(progress.highest_unlocked_level(), 2);

        let err = progress.complete_level(1, 3).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Persistence);
        assert_eq!(progress.level_stars(1), 2);
    }

    #[test]
    fn test_failed_flush_leaves_other_writes_unapplied() {
        let mut progress = failing();
        assert!(progress.unlock_level(9).is_err());
        assert_eq!(progress.highest_unlocked_level(), 2);

        assert!(progress.set_sound_enabled(false).is_err());
        assert!(progress.is_sound_enabled());
        assert!(progress.set_music_enabled(false).is_err());
        assert!(progress.is_music_enabled());

        assert!(progress.reset_all_progress().is_err());
        assert!(progress.is_level_completed(1));
        assert_eq!(progress.total_stars(), 2);
    }

    #[test]
    fn test_failed_first_run_initialisation() {
        let store = FlakyStore {
            fail_flush: true,
            ..FlakyStore::default()
        };
        assert!(ProgressStore::new(store).is_err());
    }
}
