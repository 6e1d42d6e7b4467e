//! Level track: generation, lazy extension, completion and pass-through
//!
//! The track owns every materialized [`LevelGroup`]. Rows are anchored at
//! `base_y - index * spacing` so higher levels sit at smaller (more negative)
//! world Y. The track is logically infinite upward: rows are generated in
//! batches as the view scroll approaches the current frontier.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{AnswerTile, LevelGroup, TileState};
use crate::consts::{EXTENSION_BATCH, GROUND_Y};
use crate::questions::QuestionBank;
use crate::settings::Tuning;

/// Sequence of level rows plus their completion bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTrack {
    seed: u64,
    /// Y anchor of level 0
    base_y: f32,
    /// Vertical distance between consecutive rows
    spacing: f32,
    groups: Vec<LevelGroup>,
    /// Indices of completed levels; drives pass-through recomputation
    completed: BTreeSet<usize>,
}

impl LevelTrack {
    /// Build a track and materialize the first `initial` levels.
    pub fn new(seed: u64, bank: &QuestionBank, tuning: &Tuning, initial: usize) -> Self {
        let spacing = tuning.level_spacing();
        let player_start_y = GROUND_Y - tuning.landing_offset;
        let mut track = Self {
            seed,
            base_y: player_start_y - (spacing - 50.0),
            spacing,
            groups: Vec::with_capacity(initial),
            completed: BTreeSet::new(),
        };
        for _ in 0..initial {
            track.generate_next(bank, tuning);
        }
        track
    }

    /// Vertical anchor for a level index
    pub fn level_y(&self, index: usize) -> f32 {
        self.base_y - index as f32 * self.spacing
    }

    /// Highest level index currently materialized
    pub fn frontier(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    pub fn generated_levels(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[LevelGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&LevelGroup> {
        self.groups.get(index)
    }

    pub(crate) fn group_mut(&mut self, index: usize) -> Option<&mut LevelGroup> {
        self.groups.get_mut(index)
    }

    pub fn completed_levels(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    /// Materialize the next level row: question modulo the bank, freshly
    /// shuffled options, four tiles at the layout's slot positions.
    fn generate_next(&mut self, bank: &QuestionBank, tuning: &Tuning) {
        let index = self.groups.len();
        let item = bank.question(index);
        let options = bank.shuffled_options(index, self.seed);
        debug_assert!(options.contains(&item.correct));

        let y = self.level_y(index);
        let correct_slot = options
            .iter()
            .position(|o| *o == item.correct)
            .unwrap_or_default();
        let tiles = options
            .into_iter()
            .enumerate()
            .map(|(slot, text)| AnswerTile {
                is_correct: slot == correct_slot,
                text,
                has_been_hit: false,
                state: TileState::Unsolved,
                allow_pass_through: false,
                pos: Vec2::new(tuning.tile_slot_x(slot), y),
                width: tuning.tile_width,
                height: tuning.tile_height,
            })
            .collect();

        self.groups.push(LevelGroup {
            index,
            y,
            tiles,
            completed: false,
            correct_slot,
        });
    }

    /// Generate one batch of levels when the view top has scrolled past the
    /// frontier row. At most one batch per frontier crossing: extending moves
    /// the frontier, so the same scroll position cannot trigger again.
    pub fn extend_if_needed(
        &mut self,
        bank: &QuestionBank,
        tuning: &Tuning,
        scroll_top: f32,
    ) -> bool {
        if scroll_top >= self.level_y(self.frontier()) {
            return false;
        }
        for _ in 0..EXTENSION_BATCH {
            self.generate_next(bank, tuning);
        }
        log::debug!(
            "track extended to level {} (scroll {:.0})",
            self.frontier(),
            scroll_top
        );
        true
    }

    /// Mark a level solved and promote its row to a permanent floor.
    ///
    /// Idempotent: returns false (and changes nothing) if the level was
    /// already completed. Tiles broken before the row was solved stay
    /// destroyed rather than becoming floor.
    pub fn mark_completed(&mut self, index: usize) -> bool {
        let Some(group) = self.groups.get_mut(index) else {
            return false;
        };
        if group.completed {
            return false;
        }
        group.completed = true;
        for tile in &mut group.tiles {
            if tile.state != TileState::Destroyed {
                tile.state = TileState::SolvedFloor;
                tile.allow_pass_through = false;
            }
        }
        self.completed.insert(index);
        true
    }

    /// Recompute pass-through for every completed row from the player's
    /// current height. Row-wide: all four tiles share the flag. Called every
    /// tick because the player can cross a row boundary in either direction.
    pub fn recompute_pass_through(&mut self, player_y: f32) {
        for &index in &self.completed {
            let group = &mut self.groups[index];
            let below_row = player_y > group.y;
            for tile in &mut group.tiles {
                tile.allow_pass_through = below_row;
            }
        }
    }

    /// Completed row vertically nearest to the player, if any (the recovery
    /// target after falling behind the scroll).
    pub fn nearest_completed(&self, player_y: f32) -> Option<&LevelGroup> {
        self.completed
            .iter()
            .map(|&index| &self.groups[index])
            .min_by(|a, b| {
                let da = (player_y - a.y).abs();
                let db = (player_y - b.y).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn track() -> LevelTrack {
        LevelTrack::new(99, &QuestionBank::default(), &Tuning::desktop(), 20)
    }

    #[test]
    fn every_group_has_exactly_one_correct_tile() {
        for seed in [0, 1, 42, u64::MAX] {
            let track = LevelTrack::new(seed, &QuestionBank::default(), &Tuning::desktop(), 20);
            for group in track.groups() {
                assert_eq!(group.tiles.len(), 4);
                assert_eq!(group.tiles.iter().filter(|t| t.is_correct).count(), 1);
                assert!(group.tiles[group.correct_slot].is_correct);
            }
        }
    }

    #[test]
    fn rows_rise_with_index_at_fixed_spacing() {
        let track = track();
        let spacing = Tuning::desktop().level_spacing();
        for pair in track.groups().windows(2) {
            assert!((pair[0].y - pair[1].y - spacing).abs() < 1e-3);
        }
        assert_eq!(track.groups()[0].y, track.level_y(0));
    }

    #[test]
    fn questions_wrap_past_the_bank_length() {
        let bank = QuestionBank::default();
        let track = track();
        for level in 15..20 {
            let wrapped = &bank.question(level - 15).correct;
            assert_eq!(&track.groups()[level].correct_tile().text, wrapped);
        }
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut track = track();
        assert!(track.mark_completed(3));
        assert!(track.groups()[3].completed);
        assert!(
            track.groups()[3]
                .tiles
                .iter()
                .all(|t| t.is_solid_platform())
        );
        assert!(!track.mark_completed(3));
        assert!(track.groups()[3].completed);
        assert_eq!(track.completed_levels().len(), 1);
    }

    #[test]
    fn destroyed_tiles_are_not_promoted_to_floor() {
        let mut track = track();
        let wrong_slot = (track.groups()[0].correct_slot + 1) % 4;
        track.group_mut(0).unwrap().tiles[wrong_slot].state = TileState::Destroyed;
        track.mark_completed(0);
        assert!(track.groups()[0].tiles[wrong_slot].is_destroyed());
        assert!(!track.groups()[0].tiles[wrong_slot].is_solid_platform());
    }

    #[test]
    fn extension_runs_once_per_frontier_crossing() {
        let mut track = track();
        let bank = QuestionBank::default();
        let tuning = Tuning::desktop();
        let crossing = track.level_y(track.frontier()) - 1.0;

        assert!(track.extend_if_needed(&bank, &tuning, crossing));
        assert_eq!(track.generated_levels(), 25);
        // Same scroll position: frontier moved, no second batch
        assert!(!track.extend_if_needed(&bank, &tuning, crossing));
        assert_eq!(track.generated_levels(), 25);
    }

    #[test]
    fn nearest_completed_picks_vertical_distance() {
        let mut track = track();
        track.mark_completed(2);
        track.mark_completed(8);
        let near_row_2 = track.level_y(3);
        let nearest = track.nearest_completed(near_row_2).unwrap();
        assert_eq!(nearest.index, 2);
        assert!(track.nearest_completed(0.0).is_some());
    }

    #[test]
    fn nearest_completed_is_none_without_completions() {
        assert!(track().nearest_completed(100.0).is_none());
    }

    proptest! {
        #[test]
        fn pass_through_tracks_player_height(player_y in -6000.0f32..1000.0) {
            let mut track = track();
            track.mark_completed(0);
            track.mark_completed(5);
            // Stale flags from a previous position must be overwritten
            track.recompute_pass_through(-10_000.0);
            track.recompute_pass_through(player_y);
            for &index in track.completed_levels() {
                let group = &track.groups()[index];
                for tile in &group.tiles {
                    prop_assert_eq!(tile.allow_pass_through, player_y > group.y);
                }
            }
        }
    }
}
