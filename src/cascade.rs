//! Cascade module - remove, compact, refill, re-detect until stable
//!
//! One pass removes every claimed cell, drops the survivors down their
//! columns, refills the vacated top cells with fresh random colours, and
//! re-runs detection. Refill is deliberately unconstrained (unlike initial
//! generation), so a pass may create new matches; the chain continues until
//! a re-detect comes back empty.
//!
//! Passes are exposed lazily through [`Cascade`], an iterator that performs
//! one pass per `next()` call, so a host can animate each pass before the
//! next one resolves. [`resolve`] drains the iterator for callers that only
//! want the final aggregate.

use crate::board::Board;
use crate::detector::{find_matches, matched_cell_count, MatchGroup};
use crate::generator::draw_color;
use crate::rng::SimpleRng;
use crate::types::{CELL_SCORE, MAX_CASCADE_PASSES};

/// Outcome of a single remove-compact-refill-re-detect cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePass {
    /// Groups removed this pass, in detection order
    pub removed_groups: Vec<MatchGroup>,
    /// Total cells removed this pass
    pub removed: usize,
    /// Points earned this pass
    pub score_delta: u32,
}

/// Aggregate of a fully drained cascade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub passes: Vec<CascadePass>,
    pub score_delta: u32,
    /// True when the pass cap stopped the chain early; indicates an engine
    /// bug, never a legitimate game state
    pub hit_pass_limit: bool,
}

impl CascadeOutcome {
    /// Total cells removed across all passes
    pub fn removed(&self) -> usize {
        self.passes.iter().map(|pass| pass.removed).sum()
    }
}

/// Lazy pass-by-pass cascade over a mutably borrowed board
///
/// Finite and non-restartable: once `next()` returns `None` the board is
/// stable (fully populated, no matches) and further calls keep returning
/// `None`.
pub struct Cascade<'a> {
    board: &'a mut Board,
    rng: &'a mut SimpleRng,
    palette_size: usize,
    pending: Vec<MatchGroup>,
    passes: usize,
    hit_pass_limit: bool,
}

impl<'a> Cascade<'a> {
    /// Start a cascade from an already-detected match list
    ///
    /// An empty `initial` list yields no passes.
    pub fn new(
        board: &'a mut Board,
        rng: &'a mut SimpleRng,
        palette_size: usize,
        initial: Vec<MatchGroup>,
    ) -> Self {
        Self {
            board,
            rng,
            palette_size,
            pending: initial,
            passes: 0,
            hit_pass_limit: false,
        }
    }

    /// True when the pass cap was hit before reaching a stable board
    pub fn hit_pass_limit(&self) -> bool {
        self.hit_pass_limit
    }

    fn remove(&mut self, groups: &[MatchGroup]) {
        for group in groups {
            for pos in &group.cells {
                self.board.set(pos.x, pos.y, None);
            }
        }
    }

    fn compact_and_refill(&mut self) {
        for x in 0..self.board.width() {
            let holes = self.board.compact_column(x);
            for y in 0..holes as u8 {
                let color = draw_color(self.rng, self.palette_size);
                self.board.set(x, y, Some(color));
            }
        }
    }
}

impl Iterator for Cascade<'_> {
    type Item = CascadePass;

    fn next(&mut self) -> Option<CascadePass> {
        if self.pending.is_empty() {
            return None;
        }
        if self.passes >= MAX_CASCADE_PASSES {
            debug_assert!(false, "cascade exceeded {} passes", MAX_CASCADE_PASSES);
            self.hit_pass_limit = true;
            self.pending.clear();
            return None;
        }
        self.passes += 1;

        let groups = std::mem::take(&mut self.pending);
        let removed = matched_cell_count(&groups);
        self.remove(&groups);
        self.compact_and_refill();
        self.pending = find_matches(self.board);

        Some(CascadePass {
            removed_groups: groups,
            removed,
            score_delta: removed as u32 * CELL_SCORE,
        })
    }
}

/// Drain a cascade to stability and return the aggregated outcome
pub fn resolve(
    board: &mut Board,
    rng: &mut SimpleRng,
    palette_size: usize,
    initial: Vec<MatchGroup>,
) -> CascadeOutcome {
    let mut cascade = Cascade::new(board, rng, palette_size, initial);
    let mut outcome = CascadeOutcome::default();
    for pass in &mut cascade {
        outcome.score_delta += pass.score_delta;
        outcome.passes.push(pass);
    }
    outcome.hit_pass_limit = cascade.hit_pass_limit();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorToken::*;
    use crate::types::Pos;

    #[test]
    fn test_empty_match_list_yields_no_passes() {
        let mut board = Board::new(6, 8);
        let mut rng = SimpleRng::new(5);
        let outcome = resolve(&mut board, &mut rng, 5, Vec::new());
        assert!(outcome.passes.is_empty());
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.hit_pass_limit);
    }

    #[test]
    fn test_single_pass_removes_compacts_and_refills() {
        // Bottom row matches; the two rows above have no vertical pair in
        // any column, so only the random top row could start a chain.
        let mut board = Board::from_rows(vec![
            vec![Some(Amber), Some(Emerald), Some(Sapphire)],
            vec![Some(Emerald), Some(Sapphire), Some(Amber)],
            vec![Some(Ruby), Some(Ruby), Some(Ruby)],
        ]);
        let mut rng = SimpleRng::new(11);
        let initial = find_matches(&board);
        assert_eq!(matched_cell_count(&initial), 3);

        let mut cascade = Cascade::new(&mut board, &mut rng, 5, initial);
        let pass = cascade.next().unwrap();
        drop(cascade);

        assert_eq!(pass.removed, 3);
        assert_eq!(pass.score_delta, 30);
        assert_eq!(pass.removed_groups.len(), 1);
        assert_eq!(pass.removed_groups[0].color, Ruby);

        // Survivors dropped one row, keeping their order
        assert_eq!(board.get(0, 1), Some(Some(Amber)));
        assert_eq!(board.get(1, 1), Some(Some(Emerald)));
        assert_eq!(board.get(2, 1), Some(Some(Sapphire)));
        assert_eq!(board.get(0, 2), Some(Some(Emerald)));
        assert_eq!(board.get(1, 2), Some(Some(Sapphire)));
        assert_eq!(board.get(2, 2), Some(Some(Amber)));

        // Vacated top row was refilled
        assert!(board.is_full());
    }

    #[test]
    fn test_resolve_reaches_a_stable_full_board() {
        for seed in 0..30 {
            let mut board = Board::from_rows(vec![
                vec![Some(Violet), Some(Amber), Some(Violet), Some(Emerald)],
                vec![Some(Amber), Some(Violet), Some(Emerald), Some(Violet)],
                vec![Some(Ruby), Some(Ruby), Some(Ruby), Some(Ruby)],
            ]);
            let mut rng = SimpleRng::new(seed);
            let initial = find_matches(&board);
            let outcome = resolve(&mut board, &mut rng, 5, initial);

            assert!(!outcome.hit_pass_limit, "seed {} hit the pass cap", seed);
            assert!(board.is_full());
            assert!(find_matches(&board).is_empty());
            assert_eq!(outcome.score_delta, outcome.removed() as u32 * 10);
            assert!(outcome.removed() >= 4);
        }
    }

    #[test]
    fn test_chain_passes_accumulate_score() {
        let mut board = Board::from_rows(vec![
            vec![Some(Amber), Some(Emerald), Some(Sapphire)],
            vec![Some(Emerald), Some(Sapphire), Some(Amber)],
            vec![Some(Ruby), Some(Ruby), Some(Ruby)],
        ]);
        let mut rng = SimpleRng::new(23);
        let initial = find_matches(&board);
        let outcome = resolve(&mut board, &mut rng, 5, initial);

        let summed: u32 = outcome.passes.iter().map(|p| p.score_delta).sum();
        assert_eq!(outcome.score_delta, summed);
        assert!(!outcome.passes.is_empty());
        assert_eq!(outcome.passes[0].removed, 3);
    }

    #[test]
    fn test_cascade_is_fused_after_stable() {
        let mut board = Board::from_rows(vec![
            vec![Some(Amber), Some(Emerald), Some(Sapphire)],
            vec![Some(Emerald), Some(Sapphire), Some(Amber)],
            vec![Some(Ruby), Some(Ruby), Some(Ruby)],
        ]);
        let mut rng = SimpleRng::new(31);
        let initial = find_matches(&board);
        let mut cascade = Cascade::new(&mut board, &mut rng, 5, initial);
        while cascade.next().is_some() {}
        assert_eq!(cascade.next(), None);
        assert_eq!(cascade.next(), None);
    }

    #[test]
    fn test_removed_positions_are_vacated_before_refill() {
        // Taller board: removal happens mid-column, so the cells above must
        // fall into the gap.
        let mut board = Board::from_rows(vec![
            vec![Some(Sapphire), Some(Amber), Some(Emerald)],
            vec![Some(Emerald), Some(Sapphire), Some(Amber)],
            vec![Some(Violet), Some(Violet), Some(Violet)],
            vec![Some(Amber), Some(Emerald), Some(Sapphire)],
        ]);
        let mut rng = SimpleRng::new(2);
        let initial = find_matches(&board);
        assert_eq!(
            initial[0].cells,
            vec![Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2)]
        );

        let mut cascade = Cascade::new(&mut board, &mut rng, 5, initial);
        let pass = cascade.next().unwrap();
        drop(cascade);

        assert_eq!(pass.removed, 3);
        // Bottom row untouched, rows 0..2 shifted into 1..3
        assert_eq!(board.get(0, 3), Some(Some(Amber)));
        assert_eq!(board.get(0, 1), Some(Some(Sapphire)));
        assert_eq!(board.get(0, 2), Some(Some(Emerald)));
        assert!(board.is_full());
    }
}
