//! Generator module - no-initial-match board fill
//!
//! Fills a board in row-major order, redrawing any colour that would complete
//! a run of three with the two cells to the left or the two cells above.
//! Earlier cells are already run-free, so the local check is sufficient for a
//! globally run-free board. With at least three colours a legal draw always
//! exists (at most two colours are excluded per cell), so the fill is total;
//! smaller palettes are rejected up front as [`EngineError::InsufficientPalette`].

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::types::{ColorToken, EngineError, Pos, COLOR_RETRY_LIMIT, MIN_PALETTE};

/// Validate a palette size against the engine's limits
pub fn validate_palette(size: usize) -> Result<(), EngineError> {
    if size < MIN_PALETTE || size > ColorToken::ALL.len() {
        return Err(EngineError::InsufficientPalette { size });
    }
    Ok(())
}

/// Draw a uniformly random colour from the first `palette_size` colours
pub fn draw_color(rng: &mut SimpleRng, palette_size: usize) -> ColorToken {
    ColorToken::ALL[rng.next_range(palette_size as u32) as usize]
}

/// Draw a colour avoiding up to two excluded ones
///
/// Random redraws first; if the retry budget runs out, a linear probe from a
/// random offset finds a legal colour deterministically. The probe cannot
/// fail with a validated palette, but degrades to a plain draw rather than
/// panicking.
fn draw_color_avoiding(
    rng: &mut SimpleRng,
    palette_size: usize,
    excluded: [Option<ColorToken>; 2],
) -> ColorToken {
    for _ in 0..COLOR_RETRY_LIMIT {
        let color = draw_color(rng, palette_size);
        if !excluded.contains(&Some(color)) {
            return color;
        }
    }

    let start = rng.next_range(palette_size as u32) as usize;
    for i in 0..palette_size {
        let color = ColorToken::ALL[(start + i) % palette_size];
        if !excluded.contains(&Some(color)) {
            return color;
        }
    }
    // Unreachable with palette_size >= MIN_PALETTE
    ColorToken::ALL[start]
}

/// Colour that `pos` must avoid to not complete a run with the two cells
/// in the given direction, if both share one colour
fn run_exclusion(board: &Board, pos: Pos, dx: i16, dy: i16) -> Option<ColorToken> {
    let x1 = pos.x as i16 + dx;
    let y1 = pos.y as i16 + dy;
    let x2 = pos.x as i16 + 2 * dx;
    let y2 = pos.y as i16 + 2 * dy;
    if x2 < 0 || y2 < 0 {
        return None;
    }
    let near = board.get(x1 as u8, y1 as u8)??;
    let far = board.get(x2 as u8, y2 as u8)??;
    (near == far).then_some(near)
}

/// Produce a board with zero pre-existing runs of three or more
pub fn generate(
    width: u8,
    height: u8,
    palette_size: usize,
    rng: &mut SimpleRng,
) -> Result<Board, EngineError> {
    validate_palette(palette_size)?;

    let mut board = Board::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let pos = Pos::new(x, y);
            let excluded = [
                run_exclusion(&board, pos, -1, 0),
                run_exclusion(&board, pos, 0, -1),
            ];
            let color = draw_color_avoiding(rng, palette_size, excluded);
            board.set(x, y, Some(color));
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::find_matches;
    use crate::types::Difficulty;

    #[test]
    fn test_generated_board_is_full() {
        let mut rng = SimpleRng::new(42);
        let board = generate(6, 9, 5, &mut rng).unwrap();
        assert!(board.is_full());
    }

    #[test]
    fn test_generated_board_has_no_matches() {
        for seed in 0..100 {
            let mut rng = SimpleRng::new(seed);
            let board = generate(6, 9, 5, &mut rng).unwrap();
            assert!(
                find_matches(&board).is_empty(),
                "seed {} produced a board with an initial match",
                seed
            );
        }
    }

    #[test]
    fn test_minimum_palette_still_generates_clean_boards() {
        // Three colours is the tightest legal configuration
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let board = generate(7, 10, 3, &mut rng).unwrap();
            assert!(board.is_full());
            assert!(find_matches(&board).is_empty());
        }
    }

    #[test]
    fn test_all_difficulty_presets_generate() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let (w, h) = difficulty.dimensions();
            let mut rng = SimpleRng::new(9);
            let board = generate(w, h, 5, &mut rng).unwrap();
            assert_eq!(board.width(), w);
            assert_eq!(board.height(), h);
        }
    }

    #[test]
    fn test_insufficient_palette_rejected() {
        let mut rng = SimpleRng::new(1);
        for size in [0, 1, 2] {
            assert_eq!(
                generate(6, 8, size, &mut rng),
                Err(EngineError::InsufficientPalette { size })
            );
        }
    }

    #[test]
    fn test_oversized_palette_rejected() {
        let mut rng = SimpleRng::new(1);
        let size = ColorToken::ALL.len() + 1;
        assert_eq!(
            generate(6, 8, size, &mut rng),
            Err(EngineError::InsufficientPalette { size })
        );
    }

    #[test]
    fn test_same_seed_same_board() {
        let board1 = generate(6, 9, 5, &mut SimpleRng::new(777)).unwrap();
        let board2 = generate(6, 9, 5, &mut SimpleRng::new(777)).unwrap();
        assert_eq!(board1, board2);
    }

    #[test]
    fn test_draw_color_respects_palette_prefix() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..200 {
            let color = draw_color(&mut rng, 3);
            assert!(color.index() < 3);
        }
    }
}
