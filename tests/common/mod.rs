use match3_core::{Board, ColorToken};

/// Build a board from one string per row, top to bottom.
///
/// Cell letters: `R`uby, `A`mber, `E`merald, `S`apphire, `V`iolet, and `.`
/// for an empty cell.
pub fn parse_board(rows: &[&str]) -> Board {
    let height = rows.len() as u8;
    let width = rows.first().map_or(0, |row| row.len()) as u8;
    let mut board = Board::new(width, height);

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width as usize, "ragged row {}", y);
        for (x, ch) in row.chars().enumerate() {
            let cell = match ch {
                'R' => Some(ColorToken::Ruby),
                'A' => Some(ColorToken::Amber),
                'E' => Some(ColorToken::Emerald),
                'S' => Some(ColorToken::Sapphire),
                'V' => Some(ColorToken::Violet),
                '.' => None,
                other => panic!("unknown cell letter {:?}", other),
            };
            board.set(x as u8, y as u8, cell);
        }
    }
    board
}
