//! Cursor movement for keyboard navigation over the card grid.

use crossterm::event::KeyCode;

/// Number of grid columns for a deck of `len` cards.
pub fn columns(len: usize) -> usize {
    if len > 16 { 6 } else { 4 }
}

/// Moves the cursor based on arrow keys, staying on the grid.
pub fn move_cursor(cursor: usize, key: KeyCode, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let cols = columns(len);
    match key {
        KeyCode::Right if cursor % cols + 1 < cols && cursor + 1 < len => cursor + 1,
        KeyCode::Left if cursor % cols > 0 => cursor - 1,
        KeyCode::Down if cursor + cols < len => cursor + cols,
        KeyCode::Up if cursor >= cols => cursor - cols,
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns() {
        assert_eq!(columns(12), 4);
        assert_eq!(columns(16), 4);
        assert_eq!(columns(24), 6);
    }

    #[test]
    fn test_cursor_stays_in_row() {
        assert_eq!(move_cursor(3, KeyCode::Right, 12), 3);
        assert_eq!(move_cursor(4, KeyCode::Left, 12), 4);
        assert_eq!(move_cursor(2, KeyCode::Right, 12), 3);
    }

    #[test]
    fn test_cursor_moves_between_rows() {
        assert_eq!(move_cursor(1, KeyCode::Down, 12), 5);
        assert_eq!(move_cursor(9, KeyCode::Down, 12), 9);
        assert_eq!(move_cursor(5, KeyCode::Up, 12), 1);
        assert_eq!(move_cursor(1, KeyCode::Up, 12), 1);
    }
}
