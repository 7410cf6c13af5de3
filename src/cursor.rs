//! Terminal cursor and screen control sequences.
//!
//! These helpers wrap the raw escape codes the canvas emits so call sites do
//! not need to hand-roll them. Positioning functions return owned `String`s;
//! fixed sequences are static.

const CSI: &str = "\x1b[";

/// Move the cursor to an absolute 1-based `row` and `column`.
pub fn move_to(row: u16, column: u16) -> String {
    format!("{CSI}{row};{column}H")
}

/// Move the cursor to the top-left cell.
pub fn home() -> &'static str {
    "\x1b[H"
}

/// Erase the whole screen. The cursor does not move.
pub fn clear_screen() -> &'static str {
    "\x1b[2J"
}

/// Hide the cursor.
pub fn hide() -> &'static str {
    "\x1b[?25l"
}

/// Show the cursor.
pub fn show() -> &'static str {
    "\x1b[?25h"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_position_is_well_formed() {
        assert_eq!(move_to(3, 5), "\x1b[3;5H");
    }

    #[test]
    fn fixed_sequences() {
        assert_eq!(home(), "\x1b[H");
        assert_eq!(clear_screen(), "\x1b[2J");
        assert_eq!(hide(), "\x1b[?25l");
        assert_eq!(show(), "\x1b[?25h");
    }
}
