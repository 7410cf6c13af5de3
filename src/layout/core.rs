use crate::error::{DashboardError, Result};
use crate::geometry::{Rect, Size};

/// Row carrying the centered title.
pub const TITLE_ROW: u16 = 0;
/// Row carrying the host identity / uptime banner.
pub const STATUS_ROW: u16 = 2;
/// First row of the box frames.
pub const BOX_TOP_ROW: u16 = 3;

/// Each box needs borders plus at least one interior row; together with the
/// header rows this is the smallest screen the dashboard can draw on.
const MIN_WIDTH: u16 = 12;
const MIN_HEIGHT: u16 = BOX_TOP_ROW + 3;

/// The fixed dashboard arrangement: title row, status row, and two
/// side-by-side boxes of half the terminal width filling the rest of the
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title_row: u16,
    pub status_row: u16,
    pub left: Rect,
    pub right: Rect,
}

/// Solve the layout for a terminal size.
pub fn solve(size: Size) -> Result<ScreenLayout> {
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        return Err(DashboardError::TerminalTooSmall {
            width: size.width,
            height: size.height,
        });
    }

    let box_width = size.width / 2;
    let box_height = size.height - BOX_TOP_ROW;
    Ok(ScreenLayout {
        title_row: TITLE_ROW,
        status_row: STATUS_ROW,
        left: Rect::new(0, BOX_TOP_ROW, box_width, box_height),
        right: Rect::new(box_width, BOX_TOP_ROW, box_width, box_height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_share_the_width() {
        let layout = solve(Size::new(80, 24)).unwrap();
        assert_eq!(layout.left, Rect::new(0, 3, 40, 21));
        assert_eq!(layout.right, Rect::new(40, 3, 40, 21));
    }

    #[test]
    fn odd_width_leaves_the_spare_column_untouched() {
        let layout = solve(Size::new(81, 24)).unwrap();
        assert_eq!(layout.left.width, 40);
        assert_eq!(layout.right.x, 40);
        assert_eq!(layout.right.right(), 80);
    }

    #[test]
    fn boxes_reach_the_bottom_row() {
        let layout = solve(Size::new(100, 40)).unwrap();
        assert_eq!(layout.left.bottom(), 40);
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        assert!(matches!(
            solve(Size::new(8, 4)),
            Err(DashboardError::TerminalTooSmall { .. })
        ));
    }
}
