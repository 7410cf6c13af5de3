use std::io::Write;

use blake3::Hash;

use crate::canvas::Canvas;
use crate::content::{self, Node};
use crate::error::Result;
use crate::geometry::Rect;
use crate::style;
use crate::width;

/// A bordered, independently refreshed screen region with wrap-around
/// scrolling.
///
/// The box owns the only state that survives between refresh ticks: its
/// scroll offset and the hash of each interior row as last written. Content
/// arrives fresh every tick, is flattened at unbounded depth, fitted to the
/// interior width, and windowed from the scroll offset; rows whose bytes did
/// not change since the previous tick are skipped on the wire.
pub struct ScrollingBox {
    id: String,
    rect: Rect,
    scroll_offset: usize,
    row_hashes: Vec<Option<Hash>>,
}

impl ScrollingBox {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        let mut region = Self {
            id: id.into(),
            rect,
            scroll_offset: 0,
            row_hashes: Vec::new(),
        };
        region.relayout(rect);
        region
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Adopt a new rectangle after a relayout. Scrolling restarts from the
    /// top and every row is considered stale.
    pub fn relayout(&mut self, rect: Rect) {
        self.rect = rect;
        self.scroll_offset = 0;
        self.row_hashes.clear();
        self.row_hashes
            .resize(rect.interior().height as usize, None);
    }

    /// Draw the border frame with a blank interior. Regions too small for a
    /// border render nothing.
    pub fn draw_frame<W: Write>(&self, canvas: &mut Canvas<W>) -> Result<()> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        if width < 2 || height < 2 {
            return Ok(());
        }

        let span = (width - 2) as usize;
        let magenta = style::MAGENTA;
        let reset = style::RESET;

        canvas.set_cursor(Some(x), Some(y))?;
        canvas.write(&format!("{magenta}╔{}╗{reset}", "═".repeat(span)))?;
        for row in 1..height - 1 {
            canvas.set_cursor(Some(x), Some(y + row))?;
            canvas.write(&format!(
                "{magenta}║{reset}{}{magenta}║{reset}",
                " ".repeat(span)
            ))?;
        }
        canvas.set_cursor(Some(x), Some(y + height - 1))?;
        canvas.write(&format!("{magenta}╚{}╝{reset}", "═".repeat(span)))?;
        Ok(())
    }

    /// One refresh tick: flatten the content, fit every line to the interior
    /// width, write the visible window, then advance the scroll offset.
    /// Returns the number of rows actually written.
    pub fn refresh<W: Write>(
        &mut self,
        canvas: &mut Canvas<W>,
        content: &[Node],
    ) -> Result<usize> {
        let interior = self.rect.interior();
        let rows = content::flatten(content, content::UNBOUNDED_DEPTH);
        let fitted: Vec<String> = rows
            .iter()
            .map(|row| width::fit(row, interior.width as usize))
            .collect();
        let written = self.render_window(canvas, &fitted, interior)?;
        self.advance(fitted.len(), interior.height as usize);
        Ok(written)
    }

    fn render_window<W: Write>(
        &mut self,
        canvas: &mut Canvas<W>,
        lines: &[String],
        interior: Rect,
    ) -> Result<usize> {
        let blank = " ".repeat(interior.width as usize);
        let mut written = 0;
        for row in 0..interior.height {
            let line = lines
                .get(self.scroll_offset + row as usize)
                .map(String::as_str)
                .unwrap_or(&blank);
            let hash = blake3::hash(line.as_bytes());
            let slot = row as usize;
            if self.row_hashes.get(slot).copied().flatten() == Some(hash) {
                continue;
            }
            canvas.set_cursor(Some(interior.x), Some(interior.y + row))?;
            canvas.write(&format!("{}{line}{}", style::BOLD, style::RESET))?;
            if let Some(entry) = self.row_hashes.get_mut(slot) {
                *entry = Some(hash);
            }
            written += 1;
        }
        Ok(written)
    }

    /// Advance the window one row, wrapping at the content boundary. Content
    /// that fits inside the viewport never scrolls.
    fn advance(&mut self, total_lines: usize, interior_height: usize) {
        let max_offset = total_lines.saturating_sub(interior_height);
        if self.scroll_offset >= max_offset {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn canvas() -> Canvas<Vec<u8>> {
        Canvas::new(Vec::new(), Size::new(80, 24))
    }

    fn lines(count: usize) -> Vec<Node> {
        (0..count).map(|n| Node::leaf(format!("line {n}"))).collect()
    }

    #[test]
    fn frame_positions_every_border_row() {
        let region = ScrollingBox::new("left", Rect::new(0, 3, 10, 4));
        let mut canvas = canvas();
        region.draw_frame(&mut canvas).unwrap();
        let out = String::from_utf8(canvas.writer().clone()).unwrap();
        assert!(out.contains("\x1b[4;1H"));
        assert!(out.contains('╔'));
        assert!(out.contains("\x1b[7;1H"));
        assert!(out.contains('╚'));
        assert_eq!(out.matches('║').count(), 4);
    }

    #[test]
    fn window_cycles_through_overflowing_content() {
        // Interior height 4 against 10 lines: offsets walk 0..=6 then wrap.
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 20, 6));
        let mut canvas = canvas();
        let content = lines(10);

        let mut offsets = Vec::new();
        for _ in 0..8 {
            offsets.push(region.scroll_offset());
            region.refresh(&mut canvas, &content).unwrap();
        }
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5, 6, 0]);
    }

    #[test]
    fn offset_stays_within_content_bounds() {
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 20, 6));
        let mut canvas = canvas();
        let content = lines(10);
        for _ in 0..50 {
            region.refresh(&mut canvas, &content).unwrap();
            assert!(region.scroll_offset() <= 6);
        }
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 20, 8));
        let mut canvas = canvas();
        let content = lines(3);
        for _ in 0..5 {
            region.refresh(&mut canvas, &content).unwrap();
            assert_eq!(region.scroll_offset(), 0);
        }
    }

    #[test]
    fn rows_past_the_end_render_blank() {
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 12, 5));
        let mut canvas = canvas();
        region.refresh(&mut canvas, &lines(1)).unwrap();
        let out = String::from_utf8(canvas.writer().clone()).unwrap();
        // One content row plus two blank interior rows, all fitted to width 8.
        assert!(out.contains("line 0  "));
        assert!(out.contains("        "));
    }

    #[test]
    fn unchanged_rows_are_not_rewritten() {
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 20, 8));
        let mut canvas = canvas();
        let content = lines(2);
        let first = region.refresh(&mut canvas, &content).unwrap();
        let second = region.refresh(&mut canvas, &content).unwrap();
        assert_eq!(first, 6);
        assert_eq!(second, 0);
    }

    #[test]
    fn relayout_resets_scroll_state() {
        let mut region = ScrollingBox::new("left", Rect::new(0, 3, 20, 6));
        let mut canvas = canvas();
        let content = lines(10);
        for _ in 0..3 {
            region.refresh(&mut canvas, &content).unwrap();
        }
        assert!(region.scroll_offset() > 0);
        region.relayout(Rect::new(0, 3, 30, 10));
        assert_eq!(region.scroll_offset(), 0);
    }
}
