use std::io::Write;

use crate::cursor;
use crate::error::Result;
use crate::geometry::Size;

/// The engine's believed absolute cursor location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: u16,
    pub y: u16,
}

/// Character-grid surface owning the terminal dimensions and cursor state.
///
/// Every positioned write reconciles the stored cursor before emitting an
/// absolute positioning sequence, so repeated writes never drift from the
/// terminal's actual cursor. Writing is generic over `io::Write` so tests
/// capture the emitted bytes in a `Vec<u8>`.
pub struct Canvas<W: Write> {
    out: W,
    size: Size,
    position: CursorPosition,
}

impl<W: Write> Canvas<W> {
    pub fn new(out: W, size: Size) -> Self {
        Self {
            out,
            size,
            position: CursorPosition::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> CursorPosition {
        self.position
    }

    /// Replace the tracked dimensions after a resize notification.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.position.x = self.position.x.min(size.width);
        self.position.y = self.position.y.min(size.height);
    }

    /// Move to an absolute cell. Omitted axes keep their stored value;
    /// out-of-range requests clamp silently to the nearest edge.
    pub fn set_cursor(&mut self, x: Option<u16>, y: Option<u16>) -> Result<()> {
        let x = x.unwrap_or(self.position.x).min(self.size.width);
        let y = y.unwrap_or(self.position.y).min(self.size.height);
        self.position = CursorPosition { x, y };
        self.out
            .write_all(cursor::move_to(y + 1, x + 1).as_bytes())?;
        Ok(())
    }

    /// Home the cursor and zero the stored position.
    pub fn reset_cursor(&mut self) -> Result<()> {
        self.out.write_all(cursor::home().as_bytes())?;
        self.position = CursorPosition::default();
        Ok(())
    }

    /// Raw write. The stored cursor intentionally does not advance; callers
    /// position explicitly before every row.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Erase the whole screen without moving the cursor.
    pub fn clear(&mut self) -> Result<()> {
        self.out.write_all(cursor::clear_screen().as_bytes())?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.out.write_all(cursor::hide().as_bytes())?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        self.out.write_all(cursor::show().as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// The underlying writer, mainly for inspecting captured test output.
    pub fn writer(&self) -> &W {
        &self.out
    }
}
