use std::io::Write;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::layout::ScreenLayout;
use crate::probe::HostIdentity;
use crate::style;
use crate::width;

/// Single-line title plus the host/uptime status banner. Redrawn on its own
/// interval, independent of any box refresh.
pub struct Header {
    title: String,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the centered title and the full-width status line.
    pub fn draw<W: Write>(
        &self,
        canvas: &mut Canvas<W>,
        layout: &ScreenLayout,
        host: &HostIdentity,
        uptime_secs: u64,
    ) -> Result<()> {
        let columns = canvas.size().width as usize;

        let title_x = columns.saturating_sub(width::display_width(&self.title)) / 2;
        canvas.set_cursor(Some(title_x as u16), Some(layout.title_row))?;
        canvas.write(&format!("{}{}{}", style::BOLD, self.title, style::RESET))?;

        let status = compose_status(host, uptime_secs, columns);
        canvas.set_cursor(Some(0), Some(layout.status_row))?;
        canvas.write(&format!("{}{status}{}", style::BOLD, style::RESET))?;
        Ok(())
    }
}

/// Host identity left-aligned, uptime right-aligned, the gap between them
/// filled with spaces so the line spans exactly `columns` cells.
pub fn compose_status(host: &HostIdentity, uptime_secs: u64, columns: usize) -> String {
    let left = format!(" Server: {} ({})", host.hostname, host.platform);
    let right = format!("Uptime: {} ", format_uptime(uptime_secs));
    let gap = columns.saturating_sub(width::display_width(&left) + width::display_width(&right));
    let line = format!("{left}{}{right}", " ".repeat(gap));
    width::fit(&line, columns)
}

/// Decompose seconds into zero-padded `DDd HHh MMm SSs`.
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{days:02}d {hours:02}h {minutes:02}m {seconds:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout;
    use crate::width::display_width;

    fn host() -> HostIdentity {
        HostIdentity {
            hostname: "atlas".to_string(),
            platform: "Linux".to_string(),
        }
    }

    #[test]
    fn uptime_fields_are_zero_padded() {
        assert_eq!(format_uptime(0), "00d 00h 00m 00s");
        assert_eq!(format_uptime(90_061), "01d 01h 01m 01s");
        assert_eq!(format_uptime(59 + 59 * 60 + 23 * 3_600), "00d 23h 59m 59s");
    }

    #[test]
    fn status_line_spans_exactly_the_terminal_width() {
        for columns in [40, 67, 80, 120] {
            let status = compose_status(&host(), 3_725, columns);
            assert_eq!(display_width(&status), columns);
        }
    }

    #[test]
    fn status_line_pins_identity_left_and_uptime_right() {
        let status = compose_status(&host(), 0, 80);
        assert!(status.starts_with(" Server: atlas (Linux)"));
        assert!(status.ends_with("Uptime: 00d 00h 00m 00s "));
    }

    #[test]
    fn overlong_identity_still_fits_the_width() {
        let long = HostIdentity {
            hostname: "a".repeat(90),
            platform: "Linux".to_string(),
        };
        assert_eq!(display_width(&compose_status(&long, 0, 60)), 60);
    }

    #[test]
    fn title_is_centered() {
        let header = Header::new("Hostwatch");
        let layout = layout::solve(Size::new(80, 24)).unwrap();
        let mut canvas = Canvas::new(Vec::new(), Size::new(80, 24));
        header.draw(&mut canvas, &layout, &host(), 0).unwrap();
        let out = String::from_utf8(canvas.writer().clone()).unwrap();
        // (80 - 9) / 2 = 35 -> column 36 on the wire, row 1.
        assert!(out.starts_with("\x1b[1;36H"));
        assert!(out.contains("Hostwatch"));
    }
}
