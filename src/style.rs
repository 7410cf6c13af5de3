//! Fixed SGR palette and threshold-colored metric formatting.
//!
//! The dashboard uses a deliberately small palette: green/yellow/red for
//! good/warn/critical readings, magenta for box borders, bold for the header
//! and box content. Every helper terminates its own styling with [`RESET`].

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

pub const RED_FILL: &str = "\x1b[47m\x1b[41m";
pub const GREEN_FILL: &str = "\x1b[47m\x1b[42m";
pub const YELLOW_FILL: &str = "\x1b[47m\x1b[43m";

/// Default cell width of [`meter`] including its brackets.
pub const METER_WIDTH: usize = 12;

/// A percentage as `xx.xx%`, colored green below 50, yellow below 80, red
/// otherwise.
pub fn percent(value: f64) -> String {
    let color = if value < 50.0 {
        GREEN
    } else if value < 80.0 {
        YELLOW
    } else {
        RED
    };
    format!("{color}{value:>5.2}%{RESET}")
}

/// A temperature as `NN°C`, colored green below 40, yellow below 60, red
/// otherwise.
pub fn temperature(celsius: f64) -> String {
    let color = if celsius < 40.0 {
        GREEN
    } else if celsius < 60.0 {
        YELLOW
    } else {
        RED
    };
    format!("{color}{:>2}°C{RESET}", celsius.round() as i64)
}

/// A bracketed utilization bar: `[####    ]` with the filled portion drawn
/// in the threshold color as a background run. `width` counts the brackets.
pub fn meter(value: f64, width: usize) -> String {
    let fill = if value < 50.0 {
        GREEN_FILL
    } else if value < 80.0 {
        YELLOW_FILL
    } else {
        RED_FILL
    };
    let cells = width.saturating_sub(2);
    let mut bar = String::from("[");
    for cell in 0..cells {
        if (cell as f64) < value / 100.0 * cells as f64 {
            bar.push_str(fill);
        } else {
            bar.push_str(RESET);
        }
        bar.push(' ');
    }
    bar.push_str(RESET);
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::display_width;

    #[test]
    fn percent_thresholds() {
        assert!(percent(12.0).starts_with(GREEN));
        assert!(percent(50.0).starts_with(YELLOW));
        assert!(percent(93.5).starts_with(RED));
        assert!(percent(93.5).ends_with(RESET));
    }

    #[test]
    fn percent_keeps_fixed_visible_width() {
        assert_eq!(display_width(&percent(5.0)), 6);
        assert_eq!(display_width(&percent(99.99)), 6);
    }

    #[test]
    fn temperature_thresholds() {
        assert!(temperature(35.2).starts_with(GREEN));
        assert!(temperature(45.0).starts_with(YELLOW));
        assert!(temperature(71.9).starts_with(RED));
    }

    #[test]
    fn meter_occupies_requested_cells() {
        for value in [0.0, 33.0, 50.0, 100.0] {
            assert_eq!(display_width(&meter(value, METER_WIDTH)), METER_WIDTH);
        }
    }

    #[test]
    fn meter_fill_grows_with_value() {
        let empty = meter(0.0, METER_WIDTH);
        let full = meter(100.0, METER_WIDTH);
        assert!(!empty.contains(GREEN_FILL));
        assert!(full.matches(RED_FILL).count() == METER_WIDTH - 2);
    }
}
