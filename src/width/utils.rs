//! Terminal display width helpers.
//!
//! ANSI-aware width calculation and fitting so box rows stay aligned even
//! when colored segments are embedded in the text.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Number of characters occupied by embedded control sequences.
pub fn ansi_overhead(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_chars = String::from_utf8_lossy(&clean).chars().count();
    text.chars().count().saturating_sub(clean_chars)
}

/// Fit `text` to exactly `target` visible columns.
///
/// Shorter lines gain trailing spaces until the display width matches.
/// Longer lines are cut at a raw character budget of `target` plus the
/// characters taken up by control sequences, so a styled segment before the
/// cut is not severed mid-sequence. Sequences sitting past the cut can make
/// the first pass land wide or short of the budget; the correction loops
/// afterwards settle on the exact width, at the cost of sometimes dropping
/// a little more visible text than strictly necessary.
pub fn fit(text: &str, target: usize) -> String {
    let visible = display_width(text);
    if visible <= target {
        let mut fitted = String::with_capacity(text.len() + (target - visible));
        fitted.push_str(text);
        fitted.extend(std::iter::repeat(' ').take(target - visible));
        return fitted;
    }

    let budget = target + ansi_overhead(text);
    let mut fitted: String = text.chars().take(budget).collect();
    while display_width(&fitted) > target {
        fitted.pop();
    }
    while display_width(&fitted) < target {
        fitted.push(' ');
    }
    fitted
}
