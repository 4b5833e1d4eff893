use terminal_size::{terminal_size, Width};

const MAX_DIVIDER_WIDTH: usize = 80;

/// A horizontal rule sized to the terminal, capped at 80 columns.
pub fn divider() -> String {
    let width = terminal_size()
        .map_or(MAX_DIVIDER_WIDTH, |(Width(w), _)| usize::from(w))
        .clamp(10, MAX_DIVIDER_WIDTH);
    "=".repeat(width)
}
