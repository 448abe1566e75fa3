use std::ops::Range;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Indices of the cards that fit in `capacity` slots while keeping `selected`
/// on screen. The window sticks to the top until the selection runs past it.
pub(crate) fn visible_window(selected: usize, len: usize, capacity: usize) -> Range<usize> {
    if len == 0 || capacity == 0 {
        return 0..0;
    }
    let mut start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    if start + capacity > len {
        start = len.saturating_sub(capacity);
    }
    start..(start + capacity).min(len)
}

/// Move `current` by `offset` inside `0..len`, saturating at both ends.
pub(crate) fn step_within(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(offset).min(len - 1)
}

pub(crate) fn key_hint(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 10, 3), 0..3);
        assert_eq!(visible_window(2, 10, 3), 0..3);
        assert_eq!(visible_window(5, 10, 3), 3..6);
        assert_eq!(visible_window(9, 10, 3), 7..10);
    }

    #[test]
    fn window_covers_short_lists() {
        assert_eq!(visible_window(1, 2, 5), 0..2);
        assert_eq!(visible_window(0, 0, 5), 0..0);
    }

    #[test]
    fn step_saturates() {
        assert_eq!(step_within(0, -1, 4), 0);
        assert_eq!(step_within(3, 1, 4), 3);
        assert_eq!(step_within(1, 1, 4), 2);
        assert_eq!(step_within(5, 0, 0), 0);
    }
}
