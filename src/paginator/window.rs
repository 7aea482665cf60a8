//! Page-window arithmetic.

use crate::error::{Error, Result};

/// Inclusive range of page-selector indices rendered around the
/// current page. `end < start` encodes the empty window (no pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: i64,
    pub end: i64,
}

impl PageWindow {
    /// True when the window covers more than one page; selectors are
    /// only rendered in that case.
    pub fn spans_multiple(&self) -> bool {
        self.end > self.start
    }

    /// Number of selector indices in the window.
    pub fn width(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }
}

/// Computes the selector range to display around `target_index`.
///
/// When every page fits (`total_pages <= max_visible`) the window is
/// the full range, and a target outside `[0, total_pages]` is a caller
/// contract violation reported as [`Error::OutOfRange`], never
/// clamped. Otherwise the window of width `max_visible` is centered on
/// the target and pinned at the edges. Pinning at the trailing edge
/// yields a window one wider than `max_visible`; selector layouts
/// depend on this exact shape.
pub fn compute_window(
    target_index: usize,
    total_pages: usize,
    max_visible: usize,
) -> Result<PageWindow> {
    // If there aren't enough pages, show all of them.
    if total_pages <= max_visible {
        if target_index > total_pages {
            return Err(Error::OutOfRange(format!(
                "index ({target_index}) must be between (0) and ({total_pages})"
            )));
        }
        return Ok(PageWindow {
            start: 0,
            end: total_pages as i64 - 1,
        });
    }

    // Symmetric window around the target...
    let side = (max_visible / 2) as i64;
    let mut start = target_index as i64 - side;
    let mut end = target_index as i64 + side;

    // ...pinned at the borders.
    if start < 0 {
        start = 0;
        end = max_visible as i64 - 1;
    }
    if end > total_pages as i64 - 1 {
        start = total_pages as i64 - max_visible as i64 - 1;
        end = total_pages as i64 - 1;
    }

    Ok(PageWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_case_shows_every_page() {
        // Any in-range target yields the full range.
        for target in 0..=3 {
            let window = compute_window(target, 3, 5).unwrap();
            assert_eq!(window, PageWindow { start: 0, end: 2 });
        }
    }

    #[test]
    fn test_small_case_rejects_out_of_range_target() {
        let err = compute_window(4, 3, 5).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn test_zero_pages_yields_empty_window() {
        let window = compute_window(0, 0, 5).unwrap();
        assert_eq!(window, PageWindow { start: 0, end: -1 });
        assert!(!window.spans_multiple());
        assert_eq!(window.width(), 0);
    }

    #[test]
    fn test_centered_window_has_requested_width() {
        let window = compute_window(5, 10, 5).unwrap();
        assert_eq!(window, PageWindow { start: 3, end: 7 });
        assert_eq!(window.width(), 5);
    }

    #[test]
    fn test_leading_edge_pins_to_front() {
        for target in 0..=2 {
            let window = compute_window(target, 10, 5).unwrap();
            assert_eq!(window, PageWindow { start: 0, end: 4 });
        }
    }

    #[test]
    fn test_trailing_edge_is_one_wider() {
        // Pinning at the tail widens the window to max_visible + 1.
        let window = compute_window(9, 10, 5).unwrap();
        assert_eq!(window, PageWindow { start: 4, end: 9 });
        assert_eq!(window.width(), 6);
    }

    #[test]
    fn test_width_invariant_across_targets() {
        for target in 0..10 {
            let window = compute_window(target, 10, 5).unwrap();
            let width = window.width();
            if target >= 8 {
                assert_eq!(width, 6, "target {target}");
            } else {
                assert_eq!(width, 5, "target {target}");
            }
        }
    }

    #[test]
    fn test_single_page_window_does_not_span() {
        let window = compute_window(0, 1, 5).unwrap();
        assert_eq!(window, PageWindow { start: 0, end: 0 });
        assert!(!window.spans_multiple());
    }
}
