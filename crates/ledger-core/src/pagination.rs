//! Page-number pagination over the ledger view with a sliding window of visible page buttons.
//!
//! The state is a small value type; every transition is a pure function returning the next
//! state, so navigation can be exercised without any rendering harness.

use serde::Serialize;

pub const DEFAULT_PAGE_WINDOW: usize = 4;

/// Navigation requests understood by [`PaginationState::reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    GoTo(usize),
    Next,
    Previous,
}

/// Result of applying a [`PageAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Moved { from: usize, to: usize },
    /// `Next` on the last page or `Previous` on the first.
    AtBoundary,
    /// The requested page is outside `1..=total_pages`; the state is left untouched.
    OutOfRange { requested: usize, total_pages: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    current_page: usize,
    total_pages: usize,
    window_width: usize,
    visible_window: Vec<usize>,
}

impl PaginationState {
    /// Initial state: page 1 with the first `min(window_width, total_pages)` pages visible.
    pub fn new(total_pages: usize, window_width: usize) -> Self {
        let window_width = window_width.max(1);
        Self {
            current_page: 1,
            total_pages,
            window_width,
            visible_window: (1..=window_width.min(total_pages)).collect(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn window_width(&self) -> usize {
        self.window_width
    }

    pub fn visible_window(&self) -> &[usize] {
        &self.visible_window
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Computes the state that follows `action` without touching `self`.
    pub fn reduce(&self, action: PageAction) -> (PaginationState, PageOutcome) {
        match action {
            PageAction::GoTo(page) => self.go_to(page),
            PageAction::Next if self.has_next() => self.go_to(self.current_page + 1),
            PageAction::Previous if self.has_previous() => self.go_to(self.current_page - 1),
            PageAction::Next | PageAction::Previous => (self.clone(), PageOutcome::AtBoundary),
        }
    }

    /// Applies `action` in place.
    pub fn apply(&mut self, action: PageAction) -> PageOutcome {
        let (next, outcome) = self.reduce(action);
        *self = next;
        outcome
    }

    /// State for a replaced ledger holding `total_pages` pages.
    ///
    /// The window is rebuilt from scratch; the current page is kept when it still exists and
    /// clamped to the last page otherwise, then the window slides to show it.
    pub fn resized(&self, total_pages: usize) -> PaginationState {
        let fresh = PaginationState::new(total_pages, self.window_width);
        if total_pages == 0 {
            return fresh;
        }
        let page = self.current_page.clamp(1, total_pages);
        fresh.go_to(page).0
    }

    fn go_to(&self, page: usize) -> (PaginationState, PageOutcome) {
        if page == 0 || page > self.total_pages {
            return (
                self.clone(),
                PageOutcome::OutOfRange {
                    requested: page,
                    total_pages: self.total_pages,
                },
            );
        }

        let mut next = self.clone();
        next.current_page = page;
        if let (Some(&first), Some(&last)) = (self.visible_window.first(), self.visible_window.last())
        {
            if page > last {
                let start = (page + 1).saturating_sub(self.window_width).max(1);
                next.visible_window = (start..=page).collect();
            } else if page < first {
                let end = (page + self.window_width - 1).min(self.total_pages);
                next.visible_window = (page..=end).collect();
            }
        }

        let outcome = PageOutcome::Moved {
            from: self.current_page,
            to: page,
        };
        (next, outcome)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(state: &mut PaginationState, actions: &[PageAction]) {
        for action in actions {
            state.apply(*action);
            if state.current_page() <= state.total_pages() {
                assert!(state.visible_window().contains(&state.current_page()));
            }
            assert_eq!(
                state.visible_window().len(),
                state.window_width().min(state.total_pages())
            );
        }
    }

    #[test]
    fn initial_window_is_capped_by_total_pages() {
        assert_eq!(PaginationState::new(10, 4).visible_window(), [1, 2, 3, 4]);
        assert_eq!(PaginationState::new(2, 4).visible_window(), [1, 2]);
        let empty = PaginationState::new(0, 4);
        assert!(empty.visible_window().is_empty());
        assert_eq!(empty.current_page(), 1);
    }

    #[test]
    fn jump_forward_slides_window_to_end_on_target() {
        let mut state = PaginationState::new(10, 4);
        let outcome = state.apply(PageAction::GoTo(7));
        assert_eq!(outcome, PageOutcome::Moved { from: 1, to: 7 });
        assert_eq!(state.visible_window(), [4, 5, 6, 7]);
    }

    #[test]
    fn jump_backward_slides_window_to_start_on_target() {
        let mut state = PaginationState::new(10, 4);
        state.apply(PageAction::GoTo(9));
        assert_eq!(state.visible_window(), [6, 7, 8, 9]);
        state.apply(PageAction::GoTo(3));
        assert_eq!(state.visible_window(), [3, 4, 5, 6]);
    }

    #[test]
    fn moves_inside_window_keep_it() {
        let mut state = PaginationState::new(10, 4);
        state.apply(PageAction::GoTo(3));
        assert_eq!(state.visible_window(), [1, 2, 3, 4]);
        state.apply(PageAction::Next);
        assert_eq!(state.current_page(), 4);
        assert_eq!(state.visible_window(), [1, 2, 3, 4]);
        state.apply(PageAction::Next);
        assert_eq!(state.visible_window(), [2, 3, 4, 5]);
    }

    #[test]
    fn revisiting_current_page_is_idempotent() {
        let mut state = PaginationState::new(10, 4);
        state.apply(PageAction::GoTo(6));
        let window = state.visible_window().to_vec();
        for _ in 0..3 {
            let current = state.current_page();
            state.apply(PageAction::GoTo(current));
            assert_eq!(state.visible_window(), window.as_slice());
        }
    }

    #[test]
    fn out_of_range_requests_are_ignored() {
        let mut state = PaginationState::new(3, 4);
        let before = state.clone();
        assert_eq!(
            state.apply(PageAction::GoTo(4)),
            PageOutcome::OutOfRange {
                requested: 4,
                total_pages: 3
            }
        );
        assert!(matches!(
            state.apply(PageAction::GoTo(0)),
            PageOutcome::OutOfRange { .. }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut state = PaginationState::new(2, 4);
        assert_eq!(state.apply(PageAction::Previous), PageOutcome::AtBoundary);
        state.apply(PageAction::Next);
        assert_eq!(state.apply(PageAction::Next), PageOutcome::AtBoundary);
        assert_eq!(state.current_page(), 2);

        let mut empty = PaginationState::new(0, 4);
        assert_eq!(empty.apply(PageAction::Next), PageOutcome::AtBoundary);
        assert_eq!(empty.apply(PageAction::Previous), PageOutcome::AtBoundary);
    }

    #[test]
    fn reduce_leaves_original_untouched() {
        let state = PaginationState::new(10, 4);
        let (next, _) = state.reduce(PageAction::GoTo(8));
        assert_eq!(state.current_page(), 1);
        assert_eq!(next.current_page(), 8);
    }

    #[test]
    fn window_invariants_hold_over_walks() {
        let mut state = PaginationState::new(12, 4);
        walk(
            &mut state,
            &[
                PageAction::Next,
                PageAction::GoTo(12),
                PageAction::Previous,
                PageAction::GoTo(1),
                PageAction::GoTo(5),
                PageAction::Next,
                PageAction::Next,
                PageAction::GoTo(2),
                PageAction::GoTo(13),
            ],
        );
    }

    #[test]
    fn resize_clamps_current_page_into_new_range() {
        let mut state = PaginationState::new(10, 4);
        state.apply(PageAction::GoTo(9));

        let shrunk = state.resized(5);
        assert_eq!(shrunk.current_page(), 5);
        assert_eq!(shrunk.total_pages(), 5);
        assert_eq!(shrunk.visible_window(), [2, 3, 4, 5]);

        let grown = shrunk.resized(20);
        assert_eq!(grown.current_page(), 5);
        assert_eq!(grown.visible_window(), [2, 3, 4, 5]);

        let early = PaginationState::new(10, 4).resized(6);
        assert_eq!(early.current_page(), 1);
        assert_eq!(early.visible_window(), [1, 2, 3, 4]);
    }

    #[test]
    fn custom_window_width_is_respected() {
        let mut state = PaginationState::new(10, 2);
        assert_eq!(state.visible_window(), [1, 2]);
        state.apply(PageAction::GoTo(5));
        assert_eq!(state.visible_window(), [4, 5]);
        assert_eq!(PaginationState::new(10, 0).window_width(), 1);
    }
}
