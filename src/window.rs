/// A half-open byte range `[start, end)` of the working text that is still
/// eligible for delimiter matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub disabled: bool,
}

impl Window {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            disabled: false,
        }
    }

    /// Disabled or empty windows are skipped by every pass.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.start >= self.end
    }

    fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
    }
}

/// Ordered, pairwise disjoint windows over one working text.
///
/// Every substitution made by the replacement engine is expressed through
/// [`shift_from`](Self::shift_from), [`grow`](Self::grow),
/// [`split_at`](Self::split_at) and [`disable`](Self::disable), so the
/// windows keep pointing at the same logical text while it changes length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowSet {
    windows: Vec<Window>,
}

impl WindowSet {
    /// One enabled window covering a text of `len` bytes.
    pub fn spanning(len: usize) -> Self {
        Self {
            windows: vec![Window::new(0, len)],
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Window> {
        self.windows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Add `delta` to both bounds of every window at or after `index`.
    pub fn shift_from(&mut self, index: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for window in self.windows.iter_mut().skip(index) {
            window.shift(delta);
        }
    }

    /// Move the end of the window at `index` by `delta`, after a splice inside it.
    ///
    /// Pair with [`shift_from`](Self::shift_from) on `index + 1`; the set is
    /// only consistent again once both have been applied.
    pub fn grow(&mut self, index: usize, delta: isize) {
        if let Some(window) = self.windows.get_mut(index) {
            window.end = window.end.saturating_add_signed(delta);
        }
    }

    /// Cut the window at `index` around `[match_start, match_end)`.
    ///
    /// The window keeps `[start, match_start)`, the matched range becomes a
    /// new window at `index + 1` and the remainder `[match_end, end)` follows
    /// at `index + 2`. The matched window starts out enabled; callers that
    /// want to protect it call [`disable`](Self::disable).
    pub fn split_at(&mut self, index: usize, match_start: usize, match_end: usize) {
        let Some(window) = self.windows.get_mut(index) else {
            return;
        };
        debug_assert!(
            window.start <= match_start && match_start <= match_end && match_end <= window.end,
            "split [{match_start}, {match_end}) outside {window:?}"
        );
        let old_end = window.end;
        let disabled = window.disabled;
        window.end = match_start;

        let matched = Window {
            start: match_start,
            end: match_end,
            disabled,
        };
        let rest = Window {
            start: match_end,
            end: old_end,
            disabled,
        };
        self.windows.insert(index + 1, rest);
        self.windows.insert(index + 1, matched);
        debug_assert!(self.is_consistent(), "windows out of order: {:?}", self.windows);
    }

    pub fn disable(&mut self, index: usize) {
        if let Some(window) = self.windows.get_mut(index) {
            window.disabled = true;
        }
    }

    /// Windows are ordered, disjoint and none is inverted.
    pub(crate) fn is_consistent(&self) -> bool {
        self.windows
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.end <= b.start))
            && self.windows.iter().all(|w| w.start <= w.end)
    }
}
