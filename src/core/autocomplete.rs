//! Autocomplete input behavior for the branch field
//!
//! A toolkit-independent state machine over a text buffer and a candidate
//! list. Candidates are uppercased at load and the buffer is uppercased on
//! every change, so prefix filtering is effectively case-insensitive.
//! Filtering starts once the buffer reaches three characters; with no match
//! the full list is shown again. Directional navigation cycles the visible
//! list and writes the selection into the buffer without re-filtering.

/// Minimum typed length before prefix filtering kicks in
const FILTER_THRESHOLD: usize = 3;

/// Uppercase coercion applied at the input boundary on every change
pub fn uppercase_input(text: &str) -> String {
    text.to_uppercase()
}

#[derive(Debug, Default)]
pub struct AutocompleteField {
    candidates: Vec<String>,
    visible: Vec<String>,
    buffer: String,
    selection: Option<usize>,
}

impl AutocompleteField {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut field = Self::default();
        field.set_candidates(candidates);
        field
    }

    /// Replace the candidate list. Entries are re-uppercased and the full
    /// list becomes visible; the typed buffer is kept.
    pub fn set_candidates<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.candidates = candidates
            .into_iter()
            .map(|c| uppercase_input(c.as_ref()))
            .collect();
        self.visible = self.candidates.clone();
    }

    /// Apply a buffer change (one keystroke's worth of text).
    ///
    /// The buffer is uppercased, the visible list recomputed and any
    /// pending selection dropped.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = uppercase_input(text);
        self.selection = None;

        if self.buffer.chars().count() < FILTER_THRESHOLD {
            self.visible = self.candidates.clone();
            return;
        }

        let matches: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| c.starts_with(&self.buffer))
            .cloned()
            .collect();
        // No match: fall back to the full list rather than an empty dropdown
        self.visible = if matches.is_empty() {
            self.candidates.clone()
        } else {
            matches
        };
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// The candidates currently offered
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Move the selection forward, wrapping at the end.
    /// Writes the selected candidate into the buffer; no-op on an empty list.
    pub fn select_next(&mut self) -> Option<&str> {
        if self.visible.is_empty() {
            return None;
        }
        let next = match self.selection {
            Some(i) => (i + 1) % self.visible.len(),
            None => 0,
        };
        self.apply_selection(next)
    }

    /// Move the selection backward, wrapping at the start
    pub fn select_prev(&mut self) -> Option<&str> {
        if self.visible.is_empty() {
            return None;
        }
        let prev = match self.selection {
            Some(0) | None => self.visible.len() - 1,
            Some(i) => i - 1,
        };
        self.apply_selection(prev)
    }

    fn apply_selection(&mut self, index: usize) -> Option<&str> {
        self.selection = Some(index);
        // Selection fills the buffer but does not re-run filtering; the
        // visible list only changes on the next text change.
        self.buffer = self.visible[index].clone();
        Some(&self.buffer)
    }
}
