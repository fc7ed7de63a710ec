//! The set of host ids that can still be placed on the canvas.

use indexmap::IndexSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePool {
    candidates: IndexSet<String>,
    available: IndexSet<String>,
}

impl NodePool {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: IndexSet<String> = candidates.into_iter().map(Into::into).collect();
        Self {
            available: candidates.clone(),
            candidates,
        }
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(String::as_str)
    }

    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.available.iter().map(String::as_str)
    }

    pub fn is_available(&self, id: &str) -> bool {
        self.available.contains(id)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Removes `id` from the available set. Returns whether it was there.
    pub fn take(&mut self, id: &str) -> bool {
        self.available.shift_remove(id)
    }

    /// Puts `id` back. Known candidates return to their candidate position;
    /// anything else is appended.
    pub fn release(&mut self, id: &str) {
        if self.available.contains(id) {
            return;
        }
        if !self.candidates.contains(id) {
            self.available.insert(id.to_string());
            return;
        }
        let mut rebuilt: IndexSet<String> = IndexSet::with_capacity(self.available.len() + 1);
        for c in &self.candidates {
            if c == id || self.available.contains(c) {
                rebuilt.insert(c.clone());
            }
        }
        for extra in &self.available {
            if !self.candidates.contains(extra) {
                rebuilt.insert(extra.clone());
            }
        }
        self.available = rebuilt;
    }

    /// Makes every candidate available again.
    pub fn reset(&mut self) {
        self.available = self.candidates.clone();
    }

    /// Replaces the candidate list, e.g. after a node-list reply, and resets.
    pub fn set_candidates<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::new(candidates);
    }

    /// Full candidate list minus `ids`.
    pub fn exclude_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.reset();
        for id in ids {
            self.available.shift_remove(id);
        }
    }
}
