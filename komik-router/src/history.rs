use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryMode {
    /// Adds a new entry.
    Push,
    /// Overwrites the current entry.
    Replace,
}

/// The persisted, bookmarkable location store.
pub trait History {
    fn current(&self) -> Option<&str>;

    fn push(&mut self, entry: String);

    fn replace(&mut self, entry: String);

    /// Moves one entry back and returns it.
    fn back(&mut self) -> Option<String>;

    /// Moves one entry forward and returns it.
    fn forward(&mut self) -> Option<String>;

    fn record(&mut self, entry: String, mode: HistoryMode) {
        match mode {
            HistoryMode::Push => self.push(entry),
            HistoryMode::Replace => self.replace(entry),
        }
    }
}

/// Session history kept in memory, with browser-like back/forward behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            entries: initial.into_iter().collect(),
            cursor: 0,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl History for MemoryHistory {
    fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    fn push(&mut self, entry: String) {
        if self.entries.is_empty() {
            self.entries.push(entry);
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        debug!("history push, {} entries", self.entries.len());
    }

    fn replace(&mut self, entry: String) {
        match self.entries.get_mut(self.cursor) {
            Some(current) => *current = entry,
            None => self.entries.push(entry),
        }
    }

    fn back(&mut self) -> Option<String> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.current().map(ToString::to_string)
    }

    fn forward(&mut self) -> Option<String> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.current().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_drops_forward_entries() {
        let mut history = MemoryHistory::new(Some("home".to_string()));
        history.push("detail/a".to_string());
        history.push("reader/a-1".to_string());
        assert_eq!(history.back().as_deref(), Some("detail/a"));
        history.push("detail/b".to_string());
        assert_eq!(history.entries(), ["home", "detail/a", "detail/b"]);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn back_and_forward_stop_at_the_ends() {
        let mut history = MemoryHistory::default();
        assert_eq!(history.back(), None);
        history.push("home".to_string());
        history.push("latest".to_string());
        assert_eq!(history.back().as_deref(), Some("home"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward().as_deref(), Some("latest"));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn replace_keeps_length() {
        let mut history = MemoryHistory::default();
        history.replace("home".to_string());
        history.record("popular".to_string(), HistoryMode::Replace);
        assert_eq!(history.entries(), ["popular"]);
        assert_eq!(history.current(), Some("popular"));
    }
}
