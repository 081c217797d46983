use std::collections::BTreeSet;

use tradedesk_core::RecordId;

/// What "select all" selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectScope {
    #[default]
    Page,
    Filtered,
}

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportScope {
    Selected,
    #[default]
    Filtered,
    All,
}

impl core::str::FromStr for ExportScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selected" => Ok(ExportScope::Selected),
            "filtered" | "visible" => Ok(ExportScope::Filtered),
            "all" => Ok(ExportScope::All),
            other => Err(format!("unknown export scope: {other}")),
        }
    }
}

/// Set of selected record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RecordId>,
}

impl Selection {
    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn toggle(&mut self, id: &RecordId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    pub fn insert(&mut self, id: RecordId) {
        self.ids.insert(id);
    }

    pub fn remove(&mut self, id: &RecordId) -> bool {
        self.ids.remove(id)
    }

    /// Replace the selection with `ids`.
    pub fn select_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        self.ids = ids.into_iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::parse(s).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = Selection::default();
        sel.toggle(&id("a"));
        assert!(sel.contains(&id("a")));
        sel.toggle(&id("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_then_clear() {
        let mut sel = Selection::default();
        let ids = [id("a"), id("b"), id("a")];
        sel.select_all(&ids);
        assert_eq!(sel.len(), 2);
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_replaces_previous_ids() {
        let mut sel = Selection::default();
        sel.toggle(&id("x"));
        sel.select_all(&[id("a"), id("b")]);
        assert_eq!(sel.len(), 2);
        assert!(!sel.contains(&id("x")));
    }

    #[test]
    fn export_scope_parses() {
        assert_eq!("Selected".parse::<ExportScope>(), Ok(ExportScope::Selected));
        assert!("some".parse::<ExportScope>().is_err());
    }
}
