//! Selection-set state
//!
//! The transient state behind "pick some wardrobe items" flows. A selection
//! is a set keyed by item id: toggling twice restores the original set, and
//! a cancelled session leaves the caller's prior selection untouched.

use serde::{Deserialize, Serialize};

/// Lightweight reference to a selectable item
///
/// The cross-screen transport form of a wardrobe item: just enough to
/// display and to resolve the full record later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// Item id
    pub id: String,

    /// Display name
    pub name: String,
}

impl ItemRef {
    /// Create a reference
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A set of selected items, keyed by id
///
/// Backed by a vector for cheap serialization; membership is by id, so
/// duplicates cannot occur. Selection order is an implementation detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    items: Vec<ItemRef>,
}

impl SelectionSet {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection seeded from existing refs; duplicate ids collapse
    pub fn from_items(items: Vec<ItemRef>) -> Self {
        let mut set = Self::new();
        for item in items {
            if !set.contains(&item.id) {
                set.items.push(item);
            }
        }
        set
    }

    /// Whether the item with this id is selected
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Toggle an item: select it if absent, unselect it if present
    ///
    /// Returns `true` if the item is selected after the call.
    pub fn toggle(&mut self, item: ItemRef) -> bool {
        if let Some(pos) = self.items.iter().position(|i| i.id == item.id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Selected items
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the set into its items
    pub fn into_items(self) -> Vec<ItemRef> {
        self.items
    }
}

/// Result of a selection session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The user confirmed; apply this selection
    Confirmed(Vec<ItemRef>),

    /// The user backed out; the caller's prior selection stands
    Cancelled,
}

/// One open selector: a working copy of the caller's selection
///
/// Edits accumulate in the working set. Only `confirm` publishes them;
/// `cancel` (including a back gesture) discards every edit with no
/// partial-apply.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    working: SelectionSet,
}

impl SelectionSession {
    /// Open a session over the caller's current selection
    pub fn new(initial: Vec<ItemRef>) -> Self {
        Self {
            working: SelectionSet::from_items(initial),
        }
    }

    /// Toggle an item in the working set
    pub fn toggle(&mut self, item: ItemRef) -> bool {
        self.working.toggle(item)
    }

    /// The in-progress selection
    pub fn working(&self) -> &SelectionSet {
        &self.working
    }

    /// Confirm and publish the working selection
    pub fn confirm(self) -> SelectionOutcome {
        SelectionOutcome::Confirmed(self.working.into_items())
    }

    /// Abandon all edits
    pub fn cancel(self) -> SelectionOutcome {
        SelectionOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> ItemRef {
        ItemRef::new("wd1", "Blue Denim Jacket")
    }

    fn b() -> ItemRef {
        ItemRef::new("wd3", "Classic White Tee")
    }

    #[test]
    fn test_toggle_selects_and_unselects() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(a()));
        assert!(set.contains("wd1"));

        assert!(!set.toggle(a()));
        assert!(!set.contains("wd1"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let mut set = SelectionSet::from_items(vec![a(), b()]);
        let before = set.clone();

        set.toggle(b());
        set.toggle(b());

        assert_eq!(set, before);
    }

    #[test]
    fn test_from_items_collapses_duplicates() {
        let set = SelectionSet::from_items(vec![a(), a(), b()]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_session_confirm_publishes_working_set() {
        let mut session = SelectionSession::new(vec![a()]);
        session.toggle(b());

        match session.confirm() {
            SelectionOutcome::Confirmed(items) => {
                assert_eq!(items.len(), 2);
                assert!(items.iter().any(|i| i.id == "wd1"));
                assert!(items.iter().any(|i| i.id == "wd3"));
            }
            SelectionOutcome::Cancelled => panic!("expected confirmation"),
        }
    }

    #[test]
    fn test_session_cancel_discards_edits() {
        let caller_selection = vec![a()];
        let mut session = SelectionSession::new(caller_selection.clone());
        session.toggle(b());
        session.toggle(a());

        assert_eq!(session.cancel(), SelectionOutcome::Cancelled);
        // The caller's selection was never touched.
        assert_eq!(caller_selection, vec![a()]);
    }
}
