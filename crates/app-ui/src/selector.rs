//! Wardrobe selection sub-flow
//!
//! A full-screen picker opened from the stylist form. The picker edits a
//! working copy of the caller's selection; only an explicit confirm writes
//! the result back, via merge navigation into the stylist entry. Any other
//! exit (back button, back gesture) is a cancel and leaves the caller's
//! selection untouched.

use app_state::{ItemRef, SelectionOutcome, SelectionSession};

use crate::navigation::{NavigationError, Navigator, Route};

/// Navigation half of the selection sub-flow
///
/// Owns the open/confirm/cancel transitions; the in-modal toggling lives
/// in [`ModalSelector`].
pub struct SelectionFlow {
    navigator: Navigator,
}

impl SelectionFlow {
    /// Flow over the given navigator
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    /// Open the picker seeded with the caller's current selection
    pub fn open(&self, initial: Vec<ItemRef>) {
        self.navigator.navigate(Route::WardrobeSelection {
            initial_selection: initial,
        });
    }

    /// Confirm: write the selection back into the stylist entry
    ///
    /// Uses merge navigation, so the stylist screen is updated in place
    /// and the picker is popped in the same transition.
    pub fn confirm(&self, selected: Vec<ItemRef>) -> Result<(), NavigationError> {
        self.navigator.merge_to(Route::StyleMe {
            selected_items: selected,
        })
    }

    /// Cancel: pop the picker without touching the caller's selection
    pub fn cancel(&self) {
        self.navigator.go_back();
    }
}

/// Working state of an open picker
///
/// `None` session means the picker is closed. Confirm and dismiss both
/// close it and report the outcome once.
#[derive(Default)]
pub struct ModalSelector {
    session: Option<SelectionSession>,
}

impl ModalSelector {
    /// Closed selector
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with the caller's current selection as the working copy
    pub fn open(&mut self, initial: Vec<ItemRef>) {
        self.session = Some(SelectionSession::new(initial));
    }

    /// Whether the picker is open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Toggle an item in the working copy; no-op while closed
    pub fn toggle(&mut self, item: ItemRef) {
        if let Some(session) = self.session.as_mut() {
            session.toggle(item);
        }
    }

    /// The working selection, empty while closed
    pub fn working(&self) -> Vec<ItemRef> {
        self.session
            .as_ref()
            .map(|s| s.working().items().to_vec())
            .unwrap_or_default()
    }

    /// Close with the working copy as the result
    pub fn confirm(&mut self) -> Option<SelectionOutcome> {
        self.session.take().map(SelectionSession::confirm)
    }

    /// Close discarding the working copy (back gesture, dismiss)
    pub fn dismiss(&mut self) -> Option<SelectionOutcome> {
        self.session.take().map(SelectionSession::cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemRef {
        ItemRef::new(id, id)
    }

    #[test]
    fn test_confirm_returns_working_copy() {
        let mut selector = ModalSelector::new();
        selector.open(vec![item("wd1")]);
        selector.toggle(item("wd3"));
        selector.toggle(item("wd1"));

        match selector.confirm() {
            Some(SelectionOutcome::Confirmed(items)) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "wd3");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!selector.is_open());
    }

    #[test]
    fn test_dismiss_discards_edits() {
        let mut selector = ModalSelector::new();
        selector.open(vec![item("wd1")]);
        selector.toggle(item("wd2"));
        selector.toggle(item("wd4"));

        assert_eq!(selector.dismiss(), Some(SelectionOutcome::Cancelled));
        assert!(!selector.is_open());
        assert!(selector.working().is_empty());
    }

    #[test]
    fn test_outcome_reported_once() {
        let mut selector = ModalSelector::new();
        selector.open(vec![]);
        assert!(selector.confirm().is_some());
        assert!(selector.confirm().is_none());
        assert!(selector.dismiss().is_none());
    }

    #[test]
    fn test_toggle_while_closed_is_noop() {
        let mut selector = ModalSelector::new();
        selector.toggle(item("wd1"));
        assert!(selector.working().is_empty());
        assert!(!selector.is_open());
    }

    #[test]
    fn test_flow_confirm_merges_into_stylist_entry() {
        let navigator = Navigator::new(Route::StyleMe {
            selected_items: vec![],
        });
        let flow = SelectionFlow::new(navigator.clone());

        flow.open(vec![item("wd1")]);
        assert_eq!(navigator.depth(), 2);

        flow.confirm(vec![item("wd1"), item("wd5")]).unwrap();

        // Merged back: picker popped, stylist params updated in place.
        assert_eq!(navigator.depth(), 1);
        match navigator.take_merged() {
            Some(Route::StyleMe { selected_items }) => assert_eq!(selected_items.len(), 2),
            other => panic!("unexpected merge payload: {other:?}"),
        }
    }

    #[test]
    fn test_flow_cancel_leaves_stylist_params_untouched() {
        let original = vec![item("wd1")];
        let navigator = Navigator::new(Route::StyleMe {
            selected_items: original.clone(),
        });
        let flow = SelectionFlow::new(navigator.clone());

        flow.open(original.clone());
        flow.cancel();

        assert_eq!(navigator.depth(), 1);
        assert!(navigator.take_merged().is_none());
        match navigator.current() {
            Route::StyleMe { selected_items } => assert_eq!(selected_items, original),
            other => panic!("unexpected route: {other:?}"),
        }
    }
}
