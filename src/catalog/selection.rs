//! Hover and selection state
//!
//! Two independent optional references into the current entry list:
//! `hovered` is ephemeral preview state cleared on pointer-leave,
//! `selected` is sticky and only cleared by an explicit outside-click or
//! by entering scan mode. The detail pane renders `selected` if present,
//! else `hovered`, else nothing.
//!
//! This is a pure state holder; the cross-cutting rule that selecting an
//! entry exits scan mode is enforced by the controller.

use crate::api::Creature;

/// Hover/select state over the entry list
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    hovered: Option<Creature>,
    selected: Option<Creature>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered an entry's row
    pub fn pointer_enter(&mut self, entry: Creature) {
        self.hovered = Some(entry);
    }

    /// Pointer left the list
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// An entry was clicked
    pub fn select(&mut self, entry: Creature) {
        self.selected = Some(entry);
    }

    /// Pointer went down outside the preview region
    ///
    /// Clears the selection only; hover state is untouched.
    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&Creature> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Creature> {
        self.selected.as_ref()
    }

    /// The entry the detail pane should render: selected, else hovered
    #[must_use]
    pub fn preview(&self) -> Option<&Creature> {
        self.selected.as_ref().or(self.hovered.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::creature;

    #[test]
    fn test_hover_is_ephemeral() {
        let mut model = SelectionModel::new();

        model.pointer_enter(creature(1, "Koala"));
        assert_eq!(model.hovered().map(|c| c.id), Some(1));
        assert_eq!(model.preview().map(|c| c.id), Some(1));

        model.pointer_leave();
        assert!(model.hovered().is_none());
        assert!(model.preview().is_none());
    }

    #[test]
    fn test_selected_wins_over_hovered() {
        let mut model = SelectionModel::new();

        model.select(creature(1, "Koala"));
        model.pointer_enter(creature(2, "Emu"));

        assert_eq!(model.preview().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_outside_click_clears_selected_not_hovered() {
        let mut model = SelectionModel::new();

        model.select(creature(1, "Koala"));
        model.pointer_enter(creature(2, "Emu"));
        model.clear_selected();

        assert!(model.selected().is_none());
        assert_eq!(model.hovered().map(|c| c.id), Some(2));
        assert_eq!(model.preview().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_selecting_replaces_previous_selection() {
        let mut model = SelectionModel::new();

        model.select(creature(1, "Koala"));
        model.select(creature(2, "Emu"));

        assert_eq!(model.selected().map(|c| c.id), Some(2));
    }
}
