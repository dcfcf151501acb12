//! Selected skills and which of their detail sections are expanded.
//!
//! Keyed by node id rather than handle so the selection survives a rebuild of
//! the physics world.

use std::collections::HashSet;

/// Result of toggling a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
	/// The id was added.
	Selected,
	/// The id was removed.
	Deselected,
}

/// Ordered selection plus the expanded-detail set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	/// Insertion order is display order.
	selected: Vec<String>,
	expanded: HashSet<String>,
}

impl SelectionState {
	/// Selected ids in selection order.
	pub fn selected(&self) -> &[String] {
		&self.selected
	}

	/// Nothing selected.
	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	/// Whether `id` is selected.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.iter().any(|s| s == id)
	}

	/// Whether the detail section of `id` is open.
	pub fn is_expanded(&self, id: &str) -> bool {
		self.expanded.contains(id)
	}

	/// Select `id` (appended, detail expanded) or deselect it (detail state
	/// dropped).
	pub fn toggle(&mut self, id: &str) -> SelectionChange {
		if let Some(pos) = self.selected.iter().position(|s| s == id) {
			self.selected.remove(pos);
			self.expanded.remove(id);
			SelectionChange::Deselected
		} else {
			self.selected.push(id.to_string());
			self.expanded.insert(id.to_string());
			SelectionChange::Selected
		}
	}

	/// Flip the detail section of a selected node. Unselected ids are ignored.
	pub fn toggle_expanded(&mut self, id: &str) -> bool {
		if !self.is_selected(id) {
			return false;
		}
		if !self.expanded.remove(id) {
			self.expanded.insert(id.to_string());
		}
		true
	}

	/// Clear everything. Safe to call on an empty selection.
	pub fn deselect_all(&mut self) -> bool {
		let had_any = !self.selected.is_empty();
		self.selected.clear();
		self.expanded.clear();
		had_any
	}

	/// Drop ids for which `keep` returns false, e.g. after the node set changed.
	pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
		self.selected.retain(|id| keep(id));
		let selected = &self.selected;
		self.expanded.retain(|id| selected.contains(id));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggle_twice_restores_contents_and_order() {
		let mut sel = SelectionState::default();
		sel.toggle("Rust");
		sel.toggle("Go");
		let before = sel.clone();

		assert_eq!(sel.toggle("React"), SelectionChange::Selected);
		assert_eq!(sel.toggle("React"), SelectionChange::Deselected);
		assert_eq!(sel, before);
		assert_eq!(sel.selected(), ["Rust", "Go"]);
	}

	#[test]
	fn selection_keeps_insertion_order() {
		let mut sel = SelectionState::default();
		for id in ["c", "a", "b"] {
			sel.toggle(id);
		}
		sel.toggle("a");
		sel.toggle("a");
		assert_eq!(sel.selected(), ["c", "b", "a"]);
	}

	#[test]
	fn new_selection_starts_expanded_and_toggles() {
		let mut sel = SelectionState::default();
		sel.toggle("Rust");
		assert!(sel.is_expanded("Rust"));
		assert!(sel.toggle_expanded("Rust"));
		assert!(!sel.is_expanded("Rust"));
		assert!(sel.toggle_expanded("Rust"));
		assert!(sel.is_expanded("Rust"));
		assert!(!sel.toggle_expanded("Unknown"));
	}

	#[test]
	fn deselect_clears_detail_state() {
		let mut sel = SelectionState::default();
		sel.toggle("Rust");
		sel.toggle_expanded("Rust");
		sel.toggle("Rust");
		sel.toggle("Rust");
		// Re-selecting starts expanded again.
		assert!(sel.is_expanded("Rust"));
	}

	#[test]
	fn deselect_all_is_idempotent() {
		let mut sel = SelectionState::default();
		assert!(!sel.deselect_all());
		sel.toggle("a");
		sel.toggle("b");
		assert!(sel.deselect_all());
		assert!(sel.is_empty());
		assert!(!sel.is_expanded("a"));
		assert!(!sel.deselect_all());
		assert_eq!(sel, SelectionState::default());
	}

	#[test]
	fn retain_drops_missing_ids() {
		let mut sel = SelectionState::default();
		sel.toggle("keep");
		sel.toggle("drop");
		sel.retain(|id| id == "keep");
		assert_eq!(sel.selected(), ["keep"]);
		assert!(!sel.is_expanded("drop"));
	}
}
