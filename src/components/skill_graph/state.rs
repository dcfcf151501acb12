//! Everything the component needs between frames, minus the DOM.
//!
//! [`SkillGraphState`] owns the node list, the physics world, the pointer
//! controller, and the selection. A rebuild (new data, resize, or grouping
//! change) tears the world down and recreates it from a fresh layout. Any
//! active drag is cancelled first. The selection is kept by id and re-resolved
//! to handles afterwards.

use std::collections::HashMap;

use log::{debug, info};

use super::config::GraphConfig;
use super::geometry::{Vec2, Viewport};
use super::interaction::{Gesture, InteractionController};
use super::layout::solve_layout;
use super::model::{GroupingMode, NodeHandle, SkillNode, build_links, build_nodes};
use super::physics::PhysicsWorld;
use super::selection::SelectionState;
use super::types::SkillData;

/// Something the surrounding UI should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// The selection or an expanded flag changed.
	SelectionChanged,
	/// The first gesture happened; the usage hint can go away.
	HintDismissed,
}

/// Snapshot of one selected skill for the detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillDetail {
	/// Node id.
	pub id: String,
	/// Resolved category.
	pub category: String,
	/// 1 to 10.
	pub proficiency: u8,
	/// Empty when the descriptor had none.
	pub description: String,
	/// Empty when the descriptor had none.
	pub learned_from: String,
	/// CSS color of the node ring.
	pub color: String,
	/// Whether the description section is open.
	pub expanded: bool,
}

impl SkillDetail {
	/// Category and proficiency on one line, shown whether or not the entry
	/// is expanded.
	pub fn summary(&self) -> String {
		format!("{} \u{00b7} {}/10", self.category, self.proficiency)
	}
}

/// DOM-free graph state: nodes, physics, pointer gestures, and selection.
pub struct SkillGraphState {
	config: GraphConfig,
	nodes: Vec<SkillNode>,
	index: HashMap<String, NodeHandle>,
	mode: GroupingMode,
	viewport: Viewport,
	world: PhysicsWorld,
	interaction: InteractionController,
	selection: SelectionState,
	selected_handles: Vec<NodeHandle>,
	hint_visible: bool,
	generation: u64,
}

impl SkillGraphState {
	/// Build nodes from `data` and lay them out in `viewport`.
	pub fn new(
		data: &SkillData,
		viewport: Viewport,
		mode: GroupingMode,
		config: GraphConfig,
	) -> Self {
		let world =
			PhysicsWorld::from_bodies(Vec::new(), Vec::new(), viewport, config.physics.clone());
		let interaction = InteractionController::new(config.interaction.clone());
		let mut state = Self {
			config,
			nodes: Vec::new(),
			index: HashMap::new(),
			mode,
			viewport,
			world,
			interaction,
			selection: SelectionState::default(),
			selected_handles: Vec::new(),
			hint_visible: true,
			generation: 0,
		};
		state.set_data(data);
		state
	}

	/// Replace the skill set. Selected ids that no longer exist are dropped.
	pub fn set_data(&mut self, data: &SkillData) {
		self.nodes = build_nodes(data, &self.config.scale);
		self.index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(handle, node)| (node.id.clone(), handle))
			.collect();
		let index = &self.index;
		self.selection.retain(|id| index.contains_key(id));
		self.rebuild();
	}

	/// Tear down and recreate the world for the current nodes, mode, and
	/// viewport.
	pub fn rebuild(&mut self) {
		self.interaction.pointer_cancel(&mut self.world);
		self.interaction.reset();

		let links = build_links(&self.nodes, self.mode);
		let positions = solve_layout(&self.nodes, &links, self.viewport, &self.config.layout);
		info!(
			"skill-graph: building {} nodes, {} links ({} grouping, {:.0}x{:.0})",
			self.nodes.len(),
			links.len(),
			self.mode,
			self.viewport.width,
			self.viewport.height
		);

		self.world = PhysicsWorld::new(
			&self.nodes,
			&positions,
			links,
			self.viewport,
			self.config.physics.clone(),
		);
		self.refresh_selected_handles();
		self.generation += 1;
	}

	/// Adopt a new viewport. A change of size rebuilds; a change of pixel
	/// ratio alone does not.
	pub fn resize(&mut self, viewport: Viewport) -> bool {
		let resized =
			viewport.width != self.viewport.width || viewport.height != self.viewport.height;
		self.viewport = viewport;
		if resized {
			self.rebuild();
		}
		resized
	}

	/// Switch grouping mode. Returns false if `mode` is already active.
	pub fn set_grouping(&mut self, mode: GroupingMode) -> bool {
		if mode == self.mode {
			return false;
		}
		self.mode = mode;
		self.rebuild();
		true
	}

	/// Advance physics by one frame of `dt_ms` milliseconds.
	pub fn tick(&mut self, dt_ms: f64) {
		self.world.step(dt_ms);
	}

	/// Returns the grabbed node so the caller can capture the pointer.
	pub fn pointer_down(&mut self, point: Vec2) -> Option<NodeHandle> {
		self.interaction.pointer_down(&mut self.world, point)
	}

	/// Update hover, or the drag target while a node is held.
	pub fn pointer_move(&mut self, point: Vec2) {
		self.interaction.pointer_move(&mut self.world, point);
	}

	/// Finish a press. A click toggles the node's selection; a drag leaves
	/// the body moving.
	pub fn pointer_up(&mut self, point: Vec2) -> Vec<GraphEvent> {
		let Some(gesture) = self.interaction.pointer_up(&mut self.world, point) else {
			return Vec::new();
		};

		let mut events = Vec::new();
		if self.hint_visible {
			self.hint_visible = false;
			events.push(GraphEvent::HintDismissed);
		}

		if let Gesture::Click(handle) = gesture {
			if let Some(node) = self.nodes.get(handle) {
				let change = self.selection.toggle(&node.id);
				debug!("skill-graph: {:?} `{}`", change, node.id);
				self.refresh_selected_handles();
				events.push(GraphEvent::SelectionChanged);
			}
		}
		events
	}

	/// Abort the current press without selecting anything.
	pub fn pointer_cancel(&mut self) {
		self.interaction.pointer_cancel(&mut self.world);
	}

	/// Clear the selection.
	pub fn deselect_all(&mut self) -> Vec<GraphEvent> {
		if !self.selection.deselect_all() {
			return Vec::new();
		}
		self.selected_handles.clear();
		vec![GraphEvent::SelectionChanged]
	}

	/// Open or close the detail section of a selected skill.
	pub fn toggle_expanded(&mut self, id: &str) -> Vec<GraphEvent> {
		if self.selection.toggle_expanded(id) {
			vec![GraphEvent::SelectionChanged]
		} else {
			Vec::new()
		}
	}

	fn refresh_selected_handles(&mut self) {
		self.selected_handles = self
			.selection
			.selected()
			.iter()
			.filter_map(|id| self.index.get(id).copied())
			.collect();
	}

	/// Selected skills in selection order.
	pub fn selection_details(&self) -> Vec<SkillDetail> {
		self.selected_handles
			.iter()
			.filter_map(|&handle| self.nodes.get(handle))
			.map(|node| SkillDetail {
				id: node.id.clone(),
				category: node.category.clone(),
				proficiency: node.proficiency,
				description: node.description.clone(),
				learned_from: node.learned_from.clone(),
				color: node.ring_color.to_css(),
				expanded: self.selection.is_expanded(&node.id),
			})
			.collect()
	}

	/// Active configuration.
	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	/// Current viewport.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Active grouping mode.
	pub fn mode(&self) -> GroupingMode {
		self.mode
	}

	/// Nodes, indexed by handle.
	pub fn nodes(&self) -> &[SkillNode] {
		&self.nodes
	}

	/// The physics world for the current build.
	pub fn world(&self) -> &PhysicsWorld {
		&self.world
	}

	/// Selection by id.
	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	/// Selection resolved to handles for the current build.
	pub fn selected_handles(&self) -> &[NodeHandle] {
		&self.selected_handles
	}

	/// Node under the pointer, or the node being dragged.
	pub fn hovered(&self) -> Option<NodeHandle> {
		self.interaction.hovered()
	}

	/// Whether a node is held.
	pub fn is_dragging(&self) -> bool {
		self.interaction.is_dragging()
	}

	/// CSS cursor for the vector canvas: grabbing while a node is held,
	/// pointer over a node, default elsewhere.
	pub fn cursor(&self) -> &'static str {
		if self.is_dragging() {
			"grabbing"
		} else if self.hovered().is_some() {
			"pointer"
		} else {
			"default"
		}
	}

	/// Whether the first-use hint should still be shown.
	pub fn hint_visible(&self) -> bool {
		self.hint_visible
	}

	/// Incremented on every rebuild.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}
