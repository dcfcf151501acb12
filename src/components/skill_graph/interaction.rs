//! Pointer gesture state machine: drag a node, or click it, never both.
//!
//! The controller knows nothing about DOM events. Callers feed it positions in
//! surface-local CSS pixels, and it drives the [`PhysicsWorld`] drag
//! constraint and reports the finished [`Gesture`].

use super::geometry::Vec2;
use super::model::NodeHandle;
use super::physics::{Body, PhysicsWorld};

/// Tuning for hit-testing and click/drag disambiguation.
#[derive(Clone, Debug)]
pub struct InteractionConfig {
	/// Displacement from the down-position beyond which a press becomes a drag.
	pub drag_threshold: f64,
	/// Smallest grabbable radius, regardless of the visual radius.
	pub min_hit_radius: f64,
	/// Slack added around the visual radius when hit-testing.
	pub hit_padding: f64,
	/// Drag targets are kept this far inside the viewport.
	pub target_margin: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			drag_threshold: 4.0,
			min_hit_radius: 18.0,
			hit_padding: 6.0,
			target_margin: 12.0,
		}
	}
}

/// An in-progress press on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
	/// The pressed node.
	pub handle: NodeHandle,
	/// Where the pointer went down.
	pub down: Vec2,
	/// Most recent pointer position.
	pub last: Vec2,
	/// Set once the pointer strays past the drag threshold; never cleared.
	pub moved: bool,
}

/// Pointer session state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
	/// No pointer is down on a node.
	#[default]
	Idle,
	/// A node is pressed, whether or not it has moved yet.
	Dragging(DragSession),
}

/// How a finished press is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
	/// Released without crossing the drag threshold.
	Click(NodeHandle),
	/// Released after a real drag. The body keeps its momentum.
	Drag(NodeHandle),
}

/// Single-pointer interaction controller.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	config: InteractionConfig,
	phase: DragPhase,
	hovered: Option<NodeHandle>,
}

/// Nearest body whose (generous) hit circle contains `point`.
pub fn hit_test(bodies: &[Body], point: Vec2, config: &InteractionConfig) -> Option<NodeHandle> {
	bodies
		.iter()
		.filter_map(|body| {
			let reach = (body.radius + config.hit_padding).max(config.min_hit_radius);
			let dist = body.position.distance(point);
			(dist <= reach).then_some((body.handle, dist))
		})
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(handle, _)| handle)
}

impl InteractionController {
	/// An idle controller.
	pub fn new(config: InteractionConfig) -> Self {
		Self {
			config,
			phase: DragPhase::Idle,
			hovered: None,
		}
	}

	/// Active tuning.
	pub fn config(&self) -> &InteractionConfig {
		&self.config
	}

	/// Current session state.
	pub fn phase(&self) -> &DragPhase {
		&self.phase
	}

	/// Whether a node is pressed.
	pub fn is_dragging(&self) -> bool {
		matches!(self.phase, DragPhase::Dragging(_))
	}

	/// Node under the pointer while idle, or the dragged node.
	pub fn hovered(&self) -> Option<NodeHandle> {
		match &self.phase {
			DragPhase::Dragging(session) => Some(session.handle),
			DragPhase::Idle => self.hovered,
		}
	}

	fn clamp_target(&self, world: &PhysicsWorld, point: Vec2) -> Vec2 {
		world.viewport().clamp_inset(point, self.config.target_margin)
	}

	/// Start a press. Returns the grabbed node, or `None` when the pointer
	/// missed or a drag is already in progress.
	pub fn pointer_down(&mut self, world: &mut PhysicsWorld, point: Vec2) -> Option<NodeHandle> {
		if self.is_dragging() {
			return None;
		}
		let handle = hit_test(world.bodies(), point, &self.config)?;
		let target = self.clamp_target(world, point);
		if !world.set_drag(handle, target) {
			return None;
		}
		self.phase = DragPhase::Dragging(DragSession {
			handle,
			down: point,
			last: point,
			moved: false,
		});
		Some(handle)
	}

	/// Track the pointer: updates hover while idle, or the drag target.
	pub fn pointer_move(&mut self, world: &mut PhysicsWorld, point: Vec2) {
		let threshold = self.config.drag_threshold;
		let target = self.clamp_target(world, point);
		match &mut self.phase {
			DragPhase::Idle => {
				self.hovered = hit_test(world.bodies(), point, &self.config);
			}
			DragPhase::Dragging(session) => {
				if !session.moved && session.down.distance(point) > threshold {
					session.moved = true;
				}
				session.last = point;
				world.update_drag_target(target);
			}
		}
	}

	/// Finish a press and release the drag constraint.
	pub fn pointer_up(&mut self, world: &mut PhysicsWorld, point: Vec2) -> Option<Gesture> {
		self.pointer_move(world, point);
		let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
			return None;
		};
		world.release_drag();
		self.hovered = hit_test(world.bodies(), point, &self.config);
		Some(if session.moved {
			Gesture::Drag(session.handle)
		} else {
			Gesture::Click(session.handle)
		})
	}

	/// Abort a press (pointer capture lost, pointer left the surface). Never
	/// produces a click.
	pub fn pointer_cancel(&mut self, world: &mut PhysicsWorld) -> Option<NodeHandle> {
		self.hovered = None;
		let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
			return None;
		};
		world.release_drag();
		Some(session.handle)
	}

	/// Forget all pointer state. Used when the world is torn down.
	pub fn reset(&mut self) {
		self.phase = DragPhase::Idle;
		self.hovered = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::geometry::Viewport;
	use crate::components::skill_graph::physics::{PhysicsConfig, REFERENCE_STEP_MS};

	fn world() -> PhysicsWorld {
		let bodies = vec![
			Body::new(0, Vec2::new(100.0, 100.0), 30.0),
			Body::new(1, Vec2::new(300.0, 100.0), 8.0),
			Body::new(2, Vec2::new(600.0, 400.0), 20.0),
		];
		let mut config = PhysicsConfig::default();
		config.repulsion_strength = 0.0;
		PhysicsWorld::from_bodies(bodies, vec![], Viewport::new(800.0, 600.0), config)
	}

	#[test]
	fn small_nodes_have_a_hit_radius_floor() {
		let world = world();
		let config = InteractionConfig::default();
		// 16 px from an 8 px node: outside the visual circle, inside the floor.
		assert_eq!(hit_test(world.bodies(), Vec2::new(316.0, 100.0), &config), Some(1));
		assert_eq!(hit_test(world.bodies(), Vec2::new(330.0, 100.0), &config), None);
	}

	#[test]
	fn nearest_body_wins() {
		let bodies = vec![
			Body::new(0, Vec2::new(100.0, 100.0), 30.0),
			Body::new(1, Vec2::new(140.0, 100.0), 30.0),
		];
		let config = InteractionConfig::default();
		assert_eq!(hit_test(&bodies, Vec2::new(125.0, 100.0), &config), Some(1));
		assert_eq!(hit_test(&bodies, Vec2::new(115.0, 100.0), &config), Some(0));
	}

	#[test]
	fn press_without_movement_is_a_click() {
		let mut world = world();
		let mut ctl = InteractionController::default();

		assert_eq!(ctl.pointer_down(&mut world, Vec2::new(102.0, 101.0)), Some(0));
		assert!(world.drag().is_some());
		ctl.pointer_move(&mut world, Vec2::new(104.0, 102.0));
		let gesture = ctl.pointer_up(&mut world, Vec2::new(104.0, 103.0));

		assert_eq!(gesture, Some(Gesture::Click(0)));
		assert!(world.drag().is_none());
		assert_eq!(ctl.phase(), &DragPhase::Idle);
	}

	/// Drag node 0 rightwards by `delta` per frame for `frames` frames and
	/// release. Returns the gesture and the velocity right after release.
	fn fling(delta: f64, frames: usize) -> (Option<Gesture>, Vec2, Vec2) {
		let mut world = world();
		let mut ctl = InteractionController::default();

		ctl.pointer_down(&mut world, Vec2::new(100.0, 100.0));
		for i in 1..=frames {
			ctl.pointer_move(&mut world, Vec2::new(100.0 + i as f64 * delta, 100.0));
			world.step(REFERENCE_STEP_MS);
		}
		let before = world.bodies()[0].velocity;
		let end = Vec2::new(100.0 + frames as f64 * delta, 100.0);
		let gesture = ctl.pointer_up(&mut world, end);
		assert!(world.drag().is_none());
		(gesture, before, world.bodies()[0].velocity)
	}

	#[test]
	fn moving_past_threshold_is_a_drag_and_keeps_momentum() {
		let (gesture, before, after) = fling(12.0, 10);
		assert_eq!(gesture, Some(Gesture::Drag(0)));
		assert_eq!(after, before);
	}

	#[test]
	fn release_velocity_follows_the_last_pointer_delta() {
		for delta in [6.0, 12.0] {
			let (_, _, velocity) = fling(delta, 10);
			assert!(
				(velocity.x - delta).abs() < delta * 0.1,
				"{} px/frame released at {:?}",
				delta,
				velocity
			);
			assert!(velocity.y.abs() < 1e-9);
		}
	}

	#[test]
	fn returning_to_start_is_still_a_drag() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		ctl.pointer_down(&mut world, Vec2::new(100.0, 100.0));
		ctl.pointer_move(&mut world, Vec2::new(130.0, 100.0));
		let gesture = ctl.pointer_up(&mut world, Vec2::new(100.0, 100.0));
		assert_eq!(gesture, Some(Gesture::Drag(0)));
	}

	#[test]
	fn second_press_while_dragging_is_ignored() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		assert_eq!(ctl.pointer_down(&mut world, Vec2::new(100.0, 100.0)), Some(0));
		assert_eq!(ctl.pointer_down(&mut world, Vec2::new(600.0, 400.0)), None);
		assert_eq!(world.drag().map(|d| d.handle), Some(0));
	}

	#[test]
	fn press_on_empty_space_does_nothing() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		assert_eq!(ctl.pointer_down(&mut world, Vec2::new(450.0, 300.0)), None);
		assert!(!ctl.is_dragging());
		assert_eq!(ctl.pointer_up(&mut world, Vec2::new(450.0, 300.0)), None);
	}

	#[test]
	fn cancel_releases_without_click() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		ctl.pointer_down(&mut world, Vec2::new(600.0, 400.0));
		assert_eq!(ctl.pointer_cancel(&mut world), Some(2));
		assert!(world.drag().is_none());
		assert!(!ctl.is_dragging());
		assert_eq!(ctl.pointer_cancel(&mut world), None);
	}

	#[test]
	fn drag_target_is_clamped_inside_viewport() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		ctl.pointer_down(&mut world, Vec2::new(600.0, 400.0));
		ctl.pointer_move(&mut world, Vec2::new(2000.0, -50.0));
		let target = world.drag().map(|d| d.target);
		assert_eq!(target, Some(Vec2::new(788.0, 12.0)));
	}

	#[test]
	fn hover_tracks_pointer_while_idle() {
		let mut world = world();
		let mut ctl = InteractionController::default();
		ctl.pointer_move(&mut world, Vec2::new(600.0, 410.0));
		assert_eq!(ctl.hovered(), Some(2));
		ctl.pointer_move(&mut world, Vec2::new(450.0, 300.0));
		assert_eq!(ctl.hovered(), None);
	}
}
