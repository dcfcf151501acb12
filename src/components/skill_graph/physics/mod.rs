//! Per-frame rigid-body simulation of the skill nodes.
//!
//! Each node is a circular [`Body`]. A step integrates velocities into
//! positions, resolves body and wall collisions, and then accumulates the soft
//! forces (slack-rope links, cutoff repulsion, the drag spring) into the
//! velocities used by the next step. Only the integration and collision stages
//! move bodies, and the wall stage runs last among them, so every position
//! observable between steps is inside the viewport.

mod forces;

use std::f64::consts::TAU;

use log::warn;

pub use forces::{drag_force, repulsion_force, resolve_boundary, slack_rope_force};
use forces::resolve_body_collisions;

use super::geometry::{Vec2, Viewport};
use super::model::{Link, NodeHandle, SkillNode};
use super::util::{fallback_direction, stable_unit};

/// Frame duration the velocity units are expressed in (60 Hz).
pub const REFERENCE_STEP_MS: f64 = 1000.0 / 60.0;

/// Tuning for [`PhysicsWorld`]. Velocities are in pixels per reference step.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Fraction of velocity kept when bouncing off a wall.
	pub restitution: f64,
	/// Fraction of approach velocity kept when two bodies collide.
	pub body_restitution: f64,
	/// Resolve overlaps between bodies. Walls are always resolved.
	pub body_collisions: bool,
	/// Velocity fraction lost per reference step.
	pub air_friction: f64,
	/// Links only pull once their endpoints are further apart than this.
	pub link_rest_length: f64,
	/// Spring constant of a taut link.
	pub link_strength: f64,
	/// Inverse-square repulsion between every pair of bodies.
	pub repulsion_strength: f64,
	/// Pairs further apart than this skip repulsion.
	pub repulsion_cutoff: f64,
	/// Floor applied to every distance before dividing by it.
	pub min_distance: f64,
	/// Pull of the drag spring towards the pointer.
	pub drag_stiffness: f64,
	/// Velocity damping applied to the dragged body while held. Tuned with
	/// `drag_stiffness` so the release velocity follows the pointer's
	/// per-frame motion.
	pub drag_damping: f64,
	/// Slowest initial outward speed of the entrance burst.
	pub burst_min: f64,
	/// Fastest initial outward speed of the entrance burst.
	pub burst_max: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			restitution: 0.5,
			body_restitution: 0.7,
			body_collisions: true,
			air_friction: 0.01,
			link_rest_length: 130.0,
			link_strength: 0.002,
			repulsion_strength: 400.0,
			repulsion_cutoff: 200.0,
			min_distance: 1.0,
			drag_stiffness: 0.12,
			drag_damping: 0.4,
			burst_min: 18.0,
			burst_max: 28.0,
		}
	}
}

/// Physics counterpart of a skill node.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	/// Back-reference to the node this body simulates.
	pub handle: NodeHandle,
	/// Center, in viewport CSS pixels.
	pub position: Vec2,
	/// Pixels per reference step.
	pub velocity: Vec2,
	/// Collision radius, equal to the node's visual radius.
	pub radius: f64,
}

impl Body {
	/// A body at rest.
	pub fn new(handle: NodeHandle, position: Vec2, radius: f64) -> Self {
		Self {
			handle,
			position,
			velocity: Vec2::ZERO,
			radius,
		}
	}
}

/// Elastic attachment between the pointer and a dragged body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConstraint {
	/// The dragged body.
	pub handle: NodeHandle,
	/// Pointer position the spring pulls towards.
	pub target: Vec2,
}

/// Owns all bodies, the link list, and the active drag constraint.
pub struct PhysicsWorld {
	bodies: Vec<Body>,
	links: Vec<Link>,
	viewport: Viewport,
	config: PhysicsConfig,
	drag: Option<DragConstraint>,
	forces: Vec<Vec2>,
}

impl PhysicsWorld {
	/// Create one body per node at its solved position, each launched outward
	/// from the viewport center.
	pub fn new(
		nodes: &[SkillNode],
		positions: &[Vec2],
		links: Vec<Link>,
		viewport: Viewport,
		config: PhysicsConfig,
	) -> Self {
		let center = viewport.center();
		let bodies = nodes
			.iter()
			.zip(positions)
			.enumerate()
			.map(|(handle, (node, &position))| {
				let golden = Vec2::from_angle(handle as f64 * 0.618_034 * TAU);
				let direction = (position - center).normalize_or(golden);
				let speed = config.burst_min
					+ stable_unit(&node.id, 1) * (config.burst_max - config.burst_min);
				Body {
					handle,
					position,
					velocity: direction * speed,
					radius: node.radius,
				}
			})
			.collect();
		Self::from_bodies(bodies, links, viewport, config)
	}

	/// Create a world from prepared bodies. Handles must equal body indices.
	pub fn from_bodies(
		bodies: Vec<Body>,
		links: Vec<Link>,
		viewport: Viewport,
		config: PhysicsConfig,
	) -> Self {
		debug_assert!(bodies.iter().enumerate().all(|(i, b)| b.handle == i));
		let forces = vec![Vec2::ZERO; bodies.len()];
		Self {
			bodies,
			links,
			viewport,
			config,
			drag: None,
			forces,
		}
	}

	/// All bodies, indexed by node handle.
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// The body for `handle`, if it exists.
	pub fn body(&self, handle: NodeHandle) -> Option<&Body> {
		self.bodies.get(handle)
	}

	/// Links the world was built with.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// The walls bodies bounce off.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Active tuning.
	pub fn config(&self) -> &PhysicsConfig {
		&self.config
	}

	/// The drag spring, while a body is held.
	pub fn drag(&self) -> Option<&DragConstraint> {
		self.drag.as_ref()
	}

	/// Attach the drag spring to `handle`. Returns `false` for an unknown handle.
	pub fn set_drag(&mut self, handle: NodeHandle, target: Vec2) -> bool {
		if handle >= self.bodies.len() {
			return false;
		}
		self.drag = Some(DragConstraint { handle, target });
		true
	}

	/// Move the drag spring's anchor. No-op without an active drag.
	pub fn update_drag_target(&mut self, target: Vec2) {
		if let Some(drag) = self.drag.as_mut() {
			drag.target = target;
		}
	}

	/// Remove the drag spring. The body keeps its current velocity.
	pub fn release_drag(&mut self) -> Option<DragConstraint> {
		self.drag.take()
	}

	/// Advance the simulation by `dt_ms`, clamped to one reference step.
	pub fn step(&mut self, dt_ms: f64) {
		if dt_ms.is_nan() || dt_ms <= 0.0 {
			return;
		}
		let s = dt_ms.min(REFERENCE_STEP_MS) / REFERENCE_STEP_MS;
		let keep = (1.0 - self.config.air_friction * s).max(0.0);

		for body in &mut self.bodies {
			body.velocity *= keep;
			body.position += body.velocity * s;
		}

		if self.config.body_collisions {
			resolve_body_collisions(&mut self.bodies, self.config.body_restitution);
		}

		for body in &mut self.bodies {
			resolve_boundary(body, self.viewport, self.config.restitution);
		}

		self.forces.clear();
		self.forces.resize(self.bodies.len(), Vec2::ZERO);
		self.accumulate_link_forces();
		self.accumulate_repulsion();
		self.accumulate_drag();

		for (body, force) in self.bodies.iter_mut().zip(&self.forces) {
			body.velocity += *force * s;
		}

		self.recover_non_finite();
	}

	fn accumulate_link_forces(&mut self) {
		let n = self.bodies.len();
		for link in &self.links {
			let (a, b) = (link.source, link.target);
			if a >= n || b >= n || a == b {
				continue;
			}
			let force = slack_rope_force(
				self.bodies[a].position,
				self.bodies[b].position,
				self.config.link_rest_length,
				self.config.link_strength,
				self.config.min_distance,
			);
			// Split evenly between both ends.
			self.forces[a] += force * 0.5;
			self.forces[b] -= force * 0.5;
		}
	}

	// O(n²) over cutoff-filtered pairs; fine for graphs well under 500 nodes.
	fn accumulate_repulsion(&mut self) {
		let n = self.bodies.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let force = repulsion_force(
					self.bodies[i].position,
					self.bodies[j].position,
					self.config.repulsion_strength,
					self.config.repulsion_cutoff,
					self.config.min_distance,
					fallback_direction(i, j),
				);
				self.forces[i] += force;
				self.forces[j] -= force;
			}
		}
	}

	fn accumulate_drag(&mut self) {
		let Some(drag) = self.drag else {
			return;
		};
		let Some(body) = self.bodies.get(drag.handle) else {
			self.drag = None;
			return;
		};
		self.forces[drag.handle] += drag_force(
			body,
			drag.target,
			self.config.drag_stiffness,
			self.config.drag_damping,
		);
	}

	fn recover_non_finite(&mut self) {
		let center = self.viewport.center();
		for body in &mut self.bodies {
			if body.position.is_finite() && body.velocity.is_finite() {
				continue;
			}
			warn!(
				"skill-graph: body {} went non-finite, recentering",
				body.handle
			);
			body.position = center;
			body.velocity = Vec2::ZERO;
			resolve_boundary(body, self.viewport, self.config.restitution);
		}
	}
}
