//! One-shot force relaxation that gives the physics world a sensible start.
//!
//! Positions only: the solver never produces velocities. It runs once per
//! (re)build, never per frame.

use super::geometry::{Vec2, Viewport, clamp_axis};
use super::model::{Link, SkillNode};
use super::util::{fallback_direction, stable_pair};

/// Tuning for [`solve_layout`].
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Relaxation rounds per solve.
	pub iterations: usize,
	/// Distance linked nodes settle towards.
	pub link_distance: f64,
	/// Fraction of the distance error corrected per iteration.
	pub link_strength: f64,
	/// Inverse-distance push between every pair.
	pub charge_strength: f64,
	/// Pull towards the viewport center, per unit of distance.
	pub center_strength: f64,
	/// Extra clearance added to `r1 + r2` when resolving overlaps.
	pub collision_margin: f64,
	/// Fraction of an overlap resolved per pass.
	pub collision_strength: f64,
	/// Overlap passes per iteration.
	pub collision_passes: usize,
	/// Half-width of the initial scatter around the center.
	pub jitter: f64,
	/// Largest distance a node may move in one iteration from the soft forces.
	pub max_step: f64,
	/// Floor applied to every distance before dividing by it.
	pub min_distance: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			iterations: 50,
			link_distance: 130.0,
			link_strength: 0.1,
			charge_strength: 300.0,
			center_strength: 0.04,
			collision_margin: 4.0,
			collision_strength: 0.7,
			collision_passes: 2,
			jitter: 10.0,
			max_step: 40.0,
			min_distance: 1.0,
		}
	}
}

/// Solve initial positions for `nodes` inside `viewport`.
///
/// The returned vector is indexed by node handle.
pub fn solve_layout(
	nodes: &[SkillNode],
	links: &[Link],
	viewport: Viewport,
	config: &LayoutConfig,
) -> Vec<Vec2> {
	let n = nodes.len();
	let center = viewport.center();
	let mut positions: Vec<Vec2> = nodes
		.iter()
		.map(|node| {
			let (jx, jy) = stable_pair(&node.id);
			center + Vec2::new(jx, jy) * config.jitter
		})
		.collect();

	if n < 2 {
		return positions;
	}

	let iterations = config.iterations.max(1);
	let mut disp = vec![Vec2::ZERO; n];

	for step in 0..iterations {
		let alpha = 1.0 - step as f64 / iterations as f64;
		disp.fill(Vec2::ZERO);

		for link in links {
			let (s, t) = (link.source, link.target);
			if s >= n || t >= n || s == t {
				continue;
			}
			let delta = positions[t] - positions[s];
			let dist = delta.length().max(config.min_distance);
			let dir = delta.normalize_or(fallback_direction(s, t));
			let pull = (dist - config.link_distance) * config.link_strength * alpha * 0.5;
			disp[s] += dir * pull;
			disp[t] -= dir * pull;
		}

		for i in 0..n {
			for j in (i + 1)..n {
				let delta = positions[i] - positions[j];
				let dist = delta.length().max(config.min_distance);
				let dir = delta.normalize_or(fallback_direction(i, j));
				let push = config.charge_strength * alpha / dist;
				disp[i] += dir * push;
				disp[j] -= dir * push;
			}
		}

		for (i, d) in disp.iter_mut().enumerate() {
			*d += (center - positions[i]) * (config.center_strength * alpha);
		}

		for (i, d) in disp.iter().enumerate() {
			let len = d.length();
			let step = if len > config.max_step {
				*d * (config.max_step / len)
			} else {
				*d
			};
			positions[i] = clamp_inside(positions[i] + step, nodes[i].radius, viewport);
		}

		for _ in 0..config.collision_passes {
			resolve_collisions(&mut positions, nodes, config);
		}
	}

	for (p, node) in positions.iter_mut().zip(nodes) {
		*p = clamp_inside(*p, node.radius, viewport);
	}
	positions
}

/// One Gauss-Seidel pass pushing overlapping pairs apart.
fn resolve_collisions(positions: &mut [Vec2], nodes: &[SkillNode], config: &LayoutConfig) {
	let n = positions.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let min_dist = nodes[i].radius + nodes[j].radius + config.collision_margin;
			let delta = positions[i] - positions[j];
			let dist = delta.length();
			if dist >= min_dist {
				continue;
			}
			let dir = delta.normalize_or(fallback_direction(i, j));
			let push = (min_dist - dist) * config.collision_strength * 0.5;
			positions[i] += dir * push;
			positions[j] -= dir * push;
		}
	}
}

fn clamp_inside(p: Vec2, radius: f64, viewport: Viewport) -> Vec2 {
	Vec2::new(
		clamp_axis(p.x, radius, viewport.width),
		clamp_axis(p.y, radius, viewport.height),
	)
}
