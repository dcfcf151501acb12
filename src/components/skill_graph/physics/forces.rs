use super::Body;
use crate::components::skill_graph::geometry::{Vec2, Viewport};
use crate::components::skill_graph::util::fallback_direction;

/// One-sided spring pulling `a` towards `b` once they are further apart than
/// `rest_length`. Returns the force on `a`; the force on `b` is the negation.
///
/// A slack rope never pushes: at or below the rest length the result is
/// exactly zero.
pub fn slack_rope_force(
	a: Vec2,
	b: Vec2,
	rest_length: f64,
	strength: f64,
	min_distance: f64,
) -> Vec2 {
	let delta = b - a;
	let dist = delta.length();
	let stretch = dist - rest_length;
	if stretch <= 0.0 {
		return Vec2::ZERO;
	}
	let dist = dist.max(min_distance);
	delta * (stretch * strength / dist)
}

/// Inverse-square push on `a` away from `b`, or zero beyond `cutoff`.
///
/// `fallback` is used as the direction when the two points coincide.
pub fn repulsion_force(
	a: Vec2,
	b: Vec2,
	strength: f64,
	cutoff: f64,
	min_distance: f64,
	fallback: Vec2,
) -> Vec2 {
	let delta = a - b;
	let dist_sq = delta.length_sq();
	if dist_sq > cutoff * cutoff {
		return Vec2::ZERO;
	}
	let dist = dist_sq.sqrt().max(min_distance);
	delta.normalize_or(fallback) * (strength / (dist * dist))
}

/// Damped spring pulling a dragged body towards the pointer target.
pub fn drag_force(body: &Body, target: Vec2, stiffness: f64, damping: f64) -> Vec2 {
	(target - body.position) * stiffness - body.velocity * damping
}

/// Clamp one axis into `[radius, extent - radius]`, reflecting the velocity
/// inward scaled by `restitution`. Returns whether a correction happened.
fn resolve_axis(
	position: &mut f64,
	velocity: &mut f64,
	radius: f64,
	extent: f64,
	restitution: f64,
) -> bool {
	if extent < radius * 2.0 {
		*position = extent / 2.0;
		*velocity = 0.0;
		return true;
	}
	if *position - radius < 0.0 {
		*position = radius;
		*velocity = velocity.abs() * restitution;
		true
	} else if *position + radius > extent {
		*position = extent - radius;
		*velocity = -velocity.abs() * restitution;
		true
	} else {
		false
	}
}

/// Keep a body inside the viewport. Position and velocity are corrected
/// together so a body can never sit outside the bounds between steps.
pub fn resolve_boundary(body: &mut Body, viewport: Viewport, restitution: f64) -> bool {
	let bounced_x = resolve_axis(
		&mut body.position.x,
		&mut body.velocity.x,
		body.radius,
		viewport.width,
		restitution,
	);
	let bounced_y = resolve_axis(
		&mut body.position.y,
		&mut body.velocity.y,
		body.radius,
		viewport.height,
		restitution,
	);
	bounced_x || bounced_y
}

/// Separate overlapping circles and reflect their approaching velocity.
/// All bodies have equal mass.
pub fn resolve_body_collisions(bodies: &mut [Body], restitution: f64) {
	let n = bodies.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let (left, right) = bodies.split_at_mut(j);
			let (a, b) = (&mut left[i], &mut right[0]);

			let min_dist = a.radius + b.radius;
			let delta = b.position - a.position;
			let dist_sq = delta.length_sq();
			if dist_sq >= min_dist * min_dist {
				continue;
			}

			let normal = delta.normalize_or(fallback_direction(a.handle, b.handle));
			let overlap = min_dist - dist_sq.sqrt();
			a.position -= normal * (overlap * 0.5);
			b.position += normal * (overlap * 0.5);

			let approach = (b.velocity - a.velocity).dot(normal);
			if approach < 0.0 {
				let impulse = -(1.0 + restitution) * approach * 0.5;
				a.velocity -= normal * impulse;
				b.velocity += normal * impulse;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stretched_rope_pulls_together() {
		let a = Vec2::new(0.0, 0.0);
		let b = Vec2::new(200.0, 0.0);
		let on_a = slack_rope_force(a, b, 130.0, 0.002, 1.0);
		let on_b = slack_rope_force(b, a, 130.0, 0.002, 1.0);

		assert!(on_a.x > 0.0);
		assert!(on_b.x < 0.0);
		assert!((on_a.x - 70.0 * 0.002).abs() < 1e-12);
		assert_eq!(on_a.y, 0.0);
	}

	#[test]
	fn slack_rope_never_pushes() {
		let a = Vec2::new(10.0, 10.0);
		for dist in [0.0, 1.0, 64.0, 129.999, 130.0] {
			let b = Vec2::new(10.0 + dist, 10.0);
			assert_eq!(slack_rope_force(a, b, 130.0, 0.002, 1.0), Vec2::ZERO);
		}
	}

	#[test]
	fn repulsion_pushes_apart_within_cutoff() {
		let a = Vec2::new(0.0, 0.0);
		let b = Vec2::new(20.0, 0.0);
		let f = repulsion_force(a, b, 400.0, 200.0, 1.0, Vec2::new(1.0, 0.0));
		assert!(f.x < 0.0);
		assert!((f.x + 1.0).abs() < 1e-12);

		let far = Vec2::new(250.0, 0.0);
		let f = repulsion_force(a, far, 400.0, 200.0, 1.0, Vec2::new(1.0, 0.0));
		assert_eq!(f, Vec2::ZERO);
	}

	#[test]
	fn coincident_repulsion_is_finite() {
		let p = Vec2::new(5.0, 5.0);
		let f = repulsion_force(p, p, 400.0, 200.0, 1.0, Vec2::new(0.0, 1.0));
		assert!(f.is_finite());
		assert_eq!(f, Vec2::new(0.0, 400.0));
	}

	#[test]
	fn boundary_reflects_inward() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut body = Body::new(0, Vec2::new(95.0, 50.0), 10.0);
		body.velocity = Vec2::new(4.0, -1.0);
		assert!(resolve_boundary(&mut body, viewport, 0.5));
		assert_eq!(body.position.x, 90.0);
		assert_eq!(body.velocity.x, -2.0);
		assert_eq!(body.velocity.y, -1.0);

		// Already moving inward stays inward.
		let mut body = Body::new(0, Vec2::new(5.0, 50.0), 10.0);
		body.velocity = Vec2::new(3.0, 0.0);
		resolve_boundary(&mut body, viewport, 0.5);
		assert_eq!(body.position.x, 10.0);
		assert_eq!(body.velocity.x, 1.5);
	}

	#[test]
	fn collisions_separate_overlapping_bodies() {
		let mut bodies = vec![
			Body::new(0, Vec2::new(100.0, 100.0), 20.0),
			Body::new(1, Vec2::new(110.0, 100.0), 20.0),
		];
		bodies[0].velocity = Vec2::new(2.0, 0.0);
		bodies[1].velocity = Vec2::new(-2.0, 0.0);
		resolve_body_collisions(&mut bodies, 0.5);

		let dist = bodies[0].position.distance(bodies[1].position);
		assert!((dist - 40.0).abs() < 1e-9);
		assert!(bodies[0].velocity.x < 0.0);
		assert!(bodies[1].velocity.x > 0.0);
	}
}
