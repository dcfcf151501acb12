//! Procedurally warped background lattice.
//!
//! A regular grid of sample points is pulled towards nearby nodes. Each node
//! influences samples within `radius * influence_factor`, with a pull that
//! grows as the sample gets closer:
//!
//! ```text
//! falloff = 1 - d / influence
//! pull    = min(d * max_fraction, radius * strength * falloff²)
//! ```
//!
//! `max_fraction < 1` keeps a sample from being dragged past the node center.
//! Contributions from several nodes add up. The grid is recomputed every
//! frame; only samples inside each node's influence box are visited.

use super::geometry::{Vec2, Viewport};
use super::physics::Body;

/// Tuning for [`WarpedGrid`].
#[derive(Clone, Debug)]
pub struct WarpConfig {
	/// Lattice spacing in CSS pixels.
	pub spacing: f64,
	/// Influence radius as a multiple of the node radius.
	pub influence_factor: f64,
	/// Peak pull as a multiple of the node radius.
	pub strength: f64,
	/// Upper bound on the pull as a fraction of the sample's distance.
	pub max_fraction: f64,
}

impl Default for WarpConfig {
	fn default() -> Self {
		Self {
			spacing: 13.0,
			influence_factor: 3.2,
			strength: 0.45,
			max_fraction: 0.85,
		}
	}
}

/// Displacement of `sample` caused by one node at `center` with `radius`.
pub fn displacement(sample: Vec2, center: Vec2, radius: f64, config: &WarpConfig) -> Vec2 {
	let influence = radius * config.influence_factor;
	let delta = center - sample;
	let dist = delta.length();
	if dist >= influence || dist <= f64::EPSILON {
		return Vec2::ZERO;
	}
	let falloff = 1.0 - dist / influence;
	let pull = (dist * config.max_fraction).min(radius * config.strength * falloff * falloff);
	delta * (pull / dist)
}

/// Warped lattice positions, row-major.
#[derive(Clone, Debug, Default)]
pub struct WarpedGrid {
	cols: usize,
	rows: usize,
	origin: Vec2,
	spacing: f64,
	points: Vec<Vec2>,
}

impl WarpedGrid {
	/// Rebuild the grid over `viewport` plus one cell of overscan per side,
	/// reusing the point buffer.
	pub fn recompute(&mut self, viewport: Viewport, bodies: &[Body], config: &WarpConfig) {
		let spacing = config.spacing.max(1.0);
		self.spacing = spacing;
		self.origin = Vec2::new(-spacing, -spacing);
		self.cols = (viewport.width / spacing).ceil() as usize + 3;
		self.rows = (viewport.height / spacing).ceil() as usize + 3;

		self.points.clear();
		self.points.reserve(self.cols * self.rows);
		for r in 0..self.rows {
			for c in 0..self.cols {
				self.points.push(self.lattice(c, r));
			}
		}

		for body in bodies {
			let influence = body.radius * config.influence_factor;
			let (c0, c1) = self.index_range(body.position.x - self.origin.x, influence, self.cols);
			let (r0, r1) = self.index_range(body.position.y - self.origin.y, influence, self.rows);
			for r in r0..r1 {
				for c in c0..c1 {
					let sample = self.lattice(c, r);
					let offset = displacement(sample, body.position, body.radius, config);
					self.points[r * self.cols + c] += offset;
				}
			}
		}
	}

	/// Undisplaced lattice position.
	fn lattice(&self, col: usize, row: usize) -> Vec2 {
		self.origin + Vec2::new(col as f64 * self.spacing, row as f64 * self.spacing)
	}

	/// Half-open index range of samples within `reach` of `offset` along one axis.
	fn index_range(&self, offset: f64, reach: f64, len: usize) -> (usize, usize) {
		let lo = ((offset - reach) / self.spacing).floor().max(0.0) as usize;
		let hi = ((offset + reach) / self.spacing).ceil() + 1.0;
		let hi = if hi.is_finite() {
			hi.max(0.0) as usize
		} else {
			0
		};
		(lo.min(len), hi.min(len))
	}

	/// Samples per row.
	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn point(&self, col: usize, row: usize) -> Vec2 {
		self.points[row * self.cols + col]
	}

	/// Points of one horizontal grid line, left to right.
	pub fn row(&self, row: usize) -> &[Vec2] {
		&self.points[row * self.cols..(row + 1) * self.cols]
	}

	/// Points of one vertical grid line, top to bottom.
	pub fn column(&self, col: usize) -> impl Iterator<Item = Vec2> + '_ {
		(0..self.rows).map(move |r| self.point(col, r))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn warped(viewport: Viewport, bodies: &[Body], config: &WarpConfig) -> WarpedGrid {
		let mut grid = WarpedGrid::default();
		grid.recompute(viewport, bodies, config);
		grid
	}

	#[test]
	fn empty_scene_is_a_regular_lattice() {
		let config = WarpConfig::default();
		let grid = warped(Viewport::new(130.0, 65.0), &[], &config);
		assert_eq!(grid.cols(), 13);
		assert_eq!(grid.rows(), 8);
		assert_eq!(grid.point(0, 0), Vec2::new(-13.0, -13.0));
		assert_eq!(grid.point(3, 2), Vec2::new(26.0, 13.0));
		assert_eq!(grid.row(1).len(), grid.cols());
		assert_eq!(grid.column(2).count(), grid.rows());
	}

	#[test]
	fn samples_are_pulled_towards_nodes() {
		let config = WarpConfig::default();
		let center = Vec2::new(100.0, 100.0);
		let sample = Vec2::new(130.0, 100.0);
		let d = displacement(sample, center, 20.0, &config);
		assert!(d.x < 0.0);
		assert_eq!(d.y, 0.0);
		// Never past the node.
		assert!(d.length() <= 30.0 * config.max_fraction + 1e-9);
	}

	#[test]
	fn closer_samples_move_further() {
		let config = WarpConfig::default();
		let center = Vec2::new(0.0, 0.0);
		let near = displacement(Vec2::new(30.0, 0.0), center, 20.0, &config).length();
		let far = displacement(Vec2::new(50.0, 0.0), center, 20.0, &config).length();
		assert!(near > far);
		assert!(far > 0.0);
	}

	#[test]
	fn outside_influence_is_untouched() {
		let config = WarpConfig::default();
		let d = displacement(Vec2::new(64.0, 0.0), Vec2::ZERO, 20.0, &config);
		assert_eq!(d, Vec2::ZERO);
		let d = displacement(Vec2::ZERO, Vec2::ZERO, 20.0, &config);
		assert_eq!(d, Vec2::ZERO);
	}

	#[test]
	fn windowed_warp_matches_brute_force() {
		let config = WarpConfig::default();
		let viewport = Viewport::new(300.0, 200.0);
		let bodies = vec![
			Body::new(0, Vec2::new(60.0, 50.0), 20.0),
			Body::new(1, Vec2::new(90.0, 70.0), 35.0),
			Body::new(2, Vec2::new(290.0, 190.0), 10.0),
		];
		let grid = warped(viewport, &bodies, &config);
		let plain = warped(viewport, &[], &config);

		for r in 0..grid.rows() {
			for c in 0..grid.cols() {
				let base = plain.point(c, r);
				let expected = bodies.iter().fold(base, |acc, b| {
					acc + displacement(base, b.position, b.radius, &config)
				});
				let got = grid.point(c, r);
				assert!((got - expected).length() < 1e-9, "({}, {})", c, r);
			}
		}
	}

	#[test]
	fn recompute_reuses_and_tracks_motion() {
		let config = WarpConfig::default();
		let viewport = Viewport::new(200.0, 200.0);
		let mut bodies = vec![Body::new(0, Vec2::new(50.0, 50.0), 20.0)];
		let mut grid = warped(viewport, &bodies, &config);
		let before = grid.point(5, 5);

		bodies[0].position = Vec2::new(150.0, 150.0);
		grid.recompute(viewport, &bodies, &config);
		assert_ne!(grid.point(5, 5), before);
		assert_eq!(grid.point(5, 5), Vec2::new(52.0, 52.0));
	}
}
