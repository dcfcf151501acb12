//! Proficiency-to-radius scaling shared by every stage of the pipeline.
//!
//! Layout, physics, hit-testing, and rendering all need a node's radius. They
//! read it from the same [`ProficiencyScale`], which is built once by the graph
//! state and passed around by reference, so the collision circle, the drawn
//! circle, and the grabbable area can never disagree.
//!
//! # Area-based scaling
//!
//! The scale is a power scale with exponent 0.5 (a square-root scale). Mapping
//! proficiency through `sqrt` before interpolating the radius means the visual
//! *area* of a node, not its radius, grows roughly linearly with proficiency:
//!
//! ```text
//! t      = (p^e - lo^e) / (hi^e - lo^e)     e = 0.5
//! radius = min_radius + t * (max_radius - min_radius)
//! ```
//!
//! Proficiency values outside the domain are clamped, so the scale is strictly
//! increasing on the domain and constant outside it.

/// Lowest proficiency in the input domain.
pub const MIN_PROFICIENCY: f64 = 1.0;
/// Highest proficiency in the input domain.
pub const MAX_PROFICIENCY: f64 = 10.0;

/// Square-root power scale from proficiency to node radius.
#[derive(Clone, Debug, PartialEq)]
pub struct ProficiencyScale {
	/// Radius at the lowest proficiency.
	pub min_radius: f64,
	/// Radius at the highest proficiency.
	pub max_radius: f64,
	/// Power applied to the domain before interpolating. `0.5` keeps area linear.
	pub exponent: f64,
}

impl Default for ProficiencyScale {
	fn default() -> Self {
		Self {
			min_radius: 16.0,
			max_radius: 44.0,
			exponent: 0.5,
		}
	}
}

impl ProficiencyScale {
	/// Clamp a raw proficiency into the scale domain.
	pub fn clamp(proficiency: f64) -> f64 {
		if proficiency.is_nan() {
			return MIN_PROFICIENCY;
		}
		proficiency.clamp(MIN_PROFICIENCY, MAX_PROFICIENCY)
	}

	/// Normalized position of `proficiency` along the scale, in `[0, 1]`.
	fn t(&self, proficiency: f64) -> f64 {
		let p = Self::clamp(proficiency);
		let lo = MIN_PROFICIENCY.powf(self.exponent);
		let hi = MAX_PROFICIENCY.powf(self.exponent);
		(p.powf(self.exponent) - lo) / (hi - lo)
	}

	/// Radius in CSS pixels for a proficiency.
	pub fn radius(&self, proficiency: f64) -> f64 {
		self.min_radius + self.t(proficiency) * (self.max_radius - self.min_radius)
	}

	/// Visual area relative to the largest possible node, in `(0, 1]`.
	pub fn relative_area(&self, proficiency: f64) -> f64 {
		let ratio = self.radius(proficiency) / self.max_radius;
		ratio * ratio
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_map_to_range() {
		let scale = ProficiencyScale::default();
		assert!((scale.radius(1.0) - 16.0).abs() < 1e-9);
		assert!((scale.radius(10.0) - 44.0).abs() < 1e-9);
		assert!((scale.relative_area(10.0) - 1.0).abs() < 1e-9);
	}

	#[test]
	fn strictly_increasing_over_domain() {
		let scale = ProficiencyScale::default();
		let radii: Vec<f64> = (1..=10).map(|p| scale.radius(p as f64)).collect();
		assert!(radii.windows(2).all(|w| w[1] > w[0]));
	}

	#[test]
	fn out_of_domain_is_clamped() {
		let scale = ProficiencyScale::default();
		assert_eq!(scale.radius(-3.0), scale.radius(1.0));
		assert_eq!(scale.radius(99.0), scale.radius(10.0));
		assert_eq!(scale.radius(f64::NAN), scale.radius(1.0));
	}

	#[test]
	fn sqrt_scale_compresses_high_end() {
		let scale = ProficiencyScale::default();
		let low_step = scale.radius(2.0) - scale.radius(1.0);
		let high_step = scale.radius(10.0) - scale.radius(9.0);
		assert!(low_step > high_step);
	}
}
