//! Minimal 2D vector math shared by layout, physics, and rendering.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector / point in CSS-pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Unit vector at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}

	pub fn length_sq(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn length(self) -> f64 {
		self.length_sq().sqrt()
	}

	pub fn distance(self, other: Vec2) -> f64 {
		(self - other).length()
	}

	pub fn dot(self, other: Vec2) -> f64 {
		self.x * other.x + self.y * other.y
	}

	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Unit vector in the same direction, or `fallback` for a (near) zero vector.
	pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
		let len = self.length();
		if len > 1e-9 {
			self * (1.0 / len)
		} else {
			fallback
		}
	}
}

impl Add for Vec2 {
	type Output = Vec2;
	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Vec2 {
	type Output = Vec2;
	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Vec2) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;
	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

impl MulAssign<f64> for Vec2 {
	fn mul_assign(&mut self, rhs: f64) {
		self.x *= rhs;
		self.y *= rhs;
	}
}

impl Neg for Vec2 {
	type Output = Vec2;
	fn neg(self) -> Vec2 {
		Vec2::new(-self.x, -self.y)
	}
}

/// Size of the drawing surface in CSS pixels, plus the device pixel ratio used
/// for the canvas backing stores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			dpr: 1.0,
		}
	}

	pub fn with_dpr(self, dpr: f64) -> Self {
		let dpr = if dpr.is_finite() && dpr > 0.0 {
			dpr
		} else {
			1.0
		};
		Self { dpr, ..self }
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width / 2.0, self.height / 2.0)
	}

	/// Clamp a point so it stays at least `margin` away from every edge.
	pub fn clamp_inset(&self, point: Vec2, margin: f64) -> Vec2 {
		Vec2::new(
			clamp_axis(point.x, margin, self.width),
			clamp_axis(point.y, margin, self.height),
		)
	}
}

/// Clamp `value` into `[margin, extent - margin]`, or the midpoint when the
/// range is empty.
pub fn clamp_axis(value: f64, margin: f64, extent: f64) -> f64 {
	if extent - margin < margin {
		extent / 2.0
	} else {
		value.clamp(margin, extent - margin)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_falls_back_for_zero_length() {
		let fallback = Vec2::new(0.0, 1.0);
		assert_eq!(Vec2::ZERO.normalize_or(fallback), fallback);
		assert_eq!(Vec2::new(1e-12, 0.0).normalize_or(fallback), fallback);

		let unit = Vec2::new(3.0, -4.0).normalize_or(fallback);
		assert!((unit.length() - 1.0).abs() < 1e-12);
		assert!((unit.x - 0.6).abs() < 1e-12);
		assert!((unit.y + 0.8).abs() < 1e-12);
	}

	#[test]
	fn invalid_pixel_ratio_falls_back_to_one() {
		let viewport = Viewport::new(200.0, 100.0);
		assert_eq!(viewport.with_dpr(2.0).dpr, 2.0);
		assert_eq!(viewport.with_dpr(0.0).dpr, 1.0);
		assert_eq!(viewport.with_dpr(f64::NAN).dpr, 1.0);
	}

	#[test]
	fn clamp_inset_keeps_points_off_the_edges() {
		let viewport = Viewport::new(200.0, 100.0);
		let p = viewport.clamp_inset(Vec2::new(-10.0, 150.0), 12.0);
		assert_eq!(p, Vec2::new(12.0, 88.0));
		// Margin wider than half the extent collapses to the midpoint.
		assert_eq!(clamp_axis(5.0, 60.0, 100.0), 50.0);
	}
}
