//! Stable hashing helpers for deterministic per-node variation.

use std::f64::consts::TAU;

use super::geometry::Vec2;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of a string. Stable across builds and targets, unlike `DefaultHasher`.
pub fn stable_hash(id: &str) -> u64 {
	id.bytes().fold(FNV_OFFSET, |hash, byte| {
		(hash ^ byte as u64).wrapping_mul(FNV_PRIME)
	})
}

/// Two pseudo-random values in `[-1, 1]` derived from `id`.
pub fn stable_pair(id: &str) -> (f64, f64) {
	let hash = stable_hash(id);
	let x = (hash & 0xffff_ffff) as f64 / u32::MAX as f64;
	let y = ((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64;
	(x * 2.0 - 1.0, y * 2.0 - 1.0)
}

/// A pseudo-random value in `[0, 1]` derived from `id` and a salt.
pub fn stable_unit(id: &str, salt: u64) -> f64 {
	let mixed = stable_hash(id) ^ salt.wrapping_mul(FNV_PRIME);
	let mixed = mixed ^ (mixed >> 29);
	(mixed % 10_000) as f64 / 9_999.0
}

/// Deterministic direction for two coincident points.
pub fn fallback_direction(a: usize, b: usize) -> Vec2 {
	let angle = ((a as f64) * 0.618_034 + (b as f64) * 0.414_214 + 0.37) * TAU;
	Vec2::from_angle(angle)
}
