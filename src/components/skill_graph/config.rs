//! Tunable constants for every stage, bundled for the component.

use super::interaction::InteractionConfig;
use super::layout::LayoutConfig;
use super::physics::PhysicsConfig;
use super::render::GlowConfig;
use super::scale::ProficiencyScale;
use super::theme::Theme;
use super::warp::WarpConfig;

/// Complete configuration. `Default` gives the tuned values.
#[derive(Clone, Debug, Default)]
pub struct GraphConfig {
	/// The one scale shared by layout, physics, hit-testing, and rendering.
	pub scale: ProficiencyScale,
	/// Initial placement.
	pub layout: LayoutConfig,
	/// Per-frame simulation.
	pub physics: PhysicsConfig,
	/// Hit-testing and click/drag disambiguation.
	pub interaction: InteractionConfig,
	/// Background grid distortion.
	pub warp: WarpConfig,
	/// Selection glow.
	pub glow: GlowConfig,
	/// Colors and strokes.
	pub theme: Theme,
}
