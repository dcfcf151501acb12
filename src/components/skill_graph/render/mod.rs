//! Dual-layer canvas rendering.
//!
//! Two stacked canvases share one viewport:
//! - the **raster** canvas (bottom) carries the warped grid and the selection
//!   glow, composited through an offscreen buffer
//! - the **vector** canvas (top) carries links, nodes, and labels and receives
//!   pointer input
//!
//! Both read body positions from the physics world and never write to it.
//! Backing stores are sized in device pixels and every context is scaled by
//! the device pixel ratio, so drawing code works in CSS pixels throughout.

mod raster;
mod vector;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

pub use raster::GlowConfig;

use super::geometry::Viewport;
use super::state::SkillGraphState;
use super::warp::WarpedGrid;

/// How much of the pipeline runs each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderQuality {
	/// Both layers, with the warped grid and glow.
	#[default]
	Full,
	/// Links, nodes, and labels only. The raster canvas stays blank.
	VectorOnly,
}

impl RenderQuality {
	/// Drop the raster layer for users who asked for reduced motion and for
	/// devices with very few cores.
	pub fn detect(window: &Window) -> Self {
		let reduced_motion = window
			.match_media("(prefers-reduced-motion: reduce)")
			.ok()
			.flatten()
			.is_some_and(|query| query.matches());
		let cores = window.navigator().hardware_concurrency();
		Self::from_environment(reduced_motion, cores)
	}

	/// Decide from already-probed client traits. A core count of zero means
	/// unknown.
	pub fn from_environment(reduced_motion: bool, cores: f64) -> Self {
		if reduced_motion || (cores > 0.0 && cores <= 2.0) {
			Self::VectorOnly
		} else {
			Self::Full
		}
	}
}

/// A canvas together with its 2D context.
pub struct Surface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl Surface {
	/// Wrap an on-page canvas. `None` if it has no 2D context.
	pub fn attach(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		Some(Self { canvas, ctx })
	}

	/// A detached canvas, used as a compositing buffer.
	pub fn offscreen(document: &Document) -> Option<Self> {
		let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
		Self::attach(canvas)
	}

	fn resize(&self, viewport: Viewport) {
		let dpr = viewport.dpr;
		self.canvas.set_width((viewport.width * dpr).round() as u32);
		self.canvas.set_height((viewport.height * dpr).round() as u32);

		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", viewport.width));
		let _ = style.set_property("height", &format!("{}px", viewport.height));

		// Resizing the backing store resets the context transform.
		let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	}

	fn clear(&self, viewport: Viewport) {
		self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	}
}

/// Draws a [`SkillGraphState`] onto the two layers.
pub struct Renderer {
	vector: Surface,
	raster: Surface,
	glow: Option<Surface>,
	quality: RenderQuality,
	grid: WarpedGrid,
	viewport: Option<Viewport>,
}

impl Renderer {
	/// Without a glow buffer the raster layer still draws the grid.
	pub fn new(
		vector: Surface,
		raster: Surface,
		glow: Option<Surface>,
		quality: RenderQuality,
	) -> Self {
		debug!("skill-graph: render quality {:?}", quality);
		Self {
			vector,
			raster,
			glow,
			quality,
			grid: WarpedGrid::default(),
			viewport: None,
		}
	}

	/// Resize every backing store. Called automatically when the state's
	/// viewport changes.
	pub fn resize(&mut self, viewport: Viewport) {
		self.vector.resize(viewport);
		self.raster.resize(viewport);
		if let Some(glow) = &self.glow {
			glow.resize(viewport);
		}
		self.viewport = Some(viewport);
	}

	/// Draw one frame.
	pub fn render(&mut self, state: &SkillGraphState) {
		let viewport = state.viewport();
		if self.viewport != Some(viewport) {
			self.resize(viewport);
		}

		let config = state.config();
		let bodies = state.world().bodies();
		let selected = state.selected_handles();

		self.vector.clear(viewport);
		vector::draw(
			&self.vector,
			state.nodes(),
			bodies,
			state.world().links(),
			selected,
			state.hovered(),
			&config.theme,
		);

		self.raster.clear(viewport);
		if self.quality == RenderQuality::VectorOnly {
			return;
		}

		self.grid.recompute(viewport, bodies, &config.warp);
		raster::draw_grid(&self.raster, &self.grid, &config.theme.grid);

		if let Some(glow) = &self.glow {
			raster::draw_glow(
				&self.raster,
				glow,
				viewport,
				state.nodes(),
				bodies,
				selected,
				&config.glow,
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quality_falls_back_on_weak_or_reduced_motion_clients() {
		assert_eq!(RenderQuality::from_environment(false, 8.0), RenderQuality::Full);
		assert_eq!(RenderQuality::from_environment(true, 8.0), RenderQuality::VectorOnly);
		assert_eq!(RenderQuality::from_environment(false, 2.0), RenderQuality::VectorOnly);
		// Unknown core count.
		assert_eq!(RenderQuality::from_environment(false, 0.0), RenderQuality::Full);
	}
}
