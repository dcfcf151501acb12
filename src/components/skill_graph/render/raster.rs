//! Raster layer: the warped grid and the selection glow masked onto it.
//!
//! Per frame:
//! 1. Clear the raster surface and stroke the warped grid (transparent elsewhere).
//! 2. Clear the glow buffer and paint one radial gradient per selected node.
//! 3. `destination-in` the raster surface onto the buffer, so only glow that
//!    lies on grid lines survives.
//! 4. `screen` the buffer back onto the raster surface, lighting the lines.

use std::f64::consts::PI;

use super::Surface;
use crate::components::skill_graph::geometry::Viewport;
use crate::components::skill_graph::model::SkillNode;
use crate::components::skill_graph::physics::Body;
use crate::components::skill_graph::theme::{Color, GridStyle};
use crate::components::skill_graph::warp::WarpedGrid;

/// Glow sizing and opacity relative to a node's visual area.
#[derive(Clone, Debug)]
pub struct GlowConfig {
	/// Glow radius = node radius × (base_radius + area_radius × relative area).
	pub base_radius: f64,
	/// See `base_radius`.
	pub area_radius: f64,
	/// Inner alpha = base_alpha + area_alpha × relative area.
	pub base_alpha: f64,
	/// See `base_alpha`.
	pub area_alpha: f64,
	/// Offset of the middle gradient stop.
	pub mid_stop: f64,
	/// Middle stop alpha as a fraction of the inner alpha.
	pub mid_ratio: f64,
}

impl Default for GlowConfig {
	fn default() -> Self {
		Self {
			base_radius: 2.2,
			area_radius: 2.8,
			base_alpha: 0.35,
			area_alpha: 0.5,
			mid_stop: 0.45,
			mid_ratio: 0.45,
		}
	}
}

/// Resolved gradient for one selected node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowProfile {
	/// Outer radius; the gradient is fully transparent here.
	pub radius: f64,
	/// Alpha at the node center.
	pub inner_alpha: f64,
	/// Offset of the middle stop, 0 to 1.
	pub mid_stop: f64,
	/// Alpha at the middle stop.
	pub mid_alpha: f64,
}

impl GlowProfile {
	/// Larger nodes get a wider, brighter glow.
	pub fn for_node(radius: f64, relative_area: f64, config: &GlowConfig) -> Self {
		let area = relative_area.clamp(0.0, 1.0);
		let inner_alpha = (config.base_alpha + config.area_alpha * area).clamp(0.0, 1.0);
		Self {
			radius: radius * (config.base_radius + config.area_radius * area),
			inner_alpha,
			mid_stop: config.mid_stop.clamp(0.0, 1.0),
			mid_alpha: inner_alpha * config.mid_ratio,
		}
	}
}

pub(super) fn draw_grid(surface: &Surface, grid: &WarpedGrid, style: &GridStyle) {
	let ctx = &surface.ctx;
	ctx.set_stroke_style_str(&style.color.to_css());
	ctx.set_line_width(style.width);
	ctx.begin_path();

	for r in 0..grid.rows() {
		let mut points = grid.row(r).iter();
		if let Some(first) = points.next() {
			ctx.move_to(first.x, first.y);
			for p in points {
				ctx.line_to(p.x, p.y);
			}
		}
	}

	for c in 0..grid.cols() {
		let mut points = grid.column(c);
		if let Some(first) = points.next() {
			ctx.move_to(first.x, first.y);
			for p in points {
				ctx.line_to(p.x, p.y);
			}
		}
	}

	ctx.stroke();
}

pub(super) fn draw_glow(
	raster: &Surface,
	buffer: &Surface,
	viewport: Viewport,
	nodes: &[SkillNode],
	bodies: &[Body],
	selected: &[usize],
	config: &GlowConfig,
) {
	buffer.clear(viewport);
	if selected.is_empty() {
		return;
	}

	let ctx = &buffer.ctx;
	for &handle in selected {
		let (Some(node), Some(body)) = (nodes.get(handle), bodies.get(handle)) else {
			continue;
		};
		let profile = GlowProfile::for_node(body.radius, node.relative_area, config);
		draw_gradient(buffer, body, node.ring_color, &profile);
	}

	let _ = ctx.set_global_composite_operation("destination-in");
	let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
		&raster.canvas,
		0.0,
		0.0,
		viewport.width,
		viewport.height,
	);
	let _ = ctx.set_global_composite_operation("source-over");

	let _ = raster.ctx.set_global_composite_operation("screen");
	let _ = raster.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
		&buffer.canvas,
		0.0,
		0.0,
		viewport.width,
		viewport.height,
	);
	let _ = raster.ctx.set_global_composite_operation("source-over");
}

fn draw_gradient(buffer: &Surface, body: &Body, color: Color, profile: &GlowProfile) {
	let ctx = &buffer.ctx;
	let (x, y) = (body.position.x, body.position.y);
	let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, profile.radius) else {
		return;
	};

	let inner = color.lighten(0.25).with_alpha(profile.inner_alpha);
	let _ = gradient.add_color_stop(0.0, &inner.to_css());
	let _ = gradient.add_color_stop(
		profile.mid_stop as f32,
		&color.with_alpha(profile.mid_alpha).to_css(),
	);
	let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());

	ctx.begin_path();
	let _ = ctx.arc(x, y, profile.radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
