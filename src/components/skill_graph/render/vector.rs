//! Vector layer: links, node circles, and labels.

use std::f64::consts::PI;

use super::Surface;
use crate::components::skill_graph::model::{Link, SkillNode};
use crate::components::skill_graph::physics::Body;
use crate::components::skill_graph::theme::{Color, LinkStyle, NodeStyle, Theme};

/// Resolved fill and stroke for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeAppearance {
	pub fill: Color,
	pub stroke: Color,
	pub stroke_width: f64,
}

/// Selected beats hovered beats neutral.
pub fn node_appearance(
	node: &SkillNode,
	selected: bool,
	hovered: bool,
	style: &NodeStyle,
) -> NodeAppearance {
	if selected {
		NodeAppearance {
			fill: node.ring_color.with_alpha(style.selected_fill_alpha),
			stroke: node.ring_color,
			stroke_width: style.selected_stroke_width,
		}
	} else if hovered {
		NodeAppearance {
			fill: node.ring_color.with_alpha(style.hover_fill_alpha),
			stroke: style.hover_stroke,
			stroke_width: style.hover_stroke_width,
		}
	} else {
		NodeAppearance {
			fill: node.ring_color.with_alpha(style.fill_alpha),
			stroke: style.neutral_stroke,
			stroke_width: style.neutral_stroke_width,
		}
	}
}

/// Label size in CSS pixels for a node of `radius`.
pub fn label_px(radius: f64, style: &NodeStyle) -> f64 {
	(radius * 0.42).clamp(style.label_min_px, style.label_max_px)
}

pub(super) fn draw(
	surface: &Surface,
	nodes: &[SkillNode],
	bodies: &[Body],
	links: &[Link],
	selected: &[usize],
	hovered: Option<usize>,
	theme: &Theme,
) {
	draw_links(surface, bodies, links, &theme.link);

	// Selected nodes last so their thicker strokes sit on top.
	let is_selected = |h: usize| selected.contains(&h);
	for body in bodies.iter().filter(|b| !is_selected(b.handle)) {
		draw_node(surface, nodes, body, false, hovered == Some(body.handle), &theme.node);
	}
	for body in bodies.iter().filter(|b| is_selected(b.handle)) {
		draw_node(surface, nodes, body, true, hovered == Some(body.handle), &theme.node);
	}
}

fn draw_links(surface: &Surface, bodies: &[Body], links: &[Link], style: &LinkStyle) {
	if links.is_empty() {
		return;
	}
	let ctx = &surface.ctx;
	ctx.set_stroke_style_str(&style.color.to_css());
	ctx.set_line_width(style.width);
	ctx.begin_path();
	for link in links {
		let (Some(a), Some(b)) = (bodies.get(link.source), bodies.get(link.target)) else {
			continue;
		};
		ctx.move_to(a.position.x, a.position.y);
		ctx.line_to(b.position.x, b.position.y);
	}
	ctx.stroke();
}

fn draw_node(
	surface: &Surface,
	nodes: &[SkillNode],
	body: &Body,
	selected: bool,
	hovered: bool,
	style: &NodeStyle,
) {
	let Some(node) = nodes.get(body.handle) else {
		return;
	};
	let ctx = &surface.ctx;
	let look = node_appearance(node, selected, hovered, style);
	let (x, y) = (body.position.x, body.position.y);

	ctx.begin_path();
	let _ = ctx.arc(x, y, body.radius, 0.0, PI * 2.0);
	ctx.set_fill_style_str(&look.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&look.stroke.to_css());
	ctx.set_line_width(look.stroke_width);
	ctx.stroke();

	ctx.set_font(&format!("500 {:.0}px system-ui, sans-serif", label_px(body.radius, style)));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&style.label_color.to_css());
	let _ = ctx.fill_text(&node.id, x, y);
}
