//! Visual theming for the skill graph.
//!
//! Colors and stroke styles for both render layers. Geometry-dependent values
//! (grid spacing, glow falloff) live with the code that computes them.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Opacity, 0 to 1.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build an opaque color from hue (degrees), saturation and lightness (0-1).
	pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
		let h = hue.rem_euclid(360.0) / 60.0;
		let s = saturation.clamp(0.0, 1.0);
		let l = lightness.clamp(0.0, 1.0);

		let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
		let (r1, g1, b1) = match h as u32 {
			0 => (chroma, x, 0.0),
			1 => (x, chroma, 0.0),
			2 => (0.0, chroma, x),
			3 => (0.0, x, chroma),
			4 => (x, 0.0, chroma),
			_ => (chroma, 0.0, x),
		};
		let m = l - chroma / 2.0;
		let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
		Self::rgb(channel(r1), channel(g1), channel(b1))
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Link line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Color,
	/// Line width in CSS pixels.
	pub width: f64,
}

/// Node circle and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill alpha applied to the ring color of unselected nodes.
	pub fill_alpha: f64,
	/// Fill alpha for hovered nodes.
	pub hover_fill_alpha: f64,
	/// Fill alpha for selected nodes.
	pub selected_fill_alpha: f64,
	/// Stroke for unselected nodes.
	pub neutral_stroke: Color,
	/// Width of the unselected stroke.
	pub neutral_stroke_width: f64,
	/// Stroke for the hovered node.
	pub hover_stroke: Color,
	/// Width of the hover stroke.
	pub hover_stroke_width: f64,
	/// Selected nodes are stroked with their ring color at this width.
	pub selected_stroke_width: f64,
	/// Label text color.
	pub label_color: Color,
	/// Label size for the smallest nodes.
	pub label_min_px: f64,
	/// Label size for the largest nodes.
	pub label_max_px: f64,
}

/// Warped grid line style.
#[derive(Clone, Debug)]
pub struct GridStyle {
	pub color: Color,
	/// Line width in CSS pixels.
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Page background behind both canvases.
	pub background: Color,
	/// Vector layer links.
	pub link: LinkStyle,
	/// Vector layer circles and labels.
	pub node: NodeStyle,
	/// Raster layer lattice.
	pub grid: GridStyle,
}

impl Theme {
	/// Dark theme (default)
	pub fn dusk() -> Self {
		Self {
			background: Color::rgb(10, 12, 17),
			link: LinkStyle {
				color: Color::rgba(120, 130, 150, 0.35),
				width: 1.0,
			},
			node: NodeStyle {
				fill_alpha: 0.18,
				hover_fill_alpha: 0.3,
				selected_fill_alpha: 0.42,
				neutral_stroke: Color::rgba(160, 160, 170, 0.55),
				neutral_stroke_width: 1.5,
				hover_stroke: Color::rgb(170, 170, 255),
				hover_stroke_width: 2.5,
				selected_stroke_width: 3.0,
				label_color: Color::rgba(255, 255, 255, 0.92),
				label_min_px: 10.0,
				label_max_px: 15.0,
			},
			grid: GridStyle {
				color: Color::rgba(90, 100, 120, 0.35),
				width: 1.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dusk()
	}
}
