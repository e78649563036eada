//! Visual theming for the backdrop.
//!
//! Holds the particle palette, the background gradient stops and the overlay
//! colors, plus the CSS encodings the canvas expects.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
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

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// `#rrggbb`, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Eight-digit hex form `#rrggbbaa`, with `alpha` scaled to a byte.
	///
	/// Alpha is rounded and clamped into `0..=255` so out-of-range fractions
	/// still produce two hex digits.
	pub fn to_css_hex_alpha(self, alpha: f64) -> String {
		format!("{}{:02x}", self.to_css_rgb(), alpha_byte(alpha))
	}
}

/// Scales an opacity fraction to a byte.
pub fn alpha_byte(alpha: f64) -> u8 {
	if alpha.is_nan() {
		return 0;
	}
	(alpha * 255.0).round().clamp(0.0, 255.0) as u8
}

/// The fixed set of colors particles are drawn from.
#[derive(Clone, Debug)]
pub struct Palette {
	/// Candidate colors, picked uniformly.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Pinks and purples (default).
	pub fn orchid() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 102, 204), // Bright pink
				Color::rgb(153, 51, 255),  // Purple
				Color::rgb(102, 0, 255),   // Electric indigo
				Color::rgb(255, 51, 153),  // Vibrant pink
				Color::rgb(204, 102, 255), // Soft purple
			],
		}
	}

	/// Number of colors.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Whether the palette has no colors.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Color at `index`, wrapping around. Panics on an empty palette.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background gradient and overlay configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Gradient stops, spread evenly from 0.0 to 1.0.
	pub gradient: Vec<Color>,
	/// Pixels the gradient moves down per frame.
	pub drift_speed: f64,
	/// Full-viewport overlay drawn over the gradient.
	pub shade: Color,
}

/// Proximity line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Stroke color; its alpha is replaced by the distance falloff.
	pub color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct BackdropTheme {
	/// Gradient, drift and shade.
	pub background: BackgroundStyle,
	/// Proximity line style.
	pub link: LinkStyle,
	/// Particle colors.
	pub palette: Palette,
}

impl BackdropTheme {
	/// Deep violet gradient with pink/purple particles (default)
	pub fn violet() -> Self {
		Self {
			background: BackgroundStyle {
				gradient: vec![
					Color::rgb(26, 0, 51),
					Color::rgb(51, 0, 102),
					Color::rgb(102, 0, 153),
				],
				drift_speed: 0.5,
				shade: Color::rgba(0, 0, 0, 0.4),
			},
			link: LinkStyle {
				color: Color::rgb(255, 255, 255),
			},
			palette: Palette::orchid(),
		}
	}

	/// Gradient stop positions paired with their colors.
	pub fn gradient_stops(&self) -> impl Iterator<Item = (f64, Color)> + '_ {
		let stops = &self.background.gradient;
		let last = stops.len().saturating_sub(1).max(1) as f64;
		stops
			.iter()
			.enumerate()
			.map(move |(i, color)| (i as f64 / last, *color))
	}
}

impl Default for BackdropTheme {
	fn default() -> Self {
		Self::violet()
	}
}
