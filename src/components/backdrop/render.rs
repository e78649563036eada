//! Canvas rendering for the backdrop.
//!
//! Drawing happens in four passes, back to front:
//! 1. Drifting linear gradient across the whole viewport
//! 2. Translucent shade over the gradient
//! 3. Particles as filled circles, faded by remaining life
//! 4. Proximity links between nearby particles

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::theme::{BackdropTheme, Color};

/// The drawing operations the renderer needs.
///
/// Implemented for the browser's 2D context; tests substitute a recorder.
pub trait Surface {
	/// Fills `[0, width) x [0, height)` with a linear gradient running from
	/// `start` to `end`.
	fn fill_viewport_gradient(
		&mut self,
		start: DVec2,
		end: DVec2,
		stops: &[(f64, Color)],
		width: f64,
		height: f64,
	);

	/// Fills `[0, width) x [0, height)` with a flat CSS color.
	fn fill_viewport(&mut self, width: f64, height: f64, style: &str);

	/// Fills a circle with a CSS color.
	fn fill_circle(&mut self, center: DVec2, radius: f64, style: &str);

	/// Strokes a straight line with a CSS color.
	fn stroke_line(&mut self, from: DVec2, to: DVec2, style: &str, width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn fill_viewport_gradient(
		&mut self,
		start: DVec2,
		end: DVec2,
		stops: &[(f64, Color)],
		width: f64,
		height: f64,
	) {
		let gradient = self.create_linear_gradient(start.x, start.y, end.x, end.y);
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
		}

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_viewport(&mut self, width: f64, height: f64, style: &str) {
		self.set_fill_style_str(style);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, center: DVec2, radius: f64, style: &str) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(style);
		self.fill();
	}

	fn stroke_line(&mut self, from: DVec2, to: DVec2, style: &str, width: f64) {
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.set_stroke_style_str(style);
		self.set_line_width(width);
		self.stroke();
	}
}

/// Slowly moving vertical offset for the background gradient.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradientDrift {
	/// Vertical shift of the gradient endpoints, in pixels.
	pub offset: f64,
}

impl GradientDrift {
	/// Moves the gradient down by `speed`, wrapping to 0 past `height`.
	pub fn advance(&mut self, speed: f64, height: f64) {
		self.offset += speed;
		if self.offset > height {
			self.offset = 0.0;
		}
	}
}

/// Renders one frame of the backdrop.
pub fn render<R: Rng, S: Surface + ?Sized>(
	field: &ParticleField<R>,
	drift: &GradientDrift,
	theme: &BackdropTheme,
	surface: &mut S,
) {
	draw_background(field, drift, theme, surface);
	draw_particles(field, surface);
	draw_links(field, theme, surface);
}

fn draw_background<R: Rng, S: Surface + ?Sized>(
	field: &ParticleField<R>,
	drift: &GradientDrift,
	theme: &BackdropTheme,
	surface: &mut S,
) {
	let (width, height) = (field.width(), field.height());
	let stops: Vec<(f64, Color)> = theme.gradient_stops().collect();

	surface.fill_viewport_gradient(
		DVec2::new(0.0, drift.offset),
		DVec2::new(width, height + drift.offset),
		&stops,
		width,
		height,
	);
	surface.fill_viewport(width, height, &theme.background.shade.to_css());
}

fn draw_particles<R: Rng, S: Surface + ?Sized>(field: &ParticleField<R>, surface: &mut S) {
	for p in field.particles() {
		surface.fill_circle(p.position, p.size, &p.color.to_css_hex_alpha(p.alpha));
	}
}

fn draw_links<R: Rng, S: Surface + ?Sized>(
	field: &ParticleField<R>,
	theme: &BackdropTheme,
	surface: &mut S,
) {
	let particles = field.particles();
	let width = field.config().link_width;
	let color = &theme.link.color;

	for link in field.connections() {
		let style = format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, link.alpha);
		surface.stroke_line(
			particles[link.from].position,
			particles[link.to].position,
			&style,
			width,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drift_wraps_past_height() {
		let mut drift = GradientDrift::default();
		for _ in 0..20 {
			drift.advance(0.5, 10.0);
		}
		assert_eq!(drift.offset, 10.0);
		drift.advance(0.5, 10.0);
		assert_eq!(drift.offset, 0.0);
	}

	#[test]
	fn drift_restarts_when_viewport_shrinks() {
		let mut drift = GradientDrift { offset: 400.0 };
		drift.advance(0.5, 300.0);
		assert_eq!(drift.offset, 0.0);
	}
}
