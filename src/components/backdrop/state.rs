//! Per-mount backdrop state.
//!
//! Bundles the particle field with the gradient drift and the pointer tracker.
//! The frame loop owns one of these and calls [`BackdropState::frame`] once per
//! animation frame; the resize listener calls [`BackdropState::resize`].

use glam::DVec2;
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{self, GradientDrift, Surface};
use super::theme::BackdropTheme;

/// Last known pointer position over the window.
///
/// Recorded from `pointermove`/`pointerleave` but not read by the simulation
/// or the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerTracker {
	position: Option<DVec2>,
}

impl PointerTracker {
	/// Records the latest pointer position.
	pub fn track(&mut self, x: f64, y: f64) {
		self.position = Some(DVec2::new(x, y));
	}

	/// Forgets the pointer after it leaves the window.
	pub fn clear(&mut self) {
		self.position = None;
	}

	/// Last recorded position, if the pointer is over the window.
	pub fn position(&self) -> Option<DVec2> {
		self.position
	}
}

/// Everything one animation frame reads and writes.
pub struct BackdropState<R = SmallRng> {
	/// Particle pool.
	pub field: ParticleField<R>,
	/// Background gradient offset.
	pub drift: GradientDrift,
	/// Tracked pointer position.
	pub pointer: PointerTracker,
	/// Colors used for drawing.
	pub theme: BackdropTheme,
}

impl<R: Rng> BackdropState<R> {
	/// Builds a full pool for a `width` x `height` viewport.
	pub fn new(config: FieldConfig, theme: BackdropTheme, width: f64, height: f64, rng: R) -> Self {
		Self {
			field: ParticleField::new(config, theme.palette.clone(), width, height, rng),
			drift: GradientDrift::default(),
			pointer: PointerTracker::default(),
			theme,
		}
	}

	/// Advances the simulation one step, then draws the result.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		self.field.update();
		render::render(&self.field, &self.drift, &self.theme, surface);
		self.drift
			.advance(self.theme.background.drift_speed, self.field.height());
	}

	/// Rebuilds the pool for a new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::theme::Color;
	use super::*;

	struct Discard;

	impl Surface for Discard {
		fn fill_viewport_gradient(&mut self, _: DVec2, _: DVec2, _: &[(f64, Color)], _: f64, _: f64) {}
		fn fill_viewport(&mut self, _: f64, _: f64, _: &str) {}
		fn fill_circle(&mut self, _: DVec2, _: f64, _: &str) {}
		fn stroke_line(&mut self, _: DVec2, _: DVec2, _: &str, _: f64) {}
	}

	#[test]
	fn pointer_is_tracked_and_cleared() {
		let mut pointer = PointerTracker::default();
		assert_eq!(pointer.position(), None);
		pointer.track(12.0, 34.0);
		assert_eq!(pointer.position(), Some(DVec2::new(12.0, 34.0)));
		pointer.clear();
		assert_eq!(pointer.position(), None);
	}

	#[test]
	fn pointer_does_not_affect_particles() {
		let make = || {
			BackdropState::new(
				FieldConfig::default(),
				BackdropTheme::default(),
				500.0,
				400.0,
				SmallRng::seed_from_u64(21),
			)
		};
		let (mut idle, mut tracked) = (make(), make());
		tracked.pointer.track(250.0, 200.0);

		for _ in 0..20 {
			idle.frame(&mut Discard);
			tracked.frame(&mut Discard);
		}
		assert_eq!(idle.field.particles(), tracked.field.particles());
		assert_eq!(idle.drift, tracked.drift);
	}
}
