//! The particle pool behind the backdrop.
//!
//! Particles live in one fixed-length slice for the lifetime of the field. A
//! particle whose life runs out is overwritten in its slot by a freshly spawned
//! one, so the pool never grows or shrinks. Resizing the viewport respawns every
//! slot inside the new bounds.

use glam::DVec2;
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::theme::{Color, Palette};

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Center in canvas pixels.
	pub position: DVec2,
	/// Displacement per frame.
	pub velocity: DVec2,
	/// Velocity change per frame, cleared after every step.
	pub acceleration: DVec2,
	/// Current radius.
	pub size: f64,
	/// Resting radius the size oscillates around.
	pub base_size: f64,
	/// Fixed for the particle's life.
	pub color: Color,
	/// Always `life / max_life`.
	pub alpha: f64,
	/// Frames left before rebirth.
	pub life: u32,
	/// Lifetime the particle was spawned with.
	pub max_life: u32,
	/// Whether the size oscillation is currently growing.
	pub grow: bool,
}

impl Particle {
	/// Adds a force for the next step only.
	pub fn apply_force(&mut self, force: DVec2) {
		self.acceleration += force;
	}

	/// Advances the particle by one frame inside `bounds`.
	///
	/// Returns `true` once the particle has no life left and must be respawned.
	pub fn step(&mut self, bounds: DVec2, config: &FieldConfig) -> bool {
		self.life = self.life.saturating_sub(1);
		self.alpha = self.life as f64 / self.max_life.max(1) as f64;

		// Reflect without clamping: the particle may sit past a wall for a frame.
		if self.position.x < 0.0 || self.position.x > bounds.x {
			self.velocity.x = -self.velocity.x;
		}
		if self.position.y < 0.0 || self.position.y > bounds.y {
			self.velocity.y = -self.velocity.y;
		}

		self.velocity += self.acceleration;
		self.position += self.velocity;

		self.oscillate(config);

		self.acceleration = DVec2::ZERO;

		self.life == 0
	}

	fn oscillate(&mut self, config: &FieldConfig) {
		let min = self.base_size * (1.0 - config.size_swing);
		let max = self.base_size * (1.0 + config.size_swing);

		if self.grow {
			self.size = (self.size + config.size_step).min(max);
			if self.size >= max {
				self.grow = false;
			}
		} else {
			self.size = (self.size - config.size_step).max(min);
			if self.size <= min {
				self.grow = true;
			}
		}
	}
}

/// Creates particles with randomized attributes.
///
/// Generic over the random source so tests can use a seeded generator.
pub struct Spawner<R> {
	rng: R,
	config: FieldConfig,
	palette: Palette,
}

impl<R: Rng> Spawner<R> {
	/// Spawner drawing from `palette` with the ranges in `config`.
	pub fn new(config: FieldConfig, palette: Palette, rng: R) -> Self {
		Self {
			rng,
			config,
			palette,
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Spawns a particle at `position` with fresh color, size, life and velocity.
	pub fn spawn(&mut self, position: DVec2) -> Particle {
		let color = if self.palette.is_empty() {
			Color::rgb(255, 255, 255)
		} else {
			self.palette.get(self.rng.gen_range(0..self.palette.len()))
		};
		let (size_min, size_max) = self.config.size_range;
		let size = self.sample(size_min, size_max);
		let (life_min, life_max) = self.config.life_range;
		let life = if life_max > life_min {
			self.rng.gen_range(life_min..life_max)
		} else {
			life_min
		}
		.max(1);
		let speed = self.config.max_speed;
		let velocity = DVec2::new(self.sample(-speed, speed), self.sample(-speed, speed));

		Particle {
			position,
			velocity,
			acceleration: DVec2::ZERO,
			size,
			base_size: size,
			color,
			alpha: 1.0,
			life,
			max_life: life,
			grow: self.rng.gen_bool(0.5),
		}
	}

	/// Spawns a particle at a uniformly random point of `[0, w) x [0, h)`.
	pub fn spawn_within(&mut self, bounds: DVec2) -> Particle {
		let position = DVec2::new(self.sample(0.0, bounds.x), self.sample(0.0, bounds.y));
		self.spawn(position)
	}

	/// Uniform sample from `[low, high)`, or `low` for an empty range.
	fn sample(&mut self, low: f64, high: f64) -> f64 {
		if high > low {
			self.rng.gen_range(low..high)
		} else {
			low
		}
	}
}

/// Fixed-size pool of particles bound to a viewport.
pub struct ParticleField<R = SmallRng> {
	particles: Box<[Particle]>,
	spawner: Spawner<R>,
	bounds: DVec2,
}

impl<R: Rng> ParticleField<R> {
	/// Fills a new pool of `config.count` particles spread over the viewport.
	pub fn new(config: FieldConfig, palette: Palette, width: f64, height: f64, rng: R) -> Self {
		let count = config.count;
		let bounds = DVec2::new(width, height);
		let mut spawner = Spawner::new(config, palette, rng);
		let particles = (0..count).map(|_| spawner.spawn_within(bounds)).collect();

		Self {
			particles,
			spawner,
			bounds,
		}
	}

	/// Moves the field to new viewport dimensions, respawning every slot.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = DVec2::new(width, height);
		for slot in self.particles.iter_mut() {
			*slot = self.spawner.spawn_within(self.bounds);
		}
	}

	/// Advances every particle by one frame, in pool order.
	pub fn update(&mut self) {
		for slot in self.particles.iter_mut() {
			if slot.step(self.bounds, &self.spawner.config) {
				*slot = self.spawner.spawn_within(self.bounds);
			}
		}
	}

	/// Proximity links between particles, see [`connections`].
	pub fn connections(&self) -> impl Iterator<Item = Link> + '_ {
		connections(&self.particles, self.spawner.config.link_distance)
	}

	/// All slots in pool order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable access to the slots. The pool length cannot change through it.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Pool size, fixed at construction.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the pool has no slots.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Viewport width in pixels.
	pub fn width(&self) -> f64 {
		self.bounds.x
	}

	/// Viewport height in pixels.
	pub fn height(&self) -> f64 {
		self.bounds.y
	}

	/// Active configuration.
	pub fn config(&self) -> &FieldConfig {
		self.spawner.config()
	}
}

/// A line to draw between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Lower pool index.
	pub from: usize,
	/// Higher pool index.
	pub to: usize,
	/// Euclidean distance between the two centers.
	pub distance: f64,
	/// Stroke opacity, `1 - distance / max_distance`.
	pub alpha: f64,
}

/// Every unordered pair closer than `max_distance`, each reported once with
/// `from < to`.
///
/// This is a plain all-pairs scan, quadratic in the pool size.
pub fn connections(particles: &[Particle], max_distance: f64) -> impl Iterator<Item = Link> + '_ {
	particles.iter().enumerate().flat_map(move |(i, a)| {
		particles[i + 1..]
			.iter()
			.enumerate()
			.filter_map(move |(offset, b)| {
				let distance = a.position.distance(b.position);
				(distance < max_distance).then(|| Link {
					from: i,
					to: i + 1 + offset,
					distance,
					alpha: 1.0 - distance / max_distance,
				})
			})
	})
}
