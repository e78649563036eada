//! Animated particle backdrop.
//!
//! Draws a drifting violet gradient with a fixed pool of glowing particles on a
//! full-viewport canvas:
//! - Particles drift, bounce off the viewport edges and pulse in size
//! - Each particle fades out over its lifetime and is reborn in its slot
//! - Nearby particles are joined by lines that fade with distance
//!
//! # Example
//!
//! ```ignore
//! use backdrop::AnimatedBackdrop;
//!
//! view! {
//!     <AnimatedBackdrop />
//!     <main>"page content"</main>
//! }
//! ```

mod component;
mod config;
mod frame;
mod particles;
mod render;
mod state;
mod theme;

pub use component::AnimatedBackdrop;
pub use config::FieldConfig;
pub use frame::{BrowserFrames, FrameLoop, FrameScheduler};
pub use particles::{Link, Particle, ParticleField};
pub use render::{GradientDrift, Surface};
pub use state::{BackdropState, PointerTracker};
pub use theme::{BackdropTheme, Color, Palette};
