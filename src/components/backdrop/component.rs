//! Leptos component wrapping the backdrop canvas.
//!
//! On mount the component sizes the canvas to the window, builds the particle
//! field, registers `resize`/`pointermove`/`pointerleave` listeners and starts a
//! [`FrameLoop`]. All of it is owned by a [`Runtime`] that is dropped on cleanup,
//! which removes the listeners and cancels the pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, PointerEvent, Window};

use super::config::FieldConfig;
use super::frame::{BrowserFrames, EventListener, FrameLoop};
use super::state::BackdropState;
use super::theme::BackdropTheme;

/// Browser resources held for as long as the backdrop is mounted.
struct Runtime {
	_listeners: Vec<EventListener>,
	_frame_loop: FrameLoop,
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// 64-bit seed assembled from two `Math.random()` draws.
fn entropy_seed() -> u64 {
	let half = || (js_sys::Math::random() * 4_294_967_296.0) as u64;
	(half() << 32) | half()
}

/// Renders the animated particle backdrop as a fixed, full-viewport canvas.
///
/// The canvas ignores pointer input and is hidden from assistive technology.
/// Pass `config` to override the simulation constants. If the browser cannot
/// provide a 2D context the canvas stays blank and no loop is started.
#[component]
pub fn AnimatedBackdrop(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: Rc<RefCell<Option<Runtime>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let runtime_init = runtime.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("backdrop: no window, not animating");
			return;
		};
		let Some(mut ctx) = context_2d(&canvas) else {
			warn!("backdrop: 2d context unavailable, not animating");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let state = Rc::new(RefCell::new(BackdropState::new(
			config.clone(),
			BackdropTheme::default(),
			w,
			h,
			SmallRng::seed_from_u64(entropy_seed()),
		)));
		info!(
			"backdrop: animating {} particles on {}x{}",
			state.borrow().field.len(),
			w,
			h
		);

		let target: EventTarget = window.clone().into();
		let mut listeners = Vec::with_capacity(3);

		let (state_resize, canvas_resize, window_resize) =
			(state.clone(), canvas.clone(), window.clone());
		listeners.extend(EventListener::new(&target, "resize", move |_: Event| {
			let (nw, nh) = viewport_size(&window_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
			debug!("backdrop: resized to {}x{}", nw, nh);
		}));

		let state_move = state.clone();
		listeners.extend(EventListener::new(&target, "pointermove", move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
				state_move
					.borrow_mut()
					.pointer
					.track(ev.client_x() as f64, ev.client_y() as f64);
			}
		}));

		let state_leave = state.clone();
		listeners.extend(EventListener::new(&target, "pointerleave", move |_: Event| {
			state_leave.borrow_mut().pointer.clear();
		}));

		let frame_loop = FrameLoop::start(BrowserFrames::new(&window), move || {
			state.borrow_mut().frame(&mut ctx);
		});

		*runtime_init.borrow_mut() = Some(Runtime {
			_listeners: listeners,
			_frame_loop: frame_loop,
		});
	});

	let runtime_cleanup = SendWrapper::new(runtime);
	on_cleanup(move || {
		if runtime_cleanup.borrow_mut().take().is_some() {
			info!("backdrop: stopped");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="animated-backdrop"
			aria-hidden="true"
			style="position: fixed; inset: 0; width: 100%; height: 100%; pointer-events: none; filter: blur(4px);"
		/>
	}
}
