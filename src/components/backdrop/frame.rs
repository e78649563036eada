//! Owned handles for browser callbacks.
//!
//! [`FrameLoop`] drives a closure through a [`FrameScheduler`] until it is
//! stopped or dropped; in the browser that scheduler is `requestAnimationFrame`
//! ([`BrowserFrames`]). [`EventListener`] keeps a DOM listener registered for
//! as long as the handle lives. Both are single-threaded (`!Send`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

/// Source of "next frame" callbacks.
///
/// The loop installs its tick once, then asks for one invocation per frame.
pub trait FrameScheduler {
	/// Stores the callback later requests will invoke.
	fn install(&self, tick: Box<dyn FnMut()>);

	/// Requests one invocation of the installed tick, returning its handle.
	fn request(&self) -> Result<i32, String>;

	/// Cancels a request that has not fired yet.
	fn cancel(&self, handle: i32);

	/// Releases the installed tick.
	fn uninstall(&self);
}

/// `requestAnimationFrame` on a browser window.
pub struct BrowserFrames {
	window: Window,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl BrowserFrames {
	/// Scheduler bound to `window`.
	pub fn new(window: &Window) -> Self {
		Self {
			window: window.clone(),
			callback: RefCell::new(None),
		}
	}
}

impl FrameScheduler for BrowserFrames {
	fn install(&self, tick: Box<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(Closure::wrap(tick));
	}

	fn request(&self) -> Result<i32, String> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref().ok_or("no frame callback installed")?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| format!("{:?}", e))
	}

	fn cancel(&self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn uninstall(&self) {
		self.callback.borrow_mut().take();
	}
}

struct FrameLoopInner<S> {
	scheduler: S,
	running: Cell<bool>,
	pending: Cell<Option<i32>>,
}

impl<S: FrameScheduler> FrameLoopInner<S> {
	fn schedule(&self) {
		match self.scheduler.request() {
			Ok(handle) => self.pending.set(Some(handle)),
			Err(e) => {
				warn!("backdrop: frame request failed: {}", e);
				self.running.set(false);
				self.pending.set(None);
			}
		}
	}
}

/// A running animation loop.
///
/// The frame closure runs once per scheduled frame. After [`FrameLoop::stop`]
/// returns, or the handle is dropped, it never runs again.
pub struct FrameLoop<S: FrameScheduler = BrowserFrames> {
	inner: Rc<FrameLoopInner<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
	/// Schedules `frame` on the next frame and after every frame.
	///
	/// `stop` must not be called from inside `frame`.
	pub fn start(scheduler: S, mut frame: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(FrameLoopInner {
			scheduler,
			running: Cell::new(true),
			pending: Cell::new(None),
		});

		let weak = Rc::downgrade(&inner);
		inner.scheduler.install(Box::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.pending.set(None);
			if !inner.running.get() {
				return;
			}
			frame();
			if inner.running.get() {
				inner.schedule();
			}
		}));
		inner.schedule();

		Self { inner }
	}
}

impl<S: FrameScheduler> FrameLoop<S> {
	/// Whether frames are still being scheduled.
	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	/// Cancels the pending frame request and stops rescheduling.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(handle) = self.inner.pending.take() {
			self.inner.scheduler.cancel(handle);
		}
	}
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
	fn drop(&mut self) {
		self.stop();
		self.inner.scheduler.uninstall();
	}
}

/// A DOM event listener that is removed when the handle is dropped.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	/// Registers `handler` for `event` on `target`.
	///
	/// Returns `None` if the browser refuses the registration.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
			warn!("backdrop: failed to listen for {}: {:?}", event, e);
			return None;
		}
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Hands out sequential handles and lets the test fire the tick by hand.
	#[derive(Default)]
	struct ManualFrames {
		tick: RefCell<Option<Box<dyn FnMut()>>>,
		/// Tick moved aside by `uninstall`, to replay a callback the host had
		/// already dispatched.
		released: RefCell<Option<Box<dyn FnMut()>>>,
		next_handle: Cell<i32>,
		requested: RefCell<Vec<i32>>,
		cancelled: RefCell<Vec<i32>>,
		fail: Cell<bool>,
	}

	impl ManualFrames {
		fn fire(&self) {
			if let Some(tick) = self.tick.borrow_mut().as_mut() {
				tick();
			}
		}

		fn fire_released(&self) {
			if let Some(tick) = self.released.borrow_mut().as_mut() {
				tick();
			}
		}
	}

	impl FrameScheduler for Rc<ManualFrames> {
		fn install(&self, tick: Box<dyn FnMut()>) {
			*self.tick.borrow_mut() = Some(tick);
		}

		fn request(&self) -> Result<i32, String> {
			if self.fail.get() {
				return Err("refused".to_string());
			}
			let handle = self.next_handle.get() + 1;
			self.next_handle.set(handle);
			self.requested.borrow_mut().push(handle);
			Ok(handle)
		}

		fn cancel(&self, handle: i32) {
			self.cancelled.borrow_mut().push(handle);
		}

		fn uninstall(&self) {
			*self.released.borrow_mut() = self.tick.borrow_mut().take();
		}
	}

	fn counting_loop(frames: &Rc<ManualFrames>) -> (FrameLoop<Rc<ManualFrames>>, Rc<Cell<u32>>) {
		let count = Rc::new(Cell::new(0));
		let counter = count.clone();
		let frame_loop = FrameLoop::start(frames.clone(), move || counter.set(counter.get() + 1));
		(frame_loop, count)
	}

	#[test]
	fn each_tick_runs_frame_and_reschedules() {
		let frames = Rc::new(ManualFrames::default());
		let (frame_loop, count) = counting_loop(&frames);
		assert!(frame_loop.is_running());
		assert_eq!(*frames.requested.borrow(), vec![1]);
		assert_eq!(count.get(), 0);

		frames.fire();
		frames.fire();
		assert_eq!(count.get(), 2);
		assert_eq!(*frames.requested.borrow(), vec![1, 2, 3]);
		assert!(frames.cancelled.borrow().is_empty());
	}

	#[test]
	fn stop_cancels_pending_request() {
		let frames = Rc::new(ManualFrames::default());
		let (frame_loop, _count) = counting_loop(&frames);
		frames.fire();

		frame_loop.stop();
		assert!(!frame_loop.is_running());
		assert_eq!(*frames.cancelled.borrow(), vec![2]);

		frame_loop.stop();
		assert_eq!(*frames.cancelled.borrow(), vec![2]);
	}

	#[test]
	fn queued_tick_after_stop_skips_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (frame_loop, count) = counting_loop(&frames);

		frame_loop.stop();
		frames.fire();
		assert_eq!(count.get(), 0);
		assert_eq!(*frames.requested.borrow(), vec![1]);
	}

	#[test]
	fn queued_tick_after_drop_skips_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (frame_loop, count) = counting_loop(&frames);
		frames.fire();
		assert_eq!(count.get(), 1);

		drop(frame_loop);
		assert_eq!(*frames.cancelled.borrow(), vec![2]);
		assert!(frames.tick.borrow().is_none());

		frames.fire_released();
		assert_eq!(count.get(), 1);
		assert_eq!(*frames.requested.borrow(), vec![1, 2]);
	}

	#[test]
	fn refused_first_request_never_runs() {
		let frames = Rc::new(ManualFrames::default());
		frames.fail.set(true);
		let (frame_loop, count) = counting_loop(&frames);
		assert!(!frame_loop.is_running());

		frames.fire();
		assert_eq!(count.get(), 0);

		drop(frame_loop);
		assert!(frames.cancelled.borrow().is_empty());
	}

	#[test]
	fn refused_reschedule_stops_loop() {
		let frames = Rc::new(ManualFrames::default());
		let (frame_loop, count) = counting_loop(&frames);

		frames.fail.set(true);
		frames.fire();
		assert_eq!(count.get(), 1);
		assert!(!frame_loop.is_running());

		frames.fire();
		assert_eq!(count.get(), 1);
	}
}
