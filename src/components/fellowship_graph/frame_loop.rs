//! Ownership of the per-frame render callback.
//!
//! The callback reschedules itself through a [`FrameHandle`], which only holds
//! a weak reference to it. The single strong reference lives in [`FrameLoop`];
//! dropping the loop cancels the pending frame and drops the callback together
//! with everything it captured.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Requests and cancels frames for callbacks of type `C`.
pub trait FrameScheduler<C: ?Sized> {
	/// Ask for `callback` to run on the next frame, returning the request id.
	fn request(&self, callback: &C) -> Option<i32>;
	/// Withdraw a pending request.
	fn cancel(&self, id: i32);
}

/// `requestAnimationFrame` on the current window.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationFrames;

impl FrameScheduler<Closure<dyn FnMut()>> for AnimationFrames {
	fn request(&self, callback: &Closure<dyn FnMut()>) -> Option<i32> {
		web_sys::window()?
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel(&self, id: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

/// Sole owner of a frame callback.
pub struct FrameLoop<C, S: FrameScheduler<C>> {
	callback: Rc<RefCell<Option<C>>>,
	pending: Rc<Cell<Option<i32>>>,
	scheduler: S,
}

impl<C, S: FrameScheduler<C> + Clone> FrameLoop<C, S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			callback: Rc::new(RefCell::new(None)),
			pending: Rc::new(Cell::new(None)),
			scheduler,
		}
	}

	/// Handle that can install and schedule the callback without owning it.
	pub fn handle(&self) -> FrameHandle<C, S> {
		FrameHandle {
			callback: Rc::downgrade(&self.callback),
			pending: self.pending.clone(),
			scheduler: self.scheduler.clone(),
		}
	}
}

impl<C, S: FrameScheduler<C>> Drop for FrameLoop<C, S> {
	fn drop(&mut self) {
		if let Some(id) = self.pending.take() {
			self.scheduler.cancel(id);
		}
		let callback = self.callback.borrow_mut().take();
		drop(callback);
	}
}

/// Weak access to a [`FrameLoop`]; safe to capture inside the callback.
pub struct FrameHandle<C, S> {
	callback: Weak<RefCell<Option<C>>>,
	pending: Rc<Cell<Option<i32>>>,
	scheduler: S,
}

impl<C, S: Clone> Clone for FrameHandle<C, S> {
	fn clone(&self) -> Self {
		Self {
			callback: self.callback.clone(),
			pending: self.pending.clone(),
			scheduler: self.scheduler.clone(),
		}
	}
}

impl<C, S: FrameScheduler<C>> FrameHandle<C, S> {
	/// Store `callback` in the loop, cancelling any frame requested for the
	/// previous one. Returns `false` once the loop is gone.
	pub fn install(&self, callback: C) -> bool {
		let Some(slot) = self.callback.upgrade() else {
			return false;
		};
		if let Some(id) = self.pending.take() {
			self.scheduler.cancel(id);
		}
		let previous = slot.replace(Some(callback));
		drop(previous);
		true
	}

	/// Request the next frame. Returns `false` once the loop is gone.
	pub fn schedule(&self) -> bool {
		let Some(slot) = self.callback.upgrade() else {
			return false;
		};
		let slot = slot.borrow();
		let Some(callback) = slot.as_ref() else {
			return false;
		};
		self.pending.set(self.scheduler.request(callback));
		true
	}
}
