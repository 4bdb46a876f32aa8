//! Host-surface plumbing: the animation-frame loop, resize observation and
//! DOM listeners, all released together by [`Subscriptions::teardown`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, ResizeObserver, Window};

/// Effective device pixel ratio: non-positive or missing ratios fall back to 1.
pub fn pixel_ratio(raw: f64, max: f64) -> f64 {
	if raw.is_finite() && raw > 0.0 {
		raw.min(max)
	} else {
		1.0
	}
}

/// Backing-store size in device pixels, never zero.
pub fn backing_size(logical: f64, ratio: f64) -> u32 {
	(logical * ratio).max(1.0) as u32
}

struct FrameLoopInner {
	window: Window,
	alive: Cell<bool>,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoopInner {
	fn schedule(&self) {
		if !self.alive.get() {
			return;
		}
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => self.handle.set(Some(handle)),
			Err(err) => warn!("request_animation_frame failed: {err:?}"),
		}
	}
}

/// Calls `on_frame` with the animation timestamp once per display refresh
/// until cancelled.
pub struct FrameLoop {
	inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
	pub fn start(window: &Window, mut on_frame: impl FnMut(f64) + 'static) -> Self {
		let inner = Rc::new(FrameLoopInner {
			window: window.clone(),
			alive: Cell::new(true),
			handle: Cell::new(None),
			callback: RefCell::new(None),
		});
		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			if !inner.alive.get() {
				return;
			}
			on_frame(now);
			inner.schedule();
		}));
		inner.schedule();
		Self { inner }
	}

	pub fn cancel(&self) {
		self.inner.alive.set(false);
		if let Some(handle) = self.inner.handle.take() {
			if let Err(err) = self.inner.window.cancel_animation_frame(handle) {
				warn!("cancel_animation_frame failed: {err:?}");
			}
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.cancel();
		self.inner.callback.borrow_mut().take();
	}
}

/// A DOM listener registered for one or more event kinds; removed on drop.
pub struct ListenerGuard {
	target: EventTarget,
	kinds: &'static [&'static str],
	callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
	/// Touch listeners must be non-passive to be allowed to cancel scrolling.
	pub fn attach(
		target: &EventTarget,
		kinds: &'static [&'static str],
		passive: bool,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, JsValue> {
		// `kinds` grows only as registrations succeed, so a failure part way
		// through drops a guard that detaches exactly what was added.
		let mut guard = Self {
			target: target.clone(),
			kinds: &[],
			callback: Closure::<dyn FnMut(Event)>::new(handler),
		};
		let options = AddEventListenerOptions::new();
		options.set_passive(passive);
		for (registered, kind) in kinds.iter().enumerate() {
			guard.target.add_event_listener_with_callback_and_add_event_listener_options(
				kind,
				guard.callback.as_ref().unchecked_ref(),
				&options,
			)?;
			guard.kinds = &kinds[..=registered];
		}
		Ok(guard)
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		for kind in self.kinds {
			let _ = self
				.target
				.remove_event_listener_with_callback(kind, self.callback.as_ref().unchecked_ref());
		}
	}
}

/// Runs a callback whenever the observed element's box changes size.
pub struct SizeObserver {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut()>,
}

impl SizeObserver {
	pub fn observe(
		element: &HtmlElement,
		on_resize: impl FnMut() + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut()>::new(on_resize);
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(element);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for SizeObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Everything a mounted graph has registered with the host.
#[derive(Default)]
pub struct Subscriptions {
	frames: Option<FrameLoop>,
	size: Option<SizeObserver>,
	listeners: Vec<ListenerGuard>,
}

impl Subscriptions {
	pub fn run_frames(&mut self, frames: FrameLoop) {
		self.frames = Some(frames);
	}

	pub fn observe_size(&mut self, size: SizeObserver) {
		self.size = Some(size);
	}

	pub fn listen(&mut self, guard: ListenerGuard) {
		self.listeners.push(guard);
	}

	pub fn is_active(&self) -> bool {
		self.frames.is_some() || self.size.is_some() || !self.listeners.is_empty()
	}

	/// Stop the frame loop and release observers and listeners. Safe to call
	/// any number of times, mounted or not.
	pub fn teardown(&mut self) {
		if let Some(frames) = self.frames.take() {
			frames.cancel();
		}
		self.size = None;
		self.listeners.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn teardown_without_mount_is_idempotent() {
		let mut subs = Subscriptions::default();
		assert!(!subs.is_active());
		subs.teardown();
		subs.teardown();
		assert!(!subs.is_active());
	}

	#[test]
	fn pixel_ratio_is_capped_and_sane() {
		assert_eq!(pixel_ratio(1.0, 2.0), 1.0);
		assert_eq!(pixel_ratio(1.5, 2.0), 1.5);
		assert_eq!(pixel_ratio(3.0, 2.0), 2.0);
		assert_eq!(pixel_ratio(0.0, 2.0), 1.0);
		assert_eq!(pixel_ratio(f64::NAN, 2.0), 1.0);
	}

	#[test]
	fn backing_store_never_collapses_to_zero() {
		assert_eq!(backing_size(400.0, 2.0), 800);
		assert_eq!(backing_size(0.0, 2.0), 1);
		assert_eq!(backing_size(0.2, 1.0), 1);
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use super::*;
	use wasm_bindgen_futures::JsFuture;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn window() -> Window {
		web_sys::window().expect("browser window")
	}

	async fn next_frame() {
		let ticked = js_sys::Promise::new(&mut |resolve, _| {
			window()
				.request_animation_frame(&resolve)
				.expect("request_animation_frame");
		});
		JsFuture::from(ticked).await.expect("frame promise");
	}

	fn counter() -> (Rc<Cell<u32>>, impl FnMut(Event) + 'static) {
		let count = Rc::new(Cell::new(0));
		let bump = count.clone();
		(count, move |_| bump.set(bump.get() + 1))
	}

	#[wasm_bindgen_test]
	async fn teardown_stops_a_running_loop() {
		let frames = Rc::new(Cell::new(0u32));
		let bump = frames.clone();
		let mut subs = Subscriptions::default();
		subs.run_frames(FrameLoop::start(&window(), move |_| bump.set(bump.get() + 1)));

		next_frame().await;
		next_frame().await;
		assert!(frames.get() > 0);

		subs.teardown();
		subs.teardown();
		assert!(!subs.is_active());
		let stopped_at = frames.get();
		for _ in 0..3 {
			next_frame().await;
		}
		assert_eq!(frames.get(), stopped_at);
	}

	#[wasm_bindgen_test]
	fn teardown_detaches_every_listener_kind() {
		let target = EventTarget::new().expect("event target");
		let (count, handler) = counter();
		let mut subs = Subscriptions::default();
		subs.listen(ListenerGuard::attach(&target, &["ping", "pong"], true, handler).unwrap());

		for kind in ["ping", "pong"] {
			target.dispatch_event(&Event::new(kind).unwrap()).unwrap();
		}
		assert_eq!(count.get(), 2);

		subs.teardown();
		for kind in ["ping", "pong"] {
			target.dispatch_event(&Event::new(kind).unwrap()).unwrap();
		}
		assert_eq!(count.get(), 2);
	}

	#[wasm_bindgen_test]
	fn failed_registration_leaves_nothing_behind() {
		// A plain object is not an event target, so the first registration
		// fails and the guard must not try to detach anything.
		let bogus: EventTarget = js_sys::Object::new().unchecked_into();
		let (count, handler) = counter();
		assert!(ListenerGuard::attach(&bogus, &["ping"], true, handler).is_err());
		assert_eq!(count.get(), 0);
	}
}
