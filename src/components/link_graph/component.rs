use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent,
	TouchEvent, Window,
};

use super::config::GraphConfig;
use super::render;
use super::state::LinkGraphState;
use super::surface::{
	FrameLoop, ListenerGuard, SizeObserver, Subscriptions, backing_size, pixel_ratio,
};
use super::types::{Point, SiteLink};

/// Full-page navigation, used when no `on_navigate` callback is supplied.
pub fn navigate_full_page(route: &str) {
	let Some(window) = web_sys::window() else {
		warn!("no window; dropping navigation to {route}");
		return;
	};
	if let Err(err) = window.location().set_href(route) {
		warn!("navigation to {route} failed: {err:?}");
	}
}

#[component]
pub fn LinkGraphCanvas(
	links: Vec<SiteLink>,
	#[prop(into)] glow: Signal<bool>,
	#[prop(optional)] on_navigate: Option<Callback<String>>,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(LinkGraphState::new(
		&links,
		&config,
		&mut rand::thread_rng(),
	)));
	let subs = StoredValue::new_local(Subscriptions::default());
	let navigate = move |route: String| {
		info!("navigating to {route}");
		match on_navigate {
			Some(cb) => cb.run(route),
			None => navigate_full_page(&route),
		}
	};

	let state_mount = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if subs.with_value(Subscriptions::is_active) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match mount(&canvas, &state_mount, config.max_pixel_ratio, navigate) {
			Ok(mounted) => {
				subs.set_value(mounted);
				info!(
					"link graph mounted with {} nodes",
					state_mount.borrow().model.nodes().len()
				);
			}
			Err(err) => warn!("link graph failed to mount: {err:?}"),
		}
	});

	let state_glow = state.clone();
	Effect::new(move |_| {
		let on = glow.get();
		state_glow.borrow_mut().set_glow(on);
	});

	on_cleanup(move || {
		if subs.try_update_value(Subscriptions::teardown).is_some() {
			info!("link graph torn down");
		}
	});

	let nav_links = state
		.borrow()
		.snapshot()
		.nodes
		.into_iter()
		.map(|n| view! { <li><a href=n.route>{n.label}</a></li> })
		.collect_view();

	view! {
		<div class="link-graph">
			<canvas
				node_ref=canvas_ref
				class="link-graph-canvas"
				style="display: block; width: 100%; height: 100%; cursor: grab; touch-action: none;"
			/>
			<nav class="sr-only" aria-label="Site sections">
				<ul>{nav_links}</ul>
			</nav>
		</div>
	}
}

fn mount(
	canvas: &HtmlCanvasElement,
	state: &Rc<RefCell<LinkGraphState>>,
	max_pixel_ratio: f64,
	navigate: impl Fn(String) + Copy + 'static,
) -> Result<Subscriptions, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into()?;
	fit_surface(&window, canvas, &ctx, state, max_pixel_ratio);

	let mut subs = Subscriptions::default();

	let (canvas_fit, ctx_fit, state_fit, window_fit) =
		(canvas.clone(), ctx.clone(), state.clone(), window.clone());
	subs.observe_size(SizeObserver::observe(canvas, move || {
		fit_surface(&window_fit, &canvas_fit, &ctx_fit, &state_fit, max_pixel_ratio);
	})?);

	let (state_frame, mut painter) = (state.clone(), ctx);
	subs.run_frames(FrameLoop::start(&window, move |now| {
		let mut s = state_frame.borrow_mut();
		s.frame(now);
		render::render(&s, &mut painter);
	}));

	let surface: &EventTarget = canvas.as_ref();
	let host: &EventTarget = window.as_ref();

	let (state_down, canvas_down) = (state.clone(), canvas.clone());
	subs.listen(ListenerGuard::attach(
		surface,
		&["mousedown", "touchstart"],
		false,
		move |ev| {
			let Some(p) = event_point(&canvas_down, &ev) else {
				return;
			};
			if ev.is_instance_of::<TouchEvent>() {
				ev.prevent_default();
			}
			state_down.borrow_mut().pointer_down(p);
		},
	)?);

	let (state_move, canvas_move) = (state.clone(), canvas.clone());
	subs.listen(ListenerGuard::attach(
		surface,
		&["mousemove", "touchmove"],
		false,
		move |ev| {
			let Some(p) = event_point(&canvas_move, &ev) else {
				return;
			};
			let mut s = state_move.borrow_mut();
			s.pointer_move(p);
			if s.interaction.is_dragging() && ev.is_instance_of::<TouchEvent>() {
				ev.prevent_default();
			}
			let cursor = if s.interaction.hover().is_some() { "pointer" } else { "grab" };
			let _ = HtmlElement::style(&canvas_move).set_property("cursor", cursor);
		},
	)?);

	let state_leave = state.clone();
	subs.listen(ListenerGuard::attach(surface, &["mouseleave"], true, move |_| {
		state_leave.borrow_mut().pointer_leave();
	})?);

	let (state_up, canvas_up) = (state.clone(), canvas.clone());
	subs.listen(ListenerGuard::attach(host, &["mouseup", "touchend"], true, move |ev| {
		let p = event_point(&canvas_up, &ev);
		// Release the borrow before navigating; the callback may re-enter.
		let route = state_up.borrow_mut().pointer_up(p);
		if let Some(route) = route {
			navigate(route);
		}
	})?);

	let state_cancel = state.clone();
	subs.listen(ListenerGuard::attach(host, &["touchcancel"], true, move |_| {
		state_cancel.borrow_mut().pointer_cancel();
	})?);

	Ok(subs)
}

/// Match the backing store to the displayed box at device pixel density.
fn fit_surface(
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	state: &RefCell<LinkGraphState>,
	max_pixel_ratio: f64,
) {
	let rect = canvas.get_bounding_client_rect();
	let dpr = pixel_ratio(window.device_pixel_ratio(), max_pixel_ratio);
	canvas.set_width(backing_size(rect.width(), dpr));
	canvas.set_height(backing_size(rect.height(), dpr));
	if let Err(err) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
		warn!("set_transform failed: {err:?}");
	}
	state.borrow_mut().resize(rect.width(), rect.height());
	debug!("surface fitted to {}x{} @{dpr}", rect.width(), rect.height());
}

fn surface_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

fn event_point(canvas: &HtmlCanvasElement, ev: &Event) -> Option<Point> {
	if let Some(mouse) = ev.dyn_ref::<MouseEvent>() {
		return Some(surface_point(canvas, mouse.client_x(), mouse.client_y()));
	}
	let touch = ev.dyn_ref::<TouchEvent>()?;
	let first = touch
		.touches()
		.get(0)
		.or_else(|| touch.changed_touches().get(0))?;
	Some(surface_point(canvas, first.client_x(), first.client_y()))
}
