//! Leptos component wiring the skill graph to the DOM.
//!
//! Two canvases are stacked inside a full-window container: the raster layer
//! below, the vector layer on top receiving pointer events. A
//! `requestAnimationFrame` loop steps the simulation and renders. The loop is
//! stopped before every rebuild (resize, grouping change, new data) and
//! restarted afterwards, so two simulations never run at once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, PointerEvent, Window};

use super::config::GraphConfig;
use super::geometry::{Vec2, Viewport};
use super::model::GroupingMode;
use super::panel::{DetailPanel, GroupingPicker, UsageHint};
use super::physics::REFERENCE_STEP_MS;
use super::render::{RenderQuality, Renderer, Surface};
use super::state::{GraphEvent, SkillDetail, SkillGraphState};
use super::types::SkillData;

/// Simulation state plus the renderer drawing it.
struct GraphContext {
	state: SkillGraphState,
	renderer: Renderer,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// `requestAnimationFrame` driver with an explicit stop.
#[derive(Clone)]
struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<i32>>>,
	last_frame: Rc<Cell<Option<f64>>>,
}

impl FrameLoop {
	fn new(context: SharedContext) -> Self {
		let frames = Self {
			callback: Rc::new(RefCell::new(None)),
			pending: Rc::new(Cell::new(None)),
			last_frame: Rc::new(Cell::new(None)),
		};

		let inner = frames.clone();
		*frames.callback.borrow_mut() = Some(Closure::new(move || {
			inner.pending.set(None);
			let now = js_sys::Date::now();
			let dt = inner
				.last_frame
				.replace(Some(now))
				.map_or(REFERENCE_STEP_MS, |last| now - last);

			if let Some(ref mut c) = *context.borrow_mut() {
				c.state.tick(dt);
				c.renderer.render(&c.state);
			}
			inner.request();
		}));
		frames
	}

	fn request(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.callback.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.pending.set(Some(id));
			}
		}
	}

	fn start(&self) {
		if self.pending.get().is_none() {
			self.last_frame.set(None);
			self.request();
		}
	}

	fn stop(&self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}
}

/// Copyable access to the running graph for child widgets.
///
/// Every mutation goes through here so the loop is paused around rebuilds and
/// the panel signals stay in sync with the state.
#[derive(Clone, Copy)]
pub struct GraphHandle {
	context: StoredValue<SharedContext, LocalStorage>,
	frames: StoredValue<FrameLoop, LocalStorage>,
	details: RwSignal<Vec<SkillDetail>>,
	hint: RwSignal<bool>,
	mode: RwSignal<GroupingMode>,
}

impl GraphHandle {
	/// Run `f` against the state, then publish the resulting events.
	fn apply(&self, f: impl FnOnce(&mut SkillGraphState) -> Vec<GraphEvent>) {
		let outcome = self.context.try_with_value(|context| {
			let mut guard = context.borrow_mut();
			let c = guard.as_mut()?;
			let events = f(&mut c.state);
			let details = events
				.contains(&GraphEvent::SelectionChanged)
				.then(|| c.state.selection_details());
			Some((events, details))
		});

		let Some(Some((events, details))) = outcome else {
			return;
		};
		if let Some(details) = details {
			self.details.set(details);
		}
		if events.contains(&GraphEvent::HintDismissed) {
			self.hint.set(false);
		}
	}

	/// Like [`apply`](Self::apply), with the frame loop stopped for the
	/// duration.
	fn rebuild_with(&self, f: impl FnOnce(&mut SkillGraphState) -> Vec<GraphEvent>) {
		self.frames.with_value(FrameLoop::stop);
		self.apply(f);
		self.frames.with_value(FrameLoop::start);
	}

	/// Active grouping mode.
	pub fn mode(&self) -> RwSignal<GroupingMode> {
		self.mode
	}

	/// Selected skills, refreshed whenever the selection changes.
	pub fn details(&self) -> RwSignal<Vec<SkillDetail>> {
		self.details
	}

	/// Whether the usage hint is still showing.
	pub fn hint(&self) -> RwSignal<bool> {
		self.hint
	}

	/// Switch grouping and rebuild the world.
	pub fn set_grouping(&self, mode: GroupingMode) {
		self.mode.set(mode);
		self.rebuild_with(|state| {
			state.set_grouping(mode);
			Vec::new()
		});
	}

	/// Open or close one detail entry.
	pub fn toggle_expanded(&self, id: &str) {
		self.apply(|state| state.toggle_expanded(id));
	}

	/// Clear the selection.
	pub fn deselect_all(&self) {
		self.apply(SkillGraphState::deselect_all);
	}

	fn stop(&self) {
		let _ = self.frames.try_with_value(FrameLoop::stop);
	}
}

fn window_viewport(window: &Window) -> Viewport {
	let size = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	Viewport::new(size(window.inner_width(), 800.0), size(window.inner_height(), 600.0))
		.with_dpr(window.device_pixel_ratio())
}

fn local_point(canvas: &HtmlCanvasElement, ev: &PointerEvent) -> Vec2 {
	let rect = canvas.get_bounding_client_rect();
	Vec2::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Full-window interactive skill graph with its grouping picker, usage hint,
/// and detail panel.
///
/// Data comes in through the reactive `data` signal. A new value replaces the
/// node set in place, keeping whatever selected skills still exist.
#[component]
pub fn SkillGraph(
	/// Skills to show.
	#[prop(into)]
	data: Signal<SkillData>,
	/// Grouping mode on first render.
	#[prop(default = GroupingMode::Category)]
	grouping: GroupingMode,
	/// Tuning; defaults to [`GraphConfig::default`].
	#[prop(optional)]
	config: Option<GraphConfig>,
) -> impl IntoView {
	let vector_ref = NodeRef::<leptos::html::Canvas>::new();
	let raster_ref = NodeRef::<leptos::html::Canvas>::new();

	let context: SharedContext = Rc::new(RefCell::new(None));
	let frames = FrameLoop::new(context.clone());
	let handle = GraphHandle {
		context: StoredValue::new_local(context.clone()),
		frames: StoredValue::new_local(frames.clone()),
		details: RwSignal::new(Vec::new()),
		hint: RwSignal::new(true),
		mode: RwSignal::new(grouping),
	};
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let background = config.theme.background.to_css();

	let context_init = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		let (Some(vector), Some(raster)) = (vector_ref.get(), raster_ref.get()) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let viewport = window_viewport(&window);

		frames.stop();
		// New data for a running graph.
		let refreshed = context_init.borrow_mut().as_mut().map(|c| {
			c.state.set_data(&data);
			c.state.selection_details()
		});
		if let Some(details) = refreshed {
			handle.details.set(details);
			frames.start();
			return;
		}

		let vector: HtmlCanvasElement = vector.into();
		let raster: HtmlCanvasElement = raster.into();
		let (Some(vector), Some(raster)) = (Surface::attach(vector), Surface::attach(raster))
		else {
			warn!("skill-graph: 2d canvas context unavailable");
			return;
		};
		let quality = RenderQuality::detect(&window);
		let glow = match quality {
			RenderQuality::Full => window.document().and_then(|d| Surface::offscreen(&d)),
			RenderQuality::VectorOnly => None,
		};
		if quality == RenderQuality::Full && glow.is_none() {
			warn!("skill-graph: glow buffer unavailable, drawing grid only");
		}

		let mode = handle.mode.get_untracked();
		let state = SkillGraphState::new(&data, viewport, mode, config.clone());
		let mut renderer = Renderer::new(vector, raster, glow, quality);
		renderer.resize(viewport);
		*context_init.borrow_mut() = Some(GraphContext { state, renderer });

		if resize_cb.borrow().is_none() {
			let (context_resize, frames_resize) = (context_init.clone(), frames.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let viewport = window_viewport(&win);
				frames_resize.stop();
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(viewport);
				}
				frames_resize.start();
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		frames.start();
	});

	on_cleanup(move || handle.stop());

	let context_pd = context.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some(canvas) = vector_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = local_point(&canvas, &ev);
		let grabbed = context_pd
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_down(point));
		if grabbed.is_some() {
			ev.prevent_default();
			let _ = canvas.set_pointer_capture(ev.pointer_id());
		}
	};

	let context_pm = context.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let Some(canvas) = vector_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = local_point(&canvas, &ev);
		if let Some(ref mut c) = *context_pm.borrow_mut() {
			c.state.pointer_move(point);
			// `ElementExt::style` from the prelude shadows the DOM getter.
			let style = web_sys::HtmlElement::style(&canvas);
			let _ = style.set_property("cursor", c.state.cursor());
		}
	};

	let on_pointerup = move |ev: PointerEvent| {
		let Some(canvas) = vector_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = local_point(&canvas, &ev);
		let _ = canvas.release_pointer_capture(ev.pointer_id());
		handle.apply(|state| state.pointer_up(point));
	};

	// Capture loss and leaving the surface abort the press; neither clicks.
	let context_pc = context.clone();
	let on_pointercancel = move |_: PointerEvent| {
		if let Some(ref mut c) = *context_pc.borrow_mut() {
			c.state.pointer_cancel();
		}
	};
	let on_lostcapture = on_pointercancel.clone();
	let on_pointerleave = on_pointercancel.clone();

	view! {
		<div
			class="skill-graph"
			style=format!(
				"position: fixed; inset: 0; overflow: hidden; background: {};",
				background,
			)
		>
			<canvas
				node_ref=raster_ref
				class="skill-graph-raster"
				style="position: absolute; inset: 0; pointer-events: none;"
			/>
			<canvas
				node_ref=vector_ref
				class="skill-graph-vector"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup
				on:pointercancel=on_pointercancel
				on:lostpointercapture=on_lostcapture
				on:pointerleave=on_pointerleave
				style="position: absolute; inset: 0; touch-action: none;"
			/>
			<GroupingPicker handle=handle />
			<UsageHint handle=handle />
			<DetailPanel handle=handle />
		</div>
	}
}
