//! Leptos component wrapping the wave-field background.
//!
//! The component renders a container and a hidden zoom probe, then hands both
//! to a [`WaveController`] backed by a [`WebHost`]. Browser callbacks hold
//! weak references to the controller and skip the event when it is busy or
//! already gone.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::info;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, IntersectionObserverEntry, MouseEvent, TouchEvent, Window};

use super::config::WaveConfig;
use super::grid::Vec2;
use super::lifecycle::{PROBE_SIZE, WaveController};
use super::pointer;
use super::web::{Listeners, WebHost};

type SharedController = Rc<RefCell<WaveController<WebHost>>>;
type WeakController = Weak<RefCell<WaveController<WebHost>>>;

const CONTAINER_STYLE: &str =
	"position: relative; margin: 0; padding: 0; width: 100%; height: 100%; overflow: hidden;";

/// Renders an animated wave-field background filling its parent.
///
/// Pass settings through the reactive `config` signal; geometry changes
/// rebuild the grid, style changes restyle the existing paths.
#[component]
pub fn WaveBackground(#[prop(into)] config: Signal<WaveConfig>) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let probe_ref = NodeRef::<leptos::html::Div>::new();
	let mounted: Rc<RefCell<Option<SharedController>>> = Rc::new(RefCell::new(None));
	let listeners = Rc::new(Listeners::default());
	let (mounted_init, listeners_init) = (mounted.clone(), listeners.clone());

	Effect::new(move |_| {
		let config = config.get();
		if let Some(ref controller) = *mounted_init.borrow() {
			if let Ok(mut controller) = controller.try_borrow_mut() {
				controller.set_config(config);
			}
			return;
		}

		let (Some(container), Some(probe)) = (container_ref.get(), probe_ref.get()) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let container: HtmlElement = container.into();
		let probe: Element = probe.into();

		let host = WebHost::new(
			window.clone(),
			container.clone(),
			probe,
			listeners_init.clone(),
		);
		let frame_slot = host.frame_slot();
		let controller = Rc::new_cyclic(|weak: &WeakController| {
			install_listeners(&listeners_init, weak, &window, &container, frame_slot);
			RefCell::new(WaveController::mount(config, host))
		});
		*mounted_init.borrow_mut() = Some(controller);
	});

	let probe_style = format!(
		"position: absolute; width: {PROBE_SIZE}px; height: {PROBE_SIZE}px; opacity: 0; pointer-events: none;"
	);

	let teardown = SendWrapper::new((mounted, listeners));
	on_cleanup(move || {
		let (mounted, listeners) = teardown.take();
		if let Some(controller) = mounted.borrow_mut().take() {
			if let Ok(mut controller) = controller.try_borrow_mut() {
				controller.unmount();
			}
		}
		listeners.clear();
		info!("wave-field: component cleaned up");
	});

	view! {
		<div node_ref=container_ref class="wave-background" style=CONTAINER_STYLE>
			<div node_ref=probe_ref style=probe_style />
		</div>
	}
}

/// Runs `f` against the controller if it is still alive and not borrowed.
fn with_controller(weak: &WeakController, f: impl FnOnce(&mut WaveController<WebHost>)) {
	let Some(shared) = weak.upgrade() else {
		return;
	};
	let Ok(mut controller) = shared.try_borrow_mut() else {
		return;
	};
	f(&mut controller);
}

fn local_position(container: &HtmlElement, window: &Window, page_x: i32, page_y: i32) -> Vec2 {
	let rect = container.get_bounding_client_rect();
	pointer::to_local(
		Vec2::new(f64::from(page_x), f64::from(page_y)),
		Vec2::new(rect.left(), rect.top()),
		Vec2::new(
			window.scroll_x().unwrap_or(0.0),
			window.scroll_y().unwrap_or(0.0),
		),
	)
}

/// Creates the browser callbacks. They are attached later by the host.
fn install_listeners(
	listeners: &Listeners,
	controller: &WeakController,
	window: &Window,
	container: &HtmlElement,
	frame_slot: Rc<Cell<Option<i32>>>,
) {
	let weak = controller.clone();
	*listeners.frame.borrow_mut() = Some(Closure::new(move |time: f64| {
		frame_slot.set(None);
		with_controller(&weak, |c| c.on_frame(time));
	}));

	let weak = controller.clone();
	*listeners.resize.borrow_mut() = Some(Closure::new(move || {
		with_controller(&weak, WaveController::on_resize);
	}));

	let (weak, target, win) = (controller.clone(), container.clone(), window.clone());
	*listeners.mouse.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
		let local = local_position(&target, &win, ev.page_x(), ev.page_y());
		with_controller(&weak, |c| c.on_pointer(local));
	}));

	let (weak, target, win) = (controller.clone(), container.clone(), window.clone());
	*listeners.touch.borrow_mut() = Some(Closure::new(move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		let local = local_position(&target, &win, touch.page_x(), touch.page_y());
		with_controller(&weak, |c| c.on_pointer(local));
	}));

	let weak = controller.clone();
	*listeners.visibility.borrow_mut() = Some(Closure::new(move |entries: js_sys::Array| {
		for entry in entries.iter() {
			if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
				let visible = entry.is_intersecting();
				with_controller(&weak, |c| c.on_visibility(visible));
			}
		}
	}));
}
