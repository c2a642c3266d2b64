//! Browser implementation of [`Host`]: SVG paths, `requestAnimationFrame`,
//! window/touch listeners and an `IntersectionObserver`.
//!
//! Callbacks are created by the component and parked in [`Listeners`]; the
//! host only attaches and detaches them, so it never needs to know about the
//! controller that owns it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, Element, HtmlElement, IntersectionObserver, IntersectionObserverInit,
	MouseEvent, TouchEvent, Window,
};

use super::host::{Host, Measurement};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Fraction of the container that must be on screen to count as visible.
const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Browser callbacks shared between the component and the host.
#[derive(Default)]
pub struct Listeners {
	pub frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
	pub resize: RefCell<Option<Closure<dyn FnMut()>>>,
	pub mouse: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
	pub touch: RefCell<Option<Closure<dyn FnMut(TouchEvent)>>>,
	pub visibility: RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>,
}

impl Listeners {
	/// Drops every callback. Must not be called from inside one of them.
	pub fn clear(&self) {
		self.frame.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.mouse.borrow_mut().take();
		self.touch.borrow_mut().take();
		self.visibility.borrow_mut().take();
	}
}

/// SVG-backed host for one container element.
pub struct WebHost {
	window: Window,
	container: HtmlElement,
	probe: Element,
	svg: Option<Element>,
	paths: Vec<Element>,
	listeners: Rc<Listeners>,
	frame_id: Rc<Cell<Option<i32>>>,
	observer: Option<IntersectionObserver>,
}

impl WebHost {
	pub fn new(
		window: Window,
		container: HtmlElement,
		probe: Element,
		listeners: Rc<Listeners>,
	) -> Self {
		Self {
			window,
			container,
			probe,
			svg: None,
			paths: Vec::new(),
			listeners,
			frame_id: Rc::new(Cell::new(None)),
			observer: None,
		}
	}

	/// Handle the frame callback clears once it fires.
	pub fn frame_slot(&self) -> Rc<Cell<Option<i32>>> {
		self.frame_id.clone()
	}

	/// Lazily creates the `<svg>` that holds the paths.
	fn surface(&mut self) -> Option<&Element> {
		if self.svg.is_none() {
			let document = self.window.document()?;
			let svg = document.create_element_ns(Some(SVG_NS), "svg").ok()?;
			let _ = svg.set_attribute(
				"style",
				"position: absolute; inset: 0; width: 100%; height: 100%;",
			);
			self.container.append_child(&svg).ok()?;
			self.svg = Some(svg);
		}
		self.svg.as_ref()
	}
}

impl Host for WebHost {
	fn measure(&self) -> Option<Measurement> {
		if !self.container.is_connected() {
			return None;
		}
		let width = match self.container.client_width() {
			0 => self.container.offset_width(),
			w => w,
		};
		let height = match self.container.client_height() {
			0 => self.container.offset_height(),
			h => h,
		};
		let probe_width = self.probe.get_bounding_client_rect().width();
		Some(Measurement {
			width: f64::from(width),
			height: f64::from(height),
			probe_width: (probe_width > 0.0).then_some(probe_width),
		})
	}

	fn create_paths(&mut self, count: usize, stroke: &str) {
		let Some(document) = self.window.document() else {
			return;
		};
		let Some(svg) = self.surface().cloned() else {
			warn!("wave-field: could not create svg surface");
			return;
		};
		for _ in 0..count {
			let Ok(path) = document.create_element_ns(Some(SVG_NS), "path") else {
				return;
			};
			let _ = path.class_list().add_1("wave-line");
			let _ = path.set_attribute("fill", "none");
			let _ = path.set_attribute("stroke", stroke);
			let _ = path.set_attribute("stroke-width", "1");
			if svg.append_child(&path).is_ok() {
				self.paths.push(path);
			}
		}
	}

	fn release_paths(&mut self) {
		for path in self.paths.drain(..) {
			path.remove();
		}
	}

	fn set_path_data(&mut self, index: usize, data: &str) {
		if let Some(path) = self.paths.get(index) {
			let _ = path.set_attribute("d", data);
		}
	}

	fn set_stroke(&mut self, stroke: &str) {
		for path in &self.paths {
			let _ = path.set_attribute("stroke", stroke);
		}
	}

	fn set_background(&mut self, background: &str) {
		let _ = self.container.style().set_property("background-color", background);
	}

	fn request_frame(&mut self) {
		if self.frame_id.get().is_some() {
			return;
		}
		if let Some(ref cb) = *self.listeners.frame.borrow() {
			if let Ok(id) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.frame_id.set(Some(id));
			}
		}
	}

	fn cancel_frame(&mut self) {
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}

	fn observe_resize(&mut self) {
		if let Some(ref cb) = *self.listeners.resize.borrow() {
			let _ = self
				.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	fn observe_pointer(&mut self) {
		if let Some(ref cb) = *self.listeners.mouse.borrow() {
			let _ = self
				.window
				.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = *self.listeners.touch.borrow() {
			// Non-passive so the handler may cancel page scrolling.
			let options = AddEventListenerOptions::new();
			options.set_passive(false);
			let _ = self
				.container
				.add_event_listener_with_callback_and_add_event_listener_options(
					"touchmove",
					cb.as_ref().unchecked_ref(),
					&options,
				);
		}
	}

	fn observe_visibility(&mut self) {
		let listeners = self.listeners.clone();
		let visibility = listeners.visibility.borrow();
		let Some(cb) = visibility.as_ref() else {
			return;
		};
		let options = IntersectionObserverInit::new();
		options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
		match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options) {
			Ok(observer) => {
				observer.observe(&self.container);
				self.observer = Some(observer);
			}
			Err(_) => warn!("wave-field: IntersectionObserver unavailable, assuming visible"),
		}
	}

	fn disconnect(&mut self) {
		if let Some(ref cb) = *self.listeners.resize.borrow() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = *self.listeners.mouse.borrow() {
			let _ = self
				.window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = *self.listeners.touch.borrow() {
			let _ = self
				.container
				.remove_event_listener_with_callback("touchmove", cb.as_ref().unchecked_ref());
		}
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
	}
}

impl Drop for WebHost {
	fn drop(&mut self) {
		self.release_paths();
		if let Some(svg) = self.svg.take() {
			svg.remove();
		}
	}
}
