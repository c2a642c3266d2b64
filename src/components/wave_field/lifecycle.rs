//! Animation loop, resize handling and teardown for one wave field.
//!
//! [`WaveController`] is the only scheduler: it owns the simulation state and
//! the host, decides when to reschedule frames, and rebuilds the grid when
//! geometry changes. Every entry point degrades to a no-op when the host is
//! not ready or has been torn down.

use log::{debug, info};

use super::config::{AnimatePolicy, WaveConfig};
use super::grid::{Vec2, WaveGrid};
use super::host::{Host, Measurement};
use super::noise::NoiseField;
use super::pointer::PointerState;
use super::render;
use super::simulate;

/// Rendered size of the zoom probe at 100% zoom, in CSS pixels.
pub const PROBE_SIZE: f64 = 20.0;
/// Resizes smaller than this on both axes are ignored.
const RESIZE_EPSILON: f64 = 1.0;

/// Scheduling state of the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// No frame pending; the last render is a still.
	Idle,
	/// A frame callback is pending.
	Animating,
	/// Torn down. Terminal.
	Stopped,
}

/// Whether the loop should keep (or start) rescheduling frames.
pub fn should_continue(state: LoopState, visible: bool, policy: AnimatePolicy) -> bool {
	state != LoopState::Stopped && visible && policy.allows()
}

/// Zoom-corrected container size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Logical width in CSS pixels.
	pub width: f64,
	/// Logical height in CSS pixels.
	pub height: f64,
	/// Ambient zoom factor, 1.0 at 100%.
	pub zoom: f64,
}

impl Viewport {
	/// Divides the measured size by the ambient zoom inferred from the probe.
	pub fn from_measurement(m: Measurement) -> Self {
		let zoom = m
			.probe_width
			.map_or(1.0, |w| (w / PROBE_SIZE).max(0.0001));
		Self {
			width: m.width.max(1.0) / zoom,
			height: m.height.max(1.0) / zoom,
			zoom,
		}
	}

	/// True when either axis moved by more than the resize epsilon.
	pub fn differs_from(&self, other: &Viewport) -> bool {
		(self.width - other.width).abs() > RESIZE_EPSILON
			|| (self.height - other.height).abs() > RESIZE_EPSILON
	}
}

/// Mutable simulation data, kept apart from the immutable [`WaveConfig`].
#[derive(Clone, Debug)]
pub struct SimulationState {
	pub noise: NoiseField,
	pub grid: WaveGrid,
	pub pointer: PointerState,
}

impl SimulationState {
	pub fn new(config: &WaveConfig, viewport: Viewport) -> Self {
		Self {
			noise: NoiseField::new(config.seed),
			grid: build_grid(config, viewport),
			pointer: PointerState::default(),
		}
	}

	/// One animation tick: ease the pointer, then advance every point.
	pub fn tick(&mut self, time: f64, config: &WaveConfig) {
		self.pointer.decay();
		self.step(time, config);
	}

	/// Advances points without touching pointer smoothing.
	pub fn step(&mut self, time: f64, config: &WaveConfig) {
		simulate::step(&mut self.grid, &self.noise, &self.pointer, time, config);
	}
}

fn build_grid(config: &WaveConfig, viewport: Viewport) -> WaveGrid {
	WaveGrid::build(
		viewport.width,
		viewport.height,
		config.line_spacing,
		config.resolution,
	)
}

/// Drives one wave field through mount, animation, resizes and teardown.
pub struct WaveController<H: Host> {
	config: WaveConfig,
	host: Option<H>,
	sim: Option<SimulationState>,
	viewport: Viewport,
	state: LoopState,
	visible: bool,
	last_time: f64,
}

impl<H: Host> WaveController<H> {
	/// Builds the field, paints a still frame, attaches observers and starts
	/// the loop when allowed.
	pub fn mount(config: WaveConfig, host: H) -> Self {
		let mut controller = Self {
			config,
			host: Some(host),
			sim: None,
			viewport: Viewport::default(),
			state: LoopState::Idle,
			visible: true,
			last_time: 0.0,
		};

		if let Some(host) = controller.host.as_mut() {
			host.set_background(&controller.config.background_color.to_css());
		}
		controller.ensure_simulation();
		controller.render_still();

		if let Some(host) = controller.host.as_mut() {
			host.observe_resize();
			host.observe_pointer();
			host.observe_visibility();
		}
		controller.start_if_allowed();

		info!(
			"wave-field: mounted {}x{} grid",
			controller.grid().map_or(0, WaveGrid::column_count),
			controller.grid().map_or(0, WaveGrid::row_count)
		);
		controller
	}

	pub fn state(&self) -> LoopState {
		self.state
	}

	pub fn config(&self) -> &WaveConfig {
		&self.config
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Last visibility reported by the host.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn grid(&self) -> Option<&WaveGrid> {
		self.sim.as_ref().map(|s| &s.grid)
	}

	pub fn pointer(&self) -> Option<&PointerState> {
		self.sim.as_ref().map(|s| &s.pointer)
	}

	pub fn host(&self) -> Option<&H> {
		self.host.as_ref()
	}

	pub fn host_mut(&mut self) -> Option<&mut H> {
		self.host.as_mut()
	}

	fn should_animate(&self) -> bool {
		should_continue(self.state, self.visible, self.config.animate)
	}

	/// Frame callback. `time` is the host's frame timestamp in milliseconds.
	pub fn on_frame(&mut self, time: f64) {
		if self.state != LoopState::Animating {
			return;
		}
		if !self.should_animate() {
			self.state = LoopState::Idle;
			debug!("wave-field: loop idle");
			return;
		}
		let (Some(host), Some(sim)) = (self.host.as_mut(), self.sim.as_mut()) else {
			self.state = LoopState::Idle;
			return;
		};

		host.request_frame();
		self.last_time = time;
		sim.tick(time, &self.config);
		render::draw(&sim.grid, host);
	}

	/// Re-measures the container and rebuilds the grid when it changed size.
	pub fn on_resize(&mut self) {
		if self.state == LoopState::Stopped {
			return;
		}
		if self.sim.is_none() {
			// Mount could not measure; finish it now.
			self.ensure_simulation();
			self.render_still();
			self.start_if_allowed();
			return;
		}
		let Some(viewport) = self.measure() else {
			return;
		};
		if !viewport.differs_from(&self.viewport) {
			return;
		}

		self.viewport = viewport;
		self.rebuild_grid();
		// A frame still pending here will not draw.
		if !self.should_animate() {
			self.render_still();
		}
	}

	/// Records a container-local pointer position.
	pub fn on_pointer(&mut self, local: Vec2) {
		if self.state == LoopState::Stopped {
			return;
		}
		if let Some(sim) = self.sim.as_mut() {
			sim.pointer.move_to(local);
		}
	}

	/// Updates the visibility flag. Becoming visible restarts an idle loop.
	pub fn on_visibility(&mut self, visible: bool) {
		if self.state == LoopState::Stopped {
			return;
		}
		self.visible = visible;
		if visible {
			self.start_if_allowed();
		}
	}

	/// Applies a new configuration, rebuilding only what it invalidates.
	pub fn set_config(&mut self, config: WaveConfig) {
		if self.state == LoopState::Stopped || config == self.config {
			return;
		}
		let previous = std::mem::replace(&mut self.config, config);

		if let Some(host) = self.host.as_mut() {
			if previous.stroke_color != self.config.stroke_color {
				host.set_stroke(&self.config.stroke_color.to_css());
			}
			if previous.background_color != self.config.background_color {
				host.set_background(&self.config.background_color.to_css());
			}
		}
		if let Some(sim) = self.sim.as_mut() {
			if previous.seed != self.config.seed {
				sim.noise = NoiseField::new(self.config.seed);
			}
		}
		if self.config.geometry_differs(&previous) {
			self.rebuild_grid();
		}

		if self.should_animate() {
			self.render_at(self.last_time);
			self.start_if_allowed();
		} else {
			self.stop();
			self.render_still();
		}
	}

	/// Cancels the loop, detaches observers and releases the paths.
	/// Later calls on any entry point do nothing.
	pub fn unmount(&mut self) {
		if self.state == LoopState::Stopped {
			return;
		}
		if let Some(mut host) = self.host.take() {
			host.cancel_frame();
			host.disconnect();
			host.release_paths();
		}
		self.sim = None;
		self.state = LoopState::Stopped;
		info!("wave-field: unmounted");
	}

	fn measure(&self) -> Option<Viewport> {
		self.host
			.as_ref()
			.and_then(Host::measure)
			.map(Viewport::from_measurement)
	}

	/// Creates the simulation once the container can be measured.
	fn ensure_simulation(&mut self) {
		if self.sim.is_some() {
			return;
		}
		let Some(viewport) = self.measure() else {
			debug!("wave-field: container not measurable yet");
			return;
		};
		self.viewport = viewport;
		self.sim = Some(SimulationState::new(&self.config, viewport));
		self.replace_paths();
	}

	fn rebuild_grid(&mut self) {
		let Some(sim) = self.sim.as_mut() else {
			return;
		};
		sim.grid = build_grid(&self.config, self.viewport);
		debug!(
			"wave-field: rebuilt grid {}x{} for {:.0}x{:.0} at zoom {:.2}",
			sim.grid.column_count(),
			sim.grid.row_count(),
			self.viewport.width,
			self.viewport.height,
			self.viewport.zoom
		);
		self.replace_paths();
	}

	/// Releases old paths before creating one per current column.
	fn replace_paths(&mut self) {
		let (Some(host), Some(sim)) = (self.host.as_mut(), self.sim.as_ref()) else {
			return;
		};
		host.release_paths();
		host.create_paths(sim.grid.column_count(), &self.config.stroke_color.to_css());
	}

	/// Static frame at `t = 0`.
	fn render_still(&mut self) {
		self.render_at(0.0);
	}

	fn render_at(&mut self, time: f64) {
		let (Some(host), Some(sim)) = (self.host.as_mut(), self.sim.as_mut()) else {
			return;
		};
		sim.step(time, &self.config);
		render::draw(&sim.grid, host);
	}

	fn start_if_allowed(&mut self) {
		if self.state != LoopState::Idle || self.sim.is_none() {
			return;
		}
		if !should_continue(self.state, self.visible, self.config.animate) {
			return;
		}
		if let Some(host) = self.host.as_mut() {
			host.request_frame();
			self.state = LoopState::Animating;
			debug!("wave-field: loop started");
		}
	}

	fn stop(&mut self) {
		if self.state != LoopState::Animating {
			return;
		}
		if let Some(host) = self.host.as_mut() {
			host.cancel_frame();
		}
		self.state = LoopState::Idle;
	}
}
