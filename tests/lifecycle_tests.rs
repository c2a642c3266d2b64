// Host-side tests for the wave-field lifecycle.
// The controller is driven with an in-memory host instead of a browser.

#![allow(unused_crate_dependencies)]

use std::cell::RefCell;
use std::rc::Rc;

use desia_waves::components::wave_field::grid::Vec2;
use desia_waves::components::wave_field::{Host, LoopState, Measurement, WaveController};
use desia_waves::{AnimatePolicy, Color, WaveConfig};

/// Records every host call so tests can assert on the side effects.
#[derive(Debug, Default)]
struct RecordingHost {
	size: Option<(f64, f64)>,
	probe_width: Option<f64>,
	paths: Vec<Path>,
	released: usize,
	background: String,
	frame_pending: bool,
	frames_requested: usize,
	frames_cancelled: usize,
	observing: bool,
	/// Shared with the test so calls stay visible after the host is dropped.
	journal: Rc<RefCell<Vec<&'static str>>>,
}

#[derive(Debug, Default, Clone)]
struct Path {
	stroke: String,
	data: String,
}

impl RecordingHost {
	fn sized(width: f64, height: f64) -> Self {
		Self {
			size: Some((width, height)),
			probe_width: Some(20.0),
			..Self::default()
		}
	}

	fn vertex_count(&self, index: usize) -> usize {
		self.paths[index].data.matches(['M', 'L']).count()
	}
}

impl Host for RecordingHost {
	fn measure(&self) -> Option<Measurement> {
		self.size.map(|(width, height)| Measurement {
			width,
			height,
			probe_width: self.probe_width,
		})
	}

	fn create_paths(&mut self, count: usize, stroke: &str) {
		for _ in 0..count {
			self.paths.push(Path {
				stroke: stroke.to_string(),
				data: String::new(),
			});
		}
	}

	fn release_paths(&mut self) {
		self.journal.borrow_mut().push("release_paths");
		self.released += self.paths.len();
		self.paths.clear();
	}

	fn set_path_data(&mut self, index: usize, data: &str) {
		if let Some(path) = self.paths.get_mut(index) {
			path.data = data.to_string();
		}
	}

	fn set_stroke(&mut self, stroke: &str) {
		for path in &mut self.paths {
			path.stroke = stroke.to_string();
		}
	}

	fn set_background(&mut self, background: &str) {
		self.background = background.to_string();
	}

	fn request_frame(&mut self) {
		self.journal.borrow_mut().push("request_frame");
		self.frame_pending = true;
		self.frames_requested += 1;
	}

	fn cancel_frame(&mut self) {
		self.journal.borrow_mut().push("cancel_frame");
		if self.frame_pending {
			self.frames_cancelled += 1;
		}
		self.frame_pending = false;
	}

	fn observe_resize(&mut self) {
		self.observing = true;
	}

	fn observe_pointer(&mut self) {
		self.observing = true;
	}

	fn observe_visibility(&mut self) {
		self.observing = true;
	}

	fn disconnect(&mut self) {
		self.journal.borrow_mut().push("disconnect");
		self.observing = false;
	}
}

fn host(controller: &WaveController<RecordingHost>) -> &RecordingHost {
	controller.host().expect("host is attached while mounted")
}

/// Simulates the browser delivering the pending frame.
fn fire_frame(controller: &mut WaveController<RecordingHost>, time: f64) {
	controller.on_frame(time);
}

fn paths_data(controller: &WaveController<RecordingHost>) -> Vec<String> {
	host(controller).paths.iter().map(|p| p.data.clone()).collect()
}

#[test]
fn mount_paints_first_frame_and_starts_loop() {
	let controller = WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	assert_eq!(controller.state(), LoopState::Animating);
	let host = host(&controller);
	assert!(host.observing);
	assert_eq!(host.frames_requested, 1);
	assert_eq!(host.paths.len(), 14);
	assert!(host.paths.iter().all(|p| p.data.starts_with("M ")));
	assert_eq!(host.vertex_count(0), 38);
	assert_eq!(host.background, "rgba(0, 0, 0, 0)");
}

#[test]
fn paused_policy_renders_a_still_without_scheduling() {
	let config = WaveConfig {
		animate: AnimatePolicy::Preview(false),
		..WaveConfig::default()
	};
	let controller = WaveController::mount(config, RecordingHost::sized(800.0, 600.0));

	assert_eq!(controller.state(), LoopState::Idle);
	assert_eq!(host(&controller).frames_requested, 0);
	assert!(host(&controller).paths.iter().all(|p| !p.data.is_empty()));
}

#[test]
fn frames_reschedule_and_move_the_field() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));
	let still = paths_data(&controller);

	fire_frame(&mut controller, 5_000.0);

	assert_eq!(controller.state(), LoopState::Animating);
	assert_eq!(host(&controller).frames_requested, 2);
	assert_ne!(still, paths_data(&controller));
}

#[test]
fn static_render_is_idempotent() {
	let config = WaveConfig {
		animate: AnimatePolicy::Preview(false),
		..WaveConfig::default()
	};
	let mut controller = WaveController::mount(config.clone(), RecordingHost::sized(1000.0, 500.0));
	let first = paths_data(&controller);

	// Two more still renders: a change, then its revert.
	controller.set_config(WaveConfig {
		wave_amplitude: 0.5000001,
		..config.clone()
	});
	controller.set_config(config);

	assert_eq!(first, paths_data(&controller));
}

#[test]
fn hidden_container_goes_idle_and_resumes_when_visible() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	controller.on_visibility(false);
	assert!(!controller.is_visible());
	fire_frame(&mut controller, 16.0);
	assert_eq!(controller.state(), LoopState::Idle);
	assert_eq!(host(&controller).frames_requested, 1);

	// Stray callbacks while idle do nothing.
	fire_frame(&mut controller, 32.0);
	assert_eq!(host(&controller).frames_requested, 1);

	controller.on_visibility(true);
	assert_eq!(controller.state(), LoopState::Animating);
	assert_eq!(host(&controller).frames_requested, 2);
}

#[test]
fn resize_while_hidden_paints_a_still() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	// Hidden with a frame still pending, then resized before it fires.
	controller.on_visibility(false);
	controller_host_mut(&mut controller, |h| h.size = Some((1400.0, 500.0)));
	controller.on_resize();
	fire_frame(&mut controller, 16.0);

	assert_eq!(controller.state(), LoopState::Idle);
	let host = host(&controller);
	assert_eq!(host.paths.len(), 19);
	assert!(host.paths.iter().all(|p| p.data.starts_with("M ")));
}

#[test]
fn resolution_change_replaces_paths() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));
	assert_eq!(host(&controller).vertex_count(0), 38);

	controller.set_config(WaveConfig {
		resolution: 0.9,
		..WaveConfig::default()
	});

	let host = host(&controller);
	assert_eq!(host.released, 14);
	assert_eq!(host.paths.len(), 14);
	assert!((0..14).all(|i| host.vertex_count(i) == 89));
	assert_eq!(controller.grid().map(|g| g.row_count()), Some(89));
}

#[test]
fn seed_change_reseeds_and_replaces_paths() {
	let config = WaveConfig {
		animate: AnimatePolicy::Preview(false),
		..WaveConfig::default()
	};
	let mut controller = WaveController::mount(config.clone(), RecordingHost::sized(1000.0, 500.0));
	let before = paths_data(&controller);

	controller.set_config(WaveConfig { seed: 0.9, ..config });

	assert_eq!(host(&controller).released, 14);
	assert_eq!(host(&controller).paths.len(), 14);
	assert_ne!(before, paths_data(&controller));
}

#[test]
fn stroke_change_restyles_without_rebuild() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	controller.set_config(WaveConfig {
		stroke_color: Color::rgb(255, 0, 0),
		..WaveConfig::default()
	});

	let host = host(&controller);
	assert_eq!(host.released, 0);
	assert!(host.paths.iter().all(|p| p.stroke == "#ff0000"));
}

#[test]
fn disabling_preview_cancels_the_loop() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	controller.set_config(WaveConfig {
		animate: AnimatePolicy::Preview(false),
		..WaveConfig::default()
	});
	assert_eq!(controller.state(), LoopState::Idle);
	assert_eq!(host(&controller).frames_cancelled, 1);
	assert!(!host(&controller).frame_pending);

	controller.set_config(WaveConfig {
		animate: AnimatePolicy::Preview(true),
		..WaveConfig::default()
	});
	assert_eq!(controller.state(), LoopState::Animating);
	assert!(host(&controller).frame_pending);
}

#[test]
fn resize_rebuilds_only_past_epsilon() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	controller_host_mut(&mut controller, |h| h.size = Some((1000.5, 500.5)));
	controller.on_resize();
	assert_eq!(host(&controller).released, 0);

	controller_host_mut(&mut controller, |h| h.size = Some((1400.0, 500.0)));
	controller.on_resize();
	assert_eq!(host(&controller).released, 14);
	assert_eq!(controller.grid().map(|g| g.column_count()), Some(19));
}

#[test]
fn resize_accounts_for_page_zoom() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	// 200% zoom: everything renders twice as large, logical size is unchanged.
	controller_host_mut(&mut controller, |h| {
		h.size = Some((2000.0, 1000.0));
		h.probe_width = Some(40.0);
	});
	controller.on_resize();

	assert_eq!(host(&controller).released, 0);
	assert_eq!(controller.viewport().width, 1000.0);
}

#[test]
fn unmeasurable_mount_completes_on_resize() {
	let mut controller = WaveController::mount(WaveConfig::default(), RecordingHost::default());
	assert!(controller.grid().is_none());
	assert_eq!(controller.state(), LoopState::Idle);

	controller_host_mut(&mut controller, |h| h.size = Some((1000.0, 500.0)));
	controller.on_resize();

	assert_eq!(controller.grid().map(|g| g.column_count()), Some(14));
	assert_eq!(controller.state(), LoopState::Animating);
}

#[test]
fn pointer_events_reach_the_simulation() {
	let mut controller =
		WaveController::mount(WaveConfig::default(), RecordingHost::sized(1000.0, 500.0));

	controller.on_pointer(Vec2::new(300.0, 200.0));
	controller.on_pointer(Vec2::new(340.0, 200.0));
	fire_frame(&mut controller, 16.0);

	let pointer = controller.pointer().expect("simulation is built");
	assert!(pointer.initialized);
	assert_eq!(pointer.velocity, 40.0);
	let grid = controller.grid().expect("simulation is built");
	assert!(grid.points().any(|p| p.cursor != Vec2::ZERO));
}

#[test]
fn teardown_stops_everything() {
	let recording = RecordingHost::sized(1000.0, 500.0);
	let journal = recording.journal.clone();
	let mut controller = WaveController::mount(WaveConfig::default(), recording);
	controller.unmount();

	let torn_down = journal.borrow().len();
	assert_eq!(
		journal.borrow()[torn_down - 3..],
		["cancel_frame", "disconnect", "release_paths"]
	);

	assert_eq!(controller.state(), LoopState::Stopped);
	assert!(controller.host().is_none());
	assert!(controller.grid().is_none());

	fire_frame(&mut controller, 16.0);
	controller.on_resize();
	controller.on_pointer(Vec2::new(10.0, 10.0));
	controller.on_visibility(true);
	controller.set_config(WaveConfig::translator());

	assert_eq!(controller.state(), LoopState::Stopped);
	assert!(controller.host().is_none());
	assert_eq!(controller.config(), &WaveConfig::default());
	assert_eq!(journal.borrow().len(), torn_down);
}

fn controller_host_mut(
	controller: &mut WaveController<RecordingHost>,
	f: impl FnOnce(&mut RecordingHost),
) {
	f(controller.host_mut().expect("host is attached while mounted"));
}
