//! Capabilities the lifecycle controller needs from its display host.
//!
//! The browser implementation lives in [`super::web`]; tests drive the
//! controller with an in-memory recorder instead.

/// Raw container measurements, before zoom correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
	/// Container content width in CSS pixels as rendered.
	pub width: f64,
	/// Container content height in CSS pixels as rendered.
	pub height: f64,
	/// Rendered width of the zoom probe, when one is attached.
	pub probe_width: Option<f64>,
}

/// Display surface plus event sources for one wave-field instance.
///
/// Every method must tolerate being called while the underlying surface is
/// missing; the controller never expects an error back.
pub trait Host {
	/// Measures the container, or `None` when it is not attached yet.
	fn measure(&self) -> Option<Measurement>;

	/// Creates `count` stroked paths, one per grid column.
	fn create_paths(&mut self, count: usize, stroke: &str);
	/// Detaches and drops every path created so far.
	fn release_paths(&mut self);
	/// Replaces the geometry of the path at `index`.
	fn set_path_data(&mut self, index: usize, data: &str);
	/// Restyles every existing path.
	fn set_stroke(&mut self, stroke: &str);
	/// Sets the container background color.
	fn set_background(&mut self, background: &str);

	/// Schedules a single frame callback.
	fn request_frame(&mut self);
	/// Cancels the pending frame callback, if any.
	fn cancel_frame(&mut self);

	/// Reports container resizes to [`WaveController::on_resize`].
	///
	/// [`WaveController::on_resize`]: super::lifecycle::WaveController::on_resize
	fn observe_resize(&mut self);
	/// Reports pointer moves as page coordinates.
	fn observe_pointer(&mut self);
	/// Reports whether the container is on screen.
	fn observe_visibility(&mut self);
	/// Removes every listener and observer attached by the `observe_*` calls.
	fn disconnect(&mut self);
}
