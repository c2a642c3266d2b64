//! Smoothed pointer position and speed.
//!
//! Input events only record the raw position; smoothing, velocity and angle
//! are advanced once per animation tick by [`PointerState::decay`].

use super::grid::Vec2;

/// Where the pointer sits before the first event: far enough away that no
/// grid point falls inside the influence radius.
pub const OFFSCREEN: Vec2 = Vec2::new(-10_000.0, -10_000.0);

/// Per-tick easing factor towards the raw position and raw speed.
const SMOOTHING: f64 = 0.1;
/// Upper bound for the smoothed speed, in pixels per tick.
const MAX_VELOCITY: f64 = 100.0;

/// Pointer tracking for one wave field.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
	/// Latest position reported by an input event.
	pub raw: Vec2,
	/// Eased position used by the force model.
	pub smoothed: Vec2,
	/// Raw position at the previous tick.
	pub last: Vec2,
	/// Distance travelled since the previous tick.
	pub velocity: f64,
	/// Eased speed, capped at 100.
	pub velocity_smoothed: f64,
	/// Direction of the last movement, radians.
	pub angle: f64,
	/// False until the first pointer event inside the container.
	pub initialized: bool,
}

impl Default for PointerState {
	fn default() -> Self {
		Self {
			raw: OFFSCREEN,
			smoothed: OFFSCREEN,
			last: OFFSCREEN,
			velocity: 0.0,
			velocity_smoothed: 0.0,
			angle: 0.0,
			initialized: false,
		}
	}
}

impl PointerState {
	/// Records a new container-local pointer position.
	pub fn move_to(&mut self, local: Vec2) {
		self.raw = local;
		if !self.initialized {
			self.smoothed = local;
			self.last = local;
			self.initialized = true;
		}
	}

	/// Advances smoothing and speed estimation by one tick.
	pub fn decay(&mut self) {
		self.smoothed.x += (self.raw.x - self.smoothed.x) * SMOOTHING;
		self.smoothed.y += (self.raw.y - self.smoothed.y) * SMOOTHING;

		let delta = self.raw - self.last;
		self.velocity = delta.length();
		self.velocity_smoothed += (self.velocity - self.velocity_smoothed) * SMOOTHING;
		self.velocity_smoothed = self.velocity_smoothed.min(MAX_VELOCITY);
		self.angle = delta.y.atan2(delta.x);
		self.last = self.raw;
	}
}

/// Converts document (page) coordinates to container-local coordinates.
///
/// `origin` is the container's viewport-relative top-left corner and
/// `scroll` the page scroll offset, so `origin + scroll` is the container's
/// position in the document. Scroll is subtracted, not added, so the result
/// stays container-local however far the page is scrolled.
pub fn to_local(page: Vec2, origin: Vec2, scroll: Vec2) -> Vec2 {
	page - (origin + scroll)
}
