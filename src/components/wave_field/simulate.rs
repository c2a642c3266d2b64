//! Per-frame displacement of grid points.
//!
//! Each point gets a memoryless ambient offset from the noise field and a
//! stateful pointer offset integrated as a damped spring.

use super::config::WaveConfig;
use super::grid::{GridPoint, Vec2, WaveGrid};
use super::noise::NoiseField;
use super::pointer::PointerState;

/// Hard limit on the pointer offset per axis.
pub const CURSOR_LIMIT: f64 = 50.0;
/// Minimum pointer influence radius.
const MIN_INFLUENCE_RADIUS: f64 = 175.0;
/// Spring constant pulling the pointer offset back to rest.
const SPRING: f64 = 0.01;
/// Velocity retained per step.
const DRAG: f64 = 0.95;

/// Advances every point of `grid` to frame time `time` (milliseconds).
pub fn step(
	grid: &mut WaveGrid,
	noise: &NoiseField,
	pointer: &PointerState,
	time: f64,
	config: &WaveConfig,
) {
	let speed = config.speed_multiplier();
	let amplitude = config.amplitude_multiplier();
	let influence = config.influence_multiplier();
	let radius = MIN_INFLUENCE_RADIUS.max(pointer.velocity_smoothed);

	for point in grid.points_mut() {
		let n = noise.sample(point.base.x * 0.003, point.base.y * 0.002);
		let phase = if speed > 0.0 {
			n * 8.0 + time * speed
		} else {
			n * 8.0
		};
		point.wave = Vec2::new(
			phase.cos() * 12.0 * amplitude,
			phase.sin() * 6.0 * amplitude,
		);

		if pointer.initialized {
			push_from_pointer(point, pointer, radius, influence);
		}
		settle(point);
	}
}

/// Adds the pointer's outward impulse to a point inside the influence radius.
fn push_from_pointer(point: &mut GridPoint, pointer: &PointerState, radius: f64, influence: f64) {
	let offset = point.base - pointer.smoothed;
	let d = offset.length();
	if d >= radius {
		return;
	}
	let s = 1.0 - d / radius;
	let force = (d * 0.001).cos() * s * radius * pointer.velocity_smoothed * influence;
	let angle = offset.y.atan2(offset.x);
	point.cursor_velocity.x += angle.cos() * force;
	point.cursor_velocity.y += angle.sin() * force;
}

/// Damped spring integration towards zero offset, then the hard clamp.
fn settle(point: &mut GridPoint) {
	let cursor = &mut point.cursor;
	let velocity = &mut point.cursor_velocity;

	velocity.x += -cursor.x * SPRING;
	velocity.y += -cursor.y * SPRING;
	velocity.x *= DRAG;
	velocity.y *= DRAG;
	cursor.x = (cursor.x + velocity.x).clamp(-CURSOR_LIMIT, CURSOR_LIMIT);
	cursor.y = (cursor.y + velocity.y).clamp(-CURSOR_LIMIT, CURSOR_LIMIT);
}
