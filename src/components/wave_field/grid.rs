//! Grid of sample points covering the viewport plus a margin.
//!
//! Points are stored column-major: each column becomes one rendered polyline.

use std::ops::{Add, Sub};

/// Horizontal overscan on each side, so displaced columns never expose an edge.
pub const MARGIN_X: f64 = 100.0;
/// Vertical overscan on each side.
pub const MARGIN_Y: f64 = 15.0;

/// 2-D vector in container-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component, rightwards.
	pub x: f64,
	/// Vertical component, downwards.
	pub y: f64,
}

impl Vec2 {
	/// The origin.
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		self.x.hypot(self.y)
	}
}

impl Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// A single simulated vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPoint {
	/// Rest position, fixed when the grid is built.
	pub base: Vec2,
	/// Ambient wave displacement, recomputed from scratch every step.
	pub wave: Vec2,
	/// Pointer-reaction displacement, clamped to +-50 per axis.
	pub cursor: Vec2,
	/// Spring velocity of the pointer displacement.
	pub cursor_velocity: Vec2,
}

impl GridPoint {
	/// A point resting at `base`.
	pub fn at(base: Vec2) -> Self {
		Self {
			base,
			wave: Vec2::ZERO,
			cursor: Vec2::ZERO,
			cursor_velocity: Vec2::ZERO,
		}
	}

	/// Position including both dynamic offsets.
	pub fn displaced(&self) -> Vec2 {
		self.base + self.wave + self.cursor
	}
}

/// Distance between columns and between rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpacing {
	/// Column gap in pixels.
	pub x_gap: f64,
	/// Row gap in pixels.
	pub y_gap: f64,
}

impl GridSpacing {
	/// Both controls are clamped to `0.0..=1.0`; larger values mean tighter spacing.
	pub fn from_controls(line_spacing: f64, resolution: f64) -> Self {
		Self {
			x_gap: 8.0 + (1.0 - line_spacing.clamp(0.0, 1.0)) * 159.0,
			y_gap: 4.0 + (1.0 - resolution.clamp(0.0, 1.0)) * 20.0,
		}
	}
}

/// Column-major grid of [`GridPoint`]s.
#[derive(Clone, Debug)]
pub struct WaveGrid {
	columns: Vec<Vec<GridPoint>>,
	spacing: GridSpacing,
	width: f64,
	height: f64,
}

impl WaveGrid {
	/// Lays out a grid centered on a `width` x `height` viewport.
	///
	/// Dimensions below 1 are treated as 1.
	pub fn build(width: f64, height: f64, line_spacing: f64, resolution: f64) -> Self {
		let (width, height) = (width.max(1.0), height.max(1.0));
		let spacing = GridSpacing::from_controls(line_spacing, resolution);

		let total_columns = ((width + 2.0 * MARGIN_X) / spacing.x_gap).ceil() as usize;
		let total_rows = ((height + 2.0 * MARGIN_Y) / spacing.y_gap).ceil() as usize;
		let x_start = (width - spacing.x_gap * total_columns as f64) / 2.0;
		let y_start = (height - spacing.y_gap * total_rows as f64) / 2.0;

		let columns = (0..total_columns)
			.map(|i| {
				(0..total_rows)
					.map(|j| {
						GridPoint::at(Vec2::new(
							x_start + spacing.x_gap * i as f64,
							y_start + spacing.y_gap * j as f64,
						))
					})
					.collect()
			})
			.collect();

		Self {
			columns,
			spacing,
			width,
			height,
		}
	}

	pub fn columns(&self) -> &[Vec<GridPoint>] {
		&self.columns
	}

	pub fn points_mut(&mut self) -> impl Iterator<Item = &mut GridPoint> {
		self.columns.iter_mut().flatten()
	}

	pub fn points(&self) -> impl Iterator<Item = &GridPoint> {
		self.columns.iter().flatten()
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// Vertices per column.
	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, Vec::len)
	}

	pub fn spacing(&self) -> GridSpacing {
		self.spacing
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}
}
