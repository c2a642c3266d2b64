//! Converts grid columns into SVG path geometry.

use std::fmt::Write;

use super::grid::{Vec2, WaveGrid};
use super::host::Host;

/// One drawable column.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
	/// Vertices from top to bottom.
	pub points: Vec<Vec2>,
}

impl Polyline {
	/// SVG path data: `M x yL x yL x y...`. Empty for fewer than two points.
	pub fn to_path_data(&self) -> String {
		let mut data = String::with_capacity(self.points.len() * 24);
		if self.points.len() < 2 {
			return data;
		}
		for (i, p) in self.points.iter().enumerate() {
			let command = if i == 0 { 'M' } else { 'L' };
			let _ = write!(data, "{} {} {}", command, p.x, p.y);
		}
		data
	}
}

/// One polyline per grid column.
///
/// The first vertex is anchored at its rest position; all later vertices
/// carry their wave and pointer offsets.
pub fn polylines(grid: &WaveGrid) -> Vec<Polyline> {
	grid.columns()
		.iter()
		.map(|column| Polyline {
			points: column
				.iter()
				.enumerate()
				.map(|(i, p)| if i == 0 { p.base } else { p.displaced() })
				.collect(),
		})
		.collect()
}

/// Writes every column's geometry to the host path with the same index.
pub fn draw<H: Host>(grid: &WaveGrid, host: &mut H) {
	for (i, line) in polylines(grid).iter().enumerate() {
		host.set_path_data(i, &line.to_path_data());
	}
}
