//! Wave-field configuration and stroke/background colors.
//!
//! All numeric controls are normalized to `0.0..=1.0` and rescaled to
//! simulation units by the accessor methods on [`WaveConfig`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Fully transparent black.
	pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Returned when a CSS color string is not one of the supported notations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unsupported color `{}`", self.0)
	}
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
	type Err = ParseColorError;

	/// Parses hex (`#RGB`, `#RRGGBB`), `rgb()`/`rgba()` functional notation
	/// and the `transparent` keyword.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let err = || ParseColorError(s.to_string());

		if s.eq_ignore_ascii_case("transparent") {
			return Ok(Color::TRANSPARENT);
		}

		if let Some(hex) = s.strip_prefix('#') {
			let channel = |range: std::ops::Range<usize>| {
				hex.get(range).and_then(|c| u8::from_str_radix(c, 16).ok())
			};
			return match hex.len() {
				6 => match (channel(0..2), channel(2..4), channel(4..6)) {
					(Some(r), Some(g), Some(b)) => Ok(Color::rgb(r, g, b)),
					_ => Err(err()),
				},
				// #rgb expands each digit: #fa0 == #ffaa00
				3 => match (channel(0..1), channel(1..2), channel(2..3)) {
					(Some(r), Some(g), Some(b)) => Ok(Color::rgb(r * 17, g * 17, b * 17)),
					_ => Err(err()),
				},
				_ => Err(err()),
			};
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(err)?;
		let nums: Vec<&str> = body.split(',').map(str::trim).collect();
		if !(3..=4).contains(&nums.len()) {
			return Err(err());
		}
		let channel = |i: usize| nums[i].parse::<u8>().map_err(|_| err());
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().map_err(|_| err())?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = ParseColorError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Decides whether the wave field is allowed to animate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatePolicy {
	/// Always animate while visible (page background usage).
	#[default]
	Always,
	/// Editor usage: animate only while previewing, otherwise render a still frame.
	Preview(bool),
}

impl AnimatePolicy {
	/// Whether the loop may run under this policy.
	pub fn allows(self) -> bool {
		match self {
			AnimatePolicy::Always => true,
			AnimatePolicy::Preview(previewing) => previewing,
		}
	}
}

/// Caller-supplied settings for the wave-field background.
///
/// Deserializes from camelCase JSON with every key optional, e.g.
/// `{"waveSpeed": 0.7, "strokeColor": "rgba(255,255,255,0.5)"}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveConfig {
	/// Line color.
	pub stroke_color: Color,
	/// Container fill behind the lines.
	pub background_color: Color,
	/// Oscillation speed, 0 freezes the ambient wave.
	pub wave_speed: f64,
	/// Size of the ambient wave offsets.
	pub wave_amplitude: f64,
	/// Strength of the pointer push.
	pub mouse_influence: f64,
	/// Higher values pack columns closer together.
	pub line_spacing: f64,
	/// Higher values pack rows (polyline vertices) closer together.
	pub resolution: f64,
	/// Seed for the noise permutation table.
	pub seed: f64,
	/// When the loop is allowed to run.
	pub animate: AnimatePolicy,
}

impl Default for WaveConfig {
	fn default() -> Self {
		Self {
			stroke_color: Color::WHITE,
			background_color: Color::TRANSPARENT,
			wave_speed: 0.5,
			wave_amplitude: 0.5,
			mouse_influence: 0.5,
			line_spacing: 0.5,
			resolution: 0.5,
			seed: 0.5,
			animate: AnimatePolicy::Always,
		}
	}
}

impl WaveConfig {
	/// Tuning used behind the translate page.
	pub fn translator() -> Self {
		Self {
			stroke_color: Color::WHITE.with_alpha(0.5),
			wave_speed: 0.7,
			wave_amplitude: 0.85,
			mouse_influence: 0.65,
			line_spacing: 0.3,
			seed: 0.55,
			resolution: 0.45,
			..Self::default()
		}
	}

	/// Phase advance per millisecond of frame time.
	pub fn speed_multiplier(&self) -> f64 {
		self.wave_speed.max(0.0) * 0.002
	}

	/// Scale applied to the wave offsets.
	pub fn amplitude_multiplier(&self) -> f64 {
		self.wave_amplitude.max(0.0) * 2.0
	}

	/// Scale applied to the pointer force.
	pub fn influence_multiplier(&self) -> f64 {
		self.mouse_influence.max(0.0) * 0.0007
	}

	/// True when switching from `other` to `self` needs a new grid.
	pub fn geometry_differs(&self, other: &WaveConfig) -> bool {
		self.line_spacing != other.line_spacing
			|| self.resolution != other.resolution
			|| self.seed != other.seed
	}
}
