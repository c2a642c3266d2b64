//! Seeded 2-D simplex noise.
//!
//! The permutation table is shuffled with a deterministic sine hash instead of
//! a system RNG, so two fields built from the same seed sample identically.
//! This is the only randomness source of the wave field.

/// Skew factor `(sqrt(3) - 1) / 2`.
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor `(3 - sqrt(3)) / 6`.
const G2: f64 = 0.211_324_865_405_187_1;

const GRAD2: [(f64, f64); 12] = [
	(1.0, 1.0),
	(-1.0, 1.0),
	(1.0, -1.0),
	(-1.0, -1.0),
	(1.0, 0.0),
	(-1.0, 0.0),
	(1.0, 0.0),
	(-1.0, 0.0),
	(0.0, 1.0),
	(0.0, -1.0),
	(0.0, 1.0),
	(0.0, -1.0),
];

/// Immutable gradient-noise field. `sample` is a pure function of its inputs.
#[derive(Clone, Debug)]
pub struct NoiseField {
	seed: f64,
	perm: [u8; 512],
	perm_mod12: [u8; 512],
}

/// Deterministic hash in `[0, 1)` used for the shuffle.
fn seeded_random(index: f64, seed: f64) -> f64 {
	let x = (index * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

impl NoiseField {
	/// Shuffles the permutation table for `seed`.
	pub fn new(seed: f64) -> Self {
		let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
		for i in (1..256).rev() {
			let n = ((i + 1) as f64 * seeded_random(i as f64, seed)).floor() as usize;
			p.swap(i, n.min(i));
		}

		// Doubled so corner lookups never need to wrap.
		let perm: [u8; 512] = std::array::from_fn(|i| p[i & 255]);
		let perm_mod12: [u8; 512] = std::array::from_fn(|i| perm[i] % 12);

		Self {
			seed,
			perm,
			perm_mod12,
		}
	}

	/// Seed the table was shuffled with.
	pub fn seed(&self) -> f64 {
		self.seed
	}

	/// Samples the field at `(x, y)`. Output lies roughly in `[-1, 1]`.
	pub fn sample(&self, x: f64, y: f64) -> f64 {
		let s = (x + y) * F2;
		let i = (x + s).floor();
		let j = (y + s).floor();
		let t = (i + j) * G2;
		let x0 = x - (i - t);
		let y0 = y - (j - t);

		let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

		let x1 = x0 - i1 as f64 + G2;
		let y1 = y0 - j1 as f64 + G2;
		let x2 = x0 - 1.0 + 2.0 * G2;
		let y2 = y0 - 1.0 + 2.0 * G2;

		let ii = (i as i64 & 255) as usize;
		let jj = (j as i64 & 255) as usize;
		let gi0 = self.perm_mod12[ii + self.perm[jj] as usize];
		let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize];
		let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize];

		70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
	}

	#[cfg(test)]
	fn permutation(&self) -> &[u8; 512] {
		&self.perm
	}
}

fn corner(gradient: u8, x: f64, y: f64) -> f64 {
	let t = 0.5 - x * x - y * y;
	if t < 0.0 {
		return 0.0;
	}
	let (gx, gy) = GRAD2[gradient as usize];
	let t2 = t * t;
	t2 * t2 * (gx * x + gy * y)
}
