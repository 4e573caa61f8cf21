#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolateMode {
	/// Round to nearest
	Nearest,
	/// Linear interpolation
	Linear,
	/// Cubic Hermite interpolation using the tangents of both ends
	#[default]
	Cubic,
}

impl TryFrom<&str> for InterpolateMode {
	type Error = String;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		match value {
			"Nearest" => Ok(InterpolateMode::Nearest),
			"Linear" => Ok(InterpolateMode::Linear),
			"Cubic" => Ok(InterpolateMode::Cubic),
			a => Err(a.to_owned()),
		}
	}
}

impl InterpolateMode {
	pub fn as_str(self) -> &'static str {
		match self {
			InterpolateMode::Nearest => "Nearest",
			InterpolateMode::Linear => "Linear",
			InterpolateMode::Cubic => "Cubic",
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpRange<T> {
	pub beg: T,
	pub end: T,
}

impl<T> InterpRange<T> {
	#[inline]
	pub fn new(beg: T, end: T) -> Self {
		Self { beg, end }
	}
}

impl InterpRange<f32> {
	#[inline]
	pub fn len(&self) -> f32 {
		self.end - self.beg
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() <= 0.0
	}
}

#[inline]
fn interpolate_nearest(t: f32, range_in: InterpRange<f32>, range_out: InterpRange<f32>) -> f32 {
	debug_assert!(
		range_in.beg <= t && t <= range_in.end,
		"{} <= {} <= {}",
		range_in.beg,
		t,
		range_in.end
	);

	if (range_in.end - t) < (t - range_in.beg) {
		range_out.end
	} else {
		range_out.beg
	}
}

#[inline]
fn interpolate_linear(t: f32, range_in: InterpRange<f32>, range_out: InterpRange<f32>) -> f32 {
	debug_assert!(
		range_in.beg <= t && t <= range_in.end,
		"{} is out of input range [{}, {}]",
		t,
		range_in.beg,
		range_in.end,
	);

	(t - range_in.beg) * (range_out.end - range_out.beg) / (range_in.end - range_in.beg) + range_out.beg
}

/// Hermite spline through `range_out` with slopes `tangents` (in output units per input unit).
///
/// An infinite tangent on either end turns the segment into a step holding `range_out.beg`.
#[inline]
pub fn interpolate_hermite(
	t: f32,
	range_in: InterpRange<f32>,
	range_out: InterpRange<f32>,
	tangents: InterpRange<f32>,
) -> f32 {
	debug_assert!(
		range_in.beg <= t && t <= range_in.end,
		"{} is out of input range [{}, {}]",
		t,
		range_in.beg,
		range_in.end,
	);

	if !tangents.beg.is_finite() || !tangents.end.is_finite() {
		return range_out.beg;
	}

	let dt = range_in.len();
	let s = (t - range_in.beg) / dt;
	let s2 = s * s;
	let s3 = s2 * s;

	let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
	let h10 = s3 - 2.0 * s2 + s;
	let h01 = -2.0 * s3 + 3.0 * s2;
	let h11 = s3 - s2;

	h00 * range_out.beg + h10 * dt * tangents.beg + h01 * range_out.end + h11 * dt * tangents.end
}

/// Interpolates between two points. `tangents` is only read by `InterpolateMode::Cubic`.
#[inline]
pub fn interpolate_f32(
	t: f32,
	range_in: InterpRange<f32>,
	range_out: InterpRange<f32>,
	tangents: InterpRange<f32>,
	mode: InterpolateMode,
) -> f32 {
	match mode {
		InterpolateMode::Nearest => interpolate_nearest(t, range_in, range_out),
		InterpolateMode::Linear => interpolate_linear(t, range_in, range_out),
		InterpolateMode::Cubic => interpolate_hermite(t, range_in, range_out, tangents),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_linear_interpolation() {
		assert_eq!(
			interpolate_linear(0.0, InterpRange::new(0.0, 1.0), InterpRange::new(-5.0, 5.0)),
			-5.0
		);
		assert_eq!(
			interpolate_linear(1.0, InterpRange::new(0.0, 1.0), InterpRange::new(-5.0, 5.0)),
			5.0
		);
		assert_eq!(
			interpolate_linear(0.5, InterpRange::new(0.0, 1.0), InterpRange::new(-5.0, 5.0)),
			0.0
		);
		assert_eq!(
			interpolate_linear(0.0, InterpRange::new(-0.5, 0.0), InterpRange::new(-5.0, 5.0)),
			5.0
		);
	}

	#[test]
	fn test_nearest_interpolation() {
		let range_in = InterpRange::new(0.0, 1.0);
		let range_out = InterpRange::new(2.0, 4.0);
		assert_eq!(interpolate_nearest(0.2, range_in, range_out), 2.0);
		assert_eq!(interpolate_nearest(0.8, range_in, range_out), 4.0);
	}

	#[test]
	fn test_hermite_hits_both_ends() {
		let range_in = InterpRange::new(1.0, 3.0);
		let range_out = InterpRange::new(-1.0, 2.0);
		let tangents = InterpRange::new(4.0, -7.0);
		assert!((interpolate_hermite(1.0, range_in, range_out, tangents) - -1.0).abs() < 1e-6);
		assert!((interpolate_hermite(3.0, range_in, range_out, tangents) - 2.0).abs() < 1e-6);
	}

	#[test]
	fn test_hermite_with_linear_slopes_is_linear() {
		let range_in = InterpRange::new(0.0, 2.0);
		let range_out = InterpRange::new(0.0, 4.0);
		let tangents = InterpRange::new(2.0, 2.0);
		for t in [0.25, 0.5, 1.0, 1.5] {
			let cubic = interpolate_hermite(t, range_in, range_out, tangents);
			assert!((cubic - 2.0 * t).abs() < 1e-5, "{cubic} != {}", 2.0 * t);
		}
	}

	#[test]
	fn test_hermite_infinite_tangent_steps() {
		let range_in = InterpRange::new(0.0, 1.0);
		let range_out = InterpRange::new(3.0, 9.0);
		let tangents = InterpRange::new(f32::INFINITY, 0.0);
		assert_eq!(interpolate_hermite(0.9, range_in, range_out, tangents), 3.0);
	}
}
