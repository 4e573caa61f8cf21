use super::interp::{interpolate_f32, InterpRange, InterpolateMode};

/// Sampling contract for the curves driving a deformation.
pub trait Curve {
	/// Evaluate the curve at `t`.
	fn sample(&self, t: f32) -> f32;

	/// Change how inputs before the first and after the last key are mapped.
	///
	/// Curves defined on the whole real line have nothing to wrap and ignore this.
	fn set_wrap_mode(&mut self, _pre: WrapMode, _post: WrapMode) {}
}

/// Mapping of curve inputs lying outside the key range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrapMode {
	/// Hold the value of the nearest end key.
	#[default]
	Clamp,
	/// Repeat the key range.
	Loop,
	/// Repeat the key range, mirrored every other period.
	PingPong,
}

impl TryFrom<&str> for WrapMode {
	type Error = String;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		match value {
			"Clamp" => Ok(WrapMode::Clamp),
			"Loop" => Ok(WrapMode::Loop),
			"PingPong" => Ok(WrapMode::PingPong),
			a => Err(a.to_owned()),
		}
	}
}

impl WrapMode {
	pub fn as_str(self) -> &'static str {
		match self {
			WrapMode::Clamp => "Clamp",
			WrapMode::Loop => "Loop",
			WrapMode::PingPong => "PingPong",
		}
	}

	/// Map `t` into `range`.
	pub fn wrap(self, t: f32, range: InterpRange<f32>) -> f32 {
		if range.is_empty() {
			return range.beg;
		}

		let len = range.len();
		let wrapped = match self {
			WrapMode::Clamp => t,
			WrapMode::Loop => range.beg + (t - range.beg).rem_euclid(len),
			WrapMode::PingPong => {
				let d = (t - range.beg).rem_euclid(2.0 * len);
				range.beg + if d > len { 2.0 * len - d } else { d }
			}
		};

		// rem_euclid may round up to the period itself
		wrapped.clamp(range.beg, range.end)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
	pub time: f32,
	pub value: f32,
	/// Slope arriving at this key.
	pub in_tangent: f32,
	/// Slope leaving this key.
	pub out_tangent: f32,
}

impl Keyframe {
	pub fn new(time: f32, value: f32) -> Self {
		Self {
			time,
			value,
			in_tangent: 0.0,
			out_tangent: 0.0,
		}
	}

	pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
		Self {
			time,
			value,
			in_tangent,
			out_tangent,
		}
	}
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CurveError {
	#[error("Keyframe time must be finite, got {0}")]
	NonFiniteKeyTime(f32),
}

/// Keyframed curve, sorted by key time.
///
/// An empty curve samples to `0.0`, a single key samples to its value everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeCurve {
	keys: Vec<Keyframe>,
	pub interpolate_mode: InterpolateMode,
	pub pre_wrap: WrapMode,
	pub post_wrap: WrapMode,
}

impl KeyframeCurve {
	pub fn new(mut keys: Vec<Keyframe>) -> Result<Self, CurveError> {
		if let Some(key) = keys.iter().find(|k| !k.time.is_finite()) {
			return Err(CurveError::NonFiniteKeyTime(key.time));
		}
		keys.sort_by(|a, b| a.time.total_cmp(&b.time));

		Ok(Self {
			keys,
			..Default::default()
		})
	}

	/// Flat curve at `value`.
	pub fn constant(value: f32) -> Self {
		Self {
			keys: vec![Keyframe::new(0.0, value)],
			..Default::default()
		}
	}

	/// Straight line between two keys.
	pub fn linear(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Result<Self, CurveError> {
		let slope = if time_start == time_end {
			0.0
		} else {
			(value_end - value_start) / (time_end - time_start)
		};

		Self::new(vec![
			Keyframe::with_tangents(time_start, value_start, slope, slope),
			Keyframe::with_tangents(time_end, value_end, slope, slope),
		])
	}

	pub fn keys(&self) -> &[Keyframe] {
		&self.keys
	}

	/// Insert a key keeping the keys sorted. Returns the index it landed at.
	pub fn add_key(&mut self, key: Keyframe) -> Result<usize, CurveError> {
		if !key.time.is_finite() {
			return Err(CurveError::NonFiniteKeyTime(key.time));
		}

		let index = self.keys.partition_point(|k| k.time <= key.time);
		self.keys.insert(index, key);
		Ok(index)
	}

	/// Time span covered by the keys, `None` for an empty curve.
	pub fn domain(&self) -> Option<InterpRange<f32>> {
		match (self.keys.first(), self.keys.last()) {
			(Some(first), Some(last)) => Some(InterpRange::new(first.time, last.time)),
			_ => None,
		}
	}
}

impl Curve for KeyframeCurve {
	fn sample(&self, t: f32) -> f32 {
		let domain = match self.domain() {
			Some(domain) => domain,
			None => return 0.0,
		};
		if self.keys.len() == 1 {
			return self.keys[0].value;
		}

		let t = if t < domain.beg {
			self.pre_wrap.wrap(t, domain)
		} else if t > domain.end {
			self.post_wrap.wrap(t, domain)
		} else {
			t
		};

		// first key strictly after t
		let index = self.keys.partition_point(|k| k.time <= t);
		if index == 0 {
			return self.keys[0].value;
		}
		if index == self.keys.len() {
			return self.keys[index - 1].value;
		}

		let beg = &self.keys[index - 1];
		let end = &self.keys[index];
		interpolate_f32(
			t,
			InterpRange::new(beg.time, end.time),
			InterpRange::new(beg.value, end.value),
			InterpRange::new(beg.out_tangent, end.in_tangent),
			self.interpolate_mode,
		)
	}

	fn set_wrap_mode(&mut self, pre: WrapMode, post: WrapMode) {
		self.pre_wrap = pre;
		self.post_wrap = post;
	}
}

/// A host-provided pure function used as a curve.
#[derive(Debug, Clone, Copy)]
pub struct FnCurve<F>(pub F);

impl<F: Fn(f32) -> f32> Curve for FnCurve<F> {
	#[inline]
	fn sample(&self, t: f32) -> f32 {
		(self.0)(t)
	}
}
