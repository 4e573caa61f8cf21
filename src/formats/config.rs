use json::JsonValue;

use crate::deformer::{DeformSettings, GridDeformer, NoiseJitter, TimeAnimation};
use crate::math::curve::{CurveError, Keyframe, KeyframeCurve, WrapMode};
use crate::math::interp::InterpolateMode;
use crate::math::noise::PerlinNoise;
use crate::texture::TextureId;

use super::json::{JsonError, JsonObject, SerialExtend};

pub type ConfigParseResult<T> = Result<T, ConfigParseError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigParseError {
	#[error(transparent)]
	JsonError(#[from] JsonError),
	#[error("Unknown interpolate mode {0:?}")]
	UnknownInterpolateMode(String),
	#[error("Unknown wrap mode {0:?}")]
	UnknownWrapMode(String),
	#[error("Expected 4 color channels, got {0}")]
	Not4ColorChannels(usize),
	#[error("Color channel {0} is not an integer in 0..=255")]
	InvalidColorChannel(usize),
	#[error(transparent)]
	InvalidCurve(#[from] CurveError),
}

impl ConfigParseError {
	pub fn nested(self, key: &str) -> Self {
		match self {
			ConfigParseError::JsonError(err) => ConfigParseError::JsonError(err.nested(key)),
			_ => self,
		}
	}
}

fn vals<T>(key: &str, res: ConfigParseResult<T>) -> ConfigParseResult<T> {
	res.map_err(|e| e.nested(key))
}

fn as_object<'file>(msg: &str, val: &'file JsonValue) -> ConfigParseResult<JsonObject<'file>> {
	if let Some(obj) = val.as_object() {
		Ok(JsonObject(obj))
	} else {
		Err(ConfigParseError::JsonError(JsonError::ValueIsNotObject(msg.to_owned())))
	}
}

// deserialization

/// Build a deformer from its JSON description. Missing optional sections fall back to defaults.
pub fn deserialize_deformer(value: &JsonValue) -> ConfigParseResult<GridDeformer<KeyframeCurve, PerlinNoise>> {
	let obj = as_object("deformer", value)?;

	let settings = deserialize_settings(obj)?;
	let curve_x = vals("curve_x", deserialize_curve(obj.get_object("curve_x")?))?;
	let curve_y = vals("curve_y", deserialize_curve(obj.get_object("curve_y")?))?;

	Ok(GridDeformer::new(settings, curve_x, curve_y))
}

fn deserialize_settings(obj: JsonObject) -> ConfigParseResult<DeformSettings> {
	let defaults = DeformSettings::default();

	let (x_size, y_size) = vals("grid", deserialize_grid_size(obj.get_object("grid")?))?;

	let force_curve = if obj.has("force_curve") {
		obj.get_f32("force_curve")?
	} else {
		defaults.force_curve
	};

	let time = if obj.has("time") {
		vals("time", deserialize_time(obj.get_object("time")?))?
	} else {
		defaults.time
	};

	let noise = if obj.has("noise") {
		vals("noise", deserialize_noise(obj.get_object("noise")?))?
	} else {
		defaults.noise
	};

	let color = if obj.has("color") {
		deserialize_color(obj.get_list("color")?)?
	} else {
		defaults.color
	};

	let texture = if obj.has("texture") {
		obj.get_nullable_usize("texture")?.map(TextureId)
	} else {
		None
	};

	Ok(DeformSettings {
		x_size,
		y_size,
		force_curve,
		time,
		noise,
		color,
		texture,
	})
}

/// Negative sizes are read as 0, left for the mesh build to raise.
fn deserialize_grid_size(obj: JsonObject) -> ConfigParseResult<(u32, u32)> {
	let size = |key: &str| -> ConfigParseResult<u32> {
		let raw = obj.get_i64(key)?;
		u32::try_from(raw.max(0)).map_err(|_| ConfigParseError::JsonError(JsonError::ParseIntError(key.to_owned())))
	};
	Ok((size("x_size")?, size("y_size")?))
}

fn deserialize_time(obj: JsonObject) -> ConfigParseResult<TimeAnimation> {
	let defaults = TimeAnimation::default();
	Ok(TimeAnimation {
		enabled: obj.get_bool("enabled")?,
		scale: if obj.has("scale") {
			obj.get_f32("scale")?
		} else {
			defaults.scale
		},
	})
}

fn deserialize_noise(obj: JsonObject) -> ConfigParseResult<NoiseJitter> {
	let defaults = NoiseJitter::default();
	Ok(NoiseJitter {
		enabled: obj.get_bool("enabled")?,
		force: if obj.has("force") {
			obj.get_f32("force")?
		} else {
			defaults.force
		},
		seed: if obj.has("seed") {
			obj.get_u32("seed")?
		} else {
			defaults.seed
		},
	})
}

fn deserialize_color(channels: &[JsonValue]) -> ConfigParseResult<[u8; 4]> {
	if channels.len() != 4 {
		return Err(ConfigParseError::Not4ColorChannels(channels.len()));
	}

	let mut color = [0; 4];
	for (i, (channel, val)) in color.iter_mut().zip(channels).enumerate() {
		*channel = val.as_u8().ok_or(ConfigParseError::InvalidColorChannel(i))?;
	}
	Ok(color)
}

fn deserialize_curve(obj: JsonObject) -> ConfigParseResult<KeyframeCurve> {
	let keys = obj
		.get_list("keys")?
		.iter()
		.enumerate()
		.map(|(i, key)| {
			as_object("key", key)
				.and_then(deserialize_keyframe)
				.map_err(|e| match e {
					ConfigParseError::JsonError(err) => ConfigParseError::JsonError(err.in_list(i)),
					e => e,
				})
		})
		.collect::<ConfigParseResult<Vec<_>>>();
	let keys = vals("keys", keys)?;

	let mut curve = KeyframeCurve::new(keys)?;

	if obj.has("mode") {
		curve.interpolate_mode =
			InterpolateMode::try_from(obj.get_str("mode")?).map_err(ConfigParseError::UnknownInterpolateMode)?;
	}
	if obj.has("pre_wrap") {
		curve.pre_wrap = WrapMode::try_from(obj.get_str("pre_wrap")?).map_err(ConfigParseError::UnknownWrapMode)?;
	}
	if obj.has("post_wrap") {
		curve.post_wrap = WrapMode::try_from(obj.get_str("post_wrap")?).map_err(ConfigParseError::UnknownWrapMode)?;
	}

	Ok(curve)
}

/// A `null` tangent is a step.
fn deserialize_tangent(obj: JsonObject, key: &str) -> ConfigParseResult<f32> {
	if obj.0.get(key).is_none() {
		return Ok(0.0);
	}
	Ok(obj.get_nullable_f32(key)?.unwrap_or(f32::INFINITY))
}

fn deserialize_keyframe(obj: JsonObject) -> ConfigParseResult<Keyframe> {
	Ok(Keyframe {
		time: obj.get_f32("time")?,
		value: obj.get_f32("value")?,
		in_tangent: deserialize_tangent(obj, "in_tangent")?,
		out_tangent: deserialize_tangent(obj, "out_tangent")?,
	})
}

// serialization

pub fn serialize_deformer(deformer: &GridDeformer<KeyframeCurve, PerlinNoise>) -> JsonValue {
	let mut obj = serialize_settings(deformer.settings());
	obj["curve_x"] = serialize_curve(deformer.curve_x());
	obj["curve_y"] = serialize_curve(deformer.curve_y());
	obj
}

pub fn serialize_settings(settings: &DeformSettings) -> JsonValue {
	let mut obj = JsonValue::new_object();

	let mut grid = JsonValue::new_object();
	grid["x_size"] = settings.x_size.into();
	grid["y_size"] = settings.y_size.into();
	obj["grid"] = grid;

	obj["force_curve"] = settings.force_curve.into();

	let mut time = JsonValue::new_object();
	time["enabled"] = settings.time.enabled.into();
	time["scale"] = settings.time.scale.into();
	obj["time"] = time;

	let mut noise = JsonValue::new_object();
	noise["enabled"] = settings.noise.enabled.into();
	noise["force"] = settings.noise.force.into();
	noise["seed"] = settings.noise.seed.into();
	obj["noise"] = noise;

	obj["color"] = settings.color.to_vec().into();
	obj["texture"] = settings.texture.map(|tex| tex.raw()).into();

	obj
}

fn serialize_tangent(tangent: f32) -> JsonValue {
	if tangent.is_finite() {
		tangent.into()
	} else {
		JsonValue::Null
	}
}

pub fn serialize_curve(curve: &KeyframeCurve) -> JsonValue {
	let mut obj = JsonValue::new_object();
	obj["mode"] = curve.interpolate_mode.as_str().into();
	obj["pre_wrap"] = curve.pre_wrap.as_str().into();
	obj["post_wrap"] = curve.post_wrap.as_str().into();

	let keys = curve
		.keys()
		.iter()
		.map(|key| {
			let mut k = JsonValue::new_object();
			k["time"] = key.time.into();
			k["value"] = key.value.into();
			k["in_tangent"] = serialize_tangent(key.in_tangent);
			k["out_tangent"] = serialize_tangent(key.out_tangent);
			k
		})
		.collect::<Vec<_>>();
	obj["keys"] = JsonValue::Array(keys);

	obj
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::math::curve::Curve;

	const WAVE: &str = r#"{
		"grid": { "x_size": 8, "y_size": 4 },
		"force_curve": 0.5,
		"time": { "enabled": true, "scale": 2.5 },
		"noise": { "enabled": true, "force": 0.25, "seed": 9 },
		"color": [255, 128, 0, 200],
		"texture": 3,
		"curve_x": {
			"mode": "Linear",
			"pre_wrap": "Loop",
			"post_wrap": "PingPong",
			"keys": [
				{ "time": 1, "value": 1 },
				{ "time": 0, "value": 1.5, "in_tangent": 0.5, "out_tangent": null }
			]
		},
		"curve_y": { "keys": [ { "time": 0, "value": 1 } ] }
	}"#;

	fn parse(text: &str) -> ConfigParseResult<GridDeformer<KeyframeCurve, PerlinNoise>> {
		deserialize_deformer(&json::parse(text).unwrap())
	}

	#[test]
	fn full_config() {
		let deformer = parse(WAVE).unwrap();
		let settings = deformer.settings();

		assert_eq!((settings.x_size, settings.y_size), (8, 4));
		assert_eq!(settings.force_curve, 0.5);
		assert_eq!(settings.time, TimeAnimation { enabled: true, scale: 2.5 });
		assert_eq!(
			settings.noise,
			NoiseJitter {
				enabled: true,
				force: 0.25,
				seed: 9
			}
		);
		assert_eq!(deformer.noise().seed(), 9);
		assert_eq!(settings.color, [255, 128, 0, 200]);
		assert_eq!(settings.texture, Some(TextureId(3)));

		let curve_x = deformer.curve_x();
		assert_eq!(curve_x.interpolate_mode, InterpolateMode::Linear);
		assert_eq!(curve_x.pre_wrap, WrapMode::Loop);
		assert_eq!(curve_x.post_wrap, WrapMode::PingPong);
		assert_eq!(curve_x.keys()[0].time, 0.0);
		assert_eq!(curve_x.keys()[0].in_tangent, 0.5);
		assert!(curve_x.keys()[0].out_tangent.is_infinite());
		assert_eq!(curve_x.keys()[1].in_tangent, 0.0);

		assert_eq!(deformer.curve_y().interpolate_mode, InterpolateMode::Cubic);
		assert_eq!(deformer.curve_y().sample(0.7), 1.0);
	}

	#[test]
	fn minimal_config_uses_defaults() {
		let deformer = parse(
			r#"{
				"grid": { "x_size": -2, "y_size": 3 },
				"curve_x": { "keys": [] },
				"curve_y": { "keys": [] }
			}"#,
		)
		.unwrap();
		let settings = deformer.settings();

		assert_eq!((settings.x_size, settings.y_size), (0, 3));
		assert_eq!(settings.force_curve, 1.0);
		assert_eq!(settings.time, TimeAnimation::default());
		assert_eq!(settings.noise, NoiseJitter::default());
		assert_eq!(settings.color, [255; 4]);
		assert_eq!(settings.texture, None);
		assert!(deformer.curve_x().keys().is_empty());
	}

	#[test]
	fn errors_carry_their_path() {
		let err = parse(
			r#"{
				"grid": { "x_size": 1, "y_size": 1 },
				"curve_x": { "keys": [ { "time": 0, "value": 1 }, { "time": 1 } ] },
				"curve_y": { "keys": [] }
			}"#,
		)
		.unwrap_err();
		let msg = err.to_string();
		assert!(msg.contains("\"curve_x\""), "{msg}");
		assert!(msg.contains("index 1"), "{msg}");
		assert!(msg.contains("\"value\""), "{msg}");
	}

	#[test]
	fn missing_grid_is_an_error() {
		let err = parse(r#"{ "curve_x": { "keys": [] }, "curve_y": { "keys": [] } }"#).unwrap_err();
		assert!(matches!(err, ConfigParseError::JsonError(JsonError::KeyDoesNotExist(_))));
	}

	#[test]
	fn unknown_modes_and_bad_colors() {
		let err = parse(
			r#"{ "grid": { "x_size": 1, "y_size": 1 },
				"curve_x": { "mode": "Bezier", "keys": [] }, "curve_y": { "keys": [] } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigParseError::UnknownInterpolateMode(ref m) if m == "Bezier"));

		let err = parse(
			r#"{ "grid": { "x_size": 1, "y_size": 1 },
				"curve_x": { "post_wrap": "Mirror", "keys": [] }, "curve_y": { "keys": [] } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigParseError::UnknownWrapMode(_)));

		let err = parse(
			r#"{ "grid": { "x_size": 1, "y_size": 1 }, "color": [1, 2, 3],
				"curve_x": { "keys": [] }, "curve_y": { "keys": [] } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigParseError::Not4ColorChannels(3)));

		let err = parse(
			r#"{ "grid": { "x_size": 1, "y_size": 1 }, "color": [1, 2, 300, 4],
				"curve_x": { "keys": [] }, "curve_y": { "keys": [] } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigParseError::InvalidColorChannel(2)));
	}

	#[test]
	fn serialized_config_reads_back() {
		let deformer = parse(WAVE).unwrap();
		let json = serialize_deformer(&deformer);
		let reread = deserialize_deformer(&json).unwrap();

		assert_eq!(reread.settings(), deformer.settings());
		assert_eq!(reread.curve_x(), deformer.curve_x());
		assert_eq!(reread.curve_y(), deformer.curve_y());
	}
}
