pub mod config;
mod json;

use std::io::{self, Read};

use crate::deformer::GridDeformer;
use crate::math::curve::KeyframeCurve;
use crate::math::noise::PerlinNoise;

pub use self::json::JsonError;
use config::{deserialize_deformer, serialize_deformer, ConfigParseError};

#[derive(Debug, thiserror::Error)]
pub enum LoadConfigError {
	#[error("Could not read deformer config\n  - {0}")]
	Io(#[from] io::Error),
	#[error("Deformer config is not valid JSON\n  - {0}")]
	JsonParse(#[from] ::json::Error),
	#[error("Could not parse deformer config\n  - {0}")]
	Config(#[from] ConfigParseError),
}

/// Read a deformer description from a JSON document.
pub fn load_config<R: Read>(mut data: R) -> Result<GridDeformer<KeyframeCurve, PerlinNoise>, LoadConfigError> {
	let mut text = String::new();
	data.read_to_string(&mut text)?;
	let payload = ::json::parse(&text)?;
	Ok(deserialize_deformer(&payload)?)
}

/// Pretty printed JSON description of a deformer, readable by `load_config()`.
pub fn dump_config(deformer: &GridDeformer<KeyframeCurve, PerlinNoise>) -> String {
	::json::stringify_pretty(serialize_deformer(deformer), 2)
}
