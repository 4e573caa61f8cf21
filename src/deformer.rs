use std::fmt;

use glam::{vec2, Vec2, Vec3, Vec4};
use tracing::{debug, trace, warn};

use crate::debug::{draw_wireframe, DebugDraw};
use crate::grid::Grid;
use crate::math::curve::{Curve, KeyframeCurve, WrapMode};
use crate::math::noise::{NoiseSource, PerlinNoise};
use crate::math::rect::RectBounds;
use crate::render::{MeshSink, VertexBuffers};
use crate::texture::TextureId;

/// Tangent written on every vertex.
pub const VERTEX_TANGENT: Vec4 = Vec4::new(1.0, 0.0, 0.0, -1.0);

/// Curve sample that leaves a vertex in place.
pub const NEUTRAL_CURVE_VALUE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAnimation {
	pub enabled: bool,
	/// Curve input units per second.
	pub scale: f32,
}

impl Default for TimeAnimation {
	fn default() -> Self {
		Self {
			enabled: false,
			scale: 10.0,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoiseJitter {
	pub enabled: bool,
	/// Jitter in grid cells at a noise sample of 1.
	pub force: f32,
	pub seed: u32,
}

impl Default for NoiseJitter {
	fn default() -> Self {
		Self {
			enabled: false,
			force: 1.0,
			seed: 0,
		}
	}
}

/// User facing knobs of a deformer.
#[derive(Debug, Clone, PartialEq)]
pub struct DeformSettings {
	/// Cells along X. Raised to 1 on the next build if 0.
	pub x_size: u32,
	/// Cells along Y. Raised to 1 on the next build if 0.
	pub y_size: u32,
	/// Multiplier on curve displacement, in grid cells.
	pub force_curve: f32,
	pub time: TimeAnimation,
	pub noise: NoiseJitter,
	/// RGBA written on every vertex.
	pub color: [u8; 4],
	pub texture: Option<TextureId>,
}

impl Default for DeformSettings {
	fn default() -> Self {
		Self {
			x_size: 1,
			y_size: 1,
			force_curve: 1.0,
			time: TimeAnimation::default(),
			noise: NoiseJitter::default(),
			color: [255; 4],
			texture: None,
		}
	}
}

impl fmt::Display for DeformSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let on_off = |b: bool| if b { "on" } else { "off" };

		#[cfg(feature = "owo")]
		let (grid, time, noise) = {
			use owo_colors::OwoColorize;
			("Grid".green().to_string(), "Time".green().to_string(), "Noise".green().to_string())
		};
		#[cfg(not(feature = "owo"))]
		let (grid, time, noise) = ("Grid", "Time", "Noise");

		writeln!(
			f,
			"{grid}: {}x{} cells, curve force {}",
			self.x_size, self.y_size, self.force_curve
		)?;
		writeln!(f, "{time}: {} (scale {})", on_off(self.time.enabled), self.time.scale)?;
		writeln!(
			f,
			"{noise}: {} (force {}, seed {})",
			on_off(self.noise.enabled),
			self.noise.force,
			self.noise.seed
		)
	}
}

/// Buffers reused between builds as long as the grid does not change.
#[derive(Debug)]
struct VertexCache {
	grid: Grid,
	/// Undeformed lattice coordinates.
	base: Vec<Vec2>,
	/// Output positions of the last build.
	positions: Vec<Vec2>,
	rect: RectBounds,
}

impl VertexCache {
	fn new(grid: Grid) -> Self {
		Self {
			grid,
			base: grid.lattice().map(|p| p.as_vec2()).collect(),
			positions: vec![Vec2::ZERO; grid.vertex_count()],
			rect: RectBounds::default(),
		}
	}
}

/// Generates a grid mesh over a rectangle and bends it with two curves, time and noise.
///
/// `curve_x` is sampled along the X axis and offsets vertices vertically,
/// `curve_y` is sampled along the Y axis and offsets vertices horizontally.
/// A curve sample of `1.0` means no displacement.
#[derive(Debug)]
pub struct GridDeformer<C = KeyframeCurve, N = PerlinNoise> {
	settings: DeformSettings,
	curve_x: C,
	curve_y: C,
	noise: N,
	/// Added to curve inputs, advanced by time animation.
	time_offset: f32,
	/// Unscaled seconds, drives the noise.
	clock: f32,
	dirty: bool,
	cache: Option<VertexCache>,
}

impl<C: Curve> GridDeformer<C, PerlinNoise> {
	/// Deformer jittered by Perlin noise seeded from `settings.noise.seed`.
	pub fn new(settings: DeformSettings, curve_x: C, curve_y: C) -> Self {
		let noise = PerlinNoise::new(settings.noise.seed);
		Self::with_noise(settings, curve_x, curve_y, noise)
	}
}

impl Default for GridDeformer<KeyframeCurve, PerlinNoise> {
	/// Flat single-cell deformer.
	fn default() -> Self {
		Self::new(
			DeformSettings::default(),
			KeyframeCurve::constant(NEUTRAL_CURVE_VALUE),
			KeyframeCurve::constant(NEUTRAL_CURVE_VALUE),
		)
	}
}

impl<C: Curve, N: NoiseSource> GridDeformer<C, N> {
	pub fn with_noise(settings: DeformSettings, curve_x: C, curve_y: C, noise: N) -> Self {
		Self {
			settings,
			curve_x,
			curve_y,
			noise,
			time_offset: 0.0,
			clock: 0.0,
			dirty: true,
			cache: None,
		}
	}

	pub fn settings(&self) -> &DeformSettings {
		&self.settings
	}

	/// Marks the mesh for rebuild.
	pub fn settings_mut(&mut self) -> &mut DeformSettings {
		self.dirty = true;
		&mut self.settings
	}

	pub fn set_settings(&mut self, settings: DeformSettings) {
		self.settings = settings;
		self.dirty = true;
	}

	pub fn curve_x(&self) -> &C {
		&self.curve_x
	}

	/// Marks the mesh for rebuild.
	pub fn curve_x_mut(&mut self) -> &mut C {
		self.dirty = true;
		&mut self.curve_x
	}

	pub fn curve_y(&self) -> &C {
		&self.curve_y
	}

	/// Marks the mesh for rebuild.
	pub fn curve_y_mut(&mut self) -> &mut C {
		self.dirty = true;
		&mut self.curve_y
	}

	pub fn noise(&self) -> &N {
		&self.noise
	}

	pub fn time_offset(&self) -> f32 {
		self.time_offset
	}

	pub fn clock(&self) -> f32 {
		self.clock
	}

	/// Override the noise clock, e.g. with the host's wall-clock time.
	pub fn set_clock(&mut self, seconds: f32) {
		self.clock = seconds;
		if self.settings.noise.enabled {
			self.dirty = true;
		}
	}

	/// Whether the last built mesh is outdated.
	pub fn needs_rebuild(&self) -> bool {
		self.dirty
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Grid of the last build.
	pub fn grid(&self) -> Option<Grid> {
		self.cache.as_ref().map(|cache| cache.grid)
	}

	/// Vertex positions of the last build, empty before the first one.
	pub fn cached_positions(&self) -> &[Vec2] {
		match &self.cache {
			Some(cache) => &cache.positions,
			None => &[],
		}
	}

	/// Step time by `dt` seconds. Returns whether the mesh needs a rebuild.
	///
	/// With time animation on, curve inputs scroll by `dt * time.scale` and both curves start looping.
	/// Otherwise the scroll is reset.
	pub fn advance_time(&mut self, dt: f32) -> bool {
		self.clock += dt;

		if self.settings.time.enabled {
			self.time_offset += dt * self.settings.time.scale;
			self.curve_x.set_wrap_mode(WrapMode::Loop, WrapMode::Loop);
			self.curve_y.set_wrap_mode(WrapMode::Loop, WrapMode::Loop);
		} else {
			self.time_offset = 0.0;
		}

		if self.settings.time.enabled || self.settings.noise.enabled {
			self.dirty = true;
		}

		trace!(
			"Advanced deformer by {dt}s: time offset {}, clock {}",
			self.time_offset,
			self.clock
		);
		self.dirty
	}

	/// Rebuild the whole mesh over `rect` and submit it to `sink`.
	pub fn build_mesh<S: MeshSink>(&mut self, rect: RectBounds, sink: &mut S) {
		if self.settings.x_size < 1 || self.settings.y_size < 1 {
			warn!(
				"Grid size {}x{} raised to at least one cell per axis",
				self.settings.x_size, self.settings.y_size
			);
			self.settings.x_size = self.settings.x_size.max(1);
			self.settings.y_size = self.settings.y_size.max(1);
		}
		let grid = Grid::new(self.settings.x_size, self.settings.y_size);

		if matches!(&self.cache, Some(cache) if cache.grid != grid) {
			debug!("Grid resized, discarding cached vertices");
			self.cache = None;
		}
		let cache = self.cache.get_or_insert_with(|| {
			debug!(
				"Allocating {} vertices for a {}x{} grid",
				grid.vertex_count(),
				grid.x_size(),
				grid.y_size()
			);
			VertexCache::new(grid)
		});

		self.noise.reseed(self.settings.noise.seed);
		sink.clear();

		let cells = grid.cells();
		let force_curve = self.settings.force_curve;
		let noise = &self.settings.noise;
		for (i, point) in grid.lattice().enumerate() {
			let uv = grid.uv(point);

			let curve_x = (self.curve_x.sample(self.time_offset + uv.x) - NEUTRAL_CURVE_VALUE) * force_curve;
			let curve_y = (self.curve_y.sample(self.time_offset + uv.y) - NEUTRAL_CURVE_VALUE) * force_curve;

			let jitter = if noise.enabled {
				vec2(
					self.noise.sample(self.clock * point.x as f32, 0.0),
					self.noise.sample(0.0, self.clock * point.y as f32),
				) * noise.force
			} else {
				Vec2::ZERO
			};

			let position = rect.map_from_grid(cache.base[i] + vec2(curve_y, curve_x) + jitter, cells);
			cache.positions[i] = position;
			sink.add_vertex(position, self.settings.color, uv, VERTEX_TANGENT);
		}

		for [i0, i1, i2] in grid.triangles() {
			sink.add_triangle(i0, i1, i2);
		}

		cache.rect = rect;
		self.dirty = false;
	}

	/// `build_mesh()` into fresh buffers.
	pub fn build_buffers(&mut self, rect: RectBounds) -> VertexBuffers {
		let grid = Grid::new(self.settings.x_size, self.settings.y_size);
		let mut buffers = VertexBuffers::with_capacity(grid.vertex_count(), grid.index_count());
		self.build_mesh(rect, &mut buffers);
		buffers
	}

	/// Draw the last built mesh as a wireframe, offset by `origin`. Draws nothing before the first build.
	pub fn draw_gizmos<D: DebugDraw>(&self, origin: Vec3, draw: &mut D) {
		if let Some(cache) = &self.cache {
			draw_wireframe(&cache.grid, &cache.positions, &cache.rect, origin, draw);
		}
	}
}
