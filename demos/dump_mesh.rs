use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use glam::{vec2, Vec3, Vec4};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use curvemesh::debug::DebugDraw;
use curvemesh::deformer::GridDeformer;
use curvemesh::formats::{dump_config, load_config};
use curvemesh::math::rect::RectBounds;
use curvemesh::render::VertexBuffers;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(help = "Path to a deformer config (.json). Uses a flat 1x1 deformer if omitted.")]
	config: Option<PathBuf>,
	#[arg(long, default_value_t = 10, help = "Number of frames to simulate")]
	frames: u32,
	#[arg(long, default_value_t = 1.0 / 60.0, help = "Seconds per frame")]
	dt: f32,
	#[arg(long, default_value_t = 100.0)]
	width: f32,
	#[arg(long, default_value_t = 100.0)]
	height: f32,
	#[arg(long, default_value_t = 0.5, help = "Normalized pivot, both axes")]
	pivot: f32,
	#[arg(long, help = "Write the last frame as a Wavefront OBJ")]
	obj: Option<PathBuf>,
	#[arg(long, help = "Write the effective config back out as JSON")]
	dump: Option<PathBuf>,
	#[arg(long, help = "Log wireframe draw calls of the last frame")]
	gizmos: bool,
}

/// Logs draw calls instead of drawing.
#[derive(Default)]
struct LogDraw {
	lines: usize,
	spheres: usize,
}

impl DebugDraw for LogDraw {
	fn set_color(&mut self, color: Vec4) {
		info!("gizmo color {color}");
	}

	fn draw_line(&mut self, _from: Vec3, _to: Vec3) {
		self.lines += 1;
	}

	fn draw_sphere(&mut self, _center: Vec3, _radius: f32) {
		self.spheres += 1;
	}
}

fn write_obj(path: &PathBuf, buffers: &VertexBuffers) -> std::io::Result<()> {
	let mut out = BufWriter::new(File::create(path)?);
	for v in &buffers.verts {
		writeln!(out, "v {} {} 0", v.x, v.y)?;
	}
	for uv in &buffers.uvs {
		writeln!(out, "vt {} {}", uv.x, uv.y)?;
	}
	// OBJ indices are 1-based
	for tri in buffers.indices.chunks_exact(3) {
		let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
		writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
	}
	out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	tracing_subscriber::registry()
		.with(fmt::layer())
		.with(LevelFilter::DEBUG)
		.init();

	let mut deformer = match &cli.config {
		Some(path) => {
			info!("Loading deformer config {}", path.display());
			load_config(BufReader::new(File::open(path)?))?
		}
		None => GridDeformer::default(),
	};
	info!("Settings:\n{}", deformer.settings());

	let rect = RectBounds::from_pivot(vec2(cli.pivot, cli.pivot), vec2(cli.width, cli.height));
	let mut buffers = VertexBuffers::default();

	for frame in 0..cli.frames {
		if deformer.advance_time(cli.dt) || frame == 0 {
			deformer.build_mesh(rect, &mut buffers);
		}

		let (min, max) = buffers
			.verts
			.iter()
			.fold((glam::Vec2::splat(f32::MAX), glam::Vec2::splat(f32::MIN)), |(min, max), v| {
				(min.min(*v), max.max(*v))
			});
		info!(
			"frame {frame}: offset {:.3}, {} vertices, {} triangles, extent {min} .. {max}",
			deformer.time_offset(),
			buffers.vertex_count(),
			buffers.triangle_count(),
		);
	}

	if cli.gizmos {
		let mut draw = LogDraw::default();
		deformer.draw_gizmos(Vec3::ZERO, &mut draw);
		info!("Wireframe: {} lines, {} spheres", draw.lines, draw.spheres);
	}

	if let Some(path) = &cli.obj {
		write_obj(path, &buffers)?;
		info!("Wrote {}", path.display());
	}

	if let Some(path) = &cli.dump {
		fs::write(path, dump_config(&deformer))?;
		info!("Wrote {}", path.display());
	}

	Ok(())
}
