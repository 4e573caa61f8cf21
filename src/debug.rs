use glam::{Vec2, Vec3, Vec4};

use crate::grid::Grid;
use crate::math::rect::RectBounds;

/// Immediate-mode drawing of development overlays, provided by the host.
pub trait DebugDraw {
	fn set_color(&mut self, color: Vec4);
	fn draw_line(&mut self, from: Vec3, to: Vec3);
	fn draw_sphere(&mut self, center: Vec3, radius: f32);
}

/// Translucent black.
pub const WIREFRAME_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.6);

/// Sphere radius relative to the smaller side of a cell.
const VERTEX_MARKER_SCALE: f32 = 0.1;

/// Draw every triangle of `grid` over `positions` as three edges plus a sphere per corner, offset by `origin`.
pub(crate) fn draw_wireframe<D: DebugDraw>(
	grid: &Grid,
	positions: &[Vec2],
	rect: &RectBounds,
	origin: Vec3,
	draw: &mut D,
) {
	debug_assert_eq!(positions.len(), grid.vertex_count());

	let cell = rect.cell_size(grid.cells()) * VERTEX_MARKER_SCALE;
	let radius = cell.x.min(cell.y);

	draw.set_color(WIREFRAME_COLOR);
	for [i0, i1, i2] in grid.triangles() {
		let p1 = positions[i0 as usize].extend(0.0) + origin;
		let p2 = positions[i1 as usize].extend(0.0) + origin;
		let p3 = positions[i2 as usize].extend(0.0) + origin;

		draw.draw_line(p1, p2);
		draw.draw_line(p1, p3);
		draw.draw_line(p3, p2);
		draw.draw_sphere(p1, radius);
		draw.draw_sphere(p2, radius);
		draw.draw_sphere(p3, radius);
	}
}

#[cfg(test)]
mod tests {
	use glam::vec2;

	use super::*;

	#[derive(Default)]
	struct Recorder {
		color: Option<Vec4>,
		lines: Vec<(Vec3, Vec3)>,
		spheres: Vec<(Vec3, f32)>,
	}

	impl DebugDraw for Recorder {
		fn set_color(&mut self, color: Vec4) {
			self.color = Some(color);
		}

		fn draw_line(&mut self, from: Vec3, to: Vec3) {
			self.lines.push((from, to));
		}

		fn draw_sphere(&mut self, center: Vec3, radius: f32) {
			self.spheres.push((center, radius));
		}
	}

	#[test]
	fn one_cell_wireframe() {
		let grid = Grid::new(1, 1);
		let rect = RectBounds::new(Vec2::ZERO, vec2(10.0, 20.0));
		let positions = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 20.0), vec2(10.0, 20.0)];
		let origin = Vec3::new(1.0, 2.0, 3.0);

		let mut recorder = Recorder::default();
		draw_wireframe(&grid, &positions, &rect, origin, &mut recorder);

		assert_eq!(recorder.color, Some(WIREFRAME_COLOR));
		assert_eq!(recorder.lines.len(), 6);
		assert_eq!(recorder.spheres.len(), 6);
		assert_eq!(recorder.lines[0], (Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 22.0, 3.0)));
		assert!(recorder.spheres.iter().all(|&(_, r)| r == 1.0));
	}
}
