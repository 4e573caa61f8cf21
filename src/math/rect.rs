use glam::{vec2, Vec2};

/// Axis-aligned rectangle the deformed mesh is laid out in, in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBounds {
	pub min: Vec2,
	pub max: Vec2,
}

impl RectBounds {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	/// Rectangle of `size` placed so that `pivot` (normalized, `(0, 0)` = bottom left) sits at the origin.
	pub fn from_pivot(pivot: Vec2, size: Vec2) -> Self {
		Self {
			min: (Vec2::ZERO - pivot) * size,
			max: (Vec2::ONE - pivot) * size,
		}
	}

	pub fn size(&self) -> Vec2 {
		self.max - self.min
	}

	/// Size of one cell of a grid dividing this rectangle in `cells` columns and rows.
	pub fn cell_size(&self, cells: Vec2) -> Vec2 {
		self.size() / cells
	}

	/// Map a point given in grid units into this rectangle.
	#[inline]
	pub fn map_from_grid(&self, grid_pos: Vec2, cells: Vec2) -> Vec2 {
		self.min + grid_pos * self.cell_size(cells)
	}
}

impl Default for RectBounds {
	/// 100x100 centered on the origin.
	fn default() -> Self {
		Self::from_pivot(vec2(0.5, 0.5), vec2(100.0, 100.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pivot_places_origin() {
		let rect = RectBounds::from_pivot(vec2(0.5, 0.5), vec2(200.0, 100.0));
		assert_eq!(rect.min, vec2(-100.0, -50.0));
		assert_eq!(rect.max, vec2(100.0, 50.0));

		let rect = RectBounds::from_pivot(Vec2::ZERO, vec2(4.0, 2.0));
		assert_eq!(rect.min, Vec2::ZERO);
		assert_eq!(rect.max, vec2(4.0, 2.0));
	}

	#[test]
	fn grid_mapping() {
		let rect = RectBounds::new(vec2(-2.0, 0.0), vec2(2.0, 8.0));
		let cells = vec2(4.0, 2.0);
		assert_eq!(rect.map_from_grid(Vec2::ZERO, cells), vec2(-2.0, 0.0));
		assert_eq!(rect.map_from_grid(vec2(4.0, 2.0), cells), vec2(2.0, 8.0));
		assert_eq!(rect.map_from_grid(vec2(1.0, 1.0), cells), vec2(-1.0, 4.0));
	}
}
