use glam::{vec2, UVec2, Vec2};

/// Topology of a `x_size` by `y_size` cell lattice.
///
/// Vertices are laid out row-major, `(x_size + 1) * (y_size + 1)` of them,
/// cells likewise, `x_size * y_size` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
	x_size: u32,
	y_size: u32,
}

impl Grid {
	/// Dimensions smaller than one are raised to one.
	pub fn new(x_size: u32, y_size: u32) -> Self {
		Self {
			x_size: x_size.max(1),
			y_size: y_size.max(1),
		}
	}

	#[inline]
	pub fn x_size(&self) -> u32 {
		self.x_size
	}

	#[inline]
	pub fn y_size(&self) -> u32 {
		self.y_size
	}

	/// Vertices per row.
	#[inline]
	pub fn row_len(&self) -> u32 {
		self.x_size + 1
	}

	pub fn vertex_count(&self) -> usize {
		(self.x_size as usize + 1) * (self.y_size as usize + 1)
	}

	pub fn cell_count(&self) -> usize {
		self.x_size as usize * self.y_size as usize
	}

	pub fn index_count(&self) -> usize {
		self.cell_count() * 6
	}

	/// Number of cells along each axis as floats.
	pub fn cells(&self) -> Vec2 {
		vec2(self.x_size as f32, self.y_size as f32)
	}

	#[inline]
	pub fn vertex_index(&self, x: u32, y: u32) -> u32 {
		y * self.row_len() + x
	}

	/// All lattice points, in vertex order.
	pub fn lattice(&self) -> impl Iterator<Item = UVec2> {
		let (x_size, y_size) = (self.x_size, self.y_size);
		(0..=y_size).flat_map(move |y| (0..=x_size).map(move |x| UVec2::new(x, y)))
	}

	#[inline]
	pub fn uv(&self, point: UVec2) -> Vec2 {
		point.as_vec2() / self.cells()
	}

	/// Corner vertices of a cell: bottom left, bottom right, top left, top right.
	///
	/// Panics if `cell` is out of range.
	pub fn cell_corners(&self, cell: usize) -> [u32; 4] {
		assert!(
			cell < self.cell_count(),
			"Cell index out of bounds: {} >= {}",
			cell,
			self.cell_count()
		);

		let cell = cell as u32;
		let vi = self.vertex_index(cell % self.x_size, cell / self.x_size);
		[vi, vi + 1, vi + self.x_size + 1, vi + self.x_size + 2]
	}

	/// Two triangles per cell, in cell order.
	pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
		(0..self.cell_count()).flat_map(move |cell| {
			let [vi, right, up, up_right] = self.cell_corners(cell);
			[[vi, up, right], [right, up, up_right]]
		})
	}
}
