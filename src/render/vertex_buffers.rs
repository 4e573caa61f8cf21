use glam::{Vec2, Vec4};

use super::MeshSink;

/// Compact buffers of one generated mesh, ready to hand to a GPU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
	pub verts: Vec<Vec2>,
	pub uvs: Vec<Vec2>,
	pub tangents: Vec<Vec4>,
	pub colors: Vec<[u8; 4]>,
	pub indices: Vec<u32>,
}

impl VertexBuffers {
	pub fn with_capacity(vertices: usize, indices: usize) -> Self {
		Self {
			verts: Vec::with_capacity(vertices),
			uvs: Vec::with_capacity(vertices),
			tangents: Vec::with_capacity(vertices),
			colors: Vec::with_capacity(vertices),
			indices: Vec::with_capacity(indices),
		}
	}

	pub fn vertex_count(&self) -> usize {
		self.verts.len()
	}

	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}

	/// Memory layout: `[[x, y], [x, y], ...]`
	pub fn raw_verts(&self) -> &[f32] {
		bytemuck::cast_slice(self.verts.as_slice())
	}

	/// Memory layout: `[[u, v], [u, v], ...]`
	pub fn raw_uvs(&self) -> &[f32] {
		bytemuck::cast_slice(self.uvs.as_slice())
	}

	/// Memory layout: `[[x, y, z, w], [x, y, z, w], ...]`
	pub fn raw_tangents(&self) -> &[f32] {
		bytemuck::cast_slice(self.tangents.as_slice())
	}

	/// Memory layout: `[r, g, b, a, r, g, b, a, ...]`
	pub fn raw_colors(&self) -> &[u8] {
		bytemuck::cast_slice(self.colors.as_slice())
	}

	/// Memory layout: `[[i0, i1, i2], [i0, i1, i2], ...]`
	pub fn raw_indices(&self) -> &[u32] {
		self.indices.as_slice()
	}
}

impl MeshSink for VertexBuffers {
	fn clear(&mut self) {
		self.verts.clear();
		self.uvs.clear();
		self.tangents.clear();
		self.colors.clear();
		self.indices.clear();
	}

	fn add_vertex(&mut self, position: Vec2, color: [u8; 4], uv: Vec2, tangent: Vec4) {
		self.verts.push(position);
		self.uvs.push(uv);
		self.tangents.push(tangent);
		self.colors.push(color);
	}

	fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
		self.indices.extend_from_slice(&[i0, i1, i2]);
	}
}

#[cfg(test)]
mod tests {
	use glam::vec2;

	use super::*;

	#[test]
	fn raw_views_are_flat() {
		let mut buffers = VertexBuffers::default();
		buffers.add_vertex(vec2(1.0, 2.0), [1, 2, 3, 4], vec2(0.5, 0.25), Vec4::new(1.0, 0.0, 0.0, -1.0));
		buffers.add_vertex(vec2(3.0, 4.0), [5, 6, 7, 8], vec2(0.75, 1.0), Vec4::new(1.0, 0.0, 0.0, -1.0));
		buffers.add_triangle(0, 1, 0);

		assert_eq!(buffers.raw_verts(), &[1.0, 2.0, 3.0, 4.0]);
		assert_eq!(buffers.raw_uvs(), &[0.5, 0.25, 0.75, 1.0]);
		assert_eq!(buffers.raw_tangents().len(), 8);
		assert_eq!(buffers.raw_colors(), &[1, 2, 3, 4, 5, 6, 7, 8]);
		assert_eq!(buffers.raw_indices(), &[0, 1, 0]);
		assert_eq!(buffers.triangle_count(), 1);
	}

	#[test]
	fn clear_empties_everything() {
		let mut buffers = VertexBuffers::with_capacity(1, 3);
		buffers.add_vertex(Vec2::ZERO, [0; 4], Vec2::ZERO, Vec4::ZERO);
		buffers.add_triangle(0, 0, 0);
		buffers.clear();
		assert_eq!(buffers, VertexBuffers::default());
	}
}
