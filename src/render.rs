mod vertex_buffers;

use glam::{Vec2, Vec4};

pub use vertex_buffers::VertexBuffers;

/// Receiver of generated meshes.
///
/// Following a "bring your own rendering backend" design, the deformer only emits vertices and triangles.
/// A sink may upload them straight to the GPU, batch them with other UI elements,
/// or just collect them as `VertexBuffers` does.
pub trait MeshSink {
	/// Drop everything submitted so far. Called at the start of every mesh build.
	fn clear(&mut self);

	/// Append one vertex. Vertices are indexed in submission order, starting at 0 after `clear()`.
	fn add_vertex(&mut self, position: Vec2, color: [u8; 4], uv: Vec2, tangent: Vec4);

	/// Append one triangle referring to previously added vertices.
	fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);
}
