//! Curve-driven deformation of textured UI quads.
//!
//! A [`GridDeformer`](deformer::GridDeformer) splits a rectangle into a grid of cells,
//! bends the grid with two curves, optionally scrolls the curves over time and jitters the vertices with noise,
//! then hands the resulting mesh to a [`MeshSink`](render::MeshSink).

pub mod debug;
pub mod deformer;
pub mod formats;
pub mod grid;
pub mod math;
pub mod render;
pub mod texture;
