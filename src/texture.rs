/// Handle to a texture owned by the host. The deformer carries it along but never samples it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub(crate) usize);

impl TextureId {
	pub fn new(raw: usize) -> Self {
		Self(raw)
	}

	pub fn raw(&self) -> usize {
		self.0
	}
}
